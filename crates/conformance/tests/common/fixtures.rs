//! Registry fixtures for conformance tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use helios_conformance::{
    BindingRegistry, HandlerBinding, Parameter, QueryParameter, ResourceBinding,
    ResourceOperation, SearchParamType, ServerIdentity, SystemOperation,
};

/// Server identity used across tests.
pub fn test_identity() -> ServerIdentity {
    ServerIdentity::new("Helios Test Server", "0.1.0-test")
}

/// Shorthand for an optional query parameter.
pub fn optional(name: &str, param_type: SearchParamType) -> Parameter {
    QueryParameter::optional(name, param_type).into()
}

/// Shorthand for a required query parameter.
pub fn required(name: &str, param_type: SearchParamType) -> Parameter {
    QueryParameter::required(name, param_type).into()
}

/// Handler serving a single resource-level operation.
pub fn handler(name: &str, operation: ResourceOperation) -> HandlerBinding {
    HandlerBinding::new(name).with_resource_operation(operation)
}

/// A small server: Patient with CRUD + history + search, Observation with
/// read + chained search, and system-level transaction/history.
pub fn clinical_bindings() -> Vec<ResourceBinding> {
    vec![
        ResourceBinding::new("Patient")
            .with_handler(handler("read", ResourceOperation::Read))
            .with_handler(handler("create", ResourceOperation::Create))
            .with_handler(handler("update", ResourceOperation::Update))
            .with_handler(
                handler("history", ResourceOperation::HistoryInstance)
                    .with_system_operation(SystemOperation::HistorySystem),
            )
            .with_handler(HandlerBinding::search(
                "searchByName",
                vec![
                    optional("_count", SearchParamType::Number),
                    required("name", SearchParamType::String),
                ],
            ))
            .with_handler(HandlerBinding::search(
                "searchByIdentifier",
                vec![required("identifier", SearchParamType::Token)],
            )),
        ResourceBinding::new("Observation")
            .with_handler(handler("read", ResourceOperation::Read))
            .with_handler(HandlerBinding::search(
                "searchBySubject",
                vec![
                    optional("_count", SearchParamType::Number),
                    required("subject", SearchParamType::Reference),
                    required("subject.name", SearchParamType::String),
                ],
            ))
            .with_handler(HandlerBinding::search(
                "searchBySubjectIdentifier",
                vec![
                    required("subject", SearchParamType::Reference),
                    optional("subject.identifier", SearchParamType::Token),
                    Parameter::Other {
                        description: "request details".to_string(),
                    },
                    required("subject.birthdate", SearchParamType::Date),
                ],
            )),
        ResourceBinding::new("Bundle").with_handler(
            HandlerBinding::new("transaction").with_system_operation(SystemOperation::Transaction),
        ),
        ResourceBinding::new("Encounter").with_handler(
            handler("history", ResourceOperation::HistoryType)
                .with_system_operation(SystemOperation::HistorySystem),
        ),
    ]
}

/// Registry that counts how many snapshots have been taken.
#[derive(Debug, Default)]
pub struct CountingRegistry {
    bindings: Vec<ResourceBinding>,
    traversals: AtomicUsize,
}

impl CountingRegistry {
    /// Creates a counting registry over fixed bindings.
    pub fn new(bindings: Vec<ResourceBinding>) -> Self {
        Self {
            bindings,
            traversals: AtomicUsize::new(0),
        }
    }

    /// Number of snapshots taken so far.
    pub fn traversals(&self) -> usize {
        self.traversals.load(Ordering::SeqCst)
    }
}

impl BindingRegistry for CountingRegistry {
    fn resource_bindings(&self) -> Vec<ResourceBinding> {
        self.traversals.fetch_add(1, Ordering::SeqCst);
        self.bindings.clone()
    }
}
