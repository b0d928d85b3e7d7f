//! FHIR `Conformance` JSON rendering.
//!
//! Renders a [`CapabilityDocument`] into the FHIR `Conformance` resource
//! shape. Chain metadata has no slot in the base resource, so it travels as
//! extensions on the `chain` primitives (the `_chain` array in FHIR JSON):
//! every link carries a [`CHAIN_REQUIRED_EXTENSION`], and each alternative is
//! an [`ALSO_CHAIN_EXTENSION`] holding its own nested required flag.

use serde_json::{Value, json};

use crate::model::{CapabilityDocument, ChainLink, ResourceCapability, SearchParameterDeclaration};

/// Extension URL flagging whether a chain qualifier is required.
pub const CHAIN_REQUIRED_EXTENSION: &str =
    "http://hl7api.sourceforge.net/hapi-fhir/extensions.xml#chainRequired";

/// Extension URL marking an alternative chain on the same link.
pub const ALSO_CHAIN_EXTENSION: &str =
    "http://hl7api.sourceforge.net/hapi-fhir/extensions.xml#alsoChain";

/// Renders a document as a FHIR `Conformance` resource.
pub fn to_conformance_json(document: &CapabilityDocument) -> Value {
    let resources: Vec<Value> = document
        .rest
        .resources
        .iter()
        .map(resource_json)
        .collect();

    let mut rest = json!({
        "mode": document.rest.mode.to_string(),
        "resource": resources,
    });

    if !document.rest.operations.is_empty() {
        rest["operation"] = json!(
            document
                .rest
                .operations
                .iter()
                .map(|op| json!({ "code": op.code() }))
                .collect::<Vec<_>>()
        );
    }

    json!({
        "resourceType": "Conformance",
        "software": {
            "name": document.software.name,
            "version": document.software.version,
        },
        "rest": [rest],
    })
}

fn resource_json(resource: &ResourceCapability) -> Value {
    let mut value = json!({
        "type": resource.resource_type,
        "profile": { "reference": resource.profile },
    });

    if !resource.operations.is_empty() {
        value["operation"] = json!(
            resource
                .operations
                .iter()
                .map(|op| json!({ "code": op.code() }))
                .collect::<Vec<_>>()
        );
    }

    if !resource.search_params.is_empty() {
        value["searchParam"] = json!(
            resource
                .search_params
                .iter()
                .map(search_param_json)
                .collect::<Vec<_>>()
        );
    }

    value
}

fn search_param_json(param: &SearchParameterDeclaration) -> Value {
    let mut value = json!({
        "name": param.name,
        "type": param.param_type.to_string(),
    });

    if !param.chain.is_empty() {
        value["chain"] = json!(param.chain.iter().map(|c| &c.name).collect::<Vec<_>>());
        value["_chain"] = json!(param.chain.iter().map(chain_extensions).collect::<Vec<_>>());
    }

    value
}

fn required_extension(required: bool) -> Value {
    json!({ "url": CHAIN_REQUIRED_EXTENSION, "valueBoolean": required })
}

fn chain_extensions(link: &ChainLink) -> Value {
    let mut extensions = vec![required_extension(link.required)];
    extensions.extend(link.also_chainable.iter().map(|alt| {
        json!({
            "url": ALSO_CHAIN_EXTENSION,
            "extension": [required_extension(alt.required)],
        })
    }));
    json!({ "extension": extensions })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        AlternativeChain, ResourceCapability, RestInterface, RestMode, ServerIdentity,
    };
    use crate::operations::{ResourceOperation, SystemOperation};
    use crate::params::SearchParamType;

    fn document() -> CapabilityDocument {
        let mut subject = SearchParameterDeclaration::new("subject", SearchParamType::Reference);
        subject.chain.push(ChainLink {
            name: "name".to_string(),
            required: true,
            also_chainable: vec![AlternativeChain {
                name: "identifier".to_string(),
                required: false,
            }],
        });

        let mut observation = ResourceCapability::new(
            "Observation",
            "http://hl7.org/fhir/StructureDefinition/Observation",
        );
        observation.operations = vec![ResourceOperation::Read, ResourceOperation::SearchType];
        observation.search_params = vec![
            subject,
            SearchParameterDeclaration::new("code", SearchParamType::Token),
        ];

        CapabilityDocument {
            software: ServerIdentity::new("Helios", "1.0"),
            rest: RestInterface {
                mode: RestMode::Server,
                operations: vec![SystemOperation::Transaction],
                resources: vec![observation, ResourceCapability::new("Patient", "p")],
            },
        }
    }

    #[test]
    fn test_top_level_shape() {
        let value = to_conformance_json(&document());
        assert_eq!(value["resourceType"], "Conformance");
        assert_eq!(value["software"]["name"], "Helios");
        assert_eq!(value["software"]["version"], "1.0");
        assert_eq!(value["rest"][0]["mode"], "server");
        assert_eq!(value["rest"][0]["operation"][0]["code"], "transaction");
    }

    #[test]
    fn test_resource_shape() {
        let value = to_conformance_json(&document());
        let observation = &value["rest"][0]["resource"][0];
        assert_eq!(observation["type"], "Observation");
        assert_eq!(
            observation["profile"]["reference"],
            "http://hl7.org/fhir/StructureDefinition/Observation"
        );
        assert_eq!(observation["operation"][1]["code"], "search-type");

        let patient = &value["rest"][0]["resource"][1];
        assert!(patient.get("operation").is_none());
        assert!(patient.get("searchParam").is_none());
    }

    #[test]
    fn test_chain_extensions() {
        let value = to_conformance_json(&document());
        let subject = &value["rest"][0]["resource"][0]["searchParam"][0];
        assert_eq!(subject["name"], "subject");
        assert_eq!(subject["type"], "reference");
        assert_eq!(subject["chain"], json!(["name"]));

        let extensions = &subject["_chain"][0]["extension"];
        assert_eq!(extensions[0]["url"], CHAIN_REQUIRED_EXTENSION);
        assert_eq!(extensions[0]["valueBoolean"], true);
        assert_eq!(extensions[1]["url"], ALSO_CHAIN_EXTENSION);
        assert_eq!(extensions[1]["extension"][0]["url"], CHAIN_REQUIRED_EXTENSION);
        assert_eq!(extensions[1]["extension"][0]["valueBoolean"], false);

        let code = &value["rest"][0]["resource"][0]["searchParam"][1];
        assert!(code.get("chain").is_none());
        assert!(code.get("_chain").is_none());
    }

    #[test]
    fn test_no_system_operations_omits_array() {
        let mut doc = document();
        doc.rest.operations.clear();
        let value = to_conformance_json(&doc);
        assert!(value["rest"][0].get("operation").is_none());
    }
}
