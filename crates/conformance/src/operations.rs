//! Operation codes advertised in a Conformance document.
//!
//! Handlers declare at most one resource-level and one system-level
//! operation. The builder collects these into deduplicated, first-seen
//! ordered sets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConformanceError;

/// Operations that apply to a single resource type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceOperation {
    /// read - Read the current state of the resource.
    Read,
    /// vread - Read a specific version.
    Vread,
    /// update - Update an existing resource.
    Update,
    /// delete - Delete a resource.
    Delete,
    /// history-instance - Retrieve history for a resource instance.
    HistoryInstance,
    /// validate - Check a resource without storing it.
    Validate,
    /// history-type - Retrieve history for a resource type.
    HistoryType,
    /// create - Create a new resource.
    Create,
    /// search-type - Search for resources of a type.
    SearchType,
}

impl ResourceOperation {
    /// Returns the code as written in the Conformance document.
    pub fn code(&self) -> &'static str {
        match self {
            ResourceOperation::Read => "read",
            ResourceOperation::Vread => "vread",
            ResourceOperation::Update => "update",
            ResourceOperation::Delete => "delete",
            ResourceOperation::HistoryInstance => "history-instance",
            ResourceOperation::Validate => "validate",
            ResourceOperation::HistoryType => "history-type",
            ResourceOperation::Create => "create",
            ResourceOperation::SearchType => "search-type",
        }
    }
}

impl fmt::Display for ResourceOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ResourceOperation {
    type Err = ConformanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read" => Ok(ResourceOperation::Read),
            "vread" => Ok(ResourceOperation::Vread),
            "update" => Ok(ResourceOperation::Update),
            "delete" => Ok(ResourceOperation::Delete),
            "history-instance" => Ok(ResourceOperation::HistoryInstance),
            "validate" => Ok(ResourceOperation::Validate),
            "history-type" => Ok(ResourceOperation::HistoryType),
            "create" => Ok(ResourceOperation::Create),
            "search-type" => Ok(ResourceOperation::SearchType),
            _ => Err(ConformanceError::InvalidOperationCode {
                scope: "resource",
                code: s.to_string(),
            }),
        }
    }
}

/// Operations that apply to the server as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SystemOperation {
    /// transaction - Process a transaction bundle.
    Transaction,
    /// search-system - Search across all resource types.
    SearchSystem,
    /// history-system - Retrieve history for all resources.
    HistorySystem,
}

impl SystemOperation {
    /// Returns the code as written in the Conformance document.
    pub fn code(&self) -> &'static str {
        match self {
            SystemOperation::Transaction => "transaction",
            SystemOperation::SearchSystem => "search-system",
            SystemOperation::HistorySystem => "history-system",
        }
    }
}

impl fmt::Display for SystemOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for SystemOperation {
    type Err = ConformanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "transaction" => Ok(SystemOperation::Transaction),
            "search-system" => Ok(SystemOperation::SearchSystem),
            "history-system" => Ok(SystemOperation::HistorySystem),
            _ => Err(ConformanceError::InvalidOperationCode {
                scope: "system",
                code: s.to_string(),
            }),
        }
    }
}
