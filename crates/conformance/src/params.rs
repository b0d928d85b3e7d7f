//! Handler parameter types.
//!
//! A search handler declares an ordered, heterogeneous list of parameters.
//! Only [`Parameter::Query`] entries describe user-facing search fields; other
//! parameters (resource bodies, paging contexts, injected request state) are
//! carried along but never appear in the Conformance document.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConformanceError;

/// Prefix marking reserved control parameters such as `_count` or `_sort`.
pub const RESERVED_PREFIX: char = '_';

/// FHIR search parameter types.
///
/// See: https://hl7.org/fhir/search.html#ptypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchParamType {
    /// A search for a number.
    Number,
    /// A search for a date, dateTime, or period.
    Date,
    /// A simple string, like a name or description.
    String,
    /// A code from a code system or value set.
    Token,
    /// A reference to another resource.
    Reference,
    /// A composite search parameter that combines others.
    Composite,
    /// A quantity, with a number and units.
    Quantity,
    /// A search against a URI.
    Uri,
}

impl fmt::Display for SearchParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchParamType::Number => write!(f, "number"),
            SearchParamType::Date => write!(f, "date"),
            SearchParamType::String => write!(f, "string"),
            SearchParamType::Token => write!(f, "token"),
            SearchParamType::Reference => write!(f, "reference"),
            SearchParamType::Composite => write!(f, "composite"),
            SearchParamType::Quantity => write!(f, "quantity"),
            SearchParamType::Uri => write!(f, "uri"),
        }
    }
}

impl FromStr for SearchParamType {
    type Err = ConformanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "number" => Ok(SearchParamType::Number),
            "date" => Ok(SearchParamType::Date),
            "string" => Ok(SearchParamType::String),
            "token" => Ok(SearchParamType::Token),
            "reference" => Ok(SearchParamType::Reference),
            "composite" => Ok(SearchParamType::Composite),
            "quantity" => Ok(SearchParamType::Quantity),
            "uri" => Ok(SearchParamType::Uri),
            _ => Err(ConformanceError::InvalidParamType {
                value: s.to_string(),
            }),
        }
    }
}

/// A query-string search parameter accepted by a search handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParameter {
    /// The parameter name, possibly dotted (`subject.name`).
    pub name: String,
    /// Whether the handler requires this parameter to be present.
    #[serde(default)]
    pub required: bool,
    /// The declared parameter type.
    #[serde(rename = "type")]
    pub param_type: SearchParamType,
}

impl QueryParameter {
    /// Creates an optional query parameter.
    pub fn optional(name: impl Into<String>, param_type: SearchParamType) -> Self {
        Self {
            name: name.into(),
            required: false,
            param_type,
        }
    }

    /// Creates a required query parameter.
    pub fn required(name: impl Into<String>, param_type: SearchParamType) -> Self {
        Self {
            name: name.into(),
            required: true,
            param_type,
        }
    }

    /// Returns true for control parameters (`_count`, `_sort`, ...).
    pub fn is_reserved(&self) -> bool {
        self.name.starts_with(RESERVED_PREFIX)
    }
}

/// One entry in a handler's ordered parameter list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Parameter {
    /// A query-string search parameter.
    Query(QueryParameter),
    /// Anything else the handler accepts (request body, server context, ...).
    Other {
        /// Free-form description, for diagnostics only.
        #[serde(default)]
        description: String,
    },
}

impl Parameter {
    /// Returns the query parameter if this entry is one.
    pub fn as_query(&self) -> Option<&QueryParameter> {
        match self {
            Parameter::Query(query) => Some(query),
            Parameter::Other { .. } => None,
        }
    }
}

impl From<QueryParameter> for Parameter {
    fn from(query: QueryParameter) -> Self {
        Parameter::Query(query)
    }
}
