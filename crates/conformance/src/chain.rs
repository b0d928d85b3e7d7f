//! Search-parameter chain assembly.
//!
//! Folds one search handler's ordered parameter list into the search
//! parameter declarations of its resource. The first accepted parameter is
//! the root declaration; the second opens a chain link on that root; every
//! later one is an "also chainable" alternative on that same link. Deeper
//! dotted paths are flattened into that single link.

use std::collections::HashMap;

use tracing::trace;

use crate::model::{AlternativeChain, ChainLink, SearchParameterDeclaration};
use crate::params::{Parameter, QueryParameter};

/// Search parameter declarations of one resource, unique by name.
///
/// Declarations keep first-seen order; the name index lets contributions from
/// several handlers merge into one declaration.
#[derive(Debug, Default)]
pub struct SearchParamSet {
    declarations: Vec<SearchParameterDeclaration>,
    by_name: HashMap<String, usize>,
}

impl SearchParamSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the declaration with this name, creating it if needed.
    fn root_for(&mut self, param: &QueryParameter) -> &mut SearchParameterDeclaration {
        let index = match self.by_name.get(&param.name) {
            Some(&index) => index,
            None => {
                let index = self.declarations.len();
                self.declarations
                    .push(SearchParameterDeclaration::new(&param.name, param.param_type));
                self.by_name.insert(param.name.clone(), index);
                index
            }
        };
        let root = &mut self.declarations[index];
        root.param_type = param.param_type;
        root
    }

    /// Returns the declaration with this name.
    pub fn get(&self, name: &str) -> Option<&SearchParameterDeclaration> {
        self.by_name.get(name).map(|&i| &self.declarations[i])
    }

    /// Returns the number of declarations.
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Returns true if there are no declarations.
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Consumes the set, returning declarations in first-seen order.
    pub fn into_declarations(self) -> Vec<SearchParameterDeclaration> {
        self.declarations
    }
}

/// Qualifier name contributed by a chained parameter.
///
/// `subject.name` under root `subject` yields `name`; any other dotted name
/// yields the text after its first dot; undotted names yield themselves.
fn qualifier<'a>(root: &str, name: &'a str) -> &'a str {
    if let Some(rest) = name
        .strip_prefix(root)
        .and_then(|rest| rest.strip_prefix('.'))
        .filter(|rest| !rest.is_empty())
    {
        return rest;
    }
    match name.split_once('.') {
        Some((_, rest)) if !rest.is_empty() => rest,
        _ => name,
    }
}

/// Folds one search handler's parameters into the resource's declarations.
pub fn assemble(params: &[Parameter], set: &mut SearchParamSet) {
    let mut accepted = params
        .iter()
        .filter_map(Parameter::as_query)
        .filter(|p| !p.is_reserved());

    let Some(first) = accepted.next() else {
        return;
    };
    let root = set.root_for(first);
    let root_name = root.name.clone();

    let Some(second) = accepted.next() else {
        return;
    };
    root.chain.push(ChainLink::new(
        qualifier(&root_name, &second.name),
        second.required,
    ));
    let Some(link) = root.chain.last_mut() else {
        return;
    };

    for next in accepted {
        link.also_chainable.push(AlternativeChain {
            name: qualifier(&root_name, &next.name).to_string(),
            required: next.required,
        });
    }

    trace!(
        param = %root_name,
        link = %link.name,
        alternatives = link.also_chainable.len(),
        "Assembled search parameter chain"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::SearchParamType;

    fn query(name: &str, required: bool, param_type: SearchParamType) -> Parameter {
        Parameter::Query(QueryParameter {
            name: name.to_string(),
            required,
            param_type,
        })
    }

    #[test]
    fn test_reserved_parameter_is_skipped() {
        let params = vec![
            query("_count", false, SearchParamType::Number),
            query("subject", true, SearchParamType::Reference),
            query("subject.name", true, SearchParamType::String),
        ];
        let mut set = SearchParamSet::new();
        assemble(&params, &mut set);

        assert_eq!(set.len(), 1);
        let subject = set.get("subject").unwrap();
        assert_eq!(subject.param_type, SearchParamType::Reference);
        assert_eq!(subject.chain.len(), 1);
        assert_eq!(subject.chain[0].name, "name");
        assert!(subject.chain[0].required);
        assert!(subject.chain[0].also_chainable.is_empty());
        assert!(set.get("_count").is_none());
    }

    #[test]
    fn test_chain_link_required_follows_parameter() {
        let params = vec![
            query("subject", true, SearchParamType::Reference),
            query("subject.name", false, SearchParamType::String),
        ];
        let mut set = SearchParamSet::new();
        assemble(&params, &mut set);

        assert!(!set.get("subject").unwrap().chain[0].required);
    }

    #[test]
    fn test_single_parameter_has_no_chain() {
        let mut set = SearchParamSet::new();
        assemble(&[query("code", false, SearchParamType::Token)], &mut set);

        let code = set.get("code").unwrap();
        assert!(code.chain.is_empty());
    }

    #[test]
    fn test_no_accepted_parameters() {
        let mut set = SearchParamSet::new();
        assemble(&[], &mut set);
        assemble(
            &[
                query("_sort", false, SearchParamType::String),
                Parameter::Other {
                    description: "request".to_string(),
                },
            ],
            &mut set,
        );
        assert!(set.is_empty());
    }

    #[test]
    fn test_non_query_parameters_are_ignored() {
        let params = vec![
            Parameter::Other {
                description: "server context".to_string(),
            },
            query("patient", false, SearchParamType::Reference),
            Parameter::Other {
                description: "paging".to_string(),
            },
            query("patient.identifier", true, SearchParamType::Token),
        ];
        let mut set = SearchParamSet::new();
        assemble(&params, &mut set);

        let patient = set.get("patient").unwrap();
        assert_eq!(patient.chain.len(), 1);
        assert_eq!(patient.chain[0].name, "identifier");
    }

    #[test]
    fn test_later_parameters_become_alternatives() {
        let params = vec![
            query("subject", false, SearchParamType::Reference),
            query("subject.name", true, SearchParamType::String),
            query("subject.identifier", false, SearchParamType::Token),
            query("subject.birthdate", true, SearchParamType::Date),
        ];
        let mut set = SearchParamSet::new();
        assemble(&params, &mut set);

        let subject = set.get("subject").unwrap();
        assert_eq!(subject.chain.len(), 1);
        let link = &subject.chain[0];
        assert_eq!(link.name, "name");
        assert_eq!(
            link.also_chainable,
            vec![
                AlternativeChain {
                    name: "identifier".to_string(),
                    required: false,
                },
                AlternativeChain {
                    name: "birthdate".to_string(),
                    required: true,
                },
            ]
        );
    }

    #[test]
    fn test_handlers_merge_into_one_declaration() {
        let mut set = SearchParamSet::new();
        assemble(
            &[
                query("status", true, SearchParamType::Token),
                query("status.code", true, SearchParamType::Token),
            ],
            &mut set,
        );
        assemble(
            &[
                query("status", false, SearchParamType::String),
                query("status.display", false, SearchParamType::String),
            ],
            &mut set,
        );

        assert_eq!(set.len(), 1);
        let status = set.get("status").unwrap();
        assert_eq!(status.param_type, SearchParamType::String);
        assert_eq!(status.chain.len(), 2);
        assert_eq!(status.chain[0].name, "code");
        assert!(status.chain[0].required);
        assert_eq!(status.chain[1].name, "display");
        assert!(!status.chain[1].required);
    }

    #[test]
    fn test_declarations_keep_first_seen_order() {
        let mut set = SearchParamSet::new();
        assemble(&[query("name", false, SearchParamType::String)], &mut set);
        assemble(&[query("birthdate", false, SearchParamType::Date)], &mut set);
        assemble(&[query("name", false, SearchParamType::String)], &mut set);

        let names: Vec<_> = set
            .into_declarations()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["name", "birthdate"]);
    }

    #[test]
    fn test_qualifier_naming() {
        assert_eq!(qualifier("subject", "subject.name"), "name");
        assert_eq!(qualifier("subject", "patient.name"), "name");
        assert_eq!(qualifier("subject", "a.b.c"), "b.c");
        assert_eq!(qualifier("subject", "given"), "given");
        assert_eq!(qualifier("subject", "trailing."), "trailing.");
    }
}
