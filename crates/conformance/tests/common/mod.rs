//! Common test utilities for conformance testing.
//!
//! - [`fixtures`] - Registry fixtures and a traversal-counting registry

#![allow(dead_code)]

pub mod fixtures;
