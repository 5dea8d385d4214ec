//! Map container integration tests
//!
//! Tests are organized by facet: construction and coercion, membership and search,
//! in-place mutation, pure transformation, keyed access, serialization, and
//! property-based checks of the cross-operation invariants.

mod create_tests;
mod keyed_tests;
mod search_tests;
mod serialization_tests;
