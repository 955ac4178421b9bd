//! The `scope` module owns the lifecycle of a temporary test directory.
//! It includes name generation, the scope itself, and error handling.

pub mod naming;
pub mod scope_error;
pub mod temporary_scope;
