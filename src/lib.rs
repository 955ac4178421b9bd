//! This library provides a scratch directory for tests that touch the file system.
//! Every test gets its own uniquely named directory, which is wiped out once the test
//! is finished. Failing to wipe it out is reported in the log and never fails the test.

pub mod scope;

pub use scope::scope_error::{CleanupWarning, Result, ScopeError};
pub use scope::temporary_scope::{ReleaseOutcome, TemporaryScope};

pub use temp_scope_macro::temp_scope_test;
