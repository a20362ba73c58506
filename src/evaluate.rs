//! Condition evaluation against walked files.
//!
//! Each condition compares one file attribute against the condition's typed
//! value. Comparison failures surface as typed errors rather than silently
//! dropping the file from the result set.

pub mod compare;
pub mod error;

pub use compare::evaluate;
pub use error::{EvaluateError, EvaluateResult};
