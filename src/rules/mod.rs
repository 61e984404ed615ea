//! Business rules for todos: which values are valid and which state
//! transitions are allowed.

mod error;
mod period;
mod validate;

pub use error::RuleError;
pub use period::{ExpiryRange, Period};
pub use validate::{EXPIRY_FORMAT, TodoRules};
