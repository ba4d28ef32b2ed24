//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, money formatting, and error types that form the
//! vocabulary of the Sky-Guard domain.

mod errors;
mod ids;
mod money;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{PartNumber, RunId, SupplierId};
pub use money::{group_thousands, round_half_up};
pub use timestamp::Timestamp;
