//! Korean license-plate recognition.
//!
//! - [`table`] — use-code groups and diplomatic-marker labels used to derive a
//!   [`VehicleType`](crate::models::VehicleType).
//! - [`validator`] — ordered per-format matchers that turn a raw string into a
//!   [`ValidationResult`](crate::models::ValidationResult).

pub mod table;
pub mod validator;
