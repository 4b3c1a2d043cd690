//! Error handling for decode operations
//!
//! Errors carry the fatal conditions only; everything the decoder can
//! recover from is reported through [`crate::Warning`] instead.

pub use crate::common::LzwwError;
pub use crate::common::Result;
