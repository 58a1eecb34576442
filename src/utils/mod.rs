//! Utilities
//!
//! Error handling, validation, fixed-point amounts, JWT and request
//! extraction helpers shared by every module.

pub mod errors;
pub mod extract;
pub mod jwt;
pub mod money;
pub mod validation;
