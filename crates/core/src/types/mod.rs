//! Core types for Covercraft.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod price;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use price::{AmountError, format_amount, parse_amount, to_minor_units};
pub use status::*;
