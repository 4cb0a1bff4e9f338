//! Covercraft Core - Shared types library.
//!
//! This crate provides common types used across the Covercraft checkout
//! components:
//! - `checkout` - Cart store and order-assembly pipeline
//! - `integration-tests` - End-to-end pipeline tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, money amounts, emails,
//!   and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
