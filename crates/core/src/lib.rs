//! Domain types shared by the accounts workspace crates.
//!
//! - [`types`] -- primary key and timestamp aliases.
//! - [`error`] -- the [`error::CoreError`] taxonomy surfaced by every operation.
//! - [`validation`] -- credential field rules and `validator` error conversion.

pub mod error;
pub mod types;
pub mod validation;
