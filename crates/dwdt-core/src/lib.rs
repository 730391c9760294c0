//! Core data structures and errors for the dwdt ROM data pipeline.
//!
//! This crate defines the type identifiers, field/record model, and the
//! typed error taxonomy shared by the format, tables, ops, and CLI crates.

pub mod error;
pub mod types;
