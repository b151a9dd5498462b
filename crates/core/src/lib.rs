//! Core contracts for the dynarepo data-access layer.
//!
//! This crate defines the store-agnostic pieces of the repository pattern:
//! statically declared table schemas, key extraction, declarative query
//! conditions, the generic [`repository::Repository`] trait, and offset
//! pagination emulated over forward-only result streams.
//!
//! Backends live in the `dynarepo` crate; this crate has no knowledge of
//! any concrete store client.

pub mod key;
pub mod page;
pub mod query;
pub mod repository;
pub mod schema;
