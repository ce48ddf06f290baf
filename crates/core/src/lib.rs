//! Shared domain types for the Veranda condominium management platform.
//!
//! This crate is dependency-light on purpose: it holds the types that every
//! other workspace crate needs (IDs, timestamps, the domain error enum, role
//! and audit-action constants) without pulling in the database or HTTP
//! stacks.

pub mod audit;
pub mod error;
pub mod pagination;
pub mod roles;
pub mod types;
