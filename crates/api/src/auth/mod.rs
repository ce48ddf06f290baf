//! Credential handling primitives.
//!
//! - [`password`] -- Argon2id hashing and verification.
//! - [`jwt`] -- access-token minting and validation, refresh-token helpers.

pub mod jwt;
pub mod password;
