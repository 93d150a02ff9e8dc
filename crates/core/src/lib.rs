//! Domain types and rules for the exhibition registration platform.
//!
//! This crate is free of I/O: it holds the shared error type, ID aliases,
//! role constants, and the pure validation logic (wizard step gating, entry
//! rules, IBAN checks) that the API and repository layers build on.

pub mod email;
pub mod entry_rules;
pub mod error;
pub mod iban;
pub mod money;
pub mod registration_rules;
pub mod roles;
pub mod types;
pub mod wizard;
