//! Repository Module
//!
//! SurrealDB-backed implementations of the store contracts.

pub mod order;

pub use order::SurrealOrderStore;
