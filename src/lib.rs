//! `TaskFlow`: task collection management core.
//!
//! This crate provides the data layer behind a task-management UI: typed
//! CRUD and query operations over a swappable persistence adapter, pure
//! filtered-view derivation, and an optimistic drag-to-reorder coordinator
//! with rollback.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, local
//!   storage, in-memory)
//!
//! # Modules
//!
//! - [`domain`]: The task model, filter keys, and validation
//! - [`ports`]: The persistence-adapter contract
//! - [`adapters`]: In-memory, JSON-blob, and `PostgreSQL` stores
//! - [`services`]: Repository façade, collection view-model, and reorder
//!   coordinator

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
