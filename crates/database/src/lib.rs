//! # Guest Book Database Crate
//!
//! This crate is the only place that talks to the message store.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** All SQL lives here. The rest of the application sees the
//!   [`MessageRepository`] trait and the [`DbError`] type, never `sqlx`.
//! - **Asynchronous & Pooled:** All operations are asynchronous and go through a
//!   connection pool (`PgPool`); each call acquires a connection and returns it
//!   when the statement completes.
//!
//! ## Public API
//!
//! - `connect`: establishes the database connection pool from settings.
//! - `MessageRepository`: the data access operations (schema, insert, fetch, count, ping).
//! - `DbRepository`: the PostgreSQL implementation.
//! - `InMemoryRepository`: a process-local implementation for tests and local runs.
//! - `DbError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod memory;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, connect_options};
pub use error::DbError;
pub use memory::InMemoryRepository;
pub use repository::{DbRepository, MessageRepository};
