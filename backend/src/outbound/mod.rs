//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: MongoDB-backed repositories over typed collections
//! - **memory**: in-process repositories used without a database and in tests
//! - **crypto**: Argon2id password hashing
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod crypto;
pub mod memory;
pub mod persistence;
