//! Snipbox Storage - Storage backends for snippets
//!
//! This crate provides the key-value stores that act as the system of
//! record for snippets.

#![allow(clippy::result_large_err)]

pub mod error;
pub mod traits;

#[cfg(feature = "redb")]
pub mod redb;

#[cfg(feature = "scratch")]
pub mod scratch;

pub mod memory;

pub use error::{StorageError, StorageResult};
pub use traits::SnippetStore;

#[cfg(feature = "redb")]
pub use self::redb::RedbStorage;

#[cfg(feature = "scratch")]
pub use scratch::ScratchStore;

pub use memory::MemoryStorage;
