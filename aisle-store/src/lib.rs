//! # aisle-store
//!
//! Store seams and reference backends for the aisle entity backend.
//!
//! This crate provides:
//! - [`EntityStore`] / [`SearchIndex`]: async adapter traits over the
//!   primary relational store and the secondary text-search store
//! - [`MemoryStore`] / [`MemorySearchIndex`]: in-memory reference
//!   implementations with per-row atomicity
//! - [`EntityService`]: the entity lifecycle (save/update/delete/search)
//!   with a best-effort write-through mirror into the search index
//! - [`QueryService`]: criteria compilation + execution (list, page, count)
//! - [`StoreConfig`]: paging limits, settable from the environment
//!
//! ## Mirror consistency
//!
//! Writes commit to the primary store first and mirror to the index
//! second, within one caller-visible operation but without a cross-store
//! transaction. An index failure after a primary success leaves the index
//! stale — logged as a warning, repaired by the next write to the same id.
//! Free-text reads are answered from the index alone.

pub mod config;
pub mod index;
pub mod memory;
pub mod query;
pub mod service;
pub mod traits;

pub use config::StoreConfig;
pub use index::MemorySearchIndex;
pub use memory::MemoryStore;
pub use query::QueryService;
pub use service::EntityService;
pub use traits::{EntityStore, SearchIndex};
