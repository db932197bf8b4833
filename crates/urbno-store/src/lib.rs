//! Type-safe local key-value storage for the URBNO storefront.
//!
//! Stands in for a backend database: carts and mocked user records live in
//! per-device storage. Values are serialized to JSON on the way in and
//! decoded on the way out, so any `Serialize + DeserializeOwned` type can be
//! stored under a string key.
//!
//! Storage is pluggable through the [`Backend`] trait:
//!
//! - [`MemoryBackend`] keeps everything in process (tests, previews)
//! - [`FileBackend`] writes one JSON file per key into a directory
//!
//! # Example
//!
//! ```rust
//! use urbno_store::Store;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, Default, PartialEq, Debug)]
//! struct Counter {
//!     hits: u32,
//! }
//!
//! let store = Store::in_memory();
//! store.set("counter", &Counter { hits: 1 }).unwrap();
//!
//! let counter: Option<Counter> = store.get("counter").unwrap();
//! assert_eq!(counter, Some(Counter { hits: 1 }));
//! ```

mod backend;
mod error;
mod kv;

pub use backend::{Backend, FileBackend, MemoryBackend};
pub use error::StoreError;
pub use kv::Store;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Backend, FileBackend, MemoryBackend, Store, StoreError};
}
