//! RECSTORE - In-Memory Record Store
//!
//! A stand-in for a distributed-database client that keeps every record in
//! process memory, so application tests can run without a live cluster.
//!
//! ## Features
//! - **Records**: bins keyed by name, plus generation and expiration markers
//! - **Compound writes**: append, prepend and add with type checks, all-or-nothing per call
//! - **Operate**: several writes and reads against one record in a single mutation
//! - **Concurrency**: sharded `DashMap`, per-key atomic read-modify-write
//! - **Metrics**: lock-free atomic counters for observability
//! - **Client traits**: [`RecordClient`] for the supported surface,
//!   [`ClusterOps`] for everything that reports `Unsupported`
//!
//! ## Example
//! ```
//! use recstore::{Bin, Key, RecordStore, Value};
//!
//! let store = RecordStore::new();
//! let key = Key::new("test", "demo", "greeting");
//!
//! store.put(&key, &[Bin::new("text", "hello")]);
//! store.append(&key, &[Bin::new("text", " world")]).unwrap();
//! assert_eq!(store.get(&key).unwrap().get("text"), Some(&Value::from("hello world")));
//! ```

pub mod client;
pub mod cluster;
pub mod config;
pub mod engine;
pub mod error;
pub mod types;

pub use client::RecordClient;
pub use cluster::ClusterOps;
pub use config::{Config, WritePolicy};
pub use engine::operate::Operation;
pub use engine::RecordStore;
pub use error::{Result, StoreError};
pub use types::{Bin, Key, PartialRecord, Record, RecordHeader, UserKey, Value};
