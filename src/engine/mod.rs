//! RECSTORE - Record Store
//! The in-memory record store and its per-key operations.

pub mod metrics;
pub mod mutation;
pub mod operate;

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::Serialize;

use crate::config::{Config, WritePolicy};
use crate::error::{Result, StoreError};
use crate::types::{Bin, Bins, Key, PartialRecord, Record, RecordHeader};

use self::metrics::StoreMetrics;
use self::mutation::Mutation;
use self::operate::Operation;

/// In-memory record store backed by a sharded concurrent map.
///
/// Every single-key operation runs under the shard lock that owns the key,
/// so read-modify-write calls (`append`, `prepend`, `add`, `touch`,
/// `operate`) never interleave with another writer on the same key.
/// Cloning yields another handle to the same records.
///
/// ## Example
/// ```
/// use recstore::engine::RecordStore;
/// use recstore::types::{Bin, Key, Value};
///
/// let store = RecordStore::new();
/// let key = Key::new("test", "users", "alice");
///
/// store.put(&key, &[Bin::new("visits", 1i64)]);
/// store.add(&key, &[Bin::new("visits", 1i64)]).unwrap();
/// assert_eq!(store.get(&key).unwrap().get("visits"), Some(&Value::Long(2)));
/// ```
#[derive(Clone)]
pub struct RecordStore {
    records: Arc<DashMap<Key, Record>>,
    metrics: Arc<StoreMetrics>,
    config: Arc<Config>,
}

impl RecordStore {
    /// Create a store with the default configuration.
    pub fn new() -> Self {
        Self::build(Config::default())
    }

    /// Create a store after validating `config`.
    pub fn open(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: Config) -> Self {
        let records =
            DashMap::with_capacity_and_shard_amount(config.initial_capacity, config.shard_amount);
        log::info!(
            "record store opened ({} shards, default expiration {})",
            config.shard_amount,
            config.default_write_policy.expiration
        );
        Self {
            records: Arc::new(records),
            metrics: Arc::new(StoreMetrics::new()),
            config: Arc::new(config),
        }
    }

    /// Replace the record at `key` with one built only from `bins`.
    /// Generation and expiration restart at 0.
    pub fn put(&self, key: &Key, bins: &[Bin]) {
        if self.config.track_metrics {
            self.metrics.record_put(encoded_len(bins));
        }
        log::debug!("put {} ({} bins)", key, bins.len());
        self.records.insert(key.clone(), Record::from_bins(bins));
    }

    /// Read the full record.
    pub fn get(&self, key: &Key) -> Option<Record> {
        let record = self.records.get(key).map(|r| r.value().clone());
        self.observe_read(record.is_some());
        record
    }

    /// Read only the named bins. Requested names the record lacks map to `None`.
    pub fn get_bins<S: AsRef<str>>(&self, key: &Key, names: &[S]) -> Option<PartialRecord> {
        let record = self.records.get(key).map(|r| r.select(names));
        self.observe_read(record.is_some());
        record
    }

    /// Read generation and expiration without bin data.
    pub fn get_header(&self, key: &Key) -> Option<RecordHeader> {
        let header = self.records.get(key).map(|r| r.header());
        self.observe_read(header.is_some());
        header
    }

    /// Positional batch form of [`get`](Self::get).
    pub fn get_many(&self, keys: &[Key]) -> Vec<Option<Record>> {
        keys.iter().map(|key| self.get(key)).collect()
    }

    /// Positional batch form of [`get_bins`](Self::get_bins).
    pub fn get_many_bins<S: AsRef<str>>(
        &self,
        keys: &[Key],
        names: &[S],
    ) -> Vec<Option<PartialRecord>> {
        keys.iter().map(|key| self.get_bins(key, names)).collect()
    }

    /// Positional batch form of [`get_header`](Self::get_header).
    pub fn get_headers(&self, keys: &[Key]) -> Vec<Option<RecordHeader>> {
        keys.iter().map(|key| self.get_header(key)).collect()
    }

    /// Remove the record. Returns whether one existed.
    pub fn delete(&self, key: &Key) -> bool {
        if self.config.track_metrics {
            self.metrics.record_delete();
        }
        let existed = self.records.remove(key).is_some();
        log::debug!("delete {} (existed: {})", key, existed);
        existed
    }

    /// Whether a record is stored under `key`.
    pub fn exists(&self, key: &Key) -> bool {
        if self.config.track_metrics {
            self.metrics.record_exists();
        }
        self.records.contains_key(key)
    }

    /// Existence of each key, in input order.
    pub fn exists_many(&self, keys: &[Key]) -> Vec<bool> {
        keys.iter().map(|key| self.exists(key)).collect()
    }

    /// Reset the expiration of an existing record.
    ///
    /// Bins and generation are kept. Without a policy the configured
    /// default write policy applies. Never creates a record.
    pub fn touch(&self, key: &Key, policy: Option<&WritePolicy>) -> Result<()> {
        let policy = policy.copied().unwrap_or(self.config.default_write_policy);
        let touched = match self.records.get_mut(key) {
            Some(mut record) => {
                record.expiration = policy.expiration;
                true
            }
            None => false,
        };

        if self.config.track_metrics {
            self.metrics.record_touch(touched);
        }
        if touched {
            log::debug!("touch {} (expiration {})", key, policy.expiration);
            Ok(())
        } else {
            log::warn!("touch on missing record {}", key);
            Err(StoreError::NotFound(key.clone()))
        }
    }

    /// Append string forms of `bins` to the stored string bins.
    /// Creates the record from `bins` if the key is absent.
    pub fn append(&self, key: &Key, bins: &[Bin]) -> Result<()> {
        self.mutate(Mutation::Append, key, bins)
    }

    /// Prepend string forms of `bins` to the stored string bins.
    /// Creates the record from `bins` if the key is absent.
    pub fn prepend(&self, key: &Key, bins: &[Bin]) -> Result<()> {
        self.mutate(Mutation::Prepend, key, bins)
    }

    /// Add integer `bins` to the stored integer bins.
    /// Creates the record from `bins` if the key is absent.
    pub fn add(&self, key: &Key, bins: &[Bin]) -> Result<()> {
        self.mutate(Mutation::Add, key, bins)
    }

    fn mutate(&self, mutation: Mutation, key: &Key, bins: &[Bin]) -> Result<()> {
        let outcome = match self.records.entry(key.clone()) {
            Entry::Occupied(mut entry) => mutation.apply(&mut entry.get_mut().bins, bins),
            Entry::Vacant(entry) => {
                entry.insert(Record::from_bins(bins));
                Ok(bins.len())
            }
        };

        let updated = self.observe_outcome(mutation.name(), key, outcome)?;
        if self.config.track_metrics {
            self.metrics.record_mutation(mutation, encoded_len(bins));
        }
        log::debug!("{} {} ({} bins updated)", mutation.name(), key, updated);
        Ok(())
    }

    /// Apply several operations to one record as a single mutation.
    ///
    /// Writes run in input order on a working copy that is committed only if
    /// every write succeeds. An absent key gets a new record holding exactly
    /// the written bins, which may be none. Returns the resulting full record.
    pub fn operate(&self, key: &Key, operations: &[Operation]) -> Result<Record> {
        let outcome = match self.records.entry(key.clone()) {
            Entry::Occupied(mut entry) => {
                let mut bins = entry.get().bins.clone();
                match operate::apply_writes(&mut bins, operations) {
                    Ok(()) => {
                        let record = entry.get_mut();
                        record.bins = bins;
                        Ok(record.clone())
                    }
                    Err(err) => Err(err),
                }
            }
            Entry::Vacant(entry) => {
                let mut bins = Bins::new();
                match operate::apply_writes(&mut bins, operations) {
                    Ok(()) => Ok(entry.insert(Record::new(bins, 0, 0)).value().clone()),
                    Err(err) => Err(err),
                }
            }
        };

        let record = self.observe_outcome("operate", key, outcome)?;
        if self.config.track_metrics {
            self.metrics.record_operate(encoded_len(operations_bins(operations).as_slice()));
        }
        log::debug!("operate {} ({} operations)", key, operations.len());
        Ok(record)
    }

    /// Drop every record.
    pub fn clear(&self) {
        let count = self.records.len();
        self.records.clear();
        log::info!("record store cleared ({} records dropped)", count);
    }

    /// Shut the store down. Records are dropped; the handle stays usable.
    pub fn close(&self) {
        log::info!("record store closing");
        self.clear();
    }

    /// The in-memory store is always ready.
    pub fn is_connected(&self) -> bool {
        true
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn metrics(&self) -> &StoreMetrics {
        &self.metrics
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn observe_read(&self, hit: bool) {
        if self.config.track_metrics {
            self.metrics.record_get(hit);
        }
    }

    fn observe_outcome<T>(&self, op: &str, key: &Key, outcome: Result<T>) -> Result<T> {
        if let Err(err) = &outcome {
            if matches!(err, StoreError::TypeMismatch { .. }) && self.config.track_metrics {
                self.metrics.record_type_mismatch();
            }
            log::warn!("{} {} failed: {}", op, key, err);
        }
        outcome
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

fn operations_bins(operations: &[Operation]) -> Vec<&Bin> {
    operations
        .iter()
        .filter_map(|op| match op {
            Operation::Write(bin)
            | Operation::Append(bin)
            | Operation::Prepend(bin)
            | Operation::Add(bin) => Some(bin),
            Operation::Read(_) | Operation::ReadAll => None,
        })
        .collect()
}

/// Encoded size of written data, for the bytes-written counter.
fn encoded_len<T: Serialize + ?Sized>(value: &T) -> u64 {
    bincode::serialized_size(value).unwrap_or(0)
}
