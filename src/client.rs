//! RECSTORE - Record Client Interface
//! The record operations a database client exposes, as a trait, so tests
//! can run the same code against a live client or the in-memory store.

use crate::config::WritePolicy;
use crate::engine::operate::Operation;
use crate::engine::RecordStore;
use crate::error::Result;
use crate::types::{Bin, Key, PartialRecord, Record, RecordHeader};

/// Record-level client operations.
///
/// Every method returns `Result` because a networked implementation can
/// fail anywhere; the in-memory store only fails where its data rules say so.
pub trait RecordClient: Send + Sync {
    fn put(&self, key: &Key, bins: &[Bin]) -> Result<()>;

    fn get(&self, key: &Key) -> Result<Option<Record>>;

    fn get_bins(&self, key: &Key, names: &[&str]) -> Result<Option<PartialRecord>>;

    fn get_header(&self, key: &Key) -> Result<Option<RecordHeader>>;

    fn get_many(&self, keys: &[Key]) -> Result<Vec<Option<Record>>>;

    fn get_many_bins(&self, keys: &[Key], names: &[&str]) -> Result<Vec<Option<PartialRecord>>>;

    fn get_headers(&self, keys: &[Key]) -> Result<Vec<Option<RecordHeader>>>;

    fn delete(&self, key: &Key) -> Result<bool>;

    fn exists(&self, key: &Key) -> Result<bool>;

    fn exists_many(&self, keys: &[Key]) -> Result<Vec<bool>>;

    fn touch(&self, key: &Key, policy: Option<&WritePolicy>) -> Result<()>;

    fn append(&self, key: &Key, bins: &[Bin]) -> Result<()>;

    fn prepend(&self, key: &Key, bins: &[Bin]) -> Result<()>;

    fn add(&self, key: &Key, bins: &[Bin]) -> Result<()>;

    fn operate(&self, key: &Key, operations: &[Operation]) -> Result<Record>;

    fn is_connected(&self) -> bool;

    fn close(&self);
}

impl RecordClient for RecordStore {
    fn put(&self, key: &Key, bins: &[Bin]) -> Result<()> {
        RecordStore::put(self, key, bins);
        Ok(())
    }

    fn get(&self, key: &Key) -> Result<Option<Record>> {
        Ok(RecordStore::get(self, key))
    }

    fn get_bins(&self, key: &Key, names: &[&str]) -> Result<Option<PartialRecord>> {
        Ok(RecordStore::get_bins(self, key, names))
    }

    fn get_header(&self, key: &Key) -> Result<Option<RecordHeader>> {
        Ok(RecordStore::get_header(self, key))
    }

    fn get_many(&self, keys: &[Key]) -> Result<Vec<Option<Record>>> {
        Ok(RecordStore::get_many(self, keys))
    }

    fn get_many_bins(&self, keys: &[Key], names: &[&str]) -> Result<Vec<Option<PartialRecord>>> {
        Ok(RecordStore::get_many_bins(self, keys, names))
    }

    fn get_headers(&self, keys: &[Key]) -> Result<Vec<Option<RecordHeader>>> {
        Ok(RecordStore::get_headers(self, keys))
    }

    fn delete(&self, key: &Key) -> Result<bool> {
        Ok(RecordStore::delete(self, key))
    }

    fn exists(&self, key: &Key) -> Result<bool> {
        Ok(RecordStore::exists(self, key))
    }

    fn exists_many(&self, keys: &[Key]) -> Result<Vec<bool>> {
        Ok(RecordStore::exists_many(self, keys))
    }

    fn touch(&self, key: &Key, policy: Option<&WritePolicy>) -> Result<()> {
        RecordStore::touch(self, key, policy)
    }

    fn append(&self, key: &Key, bins: &[Bin]) -> Result<()> {
        RecordStore::append(self, key, bins)
    }

    fn prepend(&self, key: &Key, bins: &[Bin]) -> Result<()> {
        RecordStore::prepend(self, key, bins)
    }

    fn add(&self, key: &Key, bins: &[Bin]) -> Result<()> {
        RecordStore::add(self, key, bins)
    }

    fn operate(&self, key: &Key, operations: &[Operation]) -> Result<Record> {
        RecordStore::operate(self, key, operations)
    }

    fn is_connected(&self) -> bool {
        RecordStore::is_connected(self)
    }

    fn close(&self) {
        RecordStore::close(self)
    }
}
