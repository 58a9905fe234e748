use crate::{StoreError, StoreKey};
use rocksdb::{DB, Options, WriteBatch};
use serde::{Serialize, de::DeserializeOwned};
use std::path::Path;
use std::sync::Arc;

/// RocksDB handle with typed get/put access
///
/// Keys are borsh-encoded [`StoreKey`] values, record values are JSON. Every
/// mutation goes through a [`Batch`] so multi-key updates commit atomically.
#[derive(Clone)]
pub struct RocksDb {
    db: Arc<DB>,
}

impl RocksDb {
    /// Open (or create) the database at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.increase_parallelism(num_cpus::get() as i32);

        // Point lookups dominate this workload
        let mut block_opts = rocksdb::BlockBasedOptions::default();
        block_opts.set_bloom_filter(10.0, false);
        let cache = rocksdb::Cache::new_lru_cache(64 * 1024 * 1024);
        block_opts.set_block_cache(&cache);
        block_opts.set_cache_index_and_filter_blocks(true);
        opts.set_block_based_table_factory(&block_opts);

        opts.set_compression_type(rocksdb::DBCompressionType::Lz4);

        let db = DB::open(&opts, path)
            .map_err(|e| StoreError::Backend(format!("Failed to open RocksDB: {}", e)))?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Get a value by typed key
    pub fn get<T: DeserializeOwned>(&self, key: &StoreKey) -> Result<Option<T>, StoreError> {
        self.db
            .get(key.to_bytes())?
            .map(|bytes| serde_json::from_slice(&bytes))
            .transpose()
            .map_err(|e| StoreError::Corrupt(format!("{:?}: {}", key, e)))
    }

    /// Commit a batch of staged writes atomically
    pub fn write(&self, batch: Batch) -> Result<(), StoreError> {
        self.db.write(batch.inner).map_err(Into::into)
    }

    /// Flush WAL and memtables to disk
    pub fn flush(&self) -> Result<(), StoreError> {
        self.db
            .flush()
            .map_err(|e| StoreError::Backend(format!("Failed to flush RocksDB: {}", e)))
    }
}

impl Drop for RocksDb {
    fn drop(&mut self) {
        if let Err(e) = self.db.flush() {
            log::error!("Failed to flush RocksDB on drop: {}", e);
        }
    }
}

/// Typed wrapper over [`rocksdb::WriteBatch`]
#[derive(Default)]
pub struct Batch {
    inner: WriteBatch,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a put
    pub fn put<T: Serialize>(&mut self, key: &StoreKey, value: &T) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(value)?;
        self.inner.put(key.to_bytes(), bytes);
        Ok(())
    }

    /// Stage a delete
    pub fn delete(&mut self, key: &StoreKey) {
        self.inner.delete(key.to_bytes());
    }
}
