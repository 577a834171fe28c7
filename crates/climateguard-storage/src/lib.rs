//! # climateguard-storage
//!
//! Persistence backends for the offset ledger's buckets.
//!
//! - [`SqliteOffsetStore`]: one `offset_buckets` table of JSON values
//! - [`MemoryOffsetStore`]: process-local map, used when no path is configured
//! - [`BackgroundStore`]: moves writes onto a dedicated thread

pub mod errors;
pub mod memory;
pub mod migrations;
pub mod pragmas;
pub mod schema;
pub mod sqlite;
pub mod writer;

use std::path::Path;
use std::sync::Arc;

use climateguard_core::config::StorageConfig;
use climateguard_core::traits::IOffsetStore;
use tracing::info;

pub use errors::{StorageError, StorageResult};
pub use memory::MemoryOffsetStore;
pub use sqlite::SqliteOffsetStore;
pub use writer::BackgroundStore;

/// Open the store described by `config`.
pub fn open_store(config: &StorageConfig) -> StorageResult<Arc<dyn IOffsetStore>> {
    let store: Arc<dyn IOffsetStore> = match config.db_path.as_deref() {
        Some(path) => {
            let sqlite = SqliteOffsetStore::open(Path::new(path))?;
            if config.background_writes {
                Arc::new(BackgroundStore::spawn(sqlite)?)
            } else {
                Arc::new(sqlite)
            }
        }
        None => {
            info!("no database path configured, offsets kept in memory only");
            Arc::new(MemoryOffsetStore::new())
        }
    };
    Ok(store)
}
