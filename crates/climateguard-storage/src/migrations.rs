//! Schema versioning with `PRAGMA user_version`. Each bump is one SQL batch.

use rusqlite::Connection;
use tracing::info;

use crate::errors::{StorageError, StorageResult};
use crate::schema::OFFSET_BUCKETS_V1;

/// Bump when adding a migration.
pub const CURRENT_VERSION: u32 = 1;

const MIGRATIONS: &[(u32, &str)] = &[(1, OFFSET_BUCKETS_V1)];

pub fn schema_version(conn: &Connection) -> StorageResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

/// Bring the schema up to `CURRENT_VERSION`. Returns the version before migrating.
pub fn migrate(conn: &mut Connection) -> StorageResult<u32> {
    let found = schema_version(conn)?;
    if found > CURRENT_VERSION {
        return Err(StorageError::UnsupportedVersion {
            found,
            supported: CURRENT_VERSION,
        });
    }

    for (version, sql) in MIGRATIONS.iter().filter(|(v, _)| *v > found) {
        let tx = conn.transaction()?;
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", version)?;
        tx.commit()?;
        info!(version, "applied storage migration");
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_database_migrates_to_current() {
        let mut conn = Connection::open_in_memory().unwrap();
        assert_eq!(migrate(&mut conn).unwrap(), 0);
        assert_eq!(schema_version(&conn).unwrap(), CURRENT_VERSION);
        // Idempotent.
        assert_eq!(migrate(&mut conn).unwrap(), CURRENT_VERSION);
    }

    #[test]
    fn newer_schema_is_rejected() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.pragma_update(None, "user_version", CURRENT_VERSION + 1)
            .unwrap();
        assert!(matches!(
            migrate(&mut conn),
            Err(StorageError::UnsupportedVersion { .. })
        ));
    }
}
