//! LMDB environment setup.

use std::path::Path;
use std::sync::Arc;

use heed::{Env, EnvOpenOptions};
use tracing::info;

use crate::{LmdbError, LmdbKeyStore};

/// Name of the database holding the validator key registry.
const KEY_REGISTRY_DB: &str = "consensus_keys";

/// Wraps the LMDB environment shared by every store opened from it.
pub struct LmdbEnvironment {
    env: Arc<Env>,
}

impl LmdbEnvironment {
    /// Open or create an LMDB environment at the given directory.
    pub fn open(path: &Path, max_dbs: u32, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)?;
        // SAFETY: the environment is opened once per path by this process and
        // its memory map is never resized or reopened while handles exist.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(max_dbs)
                .open(path)?
        };
        info!(path = %path.display(), map_size, "opened LMDB environment");
        Ok(Self { env: Arc::new(env) })
    }

    /// Open (creating if needed) the validator key registry.
    pub fn key_store(&self) -> Result<LmdbKeyStore, LmdbError> {
        let mut wtxn = self.env.write_txn()?;
        let db = self.env.create_database(&mut wtxn, Some(KEY_REGISTRY_DB))?;
        wtxn.commit()?;
        Ok(LmdbKeyStore {
            env: Arc::clone(&self.env),
            db,
        })
    }
}
