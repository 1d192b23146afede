use crate::errors::CoreError;
use crate::models::ledger::Ledger;

use super::format;

/// High-level storage operations: save/load the ledger to/from bytes or files.
pub struct StorageManager;

impl StorageManager {
    /// Serialize a ledger to snapshot bytes.
    pub fn save_to_bytes(ledger: &Ledger) -> Result<Vec<u8>, CoreError> {
        format::write_snapshot(ledger)
    }

    /// Parse a ledger from snapshot bytes.
    pub fn load_from_bytes(data: &[u8]) -> Result<Ledger, CoreError> {
        format::read_snapshot(data)
    }

    pub fn save_to_file(ledger: &Ledger, path: &str) -> Result<(), CoreError> {
        let bytes = Self::save_to_bytes(ledger)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    pub fn load_from_file(path: &str) -> Result<Ledger, CoreError> {
        let bytes = std::fs::read(path)?;
        Self::load_from_bytes(&bytes)
    }
}
