use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::models::ledger::Ledger;

/// Format tag identifying a ledger snapshot.
pub const FORMAT_TAG: &str = "spending-ledger";

/// Current snapshot format version.
pub const CURRENT_VERSION: u16 = 1;

/// On-disk envelope around the ledger.
///
/// ```text
/// { "format": "spending-ledger", "version": 1, "ledger": { ... } }
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct Snapshot {
    pub format: String,
    pub version: u16,
    pub ledger: Ledger,
}

/// Wrap a ledger into a current-version snapshot document.
pub fn write_snapshot(ledger: &Ledger) -> Result<Vec<u8>, CoreError> {
    #[derive(Serialize)]
    struct SnapshotRef<'a> {
        format: &'a str,
        version: u16,
        ledger: &'a Ledger,
    }

    serde_json::to_vec_pretty(&SnapshotRef {
        format: FORMAT_TAG,
        version: CURRENT_VERSION,
        ledger,
    })
    .map_err(|e| CoreError::Serialization(format!("Failed to serialize ledger: {e}")))
}

/// Parse and check a snapshot document, returning the ledger inside.
pub fn read_snapshot(data: &[u8]) -> Result<Ledger, CoreError> {
    let snapshot: Snapshot = serde_json::from_slice(data)
        .map_err(|e| CoreError::InvalidFileFormat(e.to_string()))?;

    if snapshot.format != FORMAT_TAG {
        return Err(CoreError::InvalidFileFormat(format!(
            "unexpected format tag '{}'",
            snapshot.format
        )));
    }
    if snapshot.version == 0 || snapshot.version > CURRENT_VERSION {
        return Err(CoreError::UnsupportedVersion(snapshot.version));
    }

    Ok(snapshot.ledger)
}
