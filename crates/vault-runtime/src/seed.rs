//! Startup seeding from a JSON file of submissions.
//!
//! The file holds an array of submission objects in the wire shape accepted
//! by [`NewEntry`]. Invalid submissions are logged and skipped; the rest are
//! stored in file order.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tv_01_disclosure::{DisclosureApi, NewEntry};
use vault_telemetry::log_entry_event;

/// Seed file errors.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse seed file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Reads and parses a seed file.
pub fn load_seed_file(path: &Path) -> Result<Vec<NewEntry>, SeedError> {
    let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_seed(&raw).map_err(|source| SeedError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses seed JSON.
pub fn parse_seed(raw: &str) -> Result<Vec<NewEntry>, serde_json::Error> {
    serde_json::from_str(raw)
}

/// Submits every entry, returning `(accepted, rejected)`.
pub fn submit_all<S>(service: &S, entries: Vec<NewEntry>) -> (usize, usize)
where
    S: DisclosureApi + ?Sized,
{
    let mut accepted = 0;
    let mut rejected = 0;
    for entry in entries {
        let owner = entry.owner.clone();
        let data_name = entry.data_name.clone();
        match service.add_entry(entry) {
            Ok(id) => {
                log_entry_event!(info, "seed", "Seed entry stored", id, owner, data_name);
                accepted += 1;
            }
            Err(e) => {
                tracing::warn!(owner = %owner, data_name = %data_name, error = %e, "Seed entry rejected");
                rejected += 1;
            }
        }
    }
    (accepted, rejected)
}
