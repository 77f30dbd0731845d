//! Checksummed save files with a last-known-good backup.
//!
//! File format:
//! - Version magic (8 bytes)
//! - Payload length (4 bytes)
//! - JSON-serialized ledger (variable length)
//! - SHA256 checksum over the three fields above (32 bytes)
//!
//! The payload is JSON so saves from older builds load with any missing
//! field at its default.

use crate::core::constants::SAVE_VERSION_MAGIC;
use crate::core::resource_state::ResourceState;
use directories::ProjectDirs;
use log::warn;
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const HEADER_LEN: usize = 8 + 4;
const CHECKSUM_LEN: usize = 32;

/// Where a loaded ledger came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Primary,
    Backup,
    Fresh,
}

pub fn encode(state: &ResourceState) -> io::Result<Vec<u8>> {
    let data =
        serde_json::to_vec(state).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    let data_len = u32::try_from(data.len())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "Save payload too large"))?;

    let mut hasher = Sha256::new();
    hasher.update(SAVE_VERSION_MAGIC.to_le_bytes());
    hasher.update(data_len.to_le_bytes());
    hasher.update(&data);
    let checksum = hasher.finalize();

    let mut bytes = Vec::with_capacity(HEADER_LEN + data.len() + CHECKSUM_LEN);
    bytes.extend_from_slice(&SAVE_VERSION_MAGIC.to_le_bytes());
    bytes.extend_from_slice(&data_len.to_le_bytes());
    bytes.extend_from_slice(&data);
    bytes.extend_from_slice(&checksum);
    Ok(bytes)
}

/// Verify and decode a save file's bytes.
///
/// Returns an `InvalidData` error if the version magic is wrong, the file is
/// truncated, the checksum does not match or the payload does not decode.
pub fn decode(bytes: &[u8]) -> io::Result<ResourceState> {
    let invalid = |msg: String| io::Error::new(io::ErrorKind::InvalidData, msg);

    if bytes.len() < HEADER_LEN + CHECKSUM_LEN {
        return Err(invalid(format!("Save file truncated ({} bytes)", bytes.len())));
    }

    let mut version_bytes = [0u8; 8];
    version_bytes.copy_from_slice(&bytes[..8]);
    let version = u64::from_le_bytes(version_bytes);
    if version != SAVE_VERSION_MAGIC {
        return Err(invalid(format!(
            "Invalid save version: expected 0x{:016X}, got 0x{:016X}",
            SAVE_VERSION_MAGIC, version
        )));
    }

    let mut length_bytes = [0u8; 4];
    length_bytes.copy_from_slice(&bytes[8..HEADER_LEN]);
    let data_len = u32::from_le_bytes(length_bytes) as usize;
    if bytes.len() != HEADER_LEN + data_len + CHECKSUM_LEN {
        return Err(invalid("Save file length mismatch".to_string()));
    }

    let data = &bytes[HEADER_LEN..HEADER_LEN + data_len];
    let stored_checksum = &bytes[HEADER_LEN + data_len..];

    let mut hasher = Sha256::new();
    hasher.update(version_bytes);
    hasher.update(length_bytes);
    hasher.update(data);
    let computed_checksum = hasher.finalize();
    if stored_checksum != computed_checksum.as_slice() {
        return Err(invalid("Checksum verification failed".to_string()));
    }

    serde_json::from_slice(data).map_err(|e| invalid(format!("Undecodable save payload: {}", e)))
}

/// Manages saving and loading the ledger.
pub struct SaveManager {
    save_path: PathBuf,
}

impl SaveManager {
    /// Save manager rooted in the platform config directory.
    pub fn new() -> io::Result<Self> {
        let project_dirs = ProjectDirs::from("", "", "conspiracy").ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine config directory",
            )
        })?;

        let config_dir = project_dirs.config_dir();
        fs::create_dir_all(config_dir)?;

        Ok(Self {
            save_path: config_dir.join("save.dat"),
        })
    }

    pub fn with_path(save_path: impl Into<PathBuf>) -> Self {
        Self {
            save_path: save_path.into(),
        }
    }

    pub fn save_path(&self) -> &Path {
        &self.save_path
    }

    pub fn backup_path(&self) -> PathBuf {
        self.save_path.with_extension("bak")
    }

    fn temp_path(&self) -> PathBuf {
        self.save_path.with_extension("tmp")
    }

    /// Write `state` to disk.
    ///
    /// The current file, if it verifies, becomes the backup first. The new
    /// file is written beside the target and renamed into place, so a crash
    /// mid-write leaves the previous save intact.
    pub fn save(&self, state: &ResourceState) -> io::Result<()> {
        let bytes = encode(state)?;

        if let Ok(current) = fs::read(&self.save_path) {
            if decode(&current).is_ok() {
                fs::write(self.backup_path(), &current)?;
            }
        }

        let temp = self.temp_path();
        fs::write(&temp, &bytes)?;
        fs::rename(&temp, &self.save_path)?;
        Ok(())
    }

    pub fn load(&self) -> io::Result<ResourceState> {
        decode(&fs::read(&self.save_path)?)
    }

    pub fn load_backup(&self) -> io::Result<ResourceState> {
        decode(&fs::read(self.backup_path())?)
    }

    /// Load the primary save, falling back to the backup and then to a
    /// fresh ledger. Never fails.
    pub fn load_or_fresh(&self) -> (ResourceState, LoadSource) {
        if !self.save_exists() && !self.backup_path().exists() {
            return (ResourceState::new(), LoadSource::Fresh);
        }

        match self.load() {
            Ok(state) => return (state, LoadSource::Primary),
            Err(e) => warn!("Save {} unreadable: {}", self.save_path.display(), e),
        }
        match self.load_backup() {
            Ok(state) => {
                warn!("Recovered from backup {}", self.backup_path().display());
                return (state, LoadSource::Backup);
            }
            Err(e) => warn!("Backup {} unreadable: {}", self.backup_path().display(), e),
        }

        warn!("Starting from a fresh ledger");
        (ResourceState::new(), LoadSource::Fresh)
    }

    pub fn save_exists(&self) -> bool {
        self.save_path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    fn test_manager() -> SaveManager {
        static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);
        let test_id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!(
            "conspiracy-save-test-{}-{}",
            std::process::id(),
            test_id
        ));
        fs::create_dir_all(&dir).unwrap();
        SaveManager::with_path(dir.join("save.dat"))
    }

    fn sample_state() -> ResourceState {
        let mut state = ResourceState::new();
        state.clock = 12.5;
        state.evidence = 1_234.5;
        state.total_evidence_earned = 5_000.0;
        state.tinfoil = 7;
        state.generators.insert("blogger".to_string(), 3);
        state.achievements.insert("first_click".to_string());
        state
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let manager = test_manager();
        let state = sample_state();
        manager.save(&state).unwrap();

        assert!(manager.save_exists());
        assert_eq!(manager.load().unwrap(), state);
    }

    #[test]
    fn test_wrong_magic_rejected() {
        let mut bytes = encode(&sample_state()).unwrap();
        bytes[0] ^= 0xFF;
        let err = decode(&bytes).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_checksum_mismatch_rejected() {
        let mut bytes = encode(&sample_state()).unwrap();
        let mid = HEADER_LEN + 3;
        bytes[mid] ^= 0x01;
        assert!(decode(&bytes).is_err());
    }

    #[test]
    fn test_truncated_rejected() {
        let bytes = encode(&sample_state()).unwrap();
        assert!(decode(&bytes[..bytes.len() - 1]).is_err());
        assert!(decode(&bytes[..4]).is_err());
    }

    #[test]
    fn test_second_save_keeps_backup() {
        let manager = test_manager();
        let first = sample_state();
        let mut second = sample_state();
        second.evidence = 9.0;

        manager.save(&first).unwrap();
        manager.save(&second).unwrap();

        assert_eq!(manager.load().unwrap(), second);
        assert_eq!(manager.load_backup().unwrap(), first);
    }

    #[test]
    fn test_load_or_fresh_falls_back_to_backup() {
        let manager = test_manager();
        let first = sample_state();
        manager.save(&first).unwrap();
        manager.save(&sample_state()).unwrap();
        fs::write(manager.save_path(), b"garbage").unwrap();

        let (state, source) = manager.load_or_fresh();
        assert_eq!(source, LoadSource::Backup);
        assert_eq!(state, first);
    }

    #[test]
    fn test_load_or_fresh_without_files() {
        let manager = test_manager();
        let (state, source) = manager.load_or_fresh();
        assert_eq!(source, LoadSource::Fresh);
        assert_eq!(state, ResourceState::new());
    }

    #[test]
    fn test_load_or_fresh_when_everything_is_corrupt() {
        let manager = test_manager();
        fs::write(manager.save_path(), b"garbage").unwrap();
        fs::write(manager.backup_path(), b"also garbage").unwrap();

        let (state, source) = manager.load_or_fresh();
        assert_eq!(source, LoadSource::Fresh);
        assert_eq!(state, ResourceState::new());
    }
}
