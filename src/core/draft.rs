/*
 * Persists the composed text to a single named local draft slot. The slot is
 * one file in the per-user configuration directory; `load` is read once at
 * startup, `save` is called on the trailing edge of the draft debounce, and
 * `clear` only after a fully successful post.
 *
 * It uses a trait-based approach (`DraftStoreOperations`) so the coordinator
 * can be tested against a mock store. The concrete implementation
 * (`CoreDraftStore`) handles the file system; a failed write is not a
 * user-facing error and callers only log it.
 */
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

const DRAFT_SLOT_FILENAME: &str = "draft.txt";

#[derive(Debug)]
pub enum DraftError {
    Io(io::Error),
    NoConfigDirectory,
    Utf8Error(std::string::FromUtf8Error),
}

impl From<io::Error> for DraftError {
    fn from(err: io::Error) -> Self {
        DraftError::Io(err)
    }
}

impl From<std::string::FromUtf8Error> for DraftError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        DraftError::Utf8Error(err)
    }
}

impl std::fmt::Display for DraftError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DraftError::Io(e) => write!(f, "Draft store I/O error: {e}"),
            DraftError::NoConfigDirectory => {
                write!(f, "Could not determine configuration directory for drafts")
            }
            DraftError::Utf8Error(e) => write!(f, "Draft slot UTF-8 error: {e}"),
        }
    }
}

impl std::error::Error for DraftError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DraftError::Io(e) => Some(e),
            DraftError::Utf8Error(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, DraftError>;

pub trait DraftStoreOperations: Send + Sync {
    // Returns the persisted draft text, or `None` when the slot is empty or
    // has never been written.
    fn load(&self) -> Result<Option<String>>;
    fn save(&self, text: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

pub struct CoreDraftStore {
    slot_dir: PathBuf,
}

impl CoreDraftStore {
    /*
     * Resolves the draft slot directory for the given application name via
     * the standard per-user config location, creating it if necessary.
     */
    pub fn new(app_name: &str) -> Result<Self> {
        let project_dirs = directories::ProjectDirs::from("", "", app_name)
            .ok_or(DraftError::NoConfigDirectory)?;
        let slot_dir = project_dirs.config_local_dir().to_path_buf();
        fs::create_dir_all(&slot_dir)?;
        Ok(CoreDraftStore { slot_dir })
    }

    // Used by tests to point the store at a temporary directory.
    pub fn with_slot_dir(slot_dir: PathBuf) -> Self {
        CoreDraftStore { slot_dir }
    }

    fn slot_path(&self) -> PathBuf {
        self.slot_dir.join(DRAFT_SLOT_FILENAME)
    }
}

impl DraftStoreOperations for CoreDraftStore {
    fn load(&self) -> Result<Option<String>> {
        let slot_path = self.slot_path();
        if !slot_path.exists() {
            log::debug!("CoreDraftStore: Draft slot {slot_path:?} does not exist.");
            return Ok(None);
        }

        let mut file = fs::File::open(&slot_path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        if contents.is_empty() {
            log::debug!("CoreDraftStore: Draft slot {slot_path:?} is empty.");
            Ok(None)
        } else {
            log::debug!(
                "CoreDraftStore: Restored {} bytes of draft text from {slot_path:?}.",
                contents.len()
            );
            Ok(Some(contents))
        }
    }

    fn save(&self, text: &str) -> Result<()> {
        let slot_path = self.slot_path();
        let mut file = fs::File::create(&slot_path)?;
        file.write_all(text.as_bytes())?;
        log::trace!(
            "CoreDraftStore: Saved {} bytes of draft text to {slot_path:?}.",
            text.len()
        );
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let slot_path = self.slot_path();
        if slot_path.exists() {
            fs::remove_file(&slot_path)?;
            log::debug!("CoreDraftStore: Removed draft slot {slot_path:?}.");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_draft_store_save_and_load() {
        // Arrange
        let dir = tempdir().unwrap();
        let store = CoreDraftStore::with_slot_dir(dir.path().to_path_buf());

        // Act & Assert
        assert!(store.save("Half-finished announcement").is_ok());
        match store.load() {
            Ok(Some(text)) => assert_eq!(text, "Half-finished announcement"),
            other => panic!("Expected the saved draft back, got {other:?}"),
        }
    }

    #[test]
    fn test_draft_store_load_missing_slot_is_none() {
        // Arrange
        let dir = tempdir().unwrap();
        let store = CoreDraftStore::with_slot_dir(dir.path().to_path_buf());

        // Act & Assert
        match store.load() {
            Ok(None) => {}
            other => panic!("Expected None for a missing slot, got {other:?}"),
        }
    }

    #[test]
    fn test_draft_store_save_overwrites_previous_draft() {
        // Arrange
        let dir = tempdir().unwrap();
        let store = CoreDraftStore::with_slot_dir(dir.path().to_path_buf());

        // Act
        store.save("first").unwrap();
        store.save("second").unwrap();

        // Assert
        assert_eq!(store.load().unwrap().unwrap(), "second");
    }

    #[test]
    fn test_draft_store_clear_empties_the_slot() {
        // Arrange
        let dir = tempdir().unwrap();
        let store = CoreDraftStore::with_slot_dir(dir.path().to_path_buf());
        store.save("soon to be published").unwrap();

        // Act
        store.clear().unwrap();

        // Assert
        assert!(store.load().unwrap().is_none());
        // Clearing an already-empty slot is not an error.
        assert!(store.clear().is_ok());
    }
}
