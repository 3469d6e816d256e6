/*
 * Manages the ephemeral preview resource backing the staged image: a scoped,
 * explicitly released handle to a local binary copy of the file (the analog
 * of a browser object URL). The stager must release the previous handle
 * synchronously before acquiring a new one and on every clear path; a handle
 * that is never released keeps its backing resource alive for the rest of
 * the session.
 */
use crate::core::models::StagedImageFile;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

// An opaque reference to one acquired preview resource. The `location` is
// where renderers can read the image from; the id keeps handles distinct
// even when the same file is staged twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewHandle {
    pub id: u64,
    pub location: PathBuf,
}

pub trait PreviewResourceOperations: Send + Sync {
    fn acquire(&self, file: &StagedImageFile) -> io::Result<PreviewHandle>;
    // Release must be infallible from the caller's point of view; failures
    // are logged inside the implementation.
    fn release(&self, handle: PreviewHandle);
}

/*
 * File-backed implementation: each acquired handle is a copy of the image
 * bytes under a per-session directory in the system temp location, deleted
 * again on release.
 */
pub struct CorePreviewResourceManager {
    preview_dir: PathBuf,
    next_id: AtomicU64,
}

impl CorePreviewResourceManager {
    pub fn new(app_name: &str) -> io::Result<Self> {
        let preview_dir = std::env::temp_dir().join(format!("{app_name}-previews"));
        fs::create_dir_all(&preview_dir)?;
        Ok(CorePreviewResourceManager {
            preview_dir,
            next_id: AtomicU64::new(1),
        })
    }

    // Used by tests to point the manager at a temporary directory.
    pub fn with_preview_dir(preview_dir: PathBuf) -> Self {
        CorePreviewResourceManager {
            preview_dir,
            next_id: AtomicU64::new(1),
        }
    }
}

impl PreviewResourceOperations for CorePreviewResourceManager {
    fn acquire(&self, file: &StagedImageFile) -> io::Result<PreviewHandle> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let location = self.preview_dir.join(format!("{id}-{}", file.file_name));
        fs::write(&location, &file.bytes)?;
        log::debug!(
            "CorePreviewResourceManager: Acquired preview handle {id} at {location:?}."
        );
        Ok(PreviewHandle { id, location })
    }

    fn release(&self, handle: PreviewHandle) {
        match fs::remove_file(&handle.location) {
            Ok(()) => {
                log::debug!(
                    "CorePreviewResourceManager: Released preview handle {}.",
                    handle.id
                );
            }
            Err(e) => {
                log::warn!(
                    "CorePreviewResourceManager: Failed to release preview handle {} at {:?}: {e}",
                    handle.id,
                    handle.location
                );
            }
        }
    }
}
