/*
 * This module consolidates the UI-agnostic core of the composer. It
 * re-exports the shared data model plus the abstractions the coordinator and
 * runtime depend on: the local draft store (`DraftStoreOperations`), the
 * emoji search index, the staged-image preview resource manager
 * (`PreviewResourceOperations`), the backend service clients
 * (`PreviewServiceOperations`, `EnhanceServiceOperations`,
 * `PostServiceOperations`, `ProfileServiceOperations`), and the best-effort
 * clipboard helper.
 */
pub mod backend;
pub mod clipboard;
pub mod draft;
pub mod emoji;
pub mod models;
pub mod preview_resource;

// Re-export key structures and enums
pub use models::{
    PlatformId, PlatformPostResult, PostResultSet, PreviewResult, PreviewSnapshot,
    StagedImageFile, UserProfile,
};

// Re-export draft store related items
pub use draft::{CoreDraftStore, DraftStoreOperations};

#[cfg(test)]
pub use draft::DraftError;

// Re-export backend service related items
pub use backend::{
    BackendError, EnhanceServiceOperations, HttpBackendClient, PostServiceOperations,
    PreviewServiceOperations, ProfileServiceOperations,
};

// Re-export preview resource related items
pub use preview_resource::{
    CorePreviewResourceManager, PreviewHandle, PreviewResourceOperations,
};

pub use clipboard::{ClipboardOperations, CoreClipboard};

pub use emoji::EmojiSection;
