/*
 * This module defines the core data types used for communication between the
 * composer logic and the UI/runtime layer. It includes the finite set of
 * named input events (`ComposerEvent`), the commands the logic issues back
 * (`ComposerCommand`), identifiers for labels and controls (`ControlId`),
 * named debounce timers (`TimerKind`), severity levels for status messages
 * (`MessageSeverity`), the view-model structs the UI renders from, and the
 * `ComposerEventHandler` trait the application logic implements.
 *
 * Asynchronous work is always a round trip through this vocabulary: the
 * logic emits a request command (timer start, service call), the runtime
 * performs it, and completion re-enters as an event. The logic itself never
 * blocks.
 */
use crate::core::emoji::EmojiSection;
use crate::core::models::{
    PlatformId, PostResultSet, PreviewSnapshot, StagedImageFile, UserProfile,
};
use crate::core::preview_resource::PreviewHandle;

// An opaque identifier for a logical UI control (a button or label). The
// logic targets controls by these IDs; the front end maps them to whatever
// widgets it renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlId(i32);

impl ControlId {
    pub const fn new(id: i32) -> Self {
        ControlId(id)
    }
}

/*
 * Named debounce timers. Starting a timer that is already pending replaces
 * it (trailing-edge debounce: a new event restarts the quiet period);
 * cancelling a timer that is not pending is a no-op.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    DraftSave,
    PreviewRefresh,
}

// Defines the severity of a status message. Ordered from least to most
// severe for comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MessageSeverity {
    Information,
    Warning,
    Error,
}

// --- View models (pure data for the front end to render) ---

// Live character counter for one platform. `percent` is already clamped to
// 0..=100; platforms without a limit never produce a `CounterView`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterView {
    pub platform: PlatformId,
    pub count: usize,
    pub limit: usize,
    pub over: bool,
    pub percent: u8,
}

// One postable unit within the active tab's preview. Only the first card of
// a stack carries the staged image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewCard {
    pub body: String,
    pub shows_image: bool,
}

/*
 * The active tab's rendering of the draft: header data for the info line
 * plus the ordered card stack. Built entirely from already-computed preview
 * data and the profile snapshot; producing it has no side effects.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewCardStack {
    pub platform: PlatformId,
    pub author_name: String,
    pub author_handle: String,
    pub count: usize,
    pub limit: Option<usize>,
    pub cards: Vec<PreviewCard>,
}

// One line of the post status region, in submission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostResultLine {
    pub platform: PlatformId,
    pub success: bool,
    // First returned URL for successful platforms, rendered as a view link
    // with a copy affordance.
    pub link: Option<String>,
    // Error text for failed platforms.
    pub error: Option<String>,
}

// Content of the status region below the submit control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostStatus {
    Publishing,
    Results(Vec<PostResultLine>),
    // A validation or transport problem that produced no per-platform
    // results.
    Failed(String),
}

// --- Events from the UI/runtime to the composer logic ---

/*
 * The finite set of inputs that drive the composer. User interactions,
 * timer expirations, and service completions all arrive through this enum;
 * the logic processes one event to completion before the next.
 */
#[derive(Debug, Clone, PartialEq)]
pub enum ComposerEvent {
    // Fired once after the front end is ready; triggers draft restore and
    // the startup profile fetch.
    Started,
    // The compose input changed; carries the full new text.
    TextEdited {
        text: String,
    },
    PlatformToggled {
        platform: PlatformId,
        enabled: bool,
    },
    TabSelected {
        platform: PlatformId,
    },
    EmojiTriggerClicked,
    // Close button, outside click, and Escape all funnel here.
    EmojiPickerDismissed,
    EmojiQueryEdited {
        query: String,
    },
    EmojiChosen {
        emoji: String,
    },
    // File picker selection and drag-and-drop both funnel here.
    ImageSelected {
        file: StagedImageFile,
    },
    ImageCleared,
    EnhanceRequested,
    UndoEnhanceRequested,
    // Submit button and the Ctrl+Enter shortcut.
    SubmitRequested,
    CopyLinkRequested {
        url: String,
    },
    TimerElapsed {
        timer: TimerKind,
    },
    // Preview service completion for the request tagged `seq`. Stale
    // responses (seq older than the latest issued) are discarded by the
    // logic.
    PreviewArrived {
        seq: u64,
        outcome: Result<PreviewSnapshot, String>,
    },
    EnhanceCompleted {
        outcome: Result<String, String>,
    },
    PostCompleted {
        outcome: Result<PostResultSet, String>,
    },
    // Best-effort startup fetch; `None` keeps the default placeholders.
    ProfileLoaded {
        profile: Option<UserProfile>,
    },
}

// --- Commands from the composer logic to the UI/runtime ---

#[derive(Debug, Clone, PartialEq)]
pub enum ComposerCommand {
    // Schedules `timer` to elapse after `quiet_ms`; replaces a pending
    // instance of the same timer.
    StartTimer {
        timer: TimerKind,
        quiet_ms: u64,
    },
    CancelTimer {
        timer: TimerKind,
    },
    // Issue a preview request carrying the current text and enabled set.
    // The completion event echoes `seq` so stale responses can be told
    // apart.
    RequestPreview {
        seq: u64,
        text: String,
        platforms: Vec<PlatformId>,
    },
    RequestEnhance {
        text: String,
    },
    RequestPost {
        text: String,
        platforms: Vec<PlatformId>,
        image: Option<StagedImageFile>,
    },
    RequestProfile,
    // Replace the compose input's content wholesale (draft restore,
    // enhancement, undo, post-success reset).
    SetComposeText {
        text: String,
    },
    // Insert at the current cursor position (emoji selection). The front
    // end echoes the resulting content back as `TextEdited`.
    InsertTextAtCursor {
        text: String,
    },
    SetControlEnabled {
        control: ControlId,
        enabled: bool,
    },
    UpdateLabelText {
        control: ControlId,
        text: String,
        severity: MessageSeverity,
    },
    UpdateTabs {
        enabled: Vec<PlatformId>,
        active: Option<PlatformId>,
    },
    UpdateCounters {
        counters: Vec<CounterView>,
    },
    // `None` renders the empty state ("Start typing to see a preview...").
    RenderPreview {
        stack: Option<PreviewCardStack>,
    },
    SetPreviewRefreshing {
        refreshing: bool,
    },
    ShowEmojiPicker {
        sections: Vec<EmojiSection>,
    },
    // Re-render the picker body for a new query; an empty list means the
    // no-matches placeholder.
    UpdateEmojiSections {
        sections: Vec<EmojiSection>,
    },
    HideEmojiPicker,
    ShowImageAttachment {
        file_name: String,
        preview: PreviewHandle,
    },
    ClearImageAttachment,
    ShowUndoEnhance {
        visible: bool,
    },
    ShowPostStatus {
        status: PostStatus,
    },
    CopyToClipboard {
        text: String,
    },
}

// --- Trait for the composer logic to handle events ---

// Implemented by the application logic layer. The runtime calls
// `handle_event` for every event and executes the returned commands in
// order.
pub trait ComposerEventHandler: Send + 'static {
    fn handle_event(&mut self, event: ComposerEvent) -> Vec<ComposerCommand>;

    // Called when the runtime is about to exit its loop.
    fn on_quit(&mut self) {}
}
