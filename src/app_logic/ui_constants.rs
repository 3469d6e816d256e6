/*
 * Defines shared constants for logical UI control identifiers and the named
 * debounce quiet periods. The control IDs are used by the composer logic to
 * target specific controls for dynamic updates; the front end maps them to
 * concrete widgets.
 */

use crate::ui_layer::types::ControlId;

// Logical ID for the submit ("Post") button.
pub const SUBMIT_BUTTON_ID: ControlId = ControlId::new(1001);

// Logical ID for the AI enhance trigger button.
pub const ENHANCE_BUTTON_ID: ControlId = ControlId::new(1002);

// Logical ID for the label showing draft persistence state
// ("Saving draft..." / "Draft saved at <time>").
pub const DRAFT_STATUS_LABEL_ID: ControlId = ControlId::new(1010);

// Logical ID for the label showing typing metrics ("12 chars · 3 words").
pub const TYPING_METRICS_LABEL_ID: ControlId = ControlId::new(1011);

// Logical ID for the label showing enhance transaction state.
pub const ENHANCE_STATUS_LABEL_ID: ControlId = ControlId::new(1012);

// Quiet period for the trailing-edge draft save debounce.
pub const DRAFT_SAVE_QUIET_MS: u64 = 250;

// Quiet period for the preview refresh debounce on text edits. Platform
// toggles bypass this and refresh immediately.
pub const PREVIEW_REFRESH_QUIET_MS: u64 = 300;
