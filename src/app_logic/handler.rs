/*
 * `ComposerLogic` is the central coordinator of the composer. It owns the
 * composer state and orchestrates the event flow between the front end, the
 * debounce timers, and the backend services: draft persistence, platform
 * selection, remote preview synchronization, emoji insertion, image staging,
 * the enhance transaction, and multi-platform submission.
 *
 * Every input arrives as a `ComposerEvent` and every effect leaves as a
 * `ComposerCommand`; the logic itself never blocks and never performs I/O
 * directly, apart from the injected draft store and preview resource
 * manager, both of which are synchronous local operations. Service round
 * trips (preview, enhance, post, profile) are emitted as request commands
 * and their completions re-enter as events, so ordering hazards like stale
 * preview responses are resolved here, in one single-threaded place.
 */
use crate::app_logic::composer_state::{
    ComposerState, build_card_stack, build_counter_views, typing_metrics,
};
use crate::app_logic::ui_constants::{
    DRAFT_SAVE_QUIET_MS, DRAFT_STATUS_LABEL_ID, ENHANCE_BUTTON_ID, ENHANCE_STATUS_LABEL_ID,
    PREVIEW_REFRESH_QUIET_MS, SUBMIT_BUTTON_ID, TYPING_METRICS_LABEL_ID,
};
use crate::core::DraftStoreOperations;
use crate::core::emoji;
use crate::core::models::{
    PlatformId, PostResultSet, PreviewSnapshot, StagedImageFile, UserProfile,
};
use crate::core::preview_resource::{PreviewHandle, PreviewResourceOperations};
use crate::ui_layer::types::{
    ComposerCommand, ComposerEvent, ComposerEventHandler, MessageSeverity, PostResultLine,
    PostStatus, TimerKind,
};

use std::sync::Arc;

// The staged image together with the ephemeral preview resource derived from
// it. The two always travel together: replacing or clearing the image
// releases the handle synchronously.
#[derive(Debug)]
struct StagedAttachment {
    file: StagedImageFile,
    preview: PreviewHandle,
}

// Single-level undo state for the enhance transaction. `prior_text` survives
// manual edits; only a newer enhancement or an undo replaces it.
#[derive(Debug, Default)]
struct EnhanceTransaction {
    prior_text: Option<String>,
    in_flight: bool,
}

pub struct ComposerLogic {
    state: ComposerState,
    profile: UserProfile,
    // Latest accepted preview data; empty while the text is empty or no
    // platform is enabled.
    snapshot: PreviewSnapshot,
    // Sequence number of the most recently issued preview request. Responses
    // echo their sequence number; anything older is discarded.
    preview_seq: u64,
    // True while the response for `preview_seq` is still outstanding. Cleared
    // when the snapshot is cleared synchronously, which also invalidates any
    // in-flight response.
    awaiting_preview: bool,
    staged_attachment: Option<StagedAttachment>,
    enhance: EnhanceTransaction,
    // Platforms of the in-flight submission, in submission order. `Some`
    // doubles as the double-submit guard.
    pending_submission: Option<Vec<PlatformId>>,
    emoji_picker_visible: bool,
    draft_store: Arc<dyn DraftStoreOperations>,
    preview_resources: Arc<dyn PreviewResourceOperations>,
}

impl ComposerLogic {
    pub fn new(
        draft_store: Arc<dyn DraftStoreOperations>,
        preview_resources: Arc<dyn PreviewResourceOperations>,
    ) -> Self {
        log::debug!("ComposerLogic::new called");
        ComposerLogic {
            state: ComposerState::new(),
            profile: UserProfile::default(),
            snapshot: PreviewSnapshot::new(),
            preview_seq: 0,
            awaiting_preview: false,
            staged_attachment: None,
            enhance: EnhanceTransaction::default(),
            pending_submission: None,
            emoji_picker_visible: false,
            draft_store,
            preview_resources,
        }
    }

    /*
     * --- Shared command builders ---
     */

    fn push_typing_metrics_update(&self, commands: &mut Vec<ComposerCommand>) {
        let (chars, words) = typing_metrics(self.state.text());
        commands.push(ComposerCommand::UpdateLabelText {
            control: TYPING_METRICS_LABEL_ID,
            text: format!("{chars} chars · {words} words"),
            severity: MessageSeverity::Information,
        });
    }

    fn push_submit_readiness_update(&self, commands: &mut Vec<ComposerCommand>) {
        let enabled = self.state.is_ready_to_post() && self.pending_submission.is_none();
        commands.push(ComposerCommand::SetControlEnabled {
            control: SUBMIT_BUTTON_ID,
            enabled,
        });
    }

    fn push_tabs_update(&self, commands: &mut Vec<ComposerCommand>) {
        commands.push(ComposerCommand::UpdateTabs {
            enabled: self.state.enabled_platforms(),
            active: self.state.active_tab(),
        });
    }

    fn push_counters_update(&self, commands: &mut Vec<ComposerCommand>) {
        commands.push(ComposerCommand::UpdateCounters {
            counters: build_counter_views(&self.snapshot, &self.state.enabled_platforms()),
        });
    }

    // Renders the active tab's card stack from the current snapshot, or the
    // empty state when there is no data for it.
    fn push_active_preview_render(&self, commands: &mut Vec<ComposerCommand>) {
        let stack = self.state.active_tab().and_then(|platform| {
            self.snapshot.get(&platform).map(|result| {
                build_card_stack(
                    platform,
                    result,
                    &self.profile,
                    self.staged_attachment.is_some(),
                )
            })
        });
        commands.push(ComposerCommand::RenderPreview { stack });
    }

    /*
     * --- Preview synchronization ---
     */

    /*
     * Issues a preview request for the current text and enabled set, bumping
     * the sequence number so that any still-outstanding response becomes
     * stale. When the text is empty or no platform is enabled the round trip
     * is skipped and the snapshot is cleared synchronously.
     */
    fn issue_preview_request(&mut self, commands: &mut Vec<ComposerCommand>) {
        let platforms = self.state.enabled_platforms();
        if self.state.trimmed_text().is_empty() || platforms.is_empty() {
            self.clear_preview(commands);
            return;
        }

        self.preview_seq += 1;
        self.awaiting_preview = true;
        log::trace!(
            "ComposerLogic: Issuing preview request seq {} for {} platform(s).",
            self.preview_seq,
            platforms.len()
        );
        commands.push(ComposerCommand::SetPreviewRefreshing { refreshing: true });
        commands.push(ComposerCommand::RequestPreview {
            seq: self.preview_seq,
            text: self.state.text().to_string(),
            platforms,
        });
    }

    // Drops the snapshot and re-renders the empty state. Advancing the
    // sequence number invalidates any response still in flight.
    fn clear_preview(&mut self, commands: &mut Vec<ComposerCommand>) {
        if self.awaiting_preview {
            self.preview_seq += 1;
            self.awaiting_preview = false;
        }
        self.snapshot.clear();
        commands.push(ComposerCommand::SetPreviewRefreshing { refreshing: false });
        self.push_counters_update(commands);
        self.push_active_preview_render(commands);
    }

    fn handle_preview_arrived(
        &mut self,
        seq: u64,
        outcome: Result<PreviewSnapshot, String>,
        commands: &mut Vec<ComposerCommand>,
    ) {
        if seq != self.preview_seq || !self.awaiting_preview {
            // A newer request superseded this one, or the snapshot was
            // cleared while the request was in flight.
            log::debug!(
                "ComposerLogic: Discarding stale preview response seq {seq} (latest is {}).",
                self.preview_seq
            );
            return;
        }

        self.awaiting_preview = false;
        commands.push(ComposerCommand::SetPreviewRefreshing { refreshing: false });
        match outcome {
            Ok(snapshot) => {
                self.snapshot = snapshot;
                self.push_counters_update(commands);
                self.push_active_preview_render(commands);
            }
            Err(e) => {
                // The previous snapshot stays on screen; a later edit will
                // retry anyway.
                log::warn!("ComposerLogic: Preview request seq {seq} failed: {e}");
            }
        }
    }

    /*
     * --- Edit path ---
     */

    /*
     * Applies a text mutation and its fan-out: typing metrics, the draft
     * save debounce, submit readiness, and the preview refresh debounce.
     * Programmatic mutations (enhance, undo) additionally echo the new text
     * to the compose input.
     */
    fn apply_text_mutation(
        &mut self,
        text: String,
        echo_to_input: bool,
        commands: &mut Vec<ComposerCommand>,
    ) {
        self.state.set_text(text);
        if echo_to_input {
            commands.push(ComposerCommand::SetComposeText {
                text: self.state.text().to_string(),
            });
        }

        self.push_typing_metrics_update(commands);

        commands.push(ComposerCommand::UpdateLabelText {
            control: DRAFT_STATUS_LABEL_ID,
            text: "Saving draft...".to_string(),
            severity: MessageSeverity::Information,
        });
        commands.push(ComposerCommand::StartTimer {
            timer: TimerKind::DraftSave,
            quiet_ms: DRAFT_SAVE_QUIET_MS,
        });

        self.push_submit_readiness_update(commands);

        if self.state.trimmed_text().is_empty() || self.state.enabled_platforms().is_empty() {
            commands.push(ComposerCommand::CancelTimer {
                timer: TimerKind::PreviewRefresh,
            });
            self.clear_preview(commands);
        } else {
            commands.push(ComposerCommand::StartTimer {
                timer: TimerKind::PreviewRefresh,
                quiet_ms: PREVIEW_REFRESH_QUIET_MS,
            });
        }
    }

    fn handle_draft_save_elapsed(&mut self, commands: &mut Vec<ComposerCommand>) {
        match self.draft_store.save(self.state.text()) {
            Ok(()) => {
                commands.push(ComposerCommand::UpdateLabelText {
                    control: DRAFT_STATUS_LABEL_ID,
                    text: format!("Draft saved at {}", format_save_timestamp()),
                    severity: MessageSeverity::Information,
                });
            }
            Err(e) => {
                // Not user-facing; the next edit retries the save anyway.
                log::warn!("ComposerLogic: Draft save failed: {e}");
            }
        }
    }

    /*
     * --- Startup ---
     */

    fn handle_started(&mut self, commands: &mut Vec<ComposerCommand>) {
        match self.draft_store.load() {
            Ok(Some(text)) => {
                log::debug!(
                    "ComposerLogic: Restoring persisted draft ({} bytes).",
                    text.len()
                );
                self.state.set_text(text);
                commands.push(ComposerCommand::SetComposeText {
                    text: self.state.text().to_string(),
                });
                commands.push(ComposerCommand::UpdateLabelText {
                    control: DRAFT_STATUS_LABEL_ID,
                    text: "Draft restored".to_string(),
                    severity: MessageSeverity::Information,
                });
            }
            Ok(None) => {}
            Err(e) => {
                log::warn!("ComposerLogic: Could not restore draft: {e}");
            }
        }

        self.push_tabs_update(commands);
        self.push_typing_metrics_update(commands);
        self.push_submit_readiness_update(commands);
        // Startup refresh is immediate; the debounce only applies to typing.
        self.issue_preview_request(commands);
        commands.push(ComposerCommand::RequestProfile);
    }

    /*
     * --- Platform selection ---
     */

    fn handle_platform_toggled(
        &mut self,
        platform: PlatformId,
        enabled: bool,
        commands: &mut Vec<ComposerCommand>,
    ) {
        self.state.set_enabled(platform, enabled);
        self.push_tabs_update(commands);
        self.push_submit_readiness_update(commands);

        // Toggles refresh immediately, superseding any pending debounced
        // refresh from a recent edit.
        commands.push(ComposerCommand::CancelTimer {
            timer: TimerKind::PreviewRefresh,
        });
        self.issue_preview_request(commands);
    }

    fn handle_tab_selected(&mut self, platform: PlatformId, commands: &mut Vec<ComposerCommand>) {
        if self.state.select_tab(platform) {
            self.push_tabs_update(commands);
            self.push_active_preview_render(commands);
        } else {
            log::debug!(
                "ComposerLogic: Ignoring tab selection of disabled platform {platform:?}."
            );
        }
    }

    /*
     * --- Emoji picker ---
     */

    fn handle_emoji_trigger_clicked(&mut self, commands: &mut Vec<ComposerCommand>) {
        if self.emoji_picker_visible {
            self.emoji_picker_visible = false;
            commands.push(ComposerCommand::HideEmojiPicker);
        } else {
            // Opening always starts from a blank query and the full
            // catalogue.
            self.emoji_picker_visible = true;
            commands.push(ComposerCommand::ShowEmojiPicker {
                sections: emoji::search(""),
            });
        }
    }

    fn handle_emoji_picker_dismissed(&mut self, commands: &mut Vec<ComposerCommand>) {
        if self.emoji_picker_visible {
            self.emoji_picker_visible = false;
            commands.push(ComposerCommand::HideEmojiPicker);
        }
    }

    fn handle_emoji_query_edited(&mut self, query: &str, commands: &mut Vec<ComposerCommand>) {
        if !self.emoji_picker_visible {
            return;
        }
        commands.push(ComposerCommand::UpdateEmojiSections {
            sections: emoji::search(query),
        });
    }

    // Selection closes the picker and inserts at the cursor; the front end
    // echoes the resulting content back as a `TextEdited` event, which runs
    // the normal edit path.
    fn handle_emoji_chosen(&mut self, emoji: String, commands: &mut Vec<ComposerCommand>) {
        self.emoji_picker_visible = false;
        commands.push(ComposerCommand::HideEmojiPicker);
        commands.push(ComposerCommand::InsertTextAtCursor { text: emoji });
    }

    /*
     * --- Image staging ---
     */

    fn release_staged_attachment(&mut self) {
        if let Some(attachment) = self.staged_attachment.take() {
            self.preview_resources.release(attachment.preview);
        }
    }

    fn handle_image_selected(
        &mut self,
        file: StagedImageFile,
        commands: &mut Vec<ComposerCommand>,
    ) {
        if !file.is_image() {
            log::debug!(
                "ComposerLogic: Rejecting non-image staging candidate '{}' ({}).",
                file.file_name,
                file.media_type
            );
            commands.push(ComposerCommand::ShowPostStatus {
                status: PostStatus::Failed("Please choose a valid image file.".to_string()),
            });
            return;
        }

        // Selecting a new image replaces the previous one; its preview
        // resource is released before the new one is acquired.
        self.release_staged_attachment();

        match self.preview_resources.acquire(&file) {
            Ok(handle) => {
                commands.push(ComposerCommand::ShowImageAttachment {
                    file_name: file.file_name.clone(),
                    preview: handle.clone(),
                });
                self.staged_attachment = Some(StagedAttachment {
                    file,
                    preview: handle,
                });
                self.push_active_preview_render(commands);
            }
            Err(e) => {
                log::error!(
                    "ComposerLogic: Failed to stage image '{}': {e}",
                    file.file_name
                );
                commands.push(ComposerCommand::ShowPostStatus {
                    status: PostStatus::Failed(format!("Could not stage image: {e}")),
                });
            }
        }
    }

    fn handle_image_cleared(&mut self, commands: &mut Vec<ComposerCommand>) {
        self.release_staged_attachment();
        commands.push(ComposerCommand::ClearImageAttachment);
        self.push_active_preview_render(commands);
    }

    /*
     * --- Enhance transaction ---
     */

    fn handle_enhance_requested(&mut self, commands: &mut Vec<ComposerCommand>) {
        if self.enhance.in_flight || self.state.trimmed_text().is_empty() {
            return;
        }

        self.enhance.in_flight = true;
        commands.push(ComposerCommand::SetControlEnabled {
            control: ENHANCE_BUTTON_ID,
            enabled: false,
        });
        commands.push(ComposerCommand::UpdateLabelText {
            control: ENHANCE_STATUS_LABEL_ID,
            text: "Polishing tone for social media...".to_string(),
            severity: MessageSeverity::Information,
        });
        commands.push(ComposerCommand::RequestEnhance {
            text: self.state.trimmed_text().to_string(),
        });
    }

    /*
     * Completion of the enhance round trip. On success the text at this
     * moment (which may include edits made while the request was in flight)
     * becomes the undo snapshot, and the enhanced text enters the normal
     * edit path. Failures and empty responses leave the text and the undo
     * snapshot untouched.
     */
    fn handle_enhance_completed(
        &mut self,
        outcome: Result<String, String>,
        commands: &mut Vec<ComposerCommand>,
    ) {
        self.enhance.in_flight = false;
        commands.push(ComposerCommand::SetControlEnabled {
            control: ENHANCE_BUTTON_ID,
            enabled: true,
        });

        match outcome {
            Ok(enhanced) if !enhanced.trim().is_empty() => {
                self.enhance.prior_text = Some(self.state.text().to_string());
                self.apply_text_mutation(enhanced, true, commands);
                commands.push(ComposerCommand::ShowUndoEnhance { visible: true });
                commands.push(ComposerCommand::UpdateLabelText {
                    control: ENHANCE_STATUS_LABEL_ID,
                    text: "Enhanced with a casual-professional voice.".to_string(),
                    severity: MessageSeverity::Information,
                });
            }
            Ok(_) => {
                commands.push(ComposerCommand::UpdateLabelText {
                    control: ENHANCE_STATUS_LABEL_ID,
                    text: "Enhancement returned empty text".to_string(),
                    severity: MessageSeverity::Error,
                });
            }
            Err(e) => {
                log::warn!("ComposerLogic: Enhance request failed: {e}");
                commands.push(ComposerCommand::UpdateLabelText {
                    control: ENHANCE_STATUS_LABEL_ID,
                    text: e,
                    severity: MessageSeverity::Error,
                });
            }
        }
    }

    fn handle_undo_enhance_requested(&mut self, commands: &mut Vec<ComposerCommand>) {
        let Some(prior) = self.enhance.prior_text.take() else {
            return;
        };
        self.apply_text_mutation(prior, true, commands);
        commands.push(ComposerCommand::ShowUndoEnhance { visible: false });
        commands.push(ComposerCommand::UpdateLabelText {
            control: ENHANCE_STATUS_LABEL_ID,
            text: "Reverted to your previous draft.".to_string(),
            severity: MessageSeverity::Information,
        });
    }

    /*
     * --- Submission ---
     */

    fn handle_submit_requested(&mut self, commands: &mut Vec<ComposerCommand>) {
        if !self.state.is_ready_to_post() || self.pending_submission.is_some() {
            return;
        }

        let platforms = self.state.enabled_platforms();
        log::debug!(
            "ComposerLogic: Submitting to {} platform(s).",
            platforms.len()
        );
        self.pending_submission = Some(platforms.clone());
        self.push_submit_readiness_update(commands);
        commands.push(ComposerCommand::ShowPostStatus {
            status: PostStatus::Publishing,
        });
        commands.push(ComposerCommand::RequestPost {
            text: self.state.trimmed_text().to_string(),
            platforms,
            image: self
                .staged_attachment
                .as_ref()
                .map(|attachment| attachment.file.clone()),
        });
    }

    fn handle_post_completed(
        &mut self,
        outcome: Result<PostResultSet, String>,
        commands: &mut Vec<ComposerCommand>,
    ) {
        let Some(submitted) = self.pending_submission.take() else {
            log::warn!("ComposerLogic: Post completion without a pending submission.");
            return;
        };

        let results = match outcome {
            Ok(results) => results,
            Err(e) => {
                commands.push(ComposerCommand::ShowPostStatus {
                    status: PostStatus::Failed(e),
                });
                self.push_submit_readiness_update(commands);
                return;
            }
        };

        // One line per submitted platform, in submission order; a platform
        // missing from the response counts as failed.
        let mut all_succeeded = true;
        let lines: Vec<PostResultLine> = submitted
            .iter()
            .map(|platform| match results.get(platform) {
                Some(result) if result.success => PostResultLine {
                    platform: *platform,
                    success: true,
                    link: result.urls.first().cloned(),
                    error: None,
                },
                Some(result) => {
                    all_succeeded = false;
                    PostResultLine {
                        platform: *platform,
                        success: false,
                        link: None,
                        error: Some(
                            result
                                .error
                                .clone()
                                .unwrap_or_else(|| "Unknown error".to_string()),
                        ),
                    }
                }
                None => {
                    all_succeeded = false;
                    PostResultLine {
                        platform: *platform,
                        success: false,
                        link: None,
                        error: Some("Unknown error".to_string()),
                    }
                }
            })
            .collect();

        commands.push(ComposerCommand::ShowPostStatus {
            status: PostStatus::Results(lines),
        });

        if all_succeeded {
            self.reset_after_successful_post(commands);
        } else {
            // Partial failure keeps the draft so the user can retry.
            self.push_submit_readiness_update(commands);
        }
    }

    /*
     * Full composer reset after a submission where every platform succeeded:
     * text, draft slot, staged image, enhance undo state, and preview data
     * are all cleared. The post result lines stay on screen.
     */
    fn reset_after_successful_post(&mut self, commands: &mut Vec<ComposerCommand>) {
        self.state.reset_after_post();
        commands.push(ComposerCommand::SetComposeText {
            text: String::new(),
        });
        commands.push(ComposerCommand::CancelTimer {
            timer: TimerKind::DraftSave,
        });
        commands.push(ComposerCommand::CancelTimer {
            timer: TimerKind::PreviewRefresh,
        });

        if let Err(e) = self.draft_store.clear() {
            log::warn!("ComposerLogic: Could not clear draft slot after post: {e}");
        }
        commands.push(ComposerCommand::UpdateLabelText {
            control: DRAFT_STATUS_LABEL_ID,
            text: "Draft cleared after publishing".to_string(),
            severity: MessageSeverity::Information,
        });

        self.release_staged_attachment();
        commands.push(ComposerCommand::ClearImageAttachment);

        self.enhance = EnhanceTransaction::default();
        commands.push(ComposerCommand::ShowUndoEnhance { visible: false });
        commands.push(ComposerCommand::UpdateLabelText {
            control: ENHANCE_STATUS_LABEL_ID,
            text: String::new(),
            severity: MessageSeverity::Information,
        });

        self.push_typing_metrics_update(commands);
        self.push_submit_readiness_update(commands);
        self.clear_preview(commands);
    }

    fn handle_profile_loaded(
        &mut self,
        profile: Option<UserProfile>,
        commands: &mut Vec<ComposerCommand>,
    ) {
        let Some(profile) = profile else {
            // The default placeholders stay in place.
            log::debug!("ComposerLogic: Profile fetch failed; keeping placeholders.");
            return;
        };
        self.profile = profile;
        self.push_active_preview_render(commands);
    }
}

impl ComposerEventHandler for ComposerLogic {
    fn handle_event(&mut self, event: ComposerEvent) -> Vec<ComposerCommand> {
        log::trace!("ComposerLogic: Handling event: {event:?}");
        let mut commands = Vec::new();
        match event {
            ComposerEvent::Started => self.handle_started(&mut commands),
            ComposerEvent::TextEdited { text } => {
                self.apply_text_mutation(text, false, &mut commands)
            }
            ComposerEvent::PlatformToggled { platform, enabled } => {
                self.handle_platform_toggled(platform, enabled, &mut commands)
            }
            ComposerEvent::TabSelected { platform } => {
                self.handle_tab_selected(platform, &mut commands)
            }
            ComposerEvent::EmojiTriggerClicked => self.handle_emoji_trigger_clicked(&mut commands),
            ComposerEvent::EmojiPickerDismissed => {
                self.handle_emoji_picker_dismissed(&mut commands)
            }
            ComposerEvent::EmojiQueryEdited { query } => {
                self.handle_emoji_query_edited(&query, &mut commands)
            }
            ComposerEvent::EmojiChosen { emoji } => self.handle_emoji_chosen(emoji, &mut commands),
            ComposerEvent::ImageSelected { file } => {
                self.handle_image_selected(file, &mut commands)
            }
            ComposerEvent::ImageCleared => self.handle_image_cleared(&mut commands),
            ComposerEvent::EnhanceRequested => self.handle_enhance_requested(&mut commands),
            ComposerEvent::UndoEnhanceRequested => {
                self.handle_undo_enhance_requested(&mut commands)
            }
            ComposerEvent::SubmitRequested => self.handle_submit_requested(&mut commands),
            ComposerEvent::CopyLinkRequested { url } => {
                commands.push(ComposerCommand::CopyToClipboard { text: url })
            }
            ComposerEvent::TimerElapsed {
                timer: TimerKind::DraftSave,
            } => self.handle_draft_save_elapsed(&mut commands),
            ComposerEvent::TimerElapsed {
                timer: TimerKind::PreviewRefresh,
            } => self.issue_preview_request(&mut commands),
            ComposerEvent::PreviewArrived { seq, outcome } => {
                self.handle_preview_arrived(seq, outcome, &mut commands)
            }
            ComposerEvent::EnhanceCompleted { outcome } => {
                self.handle_enhance_completed(outcome, &mut commands)
            }
            ComposerEvent::PostCompleted { outcome } => {
                self.handle_post_completed(outcome, &mut commands)
            }
            ComposerEvent::ProfileLoaded { profile } => {
                self.handle_profile_loaded(profile, &mut commands)
            }
        }
        commands
    }

    fn on_quit(&mut self) {
        log::debug!("ComposerLogic: on_quit called.");
        self.release_staged_attachment();
    }
}

// Wall-clock time for the "Draft saved at <time>" label, formatted like
// "3:07 PM". Falls back to UTC when the local offset cannot be determined.
fn format_save_timestamp() -> String {
    let now =
        time::OffsetDateTime::now_local().unwrap_or_else(|_| time::OffsetDateTime::now_utc());
    match time::format_description::parse("[hour repr:12 padding:none]:[minute] [period]") {
        Ok(format) => now
            .format(&format)
            .unwrap_or_else(|_| "just now".to_string()),
        Err(_) => "just now".to_string(),
    }
}
