/*
 * This module defines `ComposerState`, the explicit owned state of the
 * composer (draft text, enabled platform set, active preview tab), together
 * with the pure view-composition helpers that derive counter views and the
 * active tab's card stack from already-computed preview data.
 *
 * The state is owned by `ComposerLogic` and mutated only through the named
 * operations here; render paths read it through accessors and never write.
 */
use crate::core::models::{PlatformId, PreviewResult, PreviewSnapshot, UserProfile};
use crate::ui_layer::types::{CounterView, PreviewCard, PreviewCardStack};

#[derive(Debug)]
pub struct ComposerState {
    text: String,
    enabled: Vec<PlatformId>,
    active_tab: Option<PlatformId>,
}

impl ComposerState {
    /*
     * A fresh composer starts with every platform enabled and the first
     * platform's tab active, matching the initial toggle state of the UI.
     */
    pub fn new() -> Self {
        ComposerState {
            text: String::new(),
            enabled: PlatformId::ALL.to_vec(),
            active_tab: Some(PlatformId::Twitter),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn trimmed_text(&self) -> &str {
        self.text.trim()
    }

    pub fn set_text(&mut self, text: String) {
        self.text = text;
    }

    // Enabled platforms in stable presentation order (twitter, bluesky,
    // linkedin), which is also submission order.
    pub fn enabled_platforms(&self) -> Vec<PlatformId> {
        self.enabled.clone()
    }

    pub fn is_enabled(&self, platform: PlatformId) -> bool {
        self.enabled.contains(&platform)
    }

    pub fn active_tab(&self) -> Option<PlatformId> {
        self.active_tab
    }

    /*
     * Enables or disables one platform, maintaining two invariants: the
     * enabled set stays in stable order, and `active_tab` is a member of
     * the set whenever it is non-empty. Disabling the active platform
     * auto-selects the first remaining enabled platform; disabling the last
     * platform clears the tab; enabling into an empty set claims it.
     */
    pub fn set_enabled(&mut self, platform: PlatformId, enabled: bool) {
        if enabled {
            if !self.enabled.contains(&platform) {
                self.enabled = PlatformId::ALL
                    .into_iter()
                    .filter(|p| *p == platform || self.enabled.contains(p))
                    .collect();
            }
        } else {
            self.enabled.retain(|p| *p != platform);
        }

        match self.active_tab {
            Some(active) if self.enabled.contains(&active) => {}
            _ => self.active_tab = self.enabled.first().copied(),
        }
    }

    // Switches the active tab; ignored for disabled platforms.
    pub fn select_tab(&mut self, platform: PlatformId) -> bool {
        if self.enabled.contains(&platform) {
            self.active_tab = Some(platform);
            true
        } else {
            false
        }
    }

    // Readiness precondition for submission: non-empty trimmed text and at
    // least one enabled platform.
    pub fn is_ready_to_post(&self) -> bool {
        !self.trimmed_text().is_empty() && !self.enabled.is_empty()
    }

    pub fn reset_after_post(&mut self) {
        self.text.clear();
    }
}

impl Default for ComposerState {
    fn default() -> Self {
        Self::new()
    }
}

/*
 * Derives the counter views for the enabled platforms from a preview
 * snapshot. Platforms without preview data or without a character limit are
 * omitted; the bar percentage is `round(count / limit * 100)` clamped to
 * 100.
 */
pub fn build_counter_views(
    snapshot: &PreviewSnapshot,
    enabled: &[PlatformId],
) -> Vec<CounterView> {
    let mut counters = Vec::new();
    for platform in enabled {
        let Some(result) = snapshot.get(platform) else {
            continue;
        };
        let Some(limit) = result.limit else {
            continue;
        };
        let percent = if limit == 0 {
            100
        } else {
            ((result.count as f64 / limit as f64) * 100.0).round().min(100.0) as u8
        };
        counters.push(CounterView {
            platform: *platform,
            count: result.count,
            limit,
            over: result.over,
            percent,
        });
    }
    counters
}

/*
 * Builds the active tab's card stack from its preview result. Pure
 * templating of already-computed data: one card per postable part, the
 * staged image (when present) attached to the first card only, author
 * fields taken from the profile snapshot.
 */
pub fn build_card_stack(
    platform: PlatformId,
    result: &PreviewResult,
    profile: &UserProfile,
    has_image: bool,
) -> PreviewCardStack {
    let cards = result
        .parts
        .iter()
        .enumerate()
        .map(|(i, part)| PreviewCard {
            body: part.clone(),
            shows_image: i == 0 && has_image,
        })
        .collect();

    PreviewCardStack {
        platform,
        author_name: profile.display_name.clone(),
        author_handle: profile.handle_for(platform).to_string(),
        count: result.count,
        limit: result.limit,
        cards,
    }
}

// Typing metrics: total character count plus whitespace-separated word
// count of the trimmed text.
pub fn typing_metrics(text: &str) -> (usize, usize) {
    let chars = text.chars().count();
    let words = if text.trim().is_empty() {
        0
    } else {
        text.split_whitespace().count()
    };
    (chars, words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn preview(count: usize, limit: Option<usize>, parts: &[&str]) -> PreviewResult {
        PreviewResult {
            count,
            limit,
            over: limit.is_some_and(|l| count > l),
            parts: parts.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_new_state_enables_all_platforms_with_first_tab_active() {
        // Arrange & Act
        let state = ComposerState::new();

        // Assert
        assert_eq!(state.enabled_platforms(), PlatformId::ALL.to_vec());
        assert_eq!(state.active_tab(), Some(PlatformId::Twitter));
        assert!(!state.is_ready_to_post());
    }

    #[test]
    fn test_disabling_active_platform_falls_back_to_first_enabled() {
        // Arrange
        let mut state = ComposerState::new();
        state.select_tab(PlatformId::Twitter);

        // Act
        state.set_enabled(PlatformId::Twitter, false);

        // Assert
        assert_eq!(state.active_tab(), Some(PlatformId::Bluesky));
        assert_eq!(
            state.enabled_platforms(),
            vec![PlatformId::Bluesky, PlatformId::Linkedin]
        );
    }

    #[test]
    fn test_disabling_every_platform_clears_the_active_tab() {
        // Arrange
        let mut state = ComposerState::new();

        // Act
        for platform in PlatformId::ALL {
            state.set_enabled(platform, false);
        }

        // Assert
        assert_eq!(state.active_tab(), None);
        assert!(state.enabled_platforms().is_empty());
    }

    #[test]
    fn test_enabling_into_empty_set_claims_the_tab() {
        // Arrange
        let mut state = ComposerState::new();
        for platform in PlatformId::ALL {
            state.set_enabled(platform, false);
        }

        // Act
        state.set_enabled(PlatformId::Linkedin, true);

        // Assert
        assert_eq!(state.active_tab(), Some(PlatformId::Linkedin));
    }

    #[test]
    fn test_re_enabling_preserves_stable_order() {
        // Arrange
        let mut state = ComposerState::new();
        state.set_enabled(PlatformId::Twitter, false);

        // Act
        state.set_enabled(PlatformId::Twitter, true);

        // Assert — twitter returns to the front, not the back.
        assert_eq!(state.enabled_platforms(), PlatformId::ALL.to_vec());
    }

    #[test]
    fn test_tab_invariant_holds_under_random_toggle_sequences() {
        // Arrange
        use rand::Rng;
        let mut rng = rand::rng();
        let mut state = ComposerState::new();

        // Act & Assert
        for _ in 0..500 {
            let platform = PlatformId::ALL[rng.random_range(0..PlatformId::ALL.len())];
            state.set_enabled(platform, rng.random_bool(0.5));

            let enabled = state.enabled_platforms();
            match state.active_tab() {
                Some(active) => assert!(enabled.contains(&active)),
                None => assert!(enabled.is_empty()),
            }
        }
    }

    #[test]
    fn test_select_tab_rejects_disabled_platforms() {
        // Arrange
        let mut state = ComposerState::new();
        state.set_enabled(PlatformId::Linkedin, false);

        // Act & Assert
        assert!(!state.select_tab(PlatformId::Linkedin));
        assert_eq!(state.active_tab(), Some(PlatformId::Twitter));
        assert!(state.select_tab(PlatformId::Bluesky));
        assert_eq!(state.active_tab(), Some(PlatformId::Bluesky));
    }

    #[test]
    fn test_readiness_requires_text_and_platforms() {
        // Arrange
        let mut state = ComposerState::new();

        // Whitespace-only text is not ready.
        state.set_text("   ".to_string());
        assert!(!state.is_ready_to_post());

        state.set_text("hello".to_string());
        assert!(state.is_ready_to_post());

        // No platforms left: not ready even with text.
        for platform in PlatformId::ALL {
            state.set_enabled(platform, false);
        }
        assert!(!state.is_ready_to_post());
    }

    #[test]
    fn test_counter_views_round_percentage_and_skip_unlimited() {
        // Arrange
        let mut snapshot: PreviewSnapshot = HashMap::new();
        snapshot.insert(PlatformId::Twitter, preview(150, Some(280), &["x"]));
        snapshot.insert(PlatformId::Linkedin, preview(150, None, &["x"]));

        // Act
        let counters = build_counter_views(
            &snapshot,
            &[PlatformId::Twitter, PlatformId::Linkedin],
        );

        // Assert — 150/280 rounds to 54 %, and the unlimited platform has
        // no bar entry at all.
        assert_eq!(counters.len(), 1);
        assert_eq!(counters[0].platform, PlatformId::Twitter);
        assert_eq!(counters[0].count, 150);
        assert_eq!(counters[0].limit, 280);
        assert_eq!(counters[0].percent, 54);
        assert!(!counters[0].over);
    }

    #[test]
    fn test_counter_views_clamp_percent_at_100_and_flag_over() {
        // Arrange
        let mut snapshot: PreviewSnapshot = HashMap::new();
        snapshot.insert(PlatformId::Bluesky, preview(600, Some(300), &["a", "b"]));

        // Act
        let counters = build_counter_views(&snapshot, &[PlatformId::Bluesky]);

        // Assert
        assert_eq!(counters[0].percent, 100);
        assert!(counters[0].over);
    }

    #[test]
    fn test_card_stack_attaches_image_to_first_card_only() {
        // Arrange
        let result = preview(400, Some(280), &["part one", "part two", "part three"]);
        let profile = UserProfile::default();

        // Act
        let stack = build_card_stack(PlatformId::Twitter, &result, &profile, true);

        // Assert
        assert_eq!(stack.cards.len(), 3);
        assert!(stack.cards[0].shows_image);
        assert!(!stack.cards[1].shows_image);
        assert!(!stack.cards[2].shows_image);
        assert_eq!(stack.author_name, "Your Name");
        assert_eq!(stack.author_handle, "@you");
    }

    #[test]
    fn test_card_stack_for_linkedin_uses_headline_as_handle() {
        // Arrange
        let result = preview(120, None, &["post body"]);
        let profile = UserProfile::default();

        // Act
        let stack = build_card_stack(PlatformId::Linkedin, &result, &profile, false);

        // Assert
        assert_eq!(stack.limit, None);
        assert_eq!(stack.author_handle, "Your headline");
        assert!(!stack.cards[0].shows_image);
    }

    #[test]
    fn test_typing_metrics_counts_chars_and_words() {
        assert_eq!(typing_metrics(""), (0, 0));
        assert_eq!(typing_metrics("   "), (3, 0));
        assert_eq!(typing_metrics("hello world"), (11, 2));
        assert_eq!(typing_metrics("  spaced   out  "), (16, 2));
    }
}
