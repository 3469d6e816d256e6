use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// Identifies one of the supported publishing destinations. The set is closed:
// adding a platform means extending every `match` on this enum, which is
// deliberate — each platform has bespoke preview and submission behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformId {
    Twitter,
    Bluesky,
    Linkedin,
}

impl PlatformId {
    // Stable presentation order. Tab fallback selection and submission
    // ordering both rely on this.
    pub const ALL: [PlatformId; 3] = [
        PlatformId::Twitter,
        PlatformId::Bluesky,
        PlatformId::Linkedin,
    ];

    // The identifier used on the wire towards the backend services.
    pub fn wire_name(self) -> &'static str {
        match self {
            PlatformId::Twitter => "twitter",
            PlatformId::Bluesky => "bluesky",
            PlatformId::Linkedin => "linkedin",
        }
    }

    // Human-readable label used in counters and post result lines.
    pub fn label(self) -> &'static str {
        match self {
            PlatformId::Twitter => "Twitter",
            PlatformId::Bluesky => "BlueSky",
            PlatformId::Linkedin => "LinkedIn",
        }
    }

    pub fn parse_wire_name(name: &str) -> Option<PlatformId> {
        PlatformId::ALL.into_iter().find(|p| p.wire_name() == name)
    }
}

/*
 * The preview service's rendering of the draft for one platform. `parts` is
 * the text split into postable units (thread segments); `count` and `over`
 * are derived from the whole text, not a single part. Produced entirely by
 * the backend — the composer never computes splits itself.
 */
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewResult {
    pub count: usize,
    pub limit: Option<usize>,
    pub over: bool,
    pub parts: Vec<String>,
}

// The latest backend-computed per-platform preview data. Empty when the text
// is empty or no platform is enabled.
pub type PreviewSnapshot = HashMap<PlatformId, PreviewResult>;

/*
 * Read-only display data for the preview mockups, fetched once at startup.
 * Failure to fetch is non-fatal; these defaults remain in place.
 */
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub display_name: String,
    pub twitter_handle: String,
    pub bluesky_handle: String,
    pub linkedin_headline: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        UserProfile {
            display_name: "Your Name".to_string(),
            twitter_handle: "@you".to_string(),
            bluesky_handle: "@you.bsky.social".to_string(),
            linkedin_headline: "Your headline".to_string(),
        }
    }
}

impl UserProfile {
    pub fn handle_for(&self, platform: PlatformId) -> &str {
        match platform {
            PlatformId::Twitter => &self.twitter_handle,
            PlatformId::Bluesky => &self.bluesky_handle,
            PlatformId::Linkedin => &self.linkedin_headline,
        }
    }
}

// The image file staged for inclusion in the next submission. The ephemeral
// preview resource derived from it is tracked separately by the stager; this
// struct is only the file itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedImageFile {
    pub file_name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl StagedImageFile {
    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }
}

// Outcome reported by the post service for a single platform. Partial
// failure is expected; results are independent per platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformPostResult {
    pub success: bool,
    #[serde(default)]
    pub urls: Vec<String>,
    #[serde(default)]
    pub error: Option<String>,
}

// Per-platform results for exactly the platforms that were submitted.
pub type PostResultSet = HashMap<PlatformId, PlatformPostResult>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_wire_names_round_trip() {
        for platform in PlatformId::ALL {
            assert_eq!(
                PlatformId::parse_wire_name(platform.wire_name()),
                Some(platform)
            );
        }
        assert_eq!(PlatformId::parse_wire_name("myspace"), None);
    }

    #[test]
    fn test_platform_id_serde_uses_wire_names() {
        let json = serde_json::to_string(&PlatformId::Bluesky).unwrap();
        assert_eq!(json, "\"bluesky\"");
        let parsed: PlatformId = serde_json::from_str("\"linkedin\"").unwrap();
        assert_eq!(parsed, PlatformId::Linkedin);
    }

    #[test]
    fn test_user_profile_defaults_and_wire_shape() {
        let profile = UserProfile::default();
        assert_eq!(profile.display_name, "Your Name");

        let wire = r#"{
            "displayName": "Ada",
            "twitterHandle": "@ada",
            "blueskyHandle": "@ada.bsky.social",
            "linkedinHeadline": "Engineer"
        }"#;
        let parsed: UserProfile = serde_json::from_str(wire).unwrap();
        assert_eq!(parsed.display_name, "Ada");
        assert_eq!(parsed.handle_for(PlatformId::Twitter), "@ada");
        assert_eq!(parsed.handle_for(PlatformId::Linkedin), "Engineer");
    }

    #[test]
    fn test_post_result_defaults_for_missing_fields() {
        let parsed: PlatformPostResult = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(parsed.success);
        assert!(parsed.urls.is_empty());
        assert!(parsed.error.is_none());
    }

    #[test]
    fn test_staged_image_media_type_check() {
        let image = StagedImageFile {
            file_name: "photo.png".to_string(),
            media_type: "image/png".to_string(),
            bytes: vec![1, 2, 3],
        };
        assert!(image.is_image());

        let document = StagedImageFile {
            file_name: "notes.pdf".to_string(),
            media_type: "application/pdf".to_string(),
            bytes: vec![],
        };
        assert!(!document.is_image());
    }
}
