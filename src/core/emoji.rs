/*
 * The emoji search index: a static catalogue of categorized emoji plus a
 * keyword table, queried through a pure `search` function. Matching is
 * case-insensitive and diacritic-insensitive — both the query and the
 * haystack (category name, keywords, and the glyph itself) are lowercased
 * and stripped of combining marks before the substring test.
 *
 * Picker visibility is not handled here; that small state machine lives in
 * the coordinator. This module is stateless.
 */
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

pub struct EmojiCategory {
    pub name: &'static str,
    pub emojis: &'static [&'static str],
}

// Catalogue order is presentation order; `search("")` returns it unchanged.
pub const EMOJI_CATEGORIES: &[EmojiCategory] = &[
    EmojiCategory {
        name: "Smileys",
        emojis: &["😀", "😄", "😅", "😂", "🙂", "😉", "😍", "🤔", "😎", "🥳"],
    },
    EmojiCategory {
        name: "Gestures",
        emojis: &["👍", "👎", "👏", "🙌", "🤝", "👋", "💪", "🙏", "✌️", "🤞"],
    },
    EmojiCategory {
        name: "Work & Tech",
        emojis: &["💻", "🖥️", "📱", "⌨️", "🛠️", "⚙️", "📈", "📊", "🧪", "🐛"],
    },
    EmojiCategory {
        name: "Objects",
        emojis: &["🚀", "🔥", "💡", "🎉", "📣", "🔗", "📌", "✏️", "📷", "☕"],
    },
    EmojiCategory {
        name: "Nature",
        emojis: &["🌱", "🌞", "🌙", "⭐", "🌈", "🌊", "🍀", "🌸", "🐦", "🦋"],
    },
];

// Search keywords for individual glyphs. Category names already match, so
// only emoji with useful extra vocabulary need entries here.
const EMOJI_KEYWORDS: &[(&str, &str)] = &[
    ("😀", "grin happy smile"),
    ("😄", "happy smile laugh"),
    ("😅", "sweat relief phew"),
    ("😂", "joy tears laugh lol"),
    ("🙂", "smile slight"),
    ("😉", "wink"),
    ("😍", "love heart eyes"),
    ("🤔", "thinking hmm"),
    ("😎", "cool sunglasses"),
    ("🥳", "party celebrate"),
    ("👍", "thumbs up approve yes"),
    ("👎", "thumbs down no"),
    ("👏", "clap applause"),
    ("🙌", "praise hooray"),
    ("🤝", "handshake deal"),
    ("👋", "wave hello goodbye"),
    ("💪", "strong flex"),
    ("🙏", "thanks please pray"),
    ("💻", "laptop computer code"),
    ("🖥️", "desktop monitor"),
    ("📱", "phone mobile"),
    ("🛠️", "tools build fix"),
    ("⚙️", "gear settings"),
    ("📈", "chart growth up"),
    ("📊", "chart bar stats"),
    ("🧪", "test experiment science"),
    ("🐛", "bug debug"),
    ("🚀", "rocket launch ship"),
    ("🔥", "fire hot lit"),
    ("💡", "idea light bulb"),
    ("🎉", "party confetti launch celebrate"),
    ("📣", "megaphone announce"),
    ("🔗", "link url"),
    ("📌", "pin"),
    ("✏️", "pencil write edit"),
    ("📷", "camera photo"),
    ("☕", "coffee tea café break"),
    ("🌱", "seedling plant grow"),
    ("🌞", "sun sunny"),
    ("🌙", "moon night"),
    ("⭐", "star favorite"),
    ("🌈", "rainbow"),
    ("🌊", "wave ocean sea"),
    ("🍀", "clover luck"),
    ("🌸", "blossom flower spring"),
    ("🐦", "bird tweet"),
    ("🦋", "butterfly"),
];

// One filtered category as returned by `search`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmojiSection {
    pub name: &'static str,
    pub emojis: Vec<&'static str>,
}

// Lowercases and strips combining diacritical marks, so "Café" and "cafe"
// compare equal.
pub fn normalize_for_search(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

fn keywords_for(emoji: &str) -> &'static str {
    EMOJI_KEYWORDS
        .iter()
        .find(|(glyph, _)| *glyph == emoji)
        .map(|(_, keywords)| *keywords)
        .unwrap_or("")
}

/*
 * Returns the catalogue filtered by `query`, preserving catalogue order. An
 * empty (or all-whitespace) query returns every category unfiltered. A
 * category is included only when at least one of its emojis matches; an
 * empty return value means the caller should render a no-matches
 * placeholder.
 */
pub fn search(query: &str) -> Vec<EmojiSection> {
    let needle = normalize_for_search(query.trim());
    let mut sections = Vec::new();

    for category in EMOJI_CATEGORIES {
        let emojis: Vec<&'static str> = if needle.is_empty() {
            category.emojis.to_vec()
        } else {
            category
                .emojis
                .iter()
                .copied()
                .filter(|emoji| {
                    let haystack = normalize_for_search(&format!(
                        "{} {} {}",
                        category.name,
                        keywords_for(emoji),
                        emoji
                    ));
                    haystack.contains(&needle)
                })
                .collect()
        };

        if !emojis.is_empty() {
            sections.push(EmojiSection {
                name: category.name,
                emojis,
            });
        }
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_returns_full_catalogue_in_order() {
        // Act
        let sections = search("");

        // Assert
        assert_eq!(sections.len(), EMOJI_CATEGORIES.len());
        for (section, category) in sections.iter().zip(EMOJI_CATEGORIES) {
            assert_eq!(section.name, category.name);
            assert_eq!(section.emojis, category.emojis.to_vec());
        }
    }

    #[test]
    fn test_whitespace_query_is_treated_as_empty() {
        assert_eq!(search("   ").len(), EMOJI_CATEGORIES.len());
    }

    #[test]
    fn test_keyword_query_filters_to_matching_emojis_only() {
        // Act
        let sections = search("fire");

        // Assert
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].name, "Objects");
        assert_eq!(sections[0].emojis, vec!["🔥"]);
    }

    #[test]
    fn test_query_matches_are_case_insensitive() {
        let lower = search("launch");
        let upper = search("LAUNCH");
        assert_eq!(lower, upper);
        assert!(!lower.is_empty());
    }

    #[test]
    fn test_query_matching_is_diacritic_insensitive() {
        // "café" is a keyword for ☕; a plain-ascii query must reach it, and
        // an accented query must match the plain keywords too.
        let accented = search("café");
        let plain = search("cafe");
        assert_eq!(accented, plain);
        assert_eq!(accented.len(), 1);
        assert!(accented[0].emojis.contains(&"☕"));
    }

    #[test]
    fn test_category_name_matches_include_whole_category() {
        let sections = search("gestures");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].emojis.len(), 10);
    }

    #[test]
    fn test_glyph_query_matches_itself() {
        let sections = search("🚀");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].emojis, vec!["🚀"]);
    }

    #[test]
    fn test_unmatched_query_returns_no_sections() {
        assert!(search("zzzzzz-no-such-emoji").is_empty());
    }
}
