/*
 * Line-oriented console front end. A reader thread turns stdin lines into
 * `ComposerEvent`s; `ConsoleFrontEnd` renders the commands the logic emits
 * back to stdout. The compose input's content lives in a mirror shared by
 * both halves (the console's stand-in for a text widget), so that
 * `InsertTextAtCursor` can append to the real current text and echo the
 * result back as a `TextEdited` event, the same way a widget's input event
 * would.
 */
use crate::core::models::{PlatformId, StagedImageFile};
use crate::ui_layer::event_loop::{CommandRenderer, RuntimeInput};
use crate::ui_layer::types::{
    ComposerCommand, ComposerEvent, MessageSeverity, PostStatus, PreviewCardStack,
};

use std::fs;
use std::io::BufRead;
use std::path::Path;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::thread;

const HELP_TEXT: &str = "\
Commands:
  text <content>        Replace the draft text
  toggle <platform>     Toggle a platform (twitter, bluesky, linkedin)
  tab <platform>        Switch the preview tab
  emoji                 Open or close the emoji picker
  search <query>        Filter the emoji picker
  pick <emoji>          Insert an emoji at the cursor
  image <path>          Stage an image file
  image-clear           Remove the staged image
  enhance               Rewrite the draft with the AI service
  undo                  Revert the last enhancement
  post                  Publish to the enabled platforms
  copy <url>            Copy a result link to the clipboard
  help                  Show this list
  quit                  Exit";

// The console's stand-in for the compose text widget, shared between the
// stdin parser (user edits) and the renderer (programmatic replacement).
pub type ComposeMirror = Arc<Mutex<String>>;

pub fn new_compose_mirror() -> ComposeMirror {
    Arc::new(Mutex::new(String::new()))
}

// Widget state the parser owns: the platform checkboxes and the shared
// compose mirror.
struct InputMirror {
    enabled: Vec<PlatformId>,
    compose: ComposeMirror,
}

impl InputMirror {
    fn new(compose: ComposeMirror) -> Self {
        InputMirror {
            enabled: PlatformId::ALL.to_vec(),
            compose,
        }
    }
}

/*
 * Parses one input line into a runtime input. `Err` carries the message to
 * print for unusable lines; empty lines parse to `None`.
 */
fn parse_line(line: &str, mirror: &mut InputMirror) -> Result<Option<RuntimeInput>, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (trimmed, ""),
    };

    let event = match verb {
        "text" => {
            *mirror.compose.lock().unwrap() = rest.to_string();
            ComposerEvent::TextEdited {
                text: rest.to_string(),
            }
        }
        "toggle" => {
            let platform = parse_platform(rest)?;
            let enabled = !mirror.enabled.contains(&platform);
            if enabled {
                mirror.enabled.push(platform);
            } else {
                mirror.enabled.retain(|p| *p != platform);
            }
            ComposerEvent::PlatformToggled { platform, enabled }
        }
        "tab" => ComposerEvent::TabSelected {
            platform: parse_platform(rest)?,
        },
        "emoji" => ComposerEvent::EmojiTriggerClicked,
        "search" => ComposerEvent::EmojiQueryEdited {
            query: rest.to_string(),
        },
        "pick" => {
            if rest.is_empty() {
                return Err("Usage: pick <emoji>".to_string());
            }
            ComposerEvent::EmojiChosen {
                emoji: rest.to_string(),
            }
        }
        "image" => ComposerEvent::ImageSelected {
            file: load_image_file(Path::new(rest))?,
        },
        "image-clear" => ComposerEvent::ImageCleared,
        "enhance" => ComposerEvent::EnhanceRequested,
        "undo" => ComposerEvent::UndoEnhanceRequested,
        "post" => ComposerEvent::SubmitRequested,
        "copy" => {
            if rest.is_empty() {
                return Err("Usage: copy <url>".to_string());
            }
            ComposerEvent::CopyLinkRequested {
                url: rest.to_string(),
            }
        }
        "help" => {
            println!("{HELP_TEXT}");
            return Ok(None);
        }
        "quit" | "exit" => return Ok(Some(RuntimeInput::Quit)),
        other => return Err(format!("Unknown command '{other}'; try 'help'.")),
    };
    Ok(Some(RuntimeInput::Event(event)))
}

fn parse_platform(name: &str) -> Result<PlatformId, String> {
    PlatformId::parse_wire_name(&name.to_lowercase())
        .ok_or_else(|| format!("Unknown platform '{name}' (twitter, bluesky, linkedin)."))
}

// File extension to media type, for the staging validity check. Unknown
// extensions map to a non-image type and get rejected downstream.
fn media_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

fn load_image_file(path: &Path) -> Result<StagedImageFile, String> {
    let bytes = fs::read(path).map_err(|e| format!("Could not read {path:?}: {e}"))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image")
        .to_string();
    Ok(StagedImageFile {
        media_type: media_type_for(path).to_string(),
        file_name,
        bytes,
    })
}

/*
 * Spawns the stdin reader thread. It parses each line and forwards the
 * resulting input to the runtime; EOF behaves like `quit`. The thread ends
 * when stdin closes or the runtime side of the channel is dropped.
 */
pub fn spawn_input_reader(
    tx: Sender<RuntimeInput>,
    compose: ComposeMirror,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        let mut mirror = InputMirror::new(compose);
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    log::warn!("ConsoleFrontEnd: stdin read failed: {e}");
                    break;
                }
            };
            match parse_line(&line, &mut mirror) {
                Ok(Some(input)) => {
                    let quitting = matches!(input, RuntimeInput::Quit);
                    if tx.send(input).is_err() || quitting {
                        return;
                    }
                }
                Ok(None) => {}
                Err(message) => println!("{message}"),
            }
        }
        let _ = tx.send(RuntimeInput::Quit);
    })
}

// Info line under the preview header: the character count against the
// platform limit and how many posts the text splits into, or a bare count
// for platforms without a limit.
fn preview_info_line(stack: &PreviewCardStack) -> String {
    match stack.limit {
        Some(limit) => {
            let posts = stack.cards.len().max(1);
            let noun = if posts == 1 { "post" } else { "posts" };
            format!("{}/{limit} chars · {posts} {noun}", stack.count)
        }
        None => format!("{} chars · No limit", stack.count),
    }
}

// Renders the logic's commands as console output.
pub struct ConsoleFrontEnd {
    event_tx: Sender<RuntimeInput>,
    compose: ComposeMirror,
}

impl ConsoleFrontEnd {
    pub fn new(event_tx: Sender<RuntimeInput>, compose: ComposeMirror) -> Self {
        ConsoleFrontEnd { event_tx, compose }
    }
}

impl CommandRenderer for ConsoleFrontEnd {
    fn apply_command(&mut self, command: &ComposerCommand) {
        match command {
            ComposerCommand::SetComposeText { text } => {
                *self.compose.lock().unwrap() = text.clone();
                println!("[compose] {text}");
            }
            ComposerCommand::InsertTextAtCursor { text } => {
                // Console cursor is always at the end; echo the result back
                // as an edit, like a text widget's input event would.
                let merged = {
                    let mut compose = self.compose.lock().unwrap();
                    compose.push_str(text);
                    compose.clone()
                };
                println!("[compose] {merged}");
                let _ = self
                    .event_tx
                    .send(RuntimeInput::Event(ComposerEvent::TextEdited {
                        text: merged,
                    }));
            }
            ComposerCommand::SetControlEnabled { control, enabled } => {
                log::trace!("ConsoleFrontEnd: control {control:?} enabled={enabled}");
            }
            ComposerCommand::UpdateLabelText { text, severity, .. } => {
                if !text.is_empty() {
                    match severity {
                        MessageSeverity::Error => println!("[!] {text}"),
                        _ => println!("[·] {text}"),
                    }
                }
            }
            ComposerCommand::UpdateTabs { enabled, active } => {
                let tabs: Vec<String> = enabled
                    .iter()
                    .map(|p| {
                        if Some(*p) == *active {
                            format!("[{}]", p.label())
                        } else {
                            p.label().to_string()
                        }
                    })
                    .collect();
                println!("[tabs] {}", tabs.join(" "));
            }
            ComposerCommand::UpdateCounters { counters } => {
                for counter in counters {
                    let marker = if counter.over { " OVER" } else { "" };
                    println!(
                        "[count] {}: {}/{} ({}%){marker}",
                        counter.platform.label(),
                        counter.count,
                        counter.limit,
                        counter.percent
                    );
                }
            }
            ComposerCommand::RenderPreview { stack } => match stack {
                Some(stack) => {
                    println!(
                        "[preview] {} — {} {}",
                        stack.platform.label(),
                        stack.author_name,
                        stack.author_handle
                    );
                    println!("[preview] {}", preview_info_line(stack));
                    for (i, card) in stack.cards.iter().enumerate() {
                        let image = if card.shows_image { " [image]" } else { "" };
                        println!("  {}/{}: {}{image}", i + 1, stack.cards.len(), card.body);
                    }
                }
                None => println!("[preview] Start typing to see a preview..."),
            },
            ComposerCommand::SetPreviewRefreshing { refreshing } => {
                if *refreshing {
                    println!("[preview] refreshing...");
                }
            }
            ComposerCommand::ShowEmojiPicker { sections }
            | ComposerCommand::UpdateEmojiSections { sections } => {
                if sections.is_empty() {
                    println!("[emoji] no matches");
                }
                for section in sections {
                    println!("[emoji] {}: {}", section.name, section.emojis.join(" "));
                }
            }
            ComposerCommand::HideEmojiPicker => println!("[emoji] closed"),
            ComposerCommand::ShowImageAttachment { file_name, preview } => {
                println!("[image] {file_name} (preview at {:?})", preview.location);
            }
            ComposerCommand::ClearImageAttachment => println!("[image] cleared"),
            ComposerCommand::ShowUndoEnhance { visible } => {
                if *visible {
                    println!("[enhance] undo available");
                }
            }
            ComposerCommand::ShowPostStatus { status } => match status {
                PostStatus::Publishing => {
                    println!("[post] Publishing across selected platforms...")
                }
                PostStatus::Failed(message) => println!("[post] {message}"),
                PostStatus::Results(lines) => {
                    for line in lines {
                        match (&line.link, &line.error) {
                            (Some(link), _) if line.success => {
                                println!("[post] {}: posted — {link}", line.platform.label())
                            }
                            (None, _) if line.success => {
                                println!("[post] {}: posted", line.platform.label())
                            }
                            (_, error) => println!(
                                "[post] {}: failed — {}",
                                line.platform.label(),
                                error.as_deref().unwrap_or("Unknown error")
                            ),
                        }
                    }
                }
            },
            // Request and timer commands are consumed by the runtime and
            // never reach the renderer.
            ComposerCommand::StartTimer { .. }
            | ComposerCommand::CancelTimer { .. }
            | ComposerCommand::RequestPreview { .. }
            | ComposerCommand::RequestEnhance { .. }
            | ComposerCommand::RequestPost { .. }
            | ComposerCommand::RequestProfile
            | ComposerCommand::CopyToClipboard { .. } => {
                log::warn!("ConsoleFrontEnd: unexpected runtime command {command:?}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui_layer::types::PreviewCard;

    fn fresh_mirror() -> InputMirror {
        InputMirror::new(new_compose_mirror())
    }

    #[test]
    fn test_parse_text_command_keeps_content_and_updates_mirror() {
        let mut mirror = fresh_mirror();
        match parse_line("text hello  world", &mut mirror) {
            Ok(Some(RuntimeInput::Event(ComposerEvent::TextEdited { text }))) => {
                assert_eq!(text, "hello  world");
            }
            other => panic!("unexpected parse: {other:?}"),
        }
        assert_eq!(*mirror.compose.lock().unwrap(), "hello  world");
    }

    #[test]
    fn test_parse_toggle_flips_mirrored_state() {
        let mut mirror = fresh_mirror();
        match parse_line("toggle linkedin", &mut mirror) {
            Ok(Some(RuntimeInput::Event(ComposerEvent::PlatformToggled {
                platform,
                enabled,
            }))) => {
                assert_eq!(platform, PlatformId::Linkedin);
                assert!(!enabled, "all platforms start enabled");
            }
            other => panic!("unexpected parse: {other:?}"),
        }
        // A second toggle re-enables.
        match parse_line("toggle LinkedIn", &mut mirror) {
            Ok(Some(RuntimeInput::Event(ComposerEvent::PlatformToggled { enabled, .. }))) => {
                assert!(enabled);
            }
            other => panic!("unexpected parse: {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_platform_and_verb() {
        let mut mirror = fresh_mirror();
        assert!(parse_line("tab myspace", &mut mirror).is_err());
        assert!(parse_line("frobnicate", &mut mirror).is_err());
    }

    #[test]
    fn test_parse_quit_and_blank_lines() {
        let mut mirror = fresh_mirror();
        assert!(matches!(
            parse_line("quit", &mut mirror),
            Ok(Some(RuntimeInput::Quit))
        ));
        assert!(matches!(parse_line("   ", &mut mirror), Ok(None)));
    }

    #[test]
    fn test_insert_at_cursor_appends_to_mirror_and_echoes_an_edit() {
        // Arrange
        let compose = new_compose_mirror();
        *compose.lock().unwrap() = "ship it ".to_string();
        let (tx, rx) = std::sync::mpsc::channel();
        let mut front_end = ConsoleFrontEnd::new(tx, Arc::clone(&compose));

        // Act
        front_end.apply_command(&ComposerCommand::InsertTextAtCursor {
            text: "🚀".to_string(),
        });

        // Assert
        assert_eq!(*compose.lock().unwrap(), "ship it 🚀");
        match rx.try_recv() {
            Ok(RuntimeInput::Event(ComposerEvent::TextEdited { text })) => {
                assert_eq!(text, "ship it 🚀");
            }
            other => panic!("expected an echoed edit, got {other:?}"),
        }
    }

    #[test]
    fn test_preview_info_line_with_a_limit_includes_limit_and_part_count() {
        let stack = PreviewCardStack {
            platform: PlatformId::Twitter,
            author_name: "Your Name".to_string(),
            author_handle: "@you".to_string(),
            count: 300,
            limit: Some(280),
            cards: vec![
                PreviewCard {
                    body: "part one".to_string(),
                    shows_image: false,
                },
                PreviewCard {
                    body: "part two".to_string(),
                    shows_image: false,
                },
            ],
        };
        assert_eq!(preview_info_line(&stack), "300/280 chars · 2 posts");
    }

    #[test]
    fn test_preview_info_line_without_a_limit_shows_count_only() {
        let stack = PreviewCardStack {
            platform: PlatformId::Linkedin,
            author_name: "Your Name".to_string(),
            author_handle: "Your headline".to_string(),
            count: 87,
            limit: None,
            cards: vec![PreviewCard {
                body: "one long update".to_string(),
                shows_image: false,
            }],
        };
        assert_eq!(preview_info_line(&stack), "87 chars · No limit");
    }

    #[test]
    fn test_media_type_for_known_and_unknown_extensions() {
        assert_eq!(media_type_for(Path::new("a/photo.PNG")), "image/png");
        assert_eq!(media_type_for(Path::new("pic.jpeg")), "image/jpeg");
        assert_eq!(
            media_type_for(Path::new("notes.pdf")),
            "application/octet-stream"
        );
        assert_eq!(
            media_type_for(Path::new("no_extension")),
            "application/octet-stream"
        );
    }
}
