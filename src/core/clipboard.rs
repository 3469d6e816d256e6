/*
 * Best-effort copy-to-clipboard for post result links. Two mechanisms are
 * tried in order: an external clipboard helper for the current display
 * server, then an OSC 52 escape sequence written to the terminal. Failure of
 * both is cosmetic and reported only through the return value; callers
 * ignore it silently.
 */
use base64::Engine;
use std::io::Write;
use std::process::{Command, Stdio};

// Helpers tried for the primary mechanism, in order.
const CLIPBOARD_HELPERS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("pbcopy", &[]),
];

pub trait ClipboardOperations: Send + Sync {
    // Returns whether any mechanism accepted the text.
    fn copy_text(&self, text: &str) -> bool;
}

pub struct CoreClipboard {}

impl CoreClipboard {
    pub fn new() -> Self {
        CoreClipboard {}
    }

    fn copy_via_helper(text: &str) -> bool {
        for (helper, args) in CLIPBOARD_HELPERS {
            let spawned = Command::new(helper)
                .args(*args)
                .stdin(Stdio::piped())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn();

            let Ok(mut child) = spawned else {
                continue;
            };
            if let Some(stdin) = child.stdin.as_mut() {
                if stdin.write_all(text.as_bytes()).is_err() {
                    let _ = child.kill();
                    continue;
                }
            }
            // Dropping stdin closes the pipe so the helper can finish.
            drop(child.stdin.take());
            match child.wait() {
                Ok(status) if status.success() => {
                    log::debug!("CoreClipboard: Copied via '{helper}'.");
                    return true;
                }
                _ => continue,
            }
        }
        false
    }

    fn copy_via_osc52(text: &str) -> bool {
        let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
        let mut stdout = std::io::stdout();
        let written = write!(stdout, "\x1b]52;c;{encoded}\x07").and_then(|_| stdout.flush());
        match written {
            Ok(()) => {
                log::debug!("CoreClipboard: Copied via OSC 52 escape sequence.");
                true
            }
            Err(e) => {
                log::debug!("CoreClipboard: OSC 52 write failed: {e}");
                false
            }
        }
    }
}

impl Default for CoreClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipboardOperations for CoreClipboard {
    fn copy_text(&self, text: &str) -> bool {
        Self::copy_via_helper(text) || Self::copy_via_osc52(text)
    }
}
