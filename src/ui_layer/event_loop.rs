/*
 * The composer runtime: a single-threaded event loop that feeds
 * `ComposerEvent`s to the logic and executes the `ComposerCommand`s it
 * returns. The loop owns the two debounce timers (implemented as deadlines
 * checked with a bounded `recv_timeout`, where re-starting a pending timer
 * replaces its deadline) and dispatches backend round trips onto short-lived
 * worker threads whose completions re-enter the loop as events.
 *
 * Rendering commands are forwarded to a `CommandRenderer`; the runtime knows
 * nothing about what the front end does with them.
 */
use crate::core::{
    ClipboardOperations, EnhanceServiceOperations, PostServiceOperations,
    PreviewServiceOperations, ProfileServiceOperations,
};
use crate::ui_layer::types::{ComposerCommand, ComposerEvent, ComposerEventHandler, TimerKind};

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

// Everything that flows into the loop: composer events from the front end,
// timers, and service workers, plus the shutdown request.
#[derive(Debug)]
pub enum RuntimeInput {
    Event(ComposerEvent),
    Quit,
}

// The backend collaborators the runtime dispatches request commands to.
pub struct RuntimeServices {
    pub preview: Arc<dyn PreviewServiceOperations>,
    pub enhance: Arc<dyn EnhanceServiceOperations>,
    pub post: Arc<dyn PostServiceOperations>,
    pub profile: Arc<dyn ProfileServiceOperations>,
    pub clipboard: Arc<dyn ClipboardOperations>,
}

// Applies rendering commands to whatever the front end displays. Request
// commands and timer commands never reach the renderer.
pub trait CommandRenderer {
    fn apply_command(&mut self, command: &ComposerCommand);
}

pub struct ComposerRuntime {
    services: RuntimeServices,
    input_tx: Sender<RuntimeInput>,
    input_rx: Receiver<RuntimeInput>,
    // Pending timers as absolute deadlines. `insert` on an existing kind
    // replaces the deadline, which is exactly the trailing-edge debounce
    // restart semantic.
    timers: HashMap<TimerKind, Instant>,
}

impl ComposerRuntime {
    pub fn new(services: RuntimeServices) -> Self {
        let (input_tx, input_rx) = mpsc::channel();
        ComposerRuntime {
            services,
            input_tx,
            input_rx,
            timers: HashMap::new(),
        }
    }

    // A clonable sender for front-end input threads.
    pub fn input_sender(&self) -> Sender<RuntimeInput> {
        self.input_tx.clone()
    }

    /*
     * Runs the loop until `RuntimeInput::Quit` arrives or every sender is
     * dropped. Each received event is handled to completion, including the
     * commands it produces, before the next event is taken.
     */
    pub fn run(mut self, handler: &mut dyn ComposerEventHandler, renderer: &mut dyn CommandRenderer) {
        log::debug!("ComposerRuntime: Entering event loop.");
        loop {
            let input = match self.next_deadline() {
                Some(deadline) => {
                    let now = Instant::now();
                    if deadline <= now {
                        self.fire_elapsed_timers(handler, renderer);
                        continue;
                    }
                    match self.input_rx.recv_timeout(deadline - now) {
                        Ok(input) => input,
                        Err(RecvTimeoutError::Timeout) => {
                            self.fire_elapsed_timers(handler, renderer);
                            continue;
                        }
                        Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                None => match self.input_rx.recv() {
                    Ok(input) => input,
                    Err(_) => break,
                },
            };

            match input {
                RuntimeInput::Event(event) => self.dispatch(event, handler, renderer),
                RuntimeInput::Quit => break,
            }
        }
        handler.on_quit();
        log::debug!("ComposerRuntime: Event loop finished.");
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.timers.values().min().copied()
    }

    fn fire_elapsed_timers(
        &mut self,
        handler: &mut dyn ComposerEventHandler,
        renderer: &mut dyn CommandRenderer,
    ) {
        let now = Instant::now();
        let elapsed: Vec<TimerKind> = self
            .timers
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(kind, _)| *kind)
            .collect();
        for timer in elapsed {
            self.timers.remove(&timer);
            log::trace!("ComposerRuntime: Timer {timer:?} elapsed.");
            self.dispatch(ComposerEvent::TimerElapsed { timer }, handler, renderer);
        }
    }

    fn dispatch(
        &mut self,
        event: ComposerEvent,
        handler: &mut dyn ComposerEventHandler,
        renderer: &mut dyn CommandRenderer,
    ) {
        let commands = handler.handle_event(event);
        for command in commands {
            self.execute(command, renderer);
        }
    }

    fn execute(&mut self, command: ComposerCommand, renderer: &mut dyn CommandRenderer) {
        match command {
            ComposerCommand::StartTimer { timer, quiet_ms } => {
                self.timers
                    .insert(timer, Instant::now() + Duration::from_millis(quiet_ms));
            }
            ComposerCommand::CancelTimer { timer } => {
                self.timers.remove(&timer);
            }
            ComposerCommand::RequestPreview {
                seq,
                text,
                platforms,
            } => {
                let service = Arc::clone(&self.services.preview);
                let tx = self.input_tx.clone();
                thread::spawn(move || {
                    let outcome = service
                        .fetch_preview(&text, &platforms)
                        .map_err(|e| e.to_string());
                    // The loop may already be gone on shutdown.
                    let _ = tx.send(RuntimeInput::Event(ComposerEvent::PreviewArrived {
                        seq,
                        outcome,
                    }));
                });
            }
            ComposerCommand::RequestEnhance { text } => {
                let service = Arc::clone(&self.services.enhance);
                let tx = self.input_tx.clone();
                thread::spawn(move || {
                    let outcome = service.enhance(&text).map_err(|e| e.to_string());
                    let _ = tx.send(RuntimeInput::Event(ComposerEvent::EnhanceCompleted {
                        outcome,
                    }));
                });
            }
            ComposerCommand::RequestPost {
                text,
                platforms,
                image,
            } => {
                let service = Arc::clone(&self.services.post);
                let tx = self.input_tx.clone();
                thread::spawn(move || {
                    let outcome = service
                        .publish(&text, &platforms, image.as_ref())
                        .map_err(|e| e.to_string());
                    let _ = tx.send(RuntimeInput::Event(ComposerEvent::PostCompleted {
                        outcome,
                    }));
                });
            }
            ComposerCommand::RequestProfile => {
                let service = Arc::clone(&self.services.profile);
                let tx = self.input_tx.clone();
                thread::spawn(move || {
                    let profile = match service.fetch_profile() {
                        Ok(profile) => Some(profile),
                        Err(e) => {
                            log::warn!("ComposerRuntime: Profile fetch failed: {e}");
                            None
                        }
                    };
                    let _ = tx.send(RuntimeInput::Event(ComposerEvent::ProfileLoaded {
                        profile,
                    }));
                });
            }
            ComposerCommand::CopyToClipboard { text } => {
                if !self.services.clipboard.copy_text(&text) {
                    log::warn!("ComposerRuntime: Clipboard copy failed.");
                }
            }
            other => renderer.apply_command(&other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{
        PlatformId, PostResultSet, PreviewResult, PreviewSnapshot, StagedImageFile, UserProfile,
    };
    use crate::core::backend;
    use std::sync::Mutex;

    // Scripted handler: emits a fixed command list per event kind and
    // records everything it saw.
    struct ScriptedHandler {
        seen: Arc<Mutex<Vec<ComposerEvent>>>,
        on_text_edited: Vec<ComposerCommand>,
    }

    impl ComposerEventHandler for ScriptedHandler {
        fn handle_event(&mut self, event: ComposerEvent) -> Vec<ComposerCommand> {
            let commands = match &event {
                ComposerEvent::TextEdited { .. } => self.on_text_edited.clone(),
                _ => Vec::new(),
            };
            self.seen.lock().unwrap().push(event);
            commands
        }
    }

    struct NullRenderer;
    impl CommandRenderer for NullRenderer {
        fn apply_command(&mut self, _command: &ComposerCommand) {}
    }

    struct FixedPreviewService;
    impl PreviewServiceOperations for FixedPreviewService {
        fn fetch_preview(
            &self,
            _text: &str,
            platforms: &[PlatformId],
        ) -> backend::Result<PreviewSnapshot> {
            Ok(platforms
                .iter()
                .map(|p| {
                    (
                        *p,
                        PreviewResult {
                            count: 5,
                            limit: Some(280),
                            over: false,
                            parts: vec!["hello".to_string()],
                        },
                    )
                })
                .collect())
        }
    }

    struct UnusedEnhanceService;
    impl EnhanceServiceOperations for UnusedEnhanceService {
        fn enhance(&self, _text: &str) -> backend::Result<String> {
            panic!("not expected in this test")
        }
    }

    struct UnusedPostService;
    impl PostServiceOperations for UnusedPostService {
        fn publish(
            &self,
            _text: &str,
            _platforms: &[PlatformId],
            _image: Option<&StagedImageFile>,
        ) -> backend::Result<PostResultSet> {
            panic!("not expected in this test")
        }
    }

    struct UnusedProfileService;
    impl ProfileServiceOperations for UnusedProfileService {
        fn fetch_profile(&self) -> backend::Result<UserProfile> {
            panic!("not expected in this test")
        }
    }

    struct NullClipboard;
    impl ClipboardOperations for NullClipboard {
        fn copy_text(&self, _text: &str) -> bool {
            true
        }
    }

    fn test_services() -> RuntimeServices {
        RuntimeServices {
            preview: Arc::new(FixedPreviewService),
            enhance: Arc::new(UnusedEnhanceService),
            post: Arc::new(UnusedPostService),
            profile: Arc::new(UnusedProfileService),
            clipboard: Arc::new(NullClipboard),
        }
    }

    fn edited(text: &str) -> RuntimeInput {
        RuntimeInput::Event(ComposerEvent::TextEdited {
            text: text.to_string(),
        })
    }

    #[test]
    fn test_restarting_a_pending_timer_fires_it_once() {
        // Arrange
        crate::initialize_logging();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut handler = ScriptedHandler {
            seen: Arc::clone(&seen),
            on_text_edited: vec![ComposerCommand::StartTimer {
                timer: TimerKind::DraftSave,
                quiet_ms: 40,
            }],
        };
        let runtime = ComposerRuntime::new(test_services());
        let tx = runtime.input_sender();

        let feeder = thread::spawn(move || {
            // Two edits inside one quiet period, then wait out the debounce.
            tx.send(edited("a")).unwrap();
            thread::sleep(Duration::from_millis(10));
            tx.send(edited("ab")).unwrap();
            thread::sleep(Duration::from_millis(120));
            tx.send(RuntimeInput::Quit).unwrap();
        });

        // Act
        runtime.run(&mut handler, &mut NullRenderer);
        feeder.join().unwrap();

        // Assert
        let elapsed_count = seen
            .lock()
            .unwrap()
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    ComposerEvent::TimerElapsed {
                        timer: TimerKind::DraftSave
                    }
                )
            })
            .count();
        assert_eq!(elapsed_count, 1, "restart must replace the pending timer");
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        // Arrange
        crate::initialize_logging();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut handler = ScriptedHandler {
            seen: Arc::clone(&seen),
            on_text_edited: vec![
                ComposerCommand::StartTimer {
                    timer: TimerKind::PreviewRefresh,
                    quiet_ms: 30,
                },
                ComposerCommand::CancelTimer {
                    timer: TimerKind::PreviewRefresh,
                },
            ],
        };
        let runtime = ComposerRuntime::new(test_services());
        let tx = runtime.input_sender();

        let feeder = thread::spawn(move || {
            tx.send(edited("a")).unwrap();
            thread::sleep(Duration::from_millis(80));
            tx.send(RuntimeInput::Quit).unwrap();
        });

        // Act
        runtime.run(&mut handler, &mut NullRenderer);
        feeder.join().unwrap();

        // Assert
        assert!(
            seen.lock()
                .unwrap()
                .iter()
                .all(|e| !matches!(e, ComposerEvent::TimerElapsed { .. })),
            "a cancelled timer must not elapse"
        );
    }

    #[test]
    fn test_preview_request_completion_reenters_as_event() {
        // Arrange
        crate::initialize_logging();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut handler = ScriptedHandler {
            seen: Arc::clone(&seen),
            on_text_edited: vec![ComposerCommand::RequestPreview {
                seq: 7,
                text: "hello".to_string(),
                platforms: vec![PlatformId::Twitter],
            }],
        };
        let runtime = ComposerRuntime::new(test_services());
        let tx = runtime.input_sender();

        let feeder = thread::spawn(move || {
            tx.send(edited("hello")).unwrap();
            // Leave time for the worker round trip to land.
            thread::sleep(Duration::from_millis(100));
            tx.send(RuntimeInput::Quit).unwrap();
        });

        // Act
        runtime.run(&mut handler, &mut NullRenderer);
        feeder.join().unwrap();

        // Assert
        let seen = seen.lock().unwrap();
        let arrived = seen
            .iter()
            .find_map(|e| match e {
                ComposerEvent::PreviewArrived { seq, outcome } => Some((*seq, outcome.clone())),
                _ => None,
            })
            .expect("completion must re-enter the loop");
        assert_eq!(arrived.0, 7);
        let snapshot = arrived.1.expect("fixed service succeeds");
        assert_eq!(snapshot[&PlatformId::Twitter].count, 5);
    }
}
