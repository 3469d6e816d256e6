/*
 * This module provides the UI/runtime layer: the shared event and command
 * vocabulary (`types`), the single-threaded event loop that owns the debounce
 * timers and dispatches service round trips onto worker threads
 * (`event_loop`), and the line-oriented console front end (`console`).
 */
pub mod console;
pub mod event_loop;
pub mod types;

pub use console::ConsoleFrontEnd;
pub use event_loop::{CommandRenderer, ComposerRuntime, RuntimeInput, RuntimeServices};
pub use types::{
    ComposerCommand, ComposerEvent, ComposerEventHandler, ControlId, MessageSeverity, TimerKind,
};
