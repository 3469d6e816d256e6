/*
 * This module provides the application logic layer, centered around
 * `ComposerLogic` which acts as the coordinator between the front end, the
 * debounce timers, and the backend services. `ComposerState` holds the
 * explicit composer state it owns. Unit tests for `ComposerLogic` are in
 * `handler_tests.rs`.
 */
pub mod composer_state;
pub mod handler;
pub mod ui_constants;


pub use composer_state::ComposerState;
pub use handler::ComposerLogic;
#[cfg(test)]
pub use ui_constants::*;
