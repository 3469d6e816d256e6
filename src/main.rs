/*
 * Entry point for the cross-poster composer. Wires the concrete core
 * implementations (draft store, preview resource manager, HTTP backend
 * client, clipboard) into `ComposerLogic` and runs the console front end on
 * the runtime event loop.
 */

mod app_logic;
mod core;
mod ui_layer;

use crate::app_logic::ComposerLogic;
use crate::core::{
    ClipboardOperations, CoreClipboard, CoreDraftStore, CorePreviewResourceManager,
    DraftStoreOperations, EnhanceServiceOperations, HttpBackendClient, PostServiceOperations,
    PreviewResourceOperations, PreviewServiceOperations, ProfileServiceOperations,
};
use crate::ui_layer::console::{ConsoleFrontEnd, new_compose_mirror, spawn_input_reader};
use crate::ui_layer::event_loop::{ComposerRuntime, RuntimeInput, RuntimeServices};
use crate::ui_layer::types::ComposerEvent;

use std::sync::{Arc, Once};

pub const APP_NAME: &str = "CrossPoster";

static INIT_LOGGING: Once = Once::new();

/*
 * Initializes the global logger exactly once. Logs go to a file in the temp
 * directory because stdout belongs to the front end; tests call this too,
 * where a failed init is harmless.
 */
pub fn initialize_logging() {
    INIT_LOGGING.call_once(|| {
        let log_path = std::env::temp_dir().join("cross_poster.log");
        match std::fs::File::create(&log_path) {
            Ok(file) => {
                let config = simplelog::ConfigBuilder::new()
                    .set_time_format_rfc3339()
                    .build();
                if simplelog::WriteLogger::init(log::LevelFilter::Debug, config, file).is_err() {
                    eprintln!("Logger was already initialized.");
                }
            }
            Err(e) => {
                eprintln!("Could not create log file {log_path:?}: {e}");
            }
        }
    });
}

fn main() {
    initialize_logging();
    log::debug!("main: Starting {APP_NAME}.");

    let draft_store: Arc<dyn DraftStoreOperations> = match CoreDraftStore::new(APP_NAME) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            eprintln!("Could not set up draft storage: {e}");
            return;
        }
    };
    let preview_resources: Arc<dyn PreviewResourceOperations> =
        match CorePreviewResourceManager::new(APP_NAME) {
            Ok(manager) => Arc::new(manager),
            Err(e) => {
                eprintln!("Could not set up image preview staging: {e}");
                return;
            }
        };

    let backend = Arc::new(HttpBackendClient::from_env());
    let services = RuntimeServices {
        preview: Arc::clone(&backend) as Arc<dyn PreviewServiceOperations>,
        enhance: Arc::clone(&backend) as Arc<dyn EnhanceServiceOperations>,
        post: Arc::clone(&backend) as Arc<dyn PostServiceOperations>,
        profile: backend as Arc<dyn ProfileServiceOperations>,
        clipboard: Arc::new(CoreClipboard::new()) as Arc<dyn ClipboardOperations>,
    };

    let mut logic = ComposerLogic::new(draft_store, preview_resources);

    let runtime = ComposerRuntime::new(services);
    let input_tx = runtime.input_sender();
    // The compose text mirror is shared between the stdin parser and the
    // renderer so emoji insertion appends to the user's current text.
    let compose = new_compose_mirror();
    let mut front_end = ConsoleFrontEnd::new(runtime.input_sender(), Arc::clone(&compose));

    // Startup event first, then hand stdin to the reader thread.
    if input_tx
        .send(RuntimeInput::Event(ComposerEvent::Started))
        .is_err()
    {
        return;
    }
    let reader = spawn_input_reader(input_tx, compose);

    println!("Cross-poster console. Type 'help' for commands.");
    runtime.run(&mut logic, &mut front_end);

    // The reader thread ends with stdin or with its own `quit`.
    drop(reader);
    log::debug!("main: {APP_NAME} exited cleanly.");
}
