//! Console logging and panic reporting for the browser.

use log::Level;
use std::sync::Once;

static INIT: Once = Once::new();

/// Route `log` records and panics to the browser console. Only the first
/// call takes effect, so every widget constructor may call it.
pub fn init(level: Level) {
    INIT.call_once(|| {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(level).is_err() {
            // another logger was installed by the embedding page's wasm
            log::debug!("console logger already installed");
        }
    });
}
