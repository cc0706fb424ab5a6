//! Platform glue for the host shell
//!
//! The shell owns the canvas, input wiring, and audio; the one thing the
//! core sets up for it is logging.

/// Install the logger (and the panic hook on the web). Safe to call twice.
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Install env_logger for native test/headless runs
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::Builder::from_default_env().try_init();
}
