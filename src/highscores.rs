//! High score persistence
//!
//! A single scalar, persisted to LocalStorage on the web. The session calls
//! [`load`] once at init and [`save`] on every improvement.

/// LocalStorage key (used only in wasm32)
#[cfg(target_arch = "wasm32")]
const STORAGE_KEY: &str = "soda_drop_highscore";

/// Envelope around the persisted scalar
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default, serde::Serialize, serde::Deserialize)]
struct Saved {
    best: u32,
}

/// Load the stored high score from LocalStorage (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn load() -> u32 {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    if let Some(storage) = storage {
        if let Ok(Some(json)) = storage.get_item(STORAGE_KEY) {
            if let Ok(saved) = serde_json::from_str::<Saved>(&json) {
                log::info!("loaded high score {}", saved.best);
                return saved.best;
            }
        }
    }

    log::info!("no stored high score, starting fresh");
    0
}

/// Save the high score to LocalStorage (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn save(best: u32) {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    if let Some(storage) = storage {
        if let Ok(json) = serde_json::to_string(&Saved { best }) {
            let _ = storage.set_item(STORAGE_KEY, &json);
            log::info!("high score saved ({best})");
        }
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn load() -> u32 {
    0
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save(_best: u32) {
    // No-op for native
}
