//! Browser bindings
//!
//! Thin wrapper over [`Engine`] for the JS shell. Snapshots and events cross
//! the boundary as JSON strings; rendering and input capture stay in JS.

use wasm_bindgen::prelude::*;

use crate::engine::Engine;
use crate::input::Intent;
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    log::info!("Lane Runner engine loaded");
}

#[wasm_bindgen]
pub struct WebEngine {
    inner: Engine,
}

#[wasm_bindgen]
impl WebEngine {
    /// Engine with default tuning
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32) -> WebEngine {
        WebEngine {
            inner: Engine::new(Tuning::default(), seed as u64),
        }
    }

    /// Engine with tuning loaded from JSON
    #[wasm_bindgen(js_name = withTuning)]
    pub fn with_tuning(seed: u32, tuning_json: &str) -> Result<WebEngine, JsError> {
        let tuning = Tuning::from_json(tuning_json)?;
        Ok(WebEngine {
            inner: Engine::new(tuning, seed as u64),
        })
    }

    pub fn start(&mut self) -> bool {
        self.inner.start()
    }

    pub fn pause(&mut self) -> bool {
        self.inner.pause()
    }

    pub fn resume(&mut self) -> bool {
        self.inner.resume()
    }

    pub fn restart(&mut self) -> bool {
        self.inner.restart()
    }

    #[wasm_bindgen(js_name = returnToMenu)]
    pub fn return_to_menu(&mut self) -> bool {
        self.inner.return_to_menu()
    }

    /// Buffer an intent by wire name; unknown names are ignored
    #[wasm_bindgen(js_name = submitInputIntent)]
    pub fn submit_input_intent(&mut self, kind: &str) {
        match Intent::from_str(kind) {
            Some(intent) => self.inner.submit_intent(intent),
            None => log::warn!("Unknown intent '{}'", kind),
        }
    }

    pub fn tick(&mut self, elapsed_ms: f64) {
        self.inner.tick(elapsed_ms);
    }

    /// Current render snapshot as JSON
    pub fn snapshot(&self) -> Result<String, JsError> {
        Ok(self.inner.snapshot().to_json()?)
    }

    /// Events since the last call, as a JSON array
    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&mut self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.inner.drain_events())?)
    }
}
