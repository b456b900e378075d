// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Fermentation Troubleshooting Game ("The Cellar")

pub mod types;
pub mod catalog;
pub mod transition;
pub mod history;
pub mod event_log;
pub mod advisor;
pub mod export;
pub mod config;
pub mod dashboard;
pub mod session;
pub mod adapter;

pub use types::*;
pub use catalog::{Action, ActionCatalog, CatalogError, Scenario, ScenarioCatalog};
pub use transition::{next_scenario, Transition, TransitionEngine, TransitionError};
pub use history::{SensorHistory, BATCH_LIMIT};
pub use event_log::{EventLog, FieldSanitizer, RoundRecord};
pub use advisor::{Advisor, AdvisorPanel, StaticAdvisor};
pub use export::{CsvExporter, ExportError};
pub use config::{ConfigError, GameConfig};
pub use dashboard::{ChannelView, DashboardView};
pub use session::{
    CompletionSummary, Feedback, GameSession, GateError, PendingInput, SessionError, SessionEvent, SessionSnapshot,
    SetupError,
};

use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = log)]
    fn console_log(s: &str);
}

// ─── Console Logger ──────────────────────────────────────────────────────────

/// Forwards `log` records to the browser console.
#[cfg(target_arch = "wasm32")]
struct ConsoleLogger;

#[cfg(target_arch = "wasm32")]
impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::Level::Info
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            console_log(&format!("{} {}", record.level(), record.args()));
        }
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
static CONSOLE_LOGGER: ConsoleLogger = ConsoleLogger;

/// Install the panic hook and console logger. Only the first call has effect.
#[cfg(target_arch = "wasm32")]
fn init_console() {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    if log::set_logger(&CONSOLE_LOGGER).is_ok() {
        log::set_max_level(log::LevelFilter::Info);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn init_console() {}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_js<T: serde::Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

/// `User_{millis}` for hosts that pass `Date.now()`.
#[wasm_bindgen]
pub fn user_id_from_millis(millis: f64) -> String {
    session::user_id_from_millis(Millis::from_f64(millis).0)
}

// ─── WASM Interface ──────────────────────────────────────────────────────────

#[wasm_bindgen]
pub struct FermentationGame {
    session: GameSession,
}

#[wasm_bindgen]
impl FermentationGame {
    #[wasm_bindgen(constructor)]
    pub fn new(user_id: String) -> Result<FermentationGame, JsValue> {
        init_console();
        let session = GameSession::with_defaults(user_id).map_err(js_error)?;
        Ok(Self { session })
    }

    /// Build a game from a JSON `GameConfig`; missing fields keep their defaults.
    pub fn with_config(user_id: String, config_json: &str) -> Result<FermentationGame, JsValue> {
        init_console();
        let config = GameConfig::from_json(config_json).map_err(js_error)?;
        let session = GameSession::new(user_id, config).map_err(js_error)?;
        Ok(Self { session })
    }

    /// Progress button. `now_millis` is the host's `Date.now()`. Returns the
    /// snapshot after the transition.
    pub fn advance(&mut self, now_millis: f64) -> Result<JsValue, JsValue> {
        self.session.set_clock(Millis::from_f64(now_millis));
        self.session.advance().map_err(js_error)?;
        Ok(self.get_snapshot())
    }

    pub fn set_clock(&mut self, now_millis: f64) {
        self.session.set_clock(Millis::from_f64(now_millis));
    }

    pub fn continue_tutorial(&mut self) -> Result<(), JsValue> {
        self.session.continue_tutorial().map_err(js_error)
    }

    pub fn set_assessment(&mut self, text: String) -> Result<(), JsValue> {
        self.session.set_assessment(text).map_err(js_error)
    }

    /// `action` is one of `fix_temp`, `pitch_yeast`, `manage_oxygen`, `sterilize`.
    pub fn select_action(&mut self, action: &str) -> Result<(), JsValue> {
        let action: ActionId = action.parse().map_err(js_error)?;
        self.session.select_action(action).map_err(js_error)
    }

    pub fn clear_action(&mut self) -> Result<(), JsValue> {
        self.session.clear_action().map_err(js_error)
    }

    pub fn set_difficulty(&mut self, score: u8) -> Result<(), JsValue> {
        self.session.set_difficulty(score).map_err(js_error)
    }

    pub fn toggle_ai_panel(&mut self) -> Result<bool, JsValue> {
        self.session.toggle_ai_panel().map_err(js_error)
    }

    /// Copy panel A (`noise = false`) or panel B (`noise = true`) into the
    /// assessment box. Returns the new assessment text.
    pub fn copy_ai_text(&mut self, noise: bool) -> Result<String, JsValue> {
        let variant = if noise { AdvisorVariant::Noise } else { AdvisorVariant::Real };
        self.session.copy_ai_text(variant).map_err(js_error)
    }

    pub fn get_snapshot(&self) -> JsValue {
        to_js(&self.session.snapshot())
    }

    pub fn get_dashboard(&self) -> JsValue {
        match self.session.dashboard() {
            Some(view) => to_js(&view),
            None => JsValue::NULL,
        }
    }

    pub fn get_ai_panel(&self) -> JsValue {
        match self.session.advisor_panel() {
            Some(panel) => to_js(panel),
            None => JsValue::NULL,
        }
    }

    pub fn get_log(&self) -> JsValue {
        to_js(self.session.log())
    }

    /// Pretty-printed log for the on-screen preview.
    pub fn get_log_json(&self) -> String {
        self.session.log().to_json_pretty().unwrap_or_default()
    }

    pub fn get_completion(&self) -> JsValue {
        match self.session.completion() {
            Some(summary) => to_js(summary),
            None => JsValue::NULL,
        }
    }

    /// Closing comment from the completion screen. Returns the stored record.
    pub fn submit_feedback(&mut self, text: &str) -> Result<JsValue, JsValue> {
        let feedback = self.session.submit_feedback(text).map_err(js_error)?;
        Ok(to_js(feedback))
    }

    pub fn export_csv(&self) -> Result<String, JsValue> {
        self.session.export_csv().map_err(js_error)
    }

    pub fn export_filename(&self) -> String {
        self.session.export_filename()
    }

    pub fn drain_events(&mut self) -> JsValue {
        to_js(&self.session.drain_events())
    }

    /// Start over with the same player and configuration.
    pub fn reset(&mut self) -> Result<(), JsValue> {
        let user_id = self.session.user_id().to_string();
        let config = self.session.config().clone();
        self.session = GameSession::new(user_id, config).map_err(js_error)?;
        Ok(())
    }
}
