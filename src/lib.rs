pub mod config;
pub mod entity;
pub mod error;
pub mod logging;
pub mod providers;
pub mod render;
pub mod state;
pub mod theme;
pub mod types;

use config::RenderConfig;
use entity::WindowFormats;
use error::Result;
use providers::{JsonPayloadCollector, PayloadCollector};
use render::layout::{context_for, Orchestrator};
use state::{cache::default_cache_dir, ColorStore};
use theme::ThemeColorTable;
use types::Side;

#[derive(Debug)]
pub struct PulseLineRunner {
    store: ColorStore,
    collector: JsonPayloadCollector,
}

impl Default for PulseLineRunner {
    fn default() -> Self {
        Self::with_store(ColorStore::with_cache_dir(default_cache_dir()))
    }
}

impl PulseLineRunner {
    pub fn with_store(store: ColorStore) -> Self {
        Self {
            store,
            collector: JsonPayloadCollector,
        }
    }

    pub fn store(&self) -> &ColorStore {
        &self.store
    }

    /// Start a new cycle: forget the previous palette, then load or derive it.
    fn refresh(&mut self, config: &RenderConfig) {
        self.store.reset();
        let theme = ThemeColorTable::builtin_or_default(&config.theme, &config.variant);
        self.store.ensure(&theme);
    }

    /// Render the list described by a stdin payload.
    pub fn run_from_str(&mut self, input: &str, config: &RenderConfig) -> Result<String> {
        let payload = self.collector.collect_payload(input)?;
        self.refresh(config);

        let ctx = context_for(&self.store, config, payload.side, payload.list);
        let rendered = Orchestrator::new(&self.store, config).render(&payload.segments, &ctx);
        tracing::debug!(
            side = ?payload.side,
            list = ?payload.list,
            segments = payload.segments.len(),
            "rendered list"
        );
        Ok(rendered)
    }

    pub fn render_session(
        &mut self,
        config: &RenderConfig,
        side: Side,
        with_windows: bool,
    ) -> String {
        self.refresh(config);
        entity::render_session(&self.store, config, side, with_windows)
    }

    pub fn render_window_formats(&mut self, config: &RenderConfig, side: Side) -> WindowFormats {
        self.refresh(config);
        entity::render_window_formats(&self.store, config, side)
    }
}

pub fn run_from_str(input: &str, config: &RenderConfig) -> Result<String> {
    PulseLineRunner::default().run_from_str(input, config)
}
