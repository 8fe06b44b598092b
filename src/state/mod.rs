pub mod cache;

use std::path::PathBuf;

use crate::{
    render::color::{generate_variants, Color, Variant, VariantSet, NEUTRAL_FALLBACK},
    theme::ThemeColorTable,
};
use cache::DerivedPalette;

/// Where a populated store got its colors from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreSource {
    DiskCache,
    Generated,
}

/// Per-cycle color/variant store. Either populated for one theme variant or empty.
#[derive(Debug, Clone)]
pub struct ColorStore {
    cache_dir: Option<PathBuf>,
    key: Option<(String, String)>,
    palette: DerivedPalette,
    source: Option<StoreSource>,
}

impl Default for ColorStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl ColorStore {
    /// A store that never touches disk.
    pub fn in_memory() -> Self {
        Self {
            cache_dir: None,
            key: None,
            palette: DerivedPalette::default(),
            source: None,
        }
    }

    /// A store backed by the on-disk cache in `dir`.
    pub fn with_cache_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: Some(dir.into()),
            ..Self::in_memory()
        }
    }

    pub fn reset(&mut self) {
        self.key = None;
        self.palette = DerivedPalette::default();
        self.source = None;
    }

    pub fn is_populated(&self) -> bool {
        self.key.is_some()
    }

    pub fn source(&self) -> Option<StoreSource> {
        self.source
    }

    pub fn key(&self) -> Option<(&str, &str)> {
        self.key
            .as_ref()
            .map(|(theme, variant)| (theme.as_str(), variant.as_str()))
    }

    /// Try the on-disk cache. Returns whether the store is now populated.
    pub fn load(&mut self, theme: &str, variant: &str) -> bool {
        let Some(dir) = &self.cache_dir else {
            return false;
        };
        match cache::load_cache(dir, theme, variant, cache::now_epoch_ms()) {
            Some(palette) => {
                tracing::debug!(theme, variant, tokens = palette.len(), "color cache hit");
                self.palette = palette;
                self.key = Some((theme.to_string(), variant.to_string()));
                self.source = Some(StoreSource::DiskCache);
                true
            }
            None => {
                tracing::debug!(theme, variant, "color cache miss");
                false
            }
        }
    }

    /// Derive every variant from the theme table.
    pub fn populate(&mut self, theme: &ThemeColorTable) {
        let missing = theme.missing_tokens();
        if !missing.is_empty() {
            tracing::warn!(
                theme = theme.name(),
                variant = theme.variant(),
                missing = ?missing,
                "theme is missing tokens, placeholders will be used"
            );
        }
        self.palette = DerivedPalette::from_theme(theme);
        self.key = Some((theme.name().to_string(), theme.variant().to_string()));
        self.source = Some(StoreSource::Generated);
    }

    /// Load from cache when possible, otherwise populate and persist.
    ///
    /// A cached palette missing tokens the theme now defines is regenerated.
    pub fn ensure(&mut self, theme: &ThemeColorTable) {
        if self.key() == Some((theme.name(), theme.variant())) {
            return;
        }
        if self.load(theme.name(), theme.variant()) && self.palette.len() == theme.len() {
            return;
        }

        self.populate(theme);
        if let Some(dir) = &self.cache_dir {
            if let Err(err) = cache::save_cache(
                dir,
                theme.name(),
                theme.variant(),
                &self.palette,
                cache::now_epoch_ms(),
            ) {
                tracing::warn!(error = %err, "failed to persist color cache");
            }
        }
    }

    pub fn base(&self, token: &str) -> Color {
        match self.palette.bases.get(token) {
            Some(color) => *color,
            None => {
                tracing::warn!(token, "unknown color token, using placeholder");
                NEUTRAL_FALLBACK
            }
        }
    }

    pub fn variants(&self, token: &str) -> VariantSet {
        match self.palette.variants.get(token) {
            Some(set) => *set,
            None => generate_variants(self.base(token)),
        }
    }

    pub fn variant(&self, token: &str, variant: Variant) -> Color {
        self.variants(token).get(variant)
    }

    pub fn palette(&self) -> &DerivedPalette {
        &self.palette
    }
}
