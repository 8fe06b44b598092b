use std::{
    collections::BTreeMap,
    fs,
    hash::{DefaultHasher, Hash, Hasher},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    error::{PulselineError, Result},
    render::color::{generate_variants, Color, Variant, VariantSet},
    theme::ThemeColorTable,
};

/// TTL for cached derived palettes (24 hours).
pub const CACHE_TTL_MS: u64 = 86_400_000;

/// Base colors plus their six variants, for every token of one theme variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivedPalette {
    pub bases: BTreeMap<String, Color>,
    pub variants: BTreeMap<String, VariantSet>,
}

impl DerivedPalette {
    pub fn from_theme(theme: &ThemeColorTable) -> Self {
        let mut palette = Self::default();
        for (token, base) in theme.tokens() {
            palette.bases.insert(token.to_string(), base);
            palette
                .variants
                .insert(token.to_string(), generate_variants(base));
        }
        palette
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }
}

/// On-disk shape: one theme + variant combination per file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheFile {
    pub theme: String,
    pub variant: String,
    pub cached_at_ms: u64,
    pub colors: BTreeMap<String, String>,
}

/// Flatten into `token → hex` and `token-variant → hex`.
pub fn serialize_variants(palette: &DerivedPalette) -> BTreeMap<String, String> {
    let mut flat = BTreeMap::new();
    for (token, base) in &palette.bases {
        flat.insert(token.clone(), base.to_hex());
    }
    for (token, set) in &palette.variants {
        for (variant, color) in set.iter() {
            flat.insert(format!("{token}-{variant}"), color.to_hex());
        }
    }
    flat
}

/// Inverse of [`serialize_variants`]. Any cardinality or format mismatch is `CacheCorrupt`.
pub fn deserialize_variants(flat: &BTreeMap<String, String>) -> Result<DerivedPalette> {
    let mut bases: BTreeMap<String, Color> = BTreeMap::new();
    let mut grouped: BTreeMap<String, Vec<(Variant, Color)>> = BTreeMap::new();

    for (key, hex) in flat {
        let color = Color::parse(hex)
            .map_err(|_| PulselineError::cache_corrupt(format!("bad color {hex:?} at {key:?}")))?;

        match split_variant_key(key) {
            Some((token, variant)) => grouped
                .entry(token.to_string())
                .or_default()
                .push((variant, color)),
            None => {
                bases.insert(key.clone(), color);
            }
        }
    }

    let mut variants = BTreeMap::new();
    for (token, entries) in grouped {
        if !bases.contains_key(&token) {
            return Err(PulselineError::cache_corrupt(format!(
                "variants without base color for {token:?}"
            )));
        }
        let set = VariantSet::from_entries(&entries).ok_or_else(|| {
            PulselineError::cache_corrupt(format!(
                "{token:?} has {} variants, expected {}",
                entries.len(),
                Variant::ALL.len()
            ))
        })?;
        variants.insert(token, set);
    }

    if let Some(token) = bases.keys().find(|token| !variants.contains_key(*token)) {
        return Err(PulselineError::cache_corrupt(format!(
            "{token:?} has no variants"
        )));
    }

    Ok(DerivedPalette { bases, variants })
}

/// Whether `key` has the `token-variant` shape of a derived cache entry.
/// Theme tokens with such names would read back as variants, so themes reject them.
pub fn is_variant_key(key: &str) -> bool {
    split_variant_key(key).is_some()
}

fn split_variant_key(key: &str) -> Option<(&str, Variant)> {
    let (token, suffix) = key.rsplit_once('-')?;
    Variant::parse(suffix).map(|variant| (token, variant))
}

/// Compute the cache file path for a theme + variant inside `dir`.
pub fn cache_path(dir: &Path, theme: &str, variant: &str) -> PathBuf {
    let mut hasher = DefaultHasher::new();
    format!("{theme}|{variant}").hash(&mut hasher);
    let hash = hasher.finish();
    dir.join(format!("tmux-pulseline-{hash:x}.json"))
}

pub fn default_cache_dir() -> PathBuf {
    std::env::temp_dir()
}

/// Load a cached palette. Returns None when missing, expired, mismatched or corrupt.
pub fn load_cache(dir: &Path, theme: &str, variant: &str, now_ms: u64) -> Option<DerivedPalette> {
    let path = cache_path(dir, theme, variant);
    let contents = fs::read_to_string(&path).ok()?;
    let file: CacheFile = match serde_json::from_str(&contents) {
        Ok(file) => file,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "unreadable color cache");
            return None;
        }
    };

    if file.theme != theme || file.variant != variant {
        tracing::debug!(path = %path.display(), "color cache belongs to another theme");
        return None;
    }
    if now_ms.saturating_sub(file.cached_at_ms) >= CACHE_TTL_MS {
        tracing::debug!(path = %path.display(), "color cache expired");
        return None;
    }

    match deserialize_variants(&file.colors) {
        Ok(palette) => Some(palette),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "discarding color cache");
            None
        }
    }
}

/// Save with an atomic write. Concurrent writers race benignly: last writer wins.
pub fn save_cache(
    dir: &Path,
    theme: &str,
    variant: &str,
    palette: &DerivedPalette,
    now_ms: u64,
) -> Result<()> {
    let path = cache_path(dir, theme, variant);
    let file = CacheFile {
        theme: theme.to_string(),
        variant: variant.to_string(),
        cached_at_ms: now_ms,
        colors: serialize_variants(palette),
    };
    let contents = serde_json::to_string(&file)
        .map_err(|err| PulselineError::cache_corrupt(err.to_string()))?;

    let tmp_path = path.with_extension(format!("{}.tmp", std::process::id()));
    fs::write(&tmp_path, contents).map_err(|source| PulselineError::Io {
        path: tmp_path.clone(),
        source,
    })?;
    fs::rename(&tmp_path, &path).map_err(|source| PulselineError::Io { path, source })
}

pub fn now_epoch_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
