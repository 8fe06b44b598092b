use std::{collections::BTreeMap, fs};

use proptest::prelude::*;
use tempfile::TempDir;
use tmux_pulseline::{
    config::RenderConfig,
    error::PulselineError,
    render::color::Color,
    state::{
        cache::{
            cache_path, deserialize_variants, load_cache, now_epoch_ms, save_cache,
            serialize_variants, CacheFile, DerivedPalette, CACHE_TTL_MS,
        },
        ColorStore, StoreSource,
    },
    theme::ThemeColorTable,
    PulseLineRunner,
};

fn night() -> ThemeColorTable {
    ThemeColorTable::builtin("tokyo-night", "night").unwrap()
}

fn palette() -> DerivedPalette {
    DerivedPalette::from_theme(&night())
}

// ── Flat map contract ────────────────────────────────────────────────

#[test]
fn flat_map_has_base_and_six_variants_per_token() {
    let flat = serialize_variants(&palette());
    assert_eq!(flat.len(), 26 * 7);
    assert_eq!(flat["ok-base"], "#394b70");
    assert!(flat.contains_key("ok-base-light10"));
    assert!(flat.contains_key("statusbar-bg-dark55"));
}

#[test]
fn flat_map_round_trips() {
    let original = palette();
    let restored = deserialize_variants(&serialize_variants(&original)).unwrap();
    assert_eq!(restored, original);
}

#[test]
fn missing_variant_is_corrupt() {
    let mut flat = serialize_variants(&palette());
    flat.remove("error-base-dark20");
    let err = deserialize_variants(&flat).unwrap_err();
    assert!(matches!(err, PulselineError::CacheCorrupt { .. }), "{err}");
}

#[test]
fn orphan_variant_is_corrupt() {
    let mut flat = BTreeMap::new();
    flat.insert("ghost-light10".to_string(), "#ffffff".to_string());
    assert!(deserialize_variants(&flat).is_err());
}

#[test]
fn malformed_hex_in_cache_is_corrupt() {
    let mut flat = serialize_variants(&palette());
    flat.insert("ok-base".to_string(), "#zzzzzz".to_string());
    assert!(matches!(
        deserialize_variants(&flat),
        Err(PulselineError::CacheCorrupt { .. })
    ));
}

// ── Disk ─────────────────────────────────────────────────────────────

#[test]
fn save_then_load_within_ttl() {
    let dir = TempDir::new().unwrap();
    let now = now_epoch_ms();
    save_cache(dir.path(), "tokyo-night", "night", &palette(), now).unwrap();

    let loaded = load_cache(dir.path(), "tokyo-night", "night", now + 1_000).unwrap();
    assert_eq!(loaded, palette());
    assert!(load_cache(dir.path(), "tokyo-night", "day", now).is_none());
}

#[test]
fn expired_cache_is_ignored() {
    let dir = TempDir::new().unwrap();
    save_cache(dir.path(), "tokyo-night", "night", &palette(), 1_000).unwrap();
    assert!(load_cache(dir.path(), "tokyo-night", "night", 1_000 + CACHE_TTL_MS).is_none());
    assert!(load_cache(dir.path(), "tokyo-night", "night", CACHE_TTL_MS).is_some());
}

#[test]
fn corrupt_file_is_ignored() {
    let dir = TempDir::new().unwrap();
    let path = cache_path(dir.path(), "tokyo-night", "night");
    fs::write(&path, "{ not json").unwrap();
    assert!(load_cache(dir.path(), "tokyo-night", "night", now_epoch_ms()).is_none());

    let mut colors = serialize_variants(&palette());
    colors.remove("ok-base-light55");
    let file = CacheFile {
        theme: "tokyo-night".to_string(),
        variant: "night".to_string(),
        cached_at_ms: now_epoch_ms(),
        colors,
    };
    fs::write(&path, serde_json::to_string(&file).unwrap()).unwrap();
    assert!(load_cache(dir.path(), "tokyo-night", "night", now_epoch_ms()).is_none());
}

#[test]
fn no_temp_files_left_behind() {
    let dir = TempDir::new().unwrap();
    save_cache(dir.path(), "tokyo-night", "night", &palette(), now_epoch_ms()).unwrap();
    let names: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(names.len(), 1, "{names:?}");
    assert!(names[0].ends_with(".json"));
}

// ── ColorStore lifecycle ─────────────────────────────────────────────

#[test]
fn store_generates_then_reuses_disk_cache() {
    let dir = TempDir::new().unwrap();

    let mut first = ColorStore::with_cache_dir(dir.path());
    first.ensure(&night());
    assert_eq!(first.source(), Some(StoreSource::Generated));
    assert!(cache_path(dir.path(), "tokyo-night", "night").exists());

    let mut second = ColorStore::with_cache_dir(dir.path());
    second.ensure(&night());
    assert_eq!(second.source(), Some(StoreSource::DiskCache));
    assert_eq!(second.palette(), first.palette());
}

#[test]
fn stale_cache_missing_tokens_is_regenerated() {
    let dir = TempDir::new().unwrap();
    let partial = ThemeColorTable::new("tokyo-night", "night")
        .with_color("ok-base", Color::parse("#394b70").unwrap());
    save_cache(
        dir.path(),
        "tokyo-night",
        "night",
        &DerivedPalette::from_theme(&partial),
        now_epoch_ms(),
    )
    .unwrap();

    let mut store = ColorStore::with_cache_dir(dir.path());
    store.ensure(&night());
    assert_eq!(store.source(), Some(StoreSource::Generated));
    assert_eq!(store.palette().len(), 26);
}

#[test]
fn runner_resets_the_store_every_cycle() {
    let dir = TempDir::new().unwrap();
    let mut runner = PulseLineRunner::with_store(ColorStore::with_cache_dir(dir.path()));
    let config = RenderConfig::default();

    runner.run_from_str("{}", &config).unwrap();
    assert_eq!(runner.store().source(), Some(StoreSource::Generated));

    runner.run_from_str("{}", &config).unwrap();
    assert_eq!(runner.store().source(), Some(StoreSource::DiskCache));

    let day = RenderConfig {
        variant: "day".to_string(),
        ..RenderConfig::default()
    };
    runner.run_from_str("{}", &day).unwrap();
    assert_eq!(runner.store().key(), Some(("tokyo-night", "day")));
}

proptest! {
    #[test]
    fn arbitrary_palettes_round_trip(
        colors in prop::collection::btree_map("[a-z]{1,8}-base", any::<(u8, u8, u8)>(), 0..12)
    ) {
        let mut theme = ThemeColorTable::new("t", "v");
        for (token, (r, g, b)) in &colors {
            theme = theme.with_color(token, Color::rgb(*r, *g, *b));
        }
        let palette = DerivedPalette::from_theme(&theme);
        prop_assert_eq!(deserialize_variants(&serialize_variants(&palette)).unwrap(), palette);
    }
}
