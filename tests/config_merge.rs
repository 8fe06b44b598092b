use std::fs;

use tempfile::TempDir;
use tmux_pulseline::{
    config::{
        build_render_config_with, load_config_from, load_project_override, merge_configs,
        parse_project_override, ProjectOverrideConfig, PulselineConfig, PROJECT_OVERRIDE_FILE,
    },
    error::PulselineError,
    render::separator::SeparatorStyle,
    types::SpacingMode,
};

#[test]
fn merge_with_empty_project_is_noop() {
    let user = PulselineConfig::default();
    let project = ProjectOverrideConfig::default();
    let merged = merge_configs(user, &project);

    assert_eq!(merged.display.theme, "tokyo-night");
    assert_eq!(merged.display.variant, "night");
    assert!(merged.display.icons);
    assert!(!merged.display.transparent);
    assert_eq!(merged.separators.style, "normal");
    assert!(merged.separators.edge.is_none());
}

#[test]
fn merge_project_overrides_variant() {
    let user = PulselineConfig::default();
    let project: ProjectOverrideConfig = toml::from_str(
        r#"
[display]
variant = "day"
"#,
    )
    .unwrap();

    let merged = merge_configs(user, &project);
    assert_eq!(merged.display.variant, "day");
    assert_eq!(
        merged.display.theme, "tokyo-night",
        "theme should inherit from user default"
    );
    assert!(merged.display.icons, "icons should inherit from user default");
}

#[test]
fn merge_project_overrides_separators_only() {
    let user: PulselineConfig = toml::from_str(
        r#"
[display]
spacing = "both"

[separators]
style = "slant"
initial = "rounded"
"#,
    )
    .unwrap();
    let project: ProjectOverrideConfig = toml::from_str(
        r#"
[separators]
edge = "flame:all"
"#,
    )
    .unwrap();

    let merged = merge_configs(user, &project);
    assert_eq!(merged.separators.style, "slant", "style should inherit");
    assert_eq!(merged.separators.initial.as_deref(), Some("rounded"));
    assert_eq!(merged.separators.edge.as_deref(), Some("flame:all"));
    assert_eq!(merged.display.spacing, "both");

    let render = build_render_config_with(&merged, |_| None);
    assert_eq!(render.separators.main, SeparatorStyle::Slant);
    assert_eq!(render.separators.edge.style, SeparatorStyle::Flame);
    assert!(render.separators.edge.all);
    assert_eq!(render.spacing, SpacingMode::Both);
}

#[test]
fn merge_full_project_override() {
    let user = PulselineConfig::default();
    let project: ProjectOverrideConfig = toml::from_str(
        r#"
[display]
theme = "tokyo-night"
variant = "day"
icons = false
transparent = true
spacing = "windows"
contrast_threshold = 0.6

[separators]
style = "pixel"
edge = "rounded"
initial = "none"
"#,
    )
    .unwrap();

    let merged = merge_configs(user, &project);
    assert_eq!(merged.display.variant, "day");
    assert!(!merged.display.icons);
    assert!(merged.display.transparent);
    assert_eq!(merged.display.spacing, "windows");
    assert_eq!(merged.display.contrast_threshold, 0.6);
    assert_eq!(merged.separators.style, "pixel");
    assert_eq!(merged.separators.initial.as_deref(), Some("none"));
}

#[test]
fn project_override_config_deserializes_empty() {
    let project: ProjectOverrideConfig = toml::from_str("").unwrap();
    assert!(project.display.theme.is_none());
    assert!(project.display.icons.is_none());
    assert!(project.separators.style.is_none());
}

// ── Files ────────────────────────────────────────────────────────────

#[test]
fn project_override_file_is_read_from_directory() {
    let dir = TempDir::new().unwrap();
    assert!(load_project_override(dir.path()).is_none());

    fs::write(
        dir.path().join(PROJECT_OVERRIDE_FILE),
        "[display]\ntransparent = true\n",
    )
    .unwrap();
    let project = load_project_override(dir.path()).expect("override should load");
    assert_eq!(project.display.transparent, Some(true));
}

#[test]
fn invalid_project_override_is_ignored() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(PROJECT_OVERRIDE_FILE), "[display\n").unwrap();
    assert!(load_project_override(dir.path()).is_none());
    assert!(matches!(
        parse_project_override("[display\n"),
        Err(PulselineError::ConfigParse { .. })
    ));
}

#[test]
fn missing_user_config_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = load_config_from(&dir.path().join("absent.toml")).unwrap_err();
    assert_eq!(err.code(), "PL-4001");
}
