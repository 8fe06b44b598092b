use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::{
    error::{PulselineError, Result},
    render::{
        contrast::DEFAULT_CONTRAST_THRESHOLD,
        separator::{EdgeStyle, SeparatorConfig, SeparatorStyle},
    },
    theme::{DEFAULT_THEME, DEFAULT_VARIANT},
    types::SpacingMode,
};

// ── Pulseline Config (TOML file) ─────────────────────────────────────

fn default_true() -> bool {
    true
}
fn default_theme() -> String {
    DEFAULT_THEME.to_string()
}
fn default_variant() -> String {
    DEFAULT_VARIANT.to_string()
}
fn default_spacing() -> String {
    "none".to_string()
}
fn default_style() -> String {
    SeparatorStyle::Normal.name().to_string()
}
fn default_threshold() -> f64 {
    DEFAULT_CONTRAST_THRESHOLD
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PulselineConfig {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub separators: SeparatorsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_variant")]
    pub variant: String,
    #[serde(default = "default_true")]
    pub icons: bool,
    #[serde(default)]
    pub transparent: bool,
    #[serde(default = "default_spacing")]
    pub spacing: String,
    #[serde(default = "default_threshold")]
    pub contrast_threshold: f64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            variant: default_variant(),
            icons: true,
            transparent: false,
            spacing: default_spacing(),
            contrast_threshold: default_threshold(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeparatorsConfig {
    #[serde(default = "default_style")]
    pub style: String,
    /// `<style>` or `<style>:all`; unset means "same as `style`".
    #[serde(default)]
    pub edge: Option<String>,
    #[serde(default)]
    pub initial: Option<String>,
}

impl Default for SeparatorsConfig {
    fn default() -> Self {
        Self {
            style: default_style(),
            edge: None,
            initial: None,
        }
    }
}

// ── Project overrides (all fields optional) ──────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectOverrideConfig {
    #[serde(default)]
    pub display: DisplayOverride,
    #[serde(default)]
    pub separators: SeparatorsOverride,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DisplayOverride {
    pub theme: Option<String>,
    pub variant: Option<String>,
    pub icons: Option<bool>,
    pub transparent: Option<bool>,
    pub spacing: Option<String>,
    pub contrast_threshold: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeparatorsOverride {
    pub style: Option<String>,
    pub edge: Option<String>,
    pub initial: Option<String>,
}

pub fn merge_configs(
    mut base: PulselineConfig,
    project: &ProjectOverrideConfig,
) -> PulselineConfig {
    let display = &project.display;
    if let Some(theme) = &display.theme {
        base.display.theme = theme.clone();
    }
    if let Some(variant) = &display.variant {
        base.display.variant = variant.clone();
    }
    if let Some(icons) = display.icons {
        base.display.icons = icons;
    }
    if let Some(transparent) = display.transparent {
        base.display.transparent = transparent;
    }
    if let Some(spacing) = &display.spacing {
        base.display.spacing = spacing.clone();
    }
    if let Some(threshold) = display.contrast_threshold {
        base.display.contrast_threshold = threshold;
    }

    let separators = &project.separators;
    if let Some(style) = &separators.style {
        base.separators.style = style.clone();
    }
    if let Some(edge) = &separators.edge {
        base.separators.edge = Some(edge.clone());
    }
    if let Some(initial) = &separators.initial {
        base.separators.initial = Some(initial.clone());
    }
    base
}

/// Returns `$XDG_CONFIG_HOME/tmux-pulseline/config.toml`, falling back to `~/.config`.
pub fn config_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME")
                .or_else(|_| std::env::var("USERPROFILE"))
                .unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("tmux-pulseline").join("config.toml")
}

pub fn parse_config(contents: &str) -> Result<PulselineConfig> {
    toml::from_str(contents).map_err(|err| PulselineError::ConfigParse {
        context: "config.toml",
        details: err.to_string(),
    })
}

pub fn load_config_from(path: &Path) -> Result<PulselineConfig> {
    let contents = std::fs::read_to_string(path).map_err(|source| PulselineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&contents)
}

/// Load config from disk, falling back to defaults if the file is missing or invalid.
/// A project override in the working directory is merged on top.
pub fn load_config() -> PulselineConfig {
    let path = config_path();
    let user = if path.exists() {
        load_config_from(&path).unwrap_or_else(|err| {
            tracing::warn!(path = %path.display(), error = %err, "invalid config, using defaults");
            PulselineConfig::default()
        })
    } else {
        PulselineConfig::default()
    };

    match std::env::current_dir() {
        Ok(dir) => match load_project_override(&dir) {
            Some(project) => merge_configs(user, &project),
            None => user,
        },
        Err(_) => user,
    }
}

pub const PROJECT_OVERRIDE_FILE: &str = ".tmux-pulseline.toml";

pub fn parse_project_override(contents: &str) -> Result<ProjectOverrideConfig> {
    toml::from_str(contents).map_err(|err| PulselineError::ConfigParse {
        context: PROJECT_OVERRIDE_FILE,
        details: err.to_string(),
    })
}

/// Read `dir/.tmux-pulseline.toml`. Missing is `None`; invalid logs and is `None`.
pub fn load_project_override(dir: &Path) -> Option<ProjectOverrideConfig> {
    let path = dir.join(PROJECT_OVERRIDE_FILE);
    let contents = std::fs::read_to_string(&path).ok()?;
    parse_project_override(&contents)
        .map_err(|err| {
            tracing::warn!(path = %path.display(), error = %err, "ignoring project override");
        })
        .ok()
}

/// Generate the default config file content.
pub fn default_config_toml() -> &'static str {
    r#"[display]
theme = "tokyo-night"     # builtin theme name
variant = "night"         # night | day
icons = true              # nerd font icons vs none
transparent = false       # use the terminal background for the bar
spacing = "none"          # none | windows | plugins | both
contrast_threshold = 0.5  # luminance at which text switches to dark

[separators]
style = "normal"          # normal | rounded | slant | flame | pixel | honeycomb | trapezoid | none
# edge = "rounded:all"    # style at bar-facing ends; ":all" also applies it at every gap
# initial = "rounded"     # style at the screen-facing end of a list
"#
}

// ── Render Config (runtime, built from PulselineConfig + env) ────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlyphMode {
    Ascii,
    Icon,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub glyph_mode: GlyphMode,
    pub theme: String,
    pub variant: String,
    pub separators: SeparatorConfig,
    pub spacing: SpacingMode,
    pub transparent: bool,
    pub contrast_threshold: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            glyph_mode: GlyphMode::Icon,
            theme: DEFAULT_THEME.to_string(),
            variant: DEFAULT_VARIANT.to_string(),
            separators: SeparatorConfig::uniform(SeparatorStyle::Normal),
            spacing: SpacingMode::None,
            transparent: false,
            contrast_threshold: DEFAULT_CONTRAST_THRESHOLD,
        }
    }
}

/// Build a RenderConfig from PulselineConfig + process environment overrides.
pub fn build_render_config(pulseline: &PulselineConfig) -> RenderConfig {
    build_render_config_with(pulseline, |key| std::env::var(key).ok())
}

/// Same as [`build_render_config`] with an injectable environment lookup.
pub fn build_render_config_with(
    pulseline: &PulselineConfig,
    env: impl Fn(&str) -> Option<String>,
) -> RenderConfig {
    let display = &pulseline.display;
    let theme = env("PULSELINE_THEME").unwrap_or_else(|| display.theme.clone());
    let variant = env("PULSELINE_VARIANT").unwrap_or_else(|| display.variant.clone());

    let icons = env("PULSELINE_ICONS")
        .map(|value| !matches!(value.as_str(), "0" | "false" | "ascii"))
        .unwrap_or(display.icons);
    let glyph_mode = if icons {
        GlyphMode::Icon
    } else {
        GlyphMode::Ascii
    };

    let transparent = env("PULSELINE_TRANSPARENT")
        .map(|value| matches!(value.as_str(), "1" | "true" | "on"))
        .unwrap_or(display.transparent);

    let spacing_name = env("PULSELINE_SPACING").unwrap_or_else(|| display.spacing.clone());
    let spacing = SpacingMode::parse(&spacing_name).unwrap_or_else(|| {
        tracing::warn!(spacing = %spacing_name, "unknown spacing mode, using none");
        SpacingMode::None
    });

    let style_name =
        env("PULSELINE_SEPARATOR").unwrap_or_else(|| pulseline.separators.style.clone());
    let main = SeparatorStyle::from_name_or_default(&style_name);
    let edge = env("PULSELINE_EDGE")
        .or_else(|| pulseline.separators.edge.clone())
        .map(|value| EdgeStyle::parse(&value))
        .unwrap_or(EdgeStyle {
            style: main,
            all: false,
        });
    let initial = pulseline
        .separators
        .initial
        .as_deref()
        .map(SeparatorStyle::from_name_or_default);

    RenderConfig {
        glyph_mode,
        theme,
        variant,
        separators: SeparatorConfig {
            main,
            edge,
            initial,
        },
        spacing,
        transparent,
        contrast_threshold: display.contrast_threshold,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn default_template_parses() {
        let config = parse_config(default_config_toml()).unwrap();
        assert_eq!(config.display.theme, "tokyo-night");
        assert_eq!(config.separators.style, "normal");
        assert!(config.separators.edge.is_none());
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let config = parse_config("").unwrap();
        let render = build_render_config_with(&config, no_env);
        assert_eq!(render, RenderConfig::default());
    }

    #[test]
    fn invalid_toml_is_config_parse_error() {
        assert!(matches!(
            parse_config("[display\ntheme ="),
            Err(PulselineError::ConfigParse { .. })
        ));
    }

    #[test]
    fn edge_defaults_to_main_style() {
        let config = parse_config("[separators]\nstyle = \"flame\"").unwrap();
        let render = build_render_config_with(&config, no_env);
        assert_eq!(render.separators.main, SeparatorStyle::Flame);
        assert_eq!(render.separators.edge.style, SeparatorStyle::Flame);
        assert!(!render.separators.edge.all);
    }

    #[test]
    fn edge_all_modifier_and_initial() {
        let config = parse_config(
            "[separators]\nstyle = \"normal\"\nedge = \"rounded:all\"\ninitial = \"slant\"",
        )
        .unwrap();
        let render = build_render_config_with(&config, no_env);
        assert_eq!(render.separators.edge.style, SeparatorStyle::Rounded);
        assert!(render.separators.edge.all);
        assert_eq!(render.separators.initial, Some(SeparatorStyle::Slant));
    }

    #[test]
    fn env_overrides_file() {
        let config = PulselineConfig::default();
        let render = build_render_config_with(&config, |key| match key {
            "PULSELINE_VARIANT" => Some("day".to_string()),
            "PULSELINE_SPACING" => Some("both".to_string()),
            "PULSELINE_ICONS" => Some("ascii".to_string()),
            "PULSELINE_TRANSPARENT" => Some("1".to_string()),
            "PULSELINE_SEPARATOR" => Some("pixel".to_string()),
            _ => None,
        });
        assert_eq!(render.variant, "day");
        assert_eq!(render.spacing, SpacingMode::Both);
        assert_eq!(render.glyph_mode, GlyphMode::Ascii);
        assert!(render.transparent);
        assert_eq!(render.separators.main, SeparatorStyle::Pixel);
    }

    #[test]
    fn unknown_names_fall_back() {
        let config = parse_config(
            "[display]\nspacing = \"sideways\"\n[separators]\nstyle = \"zigzag\"",
        )
        .unwrap();
        let render = build_render_config_with(&config, no_env);
        assert_eq!(render.spacing, SpacingMode::None);
        assert_eq!(render.separators.main, SeparatorStyle::Normal);
    }
}
