//! Theme color tables: named semantic tokens mapped to base colors.
//!
//! Loading theme files is the job of an outer layer; this module holds the
//! immutable table the renderer consumes plus the themes shipped in-tree.

use std::collections::BTreeMap;

use crate::{
    error::{PulselineError, Result},
    render::color::{Color, NEUTRAL_FALLBACK},
    state::cache::is_variant_key,
};

pub const TOKEN_BACKGROUND: &str = "background";
pub const TOKEN_SURFACE: &str = "surface";
pub const TOKEN_TEXT: &str = "text";
pub const TOKEN_BORDER: &str = "border";
pub const TOKEN_STATUSBAR_BG: &str = "statusbar-bg";
pub const TOKEN_STATUSBAR_FG: &str = "statusbar-fg";
pub const TOKEN_SESSION_BG: &str = "session-bg";
pub const TOKEN_SESSION_FG: &str = "session-fg";
pub const TOKEN_SESSION_PREFIX_BG: &str = "session-prefix-bg";
pub const TOKEN_SESSION_COPY_BG: &str = "session-copy-bg";
pub const TOKEN_WINDOW_ACTIVE: &str = "window-active-base";
pub const TOKEN_WINDOW_INACTIVE: &str = "window-inactive-base";
pub const TOKEN_WINDOW_ACTIVITY: &str = "window-activity-base";
pub const TOKEN_WINDOW_BELL: &str = "window-bell-base";
pub const TOKEN_PANE_BORDER_ACTIVE: &str = "pane-border-active";
pub const TOKEN_PANE_BORDER_INACTIVE: &str = "pane-border-inactive";
pub const TOKEN_OK: &str = "ok-base";
pub const TOKEN_GOOD: &str = "good-base";
pub const TOKEN_INFO: &str = "info-base";
pub const TOKEN_WARNING: &str = "warning-base";
pub const TOKEN_ERROR: &str = "error-base";
pub const TOKEN_DISABLED: &str = "disabled-base";
pub const TOKEN_MESSAGE_BG: &str = "message-bg";
pub const TOKEN_MESSAGE_FG: &str = "message-fg";
pub const TOKEN_POPUP_BG: &str = "popup-bg";
pub const TOKEN_POPUP_FG: &str = "popup-fg";

/// Tokens every complete theme defines.
pub const REQUIRED_TOKENS: [&str; 26] = [
    TOKEN_BACKGROUND,
    TOKEN_SURFACE,
    TOKEN_TEXT,
    TOKEN_BORDER,
    TOKEN_STATUSBAR_BG,
    TOKEN_STATUSBAR_FG,
    TOKEN_SESSION_BG,
    TOKEN_SESSION_FG,
    TOKEN_SESSION_PREFIX_BG,
    TOKEN_SESSION_COPY_BG,
    TOKEN_WINDOW_ACTIVE,
    TOKEN_WINDOW_INACTIVE,
    TOKEN_WINDOW_ACTIVITY,
    TOKEN_WINDOW_BELL,
    TOKEN_PANE_BORDER_ACTIVE,
    TOKEN_PANE_BORDER_INACTIVE,
    TOKEN_OK,
    TOKEN_GOOD,
    TOKEN_INFO,
    TOKEN_WARNING,
    TOKEN_ERROR,
    TOKEN_DISABLED,
    TOKEN_MESSAGE_BG,
    TOKEN_MESSAGE_FG,
    TOKEN_POPUP_BG,
    TOKEN_POPUP_FG,
];

pub const DEFAULT_THEME: &str = "tokyo-night";
pub const DEFAULT_VARIANT: &str = "night";

const TOKYO_NIGHT_NIGHT: [(&str, &str); 26] = [
    (TOKEN_BACKGROUND, "#1a1b26"),
    (TOKEN_SURFACE, "#24283b"),
    (TOKEN_TEXT, "#c0caf5"),
    (TOKEN_BORDER, "#3b4261"),
    (TOKEN_STATUSBAR_BG, "#1a1b26"),
    (TOKEN_STATUSBAR_FG, "#a9b1d6"),
    (TOKEN_SESSION_BG, "#9ece6a"),
    (TOKEN_SESSION_FG, "#1a1b26"),
    (TOKEN_SESSION_PREFIX_BG, "#e0af68"),
    (TOKEN_SESSION_COPY_BG, "#7dcfff"),
    (TOKEN_WINDOW_ACTIVE, "#bb9af7"),
    (TOKEN_WINDOW_INACTIVE, "#3b4261"),
    (TOKEN_WINDOW_ACTIVITY, "#ff9e64"),
    (TOKEN_WINDOW_BELL, "#f7768e"),
    (TOKEN_PANE_BORDER_ACTIVE, "#7aa2f7"),
    (TOKEN_PANE_BORDER_INACTIVE, "#3b4261"),
    (TOKEN_OK, "#394b70"),
    (TOKEN_GOOD, "#9ece6a"),
    (TOKEN_INFO, "#7dcfff"),
    (TOKEN_WARNING, "#e0af68"),
    (TOKEN_ERROR, "#f7768e"),
    (TOKEN_DISABLED, "#565f89"),
    (TOKEN_MESSAGE_BG, "#24283b"),
    (TOKEN_MESSAGE_FG, "#c0caf5"),
    (TOKEN_POPUP_BG, "#1f2335"),
    (TOKEN_POPUP_FG, "#c0caf5"),
];

const TOKYO_NIGHT_DAY: [(&str, &str); 26] = [
    (TOKEN_BACKGROUND, "#e1e2e7"),
    (TOKEN_SURFACE, "#d0d5e3"),
    (TOKEN_TEXT, "#3760bf"),
    (TOKEN_BORDER, "#a8aecb"),
    (TOKEN_STATUSBAR_BG, "#e1e2e7"),
    (TOKEN_STATUSBAR_FG, "#6172b0"),
    (TOKEN_SESSION_BG, "#587539"),
    (TOKEN_SESSION_FG, "#e1e2e7"),
    (TOKEN_SESSION_PREFIX_BG, "#8c6c3e"),
    (TOKEN_SESSION_COPY_BG, "#007197"),
    (TOKEN_WINDOW_ACTIVE, "#9854f1"),
    (TOKEN_WINDOW_INACTIVE, "#c4c8da"),
    (TOKEN_WINDOW_ACTIVITY, "#b15c00"),
    (TOKEN_WINDOW_BELL, "#f52a65"),
    (TOKEN_PANE_BORDER_ACTIVE, "#2e7de9"),
    (TOKEN_PANE_BORDER_INACTIVE, "#a8aecb"),
    (TOKEN_OK, "#b7c1e3"),
    (TOKEN_GOOD, "#587539"),
    (TOKEN_INFO, "#007197"),
    (TOKEN_WARNING, "#8c6c3e"),
    (TOKEN_ERROR, "#f52a65"),
    (TOKEN_DISABLED, "#848cb5"),
    (TOKEN_MESSAGE_BG, "#d0d5e3"),
    (TOKEN_MESSAGE_FG, "#3760bf"),
    (TOKEN_POPUP_BG, "#e9e9ed"),
    (TOKEN_POPUP_FG, "#3760bf"),
];

/// Immutable token → base color mapping for one theme variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeColorTable {
    name: String,
    variant: String,
    colors: BTreeMap<String, Color>,
}

impl ThemeColorTable {
    pub fn new(name: impl Into<String>, variant: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variant: variant.into(),
            colors: BTreeMap::new(),
        }
    }

    /// Build a table from raw hex strings. Malformed values become the neutral fallback.
    pub fn from_pairs(
        name: impl Into<String>,
        variant: impl Into<String>,
        pairs: &[(&str, &str)],
    ) -> Self {
        let mut table = Self::new(name, variant);
        for (token, hex) in pairs {
            let color = Color::parse(hex).unwrap_or_else(|err| {
                tracing::warn!(token = *token, error = %err, "invalid theme color");
                NEUTRAL_FALLBACK
            });
            table.insert(token, color);
        }
        table
    }

    fn insert(&mut self, token: &str, color: Color) {
        if is_variant_key(token) {
            tracing::warn!(token, "theme token name ends in a variant suffix, ignoring it");
            return;
        }
        self.colors.insert(token.to_string(), color);
    }

    /// Themes compiled into the binary.
    pub fn builtin(name: &str, variant: &str) -> Option<Self> {
        let pairs: &[(&str, &str)] = match (name, variant) {
            ("tokyo-night", "night") => &TOKYO_NIGHT_NIGHT,
            ("tokyo-night", "day") => &TOKYO_NIGHT_DAY,
            _ => return None,
        };
        Some(Self::from_pairs(name, variant, pairs))
    }

    /// Builtin lookup that falls back to the default theme when the name is unknown.
    pub fn builtin_or_default(name: &str, variant: &str) -> Self {
        Self::builtin(name, variant).unwrap_or_else(|| {
            tracing::warn!(theme = name, variant, "unknown theme, using default");
            Self::from_pairs(DEFAULT_THEME, DEFAULT_VARIANT, &TOKYO_NIGHT_NIGHT)
        })
    }

    pub fn builtin_names() -> &'static [(&'static str, &'static str)] {
        &[("tokyo-night", "night"), ("tokyo-night", "day")]
    }

    /// Copy of this table with one token replaced.
    pub fn with_color(mut self, token: &str, color: Color) -> Self {
        self.insert(token, color);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variant(&self) -> &str {
        &self.variant
    }

    pub fn get(&self, token: &str) -> Result<Color> {
        self.colors
            .get(token)
            .copied()
            .ok_or_else(|| PulselineError::unknown_token(token))
    }

    pub fn tokens(&self) -> impl Iterator<Item = (&str, Color)> + '_ {
        self.colors
            .iter()
            .map(|(token, color)| (token.as_str(), *color))
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Required tokens this table does not define.
    pub fn missing_tokens(&self) -> Vec<&'static str> {
        REQUIRED_TOKENS
            .iter()
            .copied()
            .filter(|token| !self.colors.contains_key(*token))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_themes_define_every_required_token() {
        for (name, variant) in ThemeColorTable::builtin_names() {
            let table = ThemeColorTable::builtin(name, variant).unwrap();
            assert!(table.missing_tokens().is_empty(), "{name}/{variant}");
            assert!(table.len() >= 22);
        }
    }

    #[test]
    fn unknown_theme_falls_back_to_default() {
        let table = ThemeColorTable::builtin_or_default("nope", "nope");
        assert_eq!(table.name(), DEFAULT_THEME);
        assert_eq!(table.variant(), DEFAULT_VARIANT);
    }

    #[test]
    fn missing_token_is_reported_and_replaced() {
        let table = ThemeColorTable::from_pairs("t", "v", &[(TOKEN_OK, "#112233")]);
        assert!(matches!(
            table.get(TOKEN_ERROR),
            Err(PulselineError::UnknownToken { .. })
        ));
        assert_eq!(table.get(TOKEN_OK).unwrap().to_hex(), "#112233");
        assert!(table.missing_tokens().contains(&TOKEN_ERROR));
    }

    #[test]
    fn malformed_theme_value_becomes_fallback() {
        let table = ThemeColorTable::from_pairs("t", "v", &[(TOKEN_OK, "oops")]);
        assert_eq!(table.get(TOKEN_OK).unwrap(), NEUTRAL_FALLBACK);
    }

    #[test]
    fn with_color_overrides_one_token() {
        let blue = Color::rgb(0x7a, 0xa2, 0xf7);
        let table = ThemeColorTable::builtin("tokyo-night", "night")
            .unwrap()
            .with_color(TOKEN_WARNING, blue);
        assert_eq!(table.get(TOKEN_WARNING).unwrap(), blue);
        assert_eq!(table.get(TOKEN_ERROR).unwrap().to_hex(), "#f7768e");
    }

    #[test]
    fn variant_shaped_token_names_are_ignored() {
        let table = ThemeColorTable::from_pairs(
            "t",
            "v",
            &[(TOKEN_OK, "#394b70"), ("accent-light10", "#ffffff")],
        )
        .with_color("accent-dark55", Color::BLACK);
        assert_eq!(table.len(), 1);
        assert!(table.get("accent-light10").is_err());

        // names that merely contain a variant word are fine
        let table = table.with_color("light10-accent", Color::WHITE);
        assert_eq!(table.len(), 2);
    }
}
