use std::fmt;

use serde::{Deserialize, Serialize};

use super::{
    color::{Color, Variant},
    contrast::ContrastResolver,
};
use crate::{
    state::ColorStore,
    theme::{TOKEN_ERROR, TOKEN_INFO, TOKEN_OK, TOKEN_WARNING},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum State {
    Inactive,
    #[default]
    Active,
    Degraded,
    Failed,
}

impl State {
    pub fn is_visible(self) -> bool {
        self != State::Inactive
    }

    /// Lowest health this state may display with.
    fn health_floor(self) -> Health {
        match self {
            State::Inactive | State::Active => Health::Ok,
            State::Degraded => Health::Warning,
            State::Failed => Health::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Health {
    #[default]
    Ok,
    Good,
    Info,
    Warning,
    Error,
}

impl Health {
    /// Severity used when several conditions are merged; the highest wins.
    pub fn rank(self) -> u8 {
        match self {
            Health::Ok | Health::Good => 0,
            Health::Info => 1,
            Health::Warning => 2,
            Health::Error => 3,
        }
    }

    pub fn base_token(self) -> &'static str {
        match self {
            Health::Ok | Health::Good => TOKEN_OK,
            Health::Info => TOKEN_INFO,
            Health::Warning => TOKEN_WARNING,
            Health::Error => TOKEN_ERROR,
        }
    }

    /// The worse of two healths. Ties keep `self`.
    pub fn worst(self, other: Health) -> Health {
        if other.rank() > self.rank() {
            other
        } else {
            self
        }
    }

    pub fn merge_all(healths: impl IntoIterator<Item = Health>) -> Health {
        healths.into_iter().fold(Health::Ok, Health::worst)
    }
}

impl fmt::Display for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Health::Ok => "ok",
            Health::Good => "good",
            Health::Info => "info",
            Health::Warning => "warning",
            Health::Error => "error",
        };
        f.write_str(name)
    }
}

/// Upstream classification of one element. Read-only to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SemanticState {
    #[serde(default)]
    pub state: State,
    #[serde(default)]
    pub health: Health,
    #[serde(default)]
    pub context: Option<String>,
}

impl SemanticState {
    pub fn new(state: State, health: Health) -> Self {
        Self {
            state,
            health,
            context: None,
        }
    }

    /// Health after the state floor is applied.
    pub fn effective_health(&self) -> Health {
        self.health.worst(self.state.health_floor())
    }

    /// Merge another condition into this one: worse health and worse state win.
    pub fn merge(&self, other: &SemanticState) -> SemanticState {
        let state = match (self.state, other.state) {
            (State::Failed, _) | (_, State::Failed) => State::Failed,
            (State::Degraded, _) | (_, State::Degraded) => State::Degraded,
            (State::Active, _) | (_, State::Active) => State::Active,
            _ => State::Inactive,
        };
        SemanticState {
            state,
            health: self.health.worst(other.health),
            context: self.context.clone().or_else(|| other.context.clone()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorPlan {
    pub content_bg: Color,
    pub content_fg: Color,
    pub icon_bg: Color,
    pub icon_fg: Color,
}

impl ColorPlan {
    /// Plan for a fixed base token, independent of health.
    pub fn for_token(store: &ColorStore, token: &str, contrast: &ContrastResolver) -> Self {
        let variants = store.variants(token);
        let content_bg = store.base(token);
        let icon_bg = variants.get(Variant::Light10);
        Self {
            content_bg,
            content_fg: contrast.readable_foreground(content_bg, &variants),
            icon_bg,
            icon_fg: contrast.readable_foreground(icon_bg, &variants),
        }
    }
}

/// Maps semantic state to colors through a populated [`ColorStore`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PaletteMapper {
    contrast: ContrastResolver,
}

impl PaletteMapper {
    pub fn new(contrast: ContrastResolver) -> Self {
        Self { contrast }
    }

    /// `None` means the segment is hidden and must not be rendered at all.
    pub fn resolve(&self, semantic: &SemanticState, store: &ColorStore) -> Option<ColorPlan> {
        if !semantic.state.is_visible() {
            return None;
        }
        let token = semantic.effective_health().base_token();
        Some(ColorPlan::for_token(store, token, &self.contrast))
    }
}

/// Free-function form with the default contrast threshold.
pub fn resolve_palette(
    state: State,
    health: Health,
    context: Option<&str>,
    store: &ColorStore,
) -> Option<ColorPlan> {
    let semantic = SemanticState {
        state,
        health,
        context: context.map(str::to_string),
    };
    PaletteMapper::default().resolve(&semantic, store)
}
