use serde::{Deserialize, Serialize};

use crate::render::{
    fmt::Expr,
    palette::{Health, SemanticState, State},
    separator::Direction,
};

/// Screen region a list of segments is drawn in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Left,
    Right,
    Center,
}

impl Side {
    /// Direction ordinary separators point on this side.
    pub fn direction(self) -> Direction {
        match self {
            Side::Left | Side::Center => Direction::Right,
            Side::Right => Direction::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    First,
    Middle,
    Last,
    /// The list holds a single segment.
    Only,
}

impl Position {
    pub fn of(index: usize, len: usize) -> Self {
        match (index, len) {
            (_, 0 | 1) => Position::Only,
            (0, _) => Position::First,
            (i, n) if i + 1 == n => Position::Last,
            _ => Position::Middle,
        }
    }

    pub fn is_first(self) -> bool {
        matches!(self, Position::First | Position::Only)
    }

    pub fn is_last(self) -> bool {
        matches!(self, Position::Last | Position::Only)
    }
}

/// Which logical list is being rendered; spacing applies per list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Session,
    Windows,
    #[default]
    Plugins,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpacingMode {
    #[default]
    None,
    Windows,
    Plugins,
    Both,
}

impl SpacingMode {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "none" | "false" | "off" => Some(SpacingMode::None),
            "windows" => Some(SpacingMode::Windows),
            "plugins" => Some(SpacingMode::Plugins),
            "both" | "true" | "on" => Some(SpacingMode::Both),
            _ => None,
        }
    }

    pub fn applies_to(self, list: ListKind) -> bool {
        match (self, list) {
            (SpacingMode::Both, ListKind::Windows | ListKind::Plugins) => true,
            (SpacingMode::Windows, ListKind::Windows) => true,
            (SpacingMode::Plugins, ListKind::Plugins) => true,
            _ => false,
        }
    }
}

/// One visible element handed over by the data-collection layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SegmentDescriptor {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub state: State,
    #[serde(default)]
    pub health: Health,
    #[serde(default)]
    pub context: Option<String>,
}

impl SegmentDescriptor {
    pub fn new(name: &str, icon: &str, content: &str) -> Self {
        Self {
            name: name.to_string(),
            icon: icon.to_string(),
            content: content.to_string(),
            ..Self::default()
        }
    }

    pub fn with_health(mut self, health: Health) -> Self {
        self.health = health;
        self
    }

    pub fn with_state(mut self, state: State) -> Self {
        self.state = state;
        self
    }

    pub fn with_context(mut self, context: &str) -> Self {
        self.context = Some(context.to_string());
        self
    }

    pub fn semantic(&self) -> SemanticState {
        SemanticState {
            state: self.state,
            health: self.health,
            context: self.context.clone(),
        }
    }
}

/// A visual unit ready for composition. Icon and content may hold tmux variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub icon: Expr,
    pub content: Expr,
    pub side: Side,
    pub position: Position,
}

impl Segment {
    pub fn new(icon: Expr, content: Expr, side: Side) -> Self {
        Self {
            icon,
            content,
            side,
            position: Position::Only,
        }
    }

    pub fn text(icon: &str, content: &str, side: Side) -> Self {
        Self::new(Expr::lit(icon), Expr::lit(content), side)
    }

    pub fn has_icon(&self) -> bool {
        !self.icon.is_empty()
    }
}

/// stdin payload: one list of descriptors for one side of the bar.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StatusPayload {
    #[serde(default)]
    pub side: Side,
    #[serde(default)]
    pub list: ListKind,
    #[serde(default)]
    pub segments: Vec<SegmentDescriptor>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions() {
        assert_eq!(Position::of(0, 1), Position::Only);
        assert_eq!(Position::of(0, 3), Position::First);
        assert_eq!(Position::of(1, 3), Position::Middle);
        assert_eq!(Position::of(2, 3), Position::Last);
        assert!(Position::Only.is_first() && Position::Only.is_last());
    }

    #[test]
    fn side_directions() {
        assert_eq!(Side::Left.direction(), Direction::Right);
        assert_eq!(Side::Center.direction(), Direction::Right);
        assert_eq!(Side::Right.direction(), Direction::Left);
    }

    #[test]
    fn spacing_applies_per_list() {
        assert!(SpacingMode::Both.applies_to(ListKind::Windows));
        assert!(SpacingMode::Both.applies_to(ListKind::Plugins));
        assert!(!SpacingMode::Both.applies_to(ListKind::Session));
        assert!(SpacingMode::Windows.applies_to(ListKind::Windows));
        assert!(!SpacingMode::Windows.applies_to(ListKind::Plugins));
        assert!(!SpacingMode::None.applies_to(ListKind::Plugins));
        assert_eq!(SpacingMode::parse("BOTH"), Some(SpacingMode::Both));
        assert_eq!(SpacingMode::parse("sideways"), None);
    }

    #[test]
    fn payload_defaults() {
        let payload: StatusPayload = serde_json::from_str("{}").unwrap();
        assert_eq!(payload.side, Side::Left);
        assert_eq!(payload.list, ListKind::Plugins);
        assert!(payload.segments.is_empty());
    }

    #[test]
    fn descriptor_from_json() {
        let descriptor: SegmentDescriptor = serde_json::from_value(serde_json::json!({
            "name": "cpu",
            "icon": "C",
            "content": "42%",
            "state": "active",
            "health": "warning",
            "context": "hot",
        }))
        .unwrap();
        assert_eq!(descriptor.health, Health::Warning);
        assert_eq!(descriptor.context.as_deref(), Some("hot"));
        assert_eq!(descriptor.semantic().state, State::Active);
    }
}
