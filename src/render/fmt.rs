//! One-way builder for tmux's status format language.
//!
//! Output is assembled as an [`Expr`] tree and serialized once at the end, so
//! conditionals always close and commas inside conditional branches are
//! escaped no matter how deeply styles and text are nested.

use std::fmt::Write as _;

use super::color::Color;

/// A color as tmux sees it: fixed hex, the terminal default, or chosen at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Paint {
    Color(Color),
    Default,
    When {
        cond: String,
        then: Box<Paint>,
        otherwise: Box<Paint>,
    },
}

impl Paint {
    pub fn when(
        cond: impl Into<String>,
        then: impl Into<Paint>,
        otherwise: impl Into<Paint>,
    ) -> Self {
        Self::When {
            cond: cond.into(),
            then: Box::new(then.into()),
            otherwise: Box::new(otherwise.into()),
        }
    }

    fn write(&self, out: &mut String) {
        match self {
            Paint::Color(color) => out.push_str(&color.to_hex()),
            Paint::Default => out.push_str("default"),
            Paint::When {
                cond,
                then,
                otherwise,
            } => {
                let _ = write!(out, "#{{?{cond},");
                then.write(out);
                out.push(',');
                otherwise.write(out);
                out.push('}');
            }
        }
    }
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::Color(color)
    }
}

/// An inline `#[fg=…,bg=…]` directive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Style {
    pub fg: Option<Paint>,
    pub bg: Option<Paint>,
}

impl Style {
    pub fn new(fg: impl Into<Paint>, bg: impl Into<Paint>) -> Self {
        Self {
            fg: Some(fg.into()),
            bg: Some(bg.into()),
        }
    }

    pub fn bg(bg: impl Into<Paint>) -> Self {
        Self {
            bg: Some(bg.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fg.is_none() && self.bg.is_none()
    }

    fn write(&self, out: &mut String, depth: usize) {
        if self.is_empty() {
            return;
        }
        let comma = if depth > 0 { "#," } else { "," };
        let mut parts = Vec::new();
        if let Some(fg) = &self.fg {
            let mut part = String::from("fg=");
            fg.write(&mut part);
            parts.push(part);
        }
        if let Some(bg) = &self.bg {
            let mut part = String::from("bg=");
            bg.write(&mut part);
            parts.push(part);
        }

        out.push_str("#[");
        out.push_str(&parts.join(comma));
        out.push(']');
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Literal(String),
    Var(String),
    Style(Style),
    If {
        cond: String,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
    Seq(Vec<Expr>),
}

impl Default for Expr {
    fn default() -> Self {
        Expr::Seq(Vec::new())
    }
}

impl Expr {
    pub fn lit(text: impl Into<String>) -> Self {
        Expr::Literal(text.into())
    }

    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var(name.into())
    }

    pub fn style(style: Style) -> Self {
        Expr::Style(style)
    }

    pub fn when(cond: impl Into<String>, then: Expr, otherwise: Expr) -> Self {
        Expr::If {
            cond: cond.into(),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        }
    }

    /// Append to a sequence, turning a lone node into one first.
    pub fn push(&mut self, expr: Expr) {
        if expr.is_empty() {
            return;
        }
        match self {
            Expr::Seq(items) => items.push(expr),
            other => {
                let first = std::mem::take(other);
                *other = Expr::Seq(vec![first, expr]);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Expr::Literal(text) => text.is_empty(),
            Expr::Var(_) | Expr::If { .. } => false,
            Expr::Style(style) => style.is_empty(),
            Expr::Seq(items) => items.iter().all(Expr::is_empty),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write(&mut out, 0);
        out
    }

    fn write(&self, out: &mut String, depth: usize) {
        match self {
            Expr::Literal(text) => escape_literal(text, out, depth),
            Expr::Var(name) => {
                let _ = write!(out, "#{{{name}}}");
            }
            Expr::Style(style) => style.write(out, depth),
            Expr::If {
                cond,
                then,
                otherwise,
            } => {
                let _ = write!(out, "#{{?{cond},");
                then.write(out, depth + 1);
                out.push(',');
                otherwise.write(out, depth + 1);
                out.push('}');
            }
            Expr::Seq(items) => {
                for item in items {
                    item.write(out, depth);
                }
            }
        }
    }
}

impl FromIterator<Expr> for Expr {
    fn from_iter<I: IntoIterator<Item = Expr>>(iter: I) -> Self {
        Expr::Seq(iter.into_iter().filter(|expr| !expr.is_empty()).collect())
    }
}

fn escape_literal(text: &str, out: &mut String, depth: usize) {
    for ch in text.chars() {
        match ch {
            '#' => out.push_str("##"),
            ',' | '}' if depth > 0 => {
                out.push('#');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
}

/// Remove `#[…]` directives and unescape `##`. Only meaningful for output without conditionals.
pub fn strip_styles(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '#' {
            result.push(ch);
            continue;
        }
        match chars.peek() {
            Some('[') => {
                for next in chars.by_ref() {
                    if next == ']' {
                        break;
                    }
                }
            }
            Some('#') => {
                chars.next();
                result.push('#');
            }
            _ => result.push(ch),
        }
    }
    result
}

/// Every `#[…]` directive in order of appearance.
pub fn style_directives(s: &str) -> Vec<String> {
    let mut found = Vec::new();
    let mut rest = s;
    while let Some(start) = rest.find("#[") {
        let after = &rest[start + 2..];
        match after.find(']') {
            Some(end) => {
                found.push(after[..end].to_string());
                rest = &after[end + 1..];
            }
            None => break,
        }
    }
    found
}
