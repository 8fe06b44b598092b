//! Segment compositor: one segment's separators and sections.
//!
//! A separator is drawn `#[fg=FROM,bg=TO]glyph`: the glyph body continues the
//! background it leaves and its tip sits on the background it enters, so
//! neighbors chain without a seam. Ordinary separators point the way the side
//! flows; separators facing the bar background point outward like end caps.

use super::{
    fmt::{Expr, Paint, Style},
    palette::ColorPlan,
    separator::{Boundary, Direction, SeparatorConfig, SeparatorStyle},
};
use crate::types::{ListKind, Segment, Side, SpacingMode};

/// A [`ColorPlan`] lifted into tmux paints, so entities may vary colors at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaintPlan {
    pub content_bg: Paint,
    pub content_fg: Paint,
    pub icon_bg: Paint,
    pub icon_fg: Paint,
}

impl From<ColorPlan> for PaintPlan {
    fn from(plan: ColorPlan) -> Self {
        Self {
            content_bg: plan.content_bg.into(),
            content_fg: plan.content_fg.into(),
            icon_bg: plan.icon_bg.into(),
            icon_fg: plan.icon_fg.into(),
        }
    }
}

impl PaintPlan {
    /// Background of the visually leftmost section.
    pub fn leading_bg(&self, has_icon: bool) -> &Paint {
        if has_icon {
            &self.icon_bg
        } else {
            &self.content_bg
        }
    }

    /// Background of the visually rightmost section.
    pub fn trailing_bg(&self) -> &Paint {
        &self.content_bg
    }
}

/// One outer separator of a segment and the background on its far side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub boundary: Boundary,
    pub neighbor_bg: Paint,
}

impl Edge {
    pub fn new(boundary: Boundary, neighbor_bg: Paint) -> Self {
        Self {
            boundary,
            neighbor_bg,
        }
    }

    fn faces_bar(&self) -> bool {
        matches!(
            self.boundary,
            Boundary::BarEdge | Boundary::ScreenEdge | Boundary::Gap
        )
    }
}

/// Per-cycle rendering context. `opening`/`closing` are filled per segment by the layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    pub side: Side,
    pub list: ListKind,
    pub spacing: SpacingMode,
    pub separators: SeparatorConfig,
    pub bar_bg: Paint,
    pub opening: Option<Edge>,
    pub closing: Option<Edge>,
}

impl RenderContext {
    pub fn new(side: Side, list: ListKind, separators: SeparatorConfig, bar_bg: Paint) -> Self {
        Self {
            side,
            list,
            spacing: SpacingMode::None,
            separators,
            bar_bg,
            opening: None,
            closing: None,
        }
    }

    pub fn with_spacing(mut self, spacing: SpacingMode) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn edge_all(&self) -> bool {
        self.separators.edge.all
    }

    pub fn gaps_enabled(&self) -> bool {
        self.spacing.applies_to(self.list)
    }

    pub fn with_edges(&self, opening: Option<Edge>, closing: Option<Edge>) -> Self {
        Self {
            opening,
            closing,
            ..self.clone()
        }
    }
}

/// A single separator glyph. Style `none` yields nothing, not even a style directive.
pub fn transition(style: SeparatorStyle, direction: Direction, from: &Paint, to: &Paint) -> Expr {
    let glyph = style.glyph(direction);
    if glyph.is_empty() {
        return Expr::default();
    }
    Expr::Seq(vec![
        Expr::style(Style::new(from.clone(), to.clone())),
        Expr::lit(glyph),
    ])
}

/// Separator between a visually-left and a visually-right background.
fn oriented(style: SeparatorStyle, direction: Direction, left: &Paint, right: &Paint) -> Expr {
    match direction {
        Direction::Right => transition(style, direction, left, right),
        Direction::Left => transition(style, direction, right, left),
    }
}

fn section(fg: &Paint, bg: &Paint, body: &Expr) -> Expr {
    Expr::Seq(vec![
        Expr::style(Style::new(fg.clone(), bg.clone())),
        Expr::lit(" "),
        body.clone(),
        Expr::lit(" "),
    ])
}

fn edge_expr(
    edge: &Edge,
    outward: Direction,
    flow: Direction,
    left: &Paint,
    right: &Paint,
    separators: &SeparatorConfig,
) -> Expr {
    let direction = if edge.faces_bar() { outward } else { flow };
    oriented(separators.style_for(edge.boundary), direction, left, right)
}

pub fn compose(segment: &Segment, plan: &PaintPlan, ctx: &RenderContext) -> Expr {
    let flow = segment.side.direction();
    let has_icon = segment.has_icon();
    let mut out = Expr::default();

    if let Some(edge) = &ctx.opening {
        out.push(edge_expr(
            edge,
            Direction::Left,
            flow,
            &edge.neighbor_bg,
            plan.leading_bg(has_icon),
            &ctx.separators,
        ));
    }

    if has_icon {
        out.push(section(&plan.icon_fg, &plan.icon_bg, &segment.icon));
        out.push(oriented(
            ctx.separators.style_for(Boundary::Internal),
            flow,
            &plan.icon_bg,
            &plan.content_bg,
        ));
    }

    out.push(section(&plan.content_fg, &plan.content_bg, &segment.content));

    if let Some(edge) = &ctx.closing {
        out.push(edge_expr(
            edge,
            Direction::Right,
            flow,
            plan.trailing_bg(),
            &edge.neighbor_bg,
            &ctx.separators,
        ));
    }

    out
}

pub fn compose_str(segment: &Segment, plan: &PaintPlan, ctx: &RenderContext) -> String {
    compose(segment, plan, ctx).render()
}

/// One blank cell of bar background between two segments.
pub fn gap(bar_bg: &Paint) -> Expr {
    Expr::Seq(vec![Expr::style(Style::bg(bar_bg.clone())), Expr::lit(" ")])
}
