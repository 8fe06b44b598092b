//! Side-aware orchestration of segment lists.
//!
//! Lists are walked once in logical order. Each element learns its outer
//! separators from its neighbors: on the left and center the earlier element
//! draws the shared separator, on the right the later one does.

use crate::{
    config::{GlyphMode, RenderConfig},
    entity::{bar_paint, Entity, PluginEntity},
    state::ColorStore,
    types::{ListKind, Position, Segment, SegmentDescriptor, Side},
};

use super::{
    contrast::ContrastResolver,
    fmt::{Expr, Paint},
    palette::PaletteMapper,
    segment::{gap, Edge, PaintPlan, RenderContext},
    separator::Boundary,
};

/// A visible segment with its colors resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedSegment {
    pub segment: Segment,
    pub plan: PaintPlan,
}

/// Context for one list on one side, with the bar background from config.
pub fn context_for(
    store: &ColorStore,
    config: &RenderConfig,
    side: Side,
    list: ListKind,
) -> RenderContext {
    RenderContext::new(side, list, config.separators, bar_paint(store, config))
        .with_spacing(config.spacing)
}

/// Separator in front of the element at `position`. `previous` is the facing
/// background of the element before it.
pub(crate) fn opening_edge(
    position: Position,
    previous: Option<Paint>,
    ctx: &RenderContext,
) -> Option<Edge> {
    let bar = ctx.bar_bg.clone();
    if position.is_first() {
        let boundary = match ctx.side {
            Side::Left => Boundary::ScreenEdge,
            Side::Right | Side::Center => Boundary::BarEdge,
        };
        return Some(Edge::new(boundary, bar));
    }
    if ctx.gaps_enabled() {
        return Some(Edge::new(Boundary::Gap, bar));
    }
    match ctx.side {
        Side::Right => previous.map(|bg| Edge::new(Boundary::Inner, bg)),
        Side::Left | Side::Center => None,
    }
}

/// Separator after the element at `position`. `next` is the facing background
/// of the element after it.
pub(crate) fn closing_edge(
    position: Position,
    next: Option<Paint>,
    ctx: &RenderContext,
) -> Option<Edge> {
    let bar = ctx.bar_bg.clone();
    if position.is_last() {
        let boundary = match ctx.side {
            Side::Right => Boundary::ScreenEdge,
            Side::Left | Side::Center => Boundary::BarEdge,
        };
        return Some(Edge::new(boundary, bar));
    }
    if ctx.gaps_enabled() {
        return Some(Edge::new(Boundary::Gap, bar));
    }
    match ctx.side {
        Side::Left | Side::Center => next.map(|bg| Edge::new(Boundary::Inner, bg)),
        Side::Right => None,
    }
}

/// Place every entity in its slot and concatenate their output in one pass.
pub fn render_entities<E: Entity>(entities: &mut [E], ctx: &RenderContext) -> String {
    let len = entities.len();
    let gap_cell = gap(&ctx.bar_bg).render();
    let mut out = String::new();
    for index in 0..len {
        let position = Position::of(index, len);
        let previous = index
            .checked_sub(1)
            .map(|before| entities[before].background(Side::Right));
        let next = entities
            .get(index + 1)
            .map(|after| after.background(Side::Left));

        let entity = &mut entities[index];
        entity.configure(ctx.side);
        entity.place(position, previous, next);
        if !position.is_first() && ctx.gaps_enabled() {
            out.push_str(&gap_cell);
        }
        out.push_str(&entity.render(ctx.side));
    }
    out
}

/// Render already-planned segments as one list.
pub fn render_list(items: &[PlannedSegment], ctx: &RenderContext) -> String {
    let mut entities: Vec<PluginEntity> = items
        .iter()
        .map(|item| PluginEntity::new(item.segment.clone(), item.plan.clone(), ctx))
        .collect();
    render_entities(&mut entities, ctx)
}

/// Turns descriptors into planned segments and renders them.
#[derive(Debug, Clone, Copy)]
pub struct Orchestrator<'a> {
    store: &'a ColorStore,
    mapper: PaletteMapper,
    glyph_mode: GlyphMode,
}

impl<'a> Orchestrator<'a> {
    pub fn new(store: &'a ColorStore, config: &RenderConfig) -> Self {
        Self {
            store,
            mapper: PaletteMapper::new(ContrastResolver::new(config.contrast_threshold)),
            glyph_mode: config.glyph_mode,
        }
    }

    /// Resolve colors, dropping hidden segments. Nerd-font icons are dropped in ascii mode.
    pub fn plan(&self, descriptors: &[SegmentDescriptor], side: Side) -> Vec<PlannedSegment> {
        descriptors
            .iter()
            .filter_map(|descriptor| {
                let Some(plan) = self.mapper.resolve(&descriptor.semantic(), self.store) else {
                    tracing::debug!(segment = %descriptor.name, "segment hidden");
                    return None;
                };
                let icon = match self.glyph_mode {
                    GlyphMode::Icon => Expr::lit(&descriptor.icon),
                    GlyphMode::Ascii => Expr::default(),
                };
                Some(PlannedSegment {
                    segment: Segment::new(icon, Expr::lit(&descriptor.content), side),
                    plan: plan.into(),
                })
            })
            .collect()
    }

    pub fn render(&self, descriptors: &[SegmentDescriptor], ctx: &RenderContext) -> String {
        render_list(&self.plan(descriptors, ctx.side), ctx)
    }
}
