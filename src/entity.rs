//! Renderable status-bar entities: the session badge, window templates and plugins.
//!
//! Session and window output is evaluated by tmux per client and per window,
//! so their colors and neighbors are expressed as runtime conditionals.

use crate::{
    config::{GlyphMode, RenderConfig},
    render::{
        color::Color,
        contrast::ContrastResolver,
        fmt::{Expr, Paint},
        icons::{glyph, ICON_COPY_MODE, ICON_PREFIX, ICON_SESSION, ICON_ZOOM},
        palette::ColorPlan,
        layout::{closing_edge, opening_edge},
        segment::{compose, gap, Edge, PaintPlan, RenderContext},
        separator::Boundary,
    },
    state::ColorStore,
    theme::{
        TOKEN_SESSION_BG, TOKEN_SESSION_COPY_BG, TOKEN_SESSION_PREFIX_BG, TOKEN_STATUSBAR_BG,
        TOKEN_WINDOW_ACTIVE, TOKEN_WINDOW_ACTIVITY, TOKEN_WINDOW_BELL, TOKEN_WINDOW_INACTIVE,
    },
    types::{ListKind, Position, Segment, Side},
};

/// True when the window just before this one is the active window.
pub const PREV_WINDOW_ACTIVE: &str =
    "#{==:#{e|-:#{window_index},1},#{active_window_index}}";

pub trait Entity {
    /// Bind the entity to a side before rendering.
    fn configure(&mut self, side: Side);

    /// Background the entity shows at its visual `side` edge.
    fn background(&self, side: Side) -> Paint;

    fn render(&self, side: Side) -> String;

    /// Slot in the list plus the facing backgrounds of its neighbors, assigned by the layout.
    /// Entities that draw their own outer separators ignore this.
    fn place(&mut self, _position: Position, _previous: Option<Paint>, _next: Option<Paint>) {}
}

/// Status-bar background honoring the transparency flag.
pub fn bar_paint(store: &ColorStore, config: &RenderConfig) -> Paint {
    if config.transparent {
        Paint::Default
    } else {
        store.base(TOKEN_STATUSBAR_BG).into()
    }
}

fn plan_for(store: &ColorStore, token: &str, contrast: &ContrastResolver) -> ColorPlan {
    ColorPlan::for_token(store, token, contrast)
}

/// Combine per-condition plans into one plan of conditional paints.
/// `branches` are checked in order; `fallback` applies when none hold.
fn conditional_plan(branches: &[(&str, ColorPlan)], fallback: ColorPlan) -> PaintPlan {
    let pick = |field: fn(&ColorPlan) -> Color| {
        branches
            .iter()
            .rev()
            .fold(Paint::from(field(&fallback)), |otherwise, (cond, plan)| {
                Paint::when(*cond, field(plan), otherwise)
            })
    };
    PaintPlan {
        content_bg: pick(|plan| plan.content_bg),
        content_fg: pick(|plan| plan.content_fg),
        icon_bg: pick(|plan| plan.icon_bg),
        icon_fg: pick(|plan| plan.icon_fg),
    }
}

// ── Plugin ───────────────────────────────────────────────────────────

/// A resolved plugin segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginEntity {
    pub segment: Segment,
    pub plan: PaintPlan,
    ctx: RenderContext,
    previous_bg: Option<Paint>,
    next_bg: Option<Paint>,
}

impl PluginEntity {
    pub fn new(segment: Segment, plan: impl Into<PaintPlan>, ctx: &RenderContext) -> Self {
        Self {
            segment,
            plan: plan.into(),
            ctx: ctx.with_edges(None, None),
            previous_bg: None,
            next_bg: None,
        }
    }

    /// The segment with outer separators chosen from its position and neighbors.
    pub fn render_expr(&self) -> Expr {
        let position = self.segment.position;
        let ctx = self.ctx.with_edges(
            opening_edge(position, self.previous_bg.clone(), &self.ctx),
            closing_edge(position, self.next_bg.clone(), &self.ctx),
        );
        compose(&self.segment, &self.plan, &ctx)
    }
}

impl Entity for PluginEntity {
    fn configure(&mut self, side: Side) {
        self.segment.side = side;
        self.ctx.side = side;
    }

    fn background(&self, side: Side) -> Paint {
        match side {
            Side::Left => self.plan.leading_bg(self.segment.has_icon()).clone(),
            Side::Right | Side::Center => self.plan.trailing_bg().clone(),
        }
    }

    fn render(&self, _side: Side) -> String {
        self.render_expr().render()
    }

    fn place(&mut self, position: Position, previous: Option<Paint>, next: Option<Paint>) {
        self.segment.position = position;
        self.previous_bg = previous;
        self.next_bg = next;
    }
}

// ── Session ──────────────────────────────────────────────────────────

/// Session badge whose color follows prefix and copy mode.
#[derive(Debug, Clone)]
pub struct SessionEntity {
    plan: PaintPlan,
    icon: Expr,
    ctx: RenderContext,
    /// Whether window templates follow and draw the separator out of the session.
    followed_by_windows: bool,
}

impl SessionEntity {
    pub fn new(store: &ColorStore, config: &RenderConfig) -> Self {
        let contrast = ContrastResolver::new(config.contrast_threshold);
        let plan = conditional_plan(
            &[
                (
                    "client_prefix",
                    plan_for(store, TOKEN_SESSION_PREFIX_BG, &contrast),
                ),
                (
                    "pane_in_mode",
                    plan_for(store, TOKEN_SESSION_COPY_BG, &contrast),
                ),
            ],
            plan_for(store, TOKEN_SESSION_BG, &contrast),
        );

        let icon = match config.glyph_mode {
            GlyphMode::Icon => Expr::when(
                "client_prefix",
                Expr::lit(ICON_PREFIX),
                Expr::when(
                    "pane_in_mode",
                    Expr::lit(ICON_COPY_MODE),
                    Expr::lit(ICON_SESSION),
                ),
            ),
            GlyphMode::Ascii => Expr::default(),
        };

        let ctx = RenderContext::new(
            Side::Left,
            ListKind::Session,
            config.separators,
            bar_paint(store, config),
        );

        Self {
            plan,
            icon,
            ctx,
            followed_by_windows: true,
        }
    }

    pub fn followed_by_windows(mut self, followed: bool) -> Self {
        self.followed_by_windows = followed;
        self
    }

    fn segment(&self) -> Segment {
        Segment::new(self.icon.clone(), Expr::var("session_name"), self.ctx.side)
    }
}

impl Entity for SessionEntity {
    fn configure(&mut self, side: Side) {
        self.ctx.side = side;
    }

    fn background(&self, side: Side) -> Paint {
        match side {
            Side::Left => self.plan.leading_bg(!self.icon.is_empty()).clone(),
            Side::Right | Side::Center => self.plan.trailing_bg().clone(),
        }
    }

    fn render(&self, side: Side) -> String {
        let bar = self.ctx.bar_bg.clone();
        let (opening, closing) = match side {
            Side::Right => (
                (!self.followed_by_windows).then(|| Edge::new(Boundary::BarEdge, bar.clone())),
                Some(Edge::new(Boundary::ScreenEdge, bar)),
            ),
            Side::Left | Side::Center => (
                Some(Edge::new(Boundary::ScreenEdge, bar.clone())),
                (!self.followed_by_windows).then(|| Edge::new(Boundary::BarEdge, bar)),
            ),
        };
        let mut ctx = self.ctx.with_edges(opening, closing);
        ctx.side = side;
        let mut segment = self.segment();
        segment.side = side;
        compose(&segment, &self.plan, &ctx).render()
    }
}

// ── Windows ──────────────────────────────────────────────────────────

/// Inactive window colors. Bell and activity recolor only the text, so the
/// background a neighbor sees is the same for every inactive window.
fn alert_plan(store: &ColorStore, inactive: ColorPlan) -> PaintPlan {
    let alert = |resting: Color| {
        Paint::when(
            "window_bell_flag",
            store.base(TOKEN_WINDOW_BELL),
            Paint::when("window_activity_flag", store.base(TOKEN_WINDOW_ACTIVITY), resting),
        )
    };
    PaintPlan {
        content_bg: inactive.content_bg.into(),
        content_fg: alert(inactive.content_fg),
        icon_bg: inactive.icon_bg.into(),
        icon_fg: alert(inactive.icon_fg),
    }
}

/// One window-status template. tmux renders it once per window and concatenates them.
#[derive(Debug, Clone)]
pub struct WindowEntity {
    active: bool,
    plan: PaintPlan,
    active_bg: Paint,
    inactive_bg: Paint,
    session_bg: Paint,
    glyph_mode: GlyphMode,
    ctx: RenderContext,
}

impl WindowEntity {
    pub fn new(store: &ColorStore, config: &RenderConfig, active: bool) -> Self {
        let contrast = ContrastResolver::new(config.contrast_threshold);
        let active_plan = plan_for(store, TOKEN_WINDOW_ACTIVE, &contrast);
        let inactive_plan = plan_for(store, TOKEN_WINDOW_INACTIVE, &contrast);

        let plan = if active {
            PaintPlan::from(active_plan)
        } else {
            alert_plan(store, inactive_plan)
        };

        let session = SessionEntity::new(store, config);
        let ctx = RenderContext::new(
            Side::Left,
            ListKind::Windows,
            config.separators,
            bar_paint(store, config),
        )
        .with_spacing(config.spacing);

        Self {
            active,
            plan,
            active_bg: active_plan.content_bg.into(),
            inactive_bg: inactive_plan.content_bg.into(),
            session_bg: session.background(Side::Right),
            glyph_mode: config.glyph_mode,
            ctx,
        }
    }

    fn segment(&self, side: Side) -> Segment {
        let icon = match self.glyph_mode {
            GlyphMode::Icon => Expr::var("window_index"),
            GlyphMode::Ascii => Expr::default(),
        };
        let mut content = Expr::var("window_name");
        content.push(Expr::when(
            "window_zoomed_flag",
            Expr::lit(format!(" {}", glyph(self.glyph_mode, ICON_ZOOM, "Z"))),
            Expr::default(),
        ));
        Segment::new(icon, content, side)
    }

    /// Background of whatever precedes this window.
    fn previous_bg(&self) -> Paint {
        // Only one window is active, so an active window is always preceded by an inactive one.
        let previous_window = if self.active {
            self.inactive_bg.clone()
        } else {
            Paint::when(
                PREV_WINDOW_ACTIVE,
                self.active_bg.clone(),
                self.inactive_bg.clone(),
            )
        };
        Paint::when("window_start_flag", self.session_bg.clone(), previous_window)
    }
}

impl Entity for WindowEntity {
    fn configure(&mut self, side: Side) {
        self.ctx.side = side;
    }

    fn background(&self, side: Side) -> Paint {
        let has_icon = self.glyph_mode == GlyphMode::Icon;
        match side {
            Side::Left => self.plan.leading_bg(has_icon).clone(),
            Side::Right | Side::Center => self.plan.trailing_bg().clone(),
        }
    }

    fn render(&self, side: Side) -> String {
        let bar = self.ctx.bar_bg.clone();
        let segment = self.segment(side);
        let mut ctx = self.ctx.clone();
        ctx.side = side;

        let mut out = Expr::default();
        if ctx.gaps_enabled() {
            ctx.opening = Some(Edge::new(Boundary::Gap, bar.clone()));
            ctx.closing = Some(Edge::new(Boundary::Gap, bar.clone()));
            out.push(gap(&bar));
            out.push(compose(&segment, &self.plan, &ctx));
            return out.render();
        }

        ctx.opening = Some(Edge::new(Boundary::Inner, self.previous_bg()));
        out.push(compose(&segment, &self.plan, &ctx));

        let closing_ctx = ctx.with_edges(None, Some(Edge::new(Boundary::BarEdge, bar)));
        let closing = closing_only(&segment, &self.plan, &closing_ctx, &ctx);
        if !closing.is_empty() {
            out.push(Expr::when("window_end_flag", closing, Expr::default()));
        }
        out.render()
    }
}

/// The closing separator alone: the difference between composing with and without it.
fn closing_only(
    segment: &Segment,
    plan: &PaintPlan,
    with_closing: &RenderContext,
    without: &RenderContext,
) -> Expr {
    let bare = without.with_edges(None, None);
    match (compose(segment, plan, with_closing), compose(segment, plan, &bare)) {
        (Expr::Seq(mut full), Expr::Seq(body)) if full.len() > body.len() => {
            Expr::Seq(full.split_off(body.len()))
        }
        _ => Expr::default(),
    }
}

/// `window-status-current-format` and `window-status-format`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowFormats {
    pub current: String,
    pub other: String,
}

pub fn render_window_formats(
    store: &ColorStore,
    config: &RenderConfig,
    side: Side,
) -> WindowFormats {
    let mut current = WindowEntity::new(store, config, true);
    let mut other = WindowEntity::new(store, config, false);
    current.configure(side);
    other.configure(side);
    WindowFormats {
        current: current.render(side),
        other: other.render(side),
    }
}

/// The session badge for one side of the bar.
pub fn render_session(
    store: &ColorStore,
    config: &RenderConfig,
    side: Side,
    with_windows: bool,
) -> String {
    let mut session = SessionEntity::new(store, config).followed_by_windows(with_windows);
    session.configure(side);
    session.render(side)
}
