//! Declarative placement of abstract components into pixel rectangles.
//!
//! A strategy takes components whose `frame` is still [`Rect::ZERO`] and a
//! viewport size, and returns new component records with `frame` filled in,
//! a default inclusive hit test where none was supplied, and the debug
//! overlay attached. Strategies are pure: the same inputs always produce the
//! same rectangles.

pub mod horizontal;
pub mod vertical;

use std::fmt;
use std::rc::Rc;

use easel_protocol::{DrawContext, Point, Rect, SharedStr, Viewport};

use crate::config::DebugOverlay;
use crate::primitives::{ButtonStyle, TextStyle, draw_button, draw_text, is_point_in_rect};

pub use horizontal::{HorizontalStack, VAlign};
pub use vertical::{HAlign, VerticalStack};

pub type HitTestFn = Rc<dyn Fn(Point) -> bool>;

/// What a component draws inside its frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Visual {
    /// Text anchored at the center of the frame; the style decides alignment.
    Text { text: SharedStr, style: TextStyle },
    Button { label: SharedStr, style: ButtonStyle },
}

impl Visual {
    pub fn text(text: &str, style: TextStyle) -> Self {
        Self::Text {
            text: text.into(),
            style,
        }
    }

    pub fn button(label: &str, style: ButtonStyle) -> Self {
        Self::Button {
            label: label.into(),
            style,
        }
    }

    fn render(&self, ctx: &mut dyn DrawContext, frame: Rect) {
        match self {
            Visual::Text { text, style } => {
                let center = frame.center();
                draw_text(ctx, text, center.x, center.y, style);
            }
            Visual::Button { label, style } => {
                draw_button(ctx, frame, label, style, DebugOverlay::OFF);
            }
        }
    }
}

/// A renderable, optionally interactive piece of a scene.
///
/// `A` is the action a click produces; scenes match on it instead of
/// running callbacks that capture scene state.
#[derive(Clone)]
pub struct Component<A> {
    pub id: SharedStr,
    pub frame: Rect,
    pub visual: Visual,
    pub hit_test: Option<HitTestFn>,
    pub on_click: Option<A>,
    pub debug: DebugOverlay,
}

impl<A: fmt::Debug> fmt::Debug for Component<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("id", &self.id)
            .field("frame", &self.frame)
            .field("visual", &self.visual)
            .field("hit_test", &self.hit_test.as_ref().map(|_| "fn"))
            .field("on_click", &self.on_click)
            .finish()
    }
}

impl<A> Component<A> {
    /// An unplaced component: zero frame, no hit test, no action.
    pub fn new(id: &str, visual: Visual) -> Self {
        Self {
            id: id.into(),
            frame: Rect::ZERO,
            visual,
            hit_test: None,
            on_click: None,
            debug: DebugOverlay::OFF,
        }
    }

    pub fn on_click(mut self, action: A) -> Self {
        self.on_click = Some(action);
        self
    }

    pub fn with_hit_test(mut self, hit_test: impl Fn(Point) -> bool + 'static) -> Self {
        self.hit_test = Some(Rc::new(hit_test));
        self
    }

    /// Draw the visual at `frame`, then the debug outline if enabled. The
    /// outline never moves what was drawn.
    pub fn render(&self, ctx: &mut dyn DrawContext) {
        self.visual.render(ctx, self.frame);
        self.debug.outline(ctx, self.frame);
    }

    pub fn hit(&self, p: Point) -> bool {
        self.hit_test.as_ref().is_some_and(|test| test(p))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub w: f64,
    pub h: f64,
}

impl Size {
    pub fn new(w: f64, h: f64) -> Self {
        Self { w, h }
    }
}

/// Options shared by the stack strategies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackOptions {
    pub item_size: Size,
    pub gap: f64,
    /// Offset added to every placed rectangle, for laying out inside a
    /// region that is not at the viewport origin.
    pub origin: Point,
    pub debug: DebugOverlay,
}

impl StackOptions {
    pub fn new(item_size: Size) -> Self {
        Self {
            item_size,
            gap: 8.0,
            origin: Point::ORIGIN,
            debug: DebugOverlay::OFF,
        }
    }

    pub fn gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    pub fn origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    pub fn debug(mut self, debug: DebugOverlay) -> Self {
        self.debug = debug;
        self
    }
}

pub trait LayoutStrategy {
    fn compute<A: Clone>(&self, components: &[Component<A>], viewport: Viewport) -> Vec<Component<A>>;
}

/// `Math.round` semantics: halves round toward positive infinity.
pub(crate) fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

/// Extent of `count` items of `size` separated by `gap` along one axis.
pub(crate) fn stack_extent(count: usize, size: f64, gap: f64) -> f64 {
    count as f64 * size + count.saturating_sub(1) as f64 * gap
}

/// Copy each component with its frame, default hit test and debug overlay.
pub(crate) fn place<A: Clone>(
    components: &[Component<A>],
    options: &StackOptions,
    frame_of: impl Fn(usize) -> Rect,
) -> Vec<Component<A>> {
    components
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let frame = frame_of(i).translate(options.origin.x, options.origin.y);
            let hit_test = c
                .hit_test
                .clone()
                .unwrap_or_else(|| Rc::new(move |p: Point| is_point_in_rect(&frame, p.x, p.y)));
            Component {
                frame,
                hit_test: Some(hit_test),
                debug: options.debug,
                ..c.clone()
            }
        })
        .collect()
}

/// Placed components together with the viewport they were computed for.
#[derive(Debug, Clone)]
pub struct Placement<A> {
    viewport: Viewport,
    components: Vec<Component<A>>,
}

impl<A: Clone> Placement<A> {
    pub fn compute(
        strategy: &impl LayoutStrategy,
        components: &[Component<A>],
        viewport: Viewport,
    ) -> Self {
        Self {
            viewport,
            components: strategy.compute(components, viewport),
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn is_valid_for(&self, viewport: Viewport) -> bool {
        self.viewport == viewport
    }

    pub fn components(&self) -> &[Component<A>] {
        &self.components
    }

    pub fn get(&self, id: &str) -> Option<&Component<A>> {
        self.components.iter().find(|c| c.id == id)
    }

    pub fn render(&self, ctx: &mut dyn DrawContext) {
        for component in &self.components {
            component.render(ctx);
        }
    }

    /// Action of the first component whose hit test accepts `p`. A hit on a
    /// component without an action yields `None`.
    pub fn action_at(&self, p: Point) -> Option<A> {
        self.components
            .iter()
            .find(|c| c.hit(p))
            .and_then(|c| c.on_click.clone())
    }
}
