use easel_protocol::{Color, DrawContext, Rect, SharedStr, TextAlign, TextBaseline, Viewport};

use crate::config::DebugOverlay;
use crate::primitives::button::{ButtonStyle, draw_button};
use crate::primitives::text::{TextStyle, draw_text};

/// Distance from the top of the box to the title baseline.
const TITLE_OFFSET: f64 = 16.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ModalButton {
    pub key: SharedStr,
    pub label: SharedStr,
    /// Absolute rectangle; the modal does no layout of its own.
    pub rect: Rect,
    pub style: ButtonStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModalSpec {
    pub title: Option<SharedStr>,
    pub bounds: Rect,
    pub buttons: Vec<ModalButton>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModalStyle {
    pub backdrop: Color,
    pub box_background: Color,
    pub box_border: Color,
    pub title: TextStyle,
}

impl Default for ModalStyle {
    fn default() -> Self {
        Self {
            backdrop: Color::rgba(0, 0, 0, 0.5),
            box_background: Color::WHITE,
            box_border: Color::BLACK,
            title: TextStyle {
                font: "20px system-ui, sans-serif".into(),
                align: TextAlign::Center,
                baseline: TextBaseline::Top,
                ..TextStyle::default()
            },
        }
    }
}

/// Backdrop over the whole `surface`, then the box, title and buttons.
pub fn draw_modal(
    ctx: &mut dyn DrawContext,
    surface: Viewport,
    spec: &ModalSpec,
    style: &ModalStyle,
    debug: DebugOverlay,
) {
    let bounds = spec.bounds;

    ctx.save();
    ctx.set_fill_style(style.backdrop);
    ctx.fill_rect(Rect::from_size(surface));
    ctx.set_fill_style(style.box_background);
    ctx.fill_rect(bounds);
    ctx.set_line_dash(&[]);
    ctx.set_line_width(1.0);
    ctx.set_stroke_style(style.box_border);
    ctx.stroke_rect(bounds);
    ctx.restore();
    debug.outline(ctx, bounds);

    if let Some(title) = &spec.title {
        draw_text(
            ctx,
            title,
            bounds.x + bounds.w / 2.0,
            bounds.y + TITLE_OFFSET,
            &style.title,
        );
    }

    for button in &spec.buttons {
        draw_button(ctx, button.rect, &button.label, &button.style, debug);
    }
}
