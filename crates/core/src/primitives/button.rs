use easel_protocol::{Color, DrawContext, Point, Rect, SharedStr, TextAlign, TextBaseline};

use crate::config::DebugOverlay;
use crate::primitives::text::DEFAULT_FONT;

#[derive(Debug, Clone, PartialEq)]
pub struct ButtonStyle {
    pub background: Color,
    pub foreground: Color,
    pub font: SharedStr,
    pub border_color: Color,
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            foreground: Color::BLACK,
            font: DEFAULT_FONT.into(),
            border_color: Color::BLACK,
        }
    }
}

/// Filled box with a one-pixel border and a label centered inside it.
pub fn draw_button(
    ctx: &mut dyn DrawContext,
    rect: Rect,
    label: &str,
    style: &ButtonStyle,
    debug: DebugOverlay,
) {
    ctx.save();
    ctx.set_fill_style(style.background);
    ctx.fill_rect(rect);

    ctx.set_line_dash(&[]);
    ctx.set_line_width(1.0);
    ctx.set_stroke_style(style.border_color);
    ctx.stroke_rect(rect);

    let center = rect.center();
    ctx.set_fill_style(style.foreground);
    ctx.set_font(&style.font);
    ctx.set_text_align(TextAlign::Center);
    ctx.set_text_baseline(TextBaseline::Middle);
    ctx.fill_text(label, center.x, center.y);
    ctx.restore();

    debug.outline(ctx, rect);
}

/// Canonical hit test: inclusive on every edge.
pub fn is_point_in_rect(rect: &Rect, x: f64, y: f64) -> bool {
    rect.contains(Point::new(x, y))
}
