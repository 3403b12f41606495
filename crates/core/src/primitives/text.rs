use easel_protocol::{Color, DrawContext, SharedStr, TextAlign, TextBaseline};

pub const DEFAULT_FONT: &str = "16px system-ui, sans-serif";

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub color: Color,
    pub font: SharedStr,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            font: DEFAULT_FONT.into(),
            align: TextAlign::Left,
            baseline: TextBaseline::Alphabetic,
        }
    }
}

impl TextStyle {
    /// Centered on both axes in the given font.
    pub fn centered(font: &str) -> Self {
        Self {
            font: font.into(),
            align: TextAlign::Center,
            baseline: TextBaseline::Middle,
            ..Self::default()
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

/// Draw a single run of text anchored at `(x, y)`.
pub fn draw_text(ctx: &mut dyn DrawContext, text: &str, x: f64, y: f64, style: &TextStyle) {
    ctx.save();
    ctx.set_fill_style(style.color);
    ctx.set_font(&style.font);
    ctx.set_text_align(style.align);
    ctx.set_text_baseline(style.baseline);
    ctx.fill_text(text, x, y);
    ctx.restore();
}
