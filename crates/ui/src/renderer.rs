use egui::{
    Align, Align2, Color32, CornerRadius, FontFamily, FontId, Painter, Pos2, Rect, Stroke, StrokeKind,
};
use easel_protocol::font::{font_family, font_size_px};
use easel_protocol::{Color, DrawState, RenderCommand, StateStack, TextAlign, TextBaseline};

/// Maps backing-store pixels onto the painter's area.
#[derive(Debug, Clone, Copy)]
pub struct Placement {
    /// Top-left of the drawing area in egui points.
    pub origin: Pos2,
    /// Backing-store pixels per egui point.
    pub pixels_per_point: f32,
}

impl Placement {
    fn point(&self, x: f64, y: f64) -> Pos2 {
        Pos2::new(
            self.origin.x + x as f32 / self.pixels_per_point,
            self.origin.y + y as f32 / self.pixels_per_point,
        )
    }

    fn rect(&self, r: easel_protocol::Rect) -> Rect {
        Rect::from_two_pos(self.point(r.x, r.y), self.point(r.right(), r.bottom()))
    }

    fn length(&self, device: f64) -> f32 {
        device as f32 / self.pixels_per_point
    }
}

pub fn color32(c: Color) -> Color32 {
    let alpha = (c.a.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(c.r, c.g, c.b, alpha)
}

/// Canvas text anchoring expressed as an egui alignment. Alphabetic is
/// approximated by the bottom edge.
pub fn anchor(align: TextAlign, baseline: TextBaseline) -> Align2 {
    let h = match align {
        TextAlign::Left => Align::Min,
        TextAlign::Center => Align::Center,
        TextAlign::Right => Align::Max,
    };
    let v = match baseline {
        TextBaseline::Top => Align::Min,
        TextBaseline::Middle => Align::Center,
        TextBaseline::Alphabetic | TextBaseline::Bottom => Align::Max,
    };
    Align2([h, v])
}

/// egui ships one proportional and one monospace family.
pub fn font_id(font: &str, size: f32) -> FontId {
    let family = if font_family(font).contains("monospace") {
        FontFamily::Monospace
    } else {
        FontFamily::Proportional
    };
    FontId::new(size, family)
}

/// Replay one tick's commands onto `painter`.
///
/// `initial` is the context state the commands start from; the surface keeps
/// its transform between ticks the same way a canvas does.
pub fn render_commands(
    painter: &Painter,
    commands: &[RenderCommand],
    initial: DrawState,
    placement: Placement,
) {
    let mut state = StateStack::new(initial);

    for cmd in commands {
        state.apply(cmd);
        let s = state.current();
        let clipped = match s.clip {
            Some(clip) => painter.with_clip_rect(painter.clip_rect().intersect(placement.rect(clip))),
            None => painter.clone(),
        };

        match cmd {
            RenderCommand::FillRect { rect } => {
                let area = placement.rect(s.transform.apply_rect(*rect));
                clipped.rect_filled(area, CornerRadius::ZERO, color32(s.fill));
            }

            RenderCommand::StrokeRect { rect } => {
                let area = placement.rect(s.transform.apply_rect(*rect));
                let width = placement.length(s.line_width * s.transform.a);
                let stroke = Stroke::new(width, color32(s.stroke));
                if let &[dash, gap, ..] = s.line_dash.as_slice() {
                    let outline = [
                        area.left_top(),
                        area.right_top(),
                        area.right_bottom(),
                        area.left_bottom(),
                        area.left_top(),
                    ];
                    let scale = s.transform.a;
                    clipped.extend(egui::Shape::dashed_line(
                        &outline,
                        stroke,
                        placement.length(dash * scale),
                        placement.length(gap * scale),
                    ));
                } else {
                    clipped.rect_stroke(area, CornerRadius::ZERO, stroke, StrokeKind::Middle);
                }
            }

            RenderCommand::FillText { text, x, y } => {
                let device = s.transform.apply(easel_protocol::Point::new(*x, *y));
                let size = placement.length(font_size_px(&s.font) * s.transform.d);
                if size < 1.0 {
                    continue;
                }
                clipped.text(
                    placement.point(device.x, device.y),
                    anchor(s.text_align, s.text_baseline),
                    &**text,
                    font_id(&s.font, size),
                    color32(s.fill),
                );
            }

            // egui repaints from scratch each frame, so clears have nothing
            // to erase; state commands were folded into `state` above.
            _ => {}
        }
    }
}
