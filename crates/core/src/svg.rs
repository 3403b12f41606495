//! SVG renderer: converts `RenderCommand` lists into standalone SVG strings.
//!
//! Commands are replayed through a [`StateStack`], so every emitted element
//! carries the fill, stroke, font and transform that were current when it was
//! drawn. Clips become `<clipPath>` definitions in device space.

use std::fmt::Write as _;

use easel_protocol::{
    DrawState, Rect, RenderCommand, StateStack, TextAlign, TextBaseline, Transform,
};

/// Render a list of commands as an SVG document string.
///
/// `width` and `height` are the backing-store size and define the viewBox.
/// A clear covering the whole viewBox drops everything painted before it.
pub fn render_svg(commands: &[RenderCommand], width: f64, height: f64) -> String {
    let viewbox = Rect::new(0.0, 0.0, width, height);
    let mut state = StateStack::default();
    let mut defs = String::new();
    let mut body = String::with_capacity(commands.len() * 96);
    let mut clips: Vec<Rect> = Vec::new();

    for cmd in commands {
        state.apply(cmd);
        let current = state.current();
        let element = match cmd {
            RenderCommand::ClearRect { rect } => {
                let cleared = current.transform.apply_rect(*rect);
                if cleared.intersect(&viewbox) == viewbox {
                    body.clear();
                }
                continue;
            }
            RenderCommand::FillRect { rect } => format!(
                r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"{}/>"#,
                rect.x,
                rect.y,
                rect.w,
                rect.h,
                current.fill.to_css(),
                transform_attr(&current.transform),
            ),
            RenderCommand::StrokeRect { rect } => format!(
                r#"<rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="{}" stroke-width="{}"{}{}/>"#,
                rect.x,
                rect.y,
                rect.w,
                rect.h,
                current.stroke.to_css(),
                current.line_width,
                dash_attr(&current.line_dash),
                transform_attr(&current.transform),
            ),
            RenderCommand::FillText { text, x, y } => format!(
                r#"<text x="{x}" y="{y}" fill="{}" text-anchor="{}" dominant-baseline="{}" style="font:{}"{}>{}</text>"#,
                current.fill.to_css(),
                anchor(current.text_align),
                baseline(current.text_baseline),
                escape_xml(&current.font),
                transform_attr(&current.transform),
                escape_xml(text),
            ),
            _ => continue,
        };

        match clip_id(current, &mut clips, &mut defs) {
            Some(id) => {
                let _ = write!(body, r#"<g clip-path="url(#{id})">{element}</g>"#);
            }
            None => body.push_str(&element),
        }
    }

    let mut svg = String::with_capacity(body.len() + defs.len() + 256);
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="{width}" height="{height}">"#,
    );
    if !defs.is_empty() {
        let _ = write!(svg, "<defs>{defs}</defs>");
    }
    svg.push_str(&body);
    svg.push_str("</svg>");
    svg
}

/// Id of the clip path for the current clip, defining it on first use.
fn clip_id(state: &DrawState, clips: &mut Vec<Rect>, defs: &mut String) -> Option<String> {
    let clip = state.clip?;
    let index = match clips.iter().position(|r| *r == clip) {
        Some(i) => i,
        None => {
            clips.push(clip);
            let i = clips.len() - 1;
            let _ = write!(
                defs,
                r#"<clipPath id="clip{i}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath>"#,
                clip.x, clip.y, clip.w, clip.h,
            );
            i
        }
    };
    Some(format!("clip{index}"))
}

fn transform_attr(t: &Transform) -> String {
    if *t == Transform::IDENTITY {
        String::new()
    } else {
        format!(
            r#" transform="matrix({} {} {} {} {} {})""#,
            t.a, t.b, t.c, t.d, t.e, t.f
        )
    }
}

fn dash_attr(dash: &[f64]) -> String {
    if dash.is_empty() {
        return String::new();
    }
    let values: Vec<String> = dash.iter().map(f64::to_string).collect();
    format!(r#" stroke-dasharray="{}""#, values.join(","))
}

fn anchor(align: TextAlign) -> &'static str {
    match align {
        TextAlign::Left => "start",
        TextAlign::Center => "middle",
        TextAlign::Right => "end",
    }
}

fn baseline(baseline: TextBaseline) -> &'static str {
    match baseline {
        TextBaseline::Top => "text-before-edge",
        TextBaseline::Middle => "middle",
        TextBaseline::Alphabetic => "alphabetic",
        TextBaseline::Bottom => "text-after-edge",
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use easel_protocol::{ClipRegion, Color, CommandList, DrawContext};

    #[test]
    fn basic_svg_output() {
        let mut ctx = CommandList::new();
        ctx.set_fill_style(Color::rgb(0xff, 0, 0));
        ctx.fill_rect(Rect::new(10.0, 20.0, 100.0, 18.0));
        ctx.set_text_align(TextAlign::Center);
        ctx.fill_text("main", 60.0, 30.0);

        let svg = render_svg(ctx.commands(), 800.0, 400.0);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(r##"fill="#ff0000""##));
        assert!(svg.contains(r#"text-anchor="middle""#));
        assert!(svg.contains(">main</text>"));
    }

    #[test]
    fn escapes_xml_entities() {
        let mut ctx = CommandList::new();
        ctx.fill_text("fn<T>(&self)", 0.0, 0.0);
        let svg = render_svg(ctx.commands(), 400.0, 100.0);
        assert!(svg.contains("fn&lt;T&gt;(&amp;self)"));
    }

    #[test]
    fn transforms_dashes_and_clips() {
        let mut ctx = CommandList::new();
        ctx.translate(100.0, 0.0);
        ctx.clip(&ClipRegion::new(Rect::new(0.0, 0.0, 50.0, 50.0)));
        ctx.set_line_dash(&[4.0, 3.0]);
        ctx.stroke_rect(Rect::new(1.0, 1.0, 10.0, 10.0));

        let svg = render_svg(ctx.commands(), 400.0, 100.0);
        assert!(svg.contains(r#"transform="matrix(1 0 0 1 100 0)""#));
        assert!(svg.contains(r#"stroke-dasharray="4,3""#));
        assert!(svg.contains(r#"<clipPath id="clip0"><rect x="100" y="0" width="50" height="50"/>"#));
        assert!(svg.contains(r##"<g clip-path="url(#clip0)">"##));
    }

    #[test]
    fn full_clear_drops_earlier_paint() {
        let mut ctx = CommandList::new();
        ctx.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        ctx.clear_rect(Rect::new(0.0, 0.0, 400.0, 100.0));
        ctx.fill_text("after", 0.0, 0.0);
        let svg = render_svg(ctx.commands(), 400.0, 100.0);
        assert!(!svg.contains("<rect"));
        assert!(svg.contains("after"));
    }
}
