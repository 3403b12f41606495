//! [`Surface`] backed by an `HtmlCanvasElement` and its 2D context.

use easel_core::SetupError;
use easel_protocol::{
    ClipRegion, Color, DrawContext, Rect, Surface, TextAlign, TextBaseline, Transform,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Path2d};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    /// Native path for the last clip region seen; the frame controller hands
    /// over the same region every frame until the next resize.
    clip_path: Option<(ClipRegion, Path2d)>,
}

impl CanvasSurface {
    pub fn from_document(document: &Document, id: &str) -> Result<Self, SetupError> {
        let element = document
            .get_element_by_id(id)
            .ok_or_else(|| SetupError::MissingSurface { id: id.to_owned() })?;
        let canvas = element
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| SetupError::NotACanvas { id: id.to_owned() })?;
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or(SetupError::ContextUnavailable)?;
        Ok(Self {
            canvas,
            ctx,
            clip_path: None,
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Stretch the canvas over the whole viewport; the backing store is
    /// sized separately on every resize.
    pub fn fill_viewport(&self, document: &Document) -> Result<(), JsValue> {
        if let Some(body) = document.body() {
            body.style().set_property("margin", "0")?;
        }
        let style = self.canvas.style();
        for (name, value) in [
            ("position", "fixed"),
            ("left", "0"),
            ("top", "0"),
            ("transform", ""),
            ("width", "100%"),
            ("height", "100%"),
        ] {
            style.set_property(name, value)?;
        }
        Ok(())
    }

    fn clip_path(&mut self, region: &ClipRegion) -> Option<&Path2d> {
        let stale = !matches!(&self.clip_path, Some((cached, _)) if cached == region);
        if stale {
            let path = match Path2d::new() {
                Ok(path) => path,
                Err(err) => {
                    tracing::warn!(?err, "Path2D unavailable");
                    return None;
                }
            };
            let r = region.rect();
            path.rect(r.x, r.y, r.w, r.h);
            self.clip_path = Some((*region, path));
        }
        self.clip_path.as_ref().map(|(_, path)| path)
    }
}

impl Surface for CanvasSurface {
    fn resize_backing_store(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn backing_store_size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn context(&mut self) -> &mut dyn DrawContext {
        self
    }
}

fn check(result: Result<(), JsValue>, op: &'static str) {
    if let Err(err) = result {
        tracing::warn!(op, ?err, "canvas call failed");
    }
}

pub(crate) fn align_css(align: TextAlign) -> &'static str {
    match align {
        TextAlign::Left => "left",
        TextAlign::Center => "center",
        TextAlign::Right => "right",
    }
}

pub(crate) fn baseline_css(baseline: TextBaseline) -> &'static str {
    match baseline {
        TextBaseline::Top => "top",
        TextBaseline::Middle => "middle",
        TextBaseline::Alphabetic => "alphabetic",
        TextBaseline::Bottom => "bottom",
    }
}

impl DrawContext for CanvasSurface {
    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn set_transform(&mut self, t: Transform) {
        check(self.ctx.set_transform(t.a, t.b, t.c, t.d, t.e, t.f), "setTransform");
    }

    fn scale(&mut self, x: f64, y: f64) {
        check(self.ctx.scale(x, y), "scale");
    }

    fn translate(&mut self, x: f64, y: f64) {
        check(self.ctx.translate(x, y), "translate");
    }

    fn clear_rect(&mut self, r: Rect) {
        self.ctx.clear_rect(r.x, r.y, r.w, r.h);
    }

    fn clip(&mut self, region: &ClipRegion) {
        let ctx = self.ctx.clone();
        if let Some(path) = self.clip_path(region) {
            ctx.clip_with_path_2d(path);
        }
    }

    fn set_fill_style(&mut self, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
    }

    fn set_stroke_style(&mut self, color: Color) {
        self.ctx.set_stroke_style_str(&color.to_css());
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn set_line_dash(&mut self, segments: &[f64]) {
        let array: js_sys::Array = segments.iter().map(|&s| JsValue::from_f64(s)).collect();
        check(self.ctx.set_line_dash(&array), "setLineDash");
    }

    fn set_font(&mut self, font: &str) {
        self.ctx.set_font(font);
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.ctx.set_text_align(align_css(align));
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.ctx.set_text_baseline(baseline_css(baseline));
    }

    fn fill_rect(&mut self, r: Rect) {
        self.ctx.fill_rect(r.x, r.y, r.w, r.h);
    }

    fn stroke_rect(&mut self, r: Rect) {
        self.ctx.stroke_rect(r.x, r.y, r.w, r.h);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        check(self.ctx.fill_text(text, x, y), "fillText");
    }
}
