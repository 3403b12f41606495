//! Frame geometry and the controller that owns the render loop.
//!
//! The frame is the logical render area: the viewport width clamped to the
//! configured bounds, full viewport height, centered horizontally. Only the
//! controller touches the context transform and clip; scenes draw in
//! frame-local coordinates.

use easel_protocol::{ClipRegion, Point, Rect, Surface, Transform, Viewport};

use crate::config::{EngineConfig, FrameConfig};
use crate::error::ConfigError;
use crate::input::Key;
use crate::scene::{AnyScene, SceneId, Stage};

/// Derived frame geometry. Recomputed on every resize, never edited.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    clip: ClipRegion,
}

impl Frame {
    pub fn compute(viewport: Viewport, bounds: &FrameConfig) -> Self {
        let width = bounds.min_width.max(viewport.width.min(bounds.max_width));
        let height = viewport.height;
        Self {
            width,
            height,
            offset_x: ((viewport.width - width) / 2.0).floor(),
            offset_y: 0.0,
            clip: ClipRegion::new(Rect::new(0.0, 0.0, width, height)),
        }
    }

    pub fn size(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    /// Frame rectangle in viewport coordinates.
    pub fn rect(&self) -> Rect {
        Rect::new(self.offset_x, self.offset_y, self.width, self.height)
    }

    /// Clip region in frame-local coordinates, built once per resize.
    pub fn clip(&self) -> &ClipRegion {
        &self.clip
    }

    /// Convert a viewport point to frame-local coordinates. Points outside
    /// the frame give `None`; the edges count as inside.
    pub fn to_local(&self, x: f64, y: f64) -> Option<Point> {
        let local = Point::new(x - self.offset_x, y - self.offset_y);
        Rect::from_size(self.size()).contains(local).then_some(local)
    }
}

/// Whether an input event reached the active scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Handled,
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeRequest {
    /// First request since the last tick; it will be applied by the next one.
    Scheduled,
    /// A resize was already pending; this one replaced its size.
    Coalesced,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingResize {
    viewport: Viewport,
    device_pixel_ratio: f64,
}

/// Owns frame geometry and the active scene, and drives a [`Surface`].
#[derive(Debug)]
pub struct FrameController {
    config: EngineConfig,
    stage: Stage,
    frame: Option<Frame>,
    pending: Option<PendingResize>,
    ticks: u64,
}

impl FrameController {
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            stage: Stage::new(),
            frame: None,
            pending: None,
            ticks: 0,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn has_pending_resize(&self) -> bool {
        self.pending.is_some()
    }

    pub fn set_scene(&mut self, scene: AnyScene) -> SceneId {
        self.stage.set_scene(scene)
    }

    /// Record a viewport change to be applied at the start of the next
    /// [`tick`](Self::tick). Bursts collapse into one recomputation.
    pub fn request_resize(&mut self, viewport: Viewport, device_pixel_ratio: f64) -> ResizeRequest {
        let request = PendingResize {
            viewport,
            device_pixel_ratio,
        };
        match self.pending.replace(request) {
            Some(_) => {
                tracing::trace!(width = viewport.width, height = viewport.height, "resize coalesced");
                ResizeRequest::Coalesced
            }
            None => ResizeRequest::Scheduled,
        }
    }

    /// Apply a viewport size right away, dropping any pending request.
    pub fn resize_now(
        &mut self,
        surface: &mut dyn Surface,
        viewport: Viewport,
        device_pixel_ratio: f64,
    ) {
        self.pending = None;
        self.apply_resize(
            surface,
            PendingResize {
                viewport,
                device_pixel_ratio,
            },
        );
    }

    fn apply_resize(&mut self, surface: &mut dyn Surface, resize: PendingResize) {
        let dpr = sanitize_dpr(resize.device_pixel_ratio);
        let Viewport { width, height } = resize.viewport;
        surface.resize_backing_store(physical(width, dpr), physical(height, dpr));

        // Reset before scaling so repeated resizes never compound.
        let ctx = surface.context();
        ctx.set_transform(Transform::IDENTITY);
        ctx.scale(dpr, dpr);

        let frame = Frame::compute(resize.viewport, &self.config.frame);
        tracing::debug!(
            viewport_width = width,
            viewport_height = height,
            dpr,
            frame_width = frame.width,
            offset_x = frame.offset_x,
            "frame resized"
        );
        self.frame = Some(frame);
        self.stage.resize(frame.width, frame.height);
    }

    /// One animation frame: flush a pending resize, clear, render the active
    /// scene inside the frame clip, then draw the debug outline.
    pub fn tick(&mut self, surface: &mut dyn Surface) {
        if let Some(resize) = self.pending.take() {
            self.apply_resize(surface, resize);
        }
        self.ticks += 1;

        let (backing_w, backing_h) = surface.backing_store_size();
        let ctx = surface.context();
        ctx.save();
        ctx.set_transform(Transform::IDENTITY);
        ctx.clear_rect(Rect::new(0.0, 0.0, f64::from(backing_w), f64::from(backing_h)));
        ctx.restore();

        let Some(frame) = self.frame else {
            return;
        };
        if self.stage.has_scene() {
            ctx.save();
            ctx.translate(frame.offset_x, frame.offset_y);
            ctx.clip(frame.clip());
            self.stage.render(ctx, frame.width, frame.height);
            ctx.restore();
        }
        self.config.debug.stroke(ctx, frame.rect().outset(1.0));
    }

    /// Route a click given in viewport (CSS pixel) coordinates.
    pub fn click(&mut self, x: f64, y: f64) -> Dispatch {
        let Some(local) = self.frame.and_then(|f| f.to_local(x, y)) else {
            tracing::trace!(x, y, "click outside frame");
            return Dispatch::Ignored;
        };
        if self.stage.click(local.x, local.y) {
            Dispatch::Handled
        } else {
            Dispatch::Ignored
        }
    }

    pub fn key_down(&mut self, key: &Key) -> Dispatch {
        if self.stage.key_down(key) {
            Dispatch::Handled
        } else {
            Dispatch::Ignored
        }
    }
}

fn sanitize_dpr(dpr: f64) -> f64 {
    if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 }
}

fn physical(logical: f64, dpr: f64) -> u32 {
    // Saturating float-to-int cast; negative and NaN become 0.
    (logical * dpr).floor() as u32
}
