use crate::commands::RenderCommand;
use crate::shared_str::SharedStr;
use crate::types::{ClipRegion, Color, Rect, TextAlign, TextBaseline, Transform};

/// Font a fresh Canvas 2D context starts with.
pub const CANVAS_DEFAULT_FONT: &str = "10px sans-serif";

/// The drawing-context call surface the engine renders through.
///
/// Mirrors the subset of Canvas 2D the engine uses. Implementations must
/// honor `save`/`restore` for every piece of state set through this trait
/// (styles, transform and clip), and `restore` on an empty stack is a no-op.
pub trait DrawContext {
    fn save(&mut self);
    fn restore(&mut self);

    fn set_transform(&mut self, transform: Transform);
    fn scale(&mut self, x: f64, y: f64);
    fn translate(&mut self, x: f64, y: f64);

    fn clear_rect(&mut self, rect: Rect);
    fn clip(&mut self, region: &ClipRegion);

    fn set_fill_style(&mut self, color: Color);
    fn set_stroke_style(&mut self, color: Color);
    fn set_line_width(&mut self, width: f64);
    fn set_line_dash(&mut self, segments: &[f64]);
    fn set_font(&mut self, font: &str);
    fn set_text_align(&mut self, align: TextAlign);
    fn set_text_baseline(&mut self, baseline: TextBaseline);

    fn fill_rect(&mut self, rect: Rect);
    fn stroke_rect(&mut self, rect: Rect);
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
}

/// Snapshot of everything `save`/`restore` covers.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawState {
    pub fill: Color,
    pub stroke: Color,
    pub line_width: f64,
    pub line_dash: Vec<f64>,
    pub font: SharedStr,
    pub text_align: TextAlign,
    pub text_baseline: TextBaseline,
    pub transform: Transform,
    /// Active clip in device space, `None` when unclipped.
    pub clip: Option<Rect>,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            fill: Color::BLACK,
            stroke: Color::BLACK,
            line_width: 1.0,
            line_dash: Vec::new(),
            font: SharedStr::from(CANVAS_DEFAULT_FONT),
            text_align: TextAlign::Left,
            text_baseline: TextBaseline::Alphabetic,
            transform: Transform::IDENTITY,
            clip: None,
        }
    }
}

impl DrawState {
    /// Style-only view of the state, for checking that a draw call did not
    /// leak fill/stroke/font/alignment changes.
    pub fn style(&self) -> (Color, Color, f64, &[f64], &str, TextAlign, TextBaseline) {
        (
            self.fill,
            self.stroke,
            self.line_width,
            &self.line_dash,
            &self.font,
            self.text_align,
            self.text_baseline,
        )
    }
}

/// Current state plus the save stack, advanced one command at a time.
///
/// Shared by the recording context and by every renderer that replays a
/// command list, so they all agree on what a command sequence means.
#[derive(Debug, Clone, Default)]
pub struct StateStack {
    current: DrawState,
    saved: Vec<DrawState>,
}

impl StateStack {
    pub fn new(initial: DrawState) -> Self {
        Self {
            current: initial,
            saved: Vec::new(),
        }
    }

    pub fn current(&self) -> &DrawState {
        &self.current
    }

    /// Number of outstanding `save` calls.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn apply(&mut self, cmd: &RenderCommand) {
        let s = &mut self.current;
        match cmd {
            RenderCommand::Save => self.saved.push(s.clone()),
            RenderCommand::Restore => {
                if let Some(prev) = self.saved.pop() {
                    self.current = prev;
                }
            }
            RenderCommand::SetTransform(t) => s.transform = *t,
            RenderCommand::Scale { x, y } => s.transform = s.transform.then_scale(*x, *y),
            RenderCommand::Translate { x, y } => {
                s.transform = s.transform.then_translate(*x, *y);
            }
            RenderCommand::Clip { region } => {
                let device = s.transform.apply_rect(region.rect());
                s.clip = Some(match s.clip {
                    Some(existing) => existing.intersect(&device),
                    None => device,
                });
            }
            RenderCommand::SetFillStyle(c) => s.fill = *c,
            RenderCommand::SetStrokeStyle(c) => s.stroke = *c,
            RenderCommand::SetLineWidth(w) => s.line_width = *w,
            RenderCommand::SetLineDash(d) => s.line_dash.clone_from(d),
            RenderCommand::SetFont(f) => s.font = f.clone(),
            RenderCommand::SetTextAlign(a) => s.text_align = *a,
            RenderCommand::SetTextBaseline(b) => s.text_baseline = *b,
            RenderCommand::ClearRect { .. }
            | RenderCommand::FillRect { .. }
            | RenderCommand::StrokeRect { .. }
            | RenderCommand::FillText { .. } => {}
        }
    }
}

/// Headless [`DrawContext`] that records every call and tracks state.
#[derive(Debug, Clone, Default)]
pub struct CommandList {
    commands: Vec<RenderCommand>,
    state: StateStack,
}

impl CommandList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Drain the recorded commands. The draw state is kept, the same way a
    /// canvas keeps its transform between animation frames.
    pub fn take_commands(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn state(&self) -> &DrawState {
        self.state.current()
    }

    pub fn save_depth(&self) -> usize {
        self.state.depth()
    }

    /// Forget commands and reset state to a fresh context.
    pub fn reset(&mut self) {
        self.commands.clear();
        self.state = StateStack::default();
    }

    fn push(&mut self, cmd: RenderCommand) {
        self.state.apply(&cmd);
        self.commands.push(cmd);
    }
}

impl DrawContext for CommandList {
    fn save(&mut self) {
        self.push(RenderCommand::Save);
    }

    fn restore(&mut self) {
        self.push(RenderCommand::Restore);
    }

    fn set_transform(&mut self, transform: Transform) {
        self.push(RenderCommand::SetTransform(transform));
    }

    fn scale(&mut self, x: f64, y: f64) {
        self.push(RenderCommand::Scale { x, y });
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.push(RenderCommand::Translate { x, y });
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.push(RenderCommand::ClearRect { rect });
    }

    fn clip(&mut self, region: &ClipRegion) {
        self.push(RenderCommand::Clip { region: *region });
    }

    fn set_fill_style(&mut self, color: Color) {
        self.push(RenderCommand::SetFillStyle(color));
    }

    fn set_stroke_style(&mut self, color: Color) {
        self.push(RenderCommand::SetStrokeStyle(color));
    }

    fn set_line_width(&mut self, width: f64) {
        self.push(RenderCommand::SetLineWidth(width));
    }

    fn set_line_dash(&mut self, segments: &[f64]) {
        self.push(RenderCommand::SetLineDash(segments.to_vec()));
    }

    fn set_font(&mut self, font: &str) {
        self.push(RenderCommand::SetFont(font.into()));
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.push(RenderCommand::SetTextAlign(align));
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.push(RenderCommand::SetTextBaseline(baseline));
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.push(RenderCommand::FillRect { rect });
    }

    fn stroke_rect(&mut self, rect: Rect) {
        self.push(RenderCommand::StrokeRect { rect });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.push(RenderCommand::FillText {
            text: text.into(),
            x,
            y,
        });
    }
}

/// Replay recorded commands onto another context.
pub fn replay(commands: &[RenderCommand], ctx: &mut dyn DrawContext) {
    for cmd in commands {
        match cmd {
            RenderCommand::Save => ctx.save(),
            RenderCommand::Restore => ctx.restore(),
            RenderCommand::SetTransform(t) => ctx.set_transform(*t),
            RenderCommand::Scale { x, y } => ctx.scale(*x, *y),
            RenderCommand::Translate { x, y } => ctx.translate(*x, *y),
            RenderCommand::ClearRect { rect } => ctx.clear_rect(*rect),
            RenderCommand::Clip { region } => ctx.clip(region),
            RenderCommand::SetFillStyle(c) => ctx.set_fill_style(*c),
            RenderCommand::SetStrokeStyle(c) => ctx.set_stroke_style(*c),
            RenderCommand::SetLineWidth(w) => ctx.set_line_width(*w),
            RenderCommand::SetLineDash(d) => ctx.set_line_dash(d),
            RenderCommand::SetFont(f) => ctx.set_font(f),
            RenderCommand::SetTextAlign(a) => ctx.set_text_align(*a),
            RenderCommand::SetTextBaseline(b) => ctx.set_text_baseline(*b),
            RenderCommand::FillRect { rect } => ctx.fill_rect(*rect),
            RenderCommand::StrokeRect { rect } => ctx.stroke_rect(*rect),
            RenderCommand::FillText { text, x, y } => ctx.fill_text(text, *x, *y),
        }
    }
}
