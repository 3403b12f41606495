use crate::context::{CommandList, DrawContext, DrawState};
use crate::commands::RenderCommand;

/// A drawing surface: a backing store of physical pixels plus the context
/// that draws into it.
pub trait Surface {
    /// Resize the backing store. Like assigning `canvas.width`, this resets
    /// the context to its initial state.
    fn resize_backing_store(&mut self, width: u32, height: u32);

    fn backing_store_size(&self) -> (u32, u32);

    fn context(&mut self) -> &mut dyn DrawContext;
}

/// In-memory surface backed by a [`CommandList`].
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    resizes: usize,
    ctx: CommandList,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[RenderCommand] {
        self.ctx.commands()
    }

    pub fn take_commands(&mut self) -> Vec<RenderCommand> {
        self.ctx.take_commands()
    }

    pub fn state(&self) -> &DrawState {
        self.ctx.state()
    }

    pub fn recorder(&self) -> &CommandList {
        &self.ctx
    }

    /// How many times the backing store has been resized.
    pub fn resize_count(&self) -> usize {
        self.resizes
    }
}

impl Surface for RecordingSurface {
    fn resize_backing_store(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.resizes += 1;
        self.ctx.reset();
    }

    fn backing_store_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn context(&mut self) -> &mut dyn DrawContext {
        &mut self.ctx
    }
}
