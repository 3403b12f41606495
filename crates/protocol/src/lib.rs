pub mod commands;
pub mod context;
pub mod font;
pub mod shared_str;
pub mod surface;
pub mod types;

pub use commands::RenderCommand;
pub use context::{CommandList, DrawContext, DrawState, StateStack, replay};
pub use shared_str::SharedStr;
pub use surface::{RecordingSurface, Surface};
pub use types::{ClipRegion, Color, Point, Rect, TextAlign, TextBaseline, Transform, Viewport};
