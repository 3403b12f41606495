mod app;
mod renderer;

pub use app::EaselApp;
pub use renderer::{Placement, anchor, color32, font_id, render_commands};
