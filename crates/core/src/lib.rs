//! Canvas presentation engine: frame geometry, scenes, layout and draw
//! primitives on top of the [`easel_protocol::DrawContext`] call surface.

pub mod config;
pub mod error;
pub mod frame;
pub mod input;
pub mod layout;
pub mod primitives;
pub mod scene;
pub mod svg;

pub use config::{DebugOverlay, EngineConfig, FrameConfig};
pub use error::{ConfigError, Error, SetupError};
pub use frame::{Dispatch, Frame, FrameController, ResizeRequest};
pub use input::Key;
pub use scene::{AnyScene, GameScene, Scene, SceneId, Stage, StartScene, Transition};
