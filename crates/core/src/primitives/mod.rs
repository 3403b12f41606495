//! Stateless draw functions. Each one brackets its style changes with
//! `save`/`restore`, so sibling draws never see leaked fill, font or
//! alignment state.

pub mod button;
pub mod modal;
pub mod text;

pub use button::{ButtonStyle, draw_button, is_point_in_rect};
pub use modal::{ModalButton, ModalSpec, ModalStyle, draw_modal};
pub use text::{DEFAULT_FONT, TextStyle, draw_text};
