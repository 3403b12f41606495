pub mod game;
pub mod start;

use std::fmt;

use easel_protocol::{DrawContext, Viewport};

use crate::input::Key;

pub use game::{GameEvent, GameScene, PlayState, Step};
pub use start::{StartAction, StartScene};

/// One screen of the application.
///
/// Only `render` is required; the input and resize capabilities default to
/// doing nothing. Handlers report scene changes through [`Transition`]
/// rather than reaching for a global slot.
pub trait Scene {
    fn name(&self) -> &'static str;

    /// Draw in frame-local coordinates; `width`/`height` are the logical
    /// frame size.
    fn render(&mut self, ctx: &mut dyn DrawContext, width: f64, height: f64);

    /// `x`/`y` are frame-local and already known to lie inside the frame.
    fn on_click(&mut self, _x: f64, _y: f64) -> Transition {
        Transition::Stay
    }

    fn on_key_down(&mut self, _key: &Key) -> Transition {
        Transition::Stay
    }

    fn on_resize(&mut self, _width: f64, _height: f64) {}
}

/// Result of an input handler.
#[derive(Debug)]
pub enum Transition {
    Stay,
    Replace(AnyScene),
}

/// The tagged scene value held by the [`Stage`].
pub enum AnyScene {
    Start(StartScene),
    Game(GameScene),
    /// Host-defined scene.
    Custom(Box<dyn Scene>),
}

impl fmt::Debug for AnyScene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnyScene::Start(s) => f.debug_tuple("Start").field(s).finish(),
            AnyScene::Game(s) => f.debug_tuple("Game").field(s).finish(),
            AnyScene::Custom(s) => f.debug_tuple("Custom").field(&s.name()).finish(),
        }
    }
}

impl AnyScene {
    pub fn as_start(&self) -> Option<&StartScene> {
        match self {
            AnyScene::Start(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_game(&self) -> Option<&GameScene> {
        match self {
            AnyScene::Game(s) => Some(s),
            _ => None,
        }
    }

    fn inner(&mut self) -> &mut dyn Scene {
        match self {
            AnyScene::Start(s) => s,
            AnyScene::Game(s) => s,
            AnyScene::Custom(s) => s.as_mut(),
        }
    }
}

impl Scene for AnyScene {
    fn name(&self) -> &'static str {
        match self {
            AnyScene::Start(s) => s.name(),
            AnyScene::Game(s) => s.name(),
            AnyScene::Custom(s) => s.name(),
        }
    }

    fn render(&mut self, ctx: &mut dyn DrawContext, width: f64, height: f64) {
        self.inner().render(ctx, width, height);
    }

    fn on_click(&mut self, x: f64, y: f64) -> Transition {
        self.inner().on_click(x, y)
    }

    fn on_key_down(&mut self, key: &Key) -> Transition {
        self.inner().on_key_down(key)
    }

    fn on_resize(&mut self, width: f64, height: f64) {
        self.inner().on_resize(width, height);
    }
}

/// Identity of one activation. Every scene that becomes active gets a new id,
/// so two instances of the same kind are distinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneId(pub u64);

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug)]
struct ActiveScene {
    id: SceneId,
    scene: AnyScene,
}

/// Owner of the single active scene.
///
/// Transitions returned by handlers are applied before the handler call
/// returns, so the next render, click or key event sees only the new scene.
#[derive(Debug, Default)]
pub struct Stage {
    active: Option<ActiveScene>,
    next_id: u64,
    frame_size: Option<Viewport>,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `scene` the active one. If the frame size is already known the
    /// scene is told about it right away.
    pub fn set_scene(&mut self, mut scene: AnyScene) -> SceneId {
        self.next_id += 1;
        let id = SceneId(self.next_id);
        if let Some(size) = self.frame_size {
            scene.on_resize(size.width, size.height);
        }
        tracing::debug!(scene = scene.name(), %id, "scene activated");
        self.active = Some(ActiveScene { id, scene });
        id
    }

    pub fn active(&self) -> Option<&AnyScene> {
        self.active.as_ref().map(|a| &a.scene)
    }

    pub fn active_id(&self) -> Option<SceneId> {
        self.active.as_ref().map(|a| a.id)
    }

    pub fn has_scene(&self) -> bool {
        self.active.is_some()
    }

    pub fn render(&mut self, ctx: &mut dyn DrawContext, width: f64, height: f64) {
        if let Some(active) = &mut self.active {
            active.scene.render(ctx, width, height);
        }
    }

    /// Deliver a click; `false` when there is no scene to receive it.
    pub fn click(&mut self, x: f64, y: f64) -> bool {
        let Some(active) = &mut self.active else {
            return false;
        };
        let transition = active.scene.on_click(x, y);
        self.apply(transition);
        true
    }

    pub fn key_down(&mut self, key: &Key) -> bool {
        let Some(active) = &mut self.active else {
            return false;
        };
        let transition = active.scene.on_key_down(key);
        self.apply(transition);
        true
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.frame_size = Some(Viewport::new(width, height));
        if let Some(active) = &mut self.active {
            active.scene.on_resize(width, height);
        }
    }

    fn apply(&mut self, transition: Transition) {
        if let Transition::Replace(next) = transition {
            self.set_scene(next);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use easel_protocol::{CommandList, Rect};

    /// Counts calls and replaces itself on any key.
    struct Probe {
        renders: usize,
        resized: Option<(f64, f64)>,
    }

    impl Scene for Probe {
        fn name(&self) -> &'static str {
            "probe"
        }

        fn render(&mut self, ctx: &mut dyn DrawContext, width: f64, height: f64) {
            self.renders += 1;
            ctx.fill_rect(Rect::new(0.0, 0.0, width, height));
        }

        fn on_key_down(&mut self, _key: &Key) -> Transition {
            Transition::Replace(AnyScene::Start(StartScene::new(EngineConfig::default())))
        }

        fn on_resize(&mut self, width: f64, height: f64) {
            self.resized = Some((width, height));
        }
    }

    fn probe() -> AnyScene {
        AnyScene::Custom(Box::new(Probe {
            renders: 0,
            resized: None,
        }))
    }

    #[test]
    fn empty_stage_ignores_everything() {
        let mut stage = Stage::new();
        let mut ctx = CommandList::new();
        stage.render(&mut ctx, 100.0, 100.0);
        assert!(ctx.commands().is_empty());
        assert!(!stage.click(1.0, 1.0));
        assert!(!stage.key_down(&Key::Escape));
        assert!(stage.active_id().is_none());
    }

    #[test]
    fn ids_increase_per_activation() {
        let mut stage = Stage::new();
        let a = stage.set_scene(probe());
        let b = stage.set_scene(probe());
        assert!(b > a);
        assert_eq!(stage.active_id(), Some(b));
    }

    #[test]
    fn transition_applies_before_handler_returns() {
        let mut stage = Stage::new();
        let first = stage.set_scene(probe());
        assert!(stage.key_down(&Key::Enter));
        assert_ne!(stage.active_id(), Some(first));
        assert_eq!(stage.active().map(Scene::name), Some("start"));
    }

    #[test]
    fn new_scene_learns_known_frame_size() {
        let mut stage = Stage::new();
        stage.resize(640.0, 480.0);
        stage.set_scene(AnyScene::Start(StartScene::new(EngineConfig::default())));
        let placed = stage
            .active()
            .and_then(AnyScene::as_start)
            .and_then(StartScene::placement)
            .map(|p| p.viewport());
        assert_eq!(placed, Some(Viewport::new(640.0, 480.0)));
    }

    #[test]
    fn custom_scene_debug_shows_name() {
        assert_eq!(format!("{:?}", probe()), "Custom(\"probe\")");
    }
}
