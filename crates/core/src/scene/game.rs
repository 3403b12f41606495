use easel_protocol::{Color, DrawContext, Point, Rect, Viewport};

use crate::config::EngineConfig;
use crate::input::Key;
use crate::layout::{
    Component, Placement, Size, StackOptions, VerticalStack, Visual, round_half_up,
};
use crate::primitives::{
    ButtonStyle, DEFAULT_FONT, ModalButton, ModalSpec, ModalStyle, TextStyle, draw_modal,
    draw_text,
};
use crate::scene::{AnyScene, Scene, StartScene, Transition};

const TITLE: &str = "Game Scene";
const TITLE_FONT: &str = "28px system-ui, sans-serif";
const TITLE_RISE: f64 = 40.0;

const MODAL_SIZE: Size = Size { w: 280.0, h: 200.0 };
/// Space above the modal buttons reserved for the title.
const MODAL_HEADER: f64 = 60.0;
const MODAL_TITLE: &str = "Paused";
const MODAL_BUTTON: Size = Size { w: 200.0, h: 40.0 };
const MODAL_GAP: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayState {
    #[default]
    Running,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Escape,
    Continue,
    Restart,
    Exit,
}

/// Outcome of [`PlayState::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Same scene instance, possibly in a new state.
    Enter(PlayState),
    /// Replace the scene with a fresh game.
    Restart,
    /// Replace the scene with a fresh start screen.
    Exit,
}

impl PlayState {
    pub fn step(self, event: GameEvent) -> Step {
        match (self, event) {
            (PlayState::Running, GameEvent::Escape) => Step::Enter(PlayState::Paused),
            (PlayState::Paused, GameEvent::Continue) => Step::Enter(PlayState::Running),
            (PlayState::Paused, GameEvent::Restart) => Step::Restart,
            (PlayState::Paused, GameEvent::Exit) => Step::Exit,
            (state, _) => Step::Enter(state),
        }
    }
}

/// Modal box and its placed buttons for one frame size.
#[derive(Debug, Clone)]
struct PauseModal {
    spec: ModalSpec,
    buttons: Placement<GameEvent>,
}

impl PauseModal {
    fn compute(viewport: Viewport, config: &EngineConfig) -> Self {
        let bounds = Rect::new(
            round_half_up(viewport.width / 2.0 - MODAL_SIZE.w / 2.0),
            round_half_up(viewport.height / 2.0 - MODAL_SIZE.h / 2.0),
            MODAL_SIZE.w,
            MODAL_SIZE.h,
        );
        let layout = VerticalStack::new(
            StackOptions::new(MODAL_BUTTON)
                .gap(MODAL_GAP)
                .origin(Point::new(bounds.x, bounds.y + MODAL_HEADER))
                .debug(config.debug),
        );
        let inner = Viewport::new(MODAL_SIZE.w, MODAL_SIZE.h - MODAL_HEADER);
        let buttons = Placement::compute(&layout, &modal_components(), inner);

        let spec = ModalSpec {
            title: Some(MODAL_TITLE.into()),
            bounds,
            buttons: buttons
                .components()
                .iter()
                .filter_map(|c| match &c.visual {
                    Visual::Button { label, style } => Some(ModalButton {
                        key: c.id.clone(),
                        label: label.clone(),
                        rect: c.frame,
                        style: style.clone(),
                    }),
                    Visual::Text { .. } => None,
                })
                .collect(),
        };
        Self { spec, buttons }
    }
}

fn modal_components() -> Vec<Component<GameEvent>> {
    [
        ("continue", "Continue", GameEvent::Continue),
        ("restart", "Restart", GameEvent::Restart),
        ("exit", "Exit", GameEvent::Exit),
    ]
    .into_iter()
    .map(|(id, label, event)| {
        Component::new(id, Visual::button(label, ButtonStyle::default())).on_click(event)
    })
    .collect()
}

/// Gameplay screen with an `Escape`-triggered pause menu.
#[derive(Debug)]
pub struct GameScene {
    config: EngineConfig,
    state: PlayState,
    frames_played: u64,
    modal: Option<PauseModal>,
}

impl GameScene {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            state: PlayState::Running,
            frames_played: 0,
            modal: None,
        }
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    /// Frames rendered while running. Frozen while paused.
    pub fn frames_played(&self) -> u64 {
        self.frames_played
    }

    /// Placed pause-menu buttons, once the menu has been laid out.
    pub fn modal_buttons(&self) -> Option<&Placement<GameEvent>> {
        self.modal.as_ref().map(|m| &m.buttons)
    }

    pub fn modal_bounds(&self) -> Option<Rect> {
        self.modal.as_ref().map(|m| m.spec.bounds)
    }

    /// Feed an event through [`PlayState::step`] and act on the result.
    pub fn handle(&mut self, event: GameEvent) -> Transition {
        match self.state.step(event) {
            Step::Enter(next) => {
                if next != self.state {
                    tracing::debug!(from = ?self.state, to = ?next, "play state changed");
                }
                self.state = next;
                Transition::Stay
            }
            Step::Restart => Transition::Replace(AnyScene::Game(GameScene::new(self.config))),
            Step::Exit => Transition::Replace(AnyScene::Start(StartScene::new(self.config))),
        }
    }

    fn modal_for(&mut self, viewport: Viewport) -> &PauseModal {
        if !self
            .modal
            .as_ref()
            .is_some_and(|m| m.buttons.is_valid_for(viewport))
        {
            self.modal = None;
        }
        let config = self.config;
        self.modal
            .get_or_insert_with(|| PauseModal::compute(viewport, &config))
    }
}

impl Scene for GameScene {
    fn name(&self) -> &'static str {
        "game"
    }

    fn render(&mut self, ctx: &mut dyn DrawContext, width: f64, height: f64) {
        if self.state == PlayState::Running {
            self.frames_played += 1;
        }

        ctx.save();
        ctx.set_fill_style(Color::WHITE);
        ctx.fill_rect(Rect::new(0.0, 0.0, width, height));
        ctx.restore();

        draw_text(
            ctx,
            TITLE,
            width / 2.0,
            height / 2.0 - TITLE_RISE,
            &TextStyle::centered(TITLE_FONT),
        );
        draw_text(
            ctx,
            &format!("{} frames", self.frames_played),
            width / 2.0,
            height / 2.0,
            &TextStyle::centered(DEFAULT_FONT),
        );

        if self.state == PlayState::Paused {
            let viewport = Viewport::new(width, height);
            let debug = self.config.debug;
            let modal = self.modal_for(viewport);
            draw_modal(ctx, viewport, &modal.spec, &ModalStyle::default(), debug);
        }
    }

    fn on_click(&mut self, x: f64, y: f64) -> Transition {
        if self.state != PlayState::Paused {
            return Transition::Stay;
        }
        let event = self
            .modal
            .as_ref()
            .and_then(|m| m.buttons.action_at(Point::new(x, y)));
        match event {
            Some(event) => self.handle(event),
            None => Transition::Stay,
        }
    }

    fn on_key_down(&mut self, key: &Key) -> Transition {
        match key {
            Key::Escape => self.handle(GameEvent::Escape),
            _ => Transition::Stay,
        }
    }

    fn on_resize(&mut self, width: f64, height: f64) {
        if self.state == PlayState::Paused || self.modal.is_some() {
            self.modal_for(Viewport::new(width, height));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use easel_protocol::{CommandList, RenderCommand};

    fn paused_at(width: f64, height: f64) -> GameScene {
        let mut scene = GameScene::new(EngineConfig::default());
        let _ = scene.on_key_down(&Key::Escape);
        scene.render(&mut CommandList::new(), width, height);
        scene
    }

    fn frame_of(scene: &GameScene, id: &str) -> Option<Rect> {
        scene
            .modal_buttons()
            .and_then(|p| p.get(id))
            .map(|c| c.frame)
    }

    #[test]
    fn step_table() {
        use GameEvent::*;
        use PlayState::*;
        assert_eq!(Running.step(Escape), Step::Enter(Paused));
        assert_eq!(Paused.step(Continue), Step::Enter(Running));
        assert_eq!(Paused.step(Restart), Step::Restart);
        assert_eq!(Paused.step(Exit), Step::Exit);
        assert_eq!(Paused.step(Escape), Step::Enter(Paused));
        for event in [Continue, Restart, Exit] {
            assert_eq!(Running.step(event), Step::Enter(Running));
        }
    }

    #[test]
    fn starts_running() {
        let scene = GameScene::new(EngineConfig::default());
        assert_eq!(scene.state(), PlayState::Running);
        assert!(scene.modal_buttons().is_none());
    }

    #[test]
    fn escape_pauses_and_places_buttons_in_box() {
        let scene = paused_at(800.0, 600.0);
        assert_eq!(scene.state(), PlayState::Paused);
        assert_eq!(scene.modal_bounds(), Some(Rect::new(260.0, 200.0, 280.0, 200.0)));
        assert_eq!(frame_of(&scene, "continue"), Some(Rect::new(300.0, 260.0, 200.0, 40.0)));
        assert_eq!(frame_of(&scene, "restart"), Some(Rect::new(300.0, 310.0, 200.0, 40.0)));
        assert_eq!(frame_of(&scene, "exit"), Some(Rect::new(300.0, 360.0, 200.0, 40.0)));
    }

    #[test]
    fn running_clicks_are_suppressed() {
        let mut scene = GameScene::new(EngineConfig::default());
        scene.render(&mut CommandList::new(), 800.0, 600.0);
        assert!(matches!(scene.on_click(400.0, 280.0), Transition::Stay));
        assert_eq!(scene.state(), PlayState::Running);
    }

    #[test]
    fn paused_render_draws_gameplay_under_backdrop() {
        let mut scene = paused_at(800.0, 600.0);
        let mut ctx = CommandList::new();
        scene.render(&mut ctx, 800.0, 600.0);
        let cmds = ctx.commands();
        let title = cmds.iter().position(|c| {
            matches!(c, RenderCommand::FillText { text, .. } if &**text == TITLE)
        });
        let backdrop = cmds
            .iter()
            .position(|c| *c == RenderCommand::SetFillStyle(Color::rgba(0, 0, 0, 0.5)));
        assert!(matches!((title, backdrop), (Some(t), Some(b)) if t < b));
        assert!(cmds.contains(&RenderCommand::FillText {
            text: MODAL_TITLE.into(),
            x: 400.0,
            y: 216.0,
        }));
    }

    #[test]
    fn frame_counter_freezes_while_paused() {
        let mut scene = GameScene::new(EngineConfig::default());
        let mut ctx = CommandList::new();
        for _ in 0..3 {
            scene.render(&mut ctx, 800.0, 600.0);
        }
        let _ = scene.on_key_down(&Key::Escape);
        scene.render(&mut ctx, 800.0, 600.0);
        scene.render(&mut ctx, 800.0, 600.0);
        assert_eq!(scene.frames_played(), 3);

        assert!(matches!(scene.on_click(400.0, 280.0), Transition::Stay));
        assert_eq!(scene.state(), PlayState::Running);
        scene.render(&mut ctx, 800.0, 600.0);
        assert_eq!(scene.frames_played(), 4);
    }

    #[test]
    fn restart_and_exit_replace_scene() {
        let mut scene = paused_at(800.0, 600.0);
        assert!(matches!(
            scene.on_click(400.0, 330.0),
            Transition::Replace(AnyScene::Game(g)) if g.state() == PlayState::Running
        ));
        assert!(matches!(
            scene.on_click(300.0, 400.0),
            Transition::Replace(AnyScene::Start(_))
        ));
    }

    #[test]
    fn resize_while_paused_moves_modal() {
        let mut scene = paused_at(800.0, 600.0);
        scene.on_resize(400.0, 400.0);
        assert_eq!(scene.modal_bounds(), Some(Rect::new(60.0, 100.0, 280.0, 200.0)));
        assert_eq!(frame_of(&scene, "continue"), Some(Rect::new(100.0, 160.0, 200.0, 40.0)));
    }

    #[test]
    fn other_keys_do_nothing() {
        let mut scene = GameScene::new(EngineConfig::default());
        let _ = scene.on_key_down(&Key::Enter);
        let _ = scene.on_key_down(&Key::Character('p'));
        assert_eq!(scene.state(), PlayState::Running);
    }
}
