use easel_protocol::{DrawContext, Point, Viewport};

use crate::config::EngineConfig;
use crate::layout::{Component, Placement, Size, StackOptions, VerticalStack, Visual};
use crate::primitives::{ButtonStyle, TextStyle};
use crate::scene::{AnyScene, GameScene, Scene, Transition};

const TITLE: &str = "Game Title";
const TITLE_FONT: &str = "28px system-ui, sans-serif";
const START_LABEL: &str = "Start";
const ITEM_SIZE: Size = Size { w: 280.0, h: 56.0 };
const ITEM_GAP: f64 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartAction {
    Start,
}

/// Title screen: a title and a start button stacked in the middle of the
/// frame. Clicking the button replaces it with a fresh [`GameScene`].
#[derive(Debug)]
pub struct StartScene {
    config: EngineConfig,
    layout: VerticalStack,
    components: Vec<Component<StartAction>>,
    placement: Option<Placement<StartAction>>,
}

impl StartScene {
    pub fn new(config: EngineConfig) -> Self {
        let layout = VerticalStack::new(
            StackOptions::new(ITEM_SIZE)
                .gap(ITEM_GAP)
                .debug(config.debug),
        );
        let components = vec![
            Component::new("title", Visual::text(TITLE, TextStyle::centered(TITLE_FONT))),
            Component::new("start", Visual::button(START_LABEL, ButtonStyle::default()))
                .on_click(StartAction::Start),
        ];
        Self {
            config,
            layout,
            components,
            placement: None,
        }
    }

    /// Most recent layout result, if any has been computed.
    pub fn placement(&self) -> Option<&Placement<StartAction>> {
        self.placement.as_ref()
    }

    fn relayout(&mut self, viewport: Viewport) -> &Placement<StartAction> {
        if !self.placement.as_ref().is_some_and(|p| p.is_valid_for(viewport)) {
            tracing::trace!(width = viewport.width, height = viewport.height, "start layout");
            self.placement = None;
        }
        self.placement
            .get_or_insert_with(|| Placement::compute(&self.layout, &self.components, viewport))
    }
}

impl Scene for StartScene {
    fn name(&self) -> &'static str {
        "start"
    }

    fn render(&mut self, ctx: &mut dyn DrawContext, width: f64, height: f64) {
        self.relayout(Viewport::new(width, height)).render(ctx);
    }

    fn on_click(&mut self, x: f64, y: f64) -> Transition {
        let action = self
            .placement
            .as_ref()
            .and_then(|p| p.action_at(Point::new(x, y)));
        match action {
            Some(StartAction::Start) => {
                Transition::Replace(AnyScene::Game(GameScene::new(self.config)))
            }
            None => Transition::Stay,
        }
    }

    fn on_resize(&mut self, width: f64, height: f64) {
        self.relayout(Viewport::new(width, height));
    }
}
