//! Integration test: drive a FrameController against a RecordingSurface and
//! check frame geometry, the per-tick command sequence, resize coalescing
//! and click routing.

use easel_core::layout::Placement;
use easel_core::scene::{AnyScene, StartAction, StartScene};
use easel_core::{Dispatch, EngineConfig, FrameController, Key, ResizeRequest};
use easel_protocol::{
    ClipRegion, Rect, RecordingSurface, RenderCommand, Surface, Transform, Viewport,
};

fn controller(config: EngineConfig) -> (FrameController, RecordingSurface) {
    let mut fc = FrameController::new(config).expect("valid config");
    let mut surface = RecordingSurface::new();
    fc.resize_now(&mut surface, Viewport::new(1280.0, 720.0), 1.0);
    fc.set_scene(AnyScene::Start(StartScene::new(config)));
    (fc, surface)
}

fn start_placement(fc: &FrameController) -> Placement<StartAction> {
    fc.stage()
        .active()
        .and_then(AnyScene::as_start)
        .and_then(StartScene::placement)
        .cloned()
        .expect("start scene is placed")
}

fn frames(placement: &Placement<StartAction>) -> Vec<Rect> {
    placement.components().iter().map(|c| c.frame).collect()
}

#[test]
fn frame_width_is_clamped_and_centered() {
    let mut fc = FrameController::new(EngineConfig::default()).expect("valid config");
    let mut surface = RecordingSurface::new();

    for (viewport_width, width, offset) in [
        (200.0, 320.0, -60.0),
        (800.0, 800.0, 0.0),
        (2000.0, 1080.0, 460.0),
        (1081.0, 1080.0, 0.0),
    ] {
        fc.resize_now(&mut surface, Viewport::new(viewport_width, 500.0), 1.0);
        let frame = fc.frame().expect("frame after resize");
        assert!((frame.width - width).abs() < f64::EPSILON, "{viewport_width}");
        assert!((frame.offset_x - offset).abs() < f64::EPSILON, "{viewport_width}");
        assert!((frame.height - 500.0).abs() < f64::EPSILON);
        assert!(frame.offset_y.abs() < f64::EPSILON);
    }
}

#[test]
fn tick_clears_translates_clips_then_restores() {
    let (mut fc, mut surface) = controller(EngineConfig::default());
    let _ = surface.take_commands();
    fc.tick(&mut surface);

    let cmds = surface.commands();
    assert_eq!(
        &cmds[..7],
        &[
            RenderCommand::Save,
            RenderCommand::SetTransform(Transform::IDENTITY),
            RenderCommand::ClearRect {
                rect: Rect::new(0.0, 0.0, 1280.0, 720.0)
            },
            RenderCommand::Restore,
            RenderCommand::Save,
            RenderCommand::Translate { x: 100.0, y: 0.0 },
            RenderCommand::Clip {
                region: ClipRegion::new(Rect::new(0.0, 0.0, 1080.0, 720.0))
            },
        ]
    );
    assert_eq!(cmds.last(), Some(&RenderCommand::Restore));
    assert_eq!(surface.recorder().save_depth(), 0);
    assert_eq!(surface.state().clip, None);
}

#[test]
fn debug_outline_sits_one_pixel_outside_frame() {
    let (mut fc, mut surface) = controller(EngineConfig::default().with_debug(true));
    fc.tick(&mut surface);
    let outline = RenderCommand::StrokeRect {
        rect: Rect::new(99.0, -1.0, 1082.0, 722.0),
    };
    assert_eq!(surface.commands().iter().rev().nth(1), Some(&outline));
}

#[test]
fn debug_overlay_does_not_move_components() {
    let (mut plain, mut a) = controller(EngineConfig::default());
    let (mut debug, mut b) = controller(EngineConfig::default().with_debug(true));
    plain.tick(&mut a);
    debug.tick(&mut b);
    assert_eq!(frames(&start_placement(&plain)), frames(&start_placement(&debug)));
}

#[test]
fn resize_is_idempotent() {
    let (mut fc, mut surface) = controller(EngineConfig::default());
    fc.resize_now(&mut surface, Viewport::new(1280.0, 720.0), 2.0);
    let first = frames(&start_placement(&fc));
    fc.resize_now(&mut surface, Viewport::new(1280.0, 720.0), 2.0);
    let second = frames(&start_placement(&fc));

    assert_eq!(first, second);
    assert_eq!(surface.state().transform, Transform::scaling(2.0, 2.0));
    assert_eq!(surface.backing_store_size(), (2560, 1440));
}

#[test]
fn consecutive_ticks_repeat_the_same_picture() {
    let (mut fc, mut surface) = controller(EngineConfig::default());
    fc.tick(&mut surface);
    let _ = surface.take_commands();
    fc.tick(&mut surface);
    let first = surface.take_commands();
    fc.tick(&mut surface);
    assert_eq!(first, surface.take_commands());
}

#[test]
fn resize_burst_is_applied_once_before_render() {
    let (mut fc, mut surface) = controller(EngineConfig::default());
    let resizes = surface.resize_count();

    assert_eq!(
        fc.request_resize(Viewport::new(640.0, 480.0), 1.0),
        ResizeRequest::Scheduled
    );
    for w in [700.0, 750.0, 800.0] {
        assert_eq!(
            fc.request_resize(Viewport::new(w, 480.0), 1.0),
            ResizeRequest::Coalesced
        );
    }
    assert!(fc.has_pending_resize());
    fc.tick(&mut surface);

    assert_eq!(surface.resize_count(), resizes + 1);
    assert!(!fc.has_pending_resize());
    assert_eq!(start_placement(&fc).viewport(), Viewport::new(800.0, 480.0));
    assert_eq!(
        surface.commands().first(),
        Some(&RenderCommand::SetTransform(Transform::IDENTITY))
    );
}

#[test]
fn clicks_outside_frame_are_dropped() {
    let (mut fc, mut surface) = controller(EngineConfig::default());
    fc.tick(&mut surface);
    assert_eq!(fc.click(99.0, 300.0), Dispatch::Ignored);
    assert_eq!(fc.click(1181.0, 300.0), Dispatch::Ignored);
    assert_eq!(fc.click(640.0, 721.0), Dispatch::Ignored);
    assert_eq!(fc.click(100.0, 0.0), Dispatch::Handled);
    assert_eq!(fc.click(1180.0, 720.0), Dispatch::Handled);
    assert_eq!(fc.key_down(&Key::Enter), Dispatch::Handled);
}

#[test]
fn svg_snapshot_of_a_tick() {
    let (mut fc, mut surface) = controller(EngineConfig::default());
    fc.tick(&mut surface);
    let (w, h) = surface.backing_store_size();
    let svg = easel_core::svg::render_svg(surface.commands(), f64::from(w), f64::from(h));
    assert!(svg.contains(">Game Title</text>"));
    assert!(svg.contains(">Start</text>"));
    assert!(svg.contains("<clipPath"));
}
