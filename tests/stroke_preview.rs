use egui::{Color32, Pos2, pos2};
use sketchpad::{AppConfig, DrawingController, SurfaceEvent, ToolKind};

fn controller() -> DrawingController {
    DrawingController::with_config(80, 60, &AppConfig::default())
}

fn drag(controller: &mut DrawingController, from: Pos2, through: &[Pos2]) {
    controller.handle(SurfaceEvent::PointerDown(from)).unwrap();
    for &pos in through {
        controller.handle(SurfaceEvent::PointerMove(pos)).unwrap();
    }
    controller.handle(SurfaceEvent::PointerUp).unwrap();
}

fn is_blank(controller: &DrawingController) -> bool {
    let surface = controller.surface();
    (0..surface.height()).all(|y| (0..surface.width()).all(|x| surface.pixel(x, y) == Some(surface.background())))
}

#[test]
fn test_moves_do_not_accumulate_previews() {
    let mut wobbly = controller();
    wobbly.select_tool(ToolKind::Circle);
    drag(
        &mut wobbly,
        pos2(40.0, 30.0),
        &[pos2(60.0, 30.0), pos2(52.0, 30.0), pos2(44.0, 30.0)],
    );

    let mut direct = controller();
    direct.select_tool(ToolKind::Circle);
    drag(&mut direct, pos2(40.0, 30.0), &[pos2(44.0, 30.0)]);

    assert!(wobbly.surface().as_rgba_image() == direct.surface().as_rgba_image());
    // The radius 20 preview is gone
    assert_eq!(wobbly.surface().pixel(59, 30), Some(Color32::WHITE));
}

#[test]
fn test_preview_keeps_committed_pixels() {
    let mut controller = controller();
    controller.select_color(Color32::RED);
    controller.set_brush_width(4);
    drag(&mut controller, pos2(5.0, 5.0), &[pos2(75.0, 5.0)]);

    controller.select_tool(ToolKind::Rectangle);
    controller.select_color(Color32::BLUE);
    controller.set_fill(true);
    drag(
        &mut controller,
        pos2(10.0, 20.0),
        &[pos2(70.0, 55.0), pos2(30.0, 40.0)],
    );

    assert_eq!(controller.surface().pixel(40, 5), Some(Color32::RED));
    assert_eq!(controller.surface().pixel(20, 30), Some(Color32::BLUE));
    assert_eq!(controller.surface().pixel(60, 50), Some(Color32::WHITE));
}

#[test]
fn test_same_input_gives_same_raster() {
    let script = |controller: &mut DrawingController| {
        controller.select_tool(ToolKind::Triangle);
        controller.set_brush_width(3);
        drag(controller, pos2(40.0, 50.0), &[pos2(55.0, 10.0), pos2(50.0, 15.0)]);
        controller.select_tool(ToolKind::Brush);
        drag(controller, pos2(5.0, 5.0), &[pos2(20.0, 30.0), pos2(35.0, 8.0)]);
    };

    let mut first = controller();
    let mut second = controller();
    script(&mut first);
    script(&mut second);
    assert!(first.surface().as_rgba_image() == second.surface().as_rgba_image());
}

#[test]
fn test_click_without_move_changes_nothing() {
    let mut controller = controller();
    drag(&mut controller, pos2(10.0, 10.0), &[pos2(30.0, 30.0)]);
    let before = controller.surface().as_rgba_image().clone();

    drag(&mut controller, pos2(30.0, 30.0), &[]);
    assert!(*controller.surface().as_rgba_image() == before);
    assert!(!controller.session().is_drawing());
}

#[test]
fn test_eraser_restores_background_exactly() {
    let mut controller = controller();
    let path = [pos2(30.0, 30.0), pos2(50.0, 20.0), pos2(70.0, 40.0)];

    controller.select_color(Color32::from_rgb(0x4A, 0x98, 0xF7));
    controller.set_brush_width(6);
    drag(&mut controller, pos2(10.0, 30.0), &path);
    assert!(!is_blank(&controller));

    controller.select_tool(ToolKind::Eraser);
    drag(&mut controller, pos2(10.0, 30.0), &path);
    assert!(is_blank(&controller));
}

#[test]
fn test_eraser_uses_configured_background() {
    let config = AppConfig {
        background: Color32::BLACK,
        default_color: Color32::WHITE,
        ..AppConfig::default()
    };
    let mut controller = DrawingController::with_config(40, 40, &config);
    drag(&mut controller, pos2(5.0, 20.0), &[pos2(35.0, 20.0)]);
    assert_eq!(controller.surface().pixel(20, 20), Some(Color32::WHITE));

    controller.select_tool(ToolKind::Eraser);
    drag(&mut controller, pos2(5.0, 20.0), &[pos2(35.0, 20.0)]);
    assert_eq!(controller.surface().pixel(20, 20), Some(Color32::BLACK));
}

#[test]
fn test_move_without_stroke_is_ignored() {
    let mut controller = controller();
    controller.handle(SurfaceEvent::PointerMove(pos2(20.0, 20.0))).unwrap();
    controller.handle(SurfaceEvent::PointerUp).unwrap();
    assert!(is_blank(&controller));
}
