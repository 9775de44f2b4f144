use crate::SketchApp;

pub fn central_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::drag());
            let canvas_rect = response.rect;

            // The surface keeps the size of the first frame's canvas
            app.ensure_surface(canvas_rect.size());

            app.input_mut().set_canvas_rect(canvas_rect);
            let events = app.input_mut().process_input(ctx, &response);
            for event in events {
                app.apply(event);
            }

            if let Some((texture_id, size)) = app.surface_texture(ctx) {
                painter.image(
                    texture_id,
                    egui::Rect::from_min_size(canvas_rect.min, size),
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }

            if app.controller().is_some_and(|controller| controller.session().is_drawing()) {
                ctx.set_cursor_icon(egui::CursorIcon::Crosshair);
            }
        });
}
