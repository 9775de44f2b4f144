use crate::SketchApp;
use crate::components::{ColorSwatch, ToolButton};
use crate::controller::SurfaceEvent;
use crate::tool::ToolKind;

pub fn tools_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(false)
        .default_width(180.0)
        .show(ctx, |ui| {
            let mut events = Vec::new();
            let state = app.tool_state().clone();

            ui.heading("Shapes");
            ui.horizontal_wrapped(|ui| {
                for tool in [ToolKind::Rectangle, ToolKind::Circle, ToolKind::Triangle] {
                    if ToolButton::new(tool, state.tool() == tool).show(ui).clicked() {
                        events.push(SurfaceEvent::SelectTool(tool));
                    }
                }
            });
            let mut fill = state.fill_enabled();
            if ui.checkbox(&mut fill, "Fill color").changed() {
                events.push(SurfaceEvent::SetFill(fill));
            }

            ui.separator();
            ui.heading("Options");
            ui.horizontal(|ui| {
                for tool in [ToolKind::Brush, ToolKind::Eraser] {
                    if ToolButton::new(tool, state.tool() == tool).show(ui).clicked() {
                        events.push(SurfaceEvent::SelectTool(tool));
                    }
                }
            });
            let mut width = state.brush_width();
            let slider = egui::Slider::new(&mut width, app.config().brush_width_range()).text("Size");
            if ui.add(slider).changed() {
                events.push(SurfaceEvent::SetWidth(i64::from(width)));
            }

            ui.separator();
            ui.heading("Colors");
            let palette = app.config().palette.clone();
            let on_palette = palette.contains(&state.color());
            ui.horizontal_wrapped(|ui| {
                for color in palette {
                    if ColorSwatch::new(color, state.color() == color).show(ui).clicked() {
                        events.push(SurfaceEvent::SelectColor(color));
                    }
                }

                // The custom picker acts as the last swatch
                let custom = app.custom_color();
                let custom_selected = !on_palette && state.color() == custom;
                if ColorSwatch::new(custom, custom_selected).show(ui).clicked() {
                    events.push(SurfaceEvent::SelectColor(custom));
                }
                if egui::color_picker::color_edit_button_srgba(
                    ui,
                    app.custom_color_mut(),
                    egui::color_picker::Alpha::Opaque,
                )
                .changed()
                {
                    events.push(SurfaceEvent::SelectColor(app.custom_color()));
                }
            });

            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("Clear Canvas").clicked() {
                    events.push(SurfaceEvent::Clear);
                }
                if ui.button("Save As Image").clicked() {
                    events.push(SurfaceEvent::Export);
                }
            });

            for event in events {
                app.apply(event);
            }

            if let Some(controller) = app.controller() {
                ui.separator();
                ui.label(format!("(State: {})", controller.session().state_name()));
            }
            if let Some(status) = app.status() {
                ui.separator();
                ui.label(status);
            }
        });
}
