use egui::{Color32, Vec2};

use crate::config::AppConfig;
use crate::controller::{DrawingController, SurfaceEvent};
use crate::error::ExportError;
use crate::export::ExportedImage;
use crate::input::InputHandler;
use crate::panels::{central_panel, tools_panel};
use crate::texture::SurfaceTexture;
use crate::tool::ToolState;

/// We derive Deserialize/Serialize so tool settings survive a restart.
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct SketchApp {
    config: AppConfig,
    /// Settings used until the surface exists, and the copy that gets persisted
    tools: ToolState,
    /// Color last chosen with the custom picker swatch
    custom_color: Color32,
    // Created on the first frame, once the canvas size is known
    #[serde(skip)]
    controller: Option<DrawingController>,
    #[serde(skip)]
    input: InputHandler,
    #[serde(skip)]
    texture: SurfaceTexture,
    #[serde(skip)]
    status: Option<String>,
}

impl Default for SketchApp {
    fn default() -> Self {
        Self::with_config(AppConfig::default())
    }
}

impl SketchApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        if let Some(storage) = cc.storage {
            if let Some(app) = eframe::get_value::<Self>(storage, eframe::APP_KEY) {
                log::info!("Restored settings from storage");
                return app;
            }
        }
        Self::default()
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self {
            tools: ToolState::new(config.default_color, config.default_brush_width),
            custom_color: Color32::from_rgb(0xFF, 0xA5, 0x00),
            config,
            controller: None,
            input: InputHandler::new(),
            texture: SurfaceTexture::new(),
            status: None,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Settings currently in effect
    pub fn tool_state(&self) -> &ToolState {
        match &self.controller {
            Some(controller) => controller.tools(),
            None => &self.tools,
        }
    }

    pub fn controller(&self) -> Option<&DrawingController> {
        self.controller.as_ref()
    }

    pub fn custom_color(&self) -> Color32 {
        self.custom_color
    }

    pub fn custom_color_mut(&mut self) -> &mut Color32 {
        &mut self.custom_color
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn input_mut(&mut self) -> &mut InputHandler {
        &mut self.input
    }

    /// Size the surface to the canvas area. Only the first call has an effect.
    ///
    /// `size` is in egui points, not physical pixels: one surface pixel per
    /// point, like a CSS-pixel canvas. On HiDPI screens the texture is scaled
    /// up with nearest filtering.
    pub fn ensure_surface(&mut self, size: Vec2) {
        if self.controller.is_some() {
            return;
        }
        let width = size.x.max(0.0).floor() as u32;
        let height = size.y.max(0.0).floor() as u32;
        let mut controller = DrawingController::with_config(width, height, &self.config);
        controller.set_tools(self.tools.clone());
        log::info!("Drawing surface sized to {}x{}", width, height);
        self.controller = Some(controller);
    }

    /// Texture for the central panel, uploading pixels if they changed
    pub fn surface_texture(&mut self, ctx: &egui::Context) -> Option<(egui::TextureId, Vec2)> {
        let controller = self.controller.as_ref()?;
        let surface = controller.surface();
        let size = Vec2::new(surface.width() as f32, surface.height() as f32);
        Some((self.texture.texture_id(ctx, surface), size))
    }

    /// Route one event to the controller, or to the pending settings
    /// before the surface exists.
    pub fn apply(&mut self, event: SurfaceEvent) {
        let Some(controller) = &mut self.controller else {
            match event {
                SurfaceEvent::SelectTool(tool) => self.tools.set_tool(tool),
                SurfaceEvent::SelectColor(color) => self.tools.set_color(color),
                SurfaceEvent::SetWidth(width) => self.tools.set_brush_width(width),
                SurfaceEvent::SetFill(fill) => self.tools.set_fill_enabled(fill),
                _ => log::debug!("Ignoring {:?} before the surface exists", event),
            }
            return;
        };

        match controller.handle(event) {
            Ok(Some(image)) => self.status = Some(self.deliver(&image)),
            Ok(None) => {}
            Err(err) => {
                log::error!("Export failed: {}", err);
                self.status = Some(format!("Export failed: {}", err));
            }
        }
    }

    fn deliver(&self, image: &ExportedImage) -> String {
        match self.save_export(image) {
            Ok(message) => message,
            Err(err) => {
                log::error!("Could not save {}: {}", image.file_name, err);
                format!("Could not save {}: {}", image.file_name, err)
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn save_export(&self, image: &ExportedImage) -> Result<String, ExportError> {
        let path = crate::export::save_to_dir(image, &self.config.export_dir)?;
        Ok(format!("Saved {}", path.display()))
    }

    #[cfg(target_arch = "wasm32")]
    fn save_export(&self, image: &ExportedImage) -> Result<String, ExportError> {
        crate::export::download(image)?;
        Ok(format!("Downloaded {}", image.file_name))
    }
}

impl eframe::App for SketchApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        if let Some(controller) = &self.controller {
            self.tools = controller.tools().clone();
        }
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        tools_panel(self, ctx);
        central_panel(self, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::ToolKind;

    #[test]
    fn test_settings_before_surface_are_kept() {
        let mut app = SketchApp::default();
        app.apply(SurfaceEvent::SelectTool(ToolKind::Triangle));
        app.apply(SurfaceEvent::SetWidth(12));
        app.apply(SurfaceEvent::PointerDown(egui::pos2(1.0, 1.0)));

        app.ensure_surface(Vec2::new(40.0, 30.0));
        let controller = app.controller().unwrap();
        assert_eq!(controller.tools().tool(), ToolKind::Triangle);
        assert_eq!(controller.tools().brush_width(), 12);
        assert!(!controller.session().is_drawing());
    }

    #[test]
    fn test_surface_is_sized_once() {
        let mut app = SketchApp::default();
        app.ensure_surface(Vec2::new(40.5, 30.9));
        app.ensure_surface(Vec2::new(200.0, 200.0));
        let surface = app.controller().unwrap().surface();
        assert_eq!((surface.width(), surface.height()), (40, 30));
    }

    #[test]
    fn test_surface_texture_matches_canvas_points() {
        let ctx = egui::Context::default();
        ctx.set_pixels_per_point(2.0);
        let mut app = SketchApp::default();
        app.ensure_surface(Vec2::new(120.0, 90.0));

        let (_, size) = app.surface_texture(&ctx).unwrap();
        assert_eq!(size, Vec2::new(120.0, 90.0));
        let surface = app.controller().unwrap().surface();
        assert_eq!((surface.width(), surface.height()), (120, 90));
    }
}
