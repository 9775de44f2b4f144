use egui::{Color32, Pos2};

use crate::config::AppConfig;
use crate::error::ExportError;
use crate::export::{ExportedImage, Exporter};
use crate::raster::Mask;
use crate::session::{ActiveStroke, StrokeSession};
use crate::shape::Shape;
use crate::surface::Surface;
use crate::tool::{ToolKind, ToolState};

/// Input the host UI forwards to the controller.
///
/// Pointer positions are surface-local pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceEvent {
    SelectTool(ToolKind),
    SelectColor(Color32),
    SetWidth(i64),
    SetFill(bool),
    PointerDown(Pos2),
    PointerMove(Pos2),
    PointerUp,
    Clear,
    Export,
}

/// Owns the surface and turns input events into raster operations.
pub struct DrawingController {
    surface: Surface,
    tools: ToolState,
    session: StrokeSession,
    exporter: Exporter,
}

impl DrawingController {
    pub fn new(surface: Surface, tools: ToolState, exporter: Exporter) -> Self {
        Self {
            surface,
            tools,
            session: StrokeSession::Idle,
            exporter,
        }
    }

    /// Blank `width` x `height` surface using the configured background and defaults.
    pub fn with_config(width: u32, height: u32, config: &AppConfig) -> Self {
        log::debug!("Creating {}x{} drawing surface", width, height);
        Self::new(
            Surface::new(width, height, config.background),
            ToolState::new(config.default_color, config.default_brush_width),
            Exporter::new(config.jpeg_quality()),
        )
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    pub fn session(&self) -> &StrokeSession {
        &self.session
    }

    /// Replace every tool setting at once (e.g. restored from storage)
    pub fn set_tools(&mut self, tools: ToolState) {
        self.tools = tools;
    }

    /// Dispatch a single input event. Only `Export` produces an artifact.
    pub fn handle(&mut self, event: SurfaceEvent) -> Result<Option<ExportedImage>, ExportError> {
        match event {
            SurfaceEvent::SelectTool(tool) => self.select_tool(tool),
            SurfaceEvent::SelectColor(color) => self.select_color(color),
            SurfaceEvent::SetWidth(width) => self.set_brush_width(width),
            SurfaceEvent::SetFill(fill) => self.set_fill(fill),
            SurfaceEvent::PointerDown(pos) => self.pointer_down(pos),
            SurfaceEvent::PointerMove(pos) => self.pointer_move(pos),
            SurfaceEvent::PointerUp => self.pointer_up(),
            SurfaceEvent::Clear => self.clear(),
            SurfaceEvent::Export => return self.export().map(Some),
        }
        Ok(None)
    }

    pub fn select_tool(&mut self, tool: ToolKind) {
        log::info!("Tool selected: {}", tool);
        self.tools.set_tool(tool);
    }

    pub fn select_color(&mut self, color: Color32) {
        log::info!("Color selected: {:?}", color);
        self.tools.set_color(color);
    }

    pub fn set_brush_width(&mut self, width: i64) {
        self.tools.set_brush_width(width);
    }

    pub fn set_fill(&mut self, fill: bool) {
        self.tools.set_fill_enabled(fill);
    }

    /// `Idle -> Drawing`: remember the anchor and the pixels under the stroke.
    pub fn pointer_down(&mut self, pos: Pos2) {
        let stroke = ActiveStroke::new(
            pos,
            self.surface.snapshot(),
            self.tools.color(),
            self.tools.brush_width(),
        );
        log::debug!("Stroke started at {:?} with {}", pos, self.tools.tool());
        self.session.begin(stroke);
    }

    /// Erase the previous preview and draw the current tool's shape up to `pos`.
    /// Ignored while idle.
    pub fn pointer_move(&mut self, pos: Pos2) {
        let Some(stroke) = self.session.active_mut() else {
            return;
        };
        let tool = self.tools.tool();
        if tool.is_freehand() {
            stroke.extend_path(pos);
        }

        if let Err(err) = self.surface.restore(stroke.base()) {
            // The surface is never resized, so this only fires on a logic error
            log::error!("Dropping stroke: {}", err);
            self.session.end();
            return;
        }

        let shape = Shape::for_tool(tool, stroke.anchor(), pos, stroke.path());
        let color = match tool {
            ToolKind::Eraser => self.surface.background(),
            _ => stroke.color(),
        };
        let width = stroke.width() as f32;
        let mut mask = Mask::new(shape.bounds(width), self.surface.width(), self.surface.height());
        shape.rasterize(&mut mask, width, self.tools.fill_enabled());
        self.surface.composite(&mask, color);
    }

    /// `Drawing -> Idle`: the last preview stays on the surface as the result.
    pub fn pointer_up(&mut self) {
        if let Some(stroke) = self.session.end() {
            log::debug!("Stroke committed ({} points)", stroke.path().len());
        }
    }

    /// Repaint the background and abandon any stroke in progress, so a
    /// later move cannot bring back the pre-clear pixels.
    pub fn clear(&mut self) {
        if self.session.end().is_some() {
            log::debug!("Clear ended the stroke in progress");
        }
        self.surface.clear();
        log::info!("Surface cleared");
    }

    /// Encode the current pixels under a `<epoch-millis>.jpg` name.
    pub fn export(&mut self) -> Result<ExportedImage, ExportError> {
        self.exporter.export(self.surface.as_rgba_image())
    }
}
