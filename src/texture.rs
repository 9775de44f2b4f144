use egui::{Context, TextureHandle, TextureId, TextureOptions};

use crate::surface::Surface;

/// GPU copy of the surface, re-uploaded only when the surface revision changes
#[derive(Default)]
pub struct SurfaceTexture {
    handle: Option<TextureHandle>,
    revision: Option<u64>,
}

impl SurfaceTexture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texture showing the current surface pixels
    pub fn texture_id(&mut self, ctx: &Context, surface: &Surface) -> TextureId {
        let stale = self.needs_upload(surface);
        self.revision = Some(surface.revision());
        if let Some(handle) = &mut self.handle {
            if stale {
                handle.set(surface.to_color_image(), TextureOptions::NEAREST);
            }
            return handle.id();
        }

        let handle = ctx.load_texture("drawing_surface", surface.to_color_image(), TextureOptions::NEAREST);
        let id = handle.id();
        self.handle = Some(handle);
        id
    }

    fn needs_upload(&self, surface: &Surface) -> bool {
        self.handle.is_none() || self.revision != Some(surface.revision())
    }
}
