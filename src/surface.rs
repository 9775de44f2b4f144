use egui::{Color32, ColorImage};
use image::{Rgba, RgbaImage};

use crate::error::SurfaceError;
use crate::raster::Mask;

/// Independent copy of a surface's pixels
#[derive(Clone, PartialEq)]
pub struct Snapshot {
    pixels: RgbaImage,
}

impl Snapshot {
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("dimensions", &self.pixels.dimensions())
            .finish()
    }
}

/// Fixed-size raster the user draws on
pub struct Surface {
    pixels: RgbaImage,
    background: Color32,
    /// Bumped on every mutation so views know when to re-upload
    revision: u64,
}

impl Surface {
    /// Create a surface painted with an opaque `background`.
    pub fn new(width: u32, height: u32, background: Color32) -> Self {
        let background = Color32::from_rgb(background.r(), background.g(), background.b());
        let mut surface = Self {
            pixels: RgbaImage::new(width, height),
            background,
            revision: 0,
        };
        surface.clear();
        surface
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn background(&self) -> Color32 {
        self.background
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color32> {
        self.pixels
            .get_pixel_checked(x, y)
            .map(|Rgba([r, g, b, a])| Color32::from_rgba_unmultiplied(*r, *g, *b, *a))
    }

    /// Reset every pixel to the background color.
    pub fn clear(&mut self) {
        let fill = to_rgba(self.background);
        for pixel in self.pixels.pixels_mut() {
            *pixel = fill;
        }
        self.touch();
    }

    /// Deep copy of the current pixels
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            pixels: self.pixels.clone(),
        }
    }

    /// Overwrite the surface with a snapshot taken from it earlier.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), SurfaceError> {
        if snapshot.dimensions() != self.pixels.dimensions() {
            return Err(SurfaceError::SnapshotMismatch {
                snapshot: snapshot.dimensions(),
                surface: self.pixels.dimensions(),
            });
        }
        self.pixels.clone_from(&snapshot.pixels);
        self.touch();
        Ok(())
    }

    /// Paint `color` over every pixel in `mask`.
    pub fn composite(&mut self, mask: &Mask, color: Color32) {
        let [r, g, b, a] = color.to_srgba_unmultiplied();
        let opaque = a == u8::MAX;
        for (x, y) in mask.covered_pixels() {
            let pixel = self.pixels.get_pixel_mut(x, y);
            *pixel = if opaque {
                Rgba([r, g, b, a])
            } else {
                blend_over(*pixel, [r, g, b, a])
            };
        }
        self.touch();
    }

    /// Pixels in the layout egui textures expect
    pub fn to_color_image(&self) -> ColorImage {
        ColorImage::from_rgba_unmultiplied(
            [self.width() as usize, self.height() as usize],
            self.pixels.as_raw(),
        )
    }

    pub fn as_rgba_image(&self) -> &RgbaImage {
        &self.pixels
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

fn to_rgba(color: Color32) -> Rgba<u8> {
    Rgba(color.to_srgba_unmultiplied())
}

/// Source-over in unmultiplied sRGB space
fn blend_over(dst: Rgba<u8>, src: [u8; 4]) -> Rgba<u8> {
    let src_a = src[3] as f32 / 255.0;
    let dst_a = dst.0[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let channel = |s: u8, d: u8| {
        let value = (s as f32 * src_a + d as f32 * dst_a * (1.0 - src_a)) / out_a;
        value.round().clamp(0.0, 255.0) as u8
    };
    Rgba([
        channel(src[0], dst.0[0]),
        channel(src[1], dst.0[1]),
        channel(src[2], dst.0[2]),
        (out_a * 255.0).round() as u8,
    ])
}
