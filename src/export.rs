use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, RgbaImage};

use crate::error::ExportError;
use crate::util::time::current_time_millis;

pub const EXPORT_EXTENSION: &str = "jpg";

/// How long a download's object URL outlives the click that starts it.
/// Browsers fetch the blob asynchronously, so revoking right away can cancel it.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
const DOWNLOAD_URL_LIFETIME_MS: i32 = 10_000;

/// An encoded copy of the surface, ready to be saved
#[derive(Debug, Clone)]
pub struct ExportedImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Names and encodes exports, keeping timestamps from going backwards.
#[derive(Debug, Clone)]
pub struct Exporter {
    quality: u8,
    last_stamp: u64,
}

impl Exporter {
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
            last_stamp: 0,
        }
    }

    /// Next `<epoch-millis>.jpg` name, never older than the previous one
    pub fn next_file_name(&mut self) -> String {
        self.file_name_at(current_time_millis())
    }

    fn file_name_at(&mut self, millis: u64) -> String {
        self.last_stamp = self.last_stamp.max(millis);
        format!("{}.{}", self.last_stamp, EXPORT_EXTENSION)
    }

    /// Encode `pixels` as a JPEG under a fresh timestamped name.
    pub fn export(&mut self, pixels: &RgbaImage) -> Result<ExportedImage, ExportError> {
        let bytes = encode_jpeg(pixels, self.quality)?;
        let file_name = self.next_file_name();
        log::info!(
            "Exported {}x{} surface as {} ({} bytes)",
            pixels.width(),
            pixels.height(),
            file_name,
            bytes.len()
        );
        Ok(ExportedImage {
            file_name,
            bytes,
            width: pixels.width(),
            height: pixels.height(),
        })
    }
}

/// JPEG has no alpha channel, so pixels are flattened to RGB first.
pub fn encode_jpeg(pixels: &RgbaImage, quality: u8) -> Result<Vec<u8>, ExportError> {
    let rgb = DynamicImage::ImageRgba8(pixels.clone()).into_rgb8();
    let mut bytes = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut bytes, quality).encode_image(&rgb)?;
    Ok(bytes.into_inner())
}

/// Write the export into `dir`, returning the full path.
#[cfg(not(target_arch = "wasm32"))]
pub fn save_to_dir(
    image: &ExportedImage,
    dir: &std::path::Path,
) -> Result<std::path::PathBuf, ExportError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(&image.file_name);
    std::fs::write(&path, &image.bytes)?;
    log::info!("Saved {}", path.display());
    Ok(path)
}

/// Hand the export to the browser as a file download.
#[cfg(target_arch = "wasm32")]
pub fn download(image: &ExportedImage) -> Result<(), ExportError> {
    use wasm_bindgen::JsCast;

    let js_err = |err: wasm_bindgen::JsValue| ExportError::Platform(format!("{:?}", err));

    let window = web_sys::window().ok_or_else(|| ExportError::Platform("No window available".to_owned()))?;
    let document = window
        .document()
        .ok_or_else(|| ExportError::Platform("No document available".to_owned()))?;

    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(image.bytes.as_slice()));
    let blob = web_sys::Blob::new_with_u8_array_sequence(&parts).map_err(js_err)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_err)?;

    let anchor = document
        .create_element("a")
        .map_err(js_err)?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| ExportError::Platform("Created element is not an anchor".to_owned()))?;
    anchor.set_href(&url);
    anchor.set_download(&image.file_name);
    anchor.click();

    let revoke = wasm_bindgen::closure::Closure::once_into_js(move || {
        if let Err(err) = web_sys::Url::revoke_object_url(&url) {
            log::warn!("Could not revoke download URL: {:?}", err);
        }
    });
    window
        .set_timeout_with_callback_and_timeout_and_arguments_0(revoke.unchecked_ref(), DOWNLOAD_URL_LIFETIME_MS)
        .map_err(js_err)?;
    log::info!("Downloaded {}", image.file_name);
    Ok(())
}
