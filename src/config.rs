use std::ops::RangeInclusive;
use std::path::PathBuf;

use egui::Color32;
use serde::{Deserialize, Serialize};

/// Application settings, persisted alongside the tool state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // settings added later fall back to their defaults
pub struct AppConfig {
    /// Blank canvas color, also painted by the eraser
    pub background: Color32,
    /// Swatches shown before the custom color picker
    pub palette: Vec<Color32>,
    pub default_color: Color32,
    pub default_brush_width: u32,
    pub min_brush_width: u32,
    pub max_brush_width: u32,
    /// 1..=100
    pub jpeg_quality: u8,
    /// Where native builds write exported images
    pub export_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            background: Color32::WHITE,
            palette: vec![
                Color32::WHITE,
                Color32::BLACK,
                Color32::from_rgb(0xE0, 0x20, 0x20),
                Color32::from_rgb(0x6C, 0xC6, 0x3C),
                Color32::from_rgb(0x4A, 0x98, 0xF7),
            ],
            default_color: Color32::BLACK,
            default_brush_width: 5,
            min_brush_width: 1,
            max_brush_width: 30,
            jpeg_quality: 90,
            export_dir: PathBuf::from("."),
        }
    }
}

impl AppConfig {
    /// Range offered by the width slider, never starting below one
    pub fn brush_width_range(&self) -> RangeInclusive<u32> {
        let min = self.min_brush_width.max(1);
        min..=self.max_brush_width.max(min)
    }

    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality.clamp(1, 100)
    }
}
