use std::fmt;
use std::str::FromStr;

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::ToolError;

/// The drawing tools offered in the tools panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Brush,
    Eraser,
    Rectangle,
    Circle,
    Triangle,
}

impl ToolKind {
    pub const ALL: [ToolKind; 5] = [
        ToolKind::Brush,
        ToolKind::Eraser,
        ToolKind::Rectangle,
        ToolKind::Circle,
        ToolKind::Triangle,
    ];

    /// Stable id of the tool control
    pub fn id(self) -> &'static str {
        match self {
            Self::Brush => "brush",
            Self::Eraser => "eraser",
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Triangle => "triangle",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Brush => "🖌 Brush",
            Self::Eraser => "⌫ Eraser",
            Self::Rectangle => "▭ Rectangle",
            Self::Circle => "○ Circle",
            Self::Triangle => "△ Triangle",
        }
    }

    /// Freehand tools follow the pointer path instead of spanning from the anchor
    pub fn is_freehand(self) -> bool {
        matches!(self, Self::Brush | Self::Eraser)
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ToolKind {
    type Err = ToolError;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.id() == id)
            .ok_or_else(|| ToolError::UnknownTool(id.to_owned()))
    }
}

/// Settings chosen in the tools panel, read by every stroke
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolState {
    tool: ToolKind,
    color: Color32,
    brush_width: u32,
    fill_enabled: bool,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            tool: ToolKind::Brush,
            color: Color32::BLACK,
            brush_width: 5,
            fill_enabled: false,
        }
    }
}

impl ToolState {
    pub fn new(color: Color32, brush_width: u32) -> Self {
        Self {
            color,
            brush_width: brush_width.max(1),
            ..Self::default()
        }
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tool = tool;
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn set_color(&mut self, color: Color32) {
        self.color = color;
    }

    pub fn brush_width(&self) -> u32 {
        self.brush_width
    }

    /// Set the stroke width. Values below one are clamped to one.
    pub fn set_brush_width(&mut self, width: i64) {
        if width < 1 {
            log::warn!("Brush width {} is not positive, using 1", width);
        }
        self.brush_width = width.clamp(1, i64::from(u32::MAX)) as u32;
    }

    pub fn fill_enabled(&self) -> bool {
        self.fill_enabled
    }

    pub fn set_fill_enabled(&mut self, fill_enabled: bool) {
        self.fill_enabled = fill_enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_ids_parse_back() {
        for tool in ToolKind::ALL {
            assert_eq!(tool.id().parse::<ToolKind>(), Ok(tool));
        }
    }

    #[test]
    fn test_unknown_tool_id() {
        assert_eq!(
            "lasso".parse::<ToolKind>(),
            Err(ToolError::UnknownTool("lasso".to_owned()))
        );
    }

    #[test]
    fn test_width_is_clamped_positive() {
        let mut state = ToolState::default();
        state.set_brush_width(12);
        assert_eq!(state.brush_width(), 12);

        state.set_brush_width(0);
        assert_eq!(state.brush_width(), 1);

        state.set_brush_width(-7);
        assert_eq!(state.brush_width(), 1);
    }

    #[test]
    fn test_new_never_stores_zero_width() {
        assert_eq!(ToolState::new(Color32::RED, 0).brush_width(), 1);
    }
}
