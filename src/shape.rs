use egui::{Pos2, Rect, pos2};

use crate::raster::Mask;
use crate::tool::ToolKind;

/// Geometry a tool produces for the current pointer position
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Path { points: Vec<Pos2> },
    Rectangle { rect: Rect },
    Circle { center: Pos2, radius: f32 },
    Triangle { vertices: [Pos2; 3] },
}

impl Shape {
    /// Build the preview shape for `tool`.
    ///
    /// Freehand tools use `path` (which already ends at `pointer`); shape
    /// tools span from `anchor` to `pointer`.
    pub fn for_tool(tool: ToolKind, anchor: Pos2, pointer: Pos2, path: &[Pos2]) -> Self {
        match tool {
            ToolKind::Brush | ToolKind::Eraser => Self::Path {
                points: path.to_vec(),
            },
            ToolKind::Rectangle => Self::Rectangle {
                rect: rectangle_between(anchor, pointer),
            },
            ToolKind::Circle => Self::Circle {
                center: anchor,
                radius: circle_radius(anchor, pointer),
            },
            ToolKind::Triangle => Self::Triangle {
                vertices: triangle_vertices(anchor, pointer),
            },
        }
    }

    /// Shapes without extent render as nothing
    pub fn is_degenerate(&self) -> bool {
        match self {
            Self::Path { points } => points.is_empty(),
            Self::Rectangle { rect } => rect.width() == 0.0 || rect.height() == 0.0,
            Self::Circle { radius, .. } => *radius <= 0.0,
            Self::Triangle { vertices } => vertices[0] == vertices[1],
        }
    }

    /// Closed shapes honor the fill toggle, paths are always stroked
    pub fn is_closed(&self) -> bool {
        !matches!(self, Self::Path { .. })
    }

    pub fn bounds(&self, stroke_width: f32) -> Rect {
        let half = stroke_width / 2.0;
        match self {
            Self::Path { points } => Rect::from_points(points).expand(half),
            Self::Rectangle { rect } => rect.expand(half),
            Self::Circle { center, radius } => {
                Rect::from_center_size(*center, egui::Vec2::splat(2.0 * (radius + half)))
            }
            Self::Triangle { vertices } => Rect::from_points(vertices).expand(half),
        }
    }

    /// Mark the pixels this shape covers.
    pub fn rasterize(&self, mask: &mut Mask, stroke_width: f32, filled: bool) {
        if self.is_degenerate() {
            return;
        }
        let filled = filled && self.is_closed();
        match self {
            Self::Path { points } => mask.stroke_polyline(points, stroke_width),
            Self::Rectangle { rect } if filled => mask.fill_rect(*rect),
            Self::Rectangle { rect } => mask.stroke_rect(*rect, stroke_width),
            Self::Circle { center, radius } if filled => mask.fill_circle(*center, *radius),
            Self::Circle { center, radius } => mask.stroke_circle(*center, *radius, stroke_width),
            Self::Triangle { vertices } if filled => mask.fill_polygon(vertices),
            Self::Triangle { vertices } => mask.stroke_polygon(vertices, stroke_width),
        }
    }
}

/// Rectangle with `anchor` and `pointer` as opposite corners, in any quadrant
pub fn rectangle_between(anchor: Pos2, pointer: Pos2) -> Rect {
    Rect::from_two_pos(anchor, pointer)
}

/// Euclidean distance from the anchor to the pointer
pub fn circle_radius(anchor: Pos2, pointer: Pos2) -> f32 {
    anchor.distance(pointer)
}

/// Isosceles triangle: anchor, apex at the pointer, and the base vertex
/// mirrored across the anchor's vertical line.
pub fn triangle_vertices(anchor: Pos2, pointer: Pos2) -> [Pos2; 3] {
    [anchor, pointer, pos2(2.0 * anchor.x - pointer.x, pointer.y)]
}
