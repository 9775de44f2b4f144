//! Binary coverage rasterization.
//!
//! Every primitive marks pixels into a [`Mask`] by testing the pixel center
//! (`x + 0.5`, `y + 0.5`). A shape is marked completely before it is painted,
//! so overlapping parts of one shape are composited only once.

use egui::{Pos2, Rect, pos2};

/// Pixels covered by a shape, clipped to the surface it will be painted on.
#[derive(Debug, Clone)]
pub struct Mask {
    x0: u32,
    y0: u32,
    width: u32,
    height: u32,
    covered: Vec<bool>,
}

impl Mask {
    /// Create an empty mask for the part of `bounds` that overlaps a
    /// `surface_width` x `surface_height` surface.
    pub fn new(bounds: Rect, surface_width: u32, surface_height: u32) -> Self {
        let clip = |lo: f32, hi: f32, limit: u32| -> (u32, u32) {
            if lo.is_nan() || hi.is_nan() || lo >= hi || hi <= 0.0 || lo >= limit as f32 {
                return (0, 0);
            }
            let start = lo.floor().max(0.0) as u32;
            let end = (hi.ceil() as u32).min(limit);
            (start, end.saturating_sub(start))
        };
        let (x0, width) = clip(bounds.min.x, bounds.max.x, surface_width);
        let (y0, height) = clip(bounds.min.y, bounds.max.y, surface_height);
        Self {
            x0,
            y0,
            width,
            height,
            covered: vec![false; (width as usize) * (height as usize)],
        }
    }

    /// Mark every pixel inside `bounds` whose center satisfies `inside`.
    fn mark_where(&mut self, bounds: Rect, inside: impl Fn(Pos2) -> bool) {
        if self.covered.is_empty() || bounds.is_negative() || bounds.any_nan() {
            return;
        }
        let x_start = (bounds.min.x.floor().max(0.0) as u32).max(self.x0);
        let y_start = (bounds.min.y.floor().max(0.0) as u32).max(self.y0);
        let x_end = (bounds.max.x.ceil().max(0.0) as u32).min(self.x0 + self.width);
        let y_end = (bounds.max.y.ceil().max(0.0) as u32).min(self.y0 + self.height);

        for y in y_start..y_end {
            let row = ((y - self.y0) * self.width) as usize;
            for x in x_start..x_end {
                if inside(pos2(x as f32 + 0.5, y as f32 + 0.5)) {
                    self.covered[row + (x - self.x0) as usize] = true;
                }
            }
        }
    }

    pub fn is_covered(&self, x: u32, y: u32) -> bool {
        if x < self.x0 || y < self.y0 || x >= self.x0 + self.width || y >= self.y0 + self.height {
            return false;
        }
        self.covered[((y - self.y0) * self.width + (x - self.x0)) as usize]
    }

    /// Surface coordinates of every covered pixel, row by row
    pub fn covered_pixels(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.covered
            .iter()
            .enumerate()
            .filter(|(_, covered)| **covered)
            .map(move |(index, _)| {
                let index = index as u32;
                (self.x0 + index % self.width, self.y0 + index / self.width)
            })
    }

    pub fn is_empty(&self) -> bool {
        !self.covered.iter().any(|covered| *covered)
    }

    /// Thick segment with round ends.
    pub fn stroke_segment(&mut self, a: Pos2, b: Pos2, width: f32) {
        let half = width / 2.0;
        let bounds = Rect::from_two_pos(a, b).expand(half);
        let half_sq = half * half;
        self.mark_where(bounds, |p| distance_sq_to_segment(p, a, b) <= half_sq);
    }

    /// Connected thick segments. A single point paints a dot.
    pub fn stroke_polyline(&mut self, points: &[Pos2], width: f32) {
        match points {
            [] => {}
            [only] => self.stroke_segment(*only, *only, width),
            _ => {
                for pair in points.windows(2) {
                    self.stroke_segment(pair[0], pair[1], width);
                }
            }
        }
    }

    /// Closed outline through `points`.
    pub fn stroke_polygon(&mut self, points: &[Pos2], width: f32) {
        self.stroke_polyline(points, width);
        if let (Some(first), Some(last)) = (points.first(), points.last()) {
            if points.len() > 2 {
                self.stroke_segment(*last, *first, width);
            }
        }
    }

    /// Non-zero winding fill of the polygon through `points`.
    pub fn fill_polygon(&mut self, points: &[Pos2]) {
        if points.len() < 3 {
            return;
        }
        let bounds = Rect::from_points(points);
        self.mark_where(bounds, |p| winding_number(p, points) != 0);
    }

    /// Band of `width` centered on the edges of `rect`.
    pub fn stroke_rect(&mut self, rect: Rect, width: f32) {
        if rect.width() == 0.0 || rect.height() == 0.0 {
            return;
        }
        let half = width / 2.0;
        let outer = rect.expand(half);
        let inner = rect.shrink(half);
        self.mark_where(outer, |p| {
            let in_outer = p.x >= outer.min.x && p.x <= outer.max.x && p.y >= outer.min.y && p.y <= outer.max.y;
            let in_inner = p.x > inner.min.x && p.x < inner.max.x && p.y > inner.min.y && p.y < inner.max.y;
            in_outer && !in_inner
        });
    }

    /// Half-open fill of `rect`: min edges inclusive, max edges exclusive.
    pub fn fill_rect(&mut self, rect: Rect) {
        self.mark_where(rect, |p| {
            p.x >= rect.min.x && p.x < rect.max.x && p.y >= rect.min.y && p.y < rect.max.y
        });
    }

    /// Ring of `width` centered on the circle.
    pub fn stroke_circle(&mut self, center: Pos2, radius: f32, width: f32) {
        if radius <= 0.0 {
            return;
        }
        let half = width / 2.0;
        let bounds = Rect::from_center_size(center, egui::Vec2::splat(2.0 * (radius + half)));
        self.mark_where(bounds, |p| (p.distance(center) - radius).abs() <= half);
    }

    pub fn fill_circle(&mut self, center: Pos2, radius: f32) {
        if radius <= 0.0 {
            return;
        }
        let bounds = Rect::from_center_size(center, egui::Vec2::splat(2.0 * radius));
        let radius_sq = radius * radius;
        self.mark_where(bounds, |p| p.distance_sq(center) <= radius_sq);
    }
}

fn distance_sq_to_segment(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq == 0.0 {
        return p.distance_sq(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance_sq(a + ab * t)
}

fn winding_number(p: Pos2, points: &[Pos2]) -> i32 {
    // Signed area test: > 0 when `p` is left of the edge a -> b
    let side = |a: Pos2, b: Pos2| (b.x - a.x) * (p.y - a.y) - (p.x - a.x) * (b.y - a.y);
    let mut winding = 0;
    for (i, &a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        if a.y <= p.y {
            if b.y > p.y && side(a, b) > 0.0 {
                winding += 1;
            }
        } else if b.y <= p.y && side(a, b) < 0.0 {
            winding -= 1;
        }
    }
    winding
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask() -> Mask {
        Mask::new(Rect::from_min_max(pos2(0.0, 0.0), pos2(100.0, 100.0)), 100, 100)
    }

    #[test]
    fn test_mask_is_clipped_to_surface() {
        let mask = Mask::new(Rect::from_min_max(pos2(-20.0, -5.0), pos2(300.0, 40.0)), 64, 32);
        assert!(mask.is_empty());
        assert!(!mask.is_covered(70, 10));
        assert_eq!(mask.covered.len(), 64 * 32);
    }

    #[test]
    fn test_fill_rect_is_half_open() {
        let mut mask = mask();
        mask.fill_rect(Rect::from_min_max(pos2(10.0, 10.0), pos2(20.0, 15.0)));
        assert!(mask.is_covered(10, 10));
        assert!(mask.is_covered(19, 14));
        assert!(!mask.is_covered(20, 14));
        assert!(!mask.is_covered(19, 15));
        assert_eq!(mask.covered_pixels().count(), 50);
    }

    #[test]
    fn test_stroke_rect_leaves_interior() {
        let mut mask = mask();
        mask.stroke_rect(Rect::from_min_max(pos2(10.0, 10.0), pos2(50.0, 40.0)), 2.0);
        assert!(mask.is_covered(30, 10));
        assert!(mask.is_covered(10, 25));
        assert!(mask.is_covered(49, 39));
        assert!(!mask.is_covered(30, 25));
        assert!(!mask.is_covered(60, 25));
    }

    #[test]
    fn test_zero_area_shapes_paint_nothing() {
        let mut mask = mask();
        mask.stroke_rect(Rect::from_min_max(pos2(10.0, 10.0), pos2(10.0, 10.0)), 4.0);
        mask.stroke_rect(Rect::from_min_max(pos2(30.0, 10.0), pos2(30.0, 50.0)), 4.0);
        mask.stroke_rect(Rect::from_min_max(pos2(10.0, 30.0), pos2(60.0, 30.0)), 4.0);
        mask.fill_rect(Rect::from_min_max(pos2(10.0, 10.0), pos2(10.0, 30.0)));
        mask.stroke_circle(pos2(50.0, 50.0), 0.0, 4.0);
        mask.fill_circle(pos2(50.0, 50.0), 0.0);
        assert!(mask.is_empty());
    }

    #[test]
    fn test_single_point_polyline_is_a_dot() {
        let mut mask = mask();
        mask.stroke_polyline(&[pos2(20.0, 20.0)], 4.0);
        assert!(mask.is_covered(19, 19));
        assert!(mask.is_covered(20, 20));
        assert!(!mask.is_covered(25, 20));
    }

    #[test]
    fn test_polygon_fill_contains_centroid() {
        let mut mask = mask();
        let triangle = [pos2(10.0, 10.0), pos2(20.0, 0.0), pos2(0.0, 0.0)];
        mask.fill_polygon(&triangle);
        assert!(mask.is_covered(10, 3));
        assert!(!mask.is_covered(1, 9));
        assert!(!mask.is_covered(30, 3));
    }

    #[test]
    fn test_winding_ignores_vertex_order() {
        let clockwise = [pos2(0.0, 0.0), pos2(10.0, 0.0), pos2(10.0, 10.0), pos2(0.0, 10.0)];
        let mut counter = clockwise;
        counter.reverse();
        assert_ne!(winding_number(pos2(5.0, 5.0), &clockwise), 0);
        assert_ne!(winding_number(pos2(5.0, 5.0), &counter), 0);
        assert_eq!(winding_number(pos2(15.0, 5.0), &clockwise), 0);
    }

    #[test]
    fn test_ring_excludes_center() {
        let mut mask = mask();
        mask.stroke_circle(pos2(50.0, 50.0), 20.0, 2.0);
        assert!(mask.is_covered(69, 49));
        assert!(!mask.is_covered(50, 50));
        assert!(!mask.is_covered(80, 50));
    }
}
