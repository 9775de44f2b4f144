use egui::{Context, Pos2, Rect, Response};

use crate::controller::SurfaceEvent;

/// Primary-button pointer state for one frame, in screen coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerFrame {
    pub position: Option<Pos2>,
    pub pressed: bool,
    pub released: bool,
    /// The canvas widget has the pointer, not a panel or popup above it
    pub canvas_hovered: bool,
}

impl PointerFrame {
    pub fn from_response(ctx: &Context, canvas: &Response) -> Self {
        ctx.input(|input| Self {
            position: input.pointer.latest_pos(),
            pressed: input.pointer.primary_pressed(),
            released: input.pointer.primary_released(),
            canvas_hovered: canvas.hovered(),
        })
    }
}

/// Converts egui pointer input into surface-local pointer events
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    canvas_rect: Option<Rect>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the screen rect the surface is drawn into
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = Some(rect);
    }

    /// Screen position relative to the canvas origin
    fn to_local(rect: Rect, pos: Pos2) -> Pos2 {
        (pos - rect.min).to_pos2()
    }

    pub fn process_input(&mut self, ctx: &Context, canvas: &Response) -> Vec<SurfaceEvent> {
        self.process_frame(PointerFrame::from_response(ctx, canvas))
    }

    /// Presses and moves count only while the canvas itself is hovered, so
    /// popups and floating windows over it never paint. A release anywhere
    /// ends the stroke.
    pub fn process_frame(&mut self, frame: PointerFrame) -> Vec<SurfaceEvent> {
        let mut events = Vec::new();
        let Some(rect) = self.canvas_rect else {
            return events;
        };

        if let Some(pos) = frame.position {
            let over_canvas = frame.canvas_hovered && rect.contains(pos);
            if frame.pressed && over_canvas {
                events.push(SurfaceEvent::PointerDown(Self::to_local(rect, pos)));
            }
            if Some(pos) != self.last_pointer_pos && over_canvas {
                events.push(SurfaceEvent::PointerMove(Self::to_local(rect, pos)));
            }
            self.last_pointer_pos = Some(pos);
        } else {
            self.last_pointer_pos = None;
        }

        if frame.released {
            events.push(SurfaceEvent::PointerUp);
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn handler() -> InputHandler {
        let mut handler = InputHandler::new();
        handler.set_canvas_rect(Rect::from_min_max(pos2(100.0, 50.0), pos2(400.0, 350.0)));
        handler
    }

    fn at(x: f32, y: f32) -> PointerFrame {
        PointerFrame {
            position: Some(pos2(x, y)),
            canvas_hovered: true,
            ..PointerFrame::default()
        }
    }

    #[test]
    fn test_press_is_translated_to_surface_coordinates() {
        let mut handler = handler();
        let events = handler.process_frame(PointerFrame {
            pressed: true,
            ..at(110.0, 70.0)
        });
        assert_eq!(
            events,
            vec![
                SurfaceEvent::PointerDown(pos2(10.0, 20.0)),
                SurfaceEvent::PointerMove(pos2(10.0, 20.0)),
            ]
        );
    }

    #[test]
    fn test_unchanged_position_does_not_move() {
        let mut handler = handler();
        handler.process_frame(at(150.0, 60.0));
        assert!(handler.process_frame(at(150.0, 60.0)).is_empty());
    }

    #[test]
    fn test_press_outside_canvas_is_ignored() {
        let mut handler = handler();
        let events = handler.process_frame(PointerFrame {
            pressed: true,
            ..at(20.0, 20.0)
        });
        assert!(events.is_empty());
    }

    #[test]
    fn test_press_under_popup_is_ignored() {
        let mut handler = handler();
        let covered = PointerFrame {
            pressed: true,
            canvas_hovered: false,
            ..at(110.0, 70.0)
        };
        assert!(handler.process_frame(covered).is_empty());

        let dragged = PointerFrame {
            canvas_hovered: false,
            ..at(150.0, 90.0)
        };
        assert!(handler.process_frame(dragged).is_empty());
    }

    #[test]
    fn test_release_outside_canvas_still_ends_stroke() {
        let mut handler = handler();
        let events = handler.process_frame(PointerFrame {
            released: true,
            ..at(20.0, 20.0)
        });
        assert_eq!(events, vec![SurfaceEvent::PointerUp]);
    }

    #[test]
    fn test_no_events_before_canvas_is_known() {
        let mut handler = InputHandler::new();
        let events = handler.process_frame(PointerFrame {
            pressed: true,
            released: true,
            ..at(10.0, 10.0)
        });
        assert!(events.is_empty());
    }
}
