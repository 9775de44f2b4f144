use egui::{Color32, Pos2};

use crate::surface::Snapshot;

/// Data that only exists while a pointer button is held
#[derive(Debug, Clone)]
pub struct ActiveStroke {
    anchor: Pos2,
    base: Snapshot,
    path: Vec<Pos2>,
    color: Color32,
    width: u32,
}

impl ActiveStroke {
    pub fn new(anchor: Pos2, base: Snapshot, color: Color32, width: u32) -> Self {
        Self {
            anchor,
            base,
            path: vec![anchor],
            color,
            width,
        }
    }

    /// Pointer-down location
    pub fn anchor(&self) -> Pos2 {
        self.anchor
    }

    /// Surface pixels as they were at pointer-down
    pub fn base(&self) -> &Snapshot {
        &self.base
    }

    /// Freehand points visited so far, starting at the anchor
    pub fn path(&self) -> &[Pos2] {
        &self.path
    }

    pub fn extend_path(&mut self, pos: Pos2) {
        self.path.push(pos);
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn width(&self) -> u32 {
        self.width
    }
}

/// Stroke lifecycle: `Idle` until pointer-down, `Drawing` until pointer-up
#[derive(Debug, Default)]
pub enum StrokeSession {
    #[default]
    Idle,
    Drawing(ActiveStroke),
}

impl StrokeSession {
    /// Start a stroke, replacing any stroke already in progress.
    pub fn begin(&mut self, stroke: ActiveStroke) {
        if self.is_drawing() {
            log::debug!("Pointer down while drawing, restarting stroke");
        }
        *self = Self::Drawing(stroke);
    }

    /// Leave the `Drawing` state, returning the finished stroke if there was one.
    pub fn end(&mut self) -> Option<ActiveStroke> {
        match std::mem::take(self) {
            Self::Drawing(stroke) => Some(stroke),
            Self::Idle => None,
        }
    }

    pub fn active_mut(&mut self) -> Option<&mut ActiveStroke> {
        match self {
            Self::Drawing(stroke) => Some(stroke),
            Self::Idle => None,
        }
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self, Self::Drawing(_))
    }

    pub fn state_name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Drawing(_) => "Drawing",
        }
    }
}
