#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod components;
pub mod config;
pub mod controller;
pub mod error;
pub mod export;
pub mod input;
pub mod panels;
pub mod raster;
pub mod session;
pub mod shape;
pub mod surface;
pub mod texture;
pub mod tool;
pub mod util;

pub use app::SketchApp;
pub use config::AppConfig;
pub use controller::{DrawingController, SurfaceEvent};
pub use error::{ExportError, SurfaceError, ToolError};
pub use export::{ExportedImage, Exporter};
pub use session::{ActiveStroke, StrokeSession};
pub use shape::Shape;
pub use surface::{Snapshot, Surface};
pub use tool::{ToolKind, ToolState};
