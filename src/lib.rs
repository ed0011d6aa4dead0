#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas;
pub mod config;
pub mod error;
pub mod history;
pub mod input;
pub mod panels;
pub mod renderer;
pub mod stroke;
pub mod surface;
pub mod tool;

pub use app::WhiteboardApp;
pub use canvas::CanvasBuffer;
pub use config::{ConfigError, WhiteboardConfig};
pub use error::{WhiteboardError, WhiteboardResult};
pub use history::SnapshotHistory;
pub use input::{CanvasMapping, InputEvent, InputHandler, InputLocation, to_canvas_local};
pub use renderer::CanvasRenderer;
pub use stroke::ActiveStroke;
pub use surface::{DrawingSurface, SurfaceState};
pub use tool::{Brush, StrokeWidth, ToolKind, ToolSettings};
