#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod color;
pub mod command;
pub mod compositor;
pub mod config;
pub mod document;
pub mod error;
pub mod fill;
pub mod grid;
pub mod input;
pub mod layer;
pub mod panels;
pub mod raster;
pub mod renderer;
pub mod session;
pub mod state;
pub mod tool;

pub use app::PixelForgeApp;
pub use command::Command;
pub use compositor::ExportedImage;
pub use config::EditorConfig;
pub use document::Document;
pub use error::{ConfigError, EditError, EditResult, ExportError};
pub use grid::{CellPos, Grid};
pub use input::{GestureEvent, GesturePhase, PointerTracker};
pub use layer::{Layer, LayerId};
pub use raster::Shape;
pub use renderer::CanvasRenderer;
pub use session::EditSession;
pub use state::EditorState;
pub use tool::Tool;
