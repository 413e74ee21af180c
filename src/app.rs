use crate::config::EditorConfig;
use crate::input::PointerTracker;
use crate::panels;
use crate::renderer::CanvasRenderer;
use crate::session::EditSession;
use crate::tool::Tool;

/// We derive Deserialize/Serialize so the selected tool and color survive a restart.
/// Pixel data is never persisted; only an export leaves the session.
#[derive(serde::Deserialize, serde::Serialize, Debug)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct PixelForgeApp {
    tool: Tool,
    color: String,
    show_grid: bool,

    #[serde(skip)]
    session: EditSession,
    #[serde(skip)]
    renderer: CanvasRenderer,
    #[serde(skip)]
    pointer: PointerTracker,
    /// Contents of the hex color field while it is being edited
    #[serde(skip)]
    color_input: String,
    #[serde(skip)]
    status: Option<String>,
}

impl Default for PixelForgeApp {
    fn default() -> Self {
        Self::with_config(EditorConfig::default())
    }
}

impl PixelForgeApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: EditorConfig) -> Self {
        let mut app = Self::with_config(config);
        if let Some(storage) = cc.storage {
            if let Some(saved) = eframe::get_value::<Self>(storage, eframe::APP_KEY) {
                app.restore_preferences(&saved);
            }
        }
        app
    }

    pub fn with_config(config: EditorConfig) -> Self {
        let session = EditSession::new(config);
        Self {
            tool: session.tool(),
            color: session.color_hex(),
            show_grid: true,
            color_input: session.color_hex(),
            session,
            renderer: CanvasRenderer::new(),
            pointer: PointerTracker::new(),
            status: None,
        }
    }

    fn restore_preferences(&mut self, saved: &Self) {
        self.session.set_tool(saved.tool);
        if let Err(err) = self.session.set_color(&saved.color) {
            log::warn!("Ignoring saved color: {err}");
        }
        self.renderer.set_show_grid(saved.show_grid);
        self.color_input = self.session.color_hex();
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut EditSession {
        &mut self.session
    }

    pub fn renderer(&self) -> &CanvasRenderer {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut CanvasRenderer {
        &mut self.renderer
    }

    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }

    pub fn pointer_mut(&mut self) -> &mut PointerTracker {
        &mut self.pointer
    }

    pub fn color_input_mut(&mut self) -> &mut String {
        &mut self.color_input
    }

    /// Applies the hex field if it holds a valid color
    pub fn apply_color_input(&mut self) -> bool {
        match self.session.set_color(self.color_input.trim()) {
            Ok(()) => true,
            Err(err) => {
                log::debug!("{err}");
                false
            }
        }
    }

    /// Drops pending edits in the hex field and shows the session color again
    pub fn sync_color_input(&mut self) {
        self.color_input = self.session.color_hex();
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }

    /// Exports the visible layers and writes them next to the working directory
    pub fn export(&mut self) {
        let scale = self.session.config().export_scale;
        let exported = match self.session.export_image(scale) {
            Ok(exported) => exported,
            Err(err) => {
                log::error!("Export failed: {err}");
                self.set_status(format!("Export failed: {err}"));
                return;
            }
        };
        match std::fs::write(&exported.file_name, &exported.bytes) {
            Ok(()) => {
                log::info!("Saved {}", exported.file_name);
                self.set_status(format!("Saved {} ({}x{})", exported.file_name, exported.width, exported.height));
            }
            Err(err) => {
                log::error!("Failed to write {}: {}", exported.file_name, err);
                self.set_status(format!("Could not write {}: {err}", exported.file_name));
            }
        }
    }
}

impl eframe::App for PixelForgeApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.tool = self.session.tool();
        self.color = self.session.color_hex();
        self.show_grid = self.renderer.show_grid();
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        panels::tools_panel(self, ctx);
        panels::layers_panel(self, ctx);
        panels::central_panel(self, ctx);
    }
}
