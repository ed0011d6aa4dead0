use egui::{Key, KeyboardShortcut, Modifiers, Painter, Rect};

use crate::config::WhiteboardConfig;
use crate::input::{route_event, CanvasMapping, InputEvent, InputHandler};
use crate::panels::{central_panel, header_panel, tools_panel};
use crate::renderer::CanvasRenderer;
use crate::surface::DrawingSurface;
use crate::tool::ToolSettings;

const UNDO: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Z);
const REDO: KeyboardShortcut =
    KeyboardShortcut::new(Modifiers::COMMAND.plus(Modifiers::SHIFT), Key::Z);
const REDO_ALT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Y);

/// Desktop shell around the drawing surface.
///
/// Only the tool settings are persisted between runs; the drawing itself
/// lives and dies with the window.
pub struct WhiteboardApp {
    config: WhiteboardConfig,
    surface: DrawingSurface,
    renderer: CanvasRenderer,
    input: InputHandler,
    status: Option<String>,
}

impl WhiteboardApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: WhiteboardConfig) -> Self {
        let mut app = Self::with_config(config);
        if let Some(storage) = cc.storage {
            if let Some(settings) = eframe::get_value::<ToolSettings>(storage, eframe::APP_KEY) {
                log::debug!("Restored tool settings {:?}", settings);
                app.surface.set_settings(settings);
            }
        }
        app
    }

    pub fn with_config(config: WhiteboardConfig) -> Self {
        Self {
            surface: config.build_surface(),
            config,
            renderer: CanvasRenderer::new(),
            input: InputHandler::new(Rect::NOTHING),
            status: None,
        }
    }

    pub fn surface(&self) -> &DrawingSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut DrawingSurface {
        &mut self.surface
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn undo(&mut self) {
        if let Err(err) = self.surface.undo() {
            log::debug!("Undo rejected: {}", err);
        }
    }

    pub fn redo(&mut self) {
        if let Err(err) = self.surface.redo() {
            log::debug!("Redo rejected: {}", err);
        }
    }

    pub fn clear(&mut self) {
        if let Err(err) = self.surface.clear() {
            log::debug!("Clear rejected: {}", err);
        }
    }

    /// Write the canvas to the configured export path
    pub fn export(&mut self) {
        let path = self.config.export_path();
        let status = match self.surface.export_to_file(&path) {
            Ok(()) => format!("Saved {}", path.display()),
            Err(err) => {
                log::warn!("Export to {} failed: {}", path.display(), err);
                format!("Export failed: {}", err)
            }
        };
        self.status = Some(status);
    }

    /// Feed this frame's input to the surface, resizing it first if the
    /// canvas rect no longer matches the buffer.
    pub fn handle_canvas_input(&mut self, ctx: &egui::Context, mapping: CanvasMapping) {
        let [width, height] = mapping.pixel_size();
        if width > 0 && height > 0 && self.surface.size() != Some([width, height]) {
            route_event(&mut self.surface, &InputEvent::Resize { width, height }, &mapping);
        }

        self.input.set_canvas_rect(mapping.rect);
        for event in self.input.process_input(ctx) {
            route_event(&mut self.surface, &event, &mapping);
        }
    }

    pub fn paint_canvas(&mut self, ctx: &egui::Context, painter: &Painter, rect: Rect) {
        self.renderer.paint(ctx, painter, rect, &self.surface);
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        // Shift+Z first: the plain undo shortcut also matches with shift held
        if ctx.input_mut(|i| i.consume_shortcut(&REDO) || i.consume_shortcut(&REDO_ALT)) {
            self.redo();
        } else if ctx.input_mut(|i| i.consume_shortcut(&UNDO)) {
            self.undo();
        }
    }
}

impl eframe::App for WhiteboardApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.surface.settings());
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);

        header_panel(self, ctx);
        tools_panel(self, ctx);
        central_panel(self, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    fn mapping(width: f32, height: f32) -> CanvasMapping {
        CanvasMapping::new(Rect::from_min_size(pos2(0.0, 0.0), vec2(width, height)), 1.0)
    }

    #[test]
    fn test_canvas_input_follows_canvas_size() {
        let ctx = egui::Context::default();
        let mut app = WhiteboardApp::with_config(WhiteboardConfig::default());

        app.handle_canvas_input(&ctx, mapping(200.0, 100.0));
        assert_eq!(app.surface().size(), Some([200, 100]));

        let surface = app.surface_mut();
        surface.begin_stroke(pos2(10.0, 10.0)).unwrap();
        surface.extend_stroke(pos2(50.0, 10.0));
        assert!(surface.end_stroke());
        assert_eq!(app.surface().history_len(), 2);

        // Same size again keeps the drawing
        app.handle_canvas_input(&ctx, mapping(200.0, 100.0));
        assert_eq!(app.surface().history_len(), 2);

        app.handle_canvas_input(&ctx, mapping(300.0, 100.0));
        assert_eq!(app.surface().size(), Some([300, 100]));
        assert_eq!(app.surface().history_len(), 1);
        assert_eq!(app.surface().pixel(30, 10), Some(egui::Color32::WHITE));
    }

    #[test]
    fn test_empty_canvas_rect_is_skipped() {
        let ctx = egui::Context::default();
        let mut app = WhiteboardApp::with_config(WhiteboardConfig::default());

        app.handle_canvas_input(&ctx, mapping(0.0, 100.0));
        assert_eq!(app.surface().size(), None);

        app.handle_canvas_input(&ctx, mapping(200.0, 100.0));
        app.surface_mut().clear().unwrap();
        app.handle_canvas_input(&ctx, mapping(200.0, 0.0));
        assert_eq!(app.surface().size(), Some([200, 100]));
        assert_eq!(app.surface().history_len(), 2);
    }
}
