use egui::{Color32, Context, Painter, Rect, TextureHandle, TextureId, TextureOptions};

use crate::surface::DrawingSurface;

const TEXTURE_NAME: &str = "whiteboard_canvas";

/// Keeps the canvas uploaded to the GPU as one texture.
///
/// The texture is re-uploaded only when the surface revision moves, so
/// idle frames cost nothing beyond the draw call.
#[derive(Default)]
pub struct CanvasRenderer {
    texture: Option<TextureHandle>,
    uploaded_revision: Option<u64>,
}

impl std::fmt::Debug for CanvasRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasRenderer")
            .field("has_texture", &self.texture.is_some())
            .field("uploaded_revision", &self.uploaded_revision)
            .finish()
    }
}

impl CanvasRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upload the canvas if it changed since the last call.
    ///
    /// Returns the texture to draw, or None before the surface is initialized.
    pub fn sync(&mut self, ctx: &Context, surface: &DrawingSurface) -> Option<TextureId> {
        let canvas = surface.canvas()?;

        if self.uploaded_revision == Some(surface.revision()) {
            if let Some(texture) = &self.texture {
                return Some(texture.id());
            }
        }

        let image = canvas.to_color_image();
        match &mut self.texture {
            Some(texture) => texture.set(image, TextureOptions::NEAREST),
            None => {
                self.texture = Some(ctx.load_texture(TEXTURE_NAME, image, TextureOptions::NEAREST));
            }
        }
        self.uploaded_revision = Some(surface.revision());
        self.texture.as_ref().map(TextureHandle::id)
    }

    /// Draw the canvas into `rect`
    pub fn paint(&mut self, ctx: &Context, painter: &Painter, rect: Rect, surface: &DrawingSurface) {
        match self.sync(ctx, surface) {
            Some(texture_id) => {
                let uv = Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                painter.image(texture_id, rect, uv, Color32::WHITE);
            }
            None => {
                painter.rect_filled(rect, 0.0, surface.background());
            }
        }
    }

    pub fn uploaded_revision(&self) -> Option<u64> {
        self.uploaded_revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_no_texture_before_initialize() {
        let ctx = Context::default();
        let mut renderer = CanvasRenderer::new();
        let surface = DrawingSurface::default();
        assert!(renderer.sync(&ctx, &surface).is_none());
        assert_eq!(renderer.uploaded_revision(), None);
    }

    #[test]
    fn test_texture_reused_until_revision_changes() {
        let ctx = Context::default();
        let mut renderer = CanvasRenderer::new();
        let mut surface = DrawingSurface::default();
        surface.initialize(16, 16).unwrap();

        let first = renderer.sync(&ctx, &surface).unwrap();
        let uploaded = renderer.uploaded_revision();
        assert_eq!(renderer.sync(&ctx, &surface), Some(first));
        assert_eq!(renderer.uploaded_revision(), uploaded);

        surface.begin_stroke(pos2(2.0, 2.0)).unwrap();
        surface.extend_stroke(pos2(8.0, 8.0));
        let second = renderer.sync(&ctx, &surface).unwrap();
        assert_eq!(second, first);
        assert_eq!(renderer.uploaded_revision(), Some(surface.revision()));
    }

    #[test]
    fn test_paint_basics() {
        let ctx = Context::default();
        let mut renderer = CanvasRenderer::new();
        let mut surface = DrawingSurface::default();
        surface.initialize(100, 100).unwrap();

        let layer_id = egui::LayerId::background();
        let rect = Rect::from_min_size(pos2(0.0, 0.0), egui::vec2(100.0, 100.0));
        let painter = Painter::new(ctx.clone(), layer_id, rect);
        renderer.paint(&ctx, &painter, rect, &surface);
        assert!(renderer.uploaded_revision().is_some());
    }
}
