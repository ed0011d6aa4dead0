use crate::WhiteboardApp;
use crate::input::CanvasMapping;

pub fn central_panel(app: &mut WhiteboardApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::drag());
            let canvas_rect = response.rect;

            // Mapping is rebuilt every frame; the rect moves with the layout
            let mapping = CanvasMapping::new(canvas_rect, ctx.pixels_per_point());
            app.handle_canvas_input(ctx, mapping);

            app.paint_canvas(ctx, &painter, canvas_rect);
        });
}
