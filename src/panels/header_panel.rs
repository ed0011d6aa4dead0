use crate::WhiteboardApp;

pub fn header_panel(_app: &mut WhiteboardApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("header_panel").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.heading("Interactive Whiteboard");
                ui.label("Advanced Mathematics");
            });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("✖ Exit").clicked() {
                    log::info!("Closing whiteboard");
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
                ui.label("4 Participants");
            });
        });
    });
}
