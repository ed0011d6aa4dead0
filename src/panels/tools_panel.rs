use egui::color_picker::{color_edit_button_srgba, Alpha};

use crate::WhiteboardApp;
use crate::tool::{StrokeWidth, ToolKind};

pub fn tools_panel(app: &mut WhiteboardApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("tools_panel").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let settings = app.surface().settings();

            // Tool selection
            for tool in [ToolKind::Pencil, ToolKind::Eraser] {
                let icon = match tool {
                    ToolKind::Pencil => "✏",
                    ToolKind::Eraser => "⌫",
                };
                let label = format!("{} {}", icon, tool.name());
                if ui.selectable_label(settings.tool == tool, label).clicked() {
                    log::info!("Tool selected from UI: {}", tool.name());
                    app.surface_mut().set_tool(tool);
                }
            }

            ui.separator();

            let can_undo = app.surface().can_undo();
            let can_redo = app.surface().can_redo();
            if ui.add_enabled(can_undo, egui::Button::new("⟲ Undo")).clicked() {
                app.undo();
            }
            if ui.add_enabled(can_redo, egui::Button::new("⟳ Redo")).clicked() {
                app.redo();
            }

            ui.separator();

            let mut color = settings.color32();
            if color_edit_button_srgba(ui, &mut color, Alpha::Opaque).changed() {
                app.surface_mut().set_color([color.r(), color.g(), color.b()]);
            }

            let mut width = settings.width;
            egui::ComboBox::from_id_salt("stroke_width")
                .selected_text(width.label())
                .show_ui(ui, |ui| {
                    for option in StrokeWidth::ALL {
                        ui.selectable_value(&mut width, option, option.label());
                    }
                });
            if width != settings.width {
                app.surface_mut().set_stroke_width(width);
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("🗑 Clear").clicked() {
                    app.clear();
                }
                if ui.button("⬇ Export").clicked() {
                    app.export();
                }
                if let Some(status) = app.status() {
                    ui.label(status);
                }
            });
        });
    });
}
