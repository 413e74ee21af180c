use egui::{Color32, Stroke, vec2};

use crate::PixelForgeApp;
use crate::color::{self, PALETTE};
use crate::tool::Tool;

const SWATCHES_PER_ROW: usize = 6;

pub fn tools_panel(app: &mut PixelForgeApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(false)
        .default_width(180.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            let active = app.session().tool();
            for tool in Tool::ALL {
                if ui.selectable_label(active == tool, tool.label()).clicked() {
                    log::info!("Tool selected from UI: {}", tool);
                    app.session_mut().set_tool(tool);
                }
            }

            ui.separator();
            color_section(app, ui);
        });
}

fn color_section(app: &mut PixelForgeApp, ui: &mut egui::Ui) {
    ui.heading("Colors");

    let current = app.session().color();
    ui.horizontal(|ui| {
        let (rect, _) = ui.allocate_exact_size(vec2(32.0, 32.0), egui::Sense::hover());
        ui.painter().rect_filled(rect, 4.0, current);

        let response = ui.add(egui::TextEdit::singleline(app.color_input_mut()).desired_width(80.0));
        if response.changed() && app.color_input_mut().len() == 7 {
            app.apply_color_input();
        }
        if response.lost_focus() {
            app.apply_color_input();
            app.sync_color_input();
        } else if !response.has_focus() {
            // Picks from the eyedropper or palette show up in the field
            app.sync_color_input();
        }
    });

    ui.add_space(4.0);
    egui::Grid::new("palette_grid")
        .spacing([4.0, 4.0])
        .show(ui, |ui| {
            for (index, swatch) in PALETTE.iter().enumerate() {
                let stroke = if *swatch == current {
                    Stroke::new(2.0, Color32::WHITE)
                } else {
                    Stroke::NONE
                };
                let button = egui::Button::new("")
                    .fill(*swatch)
                    .stroke(stroke)
                    .min_size(vec2(20.0, 20.0));
                if ui.add(button).on_hover_text(color::to_hex(*swatch)).clicked() {
                    app.session_mut().set_color32(*swatch);
                }
                if (index + 1) % SWATCHES_PER_ROW == 0 {
                    ui.end_row();
                }
            }
        });
}
