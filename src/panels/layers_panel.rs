use crate::PixelForgeApp;
use crate::layer::LayerId;

/// A click in the layer list, applied after the list is drawn
#[derive(Debug, Clone, Copy)]
enum LayerAction {
    Add,
    Select(LayerId),
    ToggleVisibility(LayerId),
    Delete(LayerId),
}

pub fn layers_panel(app: &mut PixelForgeApp, ctx: &egui::Context) {
    egui::SidePanel::right("layers_panel")
        .resizable(true)
        .default_width(220.0)
        .show(ctx, |ui| {
            let mut action = None;

            ui.horizontal(|ui| {
                ui.heading("Layers");
                if ui.button("+").on_hover_text("Add Layer").clicked() {
                    action = Some(LayerAction::Add);
                }
            });
            ui.separator();

            let document = app.session().document();
            let active = document.active_layer_id();
            let can_delete = document.len() > 1;
            let count = document.len();

            // Topmost layer first, like a stack seen from above
            for layer in document.layers().iter().rev() {
                let id = layer.id();
                ui.horizontal(|ui| {
                    if ui.selectable_label(id == active, layer.name()).clicked() {
                        action = Some(LayerAction::Select(id));
                    }
                    let (label, hint) = if layer.is_visible() {
                        ("Hide", "Hide Layer")
                    } else {
                        ("Show", "Show Layer")
                    };
                    if ui.small_button(label).on_hover_text(hint).clicked() {
                        action = Some(LayerAction::ToggleVisibility(id));
                    }
                    if can_delete && ui.small_button("Delete").on_hover_text("Delete Layer").clicked() {
                        action = Some(LayerAction::Delete(id));
                    }
                });
            }

            ui.label(format!("{count} layer{}", if count == 1 { "" } else { "s" }));

            if let Some(action) = action {
                apply(app, action);
            }

            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("Clear").on_hover_text("Clear the active layer").clicked() {
                    app.session_mut().clear_active_layer();
                }
                if ui.button("Export").clicked() {
                    app.export();
                }
            });

            let mut show_grid = app.renderer().show_grid();
            if ui.checkbox(&mut show_grid, "Grid lines").changed() {
                app.renderer_mut().set_show_grid(show_grid);
            }
        });
}

fn apply(app: &mut PixelForgeApp, action: LayerAction) {
    let session = app.session_mut();
    let result = match action {
        LayerAction::Add => {
            session.add_layer();
            Ok(())
        }
        LayerAction::Select(id) => session.select_layer(id),
        LayerAction::ToggleVisibility(id) => session.toggle_visibility(id).map(|_| ()),
        LayerAction::Delete(id) => session.delete_layer(id),
    };
    if let Err(err) = result {
        log::warn!("{action:?} failed: {err}");
        app.set_status(err.to_string());
    }
}
