use crate::PixelForgeApp;

/// The canvas never grows beyond this many points per side
const MAX_CANVAS_SIDE: f32 = 512.0;

pub fn central_panel(app: &mut PixelForgeApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let available = ui.available_size();
        let side = available.x.min(available.y - 24.0).clamp(0.0, MAX_CANVAS_SIDE);

        let (response, painter) = ui.allocate_painter(egui::vec2(side, side), egui::Sense::click_and_drag());
        let canvas = response.rect;

        // Feed this frame's pointer activity to the session before drawing
        let grid_size = app.session().document().grid_size();
        let events = app.pointer_mut().process(ctx, canvas, grid_size);
        for event in events {
            app.session_mut().handle_gesture(event);
        }
        if app.pointer().is_dragging() {
            ctx.set_cursor_icon(egui::CursorIcon::Crosshair);
        }

        let raster = app.session().flattened_raster();
        let preview = app.session().preview_cells();
        app.renderer()
            .render(&painter, canvas, &raster, &preview, app.session().color());

        if let Some(status) = app.status() {
            ui.label(status);
        }
    });
}
