use egui_macroquad::egui;
use evo_arena::simulation::event_log::{EventColor, EventLog};

/// Draws a transparent panel showing recent events
pub fn draw_events_panel(egui_ctx: &egui::Context, event_log: &EventLog) {
    // Get screen height to position at bottom
    let screen_height = egui_ctx.screen_rect().height();
    let panel_height = 300.0;

    egui::Window::new("Recent Events")
        .fixed_pos(egui::pos2(10.0, screen_height - panel_height - 10.0))
        .fixed_size(egui::vec2(300.0, panel_height))
        .frame(
            egui::Frame::window(&egui_ctx.style())
                .fill(egui::Color32::from_rgba_premultiplied(20, 20, 30, 200))
                .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(100, 100, 120))),
        )
        .show(egui_ctx, |ui| {
            ui.vertical(|ui| {
                ui.spacing_mut().item_spacing.y = 4.0;

                let events = event_log.events();

                if events.is_empty() {
                    ui.label(
                        egui::RichText::new("No events yet...")
                            .color(egui::Color32::from_rgb(150, 150, 150))
                            .size(12.0),
                    );
                    return;
                }

                for event in events {
                    let color = match event.color {
                        EventColor::Food => egui::Color32::from_rgb(255, 200, 100),
                        EventColor::Respawn => egui::Color32::from_rgb(100, 255, 100),
                        EventColor::Hazard => egui::Color32::from_rgb(255, 100, 100),
                        EventColor::Death => egui::Color32::from_rgb(150, 150, 150),
                        EventColor::Generation => egui::Color32::from_rgb(100, 200, 255),
                    };

                    ui.horizontal(|ui| {
                        ui.label(
                            egui::RichText::new(format!("[{:.1}s]", event.time))
                                .color(egui::Color32::from_rgb(180, 180, 200))
                                .size(11.0)
                                .monospace(),
                        );
                        ui.label(egui::RichText::new(&event.description).color(color).size(11.0));
                    });
                }
            });
        });
}
