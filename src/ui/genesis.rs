use egui_macroquad::egui;
use evo_arena::simulation::params::Params;
use macroquad::prelude::*;

use super::ui::UIState;

/// Configuration screen shown before a run starts. Returns `true` once the user starts it.
pub fn draw_genesis_screen(params: &mut Params, state: &mut UIState) -> bool {
    clear_background(LIGHTGRAY);

    let mut start_simulation = is_key_pressed(KeyCode::Enter);

    egui_macroquad::ui(|egui_ctx| {
        egui::CentralPanel::default().show(egui_ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Evo Arena - Configuration");
                ui.add_space(10.0);

                ui.collapsing("Arena", |ui| {
                    ui.add(egui::Slider::new(&mut params.arena_width, 120.0..=400.0).text("Width"));
                    ui.add(egui::Slider::new(&mut params.arena_height, 120.0..=400.0).text("Height"));
                    ui.add(egui::Slider::new(&mut params.agent_count, 1..=64).text("Agents"));
                    ui.add(egui::Slider::new(&mut params.resource_count, 0..=64).text("Resources"));
                    ui.add(egui::Slider::new(&mut params.field_hazard_count, 0..=32).text("Field Hazards"));
                    ui.add(
                        egui::Slider::new(&mut params.respawn_delay, 0.0..=10.0).text("Respawn Delay (s)"),
                    );
                });

                ui.collapsing("Agents", |ui| {
                    ui.add(egui::Slider::new(&mut params.sensor_count, 1..=15).text("Sensor Slots"));
                    ui.add(
                        egui::Slider::new(&mut params.sensor_fov, 0.1..=std::f32::consts::TAU - 0.1)
                            .text("Field of View"),
                    );
                    ui.add(egui::Slider::new(&mut params.view_distance, 10.0..=150.0).text("View Distance"));
                    ui.add(egui::Slider::new(&mut params.base_speed, 0.1..=5.0).text("Base Speed"));
                    ui.add(egui::Slider::new(&mut params.health_decay, 0.0..=2.0).text("Health Decay"));
                    ui.add(egui::Slider::new(&mut params.eat_bonus, 0.0..=100.0).text("Eat Bonus"));
                });

                ui.collapsing("Evolution", |ui| {
                    ui.add(
                        egui::Slider::new(&mut params.frames_per_generation, 64..=8192)
                            .text("Frames per Generation")
                            .logarithmic(true),
                    );
                    ui.add(egui::Slider::new(&mut params.max_generations, 1..=500).text("Max Generations"));
                    ui.add(egui::Slider::new(&mut params.mutation_rate, 0.0..=1.0).text("Mutation Rate"));
                    ui.add(egui::Slider::new(&mut params.crossover_rate, 0.0..=1.0).text("Crossover Rate"));
                    ui.add(egui::Slider::new(&mut params.survival_bonus, 0.0..=10.0).text("Survival Bonus"));
                    ui.checkbox(&mut params.elitism, "Keep the best genome unchanged");
                });

                ui.add_space(10.0);
                ui.checkbox(&mut state.write_records, "Write generation records to disk");

                if let Some(ref msg) = state.status_message {
                    ui.colored_label(egui::Color32::from_rgb(200, 60, 60), msg);
                }

                ui.add_space(20.0);
                ui.separator();
                ui.add_space(10.0);

                ui.horizontal(|ui| {
                    if ui.button("Start Simulation").clicked() {
                        start_simulation = true;
                    }
                    ui.label("Configure parameters above, then click to start (or press Enter)");
                });
            });
        });
    });

    egui_macroquad::draw();

    start_simulation
}
