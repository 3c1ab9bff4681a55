use egui_macroquad::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints};
use evo_arena::simulation::trainer::Trainer;
use std::collections::VecDeque;

use super::ui::UIState;

pub(super) fn draw_stats_panel(egui_ctx: &egui::Context, state: &mut UIState, trainer: &Trainer) {
    let world = trainer.world();
    let params = trainer.params();

    egui::SidePanel::right("stats_panel")
        .default_width(state.stats_panel_width)
        .resizable(true)
        .show(egui_ctx, |ui| {
            ui.heading("Simulation Stats");
            ui.separator();

            ui.horizontal(|ui| {
                let pause_text = if state.paused { "▶ Resume" } else { "⏸ Pause" };
                if ui.button(pause_text).clicked() {
                    state.paused = !state.paused;
                }
                if ui.button("🔄 Reset").clicked() {
                    state.reset_requested = true;
                }
            });

            // Rendering toggle
            ui.horizontal(|ui| {
                let button_text = if state.rendering_enabled {
                    "🎨 Rendering: ON"
                } else {
                    "🎨 Rendering: OFF"
                };
                if ui.button(button_text).clicked() {
                    state.rendering_enabled = !state.rendering_enabled;
                }
            });

            if let Some(ref msg) = state.status_message {
                ui.label(msg);
            }

            ui.separator();

            ui.label("Simulation Speed");
            ui.add(egui::Slider::new(&mut state.simulation_speed, 1.0..=50.0).text("x"));
            ui.label(format!("Step time: {:.2}ms", state.last_step_time_ms));

            ui.separator();

            ui.label(format!("Frame: {} of {}", world.frame, params.frames_per_generation));
            ui.label(format!("Generation: {}", world.generation));
            ui.label(format!("Alive: {}/{}", world.alive_count(), params.agent_count));
            match trainer.average_score() {
                Ok(score) => ui.label(format!("Average score: {score:.2}")),
                Err(_) => ui.label("Average score: -"),
            };
            if let Some(best) = trainer.best() {
                ui.label(format!(
                    "Best fitness: {:.1} (generation {})",
                    best.fitness, best.generation
                ));
            }
            ui.label(format!("Run: {}", trainer.run_id()));

            ui.separator();

            ui.heading("Score Per Generation");
            draw_score_plot(ui, &state.avg_score_history, &state.best_fitness_history);

            ui.separator();

            ui.heading("Survivors Per Generation");
            draw_survivor_plot(ui, &state.survivor_history);
        });
}

fn draw_score_plot(ui: &mut egui::Ui, avg_data: &VecDeque<(f64, f64)>, best_data: &VecDeque<(f64, f64)>) {
    if avg_data.is_empty() {
        ui.label("Collecting data...");
        return;
    }

    Plot::new("score_plot")
        .height(150.0)
        .show_axes([true, true])
        .legend(Legend::default())
        .label_formatter(|name, value| format!("{}\nGeneration: {:.0}\nScore: {:.2}", name, value.x, value.y))
        .show(ui, |plot_ui| {
            let avg_points: PlotPoints = avg_data.iter().map(|&(x, y)| [x, y]).collect();
            plot_ui.line(
                Line::new(avg_points)
                    .color(egui::Color32::from_rgb(100, 200, 100))
                    .name("Average score"),
            );

            if !best_data.is_empty() {
                let best_points: PlotPoints = best_data.iter().map(|&(x, y)| [x, y]).collect();
                plot_ui.line(
                    Line::new(best_points)
                        .color(egui::Color32::from_rgb(255, 200, 100))
                        .name("Best fitness"),
                );
            }
        });
}

fn draw_survivor_plot(ui: &mut egui::Ui, data: &VecDeque<(f64, f64)>) {
    if data.is_empty() {
        ui.label("Collecting data...");
        return;
    }

    Plot::new("survivor_plot")
        .height(120.0)
        .show_axes([true, true])
        .show(ui, |plot_ui| {
            let points: PlotPoints = data.iter().map(|&(x, y)| [x, y]).collect();
            plot_ui.line(
                Line::new(points)
                    .color(egui::Color32::from_rgb(100, 150, 255))
                    .name("Survivors"),
            );
        });
}
