use egui_macroquad::egui;
use evo_arena::simulation::event_log::EventLog;
use evo_arena::simulation::trainer::{GenerationSummary, Trainer};
use std::collections::VecDeque;

const MAX_HISTORY_POINTS: usize = 500;

#[allow(clippy::struct_excessive_bools)]
pub struct UIState {
    pub stats_panel_width: f32,
    pub avg_score_history: VecDeque<(f64, f64)>,
    pub best_fitness_history: VecDeque<(f64, f64)>,
    pub survivor_history: VecDeque<(f64, f64)>,
    pub reset_requested: bool,
    pub paused: bool,
    pub write_records: bool,
    pub status_message: Option<String>,
    pub simulation_speed: f32,
    pub rendering_enabled: bool,
    pub last_step_time_ms: f32,
}

impl UIState {
    pub fn new() -> Self {
        Self {
            stats_panel_width: 300.0,
            avg_score_history: VecDeque::new(),
            best_fitness_history: VecDeque::new(),
            survivor_history: VecDeque::new(),
            reset_requested: false,
            paused: false,
            write_records: false,
            status_message: None,
            simulation_speed: 1.0, // frames per rendered frame
            rendering_enabled: true,
            last_step_time_ms: 0.0,
        }
    }

    /// Forgets the plots of the previous run.
    pub fn clear_history(&mut self) {
        self.avg_score_history.clear();
        self.best_fitness_history.clear();
        self.survivor_history.clear();
    }

    pub fn record_generation(&mut self, summary: &GenerationSummary) {
        let x = summary.generation as f64;
        push_bounded(&mut self.avg_score_history, (x, summary.average_score as f64));
        push_bounded(&mut self.best_fitness_history, (x, summary.best_fitness as f64));
        push_bounded(&mut self.survivor_history, (x, summary.survivors as f64));
    }
}

fn push_bounded(history: &mut VecDeque<(f64, f64)>, point: (f64, f64)) {
    history.push_back(point);
    if history.len() > MAX_HISTORY_POINTS {
        history.pop_front();
    }
}

pub fn draw_ui(state: &mut UIState, trainer: &Trainer, event_log: &EventLog) {
    egui_macroquad::ui(|egui_ctx| {
        // Configure brighter text and UI
        let mut visuals = egui::Visuals::dark();
        visuals.override_text_color = Some(egui::Color32::from_rgb(240, 240, 240));
        visuals.widgets.noninteractive.fg_stroke.color = egui::Color32::from_rgb(220, 220, 220);
        visuals.widgets.inactive.fg_stroke.color = egui::Color32::from_rgb(200, 200, 200);
        visuals.widgets.hovered.fg_stroke.color = egui::Color32::WHITE;
        visuals.widgets.active.fg_stroke.color = egui::Color32::WHITE;
        egui_ctx.set_visuals(visuals);

        // Right-side stats panel
        super::stats::draw_stats_panel(egui_ctx, state, trainer);

        super::events::draw_events_panel(egui_ctx, event_log);
    });
}

pub fn process_egui() {
    egui_macroquad::draw();
}
