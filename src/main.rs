use std::time::Instant;

use anyhow::Context;
use evo_arena::simulation::brain::BrainBuilder;
use evo_arena::simulation::event_log::{EventColor, EventLog};
use evo_arena::simulation::evolution::GeneticEvolver;
use evo_arena::simulation::params::Params;
use evo_arena::simulation::telemetry::{FileRecordSink, NullSink, RecordSink, new_run_id};
use evo_arena::simulation::trainer::{TickOutcome, Trainer};
use macroquad::prelude::*;

mod graphics;
mod ui;

const STATS_DIR: &str = "stats";
const BEST_LOG: &str = "best_genomes.txt";

fn window_conf() -> Conf {
    Conf {
        window_title: "Evo Arena".to_owned(),
        window_width: 1280,
        window_height: 800,
        ..Default::default()
    }
}

fn start_run(params: &Params, write_records: bool) -> anyhow::Result<Trainer> {
    let run_id = new_run_id();
    let sink: Box<dyn RecordSink> = if write_records {
        Box::new(FileRecordSink::new(STATS_DIR, BEST_LOG, &run_id).context("failed to open record files")?)
    } else {
        Box::new(NullSink)
    };
    let builder = BrainBuilder::new(params.layer_sizes());
    let evolver = GeneticEvolver::from_params(params);
    Ok(Trainer::new(
        params.clone(),
        Box::new(evolver),
        Box::new(builder),
        sink,
        run_id,
    )?)
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let mut params = match std::env::args().nth(1) {
        Some(path) => match Params::from_file(&path) {
            Ok(params) => params,
            Err(e) => {
                log::error!("failed to load {path}: {e}");
                std::process::exit(1);
            }
        },
        None => Params::default(),
    };

    let mut ui_state = ui::UIState::new();
    let mut event_log = EventLog::default();
    let mut trainer: Option<Trainer> = None;

    loop {
        let Some(current) = trainer.as_mut() else {
            if ui::draw_genesis_screen(&mut params, &mut ui_state) {
                match start_run(&params, ui_state.write_records) {
                    Ok(new_trainer) => {
                        ui_state.status_message = None;
                        ui_state.clear_history();
                        event_log.clear();
                        trainer = Some(new_trainer);
                    }
                    Err(e) => {
                        log::error!("failed to start run: {e:#}");
                        ui_state.status_message = Some(format!("{e:#}"));
                    }
                }
            }
            next_frame().await;
            continue;
        };

        if is_key_pressed(KeyCode::Space) {
            ui_state.paused = !ui_state.paused;
        }

        if !ui_state.paused && current.terminated().is_none() {
            let step_start = Instant::now();
            let steps = ui_state.simulation_speed.round().max(1.0) as usize;

            for _ in 0..steps {
                match current.tick() {
                    Ok(TickOutcome::Running) => {
                        event_log.record(current.world().time(), current.events());
                    }
                    Ok(TickOutcome::GenerationEnded(summary)) => {
                        event_log.record(current.world().time(), current.events());
                        event_log.log(
                            current.world().time(),
                            format!(
                                "Generation {} ended, average score {:.2}",
                                summary.generation, summary.average_score
                            ),
                            EventColor::Generation,
                        );
                        ui_state.record_generation(&summary);
                    }
                    Ok(TickOutcome::Terminated(reason)) => {
                        ui_state.status_message = Some(format!("Run finished: {reason:?}"));
                        break;
                    }
                    Err(e) => {
                        log::error!("simulation error: {e}");
                        ui_state.status_message = Some(format!("Error: {e}"));
                        ui_state.paused = true;
                        break;
                    }
                }
            }

            ui_state.last_step_time_ms = step_start.elapsed().as_secs_f32() * 1000.0 / steps as f32;
        }

        clear_background(WHITE);

        if ui_state.rendering_enabled {
            let viewport = graphics::Viewport::fit(current.params(), ui_state.stats_panel_width);
            let snapshot = current.world().snapshot();
            graphics::draw_arena(current.params(), &viewport);
            graphics::draw_hazards(&snapshot, &viewport);
            graphics::draw_resources(&snapshot, &viewport);
            graphics::draw_agents(&snapshot, current.world().sensor(), current.params(), &viewport);
        }

        ui::draw_ui(&mut ui_state, current, &event_log);
        ui::process_egui();

        if ui_state.reset_requested {
            ui_state.reset_requested = false;
            ui_state.paused = false;
            trainer = None;
        }

        next_frame().await
    }
}
