use evo_arena::simulation::agent::AgentState;
use evo_arena::simulation::hazard::HazardKind;
use evo_arena::simulation::params::Params;
use evo_arena::simulation::sensor::SensorArray;
use evo_arena::simulation::snapshot::FrameSnapshot;
use macroquad::prelude::*;

const AGENT_RADIUS: f32 = 3.0;
const RESOURCE_RADIUS: f32 = 1.6;
const HAZARD_RADIUS: f32 = 2.2;

/// Maps arena coordinates (origin at the center, y up) onto the screen area
/// left of the stats panel.
pub struct Viewport {
    center_x: f32,
    center_y: f32,
    scale: f32,
}

impl Viewport {
    pub fn fit(params: &Params, panel_width: f32) -> Self {
        let area_w = (screen_width() - panel_width).max(1.0);
        let area_h = screen_height();
        let scale = (area_w / params.arena_width).min(area_h / params.arena_height) * 0.95;
        Self {
            center_x: area_w / 2.0,
            center_y: area_h / 2.0,
            scale,
        }
    }
}

trait ToScreen {
    type Output;
    fn to_screen(&self, viewport: &Viewport) -> Self::Output;
}

impl ToScreen for [f32; 2] {
    type Output = Vec2;
    fn to_screen(&self, viewport: &Viewport) -> Vec2 {
        vec2(
            viewport.center_x + self[0] * viewport.scale,
            viewport.center_y - self[1] * viewport.scale,
        )
    }
}

impl ToScreen for f32 {
    type Output = f32;
    fn to_screen(&self, viewport: &Viewport) -> f32 {
        self * viewport.scale
    }
}

pub fn draw_arena(params: &Params, viewport: &Viewport) {
    let top_left = [-params.arena_width / 2.0, params.arena_height / 2.0].to_screen(viewport);
    draw_rectangle_lines(
        top_left.x,
        top_left.y,
        params.arena_width.to_screen(viewport),
        params.arena_height.to_screen(viewport),
        1.0,
        Color::from_rgba(120, 120, 120, 255),
    );
}

pub fn draw_resources(snapshot: &FrameSnapshot, viewport: &Viewport) {
    let radius = RESOURCE_RADIUS.to_screen(viewport);
    for resource in snapshot.resources.iter().filter(|r| r.active) {
        let pos = resource.pos.to_screen(viewport);
        draw_circle(pos.x, pos.y, radius, Color::from_rgba(255, 150, 40, 255));
    }
}

pub fn draw_hazards(snapshot: &FrameSnapshot, viewport: &Viewport) {
    let radius = HAZARD_RADIUS.to_screen(viewport);
    for hazard in &snapshot.hazards {
        let pos = hazard.pos.to_screen(viewport);
        let color = match hazard.kind {
            HazardKind::Boundary => Color::from_rgba(90, 90, 90, 255),
            HazardKind::Field => Color::from_rgba(200, 40, 40, 255),
        };
        draw_poly(pos.x, pos.y, 3, radius, -90.0, color);
    }
}

pub fn draw_agents(snapshot: &FrameSnapshot, sensor: &SensorArray, params: &Params, viewport: &Viewport) {
    let radius = AGENT_RADIUS.to_screen(viewport);
    let ray_length = params.view_distance.to_screen(viewport);

    for agent in &snapshot.agents {
        let pos = agent.pos.to_screen(viewport);

        if agent.state == AgentState::Alive {
            // one ray per sensor slot, colored by what it sees
            for (k, &kind) in agent.sensor_kinds.iter().enumerate() {
                let axis = sensor.slot_axis(agent.heading, k);
                let end = pos + vec2(axis.cos(), -axis.sin()) * ray_length;
                let color = if kind > 0.0 {
                    Color::from_rgba(40, 180, 40, 160)
                } else if kind < 0.0 {
                    Color::from_rgba(220, 40, 40, 160)
                } else {
                    Color::from_rgba(0, 0, 0, 40)
                };
                draw_line(pos.x, pos.y, end.x, end.y, 1.0, color);
            }
        }

        let body = match agent.state {
            AgentState::Alive => Color::from_rgba(30, 30, 30, 255),
            AgentState::Dying | AgentState::Removed => Color::from_rgba(160, 160, 160, 255),
        };
        draw_circle(pos.x, pos.y, radius, body);

        let nose = pos + vec2(agent.heading.cos(), -agent.heading.sin()) * radius * 1.6;
        draw_line(pos.x, pos.y, nose.x, nose.y, 2.0, body);

        // agent health bar (scaled)
        let health_bar_width = 20.0;
        let health_bar_height = 2.0;
        let health_bar_offset = 2.0;
        let health_bar_x = pos.x - health_bar_width / 2.0;
        let health_bar_y = pos.y - radius - health_bar_height - health_bar_offset;
        draw_rectangle(
            health_bar_x,
            health_bar_y,
            health_bar_width,
            health_bar_height,
            Color::from_rgba(100, 100, 100, 200),
        );
        draw_rectangle(
            health_bar_x,
            health_bar_y,
            health_bar_width * agent.health.clamp(0.0, 1.0),
            health_bar_height,
            Color::from_rgba(255, 0, 0, 255),
        );

        let font_size = 12.0;
        let score_text = format!("{}: {}", agent.id, agent.resources_eaten);
        let score_text_size = measure_text(&score_text, None, font_size as u16, 1.0);
        draw_text(
            &score_text,
            pos.x - score_text_size.width / 2.0,
            health_bar_y - 4.0,
            font_size,
            BLACK,
        );
    }
}
