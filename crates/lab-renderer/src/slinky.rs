//! Slinky view of the wave chain
//!
//! The 1-D chain is densified into a helix around its spine and drawn with a
//! simple perspective divide, which gives the coil its depth.

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};
use lab_physics::{lerp, project};
use wave_simulation::{WaveMode, WaveNode, WaveSimulation, ZoneKind};

use crate::primitives::{palette, Color, Frame};

/// Geometry of the slinky drawing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlinkyLayout {
    /// Screen position of chain coordinate (0, 0)
    pub origin: Vec2,
    pub perspective: f32,
    pub coil_radius: f32,
    pub coils_per_node: usize,
}

impl SlinkyLayout {
    pub const PERSPECTIVE: f32 = 800.0;
    pub const COIL_RADIUS: f32 = 40.0;
    pub const VIEW_OFFSET: Vec2 = Vec2::new(50.0, 0.0);
    /// Driver hit box half-extents around node 0
    pub const HIT_EXTENT: Vec2 = Vec2::new(40.0, 60.0);

    /// Centre the chain in a viewport
    pub fn for_viewport(viewport: Vec2, node_count: usize, rest_spacing: f32) -> Self {
        let chain_length = node_count as f32 * rest_spacing;
        Self {
            origin: Vec2::new(viewport.x * 0.5 - chain_length * 0.5, viewport.y * 0.5)
                + Self::VIEW_OFFSET,
            perspective: Self::PERSPECTIVE,
            coil_radius: Self::COIL_RADIUS,
            coils_per_node: 2,
        }
    }

    /// Pointer position in chain coordinates. The z = 0 plane has unit scale.
    pub fn screen_to_chain(&self, pointer: Vec2) -> Vec2 {
        pointer - self.origin
    }

    pub fn chain_to_screen(&self, point: Vec2) -> Vec2 {
        project(self.origin, point.extend(0.0), self.perspective)
    }

    /// Whether the pointer grabs the driver box on node 0
    pub fn hit_driver(&self, pointer: Vec2, driver: &WaveNode) -> bool {
        let delta = (pointer - self.chain_to_screen(driver.position)).abs();
        delta.x < Self::HIT_EXTENT.x && delta.y < Self::HIT_EXTENT.y
    }
}

/// World-space points of the helix through the chain.
///
/// Each node span gets `coils_per_node` samples and one full turn of the coil,
/// so the angle advances by `1 / coils_per_node` of a turn per sample.
pub fn helix_points(nodes: &[WaveNode], coils_per_node: usize, coil_radius: f32) -> Vec<Vec3> {
    if nodes.len() < 2 || coils_per_node == 0 {
        return Vec::new();
    }
    let spans = nodes.len() - 1;
    let total_coils = nodes.len() * coils_per_node;
    let turns = nodes.len() as f32;

    (0..spans * coils_per_node)
        .map(|i| {
            let index = i / coils_per_node;
            let t = (i % coils_per_node) as f32 / coils_per_node as f32;
            let (a, b) = (nodes[index].position, nodes[index + 1].position);
            let spine = Vec2::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t));

            let angle = i as f32 / total_coils as f32 * turns * TAU;
            Vec3::new(
                spine.x,
                spine.y + angle.cos() * coil_radius,
                angle.sin() * coil_radius,
            )
        })
        .collect()
}

pub fn mode_color(mode: WaveMode) -> Color {
    match mode {
        WaveMode::Longitudinal => palette::CYAN,
        WaveMode::Transverse => palette::PURPLE,
    }
}

fn zone_color(kind: ZoneKind) -> Color {
    match kind {
        ZoneKind::Compression => palette::CYAN,
        ZoneKind::Rarefaction => palette::PINK,
    }
}

/// Draw the wall, coil, zone markers and driver box
pub fn render_slinky(simulation: &WaveSimulation, layout: &SlinkyLayout, frame: &mut Frame) {
    let nodes = simulation.nodes();
    let (Some(first), Some(last)) = (nodes.first(), nodes.last()) else {
        return;
    };

    let wall = layout.chain_to_screen(last.position);
    frame.segment(
        wall - Vec2::new(0.0, 100.0),
        wall + Vec2::new(0.0, 100.0),
        8.0,
        palette::SLATE,
    );

    let color = mode_color(simulation.mode());
    let coil: Vec<Vec2> = helix_points(nodes, layout.coils_per_node, layout.coil_radius)
        .into_iter()
        .map(|p| project(layout.origin, p, layout.perspective))
        .collect();
    // Soft glow under the wire
    frame.polyline(coil.clone(), 10.0, color.with_alpha(0.2));
    frame.polyline(coil, 4.0, color);

    for zone in simulation.zones() {
        let anchor = Vec2::new(zone.center_x, layout.coil_radius + 30.0);
        frame.badge(
            layout.chain_to_screen(anchor),
            zone.kind.marker(),
            12.0,
            zone_color(zone.kind),
        );
    }

    let hand = layout.chain_to_screen(first.position);
    frame.rect(hand - Vec2::new(10.0, 25.0), Vec2::new(20.0, 50.0), palette::TEXT);
    let label = if simulation.is_auto() { "AUTO" } else { "DRAG" };
    frame.text(hand, label, 9.0, palette::PANEL);
}
