use std::f32::consts::PI;

use glam::Vec2;
use lab_physics::Simulation;
use wave_simulation::*;

fn assert_wall_pinned(sim: &WaveSimulation) {
    let wall = sim.nodes().last().unwrap();
    assert_eq!(wall.position, wall.rest_position());
    assert_eq!(wall.velocity, Vec2::ZERO);
}

#[test]
fn test_wall_pinned_in_every_drive() {
    for mode in [WaveMode::Transverse, WaveMode::Longitudinal] {
        let mut sim = WaveSimulation::new(WaveParams::default(), mode);

        sim.trigger_pulse();
        for _ in 0..200 {
            sim.step();
            assert_wall_pinned(&sim);
        }

        sim.set_auto(true);
        for _ in 0..500 {
            sim.step();
            assert_wall_pinned(&sim);
        }

        sim.begin_drag();
        for i in 0..200 {
            sim.drag_to(Vec2::new(i as f32 - 60.0, (i as f32 * 0.1).sin() * 250.0));
            sim.step();
            assert_wall_pinned(&sim);
        }
        sim.end_drag();

        for _ in 0..100 {
            sim.tick(1.0 / 30.0);
            assert_wall_pinned(&sim);
        }
    }
}

#[test]
fn test_energy_bounded_without_damping() {
    let params = WaveParams {
        damping: 0.0,
        ..Default::default()
    };
    let count = params.node_count;
    let last = (count - 1) as f32;

    // Fundamental longitudinal mode, node 0 and the wall at rest
    let nodes = (0..count)
        .map(|i| {
            let mut node = WaveNode::at_rest(i as f32 * params.rest_spacing);
            node.position.x += 4.0 * (PI * i as f32 / last).sin();
            node
        })
        .collect();
    let mut sim = WaveSimulation::from_nodes(params, WaveMode::Longitudinal, nodes);

    let initial = sim.energy();
    assert!(initial > 0.0);
    for _ in 0..5000 {
        sim.step();
        let energy = sim.energy();
        assert!(energy.is_finite());
        assert!(energy < 3.0 * initial, "energy grew to {} from {}", energy, initial);
    }
}

#[test]
fn test_damping_dissipates_pulse() {
    let mut sim = WaveSimulation::new(WaveParams::default(), WaveMode::Transverse);
    sim.trigger_pulse();
    sim.step();
    let early = sim.energy();
    for _ in 0..20_000 {
        sim.step();
    }
    assert!(sim.energy() < early * 0.01);
}

#[test]
fn test_pulse_reaches_far_nodes() {
    let mut sim = WaveSimulation::new(WaveParams::default(), WaveMode::Longitudinal);
    sim.trigger_pulse();
    let probe = sim.nodes().len() / 2;
    let mut moved = false;
    for _ in 0..600 {
        sim.advance_frame();
        if sim.nodes()[probe].displacement().x.abs() > 0.5 {
            moved = true;
            break;
        }
    }
    assert!(moved);
}

#[test]
fn test_longitudinal_drive_produces_both_zones() {
    let mut sim = WaveSimulation::new(WaveParams::default(), WaveMode::Longitudinal);
    sim.set_auto(true);
    let mut saw_compression = false;
    let mut saw_rarefaction = false;
    for _ in 0..400 {
        sim.advance_frame();
        for zone in sim.zones() {
            assert!(zone.pair_count >= 2);
            match zone.kind {
                ZoneKind::Compression => saw_compression = true,
                ZoneKind::Rarefaction => saw_rarefaction = true,
            }
        }
    }
    assert!(saw_compression && saw_rarefaction);
}

#[test]
fn test_transverse_has_no_zones() {
    let mut sim = WaveSimulation::new(WaveParams::default(), WaveMode::Transverse);
    sim.set_auto(true);
    for _ in 0..200 {
        sim.advance_frame();
        assert!(sim.zones().is_empty());
    }
}

#[test]
fn test_reset_returns_to_rest() {
    let mut sim = WaveSimulation::default();
    sim.set_auto(true);
    for _ in 0..50 {
        sim.advance_frame();
    }
    sim.reset();
    assert_eq!(sim.drive(), Drive::Idle);
    assert_eq!(sim.energy(), 0.0);
}
