//! 3D orbital scenes: barycenter, seasons and the solar system
//!
//! Bodies are drawn as depth-sorted discs whose radius follows the
//! perspective scale at their centre. Orbits are projected polylines.

use std::f32::consts::{FRAC_PI_3, TAU};

use glam::{Mat4, Quat, Vec2, Vec3};
use lab_physics::{
    circle_point, BarycenterSystem, SeasonalOrbit, SolarSystem, EARTH_BODY_RADIUS, MOON_BODY_RADIUS,
    PLANETS, SEASONS_EARTH_RADIUS, SUN_RADIUS,
};

use crate::camera::Camera;
use crate::primitives::{palette, Anchor, Color, Frame};

/// Closed circle of `segments` points around `center` in the plane spanned by `u` and `v`
fn circle_3d(center: Vec3, u: Vec3, v: Vec3, radius: f32, segments: usize) -> Vec<Vec3> {
    (0..=segments)
        .map(|i| {
            let p = circle_point(radius, i as f32 / segments as f32 * TAU);
            center + u * p.x + v * p.y
        })
        .collect()
}

/// Horizontal (XZ) circle
fn ring_xz(center: Vec3, radius: f32, segments: usize) -> Vec<Vec3> {
    circle_3d(center, Vec3::X, Vec3::Z, radius, segments)
}

/// Project a path; any point behind the camera drops the whole path
fn project_path(camera: &Camera, view_proj: &Mat4, points: &[Vec3]) -> Option<Vec<Vec2>> {
    points
        .iter()
        .map(|&p| camera.project_with(view_proj, p).map(|p| p.screen))
        .collect()
}

fn draw_path(
    frame: &mut Frame,
    camera: &Camera,
    view_proj: &Mat4,
    points: &[Vec3],
    width: f32,
    color: Color,
) {
    if let Some(screen) = project_path(camera, view_proj, points) {
        frame.polyline(screen, width, color);
    }
}

fn draw_dashed(
    frame: &mut Frame,
    camera: &Camera,
    view_proj: &Mat4,
    from: Vec3,
    to: Vec3,
    color: Color,
) {
    if let (Some(a), Some(b)) = (
        camera.project_with(view_proj, from),
        camera.project_with(view_proj, to),
    ) {
        frame.dashed(a.screen, b.screen, 1.5, color);
    }
}

/// A sphere awaiting depth sorting
#[derive(Debug, Clone, Copy)]
struct Body {
    center: Vec3,
    radius: f32,
    color: Color,
    glow: Option<f32>,
}

impl Body {
    fn new(center: Vec3, radius: f32, color: Color) -> Self {
        Self {
            center,
            radius,
            color,
            glow: None,
        }
    }

    fn with_glow(mut self, scale: f32) -> Self {
        self.glow = Some(scale);
        self
    }
}

/// Draw bodies far to near
fn draw_bodies(frame: &mut Frame, camera: &Camera, view_proj: &Mat4, bodies: &[Body]) {
    let mut projected: Vec<_> = bodies
        .iter()
        .filter_map(|body| {
            camera
                .project_with(view_proj, body.center)
                .map(|p| (p, body))
        })
        .collect();
    projected.sort_by(|a, b| b.0.depth.total_cmp(&a.0.depth));

    for (p, body) in projected {
        let radius = (body.radius * p.scale).max(1.0);
        if let Some(glow) = body.glow {
            frame.disc(p.screen, radius * glow, body.color.with_alpha(0.2));
        }
        frame.disc(p.screen, radius, body.color);
    }
}

fn label_at(
    frame: &mut Frame,
    camera: &Camera,
    view_proj: &Mat4,
    world: Vec3,
    text: &str,
    color: Color,
) {
    if let Some(p) = camera.project_with(view_proj, world) {
        frame.badge(p.screen, text, 11.0, color);
    }
}

/// Plain text starting just right of a projected point
fn caption_at(
    frame: &mut Frame,
    camera: &Camera,
    view_proj: &Mat4,
    world: Vec3,
    text: &str,
    color: Color,
) {
    if let Some(p) = camera.project_with(view_proj, world) {
        frame.text_anchored(p.screen + Vec2::new(6.0, 0.0), text, 11.0, color, Anchor::Left);
    }
}

/// Earth and Moon around their common barycenter
#[derive(Debug, Clone)]
pub struct BarycenterView {
    pub camera: Camera,
    /// Draw each body's orbit circle
    pub show_trails: bool,
}

impl BarycenterView {
    pub const EYE: Vec3 = Vec3::new(0.0, 50.0, 50.0);
    pub const FOV_DEG: f32 = 45.0;
    pub const ZOOM_RANGE: (f32, f32) = (10.0, 200.0);
    const GRID_Y: f32 = -5.0;

    pub fn new(viewport: Vec2) -> Self {
        Self {
            camera: Camera::looking_at(Self::EYE, Vec3::ZERO, Self::FOV_DEG, viewport),
            show_trails: true,
        }
    }

    pub fn reset(&mut self) {
        log::debug!("resetting barycenter view");
        *self = Self::new(self.camera.viewport);
    }

    pub fn render(&self, system: &BarycenterSystem, frame: &mut Frame) {
        let camera = &self.camera;
        let view_proj = camera.build_view_projection_matrix();
        let positions = system.positions();
        let (r_earth, r_moon) = system.radii();

        for i in -5..=5 {
            let offset = i as f32 * 10.0;
            let grid = palette::GRID.with_alpha(0.6);
            draw_path(
                frame,
                camera,
                &view_proj,
                &[
                    Vec3::new(offset, Self::GRID_Y, -50.0),
                    Vec3::new(offset, Self::GRID_Y, 50.0),
                ],
                1.0,
                grid,
            );
            draw_path(
                frame,
                camera,
                &view_proj,
                &[
                    Vec3::new(-50.0, Self::GRID_Y, offset),
                    Vec3::new(50.0, Self::GRID_Y, offset),
                ],
                1.0,
                grid,
            );
        }

        let bary = positions.barycenter;
        if self.show_trails {
            draw_path(
                frame,
                camera,
                &view_proj,
                &ring_xz(bary, r_earth, 64),
                1.5,
                palette::BLUE.with_alpha(0.2),
            );
            draw_path(
                frame,
                camera,
                &view_proj,
                &ring_xz(bary, r_moon, 128),
                1.5,
                palette::MUTED.with_alpha(0.2),
            );
        }
        draw_dashed(
            frame,
            camera,
            &view_proj,
            bary - Vec3::Y * 100.0,
            bary + Vec3::Y * 100.0,
            palette::RED,
        );
        draw_path(
            frame,
            camera,
            &view_proj,
            &[positions.primary, positions.secondary],
            1.0,
            palette::TEXT.with_alpha(0.1),
        );

        // Meridian dot shows each body's spin
        let spin_mark = |center: Vec3, radius: f32, spin: f32| {
            center + Vec3::new(spin.cos(), 0.0, -spin.sin()) * radius
        };
        draw_bodies(
            frame,
            camera,
            &view_proj,
            &[
                Body::new(positions.primary, EARTH_BODY_RADIUS, palette::BLUE).with_glow(1.3),
                Body::new(positions.secondary, MOON_BODY_RADIUS, palette::MUTED),
                Body::new(
                    spin_mark(positions.primary, EARTH_BODY_RADIUS, system.primary_spin),
                    0.2,
                    palette::GREEN,
                ),
                Body::new(
                    spin_mark(positions.secondary, MOON_BODY_RADIUS, system.secondary_spin),
                    0.08,
                    palette::SLATE,
                ),
                Body::new(bary, 0.25, palette::RED),
            ],
        );

        let up = Vec3::Y * 3.0;
        label_at(frame, camera, &view_proj, positions.primary + up, "EARTH", palette::BLUE);
        label_at(frame, camera, &view_proj, positions.secondary + up, "MOON", palette::MUTED);
        label_at(frame, camera, &view_proj, bary - up, "BARYCENTER", palette::RED);
    }
}

/// Tilted Earth on its yearly orbit
#[derive(Debug, Clone)]
pub struct SeasonsView {
    pub camera: Camera,
    pub show_rays: bool,
    pub show_labels: bool,
    /// Centre the view on Earth instead of the Sun
    pub follow_earth: bool,
}

impl SeasonsView {
    pub const EYE: Vec3 = Vec3::new(0.0, 60.0, 100.0);
    pub const FOV_DEG: f32 = 40.0;
    pub const ZOOM_RANGE: (f32, f32) = (20.0, 400.0);
    /// Fraction of the remaining distance the target covers per frame
    pub const FOLLOW_EASE: f32 = 0.05;

    pub fn new(viewport: Vec2) -> Self {
        Self {
            camera: Camera::looking_at(Self::EYE, Vec3::ZERO, Self::FOV_DEG, viewport),
            show_rays: true,
            show_labels: true,
            follow_earth: false,
        }
    }

    pub fn reset(&mut self) {
        log::debug!("resetting seasons view");
        *self = Self::new(self.camera.viewport);
    }

    /// Ease the view target toward Earth or the Sun
    pub fn update(&mut self, orbit: &SeasonalOrbit) {
        let desired = if self.follow_earth {
            orbit.position()
        } else {
            Vec3::ZERO
        };
        self.camera.ease_target(desired, Self::FOLLOW_EASE);
    }

    pub fn render(&self, orbit: &SeasonalOrbit, frame: &mut Frame) {
        let camera = &self.camera;
        let view_proj = camera.build_view_projection_matrix();
        let earth = orbit.position();
        let radius = SEASONS_EARTH_RADIUS;
        let tilt = orbit.tilt_deg().to_radians();

        // North pole leans toward +x, which faces the Sun at the June solstice
        let axis = Quat::from_rotation_z(-tilt) * Vec3::Y;
        let equator_u = Quat::from_rotation_z(-tilt) * Vec3::X;

        draw_path(
            frame,
            camera,
            &view_proj,
            &ring_xz(Vec3::ZERO, orbit.orbit_radius, 128),
            1.0,
            palette::MUTED.with_alpha(0.3),
        );

        if self.show_rays {
            draw_dashed(frame, camera, &view_proj, Vec3::ZERO, earth, palette::AMBER);
        }

        draw_bodies(
            frame,
            camera,
            &view_proj,
            &[
                Body::new(Vec3::ZERO, SUN_RADIUS, palette::AMBER).with_glow(1.4),
                Body::new(earth, radius, palette::BLUE),
            ],
        );

        draw_path(
            frame,
            camera,
            &view_proj,
            &[earth - axis * radius * 1.5, earth + axis * radius * 1.5],
            2.0,
            palette::TEXT.with_alpha(0.7),
        );
        draw_path(
            frame,
            camera,
            &view_proj,
            &circle_3d(earth, equator_u, Vec3::Z, radius * 1.01, 64),
            1.5,
            palette::RED,
        );
        let tropic_offset = tilt.sin() * radius;
        let tropic_radius = tilt.cos() * radius * 1.01;
        for sign in [1.0, -1.0] {
            draw_path(
                frame,
                camera,
                &view_proj,
                &circle_3d(earth + axis * tropic_offset * sign, equator_u, Vec3::Z, tropic_radius, 64),
                1.0,
                palette::AMBER.with_alpha(0.8),
            );
        }

        let meridian = (equator_u * orbit.spin.cos() + Vec3::Z * orbit.spin.sin()) * radius;
        draw_bodies(
            frame,
            camera,
            &view_proj,
            &[Body::new(earth + meridian, 0.5, palette::GREEN)],
        );

        if self.show_labels {
            label_at(
                frame,
                camera,
                &view_proj,
                earth + Vec3::Y * (radius + 3.0),
                "EARTH",
                palette::TEXT,
            );
            caption_at(
                frame,
                camera,
                &view_proj,
                earth + equator_u * radius * 1.05,
                "Equator",
                palette::RED,
            );
            caption_at(
                frame,
                camera,
                &view_proj,
                earth + axis * tropic_offset + equator_u * radius * 1.05,
                "Tropic of Cancer",
                palette::AMBER,
            );
            caption_at(
                frame,
                camera,
                &view_proj,
                earth - axis * tropic_offset + equator_u * radius * 1.05,
                "Tropic of Capricorn",
                palette::AMBER,
            );
            label_at(frame, camera, &view_proj, Vec3::Y * (SUN_RADIUS + 3.0), "SUN", palette::AMBER);
        }
    }
}

/// What a click on the solar system scene landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolarPick {
    Planet(usize),
    Sun,
    Nothing,
}

/// The eight planets around the Sun
#[derive(Debug, Clone)]
pub struct SolarView {
    pub camera: Camera,
}

impl SolarView {
    pub const EYE: Vec3 = Vec3::new(0.0, 60.0, 90.0);
    pub const FOV_DEG: f32 = 45.0;
    pub const ZOOM_RANGE: (f32, f32) = (10.0, 300.0);
    /// Pick radius floor in pixels so distant planets stay clickable
    const MIN_PICK_RADIUS: f32 = 6.0;
    const SATURN_RING: Color = Color::hex(0xc2b280);

    pub fn new(viewport: Vec2) -> Self {
        Self {
            camera: Camera::looking_at(Self::EYE, Vec3::ZERO, Self::FOV_DEG, viewport),
        }
    }

    /// With nothing selected, drift back to the default framing
    pub fn update(&mut self, system: &SolarSystem) {
        if system.selected().is_none() {
            self.camera.ease_eye(Self::EYE, 0.05);
            self.camera.ease_target(Vec3::ZERO, 0.1);
        }
    }

    /// Nearest planet under the pointer, else the Sun, else nothing
    pub fn pick(&self, system: &SolarSystem, pointer: Vec2) -> SolarPick {
        let view_proj = self.camera.build_view_projection_matrix();
        let hit = |center: Vec3, radius: f32| {
            self.camera
                .project_with(&view_proj, center)
                .filter(|p| {
                    p.screen.distance(pointer) <= (radius * p.scale).max(Self::MIN_PICK_RADIUS)
                })
                .map(|p| p.depth)
        };

        let planet = system
            .positions()
            .enumerate()
            .filter_map(|(i, (planet, position))| hit(position, planet.size).map(|d| (i, d)))
            .min_by(|a, b| a.1.total_cmp(&b.1));
        let sun = hit(Vec3::ZERO, SUN_RADIUS);
        log::trace!("pick at {:?}: planet {:?}, sun {:?}", pointer, planet, sun);

        match (planet, sun) {
            (Some((_, planet_depth)), Some(sun_depth)) if sun_depth < planet_depth => SolarPick::Sun,
            (Some((i, _)), _) => SolarPick::Planet(i),
            (None, Some(_)) => SolarPick::Sun,
            (None, None) => SolarPick::Nothing,
        }
    }

    pub fn render(&self, system: &SolarSystem, frame: &mut Frame) {
        let camera = &self.camera;
        let view_proj = camera.build_view_projection_matrix();

        for planet in PLANETS.iter() {
            draw_path(
                frame,
                camera,
                &view_proj,
                &ring_xz(Vec3::ZERO, planet.distance, 128),
                1.0,
                palette::TEXT.with_alpha(0.25),
            );
        }

        let mut bodies = vec![Body::new(Vec3::ZERO, SUN_RADIUS, palette::AMBER).with_glow(1.05)];
        bodies.extend(
            system
                .positions()
                .map(|(planet, position)| Body::new(position, planet.size, Color::from_array(planet.color))),
        );
        draw_bodies(frame, camera, &view_proj, &bodies);

        for (i, (planet, position)) in system.positions().enumerate() {
            if planet.id == "saturn" {
                // Ring plane tipped 60 degrees about x
                let (sin, cos) = (-FRAC_PI_3).sin_cos();
                let ring = circle_3d(
                    position,
                    Vec3::X,
                    Vec3::new(0.0, cos, sin),
                    planet.size * 1.8,
                    64,
                );
                draw_path(frame, camera, &view_proj, &ring, 2.0, Self::SATURN_RING.with_alpha(0.7));
            }

            if system.selected() == Some(i) {
                if let Some(p) = camera.project_with(&view_proj, position) {
                    let radius = (planet.size * p.scale).max(1.0);
                    frame.ring(p.screen, radius + 4.0, 1.5, palette::TEXT);
                    frame.badge(
                        p.screen - Vec2::new(0.0, radius + 16.0),
                        planet.name,
                        12.0,
                        palette::TEXT,
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::Shape;
    use lab_physics::{ReferenceFrame, Simulation};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const VIEWPORT: Vec2 = Vec2::new(1200.0, 800.0);

    fn labels(frame: &Frame) -> Vec<String> {
        frame
            .shapes
            .iter()
            .filter_map(|s| match s {
                Shape::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_ring_closed() {
        let ring = ring_xz(Vec3::ZERO, 10.0, 64);
        assert_eq!(ring.len(), 65);
        assert!((ring[0] - ring[64]).length() < 1e-4);
        assert!(ring.iter().all(|p| (p.length() - 10.0).abs() < 1e-4));
    }

    #[test]
    fn test_bodies_sorted_far_to_near() {
        let camera = Camera::looking_at(Vec3::new(0.0, 0.0, 50.0), Vec3::ZERO, 45.0, VIEWPORT);
        let view_proj = camera.build_view_projection_matrix();
        let near = Body::new(Vec3::new(0.0, 0.0, 10.0), 1.0, palette::RED);
        let far = Body::new(Vec3::new(0.0, 0.0, -10.0), 1.0, palette::BLUE);
        let mut frame = Frame::new(VIEWPORT);
        draw_bodies(&mut frame, &camera, &view_proj, &[near, far]);

        let colors: Vec<Color> = frame
            .shapes
            .iter()
            .filter_map(|s| match s {
                Shape::Circle { fill: Some(c), .. } => Some(*c),
                _ => None,
            })
            .collect();
        assert_eq!(colors, vec![palette::BLUE, palette::RED]);
    }

    #[test]
    fn test_barycenter_scene_labels() {
        let view = BarycenterView::new(VIEWPORT);
        let mut system = BarycenterSystem::default();
        system.frame = ReferenceFrame::Barycentric;
        let mut frame = Frame::new(VIEWPORT);
        view.render(&system, &mut frame);
        let labels = labels(&frame);
        for name in ["EARTH", "MOON", "BARYCENTER"] {
            assert!(labels.contains(&name.to_string()), "missing {}", name);
        }
    }

    #[test]
    fn test_barycenter_trails_toggle() {
        let mut view = BarycenterView::new(VIEWPORT);
        let system = BarycenterSystem::default();
        let mut with_trails = Frame::new(VIEWPORT);
        view.render(&system, &mut with_trails);

        view.show_trails = false;
        let mut without = Frame::new(VIEWPORT);
        view.render(&system, &mut without);
        assert_eq!(with_trails.len(), without.len() + 2);
    }

    #[test]
    fn test_seasons_toggles() {
        let orbit = SeasonalOrbit::default();
        let mut view = SeasonsView::new(VIEWPORT);
        let mut frame = Frame::new(VIEWPORT);
        view.render(&orbit, &mut frame);
        assert!(labels(&frame).contains(&"EARTH".to_string()));

        view.show_labels = false;
        view.show_rays = false;
        let mut quiet = Frame::new(VIEWPORT);
        view.render(&orbit, &mut quiet);
        assert!(labels(&quiet).is_empty());
        assert!(quiet.len() < frame.len());
    }

    #[test]
    fn test_seasons_ring_captions_left_anchored() {
        let orbit = SeasonalOrbit::default();
        let view = SeasonsView::new(VIEWPORT);
        let mut frame = Frame::new(VIEWPORT);
        view.render(&orbit, &mut frame);
        let captions: Vec<&str> = frame
            .shapes
            .iter()
            .filter_map(|s| match s {
                Shape::Text {
                    text,
                    anchor: Anchor::Left,
                    background: None,
                    ..
                } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(captions, vec!["Equator", "Tropic of Cancer", "Tropic of Capricorn"]);
    }

    #[test]
    fn test_seasons_follow_eases_toward_earth() {
        let orbit = SeasonalOrbit::default();
        let mut view = SeasonsView::new(VIEWPORT);
        view.follow_earth = true;
        view.update(&orbit);
        let expected = orbit.position() * SeasonsView::FOLLOW_EASE;
        assert!((view.camera.target - expected).length() < 1e-4);

        for _ in 0..500 {
            view.update(&orbit);
        }
        assert!((view.camera.target - orbit.position()).length() < 1e-3);
    }

    #[test]
    fn test_solar_pick() {
        let mut system = SolarSystem::with_rng(&mut StdRng::seed_from_u64(7));
        system.tick(3.0);
        let view = SolarView::new(VIEWPORT);

        let centre = view.camera.project(Vec3::ZERO).unwrap().screen;
        assert_eq!(view.pick(&system, centre), SolarPick::Sun);
        assert_eq!(view.pick(&system, Vec2::new(-5000.0, -5000.0)), SolarPick::Nothing);

        let jupiter = PLANETS.iter().position(|p| p.id == "jupiter").unwrap();
        let at = view.camera.project(system.position(jupiter).unwrap()).unwrap().screen;
        assert_eq!(view.pick(&system, at), SolarPick::Planet(jupiter));
    }

    #[test]
    fn test_solar_selection_badge() {
        let mut system = SolarSystem::with_rng(&mut StdRng::seed_from_u64(1));
        assert!(system.select_by_id("mars"));
        let view = SolarView::new(VIEWPORT);
        let mut frame = Frame::new(VIEWPORT);
        view.render(&system, &mut frame);
        assert_eq!(labels(&frame), vec!["Mars".to_string()]);
    }
}
