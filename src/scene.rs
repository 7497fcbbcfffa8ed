//! Per-model views and pointer routing
//!
//! Pointer positions arrive in frame coordinates, i.e. already mapped from
//! window pixels into the space the active model draws in.

use glam::Vec2;
use lab_physics::BenchMode;
use lab_renderer::{
    render_bench, render_slinky, BarycenterView, Frame, SeasonsView, SlinkyLayout, SolarPick,
    SolarView, Starfield, BENCH_CANVAS,
};

use crate::lab::{Lab, Model};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Pressed(Vec2),
    Dragged { position: Vec2, delta: Vec2 },
    Released,
    Clicked(Vec2),
    /// Scroll in lines; positive zooms in
    Scrolled(f32),
}

pub struct Scene {
    viewport: Vec2,
    dragging_object: bool,
    pub barycenter: BarycenterView,
    pub seasons: SeasonsView,
    pub solar: SolarView,
    starfield: Starfield,
    time: f32,
}

impl Scene {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            viewport,
            dragging_object: false,
            barycenter: BarycenterView::new(viewport),
            seasons: SeasonsView::new(viewport),
            solar: SolarView::new(viewport),
            starfield: Starfield::new(),
            time: 0.0,
        }
    }

    /// Size of the frame a model draws into
    pub fn frame_size(&self, model: Model) -> Vec2 {
        match model {
            Model::ThinLensLab | Model::ConcaveMirror => BENCH_CANVAS,
            _ => self.viewport,
        }
    }

    pub fn resize(&mut self, viewport: Vec2) {
        if viewport.x <= 0.0 || viewport.y <= 0.0 || viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        self.barycenter.camera.resize(viewport);
        self.seasons.camera.resize(viewport);
        self.solar.camera.resize(viewport);
    }

    /// Restore the camera and view toggles of one model
    pub fn reset_view(&mut self, model: Model) {
        match model {
            Model::BarycenterLab => self.barycenter.reset(),
            Model::EarthSeasons => self.seasons.reset(),
            Model::SolarSystem => self.solar = SolarView::new(self.viewport),
            _ => {}
        }
    }

    fn slinky_layout(&self, lab: &Lab) -> SlinkyLayout {
        let params = lab.wave.params();
        SlinkyLayout::for_viewport(self.viewport, params.node_count, params.rest_spacing)
    }

    /// Per-frame view animation
    pub fn update(&mut self, lab: &Lab, dt: f32) {
        self.time += dt;
        match lab.active() {
            Model::EarthSeasons => self.seasons.update(&lab.seasons),
            Model::SolarSystem => self.solar.update(&lab.solar),
            _ => {}
        }
    }

    pub fn handle_pointer(&mut self, lab: &mut Lab, event: PointerEvent) {
        match lab.active() {
            Model::SlinkyLab => self.slinky_pointer(lab, event),
            Model::ThinLensLab | Model::ConcaveMirror => self.bench_pointer(lab, event),
            Model::BarycenterLab => {
                let (min, max) = BarycenterView::ZOOM_RANGE;
                orbit_pointer(&mut self.barycenter.camera, event, min, max);
            }
            Model::EarthSeasons => {
                let (min, max) = SeasonsView::ZOOM_RANGE;
                orbit_pointer(&mut self.seasons.camera, event, min, max);
            }
            Model::SolarSystem => {
                if let PointerEvent::Clicked(position) = event {
                    match self.solar.pick(&lab.solar, position) {
                        SolarPick::Planet(index) => lab.solar.select(Some(index)),
                        SolarPick::Sun | SolarPick::Nothing => lab.solar.select(None),
                    }
                    return;
                }
                let (min, max) = SolarView::ZOOM_RANGE;
                orbit_pointer(&mut self.solar.camera, event, min, max);
            }
        }
    }

    fn slinky_pointer(&mut self, lab: &mut Lab, event: PointerEvent) {
        let layout = self.slinky_layout(lab);
        match event {
            PointerEvent::Pressed(position) => {
                let Some(driver) = lab.wave.nodes().first().copied() else {
                    return;
                };
                if layout.hit_driver(position, &driver) {
                    lab.wave.begin_drag();
                    lab.wave.drag_to(layout.screen_to_chain(position));
                }
            }
            PointerEvent::Dragged { position, .. } => {
                lab.wave.drag_to(layout.screen_to_chain(position));
            }
            PointerEvent::Released => lab.wave.end_drag(),
            PointerEvent::Clicked(_) | PointerEvent::Scrolled(_) => {}
        }
    }

    fn bench_pointer(&mut self, lab: &mut Lab, event: PointerEvent) {
        let Some(bench) = lab.bench_mut() else {
            return;
        };
        if bench.mode() != BenchMode::Interactive {
            self.dragging_object = false;
            return;
        }
        match event {
            PointerEvent::Pressed(position) => {
                self.dragging_object = true;
                bench.drag_object_to(position.x);
            }
            PointerEvent::Dragged { position, .. } if self.dragging_object => {
                bench.drag_object_to(position.x);
            }
            PointerEvent::Released => self.dragging_object = false,
            _ => {}
        }
    }

    pub fn render(&self, lab: &Lab) -> Frame {
        let model = lab.active();
        let mut frame = Frame::new(self.frame_size(model));
        if model.is_orbital() {
            self.starfield.render(self.time, &mut frame);
        }
        match model {
            Model::SlinkyLab => render_slinky(&lab.wave, &self.slinky_layout(lab), &mut frame),
            Model::ThinLensLab => render_bench(&lab.lens, &mut frame),
            Model::ConcaveMirror => render_bench(&lab.mirror, &mut frame),
            Model::BarycenterLab => self.barycenter.render(&lab.barycenter, &mut frame),
            Model::EarthSeasons => self.seasons.render(&lab.seasons, &mut frame),
            Model::SolarSystem => self.solar.render(&lab.solar, &mut frame),
        }
        frame
    }
}

fn orbit_pointer(camera: &mut lab_renderer::Camera, event: PointerEvent, min: f32, max: f32) {
    match event {
        PointerEvent::Dragged { delta, .. } => camera.orbit_drag(delta),
        PointerEvent::Scrolled(scroll) => camera.scroll_zoom(scroll, min, max),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lab_physics::{SolarSystem, PLANETS};
    use lab_renderer::Shape;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const VIEWPORT: Vec2 = Vec2::new(1280.0, 800.0);

    #[test]
    fn test_frame_sizes() {
        let scene = Scene::new(VIEWPORT);
        assert_eq!(scene.frame_size(Model::ThinLensLab), BENCH_CANVAS);
        assert_eq!(scene.frame_size(Model::SlinkyLab), VIEWPORT);
        assert_eq!(scene.frame_size(Model::SolarSystem), VIEWPORT);
    }

    #[test]
    fn test_drag_slinky_driver() {
        let mut lab = Lab::new(Model::SlinkyLab);
        let mut scene = Scene::new(VIEWPORT);
        let layout = scene.slinky_layout(&lab);
        let driver = layout.chain_to_screen(lab.wave.nodes()[0].position);

        // far from the driver box
        scene.handle_pointer(&mut lab, PointerEvent::Pressed(driver + Vec2::new(200.0, 0.0)));
        assert!(!lab.wave.is_dragging());

        scene.handle_pointer(&mut lab, PointerEvent::Pressed(driver + Vec2::new(5.0, 10.0)));
        assert!(lab.wave.is_dragging());
        scene.handle_pointer(
            &mut lab,
            PointerEvent::Dragged {
                position: driver + Vec2::new(0.0, 50.0),
                delta: Vec2::new(0.0, 40.0),
            },
        );
        assert!((lab.wave.nodes()[0].position.y - 50.0).abs() < 1e-3);

        scene.handle_pointer(&mut lab, PointerEvent::Released);
        assert!(!lab.wave.is_dragging());
    }

    #[test]
    fn test_drag_optics_object() {
        let mut lab = Lab::new(Model::ThinLensLab);
        let mut scene = Scene::new(VIEWPORT);
        scene.handle_pointer(&mut lab, PointerEvent::Pressed(Vec2::new(250.0, 300.0)));
        assert_eq!(lab.lens.object_distance(), 250.0);
        scene.handle_pointer(
            &mut lab,
            PointerEvent::Dragged {
                position: Vec2::new(420.0, 280.0),
                delta: Vec2::new(170.0, -20.0),
            },
        );
        assert_eq!(lab.lens.object_distance(), 80.0);
        scene.handle_pointer(&mut lab, PointerEvent::Released);
        scene.handle_pointer(
            &mut lab,
            PointerEvent::Dragged {
                position: Vec2::new(100.0, 300.0),
                delta: Vec2::ZERO,
            },
        );
        assert_eq!(lab.lens.object_distance(), 80.0);
    }

    #[test]
    fn test_numeric_mode_ignores_drag() {
        let mut lab = Lab::new(Model::ConcaveMirror);
        lab.mirror.set_mode(BenchMode::Numeric);
        let before = lab.mirror.object_distance();
        let mut scene = Scene::new(VIEWPORT);
        scene.handle_pointer(&mut lab, PointerEvent::Pressed(Vec2::new(600.0, 300.0)));
        assert_eq!(lab.mirror.object_distance(), before);
    }

    #[test]
    fn test_orbit_drag_only_moves_active_camera() {
        let mut lab = Lab::new(Model::BarycenterLab);
        let mut scene = Scene::new(VIEWPORT);
        let seasons_eye = scene.seasons.camera.position();
        let eye = scene.barycenter.camera.position();
        scene.handle_pointer(
            &mut lab,
            PointerEvent::Dragged {
                position: Vec2::new(700.0, 400.0),
                delta: Vec2::new(60.0, 0.0),
            },
        );
        assert!((scene.barycenter.camera.position() - eye).length() > 1.0);
        assert_eq!(scene.seasons.camera.position(), seasons_eye);

        scene.reset_view(Model::BarycenterLab);
        assert!((scene.barycenter.camera.position() - eye).length() < 1e-3);
    }

    #[test]
    fn test_click_selects_planet() {
        let mut lab = Lab::new(Model::SolarSystem);
        lab.solar = SolarSystem::with_rng(&mut StdRng::seed_from_u64(7));
        lab.tick(3.0);
        let mut scene = Scene::new(VIEWPORT);

        let jupiter = PLANETS.iter().position(|p| p.id == "jupiter").unwrap();
        let at = scene
            .solar
            .camera
            .project(lab.solar.position(jupiter).unwrap())
            .unwrap()
            .screen;
        scene.handle_pointer(&mut lab, PointerEvent::Clicked(at));
        assert_eq!(lab.solar.selected(), Some(jupiter));

        scene.handle_pointer(&mut lab, PointerEvent::Clicked(Vec2::new(-5000.0, -5000.0)));
        assert_eq!(lab.solar.selected(), None);
    }

    #[test]
    fn test_starfield_behind_orbital_models() {
        let scene = Scene::new(VIEWPORT);
        let lab = Lab::new(Model::EarthSeasons);
        let frame = scene.render(&lab);
        let discs = frame
            .shapes
            .iter()
            .take(lab_renderer::STAR_COUNT)
            .filter(|s| matches!(s, Shape::Circle { fill: Some(_), .. }))
            .count();
        assert_eq!(discs, lab_renderer::STAR_COUNT);

        let lab = Lab::new(Model::ThinLensLab);
        assert_eq!(scene.render(&lab).size, BENCH_CANVAS);
    }
}
