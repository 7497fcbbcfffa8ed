//! Control and readout windows for each model

use egui::{Align2, Context, Slider, Ui};
use lab_physics::{
    parse_quantity, BarycenterSystem, BenchMode, Body, ElementKind, OpticsBench, Quantity,
    ReferenceFrame, SeasonalOrbit, Simulation, SolarSystem, DAYS_PER_YEAR, EARTH_BODY_RADIUS,
    PLANETS,
};
use wave_simulation::{
    WaveMode, WaveSimulation, ZoneKind, DAMPING_RANGE, FREQUENCY_RANGE, TENSION_RANGE,
};

use crate::lab::{Lab, Model};
use crate::scene::Scene;

/// Text typed into the panels' entry fields
#[derive(Debug, Default)]
pub struct PanelState {
    /// Numeric solver fields, indexed like `Quantity::ALL`
    lens_fields: [String; 3],
    mirror_fields: [String; 3],
    /// Image distance typed on the interactive mirror bench
    mirror_image: String,
}

fn controls_window(title: &str) -> egui::Window<'_> {
    egui::Window::new(title)
        .anchor(Align2::LEFT_TOP, [10.0, 10.0])
        .resizable(false)
        .collapsible(true)
}

pub fn show(ctx: &Context, panels: &mut PanelState, lab: &mut Lab, scene: &mut Scene) {
    let model = lab.active();
    match model {
        Model::SlinkyLab => {
            controls_window(model.title()).show(ctx, |ui| slinky_panel(ui, &mut lab.wave));
        }
        Model::ThinLensLab => {
            controls_window(model.title())
                .show(ctx, |ui| bench_panel(ui, &mut lab.lens, &mut panels.lens_fields, None));
        }
        Model::ConcaveMirror => {
            controls_window(model.title()).show(ctx, |ui| {
                bench_panel(
                    ui,
                    &mut lab.mirror,
                    &mut panels.mirror_fields,
                    Some(&mut panels.mirror_image),
                )
            });
        }
        Model::BarycenterLab => {
            controls_window(model.title()).show(ctx, |ui| {
                barycenter_panel(ui, &mut lab.barycenter);
                ui.separator();
                ui.checkbox(&mut scene.barycenter.show_trails, "Show Orbit Trails");
            });
        }
        Model::EarthSeasons => {
            controls_window(model.title()).show(ctx, |ui| {
                seasons_panel(ui, &mut lab.seasons);
                ui.separator();
                ui.heading("View");
                ui.checkbox(&mut scene.seasons.show_rays, "Show Sun Rays");
                ui.checkbox(&mut scene.seasons.show_labels, "Show Labels");
                ui.checkbox(&mut scene.seasons.follow_earth, "Follow Earth");
            });
        }
        Model::SolarSystem => {
            controls_window(model.title()).show(ctx, |ui| solar_panel(ui, &mut lab.solar));
        }
    }
}

fn slinky_panel(ui: &mut Ui, wave: &mut WaveSimulation) {
    ui.heading("Wave Type");
    let mut mode = wave.mode();
    ui.horizontal(|ui| {
        for option in [WaveMode::Transverse, WaveMode::Longitudinal] {
            ui.radio_value(&mut mode, option, option.label());
        }
    });
    wave.set_mode(mode);

    ui.separator();
    ui.heading("Medium");
    let mut params = *wave.params();
    ui.add(Slider::new(&mut params.tension, TENSION_RANGE.0..=TENSION_RANGE.1).text("Tension"));
    ui.add(Slider::new(&mut params.damping, DAMPING_RANGE.0..=DAMPING_RANGE.1).text("Damping"));
    ui.add(
        Slider::new(&mut params.frequency, FREQUENCY_RANGE.0..=FREQUENCY_RANGE.1)
            .text("Frequency"),
    );
    if params != *wave.params() {
        wave.set_params(params);
    }

    ui.separator();
    ui.heading("Driver");
    let mut auto = wave.is_auto();
    if ui.checkbox(&mut auto, "Auto Oscillate").changed() {
        wave.set_auto(auto);
    }
    ui.horizontal(|ui| {
        if ui.button("Pulse").clicked() {
            wave.trigger_pulse();
        }
        if ui.button("Reset").clicked() {
            wave.reset();
        }
    });
    ui.label("Drag the driver box to shake the coil.");

    if wave.mode() == WaveMode::Longitudinal {
        ui.separator();
        let zones = wave.zones();
        let count = |kind: ZoneKind| zones.iter().filter(|z| z.kind == kind).count();
        ui.label(format!(
            "Compressions: {}   Rarefactions: {}",
            count(ZoneKind::Compression),
            count(ZoneKind::Rarefaction)
        ));
    }
    ui.label(format!("Energy: {:.1}", wave.energy()));
}

fn bench_panel(
    ui: &mut Ui,
    bench: &mut OpticsBench,
    fields: &mut [String; 3],
    image_field: Option<&mut String>,
) {
    let mut mode = bench.mode();
    ui.horizontal(|ui| {
        ui.selectable_value(&mut mode, BenchMode::Interactive, "Interactive");
        ui.selectable_value(&mut mode, BenchMode::Numeric, "Solve for Unknown");
    });
    if mode != bench.mode() {
        bench.set_mode(mode);
        fields.iter_mut().for_each(String::clear);
    }
    ui.separator();

    match bench.mode() {
        BenchMode::Interactive => {
            let mut kind = bench.kind();
            egui::ComboBox::from_label("Element")
                .selected_text(kind.label())
                .show_ui(ui, |ui| {
                    for &option in bench.available_kinds() {
                        ui.selectable_value(&mut kind, option, option.label());
                    }
                });
            bench.set_kind(kind);

            let layout = bench.layout;
            if bench.kind() != ElementKind::PlaneMirror {
                let mut focal = bench.focal_magnitude();
                if ui
                    .add(
                        Slider::new(&mut focal, 10.0..=layout.max_focal_length)
                            .text("Focal Length |f|"),
                    )
                    .changed()
                {
                    bench.set_focal_magnitude(focal);
                }
            }
            let mut object = bench.object_distance();
            if ui
                .add(
                    Slider::new(&mut object, 10.0..=layout.max_object_distance)
                        .text("Object Distance p"),
                )
                .changed()
            {
                bench.set_object_distance(object);
            }
            if let Some(field) = image_field {
                ui.horizontal(|ui| {
                    ui.label("Image Distance q");
                    let response = ui.text_edit_singleline(field);
                    if response.changed() {
                        apply_image_text(bench, field);
                    } else if !response.has_focus() {
                        *field = image_field_text(bench);
                    }
                });
            }
            ui.label("Drag on the bench to move the object.");
        }
        BenchMode::Numeric => numeric_fields(ui, bench, fields),
    }

    ui.separator();
    let report = bench.report();
    ui.heading("Image");
    ui.label(report.nature.to_string());
    let show = |value: Option<f32>| value.map_or("-".to_string(), |v| format!("{:.2}", v));
    ui.label(format!("f = {:.2}", report.focal_length));
    ui.label(format!("p = {:.2}", report.object_distance));
    ui.label(format!("q = {}", show(report.image_distance)));
    ui.label(format!("M = {}", show(report.magnification)));
    ui.label(format!("h' = {}", show(report.image_height)));
}

/// Current image distance for its text field, blank while undefined
fn image_field_text(bench: &OpticsBench) -> String {
    bench
        .report()
        .image_distance
        .map_or_else(String::new, |q| format!("{:.1}", q))
}

/// Move the object so the image lands at the typed distance
fn apply_image_text(bench: &mut OpticsBench, text: &str) {
    if let Some(q) = parse_quantity(text) {
        bench.set_image_distance(q);
    }
}

fn numeric_fields(ui: &mut Ui, bench: &mut OpticsBench, fields: &mut [String; 3]) {
    let mut target = bench.solver.target();
    ui.horizontal(|ui| {
        ui.label("Solve for");
        for quantity in Quantity::ALL {
            ui.selectable_value(&mut target, quantity, quantity.symbol());
        }
    });
    if target != bench.solver.target() {
        bench.solver.set_target(target);
        for (field, quantity) in fields.iter_mut().zip(Quantity::ALL) {
            if quantity != target {
                *field = bench.solver.display(quantity);
            }
        }
    }

    egui::Grid::new("numeric_fields").num_columns(2).show(ui, |ui| {
        for (field, quantity) in fields.iter_mut().zip(Quantity::ALL) {
            ui.label(quantity.symbol());
            if quantity == target {
                let mut solved = bench.solver.display(quantity);
                ui.add_enabled(false, egui::TextEdit::singleline(&mut solved));
            } else if ui.text_edit_singleline(field).changed() {
                bench.solver.set_input(quantity, field);
            }
            ui.end_row();
        }
    });
    ui.label("A negative f means a diverging element.");
}

fn barycenter_panel(ui: &mut Ui, system: &mut BarycenterSystem) {
    ui.heading("Moon Mass");
    let (lo, hi) = BarycenterSystem::MULTIPLIER_RANGE;
    let mut multiplier = system.mass_multiplier();
    if ui
        .add(Slider::new(&mut multiplier, lo..=hi).logarithmic(true).text("× Moon Mass"))
        .changed()
    {
        system.set_mass_multiplier(multiplier);
    }

    let (lo, hi) = BarycenterSystem::SPEED_RANGE;
    let mut speed = system.speed();
    if ui.add(Slider::new(&mut speed, lo..=hi).text("Time Scale")).changed() {
        system.set_speed(speed);
    }

    ui.separator();
    ui.heading("Reference Frame");
    ui.radio_value(&mut system.frame, ReferenceFrame::Barycentric, "Barycenter");
    ui.radio_value(
        &mut system.frame,
        ReferenceFrame::BodyFixed(Body::Primary),
        "Earth",
    );
    ui.radio_value(
        &mut system.frame,
        ReferenceFrame::BodyFixed(Body::Secondary),
        "Moon",
    );

    ui.separator();
    let (earth, moon) = system.radii();
    ui.label(format!("Mass Ratio: {:.1} : 1", system.mass_ratio()));
    ui.label(format!("Time Scale: {:.1}x", system.speed()));
    ui.label(format!("Earth → Barycenter: {:.2}", earth));
    ui.label(format!("Moon → Barycenter: {:.2}", moon));
    if system.barycenter_inside_primary(EARTH_BODY_RADIUS) {
        ui.label("Barycenter is inside the Earth");
    } else {
        ui.label("Barycenter is outside the Earth");
    }
}

fn seasons_panel(ui: &mut Ui, orbit: &mut SeasonalOrbit) {
    let mut day = orbit.day();
    if ui
        .add(Slider::new(&mut day, 0.0..=DAYS_PER_YEAR - 1.0).text("Day of Year"))
        .changed()
    {
        orbit.set_day(day);
    }
    ui.horizontal(|ui| {
        let label = if orbit.playing { "Pause" } else { "Play" };
        if ui.button(label).clicked() {
            orbit.toggle_playing();
        }
    });
    let (lo, hi) = SeasonalOrbit::SPEED_RANGE;
    let mut speed = orbit.speed();
    if ui.add(Slider::new(&mut speed, lo..=hi).text("Speed")).changed() {
        orbit.set_speed(speed);
    }
    ui.label(format!("Axial Tilt: {:.2}°", orbit.tilt_deg()));

    ui.separator();
    let readout = orbit.readout();
    ui.heading(&readout.date);
    ui.label(format!("Sun Declination: {:.1}°", readout.declination));
    egui::Grid::new("season_readout").num_columns(3).show(ui, |ui| {
        ui.label("");
        ui.label("North");
        ui.label("South");
        ui.end_row();
        ui.label("Season");
        ui.label(readout.northern_season.to_string());
        ui.label(readout.southern_season.to_string());
        ui.end_row();
        ui.label("Day Length");
        ui.label(format!("{:.1} h", readout.northern_day_length));
        ui.label(format!("{:.1} h", readout.southern_day_length));
        ui.end_row();
        ui.label(format!("Noon Sun @ {:.0}°", orbit.latitude_deg));
        ui.label(format!("{:.1}°", readout.northern_elevation));
        ui.label(format!("{:.1}°", readout.southern_elevation));
        ui.end_row();
    });
}

fn solar_panel(ui: &mut Ui, system: &mut SolarSystem) {
    let mut selected = system.selected();
    ui.horizontal_wrapped(|ui| {
        for (index, planet) in PLANETS.iter().enumerate() {
            ui.selectable_value(&mut selected, Some(index), planet.name);
        }
    });
    if selected != system.selected() {
        system.select(selected);
    }

    ui.separator();
    match system.selected_planet() {
        Some(planet) => {
            ui.heading(planet.name);
            ui.label(planet.description);
            let stats = &planet.stats;
            egui::Grid::new("planet_stats").num_columns(2).show(ui, |ui| {
                for (name, value) in [
                    ("Mass", stats.mass),
                    ("Gravity", stats.gravity),
                    ("Temperature", stats.temperature),
                    ("Diameter", stats.diameter),
                    ("Moons", stats.moons),
                    ("Day", stats.day),
                    ("Year", stats.year),
                ] {
                    ui.label(name);
                    ui.label(value);
                    ui.end_row();
                }
            });
            if ui.button("Back to System").clicked() {
                system.select(None);
            }
        }
        None => {
            ui.label("Click a planet to learn more.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_field_moves_mirror_object() {
        let mut mirror = OpticsBench::mirror();
        apply_image_text(&mut mirror, "150");
        // p = 150 * 50 / (150 - 50)
        assert!((mirror.object_distance() - 75.0).abs() < 1e-3);
        assert_eq!(image_field_text(&mirror), "150.0");

        apply_image_text(&mut mirror, "not a number");
        assert!((mirror.object_distance() - 75.0).abs() < 1e-3);
    }

    #[test]
    fn test_image_field_blank_at_infinity() {
        let mut mirror = OpticsBench::mirror();
        mirror.set_object_distance(50.0);
        assert_eq!(mirror.report().image_distance, None);
        assert_eq!(image_field_text(&mirror), "");
    }
}
