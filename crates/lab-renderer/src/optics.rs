//! Ray diagrams for the lens and mirror benches
//!
//! Both benches draw on a fixed 1000 x 600 canvas with the optical axis at
//! `layout.axis_y`. Heights grow upwards, so a canvas y is `axis_y - h`.

use glam::Vec2;
use lab_physics::{ElementKind, ImageReport, OpticsBench};

use crate::primitives::{palette, Color, Frame};

/// Canvas the bench layouts are expressed in
pub const BENCH_CANVAS: Vec2 = Vec2::new(1000.0, 600.0);

const GLASS: Color = Color::hex(0xa5f3fc);
const IMAGE: Color = Color::hex(0x2dd4bf);
const PARALLEL_RAY: Color = Color::rgb(234, 179, 8);
const CHIEF_RAY: Color = Color::rgb(59, 130, 246);

/// Lens body spans this much of the canvas height
const LENS_SPAN: (f32, f32) = (50.0, 550.0);
const MIRROR_SPAN: (f32, f32) = (100.0, 500.0);
/// Drawn radius of curvature; purely cosmetic
const MIRROR_DRAWN_RADIUS: f32 = 800.0;

/// Canvas x of the image for a lens: images form on the far side
pub fn lens_image_x(element_x: f32, image_distance: f32) -> f32 {
    element_x + image_distance
}

/// Canvas x of the image for a mirror: real images form on the object side
pub fn mirror_image_x(element_x: f32, image_distance: f32) -> f32 {
    element_x - image_distance
}

/// Points along a quadratic Bézier
fn quadratic(from: Vec2, control: Vec2, to: Vec2, segments: usize) -> Vec<Vec2> {
    (0..=segments)
        .map(|i| {
            let t = i as f32 / segments as f32;
            let a = from.lerp(control, t);
            let b = control.lerp(to, t);
            a.lerp(b, t)
        })
        .collect()
}

/// Whether the report has enough input to draw rays and the object
fn has_inputs(report: &ImageReport) -> bool {
    report.object_distance > 0.0
        && (report.kind == ElementKind::PlaneMirror || report.focal_length != 0.0)
}

/// Vertical arrow standing on the axis, head at `axis_y - height`
fn arrow_on_axis(frame: &mut Frame, x: f32, axis_y: f32, height: f32, width: f32, color: Color) {
    let base = Vec2::new(x, axis_y);
    let tip = Vec2::new(x, axis_y - height);
    frame.segment(base, tip, width, color);
    let back = if height >= 0.0 { 15.0 } else { -15.0 };
    frame.polyline(
        vec![
            tip + Vec2::new(-10.0, back),
            tip,
            tip + Vec2::new(10.0, back),
        ],
        width * 0.66,
        color,
    );
}

fn draw_object(frame: &mut Frame, bench: &OpticsBench, report: &ImageReport) {
    let axis_y = bench.layout.axis_y;
    let x = bench.layout.element_x - report.object_distance;
    let ho = bench.object_height;
    arrow_on_axis(frame, x, axis_y, ho, 6.0, palette::PURPLE);
    frame.text(Vec2::new(x, axis_y - ho - 20.0), "OBJECT", 14.0, palette::PURPLE);
    frame.badge(
        Vec2::new(x, axis_y + 25.0),
        format!("p: {:.1}", report.object_distance),
        12.0,
        palette::TEXT,
    );
}

fn draw_image(frame: &mut Frame, x: f32, axis_y: f32, q: f32, hi: f32, faded: bool) {
    let color = if faded { IMAGE.with_alpha(0.6) } else { IMAGE };
    arrow_on_axis(frame, x, axis_y, hi, 6.0, color);
    let (label_dy, badge_dy) = if hi > 0.0 { (30.0, -35.0) } else { (-20.0, 25.0) };
    frame.text(Vec2::new(x, axis_y - hi + label_dy), "IMAGE", 14.0, color);
    frame.badge(
        Vec2::new(x, axis_y + badge_dy),
        format!("q: {:.1}", q),
        12.0,
        palette::TEXT,
    );
}

fn draw_axis(frame: &mut Frame, axis_y: f32) {
    frame.dashed(
        Vec2::new(0.0, axis_y),
        Vec2::new(BENCH_CANVAS.x, axis_y),
        1.0,
        palette::TEXT.with_alpha(0.1),
    );
}

/// Thin lens bench: glass, focal points, the parallel and chief rays, object and image
pub fn render_lens(bench: &OpticsBench, frame: &mut Frame) {
    let report = bench.report();
    let layout = bench.layout;
    let (lx, axis_y) = (layout.element_x, layout.axis_y);
    let ho = bench.object_height;
    let f = report.focal_length.abs();
    let draw = has_inputs(&report);

    draw_axis(frame, axis_y);
    frame.segment(
        Vec2::new(lx, 0.0),
        Vec2::new(lx, BENCH_CANVAS.y),
        1.0,
        palette::TEXT.with_alpha(0.05),
    );

    if draw {
        for (x, name) in [(lx - f, "F1"), (lx + f, "F2")] {
            frame.disc(Vec2::new(x, axis_y), 3.0, GLASS.with_alpha(0.6));
            frame.text(Vec2::new(x, axis_y + 20.0), name, 10.0, GLASS.with_alpha(0.6));
        }
    }

    let (top, bottom) = LENS_SPAN;
    let mid = (top + bottom) * 0.5;
    let outline = if report.kind.is_converging() {
        let mut points = quadratic(
            Vec2::new(lx, top),
            Vec2::new(lx + 30.0, mid),
            Vec2::new(lx, bottom),
            24,
        );
        points.extend(quadratic(
            Vec2::new(lx, bottom),
            Vec2::new(lx - 30.0, mid),
            Vec2::new(lx, top),
            24,
        ));
        points
    } else {
        let mut points = quadratic(
            Vec2::new(lx - 15.0, top),
            Vec2::new(lx + 5.0, mid),
            Vec2::new(lx - 15.0, bottom),
            24,
        );
        points.extend(quadratic(
            Vec2::new(lx + 15.0, bottom),
            Vec2::new(lx - 5.0, mid),
            Vec2::new(lx + 15.0, top),
            24,
        ));
        points.push(Vec2::new(lx - 15.0, top));
        points
    };
    frame.polyline(outline, 2.0, GLASS.with_alpha(0.6));

    if !draw {
        return;
    }

    let object_top = Vec2::new(lx - report.object_distance, axis_y - ho);
    let at_lens = Vec2::new(lx, axis_y - ho);
    let focused = report.nature.is_formed();
    let virtual_image = report.image_distance.is_some_and(|q| q < 0.0);
    let image_top = match (report.image_distance, report.image_height) {
        (Some(q), Some(hi)) => Some(Vec2::new(lens_image_x(lx, q), axis_y - hi)),
        _ => None,
    };

    if focused {
        frame.segment(object_top, at_lens, 2.0, PARALLEL_RAY.with_alpha(0.6));
        let slope = ho / f;
        if report.kind.is_converging() {
            frame.segment(
                at_lens,
                Vec2::new(lx + 600.0, at_lens.y + 600.0 * slope),
                2.0,
                GLASS.with_alpha(0.6),
            );
            if let (true, Some(image_top)) = (virtual_image, image_top) {
                frame.dashed(at_lens, image_top, 1.0, GLASS.with_alpha(0.3));
            }
        } else {
            frame.segment(
                at_lens,
                Vec2::new(lx + 600.0, at_lens.y - 600.0 * slope),
                2.0,
                GLASS.with_alpha(0.6),
            );
            frame.dashed(at_lens, Vec2::new(lx - f, axis_y), 1.0, GLASS.with_alpha(0.3));
        }

        // Undeviated through the optical centre
        let exit = Vec2::new(lx + report.object_distance * 2.0, axis_y + ho * 2.0);
        frame.segment(object_top, exit, 2.0, CHIEF_RAY.with_alpha(0.6));
        if let (true, Some(image_top)) = (virtual_image, image_top) {
            frame.dashed(object_top, image_top, 1.0, CHIEF_RAY.with_alpha(0.3));
        }
    }

    draw_object(frame, bench, &report);

    if let (true, Some(q), Some(hi)) = (focused, report.image_distance, report.image_height) {
        draw_image(frame, lens_image_x(lx, q), axis_y, q, hi, q < 0.0);
    }
}

/// Mirror surface as a polyline; concave bulges away from the object
fn mirror_outline(kind: ElementKind, x: f32) -> Vec<Vec2> {
    let (top, bottom) = MIRROR_SPAN;
    let mid = (top + bottom) * 0.5;
    let half = (bottom - top) * 0.5;
    let r = MIRROR_DRAWN_RADIUS;
    let sagitta_at_edge = (r * r - half * half).sqrt();
    let direction = match kind {
        ElementKind::ConcaveMirror => 1.0,
        ElementKind::ConvexMirror => -1.0,
        _ => 0.0,
    };

    (0..=32)
        .map(|i| {
            let y = top + (bottom - top) * i as f32 / 32.0;
            let bulge = (r * r - (y - mid).powi(2)).sqrt() - sagitta_at_edge;
            Vec2::new(x + direction * bulge, y)
        })
        .collect()
}

/// Mirror bench: surface, F and C markers, reflected rays, object and image
pub fn render_mirror(bench: &OpticsBench, frame: &mut Frame) {
    let report = bench.report();
    let layout = bench.layout;
    let (mx, axis_y) = (layout.element_x, layout.axis_y);
    let ho = bench.object_height;
    let f = report.focal_length;
    let p = report.object_distance;
    let draw = has_inputs(&report);
    let plane = report.kind == ElementKind::PlaneMirror;

    draw_axis(frame, axis_y);

    if draw && !plane {
        for (x, name) in [(mx - f, "F"), (mx - 2.0 * f, "C")] {
            frame.disc(Vec2::new(x, axis_y), 4.0, palette::CYAN);
            frame.text(Vec2::new(x, axis_y + 25.0), name, 12.0, palette::CYAN);
        }
    }

    frame.polyline(mirror_outline(report.kind, mx), 6.0, palette::MUTED);
    // Silvered back
    for pair in mirror_outline(report.kind, mx + 5.0).chunks_exact(2) {
        frame.segment(pair[0], pair[1], 2.0, palette::CYAN.with_alpha(0.4));
    }

    if !draw {
        return;
    }

    let object_x = mx - p;
    let object_top = Vec2::new(object_x, axis_y - ho);
    let at_mirror = Vec2::new(mx, axis_y - ho);
    let vertex = Vec2::new(mx, axis_y);
    let image = match (report.image_distance, report.image_height) {
        (Some(q), Some(hi)) => Some((q, hi, Vec2::new(mirror_image_x(mx, q), axis_y - hi))),
        _ => None,
    };

    frame.segment(object_top, at_mirror, 2.0, PARALLEL_RAY.with_alpha(0.5));

    if plane {
        let image_x = mirror_image_x(mx, -p);
        frame.segment(at_mirror, object_top, 2.0, PARALLEL_RAY.with_alpha(0.5));
        frame.dashed(at_mirror, Vec2::new(image_x, axis_y - ho), 1.0, PARALLEL_RAY.with_alpha(0.3));

        frame.segment(object_top, vertex, 2.0, CHIEF_RAY.with_alpha(0.5));
        frame.segment(vertex, Vec2::new(object_x, axis_y + ho), 2.0, CHIEF_RAY.with_alpha(0.5));
        frame.dashed(vertex, Vec2::new(image_x, axis_y - ho), 1.0, CHIEF_RAY.with_alpha(0.3));
    } else {
        if report.kind.is_converging() {
            // Reflected through F
            frame.segment(
                at_mirror,
                Vec2::new(mx - 1000.0, at_mirror.y + 1000.0 * ho / f),
                2.0,
                PARALLEL_RAY.with_alpha(0.5),
            );
            if let Some((q, _, image_top)) = image {
                if q < 0.0 {
                    frame.dashed(at_mirror, image_top, 1.0, PARALLEL_RAY.with_alpha(0.3));
                }
            }
        } else {
            // Appears to come from the virtual focus behind the mirror
            frame.segment(
                at_mirror,
                Vec2::new(mx - 300.0, at_mirror.y - 300.0 * ho / f.abs()),
                2.0,
                PARALLEL_RAY.with_alpha(0.5),
            );
            frame.dashed(at_mirror, Vec2::new(mx + f.abs(), axis_y), 1.0, PARALLEL_RAY.with_alpha(0.3));
        }

        frame.segment(object_top, vertex, 2.0, CHIEF_RAY.with_alpha(0.5));
        frame.segment(
            vertex,
            Vec2::new(mx - 300.0, axis_y + 300.0 * ho / p),
            2.0,
            CHIEF_RAY.with_alpha(0.5),
        );
        if let (true, Some((_, _, image_top))) = (report.nature.is_formed(), image) {
            frame.dashed(vertex, image_top, 1.0, CHIEF_RAY.with_alpha(0.3));
        }
    }

    draw_object(frame, bench, &report);

    if let (true, Some((q, hi, _))) = (report.nature.is_formed(), image) {
        let faded = q < 0.0 || !report.kind.is_converging();
        draw_image(frame, mirror_image_x(mx, q), axis_y, q, hi, faded);
    }
}

/// Draw whichever bench this is
pub fn render_bench(bench: &OpticsBench, frame: &mut Frame) {
    if bench.is_mirror_bench() {
        render_mirror(bench, frame);
    } else {
        render_lens(bench, frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::Shape;
    use lab_physics::{BenchMode, Quantity};

    fn texts(frame: &Frame) -> Vec<String> {
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
    fn test_image_positions() {
        assert_eq!(lens_image_x(500.0, 600.0), 1100.0);
        assert_eq!(lens_image_x(500.0, -100.0), 400.0);
        assert_eq!(mirror_image_x(700.0, 300.0), 400.0);
        assert_eq!(mirror_image_x(700.0, -60.0), 760.0);
    }

    #[test]
    fn test_lens_default_draws_image() {
        let bench = OpticsBench::lens();
        let mut frame = Frame::new(BENCH_CANVAS);
        render_bench(&bench, &mut frame);
        let labels = texts(&frame);
        assert!(labels.contains(&"OBJECT".to_string()));
        assert!(labels.contains(&"IMAGE".to_string()));
        // f = 150, p = 200: q = 600
        assert!(labels.contains(&"q: 600.0".to_string()));
    }

    #[test]
    fn test_lens_at_focus_hides_image() {
        let mut bench = OpticsBench::lens();
        bench.set_object_distance(150.0);
        let mut frame = Frame::new(BENCH_CANVAS);
        render_lens(&bench, &mut frame);
        let labels = texts(&frame);
        assert!(labels.contains(&"OBJECT".to_string()));
        assert!(!labels.contains(&"IMAGE".to_string()));
    }

    #[test]
    fn test_virtual_image_draws_dashed_extensions() {
        let mut bench = OpticsBench::lens();
        bench.set_object_distance(100.0);
        let mut frame = Frame::new(BENCH_CANVAS);
        render_lens(&bench, &mut frame);
        let dashed = frame
            .shapes
            .iter()
            .filter(|s| {
                matches!(
                    s,
                    Shape::Line {
                        style: crate::primitives::LineStyle::Dashed { .. },
                        ..
                    }
                )
            })
            .count();
        // Axis plus two back-extensions
        assert_eq!(dashed, 3);
    }

    #[test]
    fn test_numeric_without_inputs_draws_only_bench() {
        let mut bench = OpticsBench::mirror();
        bench.set_mode(BenchMode::Numeric);
        let mut frame = Frame::new(BENCH_CANVAS);
        render_bench(&bench, &mut frame);
        assert!(texts(&frame).is_empty());

        bench.solver.set_input(Quantity::FocalLength, "50");
        bench.solver.set_input(Quantity::ObjectDistance, "60");
        let mut frame = Frame::new(BENCH_CANVAS);
        render_bench(&bench, &mut frame);
        assert!(texts(&frame).contains(&"IMAGE".to_string()));
    }

    #[test]
    fn test_plane_mirror_image_behind_mirror() {
        let mut bench = OpticsBench::mirror();
        bench.set_kind(ElementKind::PlaneMirror);
        let mut frame = Frame::new(BENCH_CANVAS);
        render_mirror(&bench, &mut frame);
        let labels = texts(&frame);
        assert!(labels.contains(&"q: -60.0".to_string()));
        assert!(!labels.contains(&"F".to_string()));
    }

    #[test]
    fn test_mirror_outline_bulge() {
        let concave = mirror_outline(ElementKind::ConcaveMirror, 700.0);
        let convex = mirror_outline(ElementKind::ConvexMirror, 700.0);
        let plane = mirror_outline(ElementKind::PlaneMirror, 700.0);
        assert!((concave[0].x - 700.0).abs() < 1e-3);
        assert!(concave[16].x > 700.0);
        assert!(convex[16].x < 700.0);
        assert!(plane.iter().all(|p| p.x == 700.0));
    }
}
