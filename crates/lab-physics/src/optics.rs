//! Thin lens and spherical mirror optics
//!
//! All solvers use the reciprocal relation 1/f = 1/p + 1/q with f > 0 for
//! converging elements and q > 0 for a real image. Which side of the element a
//! real image lands on is a rendering concern.

use std::fmt;

use crate::constants::*;
use crate::vector::round_to;

/// Optical element on the bench
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    ConvexLens,
    ConcaveLens,
    ConcaveMirror,
    ConvexMirror,
    PlaneMirror,
}

impl ElementKind {
    pub const LENSES: [ElementKind; 2] = [ElementKind::ConvexLens, ElementKind::ConcaveLens];
    pub const MIRRORS: [ElementKind; 3] = [
        ElementKind::ConcaveMirror,
        ElementKind::ConvexMirror,
        ElementKind::PlaneMirror,
    ];

    pub fn is_mirror(self) -> bool {
        matches!(
            self,
            ElementKind::ConcaveMirror | ElementKind::ConvexMirror | ElementKind::PlaneMirror
        )
    }

    /// Converging elements have a positive focal length
    pub fn is_converging(self) -> bool {
        matches!(self, ElementKind::ConvexLens | ElementKind::ConcaveMirror)
    }

    /// Apply the sign convention to a focal length magnitude.
    ///
    /// A plane mirror has no focus; the magnitude is passed through unused.
    pub fn signed_focal_length(self, magnitude: f32) -> f32 {
        match self {
            ElementKind::ConvexLens | ElementKind::ConcaveMirror | ElementKind::PlaneMirror => {
                magnitude.abs()
            }
            ElementKind::ConcaveLens | ElementKind::ConvexMirror => -magnitude.abs(),
        }
    }

    /// Element implied by the sign of a typed-in focal length
    pub fn from_focal_sign(mirror: bool, focal_length: f32) -> Self {
        match (mirror, focal_length < 0.0) {
            (false, false) => ElementKind::ConvexLens,
            (false, true) => ElementKind::ConcaveLens,
            (true, false) => ElementKind::ConcaveMirror,
            (true, true) => ElementKind::ConvexMirror,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ElementKind::ConvexLens => "Convex Lens",
            ElementKind::ConcaveLens => "Concave Lens",
            ElementKind::ConcaveMirror => "Concave Mirror",
            ElementKind::ConvexMirror => "Convex Mirror",
            ElementKind::PlaneMirror => "Plane Mirror",
        }
    }
}

/// One of the three quantities related by the lens equation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    FocalLength,
    ObjectDistance,
    ImageDistance,
}

impl Quantity {
    pub const ALL: [Quantity; 3] = [
        Quantity::FocalLength,
        Quantity::ObjectDistance,
        Quantity::ImageDistance,
    ];

    fn index(self) -> usize {
        match self {
            Quantity::FocalLength => 0,
            Quantity::ObjectDistance => 1,
            Quantity::ImageDistance => 2,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Quantity::FocalLength => "f",
            Quantity::ObjectDistance => "p",
            Quantity::ImageDistance => "q",
        }
    }
}

fn finite(value: f32) -> Option<f32> {
    value.is_finite().then_some(value)
}

/// q = p·f / (p − f). `None` when the object sits at the focal point.
pub fn image_distance(focal_length: f32, object_distance: f32) -> Option<f32> {
    let denominator = object_distance - focal_length;
    if denominator == 0.0 {
        return None;
    }
    finite(object_distance * focal_length / denominator)
}

/// p = q·f / (q − f)
pub fn object_distance(focal_length: f32, image_distance: f32) -> Option<f32> {
    let denominator = image_distance - focal_length;
    if denominator == 0.0 {
        return None;
    }
    finite(image_distance * focal_length / denominator)
}

/// f = p·q / (p + q)
pub fn focal_length(object_distance: f32, image_distance: f32) -> Option<f32> {
    let denominator = object_distance + image_distance;
    if denominator == 0.0 {
        return None;
    }
    finite(object_distance * image_distance / denominator)
}

/// M = −q / p
pub fn magnification(object_distance: f32, image_distance: f32) -> Option<f32> {
    if object_distance == 0.0 {
        return None;
    }
    finite(-image_distance / object_distance)
}

/// Solve for `target` from the two other quantities.
///
/// The value passed for `target` itself is ignored.
pub fn solve(
    target: Quantity,
    focal: Option<f32>,
    object: Option<f32>,
    image: Option<f32>,
) -> Option<f32> {
    match target {
        Quantity::FocalLength => focal_length(object?, image?),
        Quantity::ObjectDistance => object_distance(focal?, image?),
        Quantity::ImageDistance => image_distance(focal?, object?),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    Magnified,
    Diminished,
    SameSize,
}

impl ImageSize {
    pub fn from_magnification(magnification: f32) -> Self {
        let size = magnification.abs();
        if (size - 1.0).abs() < SAME_SIZE_TOLERANCE {
            ImageSize::SameSize
        } else if size > 1.0 {
            ImageSize::Magnified
        } else {
            ImageSize::Diminished
        }
    }
}

/// Qualitative description of the image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageNature {
    Formed {
        real: bool,
        inverted: bool,
        size: ImageSize,
    },
    AtInfinity,
    EnterParameters,
}

impl ImageNature {
    pub fn classify(image_distance: f32, image_height: f32, magnification: f32) -> Self {
        ImageNature::Formed {
            real: image_distance > 0.0,
            inverted: image_height < 0.0,
            size: ImageSize::from_magnification(magnification),
        }
    }

    pub fn is_formed(&self) -> bool {
        matches!(self, ImageNature::Formed { .. })
    }
}

impl fmt::Display for ImageNature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageNature::Formed {
                real,
                inverted,
                size,
            } => {
                let reality = if *real { "Real" } else { "Virtual" };
                let orientation = if *inverted { "Inverted" } else { "Upright" };
                let size = match size {
                    ImageSize::Magnified => "Magnified",
                    ImageSize::Diminished => "Diminished",
                    ImageSize::SameSize => "Same Size",
                };
                write!(f, "{}, {}, {}", reality, orientation, size)
            }
            ImageNature::AtInfinity => write!(f, "Image at Infinity"),
            ImageNature::EnterParameters => write!(f, "Enter Parameters"),
        }
    }
}

/// Everything derived from one element configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageReport {
    pub kind: ElementKind,
    pub focal_length: f32,
    pub object_distance: f32,
    pub image_distance: Option<f32>,
    pub magnification: Option<f32>,
    pub image_height: Option<f32>,
    pub nature: ImageNature,
}

impl ImageReport {
    fn without_image(
        kind: ElementKind,
        focal_length: f32,
        object_distance: f32,
        nature: ImageNature,
    ) -> Self {
        Self {
            kind,
            focal_length,
            object_distance,
            image_distance: None,
            magnification: None,
            image_height: None,
            nature,
        }
    }
}

/// Form the image of an object of `object_height` at `object_distance`.
///
/// `focal_length` is signed. A plane mirror ignores it and always gives
/// q = −p, M = 1.
pub fn form_image(
    kind: ElementKind,
    focal_length: f32,
    object_distance: f32,
    object_height: f32,
) -> ImageReport {
    if kind == ElementKind::PlaneMirror {
        return ImageReport {
            kind,
            focal_length,
            object_distance,
            image_distance: Some(-object_distance),
            magnification: Some(1.0),
            image_height: Some(object_height),
            nature: ImageNature::Formed {
                real: false,
                inverted: false,
                size: ImageSize::SameSize,
            },
        };
    }

    if object_distance == 0.0 || focal_length == 0.0 {
        return ImageReport::without_image(
            kind,
            focal_length,
            object_distance,
            ImageNature::EnterParameters,
        );
    }

    if kind.is_converging() && (object_distance - focal_length.abs()).abs() < INFINITY_BAND {
        log::trace!("object at focal point, image at infinity");
        return ImageReport::without_image(
            kind,
            focal_length,
            object_distance,
            ImageNature::AtInfinity,
        );
    }

    let Some(q) = image_distance(focal_length, object_distance) else {
        return ImageReport::without_image(
            kind,
            focal_length,
            object_distance,
            ImageNature::AtInfinity,
        );
    };
    let m = magnification(object_distance, q).unwrap_or(0.0);
    let image_height = m * object_height;

    let nature = if q.abs() > MAX_IMAGE_DISTANCE {
        ImageNature::AtInfinity
    } else {
        ImageNature::classify(q, image_height, m)
    };

    ImageReport {
        kind,
        focal_length,
        object_distance,
        image_distance: Some(q),
        magnification: Some(m),
        image_height: Some(image_height),
        nature,
    }
}

/// Parse a typed-in quantity. Blank or non-numeric text is "not entered".
pub fn parse_quantity(text: &str) -> Option<f32> {
    text.trim().parse::<f32>().ok().filter(|v| v.is_finite())
}

/// Solve-for-unknown state: one designated output, two typed-in inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericSolver {
    target: Quantity,
    values: [Option<f32>; 3],
}

impl Default for NumericSolver {
    fn default() -> Self {
        Self {
            target: Quantity::ImageDistance,
            values: [None; 3],
        }
    }
}

impl NumericSolver {
    pub fn target(&self) -> Quantity {
        self.target
    }

    /// Change the output quantity and recompute it from the other two
    pub fn set_target(&mut self, target: Quantity) {
        self.target = target;
        self.recompute();
    }

    /// Raw value of a quantity, full precision
    pub fn value(&self, quantity: Quantity) -> Option<f32> {
        self.values[quantity.index()]
    }

    /// Set an input from typed text. Writes to the target are ignored.
    pub fn set_input(&mut self, quantity: Quantity, text: &str) {
        if quantity == self.target {
            return;
        }
        self.values[quantity.index()] = parse_quantity(text);
        self.recompute();
    }

    /// Value formatted for its text field; the target is shown to two decimals
    pub fn display(&self, quantity: Quantity) -> String {
        match self.value(quantity) {
            Some(v) if quantity == self.target => format!("{}", round_to(v, 2)),
            Some(v) => format!("{}", v),
            None => String::new(),
        }
    }

    pub fn clear(&mut self) {
        self.values = [None; 3];
    }

    /// Both non-target quantities have been entered
    pub fn inputs_present(&self) -> bool {
        Quantity::ALL
            .iter()
            .filter(|&&q| q != self.target)
            .all(|&q| self.value(q).is_some())
    }

    /// The target is left empty when an input is missing or the relation is
    /// undefined for the inputs, e.g. p + q = 0 when solving for f.
    fn recompute(&mut self) {
        let solved = if self.inputs_present() {
            solve(
                self.target,
                self.value(Quantity::FocalLength),
                self.value(Quantity::ObjectDistance),
                self.value(Quantity::ImageDistance),
            )
        } else {
            None
        };
        self.values[self.target.index()] = solved;
    }
}

/// Where the bench sits in canvas coordinates and how far its sliders reach
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchLayout {
    pub element_x: f32,
    pub axis_y: f32,
    pub max_object_distance: f32,
    pub max_focal_length: f32,
}

impl BenchLayout {
    pub const LENS: BenchLayout = BenchLayout {
        element_x: 500.0,
        axis_y: 300.0,
        max_object_distance: 490.0,
        max_focal_length: 500.0,
    };

    pub const MIRROR: BenchLayout = BenchLayout {
        element_x: 700.0,
        axis_y: 300.0,
        max_object_distance: 650.0,
        max_focal_length: 400.0,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchMode {
    /// Sliders and dragging drive p and f
    Interactive,
    /// Two typed-in quantities determine the third
    Numeric,
}

/// A lens or mirror bench with its object, as driven by the host UI
#[derive(Debug, Clone)]
pub struct OpticsBench {
    kind: ElementKind,
    focal_magnitude: f32,
    object_distance: f32,
    pub object_height: f32,
    pub layout: BenchLayout,
    mode: BenchMode,
    pub solver: NumericSolver,
    default_kind: ElementKind,
    default_focal: f32,
    default_object: f32,
}

impl OpticsBench {
    fn new(layout: BenchLayout, kind: ElementKind, focal: f32, object: f32) -> Self {
        Self {
            kind,
            focal_magnitude: focal,
            object_distance: object,
            object_height: OBJECT_HEIGHT,
            layout,
            mode: BenchMode::Interactive,
            solver: NumericSolver::default(),
            default_kind: kind,
            default_focal: focal,
            default_object: object,
        }
    }

    /// Thin lens bench: convex, f = 150, p = 200
    pub fn lens() -> Self {
        Self::new(BenchLayout::LENS, ElementKind::ConvexLens, 150.0, 200.0)
    }

    /// Spherical mirror bench: concave, f = 50, p = 60
    pub fn mirror() -> Self {
        Self::new(BenchLayout::MIRROR, ElementKind::ConcaveMirror, 50.0, 60.0)
    }

    pub fn is_mirror_bench(&self) -> bool {
        self.default_kind.is_mirror()
    }

    /// Element kinds this bench can hold
    pub fn available_kinds(&self) -> &'static [ElementKind] {
        if self.is_mirror_bench() {
            &ElementKind::MIRRORS
        } else {
            &ElementKind::LENSES
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: ElementKind) {
        if kind.is_mirror() != self.is_mirror_bench() {
            log::debug!("ignoring {} on this bench", kind.label());
            return;
        }
        self.kind = kind;
    }

    pub fn focal_magnitude(&self) -> f32 {
        self.focal_magnitude
    }

    pub fn set_focal_magnitude(&mut self, focal: f32) {
        self.focal_magnitude = focal.clamp(MIN_FOCAL_LENGTH, self.layout.max_focal_length);
    }

    pub fn object_distance(&self) -> f32 {
        self.object_distance
    }

    pub fn set_object_distance(&mut self, distance: f32) {
        self.object_distance = distance.clamp(MIN_OBJECT_DISTANCE, self.layout.max_object_distance);
    }

    /// Set the image distance and move the object to match.
    ///
    /// Ignored near the singular point and when the implied object would sit
    /// behind the element.
    pub fn set_image_distance(&mut self, image: f32) {
        if self.kind == ElementKind::PlaneMirror {
            self.set_object_distance(-image);
            return;
        }
        let f = self.signed_focal_length();
        if (image - f).abs() < IMAGE_INVERSION_GUARD {
            return;
        }
        match object_distance(f, image) {
            Some(p) if p > 0.0 => self.set_object_distance(p),
            _ => log::trace!("image distance {} has no real object", image),
        }
    }

    /// Drag the object to canvas x, rounded to 0.1
    pub fn drag_object_to(&mut self, pointer_x: f32) {
        self.set_object_distance(round_to(self.layout.element_x - pointer_x, 1));
    }

    /// Canvas x of the object arrow
    pub fn object_x(&self) -> f32 {
        self.layout.element_x - self.object_distance
    }

    pub fn signed_focal_length(&self) -> f32 {
        self.kind.signed_focal_length(self.focal_magnitude)
    }

    pub fn mode(&self) -> BenchMode {
        self.mode
    }

    /// Entering numeric mode clears the typed values, leaving it restores defaults
    pub fn set_mode(&mut self, mode: BenchMode) {
        if mode == self.mode {
            return;
        }
        self.mode = mode;
        match mode {
            BenchMode::Numeric => self.solver.clear(),
            BenchMode::Interactive => self.restore_defaults(),
        }
        log::debug!("optics bench mode set to {:?}", mode);
    }

    fn restore_defaults(&mut self) {
        self.kind = self.default_kind;
        self.focal_magnitude = self.default_focal;
        self.object_distance = self.default_object;
    }

    /// Evaluate the current configuration
    pub fn report(&self) -> ImageReport {
        match self.mode {
            BenchMode::Interactive => form_image(
                self.kind,
                self.signed_focal_length(),
                self.object_distance,
                self.object_height,
            ),
            BenchMode::Numeric => self.numeric_report(),
        }
    }

    /// Report built from the values shown in the solver fields
    fn numeric_report(&self) -> ImageReport {
        let f = self.solver.value(Quantity::FocalLength).unwrap_or(0.0);
        let p = self.solver.value(Quantity::ObjectDistance).unwrap_or(0.0);
        let kind = ElementKind::from_focal_sign(self.is_mirror_bench(), f);

        if !self.solver.inputs_present() {
            return ImageReport::without_image(kind, f, p, ImageNature::EnterParameters);
        }
        // Only the target can be missing here
        let Some(q) = self
            .solver
            .value(self.solver.target())
            .and(self.solver.value(Quantity::ImageDistance))
        else {
            log::trace!("{} is undefined for these inputs", self.solver.target().symbol());
            return ImageReport::without_image(kind, f, p, ImageNature::AtInfinity);
        };
        if f == 0.0 || p == 0.0 {
            return ImageReport::without_image(kind, f, p, ImageNature::EnterParameters);
        }

        let Some(m) = magnification(p, q) else {
            return ImageReport::without_image(kind, f, p, ImageNature::AtInfinity);
        };
        let image_height = m * self.object_height;
        let nature = if q.abs() > MAX_IMAGE_DISTANCE {
            ImageNature::AtInfinity
        } else {
            ImageNature::classify(q, image_height, m)
        };

        ImageReport {
            kind,
            focal_length: f,
            object_distance: p,
            image_distance: Some(q),
            magnification: Some(m),
            image_height: Some(image_height),
            nature,
        }
    }
}

impl crate::Simulation for OpticsBench {
    /// Optics is static; every frame simply re-evaluates `report`.
    fn tick(&mut self, _dt: f32) {}

    fn reset(&mut self) {
        self.mode = BenchMode::Interactive;
        self.solver = NumericSolver::default();
        self.restore_defaults();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-3, "{} != {}", a, b);
    }

    #[test]
    fn test_convex_lens_real_image() {
        let report = form_image(ElementKind::ConvexLens, 10.0, 30.0, OBJECT_HEIGHT);
        assert_close(report.image_distance.unwrap(), 15.0);
        assert_close(report.magnification.unwrap(), -0.5);
        assert_eq!(
            report.nature,
            ImageNature::Formed {
                real: true,
                inverted: true,
                size: ImageSize::Diminished
            }
        );
        assert_eq!(report.nature.to_string(), "Real, Inverted, Diminished");
    }

    #[test]
    fn test_convex_lens_virtual_image() {
        let report = form_image(ElementKind::ConvexLens, 10.0, 5.0, OBJECT_HEIGHT);
        assert_close(report.image_distance.unwrap(), -10.0);
        assert_close(report.magnification.unwrap(), 2.0);
        assert_eq!(report.nature.to_string(), "Virtual, Upright, Magnified");
    }

    #[test]
    fn test_plane_mirror_ignores_focal_length() {
        for f in [0.0, 10.0, -25.0] {
            let report = form_image(ElementKind::PlaneMirror, f, 40.0, OBJECT_HEIGHT);
            assert_eq!(report.image_distance, Some(-40.0));
            assert_eq!(report.magnification, Some(1.0));
            assert_eq!(report.nature.to_string(), "Virtual, Upright, Same Size");
        }
    }

    #[test]
    fn test_lens_equation_holds() {
        for f in [-80.0f32, -12.5, 7.0, 50.0, 150.0] {
            for p in [3.0f32, 20.0, 60.0, 200.0, 480.0] {
                if p == f {
                    continue;
                }
                let q = image_distance(f, p).unwrap();
                let lhs = 1.0 / f;
                let rhs = 1.0 / p + 1.0 / q;
                assert!((lhs - rhs).abs() < 1e-4 * lhs.abs().max(1.0), "f={} p={}", f, p);
            }
        }
    }

    #[test]
    fn test_solve_round_trip() {
        let (f, p) = (150.0, 200.0);
        let q = solve(Quantity::ImageDistance, Some(f), Some(p), None).unwrap();
        let f_back = solve(Quantity::FocalLength, None, Some(p), Some(q)).unwrap();
        let p_back = solve(Quantity::ObjectDistance, Some(f), None, Some(q)).unwrap();
        assert_close(f_back, f);
        assert!((p_back - p).abs() < 1e-2);
    }

    #[test]
    fn test_singular_point() {
        assert_eq!(image_distance(10.0, 10.0), None);
        assert_eq!(object_distance(10.0, 10.0), None);
        assert_eq!(focal_length(10.0, -10.0), None);
        let report = form_image(ElementKind::ConvexLens, 10.0, 10.3, OBJECT_HEIGHT);
        assert_eq!(report.nature, ImageNature::AtInfinity);
        assert_eq!(report.image_distance, None);
    }

    #[test]
    fn test_diverging_element_never_at_infinity() {
        let report = form_image(ElementKind::ConcaveLens, -10.0, 10.0, OBJECT_HEIGHT);
        assert_close(report.image_distance.unwrap(), -5.0);
        assert_eq!(report.nature.to_string(), "Virtual, Upright, Diminished");
    }

    #[test]
    fn test_far_image_reported_at_infinity() {
        // Outside the focal band but q = 430 * 400 / 30 ≈ 5733
        let report = form_image(ElementKind::ConcaveMirror, 400.0, 430.0, OBJECT_HEIGHT);
        assert_eq!(report.nature, ImageNature::AtInfinity);
        assert!(report.image_distance.unwrap() > MAX_IMAGE_DISTANCE);
    }

    #[test]
    fn test_same_size_band() {
        assert_eq!(ImageSize::from_magnification(-1.04), ImageSize::SameSize);
        assert_eq!(ImageSize::from_magnification(1.06), ImageSize::Magnified);
        assert_eq!(ImageSize::from_magnification(0.5), ImageSize::Diminished);
    }

    #[test]
    fn test_numeric_solver_waits_for_both_inputs() {
        let mut solver = NumericSolver::default();
        solver.set_input(Quantity::FocalLength, "10");
        assert_eq!(solver.value(Quantity::ImageDistance), None);
        solver.set_input(Quantity::ObjectDistance, "30");
        assert_close(solver.value(Quantity::ImageDistance).unwrap(), 15.0);
        solver.set_input(Quantity::ObjectDistance, "abc");
        assert_eq!(solver.value(Quantity::ObjectDistance), None);
    }

    #[test]
    fn test_numeric_solver_rounds_display_only() {
        let mut solver = NumericSolver::default();
        solver.set_input(Quantity::FocalLength, "7");
        solver.set_input(Quantity::ObjectDistance, "10");
        let q = solver.value(Quantity::ImageDistance).unwrap();
        assert_close(q, 70.0 / 3.0);
        assert_eq!(solver.display(Quantity::ImageDistance), "23.33");
    }

    #[test]
    fn test_numeric_solver_retargets() {
        let mut solver = NumericSolver::default();
        solver.set_target(Quantity::FocalLength);
        solver.set_input(Quantity::ObjectDistance, "30");
        solver.set_input(Quantity::ImageDistance, "15");
        assert_close(solver.value(Quantity::FocalLength).unwrap(), 10.0);
        // Writes to the target are ignored
        solver.set_input(Quantity::FocalLength, "99");
        assert_close(solver.value(Quantity::FocalLength).unwrap(), 10.0);
    }

    #[test]
    fn test_numeric_solver_clears_undefined_target() {
        let mut solver = NumericSolver::default();
        solver.set_target(Quantity::FocalLength);
        solver.set_input(Quantity::ObjectDistance, "30");
        solver.set_input(Quantity::ImageDistance, "15");
        assert_close(solver.value(Quantity::FocalLength).unwrap(), 10.0);

        // p + q = 0
        solver.set_input(Quantity::ImageDistance, "-30");
        assert_eq!(solver.value(Quantity::FocalLength), None);
        assert_eq!(solver.display(Quantity::FocalLength), "");

        solver.set_input(Quantity::ImageDistance, "");
        assert!(!solver.inputs_present());
        assert_eq!(solver.value(Quantity::FocalLength), None);
    }

    #[test]
    fn test_numeric_report_undefined_focal_length() {
        let mut bench = OpticsBench::lens();
        bench.set_mode(BenchMode::Numeric);
        bench.solver.set_target(Quantity::FocalLength);
        bench.solver.set_input(Quantity::ObjectDistance, "30");
        bench.solver.set_input(Quantity::ImageDistance, "15");
        assert_eq!(bench.report().nature.to_string(), "Real, Inverted, Diminished");

        bench.solver.set_input(Quantity::ImageDistance, "-30");
        let report = bench.report();
        assert_eq!(report.nature, ImageNature::AtInfinity);
        assert_eq!(report.image_distance, None);
        assert_eq!(report.magnification, None);
        assert_eq!(report.image_height, None);
    }

    #[test]
    fn test_numeric_report_matches_shown_image_distance() {
        let mut bench = OpticsBench::lens();
        bench.set_mode(BenchMode::Numeric);
        bench.solver.set_target(Quantity::ObjectDistance);
        bench.solver.set_input(Quantity::FocalLength, "10");
        bench.solver.set_input(Quantity::ImageDistance, "-10");
        let report = bench.report();
        let q = report.image_distance.unwrap();
        assert_eq!(Some(q), bench.solver.value(Quantity::ImageDistance));
        // p = 5, M = 2
        assert_close(report.magnification.unwrap(), -q / 5.0);
        assert_close(report.image_height.unwrap(), 2.0 * OBJECT_HEIGHT);
        assert_eq!(report.nature.to_string(), "Virtual, Upright, Magnified");
    }

    #[test]
    fn test_bench_clamps_inputs() {
        let mut bench = OpticsBench::lens();
        bench.set_object_distance(-5.0);
        assert_eq!(bench.object_distance(), MIN_OBJECT_DISTANCE);
        bench.set_object_distance(10_000.0);
        assert_eq!(bench.object_distance(), BenchLayout::LENS.max_object_distance);
        bench.set_focal_magnitude(0.0);
        assert_eq!(bench.focal_magnitude(), MIN_FOCAL_LENGTH);
    }

    #[test]
    fn test_bench_drag() {
        let mut bench = OpticsBench::lens();
        bench.drag_object_to(299.96);
        assert_close(bench.object_distance(), 200.0);
        assert_close(bench.object_x(), 300.0);
    }

    #[test]
    fn test_mirror_image_inversion() {
        let mut bench = OpticsBench::mirror();
        bench.set_image_distance(150.0);
        // p = 150 * 50 / 100
        assert_close(bench.object_distance(), 75.0);

        // Too close to f: unchanged
        bench.set_image_distance(50.05);
        assert_close(bench.object_distance(), 75.0);

        bench.set_kind(ElementKind::PlaneMirror);
        bench.set_image_distance(-30.0);
        assert_close(bench.object_distance(), 30.0);
    }

    #[test]
    fn test_bench_rejects_foreign_kind() {
        let mut bench = OpticsBench::lens();
        bench.set_kind(ElementKind::ConcaveMirror);
        assert_eq!(bench.kind(), ElementKind::ConvexLens);
        bench.set_kind(ElementKind::ConcaveLens);
        assert_eq!(bench.signed_focal_length(), -150.0);
    }

    #[test]
    fn test_numeric_mode_report() {
        let mut bench = OpticsBench::mirror();
        bench.set_mode(BenchMode::Numeric);
        assert_eq!(bench.report().nature, ImageNature::EnterParameters);

        bench.solver.set_input(Quantity::FocalLength, "-20");
        bench.solver.set_input(Quantity::ObjectDistance, "20");
        let report = bench.report();
        assert_eq!(report.kind, ElementKind::ConvexMirror);
        assert_close(report.image_distance.unwrap(), -10.0);

        bench.set_mode(BenchMode::Interactive);
        assert_eq!(bench.kind(), ElementKind::ConcaveMirror);
        assert_eq!(bench.object_distance(), 60.0);
    }
}
