//! Screen-space drawing primitives
//!
//! Scenes are built into a [`Frame`] in pixel coordinates (origin top-left,
//! y down). The host paints the frame with whatever backend it owns.

use glam::Vec2;

/// Straight-alpha sRGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// `0xRRGGBB`
    pub const fn hex(rgb: u32) -> Self {
        Self::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    pub const fn from_array(rgb: [u8; 3]) -> Self {
        Self::rgb(rgb[0], rgb[1], rgb[2])
    }

    /// Same colour with opacity in `[0, 1]`
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }
}

/// Palette shared by every scene
pub mod palette {
    use super::Color;

    pub const BACKGROUND: Color = Color::hex(0x020617);
    pub const PANEL: Color = Color::hex(0x0f172a);
    pub const TEXT: Color = Color::hex(0xf8fafc);
    pub const MUTED: Color = Color::hex(0x94a3b8);
    pub const SLATE: Color = Color::hex(0x475569);
    pub const GRID: Color = Color::hex(0x1e293b);
    pub const CYAN: Color = Color::hex(0x22d3ee);
    pub const PURPLE: Color = Color::hex(0xa855f7);
    pub const PINK: Color = Color::hex(0xf472b6);
    pub const AMBER: Color = Color::hex(0xfbbf24);
    pub const ORANGE: Color = Color::hex(0xf97316);
    pub const RED: Color = Color::hex(0xef4444);
    pub const GREEN: Color = Color::hex(0x4ade80);
    pub const BLUE: Color = Color::hex(0x3b82f6);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineStyle {
    Solid,
    Dashed { dash: f32, gap: f32 },
}

/// Text alignment relative to its anchor point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Center,
    Left,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Open polyline; two points make a segment
    Line {
        points: Vec<Vec2>,
        width: f32,
        color: Color,
        style: LineStyle,
    },
    Circle {
        center: Vec2,
        radius: f32,
        fill: Option<Color>,
        stroke: Option<(f32, Color)>,
    },
    Rect {
        min: Vec2,
        size: Vec2,
        color: Color,
    },
    Text {
        position: Vec2,
        text: String,
        size: f32,
        color: Color,
        anchor: Anchor,
        /// Optional pill behind the text
        background: Option<Color>,
    },
}

/// One frame's worth of shapes, painted in order
#[derive(Debug, Default, Clone)]
pub struct Frame {
    pub size: Vec2,
    pub shapes: Vec<Shape>,
}

impl Frame {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            shapes: Vec::new(),
        }
    }

    pub fn center(&self) -> Vec2 {
        self.size * 0.5
    }

    pub fn segment(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.polyline(vec![from, to], width, color);
    }

    pub fn dashed(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.shapes.push(Shape::Line {
            points: vec![from, to],
            width,
            color,
            style: LineStyle::Dashed {
                dash: 6.0,
                gap: 6.0,
            },
        });
    }

    pub fn polyline(&mut self, points: Vec<Vec2>, width: f32, color: Color) {
        if points.len() < 2 {
            return;
        }
        self.shapes.push(Shape::Line {
            points,
            width,
            color,
            style: LineStyle::Solid,
        });
    }

    pub fn disc(&mut self, center: Vec2, radius: f32, color: Color) {
        self.shapes.push(Shape::Circle {
            center,
            radius,
            fill: Some(color),
            stroke: None,
        });
    }

    pub fn ring(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        self.shapes.push(Shape::Circle {
            center,
            radius,
            fill: None,
            stroke: Some((width, color)),
        });
    }

    pub fn rect(&mut self, min: Vec2, size: Vec2, color: Color) {
        self.shapes.push(Shape::Rect { min, size, color });
    }

    pub fn text(&mut self, position: Vec2, text: impl Into<String>, size: f32, color: Color) {
        self.shapes.push(Shape::Text {
            position,
            text: text.into(),
            size,
            color,
            anchor: Anchor::Center,
            background: None,
        });
    }

    pub fn text_anchored(
        &mut self,
        position: Vec2,
        text: impl Into<String>,
        size: f32,
        color: Color,
        anchor: Anchor,
    ) {
        self.shapes.push(Shape::Text {
            position,
            text: text.into(),
            size,
            color,
            anchor,
            background: None,
        });
    }

    /// Text on a dark pill
    pub fn badge(&mut self, position: Vec2, text: impl Into<String>, size: f32, color: Color) {
        self.shapes.push(Shape::Text {
            position,
            text: text.into(),
            size,
            color,
            anchor: Anchor::Center,
            background: Some(palette::BACKGROUND.with_alpha(0.9)),
        });
    }

    /// Arrow from `from` to `to` with a head at `to`
    pub fn arrow(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        let direction = to - from;
        let length = direction.length();
        self.segment(from, to, width, color);
        if length == 0.0 {
            return;
        }
        let unit = direction / length;
        let normal = unit.perp();
        let head = (length * 0.25).min(10.0);
        let back = to - unit * head;
        self.polyline(
            vec![back + normal * head * 0.5, to, back - normal * head * 0.5],
            width,
            color,
        );
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

/// Uniform scale that fits a frame into a target area, centred
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fit {
    pub scale: f32,
    pub offset: Vec2,
}

impl Fit {
    pub fn new(content: Vec2, target: Vec2) -> Self {
        if content.x <= 0.0 || content.y <= 0.0 {
            return Self {
                scale: 1.0,
                offset: Vec2::ZERO,
            };
        }
        let scale = (target.x / content.x).min(target.y / content.y);
        Self {
            scale,
            offset: (target - content * scale) * 0.5,
        }
    }

    /// Frame coordinates to target coordinates
    pub fn apply(&self, point: Vec2) -> Vec2 {
        self.offset + point * self.scale
    }

    /// Target coordinates back to frame coordinates
    pub fn invert(&self, point: Vec2) -> Vec2 {
        (point - self.offset) / self.scale.max(f32::EPSILON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_letterbox() {
        let fit = Fit::new(Vec2::new(1000.0, 600.0), Vec2::new(500.0, 500.0));
        assert_eq!(fit.scale, 0.5);
        assert_eq!(fit.offset, Vec2::new(0.0, 100.0));
        assert_eq!(fit.apply(Vec2::new(1000.0, 600.0)), Vec2::new(500.0, 400.0));
        let p = Vec2::new(123.0, 45.0);
        assert!((fit.invert(fit.apply(p)) - p).length() < 1e-4);
    }

    #[test]
    fn test_fit_identity() {
        let size = Vec2::new(800.0, 600.0);
        let fit = Fit::new(size, size);
        assert_eq!(fit.scale, 1.0);
        assert_eq!(fit.offset, Vec2::ZERO);
    }

    #[test]
    fn test_hex_color() {
        assert_eq!(Color::hex(0x22d3ee), Color::rgb(0x22, 0xd3, 0xee));
        assert_eq!(Color::hex(0x000000).with_alpha(0.5).a, 128);
        assert_eq!(Color::from_array([1, 2, 3]), Color::rgb(1, 2, 3));
    }

    #[test]
    fn test_degenerate_polyline_skipped() {
        let mut frame = Frame::new(Vec2::new(100.0, 100.0));
        frame.polyline(vec![Vec2::ZERO], 1.0, palette::TEXT);
        assert!(frame.is_empty());
    }

    #[test]
    fn test_arrow_has_head() {
        let mut frame = Frame::new(Vec2::new(100.0, 100.0));
        frame.arrow(Vec2::ZERO, Vec2::new(0.0, -40.0), 2.0, palette::TEXT);
        assert_eq!(frame.len(), 2);
        frame.arrow(Vec2::ZERO, Vec2::ZERO, 2.0, palette::TEXT);
        assert_eq!(frame.len(), 3);
    }
}
