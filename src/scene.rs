//! Backend-neutral drawing primitives produced by the presenters.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke: String,
        width: f64,
        dashed: bool,
    },
    Polyline {
        points: Vec<(f64, f64)>,
        stroke: String,
        width: f64,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        fill: String,
    },
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        fill: String,
    },
    /// Pie slice; angles in radians, clockwise from the positive x axis.
    Wedge {
        cx: f64,
        cy: f64,
        r: f64,
        start: f64,
        end: f64,
        fill: String,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
        anchor: Anchor,
        size: f64,
        color: String,
    },
}

impl Shape {
    pub fn line(x1: f64, y1: f64, x2: f64, y2: f64, stroke: &str) -> Self {
        Shape::Line {
            x1,
            y1,
            x2,
            y2,
            stroke: stroke.to_string(),
            width: 1.0,
            dashed: false,
        }
    }

    pub fn text(x: f64, y: f64, text: impl Into<String>, anchor: Anchor) -> Self {
        Shape::Text {
            x,
            y,
            text: text.into(),
            anchor,
            size: 11.0,
            color: TEXT_COLOR.to_string(),
        }
    }

    /// Point containment, used for hover hit testing.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        match self {
            Shape::Circle { cx, cy, r, .. } => {
                let (dx, dy) = (px - cx, py - cy);
                dx * dx + dy * dy <= r * r
            }
            Shape::Rect { x, y, w, h, .. } => px >= *x && px < x + w && py >= *y && py < y + h,
            _ => false,
        }
    }
}

pub const TEXT_COLOR: &str = "#c9d1d9";
pub const AXIS_COLOR: &str = "#30363d";

/// d3 category10.
pub const PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

pub fn palette_color(i: usize) -> &'static str {
    PALETTE[i % PALETTE.len()]
}

/// A fully drawn frame. Replaced wholesale on every render.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub shapes: Vec<Shape>,
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            shapes: Vec::new(),
        }
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    #[cfg(test)]
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}
