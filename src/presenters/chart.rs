//! Chart presenters for the time, race, race-pie and money visualizations.
//!
//! Each presenter is built once and rebound on every snapshot: `render` drops
//! whatever was bound before and lays the new data out into a fresh `Scene`.
//! `resize` lays the bound data out again for a new viewport.

use std::collections::BTreeMap;
use std::f64::consts::{FRAC_PI_2, TAU};

use crate::model::{PieSegment, Series, Snapshot};
use crate::scene::{AXIS_COLOR, Anchor, Scene, Shape, palette_color};

/// Bar chart tick labels, looked up by point `x`. The engine sends four money
/// series but only three labels exist; an `x` past the table stays unlabeled.
pub const MONEY_TICK_LABELS: [&str; 3] = ["production", "cost(private)", "cost(public)"];

pub fn money_tick_label(x: usize) -> &'static str {
    MONEY_TICK_LABELS.get(x).copied().unwrap_or("")
}

const Y_MIN: f64 = 0.0;
const Y_MAX: f64 = 100.0;

const MARGIN_TOP: f64 = 24.0;
const MARGIN_RIGHT: f64 = 12.0;
const MARGIN_BOTTOM: f64 = 34.0;
const MARGIN_LEFT: f64 = 40.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Time,
    Race,
    RacePie,
    Money,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::Time,
        ChartKind::Race,
        ChartKind::RacePie,
        ChartKind::Money,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ChartKind::Time => "Employment",
            ChartKind::Race => "Employment by race",
            ChartKind::RacePie => "Population by race",
            ChartKind::Money => "Production and cost",
        }
    }

    /// Whether the chart gets the interactive crosshair guideline.
    pub fn has_guideline(self) -> bool {
        matches!(self, ChartKind::Time | ChartKind::Race)
    }

    /// The part of a snapshot this chart draws.
    pub fn slice(self, snapshot: &Snapshot) -> ChartData {
        match self {
            ChartKind::Time => ChartData::Lines(snapshot.time.clone()),
            ChartKind::Race => ChartData::Lines(snapshot.race.clone()),
            ChartKind::RacePie => ChartData::Pie(snapshot.race_pie.clone()),
            ChartKind::Money => ChartData::Stacked(snapshot.money.clone()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ChartData {
    Lines(Vec<Series>),
    Pie(Vec<PieSegment>),
    Stacked(Vec<Series>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Reading {
    pub key: String,
    pub y: f64,
    pub color: String,
}

/// Crosshair state for one pointer position over a line chart.
#[derive(Clone, Debug, PartialEq)]
pub struct Guideline {
    /// Horizontal pixel position of the snapped turn.
    pub x: f64,
    pub turn: f64,
    pub readings: Vec<Reading>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Plot {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl Plot {
    fn new(width: f64, height: f64) -> Self {
        Self {
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            width: (width - MARGIN_LEFT - MARGIN_RIGHT).max(1.0),
            height: (height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0),
        }
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }

    fn right(&self) -> f64 {
        self.left + self.width
    }
}

pub struct ChartPresenter {
    kind: ChartKind,
    width: f64,
    height: f64,
    bound: Option<ChartData>,
    scene: Scene,
}

impl ChartPresenter {
    pub fn new(kind: ChartKind, width: f64, height: f64) -> Self {
        Self {
            kind,
            width,
            height,
            bound: None,
            scene: Scene::new(width, height),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[cfg(test)]
    pub fn is_bound(&self) -> bool {
        self.bound.is_some()
    }

    /// Replaces the bound data and redraws from scratch.
    pub fn render(&mut self, data: ChartData) {
        self.bound = Some(data);
        self.layout();
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        self.layout();
    }

    fn layout(&mut self) {
        let mut scene = Scene::new(self.width, self.height);
        match &self.bound {
            Some(ChartData::Lines(series)) => self.layout_lines(&mut scene, series),
            Some(ChartData::Pie(segments)) => self.layout_pie(&mut scene, segments),
            Some(ChartData::Stacked(series)) => self.layout_stacked(&mut scene, series),
            None => {}
        }
        self.scene = scene;
    }

    fn layout_lines(&self, scene: &mut Scene, series: &[Series]) {
        let plot = Plot::new(self.width, self.height);
        let (x0, x1) = x_domain(series);
        let sx = |x: f64| plot.left + (x - x0) / (x1 - x0) * plot.width;
        let sy = |y: f64| plot.top + (1.0 - (y - Y_MIN) / (Y_MAX - Y_MIN)) * plot.height;

        for i in 0..=5 {
            let v = Y_MIN + (Y_MAX - Y_MIN) * i as f64 / 5.0;
            let y = sy(v);
            scene.push(Shape::line(plot.left, y, plot.right(), y, "#21262d"));
            scene.push(Shape::text(plot.left - 4.0, y + 4.0, format!("{:.0}", v), Anchor::End));
        }
        for i in 0..=4 {
            let v = x0 + (x1 - x0) * i as f64 / 4.0;
            scene.push(Shape::text(sx(v), plot.bottom() + 14.0, format!("{:.0}", v), Anchor::Middle));
        }
        push_axes(scene, &plot);
        scene.push(Shape::text(
            plot.left + plot.width / 2.0,
            self.height - 4.0,
            "Time",
            Anchor::Middle,
        ));

        for (i, s) in series.iter().enumerate() {
            scene.push(Shape::Polyline {
                points: s.values.iter().map(|p| (sx(p.x), sy(p.y))).collect(),
                stroke: series_color(s, i),
                width: 2.0,
            });
        }
        push_legend(scene, series);
    }

    fn layout_pie(&self, scene: &mut Scene, segments: &[PieSegment]) {
        let total: f64 = segments.iter().map(|s| s.value.max(0.0)).sum();
        if total <= 0.0 {
            return;
        }
        let cx = self.width / 2.0;
        let cy = self.height / 2.0;
        let r = (self.width.min(self.height) / 2.0 - 16.0).max(0.0);
        let mut angle = -FRAC_PI_2;
        for (i, seg) in segments.iter().enumerate() {
            let value = seg.value.max(0.0);
            if value == 0.0 {
                continue;
            }
            let sweep = value / total * TAU;
            scene.push(Shape::Wedge {
                cx,
                cy,
                r,
                start: angle,
                end: angle + sweep,
                fill: palette_color(i).to_string(),
            });
            let mid = angle + sweep / 2.0;
            scene.push(Shape::text(
                cx + mid.cos() * r * 0.65,
                cy + mid.sin() * r * 0.65,
                seg.label.clone(),
                Anchor::Middle,
            ));
            angle += sweep;
        }
    }

    fn layout_stacked(&self, scene: &mut Scene, series: &[Series]) {
        let plot = Plot::new(self.width, self.height);
        // one bar per distinct x, stacked in series order
        let mut columns: BTreeMap<usize, Vec<(usize, f64)>> = BTreeMap::new();
        for (i, s) in series.iter().enumerate() {
            for p in &s.values {
                let x = p.x.round().max(0.0) as usize;
                columns.entry(x).or_default().push((i, p.y.max(0.0)));
            }
        }
        if columns.is_empty() {
            return;
        }
        let mut y_max = columns
            .values()
            .map(|stack| stack.iter().map(|&(_, v)| v).sum::<f64>())
            .fold(0.0, f64::max);
        if y_max <= 0.0 {
            y_max = 1.0;
        }
        let band = plot.width / columns.len() as f64;
        let scale = |v: f64| v / y_max * plot.height;

        for i in 0..=4 {
            let v = y_max * i as f64 / 4.0;
            let y = plot.bottom() - scale(v);
            scene.push(Shape::line(plot.left, y, plot.right(), y, "#21262d"));
            scene.push(Shape::text(plot.left - 4.0, y + 4.0, format!("{:.0}", v), Anchor::End));
        }

        for (c, (&x, stack)) in columns.iter().enumerate() {
            let left = plot.left + band * c as f64 + band * 0.2;
            let mut base = 0.0;
            for &(i, v) in stack {
                if v == 0.0 {
                    continue;
                }
                scene.push(Shape::Rect {
                    x: left,
                    y: plot.bottom() - scale(base + v),
                    w: band * 0.6,
                    h: scale(v),
                    fill: series_color(&series[i], i),
                });
                base += v;
            }
            let label = money_tick_label(x);
            if !label.is_empty() {
                scene.push(Shape::text(
                    plot.left + band * (c as f64 + 0.5),
                    plot.bottom() + 14.0,
                    label,
                    Anchor::Middle,
                ));
            }
        }
        push_axes(scene, &plot);
        push_legend(scene, series);
    }

    /// Snaps a pointer x (pixels) to the nearest turn and reads every series there.
    pub fn guideline_at(&self, px: f64) -> Option<Guideline> {
        if !self.kind.has_guideline() {
            return None;
        }
        let Some(ChartData::Lines(series)) = &self.bound else {
            return None;
        };
        let plot = Plot::new(self.width, self.height);
        if px < plot.left || px > plot.right() {
            return None;
        }
        let (x0, x1) = x_domain(series);
        let x = x0 + (px - plot.left) / plot.width * (x1 - x0);
        let nearest = |s: &Series| {
            s.values.iter().copied().min_by(|a, b| {
                (a.x - x).abs().total_cmp(&(b.x - x).abs())
            })
        };
        let turn = series.first().and_then(nearest)?.x;
        let readings = series
            .iter()
            .enumerate()
            .filter_map(|(i, s)| {
                nearest(s).map(|p| Reading {
                    key: s.key.clone(),
                    y: p.y,
                    color: series_color(s, i),
                })
            })
            .collect();
        Some(Guideline {
            x: plot.left + (turn - x0) / (x1 - x0) * plot.width,
            turn,
            readings,
        })
    }

    /// Shapes drawn over the scene while the crosshair is active.
    pub fn guideline_overlay(&self, guideline: &Guideline) -> Vec<Shape> {
        let plot = Plot::new(self.width, self.height);
        let mut shapes = vec![Shape::Line {
            x1: guideline.x,
            y1: plot.top,
            x2: guideline.x,
            y2: plot.bottom(),
            stroke: "#8b949e".to_string(),
            width: 1.0,
            dashed: true,
        }];
        let flip = guideline.x > plot.left + plot.width * 0.7;
        let (tx, anchor) = if flip {
            (guideline.x - 6.0, Anchor::End)
        } else {
            (guideline.x + 6.0, Anchor::Start)
        };
        shapes.push(Shape::text(tx, plot.top + 12.0, format!("t = {:.0}", guideline.turn), anchor));
        for (i, r) in guideline.readings.iter().enumerate() {
            shapes.push(Shape::Text {
                x: tx,
                y: plot.top + 26.0 + 13.0 * i as f64,
                text: format!("{}: {:.1}", r.key, r.y),
                anchor,
                size: 11.0,
                color: r.color.clone(),
            });
        }
        shapes
    }
}

fn x_domain(series: &[Series]) -> (f64, f64) {
    let mut xs = series.iter().flat_map(|s| s.values.iter().map(|p| p.x));
    let Some(first) = xs.next() else {
        return (0.0, 1.0);
    };
    let (lo, hi) = xs.fold((first, first), |(lo, hi), x| (lo.min(x), hi.max(x)));
    if hi > lo { (lo, hi) } else { (lo, lo + 1.0) }
}

fn series_color(series: &Series, index: usize) -> String {
    series
        .color
        .clone()
        .unwrap_or_else(|| palette_color(index).to_string())
}

fn push_axes(scene: &mut Scene, plot: &Plot) {
    scene.push(Shape::line(plot.left, plot.bottom(), plot.right(), plot.bottom(), AXIS_COLOR));
    scene.push(Shape::line(plot.left, plot.top, plot.left, plot.bottom(), AXIS_COLOR));
}

fn push_legend(scene: &mut Scene, series: &[Series]) {
    let mut x = MARGIN_LEFT;
    for (i, s) in series.iter().enumerate() {
        if s.key.is_empty() {
            continue;
        }
        scene.push(Shape::Circle {
            cx: x + 4.0,
            cy: 10.0,
            r: 4.0,
            fill: series_color(s, i),
        });
        scene.push(Shape::text(x + 12.0, 14.0, s.key.clone(), Anchor::Start));
        x += 24.0 + 6.5 * s.key.chars().count() as f64;
    }
}
