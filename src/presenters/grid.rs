//! Spatial grid of simulated agents. Every render tears the previous scene
//! down; cells carry no identity from one turn to the next.

use crate::model::{CellKind, GridCell};
use crate::scene::Shape;

/// Logical viewport edge, in scene units.
pub const LOGICAL_SIZE: f64 = 300.0;
/// Cells per axis: a 2x2 block of 7x7 neighbourhoods.
pub const GRID_RESOLUTION: u32 = 14;

const GUIDE_COLOR: &str = "#30363d";

#[derive(Clone, Debug, PartialEq)]
pub struct GridPrimitive {
    pub shape: Shape,
    /// Trusted engine markup, inserted without escaping.
    pub tooltip: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridScene {
    pub cell_size: f64,
    /// Centerline guides, drawn before the cells.
    pub guides: Vec<Shape>,
    pub cells: Vec<GridPrimitive>,
}

impl GridScene {
    /// Index of the topmost cell primitive under a logical point.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<usize> {
        self.cells.iter().rposition(|c| c.shape.contains(x, y))
    }

    #[cfg(test)]
    pub fn circle_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| matches!(c.shape, Shape::Circle { .. }))
            .count()
    }

    #[cfg(test)]
    pub fn square_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| matches!(c.shape, Shape::Rect { .. }))
            .count()
    }
}

pub struct GridPresenter {
    width: f64,
    height: f64,
    cols: u32,
    rows: u32,
    scene: GridScene,
}

impl Default for GridPresenter {
    fn default() -> Self {
        Self::new(LOGICAL_SIZE, LOGICAL_SIZE, GRID_RESOLUTION, GRID_RESOLUTION)
    }
}

impl GridPresenter {
    pub fn new(width: f64, height: f64, cols: u32, rows: u32) -> Self {
        Self {
            width,
            height,
            cols: cols.max(1),
            rows: rows.max(1),
            scene: GridScene::default(),
        }
    }

    /// Square cell edge: the smaller of the two per-axis sizes.
    pub fn cell_size(&self) -> f64 {
        let sx = self.width / self.cols as f64;
        let sy = self.height / self.rows as f64;
        sx.min(sy)
    }

    pub fn scene(&self) -> &GridScene {
        &self.scene
    }

    pub fn render(&mut self, cells: &[GridCell]) {
        let size = self.cell_size();
        let mid_x = self.cols as f64 * size / 2.0;
        let mid_y = self.rows as f64 * size / 2.0;
        let guides = vec![
            Shape::line(mid_x, 0.0, mid_x, self.rows as f64 * size, GUIDE_COLOR),
            Shape::line(0.0, mid_y, self.cols as f64 * size, mid_y, GUIDE_COLOR),
        ];
        let cells = cells
            .iter()
            .map(|cell| GridPrimitive {
                shape: cell_shape(cell, size),
                tooltip: cell.info.clone(),
            })
            .collect();
        self.scene = GridScene {
            cell_size: size,
            guides,
            cells,
        };
    }
}

fn cell_shape(cell: &GridCell, size: f64) -> Shape {
    let x = cell.x as f64;
    let y = cell.y as f64;
    match cell.kind {
        CellKind::Person => Shape::Circle {
            cx: (x + 0.5) * size,
            cy: (y + 0.5) * size,
            r: size / 2.0 - 1.0,
            fill: cell.color.clone(),
        },
        CellKind::Other(_) => Shape::Rect {
            x: x * size,
            y: y * size,
            w: size,
            h: size,
            fill: cell.color.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(x: i32, y: i32, kind: CellKind, info: &str) -> GridCell {
        GridCell {
            x,
            y,
            kind,
            color: "#abc".into(),
            info: info.into(),
        }
    }

    fn employer(x: i32, y: i32) -> GridCell {
        cell(x, y, CellKind::Other("employer".into()), "<h1>Employer:</h1>")
    }

    fn person(x: i32, y: i32) -> GridCell {
        cell(x, y, CellKind::Person, "<h1>Person:</h1>")
    }

    #[test]
    fn square_cells_from_fixed_viewport() {
        let grid = GridPresenter::default();
        assert_eq!(grid.cell_size(), 300.0 / 14.0);
        let wide = GridPresenter::new(300.0, 200.0, 14, 14);
        assert_eq!(wide.cell_size(), 200.0 / 14.0);
    }

    #[test]
    fn one_primitive_per_cell_by_kind() {
        let mut grid = GridPresenter::new(140.0, 140.0, 14, 14);
        grid.render(&[person(0, 0), employer(3, 4), person(13, 13)]);
        let scene = grid.scene();
        assert_eq!(scene.cells.len(), 3);
        assert_eq!(scene.circle_count(), 2);
        assert_eq!(scene.square_count(), 1);
        assert_eq!(
            scene.cells[0].shape,
            Shape::Circle {
                cx: 5.0,
                cy: 5.0,
                r: 4.0,
                fill: "#abc".into()
            }
        );
        assert_eq!(
            scene.cells[1].shape,
            Shape::Rect {
                x: 30.0,
                y: 40.0,
                w: 10.0,
                h: 10.0,
                fill: "#abc".into()
            }
        );
        assert_eq!(scene.cells[1].tooltip, "<h1>Employer:</h1>");
    }

    #[test]
    fn centerline_guides() {
        let mut grid = GridPresenter::new(140.0, 140.0, 14, 14);
        grid.render(&[]);
        assert_eq!(
            grid.scene().guides,
            vec![
                Shape::line(70.0, 0.0, 70.0, 140.0, GUIDE_COLOR),
                Shape::line(0.0, 70.0, 140.0, 70.0, GUIDE_COLOR),
            ]
        );
        assert!(grid.scene().cells.is_empty());
    }

    #[test]
    fn render_discards_previous_primitives() {
        let mut grid = GridPresenter::default();
        grid.render(&[person(1, 1), person(2, 2), employer(5, 5)]);
        grid.render(&[employer(7, 7)]);
        let scene = grid.scene();
        assert_eq!(scene.cells.len(), 1);
        assert_eq!(scene.circle_count(), 0);
        assert_eq!(scene.guides.len(), 2);
    }

    #[test]
    fn hit_test_finds_topmost_cell() {
        let mut grid = GridPresenter::new(140.0, 140.0, 14, 14);
        grid.render(&[employer(2, 2), person(2, 2), person(6, 6)]);
        let scene = grid.scene();
        assert_eq!(scene.hit_test(25.0, 25.0), Some(1));
        // square corner lies outside the person circle
        assert_eq!(scene.hit_test(20.5, 20.5), Some(0));
        assert_eq!(scene.hit_test(65.0, 65.0), Some(2));
        assert_eq!(scene.hit_test(100.0, 5.0), None);
    }
}
