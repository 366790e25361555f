pub mod chart;
pub mod grid;

pub use chart::{ChartData, ChartKind, ChartPresenter, Guideline};
pub use grid::{GridPresenter, GridScene};
