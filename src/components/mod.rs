use std::cell::RefCell;
use std::rc::Rc;

use crate::session::SessionController;

pub mod app;
pub mod chart_canvas;
pub mod controls_panel;
pub mod game_over_overlay;
pub mod grid_view;
pub mod session_panel;
pub mod stats_panel;

pub use app::App;

/// Controller handle passed down as a prop; equal only to itself.
#[derive(Clone)]
pub struct SharedController(pub Rc<RefCell<SessionController>>);

impl PartialEq for SharedController {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
