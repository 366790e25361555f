use web_sys::HtmlCanvasElement;
use yew::prelude::*;

use super::SharedController;
use crate::paint::{context_2d, paint_grid};
use crate::presenters::grid::LOGICAL_SIZE;

/// Canvas pixels per logical grid unit.
const DISPLAY_SCALE: f64 = 1.5;

#[derive(Properties, PartialEq, Clone)]
pub struct GridViewProps {
    pub controller: SharedController,
    pub revision: u64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Hover {
    index: usize,
    x: f64,
    y: f64,
}

#[function_component(GridView)]
pub fn grid_view(props: &GridViewProps) -> Html {
    let canvas_ref = use_node_ref();
    let hover = use_state(|| None::<Hover>);
    let size_px = LOGICAL_SIZE * DISPLAY_SCALE;

    {
        let canvas_ref = canvas_ref.clone();
        let controller = props.controller.clone();
        let hover = hover.clone();
        use_effect_with(props.revision, move |_| {
            // cells were rebuilt; nothing from the previous turn stays hovered
            hover.set(None);
            if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                canvas.set_width(size_px as u32);
                canvas.set_height(size_px as u32);
                if let Some(ctx) = context_2d(&canvas) {
                    let ctrl = controller.0.borrow();
                    paint_grid(&ctx, ctrl.grid().scene(), size_px, size_px, DISPLAY_SCALE);
                }
            }
            || ()
        });
    }

    let onmousemove = {
        let controller = props.controller.clone();
        let hover = hover.clone();
        Callback::from(move |e: MouseEvent| {
            let x = e.offset_x() as f64;
            let y = e.offset_y() as f64;
            let hit = controller
                .0
                .borrow()
                .grid()
                .scene()
                .hit_test(x / DISPLAY_SCALE, y / DISPLAY_SCALE);
            let current = (*hover).map(|h| h.index);
            if hit != current {
                hover.set(hit.map(|index| Hover { index, x, y }));
            }
        })
    };
    let onmouseleave = {
        let hover = hover.clone();
        Callback::from(move |_e: MouseEvent| hover.set(None))
    };

    let tooltip = (*hover).and_then(|h| {
        let ctrl = props.controller.0.borrow();
        let info = ctrl.grid().scene().cells.get(h.index)?.tooltip.clone();
        Some(html! {
            <div style={format!("position:absolute; left:{}px; top:{}px; pointer-events:none; background:rgba(22,27,34,0.95); border:1px solid #30363d; border-radius:8px; padding:8px 12px; max-width:240px; font-size:12px; color:#c9d1d9; z-index:10;", h.x + 14.0, h.y + 14.0)}>
                { Html::from_html_unchecked(AttrValue::from(info)) }
            </div>
        })
    });

    html! {<div style="position:relative; display:inline-block; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px;">
        <canvas ref={canvas_ref} {onmousemove} {onmouseleave} style={format!("display:block; width:{0}px; height:{0}px;", size_px)}></canvas>
        { tooltip.unwrap_or_default() }
    </div>}
}
