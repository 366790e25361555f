use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::HtmlCanvasElement;
use yew::prelude::*;

use super::SharedController;
use crate::paint::{context_2d, paint_scene, paint_shape};
use crate::presenters::{ChartKind, Guideline};

#[derive(Properties, PartialEq, Clone)]
pub struct ChartCanvasProps {
    pub kind: ChartKind,
    pub controller: SharedController,
    /// Bumped whenever a snapshot is applied.
    pub revision: u64,
    pub height: f64,
}

fn repaint(canvas_ref: &NodeRef, controller: &SharedController, kind: ChartKind, guideline: Option<&Guideline>) {
    let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() else {
        return;
    };
    if !canvas.is_connected() {
        return;
    }
    let Some(ctx) = context_2d(&canvas) else {
        return;
    };
    let ctrl = controller.0.borrow();
    let chart = ctrl.chart(kind);
    paint_scene(&ctx, chart.scene());
    if let Some(g) = guideline {
        for shape in chart.guideline_overlay(g) {
            paint_shape(&ctx, &shape);
        }
    }
}

/// Sizes the canvas to its layout width, relays the chart out and paints it.
fn fit_and_paint(canvas_ref: &NodeRef, controller: &SharedController, kind: ChartKind, height: f64) {
    let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() else {
        return;
    };
    let width = match canvas.client_width() {
        w if w > 0 => w as f64,
        _ => 400.0,
    };
    canvas.set_width(width as u32);
    canvas.set_height(height.max(0.0) as u32);
    controller.0.borrow_mut().chart_mut(kind).resize(width, height);
    repaint(canvas_ref, controller, kind, None);
}

#[function_component(ChartCanvas)]
pub fn chart_canvas(props: &ChartCanvasProps) -> Html {
    let canvas_ref = use_node_ref();
    let kind = props.kind;

    // Redraw after every applied snapshot.
    {
        let canvas_ref = canvas_ref.clone();
        let controller = props.controller.clone();
        let height = props.height;
        use_effect_with(props.revision, move |_| {
            fit_and_paint(&canvas_ref, &controller, kind, height);
            || ()
        });
    }
    // Follow the viewport.
    {
        let canvas_ref = canvas_ref.clone();
        let controller = props.controller.clone();
        let height = props.height;
        use_effect_with((), move |_| {
            let window = web_sys::window();
            let resize_cb = Closure::wrap(Box::new(move |_e: web_sys::Event| {
                fit_and_paint(&canvas_ref, &controller, kind, height);
            }) as Box<dyn FnMut(_)>);
            if let Some(win) = &window {
                win.add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
                    .ok();
            }
            move || {
                if let Some(win) = window {
                    let _ = win.remove_event_listener_with_callback(
                        "resize",
                        resize_cb.as_ref().unchecked_ref(),
                    );
                }
            }
        });
    }

    let onmousemove = {
        let canvas_ref = canvas_ref.clone();
        let controller = props.controller.clone();
        Callback::from(move |e: MouseEvent| {
            if !kind.has_guideline() {
                return;
            }
            let guideline = controller
                .0
                .borrow()
                .chart(kind)
                .guideline_at(e.offset_x() as f64);
            repaint(&canvas_ref, &controller, kind, guideline.as_ref());
        })
    };
    let onmouseleave = {
        let canvas_ref = canvas_ref.clone();
        let controller = props.controller.clone();
        Callback::from(move |_e: MouseEvent| {
            if kind.has_guideline() {
                repaint(&canvas_ref, &controller, kind, None);
            }
        })
    };

    html! {<div style="background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px 10px; min-width:0;">
        <div style="font-weight:600; font-size:13px; margin-bottom:4px;">{ kind.title() }</div>
        <canvas ref={canvas_ref} {onmousemove} {onmouseleave} style={format!("display:block; width:100%; height:{}px;", props.height)}></canvas>
    </div>}
}
