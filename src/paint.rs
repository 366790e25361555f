//! Draws presenter scenes onto a 2d canvas context.

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::CanvasRenderingContext2d;

use crate::presenters::GridScene;
use crate::scene::{Anchor, Scene, Shape};

pub const BACKGROUND: &str = "#0e1116";

pub fn clear(ctx: &CanvasRenderingContext2d, width: f64, height: f64) {
    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
    ctx.set_fill_style_str(BACKGROUND);
    ctx.fill_rect(0.0, 0.0, width, height);
}

pub fn paint_scene(ctx: &CanvasRenderingContext2d, scene: &Scene) {
    clear(ctx, scene.width, scene.height);
    for shape in &scene.shapes {
        paint_shape(ctx, shape);
    }
}

/// Paints a grid scene scaled uniformly by `scale` (pixels per logical unit).
pub fn paint_grid(ctx: &CanvasRenderingContext2d, scene: &GridScene, width: f64, height: f64, scale: f64) {
    clear(ctx, width, height);
    ctx.set_transform(scale, 0.0, 0.0, scale, 0.0, 0.0).ok();
    for guide in &scene.guides {
        paint_shape(ctx, guide);
    }
    for cell in &scene.cells {
        paint_shape(ctx, &cell.shape);
    }
    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
}

pub fn paint_shape(ctx: &CanvasRenderingContext2d, shape: &Shape) {
    match shape {
        Shape::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
            width,
            dashed,
        } => {
            if *dashed {
                let dash = js_sys::Array::of2(&JsValue::from_f64(4.0), &JsValue::from_f64(4.0));
                ctx.set_line_dash(&dash).ok();
            }
            ctx.set_stroke_style_str(stroke);
            ctx.set_line_width(*width);
            ctx.begin_path();
            ctx.move_to(*x1, *y1);
            ctx.line_to(*x2, *y2);
            ctx.stroke();
            if *dashed {
                ctx.set_line_dash(&js_sys::Array::new()).ok();
            }
        }
        Shape::Polyline {
            points,
            stroke,
            width,
        } => {
            let mut iter = points.iter();
            let Some(&(x0, y0)) = iter.next() else {
                return;
            };
            ctx.set_stroke_style_str(stroke);
            ctx.set_line_width(*width);
            ctx.begin_path();
            ctx.move_to(x0, y0);
            for &(x, y) in iter {
                ctx.line_to(x, y);
            }
            ctx.stroke();
        }
        Shape::Circle { cx, cy, r, fill } => {
            ctx.set_fill_style_str(fill);
            ctx.begin_path();
            ctx.arc(*cx, *cy, r.max(0.0), 0.0, TAU).ok();
            ctx.fill();
        }
        Shape::Rect { x, y, w, h, fill } => {
            ctx.set_fill_style_str(fill);
            ctx.fill_rect(*x, *y, *w, *h);
        }
        Shape::Wedge {
            cx,
            cy,
            r,
            start,
            end,
            fill,
        } => {
            ctx.set_fill_style_str(fill);
            ctx.begin_path();
            ctx.move_to(*cx, *cy);
            ctx.arc(*cx, *cy, *r, *start, *end).ok();
            ctx.close_path();
            ctx.fill();
        }
        Shape::Text {
            x,
            y,
            text,
            anchor,
            size,
            color,
        } => {
            ctx.set_fill_style_str(color);
            ctx.set_font(&format!("{}px sans-serif", size));
            ctx.set_text_align(match anchor {
                Anchor::Start => "left",
                Anchor::Middle => "center",
                Anchor::End => "right",
            });
            ctx.fill_text(text, *x, *y).ok();
        }
    }
}

pub fn context_2d(canvas: &web_sys::HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()?
        .dyn_into::<CanvasRenderingContext2d>()
        .ok()
}
