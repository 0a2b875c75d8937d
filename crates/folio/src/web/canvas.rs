//! `Surface` over a 2D canvas context.

use std::f64::consts::TAU;

use folio_ui::{DrawCommand, Paint, Shape, Surface, Viewport};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// A full-viewport canvas.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Wraps a canvas element.
    ///
    /// # Errors
    ///
    /// Fails if the element has no 2D context.
    pub fn from_canvas(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    fn style(&self, paint: &Paint) -> Result<JsValue, JsValue> {
        match *paint {
            Paint::Solid(color) => Ok(JsValue::from_str(&color.to_css())),
            Paint::LinearGradient { from, to, stops } => {
                let gradient = self.ctx.create_linear_gradient(
                    f64::from(from.0),
                    f64::from(from.1),
                    f64::from(to.0),
                    f64::from(to.1),
                );
                for (offset, color) in stops {
                    gradient.add_color_stop(offset, &color.to_css())?;
                }
                Ok(gradient.into())
            }
            Paint::RadialGradient { center, radius, stops } => {
                let (cx, cy) = (f64::from(center.0), f64::from(center.1));
                let gradient = self
                    .ctx
                    .create_radial_gradient(cx, cy, 0.0, cx, cy, f64::from(radius))?;
                for (offset, color) in stops {
                    gradient.add_color_stop(offset, &color.to_css())?;
                }
                Ok(gradient.into())
            }
        }
    }

    #[allow(deprecated)]
    fn draw_shape(&self, command: &DrawCommand) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.set_global_alpha(f64::from(command.alpha));
        if let Some(shadow) = command.shadow {
            ctx.set_shadow_blur(f64::from(shadow.blur));
            ctx.set_shadow_color(&shadow.color.to_css());
        }

        let t = command.transform;
        if !t.is_identity() {
            ctx.translate(f64::from(t.translate.0), f64::from(t.translate.1))?;
            ctx.rotate(f64::from(t.rotation))?;
            ctx.scale(f64::from(t.scale.0), f64::from(t.scale.1))?;
        }

        let style = self.style(&command.paint)?;
        ctx.begin_path();
        match command.shape {
            Shape::Circle { center, radius } => {
                ctx.arc(f64::from(center.0), f64::from(center.1), f64::from(radius), 0.0, TAU)?;
            }
            Shape::Ellipse { center, rx, ry } => {
                ctx.ellipse(
                    f64::from(center.0),
                    f64::from(center.1),
                    f64::from(rx),
                    f64::from(ry),
                    0.0,
                    0.0,
                    TAU,
                )?;
            }
            Shape::Diamond { half_width, half_height } => {
                let (w, h) = (f64::from(half_width), f64::from(half_height));
                ctx.move_to(0.0, -h);
                ctx.line_to(w, 0.0);
                ctx.line_to(0.0, h);
                ctx.line_to(-w, 0.0);
                ctx.close_path();
            }
            Shape::Heart { size } => {
                let s = f64::from(size);
                ctx.move_to(0.0, s / 4.0);
                ctx.bezier_curve_to(-s / 2.0, -s / 4.0, -s / 2.0, -s / 2.0, 0.0, -s / 8.0);
                ctx.bezier_curve_to(s / 2.0, -s / 2.0, s / 2.0, -s / 4.0, 0.0, s / 4.0);
            }
            Shape::Rect(rect) => {
                ctx.rect(
                    f64::from(rect.x),
                    f64::from(rect.y),
                    f64::from(rect.width),
                    f64::from(rect.height),
                );
            }
            Shape::Line { from, to, width } => {
                ctx.set_line_width(f64::from(width));
                ctx.move_to(f64::from(from.0), f64::from(from.1));
                ctx.line_to(f64::from(to.0), f64::from(to.1));
                ctx.set_stroke_style(&style);
                ctx.stroke();
                return Ok(());
            }
        }
        ctx.set_fill_style(&style);
        ctx.fill();
        Ok(())
    }
}

impl Surface for CanvasSurface {
    fn resize(&mut self, viewport: Viewport) {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let (width, height) = (viewport.width.max(0.0) as u32, viewport.height.max(0.0) as u32);
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn clear(&mut self) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            f64::from(self.canvas.width()),
            f64::from(self.canvas.height()),
        );
    }

    fn draw(&mut self, command: &DrawCommand) {
        self.ctx.save();
        let result = self.draw_shape(command);
        self.ctx.restore();
        if let Err(err) = result {
            tracing::trace!("Canvas draw skipped: {:?}", err);
        }
    }
}
