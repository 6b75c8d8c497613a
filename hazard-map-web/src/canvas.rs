use std::f64::consts::PI;

use hazard_map::hazard_map_types::{Point2d, Size};
use hazard_map::render::{Canvas, LinePaint, PointPaint, PolygonPaint};
use hazard_map::Color;
use web_sys::{CanvasRenderingContext2d, CanvasWindingRule, HtmlCanvasElement};

const BACKGROUND: Color = Color::from_hex("#E8EEF1");

/// [`Canvas`] drawing to an HTML canvas with the 2D context.
pub struct WebCanvas {
    element: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl WebCanvas {
    pub fn new(element: HtmlCanvasElement, context: CanvasRenderingContext2d) -> Self {
        Self { element, context }
    }

    /// Matches the canvas resolution to its size on the page and returns the new size.
    pub fn fit_to_element(&self) -> Size {
        let width = self.element.client_width().max(0) as u32;
        let height = self.element.client_height().max(0) as u32;
        self.element.set_width(width);
        self.element.set_height(height);

        Size::new(width as f64, height as f64)
    }

    fn trace_ring(&self, ring: &[Point2d]) {
        let mut points = ring.iter();
        let Some(first) = points.next() else {
            return;
        };

        self.context.move_to(first.x, first.y);
        for point in points {
            self.context.line_to(point.x, point.y);
        }
        self.context.close_path();
    }
}

impl Canvas for WebCanvas {
    fn size(&self) -> Size {
        Size::new(self.element.width() as f64, self.element.height() as f64)
    }

    fn clear(&mut self) {
        let size = self.size();
        self.context.set_fill_style_str(&BACKGROUND.to_css());
        self.context
            .fill_rect(0.0, 0.0, size.width(), size.height());
    }

    fn draw_polygon(&mut self, rings: &[Vec<Point2d>], paint: &PolygonPaint) {
        self.context.begin_path();
        for ring in rings {
            self.trace_ring(ring);
        }

        self.context.set_fill_style_str(&paint.color.to_css());
        self.context
            .fill_with_canvas_winding_rule(CanvasWindingRule::Evenodd);
    }

    fn draw_line(&mut self, ring: &[Point2d], paint: &LinePaint) {
        self.context.begin_path();
        self.trace_ring(ring);

        self.context.set_stroke_style_str(&paint.color.to_css());
        self.context.set_line_width(paint.width);
        self.context.stroke();
    }

    fn draw_point(&mut self, position: Point2d, paint: &PointPaint) {
        self.context.begin_path();
        if let Err(err) = self
            .context
            .arc(position.x, position.y, paint.size / 2.0, 0.0, 2.0 * PI)
        {
            log::warn!("Failed to draw a point: {err:?}");
            return;
        }

        self.context.set_fill_style_str(&paint.color.to_css());
        self.context.fill();
        self.context.set_stroke_style_str(&paint.outline.to_css());
        self.context.set_line_width(2.0);
        self.context.stroke();
    }
}
