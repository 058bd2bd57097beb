use std::io;

use log::debug;
use machine_learning::Point;

use crate::{Affine, Color, ImageFormat, Raster, RasterSink, Window};

const DEFAULT_SIZE: usize = 500;
const MARKER_RADIUS: f64 = 3.0;

/// A straight segment between two points in data space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

/// A circle in data space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

/// Accumulates shapes in data space and draws them onto a pixel canvas.
///
/// The data window given with `set_window` is grown to the canvas aspect ratio when drawing, so
/// shapes are never stretched. Circle radii are in data units.
///
/// Point markers are filled disks with a radius of 3 pixels, not 3 data units, so unlike circles
/// they keep the same size whatever the window.
#[derive(Debug, Clone)]
pub struct Canvas {
    points: Vec<Point>,
    point_colors: Vec<Color>,
    lines: Vec<Segment>,
    line_colors: Vec<Color>,
    circles: Vec<Circle>,
    circle_colors: Vec<Color>,

    window: Window,
    width: usize,
    height: usize,
    marker_radius: f64,
    background: Color,
}

impl Canvas {
    /// Returns a new, empty, 500x500 pixels `Canvas` showing the data window `[0, 500]²`.
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            point_colors: Vec::new(),
            lines: Vec::new(),
            line_colors: Vec::new(),
            circles: Vec::new(),
            circle_colors: Vec::new(),
            window: Window::new(0.0, DEFAULT_SIZE as f64, 0.0, DEFAULT_SIZE as f64),
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            marker_radius: MARKER_RADIUS,
            background: Color::WHITE,
        }
    }

    /// Sets the size in pixels of the drawn image, at least one pixel per side.
    pub fn set_size(&mut self, width: usize, height: usize) {
        self.width = width.max(1);
        self.height = height.max(1);
    }

    /// Sets the data window the shapes are drawn within.
    pub fn set_window(&mut self, window: Window) {
        self.window = window;
    }

    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The data window actually shown, grown to the aspect ratio of the canvas.
    pub fn window(&self) -> Window {
        self.window.fit_aspect(self.width, self.height)
    }

    /// The map from data space to pixel space.
    pub fn transform(&self) -> Affine {
        Affine::window_to_canvas(&self.window(), self.width, self.height)
    }

    /// Adds a black point marker.
    pub fn add_point(&mut self, p: Point) {
        self.add_point_with(p, Color::BLACK);
    }

    pub fn add_point_with(&mut self, p: Point, color: Color) {
        self.points.push(p);
        self.point_colors.push(color);
    }

    /// Adds a red segment.
    pub fn add_line(&mut self, from: Point, to: Point) {
        self.add_line_with(from, to, Color::RED);
    }

    pub fn add_line_with(&mut self, from: Point, to: Point, color: Color) {
        self.lines.push(Segment { from, to });
        self.line_colors.push(color);
    }

    /// Adds a green circle outline.
    pub fn add_circle(&mut self, center: Point, radius: f64) {
        self.add_circle_with(center, radius, Color::GREEN);
    }

    pub fn add_circle_with(&mut self, center: Point, radius: f64, color: Color) {
        self.circles.push(Circle { center, radius });
        self.circle_colors.push(color);
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn lines(&self) -> &[Segment] {
        &self.lines
    }

    pub fn circles(&self) -> &[Circle] {
        &self.circles
    }

    /// Removes every shape. The window and size are kept.
    pub fn reset(&mut self) {
        self.points.clear();
        self.point_colors.clear();
        self.lines.clear();
        self.line_colors.clear();
        self.circles.clear();
        self.circle_colors.clear();
    }

    /// Draws the shapes: point markers first, then segments and circles last.
    pub fn rasterize(&self) -> Raster {
        let t = self.transform();
        let mut raster = Raster::new(self.width, self.height, self.background);

        for (p, &color) in self.points.iter().zip(&self.point_colors) {
            let px = t.apply(*p);
            raster.fill_circle(px.x(), px.y(), self.marker_radius, color);
        }

        for (segment, &color) in self.lines.iter().zip(&self.line_colors) {
            let from = t.apply(segment.from);
            let to = t.apply(segment.to);
            raster.draw_line((from.x(), from.y()), (to.x(), to.y()), color);
        }

        let scale = t.x_scale();
        for (circle, &color) in self.circles.iter().zip(&self.circle_colors) {
            let c = t.apply(circle.center);
            raster.draw_circle(c.x(), c.y(), circle.radius * scale, color);
        }

        raster
    }

    /// Draws the canvas and hands the image to `sink`.
    ///
    /// # Arguments
    /// * `sink` - Where the image goes.
    /// * `format` - The encoding the sink should use.
    ///
    /// # Errors
    /// Whatever error the sink reports.
    pub fn render<S>(&self, sink: &mut S, format: ImageFormat) -> io::Result<()>
    where
        S: RasterSink + ?Sized,
    {
        debug!(
            width = self.width, height = self.height;
            "rendering {} points, {} lines and {} circles as {format}",
            self.points.len(),
            self.lines.len(),
            self.circles.len()
        );

        let raster = self.rasterize();
        sink.write(&raster, format)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_is_fitted_to_the_size() {
        let mut canvas = Canvas::new();
        canvas.set_size(100, 100);
        canvas.set_window(Window::new(0.0, 10.0, 0.0, 5.0));

        let window = canvas.window();
        assert_eq!(window.width(), window.height());
        assert!(window.contains(Point::new(0.0, 0.0)));
        assert!(window.contains(Point::new(10.0, 5.0)));
    }

    #[test]
    fn default_colors_follow_the_shape() {
        let mut canvas = Canvas::new();
        canvas.add_point(Point::new(1.0, 1.0));
        canvas.add_line(Point::new(0.0, 0.0), Point::new(1.0, 1.0));
        canvas.add_circle(Point::new(2.0, 2.0), 1.0);

        assert_eq!(canvas.point_colors, vec![Color::BLACK]);
        assert_eq!(canvas.line_colors, vec![Color::RED]);
        assert_eq!(canvas.circle_colors, vec![Color::GREEN]);
    }

    #[test]
    fn reset_keeps_window_and_size() {
        let mut canvas = Canvas::new();
        canvas.set_size(40, 20);
        canvas.set_window(Window::new(0.0, 4.0, 0.0, 2.0));
        canvas.add_point(Point::new(1.0, 1.0));

        canvas.reset();

        assert!(canvas.points().is_empty());
        assert!(canvas.point_colors.is_empty());
        assert_eq!((canvas.width(), canvas.height()), (40, 20));
        assert_eq!(canvas.window(), Window::new(0.0, 4.0, 0.0, 2.0));
    }

    #[test]
    fn size_is_at_least_one_pixel() {
        let mut canvas = Canvas::new();
        canvas.set_size(0, 0);
        assert_eq!((canvas.width(), canvas.height()), (1, 1));
    }
}
