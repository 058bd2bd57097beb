use machine_learning::Point;
use ndarray::{Array2, array};

use crate::Window;

/// A 2-D affine map, stored as a 3x3 matrix over homogeneous coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Affine {
    m: Array2<f64>,
}

impl Affine {
    pub fn identity() -> Self {
        Self { m: Array2::eye(3) }
    }

    pub fn translate(tx: f64, ty: f64) -> Self {
        Self {
            m: array![[1.0, 0.0, tx], [0.0, 1.0, ty], [0.0, 0.0, 1.0]],
        }
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        Self {
            m: array![[sx, 0.0, 0.0], [0.0, sy, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// Composes two maps, the result applies `self` first and `next` afterwards.
    pub fn then(&self, next: &Affine) -> Affine {
        Affine {
            m: next.m.dot(&self.m),
        }
    }

    /// Maps `p` through this transform.
    pub fn apply(&self, p: Point) -> Point {
        let v = self.m.dot(&array![p.x(), p.y(), 1.0]);
        Point::new(v[0], v[1])
    }

    /// The length of a horizontal unit vector once mapped.
    pub fn x_scale(&self) -> f64 {
        self.m[[0, 0]].hypot(self.m[[1, 0]])
    }

    /// Builds the map from a data window to a `width` x `height` pixel canvas.
    ///
    /// The window fills the canvas exactly, its bottom left corner lands on `(0, height)` and
    /// its top right corner on `(width, 0)`, so growing y values go up in the image.
    ///
    /// # Arguments
    /// * `window` - The data window, it should already match the canvas aspect ratio.
    /// * `width` - The canvas width in pixels.
    /// * `height` - The canvas height in pixels.
    pub fn window_to_canvas(window: &Window, width: usize, height: usize) -> Affine {
        let (w, h) = (width as f64, height as f64);

        Affine::translate(-window.xmin, -window.ymin)
            .then(&Affine::scale(w / window.width(), h / window.height()))
            .then(&Affine::scale(1.0, -1.0))
            .then(&Affine::translate(0.0, h))
    }
}

impl Default for Affine {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(got: Point, expected: Point) {
        assert!(
            got.distance(&expected) < 1e-9,
            "got {got}, expected {expected}"
        );
    }

    #[test]
    fn composition_applies_in_order() {
        let t = Affine::translate(1.0, 0.0).then(&Affine::scale(2.0, 2.0));
        assert_close(t.apply(Point::new(1.0, 1.0)), Point::new(4.0, 2.0));

        let t = Affine::scale(2.0, 2.0).then(&Affine::translate(1.0, 0.0));
        assert_close(t.apply(Point::new(1.0, 1.0)), Point::new(3.0, 2.0));
    }

    #[test]
    fn window_corners_land_on_canvas_corners() {
        let window = Window::new(-5.0, 15.0, 10.0, 20.0);
        let t = Affine::window_to_canvas(&window, 400, 200);

        assert_close(t.apply(Point::new(-5.0, 10.0)), Point::new(0.0, 200.0));
        assert_close(t.apply(Point::new(15.0, 20.0)), Point::new(400.0, 0.0));
        assert_close(t.apply(Point::new(5.0, 15.0)), Point::new(200.0, 100.0));
        assert!((t.x_scale() - 20.0).abs() < 1e-12);
    }

    #[test]
    fn identity_keeps_points() {
        let p = Point::new(-2.5, 8.0);
        assert_eq!(Affine::identity().apply(p), p);
    }
}
