use machine_learning::Point;

/// A rectangle in data space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl Window {
    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Self {
        Self {
            xmin,
            xmax,
            ymin,
            ymax,
        }
    }

    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    pub fn center(&self) -> Point {
        Point::new(
            0.5 * (self.xmin + self.xmax),
            0.5 * (self.ymin + self.ymax),
        )
    }

    /// Whether `p` lies inside the window, borders included.
    pub fn contains(&self, p: Point) -> bool {
        (self.xmin..=self.xmax).contains(&p.x()) && (self.ymin..=self.ymax).contains(&p.y())
    }

    /// Grows the narrower side of the window around its center so that it has the same aspect
    /// ratio as a `width` x `height` pixel canvas. The window is never cropped.
    ///
    /// A window without area becomes one data unit tall.
    ///
    /// # Arguments
    /// * `width` - The canvas width in pixels.
    /// * `height` - The canvas height in pixels.
    ///
    /// # Returns
    /// The fitted window.
    pub fn fit_aspect(&self, width: usize, height: usize) -> Window {
        let aspect = width.max(1) as f64 / height.max(1) as f64;
        let mut w = self.width().abs();
        let mut h = self.height().abs();

        if w == 0.0 && h == 0.0 {
            h = 1.0;
        }

        if h * aspect < w {
            h = w / aspect;
        } else {
            w = h * aspect;
        }

        let c = self.center();
        Window::new(c.x() - 0.5 * w, c.x() + 0.5 * w, c.y() - 0.5 * h, c.y() + 0.5 * h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_window_grows_vertically() {
        let fitted = Window::new(0.0, 10.0, 0.0, 5.0).fit_aspect(100, 100);

        assert_eq!(fitted.width(), fitted.height());
        assert_eq!(fitted, Window::new(0.0, 10.0, -2.5, 7.5));
        assert!(fitted.contains(Point::new(0.0, 0.0)));
        assert!(fitted.contains(Point::new(10.0, 5.0)));
    }

    #[test]
    fn tall_window_grows_horizontally() {
        let fitted = Window::new(0.0, 2.0, 0.0, 8.0).fit_aspect(200, 100);

        assert_eq!(fitted.height(), 8.0);
        assert_eq!(fitted.width(), 16.0);
        assert_eq!(fitted.center(), Point::new(1.0, 4.0));
    }

    #[test]
    fn matching_window_is_kept() {
        let window = Window::new(-3.0, 3.0, 1.0, 4.0);
        assert_eq!(window.fit_aspect(60, 30), window);
    }

    #[test]
    fn empty_window_gets_an_area() {
        let fitted = Window::new(2.0, 2.0, 2.0, 2.0).fit_aspect(50, 50);
        assert_eq!(fitted, Window::new(1.5, 2.5, 1.5, 2.5));
    }
}
