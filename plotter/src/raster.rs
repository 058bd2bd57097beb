use ndarray::Array2;

use crate::Color;

/// A grid of pixels, row `0` being the top of the image.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    pixels: Array2<Color>,
}

impl Raster {
    /// Returns a new `Raster` filled with `background`.
    pub fn new(width: usize, height: usize, background: Color) -> Self {
        Self {
            pixels: Array2::from_elem((height, width), background),
        }
    }

    pub fn width(&self) -> usize {
        self.pixels.ncols()
    }

    pub fn height(&self) -> usize {
        self.pixels.nrows()
    }

    /// Returns the color at column `x` and row `y`, if it's inside the raster.
    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        self.pixels.get((y, x)).copied()
    }

    /// The pixels as RGBA bytes, row by row from the top.
    pub fn as_bytes(&self) -> &[u8] {
        self.pixels
            .as_slice()
            .map(bytemuck::cast_slice)
            .unwrap_or_default()
    }

    /// Iterates the rows of pixels from the top.
    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        self.as_bytes()
            .chunks_exact(4 * self.width().max(1))
            .map(bytemuck::cast_slice)
    }

    /// Paints a single pixel, ignoring positions outside the raster.
    pub fn put(&mut self, x: i64, y: i64, color: Color) {
        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            return;
        };

        if let Some(px) = self.pixels.get_mut((y, x)) {
            *px = color;
        }
    }

    /// Paints every pixel whose position is at most `radius` away from `(cx, cy)`.
    pub fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color) {
        let r_sq = radius * radius;
        let (x0, x1) = self.clamp_x(cx - radius, cx + radius);
        let (y0, y1) = self.clamp_y(cy - radius, cy + radius);

        for y in y0..=y1 {
            for x in x0..=x1 {
                let (dx, dy) = (x as f64 - cx, y as f64 - cy);
                if dx * dx + dy * dy <= r_sq {
                    self.put(x, y, color);
                }
            }
        }
    }

    /// Draws the outline of a circle.
    ///
    /// Circles small next to the raster use the midpoint algorithm. Larger ones are traced
    /// column by column and row by row over the raster only, so the cost never grows with the
    /// radius.
    pub fn draw_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color) {
        if !(cx.is_finite() && cy.is_finite() && radius.is_finite()) || radius < 0.0 {
            return;
        }

        let (x0, x1) = self.clamp_x(cx - radius, cx + radius);
        let (y0, y1) = self.clamp_y(cy - radius, cy + radius);
        if x0 > x1 || y0 > y1 {
            return;
        }

        if radius > (self.width() + self.height()) as f64 {
            self.trace_circle(cx, cy, radius, color);
        } else {
            self.midpoint_circle(cx, cy, radius, color);
        }
    }

    fn midpoint_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color) {
        let (cx, cy) = (cx.round() as i64, cy.round() as i64);
        let mut x = radius.round() as i64;
        let mut y = 0;
        let mut err = 1 - x;

        while x >= y {
            for (dx, dy) in [
                (x, y),
                (y, x),
                (-y, x),
                (-x, y),
                (-x, -y),
                (-y, -x),
                (y, -x),
                (x, -y),
            ] {
                self.put(cx + dx, cy + dy, color);
            }

            y += 1;
            if err < 0 {
                err += 2 * y + 1;
            } else {
                x -= 1;
                err += 2 * (y - x) + 1;
            }
        }
    }

    /// Paints, for every column and every row of the raster the circle crosses, the two
    /// points of the circle on it.
    fn trace_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color) {
        // (r - d)(r + d) keeps precision when d is close to r
        let half_chord = |d: f64| {
            let d = d.abs();
            (d <= radius).then(|| ((radius - d) * (radius + d)).sqrt())
        };

        let (x0, x1) = self.clamp_x(cx - radius, cx + radius);
        for x in x0..=x1 {
            if let Some(h) = half_chord(x as f64 - cx) {
                self.put(x, (cy - h).round() as i64, color);
                self.put(x, (cy + h).round() as i64, color);
            }
        }

        let (y0, y1) = self.clamp_y(cy - radius, cy + radius);
        for y in y0..=y1 {
            if let Some(h) = half_chord(y as f64 - cy) {
                self.put((cx - h).round() as i64, y, color);
                self.put((cx + h).round() as i64, y, color);
            }
        }
    }

    /// Draws a straight segment with Bresenham's algorithm. The segment is clipped to the
    /// raster first, so the cost is bounded by the raster size.
    pub fn draw_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color) {
        let Some(((x0, y0), (x1, y1))) = self.clip(from, to) else {
            return;
        };

        let (mut x, mut y) = (x0.round() as i64, y0.round() as i64);
        let (x1, y1) = (x1.round() as i64, y1.round() as i64);
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.put(x, y, color);
            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn clamp_x(&self, lo: f64, hi: f64) -> (i64, i64) {
        clamp_span(lo, hi, self.width())
    }

    fn clamp_y(&self, lo: f64, hi: f64) -> (i64, i64) {
        clamp_span(lo, hi, self.height())
    }

    /// Liang-Barsky clipping against the raster bounds, one pixel of slack on every side.
    fn clip(&self, from: (f64, f64), to: (f64, f64)) -> Option<((f64, f64), (f64, f64))> {
        let (x0, y0) = from;
        let (dx, dy) = (to.0 - x0, to.1 - y0);
        let (xmin, xmax) = (-1.0, self.width() as f64);
        let (ymin, ymax) = (-1.0, self.height() as f64);

        if ![x0, y0, dx, dy].iter().all(|v| v.is_finite()) {
            return None;
        }

        let mut t0: f64 = 0.0;
        let mut t1: f64 = 1.0;
        for (p, q) in [
            (-dx, x0 - xmin),
            (dx, xmax - x0),
            (-dy, y0 - ymin),
            (dy, ymax - y0),
        ] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }

            let t = q / p;
            if p < 0.0 {
                t0 = t0.max(t);
            } else {
                t1 = t1.min(t);
            }
            if t0 > t1 {
                return None;
            }
        }

        Some((
            (x0 + t0 * dx, y0 + t0 * dy),
            (x0 + t1 * dx, y0 + t1 * dy),
        ))
    }
}

/// Integer span covering `[lo, hi]`, limited to `[0, len)`. Empty spans come out reversed.
fn clamp_span(lo: f64, hi: f64, len: usize) -> (i64, i64) {
    if !(lo.is_finite() && hi.is_finite()) || len == 0 {
        return (0, -1);
    }

    let max = len as f64 - 1.0;
    (lo.floor().max(0.0) as i64, hi.ceil().min(max) as i64)
}
