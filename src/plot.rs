use anyhow::{Result, bail};
use machine_learning::{Bounds, Dataset, LinearRegression, Point};
use plotter::{Canvas, Color, Window};

/// The largest image the layouts will ask for, 4 bytes per pixel.
pub const MAX_PIXELS: u64 = 1 << 26;

/// How far past the data, in data units, the fitted line extends on each side.
const LINE_OVERHANG: f64 = 20.0;

/// The color of the points of the `cluster`-th cluster.
pub fn cluster_color(cluster: usize) -> Color {
    match cluster {
        0 => Color::RED,
        1 => Color::BLACK,
        2 => Color::BLUE,
        3 => Color::ORANGE,
        4 => Color::CYAN,
        _ => Color::YELLOW,
    }
}

/// Integer bounds of the data, truncated toward zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    min_x: i64,
    max_x: i64,
    min_y: i64,
    max_y: i64,
}

impl From<Bounds> for Frame {
    fn from(b: Bounds) -> Self {
        Self {
            min_x: b.min_x as i64,
            max_x: b.max_x as i64,
            min_y: b.min_y as i64,
            max_y: b.max_y as i64,
        }
    }
}

impl Frame {
    /// Sizes the canvas after the data, leaving `margin` data units on the sides and below and
    /// `top` above, one pixel per unit.
    ///
    /// # Errors
    /// If the image would be larger than `MAX_PIXELS`.
    fn canvas(&self, margin: i64, top: i64) -> Result<Canvas> {
        let (Some(width), Some(height)) = (
            span(self.min_x, self.max_x, margin, margin),
            span(self.min_y, self.max_y, margin, top),
        ) else {
            bail!("the data spreads too wide to plot");
        };

        let pixels = width.checked_mul(height).unwrap_or(u64::MAX);
        if pixels > MAX_PIXELS {
            bail!("a {width}x{height} image exceeds the {MAX_PIXELS} pixel limit");
        }

        let mut canvas = Canvas::new();
        canvas.set_size(width as usize, height as usize);
        canvas.set_window(Window::new(
            (self.min_x - margin) as f64,
            (self.max_x + margin) as f64,
            (self.min_y - margin) as f64,
            (self.max_y + top) as f64,
        ));

        Ok(canvas)
    }
}

/// Pixels spanned by `[min - below, max + above]`, `None` on overflow.
fn span(min: i64, max: i64, below: i64, above: i64) -> Option<u64> {
    let lo = min.checked_sub(below)?;
    let hi = max.checked_add(above)?;
    let len = hi.checked_sub(lo)?;
    u64::try_from(len).ok().map(|len| len.max(1))
}

/// Lays out a clustered dataset, each point colored after its cluster.
///
/// # Arguments
/// * `data` - The clustered points.
/// * `clusters` - The cluster of each point, in the same order.
///
/// # Errors
/// If the data spreads over more than `MAX_PIXELS`.
pub fn clusters(data: &Dataset, clusters: &[usize]) -> Result<Canvas> {
    let mut canvas = match data.bounds() {
        Some(bounds) => Frame::from(bounds).canvas(100, 600)?,
        None => Canvas::new(),
    };

    for (p, &cluster) in data.points().iter().zip(clusters) {
        canvas.add_point_with(*p, cluster_color(cluster));
    }

    Ok(canvas)
}

/// Lays out a dataset in black and its fitted line in red.
///
/// # Arguments
/// * `data` - The fitted points.
/// * `fit` - The regression fitted on `data`.
///
/// # Errors
/// If the data spreads over more than `MAX_PIXELS`.
pub fn line(data: &Dataset, fit: &LinearRegression) -> Result<Canvas> {
    let Some(bounds) = data.bounds() else {
        return Ok(Canvas::new());
    };

    let frame = Frame::from(bounds);
    let mut canvas = frame.canvas(100, 500)?;

    for p in data.points() {
        canvas.add_point(*p);
    }

    let start = frame.min_x as f64 - LINE_OVERHANG;
    let end = frame.max_x as f64 + LINE_OVERHANG;
    canvas.add_line(
        Point::new(start, fit.predict(start)),
        Point::new(end, fit.predict(end)),
    );

    Ok(canvas)
}
