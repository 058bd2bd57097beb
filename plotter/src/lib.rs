pub mod canvas;
pub mod color;
pub mod raster;
pub mod sink;
pub mod transform;
pub mod window;

pub use canvas::{Canvas, Circle, Segment};
pub use color::Color;
pub use raster::Raster;
pub use sink::{ImageFormat, RasterSink};
pub use transform::Affine;
pub use window::Window;
