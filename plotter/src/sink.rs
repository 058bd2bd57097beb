use std::{fmt, io, str::FromStr};

use crate::Raster;

/// The encodings a finished raster can be written with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageFormat {
    /// Binary netpbm pixmap (P6), RGB without alpha.
    #[default]
    Ppm,
    /// Netpbm arbitrary map (P7) with an RGB_ALPHA tuple type.
    Pam,
}

impl ImageFormat {
    /// The usual file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Ppm => "ppm",
            ImageFormat::Pam => "pam",
        }
    }
}

impl FromStr for ImageFormat {
    type Err = io::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ppm" => Ok(ImageFormat::Ppm),
            "pam" => Ok(ImageFormat::Pam),
            other => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("unknown image format '{other}'"),
            )),
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// The destination of rendered images.
///
/// Plotting never touches the filesystem itself, it hands the finished raster over to a sink
/// together with the format it should be encoded with.
pub trait RasterSink {
    /// Consumes a finished raster.
    ///
    /// # Errors
    /// Any I/O error raised while encoding or storing the image.
    fn write(&mut self, raster: &Raster, format: ImageFormat) -> io::Result<()>;
}

impl<S: RasterSink + ?Sized> RasterSink for &mut S {
    fn write(&mut self, raster: &Raster, format: ImageFormat) -> io::Result<()> {
        (**self).write(raster, format)
    }
}
