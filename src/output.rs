use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use log::info;
use plotter::{ImageFormat, Raster, RasterSink};

/// Encodes `raster` as a binary netpbm image.
///
/// # Arguments
/// * `raster` - The image.
/// * `format` - `Ppm` drops the alpha channel, `Pam` keeps it.
/// * `w` - Where the encoded bytes go.
pub fn encode<W: Write>(raster: &Raster, format: ImageFormat, mut w: W) -> io::Result<()> {
    let (width, height) = (raster.width(), raster.height());

    match format {
        ImageFormat::Ppm => {
            write!(w, "P6\n{width} {height}\n255\n")?;
            for row in raster.rows() {
                let rgb: Vec<u8> = row.iter().flat_map(|c| [c.r, c.g, c.b]).collect();
                w.write_all(&rgb)?;
            }
        }
        ImageFormat::Pam => {
            write!(
                w,
                "P7\nWIDTH {width}\nHEIGHT {height}\nDEPTH 4\nMAXVAL 255\nTUPLTYPE RGB_ALPHA\nENDHDR\n"
            )?;
            w.write_all(raster.as_bytes())?;
        }
    }

    w.flush()
}

/// Writes images to a file, creating its directory when missing.
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RasterSink for FileSink {
    fn write(&mut self, raster: &Raster, format: ImageFormat) -> io::Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        let file = File::create(&self.path)?;
        encode(raster, format, BufWriter::new(file))?;
        info!("wrote {}", self.path.display());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use plotter::Color;

    use super::*;

    fn two_pixels() -> Raster {
        let mut raster = Raster::new(2, 1, Color::WHITE);
        raster.put(1, 0, Color::rgb(10, 20, 30));
        raster
    }

    #[test]
    fn ppm_has_header_and_rgb_triplets() {
        let mut out = Vec::new();
        encode(&two_pixels(), ImageFormat::Ppm, &mut out).unwrap();

        let header = b"P6\n2 1\n255\n";
        assert_eq!(&out[..header.len()], header);
        assert_eq!(&out[header.len()..], &[255, 255, 255, 10, 20, 30]);
    }

    #[test]
    fn pam_keeps_alpha() {
        let mut out = Vec::new();
        encode(&two_pixels(), ImageFormat::Pam, &mut out).unwrap();

        let text = String::from_utf8_lossy(&out);
        assert!(text.starts_with("P7\nWIDTH 2\nHEIGHT 1\nDEPTH 4\n"));
        assert_eq!(&out[out.len() - 8..], &[255, 255, 255, 255, 10, 20, 30, 255]);
    }
}
