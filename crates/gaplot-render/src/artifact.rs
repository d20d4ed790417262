use std::{
    fs, io,
    path::{Path, PathBuf},
    process::Command,
};

use image::{ExtendedColorType, ImageEncoder, ImageFormat, codecs::png::PngEncoder};
use tracing::{debug, info};

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ArtifactError {
    #[display("failed to create directory {}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },
    #[display("failed to write image {}", path.display())]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[display("failed to encode image")]
    EncodeInMemory { source: image::ImageError },
    #[display("failed to create temporary image file")]
    TempFile { source: io::Error },
    #[display("failed to launch image viewer '{program}'")]
    Viewer { program: String, source: io::Error },
}

/// A rendered chart as an 8-bit RGB raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartArtifact {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl ChartArtifact {
    /// Wraps a row-major RGB buffer, or returns `None` if its length is not
    /// `width * height * 3`.
    #[must_use]
    pub fn from_rgb(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(3)?;
        (pixels.len() == expected).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, ArtifactError> {
        let mut bytes = vec![];
        PngEncoder::new(&mut bytes)
            .write_image(
                &self.pixels,
                self.width,
                self.height,
                ExtendedColorType::Rgb8,
            )
            .map_err(|source| ArtifactError::EncodeInMemory { source })?;
        Ok(bytes)
    }

    /// Writes the chart as PNG, creating missing parent directories.
    pub fn save<P>(&self, path: P) -> Result<(), ArtifactError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ArtifactError::CreateDir {
                path: parent.to_owned(),
                source,
            })?;
        }
        image::save_buffer_with_format(
            path,
            &self.pixels,
            self.width,
            self.height,
            ExtendedColorType::Rgb8,
            ImageFormat::Png,
        )
        .map_err(|source| ArtifactError::Encode {
            path: path.to_owned(),
            source,
        })?;
        info!(path = %path.display(), "saved chart");
        Ok(())
    }

    /// Opens the chart in the platform image viewer.
    ///
    /// The chart is written to a temporary file that is left in place, since
    /// the viewer reads it after this returns. Returns that file's path.
    pub fn show(&self) -> Result<PathBuf, ArtifactError> {
        let file = tempfile::Builder::new()
            .prefix("gaplot-")
            .suffix(".png")
            .tempfile()
            .map_err(|source| ArtifactError::TempFile { source })?;
        let path = file
            .into_temp_path()
            .keep()
            .map_err(|err| ArtifactError::TempFile { source: err.error })?;
        self.save(&path)?;
        open_in_viewer(&path)?;
        Ok(path)
    }
}

fn viewer_command() -> (&'static str, &'static [&'static str]) {
    if cfg!(target_os = "macos") {
        ("open", &[])
    } else if cfg!(target_os = "windows") {
        ("cmd", &["/C", "start", ""])
    } else {
        ("xdg-open", &[])
    }
}

/// Launches the platform viewer on `path` without waiting for it to exit.
pub fn open_in_viewer(path: &Path) -> Result<(), ArtifactError> {
    let (program, args) = viewer_command();
    debug!(program, path = %path.display(), "launching image viewer");
    Command::new(program)
        .args(args)
        .arg(path)
        .spawn()
        .map_err(|source| ArtifactError::Viewer {
            program: program.to_owned(),
            source,
        })?;
    Ok(())
}
