//! Product image optimization.
//!
//! Resizes every photo in a directory to a fixed width and re-encodes it as
//! JPEG. A file that fails is logged and skipped; the rest of the batch still
//! runs.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use thiserror::Error;
use tracing::{error, info, warn};

/// Output width in pixels. Height follows the source aspect ratio.
pub const TARGET_WIDTH: u32 = 800;

/// JPEG encoder quality (0-100).
pub const JPEG_QUALITY: u8 = 80;

/// File extensions picked up from the input directory, matched
/// case-insensitively.
pub const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

/// Errors from the optimization run.
#[derive(Debug, Error)]
pub enum OptimizeError {
    #[error("failed to create output directory {path}: {source}")]
    CreateOutput {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to list input directory {path}: {source}")]
    ReadInput {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to decode {file}: {source}")]
    Decode {
        file: String,
        source: image::ImageError,
    },
    #[error("failed to encode {file}: {source}")]
    Encode {
        file: String,
        source: image::ImageError,
    },
    #[error("failed to write {file}: {source}")]
    Write {
        file: String,
        source: std::io::Error,
    },
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptimizeReport {
    pub optimized: usize,
    pub failed: usize,
}

/// Whether `path` names an image this tool processes.
fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// Output file for `input`: the same file name inside `output_dir`.
///
/// Names are kept so product image URLs only swap the directory. The bytes
/// are always JPEG whatever the extension says.
fn output_path(output_dir: &Path, input: &Path) -> Option<PathBuf> {
    Some(output_dir.join(input.file_name()?))
}

/// Height that keeps the aspect ratio at [`TARGET_WIDTH`], rounded, at least 1.
fn scaled_height(width: u32, height: u32) -> u32 {
    let width = u64::from(width.max(1));
    let scaled = (u64::from(height) * u64::from(TARGET_WIDTH) + width / 2) / width;
    u32::try_from(scaled).unwrap_or(u32::MAX).max(1)
}

/// List the images in `input_dir`, sorted by file name.
fn list_images(input_dir: &Path) -> Result<Vec<PathBuf>, OptimizeError> {
    let read_error = |source| OptimizeError::ReadInput {
        path: input_dir.display().to_string(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(input_dir).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if path.is_file() && is_image(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Resize and re-encode one image.
fn optimize_file(input: &Path, output: &Path) -> Result<(), OptimizeError> {
    let file = input.display().to_string();

    let source = image::open(input).map_err(|source| OptimizeError::Decode {
        file: file.clone(),
        source,
    })?;
    let height = scaled_height(source.width(), source.height());
    let resized = source
        .resize_exact(TARGET_WIDTH, height, FilterType::Lanczos3)
        .to_rgb8();

    let write_error = |source| OptimizeError::Write {
        file: output.display().to_string(),
        source,
    };
    let mut writer = BufWriter::new(File::create(output).map_err(write_error)?);
    JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY)
        .encode_image(&resized)
        .map_err(|source| OptimizeError::Encode { file, source })?;
    writer.flush().map_err(write_error)
}

/// Optimize every image in `input_dir` into `output_dir`.
///
/// The output directory is created if missing. Only the top level of
/// `input_dir` is scanned, so an output directory nested inside it is not
/// reprocessed.
///
/// # Errors
///
/// Returns an error if the output directory cannot be created or the input
/// directory cannot be listed. Failures on individual files are logged and
/// counted in the report instead.
pub fn optimize_images(input_dir: &Path, output_dir: &Path) -> Result<OptimizeReport, OptimizeError> {
    fs::create_dir_all(output_dir).map_err(|source| OptimizeError::CreateOutput {
        path: output_dir.display().to_string(),
        source,
    })?;

    let mut report = OptimizeReport::default();
    for input in list_images(input_dir)? {
        let name = input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let Some(output) = output_path(output_dir, &input) else {
            warn!(file = %name, "Skipping file without a name");
            continue;
        };

        match optimize_file(&input, &output) {
            Ok(()) => {
                info!("Optimized: {name}");
                report.optimized += 1;
            }
            Err(e) => {
                error!(error = %e, "Error processing {name}");
                report.failed += 1;
            }
        }
    }

    info!(
        optimized = report.optimized,
        failed = report.failed,
        "All images processed"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use image::{ImageFormat, ImageReader, Rgb, RgbImage, Rgba, RgbaImage};
    use tempfile::TempDir;

    use super::*;

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) {
        RgbImage::from_pixel(width, height, Rgb([40, 90, 160]))
            .save(dir.join(name))
            .unwrap();
    }

    /// Format and dimensions of `path`, sniffed from its bytes.
    fn sniff(path: &Path) -> (Option<ImageFormat>, (u32, u32)) {
        let reader = ImageReader::open(path).unwrap().with_guessed_format().unwrap();
        let format = reader.format();
        (format, reader.into_dimensions().unwrap())
    }

    #[test]
    fn test_is_image_ignores_case() {
        assert!(is_image(Path::new("board.JPG")));
        assert!(is_image(Path::new("caps.Png")));
        assert!(is_image(Path::new("switch.webp")));
        assert!(!is_image(Path::new("notes.txt")));
        assert!(!is_image(Path::new("jpg")));
    }

    #[test]
    fn test_scaled_height_keeps_aspect() {
        assert_eq!(scaled_height(1600, 900), 450);
        assert_eq!(scaled_height(400, 200), 400);
        assert_eq!(scaled_height(3000, 1), 1);
        assert_eq!(scaled_height(1000, 333), 266);
    }

    #[test]
    fn test_output_keeps_file_name() {
        let out = output_path(Path::new("out"), Path::new("in/keycaps.png")).unwrap();
        assert_eq!(out, Path::new("out/keycaps.png"));
    }

    #[test]
    fn test_same_stem_different_extension_both_kept() {
        let input = TempDir::new().unwrap();
        let output = input.path().join("optimized-images");
        write_png(input.path(), "board.png", 1600, 800);
        RgbImage::from_pixel(1000, 1000, Rgb([200, 10, 10]))
            .save(input.path().join("board.jpg"))
            .unwrap();

        let report = optimize_images(input.path(), &output).unwrap();

        assert_eq!(
            report,
            OptimizeReport {
                optimized: 2,
                failed: 0
            }
        );
        assert_eq!(fs::read_dir(&output).unwrap().count(), 2);
        assert_eq!(sniff(&output.join("board.jpg")), (Some(ImageFormat::Jpeg), (800, 800)));
        assert_eq!(sniff(&output.join("board.png")), (Some(ImageFormat::Jpeg), (800, 400)));
    }

    #[test]
    fn test_batch_resizes_and_skips_failures() {
        let input = TempDir::new().unwrap();
        let output = input.path().join("optimized-images");

        write_png(input.path(), "a-board.png", 1600, 900);
        write_png(input.path(), "b-small.PNG", 400, 200);
        RgbaImage::from_pixel(1000, 1000, Rgba([0, 0, 0, 128]))
            .save(input.path().join("c-alpha.png"))
            .unwrap();
        fs::write(input.path().join("d-broken.jpg"), b"not an image").unwrap();
        fs::write(input.path().join("readme.txt"), b"ignored").unwrap();

        let report = optimize_images(input.path(), &output).unwrap();

        assert_eq!(
            report,
            OptimizeReport {
                optimized: 3,
                failed: 1
            }
        );
        assert_eq!(sniff(&output.join("a-board.png")).1, (800, 450));
        assert_eq!(sniff(&output.join("b-small.PNG")).1, (800, 400));
        assert_eq!(sniff(&output.join("c-alpha.png")), (Some(ImageFormat::Jpeg), (800, 800)));
        assert!(!output.join("d-broken.jpg").exists());
    }

    #[test]
    fn test_rerun_does_not_descend_into_output() {
        let input = TempDir::new().unwrap();
        let output = input.path().join("optimized-images");
        write_png(input.path(), "board.png", 1200, 600);

        optimize_images(input.path(), &output).unwrap();
        let report = optimize_images(input.path(), &output).unwrap();

        assert_eq!(report.optimized, 1);
        assert_eq!(fs::read_dir(&output).unwrap().count(), 1);
    }

    #[test]
    fn test_missing_input_dir_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = optimize_images(&dir.path().join("missing"), &dir.path().join("out"));
        assert!(matches!(result, Err(OptimizeError::ReadInput { .. })));
    }
}
