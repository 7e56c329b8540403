use crate::config::ImageLimits;
use anyhow::Context as _;
use egui::ColorImage;
use image::{GenericImageView, ImageReader, Limits};
use std::io::{BufRead, Read, Seek};
use std::path::Path;

fn decode_reader_to_color<R>(
    limits_cfg: &ImageLimits,
    mut reader: ImageReader<R>,
) -> anyhow::Result<ColorImage>
where
    R: Read + Seek + BufRead,
{
    let il = limits_cfg.sanitized();
    let mut limits = Limits::default();
    limits.max_image_width = Some(il.image_dim);
    limits.max_image_height = Some(il.image_dim);
    limits.max_alloc = Some(il.alloc_bytes);
    reader.limits(limits);
    let img = reader.decode().context("Failed to decode image data")?;

    let (w, h) = img.dimensions();
    let total_pixels = u64::from(w) * u64::from(h);
    if total_pixels > il.total_pixels {
        anyhow::bail!(
            "Image too large: {}x{} (~{} MP) exceeds limit (~{} MP)",
            w,
            h,
            total_pixels / 1_000_000,
            il.total_pixels / 1_000_000
        );
    }

    // Grayscale and 16-bit sources (e.g. microscopy TIFFs) are shown as RGBA8.
    let rgba = img.to_rgba8();
    Ok(ColorImage::from_rgba_unmultiplied(
        [w as usize, h as usize],
        &rgba,
    ))
}

/// Decode an image file, enforcing the configured size limits.
pub fn decode_image_from_path(limits: &ImageLimits, path: &Path) -> anyhow::Result<ColorImage> {
    let reader = ImageReader::open(path)
        .with_context(|| format!("Failed to read {}", path.display()))?
        .with_guessed_format()
        .context("Failed to detect image format")?;
    decode_reader_to_color(limits, reader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_png(label: &str, width: u32, height: u32) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        let dir = std::env::temp_dir().join(format!("circlemark_{label}_{nanos}"));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        let path = dir.join("image.png");
        image::GrayImage::from_pixel(width, height, image::Luma([128]))
            .save(&path)
            .expect("write png");
        path
    }

    #[test]
    fn decodes_grayscale_png_to_rgba() {
        let path = temp_png("decode", 3, 2);
        let color = decode_image_from_path(&ImageLimits::default(), &path).expect("decode");
        assert_eq!(color.size, [3, 2]);
        assert_eq!(color.pixels[0], egui::Color32::from_gray(128));
    }

    #[test]
    fn oversized_image_is_rejected() {
        let path = temp_png("limits", 100, 1);
        let limits = ImageLimits {
            image_dim: 64,
            ..ImageLimits::default()
        };
        assert!(decode_image_from_path(&limits, &path).is_err());
    }

    #[test]
    fn missing_file_mentions_path() {
        let err = decode_image_from_path(&ImageLimits::default(), Path::new("/nonexistent/x.png"))
            .expect_err("must fail");
        assert!(format!("{err:#}").contains("x.png"));
    }
}
