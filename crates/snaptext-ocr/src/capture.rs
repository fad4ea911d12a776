use std::path::Path;

use anyhow::{Context, Result};
use image::RgbaImage;
use xcap::Monitor;

/// Capture the entire primary monitor as RGBA
///
/// Falls back to the first monitor when none reports itself as primary.
pub fn capture_primary_screen() -> Result<RgbaImage> {
    let monitors = Monitor::all().context("Failed to get monitors")?;
    let monitor = monitors
        .iter()
        .find(|m| m.is_primary())
        .or(monitors.first())
        .context("No monitor found")?;

    let image = monitor.capture_image().context("Failed to capture screen")?;
    let (width, height) = (image.width(), image.height());
    tracing::debug!("Captured primary screen {}x{}", width, height);

    RgbaImage::from_raw(width, height, image.into_raw())
        .context("Captured buffer does not match its dimensions")
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    use image::ImageEncoder;
    let mut buffer = Vec::new();
    image::codecs::png::PngEncoder::new(&mut buffer)
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgba8,
        )
        .context("Failed to encode PNG")?;
    Ok(buffer)
}

/// Encode `image` as PNG and write it to `path`, replacing any previous file
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    let png = encode_png(image)?;
    std::fs::write(path, &png)
        .with_context(|| format!("Failed to write capture to {}", path.display()))?;
    tracing::debug!("Saved {} bytes to {}", png.len(), path.display());
    Ok(())
}
