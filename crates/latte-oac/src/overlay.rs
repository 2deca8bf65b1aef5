//! Rectangle-outline overlays over the captured screenshot.

use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect as ImageRect;

use latte_config::{OutputConfig, OverlayColors};
use latte_tree::Rect;

use crate::error::ReportError;
use crate::oac::OacFamily;

/// Label of the overlay showing every flagged node.
pub const COMBINED_LABEL: &str = "all";

/// Path of the overlay for `label` next to `screenshot`.
///
/// `changed` selects the `-annotated` suffix; an overlay with nothing drawn
/// on it gets `-nochange`.
pub fn overlay_path(screenshot: &Path, label: &str, changed: bool) -> PathBuf {
    let stem = screenshot
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "screenshot".to_string());
    let suffix = if changed { "annotated" } else { "nochange" };
    screenshot.with_file_name(format!("{stem}-{label}-{suffix}.png"))
}

/// Draws family-colored outlines onto copies of a screenshot.
#[derive(Debug, Clone)]
pub struct OverlayPainter {
    line_thickness: u32,
    colors: OverlayColors,
}

impl Default for OverlayPainter {
    fn default() -> Self {
        Self::from_config(&OutputConfig::default())
    }
}

impl OverlayPainter {
    pub fn new(line_thickness: u32, colors: OverlayColors) -> Self {
        Self {
            line_thickness: line_thickness.max(1),
            colors,
        }
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self::new(config.line_thickness, config.colors.clone())
    }

    pub fn color(&self, family: OacFamily) -> Rgba<u8> {
        let [r, g, b] = match family {
            OacFamily::P => self.colors.p,
            OacFamily::A => self.colors.a,
            OacFamily::O => self.colors.o,
        };
        Rgba([r, g, b, 255])
    }

    /// Load the screenshot that overlays are drawn on.
    pub fn load(&self, screenshot: &Path) -> Result<RgbaImage, ReportError> {
        image::open(screenshot)
            .map(|img| img.to_rgba8())
            .map_err(|e| ReportError::image(screenshot, e))
    }

    /// Outline every rectangle on a copy of `base`.
    ///
    /// Rectangles are in screen coordinates; they are rescaled when the
    /// screenshot resolution differs from `screen`.
    pub fn paint(
        &self,
        base: &RgbaImage,
        screen: Rect,
        boxes: &[(Rect, OacFamily)],
    ) -> RgbaImage {
        let mut img = base.clone();
        let (img_w, img_h) = img.dimensions();
        let sx = scale(img_w, screen.width());
        let sy = scale(img_h, screen.height());

        for (bounds, family) in boxes {
            let bounds = bounds.normalized();
            let color = self.color(*family);

            let x = ((bounds.left as i64 - screen.left as i64) as f64 * sx) as i64;
            let y = ((bounds.top as i64 - screen.top as i64) as f64 * sy) as i64;
            let w = (bounds.width() as f64 * sx) as i64;
            let h = (bounds.height() as f64 * sy) as i64;

            // Clamp to image bounds
            let (x0, y0) = (x.max(0), y.max(0));
            let x1 = (x + w).min(img_w as i64);
            let y1 = (y + h).min(img_h as i64);
            if x1 <= x0 || y1 <= y0 {
                continue;
            }
            let (x0, y0) = (x0 as u32, y0 as u32);
            let (w, h) = ((x1 - x0 as i64) as u32, (y1 - y0 as i64) as u32);

            for t in 0..self.line_thickness {
                let inner_w = w.saturating_sub(2 * t);
                let inner_h = h.saturating_sub(2 * t);
                if inner_w > 0 && inner_h > 0 {
                    let rect = ImageRect::at((x0 + t) as i32, (y0 + t) as i32)
                        .of_size(inner_w, inner_h);
                    draw_hollow_rect_mut(&mut img, rect, color);
                }
            }
        }
        img
    }

    /// Write an overlay image, creating nothing else.
    pub fn save(&self, img: &RgbaImage, path: &Path) -> Result<(), ReportError> {
        img.save(path).map_err(|e| ReportError::image(path, e))
    }
}

fn scale(pixels: u32, extent: i64) -> f64 {
    if extent <= 0 {
        1.0
    } else {
        pixels as f64 / extent as f64
    }
}
