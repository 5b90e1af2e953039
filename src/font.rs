use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};
use rusttype::{point, Font, Scale};
use std::path::{Path, PathBuf};

use crate::draw;

/// Directories searched when a font is requested by bare file name.
const FONT_DIRS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu",
    "/usr/share/fonts/truetype",
    "/usr/share/fonts",
    "/usr/local/share/fonts",
    "/Library/Fonts",
    "/System/Library/Fonts",
];

// Bundled substitutes so rendering works on machines without the requested
// fonts installed.
const FALLBACK_REGULAR: &[u8] = include_bytes!("fonts/DejaVuSans.ttf");
const FALLBACK_BOLD: &[u8] = include_bytes!("fonts/DejaVuSans-Bold.ttf");

const FALLBACK_REGULAR_FAMILY: &str = "DejaVu Sans";
const FALLBACK_BOLD_FAMILY: &str = "DejaVu Sans Bold";

/// A font loaded at a fixed pixel size, ready for measuring and drawing.
pub struct ResolvedFont {
    font: Font<'static>,
    family: String,
    scale: Scale,
}

/// Ink bounding box of a laid-out string.
#[derive(Debug, Clone, Copy)]
pub struct TextExtent {
    pub width: i32,
    pub height: i32,
}

/// Load `name` at `px_size`, substituting a bundled DejaVu face when the
/// named font cannot be found or parsed. Names containing `bd`
/// (case-insensitive) get the bold cut, everything else the regular one.
pub fn resolve_font(name: &str, px_size: u32) -> Result<ResolvedFont> {
    let scale = Scale::uniform(px_size as f32);

    if let Some(font) = load_named_font(name) {
        let family = Path::new(name)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| name.to_string());
        return Ok(ResolvedFont {
            font,
            family,
            scale,
        });
    }

    let (bytes, family) = if name.to_lowercase().contains("bd") {
        (FALLBACK_BOLD, FALLBACK_BOLD_FAMILY)
    } else {
        (FALLBACK_REGULAR, FALLBACK_REGULAR_FAMILY)
    };

    let font = Font::try_from_bytes(bytes)
        .with_context(|| format!("Bundled fallback font {family} failed to parse"))?;

    Ok(ResolvedFont {
        font,
        family: family.to_string(),
        scale,
    })
}

fn load_named_font(name: &str) -> Option<Font<'static>> {
    let mut candidates: Vec<PathBuf> = vec![PathBuf::from(name)];
    candidates.extend(FONT_DIRS.iter().map(|dir| Path::new(dir).join(name)));

    for path in candidates {
        if let Ok(bytes) = std::fs::read(&path) {
            if let Some(font) = Font::try_from_vec(bytes) {
                return Some(font);
            }
        }
    }

    None
}

impl ResolvedFont {
    /// Family of the face that actually got loaded. Reveals whether the
    /// resolver substituted a fallback.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Ink bounding box of `text` at this font's size, combining the pixel
    /// bounding boxes of every laid-out glyph.
    pub fn measure(&self, text: &str) -> TextExtent {
        let mut min_x = i32::MAX;
        let mut min_y = i32::MAX;
        let mut max_x = i32::MIN;
        let mut max_y = i32::MIN;

        for glyph in self.font.layout(text, self.scale, point(0.0, 0.0)) {
            if let Some(bb) = glyph.pixel_bounding_box() {
                min_x = min_x.min(bb.min.x);
                min_y = min_y.min(bb.min.y);
                max_x = max_x.max(bb.max.x);
                max_y = max_y.max(bb.max.y);
            }
        }

        if min_x > max_x {
            return TextExtent {
                width: 0,
                height: 0,
            };
        }

        TextExtent {
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }

    /// Draw `text` with its em box anchored at (x, y), blending `color`
    /// weighted by glyph coverage. The baseline sits at `y + ascent`.
    pub fn draw_text(&self, img: &mut RgbaImage, x: f32, y: f32, text: &str, color: Rgba<u8>) {
        let ascent = self.font.v_metrics(self.scale).ascent;

        for glyph in self.font.layout(text, self.scale, point(x, y + ascent)) {
            if let Some(bb) = glyph.pixel_bounding_box() {
                glyph.draw(|gx, gy, coverage| {
                    let alpha = (color[3] as f32 * coverage).round() as u8;
                    if alpha == 0 {
                        return;
                    }
                    let src = Rgba([color[0], color[1], color[2], alpha]);
                    draw::blend_pixel(img, bb.min.x + gx as i32, bb.min.y + gy as i32, src);
                });
            }
        }
    }
}
