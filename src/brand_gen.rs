use anyhow::{Context, Result};
use image::{imageops, imageops::FilterType, DynamicImage, Rgba, RgbaImage};
use std::fs::File;
use std::path::Path;
use std::str::FromStr;

use crate::draw;
use crate::font;

/// Output directory, relative to the working directory.
const OUT_DIR: &str = "assets/branding";
const ICON_FILE: &str = "app_icon_512.png";
const FEATURE_FILE: &str = "featured_graphic_1024x500.png";

const ICON_SIZE: u32 = 512;
const FEATURE_WIDTH: u32 = 1024;
const FEATURE_HEIGHT: u32 = 500;

// Brand palette.
const ICON_GRADIENT_CENTER: &str = "#4CAF50";
const ICON_GRADIENT_EDGE: &str = "#2196F3";
const FEATURE_GRADIENT_TOP: &str = "#101317";
const FEATURE_GRADIENT_BOTTOM: &str = "#2196F3";

const TITLE_FONT: &str = "arialbd.ttf";
const BODY_FONT: &str = "arial.ttf";

const TITLE_TEXT: &str = "RiseFuel Quotes";
const SUBTITLE_TEXT: &str = "Daily motivation, ready offline and online";
const TAGLINE_TEXT: &str = "Save . Share . Rise";

/// Render both branding assets into `assets/branding/`, icon first: the
/// feature graphic reads the icon file back as its thumbnail.
pub fn generate_branding() -> Result<()> {
    let out_dir = Path::new(OUT_DIR);
    std::fs::create_dir_all(out_dir).context("Can't create output directory")?;

    let icon_path = out_dir.join(ICON_FILE);
    let feature_path = out_dir.join(FEATURE_FILE);

    generate_icon(&icon_path)?;
    generate_feature_graphic(&feature_path, &icon_path)?;

    println!("Created branding assets:");
    println!(" - {}", icon_path.display());
    println!(" - {}", feature_path.display());

    Ok(())
}

/// Parse a CSS hex color into an `Rgba` with the given alpha, defaulting to
/// white if the literal is malformed.
fn parse_color(css: &str, alpha: u8) -> Rgba<u8> {
    css_color::Srgb::from_str(css)
        .map(|color| {
            Rgba([
                (color.red * 255.).round() as u8,
                (color.green * 255.).round() as u8,
                (color.blue * 255.).round() as u8,
                alpha,
            ])
        })
        .unwrap_or(Rgba([255, 255, 255, alpha]))
}

fn lerp(a: u8, b: u8, t: f32) -> u8 {
    (a as f32 * (1.0 - t) + b as f32 * t) as u8
}

/// Gradient sample for the icon at pixel (x, y): the center color shading
/// radially into the edge color, saturating at 85% of the side length.
fn icon_color_at(x: u32, y: u32, center: Rgba<u8>, edge: Rgba<u8>) -> Rgba<u8> {
    let half = ICON_SIZE as f32 / 2.0;
    let dx = x as f32 - half;
    let dy = y as f32 - half;
    let dist = (dx * dx + dy * dy).sqrt();
    let t = (dist / (ICON_SIZE as f32 * 0.85)).min(1.0);

    Rgba([
        lerp(center[0], edge[0], t),
        lerp(center[1], edge[1], t),
        lerp(center[2], edge[2], t),
        255,
    ])
}

/// One row of the feature-graphic background: a vertical fade from the top
/// color down to the bottom color, horizontally uniform.
fn feature_row_color(y: u32, top: Rgba<u8>, bottom: Rgba<u8>) -> Rgba<u8> {
    let t = y as f32 / FEATURE_HEIGHT as f32;

    Rgba([
        lerp(top[0], bottom[0], t),
        lerp(top[1], bottom[1], t),
        lerp(top[2], bottom[2], t),
        255,
    ])
}

fn generate_icon(path: &Path) -> Result<()> {
    println!("Generating {ICON_FILE}...");

    let center = parse_color(ICON_GRADIENT_CENTER, 255);
    let edge = parse_color(ICON_GRADIENT_EDGE, 255);
    let mut base = RgbaImage::from_fn(ICON_SIZE, ICON_SIZE, |x, y| {
        icon_color_at(x, y, center, edge)
    });

    // The quote card, glyphs, and swoosh go onto a transparent overlay and
    // land on the gradient in a single compositing pass.
    let mut overlay = RgbaImage::new(ICON_SIZE, ICON_SIZE);

    let size = ICON_SIZE as f32;
    let margin = size * 0.12;
    draw::fill_rounded_rect(
        &mut overlay,
        margin,
        margin,
        size - margin,
        size - margin,
        60.0,
        Rgba([255, 255, 255, 32]),
    );

    let quote_font = font::resolve_font(TITLE_FONT, (size * 0.45) as u32)?;
    let quotes = "\u{201C}\u{201D}";
    let extent = quote_font.measure(quotes);
    let text_x = (size - extent.width as f32) / 2.0;
    let text_y = (size - extent.height as f32) / 2.0 - size * 0.05;
    quote_font.draw_text(&mut overlay, text_x, text_y, quotes, Rgba([255, 255, 255, 240]));
    println!("  Quote font: {}", quote_font.family());

    let swoosh = [
        (size * 0.26, size * 0.70),
        (size * 0.46, size * 0.76),
        (size * 0.76, size * 0.64),
    ];
    draw::stroke_polyline(
        &mut overlay,
        &swoosh,
        (size * 0.02) as u32,
        Rgba([255, 255, 255, 210]),
    );

    imageops::overlay(&mut base, &overlay, 0, 0);
    save_png(&DynamicImage::ImageRgba8(base).to_rgb8(), path)?;

    println!("✓ Generated {}", path.display());
    Ok(())
}

fn generate_feature_graphic(path: &Path, icon_path: &Path) -> Result<()> {
    println!("Generating {FEATURE_FILE}...");

    let top = parse_color(FEATURE_GRADIENT_TOP, 255);
    let bottom = parse_color(FEATURE_GRADIENT_BOTTOM, 255);
    let mut canvas = RgbaImage::from_fn(FEATURE_WIDTH, FEATURE_HEIGHT, |_, y| {
        feature_row_color(y, top, bottom)
    });

    let w = FEATURE_WIDTH as f32;
    let h = FEATURE_HEIGHT as f32;
    let card_margin = 60.0;
    let card_fill = parse_color(FEATURE_GRADIENT_TOP, 210);
    draw::fill_rounded_rect(
        &mut canvas,
        card_margin,
        card_margin,
        w - card_margin,
        h - card_margin,
        48.0,
        card_fill,
    );
    draw::outline_rounded_rect(
        &mut canvas,
        card_margin,
        card_margin,
        w - card_margin,
        h - card_margin,
        48.0,
        2.0,
        Rgba([255, 255, 255, 40]),
    );

    let icon = image::open(icon_path)
        .with_context(|| format!("Failed to load icon image {}", icon_path.display()))?;
    let thumb = icon.resize_exact(220, 220, FilterType::Lanczos3).to_rgba8();
    let thumb_x = (card_margin + 30.0) as i64;
    let thumb_y = ((FEATURE_HEIGHT - 220) / 2) as i64;
    imageops::overlay(&mut canvas, &thumb, thumb_x, thumb_y);

    let title_font = font::resolve_font(TITLE_FONT, 72)?;
    let body_font = font::resolve_font(BODY_FONT, 36)?;
    println!("  Title font: {}", title_font.family());
    println!("  Body font: {}", body_font.family());

    let text_x = card_margin + 300.0;
    let text_y = card_margin + 90.0;
    title_font.draw_text(&mut canvas, text_x, text_y, TITLE_TEXT, Rgba([255, 255, 255, 255]));
    body_font.draw_text(
        &mut canvas,
        text_x,
        text_y + 110.0,
        SUBTITLE_TEXT,
        Rgba([200, 220, 255, 255]),
    );
    body_font.draw_text(
        &mut canvas,
        text_x,
        text_y + 180.0,
        TAGLINE_TEXT,
        Rgba([255, 255, 255, 255]),
    );

    save_png(&DynamicImage::ImageRgba8(canvas).to_rgb8(), path)?;

    println!("✓ Generated {}", path.display());
    Ok(())
}

fn save_png(image: &image::RgbImage, path: &Path) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    image
        .write_to(&mut file, image::ImageOutputFormat::Png)
        .context("Failed to write PNG")?;
    Ok(())
}
