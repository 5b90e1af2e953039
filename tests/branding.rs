use image::Rgb;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const ICON_REL_PATH: &str = "assets/branding/app_icon_512.png";
const FEATURE_REL_PATH: &str = "assets/branding/featured_graphic_1024x500.png";

/// Run the generator with the given directory as its working directory,
/// panicking with a full stdout/stderr dump if it fails.
fn run_generator(dir: &Path) -> Output {
    let output = Command::new(env!("CARGO_BIN_EXE_branding-gen"))
        .current_dir(dir)
        .output()
        .expect("Failed to run branding-gen");

    if !output.status.success() {
        eprintln!("Command failed with status: {}", output.status);
        eprintln!("stdout: {}", String::from_utf8_lossy(&output.stdout));
        eprintln!("stderr: {}", String::from_utf8_lossy(&output.stderr));
        panic!("branding-gen failed");
    }

    output
}

/// Running on a clean tree must create the output directory and exactly the
/// two branding files, at their fixed dimensions, and name both paths on
/// stdout.
#[test]
fn generates_both_assets_on_a_clean_tree() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output = run_generator(temp_dir.path());

    let icon_path = temp_dir.path().join(ICON_REL_PATH);
    let feature_path = temp_dir.path().join(FEATURE_REL_PATH);

    assert!(
        icon_path.exists(),
        "Icon should exist at: {}",
        icon_path.display()
    );
    assert!(
        feature_path.exists(),
        "Feature graphic should exist at: {}",
        feature_path.display()
    );

    let icon = image::open(&icon_path).expect("Failed to load generated icon");
    assert_eq!(icon.width(), 512, "Icon width should be 512");
    assert_eq!(icon.height(), 512, "Icon height should be 512");

    let feature = image::open(&feature_path).expect("Failed to load generated feature graphic");
    assert_eq!(feature.width(), 1024, "Feature graphic width should be 1024");
    assert_eq!(feature.height(), 500, "Feature graphic height should be 500");

    let entries = std::fs::read_dir(temp_dir.path().join("assets/branding"))
        .expect("Failed to list output directory")
        .count();
    assert_eq!(entries, 2, "Output directory should hold exactly two files");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("app_icon_512.png"),
        "stdout should name the icon path, got: {stdout}"
    );
    assert!(
        stdout.contains("featured_graphic_1024x500.png"),
        "stdout should name the feature graphic path, got: {stdout}"
    );
}

/// Pixels outside the translucent overlays carry the raw gradient, so they
/// can be checked against the interpolation formulas directly.
#[test]
fn background_pixels_follow_the_published_gradients() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    run_generator(temp_dir.path());

    let icon = image::open(temp_dir.path().join(ICON_REL_PATH))
        .expect("Failed to load generated icon")
        .to_rgb8();

    // The canvas corner sits outside the rounded card, 362.04px from the
    // center: lerp(#4CAF50, #2196F3, 362.04 / 435.2) truncated per channel.
    assert_eq!(icon.get_pixel(0, 0), &Rgb([40, 154, 215]));

    // Moving along the top row away from the center, red and green fade
    // while blue climbs.
    let near = icon.get_pixel(256, 0);
    let far = icon.get_pixel(0, 0);
    assert!(far[0] < near[0]);
    assert!(far[1] < near[1]);
    assert!(far[2] > near[2]);

    let feature = image::open(temp_dir.path().join(FEATURE_REL_PATH))
        .expect("Failed to load generated feature graphic")
        .to_rgb8();

    // Top row is the unmixed top color; the bottom row is one step short of
    // the full fade (t = 499/500).
    assert_eq!(feature.get_pixel(0, 0), &Rgb([0x10, 0x13, 0x17]));
    assert_eq!(feature.get_pixel(0, 499), &Rgb([32, 149, 242]));

    // Rows are horizontally uniform outside the card.
    assert_eq!(feature.get_pixel(0, 20), feature.get_pixel(1023, 20));
}

/// The icon's quote card must show up as a brightened region relative to
/// the raw gradient, and the glyph ink should be close to white.
#[test]
fn icon_overlay_brightens_the_card_region() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    run_generator(temp_dir.path());

    let icon = image::open(temp_dir.path().join(ICON_REL_PATH))
        .expect("Failed to load generated icon")
        .to_rgb8();

    // (100, 100) sits inside the card (its margin is 61.44px) but clear of
    // the glyphs and swoosh; (211, 40) lies at the same distance from the
    // center, so it carries the same gradient value, but outside the card.
    let inside = icon.get_pixel(100, 100);
    let bare = icon.get_pixel(211, 40);
    let inside_brightness: u32 = inside.0.iter().map(|&c| c as u32).sum();
    let bare_brightness: u32 = bare.0.iter().map(|&c| c as u32).sum();
    assert!(
        inside_brightness > bare_brightness,
        "card region {inside:?} should be brighter than bare gradient {bare:?}"
    );
}

/// Rerunning the generator in place must reproduce both files byte for
/// byte: no randomness, no timestamps.
#[test]
fn rerunning_produces_byte_identical_files() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");

    run_generator(temp_dir.path());
    let icon_first = std::fs::read(temp_dir.path().join(ICON_REL_PATH)).unwrap();
    let feature_first = std::fs::read(temp_dir.path().join(FEATURE_REL_PATH)).unwrap();

    run_generator(temp_dir.path());
    let icon_second = std::fs::read(temp_dir.path().join(ICON_REL_PATH)).unwrap();
    let feature_second = std::fs::read(temp_dir.path().join(FEATURE_REL_PATH)).unwrap();

    assert_eq!(icon_first, icon_second, "Icon bytes should not change");
    assert_eq!(
        feature_first, feature_second,
        "Feature graphic bytes should not change"
    );
}
