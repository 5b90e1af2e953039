use anyhow::Result;
use clap::Parser;

mod brand_gen;
mod draw;
mod font;

/// The tool takes no operands: every dimension, color, and string of the
/// branding set is a fixed constant, and output always lands under
/// `assets/branding/` in the working directory.
#[derive(Debug, Parser)]
#[clap(
    name = "branding-gen",
    about = "Render the RiseFuel Quotes app icon and feature graphic as PNG assets"
)]
struct Args {}

fn main() -> Result<()> {
    let _args = Args::parse();

    brand_gen::generate_branding()
}
