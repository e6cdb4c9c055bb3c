use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde_json::json;
use tracing::info;

use glyphkit::{
    approximate, extract_paths, find_system_font, init_logging, load_font_file, GlyphPath,
    IdentityModel, ReconstructionPipeline, Wavelet,
};

/// Transcode glyph outlines: model round trip plus wavelet simplification.
#[derive(Parser, Debug)]
#[command(name = "glyphkit", version, about)]
struct Args {
    /// Text whose glyphs to process.
    #[arg(long, default_value = "山居秋暝")]
    text: String,

    /// Font file to read outlines from.
    #[arg(long, conflicts_with = "family")]
    font: Option<PathBuf>,

    /// System font family to resolve instead of a file ("Sans" etc.).
    #[arg(long, default_value = "Sans")]
    family: String,

    /// Fraction of wavelet coefficients to keep when approximating.
    #[arg(long, default_value_t = 0.2)]
    keep_ratio: f64,

    /// Wavelet used by the approximator.
    #[arg(long, default_value = "db2", value_parser = parse_wavelet)]
    wavelet: Wavelet,

    /// Write the JSON result here instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

fn parse_wavelet(s: &str) -> Result<Wavelet, String> {
    s.parse().map_err(|err| format!("{err}"))
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    let args = Args::parse();
    info!(build = glyphkit::BUILD_DATE, "glyphkit starting");

    let font = match &args.font {
        Some(path) => load_font_file(path)
            .with_context(|| format!("loading font from {}", path.display()))?,
        None => find_system_font(&args.family)
            .with_context(|| format!("resolving font family '{}'", args.family))?,
    };

    let original = extract_paths(&font, &args.text);
    info!(
        characters = original.len(),
        text = %args.text,
        "extracted glyph outlines"
    );

    let pipeline = ReconstructionPipeline::new(IdentityModel);
    let reconstructed = pipeline.reconstruct_paths(&original)?;

    let approximated: BTreeMap<char, GlyphPath> = original
        .iter()
        .map(|(ch, path)| (*ch, approximate(path, args.keep_ratio, args.wavelet)))
        .collect();

    let result = json!({
        "original": original,
        "reconstructed": reconstructed,
        "approximated": approximated,
    });
    let rendered = serde_json::to_string_pretty(&result)?;

    match &args.output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "wrote result");
        }
        None => println!("{rendered}"),
    }
    Ok(())
}
