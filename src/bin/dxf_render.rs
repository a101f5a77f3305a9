//! Render a drawing to SVG, GeoJSON or a stats summary.
//!
//! Usage: `dxf-render <file> [svg|geojson|stats] [--options <svg-options.json>]`

use anyhow::{bail, Context, Result};
use dxf_lens::render::{to_geojson, to_svg, SvgOptions};
use dxf_lens::{layer_stats, DrawingInput, DrawingParser};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputKind {
    Svg,
    GeoJson,
    Stats,
}

struct Args {
    input: PathBuf,
    output: OutputKind,
    options: Option<PathBuf>,
}

fn parse_args() -> Result<Args> {
    let mut args = std::env::args().skip(1);
    let mut input = None;
    let mut output = OutputKind::Svg;
    let mut options = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "svg" => output = OutputKind::Svg,
            "geojson" => output = OutputKind::GeoJson,
            "stats" => output = OutputKind::Stats,
            "--options" => {
                let Some(path) = args.next() else {
                    bail!("`--options` needs a JSON file path");
                };
                options = Some(PathBuf::from(path));
            }
            other if input.is_none() => input = Some(PathBuf::from(other)),
            other => bail!("unexpected argument: {other}"),
        }
    }

    let Some(input) = input else {
        bail!("usage: dxf-render <file> [svg|geojson|stats] [--options <json>]");
    };
    Ok(Args { input, output, options })
}

fn load_svg_options(path: Option<&PathBuf>) -> Result<SvgOptions> {
    let Some(path) = path else {
        return Ok(SvgOptions::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading options from {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing options in {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args()?;
    let svg_options = load_svg_options(args.options.as_ref())?;

    let parsed = DrawingParser::new()
        .parse(DrawingInput::File(args.input.clone()), None)
        .await
        .with_context(|| format!("parsing {}", args.input.display()))?;

    if let Some(fallback) = parsed.fallback() {
        println!("{}", serde_json::to_string_pretty(&parsed)?);
        bail!("{}: {}", fallback.error, fallback.suggestion);
    }
    let Some(document) = parsed.document() else {
        bail!("no document produced");
    };
    info!(format = %parsed.format, entities = document.entities.len(), "drawing loaded");

    match args.output {
        OutputKind::Svg => print!("{}", to_svg(document, &svg_options)),
        OutputKind::GeoJson => println!("{}", to_geojson(document).to_json_string()?),
        OutputKind::Stats => {
            let summary = serde_json::json!({
                "format": parsed.format,
                "version": document.version().map(|v| v.to_string()),
                "stats": document.stats(),
                "bounds": document.bounds,
                "layers": layer_stats(document),
                "diagnostics": document.diagnostics,
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }
    Ok(())
}
