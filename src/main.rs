//! Region redaction for standalone raster images
//! Created: 2026-10-17
//!
//! Places the image on a page through a transform, removes the given
//! page-space regions from it and writes the re-encoded result.

use std::fs;
use std::process;

use clap::{Arg, ArgAction, ArgMatches, Command};
use pdx_redact::image::{image_rect_to_clean, raster, CleaningPlan, PdfImage, PixelRect, RedactedImage};
use pdx_redact::{init_logging, ConfigError, Matrix, Rectangle, RegionFilter, Result, SweepConfig};
use tracing::{debug, error, info, warn};

fn main() {
    let matches = build_cli().get_matches();

    let log_level = matches.get_one::<String>("log-level").map(String::as_str).unwrap_or("info");
    init_logging(log_level);

    info!("🚀 pdx-redact v{} - Starting...", env!("CARGO_PKG_VERSION"));

    match run(&matches) {
        Ok(()) => info!("✅ Done"),
        Err(e) => {
            error!("❌ Redaction failed: {}", e);
            process::exit(1);
        }
    }
}

fn run(matches: &ArgMatches) -> Result<()> {
    let input = required(matches, "input")?;
    let output = required(matches, "output")?;
    let regions_path = required(matches, "regions")?;

    let mut config = match matches.get_one::<String>("config") {
        Some(path) => SweepConfig::from_json_file(path)?,
        None => SweepConfig::default(),
    };
    if let Some(overrides) = matches.get_many::<String>("set") {
        for entry in overrides {
            let (key, value) = entry
                .split_once('=')
                .ok_or_else(|| ConfigError::Validation(format!("Expected key=value, got {}", entry)))?;
            config.set(key.trim(), value.trim())?;
            debug!("Config override {} = {:?}", key.trim(), config.get(key.trim()));
        }
        config.validate()?;
    }

    let regions: Vec<Rectangle> = serde_json::from_str(&fs::read_to_string(regions_path)?).map_err(ConfigError::from)?;
    info!("📄 Loaded {} regions from {}", regions.len(), regions_path);

    let bytes = fs::read(input)?;
    let decoded = ::image::load_from_memory(&bytes).map_err(pdx_redact::ImageError::from)?;
    let image = PdfImage::new((1, 0), decoded.width(), decoded.height()).with_container(bytes);

    let ctm = match matches.get_one::<String>("ctm") {
        Some(values) => parse_ctm(values)?,
        None => Matrix::scale(image.width as f64, image.height as f64),
    };

    let filter = RegionFilter::new(regions, config)?;
    let areas = match filter.regions_to_be_cleaned(&ctm)? {
        CleaningPlan::WholeImage => {
            warn!("🧹 Image fully covered by a region; it would be removed, nothing written");
            return Ok(());
        }
        CleaningPlan::Areas(areas) => areas,
    };

    if areas.is_empty() {
        info!("No region touches the image; writing it unchanged");
        let original = image.container.as_deref().unwrap_or_default();
        fs::write(output, original)?;
        return Ok(());
    }

    let rects: Vec<PixelRect> = areas
        .iter()
        .map(|area| image_rect_to_clean(area, image.width, image.height))
        .collect();
    for rect in &rects {
        debug!("Painting {}x{} at ({}, {})", rect.width, rect.height, rect.x, rect.y);
    }

    match raster::clean_raster(&image, &rects)? {
        RedactedImage::Encoded { bytes, format } => {
            fs::write(output, &bytes)?;
            info!("💾 Wrote {} bytes of {:?} to {}", bytes.len(), format, output);
        }
        RedactedImage::InPlace | RedactedImage::Samples(_) => {
            warn!("Raster edit returned samples instead of a file; nothing written")
        }
    }
    Ok(())
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a String> {
    matches
        .get_one::<String>(name)
        .ok_or_else(|| ConfigError::Validation(format!("Missing --{}", name)).into())
}

/// Parses `a,b,c,d,e,f`
fn parse_ctm(values: &str) -> Result<Matrix> {
    let numbers: Vec<f64> = values
        .split(',')
        .map(|v| v.trim().parse::<f64>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|_| ConfigError::Validation(format!("Invalid matrix: {}", values)))?;

    let array: [f64; 6] = numbers
        .try_into()
        .map_err(|_| ConfigError::Validation(format!("Matrix needs six numbers: {}", values)))?;
    Ok(Matrix::from_array(array))
}

fn build_cli() -> Command {
    Command::new("pdx-redact")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Removes page-space regions from a raster image placed on a PDF page")
        .long_about(
            "Places the input image on a page through a transform (by default one page unit \
             per pixel), paints every pixel fully inside a removal region white and writes the \
             image back in its original format.",
        )
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("FILE")
                .help("Input image file")
                .required(true),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Output image file")
                .required(true),
        )
        .arg(
            Arg::new("regions")
                .short('r')
                .long("regions")
                .value_name("FILE")
                .help("JSON array of page-space rectangles {x, y, width, height}")
                .required(true),
        )
        .arg(
            Arg::new("ctm")
                .long("ctm")
                .value_name("a,b,c,d,e,f")
                .help("Transform from the unit image square to page space")
                .allow_hyphen_values(true),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Sweep configuration file (JSON)"),
        )
        .arg(
            Arg::new("set")
                .long("set")
                .value_name("KEY=VALUE")
                .action(ArgAction::Append)
                .help("Override one configuration value"),
        )
        .arg(
            Arg::new("log-level")
                .short('l')
                .long("log-level")
                .value_parser(["error", "warn", "info", "debug", "trace"])
                .default_value("info")
                .help("Log verbosity"),
        )
}
