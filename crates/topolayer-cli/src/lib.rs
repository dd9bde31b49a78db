//! CLI logic for the topolayer layout tool.
//!
//! Reads a containerlab topology, lays it out and writes the layout as JSON.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{fs, path::Path};

use log::info;

use topolayer::{LayoutBuilder, TopolayerError, config::AppConfig};

/// Run the topolayer CLI application
///
/// This function loads the configuration, applies the command-line overrides,
/// lays out the input topology and writes the resulting JSON to the output
/// file.
///
/// # Errors
///
/// Returns `TopolayerError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
/// - Topology and layout errors
/// - Export errors
pub fn run(args: &Args) -> Result<(), TopolayerError> {
    let output = output_path(args);
    info!(
        input_path = args.input,
        output_path = output;
        "Processing topology"
    );

    let app_config = apply_overrides(config::load_config(args.config.as_ref())?, args);

    let source = fs::read_to_string(&args.input)?;

    let builder = LayoutBuilder::new(app_config);
    let topology = builder.parse(&source)?;
    let layout = builder.layout(&topology)?;
    let json = builder.render_json(&layout)?;

    fs::write(&output, json)?;

    info!(output_file = output; "Layout exported successfully");

    Ok(())
}

/// Output path: `--output`, or the input path with a `.layout.json` extension.
pub fn output_path(args: &Args) -> String {
    match &args.output {
        Some(output) => output.clone(),
        None => Path::new(&args.input)
            .with_extension("layout.json")
            .to_string_lossy()
            .to_string(),
    }
}

fn apply_overrides(mut config: AppConfig, args: &Args) -> AppConfig {
    if let Some(orientation) = args.orientation {
        config = config.with_orientation(orientation);
    }
    if args.connectors {
        config = config.with_connectors(true);
    }
    if args.include_unlinked_nodes {
        config = config.with_include_unlinked_nodes(true);
    }
    config
}
