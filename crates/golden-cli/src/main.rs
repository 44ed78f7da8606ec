// this_file: crates/golden-cli/src/main.rs

//! gen-golden: render the golden table to PNG reference images
//!
//! Fonts are resolved first, before anything touches the golden directory,
//! so a broken font setup never leaves half a run behind.

mod cli;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use golden::{GoldenConfig, GoldenGenerator, SpecTable};
use golden_core::GoldenError;

use cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(exit_status(&err))
        },
    }
}

/// Initialize logging based on verbosity flag.
fn init_logger(verbose: bool) {
    if verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Warn)
            .init();
    }
}

/// The font matcher's own status when it failed, 1 for everything else
fn exit_status(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<GoldenError>()
        .and_then(GoldenError::query_exit_code)
        .and_then(|code| u8::try_from(code).ok())
        .filter(|&code| code != 0)
        .unwrap_or(1)
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.config();

    let fonts = config
        .resolve_fonts(&config.resolver())
        .context("Failed to resolve fonts")?;
    println!("Monospace font: {}", fonts.mono.path.display());
    println!("Serif font:     {}", fonts.serif.path.display());

    let table = SpecTable::standard(&fonts);
    let specs = table.select(&cli.names);
    let generator = GoldenGenerator::from_config(&config);

    if cli.list {
        list(&generator, &specs);
        return Ok(());
    }

    generate(&generator, &config, &specs, cli.preview)
}

fn list(generator: &GoldenGenerator, specs: &[&golden::GoldenSpec]) {
    for row in generator.list(specs.iter().copied()) {
        println!(
            "  {}: \"{}\" {}px {}x{} [{}]",
            row.name,
            row.text,
            row.font_size,
            row.width,
            row.height,
            if row.exists { "exists" } else { "missing" }
        );
    }
}

fn generate(
    generator: &GoldenGenerator,
    config: &GoldenConfig,
    specs: &[&golden::GoldenSpec],
    preview: bool,
) -> Result<()> {
    let mut written = 0usize;

    // Report each golden as soon as it lands, so a failure mid-run still
    // shows what was already replaced
    for spec in specs {
        let generated = generator
            .generate([*spec], preview)
            .with_context(|| format!("Failed to generate {}", spec.name))?;

        for golden in generated {
            println!(
                "  {}  ({:?} {}px)",
                golden.path.display(),
                golden.text,
                golden.font_size
            );
            if let Some(preview) = &golden.preview {
                println!("    preview: {}", preview.display());
            }
            written += 1;
        }
    }

    println!(
        "\n{} golden images written to {}/",
        written,
        config.golden_dir.display()
    );
    Ok(())
}
