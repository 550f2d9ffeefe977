#![deny(unsafe_code)]
//! CLI binary for the sigil identity generator.
//!
//! Subcommands:
//! - `generate`: build an artwork and write it as JSON
//! - `defaults`: print the default configuration
//! - `schema`: print the parameter schema
//! - `seed`: print a fresh seed

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use sigil_core::{generate, Artwork, Config, GlyphSource, Mode, Seed, TextGlyphs};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "sigil", about = "Deterministic identity artwork generator")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Log pipeline milestones to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate an artwork and write it as JSON.
    Generate {
        /// Seed text; a fresh seed is generated when omitted.
        #[arg(long)]
        seed: Option<String>,

        /// Parameters as a JSON object with camelCase keys.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Cells per side (overrides --params).
        #[arg(short, long)]
        grid_size: Option<usize>,

        /// Mask mode: none, letter or text (also accepted as string).
        #[arg(short, long)]
        mode: Option<Mode>,

        /// Letter or text for the glyph modes.
        #[arg(short, long)]
        input: Option<String>,

        /// JSON file mapping characters to mask grids.
        #[arg(long)]
        glyphs: Option<PathBuf>,

        /// Omit the background rectangle.
        #[arg(long)]
        transparent: bool,

        /// Output file path; stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the default configuration as JSON.
    Defaults,
    /// Print the parameter schema as JSON.
    Schema,
    /// Print a freshly generated seed.
    Seed,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn load_glyphs(path: &Path) -> Result<TextGlyphs, CliError> {
    let text = fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("cannot read {}: {e}", path.display())))?;
    let glyphs: TextGlyphs = serde_json::from_str(&text)
        .map_err(|e| CliError::Input(format!("invalid glyph file {}: {e}", path.display())))?;
    tracing::debug!(path = %path.display(), glyphs = glyphs.len(), "glyphs loaded");
    Ok(glyphs)
}

fn write_artwork(artwork: &Artwork, output: Option<&Path>) -> Result<(), CliError> {
    let text = serde_json::to_string_pretty(artwork)?;
    match output {
        Some(path) => fs::write(path, text)
            .map_err(|e| CliError::Io(format!("cannot write {}: {e}", path.display()))),
        None => {
            println!("{text}");
            Ok(())
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Defaults => {
            println!("{}", serde_json::to_string_pretty(&Config::default())?);
        }
        Command::Schema => {
            println!("{}", serde_json::to_string_pretty(&Config::param_schema())?);
        }
        Command::Seed => {
            let seed = Seed::generate();
            if cli.json {
                println!("{}", serde_json::json!({ "seed": seed }));
            } else {
                println!("{seed}");
            }
        }
        Command::Generate {
            seed,
            params,
            grid_size,
            mode,
            input,
            glyphs,
            transparent,
            output,
        } => {
            let params: serde_json::Value = serde_json::from_str(&params)
                .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;

            let mut config = Config::from_json(&params)?;
            if let Some(seed) = seed {
                config.seed = Some(Seed::Text(seed));
            }
            if let Some(n) = grid_size {
                config.grid_size = n;
            }
            if let Some(mode) = mode {
                config.mode = mode;
            }
            if let Some(input) = input {
                config.input = input;
            }
            config.transparent |= transparent;

            let glyphs = glyphs.as_deref().map(load_glyphs).transpose()?;
            let artwork = generate(&config, glyphs.as_ref().map(|g| g as &dyn GlyphSource))?;

            write_artwork(&artwork, output.as_deref())?;

            if cli.json {
                if output.is_some() {
                    let info = serde_json::json!({
                        "seed": artwork.seed,
                        "shapes": artwork.shapes.len(),
                        "output": output.as_ref().map(|p| p.display().to_string()),
                    });
                    println!("{}", serde_json::to_string_pretty(&info)?);
                }
            } else {
                eprintln!(
                    "generated {} shapes ({}x{} grid, seed {})",
                    artwork.shapes.len(),
                    config.effective_grid_size(),
                    config.effective_grid_size(),
                    artwork.seed
                );
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
