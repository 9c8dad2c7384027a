use anyhow::Result;
use clap::{Parser, Subcommand};
use profilekit::{commands, init_logging, JoinStyle, Plane, SettingsOverrides};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "profilekit",
    version,
    long_version = profilekit::LONG_VERSION,
    about,
    long_about = None
)]
struct Cli {
    /// Log debug output (RUST_LOG overrides this)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the profiles found in a drawing
    View {
        /// Input DXF file
        path: PathBuf,

        /// Working plane (xy, yz or zx)
        #[arg(long)]
        plane: Option<Plane>,

        /// Write an SVG preview of profiles and offsets
        #[arg(long, value_name = "FILE")]
        svg: Option<PathBuf>,

        /// Settings file (.toml or .json)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Offset every profile and write the result as a new DXF file
    Offset {
        /// Input DXF file
        input: PathBuf,

        /// Output DXF file
        output: PathBuf,

        /// Offset distance in drawing units
        #[arg(long, value_name = "N")]
        offset: Option<f64>,

        /// Working plane (xy, yz or zx)
        #[arg(long)]
        plane: Option<Plane>,

        /// Settings file (.toml or .json)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Corner style (miter, round or bevel)
        #[arg(long)]
        join: Option<JoinStyle>,

        /// Reject drawings with coincident profiles
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    init_logging(level)?;
    tracing::debug!(
        version = profilekit::VERSION,
        build_date = profilekit::BUILD_DATE,
        "Starting profilekit"
    );

    match cli.command {
        Command::View {
            path,
            plane,
            svg,
            config,
        } => {
            let overrides = SettingsOverrides {
                plane,
                ..SettingsOverrides::default()
            };
            let settings = commands::resolve_settings(config.as_deref(), &overrides)?;
            let mut stdout = std::io::stdout().lock();
            commands::view(&path, &settings, svg.as_deref(), &mut stdout)?;
        }
        Command::Offset {
            input,
            output,
            offset,
            plane,
            config,
            join,
            strict,
        } => {
            let overrides = SettingsOverrides {
                distance: offset,
                plane,
                join,
                strict,
            };
            let settings = commands::resolve_settings(config.as_deref(), &overrides)?;
            commands::offset(&input, &output, &settings)?;
        }
    }

    Ok(())
}
