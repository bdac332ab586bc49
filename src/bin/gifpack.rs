use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use gifpack::{
    ExportOptions, FormInput, GenerateRequest, GifPackError, GifProbe, OperationType,
    ProgressCallback, ProgressInfo, ResizeFilter,
};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;

const CLI_AFTER_HELP: &str = "Examples:\n  gifpack generate --gif capoo.gif --title Capoo --id capoo1 --pattern capoo- --height 64 --out capoo\n  gifpack export-frames capoo.gif --out frames --pattern capoo- --height 64 --width 48\n  gifpack probe capoo.gif --json\n  gifpack validate capoo\n  gifpack completions zsh > _gifpack";

#[derive(Debug, Parser)]
#[command(
    name = "gifpack",
    version,
    about = "Split animated GIFs into PNG frame sets with a runner config",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Parser, Clone, Default)]
struct GlobalOptions {
    /// Show debug logging output (RUST_LOG overrides).
    #[arg(long, global = true)]
    verbose: bool,

    /// Show a progress spinner while frames are written.
    #[arg(long, global = true)]
    progress: bool,

    /// Allow writing into existing output paths where supported.
    #[arg(long, global = true)]
    overwrite: bool,

    /// Resampling filter (nearest, triangle, catmull-rom, gaussian, lanczos3).
    #[arg(long, global = true, default_value = "lanczos3")]
    filter: String,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Split a GIF into a new frame set directory with config.json.
    #[command(
        about = "Generate a frame set",
        after_help = "Examples:\n  gifpack generate --gif capoo.gif --title Capoo --id capoo1 --pattern capoo- --height 64 --out capoo\n  gifpack generate --gif run.gif --title Run --id run --pattern run- --height 32 --width 32 --out run --base-dir packs"
    )]
    Generate {
        /// Source GIF file.
        #[arg(long)]
        gif: String,
        /// Display title.
        #[arg(long)]
        title: String,
        /// Frame set identifier.
        #[arg(long)]
        id: String,
        /// Frame file name prefix.
        #[arg(long)]
        pattern: String,
        /// Frame height in pixels.
        #[arg(long)]
        height: String,
        /// Frame width in pixels; derived per frame when omitted.
        #[arg(long, default_value = "")]
        width: String,
        /// Name of the output directory to create (must not exist).
        #[arg(long)]
        out: String,
        /// Directory the output directory is created in.
        #[arg(long, default_value = ".")]
        base_dir: PathBuf,
    },

    /// Export resized PNG frames only.
    #[command(
        about = "Export GIF frames as PNG",
        after_help = "Examples:\n  gifpack export-frames capoo.gif --out frames --pattern capoo- --height 64"
    )]
    ExportFrames {
        /// Source GIF file.
        input: PathBuf,
        /// Output directory for the frames.
        #[arg(long)]
        out: PathBuf,
        /// Frame file name prefix.
        #[arg(long)]
        pattern: String,
        /// Frame height in pixels.
        #[arg(long)]
        height: u32,
        /// Frame width in pixels; derived per frame when omitted.
        #[arg(long)]
        width: Option<u32>,
    },

    /// Write a config.json for an existing frame directory.
    #[command(about = "Write a frame set config")]
    WriteConfig {
        /// Output path of the config file.
        path: PathBuf,
        #[arg(long)]
        id: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        pattern: String,
        #[arg(long)]
        height: u32,
        #[arg(long)]
        width: Option<u32>,
        #[arg(long)]
        frame_count: u64,
    },

    /// Print GIF metadata (alias: info).
    #[command(about = "Print GIF metadata", visible_alias = "info")]
    Probe {
        /// GIF files to inspect.
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output metadata as machine-readable JSON.
        #[arg(long)]
        json: bool,
    },

    /// Check a frame set directory against its config.json.
    #[command(about = "Validate a frame set")]
    Validate {
        /// Frame set directory (the one holding config.json).
        dir: PathBuf,
    },

    /// Generate shell completion scripts.
    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn parse_filter(value: &str) -> Option<ResizeFilter> {
    match value.to_ascii_lowercase().as_str() {
        "nearest" => Some(ResizeFilter::Nearest),
        "triangle" | "linear" | "bilinear" => Some(ResizeFilter::Triangle),
        "catmull-rom" | "catmullrom" | "cubic" => Some(ResizeFilter::CatmullRom),
        "gaussian" => Some(ResizeFilter::Gaussian),
        "lanczos3" | "lanczos" => Some(ResizeFilter::Lanczos3),
        _ => None,
    }
}

fn init_logging(global: &GlobalOptions) {
    let default_level = if global.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn ensure_writable_path(path: &Path, overwrite: bool) -> Result<(), Box<dyn std::error::Error>> {
    if path.exists() {
        if overwrite {
            eprintln!(
                "{} {}",
                "warning:".yellow().bold(),
                format!("overwriting {}", path.display()).yellow()
            );
        } else {
            return Err(format!(
                "output already exists: {} (use --overwrite to replace)",
                path.display()
            )
            .into());
        }
    }
    Ok(())
}

fn base_export_options(
    global: &GlobalOptions,
    height: u32,
    width: Option<u32>,
    progress_bar: Option<&ProgressBar>,
) -> Result<ExportOptions, Box<dyn std::error::Error>> {
    let filter = parse_filter(&global.filter)
        .ok_or(format!("unsupported --filter: {}", global.filter))?;

    let mut options = ExportOptions::new(height)
        .with_width(width)
        .with_filter(filter);

    if let Some(bar) = progress_bar {
        options = options.with_progress(Arc::new(TerminalProgress { bar: bar.clone() }));
    }

    Ok(options)
}

fn progress_bar(global: &GlobalOptions) -> Result<Option<ProgressBar>, Box<dyn std::error::Error>> {
    if !global.progress {
        return Ok(None);
    }

    let bar = ProgressBar::new_spinner();
    bar.set_style(ProgressStyle::with_template(
        "{spinner:.green} {pos} frame(s) written {msg}",
    )?);
    Ok(Some(bar))
}

struct TerminalProgress {
    bar: ProgressBar,
}

impl ProgressCallback for TerminalProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        match info.operation {
            OperationType::FrameExport => self.bar.set_position(info.current),
            OperationType::ConfigWrite => self.bar.set_message("config written"),
            _ => {}
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&cli.global);

    match cli.command {
        Commands::Generate {
            gif,
            title,
            id,
            pattern,
            height,
            width,
            out,
            base_dir,
        } => {
            let form = FormInput {
                gif_path: gif,
                title,
                gif_id: id,
                file_pattern: pattern,
                height,
                width,
                output_dir: out,
            };
            let request = GenerateRequest::from_form(&form)?;

            let bar = progress_bar(&cli.global)?;
            let options = base_export_options(
                &cli.global,
                request.frame_size.height,
                request.frame_size.width,
                bar.as_ref(),
            )?;
            let outcome = gifpack::generate(&base_dir, &request, &options)?;

            if let Some(bar) = bar {
                bar.finish_with_message("done");
            }

            println!(
                "{} {}",
                "success:".green().bold(),
                format!(
                    "Generated {} frame(s) in {}",
                    outcome.frame_count,
                    outcome.output_dir.display()
                )
                .green()
            );
        }
        Commands::ExportFrames {
            input,
            out,
            pattern,
            height,
            width,
        } => {
            if out.exists() && !out.is_dir() {
                return Err(format!("output path is not a directory: {}", out.display()).into());
            }
            if out.is_dir() {
                ensure_writable_path(&out, cli.global.overwrite)?;
            }

            let bar = progress_bar(&cli.global)?;
            let options = base_export_options(&cli.global, height, width, bar.as_ref())?;
            let count = gifpack::export_frames_with_options(&input, &out, &pattern, &options)?;

            if let Some(bar) = bar {
                bar.finish_with_message("done");
            }

            println!(
                "{} {}",
                "success:".green().bold(),
                format!("Exported {count} frame(s) to {}", out.display()).green()
            );
        }
        Commands::WriteConfig {
            path,
            id,
            title,
            pattern,
            height,
            width,
            frame_count,
        } => {
            ensure_writable_path(&path, cli.global.overwrite)?;
            gifpack::write_config(&path, &id, &title, &pattern, width, height, frame_count)?;
            println!("{} {}", "saved".green().bold(), path.display());
        }
        Commands::Probe { inputs, json } => {
            let results = GifProbe::probe_many(&inputs);

            if json {
                let payload: Vec<_> = inputs
                    .iter()
                    .zip(&results)
                    .map(|(path, result)| match result {
                        Ok(metadata) => json!({
                            "path": path.display().to_string(),
                            "width": metadata.width,
                            "height": metadata.height,
                            "frame_count": metadata.frame_count,
                            "duration_seconds": metadata.total_duration.as_secs_f64(),
                        }),
                        Err(error) => json!({
                            "path": path.display().to_string(),
                            "error": error.to_string(),
                        }),
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                for (path, result) in inputs.iter().zip(&results) {
                    match result {
                        Ok(metadata) => {
                            println!("{}", path.display().to_string().bold());
                            println!("  Size: {}x{}", metadata.width, metadata.height);
                            println!("  Frames: {}", metadata.frame_count);
                            println!("  Duration: {:?}", metadata.total_duration);
                            if let Some(delay) = metadata.average_delay() {
                                println!("  Average delay: {delay:?}");
                            }
                        }
                        Err(error) => {
                            eprintln!("{} {}: {error}", "error:".red().bold(), path.display());
                        }
                    }
                }
            }

            if results.iter().any(Result::is_err) {
                return Err("some files could not be probed".into());
            }
        }
        Commands::Validate { dir } => {
            let report = gifpack::validate_frame_set(&dir)?;
            print!("{report}");
            if !report.is_valid() {
                return Err(format!("{} error(s) found", report.errors.len()).into());
            }
        }
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "gifpack", &mut std::io::stdout());
        }
    }

    Ok(())
}

fn main() {
    if let Err(error) = run() {
        match error.downcast_ref::<GifPackError>() {
            Some(pack_error) if !pack_error.is_validation() => {
                eprintln!("{} generation failed: {pack_error}", "error:".red().bold());
            }
            _ => eprintln!("{} {error}", "error:".red().bold()),
        }
        std::process::exit(1);
    }
}
