//! hwconf-build - Build firmware for every VESC Express board
use clap::{Parser, Subcommand};
use hwconf_build::{
    backend, check, config::Backend, discover, render, select, to_json, BuildConfig, Builder,
    CommandRunner, DryRunner, HwConfig, SystemRunner,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "hwconf-build")]
#[command(about = "Discover, check and build VESC Express board configurations", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "HWCONF_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List discovered board headers
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Validate every board header
    Check,
    /// Build firmware for every (or the selected) board
    Build {
        /// Only build this board (repeatable)
        #[arg(short, long = "board")]
        boards: Vec<String>,
        /// Only build boards for this target chip
        #[arg(short, long)]
        target: Option<String>,
        /// Override the configured backend
        #[arg(long, value_enum)]
        backend: Option<Backend>,
        /// Print the commands without running them
        #[arg(long)]
        dry_run: bool,
    },
    /// Write the header for a built-in board
    Render {
        /// Board name
        #[arg(short, long)]
        board: String,
        /// Directory to write hw_<board>.h into (stdout when omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hwconf_build=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    let mut config = BuildConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::List { json } => list(&config, json),
        Commands::Check => check(&config),
        Commands::Build {
            boards,
            target,
            backend,
            dry_run,
        } => {
            if let Some(backend) = backend {
                config.toolchain.backend = backend;
            }
            build(&config, &boards, target.as_deref(), dry_run)
        }
        Commands::Render { board, out } => render(&board, out.as_deref()),
    }
}

fn discover_boards(config: &BuildConfig) -> anyhow::Result<Vec<HwConfig>> {
    let configs = discover(&config.paths.hwconf_dir)?;
    Ok(configs)
}

fn list(config: &BuildConfig, json: bool) -> anyhow::Result<ExitCode> {
    let configs = discover_boards(config)?;

    if json {
        println!("{}", to_json(&configs)?);
    } else {
        println!("Boards:");
        for c in &configs {
            println!("  {:<20} {:<10} {}", c.name, c.target, c.file.display());
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn check(config: &BuildConfig) -> anyhow::Result<ExitCode> {
    let configs = discover_boards(config)?;
    let results = check::check_all(&configs);

    for result in &results {
        match &result.error {
            Some(error) => {
                tracing::error!("{} ({}): {}", result.name, result.file.display(), error);
            }
            None => tracing::info!("{}: OK", result.name),
        }
        for warning in &result.warnings {
            tracing::warn!("{}: {}", result.name, warning);
        }
        for diff in &result.drift {
            tracing::warn!("{}: differs from built-in profile: {}", result.name, diff);
        }
    }

    for name in check::boards_without_header(&configs) {
        tracing::info!("Built-in board {} has no header", name);
    }

    let invalid = results.iter().filter(|r| !r.is_valid()).count();
    println!("Checked {} headers, {} invalid", results.len(), invalid);

    Ok(if check::all_valid(&results) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn build(
    config: &BuildConfig,
    boards: &[String],
    target: Option<&str>,
    dry_run: bool,
) -> anyhow::Result<ExitCode> {
    config.validate()?;

    let configs = discover_boards(config)?;
    let selected = select(&configs, boards, target)?;

    let backend = backend::from_config(config);
    let summary = if dry_run {
        run_builds(backend.as_ref(), DryRunner, config, &selected)?
    } else {
        run_builds(backend.as_ref(), SystemRunner, config, &selected)?
    };

    println!("\n{summary}");

    if summary.is_success() {
        tracing::info!("All builds successful!");
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn run_builds<R: CommandRunner>(
    backend: &dyn hwconf_build::Backend,
    runner: R,
    config: &BuildConfig,
    boards: &[HwConfig],
) -> hwconf_build::Result<hwconf_build::BuildSummary> {
    let mut builder = Builder::new(backend, runner, config.paths.output_dir.clone());
    builder.build_all(boards)
}

fn render(name: &str, out: Option<&Path>) -> anyhow::Result<ExitCode> {
    match out {
        Some(dir) => {
            let path = render::write_board_header(name, dir)?;
            tracing::info!("Wrote {}", path.display());
        }
        None => {
            let (_, text) = render::render_board(name)?;
            print!("{text}");
        }
    }

    Ok(ExitCode::SUCCESS)
}
