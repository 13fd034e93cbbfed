use anyhow::{Context, Result};
use clap::Parser;
use pyaudit::cli::{Cli, Commands};
use pyaudit::commands::{self, AnalyzeConfig, ComplexityConfig, SecurityCommandConfig};
use pyaudit::config::{self, PyauditConfig};
use pyaudit::progress::{self, ProgressConfig};
use std::io::IsTerminal;

/// Rayon thread stack size (8MB for deeply nested parse trees)
const RAYON_STACK_SIZE: usize = 8 * 1024 * 1024;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);
    configure_colors(cli.plain);
    configure_thread_pool(cli.jobs);
    progress::init_global(ProgressConfig::from_env(cli.quiet));

    let config = load_config(&cli)?;

    match cli.command {
        Commands::Analyze {
            path,
            output,
            no_save,
            format,
        } => commands::handle_analyze(
            AnalyzeConfig {
                path,
                output,
                no_save,
                format,
            },
            &config,
        ),
        Commands::Complexity {
            path,
            format,
            functions,
            sort_by,
        } => commands::handle_complexity(
            ComplexityConfig {
                path,
                format,
                show_functions: functions,
                sort_by,
            },
            &config,
        ),
        Commands::Security {
            path,
            format,
            min_severity,
            fail_on,
        } => commands::handle_security(
            SecurityCommandConfig {
                path,
                format,
                min_severity,
                fail_on,
            },
            &config,
        ),
        Commands::Init { force } => commands::init_config(force),
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    // RUST_LOG, when set, wins over -v
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn configure_colors(plain: bool) {
    let no_color = std::env::var_os("NO_COLOR").is_some();
    if plain || no_color || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }
}

/// Configure rayon global thread pool once at startup
fn configure_thread_pool(jobs: usize) {
    let mut builder = rayon::ThreadPoolBuilder::new().stack_size(RAYON_STACK_SIZE);

    if jobs > 0 {
        builder = builder.num_threads(jobs);
    }

    if let Err(e) = builder.build_global() {
        log::debug!("Thread pool already configured: {}", e);
    }
}

fn load_config(cli: &Cli) -> Result<PyauditConfig> {
    match &cli.config {
        Some(path) => config::load_config_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(config::load_config()),
    }
}
