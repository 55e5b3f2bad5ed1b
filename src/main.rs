use anyhow::{Result, bail};
use clap::Parser as ClapParser;
use mde::{GuiOptions, SessionConfig, presets};
use std::time::Duration;

#[derive(ClapParser)]
#[command(name = "mde")]
#[command(about = "MiniMessage dialog editor with live preview", long_about = None)]
struct Cli {
    /// Built-in preset to start from (welcome, confirm, survey, settings, warning)
    #[arg(short, long)]
    preset: Option<String>,

    /// Number of undo snapshots to keep
    #[arg(long, default_value_t = mde::history::DEFAULT_HISTORY_CAPACITY)]
    history_size: usize,

    /// Quiet period after an edit before it becomes an undo step
    #[arg(long, value_name = "MS", default_value_t = 500)]
    commit_delay_ms: u64,

    /// Start with the light theme
    #[arg(long)]
    light: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    if let Some(name) = cli.preset.as_deref()
        && !presets::PRESET_NAMES.contains(&name)
    {
        bail!(
            "unknown preset {name:?}; expected one of {}",
            presets::PRESET_NAMES.join(", ")
        );
    }
    if cli.history_size == 0 {
        bail!("--history-size must be at least 1");
    }

    mde::run_gui(GuiOptions {
        preset: cli.preset,
        dark: !cli.light,
        session: SessionConfig {
            history_capacity: cli.history_size,
            commit_delay: Duration::from_millis(cli.commit_delay_ms),
        },
    })
}
