use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::info;

use pomo_countdown::config::{self, Config, format_duration};
use pomo_countdown::help::HelpPanel;
use pomo_countdown::hooks::{Hooks, execute_hook};
use pomo_countdown::terminal::{NextStep, StatusLine, TerminalAlert, WindowTitle};
use pomo_countdown::{CountdownTimer, Page, parse_duration};

#[derive(Parser)]
#[command(name = "pomo")]
#[command(about = "A pomodoro countdown for the terminal")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Start a countdown
    Start(StartArgs),
}

#[derive(Args)]
struct StartArgs {
    /// Countdown length: 25m, 30s, 1m30s (a bare number means minutes)
    #[arg(short, long, value_parser = parse_duration)]
    duration: Option<u64>,

    /// Config file to read instead of ~/.config/pomo/config.json
    #[arg(long)]
    config: Option<PathBuf>,

    /// Don't run configured hooks
    #[arg(long)]
    no_hooks: bool,

    /// Don't play a sound when time is up
    #[arg(long)]
    no_sound: bool,

    /// Don't set the terminal window title
    #[arg(long)]
    no_title: bool,

    /// Show the help panel before the countdown starts
    #[arg(long)]
    help_panel: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("pomo_countdown={},pomo={}", level, level).into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Start(args) => run_start(args),
    }
}

fn run_start(args: StartArgs) -> anyhow::Result<()> {
    let config_path = args.config.clone().unwrap_or_else(config::config_path);
    let config = config::load_config(&config_path);
    let duration_seconds = resolve_duration(args.duration, &config)?;
    let hooks = (!args.no_hooks).then(|| config.hooks.clone());

    let mut panel = HelpPanel::hidden();
    if args.help_panel {
        panel.hover();
    }
    if let Some(help) = panel.render() {
        println!("{}\n", help);
    }

    install_interrupt_handler(hooks.clone())?;

    let title_enabled = !args.no_title && std::io::stdout().is_terminal();
    let page = Page::builder()
        .display(StatusLine::stdout())
        .title(WindowTitle::stdout(title_enabled))
        .control(NextStep::stdout())
        .notifier(TerminalAlert::stdout(hooks.clone(), !args.no_sound))
        .text(config.page.clone())
        .build()?;

    println!("🍅 Starting {} countdown...", format_duration(duration_seconds.unsigned_abs()));
    if let Some(hooks) = &hooks {
        execute_hook(&hooks.start);
    }

    CountdownTimer::new().start(duration_seconds, page);

    if let Some(hooks) = &hooks {
        execute_hook(&hooks.end);
    }
    info!("session complete");
    Ok(())
}

/// The `--duration` flag wins over the config file. Resolved before anything
/// is printed or any hook runs.
fn resolve_duration(flag: Option<u64>, config: &Config) -> anyhow::Result<i64> {
    let seconds = flag.unwrap_or_else(|| config.duration_seconds());
    Ok(i64::try_from(seconds)?)
}

fn install_interrupt_handler(hooks: Option<Hooks>) -> anyhow::Result<()> {
    ctrlc::set_handler(move || {
        println!("\n🛑 Interrupted!");
        if let Some(hooks) = &hooks {
            execute_hook(&hooks.end);
        }
        std::process::exit(0);
    })?;
    Ok(())
}
