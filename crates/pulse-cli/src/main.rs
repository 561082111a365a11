//! Command-line front-end for market-pulse
//!
//! # Usage
//!
//! ```bash
//! export GEMINI_API_KEY="..."
//!
//! # One-shot panels
//! market-pulse chart AAPL
//! market-pulse financials MSFT --format html
//! market-pulse news --market "European equity market"
//!
//! # Interactive session (fetches trending news first)
//! market-pulse
//! ```

mod terminal;

use clap::{Parser, Subcommand};
use pulse_panels::{ClientHandle, Dashboard, PanelKind, PanelState};
use pulse_utils::PulseConfig;
use std::process::ExitCode;
use terminal::{OutputFormat, OutputView};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "market-pulse")]
#[command(about = "AI market commentary grounded in live web search", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Model identifier (overrides MARKET_PULSE_MODEL)
    #[arg(long, global = true)]
    model: Option<String>,

    /// Market scope for trending news (overrides MARKET_PULSE_MARKET)
    #[arg(long, global = true)]
    market: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Technical chart analysis for a stock
    Chart {
        /// Stock name or ticker
        query: String,
    },
    /// Key financial metrics for a stock
    Financials {
        /// Stock name or ticker
        query: String,
    },
    /// Top trending market news
    News,
    /// Interactive session (default)
    Interactive,
}

const HELP: &str = "\
Commands:
  /chart <stock>       Chart analysis
  /financials <stock>  Financial metrics
  /help                Show this help
  /exit                Quit";

fn load_config(args: &Args) -> anyhow::Result<PulseConfig> {
    let mut config = PulseConfig::from_env()?;
    if let Some(model) = &args.model {
        config.model.clone_from(model);
    }
    if let Some(market) = &args.market {
        config.market.clone_from(market);
    }
    config.validate()?;
    Ok(config)
}

fn print_snapshot(dashboard: &Dashboard<OutputView>, kind: PanelKind) -> anyhow::Result<()> {
    if let Some(snapshot) = dashboard.panel(kind).view().snapshot()? {
        println!("{snapshot}");
    }
    Ok(())
}

async fn run_once(
    dashboard: &mut Dashboard<OutputView>,
    kind: PanelKind,
    query: Option<&str>,
) -> anyhow::Result<ExitCode> {
    let state = match (kind, query) {
        (PanelKind::News, _) => {
            dashboard.start().await;
            dashboard.panel(PanelKind::News).state()
        }
        _ if !dashboard.client().is_ready() => {
            let panel = dashboard.panel_mut(kind);
            panel.show_init_failure();
            panel.state()
        }
        (PanelKind::Chart, Some(q)) => dashboard.submit_chart(q).await,
        (PanelKind::Financials, Some(q)) => dashboard.submit_financials(q).await,
        _ => dashboard.panel(kind).state(),
    };

    print_snapshot(dashboard, kind)?;

    Ok(match state {
        PanelState::Success => ExitCode::SUCCESS,
        PanelState::Idle => {
            eprintln!("Nothing to do: the query was empty.");
            ExitCode::from(2)
        }
        PanelState::Loading | PanelState::Error => ExitCode::FAILURE,
    })
}

async fn run_interactive(dashboard: &mut Dashboard<OutputView>) -> anyhow::Result<ExitCode> {
    println!("market-pulse: AI market commentary\n{HELP}\n");

    dashboard.start().await;
    print_snapshot(dashboard, PanelKind::News)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::Write::flush(&mut std::io::stdout())?;

        let Some(line) = lines.next_line().await? else {
            println!("\nGoodbye!");
            break;
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let (command, rest) = input.split_once(' ').unwrap_or((input, ""));
        match command {
            "/chart" => {
                dashboard.submit_chart(rest).await;
                print_snapshot(dashboard, PanelKind::Chart)?;
            }
            "/financials" => {
                dashboard.submit_financials(rest).await;
                print_snapshot(dashboard, PanelKind::Financials)?;
            }
            "/help" => println!("{HELP}"),
            "/exit" | "/quit" => {
                println!("Goodbye!");
                break;
            }
            _ => println!("Unknown command: {command}\n{HELP}"),
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    if args.verbose {
        pulse_utils::init_tracing_with("debug");
    } else {
        pulse_utils::init_tracing();
    }

    let config = load_config(&args)?;

    info!(model = %config.model, market = %config.market, "Starting market-pulse");

    let client = ClientHandle::from_config(&config);
    let format = args.format;
    let mut dashboard = Dashboard::new(client, &config, |kind| OutputView::new(kind, format));

    match args.command.unwrap_or(Command::Interactive) {
        Command::Chart { query } => run_once(&mut dashboard, PanelKind::Chart, Some(&query)).await,
        Command::Financials { query } => {
            run_once(&mut dashboard, PanelKind::Financials, Some(&query)).await
        }
        Command::News => run_once(&mut dashboard, PanelKind::News, None).await,
        Command::Interactive => run_interactive(&mut dashboard).await,
    }
}
