//! `inquest` command line interface.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use colored::Colorize;

use inq_core::config::load_config;
use inq_core::executor::CommandExecutor;
use inq_core::investigate::Investigator;
use inq_core::reports::ReportSink;
use inq_core::state::RunRegistry;
use inq_server::AppState;

#[derive(Parser)]
#[command(name = "inquest", version, about = "Deep multi-stage topic investigation")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one investigation and print where the report landed
    Investigate {
        /// Topic to investigate
        topic: String,

        /// Investigation depth
        #[arg(long, default_value = "comprehensive")]
        depth: String,
    },

    /// Start the REST API server
    Serve {
        /// Address to bind instead of the configured one
        #[arg(long)]
        bind: Option<String>,
    },

    /// List recent investigation reports
    Recent {
        /// Maximum number of reports to show
        #[arg(short = 'n', long, default_value_t = 10)]
        limit: usize,
    },

    /// Print one report by filename
    Show {
        /// Report filename, as shown by `recent`
        filename: String,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = load_config(&std::env::current_dir()?)?;

    match cli.command {
        Command::Investigate { topic, depth } => {
            let executor = Arc::new(CommandExecutor::new(&config.executor));
            let investigator = Investigator::new(config, executor);

            println!("{} {topic}", "Investigating:".bold());
            let result = investigator.investigate(&topic, &depth).await?;

            println!("{}", "Investigation complete.".green().bold());
            println!("  report:  {}", result.report_file.display());
            println!("  session: {}", result.session.log_file);
            println!(
                "  events:  {} in {:.1}s",
                result.session.event_count, result.session.duration_seconds
            );
        }
        Command::Serve { bind } => {
            let addr = bind.unwrap_or_else(|| config.bind_addr.clone());
            let max_runs = config.max_concurrent_runs;
            let registry = RunRegistry::new();
            let executor = Arc::new(CommandExecutor::new(&config.executor));
            let investigator =
                Arc::new(Investigator::new(config, executor).with_registry(registry.clone()));

            println!("{} http://{addr}", "Serving on".bold());
            inq_server::serve(AppState::new(investigator, registry, max_runs), &addr).await?;
        }
        Command::Recent { limit } => {
            let sink = ReportSink::new(&config.reports_dir, config.report_stem_limit);

            let reports = sink.list_recent(limit)?;
            if reports.is_empty() {
                println!("No reports yet.");
            } else {
                for report in reports {
                    println!(
                        "{}  {:>8.1} KB  {}",
                        report.timestamp.format("%Y-%m-%d %H:%M"),
                        report.size_kb,
                        report.filename.cyan()
                    );
                }
            }
        }
        Command::Show { filename } => {
            let sink = ReportSink::new(&config.reports_dir, config.report_stem_limit);

            let content = sink.read(&filename)?;
            print!("{content}");
        }
    }

    Ok(())
}
