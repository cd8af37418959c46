//! Neuroscore CLI
//!
//! Usage:
//!   neuroscore score --reaction-ms 310,290,335 --minutes-since-break 45 --hrv 62
//!   neuroscore history --last 10
//!   neuroscore ledger
//!   neuroscore catalog
//!   neuroscore open starter
//!   neuroscore serve --addr 127.0.0.1:3000
//!   neuroscore --json score ...            # JSON output

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use neuroscore::config::AppConfig;
use neuroscore::core::{run_server, NeuroApp};
use neuroscore::types::{ScoreBreakdown, ScoreSample};
use neuroscore::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "neuroscore",
    version = VERSION,
    about = "Neuro-Score tracker with loot-box rewards",
    long_about = "Neuroscore turns reaction-time trials, break timing, HRV and sleep\n\
                  into a 0-100 Neuro-Score, keeps a score history, and lets you\n\
                  spend earned points on loot boxes of avatar rewards.\n\n\
                  Score weights:\n  \
                  reaction time  0.4\n  \
                  accuracy       0.3\n  \
                  break timing   0.2\n  \
                  HRV            0.1\n  \
                  sleep          reported, not weighted"
)]
struct Args {
    /// Config file (TOML)
    #[arg(long, default_value = "neuroscore.toml")]
    config: String,

    /// Override the data directory
    #[arg(long)]
    data_dir: Option<String>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute and record a Neuro-Score
    Score {
        /// Reaction-time trials in milliseconds, comma separated
        #[arg(long, value_delimiter = ',')]
        reaction_ms: Vec<u32>,

        /// Minutes since the last break
        #[arg(long, default_value_t = 0)]
        minutes_since_break: u32,

        /// Heart-rate variability (ms)
        #[arg(long)]
        hrv: Option<u32>,

        /// Sleep last night (minutes)
        #[arg(long)]
        sleep_minutes: Option<u32>,

        /// What triggered this score
        #[arg(long, default_value = "manual")]
        trigger: String,
    },

    /// Show recent scores
    History {
        #[arg(long, default_value_t = 10)]
        last: usize,
    },

    /// Show points and unlocked rewards
    Ledger,

    /// List loot boxes
    Catalog,

    /// Buy and open a loot box
    Open {
        box_id: String,
    },

    /// Run the HTTP API
    Serve {
        /// Server address (default from config)
        #[arg(long)]
        addr: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = AppConfig::load_from(&args.config)?;
    if let Some(dir) = &args.data_dir {
        config.data_dir = dir.clone();
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if args.no_color {
        colored::control::set_override(false);
    }

    let mut app = NeuroApp::open(&config)?;

    match &args.command {
        Command::Score { reaction_ms, minutes_since_break, hrv, sleep_minutes, trigger } => {
            let sample = ScoreSample::from_reaction_trials(reaction_ms, *minutes_since_break, *hrv, *sleep_minutes);
            run_score(&mut app, &sample, trigger, &args)?;
        }
        Command::History { last } => run_history(&app, *last, &args)?,
        Command::Ledger => run_ledger(&app, &args)?,
        Command::Catalog => run_catalog(&app, &args)?,
        Command::Open { box_id } => run_open(&mut app, box_id, &args)?,
        Command::Serve { addr } => {
            let addr = addr.clone().unwrap_or_else(|| config.server_addr.clone());
            run_server(&addr, app).await?;
        }
    }

    Ok(())
}

/// Score a sample and award points
fn run_score(app: &mut NeuroApp, sample: &ScoreSample, trigger: &str, args: &Args) -> Result<()> {
    let submission = app.submit_score(sample, trigger)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&submission)?);
        return Ok(());
    }

    let breakdown = ScoreBreakdown {
        final_score: submission.record.final_score,
        components: submission.record.components,
        reason: submission.reason,
    };
    if args.no_color {
        println!("{}", breakdown.to_parseable_string());
    } else {
        println!("{}", breakdown.to_terminal_string());
    }
    if sample.sleep_minutes.is_some() {
        println!("  (sleep is shown for reference and is not part of the score)");
    }
    println!(
        "  +{} pts | balance {}",
        submission.points_earned, submission.balance
    );
    Ok(())
}

/// Print recent records and the trend summary
fn run_history(app: &NeuroApp, last: usize, args: &Args) -> Result<()> {
    let records = app.history.recent(last);
    let summary = app.history.summary();

    if args.json {
        let body = serde_json::json!({ "summary": summary, "records": records });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No scores recorded yet.");
        return Ok(());
    }
    for record in records {
        println!("{}", record.to_parseable_string());
    }
    println!();
    println!(
        "{} records | latest {} | best {} | avg {}",
        summary.count,
        summary.latest.map(|s| s.to_string()).unwrap_or_else(|| "-".into()),
        summary.best.map(|s| s.to_string()).unwrap_or_else(|| "-".into()),
        summary.average.map(|a| format!("{:.1}", a)).unwrap_or_else(|| "-".into()),
    );
    Ok(())
}

fn run_ledger(app: &NeuroApp, args: &Args) -> Result<()> {
    let ledger = app.shop.ledger();
    if args.json {
        println!("{}", serde_json::to_string_pretty(ledger)?);
        return Ok(());
    }

    println!("{} {} pts", "Balance:".bold(), ledger.total_points);
    println!("Spent:   {} pts", ledger.points_spent);
    if ledger.unlocked_reward_ids.is_empty() {
        println!("Unlocked: none");
    } else {
        let ids: Vec<&str> = ledger.unlocked_reward_ids.iter().map(String::as_str).collect();
        println!("Unlocked: {}", ids.join(", "));
    }
    Ok(())
}

fn run_catalog(app: &NeuroApp, args: &Args) -> Result<()> {
    let boxes = app.shop.catalog().boxes();
    if args.json {
        println!("{}", serde_json::to_string_pretty(boxes)?);
        return Ok(());
    }

    let ledger = app.shop.ledger();
    for loot_box in boxes {
        println!("{} ({}) - {} pts", loot_box.name.bold(), loot_box.id, loot_box.price);
        for (entry, (_, p)) in loot_box.table.entries().iter().zip(loot_box.table.probabilities()) {
            let owned = if ledger.is_unlocked(&entry.id) { " ✓" } else { "" };
            println!(
                "  {} {:<18} {:>5.1}%{}",
                entry.rarity.emoji(),
                entry.rarity.paint(&entry.name),
                p * 100.0,
                owned
            );
        }
    }
    Ok(())
}

/// Buy and open a loot box
fn run_open(app: &mut NeuroApp, box_id: &str, args: &Args) -> Result<()> {
    let receipt = match app.shop.open_loot_box(box_id) {
        Ok(receipt) => receipt,
        Err(e) => {
            match e.reason_code() {
                Some(code) if !args.json => {
                    eprintln!("{} {}", code.code().red(), e);
                }
                _ => eprintln!("{}", e),
            }
            std::process::exit(1);
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&receipt)?);
    } else if args.no_color {
        println!("{}", receipt.to_parseable_string());
    } else {
        println!("{}", receipt.to_terminal_string());
    }
    Ok(())
}
