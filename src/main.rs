use crate::report::{Outcome, Report, Route, Strictness};
use crate::ticket::TicketList;
use crate::time::{DateTimeFormat, DurationCalculator, Rollover};
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tabled::settings::{Alignment, Style};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt};

mod prices;
mod report;
mod ticket;
mod time;

/// Minimum flight time per carrier and price statistics for one route
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to the JSON tickets file
    #[arg(short, long, value_name = "FILE", default_value = "data/tickets.json")]
    tickets: PathBuf,

    /// Origin airport code
    #[arg(short, long, default_value = "VVO")]
    origin: String,

    /// Destination airport code
    #[arg(short, long, default_value = "TLV")]
    destination: String,

    /// chrono pattern for departure and arrival dates
    #[arg(long, default_value = DateTimeFormat::DEFAULT_DATE)]
    date_format: String,

    /// chrono pattern for departure and arrival times
    #[arg(long, default_value = DateTimeFormat::DEFAULT_TIME)]
    time_format: String,

    /// Reject undated tickets whose arrival clock time is before departure
    #[arg(long)]
    no_rollover: bool,

    /// Fail on the first ticket with a bad date, time or interval
    #[arg(long)]
    strict: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn init_logs() {
    let subscriber = fmt::Subscriber::builder()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to initialize logging: {}", e);
    }
}

fn print_report(report: &Report) {
    let (from, to) = report.route_names();
    match &report.outcome {
        Outcome::NoFlights => {
            println!("There are no flights between {} and {}", from, to);
        }
        Outcome::Flights {
            prices, skipped, ..
        } => {
            println!(
                "{}",
                format!("Minimum flight time between {} and {} for each carrier:", from, to).bold()
            );
            let rows = report.carrier_rows();
            if rows.is_empty() {
                println!("No valid tickets.");
            } else {
                let mut table = tabled::Table::new(&rows);
                table.with(Style::rounded());
                table.with(Alignment::left());
                println!("{}", table);
            }

            println!("Median price:  {:.2}", prices.median);
            println!("Average price: {:.2}", prices.mean);
            let difference = format!("{:.2}", prices.difference);
            let difference = if prices.difference < 0.0 {
                difference.red()
            } else {
                difference.green()
            };
            println!("Difference between average and median price: {}", difference);

            for s in skipped {
                println!("{} {}", "skipped".yellow(), s);
            }
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    debug!(?args, "starting");

    let list = TicketList::load_from_file(&args.tickets)?;
    info!(tickets = list.tickets.len(), file = %args.tickets.display(), "loaded tickets");

    let rollover = if args.no_rollover {
        Rollover::Never
    } else {
        Rollover::NextDay
    };
    let calculator = DurationCalculator::new(
        DateTimeFormat::new(args.date_format, args.time_format),
        rollover,
    );
    let strictness = if args.strict {
        Strictness::Abort
    } else {
        Strictness::Skip
    };

    let report = Report::build(
        &calculator,
        &list.tickets,
        Route::new(args.origin, args.destination),
        strictness,
    )?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logs();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
