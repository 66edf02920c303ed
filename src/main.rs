use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use rotating_schedule::config::ScheduleRequest;
use rotating_schedule::display::{print_schedule, write_schedule_to_file};
use rotating_schedule::export::{export_json, export_roster_csv, export_tally_csv};
use rotating_schedule::parser::{load_people, parse_people_list};
use rotating_schedule::schedule::calendar::parse_start_date;
use rotating_schedule::schedule::{generate, RoundingPolicy};
use rotating_schedule::web;

#[derive(Parser, Debug)]
#[command(name = "rotating-schedule")]
#[command(version)]
#[command(about = "Plans office and work-from-home days for a team")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a schedule and print it
    Generate(GenerateArgs),

    /// Serve the JSON API
    Web {
        #[arg(long, default_value = "8080")]
        port: u16,
    },
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// JSON request file; flags below override its fields
    #[arg(long)]
    request: Option<PathBuf>,

    /// Comma separated names, e.g. "Ada,Linus,Grace"
    #[arg(long)]
    people: Option<String>,

    /// CSV or plain list of names
    #[arg(long)]
    people_file: Option<PathBuf>,

    /// Comma separated workday names (default Monday..Friday)
    #[arg(long)]
    workdays: Option<String>,

    #[arg(long)]
    weeks: Option<usize>,

    /// Office days per five-day week (0-5)
    #[arg(long)]
    days_at_work: Option<u8>,

    /// Minimum number of people in the office each day
    #[arg(long)]
    min_office: Option<usize>,

    #[arg(long, value_enum)]
    rounding: Option<RoundingPolicy>,

    /// Seed for a reproducible roster
    #[arg(long)]
    seed: Option<u64>,

    /// Monday of the first week (YYYY-MM-DD), used for week labels
    #[arg(long)]
    start: Option<String>,

    /// Reject out-of-range input instead of clamping it
    #[arg(long)]
    strict: bool,

    /// Print the outcome as JSON instead of the text layout
    #[arg(long)]
    json: bool,

    #[arg(long)]
    out_text: Option<PathBuf>,

    #[arg(long)]
    out_csv: Option<PathBuf>,

    #[arg(long)]
    out_tally: Option<PathBuf>,

    #[arg(long)]
    out_json: Option<PathBuf>,
}

fn build_request(args: &GenerateArgs) -> Result<ScheduleRequest, Box<dyn std::error::Error>> {
    let mut request = match &args.request {
        Some(path) => ScheduleRequest::from_json_file(path)?,
        None => ScheduleRequest::default(),
    };

    if args.people.is_some() || args.people_file.is_some() {
        let mut people = Vec::new();
        if let Some(path) = &args.people_file {
            people.extend(load_people(path)?);
        }
        if let Some(list) = &args.people {
            people.extend(parse_people_list(list));
        }
        request.people = people;
    }

    if let Some(days) = &args.workdays {
        request.workdays = days.split(',').map(|d| d.trim().to_string()).collect();
    }
    if let Some(weeks) = args.weeks {
        request.weeks = weeks;
    }
    if let Some(days) = args.days_at_work {
        request.days_at_work = days;
    }
    if let Some(minimum) = args.min_office {
        request.min_office_attendance = minimum;
    }
    if let Some(rounding) = args.rounding {
        request.rounding = rounding;
    }
    if args.seed.is_some() {
        request.seed = args.seed;
    }
    if let Some(start) = &args.start {
        request.start_date =
            Some(parse_start_date(start).ok_or_else(|| format!("Invalid start date: {}", start))?);
    }

    if args.strict {
        Ok(request)
    } else {
        Ok(request.clamped())
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let request = build_request(&args)?;
    tracing::debug!(?request, "Schedule request");

    let outcome = generate(&request)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_schedule(&outcome);
    }

    if let Some(path) = &args.out_text {
        write_schedule_to_file(&outcome, path)?;
        println!("Schedule saved to {}", path.display());
    }
    if let Some(path) = &args.out_csv {
        export_roster_csv(&outcome, path)?;
        println!("Roster CSV saved to {}", path.display());
    }
    if let Some(path) = &args.out_tally {
        export_tally_csv(&outcome, path)?;
        println!("Tally CSV saved to {}", path.display());
    }
    if let Some(path) = &args.out_json {
        export_json(&outcome, path)?;
        println!("JSON saved to {}", path.display());
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => run_generate(args)?,
        Commands::Web { port } => {
            println!("Access the API at http://localhost:{}/api/schedule", port);
            web::start_server(port).await?;
        }
    }

    Ok(())
}
