use clap::{Parser as ClapParser, Subcommand};
use querylens::{
    ChartOptions,
    cli::{
        self, ChartCommandOptions, CliError, CompileCommandOptions, CompileOutput,
        StatusCommandOptions,
    },
};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "querylens")]
#[command(about = "querylens - chart classification and visual query compilation for query dashboards")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a query response into pie, bar and line series
    Chart {
        /// Backend response JSON (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Never give one column more than one chart role
        #[arg(long)]
        distinct_roles: bool,

        /// Emit pie slice colors from this seed
        #[arg(long, value_name = "SEED")]
        colors: Option<u64>,
    },

    /// Compile a visual query definition into query text
    Compile {
        /// VisualQuery JSON (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Handling of repeated clause kinds: first, last or reject
        #[arg(long, default_value = "first")]
        policy: String,

        /// Print the execution request body for this user instead of bare text
        #[arg(long)]
        user_id: Option<String>,
    },

    /// Summarize a bundle status report
    Status {
        /// Bundle status JSON (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Chart {
            input,
            pretty,
            distinct_roles,
            colors,
        } => run_chart(input, pretty, distinct_roles, colors),
        Commands::Compile {
            input,
            policy,
            user_id,
        } => run_compile(input, &policy, user_id),
        Commands::Status { input, pretty } => run_status(input, pretty),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_input(input: Option<String>) -> Result<Option<String>, CliError> {
    match input {
        Some(s) => Ok(Some(s)),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(Some(buffer))
        }
        None => Ok(None),
    }
}

fn print_json(value: &serde_json::Value, pretty: bool) -> Result<(), CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }?;
    println!("{}", json);
    Ok(())
}

fn run_chart(
    input: Option<String>,
    pretty: bool,
    distinct_roles: bool,
    colors: Option<u64>,
) -> Result<(), CliError> {
    let options = ChartCommandOptions {
        input: read_input(input)?,
        chart: ChartOptions {
            distinct_roles,
            ..ChartOptions::default()
        },
        color_seed: colors,
    };
    print_json(&cli::execute_chart(&options)?, pretty)
}

fn run_compile(input: Option<String>, policy: &str, user_id: Option<String>) -> Result<(), CliError> {
    let options = CompileCommandOptions {
        input: read_input(input)?,
        policy: cli::parse_policy(policy)?,
        user_id,
    };

    match cli::execute_compile(&options)? {
        CompileOutput::Text(text) => println!("{}", text),
        CompileOutput::Request(request) => println!("{}", serde_json::to_string(&request)?),
    }
    Ok(())
}

fn run_status(input: Option<String>, pretty: bool) -> Result<(), CliError> {
    let options = StatusCommandOptions {
        input: read_input(input)?,
    };
    print_json(&cli::execute_status(&options)?, pretty)
}
