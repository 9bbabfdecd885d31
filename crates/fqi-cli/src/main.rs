mod commands;
mod output;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(
    name = "fqi",
    version,
    about = "Food Quality Index scoring for gas, climate and color sensor readings"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a single sensor reading against a food profile
    Score {
        /// Profile name (e.g., "Roti"), matched case-insensitively
        #[arg(short, long)]
        profile: String,

        /// Custom JSON profile catalog (default: built-in profiles)
        #[arg(long = "profiles", value_name = "FILE")]
        profiles: Option<PathBuf>,

        /// Gas sensor reading
        #[arg(long)]
        gas: Decimal,

        /// Temperature in °C
        #[arg(long, allow_negative_numbers = true)]
        temp: Decimal,

        /// Relative humidity in %
        #[arg(long)]
        humidity: Decimal,

        /// Red channel
        #[arg(long, default_value_t = 0)]
        r: i32,

        /// Green channel
        #[arg(long, default_value_t = 0)]
        g: i32,

        /// Blue channel
        #[arg(long, default_value_t = 0)]
        b: i32,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Feed a JSON array of device payloads through an in-memory registry
    Replay {
        /// Path to a JSON file with device payloads
        input_file: PathBuf,

        /// Profile assigned to newly seen devices (default: first profile)
        #[arg(short, long)]
        profile: Option<String>,

        /// Custom JSON profile catalog (default: built-in profiles)
        #[arg(long = "profiles", value_name = "FILE")]
        profiles: Option<PathBuf>,

        /// Only report this device
        #[arg(short, long)]
        device: Option<String>,

        /// Export the reported readings as CSV
        #[arg(long, value_name = "FILE")]
        csv: Option<PathBuf>,

        /// Export the device's readings to report_<device>.csv
        #[arg(long, requires = "device", conflicts_with = "csv")]
        report: bool,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Manage and inspect food profiles
    Profiles {
        #[command(subcommand)]
        action: ProfilesAction,
    },
}

#[derive(Subcommand)]
enum ProfilesAction {
    /// List the available profiles
    List {
        /// Custom JSON profile catalog (default: built-in profiles)
        #[arg(long = "profiles", value_name = "FILE")]
        profiles: Option<PathBuf>,
    },
    /// Explain how a profile is scored
    Explain {
        /// Profile name (e.g., "Tahu")
        name: String,

        /// Custom JSON profile catalog (default: built-in profiles)
        #[arg(long = "profiles", value_name = "FILE")]
        profiles: Option<PathBuf>,
    },
    /// Validate a custom profile catalog
    Validate {
        /// Path to JSON profile catalog
        file: PathBuf,
    },
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fqi_core=warn,fqi=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Score {
            profile,
            profiles,
            gas,
            temp,
            humidity,
            r,
            g,
            b,
            output,
        } => {
            let sample = fqi_core::model::Sample::new(gas, temp, humidity).with_color(r, g, b);
            commands::score::run(&profile, profiles.as_deref(), &sample, &output)
        }
        Commands::Replay {
            input_file,
            profile,
            profiles,
            device,
            csv,
            report,
            output,
        } => {
            let csv = commands::replay::csv_target(csv, report, device.as_deref());
            commands::replay::run(
                &input_file,
                profile.as_deref(),
                profiles.as_deref(),
                device.as_deref(),
                csv.as_deref(),
                &output,
            )
        }
        Commands::Profiles { action } => match action {
            ProfilesAction::List { profiles } => commands::profiles::list(profiles.as_deref()),
            ProfilesAction::Explain { name, profiles } => {
                commands::profiles::explain(&name, profiles.as_deref())
            }
            ProfilesAction::Validate { file } => commands::profiles::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
