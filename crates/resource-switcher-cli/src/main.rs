mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use resource_switcher_cli::output::OutputFormat;

use commands::apply::ApplyArgs;
use commands::Inputs;

#[derive(Parser, Debug)]
#[command(author, version, about = "Resource switcher loadout utilities")]
struct Cli {
    /// Resource catalog CSV (falls back to RESOURCE_SWITCHER_RESOURCES).
    #[arg(long, global = true)]
    resources: Option<PathBuf>,

    /// Switcher definitions JSON (falls back to RESOURCE_SWITCHER_PARTS).
    #[arg(long, global = true)]
    parts: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the resource catalog.
    Resources,
    /// List switchers in window order.
    Switchers {
        /// Only list switchers owned by this owner.
        #[arg(long)]
        owner: Option<u32>,
    },
    /// List a switcher's loadouts, including disabled ones and why.
    Loadouts {
        #[arg(long)]
        switcher: String,
    },
    /// Show the resource breakdown and swap cost of a loadout.
    Preview {
        #[arg(long)]
        switcher: String,
        #[arg(long)]
        loadout: String,
    },
    /// Apply a loadout, optionally persisting selections to a state file.
    Apply {
        #[arg(long)]
        switcher: String,
        #[arg(long)]
        loadout: String,
        /// JSON file holding saved selections; read before and written after.
        #[arg(long)]
        state: Option<PathBuf>,
        /// Also apply to symmetry counterparts.
        #[arg(long)]
        symmetry: bool,
    },
    /// Show part info and loadout descriptions.
    Info {
        #[arg(long)]
        switcher: String,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let inputs = Inputs {
        resources: cli.resources.as_deref(),
        parts: cli.parts.as_deref(),
    };
    let format = cli.format;

    match &cli.command {
        Command::Resources => commands::resources::handle_list_resources(inputs, format),
        Command::Switchers { owner } => {
            commands::switchers::handle_list_switchers(inputs, *owner, format)
        }
        Command::Loadouts { switcher } => {
            commands::loadouts::handle_list_loadouts(inputs, switcher, format)
        }
        Command::Preview { switcher, loadout } => {
            commands::preview::handle_preview(inputs, switcher, loadout, format)
        }
        Command::Apply {
            switcher,
            loadout,
            state,
            symmetry,
        } => commands::apply::handle_apply(
            inputs,
            ApplyArgs {
                switcher,
                loadout,
                state: state.as_deref(),
                symmetry: *symmetry,
            },
            format,
        ),
        Command::Info { switcher } => commands::info::handle_info(inputs, switcher, format),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
