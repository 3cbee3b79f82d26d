//! chartwrap CLI - template hooks that wrap an upstream Helm chart

use chartwrap_core::defaults::{HANDOFF_FILE_NAME, MAX_VERSIONS_PER_REPO, PLACEHOLDER_CHART_NAME};
use chartwrap_helm::HelmCli;
use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod display;
mod error;
mod exit_codes;
mod logging;
mod prompt;

use commands::materialize::MaterializeOptions;
use commands::resolve::ResolveOptions;
use prompt::TerminalPrompter;

#[derive(Parser)]
#[command(name = "chartwrap")]
#[command(version)]
#[command(about = "Generate a wrapper Helm chart around an upstream chart", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,

    /// Helm binary to invoke
    #[arg(long, global = true, env = "CHARTWRAP_HELM", default_value = "helm")]
    helm: PathBuf,

    /// Hand-off file shared by the resolve and materialize phases
    #[arg(long, global = true, env = "CHARTWRAP_HANDOFF_FILE", default_value = HANDOFF_FILE_NAME)]
    handoff_file: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a chart name to name, version and repository (pre-generation hook)
    Resolve {
        /// Chart name, bare or as repo/chart
        chart: Option<String>,

        /// Never prompt; take the highest version of the first repository
        #[arg(long, env = "CHARTWRAP_NON_INTERACTIVE")]
        non_interactive: bool,

        /// Template default that means no chart was chosen
        #[arg(long, default_value = PLACEHOLDER_CHART_NAME)]
        placeholder: String,

        /// Versions offered per repository
        #[arg(
            long,
            default_value_t = MAX_VERSIONS_PER_REPO,
            value_parser = RangedU64ValueParser::<usize>::new().range(1..)
        )]
        max_versions: usize,

        /// JSON template context to update with the resolved chart
        #[arg(long)]
        context_file: Option<PathBuf>,
    },

    /// Merge upstream values and patch Chart.yaml (post-generation hook)
    Materialize {
        /// Generated chart directory
        #[arg(long, default_value = ".")]
        dir: PathBuf,

        /// Chart name as rendered by the template (fallback)
        #[arg(long)]
        chart_name: Option<String>,

        /// Chart version as rendered by the template (fallback)
        #[arg(long)]
        chart_version: Option<String>,

        /// Chart repository URL as rendered by the template (fallback)
        #[arg(long)]
        chart_repository: Option<String>,
    },

    /// Inspect or clear the hand-off record
    Handoff {
        #[command(subcommand)]
        action: HandoffAction,
    },
}

#[derive(Subcommand)]
enum HandoffAction {
    /// Print the pending record without consuming it
    Show,

    /// Delete a leftover record
    Clear,
}

fn main() {
    // Setup miette for nice error display
    miette::set_panic_hook();

    let cli = Cli::parse();
    logging::init(cli.debug);

    let helm = HelmCli::new(&cli.helm);

    let result = match cli.command {
        Commands::Resolve {
            chart,
            non_interactive,
            placeholder,
            max_versions,
            context_file,
        } => {
            let options = ResolveOptions {
                chart,
                placeholder,
                interactive: !non_interactive,
                max_versions,
                handoff_file: cli.handoff_file,
                context_file,
            };
            commands::resolve::run(&helm, &mut TerminalPrompter::new(), &options)
        }

        Commands::Materialize {
            dir,
            chart_name,
            chart_version,
            chart_repository,
        } => {
            let options = MaterializeOptions {
                dir,
                handoff_file: cli.handoff_file,
                chart_name,
                chart_version,
                chart_repository,
            };
            commands::materialize::run(&helm, &options)
        }

        Commands::Handoff { action } => match action {
            HandoffAction::Show => commands::handoff::show(&cli.handoff_file),
            HandoffAction::Clear => commands::handoff::clear(&cli.handoff_file),
        },
    };

    if let Err(err) = result {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}
