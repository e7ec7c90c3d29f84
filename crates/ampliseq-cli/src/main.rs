use ampliseq::{
    commands::{
        config::{self, ConfigAction},
        describe, launch_plan, run,
    },
    logger, GlobalOpts,
};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ampliseq")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "nf-core/ampliseq task runner",
    long_about = "Runs the nf-core/ampliseq amplicon sequencing pipeline from typed parameters and reports the published results directory."
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the pipeline
    Run(run::RunCommand),
    /// Print the workflow display metadata
    Describe {
        /// Print the long workflow description instead
        #[arg(long)]
        long: bool,
    },
    /// Print the "Test Data" launch plan as a parameters file
    LaunchPlan {
        /// Write to a file instead of stdout
        #[arg(short = 'o', long, value_name = "FILE")]
        output: Option<std::path::PathBuf>,
    },
    /// Configure the task runner
    #[command(subcommand_required = false, arg_required_else_help = false)]
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logger::init_with_verbosity(cli.global.verbosity_level()) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }

    match cli.command {
        Commands::Run(cmd) => {
            if let Err(e) = run::handle_run(cmd, cli.global) {
                logger::error(&format!("Run failed: {}", e));
                std::process::exit(1);
            }
        }
        Commands::Describe { long } => {
            if let Err(e) = describe::handle_describe(long, cli.global) {
                logger::error(&e.to_string());
                std::process::exit(1);
            }
        }
        Commands::LaunchPlan { output } => {
            if let Err(e) = launch_plan::handle_launch_plan(output.as_deref(), cli.global) {
                logger::error(&e.to_string());
                std::process::exit(1);
            }
        }
        Commands::Config { action } => {
            config::handle_config(action, cli.global);
        }
    }
}
