use clap::{Parser, Subcommand};
use larkit::{AppError, FeatureFlags, InstallOptions, MakeActionOptions, MakeDtoOptions};

#[derive(Parser)]
#[command(name = "larkit")]
#[command(version)]
#[command(
    about = "Opinionated Laravel setup: Fortify, Horizon, Reverb, Telescope, UIDs and coding standards",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Install the opinionated stack into the current Laravel project
    #[clap(visible_alias = "i")]
    Install {
        /// Project name used for database naming
        name: Option<String>,
        /// Install Laravel Horizon
        #[arg(long)]
        horizon: bool,
        /// Install Laravel Reverb
        #[arg(long)]
        reverb: bool,
        /// Install Laravel Telescope
        #[arg(long)]
        telescope: bool,
        /// Install all optional packages
        #[arg(long)]
        all: bool,
        /// Skip GitHub workflows installation
        #[arg(long)]
        no_workflows: bool,
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
        /// Never ask; assume default answers
        #[arg(long, short = 'n')]
        no_interaction: bool,
    },
    /// Generate boilerplate source files
    #[command(subcommand)]
    Make(MakeCommands),
}

#[derive(Subcommand)]
enum MakeCommands {
    /// Create a new Action class following the Actions pattern
    Action {
        /// Name of the action (e.g. User/UpdateProfile or UpdateProfile)
        name: String,
        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },
    /// Create a new Data Transfer Object class
    Dto {
        /// Name of the DTO (e.g. UserProfileData)
        name: String,
        /// Generate a fromModel method for this model
        #[arg(long)]
        model: Option<String>,
        /// Comma-separated properties (e.g. id:int,name:string,email:string)
        #[arg(long)]
        properties: Option<String>,
        /// Overwrite existing file
        #[arg(long)]
        force: bool,
        /// Never ask; assume default answers
        #[arg(long, short = 'n')]
        no_interaction: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result: Result<(), AppError> = match cli.command {
        Commands::Install {
            name,
            horizon,
            reverb,
            telescope,
            all,
            no_workflows,
            force,
            no_interaction,
        } => larkit::install(InstallOptions {
            name,
            flags: FeatureFlags { horizon, reverb, telescope, all },
            no_workflows,
            force,
            no_interaction,
        })
        .map(|_| ()),
        Commands::Make(MakeCommands::Action { name, force }) => {
            larkit::make_action(MakeActionOptions { name, force }).map(|_| ())
        }
        Commands::Make(MakeCommands::Dto { name, model, properties, force, no_interaction }) => {
            larkit::make_dto(MakeDtoOptions { name, model, properties, force, no_interaction })
                .map(|_| ())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
