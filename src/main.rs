use careerpath::bank::QuestionBank;
use careerpath::config::Config;
use careerpath::error::{CareerError, CpResult};
use careerpath::taxonomy::Taxonomy;
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Question bank JSON (default: embedded bank)
    #[arg(global = true, short, long)]
    bank: Option<PathBuf>,

    /// Taxonomy JSON (default: embedded taxonomy)
    #[arg(global = true, short, long)]
    taxonomy: Option<PathBuf>,

    /// Base parameters as JSON; explicit flags override it
    #[arg(global = true, long = "config")]
    config_file: Option<PathBuf>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the three-stage assessment
    Assess(cmd::assess::AssessArgs),
    /// Check a question bank and taxonomy for consistency
    Validate(cmd::validate::ValidateArgs),
}

fn init_tracing(debug: bool) {
    let level = if debug { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

/// File config as the base, explicit CLI flags on top.
fn resolve_config(cli: &Cli, flags: &Config, sub_matches: &ArgMatches) -> CpResult<Config> {
    let config = match &cli.config_file {
        Some(path) => {
            info!("Loading parameters from {}", path.display());
            let mut file_config = Config::load_from_file(path)?;
            file_config.merge_from_cli(flags, sub_matches);
            file_config
        }
        None => flags.clone(),
    };
    config.validate()?;
    Ok(config)
}

fn run(cli: Cli, matches: &ArgMatches) -> CpResult<()> {
    let bank = QuestionBank::resolve(cli.bank.as_deref())?;
    let taxonomy = Taxonomy::resolve_source(cli.taxonomy.as_deref())?;
    info!(
        "Loaded {} questions and {} fields",
        bank.len(),
        taxonomy.fields.len()
    );

    match &cli.command {
        Commands::Assess(args) => {
            let sub_matches = matches
                .subcommand_matches("assess")
                .ok_or_else(|| CareerError::Config("missing assess arguments".into()))?;
            let config = resolve_config(&cli, &args.config, sub_matches)?;
            cmd::assess::run(args.clone(), config, &bank, &taxonomy).map(|_| ())
        }
        Commands::Validate(args) => cmd::validate::run(args.clone(), &bank, &taxonomy),
    }
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    init_tracing(cli.debug);

    let code = match run(cli, &matches) {
        Ok(()) => 0,
        Err(CareerError::Aborted) => {
            eprintln!("\nAssessment aborted. Nothing was saved.");
            130
        }
        Err(e) => {
            error!("{}", e);
            1
        }
    };
    process::exit(code);
}
