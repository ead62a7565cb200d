use crate::reports;
use careerpath::bank::QuestionBank;
use careerpath::config::Config;
use careerpath::error::CpResult;
use careerpath::narrative::{fallback, Narrative, NarrativeRequest, Narrator};
use careerpath::session::result::{content_fingerprint, default_output_path};
use careerpath::session::{
    AssessmentResult, InteractiveSource, Orchestrator, RandomSource, SessionOutcome, SessionParams,
};
use careerpath::taxonomy::Taxonomy;
use chrono::Local;
use clap::Args;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct AssessArgs {
    #[command(flatten)]
    pub config: Config,

    /// Answer every question at random
    #[arg(long, default_value_t = false)]
    pub demo: bool,

    /// Skip the narrative service; the result carries no narrative
    #[arg(long, default_value_t = false)]
    pub no_ai: bool,

    /// Ask fewer questions per stage
    #[arg(long, default_value_t = false)]
    pub fast: bool,

    /// Seed for random answers and question shuffles
    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    /// Result file (default: career_result_<timestamp>.json)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also write every ranked distribution as CSV
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Do not print result tables
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,
}

fn print_intro() {
    println!("\nHow it works");
    println!("  Stage 1  identifies your broad career field");
    println!("  Stage 2  narrows it to a sub-field");
    println!("  Stage 3  pinpoints a specialization");
    println!();
    println!("  Answer with the letter of your choice:");
    println!("  A = Strongly Agree   B = Agree   C = Neutral");
    println!("  D = Disagree         E = Strongly Disagree");
    println!("  Some aptitude items list their own options.");
}

fn narrate(config: &Config, outcome: &SessionOutcome) -> Narrative {
    let request = NarrativeRequest::from_outcome(outcome);
    match Narrator::from_params(&config.narrative) {
        Ok(narrator) => narrator.generate(&request),
        Err(e) => {
            warn!("Narrative client unavailable ({}), using local substitute", e);
            fallback::substitute(&request)
        }
    }
}

pub fn run(
    args: AssessArgs,
    config: Config,
    bank: &QuestionBank,
    taxonomy: &Taxonomy,
) -> CpResult<PathBuf> {
    let params = SessionParams::from_config(&config, args.fast, args.seed);
    info!("Question counts per stage: {:?}", params.question_counts);
    let mut orchestrator = Orchestrator::new(bank, taxonomy, params);

    let outcome = if args.demo {
        let mut source = RandomSource::new(args.seed);
        orchestrator.run(&mut source)?
    } else {
        print_intro();
        let mut source = InteractiveSource::stdio();
        orchestrator.run(&mut source)?
    };

    let narrative = if args.no_ai {
        None
    } else {
        Some(narrate(&config, &outcome))
    };

    let now = Local::now();
    let fingerprint = content_fingerprint(bank, taxonomy)?;
    let result = AssessmentResult::new(&outcome, narrative, args.demo, args.seed, fingerprint, &now);

    if !args.quiet {
        reports::print_summary(&result);
    }

    let output = args.output.unwrap_or_else(|| default_output_path(&now));
    result.save_json(&output)?;
    if let Some(csv_path) = &args.csv {
        result.save_csv(csv_path)?;
    }

    println!("\nResult saved to {}", output.display());
    Ok(output)
}
