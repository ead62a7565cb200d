use crate::reports;
use careerpath::audit::{has_errors, Auditor, Severity};
use careerpath::bank::QuestionBank;
use careerpath::error::{CareerError, CpResult};
use careerpath::session::result::content_fingerprint;
use careerpath::taxonomy::Taxonomy;
use clap::Args;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, Table};

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Treat warnings as errors
    #[arg(long, default_value_t = false)]
    pub strict: bool,
}

pub fn run(args: ValidateArgs, bank: &QuestionBank, taxonomy: &Taxonomy) -> CpResult<()> {
    println!("\n=== CONTENT AUDIT ===");

    let walk = taxonomy.walk();
    let depth_count = |d: usize| walk.iter().filter(|(depth, _)| *depth == d).count();

    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_header(vec![
        Cell::new("Content").add_attribute(Attribute::Bold),
        Cell::new("Count"),
    ]);
    table.add_row(vec![Cell::new("Stage 1 questions"), Cell::new(bank.stage1.len())]);
    table.add_row(vec![Cell::new("Stage 2 pools"), Cell::new(bank.stage2.len())]);
    table.add_row(vec![Cell::new("Stage 3 pools"), Cell::new(bank.stage3.len())]);
    table.add_row(vec![Cell::new("Questions total"), Cell::new(bank.len())]);
    table.add_row(vec![Cell::new("Fields"), Cell::new(depth_count(1))]);
    table.add_row(vec![Cell::new("Sub-fields"), Cell::new(depth_count(2))]);
    table.add_row(vec![Cell::new("Specializations"), Cell::new(depth_count(3))]);
    table.add_row(vec![Cell::new("Career clusters"), Cell::new(depth_count(0))]);
    println!("{}", table);

    println!("Fingerprint: {}\n", content_fingerprint(bank, taxonomy)?);

    let findings = Auditor::new(bank, taxonomy).run();
    reports::print_findings(&findings);

    let warnings = findings
        .iter()
        .filter(|f| f.severity == Severity::Warning)
        .count();
    if has_errors(&findings) || (args.strict && warnings > 0) {
        return Err(CareerError::Validation(format!(
            "content audit failed with {} finding(s)",
            findings.len()
        )));
    }
    println!("Content OK.");
    Ok(())
}
