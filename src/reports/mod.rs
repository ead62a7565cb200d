use careerpath::audit::{Finding, Severity};
use careerpath::narrative::Narrative;
use careerpath::scorer::{TraitTier, TraitVector};
use careerpath::session::orchestrator::RankedCandidate;
use careerpath::session::{AssessmentResult, Stage};
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

/// Rows shown per stage ranking; the JSON keeps the full list.
const TOP_N: usize = 5;

fn tier_color(tier: TraitTier) -> Color {
    match tier {
        TraitTier::Low => Color::Red,
        TraitTier::Mid => Color::Yellow,
        TraitTier::High => Color::Green,
    }
}

fn bar(percent: f64, width: usize) -> String {
    let filled = ((percent / 100.0) * width as f64).round().clamp(0.0, width as f64) as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(width - filled))
}

pub fn print_ranking(title: &str, ranking: &[RankedCandidate]) {
    println!("\n{}", title);
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Candidate").add_attribute(Attribute::Bold),
        Cell::new("Match").fg(Color::Cyan),
        Cell::new(""),
        Cell::new("Description"),
    ]);

    for (i, c) in ranking.iter().take(TOP_N).enumerate() {
        let name = if i == 0 {
            Cell::new(&c.name).add_attribute(Attribute::Bold).fg(Color::Green)
        } else {
            Cell::new(&c.name)
        };
        table.add_row(vec![
            Cell::new(i + 1),
            name,
            Cell::new(format!("{:.2}%", c.percent)),
            Cell::new(bar(c.percent, 20)),
            Cell::new(&c.description),
        ]);
    }

    for i in [0, 2] {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
    println!("{}", table);
}

pub fn print_trait_profile(traits: &TraitVector) {
    println!("\nTrait profile");
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_header(vec![
        Cell::new("Trait").add_attribute(Attribute::Bold),
        Cell::new("Value"),
        Cell::new(""),
        Cell::new("Tier"),
    ]);

    for (key, value) in traits.iter() {
        let tier = TraitTier::of(value);
        table.add_row(vec![
            Cell::new(key.label()),
            Cell::new(format!("{:.3}", value)),
            Cell::new(bar(value * 100.0, 20)),
            Cell::new(tier).fg(tier_color(tier)),
        ]);
    }
    if let Some(col) = table.column_mut(1) {
        col.set_cell_alignment(CellAlignment::Right);
    }
    println!("{}", table);
}

pub fn print_summary(result: &AssessmentResult) {
    for record in &result.stages {
        let title = format!("{}: {}", record.stage, record.title);
        print_ranking(&title, &record.distribution);
    }

    if !result.career_clusters.is_empty() {
        print_ranking("Career clusters", &result.career_clusters);
    }
    print_trait_profile(&result.trait_profile);

    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    for record in &result.stages {
        let label = match record.stage {
            Stage::Field => "Field",
            Stage::SubField => "Sub-field",
            Stage::Specialization => "Specialization",
            Stage::Done => continue,
        };
        table.add_row(vec![
            Cell::new(label).add_attribute(Attribute::Bold),
            Cell::new(&record.winner).fg(Color::Green),
            Cell::new(format!("{:.2}%", record.confidence)),
        ]);
    }
    println!("\nYour path");
    println!("{}", table);

    if let Some(narrative) = &result.narrative {
        print_narrative(narrative);
    }
}

pub fn print_narrative(narrative: &Narrative) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);

    table.add_row(vec![
        Cell::new("Analysis").add_attribute(Attribute::Bold),
        Cell::new(&narrative.narrative),
    ]);
    table.add_row(vec![
        Cell::new("Why this path").add_attribute(Attribute::Bold),
        Cell::new(&narrative.why_this_path),
    ]);
    table.add_row(vec![
        Cell::new("Strengths").add_attribute(Attribute::Bold).fg(Color::Green),
        Cell::new(narrative.strengths.join("\n")),
    ]);
    table.add_row(vec![
        Cell::new("Growth areas").add_attribute(Attribute::Bold).fg(Color::Yellow),
        Cell::new(narrative.growth_areas.join("\n")),
    ]);
    table.add_row(vec![
        Cell::new("Key insight").add_attribute(Attribute::Bold).fg(Color::Cyan),
        Cell::new(&narrative.key_insight),
    ]);

    println!("\nCareer insight ({})", narrative.source);
    println!("{}", table);
}

pub fn print_findings(findings: &[Finding]) {
    if findings.is_empty() {
        println!("No findings.");
        return;
    }
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Severity").add_attribute(Attribute::Bold),
        Cell::new("Where"),
        Cell::new("Finding"),
    ]);
    for f in findings {
        let color = match f.severity {
            Severity::Error => Color::Red,
            Severity::Warning => Color::Yellow,
        };
        table.add_row(vec![
            Cell::new(f.severity).fg(color),
            Cell::new(&f.scope),
            Cell::new(&f.message),
        ]);
    }
    println!("{}", table);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_is_fixed_width() {
        assert_eq!(bar(0.0, 10), "..........");
        assert_eq!(bar(100.0, 10), "##########");
        assert_eq!(bar(250.0, 4).len(), 4);
        assert_eq!(bar(-5.0, 4), "....");
    }
}
