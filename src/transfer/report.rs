//! Markdown documents
//!
//! The diagnostic notes document and a governance report composed from the
//! analysis views. Both are presentation output and are not read back.

use crate::analysis::{
    format_mean,
    insights::{
        cost_value_quadrants, efficiency_overview, posture_balance, rag_breakdown,
        reform_opportunities, rogers_readiness, tacit_report, PostureAssessment, Quadrant,
    },
    NetworkAnalyzer,
};
use crate::registry::GovernanceRecordStore;
use chrono::{DateTime, Utc};

/// `None` when every notes section is blank
pub fn notes_markdown(store: &GovernanceRecordStore, generated: DateTime<Utc>) -> Option<String> {
    let notes = store.diagnostic_notes();
    if notes.is_empty() {
        return None;
    }

    let mut out = String::new();
    out.push_str("# Process Diagnostic Notes\n");
    out.push_str(&format!("Generated: {}\n", generated.format("%Y-%m-%d %H:%M")));
    for (heading, text) in notes.sections() {
        out.push_str(&format!("\n## {}\n{}\n", heading, text.trim()));
    }
    Some(out)
}

fn bullet_list(out: &mut String, items: &[String], empty: &str) {
    if items.is_empty() {
        out.push_str(&format!("_{}_\n", empty));
        return;
    }
    for item in items {
        out.push_str(&format!("- {}\n", item));
    }
}

pub fn governance_report(store: &GovernanceRecordStore, generated: DateTime<Utc>) -> String {
    let bodies = store.bodies();
    let overview = efficiency_overview(bodies, store.processes());
    let mut out = String::new();

    out.push_str("# Governance Mapping Report\n");
    out.push_str(&format!("Generated: {}\n\n", generated.format("%Y-%m-%d %H:%M")));

    out.push_str("## Summary\n\n");
    out.push_str("| Metric | Value |\n");
    out.push_str("|---|---|\n");
    out.push_str(&format!("| Governance bodies | {} |\n", overview.total_bodies));
    out.push_str(&format!("| Processes | {} |\n", overview.total_processes));
    out.push_str(&format!("| Average efficiency | {} |\n", format_mean(overview.avg_efficiency)));
    out.push_str(&format!("| Average value added | {} |\n", format_mean(overview.avg_value_added)));
    out.push_str(&format!("| High cost bodies | {} |\n", overview.high_cost_bodies));
    out.push_str(&format!("| Duplication risk bodies | {} |\n", overview.duplication_risk_bodies));
    out.push_str(&format!("| Below target efficiency | {} |\n", overview.below_target));

    let reform = reform_opportunities(bodies);
    out.push_str("\n## Priority Reform Opportunities\n\n");
    out.push_str("### High Cost, Low Value\n\n");
    let items: Vec<String> = reform
        .high_cost_low_value
        .iter()
        .map(|c| format!("**{}** (cost {}, value {}/5): {}", c.name, c.cost_impact, c.value_added, c.recommendation))
        .collect();
    bullet_list(&mut out, &items, "No high-cost, low-value bodies identified.");

    out.push_str("\n### High Duplication Risk\n\n");
    let items: Vec<String> = reform
        .high_duplication
        .iter()
        .map(|c| format!("**{}** (risk {}/5): {}", c.name, c.duplication_risk, c.recommendation))
        .collect();
    bullet_list(&mut out, &items, "No bodies with high duplication risk identified.");

    out.push_str("\n### Inefficient Bodies\n\n");
    let items: Vec<String> = reform
        .inefficient
        .iter()
        .map(|c| format!("**{}** (efficiency {}/5): {}", c.name, c.efficiency_score, c.recommendation))
        .collect();
    bullet_list(&mut out, &items, "No significantly inefficient bodies identified.");

    out.push_str("\n## Cost-Value Placement\n\n");
    let placements = cost_value_quadrants(bodies);
    for quadrant in [Quadrant::Keep, Quadrant::Optimise, Quadrant::Review, Quadrant::Eliminate] {
        let members: Vec<&str> = placements
            .iter()
            .filter(|p| p.quadrant == quadrant)
            .map(|p| p.name.as_str())
            .collect();
        let listed = if members.is_empty() {
            "none".to_string()
        } else {
            members.join(", ")
        };
        out.push_str(&format!("- **{:?}**: {}\n", quadrant, listed));
    }

    let balance = posture_balance(bodies);
    out.push_str("\n## Innovation Posture\n\n");
    out.push_str(&format!(
        "Exploit {}, Explore {}, Ambidextrous {}.\n",
        balance.exploit, balance.explore, balance.ambidextrous
    ));
    out.push_str(match balance.assessment {
        PostureAssessment::ExploitWeighted => {
            "Governance is weighted towards exploitation, in line with a cost-reduction focus.\n"
        }
        PostureAssessment::ExploreHeavy => {
            "Exploration outweighs exploitation; check this against cost-reduction goals.\n"
        }
        PostureAssessment::Balanced => "Efficiency and transformation are in reasonable balance.\n",
    });

    let readiness = rogers_readiness(bodies);
    out.push_str("\n## Adoption Readiness\n\n");
    for count in &readiness.categories {
        out.push_str(&format!("- {}: {}\n", count.category, count.count));
    }
    out.push_str(&format!("\nBodies able to pilot reform: {}\n", readiness.early_capacity));

    let tacit = tacit_report(bodies, store.processes());
    out.push_str("\n## Tacit Knowledge\n\n");
    let items: Vec<String> = tacit
        .bodies
        .iter()
        .chain(tacit.processes.iter())
        .map(|t| format!("{} ({})", t.name, t.knowledge))
        .collect();
    bullet_list(&mut out, &items, "No tacit knowledge dependencies recorded.");

    let rag = rag_breakdown(bodies);
    out.push_str("\n## RAG Status\n\n");
    for status in &rag.statuses {
        out.push_str(&format!("- {}: {}\n", status.key, status.count));
    }
    if rag.unrated > 0 {
        out.push_str(&format!("- Not rated: {}\n", rag.unrated));
    }

    let graph = NetworkAnalyzer::cross_reference(bodies);
    let mut centrality = NetworkAnalyzer::degree_centrality(&graph);
    centrality.sort_by(|a, b| b.degree.cmp(&a.degree));
    out.push_str("\n## Stakeholder Network\n\n");
    out.push_str(&format!("{} shared-stakeholder links.\n\n", graph.edges.len()));
    for node in centrality.iter().filter(|c| c.degree > 0).take(5) {
        out.push_str(&format!("- {} (centrality {:.2})\n", node.name, node.centrality));
    }

    out.push_str("\n## Five Forces\n\n");
    for (label, value) in store.five_forces().dimensions() {
        out.push_str(&format!("- {}: {}/5\n", label, value));
    }

    if let Some(notes) = notes_markdown(store, generated) {
        out.push_str("\n---\n\n");
        out.push_str(&notes.replace("\n## ", "\n### ").replacen("# ", "## ", 1));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DiagnosticNotes;
    use crate::registry::{sample, ImportBatch, ImportMode};
    use chrono::TimeZone;

    fn generated() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 9, 30, 0).unwrap()
    }

    fn sample_store() -> GovernanceRecordStore {
        let mut store = GovernanceRecordStore::new();
        store
            .import_bulk(
                ImportBatch {
                    bodies: Some(sample::governance_bodies()),
                    processes: Some(sample::processes()),
                    ..Default::default()
                },
                ImportMode::Replace,
            )
            .unwrap();
        store
    }

    #[test]
    fn test_blank_notes_have_no_document() {
        assert!(notes_markdown(&GovernanceRecordStore::new(), generated()).is_none());
    }

    #[test]
    fn test_notes_document() {
        let mut store = GovernanceRecordStore::new();
        store.set_diagnostic_notes(DiagnosticNotes {
            general_observations: "Too many boards meet weekly".to_string(),
            ..Default::default()
        });
        let text = notes_markdown(&store, generated()).unwrap();
        assert!(text.starts_with("# Process Diagnostic Notes\nGenerated: 2026-03-02 09:30\n"));
        assert!(text.contains("## General Observations\nToo many boards meet weekly"));
        assert!(text.contains("## Commercial Processes"));
    }

    #[test]
    fn test_report_sections() {
        let text = governance_report(&sample_store(), generated());
        assert!(text.contains("| Average efficiency | 3.1"));
        assert!(text.contains("**Commercial Gateway Review Board** (cost High, value 2/5)"));
        assert!(text.contains("- **Eliminate**: Commercial Gateway Review Board"));
        assert!(text.contains("6 shared-stakeholder links."));
    }

    #[test]
    fn test_posture_section_is_written_in_full() {
        let text = governance_report(&sample_store(), generated());
        assert!(text.contains(
            "## Innovation Posture\n\nExploit 2, Explore 3, Ambidextrous 3.\n\
             Exploration outweighs exploitation; check this against cost-reduction goals.\n"
        ));

        let empty = governance_report(&GovernanceRecordStore::new(), generated());
        assert!(empty.contains(
            "Exploit 0, Explore 0, Ambidextrous 0.\n\
             Efficiency and transformation are in reasonable balance.\n"
        ));
        assert!(empty.ends_with('\n'));
    }

    #[test]
    fn test_empty_report_renders_not_available() {
        let text = governance_report(&GovernanceRecordStore::new(), generated());
        assert!(text.contains("| Average efficiency | N/A |"));
        assert!(text.contains("No high-cost, low-value bodies identified."));
    }
}
