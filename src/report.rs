// 📊 Migration Report - counters, warnings, elapsed time

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::reconcile::CreationCounters;
use crate::stages::Stage;

// ============================================================================
// WARNINGS (soft misses)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MigrationWarning {
    pub stage: Stage,
    /// Source id of the record that lost an attribute or association
    pub source_id: String,
    pub message: String,
}

// ============================================================================
// REPORT
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationReport {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub duration_ms: i64,
    pub stages_completed: Vec<Stage>,
    pub counters: CreationCounters,
    pub warnings: Vec<MigrationWarning>,
}

impl MigrationReport {
    pub fn empty() -> Self {
        let now = Utc::now();
        MigrationReport {
            run_id: uuid::Uuid::new_v4().to_string(),
            started_at: now,
            completed_at: now,
            duration_ms: 0,
            stages_completed: Vec::new(),
            counters: CreationCounters::new(),
            warnings: Vec::new(),
        }
    }

    pub fn total_created(&self) -> u64 {
        self.counters.total()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} stages, {} records created, {} warnings in {:.2}s",
            self.stages_completed.len(),
            self.total_created(),
            self.warnings.len(),
            self.duration_ms as f64 / 1000.0
        )
    }

    /// Counter listing sorted by entity-kind name, then elapsed time
    pub fn render(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "Created records:");
        for (kind, count) in self.counters.sorted() {
            let _ = writeln!(out, "  {:<28} {:>6}", kind, count);
        }

        if !self.warnings.is_empty() {
            let _ = writeln!(out, "Warnings: {}", self.warnings.len());
        }
        let _ = writeln!(out, "Elapsed: {:.2}s", self.duration_ms as f64 / 1000.0);

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::EntityKind;

    #[test]
    fn test_render_sorted_listing() {
        let mut report = MigrationReport::empty();
        report.counters.increment(EntityKind::Tender);
        report.counters.increment(EntityKind::Department);
        report.duration_ms = 1500;

        let text = report.render();
        let department = text.find("Department").unwrap();
        let tender = text.find("Tender").unwrap();

        assert!(department < tender);
        assert!(text.contains("Elapsed: 1.50s"));
    }

    #[test]
    fn test_render_empty_report_lists_zero_counters() {
        let report = MigrationReport::empty();
        let text = report.render();

        let menu_button = text.lines().find(|l| l.trim_start().starts_with("MenuButton")).unwrap();
        assert!(menu_button.trim_end().ends_with(" 0"));
        assert_eq!(report.total_created(), 0);
    }

    #[test]
    fn test_summary() {
        let mut report = MigrationReport::empty();
        report.stages_completed.push(Stage::Store);
        report.warnings.push(MigrationWarning {
            stage: Stage::Items,
            source_id: "i1".to_string(),
            message: "no department".to_string(),
        });

        assert_eq!(report.summary(), "1 stages, 0 records created, 1 warnings in 0.00s");
    }
}
