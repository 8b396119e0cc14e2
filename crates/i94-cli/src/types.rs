//! Result types shared between the pipeline and the summary printer.

use std::path::PathBuf;

use i94_core::Relation;

/// Outcome of a full pipeline run.
#[derive(Debug)]
pub struct RunResult {
    pub output_dir: PathBuf,
    pub dry_run: bool,
    pub relations: Vec<RelationSummary>,
}

/// Per-relation outcome.
#[derive(Debug)]
pub struct RelationSummary {
    pub relation: Relation,
    pub rows: usize,
    /// Written location; `None` on a dry run.
    pub path: Option<PathBuf>,
}

impl RelationSummary {
    /// Human-readable partitioning scheme for the summary table.
    pub fn partitioning(&self) -> String {
        let columns = self.relation.partition_columns();
        if columns.is_empty() {
            "-".to_string()
        } else {
            columns.join(", ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partitioning_renders_columns_or_dash() {
        let partitioned = RelationSummary {
            relation: Relation::CalendarDim,
            rows: 0,
            path: None,
        };
        assert_eq!(partitioned.partitioning(), "year, month, week");

        let flat = RelationSummary {
            relation: Relation::CountryDim,
            rows: 0,
            path: None,
        };
        assert_eq!(flat.partitioning(), "-");
    }
}
