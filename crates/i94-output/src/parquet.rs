//! Relation writer.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::{DataFrame, ParquetWriter};
use tracing::debug;

use i94_common::any_to_string;
use i94_core::Relation;

/// Directory name for a null partition value, matching the convention
/// Spark and Hive readers expect.
pub const HIVE_NULL_PARTITION: &str = "__HIVE_DEFAULT_PARTITION__";

/// Writes one relation under `out_root`, replacing any previous output
/// for the same relation.
///
/// Unpartitioned relations become a single `part-00000.parquet`;
/// partitioned relations get one `col=value` directory per key
/// combination, with the partition columns dropped from the written
/// files (hive layout). Returns the relation's destination directory.
pub fn write_relation(df: &DataFrame, out_root: &Path, relation: Relation) -> Result<PathBuf> {
    let dest = out_root.join(relation.name());
    if dest.exists() {
        fs::remove_dir_all(&dest)
            .with_context(|| format!("clear previous output at {}", dest.display()))?;
    }
    fs::create_dir_all(&dest)
        .with_context(|| format!("create output directory {}", dest.display()))?;

    let partition_columns = relation.partition_columns();
    if partition_columns.is_empty() {
        write_part_file(df.clone(), &dest)?;
    } else {
        let parts = df
            .partition_by(partition_columns.to_vec(), true)
            .with_context(|| format!("partition {} for writing", relation.name()))?;
        for part in parts {
            let mut dir = dest.clone();
            for name in partition_columns {
                dir.push(format!("{name}={}", partition_value(&part, name)?));
            }
            fs::create_dir_all(&dir)
                .with_context(|| format!("create partition directory {}", dir.display()))?;
            write_part_file(part.drop_many(partition_columns.iter().copied()), &dir)?;
        }
    }

    debug!(
        relation = relation.name(),
        rows = df.height(),
        dest = %dest.display(),
        "relation written"
    );
    Ok(dest)
}

/// Renders a partition key value from the (single-valued) column of a
/// partition frame.
fn partition_value(part: &DataFrame, column: &str) -> Result<String> {
    let value = part
        .column(column)
        .with_context(|| format!("partition column {column} missing"))?
        .get(0)?;
    let rendered = any_to_string(&value);
    Ok(if rendered.is_empty() {
        HIVE_NULL_PARTITION.to_string()
    } else {
        rendered
    })
}

fn write_part_file(mut df: DataFrame, dir: &Path) -> Result<()> {
    let path = dir.join("part-00000.parquet");
    let file = fs::File::create(&path)
        .with_context(|| format!("create part file {}", path.display()))?;
    ParquetWriter::new(file)
        .finish(&mut df)
        .with_context(|| format!("write part file {}", path.display()))?;
    Ok(())
}
