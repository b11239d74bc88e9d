use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::errors::SinkError;
use crate::reporting::StatisticsSink;
use crate::statistics::Snapshot;

/// Placeholder replaced by the replicate index in a path template.
pub const REPLICATE_PLACEHOLDER: &str = "{rep}";

/// Output format of a [`DelimitedFileSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// `generation,replicate,statistic,value` rows.
    Csv,
    /// One JSON object per line.
    JsonLines,
}

impl FileFormat {
    /// Pick the format from the file extension (`.jsonl`/`.json` -> JSON
    /// lines, anything else -> CSV).
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("jsonl") | Some("json") => Self::JsonLines,
            _ => Self::Csv,
        }
    }
}

#[derive(Serialize)]
struct Row<'a> {
    generation: usize,
    replicate: usize,
    statistic: &'a str,
    value: Option<f64>,
}

/// Writes every sampled statistic to disk.
///
/// If the path template contains `{rep}`, each replicate gets its own file
/// (`drift_{rep}.csv` -> `drift_0.csv`, `drift_1.csv`, ...); otherwise all
/// replicates share one file. Undefined values are written as `NA` (CSV) or
/// `null` (JSON).
pub struct DelimitedFileSink {
    template: String,
    format: FileFormat,
    writers: BTreeMap<usize, BufWriter<File>>,
}

impl DelimitedFileSink {
    pub fn new(template: impl Into<String>) -> Self {
        let template = template.into();
        let format = FileFormat::from_path(Path::new(&template));
        Self {
            template,
            format,
            writers: BTreeMap::new(),
        }
    }

    fn per_replicate(&self) -> bool {
        self.template.contains(REPLICATE_PLACEHOLDER)
    }

    /// Path written for `replicate`.
    pub fn path_for(&self, replicate: usize) -> PathBuf {
        PathBuf::from(
            self.template
                .replace(REPLICATE_PLACEHOLDER, &replicate.to_string()),
        )
    }

    fn writer(&mut self, replicate: usize) -> Result<&mut BufWriter<File>, SinkError> {
        let key = if self.per_replicate() { replicate } else { 0 };
        if !self.writers.contains_key(&key) {
            let mut writer = BufWriter::new(File::create(self.path_for(key))?);
            if self.format == FileFormat::Csv {
                writeln!(writer, "generation,replicate,statistic,value")?;
            }
            self.writers.insert(key, writer);
        }
        self.writers
            .get_mut(&key)
            .ok_or_else(|| SinkError::Reported(format!("no writer for replicate {key}")))
    }

    fn write_row(&mut self, row: &Row<'_>) -> Result<(), SinkError> {
        let format = self.format;
        let writer = self.writer(row.replicate)?;
        match format {
            FileFormat::Csv => {
                let value = row.value.map_or_else(|| "NA".to_string(), |v| v.to_string());
                writeln!(
                    writer,
                    "{},{},{},{value}",
                    row.generation, row.replicate, row.statistic
                )?;
            }
            FileFormat::JsonLines => {
                let line = serde_json::to_string(row)
                    .map_err(|e| SinkError::Reported(format!("JSON encoding failed: {e}")))?;
                writeln!(writer, "{line}")?;
            }
        }
        Ok(())
    }
}

impl StatisticsSink for DelimitedFileSink {
    fn name(&self) -> &str {
        "file"
    }

    fn receive(
        &mut self,
        generation: usize,
        replicate: usize,
        snapshot: &Snapshot,
    ) -> Result<(), SinkError> {
        for (statistic, value) in snapshot.iter() {
            self.write_row(&Row {
                generation,
                replicate,
                statistic,
                value: Some(value),
            })?;
        }
        for statistic in snapshot.undefined() {
            self.write_row(&Row {
                generation,
                replicate,
                statistic,
                value: None,
            })?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        for writer in self.writers.values_mut() {
            writer.flush()?;
        }
        Ok(())
    }
}
