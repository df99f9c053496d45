// src/output.rs
//! Delimited-text sink for a time grid followed by trajectories
//!
//! One record per sequence: the grid first, then one line per trajectory.
//! By default every value is followed by a comma, so a 3-point grid with
//! `dt = 0.5` reads `0,0.5,1,`.

use crate::error::{SdeError, SdeResult};
use bitflags::bitflags;
use std::fs::File;
use std::io::Write;
use std::path::Path;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CsvLayout: u32 {
        const NONE               = 0;
        /// Terminate each record with a delimiter (`a,b,c,`)
        const TRAILING_DELIMITER = 1 << 0;
        /// Prefix each record with a label column (`t`, `path_0`, ...)
        const ROW_LABELS         = 1 << 1;
    }
}

impl Default for CsvLayout {
    fn default() -> Self {
        CsvLayout::TRAILING_DELIMITER
    }
}

/// Destination for one run's output.
pub trait TrajectorySink {
    fn write_time_grid(&mut self, times: &[f64]) -> SdeResult<()>;
    fn write_trajectory(&mut self, index: usize, values: &[f64]) -> SdeResult<()>;
    fn finish(&mut self) -> SdeResult<()>;
}

pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    layout: CsvLayout,
    target: String,
}

impl CsvSink<File> {
    pub fn create<P: AsRef<Path>>(path: P, layout: CsvLayout) -> SdeResult<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| output_error(&path.display().to_string(), e))?;
        Ok(Self::with_target(file, layout, path.display().to_string()))
    }
}

impl<W: Write> CsvSink<W> {
    pub fn new(writer: W, layout: CsvLayout) -> Self {
        Self::with_target(writer, layout, "<writer>".to_string())
    }

    fn with_target(writer: W, layout: CsvLayout, target: String) -> Self {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_writer(writer);
        CsvSink {
            writer,
            layout,
            target,
        }
    }

    pub fn into_inner(self) -> SdeResult<W> {
        let target = self.target;
        self.writer
            .into_inner()
            .map_err(|e| output_error(&target, e.into_error()))
    }

    fn write_row(&mut self, label: String, values: &[f64]) -> SdeResult<()> {
        let mut record = csv::StringRecord::with_capacity(values.len() * 8, values.len() + 2);
        if self.layout.contains(CsvLayout::ROW_LABELS) {
            record.push_field(&label);
        }
        for value in values {
            record.push_field(&value.to_string());
        }
        if self.layout.contains(CsvLayout::TRAILING_DELIMITER) && !record.is_empty() {
            record.push_field("");
        }

        self.writer
            .write_record(&record)
            .map_err(|e| output_error(&self.target, e))
    }
}

impl<W: Write> TrajectorySink for CsvSink<W> {
    fn write_time_grid(&mut self, times: &[f64]) -> SdeResult<()> {
        self.write_row("t".to_string(), times)
    }

    fn write_trajectory(&mut self, index: usize, values: &[f64]) -> SdeResult<()> {
        self.write_row(format!("path_{}", index), values)
    }

    fn finish(&mut self) -> SdeResult<()> {
        self.writer
            .flush()
            .map_err(|e| output_error(&self.target, e))
    }
}

fn output_error<E: std::fmt::Display>(target: &str, e: E) -> SdeError {
    SdeError::OutputError {
        path: target.to_string(),
        reason: e.to_string(),
    }
}

pub fn write_summary_to_csv<P: AsRef<Path>>(
    filename: P,
    summary_data: &[(&str, String)],
) -> SdeResult<()> {
    let path = filename.as_ref();
    let target = path.display().to_string();

    let write = || -> csv::Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(["key", "value"])?;
        for (key, value) in summary_data {
            writer.write_record([*key, value.as_str()])?;
        }
        writer.flush()?;
        Ok(())
    };
    write().map_err(|e| output_error(&target, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(layout: CsvLayout) -> String {
        let mut sink = CsvSink::new(Vec::new(), layout);
        sink.write_time_grid(&[0.0, 0.5, 1.0]).unwrap();
        sink.write_trajectory(0, &[0.0, 0.25, -1.5]).unwrap();
        sink.write_trajectory(1, &[0.0, 2.0, 3.0]).unwrap();
        sink.finish().unwrap();
        String::from_utf8(sink.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_default_layout_has_trailing_delimiter() {
        assert_eq!(
            render(CsvLayout::default()),
            "0,0.5,1,\n0,0.25,-1.5,\n0,2,3,\n"
        );
    }

    #[test]
    fn test_plain_layout() {
        assert_eq!(render(CsvLayout::NONE), "0,0.5,1\n0,0.25,-1.5\n0,2,3\n");
    }

    #[test]
    fn test_row_labels() {
        assert_eq!(
            render(CsvLayout::ROW_LABELS),
            "t,0,0.5,1\npath_0,0,0.25,-1.5\npath_1,0,2,3\n"
        );
    }

    #[test]
    fn test_summary_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.csv");

        write_summary_to_csv(&path, &[("model", "OU".to_string()), ("trajectories", "3".to_string())])
            .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "key,value\nmodel,OU\ntrajectories,3\n");
    }

    #[test]
    fn test_summary_quotes_delimiters() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.csv");

        write_summary_to_csv(&path, &[("output", "runs/a,b.csv".to_string())]).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "key,value\noutput,\"runs/a,b.csv\"\n");

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(&record[1], "runs/a,b.csv");
    }

    #[test]
    fn test_create_reports_path_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");

        match CsvSink::create(&path, CsvLayout::default()) {
            Err(SdeError::OutputError { path: p, .. }) => assert!(p.contains("out.csv")),
            Err(other) => panic!("expected OutputError, got {:?}", other),
            Ok(_) => panic!("expected OutputError"),
        }
    }
}
