//! Per-job summary statistics and their export formats.
//!
//! The engine produces the numbers; everything about presentation (the
//! console table, CSV, JSON lines) lives here and in the binary.

use std::io;

use serde::Serialize;

/// Final statistics for one completed job.
#[derive(Debug, Clone, Serialize)]
pub struct JobSummaryRow {
    pub job_id: u32,
    pub arrival_time: f64,
    pub end_time: f64,
    pub processor_period: f64,
    /// Turnaround: completion minus arrival.
    pub turnaround: f64,
    /// Turnaround divided by accumulated processor time.
    pub wait_ratio: f64,
}

/// End-of-run summary: one row per completed job, plus the ids of jobs
/// that never completed (still queued, or cut off by the horizon).
#[derive(Debug, Clone)]
pub struct RunReport {
    pub rows: Vec<JobSummaryRow>,
    pub unfinished: Vec<u32>,
    pub avg_turnaround: f64,
    pub avg_wait_ratio: f64,
}

impl RunReport {
    pub fn new(rows: Vec<JobSummaryRow>, unfinished: Vec<u32>) -> Self {
        let completed = rows.len() as f64;
        let (avg_turnaround, avg_wait_ratio) = if rows.is_empty() {
            (0.0, 0.0)
        } else {
            (
                rows.iter().map(|row| row.turnaround).sum::<f64>() / completed,
                rows.iter().map(|row| row.wait_ratio).sum::<f64>() / completed,
            )
        };
        Self {
            rows,
            unfinished,
            avg_turnaround,
            avg_wait_ratio,
        }
    }

    /// The human-readable job summary table.
    pub fn render_table(&self) -> String {
        let mut out = String::from("*** JOB SUMMARY ***\n\n");
        out.push_str("Job ID\tArrival Time\tEnd Time\tProcessor Period\tT\tW\n");
        for row in &self.rows {
            out.push_str(&format!(
                "{}\t{}\t\t{}\t\t{}\t\t\t{}\t{:.2}\n",
                row.job_id,
                row.arrival_time,
                row.end_time,
                row.processor_period,
                row.turnaround,
                row.wait_ratio
            ));
        }
        out.push_str(&format!(
            "\nTavg = {}\tWavg = {:.2}\n",
            self.avg_turnaround, self.avg_wait_ratio
        ));
        if !self.unfinished.is_empty() {
            out.push_str(&format!("Unfinished jobs: {:?}\n", self.unfinished));
        }
        out
    }

    /// Writes one CSV record per completed job, with a header row.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> csv::Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for row in &self.rows {
            csv_writer.serialize(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Writes one JSON object per completed job, newline-delimited.
    pub fn write_jsonl<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        for row in &self.rows {
            let line = serde_json::to_string(row)?;
            writeln!(writer, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rows() -> Vec<JobSummaryRow> {
        vec![
            JobSummaryRow {
                job_id: 1,
                arrival_time: 0.0,
                end_time: 120.0,
                processor_period: 100.0,
                turnaround: 120.0,
                wait_ratio: 1.2,
            },
            JobSummaryRow {
                job_id: 2,
                arrival_time: 10.0,
                end_time: 250.0,
                processor_period: 80.0,
                turnaround: 240.0,
                wait_ratio: 3.0,
            },
        ]
    }

    #[test]
    fn averages_over_completed_jobs() {
        let report = RunReport::new(sample_rows(), vec![3]);
        assert_eq!(report.avg_turnaround, 180.0);
        assert!((report.avg_wait_ratio - 2.1).abs() < 1e-9);
        assert_eq!(report.unfinished, [3]);
    }

    #[test]
    fn empty_report_has_zero_averages() {
        let report = RunReport::new(Vec::new(), Vec::new());
        assert_eq!(report.avg_turnaround, 0.0);
        assert_eq!(report.avg_wait_ratio, 0.0);
    }

    #[test]
    fn csv_has_header_and_one_record_per_job() {
        let report = RunReport::new(sample_rows(), Vec::new());
        let mut buffer = Vec::new();
        report.write_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("job_id,arrival_time,end_time"));
        assert!(lines[1].starts_with("1,"));
    }

    #[test]
    fn jsonl_is_one_object_per_line() {
        let report = RunReport::new(sample_rows(), Vec::new());
        let mut buffer = Vec::new();
        report.write_jsonl(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text.lines().count(), 2);
        let parsed: serde_json::Value = serde_json::from_str(text.lines().next().unwrap()).unwrap();
        assert_eq!(parsed["job_id"], 1);
        assert_eq!(parsed["turnaround"], 120.0);
    }
}
