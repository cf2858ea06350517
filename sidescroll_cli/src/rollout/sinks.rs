// src/rollout/sinks.rs
#![forbid(unsafe_code)]

/// One periodic row emitted by the runner.
///
/// Transport struct: runner/stats compute fields, sinks only format/emit.
#[derive(Clone, Debug)]
pub struct ReportRow {
    pub step: u64,
    pub frame: usize,
    pub frames_total: usize,

    pub sps: f64,

    pub x: u32,
    pub max_x: u32,

    pub action: &'static str,
    pub rule: &'static str,

    pub anti_stall: u64,
    pub unrecognized: u64,
    pub agent_missing: u64,
}

/// Sink interface for periodic reporting.
pub trait StepSink {
    fn on_report_row(&mut self, row: &ReportRow, pb: Option<&indicatif::ProgressBar>);
}

/// Default sink: does nothing.
#[derive(Default)]
pub struct NoopSink;

impl StepSink for NoopSink {
    fn on_report_row(&mut self, _row: &ReportRow, _pb: Option<&indicatif::ProgressBar>) {}
}

/// Human-readable periodic table sink.
///
/// Cadence (every N steps) is handled by Runner. The column header is printed
/// before the first row and again every `header_every` rows (0 = only once).
pub struct TableSink {
    header: String,
    underline: String,
    header_every: u64,
    rows_printed: u64,
}

impl TableSink {
    pub fn new(header_every: u64) -> Self {
        let header = Self::header_line();
        Self {
            underline: "-".repeat(header.len()),
            header,
            header_every,
            rows_printed: 0,
        }
    }

    // Widths must line up with row_line().
    fn header_line() -> String {
        format!(
            "{:>8} {:>15} {:>9} {:>7} {:>7} {:>15} {:>13} {:>6} {:>6} {:>6}",
            "step",
            "frame/total",
            "sps",
            "x",
            "max_x",
            "action",
            "rule",
            "stall",
            "unk",
            "miss",
        )
    }

    fn row_line(&self, r: &ReportRow) -> String {
        format!(
            "{:>8} {:>7}/{:<7} {:>9.1} {:>7} {:>7} {:>15} {:>13} {:>6} {:>6} {:>6}",
            r.step,
            r.frame,
            r.frames_total,
            r.sps,
            r.x,
            r.max_x,
            r.action,
            r.rule,
            r.anti_stall,
            r.unrecognized,
            r.agent_missing,
        )
    }

    fn lines_for(&mut self, row: &ReportRow) -> Vec<String> {
        let header_due = match (self.rows_printed, self.header_every) {
            (0, _) => true,
            (_, 0) => false,
            (n, every) => n % every == 0,
        };
        self.rows_printed += 1;

        let mut lines = Vec::with_capacity(3);
        if header_due {
            lines.push(self.header.clone());
            lines.push(self.underline.clone());
        }
        lines.push(self.row_line(row));
        lines
    }
}

impl StepSink for TableSink {
    fn on_report_row(&mut self, row: &ReportRow, pb: Option<&indicatif::ProgressBar>) {
        let lines = self.lines_for(row);
        match pb {
            Some(pb) => lines.into_iter().for_each(|l| pb.println(l)),
            None => lines.into_iter().for_each(|l| println!("{l}")),
        }
    }
}
