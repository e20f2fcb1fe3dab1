use std::io;

use crate::{
    outcome::CaseStatus,
    reporter::{FmtCaseOutcome, FmtRunOutcomes, FmtRunStart, RunReporter},
};

/// A compact reporter writing one character per case.
///
/// `.` passed, `-` no records, `F` failed, `E` exception. Bad cases are listed
/// with their problem records after the run, followed by a one line summary.
#[derive(Debug)]
pub struct TerseReporter<W: io::Write> {
    target: W,
    progress: usize,
    total: usize,
}

impl Default for TerseReporter<io::Stdout> {
    fn default() -> Self {
        Self {
            target: io::stdout(),
            progress: 0,
            total: 0,
        }
    }
}

impl<W: io::Write> TerseReporter<W> {
    pub fn with_target<WithTarget: io::Write>(
        self,
        with_target: WithTarget,
    ) -> TerseReporter<WithTarget> {
        TerseReporter {
            target: with_target,
            progress: self.progress,
            total: self.total,
        }
    }

    pub fn target(&self) -> &W {
        &self.target
    }

    pub fn into_target(self) -> W {
        self.target
    }
}

impl<W: io::Write> RunReporter for TerseReporter<W> {
    type Error = io::Error;

    fn fmt_run_start(&mut self, data: FmtRunStart<'_>) -> Result<(), Self::Error> {
        self.progress = 0;
        self.total = data.cases;
        match data.cases {
            1 => writeln!(self.target, "\nrunning 1 case of {}", data.title),
            count => writeln!(self.target, "\nrunning {count} cases of {}", data.title),
        }
    }

    fn fmt_case_outcome(&mut self, data: FmtCaseOutcome<'_>) -> Result<(), Self::Error> {
        self.progress += 1;
        let mark = match data.outcome.status() {
            CaseStatus::Empty => '-',
            CaseStatus::Passed => '.',
            CaseStatus::Failed => 'F',
            CaseStatus::Errored => 'E',
        };
        write!(self.target, "{mark}")?;
        if self.progress % 80 == 0 && self.progress < self.total {
            writeln!(self.target, " {}/{}", self.progress, self.total)?;
        }
        Ok(())
    }

    fn fmt_run_outcomes(
        &mut self,
        FmtRunOutcomes {
            title: _,
            stats,
            filters: _,
            duration,
        }: FmtRunOutcomes<'_>,
    ) -> Result<(), Self::Error> {
        writeln!(self.target)?;

        if !stats.errors.is_empty() {
            writeln!(self.target)?;
            writeln!(self.target, "problems:")?;
            for record in &stats.errors {
                let kind = record.kind.map(|kind| kind.bucket()).unwrap_or_default();
                write!(self.target, "    {kind}")?;
                if let Some(file) = &record.file {
                    write!(self.target, " at {file}")?;
                    if let Some(line) = record.line {
                        write!(self.target, ":{line}")?;
                    }
                }
                match &record.message {
                    Some(message) => writeln!(self.target, ": {message}")?,
                    None => writeln!(self.target)?,
                }
            }
        }

        writeln!(self.target)?;
        let verdict = match stats.is_success() {
            true => "ok",
            false => "FAILED",
        };
        writeln!(
            self.target,
            "test result: {verdict}. {} asserts; {} passes; {} fails; {} exceptions; finished in {:.2}s",
            stats.asserts,
            stats.passes.len(),
            stats.fails.len(),
            stats.exceptions.len(),
            duration.as_secs_f64()
        )
    }
}
