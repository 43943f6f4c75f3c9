#![forbid(unsafe_code)]

use super::ReportSink;
use crate::domain::ProcessReport;
use crate::error::Error;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::io::{self, Stdout, Write};

/// Human readable rendering, one line per process.
#[derive(Debug)]
pub struct ConsoleSink<W> {
    out: Mutex<W>,
}

impl ConsoleSink<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    fn render(out: &mut W, reports: &[ProcessReport]) -> io::Result<()> {
        writeln!(out, "Process Info:")?;
        for report in reports {
            writeln!(out, "{report}")?;
        }
        out.flush()
    }
}

#[async_trait]
impl<W: Write + Send> ReportSink for ConsoleSink<W> {
    fn name(&self) -> &'static str {
        "console"
    }

    async fn publish(&self, reports: &[ProcessReport]) -> Result<(), Error> {
        let mut out = self.out.lock();
        Self::render(&mut *out, reports).map_err(Error::Console)
    }
}
