use crate::config::SinkKind;
use fnfilter_core::{DataUnit, FilterError};
use std::{
    io::Write,
    sync::{Arc, Mutex},
};

/// A report about a supplied function that failed while filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub unit: DataUnit,
    pub message: String,
    /// The error together with its chain of causes, and a backtrace when one was captured.
    pub trace: String,
}

impl Diagnostic {
    pub fn new(unit: DataUnit, error: &anyhow::Error) -> Diagnostic {
        Diagnostic {
            unit,
            message: format!(
                "Unable to filter {} with a supplied function! The exception was: {}",
                unit, error
            ),
            trace: format!("{:?}", error),
        }
    }
}

pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: &Diagnostic);
}

#[derive(Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        tracing::error!("{}", diagnostic.message);
        tracing::error!("{}", diagnostic.trace);
    }
}

#[derive(Debug, Default)]
pub struct StderrSink;

impl DiagnosticSink for StderrSink {
    fn report(&self, diagnostic: &Diagnostic) {
        let stderr = std::io::stderr();
        let mut handle = stderr.lock();
        // Nothing sensible is left to report a failing stderr to.
        let _ = writeln!(handle, "{}\n{}", diagnostic.message, diagnostic.trace);
    }
}

/// Keeps every diagnostic it receives.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    diagnostics: Arc<Mutex<Vec<Diagnostic>>>,
}

impl MemorySink {
    pub fn new() -> MemorySink {
        MemorySink::default()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        match self.diagnostics.lock() {
            Ok(diagnostics) => diagnostics.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl DiagnosticSink for MemorySink {
    fn report(&self, diagnostic: &Diagnostic) {
        match self.diagnostics.lock() {
            Ok(mut diagnostics) => diagnostics.push(diagnostic.clone()),
            Err(poisoned) => poisoned.into_inner().push(diagnostic.clone()),
        }
    }
}

pub fn sink_for(kind: SinkKind) -> Arc<dyn DiagnosticSink> {
    match kind {
        SinkKind::Tracing => Arc::new(TracingSink),
        SinkKind::Stderr => Arc::new(StderrSink),
    }
}

/// Reports a failure of a supplied function and turns it into the error handed
/// back to the host.
pub(crate) fn surface(
    sink: &dyn DiagnosticSink,
    unit: DataUnit,
    source: anyhow::Error,
) -> FilterError {
    sink.report(&Diagnostic::new(unit, &source));
    FilterError::Transformation { unit, source }
}
