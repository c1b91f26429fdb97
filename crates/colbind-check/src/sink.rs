use std::sync::{Arc, Mutex, PoisonError};

use crate::errors::{Diagnostic, Severity, ValidationReport};

/// Channel diagnostics are reported through.
///
/// An `Error` diagnostic fails the enclosing check; a `Warning` does not.
pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for ValidationReport {
    fn emit(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => self.push_error(diagnostic),
            Severity::Warning => self.push_warning(diagnostic),
        }
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn emit(&mut self, diagnostic: Diagnostic) {
        (**self).emit(diagnostic);
    }
}

/// Fan-in from validation runs on several threads.
impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Arc<Mutex<S>> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        let mut inner = self.lock().unwrap_or_else(PoisonError::into_inner);
        inner.emit(diagnostic);
    }
}

/// Counts diagnostics by severity on their way to another sink.
pub struct CountingSink<'s> {
    inner: &'s mut dyn DiagnosticSink,
    errors: usize,
    warnings: usize,
}

impl<'s> CountingSink<'s> {
    pub fn new(inner: &'s mut dyn DiagnosticSink) -> Self {
        Self {
            inner,
            errors: 0,
            warnings: 0,
        }
    }

    pub fn errors(&self) -> usize {
        self.errors
    }

    pub fn warnings(&self) -> usize {
        self.warnings
    }
}

impl DiagnosticSink for CountingSink<'_> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => self.errors += 1,
            Severity::Warning => self.warnings += 1,
        }
        self.inner.emit(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    fn diagnostic(severity: Severity, code: &str) -> Diagnostic {
        Diagnostic::new(severity, code, "a.Person", "message", None)
    }

    #[test]
    fn report_splits_by_severity() {
        let mut report = ValidationReport::default();
        report.emit(diagnostic(Severity::Error, "e"));
        report.emit(diagnostic(Severity::Warning, "w"));

        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.warnings.len(), 1);
        assert!(!report.is_ok());
    }

    #[test]
    fn counting_sink_forwards_everything() {
        let mut report = ValidationReport::default();
        let mut counting = CountingSink::new(&mut report);
        counting.emit(diagnostic(Severity::Warning, "w1"));
        counting.emit(diagnostic(Severity::Warning, "w2"));
        counting.emit(diagnostic(Severity::Error, "e"));
        assert_eq!(counting.errors(), 1);
        assert_eq!(counting.warnings(), 2);

        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.warnings.len(), 2);
    }

    #[test]
    fn shared_sink_accepts_writes_from_many_threads() {
        let shared = Arc::new(Mutex::new(ValidationReport::default()));

        let handles: Vec<_> = (0..4)
            .map(|idx| {
                let mut sink = Arc::clone(&shared);
                thread::spawn(move || {
                    sink.emit(diagnostic(Severity::Warning, &format!("w{idx}")));
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("worker panicked");
        }

        let report = shared.lock().expect("lock report");
        assert_eq!(report.warnings.len(), 4);
    }
}
