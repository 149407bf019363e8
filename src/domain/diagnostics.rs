//! Per-symbol fetch outcomes collected during a run.
//!
//! Surfaced at the bottom of the HTML page when enabled; never affects the
//! computed tables.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    Info,
    Warn,
    Error,
}

impl Outcome {
    fn tag(self) -> &'static str {
        match self {
            Outcome::Ok => "[OK]",
            Outcome::Info => "[INFO]",
            Outcome::Warn => "[WARN]",
            Outcome::Error => "[ERR]",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticEntry {
    pub outcome: Outcome,
    pub symbol: String,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<DiagnosticEntry>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: Outcome, symbol: &str, message: impl Into<String>) {
        self.entries.push(DiagnosticEntry {
            outcome,
            symbol: symbol.to_string(),
            message: message.into(),
        });
    }

    pub fn ok(&mut self, symbol: &str, message: impl Into<String>) {
        self.record(Outcome::Ok, symbol, message);
    }

    pub fn info(&mut self, symbol: &str, message: impl Into<String>) {
        self.record(Outcome::Info, symbol, message);
    }

    pub fn warn(&mut self, symbol: &str, message: impl Into<String>) {
        self.record(Outcome::Warn, symbol, message);
    }

    pub fn error(&mut self, symbol: &str, message: impl Into<String>) {
        self.record(Outcome::Error, symbol, message);
    }

    pub fn entries(&self) -> &[DiagnosticEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of symbols that ended without a usable close.
    pub fn failures(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, Outcome::Warn | Outcome::Error))
            .count()
    }

    /// One `[TAG] SYMBOL: message` line per entry, in recording order.
    pub fn lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| format!("{} {}: {}", e.outcome.tag(), e.symbol, e.message))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_keep_recording_order() {
        let mut diag = Diagnostics::new();
        diag.ok("SPY", "last=1, prev=2");
        diag.error("QQQ", "timeout");
        assert_eq!(
            diag.lines(),
            vec!["[OK] SPY: last=1, prev=2", "[ERR] QQQ: timeout"]
        );
    }

    #[test]
    fn failures_count_warn_and_error_only() {
        let mut diag = Diagnostics::new();
        diag.ok("A", "");
        diag.info("B", "");
        diag.warn("C", "");
        diag.error("D", "");
        assert_eq!(diag.failures(), 2);
        assert_eq!(diag.len(), 4);
        assert!(!diag.is_empty());
    }
}
