//! Diagnostic sinks for the enablement audit
//!
//! The audit pass only ever needs two operations: report a warning, and close a
//! group of warnings with a separator. [`DiagnosticSink`] captures exactly that,
//! so callers can route diagnostics to `tracing`, to a terminal, or into memory
//! for tests.

use std::io::Write;
use std::sync::Mutex;

use tracing::{debug, warn};

/// Receiver for non-fatal validation diagnostics
///
/// Implementations must be safe to share between threads, since a single sink
/// may serve concurrent validation calls.
pub trait DiagnosticSink: Send + Sync {
    /// Report a single warning
    fn warning(&self, message: &str);

    /// Close a group of warnings
    fn separator(&self);
}

/// Sink that forwards diagnostics to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn warning(&self, message: &str) {
        warn!(target: "hookcfg::audit", "{}", message);
    }

    fn separator(&self) {
        debug!(target: "hookcfg::audit", "end of configuration warnings");
    }
}

/// A single call recorded by [`MemorySink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    Warning(String),
    Separator,
}

/// Sink that records every call in order
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<SinkEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded calls, in the order they were made
    pub fn events(&self) -> Vec<SinkEvent> {
        self.lock().clone()
    }

    /// Recorded warning messages, in order
    pub fn warnings(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|event| match event {
                SinkEvent::Warning(message) => Some(message.clone()),
                SinkEvent::Separator => None,
            })
            .collect()
    }

    pub fn separator_count(&self) -> usize {
        self.lock()
            .iter()
            .filter(|event| matches!(event, SinkEvent::Separator))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<SinkEvent>> {
        // A poisoned lock still holds every event recorded before the panic
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn push(&self, event: SinkEvent) {
        self.lock().push(event);
    }
}

impl DiagnosticSink for MemorySink {
    fn warning(&self, message: &str) {
        self.push(SinkEvent::Warning(message.to_string()));
    }

    fn separator(&self) {
        self.push(SinkEvent::Separator);
    }
}

/// Sink that writes human-readable lines to any writer
///
/// Warnings are written as `warning: <message>` and the separator as an empty
/// line. Write failures are logged and otherwise ignored.
#[derive(Debug)]
pub struct WriterSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_line(&self, line: &str) {
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
            warn!(error = %e, "Failed to write configuration diagnostic");
        }
    }
}

impl<W: Write + Send> DiagnosticSink for WriterSink<W> {
    fn warning(&self, message: &str) {
        self.write_line(&format!("warning: {}", message));
    }

    fn separator(&self) {
        self.write_line("");
    }
}
