use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value as JsonValue;

/// Callback type for [`DiagnosticSink::Custom`].
pub type SinkFn = Arc<dyn Fn(&JsonValue) + Send + Sync>;

/// Where diagnostic values go: executed SQL text, and the outcome of
/// statements nobody is awaiting.
///
/// Picked once when the store is opened.
#[derive(Clone, Default)]
pub enum DiagnosticSink {
    /// Drop everything.
    #[default]
    Silent,
    /// Emit a `tracing` debug event on target `syncopate::sink`.
    Console,
    /// Hand every value to a caller-supplied callback.
    Custom(SinkFn),
}

impl DiagnosticSink {
    pub fn custom<F>(callback: F) -> Self
    where
        F: Fn(&JsonValue) + Send + Sync + 'static,
    {
        DiagnosticSink::Custom(Arc::new(callback))
    }

    #[must_use]
    pub fn is_silent(&self) -> bool {
        matches!(self, DiagnosticSink::Silent)
    }

    /// Serialize `value` and pass it on. Never fails; a value that cannot be
    /// serialized is reported through `tracing` instead.
    pub fn emit<T: Serialize + ?Sized>(&self, value: &T) {
        if self.is_silent() {
            return;
        }
        let json = match serde_json::to_value(value) {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!("diagnostic value could not be serialized: {err}");
                return;
            }
        };
        match self {
            DiagnosticSink::Silent => {}
            DiagnosticSink::Console => match &json {
                JsonValue::String(text) => tracing::debug!(target: "syncopate::sink", "{text}"),
                other => tracing::debug!(target: "syncopate::sink", "{other}"),
            },
            DiagnosticSink::Custom(callback) => callback(&json),
        }
    }
}

impl fmt::Debug for DiagnosticSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSink::Silent => f.write_str("Silent"),
            DiagnosticSink::Console => f.write_str("Console"),
            DiagnosticSink::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn custom_sink_receives_json() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let captured = Arc::clone(&seen);
        let sink = DiagnosticSink::custom(move |value| captured.lock().unwrap().push(value.clone()));

        sink.emit("SELECT 1");
        sink.emit(&vec![1, 2]);

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0], JsonValue::String("SELECT 1".into()));
        assert_eq!(seen[1], serde_json::json!([1, 2]));
    }

    #[test]
    fn silent_is_default() {
        assert!(DiagnosticSink::default().is_silent());
        DiagnosticSink::Silent.emit("ignored");
        DiagnosticSink::Console.emit("goes to tracing");
    }
}
