//! Shared logging utilities for consistent tracing across processes
//!
//! Events are written to stdout through `tracing-subscriber`. When a trace
//! endpoint is configured, events tagged with a `process` field (everything
//! emitted through the `process_*!` macros) are also batched and POSTed as JSON.

use crate::types::ProcessId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;

/// Where and how often trace batches are shipped
#[derive(Debug, Clone)]
pub struct TracingEndpoint {
    pub url: String,
    pub batch_size: usize,
    pub flush_interval: Duration,
}

impl TracingEndpoint {
    pub fn new(url: String) -> Self {
        Self {
            url,
            batch_size: 5,
            flush_interval: Duration::from_millis(500),
        }
    }
}

/// One event as POSTed to the trace sink
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TraceEvent {
    pub timestamp: DateTime<Utc>,
    pub level: String,
    pub target: String,
    pub message: String,
    pub process: String,
    pub fields: HashMap<String, serde_json::Value>,
}

/// Layer that forwards process-tagged events to the trace sink
pub struct HttpTracingLayer {
    sender: mpsc::UnboundedSender<TraceEvent>,
}

impl HttpTracingLayer {
    /// Must be called from inside a tokio runtime; the batching task is spawned on it.
    pub fn new(endpoint: TracingEndpoint) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<TraceEvent>();

        tokio::spawn(async move {
            let client = reqwest::Client::new();
            let mut buffer = Vec::with_capacity(endpoint.batch_size);
            let mut flush_timer = tokio::time::interval(endpoint.flush_interval);

            loop {
                tokio::select! {
                    event = rx.recv() => {
                        match event {
                            Some(event) => {
                                buffer.push(event);
                                if buffer.len() >= endpoint.batch_size {
                                    Self::send_batch(&client, &endpoint.url, &mut buffer).await;
                                }
                            }
                            None => {
                                if !buffer.is_empty() {
                                    Self::send_batch(&client, &endpoint.url, &mut buffer).await;
                                }
                                break;
                            }
                        }
                    }

                    _ = flush_timer.tick() => {
                        if !buffer.is_empty() {
                            Self::send_batch(&client, &endpoint.url, &mut buffer).await;
                        }
                    }
                }
            }
        });

        HttpTracingLayer { sender: tx }
    }

    async fn send_batch(client: &reqwest::Client, endpoint_url: &str, buffer: &mut Vec<TraceEvent>) {
        let batch = std::mem::take(buffer);

        // Never log through tracing here, it would feed back into this layer.
        match client.post(endpoint_url).json(&batch).send().await {
            Ok(response) if !response.status().is_success() => {
                eprintln!("❌ Failed to send trace batch: HTTP {}", response.status());
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("❌ Failed to send trace batch: {e}");
            }
        }
    }
}

impl<S> tracing_subscriber::Layer<S> for HttpTracingLayer
where
    S: Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut fields = HashMap::new();
        let mut message = String::new();

        event.record(&mut TraceVisitor {
            message: &mut message,
            fields: &mut fields,
        });

        if !fields.contains_key("process") {
            return;
        }

        let trace_event = TraceEvent {
            timestamp: Utc::now(),
            level: metadata.level().to_string(),
            target: metadata.target().to_string(),
            message,
            process: ProcessId::current().to_string(),
            fields,
        };

        let _ = self.sender.send(trace_event);
    }
}

/// Collects the message and structured fields of one event
struct TraceVisitor<'a> {
    message: &'a mut String,
    fields: &'a mut HashMap<String, serde_json::Value>,
}

impl TraceVisitor<'_> {
    fn store(&mut self, field: &tracing::field::Field, value: serde_json::Value) {
        match (field.name(), value) {
            ("message", serde_json::Value::String(text)) => self.message.push_str(&text),
            (name, value) => {
                self.fields.insert(name.to_string(), value);
            }
        }
    }
}

impl tracing::field::Visit for TraceVisitor<'_> {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.store(field, format!("{value:?}").into());
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.store(field, value.into());
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.store(field, value.into());
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.store(field, value.into());
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.store(field, value.into());
    }
}

/// Per-process `EnvFilter` directive string
pub fn filter_directives(process_id: &ProcessId, base_level: &str) -> String {
    match process_id {
        ProcessId::WebServer => {
            format!("webserver={base_level},shared={base_level},tower_http=debug,axum={base_level}")
        }
        ProcessId::Test => base_level.to_string(),
    }
}

/// Initialize the global subscriber.
///
/// Events always go to stdout; with an endpoint they are also shipped over
/// HTTP in batches. Must run inside a tokio runtime when `endpoint` is set.
pub fn init_tracing_with_endpoint_and_level(endpoint: Option<TracingEndpoint>, log_level: Option<&str>) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let directives = filter_directives(ProcessId::current(), log_level.unwrap_or("info"));
    println!("📊 Log level: {directives}");

    if let Some(endpoint) = &endpoint {
        println!("📡 Tracing endpoint configured: {}", endpoint.url);
    }

    let fmt_layer = fmt::layer()
        .with_target(endpoint.is_some())
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact();

    tracing_subscriber::registry()
        .with(EnvFilter::new(&directives))
        .with(endpoint.map(HttpTracingLayer::new))
        .with(fmt_layer)
        .init();
}

/// Wall-clock time of day attached to every process event
pub fn format_timestamp() -> String {
    Utc::now().format("%H:%M:%S%.3f").to_string()
}

/// Emit a tracing event at `$level` tagged with the process id and timestamp.
///
/// The `process` field is what routes an event to the HTTP trace sink.
#[macro_export]
macro_rules! process_log {
    ($level:ident, $process_id:expr, $($arg:tt)*) => {
        tracing::$level!(
            process = %$process_id,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        )
    };
}

#[macro_export]
macro_rules! process_info {
    ($process_id:expr, $($arg:tt)*) => { $crate::process_log!(info, $process_id, $($arg)*) };
}

#[macro_export]
macro_rules! process_warn {
    ($process_id:expr, $($arg:tt)*) => { $crate::process_log!(warn, $process_id, $($arg)*) };
}

#[macro_export]
macro_rules! process_error {
    ($process_id:expr, $($arg:tt)*) => { $crate::process_log!(error, $process_id, $($arg)*) };
}

#[macro_export]
macro_rules! process_debug {
    ($process_id:expr, $($arg:tt)*) => { $crate::process_log!(debug, $process_id, $($arg)*) };
}

pub fn log_startup(process_id: &ProcessId, details: &str) {
    crate::process_info!(process_id, "🚀 Starting {}", details);
}

pub fn log_shutdown(process_id: &ProcessId, reason: &str) {
    crate::process_info!(process_id, "🛑 Shutting down: {}", reason);
}

pub fn log_error(process_id: &ProcessId, context: &str, error: &dyn std::fmt::Display) {
    crate::process_error!(process_id, error = %error, "❌ {} failed", context);
}

pub fn log_success(process_id: &ProcessId, message: &str) {
    crate::process_info!(process_id, "✅ {}", message);
}
