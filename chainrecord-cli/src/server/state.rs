use std::sync::Arc;
use std::time::Instant;

use chainrecord_lib::dispatch::{self, Surface};
use chainrecord_lib::{Result, Store};
use tokio::sync::Mutex;

use super::metrics::metrics;

/// Shared application state for the HTTP server.
pub struct AppState {
    /// Ledger state every invocation reads and writes.
    pub store: Arc<dyn Store>,
    /// Held for the whole of a mutating invocation, so a marketer's
    /// existence check and its write are never interleaved with another
    /// writer.
    pub write_gate: Mutex<()>,
    /// Storage backend name reported by /health.
    pub backend: &'static str,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, backend: &'static str) -> Self {
        Self {
            store,
            write_gate: Mutex::new(()),
            backend,
        }
    }

    /// Run one invocation to completion, recording metrics.
    pub async fn run(&self, surface: Surface, function: &str, args: &[String]) -> Result<Vec<u8>> {
        let start = Instant::now();
        let result = match surface {
            Surface::Invoke => {
                let _gate = self.write_gate.lock().await;
                dispatch::invoke(self.store.as_ref(), function, args)
            }
            Surface::Query => dispatch::query(self.store.as_ref(), function, args),
        };

        // Unknown names are folded into one label to keep cardinality bounded.
        let label = if surface.operations().iter().any(|op| *op == function) {
            function
        } else {
            "unknown"
        };
        let outcome = match &result {
            Ok(_) => "ok",
            Err(e) => e.kind(),
        };
        let m = metrics();
        m.invocations_total
            .with_label_values(&[surface.as_str(), label, outcome])
            .inc();
        m.invocation_duration
            .with_label_values(&[surface.as_str(), label])
            .observe(start.elapsed().as_secs_f64());

        result
    }

    /// Deploy-time seed, serialised with other writers.
    pub async fn deploy(&self, args: &[String]) -> Result<Vec<u8>> {
        let _gate = self.write_gate.lock().await;
        dispatch::deploy(self.store.as_ref(), args)
    }
}
