use std::sync::OnceLock;
use std::time::Instant;

use axum::extract::MatchedPath;
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGaugeVec, Opts, Registry, TextEncoder,
};

/// Global metrics registry
static REGISTRY: OnceLock<Registry> = OnceLock::new();

/// All application metrics
pub struct Metrics {
    // Ledger invocations
    pub invocations_total: IntCounterVec,
    pub invocation_duration: HistogramVec,

    // Storage
    pub storage_backend: IntGaugeVec,

    // HTTP request metrics
    pub http_requests_total: IntCounterVec,
    pub http_request_duration: HistogramVec,
}

static METRICS: OnceLock<Metrics> = OnceLock::new();

impl Metrics {
    fn new(registry: &Registry) -> Self {
        // ── Ledger invocation metrics ────────────────────────────────
        let invocations_total = IntCounterVec::new(
            Opts::new(
                "chainrecord_invocations_total",
                "Total number of ledger invocations",
            ),
            &["surface", "function", "outcome"],
        )
        .expect("failed to create invocations_total metric");

        let invocation_duration = HistogramVec::new(
            HistogramOpts::new(
                "chainrecord_invocation_duration_seconds",
                "Duration of ledger invocations including store access",
            )
            .buckets(vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1]),
            &["surface", "function"],
        )
        .expect("failed to create invocation_duration metric");

        // ── Storage metrics ──────────────────────────────────────────
        let storage_backend = IntGaugeVec::new(
            Opts::new("chainrecord_storage_backend", "Storage backend type (1=active)"),
            &["type"],
        )
        .expect("failed to create storage_backend metric");

        // ── HTTP request metrics ──────────────────────────────────────
        let http_requests_total = IntCounterVec::new(
            Opts::new("chainrecord_http_requests_total", "Total number of HTTP requests"),
            &["method", "path", "status"],
        )
        .expect("failed to create http_requests_total metric");

        let http_request_duration = HistogramVec::new(
            HistogramOpts::new(
                "chainrecord_http_request_duration_seconds",
                "HTTP request duration in seconds",
            )
            .buckets(vec![0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]),
            &["method", "path"],
        )
        .expect("failed to create http_request_duration metric");

        registry.register(Box::new(invocations_total.clone())).expect("register invocations_total");
        registry.register(Box::new(invocation_duration.clone())).expect("register invocation_duration");
        registry.register(Box::new(storage_backend.clone())).expect("register storage_backend");
        registry.register(Box::new(http_requests_total.clone())).expect("register http_requests_total");
        registry.register(Box::new(http_request_duration.clone())).expect("register http_request_duration");

        Self {
            invocations_total,
            invocation_duration,
            storage_backend,
            http_requests_total,
            http_request_duration,
        }
    }
}

/// Get the global metrics instance, initializing on first call
pub fn metrics() -> &'static Metrics {
    METRICS.get_or_init(|| {
        let registry = REGISTRY.get_or_init(Registry::new);
        Metrics::new(registry)
    })
}

/// Axum handler for GET /metrics, Prometheus text format
pub async fn handle_metrics() -> Response {
    // Ensure all metric collectors are registered on first call.
    let _ = metrics();
    let registry = REGISTRY.get_or_init(Registry::new);
    let encoder = TextEncoder::new();
    let metric_families = registry.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
    }
    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        buffer,
    )
        .into_response()
}

/// Axum middleware that records HTTP request count and duration.
pub async fn track_metrics(request: Request<axum::body::Body>, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let start = Instant::now();
    let response = next.run(request).await;
    let elapsed = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    let m = metrics();
    m.http_requests_total
        .with_label_values(&[&method, &path, &status])
        .inc();
    m.http_request_duration
        .with_label_values(&[&method, &path])
        .observe(elapsed);

    response
}
