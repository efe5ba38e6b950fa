// Car Management
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Prometheus metrics for HTTP services.

use crate::rest::RestResult;
use axum::extract::{MatchedPath, Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use prometheus_client::encoding::EncodeLabelSet;
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::metrics::histogram::Histogram;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Content type of the metrics exposition.
const METRICS_CONTENT_TYPE: &str = "application/openmetrics-text; version=1.0.0; charset=utf-8";

/// Bucket boundaries, in seconds, for the request duration histogram.
const DURATION_BUCKETS: [f64; 6] = [0.1, 0.3, 0.5, 0.7, 0.9, 1.0];

/// Labels attached to the request and status counters.
#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
struct StatusLabels {
    /// Route template that served the request, or the raw path if none matched.
    path: String,

    /// HTTP method of the request.
    method: String,

    /// Numeric status code of the response.
    status_code: String,
}

/// Labels attached to the duration histogram.
#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
struct RouteLabels {
    /// Route template that served the request, or the raw path if none matched.
    path: String,

    /// HTTP method of the request.
    method: String,
}

/// Collection of the HTTP metrics of a service.
///
/// Clones share the same underlying counters, so this can be handed to the router as state.
#[derive(Clone)]
pub struct HttpMetrics {
    /// Registry holding all metrics below, used for encoding.
    registry: Arc<Registry>,

    /// Number of handled requests.
    requests: Family<StatusLabels, Counter>,

    /// Number of responses by status code.
    statuses: Family<StatusLabels, Counter>,

    /// Latency of handled requests.
    durations: Family<RouteLabels, Histogram>,
}

impl Default for HttpMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpMetrics {
    /// Creates a new set of metrics registered in a fresh registry.
    pub fn new() -> Self {
        let mut registry = Registry::default();

        let requests = Family::<StatusLabels, Counter>::default();
        registry.register("http_requests", "Number of HTTP requests", requests.clone());

        let statuses = Family::<StatusLabels, Counter>::default();
        registry.register(
            "http_response_status",
            "Status of HTTP responses",
            statuses.clone(),
        );

        let durations = Family::<RouteLabels, Histogram>::new_with_constructor(|| {
            Histogram::new(DURATION_BUCKETS.into_iter())
        });
        registry.register(
            "http_request_duration_seconds",
            "Duration of HTTP requests",
            durations.clone(),
        );

        Self { registry: Arc::new(registry), requests, statuses, durations }
    }

    /// Records the outcome of a request to `path` with `method` that finished with `status`
    /// after `elapsed` time.
    pub fn record(&self, path: &str, method: &str, status: StatusCode, elapsed: Duration) {
        let labels = StatusLabels {
            path: path.to_owned(),
            method: method.to_owned(),
            status_code: status.as_u16().to_string(),
        };
        self.requests.get_or_create(&labels).inc();
        self.statuses.get_or_create(&labels).inc();

        let labels = RouteLabels { path: path.to_owned(), method: method.to_owned() };
        self.durations.get_or_create(&labels).observe(elapsed.as_secs_f64());
    }

    /// Renders all metrics in the text exposition format.
    pub fn encode(&self) -> RestResult<String> {
        let mut buffer = String::new();
        prometheus_client::encoding::text::encode(&mut buffer, &self.registry)?;
        Ok(buffer)
    }
}

/// Middleware that records the method, route, status and latency of every request.
///
/// Install with `route_layer` so that the matched route template is available.  Requests that
/// did not match a route are labelled with their raw path.
pub async fn track_metrics(
    State(metrics): State<HttpMetrics>,
    request: Request,
    next: Next,
) -> Response {
    let path = match request.extensions().get::<MatchedPath>() {
        Some(path) => path.as_str().to_owned(),
        None => request.uri().path().to_owned(),
    };
    let method = request.method().to_string();

    let start = Instant::now();
    let response = next.run(request).await;
    metrics.record(&path, &method, response.status(), start.elapsed());
    response
}

/// GET handler that exposes the metrics for scraping.
pub async fn metrics_handler(State(metrics): State<HttpMetrics>) -> RestResult<impl IntoResponse> {
    let body = metrics.encode()?;
    Ok(([(header::CONTENT_TYPE, METRICS_CONTENT_TYPE)], body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::body::Body;
    use axum::middleware;
    use axum::routing::get;
    use tower::util::ServiceExt;

    /// Builds a router with a parameterized route and the metrics endpoint, all tracked.
    fn app(metrics: HttpMetrics) -> Router {
        Router::new()
            .route("/items/:id", get(|| async { StatusCode::NO_CONTENT }))
            .route("/metrics", get(metrics_handler))
            .route_layer(middleware::from_fn_with_state(metrics.clone(), track_metrics))
            .with_state(metrics)
    }

    /// Sends a GET request to `uri` and returns the response status and body.
    async fn get_uri(app: Router, uri: &str) -> (StatusCode, String) {
        let request = axum::http::Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    /// Finds the value of the duration bucket with bound `le` for `path` in the encoded `text`.
    fn bucket_count<'a>(text: &'a str, path: &str, le: &str) -> Option<&'a str> {
        let path = format!("path=\"{}\"", path);
        let le = format!("le=\"{}\"", le);
        text.lines()
            .filter(|line| line.starts_with("http_request_duration_seconds_bucket{"))
            .find(|line| line.contains(&path) && line.contains(&le))
            .and_then(|line| line.rsplit(' ').next())
    }

    #[test]
    fn test_record_and_encode() {
        let metrics = HttpMetrics::new();
        metrics.record("/cars", "GET", StatusCode::OK, Duration::from_millis(200));
        metrics.record("/cars", "GET", StatusCode::OK, Duration::from_millis(50));

        let text = metrics.encode().unwrap();
        assert!(text.contains(
            "http_requests_total{path=\"/cars\",method=\"GET\",status_code=\"200\"} 2"
        ));
        assert!(text.contains(
            "http_response_status_total{path=\"/cars\",method=\"GET\",status_code=\"200\"} 2"
        ));
        assert_eq!(Some("1"), bucket_count(&text, "/cars", "0.1"));
        assert_eq!(Some("2"), bucket_count(&text, "/cars", "0.3"));
    }

    #[tokio::test]
    async fn test_track_metrics_uses_route_template() {
        let metrics = HttpMetrics::new();

        let (status, _) = get_uri(app(metrics.clone()), "/items/1234").await;
        assert_eq!(StatusCode::NO_CONTENT, status);
        let (status, _) = get_uri(app(metrics.clone()), "/items/5678").await;
        assert_eq!(StatusCode::NO_CONTENT, status);

        let text = metrics.encode().unwrap();
        assert!(text.contains(
            "http_requests_total{path=\"/items/:id\",method=\"GET\",status_code=\"204\"} 2"
        ));
        assert!(!text.contains("/items/1234"));
    }

    #[tokio::test]
    async fn test_metrics_handler() {
        let metrics = HttpMetrics::new();
        metrics.record("/engines", "POST", StatusCode::CREATED, Duration::from_millis(1));

        let (status, body) = get_uri(app(metrics), "/metrics").await;
        assert_eq!(StatusCode::OK, status);
        assert!(body.contains(
            "http_requests_total{path=\"/engines\",method=\"POST\",status_code=\"201\"} 1"
        ));
        assert!(body.contains("# EOF"));
    }
}
