use axum::{
  extract::{DefaultBodyLimit, MatchedPath, Request},
  middleware::{self, Next},
  response::IntoResponse,
  routing::{get, post},
  Router,
};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::future::ready;
use tokio::signal;
use tokio::time::{Duration, Instant};
use tower_http::{
  catch_panic::CatchPanicLayer,
  timeout::TimeoutLayer,
  trace::{self, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use crate::config::Config;
use crate::pipeline::{Params, Selection};

mod augment_images;
mod error;
mod index;

#[derive(OpenApi)]
#[openapi(
  paths(augment_images::augment_images),
  components(schemas(Selection)),
  info(
    title = "Rusty Augment API",
    version = "0.1.0",
    description = "Image augmentation service that bundles transformed copies of uploaded images into a ZIP archive"
  )
)]
struct ApiDoc;

#[derive(Clone)]
struct AppState {
  params: Params,
  seed: Option<u64>,
}

pub fn bootstrap(cfg: &Config) -> Router {
  // App state
  let state = AppState {
    params: cfg.augment.clone(),
    seed: cfg.app.seed,
  };

  // Routing
  let mut app = Router::new()
    .route("/", get(index::form))
    .route(
      "/api/v1/augment",
      post(augment_images::augment_images)
        .layer(DefaultBodyLimit::max(cfg.app.max_body_size_mb * 1000 * 1000)),
    )
    .with_state(state);

  // Conditionally add OpenAPI routes if enabled
  if cfg.app.enable_openapi.unwrap_or(false) {
    app = app
      .merge(Redoc::with_url(
        "/redoc",
        serde_json::to_value(ApiDoc::openapi()).unwrap(),
      ))
      .route(
        "/api-docs/openapi.json",
        get(|| async { axum::Json(ApiDoc::openapi()) }),
      );
  }

  app.layer((
    middleware::from_fn(track_metrics),
    TraceLayer::new_for_http()
      .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
      .on_response(trace::DefaultOnResponse::new().level(Level::INFO)),
    TimeoutLayer::new(Duration::from_secs(60)),
    CatchPanicLayer::new(),
  ))
}

pub async fn serve(router: Router, listen: &str) {
  // Start HTTP server
  let listener = tokio::net::TcpListener::bind(listen)
    .await
    .expect("failed to bind to address");
  axum::serve(listener, router)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .expect("error running HTTP server");
}

async fn healthz() -> &'static str {
  "pong"
}

async fn shutdown_signal() {
  let ctrl_c = async {
    signal::ctrl_c()
      .await
      .expect("failed to install Ctrl+C handler");
  };

  #[cfg(unix)]
  let terminate = async {
    signal::unix::signal(signal::unix::SignalKind::terminate())
      .expect("failed to install signal handler")
      .recv()
      .await;
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
      _ = ctrl_c => {},
      _ = terminate => {},
  }
}

pub async fn serve_metrics(listen: &str) {
  let app = metrics_app();

  let listener = tokio::net::TcpListener::bind(listen)
    .await
    .expect("failed to bind to address");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .expect("error running metrics HTTP server");
}

fn metrics_app() -> Router {
  let recorder_handle = setup_metrics_recorder();
  Router::new()
    .route("/metrics", get(move || ready(recorder_handle.render())))
    .route("/healthz", get(healthz))
}

fn setup_metrics_recorder() -> PrometheusHandle {
  const EXPONENTIAL_SECONDS: &[f64] = &[
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
  ];

  PrometheusBuilder::new()
    .set_buckets_for_metric(
      Matcher::Full("http_requests_duration_seconds".to_string()),
      EXPONENTIAL_SECONDS,
    )
    .unwrap()
    .install_recorder()
    .unwrap()
}

async fn track_metrics(req: Request, next: Next) -> impl IntoResponse {
  let start = Instant::now();
  let path = if let Some(matched_path) = req.extensions().get::<MatchedPath>() {
    matched_path.as_str().to_owned()
  } else {
    req.uri().path().to_owned()
  };
  let method = req.method().clone();

  let response = next.run(req).await;

  let latency = start.elapsed().as_secs_f64();
  let status = response.status().as_u16().to_string();

  let labels = [
    ("method", method.to_string()),
    ("path", path),
    ("status", status),
  ];

  metrics::counter!("http_requests_total", &labels).increment(1);
  metrics::histogram!("http_requests_duration_seconds", &labels).record(latency);

  response
}
