use axum::{
    extract::Request,
    http::StatusCode,
    middleware::{self, Next},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use base64::Engine;
use packer_core::{BoxType, Item, PackRequest, PackedBox, Packer, PackerError};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

mod viz;

const OPENAPI_SPEC: &str = include_str!("../../../openapi.yaml");
const SWAGGER_UI_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>Boxpack API Docs</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
        window.onload = () => {
            SwaggerUIBundle({
                url: '/openapi.yaml',
                dom_id: '#swagger-ui',
                presets: [SwaggerUIBundle.presets.apis],
                layout: 'BaseLayout',
            });
        };
    </script>
</body>
</html>"#;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting Box Packing API");

    // Build application
    let app = Router::new()
        .route("/", get(serve_ui))
        .route("/api/health", get(health_check))
        .route("/api/pack", post(pack))
        .route("/api/visualize", post(visualize))
        .route("/openapi.yaml", get(serve_openapi_spec))
        .route("/docs", get(serve_swagger_ui))
        .layer(middleware::from_fn(require_proxy_secret))
        .layer(CorsLayer::permissive());

    // Start server
    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("Failed to bind port");

    info!("API server listening on http://0.0.0.0:{port}");
    info!("Try: curl http://localhost:{port}/api/health");

    axum::serve(listener, app).await.expect("Server error");
}

/// Gate requests on the X-Proxy-Secret header when PACKER_PROXY_SECRET is
/// configured. An unset or empty secret leaves the API open for local
/// development.
async fn require_proxy_secret(request: Request, next: Next) -> Response {
    let expected = std::env::var("PACKER_PROXY_SECRET").unwrap_or_default();
    if expected.is_empty() {
        return next.run(request).await;
    }

    let provided = request
        .headers()
        .get("x-proxy-secret")
        .and_then(|value| value.to_str().ok());

    if provided != Some(expected.as_str()) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Unauthorized: invalid or missing proxy secret",
            })),
        )
            .into_response();
    }

    next.run(request).await
}

/// Health check endpoint
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": "box-packing-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// API response for a pack request: the packing itself plus derived
/// statistics and the rendered 3D visualization.
#[derive(Debug, Serialize)]
struct PackResponse {
    packed_boxes: Vec<PackedBox>,
    unpacked_items: Vec<Item>,
    total_volume: u64,
    utilization_percent: f64,
    visualization_data_uri: String,
    visualization_html: String,
}

/// Main packing endpoint
async fn pack(Json(request): Json<PackRequest>) -> Result<Json<PackResponse>, AppError> {
    if request.items.is_empty() || request.boxes.is_empty() {
        return Err(PackerError::InvalidInput("Items and boxes are required".to_string()).into());
    }

    info!(
        "Received pack request with {} items and {} box types",
        request.items.len(),
        request.boxes.len()
    );

    let boxes = request.boxes.clone();
    let packer = Packer::new(request)?;
    let result = packer.pack()?;

    info!(
        "Packing complete: {} boxes committed, {:.2}% utilization",
        result.packed_boxes.len(),
        result.summary.utilization_percent
    );

    let html = viz::render_html(&result.packed_boxes, &boxes);
    let data_uri = format!(
        "data:text/html;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(html.as_bytes())
    );

    Ok(Json(PackResponse {
        total_volume: result.summary.total_box_volume,
        utilization_percent: result.summary.utilization_percent,
        packed_boxes: result.packed_boxes,
        unpacked_items: result.unpacked_items,
        visualization_data_uri: data_uri,
        visualization_html: html,
    }))
}

#[derive(Debug, Deserialize)]
struct VisualizeRequest {
    packed_boxes: Vec<PackedBox>,
    boxes: Vec<BoxType>,
}

/// Render a standalone 3D visualization page for a previous packing result
async fn visualize(Json(request): Json<VisualizeRequest>) -> Result<Response, AppError> {
    info!(
        "Rendering visualization for {} packed boxes",
        request.packed_boxes.len()
    );

    let html = viz::render_html(&request.packed_boxes, &request.boxes);

    Ok((
        StatusCode::OK,
        [("Content-Type", "text/html; charset=utf-8")],
        html,
    )
        .into_response())
}

/// Application error type
struct AppError(anyhow::Error);

impl From<PackerError> for AppError {
    fn from(err: PackerError) -> Self {
        AppError(err.into())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Request error: {}", self.0);

        let message = self.0.to_string();
        let status = if message.contains("Invalid input") {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        (
            status,
            Json(json!({
                "error": message,
            })),
        )
            .into_response()
    }
}

async fn serve_ui() -> impl IntoResponse {
    // Read the UI file
    match std::fs::read_to_string("web/index.html") {
        Ok(html) => Html(html),
        Err(_) => Html(
            r#"
            <!DOCTYPE html>
            <html>
            <head>
                <title>Box Packing</title>
            </head>
            <body>
                <h1>Box Packing API</h1>
                <p>Web UI file not found. Please ensure web/index.html exists.</p>
                <h2>API Endpoints:</h2>
                <ul>
                    <li>GET /api/health - Health check</li>
                    <li>POST /api/pack - Pack items into boxes</li>
                    <li>POST /api/visualize - Render a 3D visualization</li>
                </ul>
            </body>
            </html>
        "#
            .to_string(),
        ),
    }
}

async fn serve_openapi_spec() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("Content-Type", "application/yaml")],
        OPENAPI_SPEC,
    )
}

async fn serve_swagger_ui() -> impl IntoResponse {
    Html(SWAGGER_UI_HTML)
}
