use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::{header::CONTENT_TYPE, HeaderValue, Method, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::{any::Any, net::SocketAddr, sync::Arc};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::info;

use crate::api::{
    ApiEnvelope, ApiGenerateRequest, ApiPredictRequest, ApiTrendRequest, HealthResponse,
    TopicsQuery,
};
use crate::config::{ServerConfig, ServiceConfig};
use crate::error::AppError;
use crate::generation::{GenerationAdapter, GenerationParams, GenerationResult, TextProvider};
use crate::llm::{LlmClient, ProviderError};
use crate::sentiment::LexiconSentiment;
use crate::trends::{TrendAnalyzer, TrendReport, TrendingTopic};
use crate::{ScoringEngine, ViralityResult};

const DEFAULT_TOPIC_LIMIT: usize = 10;

#[derive(Clone)]
pub struct AppState {
    pub scoring: Arc<ScoringEngine>,
    pub generator: Arc<GenerationAdapter>,
    pub trends: Arc<TrendAnalyzer>,
}

impl AppState {
    /// Wires the engines from configuration. Without an API key generation
    /// always answers with the fallback payload.
    pub fn from_config(
        config: &ServiceConfig,
        api_key: Option<String>,
    ) -> Result<Self, ProviderError> {
        let provider: Option<Arc<dyn TextProvider>> = match api_key {
            Some(key) => {
                let client = LlmClient::new(&config.provider, key)?;
                info!("text provider configured (model: {})", client.model());
                let client: Arc<dyn TextProvider> = Arc::new(client);
                Some(client)
            }
            None => {
                info!("no LLM_API_KEY set; content generation will use fallback text");
                None
            }
        };

        let estimator = Arc::new(LexiconSentiment::new(config.sentiment.max_chars));
        Ok(Self {
            scoring: Arc::new(ScoringEngine::new(estimator)),
            generator: Arc::new(GenerationAdapter::new(
                provider,
                GenerationParams::from(&config.provider),
            )),
            trends: Arc::new(TrendAnalyzer::new(&config.trends)),
        })
    }
}

pub fn build_router(state: AppState, config: &ServerConfig) -> Result<Router, String> {
    let router = Router::new()
        .route("/health", get(health))
        .route("/api/predict", post(predict_handler))
        .route("/api/predict/virality", post(predict_handler))
        .route("/api/generate", post(generate_handler))
        .route("/api/trends/analyze", post(trends_handler))
        .route("/api/trends/topics", get(topics_handler))
        .with_state(state);

    let router = match config.web_root.as_deref() {
        Some(web_root) => {
            let index_path = format!("{}/index.html", web_root.trim_end_matches('/'));
            router.fallback_service(
                ServeDir::new(web_root).not_found_service(ServeFile::new(index_path)),
            )
        }
        None => router.fallback(not_found),
    };

    Ok(router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config)?))
}

pub async fn serve(config: ServiceConfig, api_key: Option<String>) -> Result<(), String> {
    let state = AppState::from_config(&config, api_key).map_err(|err| err.to_string())?;
    let app = build_router(state, &config.server)?;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|err| format!("invalid bind address: {}", err))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|err| format!("failed to bind server: {}", err))?;
    info!("listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|err| format!("server error: {}", err))
}

fn cors_layer(config: &ServerConfig) -> Result<CorsLayer, String> {
    match config.cors_origin.as_deref() {
        Some(origin) => {
            let origin: HeaderValue = origin
                .parse()
                .map_err(|err| format!("invalid CORS origin {}: {}", origin, err))?;
            Ok(CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([CONTENT_TYPE])
                .allow_credentials(true))
        }
        None => Ok(CorsLayer::permissive()),
    }
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "TrendLens AI",
    })
}

async fn predict_handler(
    State(state): State<AppState>,
    payload: Result<Json<ApiPredictRequest>, JsonRejection>,
) -> Result<Json<ApiEnvelope<ViralityResult>>, AppError> {
    let Json(request) = payload?;
    let sample = request.into_sample()?;
    Ok(Json(ApiEnvelope::ok(state.scoring.score(&sample))))
}

async fn generate_handler(
    State(state): State<AppState>,
    payload: Result<Json<ApiGenerateRequest>, JsonRejection>,
) -> Result<Json<ApiEnvelope<GenerationResult>>, AppError> {
    let Json(request) = payload?;
    let request = request.into_request()?;
    let result = state.generator.generate(&request).await;
    Ok(Json(ApiEnvelope::ok(result)))
}

async fn trends_handler(
    State(state): State<AppState>,
    payload: Result<Json<ApiTrendRequest>, JsonRejection>,
) -> Result<Json<ApiEnvelope<TrendReport>>, AppError> {
    let Json(request) = payload?;
    let report = state
        .trends
        .analyze_keywords(&request.keywords, request.platform(), request.timeframe())
        .await?;
    Ok(Json(ApiEnvelope::ok(report)))
}

async fn topics_handler(
    State(state): State<AppState>,
    query: Result<Query<TopicsQuery>, QueryRejection>,
) -> Result<Json<ApiEnvelope<Vec<TrendingTopic>>>, AppError> {
    let Query(query) = query?;
    let topics = state
        .trends
        .trending_topics(query.limit.unwrap_or(DEFAULT_TOPIC_LIMIT))
        .await?;
    Ok(Json(ApiEnvelope::ok(topics)))
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| err.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_else(|| "handler panicked".to_string());
    AppError::Internal(detail).into_response()
}
