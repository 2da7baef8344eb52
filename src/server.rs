use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;

use crate::api::{
    AnalyticsRequest, AnalyticsResponse, ChecklistRequest, DraftBuildResponse, GoalRequest, HookRequest,
    HookResponse, PostLogRequest, PromptRequest, ReviewResponse, ScoreRequest, SettingsRequest,
    StudyResponse,
};
use crate::store::StateStore;
use crate::{now_ms, today};
use growth_desk::draft::{build_draft, generate_hook, DraftParts, DraftScore, DraftScorer};
use growth_desk::prompt::PromptPayload;
use growth_desk::review::{assign_study, candidate_benchmarks, focus_tags, RECENT_LOG_LIMIT};
use growth_desk::{AppConfig, DashboardReport, DiagnosticEngine, GoalProjection, ReviewInsights};

#[derive(Clone)]
struct AppState {
    config: Arc<AppConfig>,
    engine: Arc<DiagnosticEngine>,
    store: Arc<StateStore>,
}

type ApiError = (StatusCode, String);

pub async fn serve(config: AppConfig, store: StateStore) -> Result<(), String> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|err| format!("invalid bind address: {}", err))?;

    let state = AppState {
        engine: Arc::new(DiagnosticEngine::new(config.diagnostics.clone())),
        config: Arc::new(config),
        store: Arc::new(store),
    };

    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/dashboard", get(dashboard_handler))
        .route("/api/analytics", post(analytics_handler))
        .route("/api/draft/score", post(score_handler))
        .route("/api/draft/build", post(build_handler))
        .route("/api/hook", post(hook_handler))
        .route("/api/logs", post(add_log_handler))
        .route("/api/review", get(review_handler))
        .route("/api/study", get(study_handler))
        .route("/api/goal", post(goal_handler))
        .route("/api/checklist/:id", put(checklist_handler))
        .route("/api/settings", put(settings_handler))
        .route("/api/prompt", post(prompt_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    tracing::info!(%addr, "serving dashboard api");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|err| format!("failed to bind server: {}", err))?;
    axum::serve(listener, app)
        .await
        .map_err(|err| format!("server error: {}", err))?;

    Ok(())
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

async fn dashboard_handler(State(state): State<AppState>) -> Json<DashboardReport> {
    let snapshot = state.store.snapshot().await;
    Json(snapshot.report(&state.engine))
}

async fn analytics_handler(
    State(state): State<AppState>,
    Json(request): Json<AnalyticsRequest>,
) -> Result<Json<AnalyticsResponse>, ApiError> {
    let csv = request.csv.unwrap_or_default();
    let engine = state.engine.clone();
    let response = state
        .store
        .update(move |dashboard| match dashboard.import_csv(&csv) {
            Some(analysis) => {
                let facts = dashboard.facts();
                let response = AnalyticsResponse {
                    records: analysis.records.len(),
                    diagnostics: engine.report(analysis.kpi.as_ref(), &facts),
                    kpi: analysis.kpi,
                };
                (Some(response), true)
            }
            None => (None, false),
        })
        .await
        .map_err(internal)?;

    response.map(Json).ok_or_else(|| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            "Could not parse CSV. Check export format.".to_string(),
        )
    })
}

async fn score_handler(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Json<DraftScore> {
    let scorer = match request.pillars {
        Some(pillars) => DraftScorer::new(pillars),
        None => state.config.draft.scorer(),
    };
    Json(scorer.score(&request.text.unwrap_or_default()))
}

async fn build_handler(
    State(state): State<AppState>,
    Json(parts): Json<DraftParts>,
) -> Json<DraftBuildResponse> {
    let draft = build_draft(&parts);
    let score = state.config.draft.scorer().score(&draft);
    Json(DraftBuildResponse { draft, score })
}

async fn hook_handler(Json(request): Json<HookRequest>) -> Result<Json<HookResponse>, ApiError> {
    let (style, objective) = request.parse().map_err(bad_request)?;
    let hook = generate_hook(style, objective, &mut rand::thread_rng());
    Ok(Json(HookResponse { hook }))
}

async fn add_log_handler(
    State(state): State<AppState>,
    Json(request): Json<PostLogRequest>,
) -> Result<StatusCode, ApiError> {
    let entry = request.into_entry(today(), now_ms()).map_err(bad_request)?;
    state
        .store
        .update(move |dashboard| {
            let result = dashboard.add_post_log(entry);
            let changed = result.is_ok();
            (result, changed)
        })
        .await
        .map_err(internal)?
        .map_err(|reason| bad_request(reason.to_string()))?;
    Ok(StatusCode::CREATED)
}

async fn review_handler(State(state): State<AppState>) -> Json<ReviewResponse> {
    let snapshot = state.store.snapshot().await;
    let insights = ReviewInsights::from_entries(snapshot.post_logs.entries());
    Json(ReviewResponse {
        lines: insights.lines(),
        insights,
        recent: snapshot
            .post_logs
            .recent(RECENT_LOG_LIMIT)
            .into_iter()
            .cloned()
            .collect(),
    })
}

async fn study_handler(State(state): State<AppState>) -> Json<StudyResponse> {
    let snapshot = state.store.snapshot().await;
    let kpi = snapshot.analysis().kpi;
    let thresholds = state.engine.thresholds();
    let pool = candidate_benchmarks(kpi.as_ref(), thresholds);
    let assignments = assign_study(&pool, state.config.study.sample_size, &mut rand::thread_rng());
    Json(StudyResponse {
        focus_tags: focus_tags(kpi.as_ref(), thresholds)
            .map(|tags| tags.iter().map(|tag| tag.to_string()).collect()),
        assignments,
    })
}

async fn goal_handler(
    State(state): State<AppState>,
    Json(request): Json<GoalRequest>,
) -> Result<Json<GoalProjection>, ApiError> {
    let input = request
        .into_input(&state.config.goal, today())
        .map_err(bad_request)?;
    let snapshot = state.store.snapshot().await;
    Ok(Json(snapshot.goal(&input, &state.config)))
}

async fn checklist_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ChecklistRequest>,
) -> Result<StatusCode, ApiError> {
    let known = state
        .store
        .update(move |dashboard| {
            let known = dashboard.checklist.set(&id, request.checked);
            (known, known)
        })
        .await
        .map_err(internal)?;
    if known {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((StatusCode::NOT_FOUND, "unknown checklist task".to_string()))
    }
}

async fn settings_handler(
    State(state): State<AppState>,
    Json(request): Json<SettingsRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .store
        .update(move |dashboard| {
            if let Some(objective) = request.objective {
                dashboard.objective = objective;
            }
            if let Some(voice_rules) = request.voice_rules {
                dashboard.voice_rules = voice_rules;
            }
            if let Some(intel_notes) = request.intel_notes {
                dashboard.intel_notes = intel_notes;
            }
            ((), true)
        })
        .await
        .map_err(internal)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn prompt_handler(
    State(state): State<AppState>,
    Json(request): Json<PromptRequest>,
) -> Result<Json<PromptPayload>, ApiError> {
    let mode = request.mode().map_err(bad_request)?;
    let snapshot = state.store.snapshot().await;
    let payload = snapshot.prompt(
        mode,
        request.draft.as_deref().unwrap_or_default(),
        request.signal.as_deref().unwrap_or_default(),
        &state.config,
    );
    Ok(Json(payload))
}

fn bad_request(message: String) -> ApiError {
    (StatusCode::BAD_REQUEST, message)
}

fn internal(message: String) -> ApiError {
    tracing::error!(error = %message, "state store failure");
    (StatusCode::INTERNAL_SERVER_ERROR, message)
}
