//! Search form and JSON API.
//!
//! - `GET  /`            search form; `?q=` submits a query
//! - `POST /api/v1/ask`  `{"query": "..."}` answered with a tagged reply

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use stylist_agent::{AssistantReply, ShopAssistant};
use tera::{Context, Tera};
use tracing::{info_span, warn, Instrument};
use uuid::Uuid;

#[derive(Clone)]
pub struct SearchState {
    assistant: Arc<ShopAssistant>,
    templates: Arc<Tera>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchPageQuery {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub correlation_id: String,
    #[serde(flatten)]
    pub reply: AssistantReply,
}

fn init_templates() -> Arc<Tera> {
    let mut tera = match Tera::new("templates/search/**/*") {
        Ok(tera) => tera,
        Err(e) => {
            warn!(error = %e, "failed to load search templates from filesystem, using embedded copy");
            Tera::default()
        }
    };

    if tera.get_template_names().all(|name| name != "index.html") {
        tera.add_raw_template("index.html", include_str!("../../../templates/search/index.html"))
            .ok();
    }

    Arc::new(tera)
}

pub fn router(assistant: ShopAssistant) -> Router {
    Router::new()
        .route("/", get(search_page))
        .route("/api/v1/ask", post(ask))
        .with_state(SearchState { assistant: Arc::new(assistant), templates: init_templates() })
}

async fn answer(assistant: &ShopAssistant, query: &str) -> (String, AssistantReply) {
    let correlation_id = Uuid::new_v4().to_string();
    let span = info_span!("assistant.request", correlation_id = %correlation_id);
    let reply = assistant.handle_query(query).instrument(span).await;
    (correlation_id, reply)
}

async fn search_page(
    Query(query): Query<SearchPageQuery>,
    State(state): State<SearchState>,
) -> Result<Html<String>, (StatusCode, Html<String>)> {
    let submitted = query.q.unwrap_or_default();

    // Any non-empty submission runs the pipeline, whitespace included.
    let reply = if submitted.is_empty() {
        None
    } else {
        Some(answer(&state.assistant, &submitted).await.1)
    };

    let mut context = Context::new();
    context.insert("query", &submitted);
    context.insert("reply", &reply);

    let html = state.templates.render("index.html", &context).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(format!("<h1>Template Error</h1><pre>{:?}</pre>", e)),
        )
    })?;

    Ok(Html(html))
}

async fn ask(State(state): State<SearchState>, Json(request): Json<AskRequest>) -> Json<AskResponse> {
    let (correlation_id, reply) = answer(&state.assistant, &request.query).await;
    Json(AskResponse { correlation_id, reply })
}
