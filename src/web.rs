// ============================================
// src/web.rs
// ブラウザ版クイズ (1ページ + 小さな JSON API)
// ============================================

use axum::{
    Json, Router,
    extract::Query,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

use crate::config::Config;
use crate::kana::{Family, KanaError};
use crate::word::{self, Word};

const INDEX_HTML: &str = include_str!("../static/index.html");
const MAIN_JS: &str = include_str!("../static/main.js");

// --------------------------------------------------
// リクエスト / レスポンス
// --------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct WordQuery {
    #[serde(default)]
    pub family: Family,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WordResponse {
    pub family: Family,
    pub word: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckRequest {
    pub word: String,
    pub answer: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckResponse {
    pub correct: bool,
    pub romaji: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for KanaError {
    fn into_response(self) -> Response {
        let status = match self {
            KanaError::UnknownCharacter(_) => StatusCode::UNPROCESSABLE_ENTITY,
            KanaError::EmptyCharacterSet(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::warn!(error = %self, "request failed");
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

// --------------------------------------------------
// ハンドラ
// --------------------------------------------------

async fn health() -> &'static str {
    "ok"
}

async fn index() -> Html<String> {
    Html(render_page(Family::Both))
}

async fn hiragana() -> Html<String> {
    Html(render_page(Family::Hiragana))
}

async fn katakana() -> Html<String> {
    Html(render_page(Family::Katakana))
}

async fn main_js() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/javascript; charset=utf-8")], MAIN_JS)
}

async fn new_word(Query(query): Query<WordQuery>) -> Result<Json<WordResponse>, KanaError> {
    let word = draw_word(query.family)?;

    Ok(Json(WordResponse {
        family: query.family,
        word: word.to_string(),
    }))
}

async fn check(Json(request): Json<CheckRequest>) -> Result<Json<CheckResponse>, KanaError> {
    let romaji = Word::from(request.word.as_str()).to_romaji()?;
    let correct = request.answer.trim().to_lowercase() == romaji;

    tracing::debug!(word = %request.word, answer = %request.answer, correct, "check");

    Ok(Json(CheckResponse { correct, romaji }))
}

/// スレッドローカルの乱数はここだけで使い、await をまたがない
fn draw_word(family: Family) -> Result<Word, KanaError> {
    word::new_word(family, &mut rand::rng())
}

/// ページに文字種を埋め込む
pub fn render_page(family: Family) -> String {
    let active = |f: Family| if f == family { "active" } else { "" };

    INDEX_HTML
        .replace("{{title}}", &family.to_string())
        .replace("{{family}}", family.as_str())
        .replace("{{nav_both}}", active(Family::Both))
        .replace("{{nav_hiragana}}", active(Family::Hiragana))
        .replace("{{nav_katakana}}", active(Family::Katakana))
}

pub fn app() -> Router {
    Router::new()
        .route("/", get(index))
        .route("/hiragana", get(hiragana))
        .route("/katakana", get(katakana))
        .route("/static/main.js", get(main_js))
        .route("/api/word", get(new_word))
        .route("/api/check", post(check))
        .route("/health", get(health))
}

/// サーバーを起動して Ctrl-C まで待つ
pub async fn serve(config: &Config) -> anyhow::Result<()> {
    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("Server started on {}", addr);

    axum::serve(listener, app())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "failed to listen for ctrl-c");
    }
}
