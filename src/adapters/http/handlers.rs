//! Route handlers. Decode the request, call the use case, encode the result.

use super::error::ApiError;
use super::{AppState, TOKEN_COOKIE};
use crate::domain::schedule::{self, CalendarDate};
use crate::domain::{DomainError, Task};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Form, Query, State};
use axum::http::StatusCode;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use time::Duration;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NextDateQuery {
    pub now: String,
    pub date: String,
    pub repeat: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct IdQuery {
    pub id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchQuery {
    pub search: String,
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct IdResponse {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct TasksResponse {
    pub tasks: Vec<Task>,
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(v)| v)
        .map_err(|e| ApiError::BadRequest(format!("cannot decode JSON body: {}", e.body_text())))
}

fn next_date_text(q: &NextDateQuery) -> Result<String, ApiError> {
    let now: CalendarDate = q.now.parse().map_err(DomainError::from)?;
    let next = schedule::next_date(now, &q.date, &q.repeat).map_err(DomainError::from)?;
    Ok(next)
}

/// `GET /api/nextdate?now=&date=&repeat=`: bare `YYYYMMDD` text.
pub async fn next_date(Query(q): Query<NextDateQuery>) -> Result<String, ApiError> {
    next_date_text(&q)
}

/// `POST /api/nextdate` with the same fields as a urlencoded form.
pub async fn next_date_form(Form(q): Form<NextDateQuery>) -> Result<String, ApiError> {
    next_date_text(&q)
}

/// `POST /api/signin`: `{"password"}` → `{"token"}` plus the session cookie.
pub async fn sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Result<Json<SignInRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<TokenResponse>), ApiError> {
    let request = json_body(body)?;
    let token = state.auth.sign_in(&request.password)?;
    let cookie = Cookie::build((TOKEN_COOKIE, token.clone()))
        .path("/")
        .http_only(true)
        .max_age(Duration::seconds(state.auth.token_ttl_secs()))
        .build();
    Ok((jar.add(cookie), Json(TokenResponse { token })))
}

/// `POST /api/task`
pub async fn create_task(
    State(state): State<AppState>,
    body: Result<Json<Task>, JsonRejection>,
) -> Result<(StatusCode, Json<IdResponse>), ApiError> {
    let task = json_body(body)?;
    let id = state.tasks.create(task).await?;
    Ok((StatusCode::CREATED, Json(IdResponse { id })))
}

/// `GET /api/task?id=`
pub async fn get_task(
    State(state): State<AppState>,
    Query(q): Query<IdQuery>,
) -> Result<Json<Task>, ApiError> {
    Ok(Json(state.tasks.get(&q.id).await?))
}

/// `PUT /api/task`
pub async fn update_task(
    State(state): State<AppState>,
    body: Result<Json<Task>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let task = json_body(body)?;
    state.tasks.update(task).await?;
    Ok(Json(json!({})))
}

/// `DELETE /api/task?id=`
pub async fn delete_task(
    State(state): State<AppState>,
    Query(q): Query<IdQuery>,
) -> Result<Json<Value>, ApiError> {
    state.tasks.delete(&q.id).await?;
    Ok(Json(json!({})))
}

/// `GET /api/tasks?search=`
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(q): Query<SearchQuery>,
) -> Result<Json<TasksResponse>, ApiError> {
    let tasks = state.tasks.list(&q.search).await?;
    Ok(Json(TasksResponse { tasks }))
}

/// `POST /api/task/done?id=`
pub async fn mark_done(
    State(state): State<AppState>,
    Query(q): Query<IdQuery>,
) -> Result<Json<Value>, ApiError> {
    state.tasks.mark_done(&q.id).await?;
    Ok(Json(json!({})))
}
