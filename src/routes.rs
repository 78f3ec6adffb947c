use axum::extract::{FromRequestParts, Path, Query, State};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::error::AppError;
use crate::models::Notice;
use crate::services::ScanOutcome;
use crate::services::forms::{BookForm, IssueForm, MemberForm, RestockForm};
use crate::session::{self, LoginRequest};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
struct SearchParams {
    #[serde(default)]
    search: String,
}

#[derive(Debug, Deserialize)]
struct LookupParams {
    isbn: String,
}

/// Every screen carries the theme so the client can style it.
#[derive(Debug, Serialize)]
struct Page<T: Serialize> {
    dark_mode: bool,
    #[serde(flatten)]
    view: T,
}

/// Guard for screens behind the login check. Rejects with a redirect to `/login`.
pub struct LoggedIn;

impl FromRequestParts<AppState> for LoggedIn {
    type Rejection = Response;

    async fn from_request_parts(_parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        match session::is_logged_in(&state.store).await {
            Ok(true) => Ok(LoggedIn),
            Ok(false) => Err(Redirect::to("/login").into_response()),
            Err(e) => Err(AppError::from(e).into_response()),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/login", get(login_page).post(login))
        .route("/logout", post(logout))
        .route("/dashboard", get(dashboard))
        .route("/theme", post(toggle_theme))
        .route("/inventory", get(inventory))
        .route("/books", post(add_book))
        .route("/books/lookup", get(lookup_isbn))
        .route("/books/{id}", delete(delete_book))
        .route("/books/{id}/stock", put(restock_book))
        .route("/members", get(members).post(add_member))
        .route("/members/{id}", delete(delete_member))
        .route("/issued", get(issued))
        .route("/assignments", post(issue_book))
        .route("/assignments/new", get(issue_form))
        .route("/assignments/{id}", delete(return_book))
        .fallback(fallback)
        .with_state(state)
}

async fn page<T: Serialize>(state: &AppState, view: T) -> Result<Json<Page<T>>, AppError> {
    let dark_mode = session::load_theme(&state.store).await?.is_dark();
    Ok(Json(Page { dark_mode, view }))
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.store).await?;
    Ok(StatusCode::OK)
}

async fn login_page(State(state): State<AppState>) -> Result<Response, AppError> {
    if session::is_logged_in(&state.store).await? {
        return Ok(Redirect::to("/dashboard").into_response());
    }
    Ok(page(&state, json!({ "screen": "login" })).await?.into_response())
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Redirect, AppError> {
    if !session::credentials_match(&state.config, &req) {
        warn!("Rejected login for {:?}", req.username);
        return Err(AppError::Unauthorized);
    }

    session::log_in(&state.store).await?;
    info!("Logged in as {}", req.username);
    Ok(Redirect::to("/dashboard"))
}

async fn logout(State(state): State<AppState>) -> Result<Redirect, AppError> {
    session::log_out(&state.store).await?;
    Ok(Redirect::to("/login"))
}

async fn dashboard(
    _: LoggedIn,
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let view = state.desk().dashboard(&params.search).await;
    page(&state, view).await
}

async fn toggle_theme(_: LoggedIn, State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let theme = session::load_theme(&state.store).await?.toggled();
    session::save_theme(&state.store, theme).await?;
    Ok(Json(json!({ "theme": theme })))
}

async fn inventory(
    _: LoggedIn,
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let view = state.desk().inventory(&params.search).await?;
    page(&state, view).await
}

async fn lookup_isbn(
    _: LoggedIn,
    State(state): State<AppState>,
    Query(params): Query<LookupParams>,
) -> Result<Json<Value>, AppError> {
    let outcome = state.desk().scan_isbn(&params.isbn).await?;

    let notice = match &outcome {
        ScanOutcome::Existing { .. } => Notice::info(
            "Stock Update",
            "This book is already in the system. How many more will be added?",
        ),
        ScanOutcome::Found { draft } => Notice::success("Book found!", draft.title.clone()),
        ScanOutcome::NotFound => Notice::info("Not Found", "Please input data manually."),
    };

    Ok(Json(json!({ "notice": notice, "scan": outcome })))
}

async fn add_book(
    _: LoggedIn,
    State(state): State<AppState>,
    Json(form): Json<BookForm>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let book = state.desk().add_book(form).await?;
    let notice = Notice::success("Added Successfully!", book.title.clone());
    Ok((StatusCode::CREATED, Json(json!({ "notice": notice, "book": book }))))
}

async fn restock_book(
    _: LoggedIn,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(form): Json<RestockForm>,
) -> Result<Json<Value>, AppError> {
    let additional = form.validate()?;
    let book = state.desk().restock(id, additional).await?;
    let notice = Notice::success("Success!", "Stock updated.");
    Ok(Json(json!({ "notice": notice, "book": book })))
}

async fn delete_book(
    _: LoggedIn,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Notice>, AppError> {
    state.desk().delete_book(id).await?;
    Ok(Json(Notice::success("Deleted!", "Book removed from inventory.")))
}

async fn members(
    _: LoggedIn,
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let view = state.desk().members(&params.search).await?;
    page(&state, view).await
}

async fn add_member(
    _: LoggedIn,
    State(state): State<AppState>,
    Json(form): Json<MemberForm>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let member = state.desk().add_member(form, (state.today)()).await?;
    let notice = Notice::success("Success", "Member added!");
    Ok((StatusCode::CREATED, Json(json!({ "notice": notice, "member": member }))))
}

async fn delete_member(
    _: LoggedIn,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Notice>, AppError> {
    state.desk().delete_member(id).await?;
    Ok(Json(Notice::success("Deleted!", "Member successfully removed.")))
}

async fn issued(
    _: LoggedIn,
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let view = state.desk().issued(&params.search, (state.today)()).await?;
    page(&state, view).await
}

async fn issue_form(_: LoggedIn, State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let view = state.desk().issue_form((state.today)()).await?;
    page(&state, view).await
}

async fn issue_book(
    _: LoggedIn,
    State(state): State<AppState>,
    Json(form): Json<IssueForm>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let assignment = state.desk().issue_book(form, (state.today)()).await?;
    let notice = Notice::success("Success", "Book Issued!");
    Ok((StatusCode::CREATED, Json(json!({ "notice": notice, "assignment": assignment }))))
}

async fn return_book(
    _: LoggedIn,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Notice>, AppError> {
    state.desk().return_book(id).await?;
    Ok(Json(Notice::success("Returned!", "Book stock has been updated.")))
}

async fn fallback(State(state): State<AppState>) -> Result<Redirect, AppError> {
    let target = if session::is_logged_in(&state.store).await? {
        "/dashboard"
    } else {
        "/login"
    };
    Ok(Redirect::to(target))
}
