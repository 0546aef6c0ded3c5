use axum::Form;
use axum::extract::{Path, State};
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;

use crate::app::state::AppState;
use crate::app::views;
use crate::check::run_check;
use crate::error::AppError;
use crate::flash::{self, Flash};
use crate::register::register_url;

#[derive(Debug, Deserialize)]
pub struct UrlForm {
    #[serde(rename = "url[name]", default)]
    pub name: String,
}

pub async fn index(headers: HeaderMap) -> Response {
    let flash = Flash::from_request(&headers);
    page(&headers, views::index_page(flash, "", None))
}

pub async fn list_urls(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let urls = state.repo.list_with_latest_check().await?;
    let flash = Flash::from_request(&headers);
    Ok(page(&headers, views::urls_page(flash, &urls)))
}

pub async fn show_url(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;
    let url = state.repo.get(id).await?.ok_or(AppError::NotFound)?;
    let checks = state.repo.list_checks(id).await?;

    let flash = Flash::from_request(&headers);
    Ok(page(&headers, views::url_page(flash, &url, &checks)))
}

pub async fn create_url(
    State(state): State<AppState>,
    Form(form): Form<UrlForm>,
) -> Result<Response, AppError> {
    let registration = register_url(state.repo.as_ref(), &form.name).await?;
    Ok(redirect_with(
        &format!("/urls/{}", registration.url_id),
        registration.flash(),
    ))
}

pub async fn create_check(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;
    let outcome = run_check(state.repo.as_ref(), &state.fetcher, id).await?;
    Ok(redirect_with(&format!("/urls/{id}"), outcome.flash()))
}

fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.trim().parse::<i64>().map_err(|_| AppError::NotFound)
}

/// Renders `html`, consuming the pending notice if the request carried one.
fn page(request_headers: &HeaderMap, html: String) -> Response {
    let mut resp = (StatusCode::OK, Html(html)).into_response();
    if flash::has_cookie(request_headers) {
        flash::clear_on(resp.headers_mut());
    }
    resp
}

fn redirect_with(location: &str, flash: Flash) -> Response {
    ([(SET_COOKIE, flash.set_cookie())], Redirect::to(location)).into_response()
}
