use std::path::Path;

use askama::Template;
use axum::{
	Form, Json, Router,
	extract::{OriginalUri, Path as UrlPath, Query, State},
	http::{HeaderMap, HeaderValue, StatusCode, header},
	response::{Html, IntoResponse, Response},
	routing::{get, post},
};
use reqwest::Url;
use serde::{Deserialize, Serialize};

use nzbidx_domain::category::Category;
use nzbidx_service::{
	DescriptorRequest, Error, FeedRequest, SearchRequest, UploadInfo,
	nzb::{NZB_MIME, render_nzb},
	rss::render_rss,
	search::page_index,
};

use crate::{
	state::AppState,
	views::{ResultsView, SearchFilters},
};

const LANDING_PAGE: &str = "home.html";
const FEED_MIME: &str = "text/xml; charset=utf-8";

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
	q: Option<String>,
	cat: Option<String>,
	nocomp: Option<String>,
	p: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FeedParams {
	q: Option<String>,
	max: Option<String>,
}

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/", get(search))
		.route("/index", get(search))
		.route("/index.html", get(search))
		.route("/nzb", post(nzb_batch))
		.route("/nzb/{id}", get(nzb_single))
		.route("/nzb/{id}/{name}", get(nzb_named))
		.route("/rss", get(rss))
		.route("/rss/", get(rss))
		.route("/uploads/{id}", get(upload_info))
		.route("/health", get(health))
		.fallback(not_found)
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn not_found() -> Response {
	(StatusCode::NOT_FOUND, Json(serde_json::json!({ "error": "404" }))).into_response()
}

async fn search(
	State(state): State<AppState>,
	headers: HeaderMap,
	Query(params): Query<SearchParams>,
) -> Result<Response, ApiError> {
	let Some(query) = params.q.as_deref().map(str::trim).filter(|query| !query.is_empty()) else {
		return landing_page(&state.service.cfg.service.html_dir).await;
	};
	let filters = SearchFilters {
		category: params.cat.as_deref().and_then(Category::from_filter),
		include_incomplete: params.nocomp.is_some(),
	};
	let base = public_base(&state, &headers)?;
	let page = state
		.service
		.search(SearchRequest {
			query: query.to_string(),
			page: page_index(params.p.as_deref()),
			only_complete: !filters.include_incomplete,
		})
		.await?;
	let view = ResultsView::new(page, &base, &filters)?;
	let html = view.render().map_err(|err| {
		tracing::error!(error = %err, "Failed to render search results.");

		json_error(StatusCode::INTERNAL_SERVER_ERROR, "render_error", "Failed to render page.")
	})?;

	Ok(Html(html).into_response())
}

async fn landing_page(html_dir: &str) -> Result<Response, ApiError> {
	let path = Path::new(html_dir).join(LANDING_PAGE);
	let html = tokio::fs::read_to_string(&path).await.map_err(|err| {
		tracing::error!(error = %err, path = %path.display(), "Failed to read landing page.");

		json_error(
			StatusCode::INTERNAL_SERVER_ERROR,
			"landing_page",
			"Landing page is unavailable.",
		)
	})?;

	Ok(Html(html).into_response())
}

async fn nzb_single(
	State(state): State<AppState>,
	UrlPath(id): UrlPath<String>,
) -> Result<Response, ApiError> {
	nzb_response(&state, DescriptorRequest { uploads: vec![id], name: None }).await
}

async fn nzb_named(
	State(state): State<AppState>,
	UrlPath((id, name)): UrlPath<(String, String)>,
) -> Result<Response, ApiError> {
	nzb_response(&state, DescriptorRequest { uploads: vec![id], name: Some(name) }).await
}

/// Batch download. The form repeats `nzb` once per upload id.
async fn nzb_batch(
	State(state): State<AppState>,
	Form(fields): Form<Vec<(String, String)>>,
) -> Result<Response, ApiError> {
	let mut req = DescriptorRequest::default();

	for (key, value) in fields {
		match key.as_str() {
			"nzb" => req.uploads.push(value),
			"name" if !value.trim().is_empty() => req.name = Some(value),
			_ => {},
		}
	}

	nzb_response(&state, req).await
}

async fn nzb_response(state: &AppState, req: DescriptorRequest) -> Result<Response, ApiError> {
	let descriptor = state.service.descriptor(req).await?;
	let body = render_nzb(&descriptor)?;
	let disposition = format!("attachment; filename=\"{}\"", descriptor.name.replace('"', "'"));
	let disposition = HeaderValue::from_bytes(disposition.as_bytes()).map_err(|_| {
		json_error(StatusCode::BAD_REQUEST, "invalid_request", "NZB name is not a valid header.")
	})?;
	let headers = [
		(header::CONTENT_TYPE, HeaderValue::from_static(NZB_MIME)),
		(header::CONTENT_DISPOSITION, disposition),
	];

	Ok((headers, body).into_response())
}

async fn rss(
	State(state): State<AppState>,
	headers: HeaderMap,
	OriginalUri(uri): OriginalUri,
	Query(params): Query<FeedParams>,
) -> Result<Response, ApiError> {
	let base = public_base(&state, &headers)?;
	let request_path = uri.path_and_query().map(|path| path.as_str()).unwrap_or("/rss");
	let self_link = format!("{}{request_path}", base.as_str().trim_end_matches('/'));
	let feed = state
		.service
		.feed(FeedRequest { query: params.q, max: params.max, base, self_link })
		.await?;
	let body = render_rss(&feed)?;

	Ok(([(header::CONTENT_TYPE, FEED_MIME)], body).into_response())
}

async fn upload_info(
	State(state): State<AppState>,
	UrlPath(id): UrlPath<String>,
) -> Result<Json<UploadInfo>, ApiError> {
	let info = state.service.upload_info(&id).await?;

	Ok(Json(info))
}

/// Root that absolute links are built under: the configured `base_url`, or the request's
/// `Host` over plain HTTP.
fn public_base(state: &AppState, headers: &HeaderMap) -> Result<Url, ApiError> {
	let raw = match &state.service.cfg.service.base_url {
		Some(base_url) => format!("{base_url}/"),
		None => {
			let host = headers
				.get(header::HOST)
				.and_then(|host| host.to_str().ok())
				.unwrap_or(&state.service.cfg.service.http_bind);

			format!("http://{host}/")
		},
	};

	Url::parse(&raw).map_err(|err| {
		json_error(StatusCode::BAD_REQUEST, "invalid_request", format!("Invalid base URL: {err}."))
	})
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { status, error_code: error_code.into(), message: message.into() }
	}
}

impl From<Error> for ApiError {
	fn from(err: Error) -> Self {
		let code = match &err {
			Error::InvalidRequest { message } =>
				return json_error(StatusCode::BAD_REQUEST, "invalid_request", message.clone()),
			Error::NotFound { .. } => "not_found",
			Error::StoreUnavailable { .. } => "store_unavailable",
			Error::Decode { .. } => "decode_error",
			Error::MalformedHit { .. } => "malformed_hit",
			Error::Render { .. } => "render_error",
		};

		tracing::error!(error = %err, "Request failed.");

		json_error(StatusCode::INTERNAL_SERVER_ERROR, code, err.to_string())
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}

pub fn json_error(status: StatusCode, code: &str, message: impl Into<String>) -> ApiError {
	ApiError::new(status, code, message)
}
