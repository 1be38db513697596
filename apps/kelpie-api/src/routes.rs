use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;

use kelpie_service::{
	CreatePlacementRequest, CreatePlacementResponse, DeleteRequest, DeleteResponse, Error,
	ListRequest, ListResponse, LoadReferenceRequest, LoadReferenceResponse, PlacementsRequest,
	PlacementsResponse, RegisterRequest, RegisterResponse, SearchRequest, SearchResponse,
	SuburbsRequest, SuburbsResponse, UpdateRequest, UpdateResponse,
};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/search", post(search))
		.route("/v1/suburbs", get(suburbs))
		.route("/v1/listings", get(list))
		.route("/v1/listings/register", post(register))
		.route("/v1/listings/update", post(update))
		.route("/v1/listings/delete", post(delete))
		.with_state(state)
}

pub fn admin_router(state: AppState) -> Router {
	Router::new()
		.route("/v1/admin/reference/load", post(load_reference))
		.route("/v1/admin/placements/create", post(create_placement))
		.route("/v1/admin/placements", get(placements))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn search(
	State(state): State<AppState>,
	Json(payload): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
	let response = state.service.search(payload).await?;

	Ok(Json(response))
}

async fn suburbs(
	State(state): State<AppState>,
	Query(payload): Query<SuburbsRequest>,
) -> Result<Json<SuburbsResponse>, ApiError> {
	let response = state.service.suburbs(payload).await?;

	Ok(Json(response))
}

async fn list(
	State(state): State<AppState>,
	Query(payload): Query<ListRequest>,
) -> Result<Json<ListResponse>, ApiError> {
	let response = state.service.list(payload).await?;

	Ok(Json(response))
}

async fn register(
	State(state): State<AppState>,
	Json(payload): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, ApiError> {
	let response = state.service.register(payload).await?;

	Ok(Json(response))
}

async fn update(
	State(state): State<AppState>,
	Json(payload): Json<UpdateRequest>,
) -> Result<Json<UpdateResponse>, ApiError> {
	let response = state.service.update(payload).await?;

	Ok(Json(response))
}

async fn delete(
	State(state): State<AppState>,
	Json(payload): Json<DeleteRequest>,
) -> Result<Json<DeleteResponse>, ApiError> {
	let response = state.service.delete(payload).await?;

	Ok(Json(response))
}

async fn load_reference(
	State(state): State<AppState>,
	Json(payload): Json<LoadReferenceRequest>,
) -> Result<Json<LoadReferenceResponse>, ApiError> {
	let response = state.service.load_reference(payload).await?;

	Ok(Json(response))
}

async fn create_placement(
	State(state): State<AppState>,
	Json(payload): Json<CreatePlacementRequest>,
) -> Result<Json<CreatePlacementResponse>, ApiError> {
	let response = state.service.create_placement(payload).await?;

	Ok(Json(response))
}

async fn placements(
	State(state): State<AppState>,
	Query(payload): Query<PlacementsRequest>,
) -> Result<Json<PlacementsResponse>, ApiError> {
	let response = state.service.placements(payload).await?;

	Ok(Json(response))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}
impl ApiError {
	fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { status, error_code: error_code.into(), message: message.into(), fields: None }
	}
}
impl From<Error> for ApiError {
	fn from(err: Error) -> Self {
		match &err {
			Error::InvalidRequest { .. } =>
				ApiError::new(StatusCode::BAD_REQUEST, "invalid_request", err.to_string()),
			Error::NotFound { .. } =>
				ApiError::new(StatusCode::NOT_FOUND, "not_found", err.to_string()),
			Error::Storage { .. } => {
				tracing::error!(error = %err, "Request failed on a storage error.");

				ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "storage_error", err.to_string())
			},
		}
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody {
			error_code: self.error_code,
			message: self.message,
			fields: self.fields,
		};

		(self.status, Json(body)).into_response()
	}
}
