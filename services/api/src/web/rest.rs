//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the directory endpoints and the master
//! definition for the OpenAPI document.

use crate::web::protocol::{
    AirportDetailResponse, AirportFacetsResponse, AirportListResponse, AirportQuery,
    AirportSummary, CompareQuery, CompareResponse, HealthResponse, LoungeFacetsResponse,
    LoungePageResponse, LoungeQuery,
};
use crate::web::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use lounge_directory_core::{paginate, CompareRejection, ComparisonView, Lounge};
use std::sync::Arc;
use tracing::{debug, warn};
use utoipa::OpenApi;

type HandlerResult<T> = Result<Json<T>, (StatusCode, String)>;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        health_handler,
        list_lounges_handler,
        get_lounge_handler,
        list_airports_handler,
        get_airport_handler,
        lounge_facets_handler,
        airport_facets_handler,
        compare_handler,
    ),
    components(
        schemas(
            HealthResponse,
            LoungePageResponse,
            AirportSummary,
            AirportListResponse,
            AirportDetailResponse,
            LoungeFacetsResponse,
            AirportFacetsResponse,
            CompareResponse,
        )
    ),
    tags(
        (name = "Lounge Directory API", description = "Browse, filter and compare airport lounges.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Handlers
//=========================================================================================

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        lounges: state.catalog.lounges().len(),
        airports: state.catalog.airports().len(),
    })
}

/// List lounges matching the filters, one page at a time.
#[utoipa::path(
    get,
    path = "/lounges",
    params(LoungeQuery),
    responses((status = 200, description = "One page of matching lounges", body = LoungePageResponse))
)]
pub async fn list_lounges_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LoungeQuery>,
) -> Json<LoungePageResponse> {
    let filter = query.to_filter();
    let matched = state.catalog.filter_lounges(&filter);
    let page = paginate(&matched, state.config.page_size, filter.page());

    debug!(
        "Lounge listing: {} match(es), page {}/{}",
        page.total_items(),
        page.current_page(),
        page.total_pages()
    );

    Json(LoungePageResponse::from_page(&page, filter.is_active()))
}

#[utoipa::path(
    get,
    path = "/lounges/{id}",
    params(("id" = String, Path, description = "Lounge id")),
    responses(
        (status = 200, description = "The lounge", body = Object),
        (status = 404, description = "No lounge with this id")
    )
)]
pub async fn get_lounge_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> HandlerResult<Lounge> {
    state
        .catalog
        .lounge(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("Lounge", &id))
}

/// List airports matching the filters. The directory is not paginated.
#[utoipa::path(
    get,
    path = "/airports",
    params(AirportQuery),
    responses((status = 200, description = "Matching airports", body = AirportListResponse))
)]
pub async fn list_airports_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AirportQuery>,
) -> Json<AirportListResponse> {
    let filter = query.to_filter();
    let items: Vec<AirportSummary> = state
        .catalog
        .filter_airports(&filter)
        .into_iter()
        .map(AirportSummary::from)
        .collect();

    Json(AirportListResponse {
        total: items.len(),
        filters_active: filter.is_active(),
        items,
    })
}

#[utoipa::path(
    get,
    path = "/airports/{code}",
    params(("code" = String, Path, description = "IATA airport code")),
    responses(
        (status = 200, description = "The airport and its neighbours", body = AirportDetailResponse),
        (status = 404, description = "No airport with this code")
    )
)]
pub async fn get_airport_handler(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> HandlerResult<AirportDetailResponse> {
    let code = code.to_uppercase();
    let airport = state
        .catalog
        .airport(&code)
        .ok_or_else(|| not_found("Airport", &code))?;

    Ok(Json(AirportDetailResponse {
        airport: airport.clone(),
        total_reviews: airport.total_reviews(),
        related: state
            .catalog
            .related_airports(&code)
            .into_iter()
            .map(AirportSummary::from)
            .collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/facets/lounges",
    responses((status = 200, description = "Lounge filter options", body = LoungeFacetsResponse))
)]
pub async fn lounge_facets_handler(State(state): State<Arc<AppState>>) -> Json<LoungeFacetsResponse> {
    Json(LoungeFacetsResponse::from(state.catalog.lounge_facets()))
}

#[utoipa::path(
    get,
    path = "/facets/airports",
    responses((status = 200, description = "Airport filter options", body = AirportFacetsResponse))
)]
pub async fn airport_facets_handler(
    State(state): State<Arc<AppState>>,
) -> Json<AirportFacetsResponse> {
    Json(AirportFacetsResponse::from(state.catalog.airport_facets()))
}

/// Compare two lounges side by side.
///
/// Both ids are required; with fewer the request is refused with the prompt
/// asking for another selection.
#[utoipa::path(
    get,
    path = "/compare",
    params(CompareQuery),
    responses(
        (status = 200, description = "Both lounges", body = CompareResponse),
        (status = 400, description = "Fewer than two lounges selected"),
        (status = 404, description = "A selected lounge does not exist")
    )
)]
pub async fn compare_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CompareQuery>,
) -> HandlerResult<CompareResponse> {
    let (left_id, right_id) = match (given(&query.lounge1), given(&query.lounge2)) {
        (Some(left), Some(right)) => (left, right),
        (None, None) => return Err(rejected(CompareRejection::NothingSelected)),
        _ => return Err(rejected(CompareRejection::NeedOneMore)),
    };

    let view = ComparisonView::resolve(&state.catalog, left_id, right_id);
    let better_rating = view.better_rating();
    let shared_access_methods = view
        .shared_access_methods()
        .into_iter()
        .map(str::to_string)
        .collect();

    match (view.left, view.right) {
        (Some(left), Some(right)) => Ok(Json(CompareResponse {
            left: left.clone(),
            right: right.clone(),
            better_rating,
            shared_access_methods,
        })),
        (None, _) => Err(not_found("Lounge", left_id)),
        (_, None) => Err(not_found("Lounge", right_id)),
    }
}

fn given(id: &Option<String>) -> Option<&str> {
    id.as_deref().filter(|id| !id.is_empty())
}

fn not_found(kind: &str, key: &str) -> (StatusCode, String) {
    warn!("{} not found: {}", kind, key);
    (StatusCode::NOT_FOUND, format!("{} '{}' not found", kind, key))
}

fn rejected(rejection: CompareRejection) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, rejection.to_string())
}
