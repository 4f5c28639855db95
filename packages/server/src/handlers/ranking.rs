use axum::Json;
use axum::extract::State;
use tracing::instrument;

use crate::models::ranking::RankingEntryResponse;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/ranking",
    tag = "Ranking",
    operation_id = "getRanking",
    summary = "Get the ranking",
    description = "Every person with their point total (`puntos`) and the time of their latest \
        incident (`ultimaIncidencia`), ordered by points descending. People with equal points \
        keep their creation order.",
    responses(
        (status = 200, description = "Ranking", body = Vec<RankingEntryResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn get_ranking(State(state): State<AppState>) -> Json<Vec<RankingEntryResponse>> {
    let ranking = state.store.compute_ranking().await;
    Json(ranking.into_iter().map(RankingEntryResponse::from).collect())
}
