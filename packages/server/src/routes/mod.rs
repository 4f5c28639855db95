use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;

pub fn api_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .merge(people_routes())
        .merge(incident_routes(config))
        .routes(routes!(handlers::ranking::get_ranking))
}

fn people_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::person::list_people,
            handlers::person::create_person
        ))
        .routes(routes!(handlers::person::get_person))
        .routes(routes!(handlers::person::delete_person))
}

fn incident_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::incident::list_incidents,
            handlers::incident::create_incident
        ))
        .routes(routes!(handlers::incident::delete_incident))
        .layer(handlers::incident::incident_upload_body_limit(
            config.storage.max_photo_size,
        ))
}
