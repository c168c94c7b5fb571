use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;
use crate::services::ResetSummary;
use crate::session::{DrawState, RevealLine, RevealLineKind, RevealPhase, SessionSnapshot};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            )
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::login,
        handlers::participant::list_participants,
        handlers::participant::list_active_participants,
        handlers::participant::create_participant,
        handlers::participant::get_participant,
        handlers::participant::update_participant,
        handlers::participant::delete_participant,
        handlers::participant::set_participant_active,
        handlers::participant::reset_participants,
        handlers::participant::import_participants,
        handlers::prize::list_prizes,
        handlers::prize::create_prize,
        handlers::prize::get_prize,
        handlers::prize::update_prize,
        handlers::prize::delete_prize,
        handlers::draw::run_full_sequence,
        handlers::draw::run_single,
        handlers::session::get_session,
        handlers::session::start,
        handlers::session::pause,
        handlers::session::resume,
        handlers::session::next_round,
        handlers::session::finish,
        handlers::session::reset,
        handlers::history::list_history,
        handlers::history::export_history,
        handlers::history::list_by_prize,
        handlers::history::list_by_session,
        handlers::admin::reset_lottery,
    ),
    components(
        schemas(
            LoginRequest,
            AuthResponse,
            CreateParticipantRequest,
            UpdateParticipantRequest,
            SetActiveRequest,
            ParticipantResponse,
            ImportResponse,
            AffectedResponse,
            PrizeRequest,
            PrizeResponse,
            Winner,
            DrawOutcome,
            PrizeResult,
            HistoryQuery,
            HistoryRecord,
            HistoryPageResponse,
            DrawState,
            RevealPhase,
            RevealLineKind,
            RevealLine,
            SessionSnapshot,
            ResetSummary,
            ApiError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Operator login"),
        (name = "participant", description = "Participant roster"),
        (name = "prize", description = "Prize catalog"),
        (name = "draw", description = "Draw engine"),
        (name = "session", description = "Live draw presentation"),
        (name = "history", description = "Draw history and export"),
        (name = "admin", description = "Maintenance"),
    ),
    info(
        title = "Prize Draw API",
        version = "1.0.0",
        description = "Office prize draw REST API documentation"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
