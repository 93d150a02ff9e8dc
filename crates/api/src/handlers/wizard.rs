//! Handler for the registration wizard state endpoint.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use plinth_core::error::CoreError;
use plinth_core::wizard::{self, SubmissionFacts, WizardState};
use plinth_db::repositories::RegistrationRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::current_artist;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Query parameters for the wizard endpoint (`?year=&step=`).
#[derive(Debug, Deserialize)]
pub struct WizardParams {
    pub year: Option<i32>,
    /// When set, the request also asserts this step may be opened.
    pub step: Option<u8>,
}

/// Response body for `GET /artists/me/wizard`.
#[derive(Debug, Serialize)]
pub struct WizardResponse {
    /// Exhibition year the state was computed for.
    pub year: i32,
    /// Raw facts the step gating was derived from.
    pub facts: SubmissionFacts,
    #[serde(flatten)]
    pub state: WizardState,
}

/// GET /api/v1/artists/me/wizard?year=&step=
///
/// Derived wizard state for the authenticated artist: which steps are
/// reachable, which are complete, and where the artist currently stands.
/// Defaults to the configured exhibition year. A client about to open a
/// specific step passes `step=`; a gated step answers 403 instead of the
/// state.
pub async fn get_state(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<WizardParams>,
) -> AppResult<Json<WizardResponse>> {
    let artist = current_artist(&state, &user).await?;
    let year = params.year.unwrap_or(state.config.exhibition.year);

    let facts = RegistrationRepo::submission_facts(&state.pool, artist.id, year)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Artist profile",
            id: artist.id,
        }))?;

    if let Some(step) = params.step {
        wizard::validate_step_access(step, &facts)?;
    }

    Ok(Json(WizardResponse {
        year,
        facts,
        state: wizard::evaluate(&facts),
    }))
}
