//! Handlers for the `/admin` resource: review queue, decisions, placement,
//! confirmation and payment reconciliation. All require the admin role.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use plinth_core::entry_rules::{self, EntryStatus};
use plinth_core::error::CoreError;
use plinth_core::registration_rules::{self, RegistrationStatus};
use plinth_core::types::DbId;
use plinth_db::models::artist::Artist;
use plinth_db::models::entry::{Entry, EntryReviewRow};
use plinth_db::models::image::Image;
use plinth_db::models::payment::{Payment, PaymentListRow};
use plinth_db::models::registration::{Registration, RegistrationListRow};
use plinth_db::repositories::{
    ArtistRepo, EntryRepo, ImageRepo, PaymentRepo, RegistrationRepo,
};
use plinth_events::ExhibitionEvent;

use crate::error::{AppError, AppResult};
use crate::handlers::payment::publish_settled;
use crate::middleware::rbac::RequireAdmin;
use crate::query::AdminListParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/entries/{id}/decision`.
#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
    /// `true` accepts the entry, `false` rejects it.
    pub accept: bool,
    /// Jury motivation, relayed to the artist in the decision mail.
    pub reason: Option<String>,
}

/// Request body for `PUT /admin/entries/{id}/placement`.
#[derive(Debug, Deserialize)]
pub struct PlacementRequest {
    pub exhibit_number: String,
    pub location_note: Option<String>,
}

/// One entry with its images, embedded in [`RegistrationDetail`].
#[derive(Debug, Serialize)]
pub struct EntryDetail {
    #[serde(flatten)]
    pub entry: Entry,
    pub images: Vec<Image>,
}

/// Full review view of one registration.
#[derive(Debug, Serialize)]
pub struct RegistrationDetail {
    pub registration: Registration,
    pub artist: Artist,
    pub entries: Vec<EntryDetail>,
    /// Supporting images attached to the registration itself.
    pub images: Vec<Image>,
    pub payments: Vec<Payment>,
}

// ---------------------------------------------------------------------------
// Registrations
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/registrations?year=&status=&limit=&offset=
///
/// Registration overview with artist names and entry counts.
pub async fn list_registrations(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<AdminListParams>,
) -> AppResult<Json<DataResponse<Vec<RegistrationListRow>>>> {
    let rows = RegistrationRepo::list_admin(
        &state.pool,
        params.year,
        params.status.as_deref(),
        params.limit(),
        params.offset(),
    )
    .await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/admin/registrations/{id}
///
/// Everything a reviewer needs on one screen: the registration, the artist,
/// all entries with their images, and the payment trail.
pub async fn get_registration(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<RegistrationDetail>> {
    let registration = RegistrationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Registration",
            id,
        }))?;
    let artist = ArtistRepo::find_by_id(&state.pool, registration.artist_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Artist",
            id: registration.artist_id,
        }))?;

    let mut entries = Vec::new();
    for entry in EntryRepo::list_for_registration(&state.pool, registration.id).await? {
        let images = ImageRepo::list_for_entry(&state.pool, entry.id).await?;
        entries.push(EntryDetail { entry, images });
    }

    let images = ImageRepo::list_for_registration(&state.pool, registration.id).await?;
    let payments = PaymentRepo::list_for_registration(&state.pool, registration.id).await?;

    Ok(Json(RegistrationDetail {
        registration,
        artist,
        entries,
        images,
        payments,
    }))
}

/// POST /api/v1/admin/registrations/{id}/confirm
///
/// Confirm a submitted, paid registration. Triggers the confirmation mail.
pub async fn confirm_registration(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<Registration>> {
    let registration = RegistrationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Registration",
            id,
        }))?;

    let status = RegistrationStatus::from_str_db(&registration.status)?;
    let paid = PaymentRepo::has_paid(&state.pool, registration.id).await?;
    registration_rules::validate_confirm(status, paid)?;

    let confirmed = RegistrationRepo::set_confirmed(&state.pool, registration.id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Registration is no longer submitted".to_string(),
            ))
        })?;

    state.event_bus.publish(
        ExhibitionEvent::new("registration.confirmed")
            .with_entity("registration", confirmed.id)
            .with_actor(admin.user_id)
            .with_payload(json!({ "year": confirmed.year })),
    );

    tracing::info!(
        registration_id = confirmed.id,
        year = confirmed.year,
        "Registration confirmed"
    );

    Ok(Json(confirmed))
}

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/entries?year=&status=&limit=&offset=
///
/// Review queue. Entries of draft registrations are excluded; the jury only
/// sees what has been submitted.
pub async fn list_entries(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<AdminListParams>,
) -> AppResult<Json<DataResponse<Vec<EntryReviewRow>>>> {
    let rows = EntryRepo::list_review(
        &state.pool,
        params.year,
        params.status.as_deref(),
        params.limit(),
        params.offset(),
    )
    .await?;
    Ok(Json(DataResponse { data: rows }))
}

/// POST /api/v1/admin/entries/{id}/decision
///
/// Accept or reject a pending entry. Decisions are final and trigger the
/// decision mail to the artist.
pub async fn decide_entry(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<DecisionRequest>,
) -> AppResult<Json<Entry>> {
    let entry = EntryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Entry", id }))?;

    let registration = RegistrationRepo::find_by_id(&state.pool, entry.registration_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Registration",
            id: entry.registration_id,
        }))?;
    if RegistrationStatus::from_str_db(&registration.status)? == RegistrationStatus::Draft {
        return Err(AppError::Core(CoreError::Conflict(
            "Entries of a draft registration cannot be decided".to_string(),
        )));
    }

    let current = EntryStatus::from_str_db(&entry.status)?;
    let decision = if input.accept {
        EntryStatus::Accepted
    } else {
        EntryStatus::Rejected
    };
    entry_rules::validate_decision(current, decision)?;

    let decided = EntryRepo::set_decision(
        &state.pool,
        entry.id,
        decision.as_str(),
        input.reason.as_deref(),
    )
    .await?
    .ok_or_else(|| {
        AppError::Core(CoreError::Conflict(
            "Entry has already been decided".to_string(),
        ))
    })?;

    let event_type = match decision {
        EntryStatus::Accepted => "entry.accepted",
        _ => "entry.rejected",
    };
    state.event_bus.publish(
        ExhibitionEvent::new(event_type)
            .with_entity("entry", decided.id)
            .with_actor(admin.user_id)
            .with_payload(json!({
                "title": decided.title,
                "reason": decided.decision_reason,
                "exhibit_number": decided.exhibit_number,
            })),
    );

    tracing::info!(
        entry_id = decided.id,
        status = %decided.status,
        "Entry decided"
    );

    Ok(Json(decided))
}

/// PUT /api/v1/admin/entries/{id}/placement
///
/// Assign an exhibit number (normalized to `A-12` form) and an optional
/// location note to an accepted entry. Numbers are unique within a year.
pub async fn place_entry(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<PlacementRequest>,
) -> AppResult<Json<Entry>> {
    let entry = EntryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Entry", id }))?;

    if EntryStatus::from_str_db(&entry.status)? != EntryStatus::Accepted {
        return Err(AppError::Core(CoreError::Conflict(
            "Only accepted entries can be placed".to_string(),
        )));
    }

    let exhibit_number = entry_rules::normalize_exhibit_number(&input.exhibit_number)?;

    let registration = RegistrationRepo::find_by_id(&state.pool, entry.registration_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Registration",
            id: entry.registration_id,
        }))?;
    if EntryRepo::exhibit_number_taken(&state.pool, registration.year, &exhibit_number, entry.id)
        .await?
    {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Exhibit number {exhibit_number} is already taken in {}",
            registration.year
        ))));
    }

    let placed = EntryRepo::set_placement(
        &state.pool,
        entry.id,
        &exhibit_number,
        input.location_note.as_deref(),
    )
    .await?
    .ok_or_else(|| {
        AppError::Core(CoreError::Conflict(
            "Entry is no longer accepted".to_string(),
        ))
    })?;

    tracing::info!(
        entry_id = placed.id,
        exhibit_number = %exhibit_number,
        "Entry placed"
    );

    Ok(Json(placed))
}

// ---------------------------------------------------------------------------
// Payments
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/payments?year=&status=&limit=&offset=
///
/// Payment reconciliation listing.
pub async fn list_payments(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<AdminListParams>,
) -> AppResult<Json<DataResponse<Vec<PaymentListRow>>>> {
    let rows = PaymentRepo::list_admin(
        &state.pool,
        params.year,
        params.status.as_deref(),
        params.limit(),
        params.offset(),
    )
    .await?;
    Ok(Json(DataResponse { data: rows }))
}

/// POST /api/v1/admin/payments/{id}/mark-paid
///
/// Manually settle a payment, for bank transfers that bypass the gateway.
pub async fn mark_paid(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<Payment>> {
    let payment = PaymentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Payment",
            id,
        }))?;

    if payment.status == "paid" {
        return Err(AppError::Core(CoreError::Conflict(
            "Payment is already settled".to_string(),
        )));
    }

    let updated = PaymentRepo::update_status(&state.pool, payment.id, "paid")
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Payment",
            id,
        }))?;

    publish_settled(&state, &updated).await;

    tracing::info!(
        payment_id = updated.id,
        admin_id = admin.user_id,
        "Payment manually marked paid"
    );

    Ok(Json(updated))
}
