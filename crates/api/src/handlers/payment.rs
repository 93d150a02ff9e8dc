//! Handlers for registration-fee payments and the gateway webhook.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Form, Json};
use serde::Deserialize;
use serde_json::json;

use plinth_core::error::CoreError;
use plinth_core::registration_rules::RegistrationStatus;
use plinth_core::types::DbId;
use plinth_db::models::payment::{CreatePayment, Payment};
use plinth_db::repositories::{PaymentRepo, RegistrationRepo};
use plinth_events::ExhibitionEvent;
use plinth_payments::{PaymentStatus, PROVIDER_NAME};

use crate::error::{AppError, AppResult};
use crate::handlers::owned_registration;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Webhook body sent by the gateway: just the payment id. The status is
/// deliberately absent; it must be fetched back from the gateway.
#[derive(Debug, Deserialize)]
pub struct WebhookBody {
    pub id: String,
}

/// POST /api/v1/registrations/{id}/payments
///
/// Create a checkout for the registration fee. Only possible once the
/// registration is submitted, and only while it is unpaid.
pub async fn create_checkout(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<(StatusCode, Json<Payment>)> {
    let (_, registration) = owned_registration(&state, &user, id).await?;

    let status = RegistrationStatus::from_str_db(&registration.status)?;
    if status == RegistrationStatus::Draft {
        return Err(AppError::Core(CoreError::Conflict(
            "Submit the registration before paying the fee".to_string(),
        )));
    }
    if PaymentRepo::has_paid(&state.pool, registration.id).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "Registration fee has already been paid".to_string(),
        )));
    }

    let payments = state.payments.as_ref().ok_or_else(|| {
        AppError::ServiceUnavailable("Payment gateway is not configured".to_string())
    })?;

    let exhibition = &state.config.exhibition;
    let description = format!(
        "{} {} registration fee",
        exhibition.name, registration.year
    );
    let created = payments
        .create_payment(
            registration.id,
            exhibition.fee_cents,
            "EUR",
            &description,
        )
        .await
        .map_err(|e| AppError::InternalError(format!("Payment gateway error: {e}")))?;

    let create = CreatePayment {
        registration_id: registration.id,
        provider: PROVIDER_NAME.to_string(),
        provider_payment_id: created.id.clone(),
        amount_cents: exhibition.fee_cents,
        currency: "EUR".to_string(),
        status: created.status.as_str().to_string(),
        checkout_url: created.checkout_url().map(str::to_string),
    };
    let payment = PaymentRepo::create(&state.pool, &create).await?;

    tracing::info!(
        payment_id = payment.id,
        registration_id = registration.id,
        provider_payment_id = %payment.provider_payment_id,
        amount_cents = payment.amount_cents,
        "Checkout created"
    );

    Ok((StatusCode::CREATED, Json(payment)))
}

/// GET /api/v1/registrations/{id}/payments
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Payment>>>> {
    let (_, registration) = owned_registration(&state, &user, id).await?;
    let rows = PaymentRepo::list_for_registration(&state.pool, registration.id).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// POST /api/v1/payments/webhook
///
/// Status-change notification from the gateway. Unauthenticated by design;
/// the body only names a payment id and the authoritative status is fetched
/// back over the authenticated API, so a forged call can at worst trigger a
/// redundant re-check.
pub async fn webhook(
    State(state): State<AppState>,
    Form(body): Form<WebhookBody>,
) -> AppResult<StatusCode> {
    let payment = PaymentRepo::find_by_provider_payment_id(&state.pool, &body.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Unknown payment id: {}", body.id)))?;

    let payments = state.payments.as_ref().ok_or_else(|| {
        AppError::ServiceUnavailable("Payment gateway is not configured".to_string())
    })?;

    let remote = payments
        .get_payment(&payment.provider_payment_id)
        .await
        .map_err(|e| AppError::InternalError(format!("Payment gateway error: {e}")))?;

    let new_status = remote.status.as_str();
    if new_status == payment.status {
        return Ok(StatusCode::OK);
    }

    let updated = PaymentRepo::update_status(&state.pool, payment.id, new_status)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Payment",
            id: payment.id,
        }))?;

    tracing::info!(
        payment_id = updated.id,
        provider_payment_id = %updated.provider_payment_id,
        from = %payment.status,
        to = %new_status,
        "Payment status updated via webhook"
    );

    // Settlement fires exactly once, on the flip to paid.
    if remote.status == PaymentStatus::Paid {
        publish_settled(&state, &updated).await;
    }

    Ok(StatusCode::OK)
}

/// Publish `payment.settled` with the amount and exhibition year.
pub(crate) async fn publish_settled(state: &AppState, payment: &Payment) {
    let year = RegistrationRepo::find_by_id(&state.pool, payment.registration_id)
        .await
        .ok()
        .flatten()
        .map(|r| r.year);

    state.event_bus.publish(
        ExhibitionEvent::new("payment.settled")
            .with_entity("payment", payment.id)
            .with_payload(json!({
                "amount_cents": payment.amount_cents,
                "year": year,
            })),
    );
}
