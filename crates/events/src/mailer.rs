//! Confirmation email service.
//!
//! [`Mailer`] subscribes to the event bus and turns a fixed set of events
//! into plain-text emails to the affected artist: registration receipt,
//! entry decision, payment receipt and participation confirmation. Sending
//! is best-effort -- failures are logged, never retried, and never affect
//! the request that published the event.

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use plinth_core::money::format_eur_cents;
use plinth_db::repositories::UserRepo;
use plinth_db::DbPool;

use crate::bus::ExhibitionEvent;
use crate::delivery::email::EmailDelivery;

/// Background service that emails artists about events on their submission.
pub struct Mailer {
    pool: DbPool,
    delivery: EmailDelivery,
    exhibition_name: String,
}

impl Mailer {
    /// Create a new mailer.
    pub fn new(pool: DbPool, delivery: EmailDelivery, exhibition_name: String) -> Self {
        Self {
            pool,
            delivery,
            exhibition_name,
        }
    }

    /// Run the mailer loop.
    ///
    /// Consumes events from the provided `receiver` until `cancel` is
    /// triggered or the bus is closed.
    pub async fn run(&self, mut receiver: broadcast::Receiver<ExhibitionEvent>, cancel: CancellationToken) {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Mailer stopping");
                    break;
                }
                received = receiver.recv() => match received {
                    Ok(event) => self.handle(&event).await,
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(skipped = n, "Mailer lagged, some notifications were not sent");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        tracing::info!("Event bus closed, mailer shutting down");
                        break;
                    }
                },
            }
        }
    }

    /// Render and send the email for one event, if it is one we mail about.
    async fn handle(&self, event: &ExhibitionEvent) {
        let Some((subject, body)) = render(&self.exhibition_name, event) else {
            return;
        };

        let recipient = match self.recipient(event).await {
            Ok(Some(email)) => email,
            Ok(None) => {
                tracing::warn!(
                    event_type = %event.event_type,
                    entity_id = ?event.entity_id,
                    "No recipient found for notification"
                );
                return;
            }
            Err(e) => {
                tracing::error!(error = %e, event_type = %event.event_type, "Recipient lookup failed");
                return;
            }
        };

        if let Err(e) = self.delivery.deliver(&recipient, &subject, body).await {
            tracing::error!(
                error = %e,
                to = %recipient,
                event_type = %event.event_type,
                "Failed to send notification email"
            );
        }
    }

    /// Resolve the artist email behind the event's entity.
    async fn recipient(&self, event: &ExhibitionEvent) -> Result<Option<String>, sqlx::Error> {
        let (Some(entity_type), Some(entity_id)) = (&event.entity_type, event.entity_id) else {
            return Ok(None);
        };
        UserRepo::email_for_entity(&self.pool, entity_type, entity_id).await
    }
}

/// Render the subject and body for an event, `None` for events that do not
/// produce email.
///
/// Pure so the templates can be tested without SMTP or a database.
fn render(exhibition_name: &str, event: &ExhibitionEvent) -> Option<(String, String)> {
    let payload = &event.payload;
    let year = payload["year"].as_i64();

    let (subject, body) = match event.event_type.as_str() {
        "registration.submitted" => (
            format!("[{exhibition_name}] Registration received"),
            format!(
                "Thank you for your registration{}.\n\n\
                 We have received your submission and will review your entries. \
                 You will hear from us once the jury has decided.\n\n\
                 Please remember that your registration is only final once the \
                 registration fee has been paid.",
                year.map(|y| format!(" for {exhibition_name} {y}"))
                    .unwrap_or_default()
            ),
        ),
        "entry.accepted" => {
            let title = payload["title"].as_str().unwrap_or("your entry");
            let placement = payload["exhibit_number"]
                .as_str()
                .map(|n| format!("\n\nIt has been assigned exhibit number {n}."))
                .unwrap_or_default();
            (
                format!("[{exhibition_name}] Entry accepted: {title}"),
                format!(
                    "Good news! \"{title}\" has been accepted for {exhibition_name}.{placement}\n\n\
                     Practical information about delivery and installation follows \
                     closer to the opening."
                ),
            )
        }
        "entry.rejected" => {
            let title = payload["title"].as_str().unwrap_or("your entry");
            let reason = payload["reason"]
                .as_str()
                .map(|r| format!("\n\nThe jury noted: {r}"))
                .unwrap_or_default();
            (
                format!("[{exhibition_name}] Entry not selected: {title}"),
                format!(
                    "Unfortunately \"{title}\" was not selected for {exhibition_name} \
                     this year.{reason}\n\n\
                     We hope to see your work again next year."
                ),
            )
        }
        "payment.settled" => {
            let amount = payload["amount_cents"]
                .as_i64()
                .map(format_eur_cents)
                .unwrap_or_else(|| "the registration fee".to_string());
            (
                format!("[{exhibition_name}] Payment received"),
                format!(
                    "We have received your payment of {amount}.\n\n\
                     Your registration fee is settled; no further payment is needed."
                ),
            )
        }
        "registration.confirmed" => (
            format!("[{exhibition_name}] Participation confirmed"),
            format!(
                "Your participation in {exhibition_name}{} is confirmed.\n\n\
                 We look forward to exhibiting your work. Details about delivery, \
                 installation and the opening follow by separate mail.",
                year.map(|y| format!(" {y}")).unwrap_or_default()
            ),
        ),
        _ => return None,
    };

    Some((subject, body))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
