//! REST client for the payment gateway.

use serde::Deserialize;

use plinth_core::money::eur_decimal_string;
use plinth_core::types::DbId;

use crate::config::PaymentsConfig;

/// Provider name recorded on payment rows.
pub const PROVIDER_NAME: &str = "mollie";

/// HTTP client for the payment gateway.
///
/// Cheap to clone; the inner HTTP client is reference-counted.
#[derive(Clone)]
pub struct PaymentsClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    redirect_url: String,
    webhook_url: String,
}

/// Payment status as reported by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Open,
    Paid,
    Failed,
    Expired,
    Cancelled,
}

impl PaymentStatus {
    /// The string stored in the `payments.status` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Paid => "paid",
            Self::Failed => "failed",
            Self::Expired => "expired",
            Self::Cancelled => "cancelled",
        }
    }
}

/// A payment as returned by the gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedPayment {
    /// The gateway's payment id, e.g. `tr_WDqYK6vllg`.
    pub id: String,
    pub status: PaymentStatus,
    #[serde(rename = "_links", default)]
    links: Links,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct Links {
    checkout: Option<Link>,
}

#[derive(Debug, Clone, Deserialize)]
struct Link {
    href: String,
}

impl CreatedPayment {
    /// URL of the hosted checkout page, when the payment is still payable.
    pub fn checkout_url(&self) -> Option<&str> {
        self.links.checkout.as_ref().map(|l| l.href.as_str())
    }
}

/// Errors from the payment gateway layer.
#[derive(Debug, thiserror::Error)]
pub enum PaymentsError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The gateway returned a non-2xx status code.
    #[error("Payment gateway error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl PaymentsClient {
    /// Create a new gateway client.
    pub fn new(config: &PaymentsConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            redirect_url: config.redirect_url.clone(),
            webhook_url: config.webhook_url.clone(),
        }
    }

    /// Create a checkout for a registration fee.
    ///
    /// Sends a `POST /payments` request. The registration id travels in the
    /// metadata so reconciliation stays possible even if our row is lost.
    pub async fn create_payment(
        &self,
        registration_id: DbId,
        amount_cents: i64,
        currency: &str,
        description: &str,
    ) -> Result<CreatedPayment, PaymentsError> {
        let body = serde_json::json!({
            "amount": {
                "currency": currency,
                "value": eur_decimal_string(amount_cents),
            },
            "description": description,
            "redirectUrl": self.redirect_url,
            "webhookUrl": self.webhook_url,
            "metadata": {
                "registration_id": registration_id,
            },
        });

        let response = self
            .client
            .post(format!("{}/payments", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let payment: CreatedPayment = Self::parse_response(response).await?;
        tracing::info!(
            registration_id,
            payment_id = %payment.id,
            "created checkout at payment gateway"
        );
        Ok(payment)
    }

    /// Fetch the authoritative state of a payment.
    ///
    /// Sends a `GET /payments/{id}` request. Used by the webhook handler,
    /// which never trusts the webhook body.
    pub async fn get_payment(&self, payment_id: &str) -> Result<CreatedPayment, PaymentsError> {
        let response = self
            .client
            .get(format!("{}/payments/{}", self.base_url, payment_id))
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Parse a successful JSON response body into the expected type, or a
    /// [`PaymentsError::ApiError`] containing the status and body text.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, PaymentsError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(PaymentsError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_deserializes_from_gateway_json() {
        let json = r#"{
            "id": "tr_WDqYK6vllg",
            "status": "open",
            "_links": {
                "checkout": { "href": "https://pay.example.com/tr_WDqYK6vllg" }
            }
        }"#;
        let payment: CreatedPayment = serde_json::from_str(json).unwrap();
        assert_eq!(payment.id, "tr_WDqYK6vllg");
        assert_eq!(payment.status, PaymentStatus::Open);
        assert_eq!(
            payment.checkout_url(),
            Some("https://pay.example.com/tr_WDqYK6vllg")
        );
    }

    #[test]
    fn settled_payment_has_no_checkout_link() {
        let json = r#"{ "id": "tr_x", "status": "paid" }"#;
        let payment: CreatedPayment = serde_json::from_str(json).unwrap();
        assert_eq!(payment.status, PaymentStatus::Paid);
        assert_eq!(payment.checkout_url(), None);
    }

    #[test]
    fn status_strings_match_schema_values() {
        for (status, s) in [
            (PaymentStatus::Open, "open"),
            (PaymentStatus::Paid, "paid"),
            (PaymentStatus::Failed, "failed"),
            (PaymentStatus::Expired, "expired"),
            (PaymentStatus::Cancelled, "cancelled"),
        ] {
            assert_eq!(status.as_str(), s);
        }
    }
}
