//! Payment gateway client for registration fees.
//!
//! Talks to a Mollie-style payment API: a checkout is created at the
//! provider, the artist pays on the hosted checkout page, and the provider
//! later pings our webhook with nothing but the payment id. The webhook
//! handler re-fetches the payment to learn the authoritative status; the
//! webhook body itself is never trusted.

pub mod client;
pub mod config;

pub use client::{CreatedPayment, PaymentStatus, PaymentsClient, PaymentsError, PROVIDER_NAME};
pub use config::PaymentsConfig;
