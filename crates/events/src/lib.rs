//! Exhibition event bus and notification infrastructure.
//!
//! Building blocks for the platform-wide event system:
//!
//! - [`EventBus`] -- in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`ExhibitionEvent`] -- the canonical domain event envelope.
//! - [`EventPersistence`] -- background service that durably writes every
//!   event to the `events` table.
//! - [`Mailer`] -- background service that turns selected events into
//!   confirmation emails to the affected artist.

pub mod bus;
pub mod delivery;
pub mod mailer;
pub mod persistence;

pub use bus::{EventBus, ExhibitionEvent};
pub use delivery::email::{EmailConfig, EmailDelivery};
pub use mailer::Mailer;
pub use persistence::EventPersistence;
