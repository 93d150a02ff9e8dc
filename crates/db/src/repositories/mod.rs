//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod artist_repo;
pub mod entry_repo;
pub mod event_repo;
pub mod image_repo;
pub mod payment_repo;
pub mod registration_repo;
pub mod session_repo;
pub mod user_repo;

pub use artist_repo::ArtistRepo;
pub use entry_repo::EntryRepo;
pub use event_repo::EventRepo;
pub use image_repo::ImageRepo;
pub use payment_repo::PaymentRepo;
pub use registration_repo::RegistrationRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
