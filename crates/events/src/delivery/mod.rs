//! External delivery channels for event notifications.

pub mod email;
