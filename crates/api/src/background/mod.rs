//! Background maintenance tasks spawned by the server binary.

pub mod session_cleanup;
