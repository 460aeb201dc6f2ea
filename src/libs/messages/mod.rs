//! User-facing text for the whole application.
//!
//! Every line the CLI prints is a [`Message`] variant rendered through its
//! `Display` impl, and routed by the `msg_*` macros.

pub mod display;
pub mod macros;
pub mod types;

pub use types::Message;
