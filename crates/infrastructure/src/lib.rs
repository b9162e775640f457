//! Mailauth Infrastructure Layer
pub mod dns;
