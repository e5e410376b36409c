//! Domain logic for the SCROLLIT short-video platform.
//!
//! This crate is deliberately free of internal dependencies so the feed
//! state machine and validation rules can be used by the API server, the
//! client library, and any future tooling alike.

pub mod error;
pub mod feed;
pub mod types;
pub mod upload;
pub mod video;
