//! Plex server integration
//!
//! The adapter is split into three layers: serde projections of the Plex
//! HTTP payloads (`wire`), the `PlexBackend` trait covering the handful of
//! remote calls we make (`backend`, with the reqwest implementation in
//! `http`), and the `PlexClient` adapter that reshapes results into plain
//! records (`client`).

pub mod backend;
pub mod client;
pub mod http;
pub mod wire;

pub use backend::PlexBackend;
pub use client::PlexClient;
pub use http::HttpBackend;
