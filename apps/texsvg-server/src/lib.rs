//! TexSvg Server Library
//!
//! Relays LaTeX documents to a remote compiler and returns the first page
//! of the resulting PDF as SVG.
//!
//! # Modules
//!
//! - `auth`: API key allow-list and middleware
//! - `compile`: multipart payload and remote compiler client
//! - `raster`: pdf2svg invocation and scratch file lifecycle
//! - `routes`: HTTP surface

pub mod auth;
pub mod compile;
pub mod config;
pub mod error;
pub mod raster;
pub mod routes;
pub mod state;
