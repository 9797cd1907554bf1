//! # Fyyur Common Library
//!
//! Shared code for the Fyyur booking directory:
//! - Database initialization, migrations and models
//! - Venue, artist and show persistence
//! - Contact field validation
//! - Genre list encoding
//! - Configuration loading

pub mod config;
pub mod db;
pub mod error;
pub mod genres;
pub mod time;
pub mod validation;

pub use error::{Error, Result};
