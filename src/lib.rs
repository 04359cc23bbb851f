// src/lib.rs

//! Catalog Scraper Library
//!
//! Maps a vendor product catalog to product images, downloads the images,
//! and cleans the resulting name to URL mapping.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod utils;
