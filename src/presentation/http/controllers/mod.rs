// src/presentation/http/controllers/mod.rs
pub mod categories;
pub mod post_versions;
pub mod posts;
