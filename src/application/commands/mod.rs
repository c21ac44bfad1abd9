pub mod post_versions;
