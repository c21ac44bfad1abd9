pub mod auth;
pub mod categories;
pub mod post_versions;
pub mod posts;
pub mod serde_time;

pub use auth::{AuthTokenDto, AuthenticatedUser, TokenSubject};
pub use categories::CategoryDto;
pub use post_versions::{PostVersionActionDto, PostVersionDetailDto, PostVersionDto};
pub use posts::PostDto;
