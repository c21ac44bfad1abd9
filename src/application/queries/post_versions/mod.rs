mod get_by_id;
mod list;
mod service;

pub use get_by_id::GetPostVersionQuery;
pub use list::{ListPostVersionsQuery, ListUserPostVersionsQuery};
pub use service::PostVersionQueryService;
