/// Domain services
///
/// One service per entity, wrapping a repository with required-field
/// checks, uniqueness checks, password hashing, and default-value
/// assignment, delegating everything else straight through. Each service
/// holds an `Arc<dyn …Repository>`, so the same code runs against Postgres
/// in production and [`crate::repository::MemoryStore`] in tests.
///
/// Control flow is strictly handler → service → repository → store; the
/// services never call each other.

pub mod category;
pub mod task;
pub mod user;

pub use category::CategoryService;
pub use task::TaskService;
pub use user::UserService;
