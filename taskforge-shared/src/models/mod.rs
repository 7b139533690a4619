/// Entity definitions for Taskforge
///
/// Plain data shapes plus their enumerations; all persistence lives behind
/// the traits in [`crate::repository`].
///
/// # Models
///
/// - `user`: User accounts (unique username/email, hashed password)
/// - `task`: Units of work owned by a user, optionally categorized
/// - `category`: User-defined labels for grouping tasks
///
/// Every entity carries a `deleted_at` soft-delete marker. A record with
/// `deleted_at` set is invisible to every read path; nothing is ever
/// physically removed through the modeled surface.

pub mod category;
pub mod task;
pub mod user;

pub use category::{Category, CreateCategory};
pub use task::{CreateTask, Task, TaskPriority, TaskStatus};
pub use user::{CreateUser, User};
