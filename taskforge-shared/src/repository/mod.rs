/// Persistence accessors
///
/// One trait per entity, each offering create/get/update/delete/list against
/// the store. Two backends exist: the Postgres implementations used in
/// production (`Pg*Repository`) and [`memory::MemoryStore`], an in-process
/// substitute that implements all three traits for tests.
///
/// Soft delete is a marker-plus-filter convention: every read path in every
/// backend filters `deleted_at IS NULL` explicitly, and delete is an update
/// that sets the marker. Deleting an already-deleted record reports
/// `NotFound`.

pub mod category;
pub mod memory;
pub mod task;
pub mod user;

pub use category::{CategoryRepository, PgCategoryRepository};
pub use memory::MemoryStore;
pub use task::{PgTaskRepository, TaskRepository};
pub use user::{PgUserRepository, UserRepository};
