/// Database utilities
///
/// - `pool`: PostgreSQL connection pool management
/// - `migrations`: embedded migration runner

pub mod migrations;
pub mod pool;

pub use pool::{create_pool, DatabaseConfig};
