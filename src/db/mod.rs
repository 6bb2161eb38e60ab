pub mod memory;
pub mod postgres;
pub mod redis;
pub mod seed;
pub mod store;

pub use memory::InMemoryStore;
pub use postgres::{create_pool, run_migrations, PgStore};
pub use self::redis::{create_redis_client, Cache, CacheKey, CacheWriterHandle};
pub use seed::seed_jobs_if_empty;
pub use store::{JobStore, UserStore};

#[cfg(test)]
pub use store::{MockJobStore, MockUserStore};
