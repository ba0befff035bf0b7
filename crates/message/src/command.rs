use sqlx::SqlitePool;

mod create;

pub use create::*;

#[derive(Clone)]
pub struct Command(pub SqlitePool);
