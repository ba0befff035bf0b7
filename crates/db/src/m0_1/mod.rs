mod message;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "contactus",
    "m0_1",
    vec_box![],
    vec_box![message::CreateTable, message::CreateIdx1]
);
