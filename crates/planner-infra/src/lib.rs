//! # Planner Infra
//!
//! Infrastructure implementations of the `planner-core` ports: a PostgreSQL
//! repository backed by SeaORM and an in-memory fallback store.

pub mod database;
