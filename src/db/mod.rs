pub mod migrations;
pub mod queries;

use std::sync::{Arc, Mutex};

use anyhow::Context;
use async_trait::async_trait;
use rusqlite::Connection;

use crate::models::Booking;

pub fn init_db(path: &str) -> anyhow::Result<Connection> {
    let conn = Connection::open(path).context("failed to open database")?;

    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
        .context("failed to set database pragmas")?;

    migrations::run_migrations(&conn)?;

    Ok(conn)
}

/// Storage collaborator the submission handler talks to. The handler owns no
/// reference to a record after the insert acknowledgment; durability is the
/// store's single-document insert.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Persist one booking and return its assigned identifier.
    async fn insert_booking(&self, booking: &Booking) -> anyhow::Result<String>;

    /// Most recently created bookings, newest first, bounded by `limit`.
    async fn recent_bookings(&self, limit: i64) -> anyhow::Result<Vec<Booking>>;
}

pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }
}

#[async_trait]
impl BookingStore for SqliteStore {
    async fn insert_booking(&self, booking: &Booking) -> anyhow::Result<String> {
        let conn = self.conn.lock().unwrap();
        queries::insert_booking(&conn, booking)?;
        Ok(booking.id.clone())
    }

    async fn recent_bookings(&self, limit: i64) -> anyhow::Result<Vec<Booking>> {
        let conn = self.conn.lock().unwrap();
        queries::get_recent_bookings(&conn, limit)
    }
}
