use chrono::{NaiveDate, NaiveDateTime, Utc};
use rusqlite::{params, Connection};

use crate::models::{Booking, BookingStatus, Customer, ServiceDetails, Vehicle};

const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";
const DATE_FMT: &str = "%Y-%m-%d";

pub fn insert_booking(conn: &Connection, booking: &Booking) -> anyhow::Result<()> {
    let service_date = booking.service.date.format(DATE_FMT).to_string();
    let created_at = booking.created_at.format(DATETIME_FMT).to_string();
    let updated_at = booking.updated_at.format(DATETIME_FMT).to_string();

    conn.execute(
        "INSERT INTO bookings (id, first_name, last_name, email, phone, make, model, year, license_plate, service_type, service_date, service_time, notes, status, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
        params![
            booking.id,
            booking.customer.first_name,
            booking.customer.last_name,
            booking.customer.email,
            booking.customer.phone,
            booking.vehicle.make,
            booking.vehicle.model,
            booking.vehicle.year,
            booking.vehicle.license_plate,
            booking.service.service_type,
            service_date,
            booking.service.time,
            booking.service.notes,
            booking.status.as_str(),
            created_at,
            updated_at,
        ],
    )?;
    Ok(())
}

pub fn get_recent_bookings(conn: &Connection, limit: i64) -> anyhow::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(
        "SELECT id, first_name, last_name, email, phone, make, model, year, license_plate, service_type, service_date, service_time, notes, status, created_at, updated_at
         FROM bookings ORDER BY created_at DESC, rowid DESC LIMIT ?1",
    )?;

    let rows = stmt.query_map(params![limit], |row| Ok(parse_booking_row(row)))?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }
    Ok(bookings)
}

fn parse_booking_row(row: &rusqlite::Row) -> anyhow::Result<Booking> {
    let id: String = row.get(0)?;
    let first_name: String = row.get(1)?;
    let last_name: String = row.get(2)?;
    let email: String = row.get(3)?;
    let phone: String = row.get(4)?;
    let make: String = row.get(5)?;
    let model: String = row.get(6)?;
    let year: i32 = row.get(7)?;
    let license_plate: String = row.get(8)?;
    let service_type: String = row.get(9)?;
    let service_date_str: String = row.get(10)?;
    let service_time: String = row.get(11)?;
    let notes: Option<String> = row.get(12)?;
    let status_str: String = row.get(13)?;
    let created_at_str: String = row.get(14)?;
    let updated_at_str: String = row.get(15)?;

    let date = NaiveDate::parse_from_str(&service_date_str, DATE_FMT)
        .unwrap_or_else(|_| Utc::now().date_naive());
    let created_at = NaiveDateTime::parse_from_str(&created_at_str, DATETIME_FMT)
        .unwrap_or_else(|_| Utc::now().naive_utc());
    let updated_at = NaiveDateTime::parse_from_str(&updated_at_str, DATETIME_FMT)
        .unwrap_or_else(|_| Utc::now().naive_utc());

    Ok(Booking {
        id,
        customer: Customer {
            first_name,
            last_name,
            email,
            phone,
        },
        vehicle: Vehicle {
            make,
            model,
            year,
            license_plate,
        },
        service: ServiceDetails {
            service_type,
            date,
            time: service_time,
            notes,
        },
        status: BookingStatus::parse(&status_str),
        created_at,
        updated_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::models::BookingPayload;

    fn sample_booking(first_name: &str, created_at: &str) -> Booking {
        let payload = BookingPayload {
            first_name: first_name.to_string(),
            last_name: "Doe".to_string(),
            email: "john@ex.com".to_string(),
            phone: "555-0123-4".to_string(),
            make: "Toyota".to_string(),
            model: "Corolla".to_string(),
            year: "2015".to_string(),
            license_plate: "AB-123".to_string(),
            service_type: "Oil Change".to_string(),
            date: "2099-01-01".to_string(),
            time: "09:00 AM".to_string(),
            notes: None,
        };
        let now = NaiveDateTime::parse_from_str(created_at, DATETIME_FMT).unwrap();
        Booking::from_payload(&payload, now).unwrap()
    }

    #[test]
    fn test_insert_and_read_back() {
        let conn = db::init_db(":memory:").unwrap();
        let booking = sample_booking("John", "2025-01-01 10:00:00");
        insert_booking(&conn, &booking).unwrap();

        let found = get_recent_bookings(&conn, 10).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, booking.id);
        assert_eq!(found[0].customer.email, "john@ex.com");
        assert_eq!(found[0].vehicle.year, 2015);
        assert_eq!(found[0].status, BookingStatus::Pending);
        assert_eq!(found[0].service.date.to_string(), "2099-01-01");
    }

    #[test]
    fn test_recent_bookings_newest_first_and_bounded() {
        let conn = db::init_db(":memory:").unwrap();
        insert_booking(&conn, &sample_booking("First", "2025-01-01 10:00:00")).unwrap();
        insert_booking(&conn, &sample_booking("Second", "2025-01-02 10:00:00")).unwrap();
        insert_booking(&conn, &sample_booking("Third", "2025-01-03 10:00:00")).unwrap();

        let found = get_recent_bookings(&conn, 2).unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].customer.first_name, "Third");
        assert_eq!(found[1].customer.first_name, "Second");
    }

    #[test]
    fn test_insert_tie_break_on_same_timestamp() {
        let conn = db::init_db(":memory:").unwrap();
        insert_booking(&conn, &sample_booking("Earlier", "2025-01-01 10:00:00")).unwrap();
        insert_booking(&conn, &sample_booking("Later", "2025-01-01 10:00:00")).unwrap();

        let found = get_recent_bookings(&conn, 10).unwrap();
        assert_eq!(found[0].customer.first_name, "Later");
    }
}
