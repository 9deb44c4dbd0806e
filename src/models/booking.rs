use anyhow::Context;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Raw submission payload as the browser sends it. Missing keys default to
/// empty strings so they fall through to field validation instead of failing
/// deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub make: String,
    pub model: String,
    pub year: String,
    pub license_plate: String,
    pub service_type: String,
    pub date: String,
    pub time: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub license_plate: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDetails {
    #[serde(rename = "type")]
    pub service_type: String,
    pub date: NaiveDate,
    pub time: String,
    pub notes: Option<String>,
}

/// Normalized booking record, created once at submission time and immutable
/// afterwards within this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub customer: Customer,
    pub vehicle: Vehicle,
    pub service: ServiceDetails,
    pub status: BookingStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Booking {
    /// Build the persisted record from a validated payload: strings trimmed,
    /// email lowercased, license plate uppercased, year and date parsed.
    /// Only reachable after full-payload validation has passed, so parse
    /// failures indicate a caller bug and surface as errors, not panics.
    pub fn from_payload(payload: &BookingPayload, now: NaiveDateTime) -> anyhow::Result<Self> {
        let year: i32 = payload
            .year
            .trim()
            .parse()
            .context("vehicle year is not a number")?;
        let date = NaiveDate::parse_from_str(payload.date.trim(), "%Y-%m-%d")
            .context("service date is not a valid date")?;

        let notes = payload
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        Ok(Booking {
            id: uuid::Uuid::new_v4().to_string(),
            customer: Customer {
                first_name: payload.first_name.trim().to_string(),
                last_name: payload.last_name.trim().to_string(),
                email: payload.email.trim().to_lowercase(),
                phone: payload.phone.trim().to_string(),
            },
            vehicle: Vehicle {
                make: payload.make.trim().to_string(),
                model: payload.model.trim().to_string(),
                year,
                license_plate: payload.license_plate.trim().to_uppercase(),
            },
            service: ServiceDetails {
                service_type: payload.service_type.trim().to_string(),
                date,
                time: payload.time.trim().to_string(),
                notes,
            },
            status: BookingStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn customer_name(&self) -> String {
        format!("{} {}", self.customer.first_name, self.customer.last_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "confirmed" => BookingStatus::Confirmed,
            "cancelled" => BookingStatus::Cancelled,
            _ => BookingStatus::Pending,
        }
    }
}
