use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::{Booking, BookingPayload};
use crate::services::confirmation;
use crate::state::AppState;
use crate::validation::{self, Rule};

/// Upper bound on the admin listing.
const MAX_LISTED_BOOKINGS: i64 = 100;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingResponse {
    success: bool,
    booking_id: String,
    message: &'static str,
}

#[derive(Serialize)]
pub struct BookingsResponse {
    bookings: Vec<Booking>,
}

/// Every field of the payload with its validator choice. The rule content is
/// identical to the per-step checks the form runs; the server never trusts
/// the client to have run them.
fn payload_fields(payload: &BookingPayload) -> Vec<(&'static str, &str, Rule)> {
    vec![
        ("firstName", payload.first_name.as_str(), Rule::Name("First name")),
        ("lastName", payload.last_name.as_str(), Rule::Name("Last name")),
        ("email", payload.email.as_str(), Rule::Email),
        ("phone", payload.phone.as_str(), Rule::Phone),
        ("make", payload.make.as_str(), Rule::Required("Make")),
        ("model", payload.model.as_str(), Rule::Required("Model")),
        ("year", payload.year.as_str(), Rule::Year),
        ("licensePlate", payload.license_plate.as_str(), Rule::LicensePlate),
        ("serviceType", payload.service_type.as_str(), Rule::Required("Service type")),
        ("date", payload.date.as_str(), Rule::Date),
        ("time", payload.time.as_str(), Rule::Required("Time")),
    ]
}

// POST /api/bookings
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<CreateBookingResponse>), AppError> {
    // The body is parsed by hand so a malformed payload lands in the
    // client-error category instead of a framework rejection.
    let payload: BookingPayload =
        serde_json::from_slice(&body).map_err(|e| AppError::InvalidBody(e.to_string()))?;

    let errors = validation::collect(payload_fields(&payload));
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let now = Utc::now().naive_utc();
    let booking = Booking::from_payload(&payload, now).map_err(|source| AppError::Storage {
        message: "Failed to create booking",
        source,
    })?;

    let booking_id = state
        .store
        .insert_booking(&booking)
        .await
        .map_err(|source| AppError::Storage {
            message: "Failed to create booking",
            source,
        })?;

    tracing::info!(booking_id = %booking_id, service = %booking.service.service_type, "booking created");

    // Fire-and-forget: the confirmation is dispatched after the durable
    // write and its outcome is observed only by the log.
    if let Some(mailer) = state.mailer.clone() {
        let booking = booking.clone();
        tokio::spawn(async move {
            match confirmation::send_confirmation(mailer.as_ref(), &booking).await {
                Ok(()) => {
                    tracing::info!(booking_id = %booking.id, "confirmation email sent");
                }
                Err(e) => {
                    tracing::warn!(booking_id = %booking.id, error = %format!("{e:#}"), "failed to send confirmation email");
                }
            }
        });
    }

    Ok((
        StatusCode::CREATED,
        Json(CreateBookingResponse {
            success: true,
            booking_id,
            message: "Booking created successfully",
        }),
    ))
}

// GET /api/bookings
pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BookingsResponse>, AppError> {
    let bookings = state
        .store
        .recent_bookings(MAX_LISTED_BOOKINGS)
        .await
        .map_err(|source| AppError::Storage {
            message: "Failed to fetch bookings",
            source,
        })?;

    Ok(Json(BookingsResponse { bookings }))
}
