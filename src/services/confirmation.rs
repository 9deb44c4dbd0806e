//! Renders and sends the booking-confirmation message.
//!
//! Invoked after the booking is durably stored; the outcome never feeds back
//! into the booking's success response.

use crate::models::Booking;
use crate::services::mailer::Mailer;

const SUBJECT: &str = "Booking Confirmation - CarePair Auto Service";

pub async fn send_confirmation(mailer: &dyn Mailer, booking: &Booking) -> anyhow::Result<()> {
    let html = render_html(booking);
    let text = render_text(booking);
    mailer
        .send_message(&booking.customer.email, SUBJECT, &html, &text)
        .await
}

fn render_html(booking: &Booking) -> String {
    let notes_row = match &booking.service.notes {
        Some(notes) => format!(
            "<tr><td class=\"label\">Notes:</td><td>{}</td></tr>",
            escape_html(notes)
        ),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>Booking Confirmation</title>
  <style>
    body {{ font-family: Arial, sans-serif; color: #333; max-width: 600px; margin: 0 auto; }}
    .header {{ background-color: #2563eb; color: white; padding: 20px; text-align: center; }}
    .details {{ background-color: #f8fafc; padding: 20px; border: 1px solid #e2e8f0; }}
    .label {{ font-weight: bold; color: #475569; padding-right: 12px; }}
    .footer {{ background-color: #1e293b; color: white; padding: 16px; text-align: center; font-size: 14px; }}
  </style>
</head>
<body>
  <div class="header">
    <h1>Booking Confirmed!</h1>
    <p>Your appointment has been successfully scheduled</p>
  </div>
  <div class="details">
    <p>Dear {name},</p>
    <p>Thank you for choosing CarePair Auto Service! Here are your booking details:</p>
    <table>
      <tr><td class="label">Booking ID:</td><td>{id}</td></tr>
      <tr><td class="label">Phone:</td><td>{phone}</td></tr>
      <tr><td class="label">Vehicle:</td><td>{year} {make} {model}</td></tr>
      <tr><td class="label">License Plate:</td><td>{plate}</td></tr>
      <tr><td class="label">Service:</td><td>{service}</td></tr>
      <tr><td class="label">Date &amp; Time:</td><td>{date} at {time}</td></tr>
      {notes_row}
    </table>
    <p>Please arrive 10 minutes before your scheduled time and bring your
    driver's license and vehicle registration. If you need to reschedule,
    contact us as soon as possible.</p>
  </div>
  <div class="footer">
    <p><strong>CarePair Auto Service</strong> · Expert service, trusted care</p>
  </div>
</body>
</html>"#,
        name = escape_html(&booking.customer_name()),
        id = escape_html(&booking.id),
        phone = escape_html(&booking.customer.phone),
        year = booking.vehicle.year,
        make = escape_html(&booking.vehicle.make),
        model = escape_html(&booking.vehicle.model),
        plate = escape_html(&booking.vehicle.license_plate),
        service = escape_html(&booking.service.service_type),
        date = booking.service.date,
        time = escape_html(&booking.service.time),
    )
}

fn render_text(booking: &Booking) -> String {
    let mut text = format!(
        "BOOKING CONFIRMED - CarePair Auto Service\n\n\
         Dear {name},\n\n\
         Thank you for choosing CarePair Auto Service! Your appointment has been confirmed.\n\n\
         BOOKING DETAILS:\n\
         - Booking ID: {id}\n\
         - Phone: {phone}\n\
         - Vehicle: {year} {make} {model}\n\
         - License Plate: {plate}\n\
         - Service: {service}\n\
         - Date & Time: {date} at {time}\n",
        name = booking.customer_name(),
        id = booking.id,
        phone = booking.customer.phone,
        year = booking.vehicle.year,
        make = booking.vehicle.make,
        model = booking.vehicle.model,
        plate = booking.vehicle.license_plate,
        service = booking.service.service_type,
        date = booking.service.date,
        time = booking.service.time,
    );
    if let Some(notes) = &booking.service.notes {
        text.push_str(&format!("- Notes: {notes}\n"));
    }
    text.push_str(
        "\nPlease arrive 10 minutes before your scheduled time and bring your\n\
         driver's license and vehicle registration.\n\n\
         CarePair Auto Service - Expert service, trusted care\n",
    );
    text
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookingPayload;
    use chrono::Utc;

    fn booking(notes: Option<&str>) -> Booking {
        let payload = BookingPayload {
            first_name: "John".to_string(),
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
            notes: notes.map(String::from),
        };
        Booking::from_payload(&payload, Utc::now().naive_utc()).unwrap()
    }

    #[test]
    fn test_text_rendering_contains_details() {
        let b = booking(Some("Squeaky brakes"));
        let text = render_text(&b);
        assert!(text.contains("John Doe"));
        assert!(text.contains(&b.id));
        assert!(text.contains("2015 Toyota Corolla"));
        assert!(text.contains("Oil Change"));
        assert!(text.contains("2099-01-01 at 09:00 AM"));
        assert!(text.contains("Notes: Squeaky brakes"));
    }

    #[test]
    fn test_notes_omitted_when_absent() {
        let text = render_text(&booking(None));
        assert!(!text.contains("Notes:"));
        let html = render_html(&booking(None));
        assert!(!html.contains("Notes:"));
    }

    #[test]
    fn test_html_escapes_user_input() {
        let mut b = booking(Some("<script>alert(1)</script>"));
        b.customer.first_name = "A&B".to_string();
        let html = render_html(&b);
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("A&amp;B"));
    }
}
