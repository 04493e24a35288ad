use std::sync::Mutex;

use async_trait::async_trait;

use super::{Notifier, NotifyOutcome};
use crate::models::Booking;
use crate::state::lock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

pub fn render_confirmation(to: &str, booking: &Booking, support_email: &str) -> RenderedEmail {
    let seats = booking
        .seats
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    let discount_row = if booking.discount_percentage > 0 {
        format!(
            "<tr><td>Discount</td><td>{}%</td></tr>",
            booking.discount_percentage
        )
    } else {
        String::new()
    };

    let html = format!(
        r#"<html>
<body style="font-family: Arial, sans-serif;">
<h2>Booking Confirmed</h2>
<p>Your bus ticket from <strong>{from}</strong> to <strong>{to_city}</strong> is confirmed.</p>
<table>
<tr><td>Booking ID</td><td>{id}</td></tr>
<tr><td>Travel date</td><td>{date}</td></tr>
<tr><td>Passengers</td><td>{passengers}</td></tr>
<tr><td>Seats</td><td>{seats}</td></tr>
<tr><td>Bus type</td><td>{class}</td></tr>
<tr><td>Bus number</td><td>{bus}</td></tr>
<tr><td>Driver contact</td><td>{driver}</td></tr>
{discount_row}<tr><td>Total amount</td><td>&#8377;{amount}</td></tr>
<tr><td>Payment</td><td>{payment}</td></tr>
</table>
<p>Please reach the boarding point 15 minutes before departure.</p>
<p>Questions? Write to {support_email}.</p>
</body>
</html>"#,
        from = booking.from_city,
        to_city = booking.to_city,
        id = booking.booking_id,
        date = booking.date.format("%d %b %Y"),
        passengers = booking.passenger_count,
        class = booking.bus_class,
        bus = booking.bus_number,
        driver = booking.driver_contact,
        amount = booking.final_amount,
        payment = booking.payment_mode.as_str(),
    );

    RenderedEmail {
        to: to.to_string(),
        subject: format!("Booking Confirmed - {}", booking.booking_id),
        html,
    }
}

/// Renders confirmation emails into an in-memory outbox instead of sending them.
pub struct SimulatedEmailNotifier {
    support_email: String,
    outbox: Mutex<Vec<RenderedEmail>>,
}

impl SimulatedEmailNotifier {
    pub fn new(support_email: impl Into<String>) -> Self {
        Self {
            support_email: support_email.into(),
            outbox: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<RenderedEmail> {
        lock(&self.outbox).clone()
    }
}

#[async_trait]
impl Notifier for SimulatedEmailNotifier {
    async fn notify(&self, email: &str, booking: &Booking) -> NotifyOutcome {
        if !email.contains('@') {
            tracing::warn!(booking_id = %booking.booking_id, "no usable email address for confirmation");
            return NotifyOutcome::failed(format!("invalid email address: {email}"));
        }

        let rendered = render_confirmation(email, booking, &self.support_email);
        tracing::info!(
            booking_id = %booking.booking_id,
            subject = %rendered.subject,
            "confirmation email queued"
        );
        lock(&self.outbox).push(rendered);
        NotifyOutcome::sent("Email would be sent in production")
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::{BusClass, Money, PaymentMode};

    fn booking() -> Booking {
        Booking {
            booking_id: "BK654321".to_string(),
            from_city: "Hyderabad".to_string(),
            to_city: "Bangalore".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 11, 9).unwrap(),
            passenger_count: 2,
            seats: vec![3, 7],
            bus_class: BusClass::Sleeper,
            final_amount: Money::from_rupees(1200),
            discount_percentage: 25,
            bus_number: "BUS-3030".to_string(),
            driver_contact: "+91-88888-12345".to_string(),
            payment_mode: PaymentMode::CashOnBoarding,
            created_at: NaiveDate::from_ymd_opt(2025, 11, 1)
                .unwrap()
                .and_hms_opt(7, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_render_confirmation() {
        let email = render_confirmation("a@b.c", &booking(), "support@busbooking.com");
        assert_eq!(email.subject, "Booking Confirmed - BK654321");
        assert!(email.html.contains("3, 7"));
        assert!(email.html.contains("1200.00"));
        assert!(email.html.contains("25%"));
        assert!(email.html.contains("09 Nov 2025"));
        assert!(email.html.contains("support@busbooking.com"));
    }

    #[tokio::test]
    async fn test_outbox_records_sent_mail() {
        let notifier = SimulatedEmailNotifier::new("support@busbooking.com");
        let outcome = notifier.notify("rider@example.com", &booking()).await;
        assert!(outcome.success);
        assert_eq!(outcome.message, "Email would be sent in production");
        assert_eq!(notifier.sent().len(), 1);
        assert_eq!(notifier.sent()[0].to, "rider@example.com");
    }

    #[tokio::test]
    async fn test_bad_address_fails() {
        let notifier = SimulatedEmailNotifier::new("support@busbooking.com");
        let outcome = notifier.notify("not-an-address", &booking()).await;
        assert!(outcome.clone().into_result().is_err());
        assert!(notifier.sent().is_empty());
    }
}
