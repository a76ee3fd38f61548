//! HTML bodies for reservation emails and the email-link confirmation page.
//!
//! All guest-supplied values are HTML-escaped before interpolation.

use flamingo_core::reservation::ReservationStatus;
use flamingo_core::types::Timestamp;

use crate::EmailContent;

/// The reservation fields shown in emails.
#[derive(Debug, Clone)]
pub struct ReservationDetails<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub date: Timestamp,
    pub time: &'a str,
    pub comments: Option<&'a str>,
}

/// Escape the five HTML-significant characters.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// `Sat Jun 14 2025`
fn display_date(date: Timestamp) -> String {
    date.format("%a %b %d %Y").to_string()
}

fn detail_row(label: &str, value: &str) -> String {
    format!(
        "<tr><td style=\"padding: 8px; font-weight: bold;\">{label}:</td>\
         <td style=\"padding: 8px;\">{}</td></tr>",
        escape_html(value)
    )
}

/// Email to the restaurant with one-click approve and reject links.
pub fn admin_notification(
    details: &ReservationDetails<'_>,
    approve_url: &str,
    reject_url: &str,
) -> EmailContent {
    let html = format!(
        "<h2>New Reservation Request</h2>\
         <p><strong>Name:</strong> {name}</p>\
         <p><strong>Email:</strong> {email}</p>\
         <p><strong>Phone:</strong> {phone}</p>\
         <p><strong>Date:</strong> {date}</p>\
         <p><strong>Time:</strong> {time}</p>\
         <p><strong>Comments:</strong> {comments}</p>\
         <h3>Actions</h3>\
         <a href=\"{approve}\">Approve</a><br/>\
         <a href=\"{reject}\">Reject</a>",
        name = escape_html(details.name),
        email = escape_html(details.email),
        phone = escape_html(details.phone),
        date = display_date(details.date),
        time = escape_html(details.time),
        comments = escape_html(details.comments.unwrap_or("None")),
        approve = escape_html(approve_url),
        reject = escape_html(reject_url),
    );
    EmailContent {
        subject: "New Reservation Request".to_string(),
        html,
    }
}

/// Email to the guest once a decision has been made.
pub fn customer_status_update(
    details: &ReservationDetails<'_>,
    status: ReservationStatus,
) -> EmailContent {
    let (subject, message) = match status {
        ReservationStatus::Approved => (
            "Your Reservation is Confirmed!",
            "<p style=\"color: green; font-size: 16px;\"><strong>Good news!</strong> \
             Your reservation has been confirmed.</p>",
        ),
        _ => (
            "Reservation Update",
            "<p style=\"color: #d9534f; font-size: 16px;\">Unfortunately, your reservation \
             could not be accommodated at this time.</p>",
        ),
    };

    let mut rows = vec![
        detail_row("Name", details.name),
        detail_row("Phone", details.phone),
        detail_row("Date", &display_date(details.date)),
        detail_row("Time", details.time),
    ];
    if let Some(comments) = details.comments.filter(|c| !c.is_empty()) {
        rows.push(detail_row("Comments", comments));
    }
    rows.push(detail_row("Status", &status.as_str().to_uppercase()));

    let html = format!(
        "<div style=\"font-family: Arial, sans-serif; padding: 20px; max-width: 600px; margin: 0 auto;\">\
         <h2 style=\"color: #333;\">{subject}</h2>{message}\
         <hr style=\"border: 1px solid #eee; margin: 20px 0;\">\
         <h3 style=\"color: #555;\">Reservation Details:</h3>\
         <table style=\"width: 100%; border-collapse: collapse;\">{rows}</table>\
         <hr style=\"border: 1px solid #eee; margin: 20px 0;\">\
         <p style=\"color: #777; font-size: 14px;\">Thank you for your interest!</p>\
         </div>",
        rows = rows.concat(),
    );
    EmailContent {
        subject: subject.to_string(),
        html,
    }
}

/// Page shown after following an approve/reject link.
pub fn decision_page(reservation_id: i64, status: ReservationStatus, customer_notified: bool) -> String {
    let (title, colour) = match status {
        ReservationStatus::Approved => ("Approved", "#5cb85c"),
        _ => ("Rejected", "#d9534f"),
    };
    let notice = if customer_notified {
        "The customer has been notified via email."
    } else {
        "The customer could not be notified by email."
    };
    format!(
        "<html><head><title>Reservation {status}</title><style>\
         body {{ font-family: Arial, sans-serif; display: flex; justify-content: center; \
         align-items: center; height: 100vh; margin: 0; background: #f5f5f5; }}\
         .container {{ background: white; padding: 40px; border-radius: 8px; \
         box-shadow: 0 2px 10px rgba(0,0,0,0.1); text-align: center; }}\
         h1 {{ color: {colour}; }}\
         </style></head><body><div class=\"container\">\
         <h1>Reservation {title}</h1><p>{notice}</p>\
         <p><strong>Reservation ID:</strong> {reservation_id}</p>\
         </div></body></html>",
        status = status.as_str(),
    )
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn details() -> ReservationDetails<'static> {
        ReservationDetails {
            name: "Ana <b>",
            email: "ana@example.com",
            phone: "0771234567",
            date: Utc.with_ymd_and_hms(2025, 6, 14, 0, 0, 0).unwrap(),
            time: "19:30",
            comments: None,
        }
    }

    #[test]
    fn admin_email_has_links_and_escapes_input() {
        let email = admin_notification(
            &details(),
            "https://x/api/reservations-admin/7?action=approved&token=a",
            "https://x/api/reservations-admin/7?action=rejected&token=b",
        );
        assert_eq!(email.subject, "New Reservation Request");
        assert!(email.html.contains("Ana &lt;b&gt;"));
        assert!(email.html.contains("action=approved&amp;token=a"));
        assert!(email.html.contains("Sat Jun 14 2025"));
        assert!(email.html.contains("<strong>Comments:</strong> None"));
    }

    #[test]
    fn customer_email_reflects_decision() {
        let approved = customer_status_update(&details(), ReservationStatus::Approved);
        assert_eq!(approved.subject, "Your Reservation is Confirmed!");
        assert!(approved.html.contains("APPROVED"));
        assert!(!approved.html.contains("Comments:"));

        let mut with_comments = details();
        with_comments.comments = Some("Window seat");
        let rejected = customer_status_update(&with_comments, ReservationStatus::Rejected);
        assert_eq!(rejected.subject, "Reservation Update");
        assert!(rejected.html.contains("Window seat"));
        assert!(rejected.html.contains("REJECTED"));
    }

    #[test]
    fn decision_page_mentions_reservation() {
        let page = decision_page(42, ReservationStatus::Rejected, false);
        assert!(page.contains("Reservation Rejected"));
        assert!(page.contains("42"));
        assert!(page.contains("could not be notified"));
    }
}
