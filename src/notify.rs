use anyhow::{Context, Result};
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::Mailbox,
    transport::smtp::authentication::Credentials,
};
use tracing::error;

use crate::{
    config::SmtpConfig,
    submissions::{EnquiryFields, LoiFields, QuotationFields},
};

/// Outbound mail relay for operator notifications. Every message goes to the
/// fixed operator mailbox; the submitter's address is only ever a Reply-To,
/// never the authenticated sender.
#[derive(Clone)]
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    recipient: Mailbox,
}

impl Mailer {
    pub fn new(smtp: &SmtpConfig, recipient: &str) -> Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&smtp.host)
            .context("failed to configure SMTP relay")?
            .port(smtp.port)
            .credentials(Credentials::new(
                smtp.username.clone(),
                smtp.password.clone(),
            ))
            .build();

        let from: Mailbox = smtp
            .from_email
            .parse()
            .context("FROM_EMAIL is not a valid mailbox")?;
        let recipient: Mailbox = recipient
            .parse()
            .context("NOTIFY_EMAIL is not a valid mailbox")?;

        Ok(Self {
            transport,
            from,
            recipient,
        })
    }

    /// Sends one notification to the operator mailbox. Failures are logged
    /// and reported as `false`; callers treat a lost notification as
    /// non-fatal once the submission row is written.
    pub async fn notify(&self, reply_to: &str, subject: &str, body: String) -> bool {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .to(self.recipient.clone())
            .subject(subject);

        if let Ok(mailbox) = reply_to.parse::<Mailbox>() {
            builder = builder.reply_to(mailbox);
        }

        let message = match builder.body(body) {
            Ok(message) => message,
            Err(err) => {
                error!(?err, subject, "failed to build notification email");
                return false;
            }
        };

        match self.transport.send(message).await {
            Ok(_) => true,
            Err(err) => {
                error!(?err, subject, "failed to send notification email");
                false
            }
        }
    }
}

pub fn enquiry_email(fields: &EnquiryFields, ticket_no: &str) -> (String, String) {
    let subject = format!("New Contact Form Submission from {}", fields.name);
    let body = format!(
        "You have received a new contact form submission:\n\n\
         Ticket: {ticket_no}\n\
         Name: {name}\n\
         Email: {email}\n\n\
         Message:\n{message}\n",
        name = fields.name,
        email = fields.email,
        message = fields.message,
    );
    (subject, body)
}

pub fn quotation_email(fields: &QuotationFields, ticket_no: &str) -> (String, String) {
    let subject = format!("New Quotation Request from {}", fields.company);
    let body = format!(
        "You have received a new quotation request:\n\n\
         Ticket: {ticket_no}\n\
         Company: {company}\n\
         Contact Person: {name}\n\
         Email: {email}\n\
         Phone: {phone}\n\n\
         Product: {product}\n\
         Quantity: {quantity}\n\
         Delivery Terms: {delivery}\n\n\
         Additional Message:\n{message}\n",
        company = fields.company,
        name = fields.name,
        email = fields.email,
        phone = fields.phone,
        product = fields.product,
        quantity = fields.quantity,
        delivery = fields.delivery,
        message = fields.message,
    );
    (subject, body)
}

pub fn loi_email(fields: &LoiFields) -> (String, String) {
    let subject = format!("New LOI Submission from {}", fields.company_name);
    let body = format!(
        "You have received a new Letter of Intent submission:\n\n\
         Company: {company}\n\
         Representative: {rep}\n\
         Email: {email}\n\
         Phone: {phone}\n\n\
         Product: {product}\n\
         Quantity: {quantity}\n\n\
         LOI Details:\n{details}\n",
        company = fields.company_name,
        rep = fields.rep_name,
        email = fields.email,
        phone = fields.phone,
        product = fields.product,
        quantity = fields.quantity,
        details = serde_json::to_string_pretty(&fields.loi_data)
            .unwrap_or_else(|_| fields.loi_data.to_string()),
    );
    (subject, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn enquiry_email_lists_all_fields() {
        let fields = EnquiryFields {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            message: "Looking for pricing.".into(),
        };
        let (subject, body) = enquiry_email(&fields, "ENQ-20250314-0A9FF");
        assert_eq!(subject, "New Contact Form Submission from Ada");
        assert!(body.contains("Ticket: ENQ-20250314-0A9FF"));
        assert!(body.contains("Name: Ada"));
        assert!(body.contains("Email: ada@example.com"));
        assert!(body.contains("Looking for pricing."));
    }

    #[test]
    fn quotation_email_lists_trade_fields() {
        let fields = QuotationFields {
            company: "Acme Metals".into(),
            name: "Bo".into(),
            email: "bo@acme.example".into(),
            phone: "+1 555 0100".into(),
            product: "Copper cathode".into(),
            quantity: "500 MT".into(),
            delivery: "CIF Rotterdam".into(),
            message: String::new(),
        };
        let (subject, body) = quotation_email(&fields, "QT-20250314-1B2C3");
        assert_eq!(subject, "New Quotation Request from Acme Metals");
        assert!(body.contains("Ticket: QT-20250314-1B2C3"));
        assert!(body.contains("Delivery Terms: CIF Rotterdam"));
        assert!(body.contains("Quantity: 500 MT"));
    }

    #[test]
    fn loi_email_embeds_contract_blob() {
        let fields = LoiFields {
            company_name: "Acme Metals".into(),
            rep_name: "Cy".into(),
            email: "cy@acme.example".into(),
            phone: "+1 555 0101".into(),
            product: "Aluminium ingot".into(),
            quantity: "1000 MT".into(),
            loi_data: json!({"incoterms": "FOB", "bank": "First National"}),
        };
        let (subject, body) = loi_email(&fields);
        assert_eq!(subject, "New LOI Submission from Acme Metals");
        assert!(body.contains("Representative: Cy"));
        assert!(body.contains("incoterms"));
        assert!(body.contains("First National"));
    }
}
