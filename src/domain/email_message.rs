use crate::domain::EmailAddress;

#[derive(Debug, Clone)]
pub struct Mailbox {
    pub address: EmailAddress,
    pub name: String,
}

/// One outbound email, built from a single submission and dropped with it.
/// Field values are carried verbatim; only the two addresses are parsed.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub from: Mailbox,
    pub to: Mailbox,
    pub subject: String,
    pub content_html: String,
}

impl EmailMessage {
    pub fn new(
        from_address: String,
        from_name: String,
        to_address: String,
        to_name: String,
        subject: String,
        content_html: String,
    ) -> Result<Self, String> {
        let from = Mailbox {
            address: EmailAddress::parse(from_address)?,
            name: from_name,
        };
        let to = Mailbox {
            address: EmailAddress::parse(to_address)?,
            name: to_name,
        };

        Ok(Self {
            from,
            to,
            subject,
            content_html,
        })
    }
}
