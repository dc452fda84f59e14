use std::time::Duration;

use reqwest::{Client, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::{EmailMessage, Mailbox};

/// Provider statuses relayed to the caller together with the message
/// extracted from the error payload. Everything else is `Unrecognized`.
const RELAYED_STATUSES: [u16; 7] = [400, 401, 403, 404, 405, 413, 500];

#[derive(Clone)]
pub struct EmailClient {
    http_client: Client,
    base_url: Url,
    api_key: SecretString,
}

/// Provider verdict for one send attempt.
#[derive(Debug)]
pub enum SendOutcome {
    Accepted,
    Rejected { status: u16, message: String },
    Unrecognized { status: u16 },
}

#[derive(Serialize)]
struct EmailUnit<'a> {
    email: &'a str,
    name: &'a str,
}

impl<'a> EmailUnit<'a> {
    fn new(mailbox: &'a Mailbox) -> Self {
        Self {
            email: mailbox.address.as_ref(),
            name: &mailbox.name,
        }
    }
}

#[derive(Serialize)]
struct Personalization<'a> {
    to: [EmailUnit<'a>; 1],
}

#[derive(Serialize)]
struct ContentBlock<'a> {
    #[serde(rename = "type")]
    content_type: &'a str,
    value: &'a str,
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    personalizations: [Personalization<'a>; 1],
    from: EmailUnit<'a>,
    subject: &'a str,
    content: [ContentBlock<'a>; 1],
}

#[derive(Deserialize)]
struct ProviderErrorBody {
    errors: ProviderError,
}

#[derive(Deserialize)]
struct ProviderError {
    message: String,
}

impl EmailClient {
    pub fn new(base_url: String, api_key: SecretString, timeout: Duration) -> Self {
        Self {
            http_client: Client::builder().timeout(timeout).build().unwrap(),
            base_url: Url::parse(&base_url).expect("Failed parsing base email api url."),
            api_key,
        }
    }

    pub async fn send(&self, message: &EmailMessage) -> Result<SendOutcome, reqwest::Error> {
        let url = self
            .base_url
            .join("v3/mail/send")
            .expect("Failed joining route to email api url.");

        let body = SendEmailRequest {
            personalizations: [Personalization {
                to: [EmailUnit::new(&message.to)],
            }],
            from: EmailUnit::new(&message.from),
            subject: &message.subject,
            content: [ContentBlock {
                content_type: "text/html",
                value: &message.content_html,
            }],
        };

        let response = self
            .http_client
            .post(url)
            .header(
                "Authorization",
                "Bearer ".to_owned() + self.api_key.expose_secret(),
            )
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        if status == 202 {
            return Ok(SendOutcome::Accepted);
        }

        if RELAYED_STATUSES.contains(&status) {
            // A relayed status without a readable `errors.message` carries
            // nothing we are willing to pass through.
            return match response.json::<ProviderErrorBody>().await {
                Ok(body) => Ok(SendOutcome::Rejected {
                    status,
                    message: body.errors.message,
                }),
                Err(_) => Ok(SendOutcome::Unrecognized { status }),
            };
        }

        Ok(SendOutcome::Unrecognized { status })
    }
}
