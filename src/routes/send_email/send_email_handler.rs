use std::collections::HashMap;

use actix_web::{Either, HttpResponse, web};

use super::{
    errors::SendEmailError,
    types::{MissingFieldsBody, REQUIRED_FIELDS},
};
use crate::{
    domain::EmailMessage,
    email_client::{EmailClient, SendOutcome},
};

/// Form-encoded and JSON bodies are treated uniformly as string key-value
/// pairs; keys outside `REQUIRED_FIELDS` are ignored.
type Submission = Either<web::Form<HashMap<String, String>>, web::Json<HashMap<String, String>>>;

#[tracing::instrument(
    name = "Relaying an email submission",
    skip(submission, email_client),
    fields(
        to_address = tracing::field::Empty,
        subject = tracing::field::Empty
    )
)]
pub async fn send_email(
    submission: Submission,
    email_client: web::Data<EmailClient>,
) -> Result<HttpResponse, SendEmailError> {
    let mut fields = match submission {
        Either::Left(form) => form.into_inner(),
        Either::Right(json) => json.into_inner(),
    };

    let missing: Vec<&'static str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|key| !fields.contains_key(*key))
        .collect();
    if !missing.is_empty() {
        tracing::info!(?missing, "Rejecting a submission with missing fields");
        return Ok(HttpResponse::BadRequest().json(MissingFieldsBody::new(missing)));
    }

    let message = EmailMessage::new(
        take(&mut fields, "from_address"),
        take(&mut fields, "from_name"),
        take(&mut fields, "to_address"),
        take(&mut fields, "to_name"),
        take(&mut fields, "subject"),
        take(&mut fields, "content_html"),
    )
    .map_err(SendEmailError::InvalidMessage)?;

    tracing::Span::current().record(
        "to_address",
        tracing::field::display(message.to.address.as_ref()),
    );
    tracing::Span::current().record("subject", tracing::field::display(&message.subject));

    let outcome = email_client
        .send(&message)
        .await
        .map_err(|e| SendEmailError::UnexpectedError(e.into()))?;

    match outcome {
        SendOutcome::Accepted => Ok(HttpResponse::Ok().finish()),
        SendOutcome::Rejected { status, message } => {
            Err(SendEmailError::Provider { status, message })
        }
        SendOutcome::Unrecognized { status } => {
            tracing::warn!(status, "Provider returned an unrecognized response");
            Err(SendEmailError::UnknownResponse)
        }
    }
}

// Presence of every required key is checked above, so the default is never hit.
fn take(fields: &mut HashMap<String, String>, key: &str) -> String {
    fields.remove(key).unwrap_or_default()
}
