use std::time::Duration;

use wiremock::{
    Mock, ResponseTemplate,
    matchers::{method, path},
};

use crate::helpers::{spawn_app, spawn_app_with_provider_timeout_ms};

fn valid_form_body() -> String {
    "from_address=sender%40example.com\
     &from_name=Sender\
     &to_address=recipient%40example.com\
     &to_name=Recipient\
     &subject=Hello\
     &content_html=%3Cp%3EHello%3C%2Fp%3E"
        .to_string()
}

fn provider_error_body(message: &str) -> serde_json::Value {
    serde_json::json!({"errors": {"message": message, "field": "null"}})
}

#[tokio::test]
async fn empty_submission_lists_all_required_fields() {
    let app = spawn_app().await;

    let response = app.post_send_email("".into()).await;

    assert_eq!(400, response.status().as_u16());
    let body: serde_json::Value = response.json().await.expect("Body was not valid JSON.");
    assert_eq!(
        body,
        serde_json::json!({
            "Error": "Missing configuration items.",
            "Missing configuration items.": [
                "content_html",
                "from_address",
                "from_name",
                "subject",
                "to_address",
                "to_name"
            ]
        })
    );
}

#[tokio::test]
async fn missing_fields_are_reported_as_the_sorted_set_difference() {
    let app = spawn_app().await;

    let test_cases = vec![
        (
            "subject=Hello&to_name=Recipient&from_name=Sender",
            vec!["content_html", "from_address", "to_address"],
            "missing both addresses and the content",
        ),
        (
            "from_address=a%40b.com&from_name=A&subject=S&to_address=c%40d.com&to_name=C",
            vec!["content_html"],
            "missing only the content",
        ),
        (
            "content_html=x&from_address=a%40b.com&from_name=A&subject=S&to_address=c%40d.com",
            vec!["to_name"],
            "missing only the recipient name",
        ),
    ];

    for (body, expected_missing, description) in test_cases {
        let response = app.post_send_email(body.into()).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when the payload was {description}.",
        );
        let body: serde_json::Value = response.json().await.expect("Body was not valid JSON.");
        assert_eq!(
            body["Missing configuration items."],
            serde_json::json!(expected_missing),
            "Wrong missing-items list when the payload was {description}.",
        );
    }
}

#[tokio::test]
async fn valid_submission_is_relayed_and_acceptance_returns_empty_success() {
    let app = spawn_app().await;

    Mock::given(path("v3/mail/send"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app.post_send_email(valid_form_body()).await;

    assert_eq!(200, response.status().as_u16());
    assert_eq!(Some(0), response.content_length());
}

#[tokio::test]
async fn json_submission_is_accepted_like_a_form_submission() {
    let app = spawn_app().await;

    Mock::given(path("v3/mail/send"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let body = serde_json::json!({
        "from_address": "sender@example.com",
        "from_name": "Sender",
        "to_address": "recipient@example.com",
        "to_name": "Recipient",
        "subject": "Hello",
        "content_html": "<p>Hello</p>"
    });
    let response = app.post_send_email_json(&body).await;

    assert_eq!(200, response.status().as_u16());
    assert_eq!(Some(0), response.content_length());
}

#[tokio::test]
async fn extra_fields_are_ignored() {
    let app = spawn_app().await;

    Mock::given(path("v3/mail/send"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let body = format!("{}&unrelated=value&another=1", valid_form_body());
    let response = app.post_send_email(body).await;

    assert_eq!(200, response.status().as_u16());
}

#[tokio::test]
async fn malformed_addresses_are_rejected_before_any_provider_call() {
    let app = spawn_app().await;

    Mock::given(path("v3/mail/send"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(202))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let body = serde_json::json!({
        "from_address": "sender@example.com",
        "from_name": "Sender",
        "to_address": "definitely-not-an-email",
        "to_name": "Recipient",
        "subject": "Hello",
        "content_html": "<p>Hello</p>"
    });
    let response = app.post_send_email_json(&body).await;

    assert_eq!(400, response.status().as_u16());
    assert_eq!(
        "definitely-not-an-email is not a valid email address.",
        response.text().await.unwrap()
    );
}

#[tokio::test]
async fn known_provider_errors_are_relayed_with_their_message() {
    for status in [400u16, 401, 403, 404, 405, 413, 500] {
        let app = spawn_app().await;

        Mock::given(path("v3/mail/send"))
            .and(method("POST"))
            .respond_with(
                ResponseTemplate::new(status).set_body_json(provider_error_body("provider said no")),
            )
            .expect(1)
            .mount(&app.email_server)
            .await;

        let response = app.post_send_email(valid_form_body()).await;

        assert_eq!(
            status,
            response.status().as_u16(),
            "Status {status} was not relayed.",
        );
        assert_eq!("provider said no", response.text().await.unwrap());
    }
}

#[tokio::test]
async fn unlisted_provider_status_maps_to_unknown_response() {
    let app = spawn_app().await;

    Mock::given(path("v3/mail/send"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app.post_send_email(valid_form_body()).await;

    assert_eq!(500, response.status().as_u16());
    assert_eq!("Unknown response", response.text().await.unwrap());
}

#[tokio::test]
async fn transport_failure_talking_to_the_provider_maps_to_500_with_empty_body() {
    let app = spawn_app_with_provider_timeout_ms(100).await;

    Mock::given(path("v3/mail/send"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(202).set_delay(Duration::from_secs(10)))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app.post_send_email(valid_form_body()).await;

    assert_eq!(500, response.status().as_u16());
    assert_eq!(Some(0), response.content_length());
}

#[tokio::test]
async fn relayed_status_without_a_readable_message_maps_to_unknown_response() {
    let app = spawn_app().await;

    Mock::given(path("v3/mail/send"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_string("<html>nope</html>"))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app.post_send_email(valid_form_body()).await;

    assert_eq!(500, response.status().as_u16());
    assert_eq!("Unknown response", response.text().await.unwrap());
}
