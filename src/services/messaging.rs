//! Outbound messaging gateways
//!
//! Email and SMS/MMS delivery behind traits so the rest of the application
//! never talks to a provider directly. The HTTP implementations POST to
//! JSON gateway APIs; the console implementations log instead of sending and
//! are the development default.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::settings::{EmailConfig, SmsConfig};
use crate::utils::errors::{DeliveryError, DeliveryResult};
use crate::utils::logging::log_gateway_call;

/// Trait for sending email. Implement this to integrate with an email
/// provider API.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> DeliveryResult<()>;
}

/// Trait for sending SMS and MMS. An MMS is an SMS with a media attachment.
#[async_trait]
pub trait SmsGateway: Send + Sync {
    async fn send_sms(&self, to: &str, body: &str, media_url: Option<&str>) -> DeliveryResult<()>;
}

#[derive(Debug, Serialize)]
struct EmailPayload<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    body: &'a str,
}

/// Email sender backed by an HTTP gateway API
#[derive(Clone)]
pub struct HttpEmailSender {
    client: Client,
    config: EmailConfig,
}

impl HttpEmailSender {
    pub fn new(config: EmailConfig) -> DeliveryResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("FlockKeeper/1.0")
            .build()
            .map_err(|e| DeliveryError::RequestFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/messages", self.config.api_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl EmailSender for HttpEmailSender {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> DeliveryResult<()> {
        let payload = EmailPayload {
            from: &self.config.from_address,
            to,
            subject,
            body,
        };

        debug!(to = to, subject = subject, "Sending email via gateway");

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DeliveryError::Timeout
                } else {
                    DeliveryError::RequestFailed(e.to_string())
                }
            })?;

        if response.status().is_success() {
            log_gateway_call("email", to, true);
            Ok(())
        } else if response.status().is_server_error() {
            warn!(to = to, status = %response.status(), "Email gateway unavailable");
            Err(DeliveryError::GatewayUnavailable)
        } else {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            Err(DeliveryError::RequestFailed(format!("{}: {}", status, text)))
        }
    }
}

#[derive(Debug, Serialize)]
struct SmsPayload<'a> {
    from: &'a str,
    to: &'a str,
    body: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    media_url: Option<&'a str>,
}

/// SMS/MMS gateway backed by an HTTP provider API
#[derive(Clone)]
pub struct HttpSmsGateway {
    client: Client,
    config: SmsConfig,
}

impl HttpSmsGateway {
    pub fn new(config: SmsConfig) -> DeliveryResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("FlockKeeper/1.0")
            .build()
            .map_err(|e| DeliveryError::RequestFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/messages", self.config.api_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl SmsGateway for HttpSmsGateway {
    async fn send_sms(&self, to: &str, body: &str, media_url: Option<&str>) -> DeliveryResult<()> {
        let payload = SmsPayload {
            from: &self.config.from_number,
            to,
            body,
            media_url,
        };

        debug!(to = to, mms = media_url.is_some(), "Sending SMS via gateway");

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DeliveryError::Timeout
                } else {
                    DeliveryError::RequestFailed(e.to_string())
                }
            })?;

        if response.status().is_success() {
            log_gateway_call("sms", to, true);
            Ok(())
        } else if response.status().is_server_error() {
            warn!(to = to, status = %response.status(), "SMS gateway unavailable");
            Err(DeliveryError::GatewayUnavailable)
        } else {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            Err(DeliveryError::RequestFailed(format!("{}: {}", status, text)))
        }
    }
}

/// Development email sender that logs instead of delivering
pub struct ConsoleEmailSender;

#[async_trait]
impl EmailSender for ConsoleEmailSender {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> DeliveryResult<()> {
        info!(to = to, subject = subject, body = body, "[email] delivery disabled, logging only");
        Ok(())
    }
}

/// Development SMS gateway that logs instead of delivering
pub struct ConsoleSmsGateway;

#[async_trait]
impl SmsGateway for ConsoleSmsGateway {
    async fn send_sms(&self, to: &str, body: &str, media_url: Option<&str>) -> DeliveryResult<()> {
        info!(to = to, body = body, media_url = media_url, "[sms] delivery disabled, logging only");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Mock sender that records every message, for service-level tests
    pub struct MockEmailSender {
        pub sent: Arc<Mutex<Vec<(String, String, String)>>>,
        pub fail: bool,
    }

    #[async_trait]
    impl EmailSender for MockEmailSender {
        async fn send_email(&self, to: &str, subject: &str, body: &str) -> DeliveryResult<()> {
            if self.fail {
                return Err(DeliveryError::GatewayUnavailable);
            }
            self.sent
                .lock()
                .unwrap()
                .push((to.to_string(), subject.to_string(), body.to_string()));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_console_senders_accept_everything() {
        let email = ConsoleEmailSender;
        assert!(email.send_email("a@b.org", "Hello", "Body").await.is_ok());

        let sms = ConsoleSmsGateway;
        assert!(sms.send_sms("+15551234567", "Hi", None).await.is_ok());
        assert!(sms
            .send_sms("+15551234567", "Hi", Some("https://cdn.example/flyer.jpg"))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_mock_sender_records_and_fails() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let sender = MockEmailSender {
            sent: sent.clone(),
            fail: false,
        };
        sender.send_email("x@y.org", "S", "B").await.unwrap();
        assert_eq!(sent.lock().unwrap().len(), 1);

        let failing = MockEmailSender {
            sent: sent.clone(),
            fail: true,
        };
        assert!(failing.send_email("x@y.org", "S", "B").await.is_err());
        assert_eq!(sent.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let config = EmailConfig {
            api_url: "https://api.mail.example/v1/".to_string(),
            api_key: "k".to_string(),
            from_address: "no-reply@x.org".to_string(),
            timeout_seconds: 5,
        };
        let sender = HttpEmailSender::new(config).unwrap();
        assert_eq!(sender.endpoint(), "https://api.mail.example/v1/messages");
    }
}
