//! Email service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use serde::Serialize;

use crate::domain::orders::{OrderWithItems, OrdersService};

use super::{config::EmailConfig, errors::EmailServiceError, render};

/// Request body for the Resend `POST /emails` endpoint.
#[derive(Debug, Serialize)]
struct SendEmail<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

pub struct ResendEmailService {
    orders: Arc<dyn OrdersService>,
    http: reqwest::Client,
    config: EmailConfig,
}

impl ResendEmailService {
    #[must_use]
    pub fn new(orders: Arc<dyn OrdersService>, config: EmailConfig) -> Self {
        Self {
            orders,
            http: reqwest::Client::new(),
            config,
        }
    }

    async fn send(
        &self,
        api_key: &str,
        to: &str,
        subject: &str,
        html: &str,
    ) -> Result<(), EmailServiceError> {
        let response = self
            .http
            .post(format!("{}/emails", self.config.api_base))
            .bearer_auth(api_key)
            .json(&SendEmail {
                from: &self.config.from,
                to: [to],
                subject,
                html,
            })
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            return Err(EmailServiceError::ProviderStatus(status.as_u16()));
        }

        Ok(())
    }
}

#[async_trait]
impl EmailService for ResendEmailService {
    async fn send_confirmation(
        &self,
        order_number: String,
        customer_email: String,
    ) -> Result<(), EmailServiceError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(EmailServiceError::MissingCredential)?;

        if snaxo::checkout::validate_email(&customer_email).is_err() {
            return Err(EmailServiceError::InvalidRecipient);
        }

        let order: OrderWithItems = self
            .orders
            .find_order_for_notification(order_number, customer_email)
            .await?;

        self.send(
            api_key,
            &order.order.customer_email,
            &render::customer_subject(&order),
            &render::customer_html(&order),
        )
        .await?;

        self.send(
            api_key,
            &self.config.operator,
            &render::operator_subject(&order),
            &render::operator_html(&order),
        )
        .await?;

        tracing::info!(
            order_number = %order.order.order_number,
            "confirmation emails sent"
        );

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Send the customer confirmation and operator notification for an
    /// order. The email must match the one stored on the order.
    async fn send_confirmation(
        &self,
        order_number: String,
        customer_email: String,
    ) -> Result<(), EmailServiceError>;
}
