//! Payments service.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Method;
use tracing::instrument;

use crate::{
    domain::payments::{
        errors::PaymentsServiceError,
        models::{NewPaymentIntent, PaymentIntent},
    },
    http::ApiClient,
};

const PAYMENT_PATH: &str = "/api/payment";

/// [`PaymentsService`] over the storefront REST API.
#[derive(Debug, Clone)]
pub struct HttpPaymentsService {
    api: ApiClient,
}

impl HttpPaymentsService {
    /// Service issuing its requests through `api`.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl PaymentsService for HttpPaymentsService {
    #[instrument(skip(self))]
    async fn create_intent(
        &self,
        intent: NewPaymentIntent,
    ) -> Result<PaymentIntent, PaymentsServiceError> {
        Ok(self.api.send(Method::POST, PAYMENT_PATH, &intent).await?)
    }
}

/// Payment intent creation.
#[automock]
#[async_trait]
pub trait PaymentsService: Send + Sync {
    /// Pre-creates a provider payment order for the given amount.
    async fn create_intent(
        &self,
        intent: NewPaymentIntent,
    ) -> Result<PaymentIntent, PaymentsServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::json;
    use testresult::TestResult;

    use crate::test::TestServer;

    use super::*;

    #[tokio::test]
    async fn intent_is_posted_in_paise() -> TestResult {
        let server = TestServer::respond_with(
            200,
            r#"{"id":"order_rzp_1","amount":220000,"currency":"INR"}"#,
        )
        .await?;
        let payments = HttpPaymentsService::new(server.client()?);

        let intent = payments
            .create_intent(NewPaymentIntent::for_total(Decimal::from(2200))?)
            .await?;

        assert_eq!(intent.id, "order_rzp_1");

        let requests = server.requests().await;
        let request = requests.first().ok_or("no request received")?;

        assert_eq!(request.method, "POST");
        assert_eq!(request.target, "/api/payment");
        assert_eq!(request.json()?, json!({"amount": 220_000, "currency": "INR"}));

        Ok(())
    }
}
