//! HTTP client for the payment endpoint.

use std::sync::Arc;
use std::time::Duration;

use tracing::instrument;
use url::Url;

use super::{PaymentError, PaymentGateway, PaymentReceipt, PaymentRequest, PaymentResponse};

/// Maximum number of body characters copied into logs and errors.
const BODY_PREVIEW_CHARS: usize = 200;

/// Client for the payment endpoint.
///
/// Sends a single JSON POST per checkout. No request timeout is set unless
/// one is configured, so an unresponsive endpoint is bounded only by the
/// transport defaults.
#[derive(Clone)]
pub struct HttpPaymentClient {
    inner: Arc<HttpPaymentClientInner>,
}

struct HttpPaymentClientInner {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpPaymentClient {
    /// Create a client posting to `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::Transport` if the HTTP client cannot be built.
    pub fn new(endpoint: Url, timeout: Option<Duration>) -> Result<Self, PaymentError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            inner: Arc::new(HttpPaymentClientInner {
                client: builder.build()?,
                endpoint,
            }),
        })
    }
}

impl PaymentGateway for HttpPaymentClient {
    #[instrument(
        skip(self, request),
        fields(
            endpoint = %self.inner.endpoint,
            amount = request.amount.units(),
            method = %request.payment_method,
        )
    )]
    async fn create_payment(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentReceipt, PaymentError> {
        let response = self
            .inner
            .client
            .post(self.inner.endpoint.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();

        // Read as text first so unparseable bodies can be logged
        let response_text = response.text().await?;
        let preview: String = response_text.chars().take(BODY_PREVIEW_CHARS).collect();

        if !status.is_success() {
            let message = serde_json::from_str::<PaymentResponse>(&response_text)
                .ok()
                .and_then(|body| body.message.or(body.error))
                .unwrap_or(preview);
            tracing::warn!(status = %status, %message, "Payment endpoint returned non-success status");
            return Err(PaymentError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body: PaymentResponse = serde_json::from_str(&response_text).map_err(|e| {
            tracing::warn!(error = %e, body = %preview, "Failed to parse payment response");
            PaymentError::Parse(e)
        })?;

        let receipt = body.into_receipt()?;
        tracing::debug!(order_id = %receipt.order_id, "Payment registered");
        Ok(receipt)
    }
}
