//! Payment-intent bridge to the hosted payment processor.

use async_trait::async_trait;
use serde::Deserialize;

/// A created payment intent: the id for reconciliation elsewhere, and the
/// client secret the browser needs to confirm the charge.
#[derive(Debug, Clone)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("payment provider error: {0}")]
    Provider(String),
}

/// Seam to the hosted processor. The real client talks Stripe-style HTTP;
/// tests substitute a recording fake.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create an intent for `amount_minor` minor currency units, tagged
    /// with the paying user's id for later reconciliation.
    async fn create_intent(
        &self,
        amount_minor: i64,
        currency: &str,
        user_id: &str,
    ) -> Result<PaymentIntent, PaymentError>;
}

/// Convert a major-unit amount (e.g. dollars) to the processor's minor
/// units (cents). Rejects non-positive and non-finite values.
pub fn to_minor_units(amount: f64) -> Result<i64, PaymentError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(PaymentError::InvalidAmount(
            "must be a positive number".to_string(),
        ));
    }
    Ok((amount * 100.0).round() as i64)
}

#[derive(Debug, Deserialize)]
struct IntentResponse {
    id: String,
    client_secret: String,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    error: Option<ProviderErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorDetail {
    message: Option<String>,
}

/// Stripe-style payment-intents client
pub struct StripeProvider {
    http: reqwest::Client,
    base_url: String,
    secret_key: String,
}

impl StripeProvider {
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http,
            base_url,
            secret_key: secret_key.into(),
        }
    }
}

#[async_trait]
impl PaymentProvider for StripeProvider {
    async fn create_intent(
        &self,
        amount_minor: i64,
        currency: &str,
        user_id: &str,
    ) -> Result<PaymentIntent, PaymentError> {
        let params = [
            ("amount", amount_minor.to_string()),
            ("currency", currency.to_string()),
            ("metadata[user_id]", user_id.to_string()),
        ];

        let response = self
            .http
            .post(format!("{}/v1/payment_intents", self.base_url))
            .basic_auth(&self.secret_key, Option::<&str>::None)
            .form(&params)
            .send()
            .await
            .map_err(|e| PaymentError::Provider(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response
                .json::<ProviderErrorBody>()
                .await
                .ok()
                .and_then(|b| b.error)
                .and_then(|e| e.message)
                .unwrap_or_else(|| "no detail".to_string());
            return Err(PaymentError::Provider(format!("{}: {}", status, detail)));
        }

        let intent: IntentResponse = response
            .json()
            .await
            .map_err(|e| PaymentError::Provider(e.to_string()))?;

        Ok(PaymentIntent {
            id: intent.id,
            client_secret: intent.client_secret,
        })
    }
}
