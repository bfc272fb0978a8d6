//! Payment Gateway contract and mock providers
//!
//! Both wallet providers are mocked: they accept every initiation and return
//! a deterministic payment id. The trait boundary is where the real partner
//! APIs plug in later; the lifecycle manager treats providers identically
//! beyond selection.

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

/// Gateway errors
#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("{provider} rejected payment for order {order_id}: {reason}")]
    Rejected {
        provider: &'static str,
        order_id: String,
        reason: String,
    },
}

/// Successful payment initiation
#[derive(Debug, Clone)]
pub struct PaymentInitiation {
    /// Opaque provider-side reference
    pub payment_id: String,
    /// Where to send the customer to complete the wallet flow
    pub redirect_url: Option<String>,
}

/// External payment provider contract
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    fn provider(&self) -> &'static str;

    async fn initiate_payment(
        &self,
        amount: Decimal,
        order_id: &str,
        description: &str,
    ) -> Result<PaymentInitiation, PaymentError>;
}

/// GCash provider (mock)
pub struct GcashGateway {
    app_id: String,
    #[allow(dead_code)]
    app_secret: String,
}

impl GcashGateway {
    pub fn new(app_id: String, app_secret: String) -> Self {
        Self { app_id, app_secret }
    }
}

#[async_trait]
impl PaymentGateway for GcashGateway {
    fn provider(&self) -> &'static str {
        "GCash"
    }

    async fn initiate_payment(
        &self,
        amount: Decimal,
        order_id: &str,
        description: &str,
    ) -> Result<PaymentInitiation, PaymentError> {
        // Mock call; the real integration goes through the GCash partner API.
        tracing::debug!(
            app_id = %self.app_id,
            order_id = %order_id,
            amount = %amount,
            description = %description,
            "Initiating GCash payment"
        );
        Ok(PaymentInitiation {
            payment_id: format!("gcash_{order_id}"),
            redirect_url: Some(format!("https://gcash.com/pay/{order_id}")),
        })
    }
}

/// PayMaya provider (mock)
pub struct PaymayaGateway {
    public_key: String,
    #[allow(dead_code)]
    secret_key: String,
}

impl PaymayaGateway {
    pub fn new(public_key: String, secret_key: String) -> Self {
        Self {
            public_key,
            secret_key,
        }
    }
}

#[async_trait]
impl PaymentGateway for PaymayaGateway {
    fn provider(&self) -> &'static str {
        "PayMaya"
    }

    async fn initiate_payment(
        &self,
        amount: Decimal,
        order_id: &str,
        description: &str,
    ) -> Result<PaymentInitiation, PaymentError> {
        // Mock call; the real integration goes through the PayMaya checkout API.
        tracing::debug!(
            public_key = %self.public_key,
            order_id = %order_id,
            amount = %amount,
            description = %description,
            "Initiating PayMaya payment"
        );
        Ok(PaymentInitiation {
            payment_id: format!("paymaya_{order_id}"),
            redirect_url: Some(format!("https://paymaya.com/pay/{order_id}")),
        })
    }
}
