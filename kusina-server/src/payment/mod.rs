//! Payment Layer
//!
//! 支付发起统一入口。钱包支付 (GCash / PayMaya) 走各自的网关实现；
//! 货到付款不经过网关，直接合成确定性的支付引用。

pub mod gateway;

pub use gateway::{GcashGateway, PaymayaGateway, PaymentError, PaymentGateway, PaymentInitiation};

use rust_decimal::Decimal;
use shared::order::PaymentMethod;
use std::sync::Arc;

use crate::core::Config;

/// Provider selection facade used by the lifecycle manager
#[derive(Clone)]
pub struct PaymentService {
    gcash: Arc<dyn PaymentGateway>,
    paymaya: Arc<dyn PaymentGateway>,
}

impl PaymentService {
    pub fn from_config(config: &Config) -> Self {
        Self {
            gcash: Arc::new(GcashGateway::new(
                config.gcash_app_id.clone(),
                config.gcash_app_secret.clone(),
            )),
            paymaya: Arc::new(PaymayaGateway::new(
                config.paymaya_public_key.clone(),
                config.paymaya_secret_key.clone(),
            )),
        }
    }

    /// Swap in specific gateway implementations (tests)
    pub fn with_gateways(gcash: Arc<dyn PaymentGateway>, paymaya: Arc<dyn PaymentGateway>) -> Self {
        Self { gcash, paymaya }
    }

    /// Initiate payment for an order
    ///
    /// COD never touches a gateway: its reference is `cod_<order_id>`.
    pub async fn initiate(
        &self,
        method: PaymentMethod,
        amount: Decimal,
        order_id: &str,
        description: &str,
    ) -> Result<PaymentInitiation, PaymentError> {
        match method {
            PaymentMethod::Gcash => self.gcash.initiate_payment(amount, order_id, description).await,
            PaymentMethod::Paymaya => {
                self.paymaya.initiate_payment(amount, order_id, description).await
            }
            PaymentMethod::Cod => Ok(PaymentInitiation {
                payment_id: format!("cod_{order_id}"),
                redirect_url: None,
            }),
        }
    }
}
