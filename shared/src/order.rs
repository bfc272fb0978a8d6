//! Order domain model
//!
//! The order lifecycle is a fixed, forward-only state machine:
//!
//! ```text
//! Processing ──▶ Paid ──▶ Preparing ──▶ Cooking ──▶ On the way ──▶ Delivered
//!     │
//!     └──▶ Cancelled
//! ```
//!
//! Wire strings (serde) match what connected clients already display, so the
//! unusual `"On the way"` spelling is load-bearing.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::util::now_millis;

/// Order lifecycle state
///
/// 状态只能沿转换表前进，不允许回退或跳级。唯一的捷径是
/// `Processing → Paid` 的超时自动升级 (见 server 端 escalation)。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Processing,
    Paid,
    Preparing,
    Cooking,
    #[serde(rename = "On the way")]
    OnTheWay,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Every status, for exhaustive table checks
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::Processing,
        OrderStatus::Paid,
        OrderStatus::Preparing,
        OrderStatus::Cooking,
        OrderStatus::OnTheWay,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// The fixed transition table. Anything not listed here is rejected.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Processing, Paid)
                | (Processing, Cancelled)
                | (Paid, Preparing)
                | (Preparing, Cooking)
                | (Cooking, OnTheWay)
                | (OnTheWay, Delivered)
        )
    }

    /// Terminal states accept no further transitions
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Wire string, identical to the serde representation
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Processing => "Processing",
            OrderStatus::Paid => "Paid",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::Cooking => "Cooking",
            OrderStatus::OnTheWay => "On the way",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment method selected at checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "GCash")]
    Gcash,
    #[serde(rename = "PayMaya")]
    Paymaya,
    #[serde(rename = "COD")]
    Cod,
}

impl PaymentMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Gcash => "GCash",
            PaymentMethod::Paymaya => "PayMaya",
            PaymentMethod::Cod => "COD",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of an order: a catalog item at the price it was sold for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl LineItem {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Delivery contact details collected at checkout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryDetails {
    pub email: String,
    pub phone: String,
    pub address: String,
    pub postal: String,
    pub city: String,
}

/// A checkout transaction, tracked through the delivery lifecycle
///
/// `total` is fixed at creation as the sum of line totals; the server never
/// recomputes it afterwards. `status` is only ever mutated by the lifecycle
/// manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: String,
    pub customer_email: String,
    pub customer_name: String,
    pub delivery: DeliveryDetails,
    pub line_items: Vec<LineItem>,
    pub total: Decimal,
    pub payment_method: PaymentMethod,
    /// Opaque reference from payment initiation (`cod_<id>` for COD)
    pub payment_reference: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Sum of `unit_price × quantity` over the given items
    pub fn compute_total(items: &[LineItem]) -> Decimal {
        items.iter().map(LineItem::line_total).sum()
    }

    /// Item names in order, as shown in history views
    pub fn item_names(&self) -> Vec<String> {
        self.line_items.iter().map(|i| i.name.clone()).collect()
    }
}

/// Checkout cart entry as submitted by the client
///
/// 客户端只报名称和数量，单价一律以服务端菜单目录为准。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItemInput {
    pub name: String,
    pub quantity: u32,
}

/// Status-change event pushed to the owning customer's room
///
/// Field names are part of the socket wire contract (`order_update`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderUpdate {
    pub order_id: String,
    pub status: OrderStatus,
    pub user_email: String,
    pub timestamp: i64,
}

impl OrderUpdate {
    pub fn new(order_id: impl Into<String>, status: OrderStatus, user_email: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
            status,
            user_email: user_email.into(),
            timestamp: now_millis(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_strings_round_trip() {
        for status in OrderStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
            let back: OrderStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(back, status);
        }
        // The one spelling clients actually depend on
        assert_eq!(
            serde_json::to_string(&OrderStatus::OnTheWay).unwrap(),
            "\"On the way\""
        );
    }

    #[test]
    fn payment_method_wire_strings() {
        assert_eq!(serde_json::to_string(&PaymentMethod::Gcash).unwrap(), "\"GCash\"");
        assert_eq!(serde_json::to_string(&PaymentMethod::Paymaya).unwrap(), "\"PayMaya\"");
        assert_eq!(serde_json::to_string(&PaymentMethod::Cod).unwrap(), "\"COD\"");
    }

    #[test]
    fn transition_table_is_exact() {
        use OrderStatus::*;
        let allowed = [
            (Processing, Paid),
            (Processing, Cancelled),
            (Paid, Preparing),
            (Preparing, Cooking),
            (Cooking, OnTheWay),
            (OnTheWay, Delivered),
        ];
        for from in OrderStatus::ALL {
            for to in OrderStatus::ALL {
                let expected = allowed.contains(&(from, to));
                assert_eq!(
                    from.can_transition_to(to),
                    expected,
                    "unexpected verdict for {from} -> {to}"
                );
            }
        }
    }

    #[test]
    fn terminal_states_have_no_exits() {
        for from in [OrderStatus::Delivered, OrderStatus::Cancelled] {
            assert!(from.is_terminal());
            for to in OrderStatus::ALL {
                assert!(!from.can_transition_to(to));
            }
        }
    }

    #[test]
    fn compute_total_sums_line_totals() {
        let items = vec![
            LineItem {
                name: "Burger".to_string(),
                unit_price: Decimal::from(800),
                quantity: 2,
            },
            LineItem {
                name: "Sinigang".to_string(),
                unit_price: Decimal::from(150),
                quantity: 3,
            },
        ];
        assert_eq!(Order::compute_total(&items), Decimal::from(2050));
    }
}
