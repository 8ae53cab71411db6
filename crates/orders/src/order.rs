use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use depot_core::{OrderId, ProductId, WarehouseId};
use depot_ledger::ItemRequest;

/// Order status lifecycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Active,
    Completed,
    Canceled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Active => "active",
            OrderStatus::Completed => "completed",
            OrderStatus::Canceled => "canceled",
        }
    }
}

impl core::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(OrderStatus::Active),
            "completed" => Ok(OrderStatus::Completed),
            "canceled" => Ok(OrderStatus::Canceled),
            other => Err(format!("unknown order status: {other}")),
        }
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One allocation line: a product and the positive number of units the
/// order holds against its warehouse.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub count: i64,
}

impl From<ItemRequest> for OrderItem {
    fn from(req: ItemRequest) -> Self {
        Self {
            product_id: req.product_id,
            count: req.count,
        }
    }
}

/// An order and its item allocations.
///
/// While active, every item is backed by a matching reservation in the
/// movement log. Canceled orders have returned their stock (net zero);
/// completed orders keep the consumption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer: String,
    pub status: OrderStatus,
    pub warehouse_id: WarehouseId,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Order {
    pub fn is_active(&self) -> bool {
        self.status == OrderStatus::Active
    }

    /// The current items as a request list, for availability re-checks.
    pub fn item_requests(&self) -> Vec<ItemRequest> {
        self.items
            .iter()
            .map(|item| ItemRequest {
                product_id: item.product_id,
                count: item.count,
            })
            .collect()
    }
}

/// Filter over stored orders; all clauses are conjunctive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    /// Case-insensitive substring match on the customer name.
    pub customer_contains: Option<String>,
    pub warehouse_id: Option<WarehouseId>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
}

impl OrderFilter {
    pub fn matches(&self, order: &Order) -> bool {
        if let Some(status) = self.status {
            if order.status != status {
                return false;
            }
        }
        if let Some(needle) = &self.customer_contains {
            if !order
                .customer
                .to_lowercase()
                .contains(&needle.to_lowercase())
            {
                return false;
            }
        }
        if let Some(warehouse_id) = self.warehouse_id {
            if order.warehouse_id != warehouse_id {
                return false;
            }
        }
        if let Some(from) = self.date_from {
            if order.created_at < from {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if order.created_at > to {
                return false;
            }
        }
        true
    }
}
