use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use depot_core::{MovementId, OrderId, ProductId, WarehouseId};

/// Why a movement occurred. Closed set; no open-ended runtime references.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReferenceKind {
    OrderCreation,
    OrderUpdateReturn,
    OrderUpdateAllocate,
    OrderCancellation,
    OrderResumption,
    #[serde(rename = "manual")]
    ManualAdjustment,
    InitialLoad,
}

impl ReferenceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceKind::OrderCreation => "order-creation",
            ReferenceKind::OrderUpdateReturn => "order-update-return",
            ReferenceKind::OrderUpdateAllocate => "order-update-allocate",
            ReferenceKind::OrderCancellation => "order-cancellation",
            ReferenceKind::OrderResumption => "order-resumption",
            ReferenceKind::ManualAdjustment => "manual",
            ReferenceKind::InitialLoad => "initial-load",
        }
    }
}

impl core::str::FromStr for ReferenceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "order-creation" => Ok(ReferenceKind::OrderCreation),
            "order-update-return" => Ok(ReferenceKind::OrderUpdateReturn),
            "order-update-allocate" => Ok(ReferenceKind::OrderUpdateAllocate),
            "order-cancellation" => Ok(ReferenceKind::OrderCancellation),
            "order-resumption" => Ok(ReferenceKind::OrderResumption),
            "manual" => Ok(ReferenceKind::ManualAdjustment),
            "initial-load" => Ok(ReferenceKind::InitialLoad),
            other => Err(format!("unknown reference kind: {other}")),
        }
    }
}

impl core::fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable ledger entry for one stock change.
///
/// `quantity` is the signed delta (negative = reduction) and
/// `balance_after` is the stock level left behind by applying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementRecord {
    pub id: MovementId,
    pub product_id: ProductId,
    pub warehouse_id: WarehouseId,
    pub quantity: i64,
    pub balance_after: i64,
    pub kind: ReferenceKind,
    /// Identifier of the order that caused the movement, when one did.
    pub reference: Option<OrderId>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A movement staged inside an atomic unit, before the store assigns its
/// identity and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMovement {
    pub product_id: ProductId,
    pub warehouse_id: WarehouseId,
    pub quantity: i64,
    pub balance_after: i64,
    pub kind: ReferenceKind,
    pub reference: Option<OrderId>,
    pub description: Option<String>,
}

/// Filter over the movement log; all clauses are conjunctive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementFilter {
    pub product_id: Option<ProductId>,
    pub warehouse_id: Option<WarehouseId>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    pub kind: Option<ReferenceKind>,
}

impl MovementFilter {
    pub fn matches(&self, record: &MovementRecord) -> bool {
        if let Some(product_id) = self.product_id {
            if record.product_id != product_id {
                return false;
            }
        }
        if let Some(warehouse_id) = self.warehouse_id {
            if record.warehouse_id != warehouse_id {
                return false;
            }
        }
        if let Some(from) = self.date_from {
            if record.created_at < from {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if record.created_at > to {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if record.kind != kind {
                return false;
            }
        }
        true
    }
}
