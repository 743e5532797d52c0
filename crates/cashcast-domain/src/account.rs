//! Account snapshot consumed by the forecaster.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::Identifiable;

/// Read-only account state for one forecast run. The balance anchors day 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub current_balance: f64,
}

impl AccountSnapshot {
    pub fn new(name: impl Into<String>, current_balance: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind: None,
            current_balance,
        }
    }
}

impl Identifiable for AccountSnapshot {
    fn id(&self) -> Uuid {
        self.id
    }
}
