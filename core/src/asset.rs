//! Collateral asset records.

use serde::{Deserialize, Serialize};

use crate::types::{wire_enum, RecordId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetType {
    Land,
    Plot,
    Flat,
    Villa,
    CashBalance,
    OnlineBalance,
}

wire_enum!(AssetType {
    Land          => "LAND",
    Plot          => "PLOT",
    Flat          => "FLAT",
    Villa         => "VILLA",
    CashBalance   => "CASH_BALANCE",
    OnlineBalance => "ONLINE_BALANCE",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetMode {
    CollateralRegistered,
    CollateralMortgage,
    CollateralToInvestor,
    SelfOwned,
    Returned,
}

wire_enum!(AssetMode {
    CollateralRegistered => "COLLATERAL_REGISTERED",
    CollateralMortgage   => "COLLATERAL_MORTGAGE",
    CollateralToInvestor => "COLLATERAL_TO_INVESTOR",
    SelfOwned            => "SELF_OWNED",
    Returned             => "RETURNED",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeUnit {
    Acres,
    Hectares,
    SqYards,
    SqFeet,
    Rupees,
    Dollars,
}

wire_enum!(SizeUnit {
    Acres    => "ACRES",
    Hectares => "HECTARES",
    SqYards  => "SQ_YARDS",
    SqFeet   => "SQ_FEET",
    Rupees   => "RUPEES",
    Dollars  => "DOLLARS",
});

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetRecord {
    pub asset_id: RecordId,
    pub asset_type: AssetType,
    pub asset_mode: AssetMode,
    pub holder_name: String,
    pub deed_id: String,
    pub size: f64,
    pub units: SizeUnit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetDraft {
    pub asset_type: AssetType,
    pub asset_mode: AssetMode,
    pub holder_name: String,
    pub deed_id: String,
    pub size: f64,
    pub units: SizeUnit,
}

/// Field-selective update: `None` keeps the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetUpdate {
    pub asset_type: Option<AssetType>,
    pub asset_mode: Option<AssetMode>,
    pub holder_name: Option<String>,
    pub deed_id: Option<String>,
    pub size: Option<f64>,
    pub units: Option<SizeUnit>,
}

impl AssetRecord {
    pub fn merged(&self, update: &AssetUpdate) -> AssetDraft {
        AssetDraft {
            asset_type: update.asset_type.unwrap_or(self.asset_type),
            asset_mode: update.asset_mode.unwrap_or(self.asset_mode),
            holder_name: update
                .holder_name
                .clone()
                .unwrap_or_else(|| self.holder_name.clone()),
            deed_id: update
                .deed_id
                .clone()
                .unwrap_or_else(|| self.deed_id.clone()),
            size: update.size.unwrap_or(self.size),
            units: update.units.unwrap_or(self.units),
        }
    }
}
