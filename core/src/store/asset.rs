use rusqlite::{params, OptionalExtension, Row};

use super::LedgerStore;
use crate::{
    asset::{AssetDraft, AssetRecord},
    error::{LedgerError, LedgerResult},
    types::RecordId,
};

fn asset_row_mapper(row: &Row<'_>) -> rusqlite::Result<AssetRecord> {
    Ok(AssetRecord {
        asset_id: row.get(0)?,
        asset_type: row.get(1)?,
        asset_mode: row.get(2)?,
        holder_name: row.get(3)?,
        deed_id: row.get(4)?,
        size: row.get(5)?,
        units: row.get(6)?,
    })
}

impl LedgerStore {
    // ── Asset ─────────────────────────────────────────────────────

    pub fn insert_asset(&self, draft: &AssetDraft) -> LedgerResult<AssetRecord> {
        self.conn.execute(
            "INSERT INTO asset (asset_type, asset_mode, holder_name, deed_id, size, units)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                draft.asset_type,
                draft.asset_mode,
                draft.holder_name,
                draft.deed_id,
                draft.size,
                draft.units,
            ],
        )?;
        Ok(AssetRecord {
            asset_id: self.conn.last_insert_rowid(),
            asset_type: draft.asset_type,
            asset_mode: draft.asset_mode,
            holder_name: draft.holder_name.clone(),
            deed_id: draft.deed_id.clone(),
            size: draft.size,
            units: draft.units,
        })
    }

    pub fn find_asset(&self, asset_id: RecordId) -> LedgerResult<Option<AssetRecord>> {
        self.conn
            .query_row(
                "SELECT asset_id, asset_type, asset_mode, holder_name, deed_id, size, units
                 FROM asset WHERE asset_id = ?1",
                params![asset_id],
                asset_row_mapper,
            )
            .optional()
            .map_err(Into::into)
    }

    pub fn all_assets(&self) -> LedgerResult<Vec<AssetRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT asset_id, asset_type, asset_mode, holder_name, deed_id, size, units
             FROM asset ORDER BY asset_id ASC",
        )?;
        let rows = stmt.query_map([], asset_row_mapper)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn update_asset(&self, asset_id: RecordId, draft: &AssetDraft) -> LedgerResult<()> {
        let changed = self.conn.execute(
            "UPDATE asset
             SET asset_type = ?1, asset_mode = ?2, holder_name = ?3,
                 deed_id = ?4, size = ?5, units = ?6
             WHERE asset_id = ?7",
            params![
                draft.asset_type,
                draft.asset_mode,
                draft.holder_name,
                draft.deed_id,
                draft.size,
                draft.units,
                asset_id,
            ],
        )?;
        if changed == 0 {
            return Err(LedgerError::NotFound {
                entity: "asset",
                id: asset_id,
            });
        }
        Ok(())
    }
}
