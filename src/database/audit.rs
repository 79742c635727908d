// ABOUTME: Audit trail for result mutations
// ABOUTME: Create/delete entries with JSON state snapshots, written in-transaction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Streamline Swim Analytics

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Row, Sqlite, Transaction};

use streamline_core::errors::{AppError, AppResult};

use super::Database;

/// Entity type for result rows in the audit log
pub const RESULT_ENTITY: &str = "result";

/// What happened to the audited entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Entity was created; `after_state` holds the snapshot
    Create,
    /// Entity was deleted; `before_state` holds the snapshot
    Delete,
}

impl AuditAction {
    /// Stable storage name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Delete => "delete",
        }
    }

    fn from_stored(name: &str) -> AppResult<Self> {
        match name {
            "create" => Ok(Self::Create),
            "delete" => Ok(Self::Delete),
            other => Err(AppError::database(format!("unknown audit action {other}"))),
        }
    }
}

/// One audit log row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Audit row ID
    pub id: i64,
    /// User who performed the action
    pub user_id: i64,
    /// What happened
    pub action: AuditAction,
    /// Kind of entity acted on, e.g. [`RESULT_ENTITY`]
    pub entity_type: String,
    /// Row ID of the entity acted on
    pub entity_id: i64,
    /// Entity state before the action, for deletes
    pub before_state: Option<serde_json::Value>,
    /// Entity state after the action, for creates
    pub after_state: Option<serde_json::Value>,
    /// When the action happened
    pub created_at: DateTime<Utc>,
}

/// Write one audit entry inside an open transaction
///
/// Mutations and their audit entries must commit or roll back together, so
/// this takes the caller's transaction rather than the pool.
pub(super) async fn insert_audit_entry_tx(
    tx: &mut Transaction<'_, Sqlite>,
    user_id: i64,
    action: AuditAction,
    entity_type: &str,
    entity_id: i64,
    before_state: Option<serde_json::Value>,
    after_state: Option<serde_json::Value>,
) -> AppResult<()> {
    let before_state = encode_state(before_state)?;
    let after_state = encode_state(after_state)?;

    sqlx::query(
        r"
        INSERT INTO audit_log (
            user_id, action, entity_type, entity_id,
            before_state, after_state, created_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7)
        ",
    )
    .bind(user_id)
    .bind(action.as_str())
    .bind(entity_type)
    .bind(entity_id)
    .bind(before_state)
    .bind(after_state)
    .bind(Utc::now())
    .execute(&mut **tx)
    .await
    .map_err(|e| AppError::database(format!("Failed to insert audit entry: {e}")))?;

    Ok(())
}

fn encode_state(state: Option<serde_json::Value>) -> AppResult<Option<String>> {
    state
        .map(|value| {
            serde_json::to_string(&value)
                .map_err(|e| AppError::serialization(format!("Failed to encode audit state: {e}")))
        })
        .transpose()
}

fn decode_state(state: Option<String>) -> AppResult<Option<serde_json::Value>> {
    state
        .map(|text| {
            serde_json::from_str(&text)
                .map_err(|e| AppError::serialization(format!("Failed to decode audit state: {e}")))
        })
        .transpose()
}

impl Database {
    /// Recent audit entries for one entity, newest first
    ///
    /// # Errors
    ///
    /// Returns a database error when the query fails and a serialization
    /// error when a stored state snapshot does not parse.
    pub async fn recent_audit_entries(
        &self,
        entity_type: &str,
        entity_id: i64,
        limit: u32,
    ) -> AppResult<Vec<AuditEntry>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, action, entity_type, entity_id,
                   before_state, after_state, created_at
            FROM audit_log
            WHERE entity_type = $1 AND entity_id = $2
            ORDER BY id DESC
            LIMIT $3
            ",
        )
        .bind(entity_type)
        .bind(entity_id)
        .bind(i64::from(limit))
        .fetch_all(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch audit entries: {e}")))?;

        let mut entries = Vec::with_capacity(rows.len());
        for row in &rows {
            let action: String = row.get("action");
            entries.push(AuditEntry {
                id: row.get("id"),
                user_id: row.get("user_id"),
                action: AuditAction::from_stored(&action)?,
                entity_type: row.get("entity_type"),
                entity_id: row.get("entity_id"),
                before_state: decode_state(row.get("before_state"))?,
                after_state: decode_state(row.get("after_state"))?,
                created_at: row.get("created_at"),
            });
        }
        Ok(entries)
    }
}
