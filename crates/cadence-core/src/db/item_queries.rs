//! Item persistence helpers.
//!
//! Items are stored one row per position; tags are kept as a JSON array.

use rusqlite::{params, types::Type, Connection, Row};

use crate::{
    error::{DatabaseResultExt, Result},
    models::{Item, ItemStatus, Plan},
};

const SELECT_ITEMS_SQL: &str = "SELECT content, tags, media_prompt, scheduled_time, status, notes FROM plan_items WHERE plan_id = ?1 ORDER BY position";
const INSERT_ITEM_SQL: &str = "INSERT INTO plan_items (plan_id, position, content, tags, media_prompt, scheduled_time, status, notes) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";
const DELETE_ITEMS_SQL: &str = "DELETE FROM plan_items WHERE plan_id = ?1";
const UPDATE_ITEM_MARK_SQL: &str =
    "UPDATE plan_items SET status = ?1, notes = ?2 WHERE plan_id = ?3 AND position = ?4";

/// Item columns of a plan, index-aligned.
pub(crate) struct ItemRows {
    pub items: Vec<Item>,
    pub statuses: Vec<ItemStatus>,
    pub notes: Vec<String>,
}

fn map_item_row(row: &Row<'_>) -> rusqlite::Result<(Item, ItemStatus, String)> {
    let tags_json: String = row.get(1)?;
    let tags: Vec<String> = serde_json::from_str(&tags_json)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e)))?;

    let status_str: String = row.get(4)?;
    let status = status_str.parse::<ItemStatus>().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            4,
            Type::Text,
            Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Invalid item status: {status_str}"),
            )),
        )
    })?;

    let item = Item {
        content: row.get(0)?,
        tags,
        media_prompt: row.get(2)?,
        scheduled_time: row.get(3)?,
    };
    Ok((item, status, row.get(5)?))
}

/// Loads every item of a plan in position order.
pub(crate) fn load_items(conn: &Connection, plan_id: &str) -> Result<ItemRows> {
    let mut stmt = conn
        .prepare(SELECT_ITEMS_SQL)
        .db_context("Failed to prepare item query")?;

    let rows = stmt
        .query_map(params![plan_id], map_item_row)
        .db_context("Failed to query items")?;

    let mut out = ItemRows {
        items: Vec::new(),
        statuses: Vec::new(),
        notes: Vec::new(),
    };
    for row in rows {
        let (item, status, notes) = row.db_context("Failed to read item row")?;
        out.items.push(item);
        out.statuses.push(status);
        out.notes.push(notes);
    }
    Ok(out)
}

/// Writes all items of `plan`, replacing whatever was stored before.
pub(crate) fn replace_items(conn: &Connection, plan: &Plan) -> Result<()> {
    conn.execute(DELETE_ITEMS_SQL, params![plan.id])
        .db_context("Failed to clear plan items")?;

    let mut stmt = conn
        .prepare(INSERT_ITEM_SQL)
        .db_context("Failed to prepare item insert")?;

    for (position, item) in plan.items.iter().enumerate() {
        let tags = serde_json::to_string(&item.tags)?;
        stmt.execute(params![
            plan.id,
            position as i64,
            item.content,
            tags,
            item.media_prompt,
            item.scheduled_time,
            plan.status(position).as_str(),
            plan.note(position),
        ])
        .db_context("Failed to insert item")?;
    }
    Ok(())
}

/// Persists the status and notes of a single item.
pub(crate) fn update_item_mark(conn: &Connection, plan: &Plan, position: usize) -> Result<()> {
    conn.execute(
        UPDATE_ITEM_MARK_SQL,
        params![
            plan.status(position).as_str(),
            plan.note(position),
            plan.id,
            position as i64
        ],
    )
    .db_context("Failed to update item")?;
    Ok(())
}
