//! Plan-level queries and the [`PlanStore`] implementation for [`Database`].

use jiff::Timestamp;
use log::debug;
use rusqlite::{params, types::Type, Connection, OptionalExtension, Row};

use super::{item_queries, Database};
use crate::{
    error::{DatabaseResultExt, PlannerError, Result},
    models::{Plan, PlanSummary},
    params::{CreatePlan, MarkItem, UpdatePlan},
    store::{resolve_plan_id, PlanStore},
};

const SELECT_PLAN_SQL: &str =
    "SELECT id, title, created_at, updated_at FROM plans WHERE id = ?1";
const PLAN_EXISTS_SQL: &str = "SELECT 1 FROM plans WHERE id = ?1";
const INSERT_PLAN_SQL: &str =
    "INSERT INTO plans (id, title, created_at, updated_at) VALUES (?1, ?2, ?3, ?4)";
const UPDATE_PLAN_SQL: &str = "UPDATE plans SET title = ?1, updated_at = ?2 WHERE id = ?3";
const TOUCH_PLAN_SQL: &str = "UPDATE plans SET updated_at = ?1 WHERE id = ?2";
const DELETE_PLAN_ITEMS_SQL: &str = "DELETE FROM plan_items WHERE plan_id = ?1";
const DELETE_PLAN_SQL: &str = "DELETE FROM plans WHERE id = ?1";

const LIST_PLANS_SQL: &str = r"
    SELECT p.id, p.title, p.updated_at,
           COUNT(i.position) AS total_items,
           COALESCE(SUM(CASE WHEN i.status = 'completed' THEN 1 ELSE 0 END), 0) AS completed_items
    FROM plans p
    LEFT JOIN plan_items i ON i.plan_id = p.id
    GROUP BY p.seq
    ORDER BY p.seq";

const GET_ACTIVE_SQL: &str = "SELECT value FROM store_state WHERE key = 'active_plan'";
const SET_ACTIVE_SQL: &str = "INSERT INTO store_state (key, value) VALUES ('active_plan', ?1)
     ON CONFLICT(key) DO UPDATE SET value = excluded.value";
const CLEAR_ACTIVE_SQL: &str = "DELETE FROM store_state WHERE key = 'active_plan' AND value = ?1";

fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Timestamp> {
    let raw: String = row.get(idx)?;
    raw.parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn plan_exists(conn: &Connection, id: &str) -> Result<bool> {
    conn.query_row(PLAN_EXISTS_SQL, params![id], |_| Ok(()))
        .optional()
        .map(|found| found.is_some())
        .db_context("Failed to check plan existence")
}

/// Loads a full plan, or `None` when the ID is unknown.
fn load_plan(conn: &Connection, id: &str) -> Result<Option<Plan>> {
    let header = conn
        .query_row(SELECT_PLAN_SQL, params![id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                timestamp_column(row, 2)?,
                timestamp_column(row, 3)?,
            ))
        })
        .optional()
        .db_context("Failed to query plan")?;

    let Some((id, title, created_at, updated_at)) = header else {
        return Ok(None);
    };

    let rows = item_queries::load_items(conn, &id)?;
    let mut plan = Plan {
        id,
        title,
        items: rows.items,
        statuses: rows.statuses,
        notes: rows.notes,
        created_at,
        updated_at,
    };
    plan.normalize();
    Ok(Some(plan))
}

fn require_plan(conn: &Connection, id: &str) -> Result<Plan> {
    load_plan(conn, id)?.ok_or_else(|| PlannerError::not_found(id))
}

fn active_id(conn: &Connection) -> Result<Option<String>> {
    conn.query_row(GET_ACTIVE_SQL, [], |row| row.get(0))
        .optional()
        .db_context("Failed to read active plan")
}

fn set_active(conn: &Connection, id: &str) -> Result<()> {
    conn.execute(SET_ACTIVE_SQL, params![id])
        .db_context("Failed to set active plan")?;
    Ok(())
}

impl PlanStore for Database {
    fn create_plan(&mut self, request: &CreatePlan) -> Result<Plan> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        if plan_exists(&tx, &request.id)? {
            return Err(PlannerError::AlreadyExists {
                id: request.id.clone(),
            });
        }

        let plan = Plan::new(&request.id, &request.title, request.items.clone())?;
        tx.execute(
            INSERT_PLAN_SQL,
            params![
                plan.id,
                plan.title,
                plan.created_at.to_string(),
                plan.updated_at.to_string()
            ],
        )
        .db_context("Failed to insert plan")?;
        item_queries::replace_items(&tx, &plan)?;
        set_active(&tx, &plan.id)?;

        tx.commit().db_context("Failed to commit plan creation")?;
        debug!("Stored plan {} with {} items", plan.id, plan.items.len());
        Ok(plan)
    }

    fn update_plan(&mut self, request: &UpdatePlan) -> Result<(Plan, Vec<String>)> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let mut plan = require_plan(&tx, &request.id)?;
        let changes = plan.apply_update(request.title.as_deref(), request.items.clone())?;

        tx.execute(
            UPDATE_PLAN_SQL,
            params![plan.title, plan.updated_at.to_string(), plan.id],
        )
        .db_context("Failed to update plan")?;
        if request.items.is_some() {
            item_queries::replace_items(&tx, &plan)?;
        }

        tx.commit().db_context("Failed to commit plan update")?;
        Ok((plan, changes))
    }

    fn get_plan(&self, id: Option<&str>) -> Result<Plan> {
        let id = resolve_plan_id(id, active_id(&self.connection)?)?;
        require_plan(&self.connection, &id)
    }

    fn set_active_plan(&mut self, id: &str) -> Result<Plan> {
        let plan = require_plan(&self.connection, id)?;
        set_active(&self.connection, &plan.id)?;
        Ok(plan)
    }

    fn mark_item(&mut self, request: &MarkItem) -> Result<(Plan, usize)> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let id = resolve_plan_id(request.plan_id.as_deref(), active_id(&tx)?)?;
        let mut plan = require_plan(&tx, &id)?;
        let index = plan.apply_mark(
            request.index,
            request.status.as_deref(),
            request.notes.as_deref(),
        )?;

        item_queries::update_item_mark(&tx, &plan, index)?;
        tx.execute(TOUCH_PLAN_SQL, params![plan.updated_at.to_string(), plan.id])
            .db_context("Failed to update plan timestamp")?;

        tx.commit().db_context("Failed to commit item mark")?;
        Ok((plan, index))
    }

    fn delete_plan(&mut self, id: &str) -> Result<Plan> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let plan = require_plan(&tx, id)?;
        tx.execute(DELETE_PLAN_ITEMS_SQL, params![id])
            .db_context("Failed to delete plan items")?;
        tx.execute(DELETE_PLAN_SQL, params![id])
            .db_context("Failed to delete plan")?;
        tx.execute(CLEAR_ACTIVE_SQL, params![id])
            .db_context("Failed to clear active plan")?;

        tx.commit().db_context("Failed to commit plan deletion")?;
        Ok(plan)
    }

    fn list_plans(&self) -> Result<Vec<PlanSummary>> {
        let active = active_id(&self.connection)?;

        let mut stmt = self
            .connection
            .prepare(LIST_PLANS_SQL)
            .db_context("Failed to prepare plan listing")?;

        let rows = stmt
            .query_map([], |row| {
                let id: String = row.get(0)?;
                Ok(PlanSummary {
                    active: active.as_deref() == Some(id.as_str()),
                    id,
                    title: row.get(1)?,
                    updated_at: timestamp_column(row, 2)?,
                    total_items: row.get::<_, i64>(3)? as usize,
                    completed_items: row.get::<_, i64>(4)? as usize,
                })
            })
            .db_context("Failed to list plans")?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read plan row")
    }

    fn active_plan_id(&self) -> Result<Option<String>> {
        active_id(&self.connection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Item, ItemStatus};

    fn create(db: &mut Database, id: &str, items: &[&str]) -> Plan {
        db.create_plan(&CreatePlan {
            id: id.to_string(),
            title: format!("Plan {id}"),
            items: items.iter().map(|c| Item::new(*c)).collect(),
        })
        .unwrap()
    }

    #[test]
    fn test_create_and_reload() {
        let mut db = Database::open_in_memory().unwrap();
        let created = db
            .create_plan(&CreatePlan {
                id: "launch".to_string(),
                title: "Launch".to_string(),
                items: vec![
                    Item::new("Announce").with_tags(["#launch", "#rust"]),
                    Item::new("Demo").with_media_prompt("dashboard screenshot"),
                ],
            })
            .unwrap();

        let loaded = db.get_plan(None).unwrap();
        assert_eq!(loaded, created);
        assert_eq!(loaded.items[0].tags, vec!["#launch", "#rust"]);
        assert_eq!(db.active_plan_id().unwrap().as_deref(), Some("launch"));
    }

    #[test]
    fn test_duplicate_create_is_rejected() {
        let mut db = Database::open_in_memory().unwrap();
        create(&mut db, "a", &["one"]);

        let err = db
            .create_plan(&CreatePlan {
                id: "a".to_string(),
                title: "Again".to_string(),
                items: vec![Item::new("two")],
            })
            .unwrap_err();
        assert!(matches!(err, PlannerError::AlreadyExists { .. }));
        assert_eq!(db.get_plan(Some("a")).unwrap().items[0].content, "one");
    }

    #[test]
    fn test_mark_persists_single_item() {
        let mut db = Database::open_in_memory().unwrap();
        create(&mut db, "a", &["one", "two", "three"]);

        let (_, index) = db
            .mark_item(&MarkItem::status("a", 1, ItemStatus::Failed).with_notes("Error: boom"))
            .unwrap();
        assert_eq!(index, 1);

        let plan = db.get_plan(Some("a")).unwrap();
        assert_eq!(plan.statuses, vec![ItemStatus::Draft, ItemStatus::Failed, ItemStatus::Draft]);
        assert_eq!(plan.note(1), "Error: boom");
    }

    #[test]
    fn test_update_preserves_unchanged_items() {
        let mut db = Database::open_in_memory().unwrap();
        create(&mut db, "a", &["one", "two"]);
        db.mark_item(&MarkItem::status("a", 0, ItemStatus::Completed))
            .unwrap();
        db.mark_item(&MarkItem::status("a", 1, ItemStatus::Completed))
            .unwrap();

        let (_, changes) = db
            .update_plan(&UpdatePlan {
                id: "a".to_string(),
                title: None,
                items: Some(vec![Item::new("one"), Item::new("2"), Item::new("three")]),
            })
            .unwrap();
        assert_eq!(changes.len(), 1);

        let plan = db.get_plan(Some("a")).unwrap();
        assert_eq!(
            plan.statuses,
            vec![ItemStatus::Completed, ItemStatus::Draft, ItemStatus::Draft]
        );
    }

    #[test]
    fn test_delete_clears_active_pointer_only_for_that_plan() {
        let mut db = Database::open_in_memory().unwrap();
        create(&mut db, "a", &["one"]);
        create(&mut db, "b", &["two"]);

        db.delete_plan("a").unwrap();
        assert_eq!(db.active_plan_id().unwrap().as_deref(), Some("b"));

        db.delete_plan("b").unwrap();
        assert_eq!(db.active_plan_id().unwrap(), None);
        assert!(matches!(db.get_plan(None), Err(PlannerError::NoActivePlan)));
    }

    #[test]
    fn test_list_counts_and_order() {
        let mut db = Database::open_in_memory().unwrap();
        create(&mut db, "zeta", &["one", "two"]);
        create(&mut db, "alpha", &["one"]);
        db.mark_item(&MarkItem::status("zeta", 1, ItemStatus::Completed))
            .unwrap();

        let summaries = db.list_plans().unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].id, "zeta");
        assert_eq!(summaries[0].total_items, 2);
        assert_eq!(summaries[0].completed_items, 1);
        assert!(!summaries[0].active);
        assert!(summaries[1].active);
    }
}
