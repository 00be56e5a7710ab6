use kvmodel_core::driver::{Operation, Response};

use indexmap::IndexMap;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeSet;

pub(crate) fn apply(connection: &mut Connection, op: Operation) -> rusqlite::Result<Response> {
    match op {
        Operation::Get(op) => {
            let value = connection
                .prepare_cached("SELECT value FROM kv_string WHERE key = ?1")?
                .query_row(params![op.key], |row| row.get(0))
                .optional()?;
            Ok(Response::Value(value))
        }
        Operation::Set(op) => {
            connection
                .prepare_cached(
                    "INSERT INTO kv_string (key, value) VALUES (?1, ?2)
                     ON CONFLICT (key) DO UPDATE SET value = excluded.value",
                )?
                .execute(params![op.key, op.value])?;
            Ok(Response::Unit)
        }
        Operation::Delete(op) => {
            let tx = connection.transaction()?;
            tx.execute("DELETE FROM kv_string WHERE key = ?1", params![op.key])?;
            tx.execute("DELETE FROM kv_hash WHERE key = ?1", params![op.key])?;
            tx.execute("DELETE FROM kv_set WHERE key = ?1", params![op.key])?;
            tx.commit()?;
            Ok(Response::Unit)
        }
        Operation::HashGet(op) => {
            let value = connection
                .prepare_cached("SELECT value FROM kv_hash WHERE key = ?1 AND field = ?2")?
                .query_row(params![op.key, op.field], |row| row.get(0))
                .optional()?;
            Ok(Response::Value(value))
        }
        Operation::HashGetAll(op) => {
            let mut stmt = connection
                .prepare_cached("SELECT field, value FROM kv_hash WHERE key = ?1 ORDER BY rowid")?;
            let rows = stmt.query_map(params![op.key], |row| Ok((row.get(0)?, row.get(1)?)))?;
            let hash = rows.collect::<rusqlite::Result<IndexMap<String, String>>>()?;
            Ok(Response::Hash(hash))
        }
        Operation::HashSet(op) => {
            let tx = connection.transaction()?;
            {
                let mut stmt = tx.prepare_cached(
                    "INSERT INTO kv_hash (key, field, value) VALUES (?1, ?2, ?3)
                     ON CONFLICT (key, field) DO UPDATE SET value = excluded.value",
                )?;
                for (field, value) in &op.pairs {
                    stmt.execute(params![op.key, field, value])?;
                }
            }
            tx.commit()?;
            Ok(Response::Unit)
        }
        Operation::HashSetIfAbsent(op) => {
            let inserted = connection
                .prepare_cached(
                    "INSERT OR IGNORE INTO kv_hash (key, field, value) VALUES (?1, ?2, ?3)",
                )?
                .execute(params![op.key, op.field, op.value])?;
            Ok(Response::Bool(inserted == 1))
        }
        Operation::HashDelete(op) => {
            connection
                .prepare_cached("DELETE FROM kv_hash WHERE key = ?1 AND field = ?2")?
                .execute(params![op.key, op.field])?;
            Ok(Response::Unit)
        }
        Operation::SetAdd(op) => {
            let inserted = connection
                .prepare_cached("INSERT OR IGNORE INTO kv_set (key, member) VALUES (?1, ?2)")?
                .execute(params![op.key, op.member])?;
            Ok(Response::Bool(inserted == 1))
        }
        Operation::SetRemove(op) => {
            let removed = connection
                .prepare_cached("DELETE FROM kv_set WHERE key = ?1 AND member = ?2")?
                .execute(params![op.key, op.member])?;
            Ok(Response::Bool(removed == 1))
        }
        Operation::SetIsMember(op) => {
            let found = connection
                .prepare_cached("SELECT 1 FROM kv_set WHERE key = ?1 AND member = ?2")?
                .query_row(params![op.key, op.member], |_| Ok(()))
                .optional()?;
            Ok(Response::Bool(found.is_some()))
        }
        Operation::SetMembers(op) => {
            let mut stmt = connection.prepare_cached("SELECT member FROM kv_set WHERE key = ?1")?;
            let rows = stmt.query_map(params![op.key], |row| row.get(0))?;
            let members = rows.collect::<rusqlite::Result<BTreeSet<String>>>()?;
            Ok(Response::Members(members))
        }
        Operation::SetCardinality(op) => {
            let count: i64 = connection
                .prepare_cached("SELECT COUNT(*) FROM kv_set WHERE key = ?1")?
                .query_row(params![op.key], |row| row.get(0))?;
            Ok(Response::Count(u64::try_from(count).unwrap_or(0)))
        }
    }
}
