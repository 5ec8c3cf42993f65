use super::DbConn;
use crate::domain::{Favorite, FavoriteId};
use anyhow::Result;

/// Repository for favorite route operations.
pub struct FavoriteRepository {
    conn: DbConn,
}

impl FavoriteRepository {
    pub fn new(conn: DbConn) -> Self {
        Self { conn }
    }

    /// Upsert by id: an existing row with the same id is replaced
    /// entirely. No code-format validation happens at this layer.
    pub fn insert(&self, favorite: &Favorite) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"
            INSERT OR REPLACE INTO favorite (id, departure_code, destination_code)
            VALUES (?1, ?2, ?3)
            "#,
            (
                &favorite.id,
                &favorite.departure_code,
                &favorite.destination_code,
            ),
        )?;
        Ok(())
    }

    /// Remove the row with the given id. Deleting an id that does not
    /// exist is a no-op, not an error.
    pub fn delete(&self, id: FavoriteId) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        let affected = conn.execute("DELETE FROM favorite WHERE id = ?1", [id])?;
        Ok(affected)
    }

    /// Full favorites set in ascending id order (stable across
    /// repeated reads of the same state).
    pub fn list_all(&self) -> Result<Vec<Favorite>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, departure_code, destination_code FROM favorite ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(Favorite {
                id: row.get(0)?,
                departure_code: row.get(1)?,
                destination_code: row.get(2)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
