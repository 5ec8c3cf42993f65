use super::DbConn;
use crate::domain::Airport;
use anyhow::Result;

/// Repository for the read-only airport catalog.
pub struct AirportRepository {
    conn: DbConn,
}

impl AirportRepository {
    pub fn new(conn: DbConn) -> Self {
        Self { conn }
    }

    /// All airports whose name or IATA code contains `substring`,
    /// case-insensitive, ranked by passenger volume with ascending id
    /// as the deterministic tie-break.
    pub fn search(&self, substring: &str) -> Result<Vec<Airport>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"
            SELECT id, iata_code, name, passengers FROM airport
            WHERE name LIKE '%' || ?1 || '%'
            OR iata_code LIKE '%' || ?1 || '%'
            ORDER BY passengers DESC, id ASC
            "#,
        )?;

        let rows = stmt.query_map([substring], |row| {
            Ok(Airport {
                id: row.get(0)?,
                iata_code: row.get(1)?,
                name: row.get(2)?,
                passengers: row.get(3)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Full catalog in ranking order.
    pub fn list_all(&self) -> Result<Vec<Airport>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, iata_code, name, passengers FROM airport ORDER BY passengers DESC, id ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(Airport {
                id: row.get(0)?,
                iata_code: row.get(1)?,
                name: row.get(2)?,
                passengers: row.get(3)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
