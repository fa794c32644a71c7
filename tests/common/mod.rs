#![allow(dead_code)]

use canopy::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub id: i64,
    pub parent_id: Option<i64>,
    pub name: String,
}

impl ForestRecord for Location {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }

    fn parent_id(&self) -> Option<i64> {
        self.parent_id
    }
}

#[cfg(feature = "rusqlite")]
impl FromRow<::rusqlite::Row<'_>> for Location {
    fn from_row(row: &::rusqlite::Row<'_>) -> canopy::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            parent_id: row.get("parent_id")?,
            name: row.get("name")?,
        })
    }
}

#[cfg(feature = "postgres-sync")]
impl FromRow<::postgres::Row> for Location {
    fn from_row(row: &::postgres::Row) -> canopy::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            parent_id: row.try_get("parent_id")?,
            name: row.try_get("name")?,
        })
    }
}

pub fn locations_config() -> ForestConfig {
    ForestConfig::builder("locations")
        .order("name")
        .dependent(Dependent::Destroy)
        .build()
        .expect("valid config")
}

pub fn locations() -> ForestTable<Location> {
    ForestTable::new(locations_config())
}

/// Ids of the seeded rows.
///
/// ```text
/// USA ── Illinois ── Chicago
///     └─ Indiana
/// Canada ── British Columbia
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Places {
    pub usa: i64,
    pub illinois: i64,
    pub chicago: i64,
    pub indiana: i64,
    pub canada: i64,
    pub british_columbia: i64,
}

pub fn names<'f>(nodes: impl IntoIterator<Item = Node<'f, Location>>) -> Vec<String> {
    nodes.into_iter().map(|node| node.name.clone()).collect()
}

pub fn sorted_names(records: &[Location]) -> Vec<String> {
    let mut names: Vec<_> = records.iter().map(|r| r.name.clone()).collect();
    names.sort();
    names
}

#[cfg(feature = "rusqlite")]
pub use self::sqlite::*;

#[cfg(feature = "rusqlite")]
mod sqlite {
    use super::{Places, locations_config};
    use ::rusqlite::{Connection, params};

    pub fn setup_db() -> Connection {
        let conn = Connection::open_in_memory().expect("Failed to create in-memory database");
        let config = locations_config();
        let sql = format!(
            "CREATE TABLE locations (id INTEGER PRIMARY KEY, {}, name TEXT NOT NULL)",
            config.foreign_key_definition("INTEGER").sql()
        );
        conn.execute(&sql, [])
            .expect("Failed to create locations table");
        conn
    }

    pub fn insert_location(conn: &Connection, name: &str, parent: Option<i64>) -> i64 {
        conn.execute(
            "INSERT INTO locations (parent_id, name) VALUES (?1, ?2)",
            params![parent, name],
        )
        .expect("Failed to insert location");
        conn.last_insert_rowid()
    }

    pub fn set_parent(conn: &Connection, id: i64, parent: Option<i64>) {
        conn.execute(
            "UPDATE locations SET parent_id = ?1 WHERE id = ?2",
            params![parent, id],
        )
        .expect("Failed to update parent");
    }

    pub fn seed(conn: &Connection) -> Places {
        let usa = insert_location(conn, "USA", None);
        let illinois = insert_location(conn, "Illinois", Some(usa));
        let chicago = insert_location(conn, "Chicago", Some(illinois));
        let indiana = insert_location(conn, "Indiana", Some(usa));
        let canada = insert_location(conn, "Canada", None);
        let british_columbia = insert_location(conn, "British Columbia", Some(canada));

        Places {
            usa,
            illinois,
            chicago,
            indiana,
            canada,
            british_columbia,
        }
    }

    pub fn setup_seeded() -> (Connection, Places) {
        let conn = setup_db();
        let places = seed(&conn);
        (conn, places)
    }
}
