//! SQLite-backed resource models.
//!
//! Every entity kind lives in its own table as a JSON document keyed by an
//! autoincrement id. Team rosters and season entries are join tables.

use std::str::FromStr;
use std::sync::Arc;

use serde_json::{Map, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::error::ModelError;
use crate::models::{Models, Representation};

mod entities;

pub use entities::{
    GameStore, LeagueStore, LocationStore, MatchStore, PlayStore, PlayerStore, RulesetStore,
    SeasonStore, TeamStore,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Players,
    Teams,
    Leagues,
    Seasons,
    Locations,
    Games,
    Rulesets,
    Plays,
    Matches,
}

impl Table {
    pub const ALL: [Table; 9] = [
        Table::Players,
        Table::Teams,
        Table::Leagues,
        Table::Seasons,
        Table::Locations,
        Table::Games,
        Table::Rulesets,
        Table::Plays,
        Table::Matches,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Table::Players => "players",
            Table::Teams => "teams",
            Table::Leagues => "leagues",
            Table::Seasons => "seasons",
            Table::Locations => "locations",
            Table::Games => "games",
            Table::Rulesets => "rulesets",
            Table::Plays => "plays",
            Table::Matches => "matches",
        }
    }
}

const MEMBERSHIP_SCHEMA: [&str; 2] = [
    r#"CREATE TABLE IF NOT EXISTS team_players (
        team_id INTEGER NOT NULL,
        player_id INTEGER NOT NULL,
        PRIMARY KEY (team_id, player_id)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS season_teams (
        season_id INTEGER NOT NULL,
        team_id INTEGER NOT NULL,
        PRIMARY KEY (season_id, team_id)
    )"#,
];

/// Row as stored: the id and the rest of the document.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct DocumentRow {
    pub id: i64,
    pub body: String,
}

impl DocumentRow {
    pub(crate) fn into_representation(self) -> Result<Representation, ModelError> {
        let mut document: Map<String, Value> = serde_json::from_str(&self.body)?;
        document.insert("id".to_string(), Value::from(self.id));
        Ok(Value::Object(document))
    }
}

pub(crate) fn into_representations(rows: Vec<DocumentRow>) -> Result<Vec<Representation>, ModelError> {
    rows.into_iter().map(DocumentRow::into_representation).collect()
}

/// Strip the id from an incoming payload; only objects are storable.
fn into_document(payload: Representation) -> Result<Map<String, Value>, ModelError> {
    match payload {
        Value::Object(mut document) => {
            document.remove("id");
            Ok(document)
        }
        other => Err(ModelError::InvalidPayload(format!(
            "expected a JSON object, got {}",
            other
        ))),
    }
}

fn empty_object() -> Representation {
    Value::Object(Map::new())
}

#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        // Each connection to an in-memory database gets its own database,
        // so keep exactly one alive for the life of the pool.
        let pool = if url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(5)
                .connect_with(options)
                .await?
        };

        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        for table in Table::ALL {
            let ddl = format!(
                "CREATE TABLE IF NOT EXISTS {} (id INTEGER PRIMARY KEY AUTOINCREMENT, body TEXT NOT NULL)",
                table.name()
            );
            sqlx::query(&ddl).execute(&self.pool).await?;
        }

        for ddl in MEMBERSHIP_SCHEMA {
            sqlx::query(ddl).execute(&self.pool).await?;
        }

        tracing::info!("Database schema ready.");
        Ok(())
    }

    pub fn collection(&self, table: Table) -> Collection {
        Collection {
            pool: self.pool.clone(),
            table,
        }
    }

    pub fn models(&self) -> Models {
        Models {
            players: Arc::new(PlayerStore::new(self.collection(Table::Players))),
            teams: Arc::new(TeamStore::new(self.collection(Table::Teams))),
            leagues: Arc::new(LeagueStore::new(
                self.collection(Table::Leagues),
                self.collection(Table::Seasons),
            )),
            seasons: Arc::new(SeasonStore::new(self.collection(Table::Seasons))),
            locations: Arc::new(LocationStore::new(self.collection(Table::Locations))),
            games: Arc::new(GameStore::new(self.collection(Table::Games))),
            rulesets: Arc::new(RulesetStore::new(self.collection(Table::Rulesets))),
            plays: Arc::new(PlayStore::new(self.collection(Table::Plays))),
            matches: Arc::new(MatchStore::new(
                self.collection(Table::Matches),
                self.collection(Table::Plays),
            )),
        }
    }
}

/// Document operations on one entity table.
#[derive(Clone)]
pub struct Collection {
    pool: SqlitePool,
    table: Table,
}

impl Collection {
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn all(&self) -> Result<Vec<Representation>, ModelError> {
        let sql = format!("SELECT id, body FROM {} ORDER BY id", self.table.name());
        let rows = sqlx::query_as::<_, DocumentRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        into_representations(rows)
    }

    pub async fn find(&self, id: i64) -> Result<Option<Representation>, ModelError> {
        let sql = format!("SELECT id, body FROM {} WHERE id = ?", self.table.name());
        let row = sqlx::query_as::<_, DocumentRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(DocumentRow::into_representation).transpose()
    }

    /// Documents whose integer `field` equals `value`, in id order.
    pub async fn find_by_field(
        &self,
        field: &'static str,
        value: i64,
    ) -> Result<Vec<Representation>, ModelError> {
        let sql = format!(
            "SELECT id, body FROM {} WHERE json_extract(body, '$.{}') = ? ORDER BY id",
            self.table.name(),
            field
        );
        let rows = sqlx::query_as::<_, DocumentRow>(&sql)
            .bind(value)
            .fetch_all(&self.pool)
            .await?;

        into_representations(rows)
    }

    /// Like [`Collection::find_by_field`], comparing the field as text.
    pub async fn find_by_text_field(
        &self,
        field: &'static str,
        value: &str,
    ) -> Result<Vec<Representation>, ModelError> {
        let sql = format!(
            "SELECT id, body FROM {} WHERE CAST(json_extract(body, '$.{}') AS TEXT) = ? ORDER BY id",
            self.table.name(),
            field
        );
        let rows = sqlx::query_as::<_, DocumentRow>(&sql)
            .bind(value)
            .fetch_all(&self.pool)
            .await?;

        into_representations(rows)
    }

    pub async fn insert(&self, payload: Representation) -> Result<Representation, ModelError> {
        let document = into_document(payload)?;
        let body = serde_json::to_string(&document)?;

        let sql = format!("INSERT INTO {} (body) VALUES (?)", self.table.name());
        let id = sqlx::query(&sql)
            .bind(&body)
            .execute(&self.pool)
            .await?
            .last_insert_rowid();

        DocumentRow { id, body }.into_representation()
    }

    /// Shallow-merge `payload` into the stored document. Unknown ids yield `{}`.
    ///
    /// The write only lands if the row still holds the body that was read,
    /// so a concurrent update or delete makes this re-read instead of
    /// clobbering it.
    pub async fn merge(
        &self,
        id: i64,
        payload: Representation,
    ) -> Result<Representation, ModelError> {
        let changes = into_document(payload)?;
        let select = format!("SELECT id, body FROM {} WHERE id = ?", self.table.name());
        let update = format!(
            "UPDATE {} SET body = ? WHERE id = ? AND body = ? RETURNING id, body",
            self.table.name()
        );

        loop {
            let Some(current) = sqlx::query_as::<_, DocumentRow>(&select)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
            else {
                return Ok(empty_object());
            };

            let mut document: Map<String, Value> = serde_json::from_str(&current.body)?;
            document.extend(changes.clone());
            let body = serde_json::to_string(&document)?;

            let written = sqlx::query_as::<_, DocumentRow>(&update)
                .bind(&body)
                .bind(id)
                .bind(&current.body)
                .fetch_optional(&self.pool)
                .await?;

            match written {
                Some(row) => return row.into_representation(),
                None => tracing::debug!(table = self.table.name(), id, "row changed under merge, retrying"),
            }
        }
    }

    /// Delete and return the document. Unknown ids yield `{}`.
    pub async fn remove(&self, id: i64) -> Result<Representation, ModelError> {
        let sql = format!(
            "DELETE FROM {} WHERE id = ? RETURNING id, body",
            self.table.name()
        );
        let deleted = sqlx::query_as::<_, DocumentRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match deleted {
            Some(row) => row.into_representation(),
            None => Ok(empty_object()),
        }
    }
}
