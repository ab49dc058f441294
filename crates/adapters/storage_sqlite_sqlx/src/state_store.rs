//! `SQLite` implementation of [`StateStore`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use irhub_app::ports::StateStore;
use irhub_domain::error::IrHubError;
use irhub_domain::id::RemoteId;
use irhub_domain::state::{Brightness, LastState, PowerState};

use crate::error::StorageError;

#[derive(Debug, thiserror::Error)]
#[error("unknown power value {0:?} in remote_states")]
struct UnknownPower(String);

/// Wrapper for converting database rows into a domain [`LastState`].
struct Wrapper(LastState);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let power: String = row.try_get("power")?;
        let brightness: Option<i64> = row.try_get("brightness")?;

        let power = match power.as_str() {
            "on" => PowerState::On,
            "off" => PowerState::Off,
            "idle" => PowerState::Idle,
            _ => return Err(sqlx::Error::Decode(Box::new(UnknownPower(power)))),
        };
        let brightness = brightness
            .map(|value| Brightness::clamped(u32::try_from(value.max(0)).unwrap_or(u32::MAX)));

        Ok(Self(LastState { power, brightness }))
    }
}

const SELECT_BY_ID: &str = "SELECT power, brightness FROM remote_states WHERE remote_id = ?";
const UPSERT: &str = "INSERT INTO remote_states (remote_id, power, brightness, updated_at) \
     VALUES (?, ?, ?, ?) \
     ON CONFLICT (remote_id) DO UPDATE SET \
     power = excluded.power, brightness = excluded.brightness, updated_at = excluded.updated_at";

/// `SQLite`-backed restore snapshot store.
pub struct SqliteStateStore {
    pool: SqlitePool,
}

impl SqliteStateStore {
    /// Create a new store using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl StateStore for SqliteStateStore {
    fn load_last_state(
        &self,
        remote_id: &RemoteId,
    ) -> impl Future<Output = Result<Option<LastState>, IrHubError>> + Send {
        let pool = self.pool.clone();
        let remote_id = remote_id.to_string();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(remote_id)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|w| w.0))
        }
    }

    fn save_last_state(
        &self,
        remote_id: &RemoteId,
        snapshot: LastState,
    ) -> impl Future<Output = Result<(), IrHubError>> + Send {
        let pool = self.pool.clone();
        let remote_id = remote_id.to_string();
        async move {
            sqlx::query(UPSERT)
                .bind(remote_id)
                .bind(snapshot.power.as_str())
                .bind(snapshot.brightness.map(|b| i64::from(b.value())))
                .bind(chrono::Utc::now().to_rfc3339())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }
}
