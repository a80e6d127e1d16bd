use hasr_entities::sessions;
use hasr_migration::{Migrator, MigratorTrait, OnConflict};
use hasr_types::Session;
use sea_orm::{
    ActiveValue::NotSet, ConnectOptions, Database, DatabaseConnection, EntityTrait, QueryOrder,
    Set,
};

// SQLite limits to 999 SQL variables, so batch sizes must respect:
// sessions: 5 Set columns -> max 199 rows
// hasr_rows: 23 Set columns -> max 43 rows
pub(crate) const SESSIONS_BATCH: usize = 160;
pub(crate) const HASR_ROWS_BATCH: usize = 40;

#[derive(Clone)]
pub struct DatabaseHandler {
    pub(crate) db: DatabaseConnection,
}

impl DatabaseHandler {
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Connects and brings the schema up to date.
    pub async fn new<C>(path: C) -> anyhow::Result<Self>
    where
        C: Into<ConnectOptions>,
    {
        let db = Database::connect(path).await?;
        Migrator::up(&db, None).await?;

        Ok(Self { db })
    }

    /// Stores sessions, replacing the ones with an already known start. When
    /// `items` repeats a start, the last of them wins.
    pub async fn create_sessions(&self, mut items: Vec<Session>) -> anyhow::Result<()> {
        if items.is_empty() {
            return Ok(());
        }

        // An upsert statement may touch each row only once.
        items.sort_by_key(|session| session.start);
        items.reverse();
        items.dedup_by_key(|session| session.start);

        let models: Vec<_> = items
            .into_iter()
            .map(|session| sessions::ActiveModel {
                id: NotSet,
                start: Set(session.start),
                duration_hours: Set(session.duration_hours),
                load: Set(session.load),
                description: Set(session.description),
                activity_type: Set(session.activity_type),
            })
            .collect();

        for chunk in models.chunks(SESSIONS_BATCH) {
            sessions::Entity::insert_many(chunk.to_vec())
                .on_conflict(
                    OnConflict::column(sessions::Column::Start)
                        .update_columns([
                            sessions::Column::DurationHours,
                            sessions::Column::Load,
                            sessions::Column::Description,
                            sessions::Column::ActivityType,
                        ])
                        .to_owned(),
                )
                .exec(&self.db)
                .await?;
        }

        Ok(())
    }

    /// Every stored session, oldest first.
    pub async fn get_sessions(&self) -> anyhow::Result<Vec<Session>> {
        sessions::Entity::find()
            .order_by_asc(sessions::Column::Start)
            .all(&self.db)
            .await?
            .into_iter()
            .map(map_session)
            .collect()
    }
}

fn map_session(model: sessions::Model) -> anyhow::Result<Session> {
    let session = Session::new(
        model.start,
        model.duration_hours,
        model.load,
        model.description,
        model.activity_type,
    )?;

    Ok(session)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, day)
            .unwrap()
            .and_hms_opt(hour, 15, 0)
            .unwrap()
    }

    fn session(day: u32, hour: u32, load: f64) -> Session {
        Session::new(at(day, hour), 1.5, load, "Intervals", "Cycling").unwrap()
    }

    #[tokio::test]
    async fn create_and_get_sessions() {
        let db = DatabaseHandler::new("sqlite::memory:").await.unwrap();

        db.create_sessions(vec![
            session(3, 18, 120.0),
            session(1, 7, 80.0),
            session(3, 6, 40.0),
        ])
        .await
        .unwrap();

        let sessions = db.get_sessions().await.unwrap();
        assert_eq!(sessions.len(), 3);
        assert_eq!(sessions[0].start, at(1, 7));
        assert_eq!(sessions[1].start, at(3, 6));
        assert_eq!(sessions[2].load, 120.0);
        assert_eq!(sessions[2].description, "Intervals");
        assert_eq!(sessions[2].activity_type, "Cycling");
    }

    #[tokio::test]
    async fn upsert_session_on_conflict() {
        let db = DatabaseHandler::new("sqlite::memory:").await.unwrap();

        db.create_sessions(vec![session(1, 7, 80.0)]).await.unwrap();
        db.create_sessions(vec![session(1, 7, 95.0)]).await.unwrap();

        let sessions = db.get_sessions().await.unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].load, 95.0);
    }

    #[tokio::test]
    async fn repeated_start_keeps_last() {
        let db = DatabaseHandler::new("sqlite::memory:").await.unwrap();

        db.create_sessions(vec![
            session(1, 7, 80.0),
            session(2, 7, 60.0),
            session(1, 7, 95.0),
        ])
        .await
        .unwrap();

        let sessions = db.get_sessions().await.unwrap();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].load, 95.0);
        assert_eq!(sessions[1].load, 60.0);
    }

    #[tokio::test]
    async fn create_sessions_in_batches() {
        let db = DatabaseHandler::new("sqlite::memory:").await.unwrap();

        let start = at(1, 0);
        let sessions: Vec<Session> = (0..(SESSIONS_BATCH as i64 + 20))
            .map(|i| {
                Session::new(
                    start + chrono::TimeDelta::hours(i),
                    1.0,
                    50.0,
                    "",
                    "Running",
                )
                .unwrap()
            })
            .collect();

        db.create_sessions(sessions).await.unwrap();
        db.create_sessions(vec![]).await.unwrap();

        assert_eq!(db.get_sessions().await.unwrap().len(), SESSIONS_BATCH + 20);
    }
}
