use chrono::NaiveDate;
use hasr_db::DatabaseHandler;
use hasr_types::{HasrRow, Session};

use crate::{RowSink, SessionSource};

impl SessionSource for DatabaseHandler {
    async fn fetch_sessions(&self) -> anyhow::Result<Vec<Session>> {
        self.get_sessions().await
    }
}

impl RowSink for DatabaseHandler {
    async fn last_written_date(&self) -> anyhow::Result<Option<NaiveDate>> {
        self.last_hasr_date().await
    }

    async fn append_rows(&self, rows: Vec<HasrRow>) -> anyhow::Result<()> {
        self.create_hasr_rows(&rows).await
    }
}
