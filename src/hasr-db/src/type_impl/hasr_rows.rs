use std::str::FromStr;

use chrono::NaiveDate;
use hasr_entities::hasr_rows;
use hasr_types::{
    BucketSummary, HasrRow, HasrScore, SessionClassification, Stratum, WindowSummary,
};
use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, SelectColumns, Set, TransactionTrait,
};

use crate::{DatabaseHandler, db::HASR_ROWS_BATCH};

#[derive(Default, Debug)]
pub struct SearchHasrRows {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub limit: Option<u64>,
}

impl SearchHasrRows {
    pub(crate) fn conditions(self) -> Condition {
        Condition::all()
            .add_option(self.from.map(|from| hasr_rows::Column::Date.gte(from)))
            .add_option(self.to.map(|to| hasr_rows::Column::Date.lte(to)))
    }
}

impl DatabaseHandler {
    /// Day of the latest stored row, the high-water mark for the next run.
    pub async fn last_hasr_date(&self) -> anyhow::Result<Option<NaiveDate>> {
        let date = hasr_rows::Entity::find()
            .order_by_desc(hasr_rows::Column::Date)
            .select_only()
            .select_column(hasr_rows::Column::Date)
            .into_tuple()
            .one(&self.db)
            .await?;

        Ok(date)
    }

    /// Appends rows in a single transaction, either all of them are stored or
    /// none. Existing rows are never touched.
    pub async fn create_hasr_rows(&self, rows: &[HasrRow]) -> anyhow::Result<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let txn = self.db.begin().await?;
        for chunk in rows.chunks(HASR_ROWS_BATCH) {
            let models = chunk.iter().map(to_active_model);
            hasr_rows::Entity::insert_many(models).exec(&txn).await?;
        }
        txn.commit().await?;

        Ok(())
    }

    pub async fn search_hasr_rows(&self, options: SearchHasrRows) -> anyhow::Result<Vec<HasrRow>> {
        let limit = options.limit;
        hasr_rows::Entity::find()
            .filter(options.conditions())
            .limit(limit)
            .order_by_asc(hasr_rows::Column::Start)
            .order_by_asc(hasr_rows::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(map_hasr_row)
            .collect()
    }
}

/// NaN has no SQL representation, it is stored as NULL.
fn nullable(value: f64) -> Option<f64> {
    (!value.is_nan()).then_some(value)
}

fn defined(value: Option<f64>) -> f64 {
    value.unwrap_or(f64::NAN)
}

fn to_active_model(row: &HasrRow) -> hasr_rows::ActiveModel {
    let recent = row.recent;
    let baseline = row.baseline;

    hasr_rows::ActiveModel {
        id: NotSet,
        start: Set(row.start),
        date: Set(row.start.date()),
        description: Set(row.description.clone()),
        activity_type: Set(row.activity_type.clone()),
        aggregate_variable: Set(row.aggregate_variable.clone()),
        session_stratum: Set(row.session.map(|s| s.stratum.to_string())),
        baseline_rank: Set(row.session.and_then(|s| nullable(s.baseline_rank))),
        class_rank: Set(row.session.and_then(|s| nullable(s.class_rank))),
        hasr: Set(nullable(row.score.ratio)),
        recent_composite: Set(nullable(row.score.recent)),
        baseline_composite: Set(nullable(row.score.baseline)),
        recent_easy: Set(nullable(recent.easy.value)),
        recent_easy_prop: Set(nullable(recent.easy.proportion)),
        recent_hard: Set(nullable(recent.hard.value)),
        recent_hard_prop: Set(nullable(recent.hard.proportion)),
        recent_long: Set(nullable(recent.long.value)),
        recent_long_prop: Set(nullable(recent.long.proportion)),
        baseline_easy: Set(nullable(baseline.easy.value)),
        baseline_easy_prop: Set(nullable(baseline.easy.proportion)),
        baseline_hard: Set(nullable(baseline.hard.value)),
        baseline_hard_prop: Set(nullable(baseline.hard.proportion)),
        baseline_long: Set(nullable(baseline.long.value)),
        baseline_long_prop: Set(nullable(baseline.long.proportion)),
    }
}

fn map_hasr_row(model: hasr_rows::Model) -> anyhow::Result<HasrRow> {
    let session = match model.session_stratum {
        Some(stratum) => Some(SessionClassification {
            stratum: Stratum::from_str(&stratum)?,
            baseline_rank: defined(model.baseline_rank),
            class_rank: defined(model.class_rank),
        }),
        None => None,
    };

    let bucket = |value, proportion| BucketSummary {
        value: defined(value),
        proportion: defined(proportion),
    };

    Ok(HasrRow {
        start: model.start,
        description: model.description,
        activity_type: model.activity_type,
        aggregate_variable: model.aggregate_variable,
        session,
        score: HasrScore {
            ratio: defined(model.hasr),
            recent: defined(model.recent_composite),
            baseline: defined(model.baseline_composite),
        },
        recent: WindowSummary {
            easy: bucket(model.recent_easy, model.recent_easy_prop),
            hard: bucket(model.recent_hard, model.recent_hard_prop),
            long: bucket(model.recent_long, model.recent_long_prop),
        },
        baseline: WindowSummary {
            easy: bucket(model.baseline_easy, model.baseline_easy_prop),
            hard: bucket(model.baseline_hard, model.baseline_hard_prop),
            long: bucket(model.baseline_long, model.baseline_long_prop),
        },
    })
}
