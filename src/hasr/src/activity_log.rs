//! Flat-table exchange: the activity log going in, the HASR table going out.

use std::io;

use anyhow::Context;
use chrono::{NaiveDate, NaiveTime};
use csv::StringRecord;
use hasr_types::{HasrRow, Session, column_names};

/// Positions of the used columns in the activity log header.
struct Columns {
    year: usize,
    month: usize,
    day: usize,
    start_time: usize,
    duration: usize,
    load: usize,
    description: usize,
    activity_type: usize,
}

impl Columns {
    fn locate(headers: &StringRecord, aggregate_variable: &str) -> anyhow::Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|header| header.trim() == name)
                .with_context(|| format!("activity log has no `{name}` column"))
        };

        Ok(Self {
            year: find("Year")?,
            month: find("Month")?,
            day: find("Day")?,
            start_time: find("Start time")?,
            duration: find("Duration [h]")?,
            load: find(aggregate_variable)?,
            description: find("Description")?,
            activity_type: find("Activity type")?,
        })
    }

    fn date(&self, record: &StringRecord) -> Option<NaiveDate> {
        let part = |idx: usize| cell(record, idx).parse::<f64>().ok();
        let (year, month, day) = (part(self.year)?, part(self.month)?, part(self.day)?);
        NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32)
    }
}

fn cell(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).map(str::trim).unwrap_or_default()
}

/// Empty cells count as 0.
fn number(value: &str) -> anyhow::Result<f64> {
    if value.is_empty() {
        return Ok(0.0);
    }
    value
        .parse()
        .with_context(|| format!("`{value}` is not a number"))
}

fn start_time(value: &str) -> anyhow::Result<NaiveTime> {
    if value.is_empty() {
        return Ok(NaiveTime::MIN);
    }
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .with_context(|| format!("`{value}` is not a HH:MM time"))
}

/// Reads sessions from an activity log with a header row.
///
/// `aggregate_variable` names the column holding the session load. Rows
/// without a valid date are skipped.
pub fn read_sessions<R: io::Read>(
    reader: R,
    aggregate_variable: &str,
) -> anyhow::Result<Vec<Session>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);
    let columns = Columns::locate(reader.headers()?, aggregate_variable)?;

    let mut sessions = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());

        let Some(date) = columns.date(&record) else {
            warn!("Skipping activity log line {line}: no valid date");
            continue;
        };

        let session = parse_session(&columns, &record, date)
            .with_context(|| format!("activity log line {line}"))?;
        sessions.push(session);
    }

    Ok(sessions)
}

fn parse_session(
    columns: &Columns,
    record: &StringRecord,
    date: NaiveDate,
) -> anyhow::Result<Session> {
    let time = start_time(cell(record, columns.start_time))?;
    let duration = number(cell(record, columns.duration))?;
    let load = number(cell(record, columns.load))?;

    let session = Session::new(
        date.and_time(time),
        duration,
        load,
        cell(record, columns.description),
        cell(record, columns.activity_type),
    )?;

    Ok(session)
}

/// Writes the HASR table with its header. Undefined values are left empty.
pub fn write_rows<W: io::Write>(
    writer: W,
    rows: &[HasrRow],
    abbreviation: &str,
) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(column_names(abbreviation))?;
    for row in rows {
        writer.write_record(row.cells())?;
    }
    writer.flush()?;

    Ok(())
}
