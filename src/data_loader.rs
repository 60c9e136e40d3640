use std::collections::HashMap;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use bytes::Bytes;
use chrono::NaiveDate;
use parquet::file::reader::{FileReader, SerializedFileReader};
use parquet::record::{Row, RowAccessor};

use crate::store::ObjectStore;

/// Dates come out of the result files as `DD/MM/YYYY`.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// One completed match as published in the result files. Goal counts are
/// final; a record never changes after loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    pub date: NaiveDate,
    pub category: String,
    pub pitch: String,
    pub group: String,
    pub home_team: String,
    pub away_team: String,
    pub home_goals: u32,
    pub away_goals: u32,
}

const COLUMNS: [&str; 8] = [
    "date",
    "category",
    "pitch",
    "group",
    "home_team",
    "away_team",
    "home_goals",
    "away_goals",
];

/// Fetches every result file for `city` under `<namespace>/<city>/` and
/// returns the concatenated rows. No files is an empty set, not an error; an
/// unreachable store or a malformed file is an error for this request cycle.
pub fn load_city_matches(
    store: &dyn ObjectStore,
    namespace: &str,
    city: &str,
) -> Result<Vec<MatchRecord>> {
    let prefix = format!("{namespace}/{city}/");
    let keys = store
        .list(&prefix)
        .with_context(|| format!("list result files under {prefix}"))?;

    let mut records = Vec::new();
    for key in keys.iter().filter(|key| key.ends_with(".parquet")) {
        let raw = store.get(key).with_context(|| format!("fetch {key}"))?;
        let mut rows = decode_match_file(raw).with_context(|| format!("decode {key}"))?;
        records.append(&mut rows);
    }
    Ok(records)
}

fn decode_match_file(raw: Bytes) -> Result<Vec<MatchRecord>> {
    let reader = SerializedFileReader::new(raw).context("open parquet reader")?;

    // Columns are looked up by name so files may carry extra columns or a
    // different order; a missing one fails the whole file.
    let descr = reader.metadata().file_metadata().schema_descr();
    let mut indices = [0usize; COLUMNS.len()];
    for (slot, name) in indices.iter_mut().zip(COLUMNS) {
        *slot = descr
            .columns()
            .iter()
            .position(|column| column.name() == name)
            .ok_or_else(|| anyhow!("missing column `{name}`"))?;
    }
    let [date_at, category_at, pitch_at, group_at, home_at, away_at, home_goals_at, away_goals_at] =
        indices;

    let mut records = Vec::new();
    for (row_no, row) in reader.get_row_iter(None).context("iterate rows")?.enumerate() {
        let row = row.with_context(|| format!("row {row_no}"))?;

        let date_raw = get_text(&row, date_at, "date", row_no)?;
        let date = NaiveDate::parse_from_str(&date_raw, DATE_FORMAT)
            .with_context(|| format!("row {row_no}: bad date `{date_raw}`"))?;

        records.push(MatchRecord {
            date,
            category: get_text(&row, category_at, "category", row_no)?,
            pitch: get_text(&row, pitch_at, "pitch", row_no)?,
            group: get_text(&row, group_at, "group", row_no)?,
            home_team: get_text(&row, home_at, "home_team", row_no)?,
            away_team: get_text(&row, away_at, "away_team", row_no)?,
            home_goals: get_goals(&row, home_goals_at, "home_goals", row_no)?,
            away_goals: get_goals(&row, away_goals_at, "away_goals", row_no)?,
        });
    }
    Ok(records)
}

fn get_text(row: &Row, at: usize, name: &str, row_no: usize) -> Result<String> {
    Ok(row
        .get_string(at)
        .with_context(|| format!("row {row_no}: column `{name}` is not a string"))?
        .clone())
}

// Goal columns arrive as int64 or int32 depending on who wrote the file.
fn get_goals(row: &Row, at: usize, name: &str, row_no: usize) -> Result<u32> {
    let raw = row
        .get_long(at)
        .or_else(|_| row.get_int(at).map(i64::from))
        .with_context(|| format!("row {row_no}: column `{name}` is not an integer"))?;
    u32::try_from(raw).map_err(|_| {
        anyhow!("row {row_no}: column `{name}` holds {raw}, expected a non-negative goal count")
    })
}

/// City-keyed data access with the freshness window the dashboard uses
/// between refreshes. Constructed per session and passed down; failed
/// fetches are never cached, so the next cycle retries.
pub struct DataSource<S> {
    store: S,
    namespace: String,
    ttl: Duration,
    cache: HashMap<String, (Instant, Vec<MatchRecord>)>,
}

impl<S: ObjectStore> DataSource<S> {
    pub fn new(store: S, namespace: impl Into<String>, ttl: Duration) -> Self {
        Self {
            store,
            namespace: namespace.into(),
            ttl,
            cache: HashMap::new(),
        }
    }

    pub fn city_matches(&mut self, city: &str) -> Result<Vec<MatchRecord>> {
        if let Some((fetched_at, records)) = self.cache.get(city) {
            if fetched_at.elapsed() < self.ttl {
                return Ok(records.clone());
            }
        }

        let records = load_city_matches(&self.store, &self.namespace, city)?;
        self.cache
            .insert(city.to_string(), (Instant::now(), records.clone()));
        Ok(records)
    }
}
