use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

use crate::data_loader::MatchRecord;
use crate::standings::StandingsRow;
use crate::views::GroupBand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Plain,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" => Ok(OutputFormat::Plain),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("unknown format `{s}`. Use plain or csv.")),
        }
    }
}

pub fn league_table(rows: &[StandingsRow], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Plain => Ok(league_table_plain(rows)),
        OutputFormat::Csv => league_table_csv(rows),
    }
}

fn league_table_plain(rows: &[StandingsRow]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "|{0:>4} | {1:26} | {2:>3} | {3:>3} | {4:>3} | {5:>3} | {6:>4} | {7:>4} | {8:>4} | {9:>4}\n",
        "#", "Team", "P", "W", "D", "L", "GF", "GA", "GD", "Pts",
    ));
    for (i, row) in rows.iter().enumerate() {
        out.push_str(&format!(
            "|{0:>3}. | {1:26} | {2:>3} | {3:>3} | {4:>3} | {5:>3} | {6:>4} | {7:>4} | {8:>+4} | {9:>4}\n",
            i + 1,
            row.team,
            row.played,
            row.wins,
            row.draws,
            row.losses,
            row.goals_for,
            row.goals_against,
            row.goal_difference,
            row.points,
        ));
    }
    out
}

fn league_table_csv(rows: &[StandingsRow]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "rank",
        "team",
        "played",
        "wins",
        "draws",
        "losses",
        "goals_for",
        "goals_against",
        "goal_difference",
        "points",
    ])?;
    for (i, row) in rows.iter().enumerate() {
        writer.write_record([
            (i + 1).to_string(),
            row.team.clone(),
            row.played.to_string(),
            row.wins.to_string(),
            row.draws.to_string(),
            row.losses.to_string(),
            row.goals_for.to_string(),
            row.goals_against.to_string(),
            row.goal_difference.to_string(),
            row.points.to_string(),
        ])?;
    }
    finish_csv(writer)
}

/// Renders the match listing. Bands are only handed in for the grouped
/// all-teams view; a band change becomes a blank separator line there.
pub fn match_results(
    list: &[MatchRecord],
    bands: Option<&[GroupBand]>,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Plain => Ok(match_results_plain(list, bands)),
        OutputFormat::Csv => match_results_csv(list),
    }
}

fn match_results_plain(list: &[MatchRecord], bands: Option<&[GroupBand]>) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "|{0:>4} | {1:10} | {2:12} | {3:5} | {4:>26} {5:>2} : {6:<2} {7:26}\n",
        "#", "Date", "Pitch", "Group", "Home", "", "", "Away",
    ));
    for (i, record) in list.iter().enumerate() {
        if let Some(bands) = bands {
            if i > 0 && bands[i] != bands[i - 1] {
                out.push('\n');
            }
        }
        out.push_str(&format!(
            "|{0:>3}. | {1} | {2:12} | {3:5} | {4:>26} {5:>2} : {6:<2} {7:26}\n",
            i + 1,
            record.date.format(crate::data_loader::DATE_FORMAT),
            record.pitch,
            record.group,
            record.home_team,
            record.home_goals,
            record.away_goals,
            record.away_team,
        ));
    }
    out
}

fn match_results_csv(list: &[MatchRecord]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "date",
        "pitch",
        "group",
        "home_team",
        "home_goals",
        "away_team",
        "away_goals",
    ])?;
    for record in list {
        writer.write_record([
            record.date.format(crate::data_loader::DATE_FORMAT).to_string(),
            record.pitch.clone(),
            record.group.clone(),
            record.home_team.clone(),
            record.home_goals.to_string(),
            record.away_team.clone(),
            record.away_goals.to_string(),
        ])?;
    }
    finish_csv(writer)
}

fn finish_csv(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let raw = writer
        .into_inner()
        .map_err(|err| anyhow!("flush csv output: {err}"))?;
    String::from_utf8(raw).context("csv output is not utf-8")
}
