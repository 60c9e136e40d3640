use std::str::FromStr;

use crate::data_loader::MatchRecord;

/// Which rendering a display cycle produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Table,
    Results,
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(ViewMode::Table),
            "results" => Ok(ViewMode::Results),
            _ => Err(format!("unknown view `{s}`. Use table or results.")),
        }
    }
}

/// Team filter for the match listing. The league table deliberately ignores
/// it: the table always reflects the whole category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeamSelection {
    All,
    Team(String),
}

impl TeamSelection {
    pub fn includes(&self, record: &MatchRecord) -> bool {
        match self {
            TeamSelection::All => true,
            TeamSelection::Team(name) => {
                record.home_team == *name || record.away_team == *name
            }
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, TeamSelection::All)
    }
}

/// Sorted unique category labels; populates the age-category selector.
pub fn distinct_categories(records: &[MatchRecord]) -> Vec<String> {
    let mut categories: Vec<String> = records.iter().map(|r| r.category.clone()).collect();
    categories.sort();
    categories.dedup();
    categories
}

/// Sorted unique team names over both home and away appearances; populates
/// the team selector.
pub fn distinct_teams(records: &[MatchRecord]) -> Vec<String> {
    let mut teams: Vec<String> = records
        .iter()
        .flat_map(|r| [r.home_team.clone(), r.away_team.clone()])
        .collect();
    teams.sort();
    teams.dedup();
    teams
}

pub fn filter_by_category(records: &[MatchRecord], category: &str) -> Vec<MatchRecord> {
    records
        .iter()
        .filter(|r| r.category == category)
        .cloned()
        .collect()
}

/// The match listing: optionally team-restricted, ordered by date ascending
/// with group as the secondary key. Pure projection and sort.
pub fn match_list(records: &[MatchRecord], selection: &TeamSelection) -> Vec<MatchRecord> {
    let mut list: Vec<MatchRecord> = records
        .iter()
        .filter(|r| selection.includes(r))
        .cloned()
        .collect();
    list.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.group.cmp(&b.group)));
    list
}

/// Presentation bucket for a listed row. Distinct group labels alternate
/// between the two buckets in order of first appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBand {
    Primary,
    Alternate,
}

pub fn group_bands(list: &[MatchRecord]) -> Vec<GroupBand> {
    let mut seen: Vec<&str> = Vec::new();
    list.iter()
        .map(|r| {
            let at = match seen.iter().position(|group| *group == r.group) {
                Some(at) => at,
                None => {
                    seen.push(&r.group);
                    seen.len() - 1
                }
            };
            if at % 2 == 0 {
                GroupBand::Primary
            } else {
                GroupBand::Alternate
            }
        })
        .collect()
}
