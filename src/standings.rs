use crate::data_loader::MatchRecord;

/// Accumulated record of one team within a category. Derived per display
/// cycle, never persisted; rank is positional in the returned order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandingsRow {
    pub team: String,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i64,
    pub points: u32,
}

impl StandingsRow {
    fn new(team: &str) -> Self {
        Self {
            team: team.to_string(),
            played: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
        }
    }
}

/// Builds the league table for an already category-filtered record set.
/// Every match credits one played game to each side; win/draw/loss comes
/// from comparing own goals to the opponent's in that match. Order: points
/// desc, goal difference desc, goals scored desc, team name asc.
pub fn compute_standings(records: &[MatchRecord]) -> Vec<StandingsRow> {
    let mut rows: Vec<StandingsRow> = Vec::new();

    for m in records {
        let home = row_index(&mut rows, &m.home_team);
        credit(&mut rows[home], m.home_goals, m.away_goals);

        let away = row_index(&mut rows, &m.away_team);
        credit(&mut rows[away], m.away_goals, m.home_goals);
    }

    rows.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(b.goal_difference.cmp(&a.goal_difference))
            .then(b.goals_for.cmp(&a.goals_for))
            .then(a.team.cmp(&b.team))
    });
    rows
}

// A team's slot is its first appearance as home or away.
fn row_index(rows: &mut Vec<StandingsRow>, team: &str) -> usize {
    for (idx, row) in rows.iter().enumerate() {
        if row.team == team {
            return idx;
        }
    }
    rows.push(StandingsRow::new(team));
    rows.len() - 1
}

fn credit(row: &mut StandingsRow, scored: u32, conceded: u32) {
    row.played += 1;
    if scored > conceded {
        row.wins += 1;
    } else if scored < conceded {
        row.losses += 1;
    } else {
        row.draws += 1;
    }
    row.goals_for += scored;
    row.goals_against += conceded;
    row.goal_difference = i64::from(row.goals_for) - i64::from(row.goals_against);
    row.points = 3 * row.wins + row.draws;
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rand::prelude::*;

    use super::*;

    fn record(home: &str, away: &str, home_goals: u32, away_goals: u32) -> MatchRecord {
        MatchRecord {
            date: NaiveDate::from_ymd_opt(2025, 1, 18).unwrap(),
            category: "Rocznik 2015".to_string(),
            pitch: "Pitch 1".to_string(),
            group: "A".to_string(),
            home_team: home.to_string(),
            away_team: away.to_string(),
            home_goals,
            away_goals,
        }
    }

    fn row<'a>(rows: &'a [StandingsRow], team: &str) -> &'a StandingsRow {
        rows.iter().find(|r| r.team == team).unwrap()
    }

    #[test]
    fn empty_input_yields_an_empty_table() {
        assert!(compute_standings(&[]).is_empty());
    }

    #[test]
    fn tallies_and_orders_the_worked_example() {
        // A beats B 2-1, then B draws C 1-1.
        let records = [record("A", "B", 2, 1), record("B", "C", 1, 1)];
        let rows = compute_standings(&records);

        let a = row(&rows, "A");
        assert_eq!((a.played, a.wins, a.points), (1, 1, 3));
        assert_eq!((a.goals_for, a.goals_against, a.goal_difference), (2, 1, 1));

        let b = row(&rows, "B");
        assert_eq!((b.played, b.wins, b.draws, b.losses), (2, 0, 1, 1));
        assert_eq!((b.goals_for, b.goals_against, b.goal_difference), (2, 3, -1));
        assert_eq!(b.points, 1);

        let c = row(&rows, "C");
        assert_eq!((c.played, c.draws, c.points), (1, 1, 1));
        assert_eq!((c.goals_for, c.goals_against, c.goal_difference), (1, 1, 0));

        // B and C tie on points; C ranks above B on goal difference.
        let order: Vec<&str> = rows.iter().map(|r| r.team.as_str()).collect();
        assert_eq!(order, ["A", "C", "B"]);
    }

    #[test]
    fn home_and_away_appearances_accumulate_into_one_row() {
        let records = [record("A", "B", 3, 0), record("B", "A", 2, 2)];
        let rows = compute_standings(&records);

        let a = row(&rows, "A");
        assert_eq!((a.played, a.wins, a.draws), (2, 1, 1));
        assert_eq!((a.goals_for, a.goals_against), (5, 2));
        assert_eq!(a.points, 4);
    }

    #[test]
    fn full_tie_break_is_goals_scored_then_name() {
        // Both draw their only match: equal points and goal difference.
        let records = [record("Zubry", "Rysie", 2, 2), record("Lisy", "Borsuki", 0, 0)];
        let rows = compute_standings(&records);

        let order: Vec<&str> = rows.iter().map(|r| r.team.as_str()).collect();
        // 2-2 scorers rank above 0-0 scorers; names break the rest.
        assert_eq!(order, ["Rysie", "Zubry", "Borsuki", "Lisy"]);
    }

    #[test]
    fn order_is_stable_across_repeated_runs() {
        let records = [
            record("D", "C", 1, 1),
            record("B", "A", 0, 0),
            record("C", "B", 2, 2),
        ];
        let first = compute_standings(&records);
        for _ in 0..10 {
            assert_eq!(compute_standings(&records), first);
        }
    }

    #[test]
    fn accounting_invariants_hold_over_random_record_sets() {
        let mut rng = rand::rng();

        for _ in 0..50 {
            let match_count = rng.random_range(1..40u32);
            let records: Vec<MatchRecord> = (0..match_count)
                .map(|_| {
                    let home = rng.random_range(0..8u32);
                    let away = (home + rng.random_range(1..8u32)) % 8;
                    record(
                        &format!("Team {home}"),
                        &format!("Team {away}"),
                        rng.random_range(0..7u32),
                        rng.random_range(0..7u32),
                    )
                })
                .collect();

            let rows = compute_standings(&records);

            // Each match credits one played game to each participant.
            let played: u32 = rows.iter().map(|r| r.played).sum();
            assert_eq!(played, 2 * match_count);

            let scored: u32 = rows.iter().map(|r| r.goals_for).sum();
            let conceded: u32 = rows.iter().map(|r| r.goals_against).sum();
            assert_eq!(scored, conceded);

            for r in &rows {
                assert_eq!(r.wins + r.draws + r.losses, r.played);
                assert_eq!(r.points, 3 * r.wins + r.draws);
                assert_eq!(
                    r.goal_difference,
                    i64::from(r.goals_for) - i64::from(r.goals_against)
                );
            }

            for pair in rows.windows(2) {
                let (upper, lower) = (&pair[0], &pair[1]);
                assert!(
                    upper.points > lower.points
                        || (upper.points == lower.points
                            && upper.goal_difference >= lower.goal_difference)
                );
            }
        }
    }
}
