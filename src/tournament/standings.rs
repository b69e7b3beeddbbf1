use std::cmp::Ordering;
use std::collections::HashMap;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{groups, helpers::require_record, matches};
use crate::error::TournamentResult;
use crate::models::context::RequestContext;
use crate::models::group::{GroupStandingsResponse, StandingRow};
use crate::models::matches::Match;
use crate::tournament::results::{outcome, Outcome};

/// A team taking part in a group table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamRef {
    pub id: Uuid,
    pub name: String,
}

impl TeamRef {
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}

/// Rank a group from its completed matches.
///
/// Order: points, goal difference, goals scored (all descending). The sort is
/// stable, so teams level on all three keep their membership order.
pub fn calculate_standings(members: &[TeamRef], group_matches: &[Match]) -> Vec<StandingRow> {
    let mut rows: Vec<StandingRow> = members
        .iter()
        .map(|team| StandingRow {
            position: 0,
            team_id: team.id,
            team_name: team.name.clone(),
            played: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
        })
        .collect();

    let index: HashMap<Uuid, usize> = rows.iter().enumerate().map(|(i, r)| (r.team_id, i)).collect();

    for game in group_matches.iter().filter(|m| m.is_completed()) {
        let (home_score, away_score) = match (game.home_score, game.away_score) {
            (Some(h), Some(a)) => (h, a),
            _ => continue,
        };

        let result = outcome(home_score, away_score);
        if let Some(&i) = index.get(&game.home_team) {
            record(&mut rows[i], home_score, away_score, result == Outcome::HomeWin, result == Outcome::Draw);
        }
        if let Some(&i) = index.get(&game.away_team) {
            record(&mut rows[i], away_score, home_score, result == Outcome::AwayWin, result == Outcome::Draw);
        }
    }

    rows.sort_by(compare_rows);
    for (i, row) in rows.iter_mut().enumerate() {
        row.position = (i + 1) as i32;
    }
    rows
}

fn record(row: &mut StandingRow, scored: i32, conceded: i32, won: bool, drawn: bool) {
    row.played += 1;
    row.goals_for += scored;
    row.goals_against += conceded;
    row.goal_difference = row.goals_for - row.goals_against;
    if won {
        row.wins += 1;
        row.points += 3;
    } else if drawn {
        row.draws += 1;
        row.points += 1;
    } else {
        row.losses += 1;
    }
}

fn compare_rows(a: &StandingRow, b: &StandingRow) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goal_difference.cmp(&a.goal_difference))
        .then_with(|| b.goals_for.cmp(&a.goals_for))
}

/// Service responsible for group tables
#[derive(Debug, Clone)]
pub struct StandingsService {
    pool: PgPool,
}

impl StandingsService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(name = "Group standings", skip(self, ctx))]
    pub async fn get_group_standings(
        &self,
        ctx: &RequestContext,
        group_id: Uuid,
    ) -> TournamentResult<GroupStandingsResponse> {
        let group = require_record(
            groups::fetch_group(&self.pool, group_id, ctx.tenant_scope()).await,
            "Group not found",
        )?;

        let members: Vec<TeamRef> = groups::list_group_teams(&self.pool, group.id)
            .await?
            .into_iter()
            .map(|entry| TeamRef::new(entry.membership.team_id, entry.team_name))
            .collect();
        let group_matches = matches::list_group_matches(&self.pool, group.id).await?;

        let standings = calculate_standings(&members, &group_matches);
        tracing::debug!("Computed standings for group {} ({} teams)", group.name, standings.len());

        Ok(GroupStandingsResponse { group, standings })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime, Utc};
    use crate::models::matches::{MatchStage, MatchStatus};

    fn completed(home: Uuid, away: Uuid, home_score: i32, away_score: i32) -> Match {
        Match {
            id: Uuid::new_v4(),
            tenant_id: Uuid::nil(),
            tournament_id: Uuid::nil(),
            group_id: None,
            stage: MatchStage::Group,
            bracket_position: None,
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            time: NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
            venue: "Main field".into(),
            home_team: home,
            away_team: away,
            status: MatchStatus::Completed,
            home_score: Some(home_score),
            away_score: Some(away_score),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn alpha_gamma_beta_ordering() {
        let alpha = TeamRef::new(Uuid::new_v4(), "Alpha");
        let beta = TeamRef::new(Uuid::new_v4(), "Beta");
        let gamma = TeamRef::new(Uuid::new_v4(), "Gamma");
        let members = vec![alpha.clone(), beta.clone(), gamma.clone()];
        let results = vec![
            completed(alpha.id, beta.id, 2, 1),
            completed(beta.id, gamma.id, 0, 0),
        ];

        let table = calculate_standings(&members, &results);
        let names: Vec<&str> = table.iter().map(|r| r.team_name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Gamma", "Beta"]);
        assert_eq!((table[0].points, table[0].goal_difference), (3, 1));
        assert_eq!((table[1].points, table[1].goal_difference), (1, 0));
        assert_eq!((table[2].points, table[2].goal_difference), (1, -1));
        assert_eq!(table.iter().map(|r| r.position).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn unfinished_matches_are_ignored() {
        let a = TeamRef::new(Uuid::new_v4(), "A");
        let b = TeamRef::new(Uuid::new_v4(), "B");
        let mut live = completed(a.id, b.id, 3, 0);
        live.status = MatchStatus::InProgress;
        let mut unscored = completed(a.id, b.id, 0, 0);
        unscored.home_score = None;

        let table = calculate_standings(&[a, b], &[live, unscored]);
        assert!(table.iter().all(|r| r.played == 0 && r.points == 0));
    }

    #[test]
    fn full_ties_keep_input_order() {
        let members: Vec<TeamRef> = (0..4).map(|i| TeamRef::new(Uuid::new_v4(), format!("T{}", i))).collect();
        let table = calculate_standings(&members, &[]);
        let names: Vec<&str> = table.iter().map(|r| r.team_name.as_str()).collect();
        assert_eq!(names, vec!["T0", "T1", "T2", "T3"]);
    }

    #[test]
    fn goals_for_breaks_equal_difference() {
        let a = TeamRef::new(Uuid::new_v4(), "A");
        let b = TeamRef::new(Uuid::new_v4(), "B");
        let c = TeamRef::new(Uuid::new_v4(), "C");
        // A and B both draw with C; B's draw is higher scoring.
        let results = vec![completed(a.id, c.id, 1, 1), completed(b.id, c.id, 3, 3)];
        let table = calculate_standings(&[a, b, c], &results);
        assert_eq!(table[0].team_name, "C");
        assert_eq!(table[1].team_name, "B");
        assert_eq!(table[2].team_name, "A");
    }

    #[test]
    fn points_total_matches_results() {
        let teams: Vec<TeamRef> = (0..4).map(|i| TeamRef::new(Uuid::new_v4(), format!("T{}", i))).collect();
        let results = vec![
            completed(teams[0].id, teams[1].id, 2, 0),
            completed(teams[2].id, teams[3].id, 1, 1),
            completed(teams[0].id, teams[2].id, 0, 1),
            completed(teams[1].id, teams[3].id, 2, 2),
        ];
        let table = calculate_standings(&teams, &results);
        let total: i32 = table.iter().map(|r| r.points).sum();
        // two decisive results, two draws
        assert_eq!(total, 3 * 2 + 2 * 2);
        for row in &table {
            assert_eq!(row.wins + row.draws + row.losses, row.played);
            assert_eq!(row.points, 3 * row.wins + row.draws);
        }
    }
}
