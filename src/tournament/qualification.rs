use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{groups, helpers::require_record, matches, tournaments};
use crate::error::{TournamentError, TournamentResult};
use crate::models::context::RequestContext;
use crate::models::group::{Group, StandingRow};
use crate::models::tournament::{QualificationResponse, QualifiedTeam};
use crate::tournament::standings::{calculate_standings, TeamRef};

/// A finished group table.
#[derive(Debug, Clone)]
pub struct GroupTable {
    pub group: Group,
    pub standings: Vec<StandingRow>,
}

/// Top `per_group` teams of every table in seeding order: all group winners
/// (groups by name), then all runners-up, and so on.
pub fn select_qualifiers(tables: &[GroupTable], per_group: usize) -> TournamentResult<Vec<QualifiedTeam>> {
    let mut ordered: Vec<&GroupTable> = tables.iter().collect();
    ordered.sort_by(|a, b| a.group.name.cmp(&b.group.name));

    if let Some(short) = ordered.iter().find(|t| t.standings.len() < per_group) {
        return Err(TournamentError::validation(format!(
            "{} has {} teams but {} must qualify",
            short.group.name,
            short.standings.len(),
            per_group
        )));
    }

    let mut qualified = Vec::with_capacity(ordered.len() * per_group);
    for place in 0..per_group {
        for table in &ordered {
            let row = &table.standings[place];
            qualified.push(QualifiedTeam {
                group_id: table.group.id,
                group_name: table.group.name.clone(),
                team_id: row.team_id,
                team_name: row.team_name.clone(),
                position: row.position,
                points: row.points,
                goal_difference: row.goal_difference,
            });
        }
    }
    Ok(qualified)
}

#[derive(Debug, Clone)]
pub struct QualificationService {
    pool: PgPool,
}

impl QualificationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Rank every group of a finished group phase and pick the qualifiers.
    #[tracing::instrument(name = "Assign qualified teams", skip(self, ctx))]
    pub async fn assign_qualified_teams(
        &self,
        ctx: &RequestContext,
        tournament_id: Uuid,
    ) -> TournamentResult<QualificationResponse> {
        let tournament = require_record(
            tournaments::fetch_tournament(&self.pool, tournament_id, ctx.tenant_scope()).await,
            "Tournament not found",
        )?;

        let tournament_groups = groups::list_groups(&self.pool, tournament.id).await?;
        if tournament_groups.is_empty() {
            return Err(TournamentError::validation("The tournament has no groups"));
        }

        let mut tables = Vec::with_capacity(tournament_groups.len());
        for group in tournament_groups {
            let group_matches = matches::list_group_matches(&self.pool, group.id).await?;
            let unplayed = group_matches.iter().filter(|m| !m.is_completed()).count();
            if unplayed > 0 {
                return Err(TournamentError::validation(format!(
                    "{} still has {} unplayed matches",
                    group.name, unplayed
                )));
            }

            let members: Vec<TeamRef> = groups::list_group_teams(&self.pool, group.id)
                .await?
                .into_iter()
                .map(|entry| TeamRef::new(entry.membership.team_id, entry.team_name))
                .collect();
            let standings = calculate_standings(&members, &group_matches);
            tables.push(GroupTable { group, standings });
        }

        let qualified_teams = select_qualifiers(&tables, tournament.qualifiers_per_group.max(1) as usize)?;
        tracing::info!(
            "{} teams qualified from {} groups of tournament {}",
            qualified_teams.len(),
            tables.len(),
            tournament.id
        );

        Ok(QualificationResponse { qualified_teams })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn table(name: &str, teams: &[&str]) -> GroupTable {
        let group = Group {
            id: Uuid::new_v4(),
            tenant_id: Uuid::nil(),
            tournament_id: Uuid::nil(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        let standings = teams
            .iter()
            .enumerate()
            .map(|(i, team)| StandingRow {
                position: i as i32 + 1,
                team_id: Uuid::new_v4(),
                team_name: team.to_string(),
                played: 3,
                wins: 0,
                draws: 0,
                losses: 0,
                goals_for: 0,
                goals_against: 0,
                goal_difference: 0,
                points: 9 - 3 * i as i32,
            })
            .collect();
        GroupTable { group, standings }
    }

    #[test]
    fn winners_come_before_runners_up() {
        let tables = vec![
            table("Group B", &["B1", "B2", "B3"]),
            table("Group A", &["A1", "A2", "A3"]),
        ];
        let qualified = select_qualifiers(&tables, 2).unwrap();
        let names: Vec<&str> = qualified.iter().map(|q| q.team_name.as_str()).collect();
        assert_eq!(names, vec!["A1", "B1", "A2", "B2"]);
        assert_eq!(qualified[0].group_name, "Group A");
        assert_eq!(qualified[3].position, 2);
    }

    #[test]
    fn short_group_is_rejected() {
        let tables = vec![table("Group A", &["A1", "A2"]), table("Group B", &["B1"])];
        let err = select_qualifiers(&tables, 2).unwrap_err();
        assert!(matches!(err, TournamentError::Validation(msg) if msg.contains("Group B")));
    }
}
