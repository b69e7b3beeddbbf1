//! Random group draw for a tournament's registered teams.

use rand::seq::SliceRandom;
use rand::Rng;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{groups, helpers::require_record, tournaments};
use crate::error::{TournamentError, TournamentResult};
use crate::models::context::RequestContext;
use crate::models::group::{GroupTeamEntry, GroupWithTeams};
use crate::models::team::Team;

/// "Group A", "Group B", ... then "Group AA" past Z.
pub fn group_name(index: usize) -> String {
    let mut label = String::new();
    let mut n = index;
    loop {
        label.insert(0, (b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    format!("Group {}", label)
}

/// Deal items one at a time into `group_count` piles, in order.
pub fn deal_into_groups<T>(items: Vec<T>, group_count: usize) -> Vec<Vec<T>> {
    let mut piles: Vec<Vec<T>> = (0..group_count).map(|_| Vec::new()).collect();
    if group_count == 0 {
        return piles;
    }
    for (i, item) in items.into_iter().enumerate() {
        piles[i % group_count].push(item);
    }
    piles
}

/// Shuffle, then deal.
pub fn draw_groups<T, R: Rng + ?Sized>(mut items: Vec<T>, group_count: usize, rng: &mut R) -> Vec<Vec<T>> {
    items.shuffle(rng);
    deal_into_groups(items, group_count)
}

#[derive(Debug, Clone)]
pub struct DrawService {
    pool: PgPool,
}

impl DrawService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(name = "Generate draw", skip(self, ctx))]
    pub async fn generate_draw(
        &self,
        ctx: &RequestContext,
        tournament_id: Uuid,
        number_of_groups: Option<i32>,
    ) -> TournamentResult<Vec<GroupWithTeams>> {
        ctx.require_manager()?;

        let mut tx = self.pool.begin().await?;

        let tournament = require_record(
            tournaments::fetch_tournament(&mut *tx, tournament_id, ctx.tenant_scope()).await,
            "Tournament not found",
        )?;
        if tournament.draw_completed {
            return Err(TournamentError::conflict("The draw has already been completed"));
        }

        let group_count = number_of_groups.unwrap_or(tournament.number_of_groups);
        if group_count < 1 {
            return Err(TournamentError::validation("A draw needs at least one group"));
        }

        let registered = tournaments::list_registered_teams(&mut *tx, tournament.id).await?;
        if registered.len() < 2 * group_count as usize {
            return Err(TournamentError::validation(format!(
                "Not enough registered teams: {} groups need at least {}, found {}",
                group_count,
                2 * group_count,
                registered.len()
            )));
        }

        let piles: Vec<Vec<Team>> = {
            let mut rng = rand::thread_rng();
            draw_groups(registered, group_count as usize, &mut rng)
        };

        let mut drawn = Vec::with_capacity(piles.len());
        for (i, pile) in piles.into_iter().enumerate() {
            let group = groups::insert_group(&mut *tx, tournament.tenant_id, tournament.id, &group_name(i)).await?;
            let mut group_teams = Vec::with_capacity(pile.len());
            for team in pile {
                let membership = groups::insert_membership(&mut *tx, group.id, team.id, tournament.id).await?;
                group_teams.push(GroupTeamEntry { membership, team_name: team.name, team_logo: team.logo });
            }
            drawn.push(GroupWithTeams { group, group_teams });
        }

        tournaments::mark_draw_completed(&mut *tx, tournament.id, group_count).await?;
        tx.commit().await?;

        tracing::info!("Draw completed for tournament {} into {} groups", tournament.id, drawn.len());
        Ok(drawn)
    }
}
