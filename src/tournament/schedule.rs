use std::collections::HashMap;
use chrono::{Duration, NaiveDate, NaiveTime};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{groups, helpers::require_record, matches, tournaments};
use crate::error::{TournamentError, TournamentResult};
use crate::models::context::RequestContext;
use crate::models::matches::{Match, MatchStage, NewMatch};
use crate::models::tournament::{FinalPhaseSummary, GenerationSummary, Tournament};
use crate::tournament::qualification::QualificationService;
use crate::tournament::validation::TournamentValidator;

pub const DEFAULT_KICKOFF: &str = "15:00";
pub const DEFAULT_VENUE: &str = "TBD";

/// A pairing waiting for a date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    pub group_id: Option<Uuid>,
    pub home: Uuid,
    pub away: Uuid,
    pub round: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledFixture {
    pub fixture: Fixture,
    pub day: i32,
    pub date: NaiveDate,
}

/// Circle-method round robin. Returns one `Vec` of pairings per round.
///
/// An odd field gets a bye, so every team sits out exactly one round.
pub fn round_robin_rounds(team_ids: &[Uuid]) -> Vec<Vec<(Uuid, Uuid)>> {
    if team_ids.len() < 2 {
        return Vec::new();
    }

    let mut slots: Vec<Option<Uuid>> = team_ids.iter().copied().map(Some).collect();
    if slots.len() % 2 == 1 {
        slots.push(None);
    }
    let n = slots.len();
    let mut rounds = Vec::with_capacity(n - 1);

    for round in 0..n - 1 {
        let mut pairings = Vec::with_capacity(n / 2);
        for i in 0..n / 2 {
            if let (Some(a), Some(b)) = (slots[i], slots[n - 1 - i]) {
                // the pivot alternates home and away between rounds
                let flip = if i == 0 { round % 2 == 1 } else { i % 2 == 1 };
                pairings.push(if flip { (b, a) } else { (a, b) });
            }
        }
        rounds.push(pairings);
        slots[1..].rotate_right(1);
    }

    rounds
}

/// Fixtures for several groups, interleaved round by round.
pub fn group_fixtures(groups: &[(Uuid, Vec<Uuid>)]) -> Vec<Fixture> {
    let per_group: Vec<(Uuid, Vec<Vec<(Uuid, Uuid)>>)> = groups
        .iter()
        .map(|(group_id, team_ids)| (*group_id, round_robin_rounds(team_ids)))
        .collect();
    let max_rounds = per_group.iter().map(|(_, r)| r.len()).max().unwrap_or(0);

    let mut fixtures = Vec::new();
    for round in 0..max_rounds {
        for (group_id, rounds) in &per_group {
            if let Some(pairings) = rounds.get(round) {
                fixtures.extend(pairings.iter().map(|&(home, away)| Fixture {
                    group_id: Some(*group_id),
                    home,
                    away,
                    round,
                }));
            }
        }
    }
    fixtures
}

/// One match per day from `start`. Each day takes the fixture whose teams
/// have rested longest: largest smaller rest, then largest larger rest,
/// then original order.
pub fn assign_match_days(fixtures: Vec<Fixture>, start: NaiveDate) -> Vec<ScheduledFixture> {
    let mut pending: Vec<(usize, Fixture)> = fixtures.into_iter().enumerate().collect();
    let mut last_played: HashMap<Uuid, i64> = HashMap::new();
    let mut scheduled = Vec::with_capacity(pending.len());
    let mut day: i64 = 0;

    while !pending.is_empty() {
        let rest = |team: &Uuid| last_played.get(team).map_or(i64::MAX, |last| day - last);

        let mut best = 0;
        let mut best_key = (i64::MIN, i64::MIN);
        for (i, (_, fixture)) in pending.iter().enumerate() {
            let (r1, r2) = (rest(&fixture.home), rest(&fixture.away));
            let key = (r1.min(r2), r1.max(r2));
            // strict comparison keeps the earliest fixture on ties
            if key > best_key {
                best_key = key;
                best = i;
            }
        }

        let (_, fixture) = pending.remove(best);
        last_played.insert(fixture.home, day);
        last_played.insert(fixture.away, day);
        scheduled.push(ScheduledFixture {
            day: day as i32 + 1,
            date: start + Duration::days(day),
            fixture,
        });
        day += 1;
    }

    scheduled
}

/// First day new fixtures may use. Days up to the tournament's latest match
/// are already booked.
pub fn first_free_day(requested: NaiveDate, last_booked: Option<NaiveDate>) -> NaiveDate {
    match last_booked {
        Some(last) if last >= requested => last + Duration::days(1),
        _ => requested,
    }
}

/// Seed order for a bracket of `size` (a power of two): 1 v N, then the
/// halves are arranged so the top two seeds can only meet in the final.
pub fn bracket_seed_order(size: usize) -> Vec<usize> {
    let mut order = vec![1usize];
    while order.len() < size {
        let next = order.len() * 2;
        order = order.iter().flat_map(|&s| [s, next + 1 - s]).collect();
    }
    order
}

/// First knockout round from qualifiers listed in seeding order.
pub fn seed_bracket(qualifiers: &[Uuid]) -> TournamentResult<Vec<(Uuid, Uuid)>> {
    let n = qualifiers.len();
    if MatchStage::for_bracket_size(n).is_none() {
        return Err(TournamentError::validation(format!(
            "The knockout phase needs 2, 4, 8 or 16 qualified teams, got {}",
            n
        )));
    }
    let order = bracket_seed_order(n);
    Ok(order
        .chunks(2)
        .map(|pair| (qualifiers[pair[0] - 1], qualifiers[pair[1] - 1]))
        .collect())
}

/// Next knockout round from a finished one (ordered by bracket position).
pub fn next_round_pairings(previous: &[Match]) -> TournamentResult<Vec<(Uuid, Uuid)>> {
    if previous.len() < 2 || previous.len() % 2 != 0 {
        return Err(TournamentError::validation("The previous round has no successor"));
    }
    let winners = previous
        .iter()
        .map(|m| {
            m.winner().ok_or_else(|| {
                TournamentError::validation("All matches of the previous round must be completed with a winner")
            })
        })
        .collect::<TournamentResult<Vec<Uuid>>>()?;
    Ok(winners.chunks(2).map(|pair| (pair[0], pair[1])).collect())
}

/// Knockout fixtures needed after the group phase for `qualifiers` teams.
pub fn knockout_match_count(qualifiers: usize) -> usize {
    if MatchStage::for_bracket_size(qualifiers).is_some() {
        qualifiers - 1
    } else {
        0
    }
}

/// Knockout rounds needed for `qualifiers` teams.
pub fn knockout_round_count(qualifiers: usize) -> usize {
    if MatchStage::for_bracket_size(qualifiers).is_some() {
        qualifiers.trailing_zeros() as usize
    } else {
        0
    }
}

/// Service responsible for fixture generation
#[derive(Debug, Clone)]
pub struct ScheduleService {
    pool: PgPool,
    validator: TournamentValidator,
    qualification: QualificationService,
}

impl ScheduleService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            qualification: QualificationService::new(pool.clone()),
            pool,
            validator: TournamentValidator::new(),
        }
    }

    fn kickoff(&self, raw: Option<&str>) -> TournamentResult<NaiveTime> {
        self.validator.parse_kickoff_time(raw.unwrap_or(DEFAULT_KICKOFF))
    }

    fn venue(tournament: &Tournament) -> String {
        tournament
            .stadium
            .as_deref()
            .map(str::trim)
            .filter(|s| s.chars().count() >= 3)
            .unwrap_or(DEFAULT_VENUE)
            .to_string()
    }

    /// Generate every missing group-phase fixture of a tournament.
    #[tracing::instrument(name = "Generate group matches", skip(self, ctx))]
    pub async fn generate_group_matches(
        &self,
        ctx: &RequestContext,
        tournament_id: Uuid,
        kickoff: Option<&str>,
        start_date: Option<NaiveDate>,
    ) -> TournamentResult<GenerationSummary> {
        ctx.require_manager()?;
        let time = self.kickoff(kickoff)?;

        let tournament = require_record(
            tournaments::fetch_tournament(&self.pool, tournament_id, ctx.tenant_scope()).await,
            "Tournament not found",
        )?;
        let tournament_groups = groups::list_groups(&self.pool, tournament.id).await?;
        if tournament_groups.is_empty() {
            return Err(TournamentError::validation("The tournament has no groups"));
        }

        let members = groups::list_tournament_group_teams(&self.pool, tournament.id).await?;
        let mut teams_by_group: Vec<(Uuid, Vec<Uuid>)> = Vec::with_capacity(tournament_groups.len());
        for group in &tournament_groups {
            let team_ids: Vec<Uuid> = members
                .iter()
                .filter(|m| m.membership.group_id == group.id)
                .map(|m| m.membership.team_id)
                .collect();
            if team_ids.len() < 2 {
                return Err(TournamentError::validation(format!(
                    "{} needs at least 2 teams to generate matches",
                    group.name
                )));
            }
            teams_by_group.push((group.id, team_ids));
        }
        let all_teams: Vec<Uuid> = teams_by_group.iter().flat_map(|(_, ids)| ids.iter().copied()).collect();
        self.validator.validate_unique_teams(&all_teams)?;

        let mut tx = self.pool.begin().await?;

        let mut fixtures = Vec::new();
        for fixture in group_fixtures(&teams_by_group) {
            if let Some(group_id) = fixture.group_id {
                if matches::fixture_exists(&mut *tx, group_id, fixture.home, fixture.away).await? {
                    tracing::debug!("Fixture {} v {} already exists, skipping", fixture.home, fixture.away);
                    continue;
                }
            }
            fixtures.push(fixture);
        }

        let start = first_free_day(
            start_date.unwrap_or(tournament.start_date),
            matches::last_match_date(&mut *tx, tournament.id).await?,
        );
        let scheduled = assign_match_days(fixtures, start);
        let venue = Self::venue(&tournament);

        for slot in &scheduled {
            let new_match = NewMatch {
                tournament_id: tournament.id,
                group_id: slot.fixture.group_id,
                stage: MatchStage::Group,
                bracket_position: None,
                date: slot.date,
                time,
                venue: venue.clone(),
                home_team: slot.fixture.home,
                away_team: slot.fixture.away,
            };
            matches::insert_match(&mut *tx, tournament.tenant_id, &new_match).await?;
        }

        tx.commit().await?;

        let qualifiers = (tournament_groups.len() as i32 * tournament.qualifiers_per_group) as usize;
        let group_matches = scheduled.len() as i32;
        let final_matches = knockout_match_count(qualifiers) as i32;
        let summary = GenerationSummary {
            total_matches: group_matches + final_matches,
            total_days: scheduled.last().map_or(0, |s| s.day) + knockout_round_count(qualifiers) as i32,
            group_matches,
            final_matches,
        };

        tracing::info!(
            "Generated {} group matches for tournament {} over {} days",
            group_matches,
            tournament.id,
            scheduled.last().map_or(0, |s| s.day)
        );

        Ok(summary)
    }

    /// Create the next knockout round: the first one from the qualifiers,
    /// later ones from the winners of the previous round.
    #[tracing::instrument(name = "Generate final phase matches", skip(self, ctx))]
    pub async fn generate_final_phase_matches(
        &self,
        ctx: &RequestContext,
        tournament_id: Uuid,
        kickoff: Option<&str>,
    ) -> TournamentResult<FinalPhaseSummary> {
        ctx.require_manager()?;
        let time = self.kickoff(kickoff)?;

        let tournament = require_record(
            tournaments::fetch_tournament(&self.pool, tournament_id, ctx.tenant_scope()).await,
            "Tournament not found",
        )?;

        let all_matches = matches::list_tournament_matches(&self.pool, tournament.id).await?;
        let latest_stage = all_matches
            .iter()
            .map(|m| m.stage)
            .filter(MatchStage::is_knockout)
            .max();

        let (stage, pairings) = match latest_stage {
            None => {
                let qualified = self.qualification.assign_qualified_teams(ctx, tournament.id).await?;
                let seeds: Vec<Uuid> = qualified.qualified_teams.iter().map(|q| q.team_id).collect();
                let stage = MatchStage::for_bracket_size(seeds.len()).ok_or_else(|| {
                    TournamentError::validation(format!(
                        "The knockout phase needs 2, 4, 8 or 16 qualified teams, got {}",
                        seeds.len()
                    ))
                })?;
                (stage, seed_bracket(&seeds)?)
            }
            Some(MatchStage::Final) => {
                return Err(TournamentError::validation("The final has already been scheduled"));
            }
            Some(current) => {
                let mut previous: Vec<Match> = all_matches.into_iter().filter(|m| m.stage == current).collect();
                previous.sort_by_key(|m| m.bracket_position.unwrap_or(i32::MAX));
                if previous.iter().any(|m| !m.is_completed()) {
                    return Err(TournamentError::validation(format!(
                        "All {} matches must be completed first",
                        current
                    )));
                }
                let next = current.next().ok_or_else(|| {
                    TournamentError::validation("The knockout phase is already complete")
                })?;
                (next, next_round_pairings(&previous)?)
            }
        };

        let mut tx = self.pool.begin().await?;

        if !matches::list_stage_matches(&mut *tx, tournament.id, stage).await?.is_empty() {
            return Err(TournamentError::conflict(format!("{} matches already exist", stage)));
        }

        let first_day = matches::last_match_date(&mut *tx, tournament.id)
            .await?
            .map_or(tournament.start_date, |d| d + Duration::days(1));
        let venue = Self::venue(&tournament);

        for (i, (home, away)) in pairings.iter().enumerate() {
            let new_match = NewMatch {
                tournament_id: tournament.id,
                group_id: None,
                stage,
                bracket_position: Some(i as i32 + 1),
                date: first_day + Duration::days(i as i64),
                time,
                venue: venue.clone(),
                home_team: *home,
                away_team: *away,
            };
            matches::insert_match(&mut *tx, tournament.tenant_id, &new_match).await?;
        }

        tx.commit().await?;

        let created = pairings.len() as i32;
        let mut summary = FinalPhaseSummary { total_matches: created, ..Default::default() };
        match stage {
            MatchStage::RoundOf16 => summary.round_of_16 = created,
            MatchStage::QuarterFinal => summary.quarters = created,
            MatchStage::SemiFinal => summary.semis = created,
            MatchStage::Final => summary.final_match = created,
            MatchStage::Group => {}
        }

        tracing::info!("Created {} {} matches for tournament {}", created, stage, tournament.id);
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn teams(n: usize) -> Vec<Uuid> {
        (0..n).map(|_| Uuid::new_v4()).collect()
    }

    fn unordered(a: Uuid, b: Uuid) -> (Uuid, Uuid) {
        if a < b { (a, b) } else { (b, a) }
    }

    #[test]
    fn every_pair_meets_exactly_once() {
        for n in 2..=9 {
            let ids = teams(n);
            let pairs: Vec<(Uuid, Uuid)> = round_robin_rounds(&ids).into_iter().flatten().collect();
            assert_eq!(pairs.len(), n * (n - 1) / 2, "n = {}", n);
            let unique: HashSet<(Uuid, Uuid)> = pairs.iter().map(|&(a, b)| unordered(a, b)).collect();
            assert_eq!(unique.len(), pairs.len());
            assert!(pairs.iter().all(|(a, b)| a != b));
        }
    }

    #[test]
    fn no_team_twice_in_a_round() {
        let ids = teams(6);
        for round in round_robin_rounds(&ids) {
            let mut seen = HashSet::new();
            for (a, b) in round {
                assert!(seen.insert(a));
                assert!(seen.insert(b));
            }
        }
    }

    #[test]
    fn fewer_than_two_teams_yields_nothing() {
        assert!(round_robin_rounds(&teams(1)).is_empty());
        assert!(round_robin_rounds(&[]).is_empty());
    }

    #[test]
    fn one_match_per_day_and_no_double_bookings() {
        let groups = vec![(Uuid::new_v4(), teams(4)), (Uuid::new_v4(), teams(3))];
        let fixtures = group_fixtures(&groups);
        assert_eq!(fixtures.len(), 6 + 3);

        let start = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        let scheduled = assign_match_days(fixtures, start);
        assert_eq!(scheduled.len(), 9);

        let dates: HashSet<NaiveDate> = scheduled.iter().map(|s| s.date).collect();
        assert_eq!(dates.len(), scheduled.len());
        assert_eq!(scheduled[0].date, start);
        assert_eq!(scheduled.last().unwrap().day, 9);
    }

    #[test]
    fn new_fixtures_start_after_the_last_booked_day() {
        let start = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        let last = NaiveDate::from_ymd_opt(2025, 7, 3).unwrap();
        assert_eq!(first_free_day(start, None), start);
        assert_eq!(first_free_day(start, Some(last)), NaiveDate::from_ymd_opt(2025, 7, 4).unwrap());
        let later = NaiveDate::from_ymd_opt(2025, 7, 10).unwrap();
        assert_eq!(first_free_day(later, Some(last)), later);
    }

    #[test]
    fn rest_is_balanced_for_a_single_group() {
        let ids = teams(4);
        let scheduled = assign_match_days(group_fixtures(&[(Uuid::new_v4(), ids.clone())]), NaiveDate::from_ymd_opt(2025, 7, 1).unwrap());
        // four teams, six matches: nobody should play on consecutive days twice in a row
        for team in &ids {
            let days: Vec<i32> = scheduled
                .iter()
                .filter(|s| s.fixture.home == *team || s.fixture.away == *team)
                .map(|s| s.day)
                .collect();
            assert_eq!(days.len(), 3);
            let back_to_back = days.windows(2).filter(|w| w[1] - w[0] == 1).count();
            assert!(back_to_back <= 1, "team played back to back too often: {:?}", days);
        }
    }

    #[test]
    fn seed_order_keeps_top_seeds_apart() {
        assert_eq!(bracket_seed_order(2), vec![1, 2]);
        assert_eq!(bracket_seed_order(4), vec![1, 4, 2, 3]);
        assert_eq!(bracket_seed_order(8), vec![1, 8, 4, 5, 2, 7, 3, 6]);
    }

    #[test]
    fn eight_qualifiers_make_four_quarter_finals() {
        let seeds = teams(8);
        let pairs = seed_bracket(&seeds).unwrap();
        assert_eq!(pairs.len(), 4);
        assert_eq!(pairs[0], (seeds[0], seeds[7]));
        assert_eq!(pairs[2], (seeds[1], seeds[6]));
        let all: HashSet<Uuid> = pairs.iter().flat_map(|&(a, b)| [a, b]).collect();
        assert_eq!(all.len(), 8);
    }

    #[test]
    fn odd_qualifier_count_is_rejected() {
        assert!(seed_bracket(&teams(6)).is_err());
        assert!(seed_bracket(&teams(1)).is_err());
    }

    #[test]
    fn knockout_counts() {
        assert_eq!(knockout_match_count(8), 7);
        assert_eq!(knockout_round_count(8), 3);
        assert_eq!(knockout_match_count(4), 3);
        assert_eq!(knockout_round_count(2), 1);
        assert_eq!(knockout_match_count(6), 0);
    }
}
