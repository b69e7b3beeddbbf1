use chrono::{NaiveDate, NaiveTime, Utc};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use tournament_backend::models::matches::{Match, MatchStage, MatchStatus};
use tournament_backend::tournament::schedule::{
    assign_match_days, group_fixtures, knockout_match_count, next_round_pairings, round_robin_rounds, seed_bracket,
};

fn knockout_result(stage: MatchStage, position: i32, home: Uuid, away: Uuid, home_score: i32, away_score: i32) -> Match {
    Match {
        id: Uuid::new_v4(),
        tenant_id: Uuid::nil(),
        tournament_id: Uuid::nil(),
        group_id: None,
        stage,
        bracket_position: Some(position),
        date: NaiveDate::from_ymd_opt(2025, 7, 20).unwrap(),
        time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
        venue: "Final Arena".into(),
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
fn test_round_robin_fixture_count() {
    for n in [2usize, 3, 4, 5, 6, 8] {
        let teams: Vec<Uuid> = (0..n).map(|_| Uuid::new_v4()).collect();
        let fixtures: usize = round_robin_rounds(&teams).iter().map(Vec::len).sum();
        assert_eq!(fixtures, n * (n - 1) / 2);
    }
}

#[test]
fn test_home_and_away_are_shared() {
    let teams: Vec<Uuid> = (0..6).map(|_| Uuid::new_v4()).collect();
    let mut home_games: HashMap<Uuid, usize> = HashMap::new();
    for (home, _) in round_robin_rounds(&teams).into_iter().flatten() {
        *home_games.entry(home).or_default() += 1;
    }
    // five games each: nobody hosts all or none of them
    for team in &teams {
        let hosted = home_games.get(team).copied().unwrap_or(0);
        assert!((1..=4).contains(&hosted), "team hosted {} games", hosted);
    }
}

#[test]
fn test_two_groups_never_share_a_day() {
    let groups: Vec<(Uuid, Vec<Uuid>)> = (0..2)
        .map(|_| (Uuid::new_v4(), (0..4).map(|_| Uuid::new_v4()).collect()))
        .collect();
    let start = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
    let scheduled = assign_match_days(group_fixtures(&groups), start);

    assert_eq!(scheduled.len(), 12);
    let mut per_day: HashMap<NaiveDate, HashSet<Uuid>> = HashMap::new();
    for slot in &scheduled {
        let teams = per_day.entry(slot.date).or_default();
        assert!(teams.insert(slot.fixture.home));
        assert!(teams.insert(slot.fixture.away));
    }
    assert_eq!(per_day.len(), 12);
}

#[test]
fn test_bracket_progression_from_eight_qualifiers() {
    let seeds: Vec<Uuid> = (0..8).map(|_| Uuid::new_v4()).collect();
    let quarters = seed_bracket(&seeds).unwrap();
    assert_eq!(quarters.len(), 4);
    assert_eq!(knockout_match_count(8), 7);

    let quarter_results: Vec<Match> = quarters
        .iter()
        .enumerate()
        .map(|(i, &(home, away))| knockout_result(MatchStage::QuarterFinal, i as i32 + 1, home, away, 2, 1))
        .collect();
    let semis = next_round_pairings(&quarter_results).unwrap();
    assert_eq!(semis.len(), 2);
    assert_eq!(semis[0], (quarters[0].0, quarters[1].0));

    let semi_results: Vec<Match> = semis
        .iter()
        .enumerate()
        .map(|(i, &(home, away))| knockout_result(MatchStage::SemiFinal, i as i32 + 1, home, away, 0, 3))
        .collect();
    let final_pair = next_round_pairings(&semi_results).unwrap();
    assert_eq!(final_pair, vec![(semis[0].1, semis[1].1)]);
}

#[test]
fn test_next_round_needs_finished_matches() {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let mut pending = knockout_result(MatchStage::SemiFinal, 1, a, b, 0, 0);
    pending.status = MatchStatus::Scheduled;
    pending.home_score = None;
    pending.away_score = None;
    let done = knockout_result(MatchStage::SemiFinal, 2, Uuid::new_v4(), Uuid::new_v4(), 1, 0);
    assert!(next_round_pairings(&[pending, done]).is_err());
}
