//! N-Player capability verification tests.
//!
//! These tests verify that rosters, rotation and automated seats work the
//! same for every supported player count.

use snake_ladder::board::{Square, Topology};
use snake_ladder::core::{
    Controller, MatchConfig, PlayerId, PlayerOverrides, Roster, MAX_PLAYERS, MIN_PLAYERS,
};
use snake_ladder::engine::{
    autoplay, play_automated_turn, play_turn, Match, MatchEvent, NoPacer, RollTrigger,
};

/// Requested counts clamp into the supported range.
#[test]
fn test_roster_sizes() {
    for (requested, expected) in [(0, 2), (1, 2), (2, 2), (3, 3), (4, 4), (5, 4), (8, 4)] {
        let roster = Roster::for_player_count(requested);
        assert_eq!(roster.len(), expected, "requested {requested}");
        assert!((MIN_PLAYERS..=MAX_PLAYERS).contains(&roster.len()));

        let ids: Vec<PlayerId> = roster.players().iter().map(|p| p.id).collect();
        assert_eq!(ids, PlayerId::all(expected).collect::<Vec<_>>());
    }
}

/// Only a request for exactly one player adds a bot.
#[test]
fn test_solo_roster_has_bot() {
    let solo = Roster::for_player_count(1);
    assert_eq!(solo.players()[0].controller, Controller::Human);
    assert_eq!(solo.players()[1].controller, Controller::Automated);
    assert_eq!(solo.players()[1].name, "Bot 2");

    for count in [0, 2, 3, 4, 9] {
        let roster = Roster::for_player_count(count);
        assert!(roster.players().iter().all(|p| !p.is_automated()));
    }
}

/// Request strings parse, and garbage falls back to two humans.
#[test]
fn test_roster_from_request() {
    assert_eq!(Roster::from_request("3").len(), 3);
    assert_eq!(Roster::from_request(" 4 ").len(), 4);
    assert_eq!(Roster::from_request("1"), Roster::for_player_count(1));
    assert_eq!(Roster::from_request("lots"), Roster::for_player_count(2));
    assert_eq!(Roster::from_request(""), Roster::for_player_count(2));
    assert_eq!(Roster::from_request("-3"), Roster::for_player_count(2));
}

/// Default names and markers per seat.
#[test]
fn test_default_markers() {
    let roster = Roster::for_player_count(4);
    let icons: Vec<&str> = roster.players().iter().map(|p| p.marker.icon.as_str()).collect();
    let colors: Vec<&str> = roster.players().iter().map(|p| p.marker.color.as_str()).collect();

    assert_eq!(icons, vec!["🔥", "🤖", "👾", "🏴‍☠️"]);
    assert_eq!(colors, vec!["#00a3c4", "#f56565", "#805ad5", "#1a202c"]);
    assert_eq!(roster.players()[2].name, "Player 3");
}

/// Overrides change one seat and leave the rest alone.
#[test]
fn test_roster_overrides() {
    let roster = Roster::with_overrides(
        3,
        &[
            PlayerOverrides::new().with_name("Ada"),
            PlayerOverrides::new().with_icon("🐍").automated(true),
        ],
    );

    assert_eq!(roster.players()[0].name, "Ada");
    assert_eq!(roster.players()[1].marker.icon, "🐍");
    assert_eq!(roster.players()[1].controller, Controller::Automated);
    assert_eq!(roster.players()[1].name, "Bot 2");
    assert_eq!(roster.players()[2].name, "Player 3");
}

/// Every player count plays to a single winner.
#[test]
fn test_autoplay_every_player_count() {
    for count in MIN_PLAYERS..=MAX_PLAYERS {
        for seed in 0..5 {
            let config = MatchConfig::instant().with_seed(seed);
            let mut game = Match::new(Roster::for_player_count(count), config);

            let winner = autoplay(&mut game, &mut NoPacer, 100_000, |_| {});

            let winner =
                winner.unwrap_or_else(|| panic!("{count} players, seed {seed}: no winner"));
            let state = game.state();
            let position = state.player(winner).map(|p| p.position);
            assert_eq!(position, Some(Square::FINISH));
            assert_eq!(state.current_player().id, winner);
            let finished = state.positions().filter(|&(_, s)| s == Square::FINISH);
            assert_eq!(finished.count(), 1);
            assert!(state.positions().all(|(_, s)| s.value() <= Square::MAX));
        }
    }
}

/// Turns follow seat order for every player count.
#[test]
fn test_rotation_every_player_count() {
    for count in MIN_PLAYERS..=MAX_PLAYERS {
        let config = MatchConfig::instant().with_seed(1);
        let mut game = Match::new(Roster::for_player_count(count), config)
            .with_topology(Topology::empty());
        let mut movers = Vec::new();

        for _ in 0..count * 2 {
            let record = play_turn(&mut game, RollTrigger::Human, &mut NoPacer, |_| {});
            let record = record.unwrap();
            movers.push(record.player.seat());
        }

        let expected: Vec<usize> = (0..count).chain(0..count).collect();
        assert_eq!(movers, expected, "{count} players");
    }
}

/// Solo play: the bot answers each human turn exactly once.
#[test]
fn test_solo_match_alternates_with_bot() {
    let config = MatchConfig::instant().with_seed(21);
    let mut game = Match::new(Roster::for_player_count(1), config);

    for _ in 0..5 {
        if game.state().is_over() {
            break;
        }
        assert!(game.pending_automated_trigger().is_none());
        let human = play_turn(&mut game, RollTrigger::Human, &mut NoPacer, |_| {});
        assert!(human.is_some());
        if game.state().is_over() {
            break;
        }

        let mut rolled = Vec::new();
        let record = play_automated_turn(&mut game, &mut NoPacer, |e| {
            if let MatchEvent::Rolled { player, .. } = e {
                rolled.push(*player);
            }
        });
        assert_eq!(record.map(|r| r.player), Some(PlayerId::new(2)));
        assert_eq!(rolled, vec![PlayerId::new(2)]);
        let again = play_automated_turn(&mut game, &mut NoPacer, |_| {});
        assert!(again.is_none());
    }
}

/// A fully automated table plays itself out.
#[test]
fn test_all_bots_match() {
    let bot = PlayerOverrides::new().automated(true);
    let roster = Roster::with_overrides(4, &[bot.clone(), bot.clone(), bot.clone(), bot]);
    let mut game = Match::new(roster, MatchConfig::instant().with_seed(4));

    let mut turns = 0;
    while let Some(record) = play_automated_turn(&mut game, &mut NoPacer, |_| {}) {
        turns += 1;
        assert_eq!(record.turn, turns);
    }

    assert!(game.state().is_over());
    assert_eq!(game.state().history().len(), turns as usize);
}

/// A roster loaded from JSON obeys the same seat rules and can start a match.
#[test]
fn test_loaded_roster_starts_a_match() {
    let empty = serde_json::json!({ "players": [] });
    let finished_stranger = serde_json::json!({
        "players": [{
            "id": 7,
            "name": "Solo",
            "marker": { "color": "#ffffff", "icon": "x" },
            "position": 100,
            "controller": "Human"
        }]
    });

    for json in [empty, finished_stranger] {
        let roster: Roster = serde_json::from_value(json).unwrap();
        assert_eq!(roster.len(), MIN_PLAYERS);

        let mut game = Match::new(roster, MatchConfig::instant().with_seed(2));
        assert_eq!(game.state().current_player().id, PlayerId::new(1));
        assert!(game.state().positions().all(|(_, s)| s == Square::START));
        assert!(!game.state().is_over());

        let winner = autoplay(&mut game, &mut NoPacer, 100_000, |_| {});
        assert!(winner.is_some());
    }
}
