//! Plays whole games with seeded dice and checks the engine's guarantees
//! after every command.

use strictly_ladders::{
    DiceSource, Die, GameConfig, GameEvent, GameRules, InvariantSet, LadderInvariants,
    MoveRequest, Mover, Phase, Player, TurnScheduler, TurnStep,
};

#[derive(Debug, Default)]
struct Silent;

impl DiceSource for Silent {
    fn request_roll(&mut self, _player: &Player) {}
}

impl Mover for Silent {
    fn move_to(&mut self, _request: MoveRequest) {}
}

type Game = TurnScheduler<Silent, Silent>;

/// Runs a game to completion, returning all events and the number of rolls.
fn play_out(config: &GameConfig, seed: u64) -> (Game, Vec<GameEvent>, usize) {
    let (game, rejected) = TurnScheduler::from_config(config, Silent, Silent).expect("valid config");
    assert!(rejected.is_empty());
    run(game, seed)
}

fn run(mut game: Game, seed: u64) -> (Game, Vec<GameEvent>, usize) {
    game.start_game().expect("game starts");

    let mut die = Die::seeded(seed);
    let mut events = game.drain_events();
    let mut rolls = 0;

    while game.phase() != Phase::GameOver {
        assert!(rolls < 100_000, "game did not finish");
        game.request_roll().expect("roll requested");
        let step = game.submit_roll(die.roll()).expect("roll accepted");
        if let TurnStep::Moving { epoch, .. } = step {
            game.on_arrived(epoch).expect("arrival accepted");
        }
        rolls += 1;

        assert!(LadderInvariants::check_all(game.state()).is_ok());
        let winning_square = game.rules().winning_square;
        assert!(game
            .players()
            .iter()
            .all(|p| p.current_square() <= winning_square));
        events.extend(game.drain_events());
    }

    (game, events, rolls)
}

#[test]
fn test_traditional_games_finish_with_one_winner() {
    let config = GameConfig::new(4, 2);
    for seed in 0..25 {
        let (game, events, rolls) = play_out(&config, seed);
        let winners: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                GameEvent::PlayerWon(id) => Some(*id),
                _ => None,
            })
            .collect();
        assert_eq!(winners.len(), 1, "seed {}", seed);
        assert_eq!(game.winner(), winners.first().copied());
        assert!(rolls > 0);

        let winner = winners[0];
        let on_final = game
            .players()
            .iter()
            .filter(|p| p.current_square() == 100)
            .map(Player::id)
            .collect::<Vec<_>>();
        assert_eq!(on_final, vec![winner]);
    }
}

#[test]
fn test_short_games_on_the_classic_layout_stay_in_bounds() {
    let rules = GameRules {
        winning_square: 50,
        ..GameRules::default()
    };
    let config = GameConfig::new(3, 0).with_rules(rules);
    for seed in 0..25 {
        let (game, rejected) =
            TurnScheduler::from_config(&config, Silent, Silent).expect("valid config");
        assert!(!rejected.is_empty());
        assert!(game.shortcuts().entries().iter().all(|e| e.end() <= 50));

        let (game, events, _) = run(game, seed);
        let winners = events
            .iter()
            .filter(|e| matches!(e, GameEvent::PlayerWon(_)))
            .count();
        assert_eq!(winners, 1, "seed {}", seed);
        assert!(game.players().iter().all(|p| p.current_square() <= 50));
    }
}

#[test]
fn test_seeded_games_are_reproducible() {
    let config = GameConfig::new(3, 0);
    let (_, first, first_rolls) = play_out(&config, 99);
    let (_, second, second_rolls) = play_out(&config, 99);
    assert_eq!(first_rolls, second_rolls);
    assert_eq!(first, second);
}

#[test]
fn test_event_stream_brackets_the_game() {
    let config = GameConfig::new(2, 0).with_traditional_shortcuts(false);
    let (_, events, rolls) = play_out(&config, 5);
    let dice = events
        .iter()
        .filter(|e| matches!(e, GameEvent::DiceRolled(_)))
        .count();
    let requests = events
        .iter()
        .filter(|e| matches!(e, GameEvent::RollRequested(_)))
        .count();
    assert_eq!(dice, rolls);
    assert_eq!(requests, rolls);
    assert!(matches!(events.first(), Some(GameEvent::TurnStarted(_))));
    assert!(matches!(events.last(), Some(GameEvent::PlayerWon(_))));
}
