use farklebot::{
    Action, Bot, CATALOG, DicePool, ExpectimaxBot, Game, GameConfig, GameError, GameStatus,
    InvalidAction, RandomBot, TurnEnd, TurnRecord,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn pool(faces: &[u8]) -> DicePool {
    DicePool::new(faces).expect("valid faces")
}

fn scripted(num_players: usize, score_to_win: i64, rolls: &[&[u8]]) -> Result<Game, GameError> {
    Game::builder(num_players)?
        .with_score_to_win(score_to_win)?
        .with_rolls(rolls.iter().map(|faces| pool(faces)).collect())
        .build()
}

#[test]
fn opening_bust_is_settled_without_input() -> Result<(), GameError> {
    let game = scripted(1, 0, &[&[2, 2, 3, 3, 4, 6]])?;
    assert!(game.is_finished());
    assert_eq!(game.winner(), Some(0));
    assert_eq!(
        game.history(),
        &[TurnRecord {
            player: 0,
            score: 0,
            end: TurnEnd::Bust
        }]
    );
    assert!(game.legal_actions().is_empty());
    Ok(())
}

#[test]
fn opening_roll_must_bank_first() -> Result<(), GameError> {
    let mut game = scripted(1, 0, &[&[1, 5, 2, 2, 3, 4]])?;
    let turn = game.turn_snapshot();
    assert_eq!(turn.turn_score, 0);
    assert!(!turn.can_end_turn);
    assert_eq!(
        game.legal_actions(),
        vec![Action::Bank(CATALOG[0]), Action::Bank(CATALOG[1])]
    );
    assert!(matches!(
        game.apply_action(Action::EndTurn),
        Err(GameError::InvalidAction(InvalidAction::CannotEndTurn))
    ));
    assert!(matches!(
        game.apply_action(Action::Reroll),
        Err(GameError::InvalidAction(InvalidAction::CannotReroll))
    ));
    assert!(matches!(
        game.apply_action(Action::Bank(CATALOG[5])),
        Err(GameError::InvalidAction(InvalidAction::DiceUnavailable(_)))
    ));
    Ok(())
}

#[test]
fn forged_combination_is_rejected() -> Result<(), GameError> {
    let mut game = scripted(1, 0, &[&[1, 5, 2, 2, 3, 4]])?;
    let forged = farklebot::Combination {
        score: 9999,
        dice: pool(&[5]),
    };
    assert!(matches!(
        game.apply_action(Action::Bank(forged)),
        Err(GameError::InvalidAction(InvalidAction::NotACombination(_)))
    ));
    assert_eq!(game.turn_snapshot().available_dice, pool(&[1, 5, 2, 2, 3, 4]));
    Ok(())
}

#[test]
fn bank_then_end_adds_the_turn_score() -> Result<(), GameError> {
    let mut game = scripted(1, 0, &[&[1, 5, 2, 2, 3, 4]])?;
    game.apply_action(Action::Bank(CATALOG[1]))?;
    let turn = game.turn_snapshot();
    assert_eq!(turn.turn_score, 100);
    assert!(turn.can_end_turn);
    assert!(turn.can_reroll());
    assert_eq!(game.board().kept(), &[CATALOG[1]]);

    game.apply_action(Action::EndTurn)?;
    assert_eq!(game.scores(), &[100]);
    assert_eq!(game.status(), GameStatus::Finished { winner: 0 });
    assert!(matches!(
        game.apply_action(Action::EndTurn),
        Err(GameError::GameOver)
    ));
    Ok(())
}

#[test]
fn reroll_clears_end_turn_and_may_bust() -> Result<(), GameError> {
    let mut game = scripted(1, 0, &[&[1, 5, 2, 2, 3, 4], &[1, 2, 3, 3, 4], &[2, 3, 4, 6]])?;
    game.apply_action(Action::Bank(CATALOG[0]))?;
    game.apply_action(Action::Reroll)?;
    let turn = game.turn_snapshot();
    assert_eq!(turn.turn_score, 50);
    assert!(!turn.can_end_turn);
    assert_eq!(turn.available_dice, pool(&[1, 2, 3, 3, 4]));

    game.apply_action(Action::Bank(CATALOG[1]))?;
    game.apply_action(Action::Reroll)?;
    assert_eq!(
        game.history(),
        &[TurnRecord {
            player: 0,
            score: 0,
            end: TurnEnd::Bust
        }]
    );
    assert_eq!(game.scores(), &[0]);
    assert!(game.is_finished());
    Ok(())
}

#[test]
fn emptied_pool_goes_around_the_bend() -> Result<(), GameError> {
    let mut game = scripted(2, 5000, &[&[1, 2, 3, 4, 5, 6], &[5, 5, 5, 1, 2, 3]])?;
    game.apply_action(Action::Bank(CATALOG[7]))?;
    assert_eq!(game.scores(), &[1000, 0]);
    assert_eq!(game.history()[0].end, TurnEnd::AroundTheBend);
    // Same player again, with six fresh dice and the turn score reset.
    assert_eq!(game.current_player(), 0);
    let turn = game.turn_snapshot();
    assert_eq!(turn.turn_score, 0);
    assert!(!turn.can_end_turn);
    assert_eq!(turn.available_dice, pool(&[5, 5, 5, 1, 2, 3]));

    game.apply_action(Action::Bank(CATALOG[5]))?;
    game.apply_action(Action::EndTurn)?;
    assert_eq!(game.scores()[0], 1500);
    assert_eq!(
        game.history()[1],
        TurnRecord {
            player: 0,
            score: 500,
            end: TurnEnd::Ended
        }
    );
    Ok(())
}

#[test]
fn reaching_the_threshold_starts_the_last_round() -> Result<(), GameError> {
    let mut game = scripted(2, 200, &[&[5, 5, 5, 2, 3, 4], &[1, 2, 2, 3, 3, 4]])?;
    game.apply_action(Action::Bank(CATALOG[5]))?;
    game.apply_action(Action::EndTurn)?;
    assert!(game.win_threshold_reached());
    assert_eq!(game.current_player(), 1);

    let standing = game.match_snapshot(1)?;
    assert!(standing.win_threshold_reached);
    assert_eq!(standing.self_score, 0);
    assert_eq!(standing.opponent_scores, vec![500]);

    game.apply_action(Action::Bank(CATALOG[1]))?;
    game.apply_action(Action::EndTurn)?;
    assert_eq!(game.scores(), &[500, 100]);
    assert_eq!(game.winner(), Some(0));
    Ok(())
}

#[test]
fn players_rotate_until_someone_reaches_the_threshold() -> Result<(), GameError> {
    let mut game = scripted(
        2,
        300,
        &[
            &[1, 2, 2, 3, 3, 4],
            &[5, 2, 2, 3, 3, 4],
            &[6, 6, 6, 2, 3, 4],
            &[2, 2, 3, 3, 4, 6],
        ],
    )?;
    game.apply_action(Action::Bank(CATALOG[1]))?;
    game.apply_action(Action::EndTurn)?;
    game.apply_action(Action::Bank(CATALOG[0]))?;
    game.apply_action(Action::EndTurn)?;
    assert_eq!(game.current_player(), 0);
    game.apply_action(Action::Bank(CATALOG[6]))?;
    game.apply_action(Action::EndTurn)?;

    // Player 1 gets the last turn and busts on the opening roll.
    assert!(game.is_finished());
    assert_eq!(game.scores(), &[700, 50]);
    assert_eq!(game.winner(), Some(0));
    let ends: Vec<TurnEnd> = game.history().iter().map(|r| r.end).collect();
    assert_eq!(
        ends,
        vec![TurnEnd::Ended, TurnEnd::Ended, TurnEnd::Ended, TurnEnd::Bust]
    );
    Ok(())
}

#[test]
fn ties_go_to_the_first_seat() -> Result<(), GameError> {
    let mut game = scripted(2, 0, &[&[1, 2, 2, 3, 3, 4], &[1, 2, 2, 3, 3, 4]])?;
    game.apply_action(Action::Bank(CATALOG[1]))?;
    game.apply_action(Action::EndTurn)?;
    game.apply_action(Action::Bank(CATALOG[1]))?;
    game.apply_action(Action::EndTurn)?;
    assert_eq!(game.scores(), &[100, 100]);
    assert_eq!(game.winner(), Some(0));
    Ok(())
}

#[test]
fn scripted_roll_of_wrong_size_is_rejected() -> Result<(), GameError> {
    let mut game = scripted(1, 0, &[&[1, 5, 2, 2, 3, 4], &[2, 2]])?;
    game.apply_action(Action::Bank(CATALOG[1]))?;
    assert!(matches!(
        game.apply_action(Action::Reroll),
        Err(GameError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        scripted(1, 0, &[&[1, 5]]),
        Err(GameError::InvalidConfiguration(_))
    ));
    Ok(())
}

#[test]
fn configuration_bounds() {
    assert!(matches!(
        GameConfig::new(0, 5000, 1),
        Err(GameError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        GameConfig::new(7, 5000, 1),
        Err(GameError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        GameConfig::new(2, -1, 1),
        Err(GameError::InvalidConfiguration(_))
    ));
    assert!(GameConfig::new(6, 0, 1).is_ok());
}

#[test]
fn match_snapshot_rejects_unknown_players() -> Result<(), GameError> {
    let game = scripted(2, 5000, &[&[1, 5, 2, 2, 3, 4]])?;
    assert!(matches!(
        game.match_snapshot(2),
        Err(GameError::InvalidPlayer(2))
    ));
    Ok(())
}

#[test]
fn seeded_games_replay_identically() -> Result<(), GameError> {
    let play = |seed: u64| -> Result<Vec<i64>, GameError> {
        let mut game = Game::builder(2)?
            .with_seed(seed)
            .with_score_to_win(1500)?
            .build()?;
        let mut bots: Vec<Box<dyn Bot>> = vec![
            Box::new(ExpectimaxBot::new()),
            Box::new(RandomBot::new(StdRng::seed_from_u64(seed))),
        ];
        let status = game.play(&mut bots)?;
        assert!(matches!(status, GameStatus::Finished { .. }));
        Ok(game.scores().to_vec())
    };
    assert_eq!(play(11)?, play(11)?);
    Ok(())
}

#[test]
fn expectimax_finishes_a_solo_game() -> Result<(), GameError> {
    let mut game = Game::builder(1)?.with_seed(3).build()?;
    let mut bots: Vec<Box<dyn Bot>> = vec![Box::new(ExpectimaxBot::new())];
    game.play(&mut bots)?;
    assert_eq!(game.winner(), Some(0));
    assert!(game.scores()[0] >= 5000);
    for record in game.history() {
        match record.end {
            TurnEnd::Bust => assert_eq!(record.score, 0),
            TurnEnd::Ended | TurnEnd::AroundTheBend => assert!(record.score > 0),
        }
    }
    Ok(())
}

#[test]
fn play_needs_one_bot_per_seat() -> Result<(), GameError> {
    let mut game = Game::builder(2)?.build()?;
    let mut bots: Vec<Box<dyn Bot>> = vec![Box::new(ExpectimaxBot::new())];
    assert!(matches!(
        game.play(&mut bots),
        Err(GameError::InvalidConfiguration(_))
    ));
    Ok(())
}
