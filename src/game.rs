use std::collections::VecDeque;

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::action::{Action, PlayerId};
use crate::bot::Bot;
use crate::combination::{Combination, combination_for, is_bust, score};
use crate::dice::{DicePool, FACE_COUNT, MAX_DICE, MAX_FACE, MIN_FACE, Points};
use crate::error::{GameError, InvalidAction};
use crate::state::{GameStatus, MatchSnapshot, TurnEnd, TurnRecord, TurnSnapshot};

const DEFAULT_SEED: u64 = 0x5EED_5EED_5EED_5EED;
pub const DEFAULT_SCORE_TO_WIN: Points = 5000;
pub const MAX_PLAYERS: usize = 6;

/// Configuration required to bootstrap a game instance.
#[derive(Clone, Copy, Debug)]
pub struct GameConfig {
    pub num_players: usize,
    pub score_to_win: Points,
    pub seed: u64,
}

impl GameConfig {
    pub fn new(num_players: usize, score_to_win: Points, seed: u64) -> Result<Self, GameError> {
        if !(1..=MAX_PLAYERS).contains(&num_players) {
            return Err(GameError::InvalidConfiguration(
                "players must be between 1 and 6",
            ));
        }
        if score_to_win < 0 {
            return Err(GameError::InvalidConfiguration(
                "score to win must not be negative",
            ));
        }
        Ok(Self {
            num_players,
            score_to_win,
            seed,
        })
    }
}

/// Builder that enables scripted dice for testing.
pub struct GameBuilder {
    config: GameConfig,
    rolls: VecDeque<DicePool>,
}

impl GameBuilder {
    pub fn new(num_players: usize) -> Result<Self, GameError> {
        Ok(Self {
            config: GameConfig::new(num_players, DEFAULT_SCORE_TO_WIN, DEFAULT_SEED)?,
            rolls: VecDeque::new(),
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn with_score_to_win(mut self, score_to_win: Points) -> Result<Self, GameError> {
        self.config = GameConfig::new(self.config.num_players, score_to_win, self.config.seed)?;
        Ok(self)
    }

    /// Dice results consumed, in order, by the opening roll of each turn and by
    /// every reroll. Once exhausted, dice come from the seeded RNG.
    pub fn with_rolls(mut self, rolls: Vec<DicePool>) -> Self {
        self.rolls = rolls.into();
        self
    }

    pub fn build(self) -> Result<Game, GameError> {
        Game::from_builder(self)
    }
}

/// Dice on the table during a turn: the pool still in play and what was banked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    available: DicePool,
    kept: Vec<Combination>,
}

impl Board {
    pub fn new(available: DicePool) -> Self {
        Self {
            available,
            kept: Vec::new(),
        }
    }

    /// Fresh board with six rolled dice.
    pub fn roll<R: Rng>(rng: &mut R) -> Self {
        Self::new(roll_dice(MAX_DICE, rng))
    }

    pub fn available(&self) -> DicePool {
        self.available
    }

    pub fn kept(&self) -> &[Combination] {
        &self.kept
    }

    pub fn kept_score(&self) -> Points {
        score(&self.kept)
    }

    /// Banks `dice`, which must be exactly one catalog combination and available.
    pub fn keep(&mut self, dice: &DicePool) -> Result<Combination, InvalidAction> {
        let combination = combination_for(dice).ok_or(InvalidAction::NotACombination(*dice))?;
        let remaining = self
            .available
            .checked_sub(dice)
            .ok_or(InvalidAction::DiceUnavailable(*dice))?;
        self.available = remaining;
        self.kept.push(combination);
        Ok(combination)
    }

    pub fn reroll<R: Rng>(&mut self, rng: &mut R) {
        self.available = roll_dice(self.available.len(), rng);
    }

    fn replace_available(&mut self, dice: DicePool) {
        self.available = dice;
    }
}

fn roll_dice<R: Rng>(count: usize, rng: &mut R) -> DicePool {
    let mut counts = [0u8; FACE_COUNT];
    for _ in 0..count {
        let face = rng.gen_range(MIN_FACE..=MAX_FACE);
        counts[(face - 1) as usize] += 1;
    }
    DicePool::from_counts(counts)
}

/// Turn loop for one game: dice, turn order, scores and win detection.
pub struct Game {
    config: GameConfig,
    status: GameStatus,
    current_player: PlayerId,
    scores: Vec<Points>,
    queue: VecDeque<PlayerId>,
    board: Board,
    can_end_turn: bool,
    history: Vec<TurnRecord>,
    rolls: VecDeque<DicePool>,
    rng: StdRng,
}

impl Game {
    pub fn builder(num_players: usize) -> Result<GameBuilder, GameError> {
        GameBuilder::new(num_players)
    }

    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        GameBuilder {
            config,
            rolls: VecDeque::new(),
        }
        .build()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    pub fn scores(&self) -> &[Points] {
        &self.scores
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Completed turns, oldest first.
    pub fn history(&self) -> &[TurnRecord] {
        &self.history
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.status, GameStatus::Finished { .. })
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self.status {
            GameStatus::Finished { winner } => Some(winner),
            GameStatus::Ongoing => None,
        }
    }

    /// True once any player's total reaches the score to win.
    pub fn win_threshold_reached(&self) -> bool {
        self.scores.iter().any(|&s| s >= self.config.score_to_win)
    }

    pub fn turn_snapshot(&self) -> TurnSnapshot {
        TurnSnapshot {
            turn_score: self.board.kept_score(),
            can_end_turn: self.can_end_turn,
            available_dice: self.board.available(),
        }
    }

    pub fn match_snapshot(&self, perspective: PlayerId) -> Result<MatchSnapshot, GameError> {
        let self_score = *self
            .scores
            .get(perspective)
            .ok_or(GameError::InvalidPlayer(perspective))?;
        let opponent_scores = self
            .scores
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != perspective)
            .map(|(_, &s)| s)
            .collect();
        Ok(MatchSnapshot {
            win_threshold_reached: self.win_threshold_reached(),
            self_score,
            opponent_scores,
        })
    }

    pub fn legal_actions(&self) -> Vec<Action> {
        if self.is_finished() {
            return Vec::new();
        }
        self.turn_snapshot().legal_actions()
    }

    pub fn apply_action(&mut self, action: Action) -> Result<(), GameError> {
        if self.is_finished() {
            return Err(GameError::GameOver);
        }
        match action {
            Action::EndTurn => {
                if !self.can_end_turn {
                    return Err(InvalidAction::CannotEndTurn.into());
                }
                self.close_turn(TurnEnd::Ended);
                self.begin_turn()?;
            }
            Action::Reroll => {
                if !self.turn_snapshot().can_reroll() {
                    return Err(InvalidAction::CannotReroll.into());
                }
                let dice = self.roll(self.board.available().len())?;
                self.board.replace_available(dice);
                self.can_end_turn = false;
                if is_bust(&dice) {
                    self.close_turn(TurnEnd::Bust);
                    self.begin_turn()?;
                }
            }
            Action::Bank(combination) => {
                if combination_for(&combination.dice) != Some(combination) {
                    return Err(InvalidAction::NotACombination(combination.dice).into());
                }
                self.board.keep(&combination.dice)?;
                self.can_end_turn = true;
                if self.board.available().is_empty() {
                    self.close_turn(TurnEnd::AroundTheBend);
                    self.begin_turn()?;
                }
            }
        }
        Ok(())
    }

    /// Drives the game to completion, seat `i` played by `bots[i]`.
    pub fn play(&mut self, bots: &mut [Box<dyn Bot>]) -> Result<GameStatus, GameError> {
        if bots.len() != self.scores.len() {
            return Err(GameError::InvalidConfiguration(
                "need exactly one bot per player",
            ));
        }
        while !self.is_finished() {
            let current = self.current_player;
            let turn = self.turn_snapshot();
            let game = self.match_snapshot(current)?;
            let action = bots[current].select_action(&turn, &game)?;
            self.apply_action(action)?;
        }
        Ok(self.status)
    }

    fn from_builder(builder: GameBuilder) -> Result<Self, GameError> {
        let GameBuilder { config, rolls } = builder;
        let mut game = Game {
            config,
            status: GameStatus::Ongoing,
            current_player: 0,
            scores: vec![0; config.num_players],
            queue: (0..config.num_players).collect(),
            board: Board::new(DicePool::EMPTY),
            can_end_turn: false,
            history: Vec::new(),
            rolls,
            rng: StdRng::seed_from_u64(config.seed),
        };
        game.begin_turn()?;
        Ok(game)
    }

    // Turns that bust on their opening roll are settled here without input.
    fn begin_turn(&mut self) -> Result<(), GameError> {
        loop {
            let Some(next) = self.queue.pop_front() else {
                self.finish();
                return Ok(());
            };
            self.current_player = next;
            let dice = self.roll(MAX_DICE)?;
            self.board = Board::new(dice);
            self.can_end_turn = false;
            if !is_bust(&dice) {
                return Ok(());
            }
            self.close_turn(TurnEnd::Bust);
        }
    }

    fn close_turn(&mut self, end: TurnEnd) {
        let player = self.current_player;
        let score = match end {
            TurnEnd::Bust => 0,
            TurnEnd::Ended | TurnEnd::AroundTheBend => self.board.kept_score(),
        };
        self.scores[player] += score;
        self.history.push(TurnRecord { player, score, end });
        info!(
            "player {player} {:?} with {score} (total {})",
            end, self.scores[player]
        );
        match end {
            TurnEnd::AroundTheBend => self.queue.push_front(player),
            _ if !self.win_threshold_reached() => self.queue.push_back(player),
            _ => {}
        }
    }

    fn finish(&mut self) {
        let mut winner = 0;
        for (idx, &s) in self.scores.iter().enumerate() {
            if s > self.scores[winner] {
                winner = idx;
            }
        }
        info!("game finished, winner player {winner} with {}", self.scores[winner]);
        self.status = GameStatus::Finished { winner };
    }

    fn roll(&mut self, count: usize) -> Result<DicePool, GameError> {
        match self.rolls.pop_front() {
            Some(dice) if dice.len() == count => Ok(dice),
            Some(_) => Err(GameError::InvalidConfiguration(
                "scripted roll has the wrong number of dice",
            )),
            None => Ok(roll_dice(count, &mut self.rng)),
        }
    }
}
