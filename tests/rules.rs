use farklebot::combination::{combination_for, is_bust, legal_combinations, remove, score};
use farklebot::{Board, CATALOG, Combination, DicePool, GameError, InvalidAction, RulesError};

fn pool(faces: &[u8]) -> DicePool {
    DicePool::new(faces).expect("valid faces")
}

#[test]
fn catalog_order_and_scores() {
    let scores: Vec<i64> = CATALOG.iter().map(|c| c.score).collect();
    assert_eq!(scores, vec![50, 100, 200, 300, 400, 500, 600, 1000]);
    assert_eq!(CATALOG[7].dice, pool(&[1, 2, 3, 4, 5, 6]));
    // There is no triple of ones.
    assert!(combination_for(&pool(&[1, 1, 1])).is_none());
}

#[test]
fn legal_combinations_follow_catalog_order() {
    let found = legal_combinations(&pool(&[5, 1, 6, 6, 6, 5]));
    assert_eq!(found, vec![CATALOG[0], CATALOG[1], CATALOG[6]]);

    let straight = legal_combinations(&pool(&[6, 5, 4, 3, 2, 1]));
    assert_eq!(straight, vec![CATALOG[0], CATALOG[1], CATALOG[7]]);
}

#[test]
fn bust_means_nothing_to_bank() {
    assert!(is_bust(&pool(&[2, 3, 4, 6, 6, 2])));
    assert!(is_bust(&pool(&[3, 3])));
    assert!(is_bust(&DicePool::EMPTY));
    assert!(!is_bust(&pool(&[4, 4, 4, 2])));
}

#[test]
fn removal_keeps_the_rest_of_the_multiset() -> Result<(), GameError> {
    let start = pool(&[1, 2, 3, 4, 5, 6]);
    assert_eq!(remove(&start, &CATALOG[1])?, pool(&[2, 3, 4, 5, 6]));
    assert_eq!(remove(&start, &CATALOG[7])?, DicePool::EMPTY);

    let err = remove(&pool(&[5, 5, 2]), &CATALOG[5]);
    assert_eq!(
        err,
        Err(RulesError::InvalidRemoval {
            pool: pool(&[5, 5, 2]),
            combination: CATALOG[5],
        })
    );
    Ok(())
}

#[test]
fn turn_score_is_the_sum_of_kept_combinations() {
    assert_eq!(score(&[]), 0);
    assert_eq!(score(&[CATALOG[0], CATALOG[1], CATALOG[3]]), 450);
}

#[test]
fn pools_reject_bad_faces_and_too_many_dice() {
    assert_eq!(DicePool::new(&[0]), Err(RulesError::InvalidFace(0)));
    assert_eq!(DicePool::new(&[7, 1]), Err(RulesError::InvalidFace(7)));
    assert_eq!(
        DicePool::new(&[1, 1, 1, 1, 1, 1, 1]),
        Err(RulesError::TooManyDice(7))
    );
}

#[test]
fn board_keep_banks_and_removes_dice() -> Result<(), GameError> {
    let mut board = Board::new(pool(&[1, 2, 3, 4, 5, 6]));
    assert_eq!(board.keep(&pool(&[1]))?, CATALOG[1]);
    assert_eq!(board.available(), pool(&[2, 3, 4, 5, 6]));
    assert_eq!(board.keep(&pool(&[5]))?, CATALOG[0]);
    assert_eq!(board.available(), pool(&[2, 3, 4, 6]));
    assert_eq!(board.kept(), &[CATALOG[1], CATALOG[0]]);
    assert_eq!(board.kept_score(), 150);
    Ok(())
}

#[test]
fn board_keep_rejects_illegal_dice() {
    let mut board = Board::new(pool(&[1, 5, 2, 2, 3, 4]));
    assert_eq!(
        board.keep(&pool(&[2, 3])),
        Err(InvalidAction::NotACombination(pool(&[2, 3])))
    );
    assert_eq!(
        board.keep(&pool(&[5, 5, 5])),
        Err(InvalidAction::DiceUnavailable(pool(&[5, 5, 5])))
    );
    assert_eq!(board.available(), pool(&[1, 5, 2, 2, 3, 4]));
    assert!(board.kept().is_empty());
}

#[test]
fn board_reroll_keeps_the_dice_count() {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    let mut rng = StdRng::seed_from_u64(7);
    let mut board = Board::roll(&mut rng);
    assert_eq!(board.available().len(), 6);
    let kept: Combination = CATALOG[1];
    if board.available().contains(&kept.dice) {
        board.keep(&kept.dice).expect("one is available");
    }
    let before = board.available().len();
    board.reroll(&mut rng);
    assert_eq!(board.available().len(), before);
}
