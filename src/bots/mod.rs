pub mod expectimax;
pub mod human;
pub mod random;
pub mod registry;

pub use expectimax::{ActionEval, ExpectimaxBot, HeuristicConfig};
pub use human::HumanBot;
pub use random::RandomBot;
