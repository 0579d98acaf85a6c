mod button;
mod turn;

pub use button::Button;
pub use turn::{new_turn_id, ChatTurn, Extras, Role};
