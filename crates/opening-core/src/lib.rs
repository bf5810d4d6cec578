pub mod game_data;
pub mod matcher;
pub mod pgn;
pub mod position_key;
pub mod san;
