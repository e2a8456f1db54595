pub mod player_id;
pub mod profile;
pub mod username_seed;
