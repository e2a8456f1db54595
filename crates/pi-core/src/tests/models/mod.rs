mod player_id;
mod profile;
mod username_seed;
