pub mod edit_config;
pub mod play;
pub mod shuffle;
pub mod template;
