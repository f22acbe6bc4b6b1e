pub(super) fn default_name() -> String {
    "fruitbot".to_string()
}
pub(super) fn default_data_dir() -> String {
    "~/.fruitbot".to_string()
}
pub(super) fn default_log_level() -> String {
    "info".to_string()
}
pub(super) fn default_db_path() -> String {
    "~/.fruitbot/fruitbot.db".to_string()
}
pub(super) fn default_max_connections() -> u32 {
    4
}
pub(super) fn default_locale() -> String {
    "en".to_string()
}
pub(super) fn default_cache_capacity() -> usize {
    1000
}
pub(super) fn default_poll_timeout() -> u64 {
    30
}
