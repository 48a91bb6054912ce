//! Schema for the interaction log. Uses IF NOT EXISTS for idempotent
//! execution on every open.

pub const INITIAL_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS search_log (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id   TEXT NOT NULL,
    query     TEXT NOT NULL,
    output    TEXT NOT NULL,
    timestamp TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_search_log_timestamp ON search_log(timestamp);
"#;
