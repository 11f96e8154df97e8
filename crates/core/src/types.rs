/// Template identifiers are PostgreSQL BIGSERIAL keys.
pub type DbId = i64;
