//! SQL text builders
//!
//! psql has no bind parameters for `-c`, so every identifier and literal is
//! quoted here before it is spliced into a statement.

/// Quote an identifier (role, database, schema name).
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Quote a string literal, using an `E''` string when backslashes are present.
pub fn quote_literal(value: &str) -> String {
    let escaped = value.replace('\'', "''");
    if escaped.contains('\\') {
        format!("E'{}'", escaped.replace('\\', "\\\\"))
    } else {
        format!("'{}'", escaped)
    }
}

pub fn role_exists(user: &str) -> String {
    format!("SELECT 1 FROM pg_roles WHERE rolname = {}", quote_literal(user))
}

pub fn database_exists(database: &str) -> String {
    format!(
        "SELECT 1 FROM pg_database WHERE datname = {}",
        quote_literal(database)
    )
}

pub fn schema_exists(schema: &str) -> String {
    format!(
        "SELECT 1 FROM information_schema.schemata WHERE schema_name = {}",
        quote_literal(schema)
    )
}

pub fn create_user(user: &str, password: &str) -> String {
    format!(
        "CREATE USER {} WITH PASSWORD {}",
        quote_ident(user),
        quote_literal(password)
    )
}

pub fn alter_user_password(user: &str, password: &str) -> String {
    format!(
        "ALTER USER {} WITH PASSWORD {}",
        quote_ident(user),
        quote_literal(password)
    )
}

pub fn create_database(database: &str, owner: &str) -> String {
    format!(
        "CREATE DATABASE {} OWNER {}",
        quote_ident(database),
        quote_ident(owner)
    )
}

pub fn create_schema(schema: &str, owner: &str) -> String {
    format!(
        "CREATE SCHEMA {} AUTHORIZATION {}",
        quote_ident(schema),
        quote_ident(owner)
    )
}

pub fn set_search_path(user: &str, database: &str, schema: &str) -> String {
    format!(
        "ALTER USER {} IN DATABASE {} SET search_path TO {}",
        quote_ident(user),
        quote_ident(database),
        quote_ident(schema)
    )
}

/// Grants applied once a schema has been created for the user.
pub fn grant_all(user: &str, database: &str, schema: &str) -> Vec<String> {
    let user = quote_ident(user);
    let database = quote_ident(database);
    let schema = quote_ident(schema);
    vec![
        format!("GRANT ALL PRIVILEGES ON DATABASE {database} TO {user}"),
        format!("GRANT ALL PRIVILEGES ON SCHEMA {schema} TO {user}"),
        format!("GRANT ALL PRIVILEGES ON ALL TABLES IN SCHEMA {schema} TO {user}"),
        format!("GRANT ALL PRIVILEGES ON ALL SEQUENCES IN SCHEMA {schema} TO {user}"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_ident() {
        assert_eq!(quote_ident("app"), "\"app\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn test_quote_literal() {
        assert_eq!(quote_literal("plain"), "'plain'");
        assert_eq!(quote_literal("it's"), "'it''s'");
        assert_eq!(quote_literal(r"back\slash"), r"E'back\\slash'");
        assert_eq!(quote_literal(r"o'\"), r"E'o''\\'");
    }

    #[test]
    fn test_create_user_quotes_both_parts() {
        assert_eq!(
            create_user("app", "pa'ss"),
            "CREATE USER \"app\" WITH PASSWORD 'pa''ss'"
        );
    }

    #[test]
    fn test_grants_cover_database_schema_tables_sequences() {
        let grants = grant_all("app", "appdb", "core");
        assert_eq!(grants.len(), 4);
        assert_eq!(grants[0], "GRANT ALL PRIVILEGES ON DATABASE \"appdb\" TO \"app\"");
        assert!(grants[3].contains("ALL SEQUENCES IN SCHEMA \"core\""));
    }
}
