//! CLI subcommand implementations.

pub mod migrate;
pub mod seed;

use secrecy::SecretString;

/// Resolve the database URL the same way the server does: explicit variable
/// first, generic `DATABASE_URL` next, local file last.
pub(crate) fn database_url() -> SecretString {
    dotenvy::dotenv().ok();

    std::env::var("PALENGKE_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_or_else(
            |_| SecretString::from("sqlite:palengke.db"),
            SecretString::from,
        )
}
