//! Database access layer (PostgreSQL)

pub mod news;
pub mod orders;
pub mod products;
pub mod sales;
pub mod users;

pub use orders::PgOrderRepository;
pub use products::PgProductCatalog;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// `true` for a unique-constraint violation (SQLSTATE 23505)
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// `%word%` for ILIKE, with the pattern metacharacters escaped
pub fn like_pattern(word: &str) -> String {
    let mut escaped = String::with_capacity(word.len() + 2);
    escaped.push('%');
    for c in word.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}
