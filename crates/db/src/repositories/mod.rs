//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod account_repo;
pub mod favorite_repo;
pub mod order_repo;
pub mod preference_repo;
pub mod timesheet_repo;

pub use account_repo::AccountRepo;
pub use favorite_repo::FavoriteRepo;
pub use order_repo::OrderRepo;
pub use preference_repo::PreferenceRepo;
pub use timesheet_repo::TimesheetRepo;

/// `%needle%` for `ILIKE`, with the pattern characters of `needle` escaped so
/// it matches literally.
pub(crate) fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("acme"), "%acme%");
        assert_eq!(contains_pattern("50%_off"), r"%50\%\_off%");
        assert_eq!(contains_pattern(r"a\b"), r"%a\\b%");
    }
}
