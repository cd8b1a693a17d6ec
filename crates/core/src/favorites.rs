//! Filter favorites: named, user-owned filter snapshots.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Maximum length for a favorite name.
pub const MAX_FAVORITE_NAME_LEN: usize = 255;

/// The operations a list page can run against its favorites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteAction {
    Create,
    Delete,
    Select,
    Rename,
    Update,
}

impl std::str::FromStr for FavoriteAction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(Self::Create),
            "delete" => Ok(Self::Delete),
            "select" => Ok(Self::Select),
            "rename" => Ok(Self::Rename),
            "update" => Ok(Self::Update),
            other => Err(CoreError::Validation(format!(
                "Unknown favorite action '{other}'. Must be one of: create, delete, select, rename, update"
            ))),
        }
    }
}

/// One entry of the `filterFavorites` list shown in the favorites menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteSummary {
    pub id: DbId,
    pub name: String,
}

/// Validate and normalize a favorite name: trimmed, non-empty, bounded.
pub fn validate_favorite_name(name: &str) -> Result<String, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Favorite name must not be empty".to_string(),
        ));
    }
    if trimmed.chars().count() > MAX_FAVORITE_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Favorite name too long: {} chars (max {MAX_FAVORITE_NAME_LEN})",
            trimmed.chars().count()
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn names_are_trimmed() {
        assert_eq!(validate_favorite_name("  Q1 ").unwrap(), "Q1");
    }

    #[test]
    fn blank_names_are_rejected() {
        assert_matches!(validate_favorite_name("   "), Err(CoreError::Validation(_)));
    }

    #[test]
    fn long_names_are_rejected() {
        let name = "x".repeat(MAX_FAVORITE_NAME_LEN + 1);
        assert_matches!(validate_favorite_name(&name), Err(CoreError::Validation(_)));
        let name = "x".repeat(MAX_FAVORITE_NAME_LEN);
        assert!(validate_favorite_name(&name).is_ok());
    }

    #[test]
    fn actions_parse_from_path_segments() {
        assert_eq!("rename".parse::<FavoriteAction>().unwrap(), FavoriteAction::Rename);
        assert!("archive".parse::<FavoriteAction>().is_err());
    }
}
