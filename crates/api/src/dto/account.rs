use pforge_core::mapping::{DtoBase, HistorizableDto};
use pforge_db::models::account::AccountEntity;
use pforge_db::models::status::AccountStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    #[serde(flatten)]
    pub base: DtoBase,
    pub number: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<AccountStatus>,
    /// `"<number> <name>"`, as shown in selection lists.
    pub display_name: Option<String>,
}
pforge_core::impl_record!(
    AccountDto,
    dto "Account",
    [number, name, description, status, display_name]
);

impl HistorizableDto for AccountDto {
    type Entity = AccountEntity;

    fn enrich_from(&mut self, src: &AccountEntity) {
        let parts: Vec<&str> = [src.number.as_deref(), src.name.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        self.display_name = (!parts.is_empty()).then(|| parts.join(" "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_joins_number_and_name() {
        let entity = AccountEntity {
            number: Some("4711".into()),
            name: Some("Travel".into()),
            ..Default::default()
        };
        assert_eq!(
            AccountDto::from_entity(&entity).display_name.as_deref(),
            Some("4711 Travel")
        );
    }

    #[test]
    fn display_name_without_number() {
        let entity = AccountEntity {
            name: Some("Travel".into()),
            ..Default::default()
        };
        assert_eq!(
            AccountDto::from_entity(&entity).display_name.as_deref(),
            Some("Travel")
        );
    }
}
