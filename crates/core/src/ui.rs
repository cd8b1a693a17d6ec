//! Declarative UI descriptors sent to the client so list pages render
//! without per-entity client code.
//!
//! The shape is built with chained `add_*` calls:
//!
//! ```ignore
//! UiLayout::new("Timesheets")
//!     .add_table(UiTable::result_set()
//!         .add_column("startDate", "Start", Some(Formatter::Date))
//!         .add_column("description", "Description", None))
//!     .add_filter_field(UiFilterField::new("searchString", "Search", Widget::Text))
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Named container holding the filter widgets of a list page.
pub const FILTER_OPTIONS: &str = "filterOptions";

/// Display formatter the client applies to a result column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Formatter {
    Date,
    Timestamp,
    Currency,
    Boolean,
    Number,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiTableColumn {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatter: Option<Formatter>,
}

/// A result table. List pages carry exactly one, first in the layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiTable {
    pub id: String,
    pub columns: Vec<UiTableColumn>,
}

impl UiTable {
    pub fn result_set() -> Self {
        Self {
            id: "resultSet".to_string(),
            columns: Vec::new(),
        }
    }

    pub fn add_column(mut self, id: &str, title: &str, formatter: Option<Formatter>) -> Self {
        self.columns.push(UiTableColumn {
            id: id.to_string(),
            title: title.to_string(),
            formatter,
        });
        self
    }
}

/// One selectable option of a [`Widget::Select`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiSelectValue {
    pub value: String,
    pub label: String,
}

/// Widget kind of a filter field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Widget {
    Text,
    Date,
    Checkbox,
    Select { values: Vec<UiSelectValue> },
}

impl Widget {
    /// A select over `(value, label)` pairs.
    pub fn select(values: &[(&str, &str)]) -> Self {
        Widget::Select {
            values: values
                .iter()
                .map(|(value, label)| UiSelectValue {
                    value: value.to_string(),
                    label: label.to_string(),
                })
                .collect(),
        }
    }
}

/// A filter input bound to one key of the filter object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiFilterField {
    pub id: String,
    pub label: String,
    pub widget: Widget,
}

impl UiFilterField {
    pub fn new(id: &str, label: &str, widget: Widget) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            widget,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiNamedContainer {
    pub id: String,
    pub content: Vec<UiFilterField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiLayout {
    pub title: String,
    pub layout: Vec<UiTable>,
    pub named_containers: Vec<UiNamedContainer>,
    pub translations: BTreeMap<String, String>,
}

impl UiLayout {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            layout: Vec::new(),
            named_containers: Vec::new(),
            translations: BTreeMap::new(),
        }
    }

    pub fn add_table(mut self, table: UiTable) -> Self {
        self.layout.push(table);
        self
    }

    /// Append a field to the [`FILTER_OPTIONS`] container, creating it on
    /// first use.
    pub fn add_filter_field(mut self, field: UiFilterField) -> Self {
        match self
            .named_containers
            .iter_mut()
            .find(|c| c.id == FILTER_OPTIONS)
        {
            Some(container) => container.content.push(field),
            None => self.named_containers.push(UiNamedContainer {
                id: FILTER_OPTIONS.to_string(),
                content: vec![field],
            }),
        }
        self
    }

    pub fn add_translation(mut self, key: &str, text: &str) -> Self {
        self.translations.insert(key.to_string(), text.to_string());
        self
    }

    /// Id of the first column of the first table, used as the default sort.
    pub fn default_sort_column(&self) -> Option<&str> {
        self.layout
            .first()
            .and_then(|t| t.columns.first())
            .map(|c| c.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample() -> UiLayout {
        UiLayout::new("Accounts")
            .add_table(
                UiTable::result_set()
                    .add_column("number", "Number", None)
                    .add_column("lastUpdate", "Modified", Some(Formatter::Timestamp)),
            )
            .add_filter_field(UiFilterField::new("searchString", "Search", Widget::Text))
            .add_filter_field(UiFilterField::new(
                "status",
                "Status",
                Widget::select(&[("ACTIVE", "Active")]),
            ))
            .add_translation("reset", "Reset")
    }

    #[test]
    fn filter_fields_share_one_container() {
        let ui = sample();
        assert_eq!(ui.named_containers.len(), 1);
        assert_eq!(ui.named_containers[0].content.len(), 2);
    }

    #[test]
    fn first_column_is_default_sort() {
        assert_eq!(sample().default_sort_column(), Some("number"));
        assert_eq!(UiLayout::new("Empty").default_sort_column(), None);
    }

    #[test]
    fn serializes_client_shape() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["layout"][0]["id"], "resultSet");
        assert_eq!(value["layout"][0]["columns"][1]["formatter"], "TIMESTAMP");
        assert!(value["layout"][0]["columns"][0].get("formatter").is_none());
        assert_eq!(
            value["namedContainers"][0]["content"][1]["widget"],
            json!({"type": "select", "values": [{"value": "ACTIVE", "label": "Active"}]})
        );
        assert_eq!(value["translations"]["reset"], "Reset");
    }
}
