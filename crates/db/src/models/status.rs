//! Status enums mapping to SMALLINT columns.
//!
//! Each variant's discriminant is the stored value; the wire name is what
//! filters and DTOs carry.

use std::str::FromStr;

use pforge_core::error::CoreError;
use serde::{Deserialize, Serialize};

/// Status ID type matching SMALLINT in the database.
pub type StatusId = i16;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:expr => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant = $val ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Return the database status ID.
            pub fn id(self) -> StatusId {
                self as StatusId
            }

            pub fn from_id(id: StatusId) -> Option<Self> {
                Self::ALL.iter().copied().find(|s| s.id() == id)
            }

            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $wire ),+
                }
            }
        }

        impl From<$name> for StatusId {
            fn from(value: $name) -> Self {
                value as StatusId
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| {
                        CoreError::Validation(format!(
                            "Unknown {} '{s}'",
                            stringify!($name)
                        ))
                    })
            }
        }

        pforge_core::impl_enum_scalar!($name, stringify!($name));
    };
}

define_status_enum! {
    /// Order lifecycle status.
    OrderStatus {
        InPreparation = 1 => "IN_PREPARATION",
        Potential = 2 => "POTENTIAL",
        Offered = 3 => "OFFERED",
        Ordered = 4 => "ORDERED",
        Completed = 5 => "COMPLETED",
        Rejected = 6 => "REJECTED",
        Escalated = 7 => "ESCALATED",
    }
}

define_status_enum! {
    /// Cost account status.
    AccountStatus {
        Active = 1 => "ACTIVE",
        Nonactive = 2 => "NONACTIVE",
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn ids_round_trip() {
        for status in OrderStatus::ALL {
            assert_eq!(OrderStatus::from_id(status.id()), Some(*status));
        }
        assert_eq!(AccountStatus::from_id(9), None);
    }

    #[test]
    fn parses_wire_names() {
        assert_eq!("ORDERED".parse::<OrderStatus>().unwrap(), OrderStatus::Ordered);
        assert_matches!("ordered".parse::<OrderStatus>(), Err(CoreError::Validation(_)));
        assert_eq!(
            serde_json::to_value(AccountStatus::Nonactive).unwrap(),
            serde_json::json!("NONACTIVE")
        );
    }
}
