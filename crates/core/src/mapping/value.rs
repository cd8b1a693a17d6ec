//! Field kinds, dynamic field values, and the traits that translate Rust
//! field types into both.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::types::{DbId, Timestamp};

/// The declared type of a mapped field, stripped of nullability.
///
/// Two fields have the "same type" when their kinds and nullability match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Bool,
    Int,
    Long,
    Decimal,
    Text,
    Date,
    Timestamp,
    /// A serde-encoded enum, identified by its type name.
    Enum(&'static str),
    Json,
    /// A reference to another persistent entity.
    Entity(&'static str),
    /// A reference to another transport DTO.
    Dto(&'static str),
    /// A multi-element container. Never auto-copied.
    Collection,
}

/// A single field value in transit between two records.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i32),
    Long(i64),
    Decimal(Decimal),
    Text(String),
    Date(NaiveDate),
    Timestamp(Timestamp),
    Json(serde_json::Value),
    /// A referenced entity or DTO.
    Reference(RecordRef),
    List(Vec<serde_json::Value>),
}

impl FieldValue {
    /// Short variant name used in error messages.
    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Long(_) => "long",
            Self::Decimal(_) => "decimal",
            Self::Text(_) => "text",
            Self::Date(_) => "date",
            Self::Timestamp(_) => "timestamp",
            Self::Json(_) => "json",
            Self::Reference(_) => "reference",
            Self::List(_) => "list",
        }
    }

    /// Truthiness as used by the boolean bridge: only `Bool(true)` is true.
    pub fn is_true(&self) -> bool {
        matches!(self, Self::Bool(true))
    }
}

/// A reference in transit between two records.
///
/// Entity references also hold the referenced entity, so the receiving DTO
/// can build itself through its minimal-copy hook. Nothing else reads it,
/// and two references are equal when their identities are.
#[derive(Clone)]
pub struct RecordRef {
    pub id: Option<DbId>,
    entity: Option<Arc<dyn Any + Send + Sync>>,
}

impl RecordRef {
    pub fn identity(id: Option<DbId>) -> Self {
        Self { id, entity: None }
    }

    pub fn with_entity<E: Any + Send + Sync>(id: Option<DbId>, entity: E) -> Self {
        Self {
            id,
            entity: Some(Arc::new(entity)),
        }
    }

    /// The referenced entity, if one travels with the reference and it is an `E`.
    pub fn entity<E: Any>(&self) -> Option<&E> {
        self.entity.as_deref()?.downcast_ref::<E>()
    }
}

impl PartialEq for RecordRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl fmt::Debug for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordRef")
            .field("id", &self.id)
            .field("has_entity", &self.entity.is_some())
            .finish()
    }
}

/// Per-field failure while reading or writing a record.
///
/// These never reach the caller of a copy operation; the copier logs them
/// and moves on to the next field.
#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    #[error("field '{field}' is not declared on {type_name}")]
    UnknownField {
        type_name: &'static str,
        field: String,
    },

    #[error("expected a {expected:?} value, got {actual}")]
    TypeMismatch {
        expected: FieldKind,
        actual: &'static str,
    },

    #[error("value conversion failed: {0}")]
    Conversion(String),
}

impl MappingError {
    pub fn mismatch(expected: FieldKind, actual: &FieldValue) -> Self {
        Self::TypeMismatch {
            expected,
            actual: actual.variant_name(),
        }
    }
}

/// A Rust type that can appear as a mapped field of a record.
pub trait FieldType: Sized {
    const KIND: FieldKind;
    const NULLABLE: bool;

    fn to_value(&self) -> FieldValue;

    fn from_value(value: FieldValue) -> Result<Self, MappingError>;
}

/// A non-null value type. `Option<T>` of any scalar is a nullable field.
pub trait Scalar: Sized {
    const KIND: FieldKind;

    fn to_scalar(&self) -> FieldValue;

    fn from_scalar(value: FieldValue) -> Result<Self, MappingError>;
}

impl<T: Scalar> FieldType for Option<T> {
    const KIND: FieldKind = T::KIND;
    const NULLABLE: bool = true;

    fn to_value(&self) -> FieldValue {
        match self {
            Some(v) => v.to_scalar(),
            None => FieldValue::Null,
        }
    }

    fn from_value(value: FieldValue) -> Result<Self, MappingError> {
        match value {
            FieldValue::Null => Ok(None),
            other => T::from_scalar(other).map(Some),
        }
    }
}

impl FieldType for bool {
    const KIND: FieldKind = FieldKind::Bool;
    const NULLABLE: bool = false;

    fn to_value(&self) -> FieldValue {
        FieldValue::Bool(*self)
    }

    fn from_value(value: FieldValue) -> Result<Self, MappingError> {
        match value {
            FieldValue::Bool(b) => Ok(b),
            other => Err(MappingError::mismatch(<Self as FieldType>::KIND, &other)),
        }
    }
}

fn list_to_value<T: Serialize>(items: &[T]) -> FieldValue {
    FieldValue::List(
        items
            .iter()
            .filter_map(|item| serde_json::to_value(item).ok())
            .collect(),
    )
}

fn list_from_value<T: DeserializeOwned>(value: FieldValue) -> Result<Vec<T>, MappingError> {
    match value {
        FieldValue::List(items) => items
            .into_iter()
            .map(|item| {
                serde_json::from_value(item).map_err(|e| MappingError::Conversion(e.to_string()))
            })
            .collect(),
        other => Err(MappingError::mismatch(FieldKind::Collection, &other)),
    }
}

impl<T: Serialize + DeserializeOwned> FieldType for Vec<T> {
    const KIND: FieldKind = FieldKind::Collection;
    const NULLABLE: bool = false;

    fn to_value(&self) -> FieldValue {
        list_to_value(self)
    }

    fn from_value(value: FieldValue) -> Result<Self, MappingError> {
        list_from_value(value)
    }
}

impl<T: Serialize + DeserializeOwned> Scalar for Vec<T> {
    const KIND: FieldKind = FieldKind::Collection;

    fn to_scalar(&self) -> FieldValue {
        list_to_value(self)
    }

    fn from_scalar(value: FieldValue) -> Result<Self, MappingError> {
        list_from_value(value)
    }
}

macro_rules! plain_scalar {
    ($ty:ty, $variant:ident) => {
        impl Scalar for $ty {
            const KIND: FieldKind = FieldKind::$variant;

            fn to_scalar(&self) -> FieldValue {
                FieldValue::$variant(self.clone())
            }

            fn from_scalar(value: FieldValue) -> Result<Self, MappingError> {
                match value {
                    FieldValue::$variant(v) => Ok(v),
                    other => Err(MappingError::mismatch(<Self as Scalar>::KIND, &other)),
                }
            }
        }
    };
}

plain_scalar!(bool, Bool);
plain_scalar!(i32, Int);
plain_scalar!(i64, Long);
plain_scalar!(Decimal, Decimal);
plain_scalar!(String, Text);
plain_scalar!(NaiveDate, Date);
plain_scalar!(Timestamp, Timestamp);
plain_scalar!(serde_json::Value, Json);

/// Implement [`Scalar`] for a serde-encoded enum.
///
/// ```ignore
/// impl_enum_scalar!(OrderStatus, "OrderStatus");
/// ```
#[macro_export]
macro_rules! impl_enum_scalar {
    ($ty:ty, $name:expr) => {
        impl $crate::mapping::Scalar for $ty {
            const KIND: $crate::mapping::FieldKind = $crate::mapping::FieldKind::Enum($name);

            fn to_scalar(&self) -> $crate::mapping::FieldValue {
                $crate::mapping::FieldValue::Json(
                    ::serde_json::to_value(self).unwrap_or(::serde_json::Value::Null),
                )
            }

            fn from_scalar(
                value: $crate::mapping::FieldValue,
            ) -> Result<Self, $crate::mapping::MappingError> {
                match value {
                    $crate::mapping::FieldValue::Json(v) => ::serde_json::from_value(v)
                        .map_err(|e| $crate::mapping::MappingError::Conversion(e.to_string())),
                    other => Err($crate::mapping::MappingError::mismatch(
                        <Self as $crate::mapping::Scalar>::KIND,
                        &other,
                    )),
                }
            }
        }
    };
}
