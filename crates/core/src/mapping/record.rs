//! Record descriptors and the entity/DTO base types.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

use super::plan::copy_fields;
use super::value::{FieldKind, FieldType, FieldValue, MappingError, RecordRef};

/// Name and declared type of one mapped field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub kind: FieldKind,
    pub nullable: bool,
}

impl FieldDef {
    /// Describe a field from an accessor closure; the field's Rust type
    /// determines kind and nullability.
    pub fn infer<R, T, F>(name: &'static str, _accessor: F) -> Self
    where
        T: FieldType,
        F: Fn(&R) -> &T,
    {
        Self {
            name,
            kind: T::KIND,
            nullable: T::NULLABLE,
        }
    }

    pub fn same_type(&self, other: &FieldDef) -> bool {
        self.kind == other.kind && self.nullable == other.nullable
    }
}

/// Which side of the persistence boundary a record type lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Entity,
    Dto,
}

/// An identity-bearing record.
pub trait Identified: Default {
    const TYPE_NAME: &'static str;
    const SIDE: Side;

    fn id(&self) -> Option<DbId>;

    fn set_id(&mut self, id: Option<DbId>);

    /// A fresh instance carrying nothing but the given identity.
    fn with_id(id: Option<DbId>) -> Self {
        let mut record = Self::default();
        record.set_id(id);
        record
    }
}

/// A record with an explicit field table, readable and writable by name.
///
/// Implemented through [`impl_record!`](crate::impl_record).
pub trait Record: Identified {
    fn fields() -> Vec<FieldDef>;

    fn get(&self, field: &str) -> Option<FieldValue>;

    fn set(&mut self, field: &str, value: FieldValue) -> Result<(), MappingError>;
}

/// Reference to the owning tenant of an entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantRef {
    pub id: Option<DbId>,
}

/// Bookkeeping columns shared by every persistent entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityBase {
    pub id: Option<DbId>,
    pub created: Option<Timestamp>,
    pub deleted: bool,
    pub last_update: Option<Timestamp>,
    pub tenant: Option<TenantRef>,
}

/// Bookkeeping fields shared by every transport DTO.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DtoBase {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DbId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_deleted: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<DbId>,
}

pub trait Entity: Record {
    fn base(&self) -> &EntityBase;

    fn base_mut(&mut self) -> &mut EntityBase;
}

pub trait DtoRecord: Record {
    fn base(&self) -> &DtoBase;

    fn base_mut(&mut self) -> &mut DtoBase;
}

/// A transport DTO mirroring an [`Entity`].
///
/// The provided copy operations copy the bookkeeping fields explicitly, run
/// the generic field copier, and then call the enrichment hook, which is the
/// place for formatted values, collections, and expanded references.
pub trait HistorizableDto: DtoRecord + 'static {
    type Entity: Entity + 'static;

    fn enrich_from(&mut self, _src: &Self::Entity) {}

    fn enrich_to(&self, _dest: &mut Self::Entity) {}

    fn copy_from(&mut self, src: &Self::Entity) {
        let from = Entity::base(src);
        let to = DtoRecord::base_mut(self);
        to.id = from.id;
        to.created = from.created;
        to.is_deleted = Some(from.deleted);
        to.last_update = from.last_update;
        to.tenant_id = from.tenant.as_ref().and_then(|t| t.id);
        copy_fields(src, self);
        self.enrich_from(src);
    }

    fn copy_to(&self, dest: &mut Self::Entity) {
        let from = DtoRecord::base(self);
        let to = Entity::base_mut(dest);
        to.id = from.id;
        to.created = from.created;
        to.deleted = from.is_deleted == Some(true);
        to.last_update = from.last_update;
        if let Some(tenant_id) = from.tenant_id {
            to.tenant = Some(TenantRef { id: Some(tenant_id) });
        }
        copy_fields(self, dest);
        self.enrich_to(dest);
    }

    /// Copy only the identity. Used for embedded and back-referenced objects,
    /// including every nested DTO the generic copier builds.
    fn copy_from_minimal(&mut self, src: &Self::Entity) {
        DtoRecord::base_mut(self).id = Entity::base(src).id;
    }

    /// Build a DTO from an entity with [`copy_from`](Self::copy_from).
    fn from_entity(src: &Self::Entity) -> Self {
        let mut dto = Self::default();
        dto.copy_from(src);
        dto
    }
}

/// Build the DTO side of a reference. Goes through
/// [`HistorizableDto::copy_from_minimal`] when the referenced entity travels
/// with the reference, and falls back to the bare identity otherwise.
pub fn minimal_dto<D: HistorizableDto>(reference: &RecordRef) -> D {
    match reference.entity::<D::Entity>() {
        Some(entity) => {
            let mut dto = D::default();
            dto.copy_from_minimal(entity);
            dto
        }
        None => D::with_id(reference.id),
    }
}

/// Generate the field table, identity, and base accessors for a record.
///
/// The type must have a `base` field (`EntityBase` or `DtoBase`) and derive
/// `Default`. Entities must also be `Clone`, and DTOs must implement
/// [`HistorizableDto`]. Only the listed fields take part in generic copying.
///
/// ```ignore
/// impl_record!(AccountEntity, entity "Account", [number, name, description, status]);
/// impl_record!(AccountDto, dto "Account", [number, name, description, status, display_name]);
/// ```
#[macro_export]
macro_rules! impl_record {
    (@kind entity, $name:literal) => {
        $crate::mapping::FieldKind::Entity($name)
    };
    (@kind dto, $name:literal) => {
        $crate::mapping::FieldKind::Dto($name)
    };
    (@side entity) => {
        $crate::mapping::Side::Entity
    };
    (@side dto) => {
        $crate::mapping::Side::Dto
    };
    (@reference entity, $ty:ty) => {
        fn to_scalar(&self) -> $crate::mapping::FieldValue {
            $crate::mapping::FieldValue::Reference($crate::mapping::RecordRef::with_entity(
                <$ty as $crate::mapping::Identified>::id(self),
                ::std::clone::Clone::clone(self),
            ))
        }

        fn from_scalar(
            value: $crate::mapping::FieldValue,
        ) -> Result<Self, $crate::mapping::MappingError> {
            match value {
                $crate::mapping::FieldValue::Reference(reference) => {
                    Ok(<$ty as $crate::mapping::Identified>::with_id(reference.id))
                }
                other => Err($crate::mapping::MappingError::mismatch(
                    <$ty as $crate::mapping::Scalar>::KIND,
                    &other,
                )),
            }
        }
    };
    (@reference dto, $ty:ty) => {
        fn to_scalar(&self) -> $crate::mapping::FieldValue {
            $crate::mapping::FieldValue::Reference($crate::mapping::RecordRef::identity(
                <$ty as $crate::mapping::Identified>::id(self),
            ))
        }

        fn from_scalar(
            value: $crate::mapping::FieldValue,
        ) -> Result<Self, $crate::mapping::MappingError> {
            match value {
                $crate::mapping::FieldValue::Reference(reference) => {
                    Ok($crate::mapping::minimal_dto::<$ty>(&reference))
                }
                other => Err($crate::mapping::MappingError::mismatch(
                    <$ty as $crate::mapping::Scalar>::KIND,
                    &other,
                )),
            }
        }
    };
    (@base entity, $ty:ty) => {
        impl $crate::mapping::Entity for $ty {
            fn base(&self) -> &$crate::mapping::EntityBase {
                &self.base
            }

            fn base_mut(&mut self) -> &mut $crate::mapping::EntityBase {
                &mut self.base
            }
        }
    };
    (@base dto, $ty:ty) => {
        impl $crate::mapping::DtoRecord for $ty {
            fn base(&self) -> &$crate::mapping::DtoBase {
                &self.base
            }

            fn base_mut(&mut self) -> &mut $crate::mapping::DtoBase {
                &mut self.base
            }
        }
    };
    ($ty:ty, $side:ident $name:literal, [$($field:ident),* $(,)?]) => {
        impl $crate::mapping::Identified for $ty {
            const TYPE_NAME: &'static str = $name;
            const SIDE: $crate::mapping::Side = $crate::impl_record!(@side $side);

            fn id(&self) -> Option<$crate::types::DbId> {
                self.base.id
            }

            fn set_id(&mut self, id: Option<$crate::types::DbId>) {
                self.base.id = id;
            }
        }

        impl $crate::mapping::Scalar for $ty {
            const KIND: $crate::mapping::FieldKind = $crate::impl_record!(@kind $side, $name);

            $crate::impl_record!(@reference $side, $ty);
        }

        impl $crate::mapping::Record for $ty {
            fn fields() -> Vec<$crate::mapping::FieldDef> {
                vec![
                    $( $crate::mapping::FieldDef::infer::<$ty, _, _>(
                        stringify!($field),
                        |r| &r.$field,
                    ), )*
                ]
            }

            fn get(&self, field: &str) -> Option<$crate::mapping::FieldValue> {
                match field {
                    $( stringify!($field) => {
                        Some($crate::mapping::FieldType::to_value(&self.$field))
                    } )*
                    _ => None,
                }
            }

            #[allow(unused_variables)]
            fn set(
                &mut self,
                field: &str,
                value: $crate::mapping::FieldValue,
            ) -> Result<(), $crate::mapping::MappingError> {
                match field {
                    $( stringify!($field) => {
                        self.$field = $crate::mapping::FieldType::from_value(value)?;
                        Ok(())
                    } )*
                    _ => Err($crate::mapping::MappingError::UnknownField {
                        type_name: $name,
                        field: field.to_string(),
                    }),
                }
            }
        }

        $crate::impl_record!(@base $side, $ty);
    };
}
