//! Entity ⇄ DTO field copier.
//!
//! Every entity and DTO registers an explicit field table with
//! [`impl_record!`](crate::impl_record). Copying between two record types
//! matches destination fields to source fields by name and picks a
//! [`Transform`] per field:
//!
//! - identical type: copied verbatim, except containers, which are never
//!   auto-copied and must be filled by an enrichment hook;
//! - entity reference into a DTO reference: built by the DTO's
//!   `copy_from_minimal`, which copies only the identity unless overridden;
//! - DTO reference into an entity reference: a placeholder holding only the
//!   identity, so graphs are never traversed;
//! - non-null boolean source with a different declared type: truthiness;
//! - anything else: logged and skipped.
//!
//! Copying never returns an error. Failures are logged with the source
//! type, destination type, and field name, and the field keeps its default.
//! The plan of each source/destination pair is built once and reused.

mod plan;
mod record;
mod value;

pub use plan::{copy_fields, FieldMapping, MappingPlan, Transform};
pub use record::{
    minimal_dto, DtoBase, DtoRecord, Entity, EntityBase, FieldDef, HistorizableDto, Identified,
    Record, Side, TenantRef,
};
pub use value::{FieldKind, FieldType, FieldValue, MappingError, RecordRef, Scalar};

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal::Decimal;
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct ContactEntity {
        base: EntityBase,
        name: Option<String>,
    }
    crate::impl_record!(ContactEntity, entity "Contact", [name]);

    #[derive(Debug, Clone, Default, PartialEq)]
    struct ContactDto {
        base: DtoBase,
        name: Option<String>,
    }
    crate::impl_record!(ContactDto, dto "Contact", [name]);

    impl HistorizableDto for ContactDto {
        type Entity = ContactEntity;
    }

    #[derive(Debug, Clone, Default, PartialEq)]
    struct AgentEntity {
        base: EntityBase,
        first_name: Option<String>,
        last_name: Option<String>,
    }
    crate::impl_record!(AgentEntity, entity "Agent", [first_name, last_name]);

    /// Shown inline wherever an agent is referenced, so its minimal form
    /// carries a display name next to the identity.
    #[derive(Debug, Clone, Default, PartialEq)]
    struct AgentDto {
        base: DtoBase,
        first_name: Option<String>,
        last_name: Option<String>,
        display_name: Option<String>,
    }
    crate::impl_record!(AgentDto, dto "Agent", [first_name, last_name, display_name]);

    impl HistorizableDto for AgentDto {
        type Entity = AgentEntity;

        fn copy_from_minimal(&mut self, src: &AgentEntity) {
            self.base.id = src.base.id;
            let parts: Vec<&str> = [src.first_name.as_deref(), src.last_name.as_deref()]
                .into_iter()
                .flatten()
                .collect();
            self.display_name = (!parts.is_empty()).then(|| parts.join(" "));
        }
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Line {
        text: String,
    }

    #[derive(Debug, Clone, Default, PartialEq)]
    struct InvoiceEntity {
        base: EntityBase,
        number: Option<i32>,
        subject: Option<String>,
        amount: Option<Decimal>,
        issued: Option<NaiveDate>,
        contact: Option<ContactEntity>,
        agent: Option<AgentEntity>,
        lines: Option<Vec<Line>>,
        paid: bool,
        archived: Option<bool>,
        note: Option<String>,
    }
    crate::impl_record!(
        InvoiceEntity,
        entity "Invoice",
        [number, subject, amount, issued, contact, agent, lines, paid, archived, note]
    );

    #[derive(Debug, Clone, Default, PartialEq)]
    struct InvoiceDto {
        base: DtoBase,
        number: Option<i32>,
        subject: Option<String>,
        amount: Option<Decimal>,
        issued: Option<NaiveDate>,
        contact: Option<ContactDto>,
        agent: Option<AgentDto>,
        lines: Option<Vec<Line>>,
        paid: Option<bool>,
        archived: bool,
        // Text on the entity, integer here: no bridge applies.
        note: Option<i64>,
        formatted_amount: Option<String>,
        _cache: Option<String>,
    }
    crate::impl_record!(
        InvoiceDto,
        dto "Invoice",
        [
            number, subject, amount, issued, contact, agent, lines, paid, archived, note,
            formatted_amount, _cache,
        ]
    );

    impl HistorizableDto for InvoiceDto {
        type Entity = InvoiceEntity;

        fn enrich_from(&mut self, src: &InvoiceEntity) {
            self.formatted_amount = src.amount.map(|a| format!("{a:.2}"));
        }
    }

    fn sample_invoice() -> InvoiceEntity {
        InvoiceEntity {
            base: EntityBase {
                id: Some(7),
                created: Some(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()),
                deleted: false,
                last_update: Some(Utc.with_ymd_and_hms(2024, 2, 3, 4, 5, 6).unwrap()),
                tenant: Some(TenantRef { id: Some(1) }),
            },
            number: Some(4711),
            subject: Some("Consulting".into()),
            amount: Some(Decimal::new(123_450, 2)),
            issued: NaiveDate::from_ymd_opt(2024, 1, 15),
            contact: Some(ContactEntity {
                base: EntityBase {
                    id: Some(99),
                    ..Default::default()
                },
                name: Some("ACME".into()),
            }),
            agent: Some(AgentEntity {
                base: EntityBase {
                    id: Some(5),
                    ..Default::default()
                },
                first_name: Some("Jane".into()),
                last_name: Some("Doe".into()),
            }),
            lines: Some(vec![
                Line { text: "a".into() },
                Line { text: "b".into() },
                Line { text: "c".into() },
                Line { text: "d".into() },
                Line { text: "e".into() },
            ]),
            paid: true,
            archived: Some(true),
            note: Some("keep".into()),
        }
    }

    #[test]
    fn plan_assigns_a_transform_to_every_field() {
        let plan = MappingPlan::between::<InvoiceEntity, InvoiceDto>();
        assert_eq!(plan.transform_of("number"), Some(Transform::Verbatim));
        assert_eq!(plan.transform_of("contact"), Some(Transform::MinimalDto));
        assert_eq!(plan.transform_of("lines"), Some(Transform::SkipCollection));
        assert_eq!(plan.transform_of("paid"), Some(Transform::Truthiness));
        assert_eq!(plan.transform_of("agent"), Some(Transform::MinimalDto));
        assert_eq!(plan.transform_of("archived"), Some(Transform::Verbatim));
        assert_eq!(plan.transform_of("note"), Some(Transform::Unsupported));
        assert_eq!(plan.transform_of("formatted_amount"), Some(Transform::Missing));
        assert_eq!(plan.transform_of("_cache"), None);

        let back = MappingPlan::between::<InvoiceDto, InvoiceEntity>();
        assert_eq!(back.transform_of("contact"), Some(Transform::EntityPlaceholder));
    }

    #[test]
    fn copy_from_copies_base_and_matching_scalars() {
        let src = sample_invoice();
        let dto = InvoiceDto::from_entity(&src);

        assert_eq!(dto.base.id, Some(7));
        assert_eq!(dto.base.created, src.base.created);
        assert_eq!(dto.base.is_deleted, Some(false));
        assert_eq!(dto.base.last_update, src.base.last_update);
        assert_eq!(dto.base.tenant_id, Some(1));
        assert_eq!(dto.number, Some(4711));
        assert_eq!(dto.subject.as_deref(), Some("Consulting"));
        assert_eq!(dto.amount, Some(Decimal::new(123_450, 2)));
        assert_eq!(dto.issued, NaiveDate::from_ymd_opt(2024, 1, 15));
        assert_eq!(dto.formatted_amount.as_deref(), Some("1234.50"));
    }

    #[test]
    fn nested_entity_becomes_identity_only_dto() {
        let dto = InvoiceDto::from_entity(&sample_invoice());
        let contact = dto.contact.expect("contact reference");
        assert_eq!(contact.base.id, Some(99));
        assert_eq!(contact.name, None);
    }

    #[test]
    fn nested_dto_is_built_by_its_minimal_copy_hook() {
        let dto = InvoiceDto::from_entity(&sample_invoice());
        let agent = dto.agent.expect("agent reference");
        assert_eq!(agent.base.id, Some(5));
        assert_eq!(agent.display_name.as_deref(), Some("Jane Doe"));
        assert_eq!(agent.first_name, None);
        assert_eq!(agent.last_name, None);
    }

    #[test]
    fn reference_without_entity_falls_back_to_identity() {
        let agent: AgentDto = minimal_dto(&RecordRef::identity(Some(8)));
        assert_eq!(agent.base.id, Some(8));
        assert_eq!(agent.display_name, None);
    }

    #[test]
    fn plans_are_built_once_per_pair() {
        let first = MappingPlan::cached::<InvoiceEntity, InvoiceDto>();
        let second = MappingPlan::cached::<InvoiceEntity, InvoiceDto>();
        assert!(Arc::ptr_eq(&first, &second));

        let back = MappingPlan::cached::<InvoiceDto, InvoiceEntity>();
        assert!(!Arc::ptr_eq(&first, &back));
        assert_eq!(back.transform_of("contact"), Some(Transform::EntityPlaceholder));
    }

    #[test]
    fn collections_are_never_auto_copied() {
        let dto = InvoiceDto::from_entity(&sample_invoice());
        assert_eq!(dto.lines, None);

        let mut entity = InvoiceEntity::default();
        let with_lines = InvoiceDto {
            lines: Some(vec![Line { text: "x".into() }]),
            ..Default::default()
        };
        with_lines.copy_to(&mut entity);
        assert_eq!(entity.lines, None);
    }

    #[test]
    fn booleans_are_bridged_by_truthiness() {
        let dto = InvoiceDto::from_entity(&sample_invoice());
        assert_eq!(dto.paid, Some(true));
        assert!(dto.archived);

        let mut entity = InvoiceEntity::default();
        let unset = InvoiceDto::default();
        unset.copy_to(&mut entity);
        assert!(!entity.paid);
        assert_eq!(entity.archived, Some(false));
    }

    #[test]
    fn null_optional_bool_is_not_coerced() {
        let src = InvoiceEntity {
            archived: None,
            ..sample_invoice()
        };
        let mut dto = InvoiceDto {
            archived: true,
            ..Default::default()
        };
        dto.copy_from(&src);
        assert!(dto.archived);
    }

    #[test]
    fn unsupported_fields_keep_their_default() {
        let dto = InvoiceDto::from_entity(&sample_invoice());
        assert_eq!(dto.note, None);
    }

    #[test]
    fn copy_to_builds_entity_placeholder_and_tenant() {
        let dto = InvoiceDto {
            base: DtoBase {
                id: Some(3),
                is_deleted: Some(true),
                tenant_id: Some(5),
                ..Default::default()
            },
            contact: Some(ContactDto {
                base: DtoBase {
                    id: Some(42),
                    ..Default::default()
                },
                name: Some("ignored".into()),
            }),
            ..Default::default()
        };
        let mut entity = InvoiceEntity::default();
        dto.copy_to(&mut entity);

        assert_eq!(entity.base.id, Some(3));
        assert!(entity.base.deleted);
        assert_eq!(entity.base.tenant, Some(TenantRef { id: Some(5) }));
        let contact = entity.contact.expect("placeholder");
        assert_eq!(contact.base.id, Some(42));
        assert_eq!(contact.name, None);
    }

    #[test]
    fn copy_to_without_tenant_leaves_tenant_untouched() {
        let mut entity = InvoiceEntity::default();
        InvoiceDto::default().copy_to(&mut entity);
        assert_eq!(entity.base.tenant, None);
    }

    #[test]
    fn scalar_fields_survive_a_round_trip() {
        let src = sample_invoice();
        let dto = InvoiceDto::from_entity(&src);
        let mut back = InvoiceEntity::default();
        dto.copy_to(&mut back);

        assert_eq!(back.base, src.base);
        assert_eq!(back.number, src.number);
        assert_eq!(back.subject, src.subject);
        assert_eq!(back.amount, src.amount);
        assert_eq!(back.issued, src.issued);
        assert_eq!(back.paid, src.paid);
        assert_eq!(back.archived, src.archived);
    }

    #[test]
    fn copy_from_minimal_sets_only_the_identity() {
        let mut dto = InvoiceDto::default();
        dto.copy_from_minimal(&sample_invoice());
        assert_eq!(
            dto,
            InvoiceDto {
                base: DtoBase {
                    id: Some(7),
                    ..Default::default()
                },
                ..Default::default()
            }
        );
    }

    #[test]
    fn record_rejects_unknown_field_names() {
        let mut dto = InvoiceDto::default();
        let result = dto.set("nope", FieldValue::Null);
        assert!(matches!(result, Err(MappingError::UnknownField { .. })));
        assert_eq!(dto.get("nope"), None);
    }

    #[test]
    fn entity_references_report_their_kind() {
        let kinds: Vec<_> = InvoiceDto::fields()
            .into_iter()
            .filter(|f| f.name == "contact")
            .map(|f| f.kind)
            .collect();
        assert_eq!(kinds, vec![FieldKind::Dto("Contact")]);
    }
}
