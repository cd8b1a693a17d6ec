//! Name-based copy plans between two record types.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use super::record::{FieldDef, Record};
use super::value::{FieldKind, FieldValue};

/// Field names that never take part in generic copying.
const BOOKKEEPING_FIELDS: &[&str] = &["log", "serial_version_uid", "companion"];

fn is_bookkeeping(name: &str) -> bool {
    name.starts_with('_') || BOOKKEEPING_FIELDS.contains(&name)
}

/// How one destination field is populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Same name and type on both sides: copy the value as is.
    Verbatim,
    /// Same type, but a container. Left to explicit enrichment code.
    SkipCollection,
    /// Entity reference into a DTO reference carrying only the identity.
    MinimalDto,
    /// DTO reference into an entity placeholder carrying only the identity.
    EntityPlaceholder,
    /// Non-null boolean source coerced by truthiness.
    Truthiness,
    /// Source field exists with a type no rule bridges.
    Unsupported,
    /// No source field with this name.
    Missing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    pub field: &'static str,
    pub transform: Transform,
}

/// The ordered `(field, transform)` sequence for one source/destination pair.
#[derive(Debug, Clone)]
pub struct MappingPlan {
    source: &'static str,
    dest: &'static str,
    pub mappings: Vec<FieldMapping>,
}

fn transform_for(src: &FieldDef, dest: &FieldDef) -> Transform {
    if src.same_type(dest) {
        return if dest.kind == FieldKind::Collection {
            Transform::SkipCollection
        } else {
            Transform::Verbatim
        };
    }
    match (src.kind, dest.kind) {
        (FieldKind::Entity(_), FieldKind::Dto(_)) => Transform::MinimalDto,
        (FieldKind::Dto(_), FieldKind::Entity(_)) => Transform::EntityPlaceholder,
        (FieldKind::Bool, _) if !src.nullable => Transform::Truthiness,
        (FieldKind::Bool, FieldKind::Bool) => Transform::Verbatim,
        _ => Transform::Unsupported,
    }
}

type PlanKey = (TypeId, TypeId);

/// Plans built so far, one per source/destination pair.
static PLANS: LazyLock<RwLock<HashMap<PlanKey, Arc<MappingPlan>>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

impl MappingPlan {
    /// The plan for `S` into `D`. Built on first use, then shared.
    pub fn cached<S: Record + 'static, D: Record + 'static>() -> Arc<MappingPlan> {
        let key = (TypeId::of::<S>(), TypeId::of::<D>());
        if let Some(plan) = PLANS
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Arc::clone(plan);
        }

        let plan = Arc::new(Self::between::<S, D>());
        tracing::debug!(
            source = plan.source,
            dest = plan.dest,
            fields = plan.mappings.len(),
            "Mapping plan registered",
        );
        let mut plans = PLANS.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(plans.entry(key).or_insert(plan))
    }

    /// Match every destination field against the source field table by name.
    pub fn between<S: Record, D: Record>() -> Self {
        let source_fields = S::fields();
        let mappings = D::fields()
            .into_iter()
            .filter(|dest| !is_bookkeeping(dest.name))
            .map(|dest| {
                let transform = match source_fields.iter().find(|src| src.name == dest.name) {
                    Some(src) => transform_for(src, &dest),
                    None => Transform::Missing,
                };
                FieldMapping {
                    field: dest.name,
                    transform,
                }
            })
            .collect();

        Self {
            source: S::TYPE_NAME,
            dest: D::TYPE_NAME,
            mappings,
        }
    }

    pub fn transform_of(&self, field: &str) -> Option<Transform> {
        self.mappings
            .iter()
            .find(|m| m.field == field)
            .map(|m| m.transform)
    }

    /// Copy `src` into `dest` following the plan. Never fails: every
    /// per-field problem is logged and the field is left as it was.
    pub fn apply<S: Record, D: Record>(&self, src: &S, dest: &mut D) {
        for mapping in &self.mappings {
            let field = mapping.field;
            let value = match mapping.transform {
                Transform::Verbatim => src.get(field),
                Transform::MinimalDto | Transform::EntityPlaceholder => {
                    match src.get(field) {
                        Some(FieldValue::Null) | None => None,
                        Some(reference) => Some(reference),
                    }
                }
                Transform::Truthiness => src
                    .get(field)
                    .map(|v| FieldValue::Bool(v.is_true())),
                Transform::SkipCollection => None,
                Transform::Missing => {
                    tracing::debug!(
                        field,
                        source = self.source,
                        dest = self.dest,
                        "Source field not found, ignoring",
                    );
                    None
                }
                Transform::Unsupported => {
                    tracing::warn!(
                        field,
                        source = self.source,
                        dest = self.dest,
                        "Unsupported field types, not copied",
                    );
                    None
                }
            };

            let Some(value) = value else { continue };
            if let Err(e) = dest.set(field, value) {
                tracing::error!(
                    field,
                    source = self.source,
                    dest = self.dest,
                    error = %e,
                    "Error while copying field",
                );
            }
        }
    }
}

/// Copy all name-matched fields of `src` into `dest`.
pub fn copy_fields<S: Record + 'static, D: Record + 'static>(src: &S, dest: &mut D) {
    MappingPlan::cached::<S, D>().apply(src, dest);
}
