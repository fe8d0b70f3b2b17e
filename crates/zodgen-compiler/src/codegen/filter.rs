//! Where inputs and the relation filters they refer to.

use crate::ir::{Entity, Field, FieldKind, Multiplicity};

use super::context::BuildContext;
use super::fragment::Fragment;
use super::naming;
use super::zod::{prop, Prim, ZodExpr};
use super::zod_types::field_value;

/// `AND` and `NOT` take one condition or many; `OR` takes a list only.
fn connectives(self_name: &str) -> Vec<(String, ZodExpr)> {
    let me = ZodExpr::reference(self_name);
    vec![
        prop("AND", ZodExpr::one_or_many(me.clone()).optional()),
        prop("OR", me.clone().array().optional()),
        prop("NOT", ZodExpr::one_or_many(me).optional()),
    ]
}

/// Filter for a scalar or enum field: the per-type filter object or the bare
/// value. Types with no filter fragment accept anything.
pub fn value_filter(field: &Field) -> Option<ZodExpr> {
    let value = field_value(field)?;
    let multiplicity = field.multiplicity();
    let filter = match &field.kind {
        FieldKind::Scalar(typ) => naming::scalar_filter(typ, multiplicity),
        FieldKind::Enum(name) => Some(naming::enum_filter(name, multiplicity)),
        FieldKind::Relation(_) => return None,
    };
    let Some(filter) = filter.map(ZodExpr::reference) else {
        return Some(ZodExpr::prim(Prim::Any).optional());
    };

    Some(match multiplicity {
        Multiplicity::Required => ZodExpr::union(vec![filter, value]).optional(),
        Multiplicity::Nullable => ZodExpr::union(vec![filter, value]).nullable().optional(),
        Multiplicity::List => filter.optional(),
    })
}

fn relation_filter(field: &Field) -> Option<ZodExpr> {
    let target = &field.relation_ref()?.target;
    let where_input = ZodExpr::reference(naming::entity_schema(target, "WhereInput"));

    Some(match field.multiplicity() {
        Multiplicity::Required => ZodExpr::union(vec![
            ZodExpr::reference(naming::entity_schema(target, "RelationFilter")),
            where_input,
        ])
        .optional(),
        Multiplicity::Nullable => ZodExpr::union(vec![
            ZodExpr::prim(Prim::Null),
            ZodExpr::reference(naming::entity_schema(target, "NullableRelationFilter")),
            where_input,
        ])
        .optional(),
        Multiplicity::List => {
            ZodExpr::reference(naming::entity_schema(target, "ListRelationFilter")).optional()
        }
    })
}

/// `<M>WhereInputSchema`: connectives, then every field in declaration order.
pub fn build_where_input(entity: &Entity) -> Fragment {
    let name = naming::entity_schema(&entity.name, "WhereInput");
    let mut fields = connectives(&name);
    for field in &entity.fields {
        let filter = if field.is_relation() {
            relation_filter(field)
        } else {
            value_filter(field)
        };
        if let Some(filter) = filter {
            fields.push((field.name.clone(), filter));
        }
    }
    Fragment::new(name, ZodExpr::strict_object(fields))
}

fn scalar_only_where(entity: &Entity, suffix: &str) -> Fragment {
    let name = naming::entity_schema(&entity.name, suffix);
    let mut fields = connectives(&name);
    fields.extend(
        entity
            .value_fields()
            .filter_map(|field| Some((field.name.clone(), value_filter(field)?))),
    );
    Fragment::new(name, ZodExpr::strict_object(fields))
}

/// `<M>ScalarWhereInputSchema`, used by bulk nested updates. Only entities on
/// the far side of a list relation need it.
pub fn build_scalar_where(ctx: &BuildContext<'_>, entity: &Entity) -> Option<Fragment> {
    ctx.facts
        .is_list_relation_target(&entity.name)
        .then(|| scalar_only_where(entity, "ScalarWhereInput"))
}

/// `<M>ScalarWhereWithAggregatesInputSchema`, the `having` clause of grouping.
pub fn build_scalar_where_with_aggregates(entity: &Entity) -> Fragment {
    scalar_only_where(entity, "ScalarWhereWithAggregatesInput")
}

/// Relation filters on `entity`, one per way the graph points at it.
pub fn build_relation_filters(ctx: &BuildContext<'_>, entity: &Entity) -> Vec<Fragment> {
    let where_input = ZodExpr::reference(naming::entity_schema(&entity.name, "WhereInput"));
    let mut fragments = Vec::new();

    if ctx.facts.is_list_relation_target(&entity.name) {
        fragments.push(Fragment::new(
            naming::entity_schema(&entity.name, "ListRelationFilter"),
            ZodExpr::strict_object(vec![
                prop("every", where_input.clone().optional()),
                prop("some", where_input.clone().optional()),
                prop("none", where_input.clone().optional()),
            ]),
        ));
    }
    if ctx.facts.is_required_relation_target(&entity.name) {
        fragments.push(Fragment::new(
            naming::entity_schema(&entity.name, "RelationFilter"),
            ZodExpr::strict_object(vec![
                prop("is", where_input.clone().optional()),
                prop("isNot", where_input.clone().optional()),
            ]),
        ));
    }
    if ctx.facts.is_nullable_relation_target(&entity.name) {
        fragments.push(Fragment::new(
            naming::entity_schema(&entity.name, "NullableRelationFilter"),
            ZodExpr::strict_object(vec![
                prop("is", where_input.clone().nullable().optional()),
                prop("isNot", where_input.nullable().optional()),
            ]),
        ));
    }

    fragments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::fixtures::{with_context, workspace_model};
    use crate::codegen::zod::render_standalone;

    fn entity<'a>(model: &'a crate::ir::DataModel, name: &str) -> &'a Entity {
        model.entity(name).unwrap()
    }

    #[test]
    fn test_where_input_connectives() {
        let model = workspace_model();
        let fragment = build_where_input(entity(&model, "Team"));
        let ZodExpr::Object(shape) = &fragment.schema else {
            panic!("expected object");
        };
        assert!(shape.strict);
        assert_eq!(
            render_standalone(shape.field("AND").unwrap()),
            "z.union([TeamWhereInputSchema.array(), TeamWhereInputSchema]).optional()"
        );
        assert_eq!(
            render_standalone(shape.field("OR").unwrap()),
            "TeamWhereInputSchema.array().optional()"
        );
    }

    #[test]
    fn test_where_field_filters() {
        let model = workspace_model();
        let fragment = build_where_input(entity(&model, "Team"));
        let ZodExpr::Object(shape) = &fragment.schema else {
            panic!("expected object");
        };
        assert_eq!(
            render_standalone(shape.field("title").unwrap()),
            "z.union([StringFilterSchema, z.string()]).optional()"
        );
        assert_eq!(
            render_standalone(shape.field("tags").unwrap()),
            "StringNullableListFilterSchema.optional()"
        );
        assert_eq!(
            render_standalone(shape.field("owner").unwrap()),
            "z.union([AccountRelationFilterSchema, AccountWhereInputSchema]).optional()"
        );
        assert_eq!(
            render_standalone(shape.field("memberships").unwrap()),
            "MembershipListRelationFilterSchema.optional()"
        );
    }

    #[test]
    fn test_nullable_relation_accepts_null() {
        let model = workspace_model();
        let fragment = build_where_input(entity(&model, "Category"));
        let ZodExpr::Object(shape) = &fragment.schema else {
            panic!("expected object");
        };
        assert_eq!(
            render_standalone(shape.field("parent").unwrap()),
            "z.union([z.null(), CategoryNullableRelationFilterSchema, CategoryWhereInputSchema]).optional()"
        );
    }

    #[test]
    fn test_relation_filters_follow_facts() {
        let model = workspace_model();
        with_context(&model, |ctx| {
            let names = |name: &str| -> Vec<String> {
                build_relation_filters(ctx, entity(&model, name))
                    .into_iter()
                    .map(|f| f.name)
                    .collect()
            };
            assert_eq!(
                names("Account"),
                vec!["AccountRelationFilterSchema".to_string()]
            );
            assert_eq!(
                names("Category"),
                vec![
                    "CategoryListRelationFilterSchema".to_string(),
                    "CategoryNullableRelationFilterSchema".to_string()
                ]
            );
        });
    }

    #[test]
    fn test_scalar_where_only_for_list_targets() {
        let model = workspace_model();
        with_context(&model, |ctx| {
            assert!(build_scalar_where(ctx, entity(&model, "Team")).is_some());
            assert!(build_scalar_where(ctx, entity(&model, "Account")).is_none());
        });
    }
}
