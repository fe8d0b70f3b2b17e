//! Selection, inclusion and the per-entity argument wrappers they nest.

use crate::ir::Entity;

use super::context::BuildContext;
use super::fragment::Fragment;
use super::naming;
use super::zod::{prop, Prim, ZodExpr};

fn flag() -> ZodExpr {
    ZodExpr::prim(Prim::Boolean)
}

/// `true` or the nested argument object for a relation field.
fn relation_choice(target: &str, is_list: bool) -> ZodExpr {
    let args = if is_list {
        naming::entity_schema(target, "FindManyArgs")
    } else {
        naming::entity_schema(target, "Args")
    };
    ZodExpr::union(vec![flag(), ZodExpr::reference(args)]).optional()
}

fn count_choice(entity: &Entity) -> ZodExpr {
    ZodExpr::union(vec![
        flag(),
        ZodExpr::reference(naming::entity_schema(&entity.name, "CountOutputTypeArgs")),
    ])
    .optional()
}

fn relation_entries(entity: &Entity) -> Vec<(String, ZodExpr)> {
    let mut fields: Vec<(String, ZodExpr)> = entity
        .relation_fields()
        .filter_map(|field| {
            let rel = field.relation_ref()?;
            Some((field.name.clone(), relation_choice(&rel.target, field.is_list)))
        })
        .collect();
    if entity.owns_list_relation() {
        fields.push(prop("_count", count_choice(entity)));
    }
    fields
}

/// `<M>SelectSchema`: one flag per field, relations may nest arguments.
pub fn build_select(entity: &Entity) -> Fragment {
    let mut fields: Vec<(String, ZodExpr)> = entity
        .value_fields()
        .map(|field| (field.name.clone(), flag().optional()))
        .collect();
    fields.extend(relation_entries(entity));
    Fragment::new(
        naming::entity_schema(&entity.name, "Select"),
        ZodExpr::strict_object(fields),
    )
}

/// `<M>IncludeSchema`, only for entities with relations.
pub fn build_include(entity: &Entity) -> Option<Fragment> {
    entity.has_relations().then(|| {
        Fragment::new(
            naming::entity_schema(&entity.name, "Include"),
            ZodExpr::strict_object(relation_entries(entity)),
        )
    })
}

/// Selection and inclusion for the entity when reached as a single record.
pub fn select_and_include(entity: &Entity) -> Vec<(String, ZodExpr)> {
    let mut fields = vec![prop(
        "select",
        ZodExpr::reference(naming::entity_schema(&entity.name, "Select")).optional(),
    )];
    if entity.has_relations() {
        fields.push(prop(
            "include",
            ZodExpr::reference(naming::entity_schema(&entity.name, "Include")).optional(),
        ));
    }
    fields
}

/// `<M>ArgsSchema`: what a single-relation selection nests.
pub fn build_args(entity: &Entity) -> Fragment {
    Fragment::new(
        naming::entity_schema(&entity.name, "Args"),
        ZodExpr::strict_object(select_and_include(entity)),
    )
}

/// Relation-count selection, for entities owning a list relation.
pub fn build_count_output(ctx: &BuildContext<'_>, entity: &Entity) -> Vec<Fragment> {
    if !entity.owns_list_relation() {
        return Vec::new();
    }
    let select_name = naming::entity_schema(&entity.name, "CountOutputTypeSelect");
    let fields = entity
        .relation_fields()
        .filter(|field| field.is_list && ctx.edge(entity, field).is_some())
        .map(|field| (field.name.clone(), flag().optional()))
        .collect();

    vec![
        Fragment::new(&select_name, ZodExpr::strict_object(fields)),
        Fragment::new(
            naming::entity_schema(&entity.name, "CountOutputTypeArgs"),
            ZodExpr::strict_object(vec![prop(
                "select",
                ZodExpr::reference(select_name).optional(),
            )]),
        ),
    ]
}
