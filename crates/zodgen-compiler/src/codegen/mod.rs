//! Zod schema generation from the data-model IR.
//!
//! Generation runs in fixed passes, each producing one section of the output:
//! - Shared primitives (sort order, match mode, null ordering, JSON values)
//! - Enums, scalar-field enumerations and base shapes
//! - Filters, ordering and selection
//! - Create/update inputs and the nested families of every relation edge
//! - Aggregate inputs and operation arguments
//!
//! Builders never read each other's output; they cross-reference by fragment
//! name only, and the document check at the end makes sure every name they
//! used was emitted.

mod aggregate;
mod args;
mod context;
mod create;
mod enums;
mod filter;
mod fragment;
mod model;
mod naming;
mod nested;
mod preamble;
mod scalar_filters;
mod select;
mod sort;
mod unique;
mod update;
mod zod;
mod zod_types;

#[cfg(test)]
mod fixtures;
#[cfg(test)]
mod sim;

pub use context::BuildContext;
pub use fragment::{Document, Fragment, Section};
pub use zod::{ObjectShape, Prim, ZodExpr};
pub use zod_types::map_type;

use crate::analysis::Analysis;
use crate::diagnostic::CompilerError;
use crate::ir::DataModel;

/// The generated source file.
#[derive(Debug, Clone)]
pub struct GeneratedCode {
    /// Full text of the output file.
    pub source: String,
    /// Number of schema declarations in it.
    pub fragments: usize,
}

/// Generates the schema file for `model`.
pub fn generate(model: &DataModel) -> Result<GeneratedCode, CompilerError> {
    let document = build_document(model);

    if let Some((referrer, missing)) = document.unresolved_references().into_iter().next() {
        return Err(CompilerError::CodegenFailed {
            message: format!("{} references {}, which was never emitted", referrer, missing),
        });
    }

    Ok(GeneratedCode {
        source: document.render(),
        fragments: document.len(),
    })
}

/// Runs every pass and assembles the ordered document without rendering it.
pub fn build_document(model: &DataModel) -> Document {
    let analysis = Analysis::run(model);
    let ctx = BuildContext::new(model, &analysis);

    let mut document = Document::new();
    document.push_section("Shared primitives", preamble::build_preamble(&ctx));
    document.push_section("Enums and models", models_pass(&ctx));
    document.push_section("Filters, ordering and selection", queries_pass(&ctx));
    document.push_section("Create and update inputs", inputs_pass(&ctx));
    document.push_section("Operation arguments", arguments_pass(&ctx));

    tracing::debug!(fragments = document.len(), "built schema document");
    document
}

fn models_pass(ctx: &BuildContext<'_>) -> Vec<Fragment> {
    let mut fragments: Vec<Fragment> = ctx.model.enums.iter().map(enums::build_enum_schema).collect();
    for entity in &ctx.model.entities {
        fragments.push(model::build_scalar_field_enum(entity));
        fragments.push(model::build_base_schema(entity));
    }
    fragments
}

fn queries_pass(ctx: &BuildContext<'_>) -> Vec<Fragment> {
    let mut fragments = scalar_filters::build_scalar_filters(ctx.facts);
    for def in &ctx.model.enums {
        fragments.extend(enums::build_enum_filters(def, ctx.facts.enum_usage(&def.name)));
    }

    for entity in &ctx.model.entities {
        fragments.push(filter::build_where_input(entity));
        fragments.push(unique::build_where_unique(entity));
        fragments.extend(filter::build_relation_filters(ctx, entity));
        fragments.extend(filter::build_scalar_where(ctx, entity));
        fragments.push(filter::build_scalar_where_with_aggregates(entity));

        fragments.push(sort::build_order_by_with_relation(entity));
        fragments.extend(sort::build_order_by_relation_aggregate(ctx, entity));
        fragments.extend(sort::build_order_by_aggregates(entity));
        fragments.push(sort::build_order_by_with_aggregation(entity));

        fragments.push(select::build_select(entity));
        fragments.extend(select::build_include(entity));
        fragments.push(select::build_args(entity));
        fragments.extend(select::build_count_output(ctx, entity));
    }
    fragments
}

fn inputs_pass(ctx: &BuildContext<'_>) -> Vec<Fragment> {
    let mut fragments = scalar_filters::build_update_operations(ctx.facts);
    for def in &ctx.model.enums {
        fragments.extend(enums::build_enum_update_operations(
            def,
            ctx.facts.enum_usage(&def.name),
        ));
    }

    for entity in &ctx.model.entities {
        fragments.extend(create::build_create_inputs(ctx, entity));
        fragments.extend(update::build_update_inputs(ctx, entity));
    }
    for entity in &ctx.model.entities {
        for field in entity.relation_fields() {
            fragments.extend(nested::build_edge_families(ctx, entity, field));
        }
    }
    fragments
}

fn arguments_pass(ctx: &BuildContext<'_>) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    for entity in &ctx.model.entities {
        fragments.extend(aggregate::build_aggregate_inputs(entity));
        fragments.extend(args::build_operation_args(entity));
    }
    fragments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{EnumDef, Entity, Field, ScalarType};
    use fixtures::workspace_model;

    #[test]
    fn test_every_reference_resolves() {
        let document = build_document(&workspace_model());
        assert_eq!(document.unresolved_references(), Vec::new());
    }

    #[test]
    fn test_generate_renders_sections_in_order() {
        let code = generate(&workspace_model()).unwrap();
        let position = |needle: &str| code.source.find(needle).unwrap();
        assert!(position("// SHARED PRIMITIVES") < position("// ENUMS AND MODELS"));
        assert!(position("// ENUMS AND MODELS") < position("// FILTERS, ORDERING AND SELECTION"));
        assert!(position("// FILTERS, ORDERING AND SELECTION") < position("// CREATE AND UPDATE INPUTS"));
        assert!(position("// CREATE AND UPDATE INPUTS") < position("// OPERATION ARGUMENTS"));
        assert_eq!(code.source.matches("export const ").count(), code.fragments);
    }

    #[test]
    fn test_json_value_only_when_used() {
        let model = DataModel::new(
            vec![Entity::new("Note", vec![Field::scalar("id", ScalarType::String).id()])],
            vec![],
        );
        let code = generate(&model).unwrap();
        assert!(!code.source.contains("JsonValueSchema"));
        let source = generate(&workspace_model()).unwrap().source;
        assert!(source.contains("export const JsonValueSchema: z.ZodTypeAny = z.lazy(() => z.union(["));
        assert!(source.contains(
            "export const InputJsonValueSchema = z.union([z.string(), z.number(), z.boolean(), JsonValueSchema.array(), z.record(JsonValueSchema)]);\n"
        ));
    }

    #[test]
    fn test_self_referencing_where_input_is_deferred() {
        let code = generate(&workspace_model()).unwrap();
        assert!(code.source.contains(
            "export const CategoryWhereInputSchema: z.ZodTypeAny = z.object({\n  AND: z.lazy(() => z.union([CategoryWhereInputSchema.array(), CategoryWhereInputSchema])).optional(),"
        ));
    }

    #[test]
    fn test_unused_enum_gets_no_filters() {
        let mut model = workspace_model();
        model.enums.push(EnumDef::new("Unused", &["A"]));
        let document = build_document(&model);
        assert!(document.contains("UnusedSchema"));
        assert!(!document.contains("EnumUnusedFilterSchema"));
        assert!(!document.contains("EnumUnusedNullableFilterSchema"));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let first = generate(&workspace_model()).unwrap();
        let second = generate(&workspace_model()).unwrap();
        assert_eq!(first.source, second.source);
    }
}
