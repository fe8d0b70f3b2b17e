//! Conversion from the DMMF serde model to the IR.

use crate::ir::{
    CompoundKey, DataModel, Entity, EnumDef, Field, FieldKind, RelationRef, ScalarType,
};
use super::dmmf::{Datamodel, DmmfField, DmmfFieldKind, Model};

/// Converts a parsed datamodel into the IR.
pub fn datamodel_to_ir(datamodel: Datamodel) -> DataModel {
    let entities = datamodel.models.into_iter().map(model_to_entity).collect();
    let enums = datamodel
        .enums
        .into_iter()
        .map(|e| EnumDef {
            name: e.name,
            values: e.values.into_iter().map(|v| v.name).collect(),
        })
        .collect();

    DataModel { entities, enums }
}

fn model_to_entity(model: Model) -> Entity {
    let fields = model
        .fields
        .into_iter()
        .map(|field| field_to_ir(&model.name, field))
        .collect();

    let primary_key = model.primary_key.map(|pk| CompoundKey {
        name: pk.name,
        fields: pk.fields,
    });

    // uniqueIndexes carries names; uniqueFields is the older, nameless form.
    let compound_uniques = if model.unique_indexes.is_empty() {
        model
            .unique_fields
            .into_iter()
            .map(|fields| CompoundKey { name: None, fields })
            .collect()
    } else {
        model
            .unique_indexes
            .into_iter()
            .map(|idx| CompoundKey {
                name: idx.name,
                fields: idx.fields,
            })
            .collect()
    };

    Entity {
        name: model.name,
        fields,
        primary_key,
        compound_uniques,
    }
}

fn field_to_ir(entity: &str, field: DmmfField) -> Field {
    let kind = match field.kind {
        DmmfFieldKind::Scalar => {
            let typ = ScalarType::from_tag(&field.typ);
            if let ScalarType::Unrecognized(tag) = &typ {
                tracing::warn!(
                    entity,
                    field = %field.name,
                    tag = %tag,
                    "unrecognized scalar type, generated schemas will accept any value"
                );
            }
            FieldKind::Scalar(typ)
        }
        DmmfFieldKind::Unsupported => {
            tracing::warn!(
                entity,
                field = %field.name,
                tag = %field.typ,
                "unsupported field type, generated schemas will accept any value"
            );
            FieldKind::Scalar(ScalarType::Unrecognized(field.typ.clone()))
        }
        DmmfFieldKind::Enum => FieldKind::Enum(field.typ.clone()),
        DmmfFieldKind::Object => FieldKind::Relation(RelationRef {
            target: field.typ.clone(),
            name: field.relation_name.clone().unwrap_or_default(),
            from_fields: field.relation_from_fields.clone().unwrap_or_default(),
        }),
    };

    Field {
        name: field.name,
        kind,
        // The host marks list fields required; keep list-ness authoritative.
        is_required: field.is_required || field.is_list,
        is_list: field.is_list,
        has_default: field.has_default_value,
        is_id: field.is_id,
        is_unique: field.is_unique,
        is_updated_at: field.is_updated_at,
    }
}
