//! Entity intermediate representation.

use super::field::{Field, FieldKind};

/// A unique or identifier constraint usable for single-record lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct UniqueConstraint {
    /// Key the lookup shape uses: the field name for single-field
    /// constraints, the constraint name (or fields joined with `_`) otherwise.
    pub key: String,
    pub fields: Vec<String>,
}

impl UniqueConstraint {
    pub fn is_compound(&self) -> bool {
        self.fields.len() > 1
    }
}

/// A compound constraint as declared by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundKey {
    pub name: Option<String>,
    pub fields: Vec<String>,
}

impl CompoundKey {
    pub fn new(fields: &[&str]) -> Self {
        Self {
            name: None,
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }

    fn lookup_key(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.fields.join("_"))
    }
}

/// One data-model entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub name: String,
    /// Fields in declaration order.
    pub fields: Vec<Field>,
    /// Compound primary key, when the identifier spans several fields.
    pub primary_key: Option<CompoundKey>,
    /// Compound unique constraints.
    pub compound_uniques: Vec<CompoundKey>,
}

impl Entity {
    pub fn new(name: &str, fields: Vec<Field>) -> Self {
        Self {
            name: name.to_string(),
            fields,
            primary_key: None,
            compound_uniques: Vec::new(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Scalar and enum fields, in declaration order.
    pub fn value_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| !f.is_relation())
    }

    pub fn relation_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.is_relation())
    }

    pub fn has_relations(&self) -> bool {
        self.relation_fields().next().is_some()
    }

    pub fn owns_list_relation(&self) -> bool {
        self.relation_fields().any(|f| f.is_list)
    }

    /// Scalar fields that back some relation of this entity.
    pub fn foreign_key_fields(&self) -> Vec<&str> {
        self.relation_fields()
            .filter_map(|f| f.relation_ref())
            .flat_map(|rel| rel.from_fields.iter().map(String::as_str))
            .collect()
    }

    pub fn is_foreign_key(&self, field_name: &str) -> bool {
        self.foreign_key_fields().contains(&field_name)
    }

    /// Non-list numeric scalar fields.
    pub fn numeric_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| {
            !f.is_list && f.scalar_type().is_some_and(|typ| typ.is_numeric())
        })
    }

    pub fn has_numeric_fields(&self) -> bool {
        self.numeric_fields().next().is_some()
    }

    /// Non-list scalar and enum fields that support min/max.
    pub fn comparable_fields(&self) -> impl Iterator<Item = &Field> {
        self.value_fields().filter(|f| {
            !f.is_list
                && match &f.kind {
                    FieldKind::Scalar(typ) => typ.is_comparable(),
                    FieldKind::Enum(_) => true,
                    FieldKind::Relation(_) => false,
                }
        })
    }

    /// Every constraint that identifies one record, identifier first, then
    /// single-field uniques, then compound uniques, in declaration order.
    pub fn unique_constraints(&self) -> Vec<UniqueConstraint> {
        let mut constraints = Vec::new();

        if let Some(pk) = &self.primary_key {
            constraints.push(UniqueConstraint {
                key: pk.lookup_key(),
                fields: pk.fields.clone(),
            });
        }

        for field in self.fields.iter().filter(|f| f.is_id) {
            constraints.push(UniqueConstraint {
                key: field.name.clone(),
                fields: vec![field.name.clone()],
            });
        }

        for field in self.fields.iter().filter(|f| f.is_unique && !f.is_id) {
            constraints.push(UniqueConstraint {
                key: field.name.clone(),
                fields: vec![field.name.clone()],
            });
        }

        for compound in &self.compound_uniques {
            let key = compound.lookup_key();
            if constraints.iter().any(|c| c.key == key) {
                continue;
            }
            constraints.push(UniqueConstraint {
                key,
                fields: compound.fields.clone(),
            });
        }

        constraints
    }
}
