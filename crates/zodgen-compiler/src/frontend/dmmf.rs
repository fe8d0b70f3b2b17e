//! Serde model of the host's DMMF datamodel document.
//!
//! Only the parts the generator reads are modeled; everything else in the
//! document is ignored.

use serde::Deserialize;

/// Either the full DMMF document or just its `datamodel` member.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum DmmfDocument {
    Full { datamodel: Datamodel },
    Bare(Datamodel),
}

impl DmmfDocument {
    pub fn into_datamodel(self) -> Datamodel {
        match self {
            Self::Full { datamodel } => datamodel,
            Self::Bare(datamodel) => datamodel,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Datamodel {
    pub models: Vec<Model>,
    #[serde(default)]
    pub enums: Vec<DmmfEnum>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub name: String,
    pub fields: Vec<DmmfField>,
    #[serde(default)]
    pub primary_key: Option<KeyDef>,
    #[serde(default)]
    pub unique_fields: Vec<Vec<String>>,
    #[serde(default)]
    pub unique_indexes: Vec<KeyDef>,
}

/// A compound key: primary key or unique index.
#[derive(Debug, Deserialize)]
pub struct KeyDef {
    #[serde(default)]
    pub name: Option<String>,
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DmmfFieldKind {
    Scalar,
    Object,
    Enum,
    Unsupported,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DmmfField {
    pub name: String,
    pub kind: DmmfFieldKind,
    #[serde(rename = "type")]
    pub typ: String,
    #[serde(default)]
    pub is_list: bool,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub is_unique: bool,
    #[serde(default)]
    pub is_id: bool,
    #[serde(default)]
    pub has_default_value: bool,
    #[serde(default)]
    pub is_updated_at: bool,
    #[serde(default)]
    pub relation_name: Option<String>,
    #[serde(default)]
    pub relation_from_fields: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct DmmfEnum {
    pub name: String,
    pub values: Vec<DmmfEnumValue>,
}

#[derive(Debug, Deserialize)]
pub struct DmmfEnumValue {
    pub name: String,
}
