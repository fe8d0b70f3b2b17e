//! Field-level intermediate representation.

use std::fmt;

/// Primitive type tags a scalar field can carry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScalarType {
    String,
    Int,
    Float,
    BigInt,
    Decimal,
    Boolean,
    DateTime,
    Json,
    Bytes,
    /// A tag the generator does not recognize. Kept verbatim for diagnostics.
    Unrecognized(String),
}

impl ScalarType {
    /// Parses a host type tag. Unknown tags become [`ScalarType::Unrecognized`].
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "String" => Self::String,
            "Int" => Self::Int,
            "Float" => Self::Float,
            "BigInt" => Self::BigInt,
            "Decimal" => Self::Decimal,
            "Boolean" => Self::Boolean,
            "DateTime" => Self::DateTime,
            "Json" => Self::Json,
            "Bytes" => Self::Bytes,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    /// Prefix used when naming shared per-type fragments (`StringFilter`,
    /// `BoolFieldUpdateOperationsInput`, ...). `None` for unrecognized tags,
    /// which never get shared fragments.
    pub fn fragment_prefix(&self) -> Option<&'static str> {
        match self {
            Self::String => Some("String"),
            Self::Int => Some("Int"),
            Self::Float => Some("Float"),
            Self::BigInt => Some("BigInt"),
            Self::Decimal => Some("Decimal"),
            Self::Boolean => Some("Bool"),
            Self::DateTime => Some("DateTime"),
            Self::Json => Some("Json"),
            Self::Bytes => Some("Bytes"),
            Self::Unrecognized(_) => None,
        }
    }

    /// Integer, float, bigint and decimal: the types that take arithmetic
    /// update operations and appear in avg/sum aggregates.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Int | Self::Float | Self::BigInt | Self::Decimal)
    }

    /// Types that support ordering comparisons (lt/gt) and min/max.
    pub fn is_comparable(&self) -> bool {
        !matches!(self, Self::Json | Self::Unrecognized(_))
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unrecognized(tag) => write!(f, "{}", tag),
            Self::Boolean => write!(f, "Boolean"),
            other => write!(f, "{}", other.fragment_prefix().unwrap_or_default()),
        }
    }
}

/// A relation field's link to another entity.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationRef {
    /// Target entity name.
    pub target: String,
    /// Relation-name tag pairing the two sides of one logical relationship.
    pub name: String,
    /// Local scalar fields storing the foreign key. Empty on the side that
    /// does not hold the key.
    pub from_fields: Vec<String>,
}

/// What a field holds.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Scalar(ScalarType),
    /// Name of the enum.
    Enum(String),
    Relation(RelationRef),
}

/// A single entity field.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub kind: FieldKind,
    pub is_required: bool,
    pub is_list: bool,
    pub has_default: bool,
    pub is_id: bool,
    pub is_unique: bool,
    /// Set automatically by the host on every write.
    pub is_updated_at: bool,
}

/// How a field is used, for usage bookkeeping and shape selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Multiplicity {
    Required,
    Nullable,
    List,
}

impl Field {
    pub fn scalar(name: &str, typ: ScalarType) -> Self {
        Self::new(name, FieldKind::Scalar(typ))
    }

    pub fn enumeration(name: &str, enum_name: &str) -> Self {
        Self::new(name, FieldKind::Enum(enum_name.to_string()))
    }

    pub fn relation(name: &str, target: &str, relation_name: &str) -> Self {
        Self::new(
            name,
            FieldKind::Relation(RelationRef {
                target: target.to_string(),
                name: relation_name.to_string(),
                from_fields: Vec::new(),
            }),
        )
    }

    fn new(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            is_required: true,
            is_list: false,
            has_default: false,
            is_id: false,
            is_unique: false,
            is_updated_at: false,
        }
    }

    pub fn optional(mut self) -> Self {
        self.is_required = false;
        self
    }

    pub fn list(mut self) -> Self {
        self.is_list = true;
        self
    }

    pub fn id(mut self) -> Self {
        self.is_id = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.is_unique = true;
        self
    }

    pub fn with_default(mut self) -> Self {
        self.has_default = true;
        self
    }

    pub fn updated_at(mut self) -> Self {
        self.is_updated_at = true;
        self
    }

    /// Sets the foreign-key storage fields of a relation field.
    pub fn references(mut self, from_fields: &[&str]) -> Self {
        if let FieldKind::Relation(rel) = &mut self.kind {
            rel.from_fields = from_fields.iter().map(|f| f.to_string()).collect();
        }
        self
    }

    pub fn multiplicity(&self) -> Multiplicity {
        if self.is_list {
            Multiplicity::List
        } else if self.is_required {
            Multiplicity::Required
        } else {
            Multiplicity::Nullable
        }
    }

    pub fn relation_ref(&self) -> Option<&RelationRef> {
        match &self.kind {
            FieldKind::Relation(rel) => Some(rel),
            _ => None,
        }
    }

    pub fn is_relation(&self) -> bool {
        matches!(self.kind, FieldKind::Relation(_))
    }

    pub fn scalar_type(&self) -> Option<&ScalarType> {
        match &self.kind {
            FieldKind::Scalar(typ) => Some(typ),
            _ => None,
        }
    }

    /// Whether a create payload may leave this field out.
    pub fn is_omittable_on_create(&self) -> bool {
        self.is_list || !self.is_required || self.has_default || self.is_updated_at
    }
}
