//! Zod expression tree and its text rendering.
//!
//! Builders describe schemas as [`ZodExpr`] trees rather than strings. The
//! tree keeps references to other fragments symbolic, so rendering can decide
//! where `z.lazy` is needed from definition order alone, and dependencies can
//! be read back without re-parsing emitted text.

use std::collections::{BTreeSet, HashSet};

/// Leaf schemas of the validation library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prim {
    String,
    Int,
    Number,
    BigInt,
    Boolean,
    Date,
    /// ISO-8601 string.
    IsoDateTime,
    Bytes,
    Any,
    Null,
    True,
}

impl Prim {
    fn render(self) -> &'static str {
        match self {
            Self::String => "z.string()",
            Self::Int => "z.number().int()",
            Self::Number => "z.number()",
            Self::BigInt => "z.bigint()",
            Self::Boolean => "z.boolean()",
            Self::Date => "z.date()",
            Self::IsoDateTime => "z.string().datetime()",
            Self::Bytes => "z.instanceof(Uint8Array)",
            Self::Any => "z.any()",
            Self::Null => "z.null()",
            Self::True => "z.literal(true)",
        }
    }
}

/// An object shape: ordered fields, optionally closed to unknown keys.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectShape {
    pub fields: Vec<(String, ZodExpr)>,
    pub strict: bool,
}

impl ObjectShape {
    pub fn field(&self, name: &str) -> Option<&ZodExpr> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, e)| e)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }
}

/// A schema expression.
#[derive(Debug, Clone, PartialEq)]
pub enum ZodExpr {
    Prim(Prim),
    /// Reference to another fragment by its declared name.
    Ref(String),
    Enum(Vec<String>),
    Object(ObjectShape),
    /// Arms are tried in order; the first that accepts wins.
    Union(Vec<ZodExpr>),
    Array(Box<ZodExpr>),
    Record(Box<ZodExpr>),
    /// May be omitted.
    Optional(Box<ZodExpr>),
    /// May be explicitly null.
    Nullable(Box<ZodExpr>),
    /// May be omitted or null, in one combinator.
    Nullish(Box<ZodExpr>),
}

impl ZodExpr {
    pub fn prim(prim: Prim) -> Self {
        Self::Prim(prim)
    }

    pub fn reference(name: impl Into<String>) -> Self {
        Self::Ref(name.into())
    }

    pub fn enumeration<S: AsRef<str>>(values: &[S]) -> Self {
        Self::Enum(values.iter().map(|v| v.as_ref().to_string()).collect())
    }

    pub fn union(arms: Vec<ZodExpr>) -> Self {
        Self::Union(arms)
    }

    /// Non-strict object, used for read shapes.
    pub fn object(fields: Vec<(String, ZodExpr)>) -> Self {
        Self::Object(ObjectShape { fields, strict: false })
    }

    /// Object that rejects unknown keys, used for every input shape.
    pub fn strict_object(fields: Vec<(String, ZodExpr)>) -> Self {
        Self::Object(ObjectShape { fields, strict: true })
    }

    /// `union([item.array(), item])`. The array arm must come first: an
    /// object arm tried first could accept an array input and lose it.
    pub fn one_or_many(item: ZodExpr) -> Self {
        Self::Union(vec![item.clone().array(), item])
    }

    pub fn array(self) -> Self {
        Self::Array(Box::new(self))
    }

    pub fn record(self) -> Self {
        Self::Record(Box::new(self))
    }

    pub fn optional(self) -> Self {
        Self::Optional(Box::new(self))
    }

    pub fn nullable(self) -> Self {
        Self::Nullable(Box::new(self))
    }

    pub fn nullish(self) -> Self {
        Self::Nullish(Box::new(self))
    }

    /// Every fragment name referenced anywhere in the tree.
    pub fn references(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        self.collect_references(&mut names);
        names
    }

    fn collect_references(&self, names: &mut BTreeSet<String>) {
        match self {
            Self::Prim(_) | Self::Enum(_) => {}
            Self::Ref(name) => {
                names.insert(name.clone());
            }
            Self::Object(shape) => {
                for (_, expr) in &shape.fields {
                    expr.collect_references(names);
                }
            }
            Self::Union(arms) => {
                for arm in arms {
                    arm.collect_references(names);
                }
            }
            Self::Array(inner)
            | Self::Record(inner)
            | Self::Optional(inner)
            | Self::Nullable(inner)
            | Self::Nullish(inner) => inner.collect_references(names),
        }
    }
}

/// A named object property.
pub fn prop(name: &str, expr: ZodExpr) -> (String, ZodExpr) {
    (name.to_string(), expr)
}

/// What is already defined when a fragment is rendered.
pub struct RenderScope<'a> {
    defined: &'a HashSet<String>,
    current: &'a str,
}

impl<'a> RenderScope<'a> {
    pub fn new(defined: &'a HashSet<String>, current: &'a str) -> Self {
        Self { defined, current }
    }

    /// A reference evaluated at definition time would hit an undefined
    /// binding: self-references and anything declared later.
    fn is_forward(&self, name: &str) -> bool {
        name == self.current || !self.defined.contains(name)
    }

    /// Whether `expr` contains a forward reference.
    pub fn needs_deferral(&self, expr: &ZodExpr) -> bool {
        expr.references().iter().any(|name| self.is_forward(name))
    }

    /// Renders a fragment body. A top-level object is laid out one field per
    /// line; everything nested is rendered inline.
    pub fn render_body(&self, expr: &ZodExpr) -> String {
        match expr {
            ZodExpr::Object(shape) => self.render_object(shape, false, true),
            other => self.render(other, false),
        }
    }

    /// Renders `expr`. Inside a deferral (`in_lazy`) nothing is deferred
    /// again; outside, the smallest reference/array/union/record node holding
    /// a forward reference is wrapped in `z.lazy`.
    fn render(&self, expr: &ZodExpr, in_lazy: bool) -> String {
        if !in_lazy && is_deferrable(expr) && self.needs_deferral(expr) {
            return format!("z.lazy(() => {})", self.render(expr, true));
        }

        match expr {
            ZodExpr::Prim(prim) => prim.render().to_string(),
            ZodExpr::Ref(name) => name.clone(),
            ZodExpr::Enum(values) => {
                let quoted: Vec<String> = values.iter().map(|v| quote(v)).collect();
                format!("z.enum([{}])", quoted.join(", "))
            }
            ZodExpr::Object(shape) => self.render_object(shape, in_lazy, false),
            ZodExpr::Union(arms) => {
                let arms: Vec<String> = arms.iter().map(|a| self.render(a, in_lazy)).collect();
                format!("z.union([{}])", arms.join(", "))
            }
            ZodExpr::Array(inner) => format!("{}.array()", self.render(inner, in_lazy)),
            ZodExpr::Record(inner) => format!("z.record({})", self.render(inner, in_lazy)),
            ZodExpr::Optional(inner) => format!("{}.optional()", self.render(inner, in_lazy)),
            ZodExpr::Nullable(inner) => format!("{}.nullable()", self.render(inner, in_lazy)),
            ZodExpr::Nullish(inner) => format!("{}.nullish()", self.render(inner, in_lazy)),
        }
    }

    fn render_object(&self, shape: &ObjectShape, in_lazy: bool, multiline: bool) -> String {
        let suffix = if shape.strict { ".strict()" } else { "" };

        if shape.fields.is_empty() {
            return format!("z.object({{}}){}", suffix);
        }

        let fields: Vec<String> = shape
            .fields
            .iter()
            .map(|(name, expr)| format!("{}: {}", property_key(name), self.render(expr, in_lazy)))
            .collect();

        if multiline {
            let mut out = String::from("z.object({\n");
            for field in fields {
                out.push_str("  ");
                out.push_str(&field);
                out.push_str(",\n");
            }
            out.push_str("})");
            out.push_str(suffix);
            out
        } else {
            format!("z.object({{ {} }}){}", fields.join(", "), suffix)
        }
    }
}

/// Node kinds a deferral may wrap. Objects are never wrapped whole (their
/// fields are), and modifiers stay outside the deferral.
fn is_deferrable(expr: &ZodExpr) -> bool {
    matches!(
        expr,
        ZodExpr::Ref(_) | ZodExpr::Union(_) | ZodExpr::Array(_) | ZodExpr::Record(_)
    )
}

fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

fn property_key(name: &str) -> String {
    let mut chars = name.chars();
    let is_identifier = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if is_identifier {
        name.to_string()
    } else {
        quote(name)
    }
}

/// Renders an expression that references nothing undefined, e.g. a type
/// mapping on its own.
pub fn render_standalone(expr: &ZodExpr) -> String {
    let defined: HashSet<String> = expr.references().into_iter().collect();
    RenderScope::new(&defined, "").render(expr, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, expr: ZodExpr) -> (String, ZodExpr) {
        (name.to_string(), expr)
    }

    #[test]
    fn test_modifiers() {
        let expr = ZodExpr::prim(Prim::String).nullable().optional();
        assert_eq!(render_standalone(&expr), "z.string().nullable().optional()");
        let expr = ZodExpr::prim(Prim::Int).nullish();
        assert_eq!(render_standalone(&expr), "z.number().int().nullish()");
    }

    #[test]
    fn test_one_or_many_puts_array_first() {
        let expr = ZodExpr::one_or_many(ZodExpr::reference("ItemSchema"));
        assert_eq!(
            render_standalone(&expr),
            "z.union([ItemSchema.array(), ItemSchema])"
        );
    }

    #[test]
    fn test_self_reference_is_deferred_once() {
        let defined = HashSet::new();
        let scope = RenderScope::new(&defined, "NodeWhereInputSchema");
        let body = ZodExpr::strict_object(vec![
            field(
                "AND",
                ZodExpr::one_or_many(ZodExpr::reference("NodeWhereInputSchema")).optional(),
            ),
            field("name", ZodExpr::prim(Prim::String).optional()),
        ]);
        let rendered = scope.render_body(&body);
        assert_eq!(
            rendered,
            "z.object({\n  AND: z.lazy(() => z.union([NodeWhereInputSchema.array(), NodeWhereInputSchema])).optional(),\n  name: z.string().optional(),\n}).strict()"
        );
        assert_eq!(rendered.matches("z.lazy").count(), 1);
    }

    #[test]
    fn test_defined_reference_is_direct() {
        let mut defined = HashSet::new();
        defined.insert("StringFilterSchema".to_string());
        let scope = RenderScope::new(&defined, "AccountWhereInputSchema");
        let expr = ZodExpr::union(vec![
            ZodExpr::reference("StringFilterSchema"),
            ZodExpr::prim(Prim::String),
        ])
        .optional();
        assert!(!scope.needs_deferral(&expr));
        assert_eq!(
            scope.render(&expr, false),
            "z.union([StringFilterSchema, z.string()]).optional()"
        );
    }

    #[test]
    fn test_inline_object_and_enum() {
        let expr = ZodExpr::strict_object(vec![
            field("id", ZodExpr::prim(Prim::Int)),
            field("kind", ZodExpr::enumeration(&["a", "it's"])),
        ]);
        assert_eq!(
            render_standalone(&ZodExpr::union(vec![expr.clone(), expr])),
            "z.union([z.object({ id: z.number().int(), kind: z.enum(['a', 'it\\'s']) }).strict(), z.object({ id: z.number().int(), kind: z.enum(['a', 'it\\'s']) }).strict()])"
        );
    }

    #[test]
    fn test_property_keys() {
        assert_eq!(property_key("_count"), "_count");
        assert_eq!(property_key("first name"), "'first name'");
        assert_eq!(property_key("2fa"), "'2fa'");
    }

    #[test]
    fn test_references() {
        let expr = ZodExpr::strict_object(vec![
            field("a", ZodExpr::reference("ASchema").optional()),
            field("b", ZodExpr::one_or_many(ZodExpr::reference("BSchema"))),
        ]);
        let refs: Vec<String> = expr.references().into_iter().collect();
        assert_eq!(refs, vec!["ASchema".to_string(), "BSchema".to_string()]);
    }
}
