//! Fragments and the ordered document they are assembled into.

use std::collections::{BTreeSet, HashSet};

use super::zod::{RenderScope, ZodExpr};

/// One named schema declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub name: String,
    pub schema: ZodExpr,
}

impl Fragment {
    pub fn new(name: impl Into<String>, schema: ZodExpr) -> Self {
        Self {
            name: name.into(),
            schema,
        }
    }

    /// Names of the other fragments this one references.
    pub fn dependencies(&self) -> BTreeSet<String> {
        let mut deps = self.schema.references();
        deps.remove(&self.name);
        deps
    }
}

/// A titled run of fragments, one per generation pass.
#[derive(Debug, Clone, Default)]
pub struct Section {
    pub title: String,
    pub fragments: Vec<Fragment>,
}

/// The whole output, in emission order.
#[derive(Debug, Clone, Default)]
pub struct Document {
    sections: Vec<Section>,
    names: HashSet<String>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a section. Fragments whose name is already taken are dropped;
    /// the first declaration wins.
    pub fn push_section(&mut self, title: &str, fragments: Vec<Fragment>) {
        let mut kept = Vec::with_capacity(fragments.len());
        for fragment in fragments {
            if self.names.insert(fragment.name.clone()) {
                kept.push(fragment);
            } else {
                tracing::warn!(fragment = %fragment.name, "dropping duplicate fragment");
            }
        }
        tracing::debug!(section = title, fragments = kept.len(), "assembled section");
        self.sections.push(Section {
            title: title.to_string(),
            fragments: kept,
        });
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn fragments(&self) -> impl Iterator<Item = &Fragment> {
        self.sections.iter().flat_map(|s| s.fragments.iter())
    }

    pub fn fragment(&self, name: &str) -> Option<&Fragment> {
        self.fragments().find(|f| f.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// References to names no fragment declares, as `(referrer, missing)`.
    pub fn unresolved_references(&self) -> Vec<(String, String)> {
        let mut missing = Vec::new();
        for fragment in self.fragments() {
            for dep in fragment.dependencies() {
                if !self.names.contains(&dep) {
                    missing.push((fragment.name.clone(), dep));
                }
            }
        }
        missing
    }

    /// Renders the document as one source file.
    pub fn render(&self) -> String {
        let mut output = String::new();
        output.push_str("/* eslint-disable */\n");
        output.push_str("// Generated by zodgen. Do not edit by hand.\n");
        output.push_str("import { z } from 'zod';\n");

        let mut defined: HashSet<String> = HashSet::new();
        for section in &self.sections {
            if section.fragments.is_empty() {
                continue;
            }
            output.push('\n');
            output.push_str(&"/".repeat(48));
            output.push('\n');
            output.push_str(&format!("// {}\n", section.title.to_uppercase()));
            output.push_str(&"/".repeat(48));
            output.push('\n');

            for fragment in &section.fragments {
                output.push('\n');
                output.push_str(&render_fragment(fragment, &defined));
                defined.insert(fragment.name.clone());
            }
        }

        output
    }
}

/// Renders one declaration given the names defined before it. Declarations
/// holding a deferral are annotated so the type checker does not have to
/// infer through the cycle.
fn render_fragment(fragment: &Fragment, defined: &HashSet<String>) -> String {
    let scope = RenderScope::new(defined, &fragment.name);
    let annotation = if scope.needs_deferral(&fragment.schema) {
        ": z.ZodTypeAny"
    } else {
        ""
    };
    format!(
        "export const {}{} = {};\n",
        fragment.name,
        annotation,
        scope.render_body(&fragment.schema)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::zod::Prim;

    fn node_where() -> Fragment {
        Fragment::new(
            "NodeWhereInputSchema",
            ZodExpr::strict_object(vec![
                (
                    "parent".to_string(),
                    ZodExpr::reference("NodeWhereInputSchema").optional(),
                ),
                ("name".to_string(), ZodExpr::reference("StringFilterSchema").optional()),
            ]),
        )
    }

    #[test]
    fn test_dependencies_exclude_self() {
        let deps: Vec<String> = node_where().dependencies().into_iter().collect();
        assert_eq!(deps, vec!["StringFilterSchema".to_string()]);
    }

    #[test]
    fn test_duplicates_dropped() {
        let mut doc = Document::new();
        doc.push_section("a", vec![node_where()]);
        doc.push_section("b", vec![node_where()]);
        assert_eq!(doc.len(), 1);
        assert!(doc.sections()[1].fragments.is_empty());
    }

    #[test]
    fn test_unresolved_references() {
        let mut doc = Document::new();
        doc.push_section("filters", vec![node_where()]);
        assert_eq!(
            doc.unresolved_references(),
            vec![("NodeWhereInputSchema".to_string(), "StringFilterSchema".to_string())]
        );
    }

    #[test]
    fn test_render_annotates_and_defers_forward_references() {
        let mut doc = Document::new();
        doc.push_section(
            "filters",
            vec![
                Fragment::new(
                    "StringFilterSchema",
                    ZodExpr::strict_object(vec![(
                        "equals".to_string(),
                        ZodExpr::prim(Prim::String).optional(),
                    )]),
                ),
                node_where(),
            ],
        );
        let source = doc.render();
        assert!(source.starts_with("/* eslint-disable */\n"));
        assert!(source.contains("import { z } from 'zod';"));
        assert!(source.contains("// FILTERS\n"));
        assert!(source.contains("export const StringFilterSchema = z.object({\n  equals: z.string().optional(),\n}).strict();\n"));
        assert!(source.contains("export const NodeWhereInputSchema: z.ZodTypeAny = z.object({\n  parent: z.lazy(() => NodeWhereInputSchema).optional(),\n  name: StringFilterSchema.optional(),\n}).strict();\n"));
    }
}
