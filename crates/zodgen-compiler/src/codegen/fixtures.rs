//! Data models shared by the builder tests.

use crate::analysis::Analysis;
use crate::ir::{CompoundKey, DataModel, EnumDef, Entity, Field, ScalarType};

use super::context::BuildContext;

/// Accounts own teams; memberships join the two under a compound key;
/// categories form a tree.
pub fn workspace_model() -> DataModel {
    let mut membership = Entity::new(
        "Membership",
        vec![
            Field::scalar("accountId", ScalarType::Int),
            Field::scalar("teamId", ScalarType::Int),
            Field::enumeration("role", "Role").with_default(),
            Field::relation("account", "Account", "AccountMemberships").references(&["accountId"]),
            Field::relation("team", "Team", "TeamMemberships").references(&["teamId"]),
        ],
    );
    membership.primary_key = Some(CompoundKey::new(&["accountId", "teamId"]));

    DataModel::new(
        vec![
            Entity::new(
                "Account",
                vec![
                    Field::scalar("id", ScalarType::Int).id().with_default(),
                    Field::scalar("email", ScalarType::String).unique(),
                    Field::scalar("name", ScalarType::String).optional(),
                    Field::scalar("balance", ScalarType::Decimal).with_default(),
                    Field::scalar("createdAt", ScalarType::DateTime).with_default(),
                    Field::scalar("updatedAt", ScalarType::DateTime).updated_at(),
                    Field::relation("ownedTeams", "Team", "TeamOwner").list(),
                    Field::relation("memberships", "Membership", "AccountMemberships").list(),
                ],
            ),
            Entity::new(
                "Team",
                vec![
                    Field::scalar("id", ScalarType::Int).id().with_default(),
                    Field::scalar("title", ScalarType::String),
                    Field::scalar("tags", ScalarType::String).list(),
                    Field::scalar("settings", ScalarType::Json).optional(),
                    Field::scalar("ownerId", ScalarType::Int),
                    Field::relation("owner", "Account", "TeamOwner").references(&["ownerId"]),
                    Field::relation("memberships", "Membership", "TeamMemberships").list(),
                ],
            ),
            membership,
            Entity::new(
                "Category",
                vec![
                    Field::scalar("id", ScalarType::Int).id().with_default(),
                    Field::scalar("parentId", ScalarType::Int).optional(),
                    Field::relation("parent", "Category", "Tree")
                        .optional()
                        .references(&["parentId"]),
                    Field::relation("children", "Category", "Tree").list(),
                ],
            ),
        ],
        vec![EnumDef::new("Role", &["OWNER", "MEMBER"])],
    )
}

/// Runs the analysis and hands a context over `model` to `f`.
pub fn with_context<R>(model: &DataModel, f: impl FnOnce(&BuildContext<'_>) -> R) -> R {
    let analysis = Analysis::run(model);
    let ctx = BuildContext::new(model, &analysis);
    f(&ctx)
}
