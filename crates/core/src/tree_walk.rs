//! MCQ tree traversal: end-of-session checks and next-node resolution.
//!
//! Pre-authored trees can have gaps (an option without a forward link), so
//! the next node is resolved in three tiers:
//!
//! 1. the option's own `next_response_id`, if it points into the same topic
//!    and tree type;
//! 2. a child of the current node one level down;
//! 3. any node of the same topic and tree type one level down.
//!
//! Tiers 2 and 3 are content gaps and are logged at `warn` so they can be
//! fixed at the source. Tier 3 ignores parent linkage entirely.

use async_trait::async_trait;
use serde::Serialize;

use crate::debate::{TreeType, MCQ_MAX_LEVEL, MCQ_MAX_TURNS};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Lookup seam
// ---------------------------------------------------------------------------

/// Read access to the pre-authored response nodes of MCQ trees.
///
/// Implemented over PostgreSQL in the db crate and in memory in tests.
#[async_trait]
pub trait NodeLookup: Send + Sync {
    type Node: Send;
    type Error: Send;

    /// Tier 1: the node `node_id`, only if it belongs to the topic and tree.
    async fn find_in_tree(
        &self,
        node_id: DbId,
        topic_id: DbId,
        tree_type: TreeType,
    ) -> Result<Option<Self::Node>, Self::Error>;

    /// Tier 2: a child of `parent_id` at `level`.
    async fn find_child(
        &self,
        topic_id: DbId,
        tree_type: TreeType,
        parent_id: DbId,
        level: i32,
    ) -> Result<Option<Self::Node>, Self::Error>;

    /// Tier 3: any node of the topic and tree at `level`.
    async fn find_at_level(
        &self,
        topic_id: DbId,
        tree_type: TreeType,
        level: i32,
    ) -> Result<Option<Self::Node>, Self::Error>;
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Where a walk currently stands.
#[derive(Debug, Clone, Copy)]
pub struct TreePosition {
    pub topic_id: DbId,
    pub tree_type: TreeType,
    pub node_id: DbId,
    pub level: i32,
}

/// Which tier produced the next node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolveTier {
    Direct,
    Child,
    LevelFallback,
}

impl ResolveTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Child => "child",
            Self::LevelFallback => "level_fallback",
        }
    }
}

/// Result of next-node resolution.
#[derive(Debug)]
pub enum NextNode<N> {
    Found { node: N, tier: ResolveTier },
    Unresolved,
}

/// Why an MCQ session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    TerminalOption,
    MaxLevel,
    MaxTurns,
    Unresolved,
    /// The resolved node has no options to pick from.
    LeafNode,
}

// ---------------------------------------------------------------------------
// Logic
// ---------------------------------------------------------------------------

/// Decide whether a selection ends the walk before any lookup happens.
///
/// `claimed_turn` is the turn counter after this selection was accepted.
pub fn end_before_lookup(
    option_is_terminal: bool,
    current_level: i32,
    claimed_turn: i32,
) -> Option<EndReason> {
    if option_is_terminal {
        Some(EndReason::TerminalOption)
    } else if current_level >= MCQ_MAX_LEVEL {
        Some(EndReason::MaxLevel)
    } else if claimed_turn >= MCQ_MAX_TURNS {
        Some(EndReason::MaxTurns)
    } else {
        None
    }
}

/// Resolve the node that follows `position` after picking an option whose
/// forward pointer is `next_pointer`.
pub async fn resolve_next_node<L: NodeLookup>(
    lookup: &L,
    position: &TreePosition,
    next_pointer: Option<DbId>,
) -> Result<NextNode<L::Node>, L::Error> {
    let next_level = position.level + 1;

    if let Some(next_id) = next_pointer {
        if let Some(node) = lookup
            .find_in_tree(next_id, position.topic_id, position.tree_type)
            .await?
        {
            tracing::debug!(
                from_node = position.node_id,
                next_id,
                tier = ResolveTier::Direct.as_str(),
                "Resolved next MCQ node"
            );
            return Ok(NextNode::Found {
                node,
                tier: ResolveTier::Direct,
            });
        }
        tracing::warn!(
            from_node = position.node_id,
            next_id,
            tree_type = position.tree_type.as_str(),
            "Option points outside its tree, falling back"
        );
    }

    if let Some(node) = lookup
        .find_child(
            position.topic_id,
            position.tree_type,
            position.node_id,
            next_level,
        )
        .await?
    {
        tracing::warn!(
            from_node = position.node_id,
            level = next_level,
            tier = ResolveTier::Child.as_str(),
            "Option has no forward link, resolved by parent"
        );
        return Ok(NextNode::Found {
            node,
            tier: ResolveTier::Child,
        });
    }

    if let Some(node) = lookup
        .find_at_level(position.topic_id, position.tree_type, next_level)
        .await?
    {
        tracing::warn!(
            from_node = position.node_id,
            topic_id = position.topic_id,
            level = next_level,
            tier = ResolveTier::LevelFallback.as_str(),
            "Resolved next MCQ node by level only"
        );
        return Ok(NextNode::Found {
            node,
            tier: ResolveTier::LevelFallback,
        });
    }

    tracing::warn!(
        from_node = position.node_id,
        topic_id = position.topic_id,
        level = next_level,
        "No next MCQ node, ending session"
    );
    Ok(NextNode::Unresolved)
}
