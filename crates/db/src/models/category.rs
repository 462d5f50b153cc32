//! Category entity model and DTOs.
//!
//! Categories form a self-referential tree through `parent_id`. Deleting a
//! category cascades to its whole subtree.

use catalog_core::category_tree::TreeItem;
use catalog_core::error::CoreError;
use catalog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub parent_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TreeItem for Category {
    fn id(&self) -> DbId {
        self.id
    }

    fn parent_id(&self) -> Option<DbId> {
        self.parent_id
    }
}

/// DTO for creating a category or replacing its name and parent.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<DbId>,
}

/// Result of a transactional category update.
#[derive(Debug)]
pub enum CategoryUpdate {
    Updated(Category),
    /// The category being updated does not exist.
    NotFound,
    /// The requested parent does not exist.
    ParentNotFound(DbId),
    /// The move was refused by the tree rules (a cycle).
    Rejected(CoreError),
}
