//! Category domain type.

use palengke_core::{CategoryId, CategoryName};

/// An item category (domain type).
///
/// Rows are append-only; the name is the canonical form produced by
/// [`CategoryName::canonicalize`] and is unique across all categories.
#[derive(Debug, Clone)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
}
