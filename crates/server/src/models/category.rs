//! Category domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use luxe_core::{CategoryId, OrganizationId, Slug};

/// A category tree node scoped to an organization (or global when
/// `organization_id` is null).
///
/// Deleting a category never cascades to its products; the schema sets
/// `products.category_id` to NULL instead.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique category ID.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Generated unique slug.
    pub slug: Slug,
    /// Hero image URL, if set.
    pub image: Option<String>,
    /// Parent category for nested trees.
    pub parent_id: Option<CategoryId>,
    /// Owning organization; null for global categories.
    pub organization_id: Option<OrganizationId>,
    /// When the category was created.
    pub created_at: DateTime<Utc>,
    /// When the category was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A category with joined metadata for admin listings.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWithMeta {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub category: Category,
    /// Name of the owning organization, if any.
    pub organization_name: Option<String>,
    /// Number of products currently assigned to this category.
    pub product_count: i64,
}

/// A node in the assembled category tree.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTreeNode {
    #[serde(flatten)]
    pub category: Category,
    /// Child categories, recursively.
    pub children: Vec<CategoryTreeNode>,
}

impl CategoryTreeNode {
    /// Assemble a flat category list into a forest of root nodes.
    ///
    /// Children whose parent is missing from the input are treated as roots
    /// rather than dropped.
    #[must_use]
    pub fn build_tree(categories: Vec<Category>) -> Vec<Self> {
        use std::collections::HashMap;

        let known: std::collections::HashSet<CategoryId> =
            categories.iter().map(|c| c.id).collect();

        // Group children under their parent id
        let mut by_parent: HashMap<Option<CategoryId>, Vec<Category>> = HashMap::new();
        for category in categories {
            let key = match category.parent_id {
                Some(parent) if known.contains(&parent) => Some(parent),
                _ => None,
            };
            by_parent.entry(key).or_default().push(category);
        }

        fn attach(
            parent: Option<CategoryId>,
            by_parent: &mut std::collections::HashMap<Option<CategoryId>, Vec<Category>>,
        ) -> Vec<CategoryTreeNode> {
            by_parent
                .remove(&parent)
                .unwrap_or_default()
                .into_iter()
                .map(|category| {
                    let children = attach(Some(category.id), by_parent);
                    CategoryTreeNode { category, children }
                })
                .collect()
        }

        attach(None, &mut by_parent)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn category(name: &str, parent_id: Option<CategoryId>) -> Category {
        Category {
            id: CategoryId::generate(),
            name: name.to_string(),
            slug: Slug::from_title(name),
            image: None,
            parent_id,
            organization_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_build_tree_nests_children() {
        let men = category("MEN", None);
        let shirts = category("Shirts", Some(men.id));
        let pants = category("Pants", Some(men.id));
        let women = category("WOMEN", None);

        let tree = CategoryTreeNode::build_tree(vec![men.clone(), shirts, pants, women]);

        assert_eq!(tree.len(), 2);
        let men_node = tree.iter().find(|n| n.category.id == men.id).unwrap();
        assert_eq!(men_node.children.len(), 2);
    }

    #[test]
    fn test_build_tree_orphan_becomes_root() {
        let orphan = category("Orphan", Some(CategoryId::generate()));
        let tree = CategoryTreeNode::build_tree(vec![orphan]);
        assert_eq!(tree.len(), 1);
        assert!(tree.first().unwrap().children.is_empty());
    }

    #[test]
    fn test_build_tree_deep_nesting() {
        let a = category("A", None);
        let b = category("B", Some(a.id));
        let c = category("C", Some(b.id));

        let tree = CategoryTreeNode::build_tree(vec![a, b, c]);
        assert_eq!(tree.len(), 1);
        let b_node = tree.first().unwrap().children.first().unwrap();
        assert_eq!(b_node.children.len(), 1);
    }
}
