//! Domain types for the API.
//!
//! These structs map database rows (`sqlx::FromRow`) and serialize to the
//! camelCase wire format the dashboard clients expect.

pub mod category;
pub mod order;
pub mod organization;
pub mod product;
pub mod section;
pub mod user;

pub use category::{Category, CategoryTreeNode, CategoryWithMeta};
pub use order::{Order, OrderItem, OrderWithItems};
pub use organization::{Organization, OrganizationWithCounts};
pub use product::Product;
pub use section::Section;
pub use user::User;
