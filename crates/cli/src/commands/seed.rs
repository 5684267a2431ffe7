//! Demo data seeding command.
//!
//! Creates a demo organization with a category hierarchy, home-page
//! sections, and a handful of products. Safe to re-run: it backs off when
//! the demo organization already exists.

use rust_decimal::Decimal;
use serde_json::json;

use luxe_core::{CategoryId, SectionKind, Slug};
use luxe_server::db::categories::NewCategory;
use luxe_server::db::organizations::NewOrganization;
use luxe_server::db::products::NewProduct;
use luxe_server::db::sections::NewSection;
use luxe_server::db::{
    CategoryRepository, OrganizationRepository, ProductRepository, SectionRepository,
};

use super::CommandError;

const DEMO_ORG_NAME: &str = "Luxe Store";
const DEMO_ORG_SLUG: &str = "luxe-store";

/// Top-level categories with their children.
const CATEGORY_TREE: &[(&str, &[&str])] = &[
    ("MEN", &["Shirts", "Pants", "Hoodies", "T-Shirts", "Jackets"]),
    ("WOMEN", &["Dresses", "Tops", "Skirts", "Jeans", "Heels"]),
    ("KIDS", &["Boys Clothing", "Girls Clothing", "Toys", "Shoes"]),
    ("STUDIO", &["New Arrivals", "Collections", "Editorials"]),
];

/// Seed the database with demo data.
///
/// # Errors
///
/// Returns `CommandError` if any write fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = super::connect().await?;
    tracing::info!("Start seeding...");

    let organizations = OrganizationRepository::new(&pool);

    // 1. Demo organization
    if organizations
        .get_by_slug(&Slug::from_raw(DEMO_ORG_SLUG))
        .await?
        .is_some()
    {
        tracing::info!("Demo organization already exists; nothing to do");
        return Ok(());
    }

    let org = organizations
        .create(NewOrganization {
            name: DEMO_ORG_NAME,
            slug: &Slug::from_raw(DEMO_ORG_SLUG),
            business_categories: &[],
            address: None,
            gst_number: None,
            business_registration_cert: None,
            agreement_document: None,
        })
        .await?;
    let org_id = org.organization.id;

    // 2. Category hierarchy; child slugs are prefixed with the parent name
    // to stay unique across the tree
    let categories = CategoryRepository::new(&pool);
    let mut men_shirts: Option<CategoryId> = None;
    let mut women_dresses: Option<CategoryId> = None;

    for (parent_name, children) in CATEGORY_TREE {
        let parent = categories
            .create(NewCategory {
                name: parent_name,
                slug: &Slug::from_title(parent_name),
                image: None,
                parent_id: None,
                organization_id: Some(org_id),
            })
            .await?;

        for child_name in *children {
            let child = categories
                .create(NewCategory {
                    name: child_name,
                    slug: &Slug::from_title(&format!("{parent_name}-{child_name}")),
                    image: None,
                    parent_id: Some(parent.category.id),
                    organization_id: Some(org_id),
                })
                .await?;

            match child.category.slug.as_str() {
                "men-shirts" => men_shirts = Some(child.category.id),
                "women-dresses" => women_dresses = Some(child.category.id),
                _ => {}
            }
        }
    }

    // 3. Home-page sections
    let sections = SectionRepository::new(&pool);
    let section_seeds = [
        (
            "Hero Banner",
            SectionKind::Banner,
            json!({
                "heading": "Summer Collection",
                "subheading": "Discover the latest trends",
                "buttonText": "Shop Now",
                "buttonLink": "/collection/all",
            }),
        ),
        (
            "Trending Now",
            SectionKind::ProductGrid,
            json!({ "limit": 4, "filter": "trending" }),
        ),
        (
            "Best Sellers",
            SectionKind::ProductGrid,
            json!({ "limit": 4, "filter": "best-sellers" }),
        ),
        (
            "Women's Collection",
            SectionKind::CategoryShowcase,
            json!({ "categorySlug": "women", "layout": "grid" }),
        ),
        (
            "Men's Collection",
            SectionKind::CategoryShowcase,
            json!({ "categorySlug": "men", "layout": "grid" }),
        ),
    ];

    for (index, (title, kind, settings)) in section_seeds.iter().enumerate() {
        sections
            .create(NewSection {
                title,
                kind: *kind,
                settings,
                is_enabled: true,
                position: Some(i32::try_from(index).unwrap_or(i32::MAX) + 1),
            })
            .await?;
    }

    // 4. Demo products
    let products = ProductRepository::new(&pool);
    let product_seeds = [
        ("Classic White Shirt", 2999, men_shirts),
        ("Floral Summer Dress", 4999, women_dresses),
        ("Slim Fit Chinos", 3499, men_shirts),
        ("Evening Gown", 8999, women_dresses),
    ];

    for (title, price, category_id) in product_seeds {
        if let Some(category_id) = category_id {
            products
                .create(NewProduct {
                    title,
                    slug: &Slug::from_title(title),
                    description: None,
                    price: Decimal::new(price, 0),
                    compare_at_price: None,
                    images: &[],
                    videos: &[],
                    postal_codes: &[],
                    category_id: Some(category_id),
                    organization_id: Some(org_id),
                })
                .await?;
        }
    }

    tracing::info!("Seeding finished.");
    Ok(())
}
