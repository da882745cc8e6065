//! Catalog listings printed to stdout.

use std::io::{self, Write};

use artisan_market_core::filter::{category_title, filter_by_category};
use artisan_market_core::{ArtisanProfile, CatalogProduct};
use artisan_market_storefront::catalog::Catalog;

/// Print the artisan listing for `category`.
///
/// # Errors
///
/// Returns an error if stdout cannot be written.
pub async fn artisans(catalog: &Catalog, category: Option<&str>) -> io::Result<()> {
    let artisans = catalog.artisans().await;
    let matched = filter_by_category(category, &artisans);
    write_artisans(&mut io::stdout().lock(), &category_title(category), &matched)
}

/// Print every product with its artisan.
///
/// # Errors
///
/// Returns an error if stdout cannot be written.
pub async fn products(catalog: &Catalog) -> io::Result<()> {
    write_products(&mut io::stdout().lock(), &catalog.products().await)
}

pub(crate) fn write_artisans(out: &mut impl Write, title: &str, artisans: &[&ArtisanProfile]) -> io::Result<()> {
    writeln!(out, "{title} ({})", artisans.len())?;
    for artisan in artisans {
        write!(out, "  {:<24} {}", artisan.name, artisan.craft_type)?;
        if let Some(location) = &artisan.location {
            write!(out, " - {location}")?;
        }
        writeln!(out, "  [{}]", artisan.id)?;
    }
    Ok(())
}

fn write_products(out: &mut impl Write, products: &[CatalogProduct]) -> io::Result<()> {
    writeln!(out, "Products ({})", products.len())?;
    for item in products {
        let marker = if item.product.is_new { " (new)" } else { "" };
        writeln!(
            out,
            "  {:<28} {:>10}  by {} [{}]{marker}",
            item.product.title,
            item.product.price.display(),
            item.artisan_name,
            item.artisan_id,
        )?;
    }
    Ok(())
}
