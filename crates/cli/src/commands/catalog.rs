//! Catalog listing.

use std::io::Write;

use boxpaper_storefront::catalog;

use super::CommandError;

/// Print catalog products, optionally for one category.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn list(category: Option<&str>, out: &mut impl Write) -> Result<(), CommandError> {
    for product in catalog::by_category(category.unwrap_or(catalog::ALL_CATEGORIES)) {
        writeln!(
            out,
            "{:>2}  {:<22} {:<12} {:>6}  {}",
            product.id.as_u32(),
            product.name,
            product.category,
            product.price.to_string(),
            product.badge.as_deref().unwrap_or(""),
        )?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_list_category() {
        let mut out = Vec::new();
        list(Some("Чехлы"), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("Чехол с MagSafe"));
    }
}
