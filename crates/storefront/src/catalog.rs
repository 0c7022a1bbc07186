//! Static product catalog.
//!
//! The shop sells a fixed set of seven products. There is no inventory and no
//! remote catalog; ids are stable and prices are whole rubles.

use std::sync::LazyLock;

use boxpaper_core::{Money, Product, ProductId};

/// Pseudo-category that matches every product.
pub const ALL_CATEGORIES: &str = "Все";

/// Categories in display order, after [`ALL_CATEGORIES`].
const CATEGORIES: [&str; 3] = ["Чехлы", "Стилусы", "Аксессуары"];

const PRODUCT_IMAGE: &str = "https://cdn.poehali.dev/projects/86abe993-0edc-4039-924d-a364b1d0b464/files/ab6b936f-0a8d-4dda-ad1a-253fb7f024ef.jpg";

static PRODUCTS: LazyLock<Vec<Product>> = LazyLock::new(|| {
    vec![
        product(1, "Картхолдер MagSafe", "Аксессуары", 350, Some("Хит")),
        product(2, "Чехол силиконовый", "Чехлы", 500, None),
        product(3, "Чехол с MagSafe", "Чехлы", 500, Some("Новинка")),
        product(4, "Чехол с наклейками", "Чехлы", 500, None),
        product(5, "Стилус Air", "Стилусы", 250, None),
        product(6, "Стилус Pro", "Стилусы", 250, Some("Pro")),
        product(7, "Стилус Ultra", "Стилусы", 250, Some("Premium")),
    ]
});

fn product(id: u32, name: &str, category: &str, price: u64, badge: Option<&str>) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        category: category.to_owned(),
        price: Money::new(price),
        image: PRODUCT_IMAGE.to_owned(),
        badge: badge.map(str::to_owned),
    }
}

/// Every product, in catalog order.
#[must_use]
pub fn products() -> &'static [Product] {
    &PRODUCTS
}

#[must_use]
pub fn find(id: ProductId) -> Option<&'static Product> {
    PRODUCTS.iter().find(|product| product.id == id)
}

/// Category filter values, starting with [`ALL_CATEGORIES`].
#[must_use]
pub fn categories() -> Vec<&'static str> {
    std::iter::once(ALL_CATEGORIES).chain(CATEGORIES).collect()
}

/// Products in `category`. [`ALL_CATEGORIES`] and the empty string match
/// everything; an unknown category matches nothing.
#[must_use]
pub fn by_category(category: &str) -> Vec<&'static Product> {
    let category = category.trim();
    PRODUCTS
        .iter()
        .filter(|product| {
            category.is_empty() || category == ALL_CATEGORIES || product.category == category
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_unique_ids() {
        let mut ids: Vec<u32> = products().iter().map(|p| p.id.as_u32()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_find() {
        let cardholder = find(ProductId::new(1)).map(|p| p.price);
        assert_eq!(cardholder, Some(Money::new(350)));
        assert!(find(ProductId::new(99)).is_none());
    }

    #[test]
    fn test_by_category() {
        assert_eq!(by_category("Чехлы").len(), 3);
        assert_eq!(by_category("Стилусы").len(), 3);
        assert_eq!(by_category("Аксессуары").len(), 1);
        assert_eq!(by_category(ALL_CATEGORIES).len(), 7);
        assert_eq!(by_category("").len(), 7);
        assert!(by_category("Наушники").is_empty());
    }

    #[test]
    fn test_every_product_category_is_listed() {
        let categories = categories();
        assert_eq!(categories.first(), Some(&ALL_CATEGORIES));
        assert!(
            products()
                .iter()
                .all(|p| categories.contains(&p.category.as_str()))
        );
    }
}
