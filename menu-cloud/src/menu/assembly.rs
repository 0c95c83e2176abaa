//! Build the public menu view from loaded rows

use std::collections::HashSet;

use shared::format::{Currency, format_price_in};
use shared::models::{
    CategorySection, MenuHeader, MenuItem, MenuItemView, MenuView, Restaurant,
};

use super::loader::LoadedMenu;

/// Header, featured carousel, one section per category (category order),
/// and a trailing bucket for items with no live category.
pub fn assemble(restaurant: &Restaurant, menu: &LoadedMenu) -> MenuView {
    let currency = Currency::from_db(&restaurant.currency).unwrap_or_default();
    let view = |item: &MenuItem| item_view(item, currency);

    let sections = menu
        .categories
        .iter()
        .map(|c| CategorySection {
            id: c.id,
            name: c.name.clone(),
            image_url: c.image_url.clone(),
            items: menu
                .items
                .iter()
                .filter(|i| i.category_id == Some(c.id))
                .map(view)
                .collect(),
        })
        .collect();

    let known: HashSet<i64> = menu.categories.iter().map(|c| c.id).collect();
    let uncategorized = menu
        .items
        .iter()
        .filter(|i| i.category_id.is_none_or(|id| !known.contains(&id)))
        .map(view)
        .collect();

    MenuView {
        header: MenuHeader {
            restaurant_id: restaurant.id.clone(),
            name: restaurant.restaurant_name.clone(),
            slug: restaurant.slug.clone(),
            logo_url: restaurant.logo_url.clone(),
            theme: restaurant.theme.clone(),
            currency: currency.as_db().to_string(),
        },
        featured: menu.featured.iter().map(view).collect(),
        sections,
        uncategorized,
        item_count: menu.items.len(),
        trace: None,
    }
}

fn item_view(item: &MenuItem, currency: Currency) -> MenuItemView {
    MenuItemView {
        id: item.id,
        category_id: item.category_id,
        name: item.name.clone(),
        description: item.description.clone(),
        price: item.price,
        price_display: format_price_in(item.price, currency),
        image_url: item.image_url.clone(),
        is_featured: item.is_featured,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::source::fake::{category, item, restaurant};

    #[test]
    fn test_assemble_sections_and_featured() {
        let r = restaurant("a", "Burger Town", "burger-town");
        let mut special = item(3, "a", Some(2), 450);
        special.is_featured = true;
        let menu = LoadedMenu::new(
            vec![category(1, "a", "Burgers"), category(2, "a", "Sides")],
            vec![
                item(1, "a", Some(1), 1299),
                item(2, "a", None, 0),
                special,
                item(4, "a", Some(77), 100),
            ],
        );

        let view = assemble(&r, &menu);
        assert_eq!(view.header.name, "Burger Town");
        assert_eq!(view.item_count, 4);
        assert_eq!(view.sections.len(), 2);
        assert_eq!(view.sections[0].items[0].price_display, "$12.99");
        assert_eq!(view.sections[1].items[0].id, 3);
        assert_eq!(view.featured.len(), 1);
        assert_eq!(view.featured[0].price_display, "$4.50");

        let loose: Vec<i64> = view.uncategorized.iter().map(|i| i.id).collect();
        assert_eq!(loose, vec![2, 4]);
        assert_eq!(view.uncategorized[0].price_display, "$0.00");
    }

    #[test]
    fn test_assemble_uses_restaurant_currency() {
        let mut r = restaurant("a", "Beirut Grill", "beirut-grill");
        r.currency = "lbp".into();
        let menu = LoadedMenu::new(vec![], vec![item(1, "a", None, 150_000)]);

        let view = assemble(&r, &menu);
        assert_eq!(view.header.currency, "lbp");
        assert_eq!(view.uncategorized[0].price_display, "1,500 L.L.");
    }

    #[test]
    fn test_assemble_empty() {
        let r = restaurant("a", "Burger Town", "burger-town");
        let view = assemble(&r, &LoadedMenu::default());
        assert!(view.sections.is_empty());
        assert!(view.featured.is_empty());
        assert_eq!(view.item_count, 0);
    }
}
