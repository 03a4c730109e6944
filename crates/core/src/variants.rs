//! Option choices offered when adding a product to the cart.
//!
//! The upstream catalog has no variant data, so choices are derived from the
//! product's category and title:
//!
//! | Product | Groups |
//! |---|---|
//! | category contains `clothing` | `size` (S/M/L/XL), `color` |
//! | category contains `jewelery` | `metal`, `size` (6-9) |
//! | `electronics`, title mentions `hard drive` or `ssd` | `storage` |
//! | `electronics`, title mentions `tv` | `screenSize` |

use thiserror::Error;

use crate::types::{OptionSet, Product};

/// One selectable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
}

/// A named set of choices, e.g. "Size".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionGroup {
    /// Key stored in the [`OptionSet`].
    pub name: &'static str,
    pub label: &'static str,
    pub choices: &'static [Choice],
}

impl OptionGroup {
    #[must_use]
    pub fn offers(&self, value: &str) -> bool {
        self.choices.iter().any(|choice| choice.value == value)
    }
}

const fn choice(value: &'static str, label: &'static str) -> Choice {
    Choice { value, label }
}

pub static CLOTHING_SIZE: OptionGroup = OptionGroup {
    name: "size",
    label: "Size",
    choices: &[
        choice("S", "Small"),
        choice("M", "Medium"),
        choice("L", "Large"),
        choice("XL", "XL"),
    ],
};

pub static COLOR: OptionGroup = OptionGroup {
    name: "color",
    label: "Color",
    choices: &[
        choice("Red", "Red"),
        choice("Blue", "Blue"),
        choice("Black", "Black"),
        choice("White", "White"),
    ],
};

pub static METAL: OptionGroup = OptionGroup {
    name: "metal",
    label: "Metal Type",
    choices: &[choice("Gold", "Gold"), choice("Silver", "Silver")],
};

pub static RING_SIZE: OptionGroup = OptionGroup {
    name: "size",
    label: "Size",
    choices: &[
        choice("6", "6"),
        choice("7", "7"),
        choice("8", "8"),
        choice("9", "9"),
    ],
};

pub static STORAGE: OptionGroup = OptionGroup {
    name: "storage",
    label: "Storage Size",
    choices: &[
        choice("500GB", "500GB"),
        choice("1TB", "1TB"),
        choice("2TB", "2TB"),
        choice("4TB", "4TB"),
    ],
};

pub static SCREEN_SIZE: OptionGroup = OptionGroup {
    name: "screenSize",
    label: "Screen Size",
    choices: &[
        choice("32", "32 inches"),
        choice("42", "42 inches"),
        choice("55", "55 inches"),
        choice("65", "65 inches"),
    ],
};

/// Errors from [`select`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionError {
    #[error("{product} has no option named '{name}'")]
    UnknownOption { product: String, name: String },

    #[error("'{value}' is not a valid {name}")]
    InvalidChoice { name: String, value: String },
}

/// Option groups available for `product`, in display order.
#[must_use]
pub fn groups_for(product: &Product) -> Vec<&'static OptionGroup> {
    if product.in_category("clothing") {
        return vec![&CLOTHING_SIZE, &COLOR];
    }
    if product.in_category("jewelery") {
        return vec![&METAL, &RING_SIZE];
    }
    if product.in_category("electronics") {
        let mut groups = Vec::new();
        if product.title_mentions("hard drive") || product.title_mentions("ssd") {
            groups.push(&STORAGE);
        }
        if product.title_mentions("tv") {
            groups.push(&SCREEN_SIZE);
        }
        return groups;
    }
    Vec::new()
}

/// Turn raw `(name, value)` pairs into an [`OptionSet`] for `product`.
///
/// Blank values mean "not chosen" and are dropped, so submitting nothing
/// yields the empty set.
///
/// # Errors
///
/// Returns [`OptionError`] if a name is not offered for this product or a
/// value is not one of that group's choices.
pub fn select<I, K, V>(product: &Product, raw: I) -> Result<OptionSet, OptionError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let groups = groups_for(product);
    let mut options = OptionSet::new();

    for (name, value) in raw {
        let (name, value) = (name.as_ref().trim(), value.as_ref().trim());
        if value.is_empty() {
            continue;
        }

        let group = groups
            .iter()
            .find(|group| group.name == name)
            .ok_or_else(|| OptionError::UnknownOption {
                product: product.title.clone(),
                name: name.to_owned(),
            })?;

        if !group.offers(value) {
            return Err(OptionError::InvalidChoice {
                name: name.to_owned(),
                value: value.to_owned(),
            });
        }

        options.insert(name, value);
    }

    Ok(options)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{Price, ProductId};

    fn product(title: &str, category: &str) -> Product {
        Product {
            id: ProductId::from(1),
            title: title.to_string(),
            price: Price::from_cents(100),
            description: String::new(),
            category: category.to_string(),
            image: String::new(),
            rating: None,
        }
    }

    fn names(product: &Product) -> Vec<&'static str> {
        groups_for(product).iter().map(|g| g.name).collect()
    }

    #[test]
    fn test_groups_by_category() {
        assert_eq!(names(&product("Slim Fit T-Shirt", "men's clothing")), ["size", "color"]);
        assert_eq!(names(&product("Solid Gold Petite Micropave", "jewelery")), ["metal", "size"]);
        assert_eq!(
            names(&product("WD 2TB Elements Portable External Hard Drive", "electronics")),
            ["storage"]
        );
        assert_eq!(
            names(&product("SanDisk SSD PLUS 1TB Internal SSD", "electronics")),
            ["storage"]
        );
        assert_eq!(
            names(&product("Samsung 49-Inch Curved Gaming Monitor TV", "electronics")),
            ["screenSize"]
        );
        assert!(names(&product("Backpack", "bags")).is_empty());
    }

    #[test]
    fn test_storage_group_is_offered_once() {
        let drive = product("Portable SSD Hard Drive", "electronics");
        assert_eq!(names(&drive), ["storage"]);
    }

    #[test]
    fn test_select_valid() {
        let shirt = product("Rain Jacket", "women's clothing");
        let options = select(&shirt, [("size", "M"), ("color", "Blue")]).unwrap();
        assert_eq!(options, OptionSet::from_iter([("color", "Blue"), ("size", "M")]));
    }

    #[test]
    fn test_select_drops_blank_values() {
        let shirt = product("Rain Jacket", "women's clothing");
        let options = select(&shirt, [("size", "L"), ("color", "  ")]).unwrap();
        assert_eq!(options, OptionSet::from_iter([("size", "L")]));

        let none = select(&shirt, [("size", ""), ("color", "")]).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_select_rejects_unknown_name() {
        let ring = product("Princess ring", "jewelery");
        let err = select(&ring, [("color", "Red")]).unwrap_err();
        assert!(matches!(err, OptionError::UnknownOption { .. }));
    }

    #[test]
    fn test_select_rejects_value_from_other_group() {
        let ring = product("Princess ring", "jewelery");
        let err = select(&ring, [("size", "XL")]).unwrap_err();
        assert_eq!(
            err,
            OptionError::InvalidChoice {
                name: "size".to_string(),
                value: "XL".to_string()
            }
        );
    }

    #[test]
    fn test_plain_products_take_no_options() {
        let bag = product("Backpack", "bags");
        assert!(select(&bag, std::iter::empty::<(&str, &str)>()).unwrap().is_empty());
        assert!(select(&bag, [("size", "M")]).is_err());
    }
}
