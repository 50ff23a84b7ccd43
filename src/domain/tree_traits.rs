//! Rendering item trees as `termtree` output with formatted prices.

use termtree::Tree;
use tracing::instrument;

use crate::domain::arena::ItemRef;
use crate::domain::item::PricedItem;

/// How prices are written: currency prefix and decimal places.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceFormat {
    pub currency: String,
    pub precision: usize,
}

impl Default for PriceFormat {
    fn default() -> Self {
        Self {
            currency: String::new(),
            precision: 2,
        }
    }
}

impl PriceFormat {
    pub fn format(&self, price: f64) -> String {
        format!("{}{:.*}", self.currency, self.precision, price)
    }
}

pub trait ToTree {
    fn to_tree(&self, format: &PriceFormat, show_prices: bool) -> Tree<String>;
}

impl ToTree for ItemRef<'_> {
    #[instrument(level = "trace", skip_all)]
    fn to_tree(&self, format: &PriceFormat, show_prices: bool) -> Tree<String> {
        let label = if show_prices {
            format!("{} ({})", self.name(), format.format(self.price()))
        } else {
            self.name()
        };

        let leaves: Vec<_> = self
            .children()
            .map(|child| child.to_tree(format, show_prices))
            .collect();

        Tree::new(label).with_leaves(leaves)
    }
}
