//! Product card and detail view models.

use super::price::{discount_badge, original_price_text, price_text};
use crate::api::{Product, ProductId};
use crate::i18n::Messages;
use serde::Serialize;

/// Characters of description shown on a card.
const SNIPPET_CHARS: usize = 100;

/// Everything a results card displays, already formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCard {
    pub id: Option<ProductId>,
    pub title: String,
    pub snippet: Option<String>,
    pub price: String,
    pub original_price: Option<String>,
    pub discount: Option<String>,
    pub availability: String,
    pub stock: String,
    pub shop_info: Option<String>,
    pub brand: Option<String>,
    pub image_url: Option<String>,
}

impl ProductCard {
    pub fn new(product: &Product, messages: &Messages) -> Self {
        Self {
            id: product.detail_id().cloned(),
            title: product.title.clone(),
            snippet: product.description.as_deref().and_then(snippet),
            price: price_text(product, messages),
            original_price: original_price_text(product),
            discount: discount_badge(product),
            availability: availability_text(product, messages),
            stock: stock_text(product, messages),
            shop_info: shop_info(product, messages),
            brand: product.brand_name().map(str::to_string),
            image_url: product.image_url.clone().filter(|u| !u.is_empty()),
        }
    }

    /// Price line with the struck original and badge, e.g. `€80.00 ~~€100.00~~ -20%`.
    pub fn price_line(&self, strike: (&str, &str)) -> String {
        let mut line = self.price.clone();
        if let Some(original) = &self.original_price {
            line.push_str(&format!(" {}{}{}", strike.0, original, strike.1));
        }
        if let Some(badge) = &self.discount {
            line.push(' ');
            line.push_str(badge);
        }
        line
    }
}

fn snippet(description: &str) -> Option<String> {
    let description = description.trim();
    if description.is_empty() {
        return None;
    }
    let cut: String = description.chars().take(SNIPPET_CHARS).collect();
    Some(format!("{}...", cut.trim_end()))
}

/// `Available` / `Out of Stock`; aggregated offers show `Available in 3/4 shops`.
pub fn availability_text(product: &Product, messages: &Messages) -> String {
    if product.is_aggregated() && product.is_available() {
        if let (Some(available), Some(total)) = (product.available_shops, product.shop_count) {
            return format!(
                "{} {}/{} {}",
                messages.available_in,
                available,
                total,
                messages.shops.to_lowercase()
            );
        }
    }
    if product.is_available() {
        messages.available.to_string()
    } else {
        messages.out_of_stock.to_string()
    }
}

/// `Stock: 12`, or `Stock: N/A` when the quantity is missing or zero.
pub fn stock_text(product: &Product, messages: &Messages) -> String {
    match product.stock_quantity.filter(|q| *q > 0) {
        Some(quantity) => format!("{}: {}", messages.stock, quantity),
        None => format!("{}: N/A", messages.stock),
    }
}

/// Shop count for aggregated records, otherwise the single shop name.
fn shop_info(product: &Product, messages: &Messages) -> Option<String> {
    match product.shop_count.filter(|c| *c > 0) {
        Some(count) => Some(messages.shop_count(count)),
        None => product.shop_name().map(str::to_string),
    }
}

/// Full field list for the product modal, as `(label, value)` pairs.
pub fn detail_fields(product: &Product, messages: &Messages) -> Vec<(String, String)> {
    let mut fields = Vec::new();
    let card = ProductCard::new(product, messages);

    let was = format!("({} ", messages.was);
    fields.push((messages.price.to_string(), card.price_line((&was, ")"))));
    fields.push((messages.availability.to_string(), card.availability));

    if let Some(quantity) = product.stock_quantity.filter(|q| *q > 0) {
        fields.push((messages.stock.to_string(), quantity.to_string()));
    }
    if let Some(brand) = product.brand_name() {
        fields.push((messages.brand.to_string(), brand.to_string()));
    }
    if let Some(shop) = product.shop_name() {
        fields.push((messages.shop.to_string(), shop.to_string()));
    }
    if let Some(category) = product.category_name() {
        fields.push((messages.category.to_string(), category.to_string()));
    }
    if let Some(count) = product.shop_count.filter(|c| *c > 0) {
        fields.push((messages.shops.to_string(), messages.shop_count(count)));
    }
    if let Some(ean) = product.ean.as_deref().filter(|s| !s.is_empty()) {
        fields.push(("EAN".to_string(), ean.to_string()));
    }
    if let Some(mpn) = product.mpn.as_deref().filter(|s| !s.is_empty()) {
        fields.push(("MPN".to_string(), mpn.to_string()));
    }

    fields
}
