//! Price and count formatting rules shared by cards, the modal and the stats line.

use crate::api::{PriceValue, Product};
use crate::i18n::Messages;

/// `€` followed by a two-decimal amount.
pub fn format_eur(amount: f64) -> String {
    format!("€{:.2}", amount)
}

/// Thousands-separated integer: `12,345`.
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Headline price of a product card.
///
/// Aggregated records show `€min - €max` when the offers differ, otherwise
/// the best price. Formatted strings already carrying `€` are kept as sent.
pub fn price_text(product: &Product, messages: &Messages) -> String {
    if let Some(best) = product.best_available_price {
        return match (product.min_price, product.max_price) {
            (Some(min), Some(max)) if min != max => {
                format!("{} - {}", format_eur(min), format_eur(max))
            }
            _ => format!("{}: {}", messages.best_price, format_eur(best)),
        };
    }

    match &product.price {
        Some(PriceValue::Formatted(text)) if text.contains('€') => text.trim().to_string(),
        Some(price) => match price.amount() {
            Some(amount) => format_eur(amount),
            None => messages.price_unavailable.to_string(),
        },
        None => messages.price_unavailable.to_string(),
    }
}

/// Struck-through original price, present only when a discount applies.
pub fn original_price_text(product: &Product) -> Option<String> {
    product.discount_percent()?;
    product.original_price.map(format_eur)
}

/// `-20%` badge.
pub fn discount_badge(product: &Product) -> Option<String> {
    product.discount_percent().map(|pct| format!("-{}%", pct))
}
