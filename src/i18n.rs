//! User-visible strings in Greek and English.

use serde::{Deserialize, Serialize};

/// Interface language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    El,
    En,
}

impl Language {
    pub fn messages(self) -> &'static Messages {
        match self {
            Language::El => &GREEK,
            Language::En => &ENGLISH,
        }
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "el" | "gr" | "greek" => Ok(Language::El),
            "en" | "english" => Ok(Language::En),
            _ => Err(format!("Unknown language: {}. Use: el, en", s)),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::El => write!(f, "el"),
            Language::En => write!(f, "en"),
        }
    }
}

/// Message table for one language.
#[derive(Debug)]
pub struct Messages {
    pub search_error: &'static str,
    pub no_results: &'static str,
    pub no_results_hint: &'static str,
    pub loading: &'static str,
    pub result: &'static str,
    pub results: &'static str,
    pub page: &'static str,
    pub of: &'static str,
    pub id: &'static str,
    pub title: &'static str,
    pub price_unavailable: &'static str,
    pub best_price: &'static str,
    pub was: &'static str,
    pub availability: &'static str,
    pub available: &'static str,
    pub out_of_stock: &'static str,
    pub available_in: &'static str,
    pub stock: &'static str,
    pub shop: &'static str,
    pub shops: &'static str,
    pub brand: &'static str,
    pub category: &'static str,
    pub price: &'static str,
    pub available_only: &'static str,
    pub in_stock: &'static str,
    pub categories: &'static str,
    pub products: &'static str,
    pub details_unavailable: &'static str,
    pub details_from_results: &'static str,
    pub view_in_store: &'static str,
    pub image_search_failed: &'static str,
    pub speech_unsupported: &'static str,
    pub voice_failed: &'static str,
    pub active_filters: &'static str,
    pub suggestions: &'static str,
}

impl Messages {
    /// `1 result` / `12,345 results`.
    pub fn result_count(&self, total: u64) -> String {
        let noun = if total == 1 { self.result } else { self.results };
        format!("{} {}", crate::format::price::format_count(total), noun)
    }

    /// `Page 2 of 7`.
    pub fn page_of(&self, page: u32, total_pages: u32) -> String {
        format!("{} {} {} {}", self.page, page, self.of, total_pages)
    }

    /// `1 shop` / `4 shops`.
    pub fn shop_count(&self, count: u32) -> String {
        let noun = if count == 1 { self.shop } else { self.shops };
        format!("{} {}", count, noun.to_lowercase())
    }
}

pub static ENGLISH: Messages = Messages {
    search_error: "Error while searching. Please try again.",
    no_results: "No results found",
    no_results_hint: "Try different keywords or remove some filters.",
    loading: "Loading...",
    result: "result",
    results: "results",
    page: "Page",
    of: "of",
    id: "ID",
    title: "Title",
    price_unavailable: "Price not available",
    best_price: "Best",
    was: "was",
    availability: "Availability",
    available: "Available",
    out_of_stock: "Out of Stock",
    available_in: "Available in",
    stock: "Stock",
    shop: "Shop",
    shops: "Shops",
    brand: "Brand",
    category: "Category",
    price: "Price",
    available_only: "Available only",
    in_stock: "In stock",
    categories: "Categories",
    products: "products",
    details_unavailable: "Product details not available",
    details_from_results: "Product details from current search results",
    view_in_store: "View in store",
    image_search_failed: "Image search failed. Please try again.",
    speech_unsupported: "Speech recognition is not supported in this environment.",
    voice_failed: "Voice recognition error",
    active_filters: "Active filters",
    suggestions: "Suggestions",
};

pub static GREEK: Messages = Messages {
    search_error: "Σφάλμα κατά την αναζήτηση. Παρακαλώ δοκιμάστε ξανά.",
    no_results: "Δεν βρέθηκαν αποτελέσματα",
    no_results_hint: "Δοκιμάστε διαφορετικές λέξεις ή αφαιρέστε κάποια φίλτρα.",
    loading: "Φόρτωση...",
    result: "αποτέλεσμα",
    results: "αποτελέσματα",
    page: "Σελίδα",
    of: "από",
    id: "Κωδικός",
    title: "Τίτλος",
    price_unavailable: "Μη διαθέσιμη τιμή",
    best_price: "Καλύτερη τιμή",
    was: "πριν",
    availability: "Διαθεσιμότητα",
    available: "Διαθέσιμο",
    out_of_stock: "Μη διαθέσιμο",
    available_in: "Διαθέσιμο σε",
    stock: "Απόθεμα",
    shop: "Κατάστημα",
    shops: "Καταστήματα",
    brand: "Μάρκα",
    category: "Κατηγορία",
    price: "Τιμή",
    available_only: "Μόνο διαθέσιμα",
    in_stock: "Σε απόθεμα",
    categories: "Κατηγορίες",
    products: "προϊόντα",
    details_unavailable: "Οι λεπτομέρειες του προϊόντος δεν είναι διαθέσιμες",
    details_from_results: "Στοιχεία προϊόντος από τα τρέχοντα αποτελέσματα",
    view_in_store: "Προβολή στο κατάστημα",
    image_search_failed: "Η αναζήτηση με εικόνα απέτυχε. Παρακαλώ δοκιμάστε ξανά.",
    speech_unsupported: "Η αναγνώριση ομιλίας δεν υποστηρίζεται σε αυτό το περιβάλλον.",
    voice_failed: "Σφάλμα αναγνώρισης φωνής",
    active_filters: "Ενεργά φίλτρα",
    suggestions: "Προτάσεις",
};
