//! shop-search - Faceted product search from the command line
//!
//! Talks to a product search service: full-text search with filters,
//! suggestions, facets, product details, image and voice queries.

use anyhow::Result;
use clap::{Parser, Subcommand};
use shop_search::commands::{
    FacetsCommand, ImageCommand, ProductCommand, SearchArgs, SearchCommand, SuggestCommand,
    VoiceCommand,
};
use shop_search::config::{Config, OutputFormat};
use shop_search::filters::FacetKind;
use shop_search::i18n::Language;
use shop_search::search::SortKey;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "shop-search",
    version,
    about = "Faceted product search CLI",
    long_about = "Search a product catalogue with brand, category, shop and price filters, suggestions and product details."
)]
struct Cli {
    /// Base URL of the search service
    #[arg(short, long, global = true, env = "SHOP_SEARCH_URL")]
    url: Option<String>,

    /// Interface language (el, en)
    #[arg(short, long, global = true)]
    lang: Option<Language>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for products
    #[command(alias = "s")]
    Search {
        /// Search query
        #[arg(default_value = "")]
        query: String,

        /// Page to show
        #[arg(short, long, default_value = "1")]
        page: u32,

        /// Sort order (relevance, price_asc, price_desc, availability, newest)
        #[arg(long, default_value = "relevance")]
        sort: SortKey,

        /// Search products only, without matching categories
        #[arg(long)]
        products_only: bool,

        /// Brand filter (comma-separated)
        #[arg(long, value_delimiter = ',')]
        brands: Vec<String>,

        /// Category filter (comma-separated)
        #[arg(long, value_delimiter = ',')]
        categories: Vec<String>,

        /// Shop filter (comma-separated)
        #[arg(long, value_delimiter = ',')]
        shops: Vec<String>,

        /// Only show available products
        #[arg(long)]
        available: bool,

        /// Only show products in stock
        #[arg(long)]
        in_stock: bool,

        /// Minimum price filter
        #[arg(long)]
        min_price: Option<f64>,

        /// Maximum price filter
        #[arg(long)]
        max_price: Option<f64>,

        /// Also show the facet sidebar
        #[arg(long)]
        facets: bool,
    },

    /// Show type-ahead suggestions
    Suggest {
        /// Partial query
        text: String,

        /// Run the search for suggestion number N
        #[arg(long)]
        pick: Option<usize>,
    },

    /// List brands, categories, shops and the price range
    Facets {
        /// Narrow the brand list
        #[arg(long)]
        brand: Option<String>,

        /// Narrow the category list
        #[arg(long)]
        category: Option<String>,

        /// Narrow the shop list
        #[arg(long)]
        shop: Option<String>,
    },

    /// Show product details by id
    #[command(alias = "p")]
    Product {
        /// Product id(s)
        #[arg(required = true)]
        ids: Vec<String>,

        /// Search this query first, so result cards can stand in for missing details
        #[arg(long)]
        within: Option<String>,
    },

    /// Search by image
    Image {
        /// Image file to upload
        path: PathBuf,
    },

    /// Search by voice
    Voice,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(url) = cli.url {
        config.base_url = url;
    }
    if let Some(lang) = cli.lang {
        config.language = lang;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }
    config.validate()?;

    let output = match cli.command {
        Commands::Search {
            query,
            page,
            sort,
            products_only,
            brands,
            categories,
            shops,
            available,
            in_stock,
            min_price,
            max_price,
            facets,
        } => {
            let args = SearchArgs {
                page,
                sort,
                products_only,
                brands,
                categories,
                shops,
                available_only: available,
                in_stock,
                min_price,
                max_price,
                show_facets: facets,
                ..SearchArgs::new(query)
            };
            SearchCommand::new(config).execute(&args).await?
        }

        Commands::Suggest { text, pick } => SuggestCommand::new(config).execute(&text, pick).await?,

        Commands::Facets { brand, category, shop } => {
            let narrow: Vec<(FacetKind, String)> = [
                (FacetKind::Brand, brand),
                (FacetKind::Category, category),
                (FacetKind::Shop, shop),
            ]
            .into_iter()
            .filter_map(|(kind, text)| text.map(|t| (kind, t)))
            .collect();

            FacetsCommand::new(config).execute(&narrow).await?
        }

        Commands::Product { ids, within } => {
            ProductCommand::new(config).execute(&ids, within.as_deref()).await?
        }

        Commands::Image { path } => ImageCommand::new(config).execute(&path).await?,

        Commands::Voice => VoiceCommand::new(config).execute().await?,
    };

    if !output.is_empty() {
        println!("{}", output);
    }

    Ok(())
}
