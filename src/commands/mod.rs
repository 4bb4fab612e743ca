//! CLI command implementations.

pub mod facets;
pub mod image;
pub mod product;
pub mod search;
pub mod suggest;
pub mod voice;

pub use facets::FacetsCommand;
pub use image::ImageCommand;
pub use product::ProductCommand;
pub use search::{SearchArgs, SearchCommand};
pub use suggest::SuggestCommand;
pub use voice::VoiceCommand;
