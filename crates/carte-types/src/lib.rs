pub mod types;

pub use types::{Enrichment, Menu, MenuDocument, MenuItem, MenuPage, MenuSection, Names};
