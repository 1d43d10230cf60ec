pub mod error;
pub mod loaders;

pub use error::LoadError;
pub use loaders::cross_reference::CrossReferenceLoader;
pub use loaders::vocabulary::VocabularyLoader;
