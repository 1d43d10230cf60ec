pub mod processor;

pub use processor::ChineseProcessor;
