pub mod mode;
pub mod projection;

pub use mode::{split_api_list, ExtractionMode};
pub use projection::Extractor;
