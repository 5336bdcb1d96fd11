mod extractor;

pub use extractor::{PdfExtractor, TextExtractor};
