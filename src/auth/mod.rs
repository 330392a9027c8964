pub mod extractor;

pub use extractor::Authorized;
