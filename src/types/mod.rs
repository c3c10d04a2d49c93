pub mod token_metadata;
pub mod token_record;

pub use token_metadata::TokenMetadata;
pub use token_record::TokenRecord;
