pub mod analyzers;
pub mod error;
pub mod fetch;
pub mod ingest;
pub mod normalize;
pub mod output;
pub mod parser;
pub mod record;
