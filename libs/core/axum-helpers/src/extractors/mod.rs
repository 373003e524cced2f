//! Extractors that reject requests with the standard error envelope.

pub mod query_params;
pub mod uuid_path;
pub mod validated_json;

pub use query_params::QueryParams;
pub use uuid_path::UuidPath;
pub use validated_json::ValidatedJson;
