pub mod domain;
pub mod infrastructure;
pub mod traits;

// Re-exports for easy external access - only export what's actually used
pub use domain::{ClientConfig, EmptyReason, Listing};
pub use infrastructure::cache::{CacheStats, ResponseCache};
pub use infrastructure::external::jikan::{JikanClient, TopFilter};
pub use infrastructure::http_client::{RequestLifecycle, ReqwestFetcher};
pub use traits::PayloadFetch;
