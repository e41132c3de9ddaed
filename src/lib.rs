pub use error::AppError;

/// Main architecture layers (dependency flow: CLI → Core → Storage)
pub mod cli; // Command-line interface
pub mod core; // Business logic
pub mod storage; // Configuration and token persistence

/// Support modules (used across layers)
pub mod api; // Marketplace API client
pub mod display; // Output formatting and export
pub mod error; // Error handling
pub mod utils; // Shared utilities and helpers
pub mod view; // Collection view engine (filter/sort/paginate)

pub type Result<T> = std::result::Result<T, AppError>;
