// Data loading from per-asset csv files
pub mod loader;

// Re-export commonly used types
pub use loader::{AssetSeries, discover_assets, load_assets};
