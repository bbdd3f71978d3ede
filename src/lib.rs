pub mod detector;
pub mod document;
pub mod providers;
pub mod report;
pub mod script;

// Re-export main types for convenient access
pub use detector::{default_detector, detect, Detector, DetectorConfig};
pub use document::{DocumentLike, HtmlDocument, PageElement};
pub use providers::{default_registry, ProviderSpec, Registry};
pub use report::{DetectionHit, DetectionMethod, DetectionReport};
pub use script::render_detect_script;
