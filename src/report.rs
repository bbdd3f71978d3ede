use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which detection phase produced a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMethod {
    Selector,
    TextPattern,
}

impl fmt::Display for DetectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectionMethod::Selector => f.write_str("selector"),
            DetectionMethod::TextPattern => f.write_str("text_pattern"),
        }
    }
}

/// Evidence that one provider is offered on the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionHit {
    pub provider: String,
    /// Matching selector, or truncated markup for text-pattern hits
    pub element: String,
    pub text: String,
    pub method: DetectionMethod,
}

/// Result of one scan of one page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionReport {
    pub url: String,
    pub title: String,
    /// Registry order, at most one entry per provider
    pub providers: Vec<DetectionHit>,
    pub timestamp: DateTime<Utc>,
}

impl DetectionReport {
    pub fn hit_for(&self, provider: &str) -> Option<&DetectionHit> {
        self.providers.iter().find(|hit| hit.provider == provider)
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|hit| hit.provider.as_str()).collect()
    }

    /// Human-readable rendering for terminal output
    pub fn format_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("URL: {}\n", self.url));
        out.push_str(&format!("Title: {}\n", self.title));
        out.push_str(&format!("Scanned: {}\n", self.timestamp.to_rfc3339()));
        if self.providers.is_empty() {
            out.push_str("No OAuth providers detected\n");
            return out;
        }
        out.push_str(&format!("Detected providers ({}):\n", self.providers.len()));
        for hit in &self.providers {
            out.push_str(&format!(
                "• {} [{}] {} | {:?}\n",
                hit.provider, hit.method, hit.element, hit.text
            ));
        }
        out
    }
}
