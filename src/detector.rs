// WHY: Two-phase provider detection: structural selectors first, text heuristics second
// Best-effort by contract, so nothing in a scan can fail

use anyhow::Result;
use chrono::Utc;
use regex_automata::meta::Regex;
use std::sync::OnceLock;
use tracing::{debug, info, warn};

use crate::document::{DocumentLike, PageElement};
use crate::providers::{default_registry, ProviderSpec, Registry};
use crate::report::{DetectionHit, DetectionMethod, DetectionReport};

/// Configuration for detection output
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Maximum characters of markup kept for text-pattern hits
    pub markup_snippet_len: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            markup_snippet_len: 100,
        }
    }
}

/// One provider with its text patterns compiled
struct CompiledProvider<'r> {
    spec: &'r ProviderSpec,
    patterns: Vec<Regex>,
}

/// Detector bound to a registry; patterns are compiled once at construction
pub struct Detector<'r> {
    providers: Vec<CompiledProvider<'r>>,
    config: DetectorConfig,
}

impl<'r> Detector<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self::with_config(registry, DetectorConfig::default())
    }

    pub fn with_config(registry: &'r Registry, config: DetectorConfig) -> Self {
        let providers = registry
            .iter()
            .map(|spec| CompiledProvider {
                spec,
                patterns: compile_patterns(spec),
            })
            .collect();
        Self { providers, config }
    }

    /// Scan a document; at most one hit per provider, in registry order
    pub fn detect<D: DocumentLike + ?Sized>(&self, document: &D) -> DetectionReport {
        let url = document.url();
        info!("Scanning {} for {} providers", url, self.providers.len());

        let mut hits = Vec::new();
        // Enumerated lazily and at most once per scan
        let mut candidates: Option<Vec<D::Element<'_>>> = None;

        for provider in &self.providers {
            let hit = match self.match_selectors(provider.spec, document) {
                Some(hit) => Some(hit),
                None => {
                    let candidates = candidates.get_or_insert_with(|| document.interactive_elements());
                    self.match_text_patterns(provider, candidates)
                }
            };
            if let Some(hit) = hit {
                debug!(provider = %hit.provider, method = %hit.method, "Provider detected");
                hits.push(hit);
            }
        }

        info!("Detected {} providers on {}", hits.len(), url);
        DetectionReport {
            url,
            title: document.title(),
            providers: hits,
            timestamp: Utc::now(),
        }
    }

    fn match_selectors<D: DocumentLike + ?Sized>(
        &self,
        spec: &ProviderSpec,
        document: &D,
    ) -> Option<DetectionHit> {
        for selector in &spec.selectors {
            let element = match document.query_selector(selector) {
                Ok(Some(element)) => element,
                Ok(None) => continue,
                Err(e) => {
                    debug!(provider = %spec.name, "Skipping selector: {e:#}");
                    continue;
                }
            };
            if !document.is_visible(&element) {
                debug!(provider = %spec.name, %selector, "Selector matched a hidden element");
                continue;
            }
            return Some(DetectionHit {
                provider: spec.name.clone(),
                element: selector.clone(),
                text: trimmed_text(&element),
                method: DetectionMethod::Selector,
            });
        }
        None
    }

    fn match_text_patterns<E: PageElement>(
        &self,
        provider: &CompiledProvider<'_>,
        candidates: &[E],
    ) -> Option<DetectionHit> {
        if provider.patterns.is_empty() {
            return None;
        }
        for candidate in candidates {
            let text = candidate.text_content().unwrap_or_default().to_lowercase();
            if provider.patterns.iter().any(|pattern| pattern.is_match(text.as_str())) {
                return Some(DetectionHit {
                    provider: provider.spec.name.clone(),
                    element: truncate_markup(&candidate.outer_html(), self.config.markup_snippet_len),
                    text: trimmed_text(candidate),
                    method: DetectionMethod::TextPattern,
                });
            }
        }
        None
    }
}

static DEFAULT_DETECTOR: OnceLock<Detector<'static>> = OnceLock::new();

/// Detector over the built-in registry, compiled on first use
pub fn default_detector() -> &'static Detector<'static> {
    DEFAULT_DETECTOR.get_or_init(|| Detector::new(default_registry()))
}

/// Scan with the built-in registry
pub fn detect<D: DocumentLike + ?Sized>(document: &D) -> DetectionReport {
    default_detector().detect(document)
}

fn compile_patterns(spec: &ProviderSpec) -> Vec<Regex> {
    spec.text_patterns
        .iter()
        .filter_map(|pattern| match compile_pattern(pattern) {
            Ok(regex) => Some(regex),
            Err(e) => {
                warn!(provider = %spec.name, %pattern, "Ignoring text pattern: {e}");
                None
            }
        })
        .collect()
}

fn compile_pattern(pattern: &str) -> Result<Regex> {
    Ok(Regex::new(&format!("(?i){pattern}"))?)
}

fn trimmed_text<E: PageElement>(element: &E) -> String {
    element.text_content().unwrap_or_default().trim().to_string()
}

/// First `limit` characters of the markup, with "..." when anything was cut
fn truncate_markup(markup: &str, limit: usize) -> String {
    match markup.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &markup[..cut]),
        None => markup.to_string(),
    }
}
