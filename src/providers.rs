// WHY: Provider registry is plain data; detection code never names a provider
// Adding a provider means adding a row here or shipping a JSON registry file

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

/// Built-in table row: (name, domains, selectors, text patterns)
type ProviderRow = (
    &'static str,
    &'static [&'static str],
    &'static [&'static str],
    &'static [&'static str],
);

/// Built-in providers in report order. Selector and pattern order is priority order.
pub const BUILTIN_PROVIDERS: &[ProviderRow] = &[
    (
        "google",
        &["accounts.google.com", "googleapis.com"],
        &[
            r#"button[data-provider="google"]"#,
            r#"a[href*="accounts.google.com"]"#,
            r#"button:has(svg[aria-label*="Google"])"#,
            ".google-signin-button",
            r#"button:contains("Sign in with Google")"#,
            r#"button:contains("Continue with Google")"#,
        ],
        &["sign.*google", "continue.*google", "google.*sign"],
    ),
    (
        "github",
        &["github.com"],
        &[
            r#"button[data-provider="github"]"#,
            r#"a[href*="github.com/login/oauth"]"#,
            r#"button:has(svg[aria-label*="GitHub"])"#,
            ".github-signin-button",
        ],
        &["sign.*github", "continue.*github", "github.*sign"],
    ),
    (
        "apple",
        &["appleid.apple.com"],
        &[
            r#"button[data-provider="apple"]"#,
            r#"a[href*="appleid.apple.com"]"#,
            r#"button:has(svg[aria-label*="Apple"])"#,
            ".apple-signin-button",
        ],
        &["sign.*apple", "continue.*apple", "apple.*sign"],
    ),
    (
        "microsoft",
        &["login.microsoftonline.com", "login.live.com"],
        &[
            r#"button[data-provider="microsoft"]"#,
            r#"a[href*="login.microsoftonline.com"]"#,
            r#"a[href*="login.live.com"]"#,
            r#"button:has(svg[aria-label*="Microsoft"])"#,
            ".microsoft-signin-button",
        ],
        &["sign.*microsoft", "continue.*microsoft", "microsoft.*sign"],
    ),
    (
        "discord",
        &["discord.com"],
        &[
            r#"button[data-provider="discord"]"#,
            r#"a[href*="discord.com/oauth2"]"#,
            r#"button:has(svg[aria-label*="Discord"])"#,
            ".discord-signin-button",
        ],
        &["sign.*discord", "continue.*discord", "discord.*sign"],
    ),
];

/// One sign-in provider and the evidence that identifies it on a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSpec {
    pub name: String,
    #[serde(default)]
    pub domains: Vec<String>,
    #[serde(default)]
    pub selectors: Vec<String>,
    #[serde(default)]
    pub text_patterns: Vec<String>,
}

impl ProviderSpec {
    fn from_row(row: &ProviderRow) -> Self {
        let (name, domains, selectors, text_patterns) = *row;
        let owned = |items: &[&str]| -> Vec<String> { items.iter().map(|s| s.to_string()).collect() };
        Self {
            name: name.to_string(),
            domains: owned(domains),
            selectors: owned(selectors),
            text_patterns: owned(text_patterns),
        }
    }
}

/// Ordered, immutable set of providers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Registry {
    providers: Vec<ProviderSpec>,
}

impl Registry {
    /// Build a registry, rejecting duplicate provider names
    pub fn new(providers: Vec<ProviderSpec>) -> Result<Self> {
        let mut seen = HashSet::new();
        for provider in &providers {
            if provider.name.trim().is_empty() {
                bail!("Provider name must not be empty");
            }
            if !seen.insert(provider.name.as_str()) {
                bail!("Duplicate provider in registry: {}", provider.name);
            }
        }
        Ok(Self { providers })
    }

    /// Parse a registry from a JSON array of provider records
    pub fn from_json(json: &str) -> Result<Self> {
        let providers: Vec<ProviderSpec> =
            serde_json::from_str(json).context("Registry JSON is not an array of providers")?;
        debug!("Parsed {} providers from registry JSON", providers.len());
        Self::new(providers)
    }

    /// Load a JSON registry file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read registry file: {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Invalid registry file: {}", path.display()))
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProviderSpec> {
        self.providers.iter()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ProviderSpec> {
        self.providers.iter().find(|p| p.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a ProviderSpec;
    type IntoIter = std::slice::Iter<'a, ProviderSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.providers.iter()
    }
}

static DEFAULT_REGISTRY: OnceLock<Registry> = OnceLock::new();

/// The built-in registry, initialised on first use
pub fn default_registry() -> &'static Registry {
    DEFAULT_REGISTRY.get_or_init(|| Registry {
        providers: BUILTIN_PROVIDERS.iter().map(ProviderSpec::from_row).collect(),
    })
}
