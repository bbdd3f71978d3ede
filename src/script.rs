// WHY: Browser hosts cannot link the Rust detector, so the same algorithm ships
// as a JavaScript expression with the registry serialized into it

use anyhow::Result;

use crate::detector::DetectorConfig;
use crate::document::INTERACTIVE_SELECTOR;
use crate::providers::Registry;

const PROVIDERS_SLOT: &str = "__PROVIDERS__";
const SNIPPET_SLOT: &str = "__SNIPPET_LEN__";
const CANDIDATES_SLOT: &str = "__CANDIDATES__";

/// Evaluates to `{url, title, providers, timestamp}` in the page context
const DETECT_TEMPLATE: &str = r#"(function() {
    const providers = __PROVIDERS__;
    const detected = [];
    const snippet = (html) => {
        // code points, not UTF-16 units, so surrogate pairs are never split
        const chars = Array.from(html);
        return chars.length > __SNIPPET_LEN__ ? chars.slice(0, __SNIPPET_LEN__).join('') + '...' : html;
    };
    let candidates = null;

    for (const config of providers) {
        let found = false;

        for (const selector of config.selectors) {
            try {
                const element = document.querySelector(selector);
                if (element && element.offsetParent !== null) {
                    detected.push({
                        provider: config.name,
                        element: selector,
                        text: element.textContent?.trim() || '',
                        method: 'selector'
                    });
                    found = true;
                    break;
                }
            } catch (e) {
                // unsupported selector in this engine
            }
        }

        if (!found) {
            const patterns = [];
            for (const pattern of config.text_patterns) {
                try {
                    patterns.push(new RegExp(pattern, 'i'));
                } catch (e) {
                    // invalid pattern in this engine
                }
            }
            candidates = candidates || Array.from(document.querySelectorAll(__CANDIDATES__));
            for (const candidate of candidates) {
                const text = candidate.textContent?.toLowerCase() || '';
                if (patterns.some((re) => re.test(text))) {
                    detected.push({
                        provider: config.name,
                        element: snippet(candidate.outerHTML),
                        text: candidate.textContent?.trim() || '',
                        method: 'text_pattern'
                    });
                    break;
                }
            }
        }
    }

    return {
        url: window.location.href,
        title: document.title,
        providers: detected,
        timestamp: new Date().toISOString()
    };
})();"#;

/// Render the injectable detection payload for `registry`
pub fn render_detect_script(registry: &Registry) -> Result<String> {
    render_detect_script_with(registry, &DetectorConfig::default())
}

pub fn render_detect_script_with(registry: &Registry, config: &DetectorConfig) -> Result<String> {
    let providers = serde_json::to_string(registry)?;
    let candidates = serde_json::to_string(INTERACTIVE_SELECTOR)?;
    Ok(DETECT_TEMPLATE
        .replace(PROVIDERS_SLOT, &providers)
        .replace(SNIPPET_SLOT, &config.markup_snippet_len.to_string())
        .replace(CANDIDATES_SLOT, &candidates))
}
