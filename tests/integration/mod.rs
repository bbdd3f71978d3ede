// Integration test utilities and common code
// WHY: Centralized utilities avoid duplication across integration tests

#![allow(dead_code)]

pub mod fixtures;

use anyhow::{bail, Result};
use signin_scout::{DocumentLike, PageElement};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test fixture helper for writing pages and registries to a temporary directory
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().to_path_buf();
        Self { temp_dir, root_path }
    }

    /// Write an HTML page relative to the fixture root
    pub fn create_page<P: AsRef<Path>>(&self, relative_path: P, markup: &str) -> PathBuf {
        self.write_file(relative_path, markup)
    }

    /// Write a JSON registry relative to the fixture root
    pub fn create_registry<P: AsRef<Path>>(&self, relative_path: P, json: &str) -> PathBuf {
        self.write_file(relative_path, json)
    }

    fn write_file<P: AsRef<Path>>(&self, relative_path: P, content: &str) -> PathBuf {
        let file_path = self.root_path.join(relative_path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }
}

/// Element of a `FakeDocument`
#[derive(Debug, Clone)]
pub struct FakeElement {
    pub tag: &'static str,
    pub role: Option<&'static str>,
    pub text: Option<String>,
    pub visible: bool,
}

impl FakeElement {
    pub fn new(tag: &'static str, text: &str) -> Self {
        Self {
            tag,
            role: None,
            text: Some(text.to_string()),
            visible: true,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn without_text(mut self) -> Self {
        self.text = None;
        self
    }

    pub fn with_role(mut self, role: &'static str) -> Self {
        self.role = Some(role);
        self
    }
}

impl PageElement for &FakeElement {
    fn text_content(&self) -> Option<String> {
        self.text.clone()
    }

    fn outer_html(&self) -> String {
        format!("<{0}>{1}</{0}>", self.tag, self.text.as_deref().unwrap_or(""))
    }
}

/// Engine-free document: selectors resolve through an explicit table
#[derive(Default)]
pub struct FakeDocument {
    pub elements: Vec<FakeElement>,
    pub selector_matches: HashMap<String, usize>,
    pub invalid_selectors: HashSet<String>,
}

impl FakeDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element, returning its index
    pub fn push(&mut self, element: FakeElement) -> usize {
        self.elements.push(element);
        self.elements.len() - 1
    }

    /// Make `selector` resolve to the element at `index`
    pub fn route(&mut self, selector: &str, index: usize) {
        self.selector_matches.insert(selector.to_string(), index);
    }

    /// Make `selector` raise a syntax error
    pub fn reject(&mut self, selector: &str) {
        self.invalid_selectors.insert(selector.to_string());
    }
}

impl DocumentLike for FakeDocument {
    type Element<'a> = &'a FakeElement;

    fn url(&self) -> String {
        "https://fake.test/login".to_string()
    }

    fn title(&self) -> String {
        "Fake login".to_string()
    }

    fn query_selector(&self, selector: &str) -> Result<Option<&FakeElement>> {
        if self.invalid_selectors.contains(selector) {
            bail!("SyntaxError: '{selector}' is not a valid selector");
        }
        Ok(self.selector_matches.get(selector).map(|&i| &self.elements[i]))
    }

    fn is_visible(&self, element: &&FakeElement) -> bool {
        element.visible
    }

    fn interactive_elements(&self) -> Vec<&FakeElement> {
        self.elements
            .iter()
            .filter(|e| e.tag == "button" || e.tag == "a" || e.role == Some("button"))
            .collect()
    }
}
