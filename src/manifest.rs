use crate::error::{BloomError, Result};
use regex::Regex;
use std::fs;
use std::path::Path;

/// File name of the upstream manifest at the root of the source tree
pub const STACK_XML: &str = "stack.xml";

/// Name and version an upstream source tree declares in its `stack.xml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackManifest {
    pub name: String,
    pub version: String,
}

impl StackManifest {
    /// Reads `stack.xml` from the root of an upstream checkout.
    ///
    /// # Returns
    /// * `Ok(StackManifest)` - Name and version found
    /// * `Err(BloomError::MissingManifest)` - No `stack.xml` in `dir`
    /// * `Err(BloomError::Manifest)` - The file lacks a `<stack>` root, `<name>` or `<version>`
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(STACK_XML);
        if !path.is_file() {
            return Err(BloomError::MissingManifest(dir.to_path_buf()));
        }
        let contents = fs::read_to_string(&path)?;
        Self::parse(&contents)
    }

    /// Parses the contents of a `stack.xml` document.
    pub fn parse(contents: &str) -> Result<Self> {
        let without_comments = Regex::new(r"(?s)<!--.*?-->")
            .map_err(|e| BloomError::manifest(e.to_string()))?
            .replace_all(contents, "");

        let root = Regex::new(r"<stack[\s>]").map_err(|e| BloomError::manifest(e.to_string()))?;
        if !root.is_match(&without_comments) {
            return Err(BloomError::manifest("stack.xml has no <stack> root element"));
        }

        let name = element_text(&without_comments, "name")?;
        let version = element_text(&without_comments, "version")?;

        Ok(StackManifest { name, version })
    }

    /// Archive base name: underscores in the package name become hyphens
    /// (e.g., "foo_pkg" at "1.2.3" -> "foo-pkg-1.2.3").
    pub fn tarball_name(&self) -> String {
        tarball_name(&self.name, &self.version)
    }
}

/// Creates a tarball base name from a package name and version.
pub fn tarball_name(package_name: &str, version: &str) -> String {
    format!("{}-{}", package_name.replace('_', "-"), version)
}

fn element_text(contents: &str, element: &str) -> Result<String> {
    let re = Regex::new(&format!(r"(?s)<{0}>\s*(.*?)\s*</{0}>", element))
        .map_err(|e| BloomError::manifest(e.to_string()))?;

    let text = re
        .captures(contents)
        .and_then(|captures| captures.get(1))
        .map(|m| unescape(m.as_str()))
        .unwrap_or_default();

    if text.is_empty() {
        return Err(BloomError::manifest(format!(
            "stack.xml has no <{}> element",
            element
        )));
    }
    Ok(text)
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
