//! Problem URL derivation.

/// Default base path problem slugs are appended to.
pub const DEFAULT_URL_BASE: &str = "https://leetcode.com/problems/";

/// Derives the canonical external link of a problem from its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugGenerator {
    base: String,
}

impl SlugGenerator {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Base path followed by the slug of `name`. Total over every input.
    pub fn url(&self, name: &str) -> String {
        format!("{}{}", self.base, slugify(name))
    }
}

impl Default for SlugGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_URL_BASE)
    }
}

/// Lower-case, drop everything but letters, digits and spaces, then turn
/// each run of spaces into a single hyphen.
///
/// Dropped characters do not split a run of spaces: `"a - b"` becomes
/// `"a-b"`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_space_run = false;

    for ch in name.chars().flat_map(char::to_lowercase) {
        if ch == ' ' {
            if !in_space_run {
                slug.push('-');
                in_space_run = true;
            }
        } else if ch.is_alphanumeric() {
            slug.push(ch);
            in_space_run = false;
        }
    }

    slug
}
