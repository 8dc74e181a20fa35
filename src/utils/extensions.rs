use std::path::Path;

/// Normalized collection of file-suffix strings used as a membership filter.
///
/// Tokens are stored in dot-prefixed form ("pdf" becomes ".pdf"), preserving
/// the order and duplicates of the input. Matching is exact string equality
/// against a path's trailing suffix, case-sensitive.
#[derive(Debug, Clone)]
pub struct ExtensionSet {
    suffixes: Vec<String>,
}

impl ExtensionSet {
    /// Build a set from raw extension tokens, prepending the dot to each.
    pub fn normalize<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let suffixes = tokens
            .into_iter()
            .map(|token| format!(".{}", token.as_ref()))
            .collect();
        Self { suffixes }
    }

    /// Check whether the path's extension belongs to this set.
    ///
    /// A path with no extension never matches. No case folding, no wildcards.
    pub fn matches(&self, path: &Path) -> bool {
        let suffix = path_suffix(path);
        if suffix.is_empty() {
            return false;
        }
        self.suffixes.iter().any(|s| *s == suffix)
    }

    pub fn is_empty(&self) -> bool {
        self.suffixes.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.suffixes
    }
}

/// Trailing suffix of a path in ".ext" form, or an empty string when the
/// path has no extension.
fn path_suffix(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default()
}
