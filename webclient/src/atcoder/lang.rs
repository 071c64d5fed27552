use glob::Pattern;

use crate::glob_map::GlobMap;

/// Maps a language label as shown by the site ("C++ (GCC 9.2.1)") to a
/// filename suffix ("cpp") by label-prefix globs; first match wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LangSuffixMapper {
    rules: GlobMap<String>,
}

const BUILTIN_RULES: &[(&str, &str)] = &[
    // "C++" and "C#" must come before "C".
    ("C++*", "cpp"),
    ("C#*", "cs"),
    ("Java*", "java"),
    ("Kotlin*", "kt"),
    ("Python*", "py"),
    ("Ruby*", "rb"),
    ("Rust*", "rs"),
    ("C*", "c"),
];

impl Default for LangSuffixMapper {
    fn default() -> Self {
        let rules = BUILTIN_RULES
            .iter()
            .filter_map(|&(pat, suffix)| Some((Pattern::new(pat).ok()?, suffix.to_owned())))
            .collect();
        Self { rules }
    }
}

impl LangSuffixMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in rules preceded by `user_rules`, so that user rules win.
    pub fn with_user_rules<I>(user_rules: I) -> Self
    where
        I: IntoIterator<Item = (Pattern, String)>,
    {
        let mut rules: GlobMap<String> = user_rules.into_iter().collect();
        for (pattern, suffix) in Self::default().rules {
            // Same pattern given by the user: keep the user's suffix.
            if rules.iter().all(|(p, _)| p != &pattern) {
                rules.insert(pattern, suffix);
            }
        }
        Self { rules }
    }

    /// Suffix without the leading dot; empty when no rule matches.
    pub fn suffix_for(&self, label: &str) -> &str {
        self.rules.get(label).map_or("", String::as_str)
    }

    /// `<id>.<suffix>`, or `<id>` alone when the label is unknown.
    pub fn filename_for(&self, id: &str, label: &str) -> String {
        match self.suffix_for(label) {
            "" => id.to_owned(),
            suffix => format!("{}.{}", id, suffix),
        }
    }
}
