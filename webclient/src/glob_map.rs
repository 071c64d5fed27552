use glob::Pattern;

/// Ordered list of `(glob, value)` pairs; lookups return the value of the
/// first pattern that matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobMap<V> {
    pairs: Vec<(Pattern, V)>,
}

pub type Iter<'a, V> = std::slice::Iter<'a, (Pattern, V)>;

impl<V> Default for GlobMap<V> {
    fn default() -> Self {
        Self { pairs: Vec::new() }
    }
}

impl<V> GlobMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Appends a pair, or replaces the value of an identical pattern in place
    /// (keeping its position).
    pub fn insert(&mut self, k: Pattern, mut v: V) -> Option<V> {
        if let Some((_, value)) = self.pairs.iter_mut().find(|(pat, _)| pat == &k) {
            std::mem::swap(value, &mut v);
            Some(v)
        } else {
            self.pairs.push((k, v));
            None
        }
    }

    pub fn get(&self, k: impl AsRef<str>) -> Option<&V> {
        let k = k.as_ref();
        self.pairs
            .iter()
            .find(|(pattern, _)| pattern.matches(k))
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> Iter<'_, V> {
        self.pairs.iter()
    }
}

impl<V> FromIterator<(Pattern, V)> for GlobMap<V> {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (Pattern, V)>,
    {
        let mut m = Self::new();
        m.extend(iter);
        m
    }
}

impl<V> Extend<(Pattern, V)> for GlobMap<V> {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (Pattern, V)>,
    {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<V> IntoIterator for GlobMap<V> {
    type Item = (Pattern, V);

    type IntoIter = <Vec<Self::Item> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}
