use serde::{Deserialize, Serialize};

/// A package name and the version-range string the manifest declares for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub name: String,
    pub version_range: String,
}

impl Dependency {
    pub fn new(name: impl Into<String>, version_range: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version_range: version_range.into(),
        }
    }
}

/// Declared dependencies keyed by name, in declaration order.
///
/// Inserting a name that is already present replaces its version range but
/// keeps the original position, so iteration order is stable for a given
/// manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySet {
    entries: Vec<Dependency>,
}

impl DependencySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, version_range: impl Into<String>) {
        let name = name.into();
        let version_range = version_range.into();

        match self.entries.iter_mut().find(|d| d.name == name) {
            Some(existing) => existing.version_range = version_range,
            None => self.entries.push(Dependency {
                name,
                version_range,
            }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.version_range.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Dependency> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|d| d.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns a copy without the dependencies matching `skip`.
    pub fn without(&self, mut skip: impl FnMut(&str) -> bool) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|d| !skip(&d.name))
                .cloned()
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a DependencySet {
    type Item = &'a Dependency;
    type IntoIter = std::slice::Iter<'a, Dependency>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for DependencySet {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut set = DependencySet::new();
        for (name, version_range) in iter {
            set.insert(name, version_range);
        }
        set
    }
}
