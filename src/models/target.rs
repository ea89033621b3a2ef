use std::fmt;

/// One remote endpoint under periodic observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    name: String,
    url: String,
}

impl Target {
    /// Builds a target from an already normalized url and a non-empty name.
    pub(crate) fn new(name: String, url: String) -> Self {
        Self { name, url }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.url)
    }
}

/// Ordered, non-empty list of targets, in configuration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetList {
    targets: Vec<Target>,
}

impl TargetList {
    /// Returns `None` for an empty list.
    pub(crate) fn new(targets: Vec<Target>) -> Option<Self> {
        if targets.is_empty() {
            None
        } else {
            Some(Self { targets })
        }
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Target> {
        self.targets.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.targets.iter().map(Target::name).collect()
    }
}

impl<'a> IntoIterator for &'a TargetList {
    type Item = &'a Target;
    type IntoIter = std::slice::Iter<'a, Target>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
