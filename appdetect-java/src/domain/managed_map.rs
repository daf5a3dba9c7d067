//! Managed dependency table (`dependencyManagement`)

use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

use appdetect_core::domain::{Dependency, DependencyScope};

/// `groupId:artifactId:scope`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ManagedKey {
    pub group_id: String,
    pub artifact_id: String,
    pub scope: DependencyScope,
}

impl ManagedKey {
    pub fn new(group_id: &str, artifact_id: &str, scope: DependencyScope) -> Self {
        Self {
            group_id: group_id.to_string(),
            artifact_id: artifact_id.to_string(),
            scope,
        }
    }

    pub fn of(dependency: &Dependency) -> Self {
        Self::new(
            &dependency.group_id,
            &dependency.artifact_id,
            dependency.scope.clone(),
        )
    }
}

impl fmt::Display for ManagedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.scope)
    }
}

/// Managed versions keyed by `groupId:artifactId:scope`
///
/// This is the only copy of the managed table. The ordered list of managed
/// dependencies is a view derived from it, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManagedDependencyMap {
    entries: Vec<Dependency>,
    index: HashMap<ManagedKey, usize>,
}

impl ManagedDependencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from declared entries; a repeated key takes the later version
    /// and keeps the position of its first declaration
    pub fn from_dependencies(dependencies: &[Dependency]) -> Self {
        let mut map = Self::new();
        for dependency in dependencies {
            map.insert(dependency.clone());
        }
        map
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &ManagedKey) -> Option<&str> {
        self.index
            .get(key)
            .map(|&position| self.entries[position].version.as_str())
    }

    pub fn contains_artifact(&self, group_id: &str, artifact_id: &str) -> bool {
        self.entries.iter().any(|d| d.matches(group_id, artifact_id))
    }

    /// Managed version for `dependency`.
    ///
    /// A `test` dependency with no `test` entry falls back to the `compile` entry.
    /// Blank managed versions are treated as absent.
    pub fn version_for(&self, dependency: &Dependency) -> Option<&str> {
        if let Some(version) = self.non_blank(&ManagedKey::of(dependency)) {
            return Some(version);
        }
        if dependency.scope != DependencyScope::Test {
            return None;
        }
        self.non_blank(&ManagedKey::new(
            &dependency.group_id,
            &dependency.artifact_id,
            DependencyScope::Compile,
        ))
    }

    fn non_blank(&self, key: &ManagedKey) -> Option<&str> {
        self.get(key).filter(|v| !v.trim().is_empty())
    }

    /// Add `dependency` unless its key is already present. Returns whether it was added.
    pub fn insert_if_absent(&mut self, dependency: Dependency) -> bool {
        let key = ManagedKey::of(&dependency);
        if self.index.contains_key(&key) {
            return false;
        }
        self.index.insert(key, self.entries.len());
        self.entries.push(dependency);
        true
    }

    /// Set the entry for `dependency`'s key, keeping its position when present
    pub fn insert(&mut self, dependency: Dependency) {
        let key = ManagedKey::of(&dependency);
        match self.index.get(&key) {
            Some(&position) => self.entries[position].version = dependency.version,
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push(dependency);
            }
        }
    }

    /// Absorb entries from `other` that this table lacks. Entries without a
    /// version carry no information and are skipped.
    pub fn absorb(&mut self, other: &ManagedDependencyMap) -> usize {
        other
            .iter()
            .filter(|d| d.has_version())
            .filter(|d| self.insert_if_absent((*d).clone()))
            .count()
    }

    /// Absorb every entry of `other`, replacing existing versions
    pub fn overwrite_from(&mut self, other: &ManagedDependencyMap) {
        for dependency in other.iter() {
            self.insert(dependency.clone());
        }
    }

    /// Rewrite entries in place and rebuild the index.
    ///
    /// If two entries end up with the same key, the earlier one is kept.
    pub fn update<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Dependency),
    {
        let mut entries = std::mem::take(&mut self.entries);
        entries.iter_mut().for_each(&mut f);

        self.index.clear();
        for dependency in entries {
            self.insert_if_absent(dependency);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dependency> {
        self.entries.iter()
    }

    /// Snapshot of the `import`-scoped entries
    pub fn imports(&self) -> Vec<Dependency> {
        self.entries
            .iter()
            .filter(|d| d.scope == DependencyScope::Import)
            .cloned()
            .collect()
    }

    /// Ordered list view of the table
    pub fn to_dependencies(&self) -> Vec<Dependency> {
        self.entries.clone()
    }
}

impl Serialize for ManagedDependencyMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.iter())
    }
}
