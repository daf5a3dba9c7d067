//! Effective descriptor resolver
//!
//! Simulates what the build tool would report as the effective descriptor of a
//! module, without running it:
//!
//! 1. property table (declared, then `project.groupId` / `project.version`)
//! 2. default-active profiles absorbed with overwrite semantics
//! 3. `${name}` substitution in properties, group identifiers and versions
//! 4. parent absorbed with insert-if-absent semantics, local file first, then the
//!    remote repository
//! 5. `import`-scoped managed entries (BOMs) absorbed from the remote repository
//! 6. blank dependency versions filled from the managed table
//!
//! Unresolvable parents and imports are logged and skipped. A parent/import chain
//! that loops back on itself is an error.

use futures::future::{BoxFuture, FutureExt};
use std::collections::HashMap;
use std::path::{Component, MAIN_SEPARATOR, Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

use appdetect_core::application::errors::{ParseError, ResolutionError};
use appdetect_core::domain::{
    ArtifactCoordinates, Dependency, Descriptor, ParentReference, Plugin, Profile,
};
use appdetect_core::infrastructure::parsers::MavenParser;
use appdetect_core::infrastructure::registries::DescriptorRepository;

use super::managed::fill_versions;
use super::properties::{
    build_property_map, resolve_self_references, substitute, substitute_group_ids,
    substitute_plugin_group_ids, substitute_plugin_versions, substitute_versions,
};
use crate::domain::{EffectiveDescriptor, ManagedDependencyMap, PropertyMap};

const DEFAULT_PARENT_PATH: &str = "../pom.xml";
const DESCRIPTOR_FILE_NAME: &str = "pom.xml";

/// Resolves descriptors into [`EffectiveDescriptor`]s
pub struct EffectiveDescriptorResolver {
    parser: MavenParser,
    repository: Arc<dyn DescriptorRepository>,
}

/// State shared by one top-level resolution
#[derive(Default)]
struct ResolutionContext {
    /// Descriptors currently being resolved, outermost first
    stack: Vec<ArtifactCoordinates>,
    /// Remote descriptors already resolved during this run
    remote: HashMap<ArtifactCoordinates, Arc<EffectiveDescriptor>>,
}

impl ResolutionContext {
    fn check(&self, coordinates: &ArtifactCoordinates) -> Result<(), ResolutionError> {
        match self.stack.iter().position(|c| c == coordinates) {
            Some(start) => {
                let mut chain = self.stack[start..].to_vec();
                chain.push(coordinates.clone());
                Err(ResolutionError::Cycle { chain })
            }
            None => Ok(()),
        }
    }

    fn enter(&mut self, coordinates: ArtifactCoordinates) -> Result<(), ResolutionError> {
        self.check(&coordinates)?;
        self.stack.push(coordinates);
        Ok(())
    }

    fn exit(&mut self) {
        self.stack.pop();
    }
}

impl EffectiveDescriptorResolver {
    pub fn new(repository: Arc<dyn DescriptorRepository>) -> Self {
        Self {
            parser: MavenParser::new(),
            repository,
        }
    }

    /// Parse and resolve the descriptor file at `path`
    pub async fn resolve(&self, path: &Path) -> Result<EffectiveDescriptor, ResolutionError> {
        let descriptor = self.parser.parse_file(path).map_err(|e| match e {
            ParseError::Io(source) => ResolutionError::Io {
                path: path.to_path_buf(),
                source,
            },
            source => ResolutionError::Parse {
                path: path.to_path_buf(),
                source,
            },
        })?;
        self.resolve_descriptor(descriptor).await
    }

    /// Resolve an already parsed descriptor
    pub async fn resolve_descriptor(
        &self,
        descriptor: Descriptor,
    ) -> Result<EffectiveDescriptor, ResolutionError> {
        let mut context = ResolutionContext::default();
        let effective = self.resolve_inner(descriptor, &mut context).await?;

        info!(
            coordinates = %effective.coordinates(),
            dependencies = effective.dependencies.len(),
            managed = effective.managed_dependencies.len(),
            "Resolved effective descriptor"
        );
        Ok(effective)
    }

    fn resolve_inner<'a>(
        &'a self,
        descriptor: Descriptor,
        context: &'a mut ResolutionContext,
    ) -> BoxFuture<'a, Result<EffectiveDescriptor, ResolutionError>> {
        async move {
            context.enter(descriptor.coordinates())?;
            let result = self.resolve_entered(descriptor, context).await;
            context.exit();
            result
        }
        .boxed()
    }

    async fn resolve_entered(
        &self,
        descriptor: Descriptor,
        context: &mut ResolutionContext,
    ) -> Result<EffectiveDescriptor, ResolutionError> {
        let mut working = WorkingDescriptor::new(descriptor);

        if let Some(parent) = working.identity.declared_parent().cloned() {
            match self.resolve_parent(&working.identity, &parent, context).await? {
                Some(resolved) => {
                    working.absorb_parent(&resolved);
                    working.apply_properties();
                }
                None => warn!(
                    parent = %parent.coordinates(),
                    path = ?working.identity.path,
                    "Parent descriptor could not be resolved, continuing without it"
                ),
            }
        }

        for import in working.managed.imports() {
            let coordinates =
                ArtifactCoordinates::new(&import.group_id, &import.artifact_id, &import.version);
            if !coordinates.is_concrete() {
                warn!(import = %coordinates, "Skipping import with unresolved coordinates");
                continue;
            }
            if let Some(bom) = self.resolve_remote(&coordinates, context).await? {
                let added = working.managed.absorb(&bom.managed_dependencies);
                debug!(import = %coordinates, added, "Absorbed imported managed dependencies");
            }
        }

        fill_versions(&mut working.dependencies, &working.managed);

        Ok(working.finish())
    }

    /// Resolve the declared parent, preferring the local file tree
    async fn resolve_parent(
        &self,
        child: &Descriptor,
        parent: &ParentReference,
        context: &mut ResolutionContext,
    ) -> Result<Option<Arc<EffectiveDescriptor>>, ResolutionError> {
        if let Some(resolved) = self.resolve_local_parent(child, parent, context).await? {
            return Ok(Some(Arc::new(resolved)));
        }
        self.resolve_remote(&parent.coordinates(), context).await
    }

    async fn resolve_local_parent(
        &self,
        child: &Descriptor,
        parent: &ParentReference,
        context: &mut ResolutionContext,
    ) -> Result<Option<EffectiveDescriptor>, ResolutionError> {
        let Some(child_path) = child.path.as_deref() else {
            return Ok(None);
        };

        let parent_path = parent_descriptor_path(child_path, &parent.relative_path);
        if !parent_path.is_file() {
            debug!(path = %parent_path.display(), "No local parent descriptor");
            return Ok(None);
        }

        let candidate = match self.parser.parse_file(&parent_path) {
            Ok(candidate) => candidate,
            Err(e) => {
                warn!(path = %parent_path.display(), error = %e, "Failed to parse local parent descriptor");
                return Ok(None);
            }
        };

        if candidate.coordinates() != parent.coordinates() {
            debug!(
                path = %parent_path.display(),
                found = %candidate.coordinates(),
                expected = %parent.coordinates(),
                "Local descriptor is not the declared parent"
            );
            return Ok(None);
        }

        debug!(path = %parent_path.display(), "Resolving local parent descriptor");
        self.resolve_inner(candidate, context).await.map(Some)
    }

    /// Fetch, parse and resolve a descriptor from the remote repository.
    /// `Ok(None)` means the reference is unresolved; only cycles are errors.
    async fn resolve_remote(
        &self,
        coordinates: &ArtifactCoordinates,
        context: &mut ResolutionContext,
    ) -> Result<Option<Arc<EffectiveDescriptor>>, ResolutionError> {
        if let Some(resolved) = context.remote.get(coordinates) {
            return Ok(Some(Arc::clone(resolved)));
        }
        context.check(coordinates)?;

        let text = match self.repository.fetch_descriptor(coordinates).await {
            Ok(text) => text,
            Err(e) => {
                warn!(coordinates = %coordinates, error = %e, "Failed to fetch remote descriptor");
                return Ok(None);
            }
        };

        let descriptor = match self.parser.parse_str(&text, None) {
            Ok(descriptor) => descriptor,
            Err(e) => {
                warn!(coordinates = %coordinates, error = %e, "Failed to parse remote descriptor");
                return Ok(None);
            }
        };

        let resolved = Arc::new(self.resolve_inner(descriptor, context).await?);
        context
            .remote
            .insert(coordinates.clone(), Arc::clone(&resolved));
        Ok(Some(resolved))
    }
}

/// Location of the parent descriptor declared by the descriptor at `child_path`
///
/// Both separators are accepted in `relative_path`. A path naming a directory
/// points at the descriptor inside it.
pub fn parent_descriptor_path(child_path: &Path, relative_path: &str) -> PathBuf {
    let relative = match relative_path.trim() {
        "" => DEFAULT_PARENT_PATH,
        declared => declared,
    };
    let relative = relative.replace(['/', '\\'], &MAIN_SEPARATOR.to_string());

    let base = child_path.parent().unwrap_or_else(|| Path::new(""));
    let joined = clean_path(&base.join(relative));

    if joined.is_dir() {
        joined.join(DESCRIPTOR_FILE_NAME)
    } else {
        joined
    }
}

/// Lexically remove `.` and `..` components
fn clean_path(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match cleaned.components().next_back() {
                Some(Component::Normal(_)) => {
                    cleaned.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => cleaned.push(".."),
            },
            other => cleaned.push(other.as_os_str()),
        }
    }
    cleaned
}

/// Mutable state of one descriptor while it is being resolved
struct WorkingDescriptor {
    /// Identity, parent, modules and path; the lists live below
    identity: Descriptor,
    properties: PropertyMap,
    managed: ManagedDependencyMap,
    dependencies: Vec<Dependency>,
    plugins: Vec<Plugin>,
}

impl WorkingDescriptor {
    /// Build the working state and absorb default-active profiles
    fn new(mut descriptor: Descriptor) -> Self {
        let profiles: Vec<Profile> = std::mem::take(&mut descriptor.profiles)
            .into_iter()
            .filter(|profile| profile.active_by_default)
            .collect();

        let mut properties = build_property_map(&descriptor);
        for profile in &profiles {
            debug!(profile = %profile.id, "Absorbing default-active profile");
            properties.overwrite_from(&PropertyMap::from_properties(&profile.properties));
        }
        resolve_self_references(&mut properties);

        let mut managed_list = std::mem::take(&mut descriptor.managed_dependencies);
        let mut dependencies = std::mem::take(&mut descriptor.dependencies);
        let mut plugins = std::mem::take(&mut descriptor.plugins);
        substitute_group_ids(&mut managed_list, &properties);
        substitute_group_ids(&mut dependencies, &properties);
        substitute_plugin_group_ids(&mut plugins, &properties);

        let mut managed = ManagedDependencyMap::from_dependencies(&managed_list);

        for mut profile in profiles {
            substitute_group_ids(&mut profile.managed_dependencies, &properties);
            substitute_group_ids(&mut profile.dependencies, &properties);
            substitute_plugin_group_ids(&mut profile.plugins, &properties);

            managed.overwrite_from(&ManagedDependencyMap::from_dependencies(
                &profile.managed_dependencies,
            ));
            append_new_dependencies(&mut dependencies, profile.dependencies);
            append_new_plugins(&mut plugins, profile.plugins);
        }

        descriptor.properties.clear();

        let mut working = Self {
            identity: descriptor,
            properties,
            managed,
            dependencies,
            plugins,
        };
        working.substitute_all_versions();
        working
    }

    fn substitute_all_versions(&mut self) {
        let properties = &self.properties;
        self.managed
            .update(|dependency| dependency.version = substitute(&dependency.version, properties));
        substitute_versions(&mut self.dependencies, properties);
        substitute_plugin_versions(&mut self.plugins, properties);
    }

    /// Re-run substitution after new properties arrived
    fn apply_properties(&mut self) {
        resolve_self_references(&mut self.properties);

        let properties = &self.properties;
        substitute_group_ids(&mut self.dependencies, properties);
        substitute_plugin_group_ids(&mut self.plugins, properties);
        self.managed.update(|dependency| {
            dependency.group_id = substitute(&dependency.group_id, properties);
        });

        self.substitute_all_versions();
    }

    /// Insert-if-absent absorption of everything the parent provides
    fn absorb_parent(&mut self, parent: &EffectiveDescriptor) {
        self.properties.absorb(&parent.properties);
        let added = self.managed.absorb(&parent.managed_dependencies);
        append_new_dependencies(&mut self.dependencies, parent.dependencies.iter().cloned());
        append_new_plugins(&mut self.plugins, parent.plugins.iter().cloned());

        debug!(
            parent = %parent.coordinates(),
            managed_added = added,
            "Absorbed parent descriptor"
        );
    }

    fn finish(self) -> EffectiveDescriptor {
        let group_id = substitute(self.identity.effective_group_id(), &self.properties);
        let version = substitute(self.identity.effective_version(), &self.properties);
        let Descriptor {
            artifact_id,
            parent,
            modules,
            path,
            ..
        } = self.identity;

        EffectiveDescriptor {
            group_id,
            artifact_id,
            version,
            parent,
            modules,
            properties: self.properties,
            managed_dependencies: self.managed,
            dependencies: self.dependencies,
            plugins: self.plugins,
            path,
        }
    }
}

fn append_new_dependencies<I>(target: &mut Vec<Dependency>, incoming: I)
where
    I: IntoIterator<Item = Dependency>,
{
    for dependency in incoming {
        if !target.iter().any(|d| d.same_artifact(&dependency)) {
            target.push(dependency);
        }
    }
}

fn append_new_plugins<I>(target: &mut Vec<Plugin>, incoming: I)
where
    I: IntoIterator<Item = Plugin>,
{
    for plugin in incoming {
        if !target.iter().any(|p| p.same_artifact(&plugin)) {
            target.push(plugin);
        }
    }
}
