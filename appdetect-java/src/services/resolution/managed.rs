//! Managed version lookup for declared dependencies

use tracing::debug;

use appdetect_core::domain::Dependency;

use crate::domain::ManagedDependencyMap;

/// Give every dependency without a version its managed version.
///
/// Lookup is by `groupId:artifactId:scope`, widening `test` to `compile` when the
/// exact key is missing. The dependency's own scope never changes. Returns the
/// number of dependencies that were filled.
pub fn fill_versions(dependencies: &mut [Dependency], managed: &ManagedDependencyMap) -> usize {
    let mut filled = 0;
    for dependency in dependencies.iter_mut().filter(|d| !d.has_version()) {
        match managed.version_for(dependency) {
            Some(version) => {
                dependency.version = version.to_string();
                filled += 1;
            }
            None => {
                debug!(dependency = %dependency, "No managed version found");
            }
        }
    }
    filled
}
