//! The declaration index
//!
//! Built once from an [`ArtifactSource`] and read-only afterwards. Any number
//! of resolvers may query it concurrently.

use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, trace};

use super::progress::IndexStats;
use super::walker::{ArtifactSource, PackageFilter, RawClass};
use crate::declaration::{
    ClassDeclaration, ClassEntry, CompanionRef, EntryShape, PackageFacadeDeclaration,
    split_binary_name,
};
use crate::error::{IndexError, IndexResult, MetadataError};
use crate::metadata::{self, DecodedMetadata};
use crate::types::ClassId;

/// Immutable, in-memory view of every documented declaration
#[derive(Debug, Default)]
pub struct DeclarationIndex {
    entries: Vec<ClassEntry>,
    by_simple_name: HashMap<String, Vec<ClassId>>,
    facades: Vec<PackageFacadeDeclaration>,
    stats: IndexStats,
}

/// Configures and runs an index build
#[derive(Debug, Clone, Default)]
pub struct IndexBuilder {
    filter: PackageFilter,
    threads: usize,
}

impl IndexBuilder {
    pub fn new(filter: PackageFilter) -> Self {
        Self { filter, threads: 0 }
    }

    /// Number of threads decoding metadata; 0 lets rayon decide
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn build(&self, source: &dyn ArtifactSource) -> IndexResult<DeclarationIndex> {
        let mut stats = IndexStats::new();
        let classes = source.scan(&self.filter)?;
        stats.classes_scanned = classes.len();
        let classes = drop_duplicate_classes(classes, &mut stats);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .build()
            .map_err(|e| IndexError::ConfigError {
                reason: format!("cannot start indexing threads: {e}"),
            })?;
        let decoded: Vec<Option<Result<DecodedMetadata, MetadataError>>> = pool.install(|| {
            classes
                .par_iter()
                .map(|class| class.metadata.as_ref().map(metadata::decode))
                .collect()
        });

        let mut index = DeclarationIndex::default();
        for (class, decoded) in classes.into_iter().zip(decoded) {
            match decoded {
                None => stats.classes_without_metadata += 1,
                Some(Err(e)) => {
                    trace!("Skipping '{}': {e}", class.binary_name);
                    stats.classes_failed += 1;
                }
                Some(Ok(decoded)) => index.insert(class, decoded, &mut stats),
            }
        }

        index.link_companions(&mut stats);
        stats.stop_timing();
        info!(
            "Indexed {} classes and {} package facades from {} class records in {:.2}s",
            stats.class_declarations,
            stats.package_facades,
            stats.classes_scanned,
            stats.elapsed.as_secs_f64()
        );
        index.stats = stats;
        Ok(index)
    }
}

/// Keep the first record of every binary name; roots scanned later cannot
/// shadow a class that was already found
fn drop_duplicate_classes(classes: Vec<RawClass>, stats: &mut IndexStats) -> Vec<RawClass> {
    let mut seen = HashSet::with_capacity(classes.len());
    classes
        .into_iter()
        .filter(|class| {
            let first = seen.insert(class.binary_name.clone());
            if !first {
                debug!("Ignoring duplicate class record '{}'", class.binary_name);
                stats.duplicate_classes += 1;
            }
            first
        })
        .collect()
}

impl DeclarationIndex {
    /// Build an index of every class under `filter`
    pub fn build(source: &dyn ArtifactSource, filter: PackageFilter) -> IndexResult<Self> {
        IndexBuilder::new(filter).build(source)
    }

    /// Entries whose simple nested name is `name`. Inner class separators may
    /// be written as `$` or `.`.
    pub fn find_by_simple_name(&self, name: &str) -> Vec<&ClassEntry> {
        let key = name.replace('$', ".");
        self.by_simple_name
            .get(&key)
            .map(|ids| ids.iter().map(|id| self.entry(*id)).collect())
            .unwrap_or_default()
    }

    /// Every package facade, in scan order
    pub fn package_facades(&self) -> impl Iterator<Item = &PackageFacadeDeclaration> + '_ {
        self.facades.iter()
    }

    pub fn entry(&self, id: ClassId) -> &ClassEntry {
        &self.entries[id.index()]
    }

    pub fn entries(&self) -> impl Iterator<Item = &ClassEntry> + '_ {
        self.entries.iter()
    }

    /// Companion object declared by `class`, if any
    pub fn companion_of(&self, class: &ClassDeclaration) -> Option<&ClassDeclaration> {
        let companion = class.companion.as_ref()?;
        let declaration = self.entry(companion.id).as_class();
        debug_assert!(
            declaration.is_some(),
            "companion links are only made to class entries"
        );
        declaration
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> &IndexStats {
        &self.stats
    }

    fn insert(&mut self, class: RawClass, decoded: DecodedMetadata, stats: &mut IndexStats) {
        let (package, simple_nested_name) = split_binary_name(&class.binary_name);
        let Some(id) = ClassId::from_index(self.entries.len()) else {
            trace!("Skipping '{}': index is full", class.binary_name);
            stats.classes_failed += 1;
            return;
        };

        let shape = match decoded {
            DecodedMetadata::Class(decoded) => {
                stats.class_declarations += 1;
                let qualified_name = if package.is_empty() {
                    simple_nested_name.clone()
                } else {
                    format!("{package}.{simple_nested_name}")
                };
                EntryShape::Class(ClassDeclaration {
                    qualified_name,
                    simple_nested_name: simple_nested_name.clone(),
                    module: decoded.module,
                    package: package.clone(),
                    kind: decoded.kind,
                    functions: decoded.functions,
                    properties: decoded.properties,
                    enum_entries: decoded.enum_entries,
                    // Resolved once every class is known
                    companion: decoded.companion_object.map(|name| CompanionRef {
                        name,
                        id,
                    }),
                })
            }
            DecodedMetadata::Package(decoded) => {
                stats.package_facades += 1;
                let kind = decoded.kind;
                self.facades.push(PackageFacadeDeclaration {
                    module: decoded.module,
                    package: package.clone(),
                    functions: decoded.functions,
                    properties: decoded.properties,
                });
                EntryShape::NotAClass(kind)
            }
            DecodedMetadata::Other(kind) => {
                stats.other_entries += 1;
                EntryShape::NotAClass(kind)
            }
        };

        self.by_simple_name
            .entry(simple_nested_name.clone())
            .or_default()
            .push(id);
        self.entries.push(ClassEntry {
            binary_name: class.binary_name,
            package,
            simple_nested_name,
            shape,
        });
    }

    /// Point every companion reference at its class entry, dropping the ones
    /// that have no target
    fn link_companions(&mut self, stats: &mut IndexStats) {
        let by_binary_name: HashMap<String, ClassId> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.as_class().is_some())
            .filter_map(|(index, entry)| {
                Some((entry.binary_name.clone(), ClassId::from_index(index)?))
            })
            .collect();

        for entry in &mut self.entries {
            let binary_name = entry.binary_name.clone();
            let EntryShape::Class(class) = &mut entry.shape else {
                continue;
            };
            let Some(companion) = class.companion.take() else {
                continue;
            };

            let target = format!("{binary_name}${}", companion.name);
            match by_binary_name.get(&target) {
                Some(&id) => {
                    class.companion = Some(CompanionRef {
                        name: companion.name,
                        id,
                    })
                }
                None => {
                    debug!("Dropping companion '{}' of '{binary_name}': not indexed", companion.name);
                    stats.dropped_companions += 1;
                }
            }
        }
    }
}
