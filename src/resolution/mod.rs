//! Resolvers turning a parsed request into exactly one documentation link.
//!
//! Each resolver collects candidate links from the index and hands them to
//! [`Candidates`], which removes duplicate URLs and enforces that exactly one
//! candidate survives.

pub mod class;
pub mod class_member;
pub mod top_level;

pub use class::ClassResolver;
pub use class_member::ClassMemberResolver;
pub use top_level::TopLevelResolver;

use crate::error::{ResolutionError, ResolutionResult};
use crate::indexing::DeclarationIndex;
use crate::link::{LinkBuilder, LinkRepresentation};
use crate::request::ParsedRequest;
use crate::types::MemberKind;

/// Read-only state shared by every resolver
#[derive(Debug, Clone, Copy)]
pub struct ResolutionContext<'a> {
    pub index: &'a DeclarationIndex,
    pub links: &'a LinkBuilder,
}

impl<'a> ResolutionContext<'a> {
    pub fn new(index: &'a DeclarationIndex, links: &'a LinkBuilder) -> Self {
        Self { index, links }
    }
}

/// One strategy for resolving a request
pub trait Resolver: Send + Sync {
    fn resolve(
        &self,
        context: ResolutionContext<'_>,
        request: &ParsedRequest,
    ) -> ResolutionResult<LinkRepresentation>;
}

/// Candidate links in discovery order.
///
/// Two candidates are the same when they point at the same URL for the same
/// kind of member. A function and a property sharing a name also share a page,
/// yet they stay separate candidates.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Candidates {
    found: Vec<(MemberKind, LinkRepresentation)>,
}

impl Candidates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: MemberKind, link: LinkRepresentation) {
        let duplicate = self
            .found
            .iter()
            .any(|(existing_kind, existing)| *existing_kind == kind && existing.url == link.url);
        if !duplicate {
            self.found.push((kind, link));
        }
    }

    pub fn len(&self) -> usize {
        self.found.len()
    }

    pub fn is_empty(&self) -> bool {
        self.found.is_empty()
    }

    /// The only candidate.
    ///
    /// Fails with `NotFound(not_found)` when there is none, and with
    /// `Ambiguous` listing every candidate URL when there are several.
    pub fn into_single(
        mut self,
        identifier: &str,
        not_found: impl FnOnce() -> String,
    ) -> ResolutionResult<LinkRepresentation> {
        match self.found.len() {
            0 => Err(ResolutionError::not_found(not_found())),
            1 => Ok(self.found.remove(0).1),
            _ => Err(ResolutionError::ambiguous(
                identifier,
                self.found.into_iter().map(|(_, link)| link.url).collect(),
            )),
        }
    }
}

impl Extend<(MemberKind, LinkRepresentation)> for Candidates {
    fn extend<T: IntoIterator<Item = (MemberKind, LinkRepresentation)>>(&mut self, iter: T) {
        for (kind, link) in iter {
            self.push(kind, link);
        }
    }
}

impl FromIterator<(MemberKind, LinkRepresentation)> for Candidates {
    fn from_iter<T: IntoIterator<Item = (MemberKind, LinkRepresentation)>>(iter: T) -> Self {
        let mut candidates = Self::new();
        candidates.extend(iter);
        candidates
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::indexing::{DeclarationIndex, InMemoryArtifactSource, PackageFilter, RawClass};
    use serde_json::{Value, json};

    pub fn index_of(records: Vec<(&str, Value)>) -> DeclarationIndex {
        let classes = records
            .into_iter()
            .map(|(name, metadata)| RawClass::new(name, Some(metadata)))
            .collect();
        DeclarationIndex::build(&InMemoryArtifactSource::new(classes), PackageFilter::all())
            .unwrap()
    }

    pub fn class_metadata(class_kind: &str, members: Value) -> Value {
        with_members(
            json!({"version": [2, 0, 0], "kind": "class", "module": "core", "class_kind": class_kind}),
            members,
        )
    }

    pub fn facade_metadata(module: &str, members: Value) -> Value {
        with_members(
            json!({"version": [2, 0, 0], "kind": "file_facade", "module": module}),
            members,
        )
    }

    fn with_members(mut metadata: Value, members: Value) -> Value {
        if let (Some(target), Value::Object(members)) = (metadata.as_object_mut(), members) {
            target.extend(members);
        }
        metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn function(label: &str, url: &str) -> (MemberKind, LinkRepresentation) {
        (MemberKind::Function, LinkRepresentation::new(label, url))
    }

    #[test]
    fn test_duplicate_urls_collapse() {
        let candidates: Candidates = [
            function("a", "https://docs.example/core/a.html"),
            function("a (again)", "https://docs.example/core/a.html"),
        ]
        .into_iter()
        .collect();

        assert_eq!(candidates.len(), 1);
        let link = candidates.into_single("a", || unreachable!()).unwrap();
        assert_eq!(link.label, "a");
    }

    #[test]
    fn test_same_url_for_different_kinds_is_kept() {
        let mut candidates = Candidates::new();
        candidates.push(MemberKind::Function, LinkRepresentation::new("a", "https://docs.example/core/a.html"));
        candidates.push(MemberKind::Property, LinkRepresentation::new("a", "https://docs.example/core/a.html"));
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn test_no_candidates_is_not_found() {
        let result = Candidates::new().into_single("a", || "'a' was not found".to_string());
        assert_eq!(result, Err(ResolutionError::not_found("'a' was not found")));
    }

    #[test]
    fn test_several_candidates_are_ambiguous() {
        let candidates: Candidates = [
            function("a", "https://docs.example/core/x/a.html"),
            function("a", "https://docs.example/core/y/a.html"),
        ]
        .into_iter()
        .collect();

        let error = candidates.into_single("a", String::new).unwrap_err();
        assert_eq!(
            error,
            ResolutionError::ambiguous(
                "a",
                vec![
                    "https://docs.example/core/x/a.html".to_string(),
                    "https://docs.example/core/y/a.html".to_string(),
                ]
            )
        );
        assert!(error.is_not_found());
    }
}
