//! Entry point for resolving raw queries.
//!
//! The resolver is picked from the identifier's shape alone: callables start
//! lowercase, types start uppercase, and `#` separates a class from a member.

use std::sync::Arc;
use tracing::debug;

use crate::error::ResolutionResult;
use crate::indexing::DeclarationIndex;
use crate::link::{LinkBuilder, LinkRepresentation};
use crate::request::ParsedRequest;
use crate::resolution::{
    ClassMemberResolver, ClassResolver, ResolutionContext, Resolver, TopLevelResolver,
};

/// Resolves queries against one shared, immutable index.
///
/// Cheap to clone and safe to use from any number of threads.
#[derive(Debug, Clone)]
pub struct LinkResolver {
    index: Arc<DeclarationIndex>,
    links: LinkBuilder,
}

impl LinkResolver {
    pub fn new(index: Arc<DeclarationIndex>, links: LinkBuilder) -> Self {
        Self { index, links }
    }

    pub fn index(&self) -> &DeclarationIndex {
        &self.index
    }

    pub fn links(&self) -> &LinkBuilder {
        &self.links
    }

    /// Parse `raw` and resolve it to exactly one link
    pub fn resolve_identifier(&self, raw: &str) -> ResolutionResult<LinkRepresentation> {
        let request = ParsedRequest::parse(raw)?;
        debug!("Resolving {request}");
        self.resolve(&request)
    }

    pub fn resolve(&self, request: &ParsedRequest) -> ResolutionResult<LinkRepresentation> {
        let context = ResolutionContext::new(&self.index, &self.links);
        resolver_for(&request.identifier).resolve(context, request)
    }
}

fn resolver_for(identifier: &str) -> &'static dyn Resolver {
    if identifier.starts_with(char::is_lowercase) {
        &TopLevelResolver
    } else if identifier.contains('#') {
        &ClassMemberResolver
    } else {
        &ClassResolver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResolutionError;
    use crate::resolution::fixtures::{class_metadata, facade_metadata, index_of};
    use serde_json::json;

    fn resolver() -> LinkResolver {
        let index = index_of(vec![
            (
                "bot/util/UtilsKt",
                facade_metadata("core", json!({"functions": [{"name": "sayHello"}]})),
            ),
            (
                "bot/api/Foo",
                class_metadata("class", json!({"properties": [{"name": "bar"}]})),
            ),
        ]);
        LinkResolver::new(Arc::new(index), LinkBuilder::default())
    }

    #[test]
    fn test_dispatch_by_identifier_shape() {
        let resolver = resolver();

        assert_eq!(
            resolver.resolve_identifier("sayHello").unwrap().url,
            "https://docs.example/core/bot/util/say-hello.html"
        );
        assert_eq!(
            resolver.resolve_identifier("Foo").unwrap().url,
            "https://docs.example/core/bot/api/foo/index.html"
        );
        assert_eq!(
            resolver.resolve_identifier("Foo#bar").unwrap().url,
            "https://docs.example/core/bot/api/foo/bar.html"
        );
    }

    #[test]
    fn test_lowercase_with_hash_goes_to_top_level() {
        let error = resolver().resolve_identifier("foo#bar").unwrap_err();
        assert_eq!(
            error,
            ResolutionError::not_found("'foo#bar' is neither a top-level function or property")
        );
    }

    #[test]
    fn test_parse_errors_surface_before_resolution() {
        let resolver = resolver();
        assert_eq!(
            resolver.resolve_identifier(""),
            Err(ResolutionError::EmptyIdentifier)
        );
        assert!(resolver
            .resolve_identifier("Foo#bar type=method")
            .unwrap_err()
            .is_user_error());
    }

    #[test]
    fn test_resolver_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LinkResolver>();
    }
}
