//! Resolution of class names.

use super::{ResolutionContext, Resolver};
use crate::error::{ResolutionError, ResolutionResult};
use crate::link::LinkRepresentation;
use crate::request::ParsedRequest;

/// Resolves `Outer.Inner` (or `Outer$Inner`) to the page of that class
#[derive(Debug, Default, Clone, Copy)]
pub struct ClassResolver;

impl Resolver for ClassResolver {
    fn resolve(
        &self,
        context: ResolutionContext<'_>,
        request: &ParsedRequest,
    ) -> ResolutionResult<LinkRepresentation> {
        let class_name = request.identifier.as_str();
        let entry = match context.index.find_by_simple_name(class_name).as_slice() {
            [] => return Err(ResolutionError::not_found(format!("'{class_name}' was not found"))),
            [entry] => *entry,
            entries => {
                return Err(ResolutionError::ambiguous(
                    class_name,
                    entries.iter().map(|entry| entry.display_name()).collect(),
                ));
            }
        };

        let class = entry.as_class().ok_or_else(|| {
            ResolutionError::not_found(format!("'{}' is not a class", entry.display_name()))
        })?;

        let label = if class.is_annotation() {
            format!("#!java @{class_name}")
        } else {
            class_name.to_string()
        };
        Ok(LinkRepresentation::new(label, context.links.class_page(class)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indexing::DeclarationIndex;
    use crate::link::LinkBuilder;
    use crate::resolution::fixtures::{class_metadata, facade_metadata, index_of};
    use serde_json::json;

    fn resolve(index: &DeclarationIndex, query: &str) -> ResolutionResult<LinkRepresentation> {
        let links = LinkBuilder::default();
        ClassResolver.resolve(
            ResolutionContext::new(index, &links),
            &ParsedRequest::for_identifier(query),
        )
    }

    #[test]
    fn test_nested_class_page() {
        let index = index_of(vec![(
            "io/github/bot/api/OuterClass$InnerClass",
            class_metadata("class", json!({})),
        )]);

        let link = resolve(&index, "OuterClass.InnerClass").unwrap();
        assert_eq!(link.label, "OuterClass.InnerClass");
        assert_eq!(
            link.url,
            "https://docs.example/core/io/github/bot/api/outer-class/inner-class/index.html"
        );
    }

    #[test]
    fn test_annotation_label() {
        let index = index_of(vec![(
            "bot/api/annotations/Command",
            class_metadata("annotation_class", json!({})),
        )]);

        let link = resolve(&index, "Command").unwrap();
        assert_eq!(link.label, "#!java @Command");
        assert_eq!(
            link.url,
            "https://docs.example/core/bot/api/annotations/command/index.html"
        );
    }

    #[test]
    fn test_duplicate_class_names_are_ambiguous() {
        let index = index_of(vec![
            ("bot/api/Event", class_metadata("class", json!({}))),
            ("bot/internal/Event", class_metadata("interface", json!({}))),
        ]);

        assert_eq!(
            resolve(&index, "Event"),
            Err(ResolutionError::ambiguous(
                "Event",
                vec!["bot.api.Event".to_string(), "bot.internal.Event".to_string()]
            ))
        );
    }

    #[test]
    fn test_facade_is_not_a_class() {
        let index = index_of(vec![("bot/util/UtilsKt", facade_metadata("core", json!({})))]);

        assert_eq!(
            resolve(&index, "UtilsKt"),
            Err(ResolutionError::not_found("'bot.util.UtilsKt' is not a class"))
        );
    }

    #[test]
    fn test_unknown_class() {
        let index = index_of(vec![]);
        assert_eq!(
            resolve(&index, "Missing"),
            Err(ResolutionError::not_found("'Missing' was not found"))
        );
    }
}
