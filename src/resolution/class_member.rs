//! Resolution of `ClassName#memberName` queries.
//!
//! Members are looked up on every class sharing the requested simple name and
//! on their companion objects. Overloads of a function share one page, so a
//! class contributes at most one function candidate per name.

use tracing::trace;

use super::{Candidates, ResolutionContext, Resolver};
use crate::declaration::{ClassDeclaration, ClassEntry};
use crate::error::{ResolutionError, ResolutionResult};
use crate::link::{LinkBuilder, LinkRepresentation};
use crate::request::ParsedRequest;
use crate::types::MemberKind;

#[derive(Debug, Default, Clone, Copy)]
pub struct ClassMemberResolver;

impl Resolver for ClassMemberResolver {
    fn resolve(
        &self,
        context: ResolutionContext<'_>,
        request: &ParsedRequest,
    ) -> ResolutionResult<LinkRepresentation> {
        let identifier = request.identifier.as_str();
        let (class_name, member_name) = split_member_identifier(identifier)?;

        let entries = context.index.find_by_simple_name(class_name);
        if entries.is_empty() {
            return Err(ResolutionError::not_found(format!(
                "'{class_name}' was not found"
            )));
        }

        let candidates = entries
            .iter()
            .map(|entry| (entry, entry_candidates(context, entry, member_name, request)))
            .fold(Candidates::new(), |mut candidates, (entry, result)| {
                match result {
                    Ok(links) => candidates.extend(links),
                    Err(e) => trace!(
                        "Failed to get member candidates of '{}': {e}",
                        entry.display_name()
                    ),
                }
                candidates
            });

        candidates.into_single(identifier, || {
            format!("'{member_name}' is neither a function, property or enum value in '{class_name}'")
        })
    }
}

/// Split `Class#member`; anything but exactly one `#` is malformed
fn split_member_identifier(identifier: &str) -> ResolutionResult<(&str, &str)> {
    let mut parts = identifier.split('#');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(class_name), Some(member_name), None) => Ok((class_name, member_name)),
        _ => Err(ResolutionError::MalformedMemberIdentifier {
            identifier: identifier.to_string(),
        }),
    }
}

fn entry_candidates(
    context: ResolutionContext<'_>,
    entry: &ClassEntry,
    member_name: &str,
    request: &ParsedRequest,
) -> ResolutionResult<Vec<(MemberKind, LinkRepresentation)>> {
    let class = entry.as_class().ok_or_else(|| {
        ResolutionError::not_found(format!("'{}' is not a class", entry.display_name()))
    })?;

    let mut links = Vec::new();
    collect_members(
        context,
        class,
        &class.simple_nested_name,
        member_name,
        request,
        &mut links,
    );
    Ok(links)
}

/// Collect the members of `class` named `member_name`, then those of its
/// companion. Labels always use `display_name`, the class that was asked for.
fn collect_members(
    context: ResolutionContext<'_>,
    class: &ClassDeclaration,
    display_name: &str,
    member_name: &str,
    request: &ParsedRequest,
    links: &mut Vec<(MemberKind, LinkRepresentation)>,
) {
    let base = context.links.class_base(class);
    let label = format!("{display_name}.{member_name}");
    let link = |kind| {
        let url = LinkBuilder::member_link(&base, member_name, kind);
        (kind, LinkRepresentation::new(label.clone(), url))
    };

    if request.functions_requested()
        && class
            .functions
            .iter()
            .any(|function| function.name == member_name)
    {
        links.push(link(MemberKind::Function));
    }

    if request.properties_requested() {
        links.extend(
            class
                .properties
                .iter()
                .filter(|property| property.name == member_name)
                .map(|_| link(MemberKind::Property)),
        );
    }

    links.extend(
        class
            .enum_entries
            .iter()
            .filter(|entry| entry.as_str() == member_name)
            .map(|_| link(MemberKind::EnumEntry)),
    );

    if let Some(companion) = context.index.companion_of(class) {
        collect_members(context, companion, display_name, member_name, request, links);
    }
}
