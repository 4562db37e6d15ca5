//! Resolution of top-level functions and properties, extensions included.

use super::{Candidates, ResolutionContext, Resolver};
use crate::declaration::Member;
use crate::error::ResolutionResult;
use crate::link::{LinkBuilder, LinkRepresentation};
use crate::request::ParsedRequest;
use crate::types::MemberKind;

/// Matches the identifier against every package facade in the index.
///
/// Receivers are rendered into function labels but never matched:
/// `firstOrNull` finds the extension `List<out T>.firstOrNull`. Property
/// labels are the plain name.
#[derive(Debug, Default, Clone, Copy)]
pub struct TopLevelResolver;

impl Resolver for TopLevelResolver {
    fn resolve(
        &self,
        context: ResolutionContext<'_>,
        request: &ParsedRequest,
    ) -> ResolutionResult<LinkRepresentation> {
        let identifier = request.identifier.as_str();
        let mut candidates = Candidates::new();

        for facade in context.index.package_facades() {
            let base = context.links.facade_base(facade);
            if request.functions_requested() {
                candidates.extend(links_for(
                    &base,
                    &facade.functions,
                    identifier,
                    MemberKind::Function,
                ));
            }
            if request.properties_requested() {
                candidates.extend(links_for(
                    &base,
                    &facade.properties,
                    identifier,
                    MemberKind::Property,
                ));
            }
        }

        candidates.into_single(identifier, || {
            format!("'{identifier}' is neither a top-level function or property")
        })
    }
}

fn links_for<'a>(
    base: &'a str,
    members: &'a [Member],
    identifier: &'a str,
    kind: MemberKind,
) -> impl Iterator<Item = (MemberKind, LinkRepresentation)> + 'a {
    members
        .iter()
        .filter(move |member| member.name == identifier)
        .map(move |member| {
            let label = match kind {
                MemberKind::Function => member.qualified_name(),
                _ => member.name.clone(),
            };
            let link = LinkRepresentation::new(
                label,
                LinkBuilder::member_link(base, &member.name, kind),
            );
            (kind, link)
        })
}
