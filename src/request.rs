//! Parsing of raw link queries.
//!
//! A query is an identifier optionally followed by `key=value` flags:
//!
//! ```text
//! Foo#bar type=property
//! sayHello type=function|property
//! ```
//!
//! Only the `type` flag is understood; other keys are ignored.

use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use crate::error::{ResolutionError, ResolutionResult};
use crate::types::DeclarationTypes;

static FLAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+)=([\w|]+)").expect("flag pattern is valid"));

/// A query split into its identifier and the declaration kinds it may resolve to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequest {
    pub identifier: String,
    pub declaration_types: DeclarationTypes,
}

impl ParsedRequest {
    pub fn parse(query: &str) -> ResolutionResult<Self> {
        let (identifier, flags) = query
            .split_once(char::is_whitespace)
            .unwrap_or((query, ""));

        if identifier.is_empty() {
            return Err(ResolutionError::EmptyIdentifier);
        }

        let flags: HashMap<&str, &str> = FLAG_REGEX
            .captures_iter(flags)
            .filter_map(|captures| {
                let key = captures.get(1)?.as_str();
                let value = captures.get(2)?.as_str();
                Some((key, value))
            })
            .collect();

        let declaration_types = match flags.get("type") {
            None => DeclarationTypes::all(),
            Some(types) => parse_types(types)?,
        };

        Ok(Self {
            identifier: identifier.to_string(),
            declaration_types,
        })
    }

    /// Request for `identifier` with every declaration kind allowed
    pub fn for_identifier(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            declaration_types: DeclarationTypes::all(),
        }
    }

    pub fn functions_requested(&self) -> bool {
        self.declaration_types.functions_requested()
    }

    pub fn properties_requested(&self) -> bool {
        self.declaration_types.properties_requested()
    }
}

fn parse_types(value: &str) -> ResolutionResult<DeclarationTypes> {
    value
        .split('|')
        .try_fold(DeclarationTypes::empty(), |types, name| {
            let parsed = name
                .parse::<DeclarationTypes>()
                .map_err(|kind| ResolutionError::InvalidFilterKind { kind })?;
            Ok(types | parsed)
        })
}

impl fmt::Display for ParsedRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ParsedRequest(identifier='{}', declaration_types={:?})",
            self.identifier, self.declaration_types
        )
    }
}
