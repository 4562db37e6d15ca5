//! Declaration metadata decoding
//!
//! Every compiled class may carry a metadata blob describing the
//! language-level declarations behind it. This module turns a raw blob into a
//! typed [`DecodedMetadata`]. Decoding is strict: anything the resolver could
//! not trust (unknown kinds, newer schema versions, missing module names,
//! dangling type parameter references) is rejected, and the index builder
//! skips the class.

use serde::{Deserialize, Serialize};

use crate::declaration::Member;
use crate::error::{MetadataError, MetadataResult};
use crate::types::{ClassKind, MetadataKind};

/// Newest metadata schema this decoder understands
pub const SUPPORTED_METADATA_VERSION: [u32; 3] = [2, 1, 0];

/// Metadata blob exactly as stored next to the compiled class
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMetadata {
    pub version: [u32; 3],
    pub kind: MetadataKind,
    #[serde(default)]
    pub module: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_kind: Option<ClassKind>,
    #[serde(default)]
    pub functions: Vec<Member>,
    #[serde(default)]
    pub properties: Vec<Member>,
    #[serde(default)]
    pub enum_entries: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub companion_object: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedMetadata {
    Class(DecodedClass),
    Package(DecodedPackage),
    /// Metadata that declares nothing resolvable (multi-file facades, synthetic classes)
    Other(MetadataKind),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedClass {
    pub module: String,
    pub kind: ClassKind,
    pub functions: Vec<Member>,
    pub properties: Vec<Member>,
    pub enum_entries: Vec<String>,
    pub companion_object: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPackage {
    /// `FileFacade` or `MultiFileClassPart`
    pub kind: MetadataKind,
    pub module: String,
    pub functions: Vec<Member>,
    pub properties: Vec<Member>,
}

/// Decode one class's metadata blob
pub fn decode(blob: &serde_json::Value) -> MetadataResult<DecodedMetadata> {
    let raw = RawMetadata::deserialize(blob)?;

    if raw.version[0] > SUPPORTED_METADATA_VERSION[0] {
        return Err(MetadataError::UnsupportedVersion {
            found: raw.version,
            supported: SUPPORTED_METADATA_VERSION,
        });
    }

    match raw.kind {
        MetadataKind::Class => {
            let module = require_module(&raw)?;
            let kind = raw.class_kind.ok_or(MetadataError::MissingClassKind)?;
            check_members(&raw.functions)?;
            check_members(&raw.properties)?;
            Ok(DecodedMetadata::Class(DecodedClass {
                module,
                kind,
                functions: raw.functions,
                properties: raw.properties,
                enum_entries: raw.enum_entries,
                companion_object: raw.companion_object,
            }))
        }
        MetadataKind::FileFacade | MetadataKind::MultiFileClassPart => {
            let module = require_module(&raw)?;
            check_members(&raw.functions)?;
            check_members(&raw.properties)?;
            Ok(DecodedMetadata::Package(DecodedPackage {
                kind: raw.kind,
                module,
                functions: raw.functions,
                properties: raw.properties,
            }))
        }
        kind @ (MetadataKind::MultiFileClassFacade | MetadataKind::SyntheticClass) => {
            Ok(DecodedMetadata::Other(kind))
        }
    }
}

fn require_module(raw: &RawMetadata) -> MetadataResult<String> {
    if raw.module.is_empty() {
        Err(MetadataError::MissingModule)
    } else {
        Ok(raw.module.clone())
    }
}

fn check_members(members: &[Member]) -> MetadataResult<()> {
    for member in members {
        if let Some(&id) = member.undeclared_type_parameters().first() {
            return Err(MetadataError::UnknownTypeParameter {
                member: member.name.clone(),
                id,
            });
        }
    }
    Ok(())
}
