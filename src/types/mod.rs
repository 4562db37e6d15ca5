use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Position of a class entry inside the declaration index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassId(pub u32);

impl ClassId {
    pub fn from_index(index: usize) -> Option<Self> {
        u32::try_from(index).ok().map(Self)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Kind of a class declaration as recorded in its metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    Class,
    Interface,
    EnumClass,
    EnumEntry,
    AnnotationClass,
    Object,
    CompanionObject,
}

/// Kind of metadata carried by a compiled class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataKind {
    Class,
    FileFacade,
    MultiFileClassFacade,
    MultiFileClassPart,
    SyntheticClass,
}

impl fmt::Display for MetadataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MetadataKind::Class => "class",
            MetadataKind::FileFacade => "file facade",
            MetadataKind::MultiFileClassFacade => "multi-file class facade",
            MetadataKind::MultiFileClassPart => "multi-file class part",
            MetadataKind::SyntheticClass => "synthetic class",
        };
        f.write_str(name)
    }
}

/// Kind of the member a documentation link points to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Function,
    Property,
    EnumEntry,
}

bitflags! {
    /// Declaration kinds a query is allowed to resolve to.
    ///
    /// Enum entries are not filterable and always participate.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DeclarationTypes: u8 {
        const FUNCTION = 1;
        const PROPERTY = 1 << 1;
    }
}

impl DeclarationTypes {
    pub fn functions_requested(self) -> bool {
        self.contains(Self::FUNCTION)
    }

    pub fn properties_requested(self) -> bool {
        self.contains(Self::PROPERTY)
    }
}

impl Default for DeclarationTypes {
    fn default() -> Self {
        Self::all()
    }
}

impl FromStr for DeclarationTypes {
    type Err = String;

    /// Parse a single kind name, ignoring case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("function") {
            Ok(Self::FUNCTION)
        } else if s.eq_ignore_ascii_case("property") {
            Ok(Self::PROPERTY)
        } else {
            Err(s.to_string())
        }
    }
}
