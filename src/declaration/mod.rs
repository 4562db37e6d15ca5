//! Declarations recovered from compiled class metadata.
//!
//! Everything here is immutable once the index has been built.

pub mod member;

pub use member::{
    Classifier, FunctionMember, Member, PropertyMember, TypeDescriptor, TypeParameter,
    TypeProjection, Variance,
};

use crate::types::{ClassId, ClassKind, MetadataKind};

/// A class, interface, object or enum with language-level metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDeclaration {
    /// Package plus nested name, e.g. `io.github.bot.api.Foo.Bar`
    pub qualified_name: String,
    /// Enclosing class names joined with `.`, e.g. `Foo.Bar`
    pub simple_nested_name: String,
    pub module: String,
    pub package: String,
    pub kind: ClassKind,
    pub functions: Vec<FunctionMember>,
    pub properties: Vec<PropertyMember>,
    pub enum_entries: Vec<String>,
    pub companion: Option<CompanionRef>,
}

/// Link from a class to its companion object, always present in the same index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanionRef {
    pub name: String,
    pub id: ClassId,
}

/// Carrier of the functions and properties declared at package level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageFacadeDeclaration {
    pub module: String,
    pub package: String,
    pub functions: Vec<FunctionMember>,
    pub properties: Vec<PropertyMember>,
}

/// One compiled class kept by the index, whatever its metadata describes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassEntry {
    /// `/`-separated package, `$`-separated nesting
    pub binary_name: String,
    pub package: String,
    pub simple_nested_name: String,
    pub shape: EntryShape,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryShape {
    Class(ClassDeclaration),
    /// Facades and synthetic classes are visible by name but declare no class
    NotAClass(MetadataKind),
}

impl ClassEntry {
    pub fn as_class(&self) -> Option<&ClassDeclaration> {
        match &self.shape {
            EntryShape::Class(class) => Some(class),
            EntryShape::NotAClass(_) => None,
        }
    }

    /// Binary name with dots, e.g. `io.github.bot.api.Foo$Bar`
    pub fn display_name(&self) -> String {
        self.binary_name.replace('/', ".")
    }
}

impl ClassDeclaration {
    pub fn is_annotation(&self) -> bool {
        self.kind == ClassKind::AnnotationClass
    }
}

/// Split a binary name such as `a/b/Outer$Inner` into its package (`a.b`)
/// and simple nested name (`Outer.Inner`)
pub fn split_binary_name(binary_name: &str) -> (String, String) {
    match binary_name.rsplit_once('/') {
        Some((package, simple)) => (package.replace('/', "."), simple.replace('$', ".")),
        None => (String::new(), binary_name.replace('$', ".")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_binary_name() {
        assert_eq!(
            split_binary_name("io/github/bot/api/Outer$Inner"),
            ("io.github.bot.api".to_string(), "Outer.Inner".to_string())
        );
        assert_eq!(
            split_binary_name("TopLevel"),
            (String::new(), "TopLevel".to_string())
        );
    }

    #[test]
    fn test_entry_display_name_keeps_nesting_separator() {
        let entry = ClassEntry {
            binary_name: "a/b/Outer$Inner".to_string(),
            package: "a.b".to_string(),
            simple_nested_name: "Outer.Inner".to_string(),
            shape: EntryShape::NotAClass(MetadataKind::SyntheticClass),
        };
        assert_eq!(entry.display_name(), "a.b.Outer$Inner");
        assert!(entry.as_class().is_none());
    }
}
