//! Documentation URLs and the links handed back to callers.
//!
//! URL layout under the documentation root:
//!
//! ```text
//! <root>/<module>/<package as path>/<nested class path>/index.html
//! <root>/<module>/<package as path>/<nested class path>/<member>.html
//! <root>/<module>/<package as path>/<nested class path>/<enum entry>/index.html
//! ```
//!
//! The module, every nested class name and the member name are converted with
//! [`to_doc_case`] one segment at a time. Package segments are used as is.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::declaration::{ClassDeclaration, PackageFacadeDeclaration};
use crate::types::MemberKind;

/// Default documentation root
pub const DEFAULT_DOC_ROOT: &str = "https://docs.example";

/// A resolved documentation link
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkRepresentation {
    pub label: String,
    pub url: String,
}

impl LinkRepresentation {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

impl fmt::Display for LinkRepresentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]({})", self.label, self.url)
    }
}

/// Builds documentation URLs below a fixed root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkBuilder {
    root: String,
}

impl Default for LinkBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_DOC_ROOT)
    }
}

impl LinkBuilder {
    pub fn new(root: impl Into<String>) -> Self {
        let mut root = root.into();
        while root.ends_with('/') {
            root.pop();
        }
        Self { root }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// Link to the directory of a package, or of a class when `nested_path`
    /// is a dotted class path such as `Outer.Inner`
    pub fn base_link(&self, module: &str, package: &str, nested_path: &str) -> String {
        let mut link = format!("{}/{}", self.root, to_doc_case(module));

        for segment in package.split('.').filter(|segment| !segment.is_empty()) {
            link.push('/');
            link.push_str(segment);
        }
        for segment in nested_path.split('.').filter(|segment| !segment.is_empty()) {
            link.push('/');
            link.push_str(&to_doc_case(segment));
        }

        link
    }

    pub fn class_base(&self, class: &ClassDeclaration) -> String {
        self.base_link(&class.module, &class.package, &class.simple_nested_name)
    }

    pub fn facade_base(&self, facade: &PackageFacadeDeclaration) -> String {
        self.base_link(&facade.module, &facade.package, "")
    }

    /// Page of a class itself
    pub fn class_page(&self, class: &ClassDeclaration) -> String {
        format!("{}/index.html", self.class_base(class))
    }

    /// Page of a member below `base`. Enum entries get their own directory.
    pub fn member_link(base: &str, member_name: &str, kind: MemberKind) -> String {
        let member = to_doc_case(member_name);
        match kind {
            MemberKind::Function | MemberKind::Property => format!("{base}/{member}.html"),
            MemberKind::EnumEntry => format!("{base}/{member}/index.html"),
        }
    }
}

/// Lower-case a single path segment, putting a hyphen before every uppercase
/// letter that does not start the segment: `MyClass` -> `my-class`,
/// `sayHello` -> `say-hello`.
pub fn to_doc_case(segment: &str) -> String {
    let mut converted = String::with_capacity(segment.len() + 4);
    for (position, c) in segment.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if position > 0 {
                converted.push('-');
            }
            converted.push(c.to_ascii_lowercase());
        } else {
            converted.push(c);
        }
    }
    converted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_doc_case() {
        assert_eq!(to_doc_case("MyClass"), "my-class");
        assert_eq!(to_doc_case("simpleName"), "simple-name");
        assert_eq!(to_doc_case("already-lower"), "already-lower");
        assert_eq!(to_doc_case("ENTRY"), "e-n-t-r-y");
        assert_eq!(to_doc_case(""), "");
    }

    #[test]
    fn test_to_doc_case_is_idempotent() {
        for segment in ["MyClass", "sayHello", "BotCommands-core", "x"] {
            let once = to_doc_case(segment);
            assert_eq!(to_doc_case(&once), once);
        }
    }

    #[test]
    fn test_base_link_converts_each_segment() {
        let links = LinkBuilder::new("https://docs.example/");
        assert_eq!(
            links.base_link("BotCommands-core", "io.github.bot.api", "OuterClass.InnerClass"),
            "https://docs.example/bot-commands-core/io/github/bot/api/outer-class/inner-class"
        );
    }

    #[test]
    fn test_base_link_without_package_or_class() {
        let links = LinkBuilder::default();
        assert_eq!(links.base_link("core", "", ""), "https://docs.example/core");
    }

    #[test]
    fn test_member_links() {
        let base = "https://docs.example/core/bot/util";
        assert_eq!(
            LinkBuilder::member_link(base, "sayHello", MemberKind::Function),
            "https://docs.example/core/bot/util/say-hello.html"
        );
        assert_eq!(
            LinkBuilder::member_link(base, "isReady", MemberKind::Property),
            "https://docs.example/core/bot/util/is-ready.html"
        );
        assert_eq!(
            LinkBuilder::member_link(base, "FirstEntry", MemberKind::EnumEntry),
            "https://docs.example/core/bot/util/first-entry/index.html"
        );
    }

    #[test]
    fn test_link_representation_json_shape() {
        let link = LinkRepresentation::new("Foo.bar", "https://docs.example/core/foo/bar.html");
        let json = serde_json::to_value(&link).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"label": "Foo.bar", "url": "https://docs.example/core/foo/bar.html"})
        );
    }
}
