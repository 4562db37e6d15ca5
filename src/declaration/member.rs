//! Function and property declarations, with the type descriptors needed to
//! render extension receivers.
//!
//! Receiver types and type parameters are display-only. Resolution matches
//! members by name alone.

use serde::{Deserialize, Serialize};

/// A function or property declared by a class or a package facade
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    /// Present when the member is an extension
    #[serde(default)]
    pub receiver: Option<TypeDescriptor>,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameter>,
}

pub type FunctionMember = Member;
pub type PropertyMember = Member;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeParameter {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    pub classifier: Classifier,
    #[serde(default)]
    pub arguments: Vec<TypeProjection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classifier {
    /// Internal class name, `/` between packages and `.` between nested classes
    Class(String),
    TypeParameter(u32),
    TypeAlias(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variance {
    #[default]
    Invariant,
    In,
    Out,
}

/// A type argument; `ty` is `None` for a star projection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeProjection {
    #[serde(default)]
    pub variance: Variance,
    #[serde(rename = "type", default)]
    pub ty: Option<TypeDescriptor>,
}

impl Member {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            receiver: None,
            type_parameters: Vec::new(),
        }
    }

    pub fn with_receiver(mut self, receiver: TypeDescriptor) -> Self {
        self.receiver = Some(receiver);
        self
    }

    pub fn with_type_parameter(mut self, id: u32, name: impl Into<String>) -> Self {
        self.type_parameters.push(TypeParameter {
            id,
            name: name.into(),
        });
        self
    }

    pub fn is_extension(&self) -> bool {
        self.receiver.is_some()
    }

    pub fn type_parameter(&self, id: u32) -> Option<&TypeParameter> {
        self.type_parameters.iter().find(|param| param.id == id)
    }

    /// Receiver-qualified display name, e.g. `List<out T>.firstOrNull`
    pub fn qualified_name(&self) -> String {
        match &self.receiver {
            Some(receiver) => format!("{}.{}", receiver.render(self), self.name),
            None => self.name.clone(),
        }
    }

    /// Type parameter ids referenced by the receiver that this member does not declare
    pub(crate) fn undeclared_type_parameters(&self) -> Vec<u32> {
        let mut ids = Vec::new();
        if let Some(receiver) = &self.receiver {
            receiver.collect_type_parameters(&mut ids);
        }
        ids.retain(|id| self.type_parameter(*id).is_none());
        ids
    }
}

impl TypeDescriptor {
    pub fn class(name: impl Into<String>) -> Self {
        Self {
            classifier: Classifier::Class(name.into()),
            arguments: Vec::new(),
        }
    }

    pub fn type_parameter(id: u32) -> Self {
        Self {
            classifier: Classifier::TypeParameter(id),
            arguments: Vec::new(),
        }
    }

    pub fn with_argument(mut self, variance: Variance, ty: TypeDescriptor) -> Self {
        self.arguments.push(TypeProjection {
            variance,
            ty: Some(ty),
        });
        self
    }

    pub fn with_star_argument(mut self) -> Self {
        self.arguments.push(TypeProjection {
            variance: Variance::Invariant,
            ty: None,
        });
        self
    }

    /// Render this type the way it is written in source, resolving type
    /// parameters against `owner`.
    pub fn render(&self, owner: &Member) -> String {
        let classifier = match &self.classifier {
            Classifier::Class(name) | Classifier::TypeAlias(name) => simple_nested_name(name),
            Classifier::TypeParameter(id) => owner
                .type_parameter(*id)
                .map(|param| param.name.clone())
                // Decoding rejects undeclared ids, this only shows up for hand-built members
                .unwrap_or_else(|| "*".to_string()),
        };

        if self.arguments.is_empty() {
            return classifier;
        }

        let arguments: Vec<String> = self
            .arguments
            .iter()
            .map(|projection| projection.render(owner))
            .collect();
        format!("{classifier}<{}>", arguments.join(", "))
    }

    fn collect_type_parameters(&self, ids: &mut Vec<u32>) {
        if let Classifier::TypeParameter(id) = self.classifier {
            ids.push(id);
        }
        for argument in &self.arguments {
            if let Some(ty) = &argument.ty {
                ty.collect_type_parameters(ids);
            }
        }
    }
}

impl TypeProjection {
    fn render(&self, owner: &Member) -> String {
        let Some(ty) = &self.ty else {
            return "*".to_string();
        };
        let rendered = ty.render(owner);
        match self.variance {
            Variance::Invariant => rendered,
            Variance::In => format!("in {rendered}"),
            Variance::Out => format!("out {rendered}"),
        }
    }
}

/// `kotlin/collections/List` -> `List`, `a/b/Outer.Inner` -> `Outer.Inner`
fn simple_nested_name(internal_name: &str) -> String {
    let start = internal_name
        .find(|c: char| c.is_uppercase())
        .unwrap_or(internal_name.len());
    internal_name[start..].replace('/', ".")
}
