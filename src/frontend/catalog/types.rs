//! Resolved type handles handed out by the catalog.

use std::fmt;
use std::rc::Rc;

use sable_core::host::{TypeDef, TypeKind};

/// Shared handle to a resolved type. The catalog memoizes handles, so two resolutions of the same
/// spelling return pointer-equal handles.
pub type TypeHandle = Rc<HostType>;

/// What a resolved name refers to.
#[derive(Debug, Clone)]
pub enum TypeShape {
    /// A type declared by a scanned host module.
    Named(&'static TypeDef),
    /// A generic template applied to arguments (`Dictionary<String, Int32>`).
    Generic {
        template: &'static TypeDef,
        args: Vec<TypeHandle>,
    },
    Array(TypeHandle),
    /// An opaque generic parameter (`T`, `TKey`) that is never resolved further.
    Placeholder,
    /// A type supplied by the user-type-resolution callback.
    User,
}

#[derive(Debug, Clone)]
pub struct HostType {
    /// Canonical display name (`String`, `List<Int32>`, `Int32[]`).
    pub name: String,
    /// Declaring namespace; `None` for arrays, placeholders and user types.
    pub namespace: Option<&'static str>,
    pub shape: TypeShape,
}

impl HostType {
    pub fn named(name: impl Into<String>, namespace: &'static str, def: &'static TypeDef) -> TypeHandle {
        Rc::new(Self {
            name: name.into(),
            namespace: Some(namespace),
            shape: TypeShape::Named(def),
        })
    }

    pub fn array(element: TypeHandle) -> TypeHandle {
        Rc::new(Self {
            name: format!("{}[]", element.name),
            namespace: None,
            shape: TypeShape::Array(element),
        })
    }

    pub fn placeholder(name: &str) -> TypeHandle {
        Rc::new(Self {
            name: name.to_string(),
            namespace: None,
            shape: TypeShape::Placeholder,
        })
    }

    /// A handle for a type the caller's own resolver knows about.
    pub fn user(name: impl Into<String>) -> TypeHandle {
        Rc::new(Self {
            name: name.into(),
            namespace: None,
            shape: TypeShape::User,
        })
    }

    /// The host declaration behind this handle (the template for generic instantiations).
    pub fn definition(&self) -> Option<&'static TypeDef> {
        match &self.shape {
            TypeShape::Named(def) => Some(def),
            TypeShape::Generic { template, .. } => Some(template),
            _ => None,
        }
    }

    pub fn kind(&self) -> Option<TypeKind> {
        self.definition().map(|def| def.kind)
    }

    pub fn element(&self) -> Option<&TypeHandle> {
        match &self.shape {
            TypeShape::Array(element) => Some(element),
            _ => None,
        }
    }

    pub fn generic_args(&self) -> &[TypeHandle] {
        match &self.shape {
            TypeShape::Generic { args, .. } => args,
            _ => &[],
        }
    }

    /// `Namespace.Name` for host types, the plain name otherwise.
    pub fn qualified_name(&self) -> String {
        match self.namespace {
            Some(ns) => format!("{ns}.{}", self.name),
            None => self.name.clone(),
        }
    }
}

impl fmt::Display for HostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
