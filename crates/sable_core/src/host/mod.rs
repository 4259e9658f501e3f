//! Host symbol-catalog manifest.
//!
//! The compiler validates calls, constructors and attributes against the types the host ecosystem
//! provides. Instead of reflecting over a running host, every host module is described by a
//! declarative `const` table generated ahead of time by a per-ecosystem adapter. This module holds
//! the table shapes and the shipped tables; the lookup algorithms (indexing, generic resolution,
//! fuzzy matching) live in the compiler's `frontend::catalog`.
//!
//! ## Notes
//! - Type names use host metadata spelling: generic templates carry an arity suffix
//!   (``List`1``, ``Dictionary`2``) which the catalog strips when indexing.
//! - An empty `targets` list on an [`AttributeDef`] means "valid on every target".
//! - A module is identified by its `name`; scanning the same module twice is a no-op in the catalog.
//!
//! ## Examples
//! ```rust
//! use sable_core::host;
//!
//! let system = host::module("System").unwrap();
//! assert!(system.types.iter().any(|t| t.name == "Console"));
//! assert!(host::module("Sable").is_some());
//! ```

mod annotations;
mod collections;
mod io;
mod stdlib;
mod system;

pub use annotations::{DATA_ANNOTATIONS, WEB};
pub use collections::COLLECTIONS;
pub use io::{IO, TEXT};
pub use stdlib::STDLIB;
pub use system::SYSTEM;

use std::fmt;

/// Separator between a generic template's base name and its arity in metadata names.
pub const ARITY_MARKER: char = '`';

/// Root namespace of the host ecosystem; the catalog registers namespace-stripped aliases below it.
pub const HOST_ROOT_NAMESPACE: &str = "System";

/// A scannable unit of the host ecosystem (one namespace worth of declarations).
#[derive(Debug, Clone, Copy)]
pub struct HostModule {
    pub name: &'static str,
    pub namespace: &'static str,
    pub types: &'static [TypeDef],
    /// Free functions (only the language's own standard library declares these).
    pub functions: &'static [MethodDef],
    pub attributes: &'static [AttributeDef],
}

/// Kind of a host type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Primitive,
    Class,
    Struct,
    Interface,
    Enum,
}

/// A host type descriptor.
#[derive(Debug, Clone, Copy)]
pub struct TypeDef {
    /// Metadata name, including the arity suffix for generic templates.
    pub name: &'static str,
    pub kind: TypeKind,
    pub base: Option<&'static str>,
    pub generic_params: &'static [&'static str],
    pub constructors: &'static [CtorDef],
    pub methods: &'static [MethodDef],
    pub fields: &'static [&'static str],
}

/// One constructor overload.
#[derive(Debug, Clone, Copy)]
pub struct CtorDef {
    pub params: &'static [ParamDef],
}

/// One method overload.
#[derive(Debug, Clone, Copy)]
pub struct MethodDef {
    pub name: &'static str,
    pub params: &'static [ParamDef],
    pub returns: &'static str,
    pub is_static: bool,
}

/// A parameter of a host method, constructor or attribute constructor.
#[derive(Debug, Clone, Copy)]
pub struct ParamDef {
    pub name: &'static str,
    pub ty: &'static str,
    /// Has a default value in the host declaration.
    pub optional: bool,
    /// Trailing "rest" parameter accepting any number of arguments.
    pub variadic: bool,
}

/// Declarations an attribute may be applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeTarget {
    Class,
    Struct,
    Enum,
    Interface,
    Method,
    Constructor,
    Property,
    Field,
    Parameter,
    Module,
    Assembly,
}

impl AttributeTarget {
    /// Every target, in declaration order.
    pub const ALL: &'static [AttributeTarget] = &[
        AttributeTarget::Class,
        AttributeTarget::Struct,
        AttributeTarget::Enum,
        AttributeTarget::Interface,
        AttributeTarget::Method,
        AttributeTarget::Constructor,
        AttributeTarget::Property,
        AttributeTarget::Field,
        AttributeTarget::Parameter,
        AttributeTarget::Module,
        AttributeTarget::Assembly,
    ];

    /// Lowercase spelling, as used in `[assembly: ...]` target prefixes.
    pub fn as_str(self) -> &'static str {
        match self {
            AttributeTarget::Class => "class",
            AttributeTarget::Struct => "struct",
            AttributeTarget::Enum => "enum",
            AttributeTarget::Interface => "interface",
            AttributeTarget::Method => "method",
            AttributeTarget::Constructor => "constructor",
            AttributeTarget::Property => "property",
            AttributeTarget::Field => "field",
            AttributeTarget::Parameter => "parameter",
            AttributeTarget::Module => "module",
            AttributeTarget::Assembly => "assembly",
        }
    }

    /// Resolve a lowercase target spelling.
    pub fn from_str(s: &str) -> Option<AttributeTarget> {
        Self::ALL.iter().copied().find(|t| t.as_str() == s)
    }
}

impl fmt::Display for AttributeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A host attribute (decorator) definition.
#[derive(Debug, Clone, Copy)]
pub struct AttributeDef {
    /// Type name, conventionally ending in `Attribute`.
    pub name: &'static str,
    pub targets: &'static [AttributeTarget],
    pub allow_multiple: bool,
    /// Parameters of the primary constructor.
    pub params: &'static [ParamDef],
}

impl AttributeDef {
    /// Return `true` if the attribute may be applied to `target`.
    pub fn permits(&self, target: AttributeTarget) -> bool {
        self.targets.is_empty() || self.targets.contains(&target)
    }
}

/// Host modules scanned by default (the language's own standard library is separate: [`STDLIB`]).
pub const HOST_MODULES: &[&HostModule] = &[&SYSTEM, &COLLECTIONS, &IO, &TEXT, &DATA_ANNOTATIONS, &WEB];

/// Look up a module (host or standard library) by identity.
pub fn module(name: &str) -> Option<&'static HostModule> {
    HOST_MODULES
        .iter()
        .copied()
        .chain(std::iter::once(&STDLIB))
        .find(|m| m.name == name)
}

/// Split a metadata name into its base name and generic arity (``List`1`` → `("List", 1)`).
pub fn split_arity(name: &str) -> (&str, usize) {
    match name.split_once(ARITY_MARKER) {
        Some((base, arity)) => (base, arity.parse().unwrap_or(0)),
        None => (name, 0),
    }
}

// --- table helpers -------------------------------------------------------------

pub(crate) const fn param(name: &'static str, ty: &'static str) -> ParamDef {
    ParamDef {
        name,
        ty,
        optional: false,
        variadic: false,
    }
}

pub(crate) const fn optional(name: &'static str, ty: &'static str) -> ParamDef {
    ParamDef {
        name,
        ty,
        optional: true,
        variadic: false,
    }
}

pub(crate) const fn rest(name: &'static str, ty: &'static str) -> ParamDef {
    ParamDef {
        name,
        ty,
        optional: false,
        variadic: true,
    }
}

pub(crate) const fn method(name: &'static str, params: &'static [ParamDef], returns: &'static str) -> MethodDef {
    MethodDef {
        name,
        params,
        returns,
        is_static: false,
    }
}

pub(crate) const fn static_method(
    name: &'static str,
    params: &'static [ParamDef],
    returns: &'static str,
) -> MethodDef {
    MethodDef {
        name,
        params,
        returns,
        is_static: true,
    }
}

pub(crate) const fn ctor(params: &'static [ParamDef]) -> CtorDef {
    CtorDef { params }
}

pub(crate) const fn class(
    name: &'static str,
    base: Option<&'static str>,
    constructors: &'static [CtorDef],
    methods: &'static [MethodDef],
) -> TypeDef {
    TypeDef {
        name,
        kind: TypeKind::Class,
        base,
        generic_params: &[],
        constructors,
        methods,
        fields: &[],
    }
}

pub(crate) const fn generic(
    name: &'static str,
    kind: TypeKind,
    generic_params: &'static [&'static str],
    constructors: &'static [CtorDef],
    methods: &'static [MethodDef],
) -> TypeDef {
    TypeDef {
        name,
        kind,
        base: None,
        generic_params,
        constructors,
        methods,
        fields: &[],
    }
}

pub(crate) const fn primitive(name: &'static str, methods: &'static [MethodDef], fields: &'static [&'static str]) -> TypeDef {
    TypeDef {
        name,
        kind: TypeKind::Primitive,
        base: None,
        generic_params: &[],
        constructors: &[],
        methods,
        fields,
    }
}

pub(crate) const fn attribute(
    name: &'static str,
    targets: &'static [AttributeTarget],
    allow_multiple: bool,
    params: &'static [ParamDef],
) -> AttributeDef {
    AttributeDef {
        name,
        targets,
        allow_multiple,
        params,
    }
}
