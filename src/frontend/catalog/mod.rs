//! Host Symbol Catalog: indexed view over the host manifest in `sable_core::host`.
//!
//! The catalog answers "does the host provide this type / method / namespace?" for the symbol
//! registry. Modules are scanned on request and each module is indexed at most once. Types are
//! reachable by simple name, by `Namespace.Name` and, below the host root namespace, by the
//! root-stripped name (`IO.File`). Methods are reachable by `name`, `Type.name` and
//! `Namespace.Type.name`.
//!
//! ## Type resolution order
//!
//! 1. the user-type-resolution callback, when installed (never cached),
//! 2. memoized handles,
//! 3. nullable suffix `T?` (resolves as `T`),
//! 4. array suffix `T[]`,
//! 5. generic application `Base<args>` against arity-stripped templates,
//! 6. exact match, then case-insensitive match,
//! 7. primitive aliases (`int`, `string`, ...).

mod generics;
mod types;

pub use generics::{is_placeholder, split_application, split_args};
pub use types::{HostType, TypeHandle, TypeShape};

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;

use sable_core::host::{self, HOST_ROOT_NAMESPACE, HostModule, MethodDef, ParamDef, TypeDef, split_arity};

/// Caller-supplied type lookup consulted before the host tables.
pub type TypeResolverFn = Rc<dyn Fn(&str) -> Option<TypeHandle>>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("unknown host module '{0}'")]
    UnknownModule(String),
}

/// A host type together with the namespace that declared it.
#[derive(Debug, Clone, Copy)]
pub struct TypeEntry {
    pub def: &'static TypeDef,
    pub namespace: &'static str,
}

impl TypeEntry {
    /// Name with the arity suffix removed (``List`1`` → `List`).
    pub fn simple_name(&self) -> &'static str {
        split_arity(self.def.name).0
    }
}

/// One method overload; `owner` is `None` for free functions.
#[derive(Debug, Clone, Copy)]
pub struct MethodEntry {
    pub def: &'static MethodDef,
    pub owner: Option<&'static str>,
    pub namespace: &'static str,
}

/// Whether a parameter list accepts `argc` arguments.
///
/// Optional parameters may be omitted; a trailing variadic parameter accepts any number of
/// arguments, including none.
pub fn accepts(params: &[ParamDef], argc: usize) -> bool {
    let required = params.iter().filter(|p| !p.optional && !p.variadic).count();
    let variadic = params.last().is_some_and(|p| p.variadic);
    argc >= required && (variadic || argc <= params.len())
}

/// Human-readable arity of a parameter list (`2`, `1..3`, `1+`).
pub fn arity_label(params: &[ParamDef]) -> String {
    let required = params.iter().filter(|p| !p.optional && !p.variadic).count();
    if params.last().is_some_and(|p| p.variadic) {
        format!("{required}+")
    } else if required == params.len() {
        required.to_string()
    } else {
        format!("{required}..{}", params.len())
    }
}

#[derive(Default)]
pub struct HostCatalog {
    scanned: HashSet<&'static str>,
    types: HashMap<String, TypeEntry>,
    types_ci: HashMap<String, String>,
    generics: HashMap<String, TypeEntry>,
    methods: HashMap<String, Vec<MethodEntry>>,
    namespaces: HashSet<String>,
    user_resolver: Option<TypeResolverFn>,
    cache: HashMap<String, TypeHandle>,
}

impl fmt::Debug for HostCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostCatalog")
            .field("scanned", &self.scanned)
            .field("types", &self.types.len())
            .field("methods", &self.methods.len())
            .field("user_resolver", &self.user_resolver.is_some())
            .finish()
    }
}

impl HostCatalog {
    /// An empty catalog; nothing resolves until modules are scanned.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_type_resolver(&mut self, resolver: TypeResolverFn) {
        self.user_resolver = Some(resolver);
        self.cache.clear();
    }

    /// Scan a module by name. Returns `Ok(false)` if it was already scanned.
    pub fn scan_named(&mut self, name: &str) -> Result<bool, CatalogError> {
        let module = host::module(name).ok_or_else(|| CatalogError::UnknownModule(name.to_string()))?;
        Ok(self.scan_module(module))
    }

    /// Index a module's types, methods and namespaces. Returns `false` if it was already scanned.
    pub fn scan_module(&mut self, module: &'static HostModule) -> bool {
        if !self.scanned.insert(module.name) {
            return false;
        }
        let ns = module.namespace;
        self.register_namespace(ns);

        for def in module.types {
            let entry = TypeEntry { def, namespace: ns };
            let (simple, arity) = split_arity(def.name);
            let full = format!("{ns}.{simple}");
            if let Some(stripped) = strip_host_root(&full) {
                self.insert_type(stripped.to_string(), entry);
            }
            self.insert_type(simple.to_string(), entry);
            self.insert_type(full.clone(), entry);
            if arity > 0 {
                self.generics.entry(simple.to_string()).or_insert(entry);
                self.generics.entry(full).or_insert(entry);
            }
            for method in def.methods {
                let entry = MethodEntry {
                    def: method,
                    owner: Some(simple),
                    namespace: ns,
                };
                for key in [
                    method.name.to_string(),
                    format!("{simple}.{}", method.name),
                    format!("{ns}.{simple}.{}", method.name),
                ] {
                    self.methods.entry(key).or_default().push(entry);
                }
            }
        }

        for function in module.functions {
            let entry = MethodEntry {
                def: function,
                owner: None,
                namespace: ns,
            };
            for key in [function.name.to_string(), format!("{ns}.{}", function.name)] {
                self.methods.entry(key).or_default().push(entry);
            }
        }

        tracing::debug!(
            module = module.name,
            types = module.types.len(),
            functions = module.functions.len(),
            "scanned host module"
        );
        true
    }

    fn insert_type(&mut self, key: String, entry: TypeEntry) {
        if self.types.contains_key(&key) {
            return;
        }
        self.types_ci.entry(key.to_lowercase()).or_insert_with(|| key.clone());
        self.types.insert(key, entry);
    }

    fn register_namespace(&mut self, ns: &str) {
        let mut prefix = String::new();
        for part in ns.split('.') {
            if !prefix.is_empty() {
                prefix.push('.');
            }
            prefix.push_str(part);
            self.namespaces.insert(prefix.clone());
        }
    }

    pub fn is_scanned(&self, module: &str) -> bool {
        self.scanned.contains(module)
    }

    pub fn scanned_modules(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.scanned.iter().copied()
    }

    pub fn is_namespace(&self, name: &str) -> bool {
        self.namespaces.contains(name)
    }

    pub fn type_entry(&self, name: &str) -> Option<&TypeEntry> {
        self.types.get(name)
    }

    /// Overloads registered under `key` (`WriteLine`, `Console.WriteLine`, `System.Console.WriteLine`).
    pub fn methods(&self, key: &str) -> &[MethodEntry] {
        self.methods.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Simple (undotted) method and function names, for suggestions.
    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str).filter(|k| !k.contains('.'))
    }

    /// Simple (undotted) type names, for suggestions.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str).filter(|k| !k.contains('.'))
    }

    /// Whether the host type `type_name` (or one of its host bases) declares `member`.
    pub fn has_member(&self, type_name: &str, member: &str) -> bool {
        self.member_names(type_name).any(|m| m == member)
    }

    /// Methods and fields of a host type, walking its host base chain.
    pub fn member_names(&self, type_name: &str) -> impl Iterator<Item = &'static str> + '_ {
        let mut chain = Vec::new();
        let mut next = self.lookup_entry(type_name).map(|e| e.def);
        while let Some(def) = next {
            if chain.iter().any(|seen: &&TypeDef| std::ptr::eq(*seen, def)) {
                break;
            }
            chain.push(def);
            next = def.base.and_then(|base| self.lookup_entry(base)).map(|e| e.def);
        }
        chain
            .into_iter()
            .flat_map(|def| def.methods.iter().map(|m| m.name).chain(def.fields.iter().copied()))
    }

    fn lookup_entry(&self, name: &str) -> Option<&TypeEntry> {
        self.types.get(name).or_else(|| {
            self.types_ci
                .get(&name.to_lowercase())
                .and_then(|key| self.types.get(key))
        })
    }

    /// Resolve a type spelling to a handle. Handles for host spellings are memoized by the
    /// whitespace-free spelling.
    pub fn resolve_type(&mut self, name: &str) -> Option<TypeHandle> {
        let key: String = name.chars().filter(|c| !c.is_whitespace()).collect();
        if key.is_empty() {
            return None;
        }
        if let Some(resolver) = &self.user_resolver {
            if let Some(handle) = resolver(&key) {
                return Some(handle);
            }
        }
        if let Some(handle) = self.cache.get(&key) {
            return Some(Rc::clone(handle));
        }
        let handle = self.resolve_uncached(&key)?;
        self.cache.insert(key, Rc::clone(&handle));
        Some(handle)
    }

    fn resolve_uncached(&mut self, key: &str) -> Option<TypeHandle> {
        if let Some(inner) = key.strip_suffix('?') {
            return self.resolve_type(inner);
        }
        if let Some(element) = key.strip_suffix("[]") {
            return self.resolve_type(element).map(HostType::array);
        }
        if let Some((base, inner)) = split_application(key) {
            return self.resolve_generic(base, inner);
        }
        if let Some(entry) = self.lookup_entry(key) {
            return Some(HostType::named(entry.simple_name(), entry.namespace, entry.def));
        }
        let canonical = primitive_alias(key)?;
        self.lookup_entry(canonical)
            .map(|entry| HostType::named(entry.simple_name(), entry.namespace, entry.def))
    }

    fn resolve_generic(&mut self, base: &str, inner: &str) -> Option<TypeHandle> {
        let template = match self.generics.get(base) {
            Some(entry) => *entry,
            None => {
                let lowered = base.to_lowercase();
                *self.generics.iter().find(|(k, _)| k.to_lowercase() == lowered)?.1
            }
        };
        let raw_args = split_args(inner);
        if raw_args.len() != template.def.generic_params.len() {
            return None;
        }
        let mut args = Vec::with_capacity(raw_args.len());
        for arg in raw_args {
            if is_placeholder(arg) && !self.types.contains_key(arg) {
                args.push(HostType::placeholder(arg));
            } else {
                args.push(self.resolve_type(arg)?);
            }
        }
        let simple = template.simple_name();
        let rendered = args.iter().map(|a| a.name.as_str()).collect::<Vec<_>>().join(", ");
        Some(Rc::new(HostType {
            name: format!("{simple}<{rendered}>"),
            namespace: Some(template.namespace),
            shape: TypeShape::Generic {
                template: template.def,
                args,
            },
        }))
    }
}

fn strip_host_root(full: &str) -> Option<&str> {
    full.strip_prefix(HOST_ROOT_NAMESPACE)?.strip_prefix('.')
}

/// Short spellings for host primitives.
fn primitive_alias(name: &str) -> Option<&'static str> {
    Some(match name {
        "int" => "Int32",
        "long" => "Int64",
        "short" => "Int16",
        "byte" => "Byte",
        "char" => "Char",
        "bool" => "Boolean",
        "float" | "double" => "Double",
        "decimal" => "Decimal",
        "string" => "String",
        "object" => "Object",
        "void" => "Void",
        _ => return None,
    })
}
