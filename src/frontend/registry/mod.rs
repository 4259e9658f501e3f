//! Symbol Registry: the declarations of one compilation unit, plus the host catalog behind them.
//!
//! The parser feeds declarations in through [`SymbolChecker`] (first during its forward pass, then
//! again during the real parse) and asks the registry to validate every call, constructor and member
//! access it builds. Validation never fails hard: problems are reported and `false` is returned.
//!
//! ## Notes
//! - Declarations carrying the foreign marker (`[Extern]` and aliases) are never registered; their
//!   names are remembered as exempt so calls to them are not validated.
//! - Re-registering a class replaces the previous entry (last write wins).
//! - Signatures are deduplicated by source location, so the forward pass and the real parse
//!   registering the same declaration leave one signature behind.
//! - Declared type names are visible to the catalog's type resolver ahead of any caller-supplied
//!   resolver, so `List<Shape>` resolves once `Shape` is registered and unit types shadow host types.

mod validate;

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use sable_core::host::{self, AttributeTarget};
use sable_core::lang::attributes;
use sable_syntax::ast::{
    Attribute, ClassDecl, ClassKind, ClassMember, EnumDecl, Expr, FunctionDecl, InterfaceDecl, Location, Spanned,
    TypeExpr, Visibility,
};
use sable_syntax::checker::SymbolChecker;
use sable_syntax::diagnostics::{DiagnosticCode, Reporter};

use crate::frontend::attributes::AttributeResolver;
use crate::frontend::catalog::{CatalogError, HostCatalog, HostType, TypeResolverFn};
use crate::frontend::session::CatalogConfig;

/// A declared parameter; `ty` is the written type, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSig {
    pub name: String,
    pub ty: Option<String>,
}

impl ParamSig {
    /// Written with a trailing `?`, which the registry treats as "may be omitted".
    pub fn is_nullable(&self) -> bool {
        self.ty.as_deref().is_some_and(|ty| ty.ends_with('?'))
    }
}

/// Signature of a function or method declared in the unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    pub name: String,
    pub params: Vec<ParamSig>,
    pub return_type: Option<String>,
    /// Owning class for methods, `None` for free functions.
    pub owner: Option<String>,
    pub is_static: bool,
    pub loc: Location,
}

impl MethodSignature {
    pub fn from_decl(decl: &FunctionDecl, owner: Option<&str>, loc: Location) -> Self {
        Self {
            name: decl.name.clone(),
            params: decl
                .params
                .iter()
                .map(|p| ParamSig {
                    name: p.name.clone(),
                    ty: p.ty.as_ref().map(TypeExpr::to_string),
                })
                .collect(),
            return_type: decl.return_type.as_ref().map(TypeExpr::to_string),
            owner: owner.map(str::to_string),
            is_static: decl.is_static(),
            loc,
        }
    }

    /// Whether a call with `argc` arguments matches.
    ///
    /// Exact parameter count, or fewer arguments when every omitted parameter is nullable.
    pub fn matches_call(&self, argc: usize) -> bool {
        argc == self.params.len() || (argc < self.params.len() && self.params[argc..].iter().all(ParamSig::is_nullable))
    }
}

/// What kind of type declaration a [`ClassInfo`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Class,
    Struct,
    Interface,
    Enum,
}

impl DeclKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DeclKind::Class => "class",
            DeclKind::Struct => "struct",
            DeclKind::Interface => "interface",
            DeclKind::Enum => "enum",
        }
    }
}

/// A class, struct, interface or enum declared in the unit.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassInfo {
    pub name: String,
    pub kind: DeclKind,
    /// Base class and interfaces, as written (generic arguments dropped).
    pub bases: Vec<String>,
    /// Fields (enum variants for enums).
    pub fields: Vec<String>,
    pub properties: Vec<String>,
    pub methods: Vec<String>,
    /// Parameter count of each declared constructor.
    pub constructors: Vec<usize>,
    pub visibility: Visibility,
    pub loc: Location,
}

impl ClassInfo {
    fn empty(name: &str, kind: DeclKind, visibility: Visibility, loc: Location) -> Self {
        Self {
            name: name.to_string(),
            kind,
            bases: Vec::new(),
            fields: Vec::new(),
            properties: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            visibility,
            loc,
        }
    }

    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .chain(&self.properties)
            .chain(&self.methods)
            .map(String::as_str)
    }

    pub fn has_member(&self, name: &str) -> bool {
        self.member_names().any(|m| m == name)
    }
}

#[derive(Debug)]
pub struct SymbolRegistry {
    catalog: HostCatalog,
    attributes: AttributeResolver,
    functions: HashMap<String, Vec<MethodSignature>>,
    /// Methods keyed by `Class.method`.
    methods: HashMap<String, Vec<MethodSignature>>,
    classes: HashMap<String, ClassInfo>,
    exempt: HashSet<String>,
    namespaces: HashSet<String>,
    /// Names in `classes`, shared with the catalog's type resolver.
    declared_types: Rc<RefCell<HashSet<String>>>,
}

impl SymbolRegistry {
    pub fn new(catalog: HostCatalog, attributes: AttributeResolver) -> Self {
        Self::with_type_resolver(catalog, attributes, None)
    }

    /// Like [`SymbolRegistry::new`], consulting `fallback` for names the unit does not declare.
    ///
    /// Installs the catalog's type resolver, replacing one already set on `catalog`.
    pub fn with_type_resolver(
        mut catalog: HostCatalog,
        attributes: AttributeResolver,
        fallback: Option<TypeResolverFn>,
    ) -> Self {
        let declared_types: Rc<RefCell<HashSet<String>>> = Rc::default();
        let names = Rc::clone(&declared_types);
        catalog.set_type_resolver(Rc::new(move |name: &str| {
            if names.borrow().contains(name) {
                return Some(HostType::user(name));
            }
            fallback.as_ref().and_then(|resolve| resolve(name))
        }));
        Self {
            catalog,
            attributes,
            functions: HashMap::new(),
            methods: HashMap::new(),
            classes: HashMap::new(),
            exempt: HashSet::new(),
            namespaces: HashSet::new(),
            declared_types,
        }
    }

    /// Build the catalog and attribute resolver from `config`, scanning each module once.
    pub fn from_config(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let mut catalog = HostCatalog::new();
        let mut resolver = AttributeResolver::new();
        for name in config.module_names() {
            let module = host::module(name).ok_or_else(|| CatalogError::UnknownModule(name.to_string()))?;
            catalog.scan_module(module);
            resolver.scan_module(module);
        }
        Ok(Self::with_type_resolver(catalog, resolver, config.type_resolver().cloned()))
    }

    pub fn catalog(&self) -> &HostCatalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut HostCatalog {
        &mut self.catalog
    }

    pub fn attributes(&self) -> &AttributeResolver {
        &self.attributes
    }

    pub fn class(&self, name: &str) -> Option<&ClassInfo> {
        self.classes.get(name)
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassInfo> {
        self.classes.values()
    }

    /// Overloads of a free function (possibly dotted) or of a `Class.method`.
    pub fn signatures(&self, name: &str) -> &[MethodSignature] {
        self.functions
            .get(name)
            .or_else(|| self.methods.get(name))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every registered function and `Class.method` name, sorted.
    pub fn get_all_method_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.functions.keys().chain(self.methods.keys()).cloned().collect();
        names.sort();
        names
    }

    /// Names exempted by the foreign marker, sorted.
    pub fn exempt_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.exempt.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// A name is exempt if it, or its first dotted segment, was declared foreign.
    pub fn is_exempt(&self, name: &str) -> bool {
        self.exempt.contains(name) || name.split_once('.').is_some_and(|(head, _)| self.exempt.contains(head))
    }

    /// Register a method of `owner` under `owner.name`.
    pub fn register_method(&mut self, decl: &FunctionDecl, owner: &str, loc: Location, reporter: &mut dyn Reporter) {
        let key = format!("{owner}.{}", decl.name);
        if self.skip_foreign(&decl.attributes, &key, loc, reporter) {
            return;
        }
        push_signature(&mut self.methods, key, MethodSignature::from_decl(decl, Some(owner), loc));
    }

    /// Returns `true` (after noting the skip) if the declaration carries the foreign marker.
    fn skip_foreign(&mut self, attrs: &[Attribute], name: &str, loc: Location, reporter: &mut dyn Reporter) -> bool {
        if !attrs.iter().any(|a| attributes::is_foreign_marker(&a.name)) {
            return false;
        }
        self.exempt.insert(name.to_string());
        reporter.report_info(
            DiagnosticCode::ForeignDeclaration,
            format!("'{name}' is provided by the host; skipping registration"),
            Some(loc),
        );
        true
    }

    /// Drop every `name.method` signature left by an earlier registration of `name`.
    fn forget_methods_of(&mut self, name: &str) {
        let prefix = format!("{name}.");
        self.methods.retain(|key, _| !key.starts_with(&prefix));
    }

    fn insert_class(&mut self, info: ClassInfo) {
        tracing::debug!(name = %info.name, kind = info.kind.as_str(), "registered type");
        self.declared_types.borrow_mut().insert(info.name.clone());
        self.classes.insert(info.name.clone(), info);
    }

    fn collect_members(&mut self, info: &mut ClassInfo, members: &[Spanned<ClassMember>], reporter: &mut dyn Reporter) {
        for member in members {
            match &member.node {
                ClassMember::Field(field) => info.fields.push(field.name.clone()),
                ClassMember::Property(property) => info.properties.push(property.name.clone()),
                ClassMember::Constructor(ctor) => info.constructors.push(ctor.params.len()),
                ClassMember::Method(method) => {
                    info.methods.push(method.name.clone());
                    self.register_method(method, &info.name, member.loc, reporter);
                }
            }
        }
    }
}

fn push_signature(map: &mut HashMap<String, Vec<MethodSignature>>, key: String, signature: MethodSignature) {
    let overloads = map.entry(key).or_default();
    match overloads.iter_mut().find(|s| s.loc == signature.loc) {
        Some(existing) => *existing = signature,
        None => overloads.push(signature),
    }
}

fn base_names(bases: &[TypeExpr]) -> Vec<String> {
    bases.iter().map(|b| b.name.clone()).collect()
}

impl SymbolChecker for SymbolRegistry {
    fn register_function(&mut self, decl: &FunctionDecl, loc: Location, reporter: &mut dyn Reporter) {
        if self.skip_foreign(&decl.attributes, &decl.name, loc, reporter) {
            return;
        }
        tracing::debug!(name = %decl.name, params = decl.params.len(), "registered function");
        push_signature(&mut self.functions, decl.name.clone(), MethodSignature::from_decl(decl, None, loc));
    }

    fn register_class(&mut self, decl: &ClassDecl, loc: Location, reporter: &mut dyn Reporter) {
        if self.skip_foreign(&decl.attributes, &decl.name, loc, reporter) {
            return;
        }
        let kind = match decl.kind {
            ClassKind::Class => DeclKind::Class,
            ClassKind::Struct => DeclKind::Struct,
        };
        let mut info = ClassInfo::empty(&decl.name, kind, Visibility::from_modifiers(&decl.modifiers), loc);
        info.bases = base_names(&decl.bases);
        self.forget_methods_of(&decl.name);
        self.collect_members(&mut info, &decl.members, reporter);
        self.insert_class(info);
    }

    fn register_interface(&mut self, decl: &InterfaceDecl, loc: Location, reporter: &mut dyn Reporter) {
        if self.skip_foreign(&decl.attributes, &decl.name, loc, reporter) {
            return;
        }
        let mut info = ClassInfo::empty(
            &decl.name,
            DeclKind::Interface,
            Visibility::from_modifiers(&decl.modifiers),
            loc,
        );
        info.bases = base_names(&decl.bases);
        for member in &decl.members {
            match &member.node {
                ClassMember::Field(field) => info.fields.push(field.name.clone()),
                ClassMember::Property(property) => info.properties.push(property.name.clone()),
                ClassMember::Method(method) => info.methods.push(method.name.clone()),
                ClassMember::Constructor(_) => {}
            }
        }
        self.forget_methods_of(&decl.name);
        self.insert_class(info);
    }

    fn register_enum(&mut self, decl: &EnumDecl, loc: Location, reporter: &mut dyn Reporter) {
        if self.skip_foreign(&decl.attributes, &decl.name, loc, reporter) {
            return;
        }
        let mut info = ClassInfo::empty(&decl.name, DeclKind::Enum, Visibility::from_modifiers(&decl.modifiers), loc);
        info.fields = decl.variants.iter().map(|v| v.node.name.clone()).collect();
        self.forget_methods_of(&decl.name);
        self.insert_class(info);
    }

    fn register_namespace(&mut self, name: &str) {
        let mut prefix = String::new();
        for part in name.split('.') {
            if !prefix.is_empty() {
                prefix.push('.');
            }
            prefix.push_str(part);
            self.namespaces.insert(prefix.clone());
        }
    }

    fn validate_call(&mut self, name: &str, args: &[Spanned<Expr>], loc: Location, reporter: &mut dyn Reporter) -> bool {
        self.check_call(name, args.len(), loc, reporter)
    }

    fn validate_constructor_call(
        &mut self,
        class_name: &str,
        args: &[Spanned<Expr>],
        loc: Location,
        reporter: &mut dyn Reporter,
    ) -> bool {
        self.check_constructor(class_name, args.len(), loc, reporter)
    }

    fn validate_member_access(&mut self, class_name: &str, member: &str, loc: Location, reporter: &mut dyn Reporter) -> bool {
        self.check_member(class_name, member, loc, reporter)
    }

    fn validate_attributes(
        &mut self,
        attributes: &[Attribute],
        target: AttributeTarget,
        _loc: Location,
        reporter: &mut dyn Reporter,
    ) {
        self.check_attributes(attributes, target, reporter);
    }

    fn is_known_class(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    fn is_namespace(&self, name: &str) -> bool {
        self.namespaces.contains(name) || self.catalog.is_namespace(name)
    }
}

#[cfg(test)]
mod tests;
