//! Reference validation: calls, constructors, member accesses and attribute lists.

use std::collections::{HashMap, HashSet};

use sable_core::host::{AttributeTarget, split_arity};
use sable_syntax::ast::{Attribute, Location};
use sable_syntax::diagnostics::{Diagnostic, DiagnosticCode, Reporter};

use super::{DeclKind, SymbolRegistry};
use crate::frontend::attributes::AttributeResolution;
use crate::frontend::catalog::{self, MethodEntry};
use crate::frontend::suggest;

fn starts_uppercase(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// `1`, `1 or 2`, `0, 1 or 3`.
fn join_counts(counts: &[String]) -> String {
    match counts.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} or {last}", rest.join(", ")),
    }
}

impl SymbolRegistry {
    /// Resolution order: exempt names, implicit constructors, unit declarations, the host method
    /// index, then `Type.method` with the type part resolved through the catalog.
    pub(super) fn check_call(&mut self, name: &str, argc: usize, loc: Location, reporter: &mut dyn Reporter) -> bool {
        if self.is_exempt(name) {
            return true;
        }
        if !name.contains('.') && starts_uppercase(name) {
            return self.check_constructor(name, argc, loc, reporter);
        }
        if let Some(ok) = self.check_declared(name, self.catalog.methods(name), argc, loc, reporter) {
            return ok;
        }
        if let Some(ok) = check_host(self.catalog.methods(name), name, argc, loc, reporter) {
            return ok;
        }

        let mut owner_members: Option<Vec<String>> = None;
        if let Some((type_part, method)) = name.rsplit_once('.') {
            if let Some(owner) = self.canonical_owner(type_part) {
                let key = format!("{owner}.{method}");
                if let Some(ok) = self.check_declared(&key, self.catalog.methods(&key), argc, loc, reporter) {
                    return ok;
                }
                if let Some(ok) = check_host(self.catalog.methods(&key), name, argc, loc, reporter) {
                    return ok;
                }
                owner_members = Some(self.members_of(&owner));
            }
            if self.catalog.resolve_type(name).is_some() {
                return true;
            }
        }

        reporter.report_error(
            DiagnosticCode::UnknownFunction,
            format!("unknown function '{name}'"),
            Some(loc),
        );
        let suggestions = match (&owner_members, name.rsplit_once('.')) {
            (Some(members), Some((_, method))) => suggest::similar_names(method, members.iter().map(String::as_str)),
            _ => {
                let declared = self.functions.keys().chain(self.methods.keys()).map(String::as_str);
                suggest::similar_names(name, declared.chain(self.catalog.method_names()))
            }
        };
        report_suggestions(&suggestions, loc, reporter);
        false
    }

    /// Signatures declared in the unit under `key`. `None` if nothing is declared there.
    ///
    /// A declared name that misses on arity still accepts the call when a host overload under the
    /// same key takes `argc` arguments.
    fn check_declared(
        &self,
        key: &str,
        host: &[MethodEntry],
        argc: usize,
        loc: Location,
        reporter: &mut dyn Reporter,
    ) -> Option<bool> {
        let overloads = self.signatures(key);
        if overloads.is_empty() {
            return None;
        }
        if overloads.iter().any(|s| s.matches_call(argc)) {
            return Some(true);
        }
        if host.iter().any(|m| catalog::accepts(m.def.params, argc)) {
            tracing::trace!(key, argc, "declared arity missed; host overload accepts the call");
            return Some(true);
        }
        let mut counts: Vec<usize> = overloads.iter().map(|s| s.params.len()).collect();
        counts.sort_unstable();
        counts.dedup();
        let counts: Vec<String> = counts.iter().map(usize::to_string).collect();
        reporter.report_error(
            DiagnosticCode::FunctionArity,
            format!(
                "'{key}' expects {} argument(s), found {argc}",
                join_counts(&counts)
            ),
            Some(loc),
        );
        Some(false)
    }

    /// The name methods of `type_part` are keyed under: a unit class, or a host type's simple name.
    fn canonical_owner(&mut self, type_part: &str) -> Option<String> {
        if self.classes.contains_key(type_part) {
            return Some(type_part.to_string());
        }
        let handle = self.catalog.resolve_type(type_part)?;
        let def = handle.definition()?;
        Some(split_arity(def.name).0.to_string())
    }

    fn members_of(&self, owner: &str) -> Vec<String> {
        match self.classes.get(owner) {
            Some(info) => info.member_names().map(str::to_string).collect(),
            None => self.catalog.member_names(owner).map(str::to_string).collect(),
        }
    }

    pub(super) fn check_constructor(
        &mut self,
        class_name: &str,
        argc: usize,
        loc: Location,
        reporter: &mut dyn Reporter,
    ) -> bool {
        // Qualified names may live in other units; the registry cannot see them.
        if class_name.contains('.') || self.is_exempt(class_name) {
            return true;
        }
        let base = class_name.split(['<', '[', '?']).next().unwrap_or(class_name);

        if let Some(info) = self.classes.get(base) {
            match info.kind {
                DeclKind::Enum => {
                    reporter.report_error(
                        DiagnosticCode::InvalidConstruction,
                        format!("cannot construct enum '{base}'; use one of its variants"),
                        Some(loc),
                    );
                    return false;
                }
                DeclKind::Interface => {
                    reporter.report_error(
                        DiagnosticCode::InvalidConstruction,
                        format!("cannot construct interface '{base}'"),
                        Some(loc),
                    );
                    return false;
                }
                DeclKind::Class | DeclKind::Struct => {}
            }
            if info.constructors.is_empty() {
                if argc == 0 {
                    return true;
                }
                reporter.report_error(
                    DiagnosticCode::ConstructorArity,
                    format!("'{base}' declares no constructors and takes 0 arguments, found {argc}"),
                    Some(loc),
                );
                return false;
            }
            if info.constructors.contains(&argc) {
                return true;
            }
            let mut counts = info.constructors.clone();
            counts.sort_unstable();
            counts.dedup();
            let counts: Vec<String> = counts.iter().map(usize::to_string).collect();
            reporter.report_error(
                DiagnosticCode::ConstructorArity,
                format!(
                    "no constructor of '{base}' takes {argc} argument(s); expected {}",
                    join_counts(&counts)
                ),
                Some(loc),
            );
            return false;
        }

        if let Some(handle) = self.catalog.resolve_type(class_name) {
            let Some(def) = handle.definition() else {
                return true;
            };
            let accepted = if def.constructors.is_empty() {
                argc == 0
            } else {
                def.constructors.iter().any(|c| catalog::accepts(c.params, argc))
            };
            if !accepted {
                let counts: Vec<String> = def.constructors.iter().map(|c| catalog::arity_label(c.params)).collect();
                let expected = if counts.is_empty() { "0".to_string() } else { join_counts(&counts) };
                reporter.report_error(
                    DiagnosticCode::ConstructorArity,
                    format!(
                        "no constructor of '{}' takes {argc} argument(s); expected {expected}",
                        handle.name
                    ),
                    Some(loc),
                );
            }
            return accepted;
        }

        reporter.report_error(
            DiagnosticCode::UnknownClass,
            format!("unknown class '{base}'"),
            Some(loc),
        );
        let candidates = self.classes.keys().map(String::as_str).chain(self.catalog.type_names());
        let suggestions = suggest::similar_names(base, candidates);
        report_suggestions(&suggestions, loc, reporter);
        false
    }

    /// Walk the class and its bases. A base the registry does not know, and the catalog cannot
    /// resolve, makes the lookup lenient.
    pub(super) fn check_member(&mut self, class_name: &str, member: &str, loc: Location, reporter: &mut dyn Reporter) -> bool {
        if self.is_exempt(class_name) {
            return true;
        }
        if !self.classes.contains_key(class_name) {
            if let Some(handle) = self.catalog.resolve_type(class_name) {
                if handle.definition().is_none() || self.catalog.has_member(class_name, member) {
                    return true;
                }
                let members: Vec<&str> = self.catalog.member_names(class_name).collect();
                return report_missing_member(class_name, member, &members, loc, reporter);
            }
            reporter.report_error(
                DiagnosticCode::UnknownClass,
                format!("unknown class '{class_name}'"),
                Some(loc),
            );
            return false;
        }

        let mut seen: HashSet<String> = HashSet::new();
        let mut pending = vec![class_name.to_string()];
        let mut known_members: Vec<String> = Vec::new();
        while let Some(current) = pending.pop() {
            if !seen.insert(current.clone()) {
                continue;
            }
            if let Some(info) = self.classes.get(&current) {
                if info.has_member(member) {
                    return true;
                }
                known_members.extend(info.member_names().map(str::to_string));
                pending.extend(info.bases.iter().cloned());
            } else if let Some(handle) = self.catalog.resolve_type(&current) {
                if handle.definition().is_none() || self.catalog.has_member(&current, member) {
                    return true;
                }
                known_members.extend(self.catalog.member_names(&current).map(str::to_string));
            } else {
                tracing::trace!(class = class_name, base = %current, "unresolved base; member access allowed");
                return true;
            }
        }

        let members: Vec<&str> = known_members.iter().map(String::as_str).collect();
        report_missing_member(class_name, member, &members, loc, reporter)
    }

    /// Validate each attribute; unknown names become warnings and are allowed through.
    pub(super) fn check_attributes(&self, attributes: &[Attribute], target: AttributeTarget, reporter: &mut dyn Reporter) {
        let mut applied: HashMap<&'static str, Location> = HashMap::new();
        for attribute in attributes {
            match self.attributes.validate(attribute, target, reporter) {
                AttributeResolution::Resolved(def) => match applied.get(def.name) {
                    Some(first) if !def.allow_multiple => {
                        reporter.report(
                            Diagnostic::error(
                                DiagnosticCode::DuplicateAttribute,
                                format!("attribute '{}' may only be applied once", attribute.name),
                            )
                            .at(attribute.loc)
                            .with_note(format!("first applied at {first}")),
                        );
                    }
                    Some(_) => {}
                    None => {
                        applied.insert(def.name, attribute.loc);
                    }
                },
                AttributeResolution::UnknownLenient(error) => {
                    let mut warning = Diagnostic::warning(
                        DiagnosticCode::UnknownAttributeAllowed,
                        format!("{}; allowing it", error.message),
                    );
                    warning.location = error.location;
                    warning.suggestion = error.suggestion;
                    reporter.report(warning);
                }
            }
        }
    }
}

/// `Some(accepted)` if the host declares overloads under this key.
fn check_host(
    overloads: &[MethodEntry],
    name: &str,
    argc: usize,
    loc: Location,
    reporter: &mut dyn Reporter,
) -> Option<bool> {
    if overloads.is_empty() {
        return None;
    }
    if overloads.iter().any(|m| catalog::accepts(m.def.params, argc)) {
        return Some(true);
    }
    let mut counts: Vec<String> = overloads.iter().map(|m| catalog::arity_label(m.def.params)).collect();
    counts.sort();
    counts.dedup();
    reporter.report_error(
        DiagnosticCode::FunctionArity,
        format!("'{name}' expects {} argument(s), found {argc}", join_counts(&counts)),
        Some(loc),
    );
    Some(false)
}

fn report_missing_member(class_name: &str, member: &str, members: &[&str], loc: Location, reporter: &mut dyn Reporter) -> bool {
    reporter.report_error(
        DiagnosticCode::UnknownMember,
        format!("'{class_name}' has no member '{member}'"),
        Some(loc),
    );
    let suggestions = suggest::similar_names(member, members.iter().copied());
    report_suggestions(&suggestions, loc, reporter);
    false
}

fn report_suggestions(suggestions: &[String], loc: Location, reporter: &mut dyn Reporter) {
    if let Some(hint) = suggest::did_you_mean(suggestions) {
        reporter.report(
            Diagnostic::warning(DiagnosticCode::DidYouMean, hint.clone())
                .at(loc)
                .with_suggestion(hint),
        );
    }
}
