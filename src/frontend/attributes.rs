//! Attribute Resolver: validates attribute applications against host attribute definitions.
//!
//! Definitions come from the same host modules the catalog scans. Lookup ignores the namespace
//! prefix, the `Attribute` suffix and letter case, and understands the short aliases from
//! `sable_core::lang::attributes` (`[get]` is `[HttpGet]`). The foreign marker is always known,
//! whichever modules were scanned.

use std::collections::{HashMap, HashSet};

use sable_core::host::{AttributeDef, AttributeTarget, HostModule, ParamDef, STDLIB};
use sable_core::lang::attributes::{self, AttributeId};
use sable_syntax::ast::{Attribute, Expr, Literal};
use sable_syntax::diagnostics::{Diagnostic, DiagnosticCode, Reporter};

use crate::frontend::suggest;

/// Outcome of resolving one attribute application.
#[derive(Debug, Clone)]
pub enum AttributeResolution {
    /// The attribute is defined; target and argument problems (if any) were already reported.
    Resolved(&'static AttributeDef),
    /// The attribute is not defined. Carries the would-be error; callers decide how loudly to report it.
    UnknownLenient(Diagnostic),
}

#[derive(Debug, Default)]
pub struct AttributeResolver {
    scanned: HashSet<&'static str>,
    by_name: HashMap<String, &'static AttributeDef>,
}

impl AttributeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a module's attribute definitions. Returns `false` if it was already scanned.
    pub fn scan_module(&mut self, module: &'static HostModule) -> bool {
        if !self.scanned.insert(module.name) {
            return false;
        }
        for def in module.attributes {
            self.by_name
                .entry(attributes::normalize(def.name).to_lowercase())
                .or_insert(def);
        }
        tracing::debug!(module = module.name, attributes = module.attributes.len(), "scanned host attributes");
        true
    }

    /// Resolve a written attribute name to its definition.
    pub fn resolve(&self, name: &str) -> Option<&'static AttributeDef> {
        let normalized = attributes::normalize(name);
        if let Some(def) = self.by_name.get(&normalized.to_lowercase()).copied() {
            return Some(def);
        }
        if let Some(target) = attributes::alias_target(normalized) {
            if let Some(def) = self.by_name.get(&target.to_lowercase()).copied() {
                return Some(def);
            }
        }
        if attributes::is_foreign_marker(name) {
            return foreign_marker_def();
        }
        None
    }

    /// Normalized names of every known attribute, for suggestions.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.by_name.values().map(|def| attributes::normalize(def.name))
    }

    /// Check one application against its definition.
    ///
    /// Target and arity errors, and argument-type warnings, are reported directly. An unknown
    /// name is returned as [`AttributeResolution::UnknownLenient`] without being reported.
    pub fn validate(
        &self,
        attribute: &Attribute,
        target: AttributeTarget,
        reporter: &mut dyn Reporter,
    ) -> AttributeResolution {
        let Some(def) = self.resolve(&attribute.name) else {
            return AttributeResolution::UnknownLenient(self.unknown(attribute));
        };
        let display = attributes::normalize(def.name);

        if !def.permits(target) {
            let allowed = def.targets.iter().map(|t| t.as_str()).collect::<Vec<_>>().join(", ");
            reporter.report(
                Diagnostic::error(
                    DiagnosticCode::AttributeTarget,
                    format!("attribute '{display}' is not valid on {target}"),
                )
                .at(attribute.loc)
                .with_note(format!("valid targets: {allowed}")),
            );
        }

        let positional: Vec<_> = attribute.positional_args().collect();
        let required = def.params.iter().filter(|p| !p.optional && !p.variadic).count();
        let variadic = def.params.last().is_some_and(|p| p.variadic);
        if positional.len() < required {
            reporter.report_error(
                DiagnosticCode::AttributeTooFewArgs,
                format!(
                    "attribute '{display}' expects at least {required} argument(s), found {}",
                    positional.len()
                ),
                Some(attribute.loc),
            );
        } else if !variadic && positional.len() > def.params.len() {
            reporter.report_error(
                DiagnosticCode::AttributeTooManyArgs,
                format!(
                    "attribute '{display}' expects at most {} argument(s), found {}",
                    def.params.len(),
                    positional.len()
                ),
                Some(attribute.loc),
            );
        }

        for (i, arg) in positional.iter().enumerate() {
            let Some(param) = param_at(def.params, i) else { break };
            let Expr::Literal(literal) = &arg.value.node else { continue };
            if !literal_fits(literal, param.ty) {
                reporter.report_warning(
                    DiagnosticCode::AttributeArgType,
                    format!(
                        "argument '{}' of attribute '{display}' expects {}, found {}",
                        param.name,
                        param.ty,
                        literal_kind(literal)
                    ),
                    Some(arg.value.loc),
                );
            }
        }

        AttributeResolution::Resolved(def)
    }

    fn unknown(&self, attribute: &Attribute) -> Diagnostic {
        let needle = attributes::normalize(&attribute.name);
        let diagnostic = Diagnostic::error(
            DiagnosticCode::UnknownAttribute,
            format!("unknown attribute '{}'", attribute.name),
        )
        .at(attribute.loc);
        match suggest::did_you_mean(&suggest::similar_names(needle, self.names())) {
            Some(hint) => diagnostic.with_suggestion(hint),
            None => diagnostic,
        }
    }
}

fn foreign_marker_def() -> Option<&'static AttributeDef> {
    let canonical = attributes::as_str(AttributeId::Extern);
    STDLIB
        .attributes
        .iter()
        .find(|def| attributes::normalize(def.name) == canonical)
}

/// Parameter receiving positional argument `index` (a trailing variadic absorbs the rest).
fn param_at(params: &[ParamDef], index: usize) -> Option<&ParamDef> {
    params
        .get(index)
        .or_else(|| params.last().filter(|p| p.variadic))
}

fn literal_fits(literal: &Literal, ty: &str) -> bool {
    let ty = ty.trim_end_matches('?').to_ascii_lowercase();
    if ty == "object" {
        return true;
    }
    match literal {
        Literal::Int(_) => matches!(
            ty.as_str(),
            "int" | "long" | "short" | "byte" | "double" | "float" | "decimal"
        ),
        Literal::Float(_) => matches!(ty.as_str(), "double" | "float" | "decimal"),
        Literal::String(_) => matches!(ty.as_str(), "string" | "type"),
        Literal::Bool(_) => ty == "bool",
        Literal::Null => true,
    }
}

fn literal_kind(literal: &Literal) -> &'static str {
    match literal {
        Literal::Int(_) => "an integer",
        Literal::Float(_) => "a number",
        Literal::String(_) => "a string",
        Literal::Bool(_) => "a boolean",
        Literal::Null => "null",
    }
}

#[cfg(test)]
mod tests {
    use sable_core::host;
    use sable_syntax::ast::{AttributeArg, Location, Spanned};
    use sable_syntax::diagnostics::DiagnosticBag;

    use super::*;

    fn resolver() -> AttributeResolver {
        let mut resolver = AttributeResolver::new();
        for module in host::HOST_MODULES {
            resolver.scan_module(module);
        }
        resolver
    }

    fn attr(name: &str, args: Vec<Literal>) -> Attribute {
        Attribute {
            name: name.to_string(),
            args: args
                .into_iter()
                .map(|lit| AttributeArg {
                    name: None,
                    value: Spanned::new(Expr::Literal(lit), Location::new(1, 2)),
                })
                .collect(),
            loc: Location::new(1, 1),
        }
    }

    #[test]
    fn names_resolve_through_suffix_namespace_case_and_alias() {
        let resolver = resolver();
        for name in ["Obsolete", "ObsoleteAttribute", "System.ObsoleteAttribute", "obsolete", "deprecated"] {
            assert_eq!(resolver.resolve(name).map(|d| d.name), Some("ObsoleteAttribute"), "{name}");
        }
        assert_eq!(resolver.resolve("get").map(|d| d.name), Some("HttpGetAttribute"));
        assert_eq!(resolver.resolve("Native").map(|d| d.name), Some("ExternAttribute"));
    }

    #[test]
    fn wrong_target_is_an_error() {
        let mut bag = DiagnosticBag::new();
        let result = resolver().validate(&attr("Flags", vec![]), AttributeTarget::Method, &mut bag);
        assert!(matches!(result, AttributeResolution::Resolved(_)));
        assert_eq!(bag.count_code(DiagnosticCode::AttributeTarget), 1);
    }

    #[test]
    fn argument_counts_are_checked() {
        let resolver = resolver();
        let mut bag = DiagnosticBag::new();
        resolver.validate(&attr("Range", vec![Literal::Int(1)]), AttributeTarget::Property, &mut bag);
        assert_eq!(bag.count_code(DiagnosticCode::AttributeTooFewArgs), 1);

        let mut bag = DiagnosticBag::new();
        let args = vec![Literal::String("a".into()), Literal::Bool(true), Literal::Int(3)];
        resolver.validate(&attr("Obsolete", args), AttributeTarget::Method, &mut bag);
        assert_eq!(bag.count_code(DiagnosticCode::AttributeTooManyArgs), 1);
    }

    #[test]
    fn literal_type_mismatch_only_warns() {
        let mut bag = DiagnosticBag::new();
        let args = vec![Literal::String("one".into()), Literal::Int(10)];
        resolver().validate(&attr("Range", args), AttributeTarget::Field, &mut bag);
        assert_eq!(bag.warning_count(), 1);
        assert!(!bag.has_errors());
    }

    #[test]
    fn unknown_attribute_is_returned_not_reported() {
        let mut bag = DiagnosticBag::new();
        let result = resolver().validate(&attr("Obsolet", vec![]), AttributeTarget::Method, &mut bag);
        assert!(bag.is_empty());
        let AttributeResolution::UnknownLenient(diagnostic) = result else {
            panic!("expected an unknown attribute");
        };
        assert_eq!(diagnostic.code, Some(DiagnosticCode::UnknownAttribute));
        assert_eq!(diagnostic.suggestion.as_deref(), Some("did you mean 'Obsolete'?"));
    }
}
