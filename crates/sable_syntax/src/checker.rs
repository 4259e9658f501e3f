//! The seam between the parser and symbol resolution.
//!
//! The parser registers declarations and validates reference sites through [`SymbolChecker`] while it
//! builds the tree. Validation methods never fail: they report into the supplied [`Reporter`] and
//! return `false` when the site is invalid.

use sable_core::host::AttributeTarget;

use crate::ast::{Attribute, ClassDecl, EnumDecl, Expr, FunctionDecl, InterfaceDecl, Location, Spanned};
use crate::diagnostics::Reporter;

pub trait SymbolChecker {
    /// Register a free function signature (possibly dotted).
    fn register_function(&mut self, decl: &FunctionDecl, loc: Location, reporter: &mut dyn Reporter);

    /// Register a class or struct, its members, and its methods.
    fn register_class(&mut self, decl: &ClassDecl, loc: Location, reporter: &mut dyn Reporter);

    fn register_interface(&mut self, decl: &InterfaceDecl, loc: Location, reporter: &mut dyn Reporter);

    fn register_enum(&mut self, decl: &EnumDecl, loc: Location, reporter: &mut dyn Reporter);

    fn register_namespace(&mut self, name: &str);

    fn validate_call(&mut self, name: &str, args: &[Spanned<Expr>], loc: Location, reporter: &mut dyn Reporter) -> bool;

    fn validate_constructor_call(
        &mut self,
        class_name: &str,
        args: &[Spanned<Expr>],
        loc: Location,
        reporter: &mut dyn Reporter,
    ) -> bool;

    fn validate_member_access(
        &mut self,
        class_name: &str,
        member: &str,
        loc: Location,
        reporter: &mut dyn Reporter,
    ) -> bool;

    fn validate_attributes(
        &mut self,
        attributes: &[Attribute],
        target: AttributeTarget,
        loc: Location,
        reporter: &mut dyn Reporter,
    );

    /// Whether `name` is a class, struct, interface or enum declared in this unit.
    fn is_known_class(&self, name: &str) -> bool;

    /// Whether `name` is a namespace declared in this unit.
    fn is_namespace(&self, name: &str) -> bool;
}

/// Accepts every reference and records nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopChecker;

impl SymbolChecker for NoopChecker {
    fn register_function(&mut self, _: &FunctionDecl, _: Location, _: &mut dyn Reporter) {}

    fn register_class(&mut self, _: &ClassDecl, _: Location, _: &mut dyn Reporter) {}

    fn register_interface(&mut self, _: &InterfaceDecl, _: Location, _: &mut dyn Reporter) {}

    fn register_enum(&mut self, _: &EnumDecl, _: Location, _: &mut dyn Reporter) {}

    fn register_namespace(&mut self, _: &str) {}

    fn validate_call(&mut self, _: &str, _: &[Spanned<Expr>], _: Location, _: &mut dyn Reporter) -> bool {
        true
    }

    fn validate_constructor_call(&mut self, _: &str, _: &[Spanned<Expr>], _: Location, _: &mut dyn Reporter) -> bool {
        true
    }

    fn validate_member_access(&mut self, _: &str, _: &str, _: Location, _: &mut dyn Reporter) -> bool {
        true
    }

    fn validate_attributes(&mut self, _: &[Attribute], _: AttributeTarget, _: Location, _: &mut dyn Reporter) {}

    fn is_known_class(&self, _: &str) -> bool {
        false
    }

    fn is_namespace(&self, _: &str) -> bool {
        false
    }
}
