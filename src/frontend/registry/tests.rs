use sable_syntax::ast::{FunctionDecl, Location};
use sable_syntax::checker::SymbolChecker;
use sable_syntax::diagnostics::{DiagnosticBag, DiagnosticCode, Reporter, Severity};
use sable_syntax::{lexer, parser};

use super::*;

fn registry() -> SymbolRegistry {
    SymbolRegistry::from_config(&CatalogConfig::new()).unwrap()
}

fn bare_registry() -> SymbolRegistry {
    let config = CatalogConfig::new().with_modules(Vec::<String>::new()).with_stdlib(false);
    SymbolRegistry::from_config(&config).unwrap()
}

fn check_with(mut registry: SymbolRegistry, source: &str) -> (DiagnosticBag, SymbolRegistry) {
    let tokens = lexer::lex(source).unwrap();
    let mut bag = DiagnosticBag::new();
    parser::parse(&tokens, &mut bag, &mut registry);
    (bag, registry)
}

fn check(source: &str) -> (DiagnosticBag, SymbolRegistry) {
    check_with(registry(), source)
}

fn messages(bag: &DiagnosticBag, code: DiagnosticCode) -> Vec<String> {
    bag.iter().filter(|d| d.code == Some(code)).map(|d| d.message.clone()).collect()
}

fn function(name: &str, params: &[(&str, Option<&str>)]) -> FunctionDecl {
    let source = {
        let list: Vec<String> = params
            .iter()
            .map(|(p, ty)| match ty {
                Some(ty) => format!("{p}: {ty}"),
                None => p.to_string(),
            })
            .collect();
        format!("function {name}({});", list.join(", "))
    };
    let tokens = lexer::lex(&source).unwrap();
    let program = parser::parse(&tokens, &mut DiagnosticBag::new(), &mut sable_syntax::checker::NoopChecker);
    match &program.statements[0].node {
        sable_syntax::ast::Statement::Function(f) => f.clone(),
        other => panic!("Expected function, got {other:?}"),
    }
}

// ============================================================================
// Calls
// ============================================================================

#[test]
fn forward_references_resolve() {
    let (bag, _) = check("function main() { helper(1); }\nfunction helper(x: int) { }");
    assert!(!bag.has_errors(), "{:?}", bag.into_vec());
}

#[test]
fn unknown_function_suggests_registered_names() {
    let (bag, _) = check_with(bare_registry(), "function make2() { }\nfunction run_all() { make(); }");
    assert_eq!(messages(&bag, DiagnosticCode::UnknownFunction), vec!["unknown function 'make'"]);
    let hints: Vec<_> = bag.warnings().collect();
    assert_eq!(hints.len(), 1);
    assert_eq!(hints[0].suggestion.as_deref(), Some("did you mean 'make2'?"));
}

#[test]
fn unknown_function_without_close_names_has_no_hint() {
    let (bag, _) = check_with(bare_registry(), "function main() { zzzz(); }");
    assert_eq!(bag.error_count(), 1);
    assert_eq!(bag.warning_count(), 0);
}

#[test]
fn trailing_nullable_parameters_may_be_omitted() {
    let source = r#"
function greet(name: string, title: string?) { }
function main() { greet("a"); greet("a", "b"); greet(); }
"#;
    let (bag, _) = check(source);
    let arity = messages(&bag, DiagnosticCode::FunctionArity);
    assert_eq!(arity, vec!["'greet' expects 2 argument(s), found 0"]);
}

#[test]
fn signatures_are_deduplicated_across_passes() {
    let (_, registry) = check("function helper(x) { }\nfunction helper(x, y) { }");
    assert_eq!(registry.signatures("helper").len(), 2);
}

#[test]
fn host_calls_resolve_through_the_catalog() {
    let source = r#"
Console.WriteLine("x");
System.Console.WriteLine("x");
var m = Math.Max(1, 2);
"#;
    let (bag, _) = check(source);
    assert!(!bag.has_errors(), "{:?}", bag.into_vec());
}

#[test]
fn host_arity_mismatch_is_reported() {
    let (bag, _) = check("var m = Math.Max(1);");
    assert_eq!(bag.count_code(DiagnosticCode::FunctionArity), 1);
}

#[test]
fn declared_arity_miss_falls_back_to_host_overloads() {
    let source = "function len(a: int, b: int): int { return a; }\nfunction main() { len(1); len(1, 2); }";
    let (bag, _) = check(source);
    assert!(!bag.has_errors(), "{:?}", bag.into_vec());
}

#[test]
fn declared_arity_miss_without_a_host_match_is_reported() {
    let source = "function len(a: int, b: int, c: int): int { return a; }\nfunction main() { len(); }";
    let (bag, _) = check(source);
    assert_eq!(
        messages(&bag, DiagnosticCode::FunctionArity),
        vec!["'len' expects 3 argument(s), found 0"]
    );
}

#[test]
fn misspelled_host_method_suggests_the_owner_members() {
    let (bag, _) = check("Console.WriteLyne(\"x\");");
    assert_eq!(messages(&bag, DiagnosticCode::UnknownFunction), vec!["unknown function 'Console.WriteLyne'"]);
    let hint = bag.warnings().next().and_then(|d| d.suggestion.clone());
    assert_eq!(hint.as_deref(), Some("did you mean 'WriteLine'?"));
}

#[test]
fn namespaced_functions_resolve_by_simple_name() {
    let source = r#"
namespace App.Util { function helper() { } }
function main() { App.Util.helper(); }
"#;
    let (bag, registry) = check(source);
    assert!(!bag.has_errors(), "{:?}", bag.into_vec());
    assert!(registry.is_namespace("App"));
    assert!(registry.is_namespace("App.Util"));
}

#[test]
fn direct_calls_use_registered_signatures() {
    let mut registry = bare_registry();
    let mut bag = DiagnosticBag::new();
    let decl = function("scale", &[("x", Some("int")), ("factor", Some("int?"))]);
    registry.register_function(&decl, Location::new(1, 1), &mut bag);

    assert!(registry.check_call("scale", 1, Location::new(2, 1), &mut bag));
    assert!(registry.check_call("scale", 2, Location::new(2, 1), &mut bag));
    assert!(!registry.check_call("scale", 3, Location::new(2, 1), &mut bag));
    assert_eq!(messages(&bag, DiagnosticCode::FunctionArity), vec!["'scale' expects 2 argument(s), found 3"]);
}

#[test]
fn nullable_params_are_detected_from_the_written_type() {
    let decl = function("f", &[("a", Some("int")), ("b", Some("string?")), ("c", None)]);
    let signature = MethodSignature::from_decl(&decl, None, Location::new(1, 1));
    let nullable: Vec<bool> = signature.params.iter().map(ParamSig::is_nullable).collect();
    assert_eq!(nullable, vec![false, true, false]);
    assert!(!signature.matches_call(1));
}

// ============================================================================
// Constructors
// ============================================================================

#[test]
fn constructor_arity_lists_the_declared_counts() {
    let source = r#"
class Point { constructor(x) { } constructor(x, y) { } }
var a = Point(1);
var b = new Point(1, 2);
var c = Point(1, 2, 3);
"#;
    let (bag, _) = check(source);
    assert_eq!(
        messages(&bag, DiagnosticCode::ConstructorArity),
        vec!["no constructor of 'Point' takes 3 argument(s); expected 1 or 2"]
    );
}

#[test]
fn classes_without_constructors_take_no_arguments() {
    let (bag, _) = check("class Foo { }\nvar a = Foo();\nvar b = Foo(1);");
    assert_eq!(
        messages(&bag, DiagnosticCode::ConstructorArity),
        vec!["'Foo' declares no constructors and takes 0 arguments, found 1"]
    );
}

#[test]
fn enums_and_interfaces_cannot_be_constructed() {
    let source = r#"
enum Color { Red, Green }
interface IShape { function area(); }
var c = Color(1);
var s = new IShape();
"#;
    let (bag, _) = check(source);
    assert_eq!(bag.count_code(DiagnosticCode::InvalidConstruction), 2);
}

#[test]
fn host_constructors_are_checked() {
    let source = r#"
var e = Exception("boom");
var xs = new List<int>();
var d = new Dictionary<string, int>(1, 2, 3);
"#;
    let (bag, _) = check(source);
    let arity = messages(&bag, DiagnosticCode::ConstructorArity);
    assert_eq!(arity.len(), 1);
    assert!(arity[0].starts_with("no constructor of 'Dictionary"), "{arity:?}");
    assert!(arity[0].ends_with("takes 3 argument(s); expected 0 or 1"), "{arity:?}");
}

#[test]
fn unknown_class_suggests_close_types() {
    let (bag, _) = check("class Widget { }\nvar w = Widgte();");
    assert_eq!(messages(&bag, DiagnosticCode::UnknownClass), vec!["unknown class 'Widgte'"]);
    assert!(
        bag.warnings()
            .any(|d| d.suggestion.as_deref().is_some_and(|s| s.contains("'Widget'")))
    );
}

#[test]
fn reregistering_a_class_replaces_it() {
    let source = r#"
class A { constructor(x) { } function f() { } }
class A { function g() { } }
var a = A();
"#;
    let (bag, registry) = check(source);
    assert!(!bag.has_errors(), "{:?}", bag.into_vec());
    assert!(registry.class("A").unwrap().constructors.is_empty());
    let names = registry.get_all_method_names();
    assert!(names.contains(&"A.g".to_string()));
    assert!(!names.contains(&"A.f".to_string()));
}

// ============================================================================
// Members
// ============================================================================

#[test]
fn members_are_found_through_base_classes() {
    let source = r#"
class Shape { var sides = 0; function area() { return 0; } }
class Square : Shape { function describe() { return this.sides; } }
"#;
    let (bag, _) = check(source);
    assert!(!bag.has_errors(), "{:?}", bag.into_vec());
}

#[test]
fn missing_members_suggest_close_names() {
    let source = r#"
class Shape { var sides = 0; }
class Square : Shape { function describe() { return this.sidez; } }
"#;
    let (bag, _) = check(source);
    assert_eq!(messages(&bag, DiagnosticCode::UnknownMember), vec!["'Square' has no member 'sidez'"]);
    let hint = bag.warnings().next().and_then(|d| d.suggestion.clone());
    assert_eq!(hint.as_deref(), Some("did you mean 'sides'?"));
}

#[test]
fn unresolvable_bases_make_member_access_lenient() {
    let source = "class Widget : Component { function draw() { this.render(); } }";
    let (bag, _) = check(source);
    assert!(!bag.has_errors(), "{:?}", bag.into_vec());
}

#[test]
fn host_bases_contribute_members() {
    let source = r#"
class AppError : Exception { function describe() { return this.ToString(); } }
class BadError : Exception { function describe() { return this.ToStrin(); } }
"#;
    let (bag, _) = check(source);
    assert_eq!(messages(&bag, DiagnosticCode::UnknownMember), vec!["'BadError' has no member 'ToStrin'"]);
}

#[test]
fn enum_variants_are_members() {
    let (bag, _) = check("enum Color { Red, Green }\nvar a = Color.Green;\nvar b = Color.Gren;");
    assert_eq!(messages(&bag, DiagnosticCode::UnknownMember), vec!["'Color' has no member 'Gren'"]);
}

// ============================================================================
// Attributes and foreign declarations
// ============================================================================

#[test]
fn unknown_attributes_are_allowed_with_a_warning() {
    let (bag, _) = check("[Frobnicate]\nfunction main() { }");
    assert!(!bag.has_errors(), "{:?}", bag.into_vec());
    assert_eq!(bag.count_code(DiagnosticCode::UnknownAttributeAllowed), 1);
}

#[test]
fn duplicate_single_use_attributes_are_errors() {
    let (bag, _) = check("[Obsolete, Obsolete]\nfunction old() { }");
    assert_eq!(bag.count_code(DiagnosticCode::DuplicateAttribute), 1);
    let duplicate = bag.errors().next().unwrap();
    assert!(duplicate.notes[0].starts_with("first applied at"));

    let (bag, _) = check("[get(\"a\"), get(\"b\")]\nfunction handler() { }");
    assert!(!bag.has_errors(), "{:?}", bag.into_vec());
}

#[test]
fn attributes_on_the_wrong_target_are_errors() {
    let (bag, _) = check("[Flags]\nfunction f() { }\n[Flags]\nenum Mode { A, B }");
    assert_eq!(bag.count_code(DiagnosticCode::AttributeTarget), 1);
}

#[test]
fn foreign_declarations_are_exempt_and_unregistered() {
    let source = r#"
[Extern]
function native_call(x);
[Extern]
class Native { }
function main() { native_call(1, 2, 3); Native.open(); var n = Native(1); }
"#;
    let (bag, registry) = check(source);
    assert!(!bag.has_errors(), "{:?}", bag.into_vec());
    assert!(!registry.get_all_method_names().contains(&"native_call".to_string()));
    assert!(registry.class("Native").is_none());
    assert_eq!(registry.exempt_names(), vec!["Native", "native_call"]);
    assert_eq!(bag.with_severity(Severity::Info).count(), 2);
    assert_eq!(bag.count_code(DiagnosticCode::ForeignDeclaration), 2);
}

#[test]
fn exemption_covers_dotted_names() {
    let mut registry = bare_registry();
    let mut bag = DiagnosticBag::new();
    let mut decl = function("bridge", &[]);
    decl.attributes = vec![sable_syntax::ast::Attribute {
        name: "extern".to_string(),
        args: Vec::new(),
        loc: Location::new(1, 1),
    }];
    registry.register_function(&decl, Location::new(1, 1), &mut bag);
    assert!(registry.is_exempt("bridge"));
    assert!(registry.is_exempt("bridge.anything"));
    assert!(!registry.is_exempt("bridges"));
}

#[test]
fn params_keep_their_written_types() {
    let decl = function("f", &[("items", Some("List<int>"))]);
    let signature = MethodSignature::from_decl(&decl, Some("Owner"), Location::new(3, 5));
    assert_eq!(
        signature.params,
        vec![ParamSig {
            name: "items".to_string(),
            ty: Some("List<int>".to_string()),
        }]
    );
    assert_eq!(signature.owner.as_deref(), Some("Owner"));
}

// ============================================================================
// Type resolution
// ============================================================================

#[test]
fn declared_types_join_host_generic_arguments() {
    let (bag, mut registry) = check("class Shape { }\nvar xs = new List<Shape>();\nvar m = new Dictionary<string, Shape[]>();");
    assert!(!bag.has_errors(), "{:?}", bag.into_vec());
    let shape = registry.catalog_mut().resolve_type("Shape").unwrap();
    assert!(shape.definition().is_none());
}

#[test]
fn caller_resolver_is_consulted_after_declared_types() {
    let config = CatalogConfig::new()
        .with_type_resolver(Rc::new(|name: &str| (name == "Widget").then(|| HostType::user("Widget"))));
    let registry = SymbolRegistry::from_config(&config).unwrap();
    let (bag, _) = check_with(registry, "var w = Widget(1, 2);\nvar ws = new List<Widget>();");
    assert!(!bag.has_errors(), "{:?}", bag.into_vec());
}
