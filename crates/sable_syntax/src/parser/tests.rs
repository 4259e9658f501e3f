#[cfg(test)]
/// Parser unit tests.
///
/// These cover the syntactic forms, the forward registration pass, reference validation hooks,
/// and statement-level error recovery.
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticCode;
    use crate::lexer;
    use crate::checker::NoopChecker;

    /// Checker that records every registration and validation request.
    #[derive(Default)]
    struct RecordingChecker {
        functions: Vec<String>,
        classes: Vec<String>,
        namespaces: Vec<String>,
        calls: Vec<String>,
        constructors: Vec<(String, usize)>,
        members: Vec<(String, String)>,
        attributes: Vec<(String, AttributeTarget)>,
    }

    impl SymbolChecker for RecordingChecker {
        fn register_function(&mut self, decl: &FunctionDecl, _: Location, _: &mut dyn Reporter) {
            self.functions.push(decl.name.clone());
        }

        fn register_class(&mut self, decl: &ClassDecl, _: Location, _: &mut dyn Reporter) {
            self.classes.push(decl.name.clone());
        }

        fn register_interface(&mut self, decl: &InterfaceDecl, _: Location, _: &mut dyn Reporter) {
            self.classes.push(decl.name.clone());
        }

        fn register_enum(&mut self, decl: &EnumDecl, _: Location, _: &mut dyn Reporter) {
            self.classes.push(decl.name.clone());
        }

        fn register_namespace(&mut self, name: &str) {
            self.namespaces.push(name.to_string());
        }

        fn validate_call(&mut self, name: &str, _: &[Spanned<Expr>], loc: Location, reporter: &mut dyn Reporter) -> bool {
            self.calls.push(name.to_string());
            let known = self.functions.iter().any(|f| f == name);
            if !known {
                reporter.report_error(DiagnosticCode::UnknownFunction, format!("unknown function '{name}'"), Some(loc));
            }
            known
        }

        fn validate_constructor_call(
            &mut self,
            class_name: &str,
            args: &[Spanned<Expr>],
            _: Location,
            _: &mut dyn Reporter,
        ) -> bool {
            self.constructors.push((class_name.to_string(), args.len()));
            true
        }

        fn validate_member_access(&mut self, class_name: &str, member: &str, _: Location, _: &mut dyn Reporter) -> bool {
            self.members.push((class_name.to_string(), member.to_string()));
            true
        }

        fn validate_attributes(
            &mut self,
            attributes: &[Attribute],
            target: AttributeTarget,
            _: Location,
            _: &mut dyn Reporter,
        ) {
            self.attributes
                .extend(attributes.iter().map(|a| (a.name.clone(), target)));
        }

        fn is_known_class(&self, name: &str) -> bool {
            self.classes.iter().any(|c| c == name)
        }

        fn is_namespace(&self, name: &str) -> bool {
            self.namespaces.iter().any(|n| n == name)
        }
    }

    fn parse_str(source: &str) -> (Program, DiagnosticBag) {
        let tokens = lexer::lex(source).expect("source should scan");
        let mut bag = DiagnosticBag::new();
        let program = parse(&tokens, &mut bag, &mut NoopChecker);
        (program, bag)
    }

    fn parse_checked(source: &str) -> (Program, DiagnosticBag, RecordingChecker) {
        let tokens = lexer::lex(source).expect("source should scan");
        let mut bag = DiagnosticBag::new();
        let mut checker = RecordingChecker::default();
        let program = parse(&tokens, &mut bag, &mut checker);
        (program, bag, checker)
    }

    fn first_expr(program: &Program) -> &Expr {
        match &program.statements[0].node {
            Statement::Expr(e) => &e.node,
            Statement::Var(v) => &v.value.as_ref().expect("initializer").node,
            other => panic!("Expected expression statement, got {other:?}"),
        }
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    #[test]
    fn test_parse_function() {
        let (program, bag) = parse_str("function add(a: int, b: int?): int { return a + b; }");
        assert!(bag.is_empty(), "{:?}", bag.into_vec());
        match &program.statements[0].node {
            Statement::Function(f) => {
                assert_eq!(f.name, "add");
                assert_eq!(f.params.len(), 2);
                assert_eq!(f.params[1].ty.as_ref().map(|t| t.nullable), Some(true));
                assert_eq!(f.return_type, Some(TypeExpr::simple("int")));
                assert_eq!(f.body.as_ref().map(Vec::len), Some(1));
            }
            other => panic!("Expected function, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_dotted_and_bodiless_function() {
        let (program, bag) = parse_str("function Math2.square(x);");
        assert!(bag.is_empty());
        match &program.statements[0].node {
            Statement::Function(f) => {
                assert_eq!(f.name, "Math2.square");
                assert!(f.body.is_none());
            }
            other => panic!("Expected function, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_class_members() {
        let source = r#"
public class Point : Shape, IPrintable {
    var x: int = 0;
    private const Origin = 0;
    property Label: string { get; set { this.x = value.Length; } }
    constructor(x: int) { this.x = x; }
    static function zero(): Point { return new Point(0); }
}
"#;
        let (program, bag) = parse_str(source);
        assert!(bag.is_empty(), "{:?}", bag.into_vec());
        match &program.statements[0].node {
            Statement::Class(c) => {
                assert_eq!(c.name, "Point");
                assert_eq!(c.kind, ClassKind::Class);
                assert_eq!(c.modifiers, vec![Modifier::Public]);
                assert_eq!(c.bases.len(), 2);
                assert_eq!(c.members.len(), 5);
                assert!(matches!(c.members[2].node, ClassMember::Property(ref p) if p.getter.is_some() && p.setter.is_some()));
                assert!(matches!(c.members[3].node, ClassMember::Constructor(_)));
                assert!(matches!(c.members[4].node, ClassMember::Method(ref m) if m.is_static()));
            }
            other => panic!("Expected class, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_interface_enum_struct() {
        let source = r#"
interface IShape { function area(): double; }
enum Color { Red, Green = 2, Blue, }
struct Pair<K, V> { var key: K; var value: V; }
"#;
        let (program, bag) = parse_str(source);
        assert!(bag.is_empty(), "{:?}", bag.into_vec());
        assert_eq!(program.statements.len(), 3);
        assert!(matches!(&program.statements[0].node, Statement::Interface(i) if i.members.len() == 1));
        match &program.statements[1].node {
            Statement::Enum(e) => {
                assert_eq!(e.variants.len(), 3);
                assert!(e.variants[1].node.value.is_some());
            }
            other => panic!("Expected enum, got {other:?}"),
        }
        assert!(
            matches!(&program.statements[2].node, Statement::Class(s) if s.kind == ClassKind::Struct && s.type_params == ["K", "V"])
        );
    }

    #[test]
    fn test_parse_namespace_import_include() {
        let source = r#"
import System.Collections.Generic as G;
include "util.sbl";
namespace App.Core { function run() { } }
"#;
        let (program, bag) = parse_str(source);
        assert!(bag.is_empty(), "{:?}", bag.into_vec());
        assert!(matches!(&program.statements[0].node, Statement::Import(i) if i.alias.as_deref() == Some("G")));
        assert!(matches!(&program.statements[1].node, Statement::Include(p) if p == "util.sbl"));
        match &program.statements[2].node {
            Statement::Namespace(ns) => {
                assert_eq!(ns.name, "App.Core");
                assert_eq!(ns.body.len(), 1);
            }
            other => panic!("Expected namespace, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_attributes_and_targets() {
        let source = r#"
[assembly: AssemblyTitle("demo")]
[Serializable, Obsolete("old", Error = true)]
class Model {
    [Required] property Name: string;
    [Range(1, 10)] var age: int;
    function save([FromBody] payload) { }
}
"#;
        let (program, bag, checker) = parse_checked(source);
        assert!(!bag.has_errors(), "{:?}", bag.into_vec());
        match &program.statements[1].node {
            Statement::Class(c) => {
                assert_eq!(c.attributes.len(), 2);
                assert_eq!(c.attributes[1].args.len(), 2);
                assert_eq!(c.attributes[1].args[1].name.as_deref(), Some("Error"));
            }
            other => panic!("Expected class, got {other:?}"),
        }
        assert!(matches!(&program.statements[0].node, Statement::AttributeApplication(a) if a.target == AttributeTarget::Assembly));

        let targets: Vec<_> = checker.attributes.iter().map(|(n, t)| (n.as_str(), *t)).collect();
        assert!(targets.contains(&("AssemblyTitle", AttributeTarget::Assembly)));
        assert!(targets.contains(&("Required", AttributeTarget::Property)));
        assert!(targets.contains(&("Range", AttributeTarget::Field)));
        assert!(targets.contains(&("FromBody", AttributeTarget::Parameter)));
        assert!(targets.contains(&("Serializable", AttributeTarget::Class)));
    }

    // ========================================================================
    // Statements
    // ========================================================================

    #[test]
    fn test_else_if_nests_as_single_if() {
        let (program, bag) = parse_str("if a { } else if b { } else { }");
        assert!(bag.is_empty());
        match &program.statements[0].node {
            Statement::If(outer) => {
                let else_body = outer.else_body.as_ref().expect("else branch");
                assert_eq!(else_body.len(), 1);
                assert!(matches!(&else_body[0].node, Statement::If(inner) if inner.else_body.is_some()));
            }
            other => panic!("Expected if, got {other:?}"),
        }
    }

    #[test]
    fn test_for_forms() {
        let source = r#"
for (var i = 0; i < 10; i++) { }
for (var x in items) { }
for y in 0..=3 { }
while (true) { break; }
loop { continue; }
"#;
        let (program, bag) = parse_str(source);
        assert!(bag.is_empty(), "{:?}", bag.into_vec());
        assert!(matches!(&program.statements[0].node, Statement::For(f) if f.init.is_some() && f.step.is_some()));
        assert!(matches!(&program.statements[1].node, Statement::ForIn(f) if f.var == "x"));
        match &program.statements[2].node {
            Statement::ForIn(f) => assert!(matches!(f.iterable.node, Expr::Range { inclusive: true, .. })),
            other => panic!("Expected for-in, got {other:?}"),
        }
        assert!(matches!(&program.statements[3].node, Statement::While(_)));
        assert!(matches!(&program.statements[4].node, Statement::Loop(_)));
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    #[test]
    fn test_precedence_and_assignment() {
        let (program, _) = parse_str("x = a + b * c;");
        match first_expr(&program) {
            Expr::Assign { op, value, .. } => {
                assert_eq!(*op, AssignOp::Assign);
                match &value.node {
                    Expr::Binary(_, BinaryOp::Add, rhs) => {
                        assert!(matches!(rhs.node, Expr::Binary(_, BinaryOp::Mul, _)));
                    }
                    other => panic!("Expected addition, got {other:?}"),
                }
            }
            other => panic!("Expected assignment, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_assignment_target_is_error() {
        let (_, bag) = parse_str("1 = 2;");
        assert_eq!(bag.error_count(), 1);
    }

    #[test]
    fn test_lambdas() {
        let (program, bag) = parse_str("var f = x => x + 1;\nvar g = (a, b: int) => { return a; };");
        assert!(bag.is_empty(), "{:?}", bag.into_vec());
        assert!(matches!(first_expr(&program), Expr::Lambda { params, body: LambdaBody::Expr(_) } if params.len() == 1));
        match &program.statements[1].node {
            Statement::Var(v) => assert!(matches!(
                v.value.as_ref().map(|e| &e.node),
                Some(Expr::Lambda { body: LambdaBody::Block(_), .. })
            )),
            other => panic!("Expected var, got {other:?}"),
        }
    }

    #[test]
    fn test_match_expression_and_statement() {
        let source = r#"
var s = match n { 1 => "one", _ => "many" };
switch n { 0 => { println("zero"); } _ => println("other") }
"#;
        let (program, bag) = parse_str(source);
        assert!(bag.is_empty(), "{:?}", bag.into_vec());
        match first_expr(&program) {
            Expr::Match { arms, .. } => {
                assert_eq!(arms.len(), 2);
                assert_eq!(arms[1].pattern, Pattern::Wildcard);
            }
            other => panic!("Expected match, got {other:?}"),
        }
        assert_eq!(program.statements.len(), 2);
    }

    #[test]
    fn test_interpolated_string() {
        let (program, bag) = parse_str(r#"var s = $"Hello {user.name}, {{x}}!";"#);
        assert!(bag.is_empty(), "{:?}", bag.into_vec());
        match first_expr(&program) {
            Expr::Interpolated(parts) => {
                assert_eq!(parts.len(), 3);
                assert_eq!(parts[0], InterpPart::Text("Hello ".into()));
                assert!(matches!(&parts[1], InterpPart::Expr(_)));
                assert_eq!(parts[2], InterpPart::Text(", {x}!".into()));
            }
            other => panic!("Expected interpolated string, got {other:?}"),
        }
    }

    #[test]
    fn test_array_literal_and_collect() {
        let (program, bag) = parse_str("var a = [1, 2, 3,];\nvar b = [v * 2 for v in a if v > 1];");
        assert!(bag.is_empty(), "{:?}", bag.into_vec());
        assert!(matches!(first_expr(&program), Expr::Array(items) if items.len() == 3));
        match &program.statements[1].node {
            Statement::Var(v) => assert!(matches!(
                v.value.as_ref().map(|e| &e.node),
                Some(Expr::ArrayCollect { filter: Some(_), .. })
            )),
            other => panic!("Expected var, got {other:?}"),
        }
    }

    #[test]
    fn test_capitalized_call_is_implicit_constructor() {
        let (program, _, checker) = parse_checked("var p = Point(1, 2);\nvar q = new List<int>();");
        assert!(matches!(first_expr(&program), Expr::New { implicit: true, args, .. } if args.len() == 2));
        assert_eq!(
            checker.constructors,
            vec![("Point".to_string(), 2), ("List<int>".to_string(), 0)]
        );
        assert!(checker.calls.is_empty());
    }

    #[test]
    fn test_qualified_names_build_paths() {
        let (program, _) = parse_str("Console.WriteLine(1);");
        match first_expr(&program) {
            Expr::Call { callee, args } => {
                assert_eq!(callee.node, Expr::Qualified(vec!["Console".into(), "WriteLine".into()]));
                assert_eq!(args.len(), 1);
            }
            other => panic!("Expected call, got {other:?}"),
        }
    }

    // ========================================================================
    // Registration and validation hooks
    // ========================================================================

    #[test]
    fn test_forward_reference_is_registered_before_use() {
        let source = "main();\nfunction main() { helper(); }\nfunction helper() { }";
        let (_, bag, checker) = parse_checked(source);
        assert!(!bag.has_errors(), "{:?}", bag.into_vec());
        assert!(checker.functions.starts_with(&["main".to_string(), "helper".to_string()]));
        assert_eq!(checker.calls, vec!["main", "helper"]);
    }

    #[test]
    fn test_unknown_call_reported_once() {
        let (_, bag, _) = parse_checked("function main() { mkae(); }");
        assert_eq!(bag.count_code(DiagnosticCode::UnknownFunction), 1);
    }

    #[test]
    fn test_locals_and_parameters_are_not_validated() {
        let source = "var cb = 1;\nfunction run(handler) { var local = 2; handler(local); cb(); local.go(); }";
        let (_, bag, checker) = parse_checked(source);
        assert!(!bag.has_errors(), "{:?}", bag.into_vec());
        assert!(checker.calls.is_empty(), "{:?}", checker.calls);
    }

    #[test]
    fn test_this_and_class_member_access_are_validated() {
        let source = r#"
enum Color { Red }
class Greeter {
    var name: string;
    function greet() { this.shout(); var c = Color.Red; name.Trim(); }
}
"#;
        let (_, _, checker) = parse_checked(source);
        assert!(checker.members.contains(&("Greeter".to_string(), "shout".to_string())));
        assert!(checker.members.contains(&("Color".to_string(), "Red".to_string())));
        assert_eq!(checker.members.len(), 2);
    }

    #[test]
    fn test_namespace_prefix_is_stripped_for_calls() {
        let source = "namespace App { function run() { } }\nApp.run();";
        let (_, bag, checker) = parse_checked(source);
        assert!(!bag.has_errors(), "{:?}", bag.into_vec());
        assert_eq!(checker.namespaces.first().map(String::as_str), Some("App"));
        assert_eq!(checker.calls, vec!["run"]);
    }

    #[test]
    fn test_import_alias_expands_in_calls() {
        let source = "import Utilities.Strings as S;\nS.pad(1);";
        let (_, _, checker) = parse_checked(source);
        assert_eq!(checker.calls, vec!["Utilities.Strings.pad"]);
    }

    // ========================================================================
    // Recovery
    // ========================================================================

    #[test]
    fn test_malformed_statement_recovers() {
        let (program, bag) = parse_str("var = ;\nvar a = 1;\nvar b = 2;");
        assert_eq!(bag.error_count(), 1, "{:?}", bag.into_vec());
        assert_eq!(program.statements.len(), 2);
    }

    #[test]
    fn test_forward_pass_diagnostics_are_discarded() {
        let (program, bag, checker) = parse_checked("function broken(a b) { }\nvar x = 1;");
        assert_eq!(bag.error_count(), 1, "{:?}", bag.into_vec());
        assert_eq!(bag.count_code(DiagnosticCode::MissingToken), 1);
        assert!(checker.functions.is_empty());
        assert!(matches!(program.statements.last().map(|s| &s.node), Some(Statement::Var(_))));
    }

    #[test]
    fn test_error_inside_body_keeps_function() {
        let (program, bag) = parse_str("function f() { var = 1; return 2; }\nfunction g() { }");
        assert_eq!(bag.error_count(), 1);
        assert_eq!(program.statements.len(), 2);
        match &program.statements[0].node {
            Statement::Function(f) => assert_eq!(f.body.as_ref().map(Vec::len), Some(1)),
            other => panic!("Expected function, got {other:?}"),
        }
    }

    #[test]
    fn test_deep_parentheses_report_instead_of_overflowing() {
        let depth = 20_000;
        let source = format!("var x = {}1{};\nvar y = 2;", "(".repeat(depth), ")".repeat(depth));
        let (program, bag) = parse_str(&source);
        let errors: Vec<_> = bag.errors().map(|d| d.message.clone()).collect();
        assert_eq!(errors, vec![format!("nesting exceeds {MAX_NESTING} levels")]);
        assert_eq!(program.statements.len(), 1);
    }

    #[test]
    fn test_nesting_below_the_limit_parses() {
        let source = format!("var x = {}1{};", "(".repeat(32), ")".repeat(32));
        let (program, bag) = parse_str(&source);
        assert!(bag.is_empty(), "{:?}", bag.into_vec());
        assert_eq!(program.statements.len(), 1);
    }

    #[test]
    fn test_deep_unary_and_statement_chains_are_bounded() {
        let unary = format!("var x = {}true;", "!".repeat(20_000));
        let (_, bag) = parse_str(&unary);
        assert_eq!(bag.error_count(), 1);

        let ifs = format!("function f() {{ {}return 1; }}", "if (true) ".repeat(20_000));
        let (_, bag) = parse_str(&ifs);
        assert!(bag.errors().any(|d| d.message.starts_with("nesting exceeds")));

        let blocks = format!("function f() {{ {}{} }}", "loop { ".repeat(20_000), "}".repeat(20_000));
        let (_, bag) = parse_str(&blocks);
        assert!(bag.errors().any(|d| d.message.starts_with("nesting exceeds")));
    }

    #[test]
    fn test_missing_eof_is_appended() {
        let mut tokens = lexer::lex("var a = 1;").expect("scan");
        tokens.pop();
        let mut bag = DiagnosticBag::new();
        let program = parse(&tokens, &mut bag, &mut NoopChecker);
        assert_eq!(program.statements.len(), 1);
        assert!(bag.is_empty());
    }
}
