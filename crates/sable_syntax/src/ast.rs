//! Abstract Syntax Tree definitions for Sable.
//!
//! Every node owns its children; the tree has no back references. Positions are 1-based
//! line/column pairs taken from the token that starts the construct.

use std::fmt;

use sable_core::host::AttributeTarget;
use sable_core::lang::keywords::KeywordId;

/// Source position (1-based line and column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub loc: Location,
}

impl<T> Spanned<T> {
    pub fn new(node: T, loc: Location) -> Self {
        Self { node, loc }
    }
}

/// Identifier
pub type Ident = String;

/// Statement list owned by a block-bodied construct.
pub type Block = Vec<Spanned<Statement>>;

/// A compilation unit: the ordered top-level statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Block,
}

// ============================================================================
// Declarations
// ============================================================================

/// A bracketed attribute application: `[Name]`, `[Name(arg, Key = value)]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// Possibly dotted name, as written.
    pub name: String,
    pub args: Vec<AttributeArg>,
    pub loc: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttributeArg {
    /// `Some` for named arguments (`Key = value`).
    pub name: Option<Ident>,
    pub value: Spanned<Expr>,
}

impl Attribute {
    /// Positional (constructor) arguments, in order.
    pub fn positional_args(&self) -> impl Iterator<Item = &AttributeArg> {
        self.args.iter().filter(|a| a.name.is_none())
    }
}

/// Declaration modifier keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Public,
    Private,
    Protected,
    Internal,
    Static,
    Abstract,
    Virtual,
    Override,
    Sealed,
    Readonly,
    Async,
}

impl Modifier {
    pub fn from_keyword(id: KeywordId) -> Option<Modifier> {
        Some(match id {
            KeywordId::Public => Modifier::Public,
            KeywordId::Private => Modifier::Private,
            KeywordId::Protected => Modifier::Protected,
            KeywordId::Internal => Modifier::Internal,
            KeywordId::Static => Modifier::Static,
            KeywordId::Abstract => Modifier::Abstract,
            KeywordId::Virtual => Modifier::Virtual,
            KeywordId::Override => Modifier::Override,
            KeywordId::Sealed => Modifier::Sealed,
            KeywordId::Readonly => Modifier::Readonly,
            KeywordId::Async => Modifier::Async,
            _ => return None,
        })
    }
}

/// Visibility derived from a modifier list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Public,
    Private,
    Protected,
    Internal,
}

impl Visibility {
    pub fn from_modifiers(modifiers: &[Modifier]) -> Visibility {
        modifiers
            .iter()
            .find_map(|m| match m {
                Modifier::Public => Some(Visibility::Public),
                Modifier::Private => Some(Visibility::Private),
                Modifier::Protected => Some(Visibility::Protected),
                Modifier::Internal => Some(Visibility::Internal),
                _ => None,
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportDecl {
    pub path: String,
    pub alias: Option<Ident>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamespaceKind {
    Namespace,
    Module,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamespaceDecl {
    pub kind: NamespaceKind,
    pub name: String,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub attributes: Vec<Attribute>,
    pub name: Ident,
    pub ty: Option<TypeExpr>,
    pub loc: Location,
}

/// A function or method declaration. `body` is `None` for bodiless (`;`) declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub attributes: Vec<Attribute>,
    pub modifiers: Vec<Modifier>,
    /// Possibly dotted (`Math.square`).
    pub name: String,
    pub type_params: Vec<Ident>,
    pub params: Vec<Param>,
    pub return_type: Option<TypeExpr>,
    pub body: Option<Block>,
}

impl FunctionDecl {
    pub fn is_static(&self) -> bool {
        self.modifiers.contains(&Modifier::Static)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    Class,
    Struct,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    pub attributes: Vec<Attribute>,
    pub modifiers: Vec<Modifier>,
    pub kind: ClassKind,
    pub name: Ident,
    pub type_params: Vec<Ident>,
    /// Base class first (if any), then implemented interfaces, as written after `:`.
    pub bases: Vec<TypeExpr>,
    pub members: Vec<Spanned<ClassMember>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceDecl {
    pub attributes: Vec<Attribute>,
    pub modifiers: Vec<Modifier>,
    pub name: Ident,
    pub type_params: Vec<Ident>,
    pub bases: Vec<TypeExpr>,
    pub members: Vec<Spanned<ClassMember>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumDecl {
    pub attributes: Vec<Attribute>,
    pub modifiers: Vec<Modifier>,
    pub name: Ident,
    pub variants: Vec<Spanned<EnumVariant>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumVariant {
    pub name: Ident,
    pub value: Option<Spanned<Expr>>,
}

/// Members of classes, structs and interfaces.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassMember {
    Field(FieldDecl),
    Property(PropertyDecl),
    Method(FunctionDecl),
    Constructor(ConstructorDecl),
}

impl ClassMember {
    /// Member name; constructors have none.
    pub fn name(&self) -> Option<&str> {
        match self {
            ClassMember::Field(f) => Some(&f.name),
            ClassMember::Property(p) => Some(&p.name),
            ClassMember::Method(m) => Some(&m.name),
            ClassMember::Constructor(_) => None,
        }
    }

    pub fn attributes(&self) -> &[Attribute] {
        match self {
            ClassMember::Field(f) => &f.attributes,
            ClassMember::Property(p) => &p.attributes,
            ClassMember::Method(m) => &m.attributes,
            ClassMember::Constructor(c) => &c.attributes,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub attributes: Vec<Attribute>,
    pub modifiers: Vec<Modifier>,
    pub kind: VarKind,
    pub name: Ident,
    pub ty: Option<TypeExpr>,
    pub value: Option<Spanned<Expr>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDecl {
    pub attributes: Vec<Attribute>,
    pub modifiers: Vec<Modifier>,
    pub name: Ident,
    pub ty: Option<TypeExpr>,
    pub getter: Option<Accessor>,
    pub setter: Option<Accessor>,
}

/// A property accessor; `body` is `None` for auto accessors (`get;`).
#[derive(Debug, Clone, PartialEq)]
pub struct Accessor {
    pub body: Option<Block>,
    pub loc: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorDecl {
    pub attributes: Vec<Attribute>,
    pub modifiers: Vec<Modifier>,
    pub params: Vec<Param>,
    pub body: Block,
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Import(ImportDecl),
    Include(String),
    Namespace(NamespaceDecl),
    Class(ClassDecl),
    Interface(InterfaceDecl),
    Enum(EnumDecl),
    Function(FunctionDecl),
    Var(VarDecl),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    ForIn(ForInStmt),
    Loop(Block),
    Return(Option<Spanned<Expr>>),
    Break,
    Continue,
    Block(Block),
    Expr(Spanned<Expr>),
    /// Standalone `[assembly: X]` / `[module: X]`.
    AttributeApplication(AttributeApplication),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    Var,
    Let,
    Const,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub kind: VarKind,
    pub name: Ident,
    pub ty: Option<TypeExpr>,
    pub value: Option<Spanned<Expr>>,
}

/// `if` statement; `else if` is an `If` nested as the only statement of `else_body`.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Spanned<Expr>,
    pub then_body: Block,
    pub else_body: Option<Block>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Spanned<Expr>,
    pub body: Block,
}

/// C-style `for (init; condition; step)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub init: Option<Box<Spanned<Statement>>>,
    pub condition: Option<Spanned<Expr>>,
    pub step: Option<Spanned<Expr>>,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForInStmt {
    pub var: Ident,
    pub iterable: Spanned<Expr>,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttributeApplication {
    pub target: AttributeTarget,
    pub attributes: Vec<Attribute>,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Ident(Ident),
    /// Dotted path of plain identifiers (`Console.WriteLine`, `Color.Red`).
    Qualified(Vec<Ident>),
    This,
    Binary(Box<Spanned<Expr>>, BinaryOp, Box<Spanned<Expr>>),
    Unary(UnaryOp, Box<Spanned<Expr>>),
    Call {
        callee: Box<Spanned<Expr>>,
        args: Vec<Spanned<Expr>>,
    },
    /// Constructor call; `implicit` when written as `Name(args)` without `new`.
    New {
        ty: TypeExpr,
        args: Vec<Spanned<Expr>>,
        implicit: bool,
    },
    Index(Box<Spanned<Expr>>, Box<Spanned<Expr>>),
    Member(Box<Spanned<Expr>>, Ident),
    Assign {
        target: Box<Spanned<Expr>>,
        op: AssignOp,
        value: Box<Spanned<Expr>>,
    },
    Array(Vec<Spanned<Expr>>),
    /// `[element for var in iterable if filter]`
    ArrayCollect {
        element: Box<Spanned<Expr>>,
        var: Ident,
        iterable: Box<Spanned<Expr>>,
        filter: Option<Box<Spanned<Expr>>>,
    },
    Lambda {
        params: Vec<Param>,
        body: LambdaBody,
    },
    Match {
        subject: Box<Spanned<Expr>>,
        arms: Vec<MatchArm>,
    },
    Range {
        start: Box<Spanned<Expr>>,
        end: Box<Spanned<Expr>>,
        inclusive: bool,
    },
    Interpolated(Vec<InterpPart>),
}

impl Expr {
    /// Dotted spelling of an identifier path (`a`, `a.b.c`), if this is one.
    pub fn as_path(&self) -> Option<String> {
        match self {
            Expr::Ident(name) => Some(name.clone()),
            Expr::Qualified(parts) => Some(parts.join(".")),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    String(String),
    Bool(bool),
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Neg,
    PreInc,
    PreDec,
    PostInc,
    PostDec,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Assign,
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LambdaBody {
    Expr(Box<Spanned<Expr>>),
    Block(Block),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchArm {
    pub pattern: Pattern,
    pub body: MatchBody,
    pub loc: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    /// `_`
    Wildcard,
    Expr(Spanned<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MatchBody {
    Expr(Spanned<Expr>),
    Block(Block),
}

#[derive(Debug, Clone, PartialEq)]
pub enum InterpPart {
    Text(String),
    Expr(Spanned<Expr>),
}

// ============================================================================
// Types
// ============================================================================

/// A written type: dotted name, generic arguments, array rank and nullable marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeExpr {
    pub name: String,
    pub args: Vec<TypeExpr>,
    pub array_rank: usize,
    pub nullable: bool,
}

impl TypeExpr {
    pub fn simple(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            array_rank: 0,
            nullable: false,
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.args.is_empty() {
            f.write_str("<")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{arg}")?;
            }
            f.write_str(">")?;
        }
        for _ in 0..self.array_rank {
            f.write_str("[]")?;
        }
        if self.nullable {
            f.write_str("?")?;
        }
        Ok(())
    }
}
