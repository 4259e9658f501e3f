//! Recursive-descent parser for the Sable language.
//!
//! Converts a token stream into a [`Program`], running a forward registration pass first so that
//! calls may refer to functions and classes declared later in the unit. Reference sites (calls,
//! constructor calls, member accesses, attribute applications) are validated through the
//! [`SymbolChecker`] as the tree is built.
//!
//! ## Examples
//!
//! ```rust
//! use sable_syntax::checker::NoopChecker;
//! use sable_syntax::diagnostics::DiagnosticBag;
//! use sable_syntax::{lexer, parser};
//!
//! let tokens = lexer::lex("var x = 1;\nprintln(x);").unwrap();
//! let mut bag = DiagnosticBag::new();
//! let program = parser::parse(&tokens, &mut bag, &mut NoopChecker);
//! assert_eq!(program.statements.len(), 2);
//! ```

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

use crate::ast::*;
use crate::checker::SymbolChecker;
use crate::diagnostics::{Diagnostic, DiagnosticBag, Reporter, SyntaxError};
use crate::lexer::{Token, TokenKind};
use crate::token_helpers::starts_uppercase;
use sable_core::host::AttributeTarget;
use sable_core::lang::keywords::KeywordId;
use sable_core::lang::operators::OperatorId;
use sable_core::lang::punctuation::PunctuationId;

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/prescan.rs");
include!("parser/decl.rs");
include!("parser/types.rs");
include!("parser/stmts.rs");
include!("parser/expr.rs");
include!("parser/util.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
