/// Declaration parsing methods.
///
/// This chunk parses attributes, modifiers, and the declaration forms: functions, classes,
/// structs, interfaces, enums, namespaces, imports and includes. Finished declarations are
/// registered with the checker at the point of declaration, and their attributes validated.
impl<'a> Parser<'a> {
    // ========================================================================
    // Declarations
    // ========================================================================

    /// Return `true` if the current token starts an (optionally attributed/modified) declaration.
    fn at_declaration_start(&self) -> bool {
        let kind = self.peek().kind;
        kind.is_modifier()
            || [
                KeywordId::Function,
                KeywordId::Class,
                KeywordId::Struct,
                KeywordId::Interface,
                KeywordId::Enum,
            ]
            .into_iter()
            .any(|id| kind.is_keyword(id))
            || self.is_attribute_start()
    }

    /// Return `true` if the current `[` opens an attribute group attached to a following declaration.
    fn is_attribute_start(&self) -> bool {
        if !self.check_punct(PunctuationId::LBracket) || self.peek_at(1).kind != TokenKind::Ident {
            return false;
        }
        if self.is_attribute_application_start() {
            return false;
        }
        let Some(close) = self.matching_close(self.pos) else {
            return false;
        };
        let follower = self.kind_at(close + 1);
        follower.is_punctuation(PunctuationId::LBracket)
            || follower.is_modifier()
            || [
                KeywordId::Function,
                KeywordId::Class,
                KeywordId::Struct,
                KeywordId::Interface,
                KeywordId::Enum,
                KeywordId::Var,
                KeywordId::Let,
                KeywordId::Const,
                KeywordId::Property,
                KeywordId::Constructor,
            ]
            .into_iter()
            .any(|id| follower.is_keyword(id))
    }

    /// `[assembly: ...]` / `[module: ...]`
    fn is_attribute_application_start(&self) -> bool {
        if !self.check_punct(PunctuationId::LBracket) {
            return false;
        }
        let target = self.peek_at(1);
        let names_target = target.is_ident_named("assembly") || target.kind.is_keyword(KeywordId::Module);
        names_target && self.peek_at(2).kind.is_punctuation(PunctuationId::Colon)
    }

    /// Parse attributes and modifiers, then the declaration they introduce.
    fn declaration(&mut self) -> ParseResult<Spanned<Statement>> {
        let loc = self.current_loc();
        let attributes = self.attribute_groups()?;
        let modifiers = self.modifiers();

        let stmt = match self.peek().kind {
            TokenKind::Keyword(KeywordId::Function) => {
                let decl = self.function_decl(attributes, modifiers)?;
                self.register_function(&decl, loc);
                Statement::Function(decl)
            }
            TokenKind::Keyword(KeywordId::Class | KeywordId::Struct) => {
                let decl = self.class_decl(attributes, modifiers)?;
                self.with_checker(|c, r| c.register_class(&decl, loc, r));
                Statement::Class(decl)
            }
            TokenKind::Keyword(KeywordId::Interface) => {
                let decl = self.interface_decl(attributes, modifiers)?;
                self.with_checker(|c, r| c.register_interface(&decl, loc, r));
                Statement::Interface(decl)
            }
            TokenKind::Keyword(KeywordId::Enum) => {
                let decl = self.enum_decl(attributes, modifiers)?;
                self.with_checker(|c, r| c.register_enum(&decl, loc, r));
                Statement::Enum(decl)
            }
            TokenKind::Keyword(KeywordId::Var | KeywordId::Let | KeywordId::Const) => {
                self.check_attributes(&attributes, AttributeTarget::Field, loc);
                let decl = self.var_decl()?;
                self.expect_punct(PunctuationId::Semicolon, "expected ';' after variable declaration")?;
                Statement::Var(decl)
            }
            _ => return Err(self.expected("expected declaration after attributes or modifiers")),
        };
        Ok(Spanned::new(stmt, loc))
    }

    fn register_function(&mut self, decl: &FunctionDecl, loc: Location) {
        self.with_checker(|c, r| c.register_function(decl, loc, r));
    }

    fn check_attributes(&mut self, attributes: &[Attribute], target: AttributeTarget, loc: Location) {
        if attributes.is_empty() || self.prescanning {
            return;
        }
        self.with_checker(|c, r| c.validate_attributes(attributes, target, loc, r));
    }

    fn check_param_attributes(&mut self, params: &[Param]) {
        for param in params {
            self.check_attributes(&param.attributes, AttributeTarget::Parameter, param.loc);
        }
    }

    // ========================================================================
    // Attributes and modifiers
    // ========================================================================

    /// Parse zero or more `[A, B(args)]` groups.
    fn attribute_groups(&mut self) -> ParseResult<Vec<Attribute>> {
        let mut attributes = Vec::new();
        while self.check_punct(PunctuationId::LBracket)
            && self.peek_at(1).kind == TokenKind::Ident
            && !self.is_attribute_application_start()
        {
            self.advance();
            attributes.extend(self.attribute_list()?);
        }
        Ok(attributes)
    }

    /// Parse `A, B(args)]` after an opening bracket, consuming the closing bracket.
    fn attribute_list(&mut self) -> ParseResult<Vec<Attribute>> {
        let mut attributes = vec![self.attribute()?];
        while self.match_punct(PunctuationId::Comma) {
            attributes.push(self.attribute()?);
        }
        self.expect_punct(PunctuationId::RBracket, "expected ']' after attribute")?;
        Ok(attributes)
    }

    fn attribute(&mut self) -> ParseResult<Attribute> {
        let loc = self.current_loc();
        let name = self.dotted_name()?;
        let mut args = Vec::new();
        if self.match_punct(PunctuationId::LParen) {
            while !self.check_punct(PunctuationId::RParen) {
                let named = self.check_kind(TokenKind::Ident) && self.peek_at(1).kind.is_operator(OperatorId::Eq);
                let arg_name = if named {
                    let name = self.advance().text.clone();
                    self.advance();
                    Some(name)
                } else {
                    None
                };
                let value = self.expression()?;
                args.push(AttributeArg { name: arg_name, value });
                if !self.match_punct(PunctuationId::Comma) {
                    break;
                }
            }
            self.expect_punct(PunctuationId::RParen, "expected ')' after attribute arguments")?;
        }
        Ok(Attribute { name, args, loc })
    }

    /// `[assembly: A(args)]` as a standalone statement.
    fn attribute_application(&mut self) -> ParseResult<Statement> {
        let loc = self.expect_punct(PunctuationId::LBracket, "expected '['")?;
        let target = if self.match_keyword(KeywordId::Module) {
            AttributeTarget::Module
        } else {
            self.advance();
            AttributeTarget::Assembly
        };
        self.expect_punct(PunctuationId::Colon, "expected ':' after attribute target")?;
        let attributes = self.attribute_list()?;
        self.check_attributes(&attributes, target, loc);
        Ok(Statement::AttributeApplication(AttributeApplication { target, attributes }))
    }

    fn modifiers(&mut self) -> Vec<Modifier> {
        let mut modifiers = Vec::new();
        while let Some(modifier) = self.peek().kind.keyword_id().and_then(Modifier::from_keyword) {
            self.advance();
            modifiers.push(modifier);
        }
        modifiers
    }

    // ========================================================================
    // Functions
    // ========================================================================

    /// `function name(params): Ret { body }` or `function name(params);`
    fn function_decl(&mut self, attributes: Vec<Attribute>, modifiers: Vec<Modifier>) -> ParseResult<FunctionDecl> {
        let loc = self.expect_keyword(KeywordId::Function, "expected 'function'")?;
        let name = self.dotted_name()?;
        let type_params = self.type_params()?;
        let params = self.params()?;
        let return_type = if self.match_punct(PunctuationId::Colon) {
            Some(self.type_expr()?)
        } else {
            None
        };

        let body = if self.match_punct(PunctuationId::Semicolon) {
            None
        } else {
            let names = params.iter().map(|p| p.name.clone());
            Some(self.scoped_block(names)?)
        };

        self.check_attributes(&attributes, AttributeTarget::Method, loc);
        self.check_param_attributes(&params);

        Ok(FunctionDecl {
            attributes,
            modifiers,
            name,
            type_params,
            params,
            return_type,
            body,
        })
    }

    /// `( [attrs] name: Type, ... )`
    fn params(&mut self) -> ParseResult<Vec<Param>> {
        self.expect_punct(PunctuationId::LParen, "expected '(' before parameters")?;
        let mut params = Vec::new();
        while !self.check_punct(PunctuationId::RParen) {
            params.push(self.param()?);
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        self.expect_punct(PunctuationId::RParen, "expected ')' after parameters")?;
        Ok(params)
    }

    fn param(&mut self) -> ParseResult<Param> {
        let mut attributes = Vec::new();
        while self.match_punct(PunctuationId::LBracket) {
            attributes.extend(self.attribute_list()?);
        }
        let loc = self.current_loc();
        let name = self.identifier()?;
        let ty = if self.match_punct(PunctuationId::Colon) {
            Some(self.type_expr()?)
        } else {
            None
        };
        Ok(Param {
            attributes,
            name,
            ty,
            loc,
        })
    }

    // ========================================================================
    // Classes, structs, interfaces, enums
    // ========================================================================

    fn class_decl(&mut self, attributes: Vec<Attribute>, modifiers: Vec<Modifier>) -> ParseResult<ClassDecl> {
        let loc = self.current_loc();
        let kind = if self.match_keyword(KeywordId::Struct) {
            ClassKind::Struct
        } else {
            self.expect_keyword(KeywordId::Class, "expected 'class'")?;
            ClassKind::Class
        };
        let name = self.identifier()?;
        let type_params = self.type_params()?;
        let bases = self.base_list()?;
        let members = self.class_body(&name)?;

        let target = match kind {
            ClassKind::Class => AttributeTarget::Class,
            ClassKind::Struct => AttributeTarget::Struct,
        };
        self.check_attributes(&attributes, target, loc);

        Ok(ClassDecl {
            attributes,
            modifiers,
            kind,
            name,
            type_params,
            bases,
            members,
        })
    }

    fn interface_decl(&mut self, attributes: Vec<Attribute>, modifiers: Vec<Modifier>) -> ParseResult<InterfaceDecl> {
        let loc = self.expect_keyword(KeywordId::Interface, "expected 'interface'")?;
        let name = self.identifier()?;
        let type_params = self.type_params()?;
        let bases = self.base_list()?;
        let members = self.class_body(&name)?;
        self.check_attributes(&attributes, AttributeTarget::Interface, loc);
        Ok(InterfaceDecl {
            attributes,
            modifiers,
            name,
            type_params,
            bases,
            members,
        })
    }

    /// `: Base, IFace, ...`
    fn base_list(&mut self) -> ParseResult<Vec<TypeExpr>> {
        let mut bases = Vec::new();
        if self.match_punct(PunctuationId::Colon) {
            bases.push(self.type_expr()?);
            while self.match_punct(PunctuationId::Comma) {
                bases.push(self.type_expr()?);
            }
        }
        Ok(bases)
    }

    /// Parse `{ members }`, with member names (and `base`) in scope for the member bodies.
    fn class_body(&mut self, class_name: &str) -> ParseResult<Vec<Spanned<ClassMember>>> {
        if !self.check_punct(PunctuationId::LBrace) {
            return Err(self.expected("expected '{' to open class body"));
        }
        let mut scope = self.collect_member_names();
        scope.insert("base".to_string());
        self.advance();

        let outer_class = self.current_class.replace(class_name.to_string());
        self.scopes.push(scope);

        let mut members = Vec::new();
        while !self.check_punct(PunctuationId::RBrace) && !self.is_at_end() {
            let start = self.pos;
            match self.class_member() {
                Ok(member) => members.push(member),
                Err(e) => {
                    self.report_syntax(&e);
                    self.synchronize(start);
                }
            }
        }

        self.scopes.pop();
        self.current_class = outer_class;
        self.expect_punct(PunctuationId::RBrace, "expected '}' to close class body")?;
        Ok(members)
    }

    /// Names declared at depth 1 of the class body starting at the current `{`.
    fn collect_member_names(&self) -> HashSet<String> {
        let mut names = HashSet::new();
        let end = self.matching_close(self.pos).unwrap_or(self.tokens.len() - 1);
        let mut depth = 0usize;
        let mut idx = self.pos;
        while idx < end {
            let kind = self.tokens[idx].kind;
            match kind {
                TokenKind::Punctuation(PunctuationId::LBrace) => depth += 1,
                TokenKind::Punctuation(PunctuationId::RBrace) => depth = depth.saturating_sub(1),
                TokenKind::Keyword(
                    KeywordId::Function | KeywordId::Property | KeywordId::Var | KeywordId::Let | KeywordId::Const,
                ) if depth == 1 => {
                    if let Some(next) = self.tokens.get(idx + 1).filter(|t| t.kind == TokenKind::Ident) {
                        names.insert(next.text.clone());
                    }
                }
                _ => {}
            }
            idx += 1;
        }
        names
    }

    fn class_member(&mut self) -> ParseResult<Spanned<ClassMember>> {
        let loc = self.current_loc();
        let attributes = self.attribute_groups()?;
        let modifiers = self.modifiers();

        let member = match self.peek().kind {
            TokenKind::Keyword(KeywordId::Function) => ClassMember::Method(self.function_decl(attributes, modifiers)?),
            TokenKind::Keyword(KeywordId::Constructor) => {
                ClassMember::Constructor(self.constructor_decl(attributes, modifiers)?)
            }
            TokenKind::Keyword(KeywordId::Property) => ClassMember::Property(self.property_decl(attributes, modifiers)?),
            TokenKind::Keyword(KeywordId::Var | KeywordId::Let | KeywordId::Const) => {
                self.check_attributes(&attributes, AttributeTarget::Field, loc);
                let decl = self.var_decl()?;
                self.expect_punct(PunctuationId::Semicolon, "expected ';' after field declaration")?;
                ClassMember::Field(FieldDecl {
                    attributes,
                    modifiers,
                    kind: decl.kind,
                    name: decl.name,
                    ty: decl.ty,
                    value: decl.value,
                })
            }
            _ => return Err(self.expected("expected class member")),
        };
        Ok(Spanned::new(member, loc))
    }

    fn constructor_decl(&mut self, attributes: Vec<Attribute>, modifiers: Vec<Modifier>) -> ParseResult<ConstructorDecl> {
        let loc = self.expect_keyword(KeywordId::Constructor, "expected 'constructor'")?;
        let params = self.params()?;
        let names = params.iter().map(|p| p.name.clone());
        let body = self.scoped_block(names)?;
        self.check_attributes(&attributes, AttributeTarget::Constructor, loc);
        self.check_param_attributes(&params);
        Ok(ConstructorDecl {
            attributes,
            modifiers,
            params,
            body,
        })
    }

    /// `property Name: Type { get; set { ... } }` or `property Name: Type;`
    fn property_decl(&mut self, attributes: Vec<Attribute>, modifiers: Vec<Modifier>) -> ParseResult<PropertyDecl> {
        let loc = self.expect_keyword(KeywordId::Property, "expected 'property'")?;
        let name = self.identifier()?;
        let ty = if self.match_punct(PunctuationId::Colon) {
            Some(self.type_expr()?)
        } else {
            None
        };

        let mut getter = None;
        let mut setter = None;
        if self.match_punct(PunctuationId::LBrace) {
            while !self.check_punct(PunctuationId::RBrace) && !self.is_at_end() {
                self.modifiers();
                let accessor_loc = self.current_loc();
                let is_get = self.peek().is_ident_named("get");
                if !is_get && !self.peek().is_ident_named("set") {
                    return Err(self.expected("expected 'get' or 'set' accessor"));
                }
                self.advance();
                let body = if self.match_punct(PunctuationId::Semicolon) {
                    None
                } else if is_get {
                    Some(self.scoped_block(std::iter::empty())?)
                } else {
                    Some(self.scoped_block(std::iter::once("value".to_string()))?)
                };
                let accessor = Accessor {
                    body,
                    loc: accessor_loc,
                };
                if is_get {
                    getter = Some(accessor);
                } else {
                    setter = Some(accessor);
                }
            }
            self.expect_punct(PunctuationId::RBrace, "expected '}' after property accessors")?;
        } else {
            self.expect_punct(PunctuationId::Semicolon, "expected '{' or ';' after property")?;
        }

        self.check_attributes(&attributes, AttributeTarget::Property, loc);
        Ok(PropertyDecl {
            attributes,
            modifiers,
            name,
            ty,
            getter,
            setter,
        })
    }

    /// `enum Name { A, B = 2, }`
    fn enum_decl(&mut self, attributes: Vec<Attribute>, modifiers: Vec<Modifier>) -> ParseResult<EnumDecl> {
        let loc = self.expect_keyword(KeywordId::Enum, "expected 'enum'")?;
        let name = self.identifier()?;
        self.expect_punct(PunctuationId::LBrace, "expected '{' to open enum body")?;
        let mut variants = Vec::new();
        while !self.check_punct(PunctuationId::RBrace) {
            let variant_loc = self.current_loc();
            let variant = self.identifier()?;
            let value = if self.match_op(OperatorId::Eq) {
                Some(self.expression()?)
            } else {
                None
            };
            variants.push(Spanned::new(EnumVariant { name: variant, value }, variant_loc));
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        self.expect_punct(PunctuationId::RBrace, "expected '}' to close enum body")?;
        self.check_attributes(&attributes, AttributeTarget::Enum, loc);
        Ok(EnumDecl {
            attributes,
            modifiers,
            name,
            variants,
        })
    }

    // ========================================================================
    // Namespaces, imports, includes
    // ========================================================================

    fn namespace_decl(&mut self) -> ParseResult<Statement> {
        let kind = if self.match_keyword(KeywordId::Module) {
            NamespaceKind::Module
        } else {
            self.expect_keyword(KeywordId::Namespace, "expected 'namespace'")?;
            NamespaceKind::Namespace
        };
        let name = self.dotted_name()?;
        self.with_checker(|c, _| c.register_namespace(&name));

        self.expect_punct(PunctuationId::LBrace, "expected '{' after namespace name")?;
        let mut body = Vec::new();
        while !self.check_punct(PunctuationId::RBrace) && !self.is_at_end() {
            if let Some(stmt) = self.statement_or_recover() {
                body.push(stmt);
            }
        }
        self.expect_punct(PunctuationId::RBrace, "expected '}' to close namespace")?;
        Ok(Statement::Namespace(NamespaceDecl { kind, name, body }))
    }

    /// `import a.b.c;` / `import a.b.c as x;`
    fn import_decl(&mut self) -> ParseResult<Statement> {
        self.expect_keyword(KeywordId::Import, "expected 'import'")?;
        let path = self.dotted_name()?;
        let alias = if self.match_keyword(KeywordId::As) {
            Some(self.identifier()?)
        } else {
            None
        };
        self.expect_punct(PunctuationId::Semicolon, "expected ';' after import")?;
        if let Some(alias) = &alias {
            self.aliases.insert(alias.clone(), path.clone());
        }
        Ok(Statement::Import(ImportDecl { path, alias }))
    }

    /// `include "file";`
    fn include_decl(&mut self) -> ParseResult<Statement> {
        self.expect_keyword(KeywordId::Include, "expected 'include'")?;
        let path = self.string_literal()?;
        self.expect_punct(PunctuationId::Semicolon, "expected ';' after include")?;
        Ok(Statement::Include(path))
    }
}
