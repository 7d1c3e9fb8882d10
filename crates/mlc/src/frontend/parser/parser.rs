//! Recursive descent parser for MiniLang
//!
//! The parser never gives up on a file: a syntax error is remembered, the
//! parser skips to the next `;` or `}` and carries on, so later
//! declarations still reach the analyzer.

use crate::common::{CompileError, CompileResult, Span};
use crate::frontend::lexer::{Lexer, Token, TokenKind};
use crate::syntax::*;

/// Nesting budget shared by blocks, sub-expressions, unary operators and
/// binary operator chains. The tree walkers recurse as deep as the parser.
const MAX_DEPTH: usize = 256;

/// Budget taken by a level that re-enters the whole expression grammar
/// (parentheses, call arguments, conditions) or a nested block
const GRAMMAR_LEVEL: usize = 4;

/// Result of parsing one source file
#[derive(Debug)]
pub struct ParseOutput {
    pub program: Program,
    /// Lexer and parser errors in the order they were found
    pub errors: Vec<CompileError>,
}

/// Recursive descent parser for MiniLang
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    errors: Vec<CompileError>,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given source
    pub fn new(source: &'a str) -> Self {
        let mut lexer = Lexer::new(source);
        let mut errors = Vec::new();
        let current = Self::pull(&mut lexer, &mut errors);
        Self {
            lexer,
            current,
            errors,
            depth: 0,
        }
    }

    /// Parse a complete program
    pub fn parse(mut self) -> ParseOutput {
        let mut items = Vec::new();

        while !self.at_end() {
            match self.parse_item() {
                Ok(item) => items.push(item),
                Err(e) => {
                    self.errors.push(e);
                    self.synchronize();
                    if self.check(&TokenKind::RBrace) {
                        self.advance();
                    }
                }
            }
        }

        ParseOutput {
            program: Program::new(items),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Helper methods
    // =========================================================================

    /// Next good token; bad characters are recorded and skipped
    fn pull(lexer: &mut Lexer<'a>, errors: &mut Vec<CompileError>) -> Token {
        loop {
            match lexer.next_token() {
                Ok(token) => return token,
                Err(e) => errors.push(e),
            }
        }
    }

    fn at_end(&self) -> bool {
        matches!(self.current.kind, TokenKind::Eof)
    }

    fn advance(&mut self) -> Token {
        let next = Self::pull(&mut self.lexer, &mut self.errors);
        std::mem::replace(&mut self.current, next)
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current.kind) == std::mem::discriminant(kind)
    }

    fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> CompileResult<Token> {
        if self.check(&kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&kind.to_string()))
        }
    }

    fn expect_identifier(&mut self) -> CompileResult<(String, Span)> {
        if matches!(self.current.kind, TokenKind::Identifier(_)) {
            let token = self.advance();
            if let TokenKind::Identifier(name) = token.kind {
                return Ok((name, token.span));
            }
        }
        Err(self.unexpected("identifier"))
    }

    fn expect_type(&mut self) -> CompileResult<(String, Span)> {
        match self.current.kind.type_name() {
            Some(name) => {
                let token = self.advance();
                Ok((name.to_string(), token.span))
            }
            None => Err(self.unexpected("type name")),
        }
    }

    /// Take `cost` from the nesting budget
    fn descend(&mut self, cost: usize, what: &str) -> CompileResult<()> {
        if self.depth + cost > MAX_DEPTH {
            return Err(CompileError::parser(format!("{} nested too deeply", what), self.current.span));
        }
        self.depth += cost;
        Ok(())
    }

    /// Run `parse` one level deeper; the budget is restored on every exit
    fn nested<T>(
        &mut self,
        cost: usize,
        what: &str,
        parse: impl FnOnce(&mut Self) -> CompileResult<T>,
    ) -> CompileResult<T> {
        let saved = self.depth;
        self.descend(cost, what)?;
        let result = parse(self);
        self.depth = saved;
        result
    }

    fn unexpected(&self, expected: &str) -> CompileError {
        CompileError::parser(
            format!("expected {}, found {}", expected, self.current.kind),
            self.current.span,
        )
    }

    /// Skip past the next `;`, or up to (not past) the next `}`
    fn synchronize(&mut self) {
        while !self.at_end() {
            match self.current.kind {
                TokenKind::Semi => {
                    self.advance();
                    return;
                }
                TokenKind::RBrace => return,
                _ => {
                    self.advance();
                }
            }
        }
    }

    // =========================================================================
    // Top-level items
    // =========================================================================

    fn parse_item(&mut self) -> CompileResult<Item> {
        let start_span = self.current.span;

        if !self.current.kind.is_type_keyword() {
            let expr = self.parse_expression()?;
            let end = self.expect(TokenKind::Semi)?;
            return Ok(Item::new(ItemKind::Expression(expr), start_span.merge(end.span)));
        }

        let (ty, _) = self.expect_type()?;
        let (name, _) = self.expect_identifier()?;

        if self.check(&TokenKind::LParen) {
            let func = self.parse_function_rest(ty, name, start_span)?;
            let span = func.span;
            return Ok(Item::new(ItemKind::Function(func), span));
        }

        let var = self.parse_var_decl_rest(ty, name, start_span)?;
        let span = var.span;
        Ok(Item::new(ItemKind::Variable(var), span))
    }

    /// Everything after `type name` of a variable declaration
    fn parse_var_decl_rest(&mut self, ty: String, name: String, start_span: Span) -> CompileResult<VarDecl> {
        let init = if self.match_token(&TokenKind::Eq) {
            Some(self.parse_expression()?)
        } else {
            None
        };
        let end = self.expect(TokenKind::Semi)?;

        let var = VarDecl::new(ty, name, start_span.merge(end.span));
        Ok(match init {
            Some(init) => var.with_init(init),
            None => var,
        })
    }

    /// Everything after `type name` of a function definition
    fn parse_function_rest(&mut self, return_type: String, name: String, start_span: Span) -> CompileResult<FuncDecl> {
        self.expect(TokenKind::LParen)?;

        let params = if self.check(&TokenKind::RParen) {
            None
        } else {
            let mut params = vec![self.parse_param()?];
            while self.match_token(&TokenKind::Comma) {
                params.push(self.parse_param()?);
            }
            Some(params)
        };
        self.expect(TokenKind::RParen)?;

        let body = self.parse_block()?;
        let func = FuncDecl::new(return_type, name, start_span.merge(body.span));
        let func = match params {
            Some(params) => func.with_params(params),
            None => func,
        };
        Ok(func.with_body(body))
    }

    fn parse_param(&mut self) -> CompileResult<Param> {
        let (ty, start) = self.expect_type()?;
        let (name, end) = self.expect_identifier()?;
        Ok(Param::new(ty, name, start.merge(end)))
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn parse_block(&mut self) -> CompileResult<Block> {
        self.nested(GRAMMAR_LEVEL, "block", Self::parse_block_contents)
    }

    fn parse_block_contents(&mut self) -> CompileResult<Block> {
        let open = self.expect(TokenKind::LBrace)?;
        let mut stmts = Vec::new();

        while !self.check(&TokenKind::RBrace) && !self.at_end() {
            match self.parse_statement() {
                Ok(stmt) => stmts.push(stmt),
                Err(e) => {
                    self.errors.push(e);
                    self.synchronize();
                }
            }
        }

        let close = self.expect(TokenKind::RBrace)?;
        Ok(Block::new(stmts, open.span.merge(close.span)))
    }

    fn parse_statement(&mut self) -> CompileResult<Stmt> {
        let start_span = self.current.span;

        if self.current.kind.is_type_keyword() {
            let (ty, _) = self.expect_type()?;
            let (name, _) = self.expect_identifier()?;
            let var = self.parse_var_decl_rest(ty, name, start_span)?;
            let span = var.span;
            return Ok(Stmt::new(StmtKind::Declaration(var), span));
        }

        match self.current.kind {
            TokenKind::If => {
                self.advance();
                self.expect(TokenKind::LParen)?;
                let condition = self.parse_expression()?;
                self.expect(TokenKind::RParen)?;
                let then_branch = self.parse_block()?;
                let else_branch = if self.match_token(&TokenKind::Else) {
                    Some(self.parse_block()?)
                } else {
                    None
                };
                let end = else_branch.as_ref().map_or(then_branch.span, |b| b.span);
                Ok(Stmt::new(
                    StmtKind::If {
                        condition,
                        then_branch,
                        else_branch,
                    },
                    start_span.merge(end),
                ))
            }
            TokenKind::While => {
                self.advance();
                self.expect(TokenKind::LParen)?;
                let condition = self.parse_expression()?;
                self.expect(TokenKind::RParen)?;
                let body = self.parse_block()?;
                let span = start_span.merge(body.span);
                Ok(Stmt::new(StmtKind::While { condition, body }, span))
            }
            TokenKind::Return => {
                self.advance();
                let value = if self.check(&TokenKind::Semi) {
                    None
                } else {
                    Some(self.parse_expression()?)
                };
                let end = self.expect(TokenKind::Semi)?;
                Ok(Stmt::new(StmtKind::Return(value), start_span.merge(end.span)))
            }
            TokenKind::LBrace => {
                let block = self.parse_block()?;
                let span = block.span;
                Ok(Stmt::new(StmtKind::Block(block), span))
            }
            _ => {
                let expr = self.parse_expression()?;
                let end = self.expect(TokenKind::Semi)?;
                Ok(Stmt::new(StmtKind::Expr(expr), start_span.merge(end.span)))
            }
        }
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    fn parse_expression(&mut self) -> CompileResult<Expr> {
        self.nested(GRAMMAR_LEVEL, "expression", Self::parse_assignment_expression)
    }

    fn parse_assignment_expression(&mut self) -> CompileResult<Expr> {
        let left = self.parse_logical_or_expression()?;

        if self.check(&TokenKind::Eq) {
            let ExprKind::Identifier(target) = &left.kind else {
                return Err(CompileError::parser("invalid assignment target", left.span));
            };
            let target = target.clone();
            self.advance();
            let value = self.parse_expression()?;
            let span = left.span.merge(value.span);
            return Ok(Expr::new(
                ExprKind::Assign {
                    target,
                    value: Box::new(value),
                },
                span,
            ));
        }

        Ok(left)
    }

    fn parse_logical_or_expression(&mut self) -> CompileResult<Expr> {
        let depth = self.depth;
        let mut left = self.parse_logical_and_expression()?;

        while self.match_token(&TokenKind::PipePipe) {
            self.descend(1, "expression")?;
            let right = self.parse_logical_and_expression()?;
            left = binary(BinaryOp::Or, left, right);
        }

        self.depth = depth;
        Ok(left)
    }

    fn parse_logical_and_expression(&mut self) -> CompileResult<Expr> {
        let depth = self.depth;
        let mut left = self.parse_equality_expression()?;

        while self.match_token(&TokenKind::AmpAmp) {
            self.descend(1, "expression")?;
            let right = self.parse_equality_expression()?;
            left = binary(BinaryOp::And, left, right);
        }

        self.depth = depth;
        Ok(left)
    }

    fn parse_equality_expression(&mut self) -> CompileResult<Expr> {
        let depth = self.depth;
        let mut left = self.parse_relational_expression()?;

        loop {
            let op = match self.current.kind {
                TokenKind::EqEq => BinaryOp::Eq,
                TokenKind::NotEq => BinaryOp::Ne,
                _ => break,
            };
            self.advance();
            self.descend(1, "expression")?;
            let right = self.parse_relational_expression()?;
            left = binary(op, left, right);
        }

        self.depth = depth;
        Ok(left)
    }

    fn parse_relational_expression(&mut self) -> CompileResult<Expr> {
        let depth = self.depth;
        let mut left = self.parse_additive_expression()?;

        loop {
            let op = match self.current.kind {
                TokenKind::Lt => BinaryOp::Lt,
                TokenKind::LtEq => BinaryOp::Le,
                TokenKind::Gt => BinaryOp::Gt,
                TokenKind::GtEq => BinaryOp::Ge,
                _ => break,
            };
            self.advance();
            self.descend(1, "expression")?;
            let right = self.parse_additive_expression()?;
            left = binary(op, left, right);
        }

        self.depth = depth;
        Ok(left)
    }

    fn parse_additive_expression(&mut self) -> CompileResult<Expr> {
        let depth = self.depth;
        let mut left = self.parse_multiplicative_expression()?;

        loop {
            let op = match self.current.kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.advance();
            self.descend(1, "expression")?;
            let right = self.parse_multiplicative_expression()?;
            left = binary(op, left, right);
        }

        self.depth = depth;
        Ok(left)
    }

    fn parse_multiplicative_expression(&mut self) -> CompileResult<Expr> {
        let depth = self.depth;
        let mut left = self.parse_unary_expression()?;

        loop {
            let op = match self.current.kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::Percent => BinaryOp::Mod,
                _ => break,
            };
            self.advance();
            self.descend(1, "expression")?;
            let right = self.parse_unary_expression()?;
            left = binary(op, left, right);
        }

        self.depth = depth;
        Ok(left)
    }

    fn parse_unary_expression(&mut self) -> CompileResult<Expr> {
        let start_span = self.current.span;
        let op = match self.current.kind {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Bang => UnaryOp::Not,
            _ => return self.parse_primary_expression(),
        };
        self.advance();

        let operand = self.nested(1, "expression", Self::parse_unary_expression)?;
        let span = start_span.merge(operand.span);
        Ok(Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        ))
    }

    fn parse_primary_expression(&mut self) -> CompileResult<Expr> {
        let starts_primary = matches!(
            self.current.kind,
            TokenKind::IntLiteral(_)
                | TokenKind::FloatLiteral(_)
                | TokenKind::StringLiteral(_)
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Identifier(_)
                | TokenKind::LParen
        );
        if !starts_primary {
            return Err(self.unexpected("expression"));
        }

        let token = self.advance();
        let span = token.span;

        let kind = match token.kind {
            TokenKind::IntLiteral(text) => ExprKind::IntLiteral(text),
            TokenKind::FloatLiteral(text) => ExprKind::FloatLiteral(text),
            TokenKind::StringLiteral(text) => ExprKind::StringLiteral(text),
            TokenKind::True => ExprKind::BoolLiteral(true),
            TokenKind::False => ExprKind::BoolLiteral(false),
            TokenKind::Identifier(name) => {
                if self.check(&TokenKind::LParen) {
                    return self.parse_call_rest(name, span);
                }
                ExprKind::Identifier(name)
            }
            TokenKind::LParen => {
                let inner = self.parse_expression()?;
                let close = self.expect(TokenKind::RParen)?;
                return Ok(Expr::new(ExprKind::Paren(Box::new(inner)), span.merge(close.span)));
            }
            other => {
                return Err(CompileError::parser(
                    format!("expected expression, found {}", other),
                    span,
                ));
            }
        };

        Ok(Expr::new(kind, span))
    }

    fn parse_call_rest(&mut self, name: String, start_span: Span) -> CompileResult<Expr> {
        self.expect(TokenKind::LParen)?;

        let mut args = Vec::new();
        if !self.check(&TokenKind::RParen) {
            args.push(self.parse_expression()?);
            while self.match_token(&TokenKind::Comma) {
                args.push(self.parse_expression()?);
            }
        }
        let close = self.expect(TokenKind::RParen)?;

        Ok(Expr::new(ExprKind::Call { name, args }, start_span.merge(close.span)))
    }
}

fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    let span = left.span.merge(right.span);
    Expr::new(
        ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(source: &str) -> Program {
        let output = Parser::new(source).parse();
        assert!(output.errors.is_empty(), "unexpected errors: {:?}", output.errors);
        output.program
    }

    #[test]
    fn test_parse_simple_function() {
        let program = parse_ok("int main() { return 0; }");

        assert_eq!(program.items.len(), 1);
        if let ItemKind::Function(f) = &program.items[0].kind {
            assert_eq!(f.name, "main");
            assert!(f.params.is_none());
            assert_eq!(f.statements().len(), 1);
        } else {
            panic!("expected function declaration");
        }
    }

    #[test]
    fn test_parse_variable_declaration() {
        let program = parse_ok("int x = 42;\nstring s;");

        let globals: Vec<_> = program.globals().collect();
        assert_eq!(globals.len(), 2);
        assert_eq!(globals[0].name, "x");
        assert_eq!(globals[0].init_text().as_deref(), Some("42"));
        assert_eq!(globals[1].ty, "string");
        assert!(globals[1].init.is_none());
        assert_eq!(globals[1].span.line, 2);
    }

    #[test]
    fn test_parse_params() {
        let program = parse_ok("float scale(float v, int times) { return v * times; }");

        let func = program.functions().next().unwrap();
        let types: Vec<_> = func.params().iter().map(|p| p.ty.as_str()).collect();
        assert_eq!(types, vec!["float", "int"]);
        assert_eq!(func.params()[1].name, "times");
    }

    #[test]
    fn test_parse_precedence() {
        let program = parse_ok("int x = 1 + 2 * -3;");

        let init = program.globals().next().unwrap().init.as_ref().unwrap();
        match &init.kind {
            ExprKind::Binary { op: BinaryOp::Add, right, .. } => {
                assert!(matches!(right.kind, ExprKind::Binary { op: BinaryOp::Mul, .. }));
            }
            other => panic!("expected addition, got {:?}", other),
        }
        assert_eq!(init.text(), "1+2*-3");
    }

    #[test]
    fn test_parse_control_flow() {
        let program = parse_ok(
            "void f(int n) {\n  while (n > 0) { n = n - 1; }\n  if (n == 0) { g(); } else { h(n); }\n}",
        );

        let func = program.functions().next().unwrap();
        assert!(matches!(func.statements()[0].kind, StmtKind::While { .. }));
        assert!(matches!(func.statements()[1].kind, StmtKind::If { else_branch: Some(_), .. }));
        assert_eq!(func.statements()[1].span.line, 3);
    }

    #[test]
    fn test_parse_top_level_expression() {
        let program = parse_ok("foo(1, bar());");

        match &program.items[0].kind {
            ItemKind::Expression(expr) => assert_eq!(expr.call_name(), Some("foo")),
            other => panic!("expected expression item, got {:?}", other),
        }
    }

    #[test]
    fn test_recovers_after_syntax_error() {
        let output = Parser::new("int x = ;\nint y = 2;\nint f() { int a = ; int b; }").parse();

        assert_eq!(output.errors.len(), 2);
        assert!(output.errors.iter().all(|e| matches!(e, CompileError::Parser { .. })));
        assert_eq!(output.program.globals().count(), 1);

        let func = output.program.functions().next().unwrap();
        assert_eq!(func.statements().len(), 1);
    }

    fn parser_messages(errors: &[CompileError]) -> Vec<&str> {
        errors
            .iter()
            .filter_map(|e| match e {
                CompileError::Parser { message, .. } => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_rejects_excessive_nesting() {
        let source = format!("int x = {}1{};\nint y = 2;", "(".repeat(1000), ")".repeat(1000));
        let output = Parser::new(&source).parse();

        assert_eq!(parser_messages(&output.errors), vec!["expression nested too deeply"]);
        let names: Vec<_> = output.program.globals().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["y"]);
    }

    #[test]
    fn test_rejects_long_operator_chains() {
        let unary = format!("int a = {}1;", "-".repeat(1000));
        let chain = format!("int b = 1{};", "+1".repeat(1000));
        let calls = format!("f({}0{});", "f(".repeat(1000), ")".repeat(1000));

        for source in [unary, chain, calls] {
            let output = Parser::new(&source).parse();
            assert_eq!(parser_messages(&output.errors), vec!["expression nested too deeply"]);
            assert!(output.program.is_empty());
        }
    }

    #[test]
    fn test_rejects_deep_blocks() {
        let source = format!("void f() {}{}\nint after;", "{".repeat(500), "}".repeat(501));
        let output = Parser::new(&source).parse();

        let messages = parser_messages(&output.errors);
        assert_eq!(messages[0], "block nested too deeply");
        assert!(output.program.globals().any(|g| g.name == "after"));
    }

    #[test]
    fn test_moderate_nesting_is_fine() {
        let source = format!(
            "int x = {}1{};\nint y = {}1;\nint z = 1{};\nvoid f() {}{}",
            "(".repeat(40),
            ")".repeat(40),
            "-".repeat(100),
            "+1".repeat(100),
            "{".repeat(30),
            "}".repeat(30)
        );
        let program = parse_ok(&source);

        assert_eq!(program.globals().count(), 3);
        assert_eq!(program.functions().count(), 1);
    }

    #[test]
    fn test_records_lexical_errors() {
        let output = Parser::new("int x = 1 $ ;").parse();

        assert!(matches!(output.errors[0], CompileError::Lexer { .. }));
        assert_eq!(output.program.globals().count(), 1);
    }
}
