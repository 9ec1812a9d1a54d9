use crate::error::{CompileError, CompileResult};
use crate::lexer::{Token, TokenKind};

use super::{BinOpKind, Expr, Program, Stmt};

/// Recursive descent over a token buffer. A single forward cursor,
/// no backtracking.
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    index: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, index: 0 }
    }

    pub fn parse(&mut self) -> CompileResult<Program> {
        self.parse_program()
    }

    fn at_eof(&self) -> bool {
        self.tokens[self.index].kind == TokenKind::Eof
    }

    /// Advance past the next token if it is the given reserved lexeme.
    fn consume(&mut self, symbol: &'static str) -> bool {
        if self.tokens[self.index].kind != TokenKind::Reserved(symbol) {
            return false;
        }
        self.index += 1;
        true
    }

    /// Advance past the next token, which must be the given reserved lexeme.
    fn expect(&mut self, symbol: &'static str) -> CompileResult<()> {
        let t = &self.tokens[self.index];
        if t.kind != TokenKind::Reserved(symbol) {
            return Err(CompileError::Syntax {
                expected: format!("\"{symbol}\""),
                found: t.kind.to_string(),
                loc: t.loc,
            });
        }
        self.index += 1;
        Ok(())
    }

    /// program = stmt*
    fn parse_program(&mut self) -> CompileResult<Program> {
        let mut stmts = vec![];

        while !self.at_eof() {
            stmts.push(self.parse_stmt()?);
        }

        Ok(Program(stmts))
    }

    /// stmt = expr ";"
    ///      | "{" stmt* "}"
    ///      | "if" "(" expr ")" stmt ("else" stmt)?
    ///      | "while" "(" expr ")" stmt
    ///      | "for" "(" expr? ";" expr? ";" expr? ")" stmt
    ///      | "return" expr ";"
    ///      | ";"
    fn parse_stmt(&mut self) -> CompileResult<Stmt> {
        if self.consume("{") {
            let mut stmts = vec![];
            while !self.consume("}") {
                if self.at_eof() {
                    self.expect("}")?;
                }
                stmts.push(self.parse_stmt()?);
            }
            Ok(Stmt::Block(stmts))
        } else if self.consume("if") {
            self.expect("(")?;
            let cond = self.parse_expr()?;
            self.expect(")")?;
            let stmt = self.parse_stmt()?;
            let else_stmt = if self.consume("else") {
                Some(Box::new(self.parse_stmt()?))
            } else {
                None
            };
            Ok(Stmt::If(cond, Box::new(stmt), else_stmt))
        } else if self.consume("while") {
            self.expect("(")?;
            let cond = self.parse_expr()?;
            self.expect(")")?;
            let stmt = self.parse_stmt()?;
            Ok(Stmt::While(cond, Box::new(stmt)))
        } else if self.consume("for") {
            self.parse_for()
        } else if self.consume("return") {
            let expr = self.parse_expr()?;
            self.expect(";")?;
            Ok(Stmt::Return(expr))
        } else if self.consume(";") {
            Ok(Stmt::SemiColon)
        } else {
            let expr = self.parse_expr()?;
            self.expect(";")?;
            Ok(Stmt::Expr(expr))
        }
    }

    /// Any of the three clauses may be elided. An elided condition is
    /// interpreted by the code generator, not here.
    fn parse_for(&mut self) -> CompileResult<Stmt> {
        self.expect("(")?;
        let init = if !self.consume(";") {
            let expr = Some(self.parse_expr()?);
            self.expect(";")?;
            expr
        } else {
            None
        };
        let cond = if !self.consume(";") {
            let expr = Some(self.parse_expr()?);
            self.expect(";")?;
            expr
        } else {
            None
        };
        let step = if !self.consume(")") {
            let expr = Some(self.parse_expr()?);
            self.expect(")")?;
            expr
        } else {
            None
        };
        let stmt = self.parse_stmt()?;
        Ok(Stmt::For(init, cond, step, Box::new(stmt)))
    }

    /// expr = assign
    fn parse_expr(&mut self) -> CompileResult<Expr> {
        self.parse_assign()
    }

    /// assign = equality ("=" assign)?
    ///
    /// Right-associative: `a = b = 1` assigns to `b` first.
    fn parse_assign(&mut self) -> CompileResult<Expr> {
        let expr = self.parse_equality()?;

        if self.consume("=") {
            Ok(Expr::Assign(Box::new(expr), Box::new(self.parse_assign()?)))
        } else {
            Ok(expr)
        }
    }

    /// equality = relational ("==" relational | "!=" relational)*
    fn parse_equality(&mut self) -> CompileResult<Expr> {
        let mut expr = self.parse_relational()?;

        loop {
            if self.consume("==") {
                let rhs = self.parse_relational()?;
                expr = Expr::Binary(BinOpKind::Equal, Box::new(expr), Box::new(rhs));
            } else if self.consume("!=") {
                let rhs = self.parse_relational()?;
                expr = Expr::Binary(BinOpKind::NotEqual, Box::new(expr), Box::new(rhs));
            } else {
                return Ok(expr);
            }
        }
    }

    /// relational = add ("<" add | "<=" add | ">" add | ">=" add)*
    fn parse_relational(&mut self) -> CompileResult<Expr> {
        let mut expr = self.parse_add()?;

        loop {
            if self.consume("<") {
                let rhs = self.parse_add()?;
                expr = Expr::Binary(BinOpKind::LessThan, Box::new(expr), Box::new(rhs));
            } else if self.consume("<=") {
                let rhs = self.parse_add()?;
                expr = Expr::Binary(BinOpKind::LessEqual, Box::new(expr), Box::new(rhs));
            } else if self.consume(">") {
                let rhs = self.parse_add()?;
                expr = Expr::Binary(BinOpKind::GreaterThan, Box::new(expr), Box::new(rhs));
            } else if self.consume(">=") {
                let rhs = self.parse_add()?;
                expr = Expr::Binary(BinOpKind::GreaterEqual, Box::new(expr), Box::new(rhs));
            } else {
                return Ok(expr);
            }
        }
    }

    /// add = mul ("+" mul | "-" mul)*
    fn parse_add(&mut self) -> CompileResult<Expr> {
        let mut expr = self.parse_mul()?;

        loop {
            if self.consume("+") {
                let rhs = self.parse_mul()?;
                expr = Expr::Binary(BinOpKind::Add, Box::new(expr), Box::new(rhs));
            } else if self.consume("-") {
                let rhs = self.parse_mul()?;
                expr = Expr::Binary(BinOpKind::Sub, Box::new(expr), Box::new(rhs));
            } else {
                return Ok(expr);
            }
        }
    }

    /// mul = unary ("*" unary | "/" unary)*
    fn parse_mul(&mut self) -> CompileResult<Expr> {
        let mut expr = self.parse_unary()?;

        loop {
            if self.consume("*") {
                let rhs = self.parse_unary()?;
                expr = Expr::Binary(BinOpKind::Mul, Box::new(expr), Box::new(rhs));
            } else if self.consume("/") {
                let rhs = self.parse_unary()?;
                expr = Expr::Binary(BinOpKind::Div, Box::new(expr), Box::new(rhs));
            } else {
                return Ok(expr);
            }
        }
    }

    /// unary = ("+" | "-")? primary
    ///
    /// `-x` desugars to `0 - x`, so no negation node exists.
    fn parse_unary(&mut self) -> CompileResult<Expr> {
        if self.consume("+") {
            self.parse_primary()
        } else if self.consume("-") {
            let primary = self.parse_primary()?;
            Ok(Expr::Binary(
                BinOpKind::Sub,
                Box::new(Expr::Num(0)),
                Box::new(primary),
            ))
        } else {
            self.parse_primary()
        }
    }

    /// primary = num | ident | "(" expr ")"
    fn parse_primary(&mut self) -> CompileResult<Expr> {
        match &self.tokens[self.index].kind {
            TokenKind::Reserved("(") => {
                self.index += 1;
                let expr = self.parse_expr()?;
                self.expect(")")?;
                Ok(expr)
            }
            TokenKind::Num(num) => {
                let num = *num;
                self.index += 1;
                Ok(Expr::Num(num))
            }
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.index += 1;
                Ok(Expr::Var(name))
            }
            kind => Err(CompileError::Syntax {
                expected: "an expression".to_string(),
                found: kind.to_string(),
                loc: self.tokens[self.index].loc,
            }),
        }
    }
}
