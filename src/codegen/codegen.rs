use crate::error::{CompileError, CompileResult};
use crate::parser::{BinOpKind, Expr, Program, Stmt};

use super::local_variables::LocalVariables;

pub struct Codegen {
    output: String,
    locals: LocalVariables,
    label_index: usize,
}

impl Codegen {
    pub fn new() -> Self {
        Self {
            output: String::new(),
            locals: LocalVariables::new(),
            label_index: 0,
        }
    }

    /// Lower a whole program to Intel-syntax assembly.
    ///
    /// The statement code is generated into a buffer first, so the
    /// prologue can reserve the exact frame size once every variable
    /// has been assigned a slot. Consumes the generator: label and
    /// offset state never leaks into another compilation.
    pub fn generate(mut self, program: &Program) -> CompileResult<String> {
        for stmt in &program.0 {
            self.gen_stmt(stmt)?;
        }
        self.epilogue();

        let mut asm = String::new();
        asm.push_str(".intel_syntax noprefix\n");
        asm.push_str(".globl main\n");
        asm.push_str("main:\n");
        asm.push_str("  push rbp\n");
        asm.push_str("  mov rbp, rsp\n");
        let frame_size = self.locals.get_last_offset();
        if frame_size > 0 {
            asm.push_str(&format!("  sub rsp, {frame_size}\n"));
        }
        asm.push_str(&self.output);
        Ok(asm)
    }

    fn emit(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }

    fn new_label(&mut self) -> String {
        let s = format!(".L{:0>3}", self.label_index);
        self.label_index += 1;
        s
    }

    fn epilogue(&mut self) {
        self.emit("  mov rsp, rbp");
        self.emit("  pop rbp");
        self.emit("  ret");
    }

    /// Push the address of an assignable expression. Anything but a
    /// plain variable is rejected.
    fn gen_lval(&mut self, expr: &Expr) -> CompileResult<()> {
        let Expr::Var(name) = expr else {
            return Err(CompileError::InvalidAssignTarget);
        };
        let offset = self.locals.get_lvar_offset(name);
        self.emit("  mov rax, rbp");
        self.emit(&format!("  sub rax, {offset}"));
        self.emit("  push rax");
        Ok(())
    }

    /// Statements leave the evaluation stack exactly as they found it;
    /// an expression statement's value ends up in rax.
    fn gen_stmt(&mut self, stmt: &Stmt) -> CompileResult<()> {
        match stmt {
            Stmt::SemiColon => (),
            Stmt::Expr(expr) => {
                self.gen_expr(expr)?;
                self.emit("  pop rax");
            }
            Stmt::Block(stmts) => {
                for s in stmts {
                    self.gen_stmt(s)?;
                }
            }
            Stmt::If(cond, stmt, None) => self.gen_if(cond, stmt)?,
            Stmt::If(cond, stmt, Some(else_stmt)) => self.gen_if_else(cond, stmt, else_stmt)?,
            Stmt::While(cond, stmt) => self.gen_while(cond, stmt)?,
            Stmt::For(init, cond, step, stmt) => self.gen_for(init, cond, step, stmt)?,
            Stmt::Return(expr) => {
                self.gen_expr(expr)?;
                self.emit("  pop rax");
                self.epilogue();
            }
        };
        Ok(())
    }

    fn gen_if(&mut self, cond: &Expr, stmt: &Stmt) -> CompileResult<()> {
        let end_label = self.new_label();

        self.gen_expr(cond)?;
        self.emit("  pop rax");
        self.emit("  cmp rax, 0");
        self.emit(&format!("  je {end_label}"));
        self.gen_stmt(stmt)?;
        self.emit(&format!("{end_label}:"));
        Ok(())
    }

    fn gen_if_else(&mut self, cond: &Expr, stmt: &Stmt, else_stmt: &Stmt) -> CompileResult<()> {
        let end_label = self.new_label();
        let else_label = self.new_label();

        self.gen_expr(cond)?;
        self.emit("  pop rax");
        self.emit("  cmp rax, 0");
        self.emit(&format!("  je {else_label}"));
        self.gen_stmt(stmt)?;
        self.emit(&format!("  jmp {end_label}"));
        self.emit(&format!("{else_label}:"));
        self.gen_stmt(else_stmt)?;
        self.emit(&format!("{end_label}:"));
        Ok(())
    }

    fn gen_while(&mut self, cond: &Expr, stmt: &Stmt) -> CompileResult<()> {
        let begin_label = self.new_label();
        let end_label = self.new_label();

        self.emit(&format!("{begin_label}:"));
        self.gen_expr(cond)?;
        self.emit("  pop rax");
        self.emit("  cmp rax, 0");
        self.emit(&format!("  je {end_label}"));
        self.gen_stmt(stmt)?;
        self.emit(&format!("  jmp {begin_label}"));
        self.emit(&format!("{end_label}:"));
        Ok(())
    }

    /// An absent condition emits no test: `for(;;)` loops forever.
    fn gen_for(
        &mut self,
        init: &Option<Expr>,
        cond: &Option<Expr>,
        step: &Option<Expr>,
        stmt: &Stmt,
    ) -> CompileResult<()> {
        let begin_label = self.new_label();
        let end_label = self.new_label();

        if let Some(e) = init {
            self.gen_expr(e)?;
            self.emit("  pop rax");
        }
        self.emit(&format!("{begin_label}:"));
        if let Some(e) = cond {
            self.gen_expr(e)?;
            self.emit("  pop rax");
            self.emit("  cmp rax, 0");
            self.emit(&format!("  je {end_label}"));
        }
        self.gen_stmt(stmt)?;
        if let Some(e) = step {
            self.gen_expr(e)?;
            self.emit("  pop rax");
        }
        self.emit(&format!("  jmp {begin_label}"));
        self.emit(&format!("{end_label}:"));
        Ok(())
    }

    /// Every expression pushes exactly one value.
    fn gen_expr(&mut self, expr: &Expr) -> CompileResult<()> {
        match expr {
            Expr::Num(num) if !(-0x80000000..0x80000000).contains(num) => {
                self.emit(&format!("  mov rax, {num}"));
                self.emit("  push rax");
            }
            Expr::Num(num) => self.emit(&format!("  push {num}")),
            Expr::Var(_) => {
                self.gen_lval(expr)?;
                self.emit("  pop rax");
                self.emit("  mov rax, [rax]");
                self.emit("  push rax");
            }
            Expr::Assign(lhs, rhs) => {
                self.gen_lval(lhs)?;
                self.gen_expr(rhs)?;
                self.emit("  pop rdi");
                self.emit("  pop rax");
                self.emit("  mov [rax], rdi");
                self.emit("  push rdi");
            }
            Expr::Binary(kind, lhs, rhs) => {
                self.gen_expr(lhs)?;
                self.gen_expr(rhs)?;
                self.gen_bin_op_kind(kind);
            }
        }
        Ok(())
    }

    fn gen_binop(&mut self, s: &str) {
        self.emit("  pop rdi");
        self.emit("  pop rax");
        self.emit(s);
        self.emit("  push rax");
    }

    fn gen_bin_op_kind(&mut self, kind: &BinOpKind) {
        match kind {
            BinOpKind::Add => self.gen_binop("  add rax, rdi"),
            BinOpKind::Sub => self.gen_binop("  sub rax, rdi"),
            BinOpKind::Mul => self.gen_binop("  imul rax, rdi"),
            BinOpKind::Div => self.gen_binop("  cqo\n  idiv rdi"),
            BinOpKind::Equal => self.gen_binop("  cmp rax, rdi\n  sete al\n  movzb rax, al"),
            BinOpKind::NotEqual => self.gen_binop("  cmp rax, rdi\n  setne al\n  movzb rax, al"),
            BinOpKind::LessThan => self.gen_binop("  cmp rax, rdi\n  setl al\n  movzb rax, al"),
            BinOpKind::LessEqual => self.gen_binop("  cmp rax, rdi\n  setle al\n  movzb rax, al"),
            BinOpKind::GreaterThan => self.gen_binop("  cmp rax, rdi\n  setg al\n  movzb rax, al"),
            BinOpKind::GreaterEqual => self.gen_binop("  cmp rax, rdi\n  setge al\n  movzb rax, al"),
        }
    }
}
