//! ```txt
//! var __qp_activation = { turn: window.__qp.turn };
//! (__qp_function.push(__qp_activation), undefined);
//! ```
//!
//! is placed at the top of the program and of every function body so the
//! runtime can tell which turn and which call a trace belongs to.

use qp_ast::{self as ast, keyword};
use qp_atom::AtomId;
use qp_span::Span;

use super::Linearizer;

impl<'cx> Linearizer<'_, 'cx> {
    pub(super) fn with_activation(&mut self, stmts: ast::Stmts<'cx>) -> ast::Stmts<'cx> {
        if !self.config.emit_activation() {
            return stmts;
        }
        let [record, push] = self.activation_stmts();
        let mut out = Vec::with_capacity(stmts.len() + 2);
        out.push(record);
        out.push(push);
        out.extend_from_slice(stmts);
        self.factory.alloc_slice(&out)
    }

    fn ident_expr(&mut self, name: AtomId) -> &'cx ast::Expr<'cx> {
        self.factory.create_ident_expr(name, Span::transient())
    }

    fn member(&mut self, obj: &'cx ast::Expr<'cx>, name: AtomId) -> &'cx ast::Expr<'cx> {
        let name = self.factory.create_ident(name, Span::transient());
        let access = self
            .factory
            .create_prop_access_expr(obj, name, Span::transient());
        self.factory.expr(ast::ExprKind::PropAccess(access))
    }

    fn activation_stmts(&mut self) -> [&'cx ast::Stmt<'cx>; 2] {
        let config = self.config;
        let span = Span::transient();
        let activation = self.atom(config.activation_ident().clone());
        let stack = self.atom(config.activation_stack_ident().clone());
        let runtime = self.atom(config.runtime_ident().clone());
        let host = self.atom(config.host_ident().clone());
        let turn = self.atom(config.turn_property().clone());
        let push = self.keyword(keyword::IDENT_PUSH, keyword::IDENT_PUSH_STR);
        let undefined = self.keyword(keyword::IDENT_UNDEFINED, keyword::IDENT_UNDEFINED_STR);

        // var <activation> = { <turn>: <runtime>.<host>.<turn> };
        let runtime = self.ident_expr(runtime);
        let host = self.member(runtime, host);
        let current_turn = self.member(host, turn);
        let key = self.factory.create_ident(turn, span);
        let prop = self
            .factory
            .create_object_prop_member(ast::PropName::Ident(key), current_turn, span);
        let members = self.factory.alloc_slice(&[prop]);
        let record = self.factory.create_object_lit(members, span);
        let record = self.factory.expr(ast::ExprKind::ObjectLit(record));
        let binding = self.factory.create_ident(activation, span);
        let decl = self.factory.create_var_decl(binding, Some(record), span);
        let list = self.factory.alloc_slice(&[decl]);
        let var = self.factory.create_var_stmt(list, span);
        let var = self.factory.stmt(ast::StmtKind::Var(var));

        // (<stack>.push(<activation>), undefined);
        let stack = self.ident_expr(stack);
        let callee = self.member(stack, push);
        let arg = self.ident_expr(activation);
        let args = self.factory.alloc_slice(&[arg]);
        let call = self.factory.create_call_expr(callee, args, span);
        let call = self.factory.expr(ast::ExprKind::Call(call));
        let undefined = self.ident_expr(undefined);
        let comma = self
            .factory
            .create_bin_expr(call, ast::BinOpKind::Comma, undefined, span);
        let comma = self.factory.expr(ast::ExprKind::Bin(comma));
        let paren = self.factory.create_paren_expr(comma, span);
        let paren = self.factory.expr(ast::ExprKind::Paren(paren));
        let push = self.factory.create_expr_stmt(paren, span);
        let push = self.factory.stmt(ast::StmtKind::Expr(push));

        [var, push]
    }
}
