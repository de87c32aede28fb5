use std::ptr;

use qp_ast::{self as ast, Transformer, keyword, transformer};
use qp_span::Span;

use super::{LinearizeError, Linearizer};

type Result<T> = std::result::Result<T, LinearizeError>;

fn is_compound(expr: &ast::Expr) -> bool {
    use ast::ExprKind::*;
    matches!(
        expr.kind,
        Bin(_)
            | Assign(_)
            | Cond(_)
            | Call(_)
            | New(_)
            | PropAccess(_)
            | PrefixUnary(_)
            | ArrayLit(_)
            | ObjectLit(_)
    )
}

fn peel_parens<'cx>(mut expr: &'cx ast::Expr<'cx>) -> &'cx ast::Expr<'cx> {
    while let ast::ExprKind::Paren(paren) = expr.kind {
        expr = paren.expr;
    }
    expr
}

fn member_object<'cx>(expr: &'cx ast::Expr<'cx>) -> Option<&'cx ast::Expr<'cx>> {
    match expr.kind {
        ast::ExprKind::PropAccess(n) => Some(n.expr),
        ast::ExprKind::EleAccess(n) => Some(n.expr),
        _ => None,
    }
}

impl<'cx> Linearizer<'_, 'cx> {
    pub(super) fn lower_expr(&mut self, expr: &'cx ast::Expr<'cx>) -> Result<&'cx ast::Expr<'cx>> {
        let next = self.linearize_expr(expr)?;
        if self.state.lazy_depth > 0 || !is_compound(next) {
            return Ok(next);
        }
        Ok(self.hoist(next))
    }

    /// Rewrites the children of `expr` but never hoists `expr` itself.
    pub(super) fn linearize_expr(
        &mut self,
        expr: &'cx ast::Expr<'cx>,
    ) -> Result<&'cx ast::Expr<'cx>> {
        match expr.kind {
            ast::ExprKind::PostfixUnary(n) if self.state.lazy_depth == 0 => self.lower_postfix(n),
            _ => transformer::transform_expr(self, expr),
        }
    }

    /// Rewrites an assignment target. Parens are walked through so that no
    /// level of the target is hoisted.
    pub(super) fn lower_target(
        &mut self,
        expr: &'cx ast::Expr<'cx>,
    ) -> Result<&'cx ast::Expr<'cx>> {
        let ast::ExprKind::Paren(n) = expr.kind else {
            return self.linearize_expr(expr);
        };
        let inner = self.lower_target(n.expr)?;
        if ptr::eq(inner, n.expr) {
            return Ok(expr);
        }
        let paren = self.factory.alloc(ast::ParenExpr { expr: inner, ..*n });
        Ok(self.factory.expr(ast::ExprKind::Paren(paren)))
    }

    fn lower_lazy(&mut self, expr: &'cx ast::Expr<'cx>) -> Result<&'cx ast::Expr<'cx>> {
        self.state.lazy_depth += 1;
        let next = self.transform_expr(expr);
        self.state.lazy_depth -= 1;
        next
    }

    /// Hoists the object and the computed key of a member expression so the
    /// member can be read twice while its parts are evaluated once.
    fn stabilize(&mut self, expr: &'cx ast::Expr<'cx>) -> &'cx ast::Expr<'cx> {
        match expr.kind {
            ast::ExprKind::PropAccess(n) if !n.expr.is_simple() => {
                let obj = self.hoist(n.expr);
                let n = self.factory.alloc(ast::PropAccessExpr { expr: obj, ..*n });
                self.factory.expr(ast::ExprKind::PropAccess(n))
            }
            ast::ExprKind::EleAccess(n) if !n.expr.is_simple() || !n.arg.is_simple() => {
                let obj = if n.expr.is_simple() {
                    n.expr
                } else {
                    self.hoist(n.expr)
                };
                let arg = if n.arg.is_simple() {
                    n.arg
                } else {
                    self.hoist(n.arg)
                };
                let n = self.factory.alloc(ast::EleAccessExpr {
                    expr: obj,
                    arg,
                    ..*n
                });
                self.factory.expr(ast::ExprKind::EleAccess(n))
            }
            _ => expr,
        }
    }

    /// Copies a stabilised operand with fresh node ids.
    fn dup(&mut self, expr: &'cx ast::Expr<'cx>) -> &'cx ast::Expr<'cx> {
        use ast::ExprKind::*;
        match expr.kind {
            Ident(n) => self.factory.create_ident_expr(n.name, n.span),
            This(n) => {
                let this = self.factory.create_this_expr(n.span);
                self.factory.expr(This(this))
            }
            Paren(n) => {
                let inner = self.dup(n.expr);
                let paren = self.factory.create_paren_expr(inner, n.span);
                self.factory.expr(Paren(paren))
            }
            PropAccess(n) => {
                let obj = self.dup(n.expr);
                let name = self.factory.create_ident(n.name.name, n.name.span);
                let access = self.factory.create_prop_access_expr(obj, name, n.span);
                self.factory.expr(PropAccess(access))
            }
            EleAccess(n) => {
                let obj = self.dup(n.expr);
                let arg = self.dup(n.arg);
                let access = self.factory.create_ele_access_expr(obj, arg, n.span);
                self.factory.expr(EleAccess(access))
            }
            _ => expr,
        }
    }

    /// `x++` reads `x` into one temporary and updates it through another;
    /// the expression becomes the first.
    fn lower_postfix(&mut self, n: &'cx ast::PostfixUnaryExpr<'cx>) -> Result<&'cx ast::Expr<'cx>> {
        let operand = self.lower_target(n.expr)?;
        let operand = self.stabilize(peel_parens(operand));
        let read = self.dup(operand);
        let old = self.hoist_as(read, n.span);
        let update = self
            .factory
            .create_prefix_unary_expr(n.op.into_prefix(), operand, Span::transient());
        let update = self.factory.expr(ast::ExprKind::PrefixUnary(update));
        self.hoist(update);
        Ok(old)
    }

    pub(super) fn lower_assign(
        &mut self,
        n: &'cx ast::AssignExpr<'cx>,
    ) -> Result<&'cx ast::AssignExpr<'cx>> {
        let left = self.lower_target(n.left)?;
        let right = self.transform_expr(n.right)?;
        if ptr::eq(left, n.left) && ptr::eq(right, n.right) {
            return Ok(n);
        }
        Ok(self.factory.alloc(ast::AssignExpr { left, right, ..*n }))
    }

    pub(super) fn lower_prefix_unary(
        &mut self,
        n: &'cx ast::PrefixUnaryExpr<'cx>,
    ) -> Result<&'cx ast::PrefixUnaryExpr<'cx>> {
        let expr = if n.op.writes_operand() {
            self.lower_target(n.expr)?
        } else {
            self.transform_expr(n.expr)?
        };
        if ptr::eq(expr, n.expr) {
            return Ok(n);
        }
        Ok(self.factory.alloc(ast::PrefixUnaryExpr { expr, ..*n }))
    }

    pub(super) fn lower_ele_access(
        &mut self,
        n: &'cx ast::EleAccessExpr<'cx>,
    ) -> Result<&'cx ast::EleAccessExpr<'cx>> {
        let expr = self.linearize_expr(n.expr)?;
        let arg = self.transform_expr(n.arg)?;
        if ptr::eq(expr, n.expr) && ptr::eq(arg, n.arg) {
            return Ok(n);
        }
        Ok(self.factory.alloc(ast::EleAccessExpr { expr, arg, ..*n }))
    }

    pub(super) fn lower_bin(&mut self, n: &'cx ast::BinExpr<'cx>) -> Result<&'cx ast::BinExpr<'cx>> {
        let left = self.transform_expr(n.left)?;
        let right = if n.op.is_short_circuit() && self.config.preserve_short_circuit() {
            self.lower_lazy(n.right)?
        } else {
            self.transform_expr(n.right)?
        };
        if ptr::eq(left, n.left) && ptr::eq(right, n.right) {
            return Ok(n);
        }
        Ok(self.factory.alloc(ast::BinExpr { left, right, ..*n }))
    }

    pub(super) fn lower_cond(&mut self, n: &'cx ast::CondExpr<'cx>) -> Result<&'cx ast::CondExpr<'cx>> {
        if !self.config.preserve_short_circuit() {
            return transformer::transform_cond_expr(self, n);
        }
        let cond = self.transform_expr(n.cond)?;
        let when_true = self.lower_lazy(n.when_true)?;
        let when_false = self.lower_lazy(n.when_false)?;
        if ptr::eq(cond, n.cond) && ptr::eq(when_true, n.when_true) && ptr::eq(when_false, n.when_false)
        {
            return Ok(n);
        }
        Ok(self.factory.alloc(ast::CondExpr {
            cond,
            when_true,
            when_false,
            ..*n
        }))
    }

    pub(super) fn lower_call(&mut self, n: &'cx ast::CallExpr<'cx>) -> Result<&'cx ast::CallExpr<'cx>> {
        let callee = peel_parens(n.expr);
        let expr = match callee.kind {
            ast::ExprKind::PropAccess(_) | ast::ExprKind::EleAccess(_)
                if self.state.lazy_depth == 0 =>
            {
                self.bind_callee(callee)?
            }
            _ => self.transform_expr(n.expr)?,
        };
        let args = self.transform_exprs(n.args)?;
        if ptr::eq(expr, n.expr) && ptr::eq(args, n.args) {
            return Ok(n);
        }
        Ok(self.factory.alloc(ast::CallExpr { expr, args, ..*n }))
    }

    /// `o.m(..)` calls through `var t = o.m.bind(o);` so the receiver is
    /// fixed before any argument runs.
    fn bind_callee(&mut self, callee: &'cx ast::Expr<'cx>) -> Result<&'cx ast::Expr<'cx>> {
        let member = self.linearize_expr(callee)?;
        let member = self.stabilize(member);
        let Some(obj) = member_object(member) else {
            return Ok(member);
        };
        let receiver = self.dup(obj);
        let bind = self.keyword(keyword::IDENT_BIND, keyword::IDENT_BIND_STR);
        let bind = self.factory.create_ident(bind, Span::transient());
        let target = self
            .factory
            .create_prop_access_expr(member, bind, Span::transient());
        let target = self.factory.expr(ast::ExprKind::PropAccess(target));
        let args = self.factory.alloc_slice(&[receiver]);
        let call = self.factory.create_call_expr(target, args, Span::transient());
        let call = self.factory.expr(ast::ExprKind::Call(call));
        Ok(self.hoist_as(call, callee.span()))
    }

    pub(super) fn lower_arrow_fn(
        &mut self,
        n: &'cx ast::ArrowFnExpr<'cx>,
    ) -> Result<&'cx ast::ArrowFnExpr<'cx>> {
        let body = match n.body {
            ast::ArrowFnExprBody::Block(block) => block,
            ast::ArrowFnExprBody::Expr(expr) => {
                let ret = self.factory.create_ret_stmt(Some(expr), expr.span());
                let ret = self.factory.stmt(ast::StmtKind::Ret(ret));
                let stmts = self.factory.alloc_slice(&[ret]);
                self.factory.create_block_stmt(stmts, expr.span())
            }
        };
        let next = self.transform_fn_body(body)?;
        if let ast::ArrowFnExprBody::Block(block) = n.body
            && ptr::eq(next, block)
        {
            return Ok(n);
        }
        Ok(self.factory.alloc(ast::ArrowFnExpr {
            body: ast::ArrowFnExprBody::Block(next),
            ..*n
        }))
    }
}
