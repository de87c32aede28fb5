//! Rebuilding traversal. Each default rewrites the children of a node and
//! reallocates the node only when some child came back as a different
//! pointer; the rebuilt node keeps its id and span.

use std::ptr;

use super::*;

pub fn transform_program<'cx, T: Transformer<'cx>>(
    t: &mut T,
    program: &'cx Program<'cx>,
) -> Result<&'cx Program<'cx>, T::Error> {
    let stmts = t.transform_stmts(program.stmts)?;
    if ptr::eq(stmts, program.stmts) {
        return Ok(program);
    }
    Ok(t.factory().alloc(Program { stmts, ..*program }))
}

pub fn transform_stmts<'cx, T: Transformer<'cx>>(
    t: &mut T,
    stmts: &'cx [&'cx Stmt<'cx>],
) -> Result<&'cx [&'cx Stmt<'cx>], T::Error> {
    let mut changed = false;
    let mut out = Vec::with_capacity(stmts.len());
    for stmt in stmts {
        let next = t.transform_stmt(stmt)?;
        changed |= !ptr::eq(next, *stmt);
        out.push(next);
    }
    if !changed {
        return Ok(stmts);
    }
    Ok(t.factory().alloc_slice(&out))
}

pub fn transform_exprs<'cx, T: Transformer<'cx>>(
    t: &mut T,
    exprs: &'cx [&'cx Expr<'cx>],
) -> Result<&'cx [&'cx Expr<'cx>], T::Error> {
    let mut changed = false;
    let mut out = Vec::with_capacity(exprs.len());
    for expr in exprs {
        let next = t.transform_expr(expr)?;
        changed |= !ptr::eq(next, *expr);
        out.push(next);
    }
    if !changed {
        return Ok(exprs);
    }
    Ok(t.factory().alloc_slice(&out))
}

pub fn transform_stmt<'cx, T: Transformer<'cx>>(
    t: &mut T,
    stmt: &'cx Stmt<'cx>,
) -> Result<&'cx Stmt<'cx>, T::Error> {
    macro_rules! rewrap {
        ($( ($variant: ident, $method: ident) ),* $(,)?) => {
            match stmt.kind {
                StmtKind::Empty(_) => Ok(stmt),
                $(
                    StmtKind::$variant(n) => {
                        let next = t.$method(n)?;
                        if ptr::eq(next, n) {
                            Ok(stmt)
                        } else {
                            Ok(t.factory().stmt(StmtKind::$variant(next)))
                        }
                    }
                )*
            }
        };
    }
    rewrap!(
        (Var, transform_var_stmt),
        (Expr, transform_expr_stmt),
        (If, transform_if_stmt),
        (Block, transform_block_stmt),
        (While, transform_while_stmt),
        (Do, transform_do_stmt),
        (For, transform_for_stmt),
        (ForIn, transform_for_in_stmt),
        (Break, transform_break_stmt),
        (Continue, transform_continue_stmt),
        (Ret, transform_ret_stmt),
        (Throw, transform_throw_stmt),
        (Try, transform_try_stmt),
        (Switch, transform_switch_stmt),
        (Labeled, transform_labeled_stmt),
        (Fn, transform_fn_decl),
    )
}

pub fn transform_expr<'cx, T: Transformer<'cx>>(
    t: &mut T,
    expr: &'cx Expr<'cx>,
) -> Result<&'cx Expr<'cx>, T::Error> {
    macro_rules! rewrap {
        ($( ($variant: ident, $method: ident) ),* $(,)?) => {
            match expr.kind {
                ExprKind::Ident(_)
                | ExprKind::NumLit(_)
                | ExprKind::StringLit(_)
                | ExprKind::BoolLit(_)
                | ExprKind::NullLit(_)
                | ExprKind::This(_) => Ok(expr),
                $(
                    ExprKind::$variant(n) => {
                        let next = t.$method(n)?;
                        if ptr::eq(next, n) {
                            Ok(expr)
                        } else {
                            Ok(t.factory().expr(ExprKind::$variant(next)))
                        }
                    }
                )*
            }
        };
    }
    rewrap!(
        (ArrayLit, transform_array_lit),
        (ObjectLit, transform_object_lit),
        (Fn, transform_fn_expr),
        (ArrowFn, transform_arrow_fn_expr),
        (Paren, transform_paren_expr),
        (Bin, transform_bin_expr),
        (Assign, transform_assign_expr),
        (Cond, transform_cond_expr),
        (Call, transform_call_expr),
        (New, transform_new_expr),
        (PropAccess, transform_prop_access_expr),
        (EleAccess, transform_ele_access_expr),
        (PrefixUnary, transform_prefix_unary_expr),
        (PostfixUnary, transform_postfix_unary_expr),
    )
}

// ===== statements =====

pub fn transform_var_stmt<'cx, T: Transformer<'cx>>(
    t: &mut T,
    var: &'cx VarStmt<'cx>,
) -> Result<&'cx VarStmt<'cx>, T::Error> {
    let mut changed = false;
    let mut list = Vec::with_capacity(var.list.len());
    for decl in var.list {
        let next = t.transform_var_decl(decl)?;
        changed |= !ptr::eq(next, *decl);
        list.push(next);
    }
    if !changed {
        return Ok(var);
    }
    let list = t.factory().alloc_slice(&list);
    Ok(t.factory().alloc(VarStmt { list, ..*var }))
}

pub fn transform_var_decl<'cx, T: Transformer<'cx>>(
    t: &mut T,
    decl: &'cx VarDecl<'cx>,
) -> Result<&'cx VarDecl<'cx>, T::Error> {
    let Some(init) = decl.init else {
        return Ok(decl);
    };
    let next = t.transform_expr(init)?;
    if ptr::eq(next, init) {
        return Ok(decl);
    }
    Ok(t.factory().alloc(VarDecl {
        init: Some(next),
        ..*decl
    }))
}

pub fn transform_expr_stmt<'cx, T: Transformer<'cx>>(
    t: &mut T,
    n: &'cx ExprStmt<'cx>,
) -> Result<&'cx ExprStmt<'cx>, T::Error> {
    let expr = t.transform_expr(n.expr)?;
    if ptr::eq(expr, n.expr) {
        return Ok(n);
    }
    Ok(t.factory().alloc(ExprStmt { expr, ..*n }))
}

pub fn transform_if_stmt<'cx, T: Transformer<'cx>>(
    t: &mut T,
    n: &'cx IfStmt<'cx>,
) -> Result<&'cx IfStmt<'cx>, T::Error> {
    let expr = t.transform_expr(n.expr)?;
    let then = t.transform_stmt(n.then)?;
    let else_then = n.else_then.map(|s| t.transform_stmt(s)).transpose()?;
    if ptr::eq(expr, n.expr) && ptr::eq(then, n.then) && opt_eq(else_then, n.else_then) {
        return Ok(n);
    }
    Ok(t.factory().alloc(IfStmt {
        expr,
        then,
        else_then,
        ..*n
    }))
}

pub fn transform_block_stmt<'cx, T: Transformer<'cx>>(
    t: &mut T,
    n: &'cx BlockStmt<'cx>,
) -> Result<&'cx BlockStmt<'cx>, T::Error> {
    let stmts = t.transform_stmts(n.stmts)?;
    if ptr::eq(stmts, n.stmts) {
        return Ok(n);
    }
    Ok(t.factory().alloc(BlockStmt { stmts, ..*n }))
}

pub fn transform_fn_body<'cx, T: Transformer<'cx>>(
    t: &mut T,
    n: &'cx BlockStmt<'cx>,
) -> Result<&'cx BlockStmt<'cx>, T::Error> {
    t.transform_block_stmt(n)
}

pub fn transform_while_stmt<'cx, T: Transformer<'cx>>(
    t: &mut T,
    n: &'cx WhileStmt<'cx>,
) -> Result<&'cx WhileStmt<'cx>, T::Error> {
    let expr = t.transform_expr(n.expr)?;
    let stmt = t.transform_stmt(n.stmt)?;
    if ptr::eq(expr, n.expr) && ptr::eq(stmt, n.stmt) {
        return Ok(n);
    }
    Ok(t.factory().alloc(WhileStmt { expr, stmt, ..*n }))
}

pub fn transform_do_stmt<'cx, T: Transformer<'cx>>(
    t: &mut T,
    n: &'cx DoStmt<'cx>,
) -> Result<&'cx DoStmt<'cx>, T::Error> {
    let stmt = t.transform_stmt(n.stmt)?;
    let expr = t.transform_expr(n.expr)?;
    if ptr::eq(expr, n.expr) && ptr::eq(stmt, n.stmt) {
        return Ok(n);
    }
    Ok(t.factory().alloc(DoStmt { stmt, expr, ..*n }))
}

fn transform_for_init<'cx, T: Transformer<'cx>>(
    t: &mut T,
    init: ForInitKind<'cx>,
) -> Result<(ForInitKind<'cx>, bool), T::Error> {
    Ok(match init {
        ForInitKind::Var(var) => {
            let next = t.transform_var_stmt(var)?;
            (ForInitKind::Var(next), !ptr::eq(next, var))
        }
        ForInitKind::Expr(expr) => {
            let next = t.transform_expr(expr)?;
            (ForInitKind::Expr(next), !ptr::eq(next, expr))
        }
    })
}

pub fn transform_for_stmt<'cx, T: Transformer<'cx>>(
    t: &mut T,
    n: &'cx ForStmt<'cx>,
) -> Result<&'cx ForStmt<'cx>, T::Error> {
    let (init, init_changed) = match n.init {
        Some(init) => {
            let (init, changed) = transform_for_init(t, init)?;
            (Some(init), changed)
        }
        None => (None, false),
    };
    let cond = n.cond.map(|e| t.transform_expr(e)).transpose()?;
    let incr = n.incr.map(|e| t.transform_expr(e)).transpose()?;
    let body = t.transform_stmt(n.body)?;
    if !init_changed && opt_eq(cond, n.cond) && opt_eq(incr, n.incr) && ptr::eq(body, n.body) {
        return Ok(n);
    }
    Ok(t.factory().alloc(ForStmt {
        init,
        cond,
        incr,
        body,
        ..*n
    }))
}

pub fn transform_for_in_stmt<'cx, T: Transformer<'cx>>(
    t: &mut T,
    n: &'cx ForInStmt<'cx>,
) -> Result<&'cx ForInStmt<'cx>, T::Error> {
    let (init, init_changed) = transform_for_init(t, n.init)?;
    let expr = t.transform_expr(n.expr)?;
    let body = t.transform_stmt(n.body)?;
    if !init_changed && ptr::eq(expr, n.expr) && ptr::eq(body, n.body) {
        return Ok(n);
    }
    Ok(t.factory().alloc(ForInStmt {
        init,
        expr,
        body,
        ..*n
    }))
}

pub fn transform_break_stmt<'cx, T: Transformer<'cx>>(
    _: &mut T,
    n: &'cx BreakStmt<'cx>,
) -> Result<&'cx BreakStmt<'cx>, T::Error> {
    Ok(n)
}

pub fn transform_continue_stmt<'cx, T: Transformer<'cx>>(
    _: &mut T,
    n: &'cx ContinueStmt<'cx>,
) -> Result<&'cx ContinueStmt<'cx>, T::Error> {
    Ok(n)
}

pub fn transform_ret_stmt<'cx, T: Transformer<'cx>>(
    t: &mut T,
    n: &'cx RetStmt<'cx>,
) -> Result<&'cx RetStmt<'cx>, T::Error> {
    let Some(expr) = n.expr else {
        return Ok(n);
    };
    let next = t.transform_expr(expr)?;
    if ptr::eq(next, expr) {
        return Ok(n);
    }
    Ok(t.factory().alloc(RetStmt {
        expr: Some(next),
        ..*n
    }))
}

pub fn transform_throw_stmt<'cx, T: Transformer<'cx>>(
    t: &mut T,
    n: &'cx ThrowStmt<'cx>,
) -> Result<&'cx ThrowStmt<'cx>, T::Error> {
    let expr = t.transform_expr(n.expr)?;
    if ptr::eq(expr, n.expr) {
        return Ok(n);
    }
    Ok(t.factory().alloc(ThrowStmt { expr, ..*n }))
}

pub fn transform_try_stmt<'cx, T: Transformer<'cx>>(
    t: &mut T,
    n: &'cx TryStmt<'cx>,
) -> Result<&'cx TryStmt<'cx>, T::Error> {
    let try_block = t.transform_block_stmt(n.try_block)?;
    let catch_clause = n
        .catch_clause
        .map(|c| t.transform_catch_clause(c))
        .transpose()?;
    let finally_block = n
        .finally_block
        .map(|b| t.transform_block_stmt(b))
        .transpose()?;
    if ptr::eq(try_block, n.try_block)
        && opt_eq(catch_clause, n.catch_clause)
        && opt_eq(finally_block, n.finally_block)
    {
        return Ok(n);
    }
    Ok(t.factory().alloc(TryStmt {
        try_block,
        catch_clause,
        finally_block,
        ..*n
    }))
}

pub fn transform_catch_clause<'cx, T: Transformer<'cx>>(
    t: &mut T,
    n: &'cx CatchClause<'cx>,
) -> Result<&'cx CatchClause<'cx>, T::Error> {
    let block = t.transform_block_stmt(n.block)?;
    if ptr::eq(block, n.block) {
        return Ok(n);
    }
    Ok(t.factory().alloc(CatchClause { block, ..*n }))
}

pub fn transform_switch_stmt<'cx, T: Transformer<'cx>>(
    t: &mut T,
    n: &'cx SwitchStmt<'cx>,
) -> Result<&'cx SwitchStmt<'cx>, T::Error> {
    let expr = t.transform_expr(n.expr)?;
    let mut changed = !ptr::eq(expr, n.expr);
    let mut clauses = Vec::with_capacity(n.case_block.clauses.len());
    for clause in n.case_block.clauses {
        let next = match *clause {
            CaseOrDefaultClause::Case(case) => {
                let next = t.transform_case_clause(case)?;
                changed |= !ptr::eq(next, case);
                CaseOrDefaultClause::Case(next)
            }
            CaseOrDefaultClause::Default(default) => {
                let next = t.transform_default_clause(default)?;
                changed |= !ptr::eq(next, default);
                CaseOrDefaultClause::Default(next)
            }
        };
        clauses.push(next);
    }
    if !changed {
        return Ok(n);
    }
    let clauses = t.factory().alloc_slice(&clauses);
    let case_block = t.factory().alloc(CaseBlock {
        clauses,
        ..*n.case_block
    });
    Ok(t.factory().alloc(SwitchStmt {
        expr,
        case_block,
        ..*n
    }))
}

pub fn transform_case_clause<'cx, T: Transformer<'cx>>(
    t: &mut T,
    n: &'cx CaseClause<'cx>,
) -> Result<&'cx CaseClause<'cx>, T::Error> {
    let expr = t.transform_expr(n.expr)?;
    let stmts = t.transform_stmts(n.stmts)?;
    if ptr::eq(expr, n.expr) && ptr::eq(stmts, n.stmts) {
        return Ok(n);
    }
    Ok(t.factory().alloc(CaseClause { expr, stmts, ..*n }))
}

pub fn transform_default_clause<'cx, T: Transformer<'cx>>(
    t: &mut T,
    n: &'cx DefaultClause<'cx>,
) -> Result<&'cx DefaultClause<'cx>, T::Error> {
    let stmts = t.transform_stmts(n.stmts)?;
    if ptr::eq(stmts, n.stmts) {
        return Ok(n);
    }
    Ok(t.factory().alloc(DefaultClause { stmts, ..*n }))
}

pub fn transform_labeled_stmt<'cx, T: Transformer<'cx>>(
    t: &mut T,
    n: &'cx LabeledStmt<'cx>,
) -> Result<&'cx LabeledStmt<'cx>, T::Error> {
    let stmt = t.transform_stmt(n.stmt)?;
    if ptr::eq(stmt, n.stmt) {
        return Ok(n);
    }
    Ok(t.factory().alloc(LabeledStmt { stmt, ..*n }))
}

pub fn transform_fn_decl<'cx, T: Transformer<'cx>>(
    t: &mut T,
    n: &'cx FnDecl<'cx>,
) -> Result<&'cx FnDecl<'cx>, T::Error> {
    let body = t.transform_fn_body(n.body)?;
    if ptr::eq(body, n.body) {
        return Ok(n);
    }
    Ok(t.factory().alloc(FnDecl { body, ..*n }))
}

// ===== expressions =====

pub fn transform_array_lit<'cx, T: Transformer<'cx>>(
    t: &mut T,
    n: &'cx ArrayLit<'cx>,
) -> Result<&'cx ArrayLit<'cx>, T::Error> {
    let elems = t.transform_exprs(n.elems)?;
    if ptr::eq(elems, n.elems) {
        return Ok(n);
    }
    Ok(t.factory().alloc(ArrayLit { elems, ..*n }))
}

pub fn transform_object_lit<'cx, T: Transformer<'cx>>(
    t: &mut T,
    n: &'cx ObjectLit<'cx>,
) -> Result<&'cx ObjectLit<'cx>, T::Error> {
    let mut changed = false;
    let mut members = Vec::with_capacity(n.members.len());
    for member in n.members {
        let next = t.transform_object_member(member)?;
        changed |= !ptr::eq(next, *member);
        members.push(next);
    }
    if !changed {
        return Ok(n);
    }
    let members = t.factory().alloc_slice(&members);
    Ok(t.factory().alloc(ObjectLit { members, ..*n }))
}

pub fn transform_object_member<'cx, T: Transformer<'cx>>(
    t: &mut T,
    n: &'cx ObjectMember<'cx>,
) -> Result<&'cx ObjectMember<'cx>, T::Error> {
    use ObjectMemberKind::*;
    let kind = match n.kind {
        Prop(prop) => {
            let init = t.transform_expr(prop.init)?;
            if ptr::eq(init, prop.init) {
                return Ok(n);
            }
            Prop(t.factory().alloc(ObjectPropMember { init, ..*prop }))
        }
        Getter(getter) => {
            let body = t.transform_fn_body(getter.body)?;
            if ptr::eq(body, getter.body) {
                return Ok(n);
            }
            Getter(t.factory().alloc(GetterDecl { body, ..*getter }))
        }
        Setter(setter) => {
            let body = t.transform_fn_body(setter.body)?;
            if ptr::eq(body, setter.body) {
                return Ok(n);
            }
            Setter(t.factory().alloc(SetterDecl { body, ..*setter }))
        }
    };
    Ok(t.factory().alloc(ObjectMember { kind }))
}

pub fn transform_fn_expr<'cx, T: Transformer<'cx>>(
    t: &mut T,
    n: &'cx FnExpr<'cx>,
) -> Result<&'cx FnExpr<'cx>, T::Error> {
    let body = t.transform_fn_body(n.body)?;
    if ptr::eq(body, n.body) {
        return Ok(n);
    }
    Ok(t.factory().alloc(FnExpr { body, ..*n }))
}

pub fn transform_arrow_fn_expr<'cx, T: Transformer<'cx>>(
    t: &mut T,
    n: &'cx ArrowFnExpr<'cx>,
) -> Result<&'cx ArrowFnExpr<'cx>, T::Error> {
    let body = match n.body {
        ArrowFnExprBody::Block(block) => {
            let next = t.transform_fn_body(block)?;
            if ptr::eq(next, block) {
                return Ok(n);
            }
            ArrowFnExprBody::Block(next)
        }
        ArrowFnExprBody::Expr(expr) => {
            let next = t.transform_expr(expr)?;
            if ptr::eq(next, expr) {
                return Ok(n);
            }
            ArrowFnExprBody::Expr(next)
        }
    };
    Ok(t.factory().alloc(ArrowFnExpr { body, ..*n }))
}

pub fn transform_paren_expr<'cx, T: Transformer<'cx>>(
    t: &mut T,
    n: &'cx ParenExpr<'cx>,
) -> Result<&'cx ParenExpr<'cx>, T::Error> {
    let expr = t.transform_expr(n.expr)?;
    if ptr::eq(expr, n.expr) {
        return Ok(n);
    }
    Ok(t.factory().alloc(ParenExpr { expr, ..*n }))
}

pub fn transform_bin_expr<'cx, T: Transformer<'cx>>(
    t: &mut T,
    n: &'cx BinExpr<'cx>,
) -> Result<&'cx BinExpr<'cx>, T::Error> {
    let left = t.transform_expr(n.left)?;
    let right = t.transform_expr(n.right)?;
    if ptr::eq(left, n.left) && ptr::eq(right, n.right) {
        return Ok(n);
    }
    Ok(t.factory().alloc(BinExpr { left, right, ..*n }))
}

pub fn transform_assign_expr<'cx, T: Transformer<'cx>>(
    t: &mut T,
    n: &'cx AssignExpr<'cx>,
) -> Result<&'cx AssignExpr<'cx>, T::Error> {
    let left = t.transform_expr(n.left)?;
    let right = t.transform_expr(n.right)?;
    if ptr::eq(left, n.left) && ptr::eq(right, n.right) {
        return Ok(n);
    }
    Ok(t.factory().alloc(AssignExpr { left, right, ..*n }))
}

pub fn transform_cond_expr<'cx, T: Transformer<'cx>>(
    t: &mut T,
    n: &'cx CondExpr<'cx>,
) -> Result<&'cx CondExpr<'cx>, T::Error> {
    let cond = t.transform_expr(n.cond)?;
    let when_true = t.transform_expr(n.when_true)?;
    let when_false = t.transform_expr(n.when_false)?;
    if ptr::eq(cond, n.cond) && ptr::eq(when_true, n.when_true) && ptr::eq(when_false, n.when_false)
    {
        return Ok(n);
    }
    Ok(t.factory().alloc(CondExpr {
        cond,
        when_true,
        when_false,
        ..*n
    }))
}

pub fn transform_call_expr<'cx, T: Transformer<'cx>>(
    t: &mut T,
    n: &'cx CallExpr<'cx>,
) -> Result<&'cx CallExpr<'cx>, T::Error> {
    let expr = t.transform_expr(n.expr)?;
    let args = t.transform_exprs(n.args)?;
    if ptr::eq(expr, n.expr) && ptr::eq(args, n.args) {
        return Ok(n);
    }
    Ok(t.factory().alloc(CallExpr { expr, args, ..*n }))
}

pub fn transform_new_expr<'cx, T: Transformer<'cx>>(
    t: &mut T,
    n: &'cx NewExpr<'cx>,
) -> Result<&'cx NewExpr<'cx>, T::Error> {
    let expr = t.transform_expr(n.expr)?;
    let args = n.args.map(|args| t.transform_exprs(args)).transpose()?;
    if ptr::eq(expr, n.expr) && opt_eq(args, n.args) {
        return Ok(n);
    }
    Ok(t.factory().alloc(NewExpr { expr, args, ..*n }))
}

pub fn transform_prop_access_expr<'cx, T: Transformer<'cx>>(
    t: &mut T,
    n: &'cx PropAccessExpr<'cx>,
) -> Result<&'cx PropAccessExpr<'cx>, T::Error> {
    let expr = t.transform_expr(n.expr)?;
    if ptr::eq(expr, n.expr) {
        return Ok(n);
    }
    Ok(t.factory().alloc(PropAccessExpr { expr, ..*n }))
}

pub fn transform_ele_access_expr<'cx, T: Transformer<'cx>>(
    t: &mut T,
    n: &'cx EleAccessExpr<'cx>,
) -> Result<&'cx EleAccessExpr<'cx>, T::Error> {
    let expr = t.transform_expr(n.expr)?;
    let arg = t.transform_expr(n.arg)?;
    if ptr::eq(expr, n.expr) && ptr::eq(arg, n.arg) {
        return Ok(n);
    }
    Ok(t.factory().alloc(EleAccessExpr { expr, arg, ..*n }))
}

pub fn transform_prefix_unary_expr<'cx, T: Transformer<'cx>>(
    t: &mut T,
    n: &'cx PrefixUnaryExpr<'cx>,
) -> Result<&'cx PrefixUnaryExpr<'cx>, T::Error> {
    let expr = t.transform_expr(n.expr)?;
    if ptr::eq(expr, n.expr) {
        return Ok(n);
    }
    Ok(t.factory().alloc(PrefixUnaryExpr { expr, ..*n }))
}

pub fn transform_postfix_unary_expr<'cx, T: Transformer<'cx>>(
    t: &mut T,
    n: &'cx PostfixUnaryExpr<'cx>,
) -> Result<&'cx PostfixUnaryExpr<'cx>, T::Error> {
    let expr = t.transform_expr(n.expr)?;
    if ptr::eq(expr, n.expr) {
        return Ok(n);
    }
    Ok(t.factory().alloc(PostfixUnaryExpr { expr, ..*n }))
}

pub fn opt_eq<T: ?Sized>(a: Option<&T>, b: Option<&T>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => ptr::eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

macro_rules! make_transformer {
    ( $( ($transform_node: ident, $ty: ty) ),* $(,)? ) => {
      pub trait Transformer<'cx>: Sized {
        type Error;

        fn factory(&mut self) -> &mut NodeFactory<'cx>;

        $(
          fn $transform_node(&mut self, node: &'cx $ty) -> Result<&'cx $ty, Self::Error> {
            $transform_node(self, node)
          }
        )*
      }
    };
}

make_transformer!(
    (transform_program, Program<'cx>),
    (transform_stmts, [&'cx Stmt<'cx>]),
    (transform_stmt, Stmt<'cx>),
    (transform_exprs, [&'cx Expr<'cx>]),
    (transform_expr, Expr<'cx>),
    (transform_var_stmt, VarStmt<'cx>),
    (transform_var_decl, VarDecl<'cx>),
    (transform_expr_stmt, ExprStmt<'cx>),
    (transform_if_stmt, IfStmt<'cx>),
    (transform_block_stmt, BlockStmt<'cx>),
    (transform_fn_body, BlockStmt<'cx>),
    (transform_while_stmt, WhileStmt<'cx>),
    (transform_do_stmt, DoStmt<'cx>),
    (transform_for_stmt, ForStmt<'cx>),
    (transform_for_in_stmt, ForInStmt<'cx>),
    (transform_break_stmt, BreakStmt<'cx>),
    (transform_continue_stmt, ContinueStmt<'cx>),
    (transform_ret_stmt, RetStmt<'cx>),
    (transform_throw_stmt, ThrowStmt<'cx>),
    (transform_try_stmt, TryStmt<'cx>),
    (transform_catch_clause, CatchClause<'cx>),
    (transform_switch_stmt, SwitchStmt<'cx>),
    (transform_case_clause, CaseClause<'cx>),
    (transform_default_clause, DefaultClause<'cx>),
    (transform_labeled_stmt, LabeledStmt<'cx>),
    (transform_fn_decl, FnDecl<'cx>),
    (transform_array_lit, ArrayLit<'cx>),
    (transform_object_lit, ObjectLit<'cx>),
    (transform_object_member, ObjectMember<'cx>),
    (transform_fn_expr, FnExpr<'cx>),
    (transform_arrow_fn_expr, ArrowFnExpr<'cx>),
    (transform_paren_expr, ParenExpr<'cx>),
    (transform_bin_expr, BinExpr<'cx>),
    (transform_assign_expr, AssignExpr<'cx>),
    (transform_cond_expr, CondExpr<'cx>),
    (transform_call_expr, CallExpr<'cx>),
    (transform_new_expr, NewExpr<'cx>),
    (transform_prop_access_expr, PropAccessExpr<'cx>),
    (transform_ele_access_expr, EleAccessExpr<'cx>),
    (transform_prefix_unary_expr, PrefixUnaryExpr<'cx>),
    (transform_postfix_unary_expr, PostfixUnaryExpr<'cx>),
);
