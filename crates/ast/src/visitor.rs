use super::*;

pub fn visit_program<'cx>(v: &mut impl Visitor<'cx>, program: &'cx Program<'cx>) {
    for stmt in program.stmts {
        v.visit_stmt(stmt);
    }
}

pub fn visit_stmt<'cx>(v: &mut impl Visitor<'cx>, stmt: &'cx Stmt<'cx>) {
    use StmtKind::*;
    match stmt.kind {
        Empty(_) => {}
        Var(n) => v.visit_var_stmt(n),
        Expr(n) => v.visit_expr(n.expr),
        If(n) => {
            v.visit_expr(n.expr);
            v.visit_stmt(n.then);
            if let Some(else_then) = n.else_then {
                v.visit_stmt(else_then);
            }
        }
        Block(n) => v.visit_block_stmt(n),
        While(n) => {
            v.visit_expr(n.expr);
            v.visit_stmt(n.stmt);
        }
        Do(n) => {
            v.visit_stmt(n.stmt);
            v.visit_expr(n.expr);
        }
        For(n) => {
            match n.init {
                Some(ForInitKind::Var(var)) => v.visit_var_stmt(var),
                Some(ForInitKind::Expr(expr)) => v.visit_expr(expr),
                None => {}
            }
            if let Some(cond) = n.cond {
                v.visit_expr(cond);
            }
            if let Some(incr) = n.incr {
                v.visit_expr(incr);
            }
            v.visit_stmt(n.body);
        }
        ForIn(n) => {
            match n.init {
                ForInitKind::Var(var) => v.visit_var_stmt(var),
                ForInitKind::Expr(expr) => v.visit_expr(expr),
            }
            v.visit_expr(n.expr);
            v.visit_stmt(n.body);
        }
        // labels are not references
        Break(_) | Continue(_) => {}
        Ret(n) => {
            if let Some(expr) = n.expr {
                v.visit_expr(expr);
            }
        }
        Throw(n) => v.visit_expr(n.expr),
        Try(n) => {
            v.visit_block_stmt(n.try_block);
            if let Some(catch) = n.catch_clause {
                v.visit_catch_clause(catch);
            }
            if let Some(finally) = n.finally_block {
                v.visit_block_stmt(finally);
            }
        }
        Switch(n) => {
            v.visit_expr(n.expr);
            for clause in n.case_block.clauses {
                match clause {
                    CaseOrDefaultClause::Case(case) => {
                        v.visit_expr(case.expr);
                        for stmt in case.stmts {
                            v.visit_stmt(stmt);
                        }
                    }
                    CaseOrDefaultClause::Default(default) => {
                        for stmt in default.stmts {
                            v.visit_stmt(stmt);
                        }
                    }
                }
            }
        }
        Labeled(n) => v.visit_stmt(n.stmt),
        Fn(n) => v.visit_fn_decl(n),
    }
}

pub fn visit_var_stmt<'cx>(v: &mut impl Visitor<'cx>, var: &'cx VarStmt<'cx>) {
    for decl in var.list {
        v.visit_var_decl(decl);
    }
}

pub fn visit_var_decl<'cx>(v: &mut impl Visitor<'cx>, decl: &'cx VarDecl<'cx>) {
    if let Some(init) = decl.init {
        v.visit_expr(init);
    }
}

pub fn visit_block_stmt<'cx>(v: &mut impl Visitor<'cx>, block: &'cx BlockStmt<'cx>) {
    for stmt in block.stmts {
        v.visit_stmt(stmt);
    }
}

pub fn visit_catch_clause<'cx>(v: &mut impl Visitor<'cx>, catch: &'cx CatchClause<'cx>) {
    v.visit_block_stmt(catch.block);
}

pub fn visit_fn_decl<'cx>(v: &mut impl Visitor<'cx>, f: &'cx FnDecl<'cx>) {
    for param in f.params {
        v.visit_param_decl(param);
    }
    v.visit_block_stmt(f.body);
}

pub fn visit_param_decl<'cx>(_: &mut impl Visitor<'cx>, _: &'cx ParamDecl<'cx>) {}

pub fn visit_expr<'cx>(v: &mut impl Visitor<'cx>, expr: &'cx Expr<'cx>) {
    use ExprKind::*;
    match expr.kind {
        Ident(n) => v.visit_ident(n),
        NumLit(_) | StringLit(_) | BoolLit(_) | NullLit(_) | This(_) => {}
        ArrayLit(n) => {
            for elem in n.elems {
                v.visit_expr(elem);
            }
        }
        ObjectLit(n) => {
            for member in n.members {
                v.visit_object_member(member);
            }
        }
        Fn(n) => v.visit_fn_expr(n),
        ArrowFn(n) => v.visit_arrow_fn_expr(n),
        Paren(n) => v.visit_expr(n.expr),
        Bin(n) => {
            v.visit_expr(n.left);
            v.visit_expr(n.right);
        }
        Assign(n) => {
            v.visit_expr(n.left);
            v.visit_expr(n.right);
        }
        Cond(n) => {
            v.visit_expr(n.cond);
            v.visit_expr(n.when_true);
            v.visit_expr(n.when_false);
        }
        Call(n) => {
            v.visit_expr(n.expr);
            for arg in n.args {
                v.visit_expr(arg);
            }
        }
        New(n) => {
            v.visit_expr(n.expr);
            for arg in n.args.unwrap_or_default() {
                v.visit_expr(arg);
            }
        }
        // `name` is a property key
        PropAccess(n) => v.visit_expr(n.expr),
        EleAccess(n) => {
            v.visit_expr(n.expr);
            v.visit_expr(n.arg);
        }
        PrefixUnary(n) => v.visit_expr(n.expr),
        PostfixUnary(n) => v.visit_expr(n.expr),
    }
}

pub fn visit_ident<'cx>(_: &mut impl Visitor<'cx>, _: &'cx Ident) {}

pub fn visit_object_member<'cx>(v: &mut impl Visitor<'cx>, member: &'cx ObjectMember<'cx>) {
    use ObjectMemberKind::*;
    match member.kind {
        Prop(n) => v.visit_expr(n.init),
        Getter(n) => v.visit_getter_decl(n),
        Setter(n) => v.visit_setter_decl(n),
    }
}

pub fn visit_getter_decl<'cx>(v: &mut impl Visitor<'cx>, getter: &'cx GetterDecl<'cx>) {
    v.visit_block_stmt(getter.body);
}

pub fn visit_setter_decl<'cx>(v: &mut impl Visitor<'cx>, setter: &'cx SetterDecl<'cx>) {
    v.visit_param_decl(setter.param);
    v.visit_block_stmt(setter.body);
}

pub fn visit_fn_expr<'cx>(v: &mut impl Visitor<'cx>, f: &'cx FnExpr<'cx>) {
    for param in f.params {
        v.visit_param_decl(param);
    }
    v.visit_block_stmt(f.body);
}

pub fn visit_arrow_fn_expr<'cx>(v: &mut impl Visitor<'cx>, f: &'cx ArrowFnExpr<'cx>) {
    for param in f.params {
        v.visit_param_decl(param);
    }
    match f.body {
        ArrowFnExprBody::Block(block) => v.visit_block_stmt(block),
        ArrowFnExprBody::Expr(expr) => v.visit_expr(expr),
    }
}

macro_rules! make_visitor {
    ( $( ($visit_node: ident, $ty: ty) ),* $(,)? ) => {
      pub trait Visitor<'cx>: Sized {
        $(
          fn $visit_node(&mut self, node: &'cx $ty) {
            $visit_node(self, node)
          }
        )*
      }
    };
}

make_visitor!(
    (visit_program, Program<'cx>),
    (visit_stmt, Stmt<'cx>),
    (visit_var_stmt, VarStmt<'cx>),
    (visit_var_decl, VarDecl<'cx>),
    (visit_block_stmt, BlockStmt<'cx>),
    (visit_catch_clause, CatchClause<'cx>),
    (visit_fn_decl, FnDecl<'cx>),
    (visit_param_decl, ParamDecl<'cx>),
    (visit_expr, Expr<'cx>),
    (visit_ident, Ident),
    (visit_object_member, ObjectMember<'cx>),
    (visit_getter_decl, GetterDecl<'cx>),
    (visit_setter_decl, SetterDecl<'cx>),
    (visit_fn_expr, FnExpr<'cx>),
    (visit_arrow_fn_expr, ArrowFnExpr<'cx>),
);
