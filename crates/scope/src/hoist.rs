use qp_ast::{self as ast, Visitor};

/// Names a function-like body declares through `var` and function
/// declarations, without entering nested functions or catch clauses.
#[derive(Default)]
pub(crate) struct HoistedNames<'cx> {
    pub(crate) names: Vec<&'cx ast::Ident>,
}

impl<'cx> HoistedNames<'cx> {
    pub(crate) fn of_stmts(stmts: ast::Stmts<'cx>) -> Self {
        let mut collector = Self::default();
        for stmt in stmts {
            collector.visit_stmt(stmt);
        }
        collector
    }
}

impl<'cx> Visitor<'cx> for HoistedNames<'cx> {
    fn visit_var_decl(&mut self, decl: &'cx ast::VarDecl<'cx>) {
        self.names.push(decl.name);
    }

    fn visit_fn_decl(&mut self, f: &'cx ast::FnDecl<'cx>) {
        self.names.push(f.name);
    }

    fn visit_catch_clause(&mut self, _: &'cx ast::CatchClause<'cx>) {}

    // declarations never hide inside expressions outside nested functions
    fn visit_expr(&mut self, _: &'cx ast::Expr<'cx>) {}
}
