use std::ptr;

use qp_ast::{self as ast, Transformer, transformer};
use qp_atom::AtomId;
use qp_span::Span;

use super::{JumpKind, JumpOutsideTarget, LinearizeError, Linearizer};

type Result<T> = std::result::Result<T, LinearizeError>;

impl<'cx> Linearizer<'_, 'cx> {
    pub(super) fn lower_program(
        &mut self,
        program: &'cx ast::Program<'cx>,
    ) -> Result<&'cx ast::Program<'cx>> {
        self.state.insertions.push();
        let stmts = self.transform_stmts(program.stmts)?;
        self.pop_insertions(program.span)?;
        let stmts = self.with_activation(stmts);
        if ptr::eq(stmts, program.stmts) {
            return Ok(program);
        }
        Ok(self.factory.alloc(ast::Program { stmts, ..*program }))
    }

    /// Rewrites `stmts` in order and splices each statement's hoisted
    /// temporaries directly above it.
    pub(super) fn splice_stmts(&mut self, stmts: ast::Stmts<'cx>) -> Result<ast::Stmts<'cx>> {
        let mut changed = false;
        let mut out = Vec::with_capacity(stmts.len());
        for stmt in stmts {
            let next = self.transform_stmt(stmt)?;
            let before = out.len();
            self.state.insertions.drain_into(&mut out);
            changed |= out.len() != before || !ptr::eq(next, *stmt);
            out.push(next);
        }
        if !changed {
            return Ok(stmts);
        }
        Ok(self.factory.alloc_slice(&out))
    }

    pub(super) fn lower_block(
        &mut self,
        block: &'cx ast::BlockStmt<'cx>,
    ) -> Result<&'cx ast::BlockStmt<'cx>> {
        self.state.insertions.push();
        let stmts = self.transform_stmts(block.stmts)?;
        self.pop_insertions(block.span)?;
        if ptr::eq(stmts, block.stmts) {
            return Ok(block);
        }
        Ok(self.factory.alloc(ast::BlockStmt { stmts, ..*block }))
    }

    pub(super) fn lower_fn_body(
        &mut self,
        body: &'cx ast::BlockStmt<'cx>,
    ) -> Result<&'cx ast::BlockStmt<'cx>> {
        let outer = std::mem::take(&mut self.state);
        let block = self.transform_block_stmt(body);
        self.state = outer;
        let block = block?;
        let stmts = self.with_activation(block.stmts);
        if ptr::eq(stmts, block.stmts) {
            return Ok(block);
        }
        Ok(self.factory.alloc(ast::BlockStmt { stmts, ..*block }))
    }

    /// Rewrites a branch or loop body as a block with its own insertion
    /// context.
    fn lower_branch(&mut self, stmt: &'cx ast::Stmt<'cx>) -> Result<&'cx ast::Stmt<'cx>> {
        if let ast::StmtKind::Block(block) = stmt.kind {
            let next = self.transform_block_stmt(block)?;
            if ptr::eq(next, block) {
                return Ok(stmt);
            }
            return Ok(self.factory.stmt(ast::StmtKind::Block(next)));
        }
        let stmts = self.factory.alloc_slice(&[stmt]);
        let block = self.factory.create_block_stmt(stmts, stmt.span());
        let block = self.transform_block_stmt(block)?;
        Ok(self.factory.stmt(ast::StmtKind::Block(block)))
    }

    pub(super) fn split_var_stmt(
        &mut self,
        var: &'cx ast::VarStmt<'cx>,
    ) -> Result<&'cx ast::VarStmt<'cx>> {
        let Some((last, leading)) = var.list.split_last() else {
            return Ok(var);
        };
        for decl in leading {
            let decl = self.transform_var_decl(decl)?;
            let list = self.factory.alloc_slice(&[decl]);
            let single = self.factory.create_var_stmt(list, decl.span);
            let stmt = self.factory.stmt(ast::StmtKind::Var(single));
            self.state.insertions.insert(stmt);
        }
        let next = self.transform_var_decl(last)?;
        if leading.is_empty() && ptr::eq(next, *last) {
            return Ok(var);
        }
        let list = self.factory.alloc_slice(&[next]);
        Ok(self.factory.alloc(ast::VarStmt { list, ..*var }))
    }

    pub(super) fn lower_if(&mut self, n: &'cx ast::IfStmt<'cx>) -> Result<&'cx ast::IfStmt<'cx>> {
        let expr = self.transform_expr(n.expr)?;
        let then = self.lower_branch(n.then)?;
        let else_then = match n.else_then {
            Some(stmt) => Some(self.lower_branch(stmt)?),
            None => None,
        };
        if ptr::eq(expr, n.expr) && ptr::eq(then, n.then) && transformer::opt_eq(else_then, n.else_then) {
            return Ok(n);
        }
        Ok(self.factory.alloc(ast::IfStmt {
            expr,
            then,
            else_then,
            ..*n
        }))
    }

    pub(super) fn lower_labeled(
        &mut self,
        n: &'cx ast::LabeledStmt<'cx>,
    ) -> Result<&'cx ast::LabeledStmt<'cx>> {
        // `a: b: while (..)` labels the loop with both names
        let mut target = n.stmt;
        while let ast::StmtKind::Labeled(inner) = target.kind {
            target = inner.stmt;
        }
        self.state.labels.enter_labeled(n.label.name, target.id());
        let stmt = self.transform_stmt(n.stmt);
        self.state.labels.exit_labeled();
        let stmt = stmt?;
        if ptr::eq(stmt, n.stmt) {
            return Ok(n);
        }
        Ok(self.factory.alloc(ast::LabeledStmt { stmt, ..*n }))
    }

    pub(super) fn retarget_break(
        &mut self,
        n: &'cx ast::BreakStmt<'cx>,
    ) -> Result<&'cx ast::BreakStmt<'cx>> {
        if n.label.is_some() {
            return Ok(n);
        }
        let Some(target) = self.state.labels.break_target() else {
            return Err(JumpOutsideTarget {
                span: n.span,
                kind: JumpKind::Break,
            }
            .into());
        };
        let label = self.factory.create_ident(target, Span::transient());
        Ok(self.factory.alloc(ast::BreakStmt {
            label: Some(label),
            ..*n
        }))
    }

    /// Every `continue` lands on the `_cont` label of the trap around the
    /// loop body, whether or not the user named a label.
    pub(super) fn retarget_continue(
        &mut self,
        n: &'cx ast::ContinueStmt<'cx>,
    ) -> Result<&'cx ast::ContinueStmt<'cx>> {
        let target = match n.label {
            Some(label) => label.name,
            None => match self.state.labels.continue_target() {
                Some(target) => target,
                None => {
                    return Err(JumpOutsideTarget {
                        span: n.span,
                        kind: JumpKind::Continue,
                    }
                    .into());
                }
            },
        };
        let cont = self.continue_label(target);
        let span = n.label.map_or(Span::transient(), |label| label.span);
        let label = self.factory.create_ident(cont, span);
        Ok(self.factory.alloc(ast::ContinueStmt {
            label: Some(label),
            ..*n
        }))
    }

    fn push_iteration_label(&mut self, span: Span) -> AtomId {
        let label = self.label_id(span);
        tracing::debug!(%span, label = self.atoms.get(label), "loop");
        self.state.labels.push_iteration(label);
        label
    }

    /// `L_cont` followed by `U_cont` for each user label `U` on the loop.
    fn continue_labels(&mut self, loop_id: ast::NodeID, label: AtomId) -> Vec<AtomId> {
        let mut labels = vec![label];
        labels.extend(self.state.labels.user_labels_of(loop_id));
        labels
            .into_iter()
            .map(|label| self.continue_label(label))
            .collect()
    }

    /// Wraps `stmt` so that the first label ends up outermost.
    fn wrap_labels(&mut self, labels: &[AtomId], stmt: &'cx ast::Stmt<'cx>) -> &'cx ast::Stmt<'cx> {
        let span = stmt.span();
        labels.iter().rev().fold(stmt, |stmt, &label| {
            let label = self.factory.create_ident(label, Span::transient());
            let labeled = self.factory.create_labeled_stmt(label, stmt, span);
            self.factory.stmt(ast::StmtKind::Labeled(labeled))
        })
    }

    fn bool_lit(&mut self, val: bool) -> &'cx ast::Expr<'cx> {
        let lit = self.factory.create_bool_lit(val, Span::transient());
        self.factory.expr(ast::ExprKind::BoolLit(lit))
    }

    fn block(&mut self, stmts: &[&'cx ast::Stmt<'cx>], span: Span) -> &'cx ast::Stmt<'cx> {
        let stmts = self.factory.alloc_slice(stmts);
        let block = self.factory.create_block_stmt(stmts, span);
        self.factory.stmt(ast::StmtKind::Block(block))
    }

    /// `conts: do body while (false);` turns an unlabeled `continue` into a
    /// jump to the end of the body.
    fn trap_continue(&mut self, body: &'cx ast::Stmt<'cx>, conts: &[AtomId]) -> &'cx ast::Stmt<'cx> {
        let no = self.bool_lit(false);
        let trap = self.factory.create_do_stmt(body, no, body.span());
        let trap = self.factory.stmt(ast::StmtKind::Do(trap));
        self.wrap_labels(conts, trap)
    }

    pub(super) fn lower_for(&mut self, n: &'cx ast::ForStmt<'cx>) -> Result<&'cx ast::Stmt<'cx>> {
        // the initializer runs once, above the loop
        match n.init {
            Some(ast::ForInitKind::Var(var)) => {
                let var = self.transform_var_stmt(var)?;
                let stmt = self.factory.stmt(ast::StmtKind::Var(var));
                self.state.insertions.insert(stmt);
            }
            Some(ast::ForInitKind::Expr(expr)) => {
                let expr = self.transform_expr(expr)?;
                if !expr.is_simple() {
                    let stmt = self.factory.create_expr_stmt(expr, expr.span());
                    let stmt = self.factory.stmt(ast::StmtKind::Expr(stmt));
                    self.state.insertions.insert(stmt);
                }
            }
            None => {}
        }
        self.lower_loop(n.id, n.span, n.cond, n.body, n.incr)
    }

    pub(super) fn lower_loop(
        &mut self,
        id: ast::NodeID,
        span: Span,
        cond: Option<&'cx ast::Expr<'cx>>,
        body: &'cx ast::Stmt<'cx>,
        incr: Option<&'cx ast::Expr<'cx>>,
    ) -> Result<&'cx ast::Stmt<'cx>> {
        self.state.insertions.push();
        let label = self.push_iteration_label(span);
        let conts = self.continue_labels(id, label);

        let cond = match cond {
            Some(cond) => self.transform_expr(cond)?,
            None => self.bool_lit(true),
        };
        let mut stmts = self.state.insertions.take();

        let body = self.lower_branch(body)?;
        let trap = self.trap_continue(body, &conts);
        let then = self.block(&[trap], body.span());
        let exit = self.factory.create_ident(label, Span::transient());
        let brk = self.factory.create_break_stmt(Some(exit), Span::transient());
        let brk = self.factory.stmt(ast::StmtKind::Break(brk));
        let else_then = self.block(&[brk], Span::transient());
        let test = self.factory.create_if_stmt(cond, then, Some(else_then), span);
        stmts.push(self.factory.stmt(ast::StmtKind::If(test)));

        if let Some(incr) = incr {
            let incr = self.transform_expr(incr)?;
            self.state.insertions.drain_into(&mut stmts);
            if !incr.is_simple() {
                let stmt = self.factory.create_expr_stmt(incr, incr.span());
                stmts.push(self.factory.stmt(ast::StmtKind::Expr(stmt)));
            }
        }

        self.pop_insertions(span)?;
        self.state.labels.pop_iteration();

        let always = self.bool_lit(true);
        let block = self.block(&stmts, span);
        let lowered = self.factory.create_while_stmt(always, block, span);
        let lowered = self.factory.stmt(ast::StmtKind::While(lowered));
        Ok(self.wrap_labels(&[label], lowered))
    }

    pub(super) fn lower_do(&mut self, n: &'cx ast::DoStmt<'cx>) -> Result<&'cx ast::Stmt<'cx>> {
        self.state.insertions.push();
        let label = self.push_iteration_label(n.span);
        let conts = self.continue_labels(n.id, label);

        let body = self.lower_branch(n.stmt)?;
        let trap = self.trap_continue(body, &conts);
        // the condition's temporaries run after the body on every iteration
        let expr = self.transform_expr(n.expr)?;
        let mut stmts = vec![trap];
        self.state.insertions.drain_into(&mut stmts);

        self.pop_insertions(n.span)?;
        self.state.labels.pop_iteration();

        let block = self.block(&stmts, n.stmt.span());
        let lowered = self.factory.alloc(ast::DoStmt {
            stmt: block,
            expr,
            ..*n
        });
        let lowered = self.factory.stmt(ast::StmtKind::Do(lowered));
        Ok(self.wrap_labels(&[label], lowered))
    }

    pub(super) fn lower_for_in(&mut self, n: &'cx ast::ForInStmt<'cx>) -> Result<&'cx ast::Stmt<'cx>> {
        let label = self.push_iteration_label(n.span);
        let conts = self.continue_labels(n.id, label);

        let init = match n.init {
            ast::ForInitKind::Var(var) => ast::ForInitKind::Var(var),
            // assigned on every iteration
            ast::ForInitKind::Expr(expr) => ast::ForInitKind::Expr(self.lower_target(expr)?),
        };
        let expr = self.transform_expr(n.expr)?;
        let body = self.lower_branch(n.body)?;
        self.state.labels.pop_iteration();

        let lowered = self.factory.alloc(ast::ForInStmt {
            init,
            expr,
            body,
            ..*n
        });
        let lowered = self.factory.stmt(ast::StmtKind::ForIn(lowered));
        let lowered = self.wrap_labels(&conts, lowered);
        Ok(self.wrap_labels(&[label], lowered))
    }

    pub(super) fn lower_switch(&mut self, n: &'cx ast::SwitchStmt<'cx>) -> Result<&'cx ast::Stmt<'cx>> {
        let label = self.label_id(n.span);
        self.state.labels.push_switch(label);
        // the discriminant and every case test are hoisted above the switch
        let lowered = transformer::transform_switch_stmt(self, n);
        self.state.labels.pop_switch();
        let lowered = self.factory.stmt(ast::StmtKind::Switch(lowered?));
        Ok(self.wrap_labels(&[label], lowered))
    }

    pub(super) fn lower_case_clause(
        &mut self,
        n: &'cx ast::CaseClause<'cx>,
    ) -> Result<&'cx ast::CaseClause<'cx>> {
        let expr = self.transform_expr(n.expr)?;
        self.state.insertions.push();
        let stmts = self.transform_stmts(n.stmts)?;
        self.pop_insertions(n.span)?;
        if ptr::eq(expr, n.expr) && ptr::eq(stmts, n.stmts) {
            return Ok(n);
        }
        Ok(self.factory.alloc(ast::CaseClause { expr, stmts, ..*n }))
    }

    pub(super) fn lower_default_clause(
        &mut self,
        n: &'cx ast::DefaultClause<'cx>,
    ) -> Result<&'cx ast::DefaultClause<'cx>> {
        self.state.insertions.push();
        let stmts = self.transform_stmts(n.stmts)?;
        self.pop_insertions(n.span)?;
        if ptr::eq(stmts, n.stmts) {
            return Ok(n);
        }
        Ok(self.factory.alloc(ast::DefaultClause { stmts, ..*n }))
    }
}
