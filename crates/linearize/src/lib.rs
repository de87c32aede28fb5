//! Rewrites a program so that every compound expression is computed by its
//! own `var` statement and every loop has one canonical shape.
//!
//! ```txt
//! while (c) { body }
//! ```
//!
//! becomes
//!
//! ```txt
//! L: while (true) {
//!   var __qpX = c;
//!   if (__qpX) {
//!     L_cont: do { body } while (false);
//!   } else {
//!     break;
//!   }
//! }
//! ```

mod activation;
mod errors;
mod expr;
mod insertion;
mod labels;
mod stmt;
mod trace;

use std::borrow::Cow;

use qp_ast::{self as ast, NodeFactory, Transformer, transformer};
use qp_atom::{AtomId, AtomMap};
use qp_config::NormalizedTraceConfig;
use qp_span::Span;
use rustc_hash::FxHashSet;

pub use errors::{JumpKind, JumpOutsideTarget, LinearizeError, PendingInsertions};
pub use trace::{TraceEntry, TraceTable};

use insertion::InsertionStack;
use labels::LabelStack;

pub struct LinearizeResult<'cx> {
    pub program: &'cx ast::Program<'cx>,
    pub traces: TraceTable,
}

/// Linearizes `program` into a new tree. The input is left untouched;
/// unchanged subtrees are shared with the output.
pub fn linearize<'cx>(
    program: &'cx ast::Program<'cx>,
    factory: &mut NodeFactory<'cx>,
    atoms: &mut AtomMap<'cx>,
    config: &NormalizedTraceConfig,
) -> Result<LinearizeResult<'cx>, LinearizeError> {
    let _span = tracing::debug_span!("linearize", module = program.span.module.as_u32()).entered();
    tracing::trace!("input:\n{}", ast::pprint_program(program, atoms));
    let mut linearizer = Linearizer::new(factory, atoms, config);
    let program = linearizer.transform_program(program)?;
    let traces = linearizer.traces;
    tracing::trace!("output:\n{}", ast::pprint_program(program, atoms));
    Ok(LinearizeResult { program, traces })
}

/// Everything that must not leak across a function boundary.
#[derive(Debug, Default)]
struct FnState<'cx> {
    insertions: InsertionStack<'cx>,
    labels: LabelStack,
    /// Non-zero while rewriting code that may not run, such as the right
    /// side of `&&`. Nothing is hoisted there.
    lazy_depth: u32,
}

struct Linearizer<'a, 'cx> {
    factory: &'a mut NodeFactory<'cx>,
    atoms: &'a mut AtomMap<'cx>,
    config: &'a NormalizedTraceConfig,
    state: FnState<'cx>,
    /// Source spans that already produced a name.
    hoisted: FxHashSet<Span>,
    seq: u32,
    traces: TraceTable,
}

impl<'a, 'cx> Linearizer<'a, 'cx> {
    fn new(
        factory: &'a mut NodeFactory<'cx>,
        atoms: &'a mut AtomMap<'cx>,
        config: &'a NormalizedTraceConfig,
    ) -> Self {
        Self {
            factory,
            atoms,
            config,
            state: FnState::default(),
            hoisted: FxHashSet::default(),
            seq: 0,
            traces: TraceTable::default(),
        }
    }

    fn atom(&mut self, s: String) -> AtomId {
        self.atoms.insert_by_str(Cow::Owned(s))
    }

    fn keyword(&mut self, atom: AtomId, s: &'static str) -> AtomId {
        self.atoms.insert_if_not_exist(atom, || Cow::Borrowed(s));
        atom
    }

    fn next_seq_id(&mut self) -> String {
        let id = format!("v{}", self.seq);
        self.seq += 1;
        id
    }

    /// `_<offset of last char>_<length>`, so a name can be rebuilt from the
    /// source position alone.
    fn span_id(span: Span) -> String {
        format!("_{}_{}", span.hi - 1, span.len())
    }

    fn trace_id(&mut self, span: Span) -> String {
        if span.is_synthetic() || !self.hoisted.insert(span) {
            self.next_seq_id()
        } else {
            Self::span_id(span)
        }
    }

    fn label_id(&mut self, span: Span) -> AtomId {
        let id = if span.is_synthetic() {
            self.next_seq_id()
        } else {
            Self::span_id(span)
        };
        self.atom(id)
    }

    fn continue_label(&mut self, label: AtomId) -> AtomId {
        let name = format!("{}_cont", self.atoms.get(label));
        self.atom(name)
    }

    fn hoist(&mut self, expr: &'cx ast::Expr<'cx>) -> &'cx ast::Expr<'cx> {
        self.hoist_as(expr, expr.span())
    }

    /// Queues `var <temp> = expr;` above the current statement and returns a
    /// reference to `<temp>`. `span` names the temporary.
    fn hoist_as(&mut self, expr: &'cx ast::Expr<'cx>, span: Span) -> &'cx ast::Expr<'cx> {
        let trace_id = self.trace_id(span);
        let temp = format!("{}{}", self.config.temp_prefix(), trace_id);
        tracing::debug!(%span, temp = %temp, "hoist");
        let temp = self.atom(temp);

        let binding = self.factory.create_ident(temp, Span::transient());
        let decl = self.factory.create_var_decl(binding, Some(expr), span);
        let list = self.factory.alloc_slice(&[decl]);
        let var = self.factory.create_var_stmt(list, span);
        let stmt = self.factory.stmt(ast::StmtKind::Var(var));
        self.state.insertions.insert(stmt);

        let reference = self.factory.create_ident(temp, span);
        self.traces.record(TraceEntry {
            span,
            trace_id,
            temp,
            reference: reference.id,
        });
        self.factory.expr(ast::ExprKind::Ident(reference))
    }

    fn pop_insertions(&mut self, span: Span) -> Result<(), LinearizeError> {
        let left = self.state.insertions.pop();
        if left.is_empty() {
            return Ok(());
        }
        tracing::error!(%span, count = left.len(), "insertions left behind");
        Err(PendingInsertions {
            span,
            count: left.len(),
        }
        .into())
    }
}

impl<'cx> Transformer<'cx> for Linearizer<'_, 'cx> {
    type Error = LinearizeError;

    fn factory(&mut self) -> &mut NodeFactory<'cx> {
        self.factory
    }

    fn transform_program(
        &mut self,
        program: &'cx ast::Program<'cx>,
    ) -> Result<&'cx ast::Program<'cx>, Self::Error> {
        self.lower_program(program)
    }

    fn transform_stmts(
        &mut self,
        stmts: &'cx [&'cx ast::Stmt<'cx>],
    ) -> Result<&'cx [&'cx ast::Stmt<'cx>], Self::Error> {
        self.splice_stmts(stmts)
    }

    fn transform_stmt(&mut self, stmt: &'cx ast::Stmt<'cx>) -> Result<&'cx ast::Stmt<'cx>, Self::Error> {
        use ast::StmtKind::*;
        match stmt.kind {
            While(n) => self.lower_loop(n.id, n.span, Some(n.expr), n.stmt, None),
            For(n) => self.lower_for(n),
            Do(n) => self.lower_do(n),
            ForIn(n) => self.lower_for_in(n),
            Switch(n) => self.lower_switch(n),
            _ => transformer::transform_stmt(self, stmt),
        }
    }

    fn transform_block_stmt(
        &mut self,
        block: &'cx ast::BlockStmt<'cx>,
    ) -> Result<&'cx ast::BlockStmt<'cx>, Self::Error> {
        self.lower_block(block)
    }

    fn transform_fn_body(
        &mut self,
        body: &'cx ast::BlockStmt<'cx>,
    ) -> Result<&'cx ast::BlockStmt<'cx>, Self::Error> {
        self.lower_fn_body(body)
    }

    fn transform_var_stmt(
        &mut self,
        var: &'cx ast::VarStmt<'cx>,
    ) -> Result<&'cx ast::VarStmt<'cx>, Self::Error> {
        self.split_var_stmt(var)
    }

    fn transform_if_stmt(
        &mut self,
        n: &'cx ast::IfStmt<'cx>,
    ) -> Result<&'cx ast::IfStmt<'cx>, Self::Error> {
        self.lower_if(n)
    }

    fn transform_break_stmt(
        &mut self,
        n: &'cx ast::BreakStmt<'cx>,
    ) -> Result<&'cx ast::BreakStmt<'cx>, Self::Error> {
        self.retarget_break(n)
    }

    fn transform_continue_stmt(
        &mut self,
        n: &'cx ast::ContinueStmt<'cx>,
    ) -> Result<&'cx ast::ContinueStmt<'cx>, Self::Error> {
        self.retarget_continue(n)
    }

    fn transform_labeled_stmt(
        &mut self,
        n: &'cx ast::LabeledStmt<'cx>,
    ) -> Result<&'cx ast::LabeledStmt<'cx>, Self::Error> {
        self.lower_labeled(n)
    }

    fn transform_case_clause(
        &mut self,
        n: &'cx ast::CaseClause<'cx>,
    ) -> Result<&'cx ast::CaseClause<'cx>, Self::Error> {
        self.lower_case_clause(n)
    }

    fn transform_default_clause(
        &mut self,
        n: &'cx ast::DefaultClause<'cx>,
    ) -> Result<&'cx ast::DefaultClause<'cx>, Self::Error> {
        self.lower_default_clause(n)
    }

    fn transform_expr(&mut self, expr: &'cx ast::Expr<'cx>) -> Result<&'cx ast::Expr<'cx>, Self::Error> {
        self.lower_expr(expr)
    }

    fn transform_assign_expr(
        &mut self,
        n: &'cx ast::AssignExpr<'cx>,
    ) -> Result<&'cx ast::AssignExpr<'cx>, Self::Error> {
        self.lower_assign(n)
    }

    fn transform_prefix_unary_expr(
        &mut self,
        n: &'cx ast::PrefixUnaryExpr<'cx>,
    ) -> Result<&'cx ast::PrefixUnaryExpr<'cx>, Self::Error> {
        self.lower_prefix_unary(n)
    }

    fn transform_ele_access_expr(
        &mut self,
        n: &'cx ast::EleAccessExpr<'cx>,
    ) -> Result<&'cx ast::EleAccessExpr<'cx>, Self::Error> {
        self.lower_ele_access(n)
    }

    fn transform_bin_expr(
        &mut self,
        n: &'cx ast::BinExpr<'cx>,
    ) -> Result<&'cx ast::BinExpr<'cx>, Self::Error> {
        self.lower_bin(n)
    }

    fn transform_cond_expr(
        &mut self,
        n: &'cx ast::CondExpr<'cx>,
    ) -> Result<&'cx ast::CondExpr<'cx>, Self::Error> {
        self.lower_cond(n)
    }

    fn transform_call_expr(
        &mut self,
        n: &'cx ast::CallExpr<'cx>,
    ) -> Result<&'cx ast::CallExpr<'cx>, Self::Error> {
        self.lower_call(n)
    }

    fn transform_arrow_fn_expr(
        &mut self,
        n: &'cx ast::ArrowFnExpr<'cx>,
    ) -> Result<&'cx ast::ArrowFnExpr<'cx>, Self::Error> {
        self.lower_arrow_fn(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qp_span::ModuleID;

    #[test]
    fn names_follow_source_positions() {
        assert_eq!(Linearizer::span_id(Span::new(16, 21, ModuleID::root())), "_20_5");
        assert_eq!(Linearizer::span_id(Span::new(0, 1, ModuleID::root())), "_0_1");
    }

    #[test]
    fn leftover_insertions_fail_the_block() {
        let arena = bumpalo::Bump::new();
        let mut atoms = AtomMap::new(4);
        let mut factory = NodeFactory::new(&arena, ModuleID::root());
        let config = NormalizedTraceConfig::default();
        let mut linearizer = Linearizer::new(&mut factory, &mut atoms, &config);

        let block = Span::new(4, 20, ModuleID::root());
        linearizer.state.insertions.push();
        assert!(linearizer.pop_insertions(block).is_ok());

        linearizer.state.insertions.push();
        let empty = linearizer.factory.create_empty_stmt(Span::new(6, 7, ModuleID::root()));
        let empty = linearizer.factory.stmt(ast::StmtKind::Empty(empty));
        linearizer.state.insertions.insert(empty);
        let Err(LinearizeError::PendingInsertions(err)) = linearizer.pop_insertions(block) else {
            panic!("a frame holding statements must not pop cleanly");
        };
        assert_eq!(err.span, block);
        assert_eq!(err.count, 1);
    }
}
