use bumpalo::Bump;
use qp_atom::AtomId;
use qp_span::{ModuleID, Span};

use super::*;

/// Allocates nodes into the arena and hands out ids.
///
/// The same factory should build the input tree and every tree derived from
/// it, so ids stay unique across all of them.
pub struct NodeFactory<'cx> {
    arena: &'cx Bump,
    next_id: NodeID,
}

impl<'cx> NodeFactory<'cx> {
    pub fn new(arena: &'cx Bump, module: ModuleID) -> Self {
        Self {
            arena,
            next_id: NodeID::root(module),
        }
    }

    #[inline(always)]
    pub fn arena(&self) -> &'cx Bump {
        self.arena
    }

    #[inline(always)]
    pub fn module(&self) -> ModuleID {
        self.next_id.module()
    }

    #[inline(always)]
    pub fn next_node_id(&mut self) -> NodeID {
        let old = self.next_id;
        self.next_id = self.next_id.next();
        old
    }

    #[inline(always)]
    pub fn alloc<T>(&self, t: T) -> &'cx T {
        self.arena.alloc(t)
    }

    #[inline(always)]
    pub fn alloc_slice<T: Copy>(&self, items: &[T]) -> &'cx [T] {
        self.arena.alloc_slice_copy(items)
    }

    #[inline(always)]
    pub fn expr(&self, kind: ExprKind<'cx>) -> &'cx Expr<'cx> {
        self.alloc(Expr { kind })
    }

    #[inline(always)]
    pub fn stmt(&self, kind: StmtKind<'cx>) -> &'cx Stmt<'cx> {
        self.alloc(Stmt { kind })
    }

    pub fn create_program(&mut self, stmts: Stmts<'cx>, span: Span) -> &'cx Program<'cx> {
        let id = self.next_node_id();
        self.alloc(Program { id, span, stmts })
    }

    // ===== expressions =====

    pub fn create_ident(&mut self, name: AtomId, span: Span) -> &'cx Ident {
        let id = self.next_node_id();
        self.alloc(Ident { id, span, name })
    }

    pub fn create_ident_expr(&mut self, name: AtomId, span: Span) -> &'cx Expr<'cx> {
        let ident = self.create_ident(name, span);
        self.expr(ExprKind::Ident(ident))
    }

    pub fn create_num_lit(&mut self, val: f64, span: Span) -> &'cx NumLit {
        let id = self.next_node_id();
        self.alloc(NumLit { id, val, span })
    }

    pub fn create_string_lit(&mut self, val: AtomId, span: Span) -> &'cx StringLit {
        let id = self.next_node_id();
        self.alloc(StringLit { id, val, span })
    }

    pub fn create_bool_lit(&mut self, val: bool, span: Span) -> &'cx BoolLit {
        let id = self.next_node_id();
        self.alloc(BoolLit { id, val, span })
    }

    pub fn create_null_lit(&mut self, span: Span) -> &'cx NullLit {
        let id = self.next_node_id();
        self.alloc(NullLit { id, val: (), span })
    }

    pub fn create_this_expr(&mut self, span: Span) -> &'cx ThisExpr {
        let id = self.next_node_id();
        self.alloc(ThisExpr { id, span })
    }

    pub fn create_array_lit(&mut self, elems: Exprs<'cx>, span: Span) -> &'cx ArrayLit<'cx> {
        let id = self.next_node_id();
        self.alloc(ArrayLit { id, span, elems })
    }

    pub fn create_object_lit(
        &mut self,
        members: ObjectMembers<'cx>,
        span: Span,
    ) -> &'cx ObjectLit<'cx> {
        let id = self.next_node_id();
        self.alloc(ObjectLit { id, span, members })
    }

    pub fn create_object_prop_member(
        &mut self,
        name: PropName<'cx>,
        init: &'cx Expr<'cx>,
        span: Span,
    ) -> &'cx ObjectMember<'cx> {
        let id = self.next_node_id();
        let prop = self.alloc(ObjectPropMember {
            id,
            span,
            name,
            init,
        });
        self.alloc(ObjectMember {
            kind: ObjectMemberKind::Prop(prop),
        })
    }

    pub fn create_getter_decl(
        &mut self,
        name: PropName<'cx>,
        body: &'cx BlockStmt<'cx>,
        span: Span,
    ) -> &'cx ObjectMember<'cx> {
        let id = self.next_node_id();
        let getter = self.alloc(GetterDecl {
            id,
            span,
            name,
            body,
        });
        self.alloc(ObjectMember {
            kind: ObjectMemberKind::Getter(getter),
        })
    }

    pub fn create_setter_decl(
        &mut self,
        name: PropName<'cx>,
        param: &'cx ParamDecl<'cx>,
        body: &'cx BlockStmt<'cx>,
        span: Span,
    ) -> &'cx ObjectMember<'cx> {
        let id = self.next_node_id();
        let setter = self.alloc(SetterDecl {
            id,
            span,
            name,
            param,
            body,
        });
        self.alloc(ObjectMember {
            kind: ObjectMemberKind::Setter(setter),
        })
    }

    pub fn create_fn_expr(
        &mut self,
        name: Option<&'cx Ident>,
        params: ParamsDecl<'cx>,
        body: &'cx BlockStmt<'cx>,
        span: Span,
    ) -> &'cx FnExpr<'cx> {
        let id = self.next_node_id();
        self.alloc(FnExpr {
            id,
            span,
            name,
            params,
            body,
        })
    }

    pub fn create_arrow_fn_expr(
        &mut self,
        params: ParamsDecl<'cx>,
        body: ArrowFnExprBody<'cx>,
        span: Span,
    ) -> &'cx ArrowFnExpr<'cx> {
        let id = self.next_node_id();
        self.alloc(ArrowFnExpr {
            id,
            span,
            params,
            body,
        })
    }

    pub fn create_paren_expr(&mut self, expr: &'cx Expr<'cx>, span: Span) -> &'cx ParenExpr<'cx> {
        let id = self.next_node_id();
        self.alloc(ParenExpr { id, span, expr })
    }

    pub fn create_bin_expr(
        &mut self,
        left: &'cx Expr<'cx>,
        op: BinOpKind,
        right: &'cx Expr<'cx>,
        span: Span,
    ) -> &'cx BinExpr<'cx> {
        let id = self.next_node_id();
        self.alloc(BinExpr {
            id,
            left,
            op,
            right,
            span,
        })
    }

    pub fn create_assign_expr(
        &mut self,
        left: &'cx Expr<'cx>,
        op: AssignOp,
        right: &'cx Expr<'cx>,
        span: Span,
    ) -> &'cx AssignExpr<'cx> {
        let id = self.next_node_id();
        self.alloc(AssignExpr {
            id,
            span,
            left,
            op,
            right,
        })
    }

    pub fn create_cond_expr(
        &mut self,
        cond: &'cx Expr<'cx>,
        when_true: &'cx Expr<'cx>,
        when_false: &'cx Expr<'cx>,
        span: Span,
    ) -> &'cx CondExpr<'cx> {
        let id = self.next_node_id();
        self.alloc(CondExpr {
            id,
            span,
            cond,
            when_true,
            when_false,
        })
    }

    pub fn create_call_expr(
        &mut self,
        expr: &'cx Expr<'cx>,
        args: Exprs<'cx>,
        span: Span,
    ) -> &'cx CallExpr<'cx> {
        let id = self.next_node_id();
        self.alloc(CallExpr {
            id,
            span,
            expr,
            args,
        })
    }

    pub fn create_new_expr(
        &mut self,
        expr: &'cx Expr<'cx>,
        args: Option<Exprs<'cx>>,
        span: Span,
    ) -> &'cx NewExpr<'cx> {
        let id = self.next_node_id();
        self.alloc(NewExpr {
            id,
            span,
            expr,
            args,
        })
    }

    pub fn create_prop_access_expr(
        &mut self,
        expr: &'cx Expr<'cx>,
        name: &'cx Ident,
        span: Span,
    ) -> &'cx PropAccessExpr<'cx> {
        let id = self.next_node_id();
        self.alloc(PropAccessExpr {
            id,
            span,
            expr,
            name,
        })
    }

    pub fn create_ele_access_expr(
        &mut self,
        expr: &'cx Expr<'cx>,
        arg: &'cx Expr<'cx>,
        span: Span,
    ) -> &'cx EleAccessExpr<'cx> {
        let id = self.next_node_id();
        self.alloc(EleAccessExpr { id, span, expr, arg })
    }

    pub fn create_prefix_unary_expr(
        &mut self,
        op: PrefixUnaryOp,
        expr: &'cx Expr<'cx>,
        span: Span,
    ) -> &'cx PrefixUnaryExpr<'cx> {
        let id = self.next_node_id();
        self.alloc(PrefixUnaryExpr { id, span, op, expr })
    }

    pub fn create_postfix_unary_expr(
        &mut self,
        op: PostfixUnaryOp,
        expr: &'cx Expr<'cx>,
        span: Span,
    ) -> &'cx PostfixUnaryExpr<'cx> {
        let id = self.next_node_id();
        self.alloc(PostfixUnaryExpr { id, span, op, expr })
    }

    // ===== statements =====

    pub fn create_empty_stmt(&mut self, span: Span) -> &'cx EmptyStmt {
        let id = self.next_node_id();
        self.alloc(EmptyStmt { id, span })
    }

    pub fn create_var_decl(
        &mut self,
        name: &'cx Ident,
        init: Option<&'cx Expr<'cx>>,
        span: Span,
    ) -> &'cx VarDecl<'cx> {
        let id = self.next_node_id();
        self.alloc(VarDecl {
            id,
            span,
            name,
            init,
        })
    }

    pub fn create_var_stmt(&mut self, list: VarDecls<'cx>, span: Span) -> &'cx VarStmt<'cx> {
        let id = self.next_node_id();
        self.alloc(VarStmt { id, span, list })
    }

    pub fn create_expr_stmt(&mut self, expr: &'cx Expr<'cx>, span: Span) -> &'cx ExprStmt<'cx> {
        let id = self.next_node_id();
        self.alloc(ExprStmt { id, span, expr })
    }

    pub fn create_if_stmt(
        &mut self,
        expr: &'cx Expr<'cx>,
        then: &'cx Stmt<'cx>,
        else_then: Option<&'cx Stmt<'cx>>,
        span: Span,
    ) -> &'cx IfStmt<'cx> {
        let id = self.next_node_id();
        self.alloc(IfStmt {
            id,
            span,
            expr,
            then,
            else_then,
        })
    }

    pub fn create_block_stmt(&mut self, stmts: Stmts<'cx>, span: Span) -> &'cx BlockStmt<'cx> {
        let id = self.next_node_id();
        self.alloc(BlockStmt { id, span, stmts })
    }

    pub fn create_while_stmt(
        &mut self,
        expr: &'cx Expr<'cx>,
        stmt: &'cx Stmt<'cx>,
        span: Span,
    ) -> &'cx WhileStmt<'cx> {
        let id = self.next_node_id();
        self.alloc(WhileStmt {
            id,
            span,
            expr,
            stmt,
        })
    }

    pub fn create_do_stmt(
        &mut self,
        stmt: &'cx Stmt<'cx>,
        expr: &'cx Expr<'cx>,
        span: Span,
    ) -> &'cx DoStmt<'cx> {
        let id = self.next_node_id();
        self.alloc(DoStmt {
            id,
            span,
            stmt,
            expr,
        })
    }

    pub fn create_for_stmt(
        &mut self,
        init: Option<ForInitKind<'cx>>,
        cond: Option<&'cx Expr<'cx>>,
        incr: Option<&'cx Expr<'cx>>,
        body: &'cx Stmt<'cx>,
        span: Span,
    ) -> &'cx ForStmt<'cx> {
        let id = self.next_node_id();
        self.alloc(ForStmt {
            id,
            span,
            init,
            cond,
            incr,
            body,
        })
    }

    pub fn create_for_in_stmt(
        &mut self,
        init: ForInitKind<'cx>,
        expr: &'cx Expr<'cx>,
        body: &'cx Stmt<'cx>,
        span: Span,
    ) -> &'cx ForInStmt<'cx> {
        let id = self.next_node_id();
        self.alloc(ForInStmt {
            id,
            span,
            init,
            expr,
            body,
        })
    }

    pub fn create_break_stmt(&mut self, label: Option<&'cx Ident>, span: Span) -> &'cx BreakStmt<'cx> {
        let id = self.next_node_id();
        self.alloc(BreakStmt { id, span, label })
    }

    pub fn create_continue_stmt(
        &mut self,
        label: Option<&'cx Ident>,
        span: Span,
    ) -> &'cx ContinueStmt<'cx> {
        let id = self.next_node_id();
        self.alloc(ContinueStmt { id, span, label })
    }

    pub fn create_ret_stmt(&mut self, expr: Option<&'cx Expr<'cx>>, span: Span) -> &'cx RetStmt<'cx> {
        let id = self.next_node_id();
        self.alloc(RetStmt { id, span, expr })
    }

    pub fn create_throw_stmt(&mut self, expr: &'cx Expr<'cx>, span: Span) -> &'cx ThrowStmt<'cx> {
        let id = self.next_node_id();
        self.alloc(ThrowStmt { id, span, expr })
    }

    pub fn create_try_stmt(
        &mut self,
        try_block: &'cx BlockStmt<'cx>,
        catch_clause: Option<&'cx CatchClause<'cx>>,
        finally_block: Option<&'cx BlockStmt<'cx>>,
        span: Span,
    ) -> &'cx TryStmt<'cx> {
        let id = self.next_node_id();
        self.alloc(TryStmt {
            id,
            span,
            try_block,
            catch_clause,
            finally_block,
        })
    }

    pub fn create_catch_clause(
        &mut self,
        var: Option<&'cx Ident>,
        block: &'cx BlockStmt<'cx>,
        span: Span,
    ) -> &'cx CatchClause<'cx> {
        let id = self.next_node_id();
        self.alloc(CatchClause {
            id,
            span,
            var,
            block,
        })
    }

    pub fn create_switch_stmt(
        &mut self,
        expr: &'cx Expr<'cx>,
        clauses: &'cx [CaseOrDefaultClause<'cx>],
        span: Span,
    ) -> &'cx SwitchStmt<'cx> {
        let id = self.next_node_id();
        let block_id = self.next_node_id();
        let case_block = self.alloc(CaseBlock {
            id: block_id,
            span,
            clauses,
        });
        self.alloc(SwitchStmt {
            id,
            span,
            expr,
            case_block,
        })
    }

    pub fn create_case_clause(
        &mut self,
        expr: &'cx Expr<'cx>,
        stmts: Stmts<'cx>,
        span: Span,
    ) -> &'cx CaseClause<'cx> {
        let id = self.next_node_id();
        self.alloc(CaseClause {
            id,
            span,
            expr,
            stmts,
        })
    }

    pub fn create_default_clause(&mut self, stmts: Stmts<'cx>, span: Span) -> &'cx DefaultClause<'cx> {
        let id = self.next_node_id();
        self.alloc(DefaultClause { id, span, stmts })
    }

    pub fn create_labeled_stmt(
        &mut self,
        label: &'cx Ident,
        stmt: &'cx Stmt<'cx>,
        span: Span,
    ) -> &'cx LabeledStmt<'cx> {
        let id = self.next_node_id();
        self.alloc(LabeledStmt {
            id,
            span,
            label,
            stmt,
        })
    }

    pub fn create_param_decl(&mut self, name: &'cx Ident, span: Span) -> &'cx ParamDecl<'cx> {
        let id = self.next_node_id();
        self.alloc(ParamDecl { id, span, name })
    }

    pub fn create_fn_decl(
        &mut self,
        name: &'cx Ident,
        params: ParamsDecl<'cx>,
        body: &'cx BlockStmt<'cx>,
        span: Span,
    ) -> &'cx FnDecl<'cx> {
        let id = self.next_node_id();
        self.alloc(FnDecl {
            id,
            span,
            name,
            params,
            body,
        })
    }
}
