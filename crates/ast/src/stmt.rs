use super::*;

pub type Stmts<'cx> = &'cx [&'cx Stmt<'cx>];

#[derive(Debug, Clone, Copy)]
pub struct Stmt<'cx> {
    pub kind: StmtKind<'cx>,
}

#[derive(Debug, Clone, Copy)]
pub enum StmtKind<'cx> {
    Empty(&'cx EmptyStmt),
    Var(&'cx VarStmt<'cx>),
    Expr(&'cx ExprStmt<'cx>),
    If(&'cx IfStmt<'cx>),
    Block(&'cx BlockStmt<'cx>),
    While(&'cx WhileStmt<'cx>),
    Do(&'cx DoStmt<'cx>),
    For(&'cx ForStmt<'cx>),
    ForIn(&'cx ForInStmt<'cx>),
    Break(&'cx BreakStmt<'cx>),
    Continue(&'cx ContinueStmt<'cx>),
    Ret(&'cx RetStmt<'cx>),
    Throw(&'cx ThrowStmt<'cx>),
    Try(&'cx TryStmt<'cx>),
    Switch(&'cx SwitchStmt<'cx>),
    Labeled(&'cx LabeledStmt<'cx>),
    Fn(&'cx FnDecl<'cx>),
}

impl Stmt<'_> {
    pub fn id(&self) -> NodeID {
        use StmtKind::*;
        match self.kind {
            Empty(n) => n.id,
            Var(n) => n.id,
            Expr(n) => n.id,
            If(n) => n.id,
            Block(n) => n.id,
            While(n) => n.id,
            Do(n) => n.id,
            For(n) => n.id,
            ForIn(n) => n.id,
            Break(n) => n.id,
            Continue(n) => n.id,
            Ret(n) => n.id,
            Throw(n) => n.id,
            Try(n) => n.id,
            Switch(n) => n.id,
            Labeled(n) => n.id,
            Fn(n) => n.id,
        }
    }

    pub fn span(&self) -> Span {
        use StmtKind::*;
        match self.kind {
            Empty(n) => n.span,
            Var(n) => n.span,
            Expr(n) => n.span,
            If(n) => n.span,
            Block(n) => n.span,
            While(n) => n.span,
            Do(n) => n.span,
            For(n) => n.span,
            ForIn(n) => n.span,
            Break(n) => n.span,
            Continue(n) => n.span,
            Ret(n) => n.span,
            Throw(n) => n.span,
            Try(n) => n.span,
            Switch(n) => n.span,
            Labeled(n) => n.span,
            Fn(n) => n.span,
        }
    }

    /// Loops are the only statements an unlabeled `continue` may target.
    pub fn is_iteration(&self) -> bool {
        use StmtKind::*;
        matches!(self.kind, While(_) | Do(_) | For(_) | ForIn(_))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EmptyStmt {
    pub id: NodeID,
    pub span: Span,
}

pub type VarDecls<'cx> = &'cx [&'cx VarDecl<'cx>];

#[derive(Debug, Clone, Copy)]
pub struct VarStmt<'cx> {
    pub id: NodeID,
    pub span: Span,
    pub list: VarDecls<'cx>,
}

#[derive(Debug, Clone, Copy)]
pub struct VarDecl<'cx> {
    pub id: NodeID,
    pub span: Span,
    pub name: &'cx Ident,
    pub init: Option<&'cx Expr<'cx>>,
}

#[derive(Debug, Clone, Copy)]
pub struct ExprStmt<'cx> {
    pub id: NodeID,
    pub span: Span,
    pub expr: &'cx Expr<'cx>,
}

#[derive(Debug, Clone, Copy)]
pub struct IfStmt<'cx> {
    pub id: NodeID,
    pub span: Span,
    pub expr: &'cx Expr<'cx>,
    pub then: &'cx Stmt<'cx>,
    pub else_then: Option<&'cx Stmt<'cx>>,
}

#[derive(Debug, Clone, Copy)]
pub struct BlockStmt<'cx> {
    pub id: NodeID,
    pub span: Span,
    pub stmts: Stmts<'cx>,
}

#[derive(Debug, Clone, Copy)]
pub struct WhileStmt<'cx> {
    pub id: NodeID,
    pub span: Span,
    pub expr: &'cx Expr<'cx>,
    pub stmt: &'cx Stmt<'cx>,
}

#[derive(Debug, Clone, Copy)]
pub struct DoStmt<'cx> {
    pub id: NodeID,
    pub span: Span,
    pub stmt: &'cx Stmt<'cx>,
    pub expr: &'cx Expr<'cx>,
}

#[derive(Debug, Clone, Copy)]
pub struct ForStmt<'cx> {
    pub id: NodeID,
    pub span: Span,
    pub init: Option<ForInitKind<'cx>>,
    pub cond: Option<&'cx Expr<'cx>>,
    pub incr: Option<&'cx Expr<'cx>>,
    pub body: &'cx Stmt<'cx>,
}

#[derive(Debug, Clone, Copy)]
pub enum ForInitKind<'cx> {
    Var(&'cx VarStmt<'cx>),
    Expr(&'cx Expr<'cx>),
}

/// ```txt
/// for (init in expr) body
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ForInStmt<'cx> {
    pub id: NodeID,
    pub span: Span,
    pub init: ForInitKind<'cx>,
    pub expr: &'cx Expr<'cx>,
    pub body: &'cx Stmt<'cx>,
}

#[derive(Debug, Clone, Copy)]
pub struct BreakStmt<'cx> {
    pub id: NodeID,
    pub span: Span,
    pub label: Option<&'cx Ident>,
}

#[derive(Debug, Clone, Copy)]
pub struct ContinueStmt<'cx> {
    pub id: NodeID,
    pub span: Span,
    pub label: Option<&'cx Ident>,
}

#[derive(Debug, Clone, Copy)]
pub struct RetStmt<'cx> {
    pub id: NodeID,
    pub span: Span,
    pub expr: Option<&'cx Expr<'cx>>,
}

#[derive(Debug, Clone, Copy)]
pub struct ThrowStmt<'cx> {
    pub id: NodeID,
    pub span: Span,
    pub expr: &'cx Expr<'cx>,
}

#[derive(Debug, Clone, Copy)]
pub struct TryStmt<'cx> {
    pub id: NodeID,
    pub span: Span,
    pub try_block: &'cx BlockStmt<'cx>,
    pub catch_clause: Option<&'cx CatchClause<'cx>>,
    pub finally_block: Option<&'cx BlockStmt<'cx>>,
}

#[derive(Debug, Clone, Copy)]
pub struct CatchClause<'cx> {
    pub id: NodeID,
    pub span: Span,
    /// `None` for `catch { ... }`
    pub var: Option<&'cx Ident>,
    pub block: &'cx BlockStmt<'cx>,
}

#[derive(Debug, Clone, Copy)]
pub struct SwitchStmt<'cx> {
    pub id: NodeID,
    pub span: Span,
    pub expr: &'cx Expr<'cx>,
    pub case_block: &'cx CaseBlock<'cx>,
}

#[derive(Debug, Clone, Copy)]
pub struct CaseBlock<'cx> {
    pub id: NodeID,
    pub span: Span,
    pub clauses: &'cx [CaseOrDefaultClause<'cx>],
}

#[derive(Debug, Clone, Copy)]
pub enum CaseOrDefaultClause<'cx> {
    Case(&'cx CaseClause<'cx>),
    Default(&'cx DefaultClause<'cx>),
}

#[derive(Debug, Clone, Copy)]
pub struct CaseClause<'cx> {
    pub id: NodeID,
    pub span: Span,
    pub expr: &'cx Expr<'cx>,
    pub stmts: Stmts<'cx>,
}

#[derive(Debug, Clone, Copy)]
pub struct DefaultClause<'cx> {
    pub id: NodeID,
    pub span: Span,
    pub stmts: Stmts<'cx>,
}

#[derive(Debug, Clone, Copy)]
pub struct LabeledStmt<'cx> {
    pub id: NodeID,
    pub span: Span,
    pub label: &'cx Ident,
    pub stmt: &'cx Stmt<'cx>,
}

pub type ParamsDecl<'cx> = &'cx [&'cx ParamDecl<'cx>];

#[derive(Debug, Clone, Copy)]
pub struct ParamDecl<'cx> {
    pub id: NodeID,
    pub span: Span,
    pub name: &'cx Ident,
}

#[derive(Debug, Clone, Copy)]
pub struct FnDecl<'cx> {
    pub id: NodeID,
    pub span: Span,
    pub name: &'cx Ident,
    pub params: ParamsDecl<'cx>,
    pub body: &'cx BlockStmt<'cx>,
}
