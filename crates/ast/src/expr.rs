use qp_atom::AtomId;

use super::*;

pub type Exprs<'cx> = &'cx [&'cx Expr<'cx>];

#[derive(Debug, Clone, Copy)]
pub struct Expr<'cx> {
    pub kind: ExprKind<'cx>,
}

#[derive(Debug, Clone, Copy)]
pub enum ExprKind<'cx> {
    Ident(&'cx Ident),
    NumLit(&'cx NumLit),
    StringLit(&'cx StringLit),
    BoolLit(&'cx BoolLit),
    NullLit(&'cx NullLit),
    This(&'cx ThisExpr),
    ArrayLit(&'cx ArrayLit<'cx>),
    ObjectLit(&'cx ObjectLit<'cx>),
    Fn(&'cx FnExpr<'cx>),
    ArrowFn(&'cx ArrowFnExpr<'cx>),
    Paren(&'cx ParenExpr<'cx>),
    Bin(&'cx BinExpr<'cx>),
    Assign(&'cx AssignExpr<'cx>),
    Cond(&'cx CondExpr<'cx>),
    Call(&'cx CallExpr<'cx>),
    New(&'cx NewExpr<'cx>),
    PropAccess(&'cx PropAccessExpr<'cx>),
    EleAccess(&'cx EleAccessExpr<'cx>),
    PrefixUnary(&'cx PrefixUnaryExpr<'cx>),
    PostfixUnary(&'cx PostfixUnaryExpr<'cx>),
}

impl<'cx> Expr<'cx> {
    pub fn span(&self) -> Span {
        use ExprKind::*;
        match self.kind {
            Ident(n) => n.span,
            NumLit(n) => n.span,
            StringLit(n) => n.span,
            BoolLit(n) => n.span,
            NullLit(n) => n.span,
            This(n) => n.span,
            ArrayLit(n) => n.span,
            ObjectLit(n) => n.span,
            Fn(n) => n.span,
            ArrowFn(n) => n.span,
            Paren(n) => n.span,
            Bin(n) => n.span,
            Assign(n) => n.span,
            Cond(n) => n.span,
            Call(n) => n.span,
            New(n) => n.span,
            PropAccess(n) => n.span,
            EleAccess(n) => n.span,
            PrefixUnary(n) => n.span,
            PostfixUnary(n) => n.span,
        }
    }

    pub fn id(&self) -> NodeID {
        use ExprKind::*;
        match self.kind {
            Ident(n) => n.id,
            NumLit(n) => n.id,
            StringLit(n) => n.id,
            BoolLit(n) => n.id,
            NullLit(n) => n.id,
            This(n) => n.id,
            ArrayLit(n) => n.id,
            ObjectLit(n) => n.id,
            Fn(n) => n.id,
            ArrowFn(n) => n.id,
            Paren(n) => n.id,
            Bin(n) => n.id,
            Assign(n) => n.id,
            Cond(n) => n.id,
            Call(n) => n.id,
            New(n) => n.id,
            PropAccess(n) => n.id,
            EleAccess(n) => n.id,
            PrefixUnary(n) => n.id,
            PostfixUnary(n) => n.id,
        }
    }

    /// Identifiers, literals and `this`: reading them twice is the same as
    /// reading them once.
    pub fn is_simple(&self) -> bool {
        use ExprKind::*;
        matches!(
            self.kind,
            Ident(_) | NumLit(_) | StringLit(_) | BoolLit(_) | NullLit(_) | This(_)
        )
    }

    pub fn as_ident(&self) -> Option<&'cx Ident> {
        match self.kind {
            ExprKind::Ident(ident) => Some(ident),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Ident {
    pub id: NodeID,
    pub span: Span,
    pub name: AtomId,
}

#[derive(Debug, Clone, Copy)]
pub struct Lit<T> {
    pub id: NodeID,
    pub val: T,
    pub span: Span,
}

pub type NumLit = Lit<f64>;
pub type BoolLit = Lit<bool>;
pub type NullLit = Lit<()>;
pub type StringLit = Lit<AtomId>;

#[derive(Debug, Clone, Copy)]
pub struct ThisExpr {
    pub id: NodeID,
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub struct ArrayLit<'cx> {
    pub id: NodeID,
    pub span: Span,
    pub elems: Exprs<'cx>,
}

pub type ObjectMembers<'cx> = &'cx [&'cx ObjectMember<'cx>];

#[derive(Debug, Clone, Copy)]
pub struct ObjectLit<'cx> {
    pub id: NodeID,
    pub span: Span,
    pub members: ObjectMembers<'cx>,
}

#[derive(Debug, Clone, Copy)]
pub struct ObjectMember<'cx> {
    pub kind: ObjectMemberKind<'cx>,
}

#[derive(Debug, Clone, Copy)]
pub enum ObjectMemberKind<'cx> {
    Prop(&'cx ObjectPropMember<'cx>),
    Getter(&'cx GetterDecl<'cx>),
    Setter(&'cx SetterDecl<'cx>),
}

/// Keys of object literal members. Never a reference.
#[derive(Debug, Clone, Copy)]
pub enum PropName<'cx> {
    Ident(&'cx Ident),
    StringLit(&'cx StringLit),
    NumLit(&'cx NumLit),
}

#[derive(Debug, Clone, Copy)]
pub struct ObjectPropMember<'cx> {
    pub id: NodeID,
    pub span: Span,
    pub name: PropName<'cx>,
    pub init: &'cx Expr<'cx>,
}

/// ```txt
/// { get name() { ... } }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct GetterDecl<'cx> {
    pub id: NodeID,
    pub span: Span,
    pub name: PropName<'cx>,
    pub body: &'cx BlockStmt<'cx>,
}

/// ```txt
/// { set name(param) { ... } }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SetterDecl<'cx> {
    pub id: NodeID,
    pub span: Span,
    pub name: PropName<'cx>,
    pub param: &'cx ParamDecl<'cx>,
    pub body: &'cx BlockStmt<'cx>,
}

#[derive(Debug, Clone, Copy)]
pub struct FnExpr<'cx> {
    pub id: NodeID,
    pub span: Span,
    pub name: Option<&'cx Ident>,
    pub params: ParamsDecl<'cx>,
    pub body: &'cx BlockStmt<'cx>,
}

#[derive(Debug, Clone, Copy)]
pub enum ArrowFnExprBody<'cx> {
    Block(&'cx BlockStmt<'cx>),
    Expr(&'cx Expr<'cx>),
}

#[derive(Debug, Clone, Copy)]
pub struct ArrowFnExpr<'cx> {
    pub id: NodeID,
    pub span: Span,
    pub params: ParamsDecl<'cx>,
    pub body: ArrowFnExprBody<'cx>,
}

#[derive(Debug, Clone, Copy)]
pub struct ParenExpr<'cx> {
    pub id: NodeID,
    pub span: Span,
    pub expr: &'cx Expr<'cx>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BinOpKind {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Exp,
    Less,
    LessEq,
    Great,
    GreatEq,
    Shl,
    Shr,
    UShr,
    BitOr,
    BitAnd,
    BitXor,
    LogicalOr,
    LogicalAnd,
    EqEq,
    EqEqEq,
    NEq,
    NEqEq,
    Instanceof,
    In,
    Comma,
}

impl BinOpKind {
    pub fn as_str(self) -> &'static str {
        use BinOpKind::*;
        match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Mod => "%",
            Exp => "**",
            Less => "<",
            LessEq => "<=",
            Great => ">",
            GreatEq => ">=",
            Shl => "<<",
            Shr => ">>",
            UShr => ">>>",
            BitOr => "|",
            BitAnd => "&",
            BitXor => "^",
            LogicalOr => "||",
            LogicalAnd => "&&",
            EqEq => "==",
            EqEqEq => "===",
            NEq => "!=",
            NEqEq => "!==",
            Instanceof => "instanceof",
            In => "in",
            Comma => ",",
        }
    }

    /// The right operand only runs for some values of the left one.
    pub fn is_short_circuit(self) -> bool {
        matches!(self, Self::LogicalOr | Self::LogicalAnd)
    }
}

impl std::fmt::Display for BinOpKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BinExpr<'cx> {
    pub id: NodeID,
    pub left: &'cx Expr<'cx>,
    pub op: BinOpKind,
    pub right: &'cx Expr<'cx>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AssignOp {
    Eq,
    AddEq,
    SubEq,
    MulEq,
    DivEq,
    ModEq,
    ShlEq,
    ShrEq,
    UShrEq,
    BitAndEq,
    BitXorEq,
    BitOrEq,
}

impl AssignOp {
    pub fn as_str(self) -> &'static str {
        use AssignOp::*;
        match self {
            Eq => "=",
            AddEq => "+=",
            SubEq => "-=",
            MulEq => "*=",
            DivEq => "/=",
            ModEq => "%=",
            ShlEq => "<<=",
            ShrEq => ">>=",
            UShrEq => ">>>=",
            BitAndEq => "&=",
            BitXorEq => "^=",
            BitOrEq => "|=",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AssignExpr<'cx> {
    pub id: NodeID,
    pub span: Span,
    pub left: &'cx Expr<'cx>,
    pub op: AssignOp,
    pub right: &'cx Expr<'cx>,
}

#[derive(Debug, Clone, Copy)]
pub struct CondExpr<'cx> {
    pub id: NodeID,
    pub span: Span,
    pub cond: &'cx Expr<'cx>,
    pub when_true: &'cx Expr<'cx>,
    pub when_false: &'cx Expr<'cx>,
}

#[derive(Debug, Clone, Copy)]
pub struct CallExpr<'cx> {
    pub id: NodeID,
    pub span: Span,
    pub expr: &'cx Expr<'cx>,
    pub args: Exprs<'cx>,
}

#[derive(Debug, Clone, Copy)]
pub struct NewExpr<'cx> {
    pub id: NodeID,
    pub span: Span,
    pub expr: &'cx Expr<'cx>,
    /// `None` for `new Foo`
    pub args: Option<Exprs<'cx>>,
}

/// ```txt
/// obj.name
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PropAccessExpr<'cx> {
    pub id: NodeID,
    pub span: Span,
    pub expr: &'cx Expr<'cx>,
    pub name: &'cx Ident,
}

/// ```txt
/// obj[arg]
/// ```
#[derive(Debug, Clone, Copy)]
pub struct EleAccessExpr<'cx> {
    pub id: NodeID,
    pub span: Span,
    pub expr: &'cx Expr<'cx>,
    pub arg: &'cx Expr<'cx>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrefixUnaryOp {
    Plus,
    Minus,
    PlusPlus,
    MinusMinus,
    Tilde,
    Excl,
    Typeof,
    Void,
    Delete,
}

impl PrefixUnaryOp {
    pub fn as_str(self) -> &'static str {
        use PrefixUnaryOp::*;
        match self {
            Plus => "+",
            Minus => "-",
            PlusPlus => "++",
            MinusMinus => "--",
            Tilde => "~",
            Excl => "!",
            Typeof => "typeof",
            Void => "void",
            Delete => "delete",
        }
    }

    /// `++x`, `--x` and `delete x` write through their operand.
    pub fn writes_operand(self) -> bool {
        use PrefixUnaryOp::*;
        matches!(self, PlusPlus | MinusMinus | Delete)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PrefixUnaryExpr<'cx> {
    pub id: NodeID,
    pub span: Span,
    pub op: PrefixUnaryOp,
    pub expr: &'cx Expr<'cx>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PostfixUnaryOp {
    PlusPlus,
    MinusMinus,
}

impl PostfixUnaryOp {
    pub fn as_str(self) -> &'static str {
        use PostfixUnaryOp::*;
        match self {
            PlusPlus => "++",
            MinusMinus => "--",
        }
    }

    pub fn into_prefix(self) -> PrefixUnaryOp {
        match self {
            PostfixUnaryOp::PlusPlus => PrefixUnaryOp::PlusPlus,
            PostfixUnaryOp::MinusMinus => PrefixUnaryOp::MinusMinus,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PostfixUnaryExpr<'cx> {
    pub id: NodeID,
    pub span: Span,
    pub op: PostfixUnaryOp,
    pub expr: &'cx Expr<'cx>,
}
