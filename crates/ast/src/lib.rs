mod expr;
mod factory;
pub mod keyword;
mod node;
mod pprint;
mod stmt;

pub mod transformer;
pub mod visitor;

pub use expr::*;
pub use factory::NodeFactory;
pub use pprint::*;
pub use stmt::*;
pub use transformer::Transformer;
pub use visitor::Visitor;

pub use node::NodeID;
use qp_span::Span;

#[derive(Debug, Clone, Copy)]
pub struct Program<'cx> {
    pub id: NodeID,
    pub span: Span,
    pub stmts: Stmts<'cx>,
}
