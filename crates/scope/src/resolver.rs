use std::borrow::Cow;

use indexmap::map::Entry;
use qp_ast::{self as ast, Visitor, keyword, visitor};
use qp_atom::{AtomId, AtomMap};
use qp_config::{NormalizedTraceConfig, RedeclarationPolicy};

use super::errors::Redeclaration;
use super::hoist::HoistedNames;
use super::{Declaration, ScopeID, ScopeKind, ScopeTree};

pub(crate) struct Resolver<'a, 'cx> {
    atoms: &'a mut AtomMap<'cx>,
    config: &'a NormalizedTraceConfig,
    /// `None` until the program scope exists.
    scope_id: Option<ScopeID>,
    pub(crate) tree: ScopeTree,
}

impl<'a, 'cx> Resolver<'a, 'cx> {
    pub(crate) fn new(atoms: &'a mut AtomMap<'cx>, config: &'a NormalizedTraceConfig) -> Self {
        Self {
            atoms,
            config,
            scope_id: None,
            tree: ScopeTree::default(),
        }
    }

    fn enter(&mut self, node: ast::NodeID, kind: ScopeKind) -> Option<ScopeID> {
        let old = self.scope_id;
        let id = self.tree.new_scope(old, node, kind);
        tracing::debug!(scope = id.as_u32(), ?kind, %node, "enter scope");
        self.scope_id = Some(id);
        old
    }

    fn leave(&mut self, old: Option<ScopeID>) {
        self.scope_id = old;
    }

    fn declare(&mut self, name: AtomId, decl: Declaration) {
        let Some(scope_id) = self.scope_id else {
            return;
        };
        let scope = &mut self.tree.scopes[scope_id.as_usize()];
        match scope.declarations.entry(name) {
            Entry::Vacant(entry) => {
                entry.insert(decl);
                if let Declaration::Node { id, .. } = decl {
                    self.tree.decl_scope.entry(id).or_insert(scope_id);
                }
            }
            Entry::Occupied(entry) => {
                let first = *entry.get();
                let (
                    Declaration::Node {
                        id: first_id,
                        span: original_span,
                    },
                    Declaration::Node { id, span },
                ) = (first, decl)
                else {
                    return;
                };
                if first_id == id {
                    return;
                }
                tracing::debug!(name = self.atoms.get(name), %span, "redeclared");
                if *self.config.redeclaration() == RedeclarationPolicy::Report {
                    let error = Redeclaration {
                        span,
                        name: self.atoms.get(name).to_string(),
                        original_span,
                    };
                    self.tree.diags.push(qp_errors::Diag::new(error));
                }
            }
        }
    }

    fn declare_ident(&mut self, ident: &'cx ast::Ident) {
        self.declare(
            ident.name,
            Declaration::Node {
                id: ident.id,
                span: ident.span,
            },
        );
    }

    fn declare_arguments(&mut self) {
        self.atoms.insert_if_not_exist(keyword::IDENT_ARGUMENTS, || {
            Cow::Borrowed(keyword::IDENT_ARGUMENTS_STR)
        });
        self.declare(keyword::IDENT_ARGUMENTS, Declaration::Implicit);
    }

    fn declare_hoisted(&mut self, stmts: ast::Stmts<'cx>) {
        if !self.config.hoist_declarations() {
            return;
        }
        for name in HoistedNames::of_stmts(stmts).names {
            self.declare_ident(name);
        }
    }

    fn resolve(&mut self, ident: &'cx ast::Ident) {
        let Some(scope_id) = self.scope_id else {
            return;
        };
        match self.tree.lookup(scope_id, ident.name) {
            Some((_, Declaration::Node { id, .. })) => {
                tracing::debug!(name = self.atoms.get(ident.name), reference = %ident.id, decl = %id, "bind");
                self.tree.resolved.insert(ident.id, id);
                self.tree.references.entry(id).or_default().push(ident.id);
            }
            Some((_, Declaration::Implicit)) | None => {
                tracing::debug!(name = self.atoms.get(ident.name), reference = %ident.id, "unbound");
            }
        }
    }

    fn fn_like(
        &mut self,
        node: ast::NodeID,
        kind: ScopeKind,
        name: Option<&'cx ast::Ident>,
        params: ast::ParamsDecl<'cx>,
        body: &'cx ast::BlockStmt<'cx>,
    ) {
        let old = self.enter(node, kind);
        if let Some(name) = name {
            self.declare_ident(name);
        }
        self.declare_arguments();
        for param in params {
            self.visit_param_decl(param);
        }
        self.declare_hoisted(body.stmts);
        self.visit_block_stmt(body);
        self.leave(old);
    }
}

impl<'cx> Visitor<'cx> for Resolver<'_, 'cx> {
    fn visit_program(&mut self, program: &'cx ast::Program<'cx>) {
        let old = self.enter(program.id, ScopeKind::Program);
        let config = self.config;
        for global in config.globals() {
            let name = self.atoms.insert_by_str(Cow::Owned(global.clone()));
            self.declare(name, Declaration::Implicit);
        }
        self.declare_hoisted(program.stmts);
        visitor::visit_program(self, program);
        self.leave(old);
    }

    fn visit_var_decl(&mut self, decl: &'cx ast::VarDecl<'cx>) {
        self.declare_ident(decl.name);
        visitor::visit_var_decl(self, decl);
    }

    fn visit_param_decl(&mut self, param: &'cx ast::ParamDecl<'cx>) {
        self.declare_ident(param.name);
    }

    fn visit_fn_decl(&mut self, f: &'cx ast::FnDecl<'cx>) {
        self.declare_ident(f.name);
        self.fn_like(f.id, ScopeKind::Function, Some(f.name), f.params, f.body);
    }

    fn visit_fn_expr(&mut self, f: &'cx ast::FnExpr<'cx>) {
        self.fn_like(f.id, ScopeKind::Function, f.name, f.params, f.body);
    }

    fn visit_arrow_fn_expr(&mut self, f: &'cx ast::ArrowFnExpr<'cx>) {
        let old = self.enter(f.id, ScopeKind::Arrow);
        self.declare_arguments();
        for param in f.params {
            self.visit_param_decl(param);
        }
        match f.body {
            ast::ArrowFnExprBody::Block(block) => {
                self.declare_hoisted(block.stmts);
                self.visit_block_stmt(block);
            }
            ast::ArrowFnExprBody::Expr(expr) => self.visit_expr(expr),
        }
        self.leave(old);
    }

    fn visit_getter_decl(&mut self, getter: &'cx ast::GetterDecl<'cx>) {
        let old = self.enter(getter.id, ScopeKind::Getter);
        self.declare_hoisted(getter.body.stmts);
        self.visit_block_stmt(getter.body);
        self.leave(old);
    }

    fn visit_setter_decl(&mut self, setter: &'cx ast::SetterDecl<'cx>) {
        let old = self.enter(setter.id, ScopeKind::Setter);
        self.visit_param_decl(setter.param);
        self.declare_hoisted(setter.body.stmts);
        self.visit_block_stmt(setter.body);
        self.leave(old);
    }

    fn visit_catch_clause(&mut self, catch: &'cx ast::CatchClause<'cx>) {
        let old = self.enter(catch.id, ScopeKind::Catch);
        if let Some(var) = catch.var {
            self.declare_ident(var);
        }
        self.declare_hoisted(catch.block.stmts);
        visitor::visit_catch_clause(self, catch);
        self.leave(old);
    }

    fn visit_ident(&mut self, ident: &'cx ast::Ident) {
        self.resolve(ident);
    }
}
