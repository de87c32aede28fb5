use qp_atom::AtomMap;

use super::*;

const INDENT: &str = "  ";

pub fn pprint_program(program: &Program<'_>, atoms: &AtomMap<'_>) -> String {
    let mut p = Printer::new(atoms);
    for stmt in program.stmts {
        p.stmt(stmt);
        p.out.push('\n');
    }
    p.out
}

pub fn pprint_stmt(stmt: &Stmt<'_>, atoms: &AtomMap<'_>) -> String {
    let mut p = Printer::new(atoms);
    p.stmt(stmt);
    p.out
}

pub fn pprint_expr(expr: &Expr<'_>, atoms: &AtomMap<'_>) -> String {
    let mut p = Printer::new(atoms);
    p.expr(expr);
    p.out
}

#[inline]
pub fn pprint_ident(ident: &Ident, atoms: &AtomMap<'_>) -> String {
    atoms.get(ident.name).to_string()
}

struct Printer<'a, 'atoms> {
    atoms: &'a AtomMap<'atoms>,
    out: String,
    indent: usize,
}

impl<'a, 'atoms> Printer<'a, 'atoms> {
    fn new(atoms: &'a AtomMap<'atoms>) -> Self {
        Self {
            atoms,
            out: String::with_capacity(256),
            indent: 0,
        }
    }

    fn push(&mut self, s: &str) {
        self.out.push_str(s);
    }

    fn newline(&mut self) {
        self.out.push('\n');
        for _ in 0..self.indent {
            self.out.push_str(INDENT);
        }
    }

    fn ident(&mut self, ident: &Ident) {
        let name = self.atoms.get(ident.name);
        self.out.push_str(name);
    }

    fn block(&mut self, block: &BlockStmt<'_>) {
        self.stmt_list(block.stmts);
    }

    fn stmt_list(&mut self, stmts: Stmts<'_>) {
        if stmts.is_empty() {
            self.push("{}");
            return;
        }
        self.push("{");
        self.indent += 1;
        for stmt in stmts {
            self.newline();
            self.stmt(stmt);
        }
        self.indent -= 1;
        self.newline();
        self.push("}");
    }

    fn var_stmt(&mut self, var: &VarStmt<'_>) {
        self.push("var ");
        for (i, decl) in var.list.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.ident(decl.name);
            if let Some(init) = decl.init {
                self.push(" = ");
                self.expr(init);
            }
        }
    }

    fn for_init(&mut self, init: ForInitKind<'_>) {
        match init {
            ForInitKind::Var(var) => self.var_stmt(var),
            ForInitKind::Expr(expr) => self.expr(expr),
        }
    }

    fn stmt(&mut self, stmt: &Stmt<'_>) {
        use StmtKind::*;
        match stmt.kind {
            Empty(_) => self.push(";"),
            Var(n) => {
                self.var_stmt(n);
                self.push(";");
            }
            Expr(n) => {
                self.expr(n.expr);
                self.push(";");
            }
            If(n) => {
                self.push("if (");
                self.expr(n.expr);
                self.push(") ");
                self.stmt(n.then);
                if let Some(else_then) = n.else_then {
                    self.push(" else ");
                    self.stmt(else_then);
                }
            }
            Block(n) => self.block(n),
            While(n) => {
                self.push("while (");
                self.expr(n.expr);
                self.push(") ");
                self.stmt(n.stmt);
            }
            Do(n) => {
                self.push("do ");
                self.stmt(n.stmt);
                self.push(" while (");
                self.expr(n.expr);
                self.push(");");
            }
            For(n) => {
                self.push("for (");
                if let Some(init) = n.init {
                    self.for_init(init);
                }
                self.push(";");
                if let Some(cond) = n.cond {
                    self.push(" ");
                    self.expr(cond);
                }
                self.push(";");
                if let Some(incr) = n.incr {
                    self.push(" ");
                    self.expr(incr);
                }
                self.push(") ");
                self.stmt(n.body);
            }
            ForIn(n) => {
                self.push("for (");
                self.for_init(n.init);
                self.push(" in ");
                self.expr(n.expr);
                self.push(") ");
                self.stmt(n.body);
            }
            Break(n) => self.jump("break", n.label),
            Continue(n) => self.jump("continue", n.label),
            Ret(n) => {
                self.push("return");
                if let Some(expr) = n.expr {
                    self.push(" ");
                    self.expr(expr);
                }
                self.push(";");
            }
            Throw(n) => {
                self.push("throw ");
                self.expr(n.expr);
                self.push(";");
            }
            Try(n) => {
                self.push("try ");
                self.block(n.try_block);
                if let Some(catch) = n.catch_clause {
                    self.push(" catch ");
                    if let Some(var) = catch.var {
                        self.push("(");
                        self.ident(var);
                        self.push(") ");
                    }
                    self.block(catch.block);
                }
                if let Some(finally) = n.finally_block {
                    self.push(" finally ");
                    self.block(finally);
                }
            }
            Switch(n) => {
                self.push("switch (");
                self.expr(n.expr);
                self.push(") {");
                self.indent += 1;
                for clause in n.case_block.clauses {
                    self.newline();
                    let stmts = match *clause {
                        CaseOrDefaultClause::Case(case) => {
                            self.push("case ");
                            self.expr(case.expr);
                            self.push(":");
                            case.stmts
                        }
                        CaseOrDefaultClause::Default(default) => {
                            self.push("default:");
                            default.stmts
                        }
                    };
                    self.indent += 1;
                    for stmt in stmts {
                        self.newline();
                        self.stmt(stmt);
                    }
                    self.indent -= 1;
                }
                self.indent -= 1;
                self.newline();
                self.push("}");
            }
            Labeled(n) => {
                self.ident(n.label);
                self.push(": ");
                self.stmt(n.stmt);
            }
            Fn(n) => {
                self.push("function ");
                self.ident(n.name);
                self.params(n.params);
                self.push(" ");
                self.block(n.body);
            }
        }
    }

    fn jump(&mut self, keyword: &str, label: Option<&Ident>) {
        self.push(keyword);
        if let Some(label) = label {
            self.push(" ");
            self.ident(label);
        }
        self.push(";");
    }

    fn params(&mut self, params: ParamsDecl<'_>) {
        self.push("(");
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.ident(param.name);
        }
        self.push(")");
    }

    fn exprs(&mut self, exprs: Exprs<'_>) {
        for (i, expr) in exprs.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.expr(expr);
        }
    }

    fn prop_name(&mut self, name: PropName<'_>) {
        match name {
            PropName::Ident(ident) => self.ident(ident),
            PropName::StringLit(lit) => self.string_lit(lit),
            PropName::NumLit(lit) => self.push(&lit.val.to_string()),
        }
    }

    fn string_lit(&mut self, lit: &StringLit) {
        let s = self.atoms.get(lit.val);
        self.out.push('"');
        for c in s.chars() {
            match c {
                '"' => self.out.push_str("\\\""),
                '\\' => self.out.push_str("\\\\"),
                '\n' => self.out.push_str("\\n"),
                c => self.out.push(c),
            }
        }
        self.out.push('"');
    }

    fn expr(&mut self, expr: &Expr<'_>) {
        use ExprKind::*;
        match expr.kind {
            Ident(n) => self.ident(n),
            NumLit(n) => self.push(&n.val.to_string()),
            StringLit(n) => self.string_lit(n),
            BoolLit(n) => self.push(if n.val { "true" } else { "false" }),
            NullLit(_) => self.push("null"),
            This(_) => self.push("this"),
            ArrayLit(n) => {
                self.push("[");
                self.exprs(n.elems);
                self.push("]");
            }
            ObjectLit(n) => {
                if n.members.is_empty() {
                    self.push("{}");
                    return;
                }
                self.push("{");
                for (i, member) in n.members.iter().enumerate() {
                    if i > 0 {
                        self.push(",");
                    }
                    self.push(" ");
                    match member.kind {
                        ObjectMemberKind::Prop(prop) => {
                            self.prop_name(prop.name);
                            self.push(": ");
                            self.expr(prop.init);
                        }
                        ObjectMemberKind::Getter(getter) => {
                            self.push("get ");
                            self.prop_name(getter.name);
                            self.push("() ");
                            self.block(getter.body);
                        }
                        ObjectMemberKind::Setter(setter) => {
                            self.push("set ");
                            self.prop_name(setter.name);
                            self.push("(");
                            self.ident(setter.param.name);
                            self.push(") ");
                            self.block(setter.body);
                        }
                    }
                }
                self.push(" }");
            }
            Fn(n) => {
                self.push("function");
                if let Some(name) = n.name {
                    self.push(" ");
                    self.ident(name);
                }
                self.params(n.params);
                self.push(" ");
                self.block(n.body);
            }
            ArrowFn(n) => {
                self.params(n.params);
                self.push(" => ");
                match n.body {
                    ArrowFnExprBody::Block(block) => self.block(block),
                    ArrowFnExprBody::Expr(expr) => self.expr(expr),
                }
            }
            Paren(n) => {
                self.push("(");
                self.expr(n.expr);
                self.push(")");
            }
            Bin(n) => {
                self.expr(n.left);
                if n.op == BinOpKind::Comma {
                    self.push(", ");
                } else {
                    self.push(" ");
                    self.push(n.op.as_str());
                    self.push(" ");
                }
                self.expr(n.right);
            }
            Assign(n) => {
                self.expr(n.left);
                self.push(" ");
                self.push(n.op.as_str());
                self.push(" ");
                self.expr(n.right);
            }
            Cond(n) => {
                self.expr(n.cond);
                self.push(" ? ");
                self.expr(n.when_true);
                self.push(" : ");
                self.expr(n.when_false);
            }
            Call(n) => {
                self.expr(n.expr);
                self.push("(");
                self.exprs(n.args);
                self.push(")");
            }
            New(n) => {
                self.push("new ");
                self.expr(n.expr);
                if let Some(args) = n.args {
                    self.push("(");
                    self.exprs(args);
                    self.push(")");
                }
            }
            PropAccess(n) => {
                self.expr(n.expr);
                self.push(".");
                self.ident(n.name);
            }
            EleAccess(n) => {
                self.expr(n.expr);
                self.push("[");
                self.expr(n.arg);
                self.push("]");
            }
            PrefixUnary(n) => {
                self.push(n.op.as_str());
                if matches!(
                    n.op,
                    PrefixUnaryOp::Typeof | PrefixUnaryOp::Void | PrefixUnaryOp::Delete
                ) {
                    self.push(" ");
                }
                self.expr(n.expr);
            }
            PostfixUnary(n) => {
                self.expr(n.expr);
                self.push(n.op.as_str());
            }
        }
    }
}
