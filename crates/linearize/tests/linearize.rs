use std::borrow::Cow;

use bumpalo::Bump;
use expect_test::{Expect, expect};
use qp_ast::*;
use qp_atom::{AtomId, AtomMap};
use qp_config::{NormalizedTraceConfig, RawTraceConfig};
use qp_linearize::{JumpKind, LinearizeError, linearize};
use qp_span::{ModuleID, Span};

fn sp(lo: u32, hi: u32) -> Span {
    Span::new(lo, hi, ModuleID::root())
}

fn plain() -> NormalizedTraceConfig {
    RawTraceConfig::default()
        .with_emit_activation(false)
        .normalize()
}

struct Builder<'a, 'cx> {
    f: &'a mut NodeFactory<'cx>,
    atoms: &'a mut AtomMap<'cx>,
}

impl<'cx> Builder<'_, 'cx> {
    fn name(&mut self, s: &str) -> AtomId {
        self.atoms.insert_by_str(Cow::Owned(s.to_string()))
    }

    fn ident(&mut self, s: &str, lo: u32, hi: u32) -> &'cx Ident {
        let name = self.name(s);
        self.f.create_ident(name, sp(lo, hi))
    }

    fn id(&mut self, s: &str, lo: u32, hi: u32) -> &'cx Expr<'cx> {
        let name = self.name(s);
        self.f.create_ident_expr(name, sp(lo, hi))
    }

    fn num(&mut self, val: f64, lo: u32, hi: u32) -> &'cx Expr<'cx> {
        let lit = self.f.create_num_lit(val, sp(lo, hi));
        self.f.expr(ExprKind::NumLit(lit))
    }

    fn bin(&mut self, left: &'cx Expr<'cx>, op: BinOpKind, right: &'cx Expr<'cx>) -> &'cx Expr<'cx> {
        let span = sp(left.span().lo, right.span().hi);
        let bin = self.f.create_bin_expr(left, op, right, span);
        self.f.expr(ExprKind::Bin(bin))
    }

    fn call(&mut self, callee: &'cx Expr<'cx>, args: &[&'cx Expr<'cx>], hi: u32) -> &'cx Expr<'cx> {
        let args = self.f.alloc_slice(args);
        let call = self.f.create_call_expr(callee, args, sp(callee.span().lo, hi));
        self.f.expr(ExprKind::Call(call))
    }

    fn prop(&mut self, obj: &'cx Expr<'cx>, name: &str, lo: u32) -> &'cx Expr<'cx> {
        let hi = lo + name.len() as u32;
        let name = self.ident(name, lo, hi);
        let access = self.f.create_prop_access_expr(obj, name, sp(obj.span().lo, hi));
        self.f.expr(ExprKind::PropAccess(access))
    }

    fn stmt(&mut self, expr: &'cx Expr<'cx>) -> &'cx Stmt<'cx> {
        let span = expr.span();
        let stmt = self.f.create_expr_stmt(expr, sp(span.lo, span.hi + 1));
        self.f.stmt(StmtKind::Expr(stmt))
    }

    fn var(&mut self, decls: &[(&'cx Ident, Option<&'cx Expr<'cx>>)], lo: u32, hi: u32) -> &'cx VarStmt<'cx> {
        let decls: Vec<_> = decls
            .iter()
            .map(|&(name, init)| {
                let end = init.map_or(name.span.hi, |init| init.span().hi);
                self.f.create_var_decl(name, init, sp(name.span.lo, end))
            })
            .collect();
        let list = self.f.alloc_slice(&decls);
        self.f.create_var_stmt(list, sp(lo, hi))
    }

    fn block(&mut self, stmts: &[&'cx Stmt<'cx>], lo: u32, hi: u32) -> &'cx Stmt<'cx> {
        let stmts = self.f.alloc_slice(stmts);
        let block = self.f.create_block_stmt(stmts, sp(lo, hi));
        self.f.stmt(StmtKind::Block(block))
    }

    fn if_then(&mut self, cond: &'cx Expr<'cx>, then: &'cx Stmt<'cx>, lo: u32) -> &'cx Stmt<'cx> {
        let stmt = self.f.create_if_stmt(cond, then, None, sp(lo, then.span().hi));
        self.f.stmt(StmtKind::If(stmt))
    }

    fn brk(&mut self, lo: u32, hi: u32) -> &'cx Stmt<'cx> {
        let stmt = self.f.create_break_stmt(None, sp(lo, hi));
        self.f.stmt(StmtKind::Break(stmt))
    }

    fn cont(&mut self, label: Option<&'cx Ident>, lo: u32, hi: u32) -> &'cx Stmt<'cx> {
        let stmt = self.f.create_continue_stmt(label, sp(lo, hi));
        self.f.stmt(StmtKind::Continue(stmt))
    }

    fn program(&mut self, stmts: &[&'cx Stmt<'cx>]) -> &'cx Program<'cx> {
        let hi = stmts.last().map_or(0, |s| s.span().hi);
        let stmts = self.f.alloc_slice(stmts);
        self.f.create_program(stmts, sp(0, hi))
    }
}

fn check<'cx>(
    program: &'cx Program<'cx>,
    factory: &mut NodeFactory<'cx>,
    atoms: &mut AtomMap<'cx>,
    config: &NormalizedTraceConfig,
    expect: Expect,
) {
    let result = linearize(program, factory, atoms, config).unwrap();
    expect.assert_eq(&pprint_program(result.program, atoms));
}

#[test]
fn for_loop_becomes_canonical_while() {
    let arena = Bump::new();
    let mut atoms = AtomMap::new(32);
    let mut factory = NodeFactory::new(&arena, ModuleID::root());
    let mut b = Builder {
        f: &mut factory,
        atoms: &mut atoms,
    };
    // for (var i = 0; i < 3; i++) { foo(i); }
    let i = b.ident("i", 9, 10);
    let zero = b.num(0., 13, 14);
    let init = b.var(&[(i, Some(zero))], 5, 14);
    let i = b.id("i", 16, 17);
    let three = b.num(3., 20, 21);
    let cond = b.bin(i, BinOpKind::Less, three);
    let i = b.id("i", 23, 24);
    let incr = b.f.create_postfix_unary_expr(PostfixUnaryOp::PlusPlus, i, sp(23, 26));
    let incr = b.f.expr(ExprKind::PostfixUnary(incr));
    let foo = b.id("foo", 30, 33);
    let i = b.id("i", 34, 35);
    let call = b.call(foo, &[i], 36);
    let call = b.stmt(call);
    let body = b.block(&[call], 28, 39);
    let for_stmt = b
        .f
        .create_for_stmt(Some(ForInitKind::Var(init)), Some(cond), Some(incr), body, sp(0, 39));
    let for_stmt = b.f.stmt(StmtKind::For(for_stmt));
    let program = b.program(&[for_stmt]);

    let config = plain();
    let result = linearize(program, &mut factory, &mut atoms, &config).unwrap();
    expect![[r#"
        var i = 0;
        _38_39: while (true) {
          var __qp_20_5 = i < 3;
          if (__qp_20_5) {
            _38_39_cont: do {
              var __qp_35_6 = foo(i);
              __qp_35_6;
            } while (false);
          } else {
            break _38_39;
          }
          var __qp_25_3 = i;
          var __qpv0 = ++i;
        }
    "#]]
    .assert_eq(&pprint_program(result.program, &atoms));

    let traces = &result.traces;
    assert_eq!(traces.len(), 4);
    let cond = traces.by_span(sp(16, 21)).unwrap();
    assert_eq!(cond.trace_id, "_20_5");
    assert_eq!(atoms.get(cond.temp), "__qp_20_5");
    assert!(traces.by_reference(cond.reference).is_some());
    assert_eq!(traces.by_trace_id("v0").unwrap().span, Span::transient());
}

#[test]
fn untouched_program_is_shared() {
    let arena = Bump::new();
    let mut atoms = AtomMap::new(8);
    let mut factory = NodeFactory::new(&arena, ModuleID::root());
    let mut b = Builder {
        f: &mut factory,
        atoms: &mut atoms,
    };
    let x = b.id("x", 0, 1);
    let stmt = b.stmt(x);
    let program = b.program(&[stmt]);
    let result = linearize(program, &mut factory, &mut atoms, &plain()).unwrap();
    assert!(std::ptr::eq(result.program, program));
    assert!(result.traces.is_empty());
}

#[test]
fn jumps_are_retargeted_to_synthetic_labels() {
    let arena = Bump::new();
    let mut atoms = AtomMap::new(32);
    let mut factory = NodeFactory::new(&arena, ModuleID::root());
    let mut b = Builder {
        f: &mut factory,
        atoms: &mut atoms,
    };
    // outer: while (a) { if (b) continue; if (c) continue outer; break; }
    let cont = b.cont(None, 26, 35);
    let x = b.id("b", 23, 24);
    let first = b.if_then(x, cont, 19);
    let outer = b.ident("outer", 45, 50);
    let cont = b.cont(Some(outer), 36, 51);
    let x = b.id("c", 40, 41);
    let second = b.if_then(x, cont, 36);
    let brk = b.brk(52, 58);
    let body = b.block(&[first, second, brk], 17, 60);
    let a = b.id("a", 14, 15);
    let w = b.f.create_while_stmt(a, body, sp(7, 60));
    let w = b.f.stmt(StmtKind::While(w));
    let label = b.ident("outer", 0, 5);
    let labeled = b.f.create_labeled_stmt(label, w, sp(0, 60));
    let labeled = b.f.stmt(StmtKind::Labeled(labeled));
    let program = b.program(&[labeled]);

    check(
        program,
        &mut factory,
        &mut atoms,
        &plain(),
        expect![[r#"
            outer: _59_53: while (true) {
              if (a) {
                _59_53_cont: outer_cont: do {
                  if (b) {
                    continue _59_53_cont;
                  }
                  if (c) {
                    continue outer_cont;
                  }
                  break _59_53;
                } while (false);
              } else {
                break _59_53;
              }
            }
        "#]],
    );
}

#[test]
fn explicit_break_keeps_its_label() {
    let arena = Bump::new();
    let mut atoms = AtomMap::new(16);
    let mut factory = NodeFactory::new(&arena, ModuleID::root());
    let mut b = Builder {
        f: &mut factory,
        atoms: &mut atoms,
    };
    // outer: while (a) { break outer; }
    let target = b.ident("outer", 25, 30);
    let brk = b.f.create_break_stmt(Some(target), sp(19, 31));
    let brk = b.f.stmt(StmtKind::Break(brk));
    let body = b.block(&[brk], 17, 33);
    let a = b.id("a", 14, 15);
    let w = b.f.create_while_stmt(a, body, sp(7, 33));
    let w = b.f.stmt(StmtKind::While(w));
    let label = b.ident("outer", 0, 5);
    let labeled = b.f.create_labeled_stmt(label, w, sp(0, 33));
    let labeled = b.f.stmt(StmtKind::Labeled(labeled));
    let program = b.program(&[labeled]);

    check(
        program,
        &mut factory,
        &mut atoms,
        &plain(),
        expect![[r#"
            outer: _32_26: while (true) {
              if (a) {
                _32_26_cont: outer_cont: do {
                  break outer;
                } while (false);
              } else {
                break _32_26;
              }
            }
        "#]],
    );
}

#[test]
fn switch_temporaries_land_above_the_switch() {
    let arena = Bump::new();
    let mut atoms = AtomMap::new(32);
    let mut factory = NodeFactory::new(&arena, ModuleID::root());
    let mut b = Builder {
        f: &mut factory,
        atoms: &mut atoms,
    };
    // switch (k + 1) { case f(): g(); break; default: h(); }
    let k = b.id("k", 8, 9);
    let one = b.num(1., 12, 13);
    let disc = b.bin(k, BinOpKind::Add, one);
    let f = b.id("f", 22, 23);
    let test = b.call(f, &[], 25);
    let g = b.id("g", 27, 28);
    let g = b.call(g, &[], 30);
    let g = b.stmt(g);
    let brk = b.brk(32, 38);
    let case = b.f.create_case_clause(test, b.f.alloc_slice(&[g, brk]), sp(17, 38));
    let h = b.id("h", 44, 45);
    let h = b.call(h, &[], 47);
    let h = b.stmt(h);
    let default = b.f.create_default_clause(b.f.alloc_slice(&[h]), sp(39, 48));
    let clauses = [
        CaseOrDefaultClause::Case(case),
        CaseOrDefaultClause::Default(default),
    ];
    let clauses = b.f.alloc_slice(&clauses);
    let switch = b.f.create_switch_stmt(disc, clauses, sp(0, 50));
    let switch = b.f.stmt(StmtKind::Switch(switch));
    let program = b.program(&[switch]);

    check(
        program,
        &mut factory,
        &mut atoms,
        &plain(),
        expect![[r#"
            var __qp_12_5 = k + 1;
            var __qp_24_3 = f();
            _49_50: switch (__qp_12_5) {
              case __qp_24_3:
                var __qp_29_3 = g();
                __qp_29_3;
                break _49_50;
              default:
                var __qp_46_3 = h();
                __qp_46_3;
            }
        "#]],
    );
}

#[test]
fn do_while_traps_continue_and_reevaluates_condition() {
    let arena = Bump::new();
    let mut atoms = AtomMap::new(32);
    let mut factory = NodeFactory::new(&arena, ModuleID::root());
    let mut b = Builder {
        f: &mut factory,
        atoms: &mut atoms,
    };
    // do { if (x) continue; } while (p.q < n);
    let cont = b.cont(None, 12, 21);
    let x = b.id("x", 9, 10);
    let if_stmt = b.if_then(x, cont, 5);
    let body = b.block(&[if_stmt], 3, 22);
    let p = b.id("p", 29, 30);
    let pq = b.prop(p, "q", 31);
    let n = b.id("n", 35, 36);
    let cond = b.bin(pq, BinOpKind::Less, n);
    let do_stmt = b.f.create_do_stmt(body, cond, sp(0, 40));
    let do_stmt = b.f.stmt(StmtKind::Do(do_stmt));
    let program = b.program(&[do_stmt]);

    check(
        program,
        &mut factory,
        &mut atoms,
        &plain(),
        expect![[r#"
            _39_40: do {
              _39_40_cont: do {
                if (x) {
                  continue _39_40_cont;
                }
              } while (false);
              var __qp_31_3 = p.q;
              var __qp_35_7 = __qp_31_3 < n;
            } while (__qp_35_7);
        "#]],
    );
}

#[test]
fn for_in_keeps_its_header() {
    let arena = Bump::new();
    let mut atoms = AtomMap::new(32);
    let mut factory = NodeFactory::new(&arena, ModuleID::root());
    let mut b = Builder {
        f: &mut factory,
        atoms: &mut atoms,
    };
    // for (k in o.p) { if (k) continue; }
    let k = b.id("k", 5, 6);
    let o = b.id("o", 10, 11);
    let op = b.prop(o, "p", 12);
    let cont = b.cont(None, 24, 33);
    let cond = b.id("k", 21, 22);
    let if_stmt = b.if_then(cond, cont, 17);
    let body = b.block(&[if_stmt], 15, 35);
    let for_in = b.f.create_for_in_stmt(ForInitKind::Expr(k), op, body, sp(0, 35));
    let for_in = b.f.stmt(StmtKind::ForIn(for_in));
    let program = b.program(&[for_in]);

    check(
        program,
        &mut factory,
        &mut atoms,
        &plain(),
        expect![[r#"
            var __qp_12_3 = o.p;
            _34_35: _34_35_cont: for (k in __qp_12_3) {
              if (k) {
                continue _34_35_cont;
              }
            }
        "#]],
    );
}

fn short_circuit_program<'cx>(b: &mut Builder<'_, 'cx>) -> &'cx Program<'cx> {
    // var r = a && b.c();
    let r = b.ident("r", 4, 5);
    let a = b.id("a", 8, 9);
    let obj = b.id("b", 13, 14);
    let callee = b.prop(obj, "c", 15);
    let call = b.call(callee, &[], 19);
    let init = b.bin(a, BinOpKind::LogicalAnd, call);
    let var = b.var(&[(r, Some(init))], 0, 20);
    let var = b.f.stmt(StmtKind::Var(var));
    b.program(&[var])
}

#[test]
fn right_operand_of_and_stays_conditional() {
    let arena = Bump::new();
    let mut atoms = AtomMap::new(32);
    let mut factory = NodeFactory::new(&arena, ModuleID::root());
    let program = short_circuit_program(&mut Builder {
        f: &mut factory,
        atoms: &mut atoms,
    });
    check(
        program,
        &mut factory,
        &mut atoms,
        &plain(),
        expect![[r#"
            var __qp_18_11 = a && b.c();
            var r = __qp_18_11;
        "#]],
    );
}

#[test]
fn short_circuit_can_be_flattened() {
    let arena = Bump::new();
    let mut atoms = AtomMap::new(32);
    let mut factory = NodeFactory::new(&arena, ModuleID::root());
    let program = short_circuit_program(&mut Builder {
        f: &mut factory,
        atoms: &mut atoms,
    });
    let config = RawTraceConfig::default()
        .with_emit_activation(false)
        .with_preserve_short_circuit(false)
        .normalize();
    check(
        program,
        &mut factory,
        &mut atoms,
        &config,
        expect![[r#"
            var __qp_15_3 = b.c.bind(b);
            var __qp_18_6 = __qp_15_3();
            var __qp_18_11 = a && __qp_18_6;
            var r = __qp_18_11;
        "#]],
    );
}

#[test]
fn member_callee_is_bound_to_its_receiver() {
    let arena = Bump::new();
    let mut atoms = AtomMap::new(32);
    let mut factory = NodeFactory::new(&arena, ModuleID::root());
    let mut b = Builder {
        f: &mut factory,
        atoms: &mut atoms,
    };
    // a.b.c(x);
    let a = b.id("a", 0, 1);
    let ab = b.prop(a, "b", 2);
    let abc = b.prop(ab, "c", 4);
    let x = b.id("x", 6, 7);
    let call = b.call(abc, &[x], 9);
    let stmt = b.stmt(call);
    let program = b.program(&[stmt]);

    check(
        program,
        &mut factory,
        &mut atoms,
        &plain(),
        expect![[r#"
            var __qp_2_3 = a.b;
            var __qp_4_5 = __qp_2_3.c.bind(__qp_2_3);
            var __qp_8_9 = __qp_4_5(x);
            __qp_8_9;
        "#]],
    );
}

#[test]
fn var_list_is_split_in_order() {
    let arena = Bump::new();
    let mut atoms = AtomMap::new(32);
    let mut factory = NodeFactory::new(&arena, ModuleID::root());
    let mut b = Builder {
        f: &mut factory,
        atoms: &mut atoms,
    };
    // var a = 1, b = a + 2;
    let a = b.ident("a", 4, 5);
    let one = b.num(1., 8, 9);
    let name = b.ident("b", 11, 12);
    let left = b.id("a", 15, 16);
    let two = b.num(2., 19, 20);
    let sum = b.bin(left, BinOpKind::Add, two);
    let var = b.var(&[(a, Some(one)), (name, Some(sum))], 0, 21);
    let var = b.f.stmt(StmtKind::Var(var));
    let program = b.program(&[var]);

    check(
        program,
        &mut factory,
        &mut atoms,
        &plain(),
        expect![[r#"
            var a = 1;
            var __qp_19_5 = a + 2;
            var b = __qp_19_5;
        "#]],
    );
}

#[test]
fn postfix_on_element_reads_then_updates() {
    let arena = Bump::new();
    let mut atoms = AtomMap::new(32);
    let mut factory = NodeFactory::new(&arena, ModuleID::root());
    let mut b = Builder {
        f: &mut factory,
        atoms: &mut atoms,
    };
    // arr[k + 1]++;
    let arr = b.id("arr", 0, 3);
    let k = b.id("k", 4, 5);
    let one = b.num(1., 8, 9);
    let key = b.bin(k, BinOpKind::Add, one);
    let ele = b.f.create_ele_access_expr(arr, key, sp(0, 10));
    let ele = b.f.expr(ExprKind::EleAccess(ele));
    let incr = b.f.create_postfix_unary_expr(PostfixUnaryOp::PlusPlus, ele, sp(0, 12));
    let incr = b.f.expr(ExprKind::PostfixUnary(incr));
    let stmt = b.stmt(incr);
    let program = b.program(&[stmt]);

    check(
        program,
        &mut factory,
        &mut atoms,
        &plain(),
        expect![[r#"
            var __qp_8_5 = k + 1;
            var __qp_11_12 = arr[__qp_8_5];
            var __qpv0 = ++arr[__qp_8_5];
            __qp_11_12;
        "#]],
    );
}

#[test]
fn parenthesized_targets_are_written_in_place() {
    let arena = Bump::new();
    let mut atoms = AtomMap::new(32);
    let mut factory = NodeFactory::new(&arena, ModuleID::root());
    let mut b = Builder {
        f: &mut factory,
        atoms: &mut atoms,
    };
    // (o.p) = 1; (o.p)++;
    let o = b.id("o", 1, 2);
    let member = b.prop(o, "p", 3);
    let target = b.f.create_paren_expr(member, sp(0, 5));
    let target = b.f.expr(ExprKind::Paren(target));
    let one = b.num(1., 8, 9);
    let assign = b.f.create_assign_expr(target, AssignOp::Eq, one, sp(0, 9));
    let assign = b.f.expr(ExprKind::Assign(assign));
    let first = b.stmt(assign);
    let o = b.id("o", 12, 13);
    let member = b.prop(o, "p", 14);
    let operand = b.f.create_paren_expr(member, sp(11, 16));
    let operand = b.f.expr(ExprKind::Paren(operand));
    let incr = b.f.create_postfix_unary_expr(PostfixUnaryOp::PlusPlus, operand, sp(11, 18));
    let incr = b.f.expr(ExprKind::PostfixUnary(incr));
    let second = b.stmt(incr);
    let program = b.program(&[first, second]);

    check(
        program,
        &mut factory,
        &mut atoms,
        &plain(),
        expect![[r#"
            var __qp_8_9 = (o.p) = 1;
            __qp_8_9;
            var __qp_17_7 = o.p;
            var __qpv0 = ++o.p;
            __qp_17_7;
        "#]],
    );
}

#[test]
fn statements_keep_their_temporaries_in_source_order() {
    let arena = Bump::new();
    let mut atoms = AtomMap::new(32);
    let mut factory = NodeFactory::new(&arena, ModuleID::root());
    let mut b = Builder {
        f: &mut factory,
        atoms: &mut atoms,
    };
    // x = a + 1; y = b * 2;
    let x = b.id("x", 0, 1);
    let a = b.id("a", 4, 5);
    let one = b.num(1., 8, 9);
    let sum = b.bin(a, BinOpKind::Add, one);
    let assign = b.f.create_assign_expr(x, AssignOp::Eq, sum, sp(0, 9));
    let assign = b.f.expr(ExprKind::Assign(assign));
    let first = b.stmt(assign);
    let y = b.id("y", 11, 12);
    let name = b.id("b", 15, 16);
    let two = b.num(2., 19, 20);
    let product = b.bin(name, BinOpKind::Mul, two);
    let assign = b.f.create_assign_expr(y, AssignOp::Eq, product, sp(11, 20));
    let assign = b.f.expr(ExprKind::Assign(assign));
    let second = b.stmt(assign);
    let program = b.program(&[first, second]);

    check(
        program,
        &mut factory,
        &mut atoms,
        &plain(),
        expect![[r#"
            var __qp_8_5 = a + 1;
            var __qp_8_9 = x = __qp_8_5;
            __qp_8_9;
            var __qp_19_5 = b * 2;
            var __qp_19_9 = y = __qp_19_5;
            __qp_19_9;
        "#]],
    );
}

#[test]
fn nested_loops_and_branches_keep_their_own_temporaries() {
    let arena = Bump::new();
    let mut atoms = AtomMap::new(32);
    let mut factory = NodeFactory::new(&arena, ModuleID::root());
    let mut b = Builder {
        f: &mut factory,
        atoms: &mut atoms,
    };
    // while (a) { while (b) { continue; } if (c) f(); else g(); h(); break; }
    let cont = b.cont(None, 24, 33);
    let inner_body = b.block(&[cont], 22, 35);
    let cond = b.id("b", 19, 20);
    let inner = b.f.create_while_stmt(cond, inner_body, sp(12, 35));
    let inner = b.f.stmt(StmtKind::While(inner));
    let callee = b.id("f", 43, 44);
    let call = b.call(callee, &[], 46);
    let then = b.stmt(call);
    let callee = b.id("g", 53, 54);
    let call = b.call(callee, &[], 56);
    let else_then = b.stmt(call);
    let c = b.id("c", 40, 41);
    let branch = b.f.create_if_stmt(c, then, Some(else_then), sp(36, 57));
    let branch = b.f.stmt(StmtKind::If(branch));
    let callee = b.id("h", 58, 59);
    let call = b.call(callee, &[], 61);
    let after = b.stmt(call);
    let brk = b.brk(63, 69);
    let body = b.block(&[inner, branch, after, brk], 10, 71);
    let a = b.id("a", 7, 8);
    let outer = b.f.create_while_stmt(a, body, sp(0, 71));
    let outer = b.f.stmt(StmtKind::While(outer));
    let program = b.program(&[outer]);

    check(
        program,
        &mut factory,
        &mut atoms,
        &plain(),
        expect![[r#"
            _70_71: while (true) {
              if (a) {
                _70_71_cont: do {
                  _34_23: while (true) {
                    if (b) {
                      _34_23_cont: do {
                        continue _34_23_cont;
                      } while (false);
                    } else {
                      break _34_23;
                    }
                  }
                  if (c) {
                    var __qp_45_3 = f();
                    __qp_45_3;
                  } else {
                    var __qp_55_3 = g();
                    __qp_55_3;
                  }
                  var __qp_60_3 = h();
                  __qp_60_3;
                  break _70_71;
                } while (false);
              } else {
                break _70_71;
              }
            }
        "#]],
    );
}

#[test]
fn activation_preamble_opens_every_body() {
    let arena = Bump::new();
    let mut atoms = AtomMap::new(32);
    let mut factory = NodeFactory::new(&arena, ModuleID::root());
    let mut b = Builder {
        f: &mut factory,
        atoms: &mut atoms,
    };
    // function f(x) { return x * 2; }
    let x = b.id("x", 23, 24);
    let two = b.num(2., 27, 28);
    let product = b.bin(x, BinOpKind::Mul, two);
    let ret = b.f.create_ret_stmt(Some(product), sp(16, 29));
    let ret = b.f.stmt(StmtKind::Ret(ret));
    let body = b.f.create_block_stmt(b.f.alloc_slice(&[ret]), sp(14, 31));
    let param = b.ident("x", 11, 12);
    let param = b.f.create_param_decl(param, sp(11, 12));
    let params = b.f.alloc_slice(&[param]);
    let name = b.ident("f", 9, 10);
    let f = b.f.create_fn_decl(name, params, body, sp(0, 31));
    let f = b.f.stmt(StmtKind::Fn(f));
    // var g = (y) => y + 1;
    let y = b.id("y", 49, 50);
    let one = b.num(1., 53, 54);
    let sum = b.bin(y, BinOpKind::Add, one);
    let param = b.ident("y", 42, 43);
    let param = b.f.create_param_decl(param, sp(42, 43));
    let params = b.f.alloc_slice(&[param]);
    let arrow = b
        .f
        .create_arrow_fn_expr(params, ArrowFnExprBody::Expr(sum), sp(41, 54));
    let arrow = b.f.expr(ExprKind::ArrowFn(arrow));
    let g = b.ident("g", 37, 38);
    let var = b.var(&[(g, Some(arrow))], 33, 55);
    let var = b.f.stmt(StmtKind::Var(var));
    let program = b.program(&[f, var]);

    check(
        program,
        &mut factory,
        &mut atoms,
        &NormalizedTraceConfig::default(),
        expect![[r#"
            var __qp_activation = { turn: window.__qp.turn };
            (__qp_function.push(__qp_activation), undefined);
            function f(x) {
              var __qp_activation = { turn: window.__qp.turn };
              (__qp_function.push(__qp_activation), undefined);
              var __qp_27_5 = x * 2;
              return __qp_27_5;
            }
            var g = (y) => {
              var __qp_activation = { turn: window.__qp.turn };
              (__qp_function.push(__qp_activation), undefined);
              var __qp_53_5 = y + 1;
              return __qp_53_5;
            };
        "#]],
    );
}

#[test]
fn jump_without_target_is_an_error() {
    let arena = Bump::new();
    let mut atoms = AtomMap::new(8);
    let mut factory = NodeFactory::new(&arena, ModuleID::root());
    let mut b = Builder {
        f: &mut factory,
        atoms: &mut atoms,
    };
    let brk = b.brk(3, 9);
    let program = b.program(&[brk]);
    let err = linearize(program, &mut factory, &mut atoms, &plain()).err().unwrap();
    let LinearizeError::JumpOutsideTarget(err) = err else {
        panic!("expected a jump error");
    };
    assert_eq!(err.kind, JumpKind::Break);
    assert_eq!(err.span, sp(3, 9));
    assert_eq!(
        err.to_string(),
        "Unlabeled 'break' has no enclosing statement to jump to."
    );
}

#[test]
fn switch_does_not_capture_continue() {
    let arena = Bump::new();
    let mut atoms = AtomMap::new(8);
    let mut factory = NodeFactory::new(&arena, ModuleID::root());
    let mut b = Builder {
        f: &mut factory,
        atoms: &mut atoms,
    };
    // switch (s) { default: continue; }
    let cont = b.cont(None, 22, 31);
    let default = b.f.create_default_clause(b.f.alloc_slice(&[cont]), sp(13, 31));
    let clauses = b.f.alloc_slice(&[CaseOrDefaultClause::Default(default)]);
    let s = b.id("s", 8, 9);
    let switch = b.f.create_switch_stmt(s, clauses, sp(0, 33));
    let switch = b.f.stmt(StmtKind::Switch(switch));
    let program = b.program(&[switch]);
    let err = linearize(program, &mut factory, &mut atoms, &plain()).err().unwrap();
    assert!(matches!(
        err,
        LinearizeError::JumpOutsideTarget(ref e) if e.kind == JumpKind::Continue
    ));
}
