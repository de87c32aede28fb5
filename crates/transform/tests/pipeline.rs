use std::borrow::Cow;

use bumpalo::Bump;
use expect_test::expect;
use qp_ast::*;
use qp_atom::AtomMap;
use qp_config::RawTraceConfig;
use qp_scope::pprint_scopes;
use qp_span::{ModuleArena, ModuleID, Span};
use qp_transform::{TransformError, transform};

fn sp(lo: u32, hi: u32) -> Span {
    Span::new(lo, hi, ModuleID::root())
}

fn id<'cx>(f: &mut NodeFactory<'cx>, atoms: &mut AtomMap<'cx>, name: &str, lo: u32) -> &'cx Expr<'cx> {
    let name_id = atoms.insert_by_str(Cow::Owned(name.to_string()));
    f.create_ident_expr(name_id, sp(lo, lo + name.len() as u32))
}

/// for (var i = 0; i < 3; i++) { foo(i); }
fn counting_loop<'cx>(f: &mut NodeFactory<'cx>, atoms: &mut AtomMap<'cx>) -> &'cx Program<'cx> {
    let i = atoms.insert_by_str(Cow::Borrowed("i"));
    let binding = f.create_ident(i, sp(9, 10));
    let zero = f.create_num_lit(0., sp(13, 14));
    let zero = f.expr(ExprKind::NumLit(zero));
    let decl = f.create_var_decl(binding, Some(zero), sp(9, 14));
    let decls = f.alloc_slice(&[decl]);
    let init = f.create_var_stmt(decls, sp(5, 14));

    let left = id(f, atoms, "i", 16);
    let three = f.create_num_lit(3., sp(20, 21));
    let three = f.expr(ExprKind::NumLit(three));
    let cond = f.create_bin_expr(left, BinOpKind::Less, three, sp(16, 21));
    let cond = f.expr(ExprKind::Bin(cond));

    let operand = id(f, atoms, "i", 23);
    let incr = f.create_postfix_unary_expr(PostfixUnaryOp::PlusPlus, operand, sp(23, 26));
    let incr = f.expr(ExprKind::PostfixUnary(incr));

    let callee = id(f, atoms, "foo", 30);
    let arg = id(f, atoms, "i", 34);
    let args = f.alloc_slice(&[arg]);
    let call = f.create_call_expr(callee, args, sp(30, 36));
    let call = f.expr(ExprKind::Call(call));
    let call = f.create_expr_stmt(call, sp(30, 37));
    let call = f.stmt(StmtKind::Expr(call));
    let body = f.alloc_slice(&[call]);
    let body = f.create_block_stmt(body, sp(28, 39));
    let body = f.stmt(StmtKind::Block(body));

    let for_stmt = f.create_for_stmt(Some(ForInitKind::Var(init)), Some(cond), Some(incr), body, sp(0, 39));
    let for_stmt = f.stmt(StmtKind::For(for_stmt));
    let stmts = f.alloc_slice(&[for_stmt]);
    f.create_program(stmts, sp(0, 39))
}

#[test]
fn temporaries_resolve_to_their_hoisted_declarations() {
    let arena = Bump::new();
    let mut atoms = AtomMap::new(32);
    let mut factory = NodeFactory::new(&arena, ModuleID::root());
    let program = counting_loop(&mut factory, &mut atoms);

    let config = RawTraceConfig::default()
        .with_globals(vec!["foo".to_string()])
        .normalize();
    let output = transform(program, &mut factory, &mut atoms, &config).unwrap();
    expect![[r#"
        var __qp_activation = { turn: window.__qp.turn };
        (__qp_function.push(__qp_activation), undefined);
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
    .assert_eq(&pprint_program(output.program, &atoms));
    expect![[r#"
        Program: foo* __qp_function* __qp_activation i __qp_20_5 __qp_35_6 __qp_25_3 __qpv0
    "#]]
    .assert_eq(&pprint_scopes(&output.scopes, &atoms));

    let root = output.scopes.root();
    for span in [sp(16, 21), sp(30, 36)] {
        let entry = output.traces.by_span(span).unwrap();
        let binding = output.scopes.resolved(entry.reference).unwrap();
        assert_eq!(output.scopes.owner_of(binding), Some(root));
        assert_eq!(output.scopes.references_of(binding), &[entry.reference]);
        let (_, decl) = output.scopes.lookup(root, entry.temp).unwrap();
        assert_eq!(decl.node(), Some(binding));
    }
    assert!(output.diags().is_empty());
}

#[test]
fn independent_runs_agree() {
    let config = RawTraceConfig::default().normalize();
    let run = || {
        let arena = Bump::new();
        let mut atoms = AtomMap::new(32);
        let mut factory = NodeFactory::new(&arena, ModuleID::root());
        let program = counting_loop(&mut factory, &mut atoms);
        let output = transform(program, &mut factory, &mut atoms, &config).unwrap();
        let names: Vec<_> = output
            .traces
            .entries()
            .iter()
            .map(|entry| (entry.trace_id.clone(), atoms.get(entry.temp).to_string()))
            .collect();
        (pprint_program(output.program, &atoms), names)
    };
    let (first, first_names) = run();
    let (second, second_names) = run();
    assert_eq!(first, second);
    assert_eq!(first_names, second_names);
    assert_eq!(first_names[0], ("_20_5".to_string(), "__qp_20_5".to_string()));
}

#[test]
fn stray_break_is_reported_against_the_source() {
    let source = "break;";
    let mut modules = ModuleArena::new(1);
    let module = modules.new_module_with_content(None, source.to_string());
    assert_eq!(module, ModuleID::root());

    let arena = Bump::new();
    let mut atoms = AtomMap::new(8);
    let mut factory = NodeFactory::new(&arena, module);
    let stmt = factory.create_break_stmt(None, sp(0, 6));
    let stmt = factory.stmt(StmtKind::Break(stmt));
    let stmts = factory.alloc_slice(&[stmt]);
    let program = factory.create_program(stmts, sp(0, 6));

    let config = RawTraceConfig::default().normalize();
    let Err(err) = transform(program, &mut factory, &mut atoms, &config) else {
        panic!("a break outside of any loop must fail");
    };
    assert!(matches!(err, TransformError::Linearize(_)));
    let message = qp_errors::Diag::new(err).emit_message(&modules, true);
    assert!(message.contains("Unlabeled 'break' has no enclosing statement to jump to."));
}
