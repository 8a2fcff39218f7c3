use std::thread;

use symdiff::{
    DiffError, Expr, Node, Op, add, add_all, constant, div, log, mul, one, pow, sub, sub_all,
    to_infix, variable, zero,
};

fn var(name: &str) -> Expr {
    variable(name).expect("valid variable name")
}

#[test]
fn variable_names_are_validated() {
    for good in ["x", "y2", "theta_1", "x'", "λ", "x.1", "dx/dt", "1x"] {
        assert_eq!(var(good).as_variable(), Some(good));
    }
    for bad in ["", "42", "-3.5", "1e5", "inf"] {
        assert!(
            matches!(variable(bad), Err(DiffError::InvalidArgument(_))),
            "{bad:?} should be rejected"
        );
    }
}

#[test]
fn literals_are_coerced_to_constant_leaves() {
    let x = var("x");
    let e = mul(2, &x);
    match e.node() {
        Node::Mul(a, b) => {
            assert_eq!(a.node(), &Node::Constant(2.0));
            assert_eq!(b, &x);
        }
        other => panic!("expected Mul, got {other:?}"),
    }

    assert_eq!(constant(0.5).as_number(), Some(0.5));
    assert_eq!(constant(3_i64).as_number(), Some(3.0));
    assert!(Expr::ptr_eq(&constant(&x), &x));
    assert!(constant(1.5_f32).is_constant());
    assert!(!x.is_constant());
}

#[test]
fn zero_and_one_are_interned() {
    assert!(Expr::ptr_eq(&zero(), &zero()));
    assert!(Expr::ptr_eq(&one(), &one()));
    assert_ne!(zero(), one());
    assert_eq!(zero().as_number(), Some(0.0));
    assert_eq!(one().as_number(), Some(1.0));
    // A literal zero is a plain constant, not the interned leaf.
    assert_ne!(constant(0), zero());
}

#[test]
fn interned_constants_agree_across_threads() {
    let handles: Vec<_> = (0..8).map(|_| thread::spawn(|| (zero(), one()))).collect();
    let local_zero = zero();
    let local_one = one();
    for handle in handles {
        let (z, o) = handle.join().unwrap();
        assert!(Expr::ptr_eq(&z, &local_zero));
        assert!(Expr::ptr_eq(&o, &local_one));
    }
}

#[test]
fn fixed_arity_operators_reject_wrong_operand_counts() {
    let x = var("x");
    let y = var("y");

    let err = Expr::from_operands(Op::Mul, vec![x.clone(), y.clone(), x.clone()]).unwrap_err();
    assert_eq!(
        err,
        DiffError::InvalidArity {
            op: Op::Mul,
            expected: "exactly 2",
            got: 3,
        }
    );

    assert!(matches!(
        Expr::from_operands(Op::Div, vec![x.clone()]),
        Err(DiffError::InvalidArity { op: Op::Div, got: 1, .. })
    ));
    assert!(matches!(
        Expr::from_operands(Op::Pow, vec![]),
        Err(DiffError::InvalidArity { op: Op::Pow, got: 0, .. })
    ));
    assert!(matches!(
        Expr::from_operands(Op::Log, vec![x.clone(), y.clone()]),
        Err(DiffError::InvalidArity { op: Op::Log, got: 2, .. })
    ));
    assert!(matches!(add_all(Vec::<Expr>::new()), Err(DiffError::InvalidArity { .. })));
    assert!(matches!(sub_all(Vec::<f64>::new()), Err(DiffError::InvalidArity { .. })));

    assert_eq!(
        Expr::from_operands(Op::Pow, vec![x.clone(), y.clone()]).unwrap(),
        pow(&x, &y)
    );
    assert_eq!(Expr::from_operands(Op::Log, vec![x.clone()]).unwrap(), log(&x));
}

#[test]
fn arity_error_message() {
    let x = var("x");
    let err = Expr::from_operands(Op::Mul, vec![x.clone(), x.clone(), x]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid arity for Mul: expected exactly 2 operand(s), got 3"
    );
}

#[test]
fn n_ary_sums_keep_every_operand() {
    let x = var("x");
    let sum = add_all([x.clone(), constant(1), var("y")]).unwrap();
    match sum.node() {
        Node::Add(terms) => assert_eq!(terms.len(), 3),
        other => panic!("expected Add, got {other:?}"),
    }
    assert_eq!(sum.op(), Some(Op::Add));
    assert!(!sum.is_leaf());
}

#[test]
fn operators_build_the_same_trees_as_builders() {
    let x = var("x");
    let y = var("y");

    assert_eq!(&x + &y, add(&x, &y));
    assert_eq!(&x - 1.0, sub(&x, 1.0));
    assert_eq!(2 * &x, mul(2, &x));
    assert_eq!(x.clone() / y.clone(), div(&x, &y));
    assert_eq!(1.0 - x.clone(), sub(1.0, &x));
    assert_eq!(-&x, sub(zero(), &x));
    assert_eq!(x.clone().pow(2), pow(&x, 2));
    assert_eq!(x.clone().ln(), log(&x));
}

#[test]
fn no_simplification_on_construction() {
    let x = var("x");
    assert_eq!(to_infix(&add(&x, 0)), "(x + 0)");
    assert_eq!(to_infix(&mul(&x, 1)), "(x * 1)");
    assert_eq!(to_infix(&(-(-&x))), "(0 - (0 - x))");
}
