use symdiff::{
    Expr, add, add_all, constant, div, log, mul, one, pow, sub, sub_all, to_infix, variable, zero,
};

fn var(name: &str) -> Expr {
    variable(name).expect("valid variable name")
}

#[test]
fn leaves() {
    assert_eq!(to_infix(&var("x")), "x");
    assert_eq!(to_infix(&zero()), "0");
    assert_eq!(to_infix(&one()), "1");
    assert_eq!(to_infix(&constant(2)), "2");
    assert_eq!(to_infix(&constant(0.5)), "0.5");
    assert_eq!(to_infix(&constant(-3.25)), "-3.25");
}

#[test]
fn binary_nodes_use_fixed_glue() {
    let x = var("x");
    let y = var("y");
    let cases = vec![
        (add(&x, &y), "(x + y)"),
        (sub(&x, &y), "(x - y)"),
        (mul(&x, &y), "(x * y)"),
        (div(&x, &y), "(x / y)"),
        (pow(&x, &y), "(x ** y)"),
        (log(&x), "log(x)"),
        (log(add(&x, 1)), "log((x + 1))"),
    ];
    for (expr, expected) in cases {
        assert_eq!(to_infix(&expr), expected);
    }
}

#[test]
fn n_ary_and_unary_sums() {
    let x = var("x");
    let y = var("y");
    let z = var("z");
    assert_eq!(
        to_infix(&add_all([x.clone(), y.clone(), z.clone()]).unwrap()),
        "(x + y + z)"
    );
    assert_eq!(to_infix(&sub_all([x.clone(), y, z]).unwrap()), "(x - y - z)");
    assert_eq!(to_infix(&add_all([x.clone()]).unwrap()), "(x)");
    assert_eq!(to_infix(&sub_all([x]).unwrap()), "(x)");
}

#[test]
fn nesting_is_fully_parenthesized() {
    let x = var("x");
    let y = var("y");
    let e = div(mul(add(&x, 1), pow(&y, 2)), log(sub(&x, &y)));
    assert_eq!(to_infix(&e), "(((x + 1) * (y ** 2)) / log((x - y)))");
}

#[test]
fn display_matches_to_infix_and_is_deterministic() {
    let x = var("x");
    let e = sub(&x, pow(var("y"), &x));
    let first = to_infix(&e);
    assert_eq!(first, to_infix(&e));
    assert_eq!(first, e.to_string());
    assert_eq!(format!("{e}"), "(x - (y ** x))");
}
