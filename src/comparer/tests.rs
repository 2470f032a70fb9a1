use crate::{IdentityComparer, NodeRef, ParameterClassifier, ParameterNode, chain};
use proptest::prelude::*;

const NAMES: &[&str] = &["Culture", "Type", "Section", "Key", "Logger", "Arg"];
const VALUES: &[&str] = &["", "fi", "sv"];

// -- Strategy helpers --

fn arb_params() -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0..NAMES.len(), 0..VALUES.len()), 0..6)
}

fn build(params: &[(usize, usize)]) -> NodeRef {
    let table = ParameterClassifier::standard();
    let mut line = ParameterNode::root();
    for &(name, value) in params {
        line = table.append(Some(&line), NAMES[name], VALUES[value]).unwrap();
    }
    line
}

fn policies() -> Vec<IdentityComparer> {
    vec![IdentityComparer::default_policy(), IdentityComparer::full_policy(), IdentityComparer::excluding("Culture")]
}

proptest! {
    #[test]
    fn reflexive(a in arb_params()) {
        let x = build(&a);
        let y = build(&a);
        for cmp in policies() {
            prop_assert!(cmp.eq_lines(&x, &x));
            prop_assert!(cmp.eq_lines(&x, &y));
        }
    }

    #[test]
    fn symmetric(a in arb_params(), b in arb_params()) {
        let (x, y) = (build(&a), build(&b));
        for cmp in policies() {
            prop_assert_eq!(cmp.eq_lines(&x, &y), cmp.eq_lines(&y, &x));
        }
    }

    #[test]
    fn transitive(a in arb_params(), b in arb_params(), c in arb_params()) {
        let (x, y, z) = (build(&a), build(&b), build(&c));
        for cmp in policies() {
            if cmp.eq_lines(&x, &y) && cmp.eq_lines(&y, &z) {
                prop_assert!(cmp.eq_lines(&x, &z));
            }
        }
    }

    #[test]
    fn equal_lines_hash_equal(a in arb_params(), b in arb_params()) {
        let (x, y) = (build(&a), build(&b));
        for cmp in policies() {
            if cmp.eq_lines(&x, &y) {
                prop_assert_eq!(cmp.hash_line(&x), cmp.hash_line(&y));
            }
        }
    }

    #[test]
    fn memo_is_stable(a in arb_params()) {
        let x = build(&a);
        for cmp in policies() {
            let first = cmp.hash_line(&x);
            prop_assert_eq!(first, cmp.calculate_hash_code(&x));
            prop_assert_eq!(first, cmp.hash_line(&x));
        }
    }
}

// -- Scenarios --

#[test]
fn non_canonical_leftmost_wins() {
    let table = ParameterClassifier::standard();
    let shadowed = chain!(table; "Culture" => "en", "Culture" => "fi").unwrap();
    let plain = chain!(table; "Culture" => "fi").unwrap();

    let cmp = IdentityComparer::default();
    assert!(cmp.eq_lines(&shadowed, &plain));
    assert_eq!(cmp.hash_line(&shadowed), cmp.hash_line(&plain));
}

#[test]
fn canonical_order_sensitivity() {
    let table = ParameterClassifier::standard();
    let ab = chain!(table; "Section" => "A", "Section" => "B").unwrap();
    let ba = chain!(table; "Section" => "B", "Section" => "A").unwrap();

    assert!(!IdentityComparer::default().eq_lines(&ab, &ba));
}

#[test]
fn empty_value_erasure() {
    let table = ParameterClassifier::standard();
    let erased = chain!(table; "Culture" => "").unwrap();
    let empty = chain!(table;).unwrap();

    let cmp = IdentityComparer::default();
    assert!(cmp.eq_lines(&erased, &empty));
    assert_eq!(cmp.hash_line(&erased), cmp.hash_line(&empty));
}

#[test]
fn attaching_a_hint_keeps_the_hash() {
    let table = ParameterClassifier::standard();
    let a = chain!(table; "Type" => "Foo", "Section" => "Greeting", "Culture" => "fi").unwrap();
    let with_logger = table.append(Some(&a), "Logger", "console").unwrap();

    let cmp = IdentityComparer::shared_default();
    assert_eq!(cmp.hash_line(&a), cmp.hash_line(&with_logger));
    assert!(cmp.eq_lines(&a, &with_logger));
}

#[test]
fn repeated_hashing_does_not_change_equality() {
    let table = ParameterClassifier::standard();
    let a = chain!(table; "Type" => "Foo", "Key" => "k").unwrap();
    let b = chain!(table; "Type" => "Foo", "Key" => "k").unwrap();
    let c = chain!(table; "Type" => "Foo", "Key" => "j").unwrap();

    let cmp = IdentityComparer::default();
    let before = (cmp.eq_lines(&a, &b), cmp.eq_lines(&a, &c));
    for _ in 0..3 {
        assert_eq!(cmp.hash_line(&a), cmp.hash_line(&b));
    }
    assert_eq!(before, (cmp.eq_lines(&a, &b), cmp.eq_lines(&a, &c)));
    assert_eq!(before, (true, false));
}

#[test]
fn memo_is_safe_under_concurrent_first_use() {
    let table = ParameterClassifier::standard();
    let line = chain!(table; "Type" => "Foo", "Section" => "A", "Key" => "k", "Culture" => "fi").unwrap();
    let expected = IdentityComparer::default().calculate_hash_code(&line);

    std::thread::scope(|scope| {
        let handles: Vec<_> =
            (0..4).map(|_| scope.spawn(|| IdentityComparer::shared_default().hash_line(&line))).collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
