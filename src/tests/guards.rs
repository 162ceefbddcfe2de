use crate::{f, Cache, Error, Strategy};

#[test]
fn index_out_of_range_is_zero() {
    assert_eq!(f(5, 10).unwrap(), 0.0);
    assert_eq!(f(3, -1).unwrap(), 0.0);
    assert_eq!(f(1, 2).unwrap(), 0.0);
    assert_eq!(f(7, i64::MIN).unwrap(), 0.0);
}

#[test]
fn degree_one() {
    assert_eq!(f(1, 0).unwrap(), 0.5);
    assert_eq!(f(1, 1).unwrap(), 0.5);
    assert_eq!(f(1, -1).unwrap(), 0.0);
}

#[test]
fn guards_do_not_touch_the_cache() {
    let mut cache = Cache::new();
    for strategy in Strategy::ALL {
        strategy.eval(1, 0, &mut cache).unwrap();
        strategy.eval(4, 9, &mut cache).unwrap();
    }
    assert!(cache.is_empty());
    assert_eq!(cache.stats().misses, 0);
}

#[test]
fn non_positive_degree_is_rejected() {
    for strategy in Strategy::ALL {
        for (n, k) in [(0, 0), (0, 3), (-3, 1), (-1, -1)] {
            let result = strategy.eval(n, k, &mut Cache::new());
            assert!(
                matches!(result, Err(Error::NonPositiveDegree { n: m }) if m == n),
                "{strategy} accepted F({n}, {k})"
            );
        }
    }
}

#[test]
fn error_message_names_the_degree() {
    let err = f(0, 0).unwrap_err();
    assert_eq!(err.to_string(), "degree must be at least 1, got 0");
}
