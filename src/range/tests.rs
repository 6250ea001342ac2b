use super::*;

#[test]
fn test_get_and_ends() {
    let r = Range::new(3, 7);
    assert_eq!(r.get(), (3, 7));
    assert_eq!(r.get_start(), 3);
    assert_eq!(r.get_end(), 7);
    assert_eq!(r.len(), 5);
}

#[test]
fn test_set_mutates_in_place() {
    let mut r = Range::new(1, 2);
    r.set(10, 20);
    assert_eq!(r.get(), (10, 20));
}

#[test]
#[should_panic(expected = "must be <=")]
fn test_set_rejects_inverted_bounds() {
    let mut r = Range::new(1, 2);
    r.set(5, 1);
}

#[test]
fn test_fits_in() {
    let inner = Range::new(3, 5);
    let outer = Range::new(1, 10);
    assert_eq!(inner.fits_in(&outer), Some((3, 5)));
    assert_eq!(outer.fits_in(&inner), None);
}

#[test]
fn test_loosely_fits_in_overlap() {
    let a = Range::new(1, 5);
    let b = Range::new(4, 10);
    assert_eq!(a.loosely_fits_in(&b), Some((4, 5)));
    assert_eq!(b.loosely_fits_in(&a), Some((4, 5)));
}

#[test]
fn test_loosely_fits_in_no_overlap() {
    let a = Range::new(1, 3);
    let b = Range::new(10, 12);
    assert_eq!(a.loosely_fits_in(&b), None);
}

#[test]
fn test_loosely_fits_in_adjacent_touch() {
    let a = Range::new(1, 5);
    let b = Range::new(5, 9);
    assert_eq!(a.loosely_fits_in(&b), Some((5, 5)));
}

#[test]
fn test_merge() {
    let a = Range::new(2, 5);
    let b = Range::new(8, 12);
    assert_eq!(a.merge(&b).get(), (2, 12));
    assert_eq!(b.merge(&a).get(), (2, 12));
}

#[test]
fn test_clone_and_eq() {
    let a = Range::new(2, 5);
    let b = a;
    assert_eq!(a, b);
}
