// SPDX-License-Identifier: MPL-2.0

use random_events::{DomainPolicy, Interval, Set, SimpleInterval, Universe, Variable};

#[test]
/// S1: union of two overlapping closed/open intervals.
fn s1_overlapping_union() {
    let a = Interval::closed(0.0, 1.0);
    let b = Interval::open(0.5, 2.0);
    let union = a.union_with(&b);
    assert_eq!(union, Interval::closed_open(0.0, 2.0));
    assert!(union.contains_point(0.0));
    assert!(union.contains_point(1.9));
    assert!(!union.contains_point(2.0));
}

#[test]
/// S2: complement of a closed interval is the two open rays around it.
fn s2_closed_interval_complement() {
    let a = Interval::closed(0.0, 1.0);
    let complement = a.complement();
    assert!(!complement.contains_point(0.0));
    assert!(!complement.contains_point(1.0));
    assert!(complement.contains_point(-0.1));
    assert!(complement.contains_point(1.1));
}

#[test]
/// S3: a closed interval and an adjacent open interval sharing a boundary
/// point simplify into a single half-open interval.
fn s3_adjacent_intervals_merge_at_shared_closed_endpoint() {
    let a = Interval::closed(0.0, 1.0);
    let b = Interval::open(1.0, 2.0);
    let merged = a.union_with(&b);
    assert_eq!(merged.simples().len(), 1);
    assert_eq!(merged, Interval::closed_open(0.0, 2.0));
}

#[test]
/// S4: symbolic sets combine by index within a shared universe.
fn s4_symbolic_union_and_complement() {
    let universe = Universe::new(["red", "green", "blue"]);
    let red = Set::new([random_events::SetElement::new(universe.clone(), "red").unwrap()]).unwrap();
    let blue = Set::new([random_events::SetElement::new(universe.clone(), "blue").unwrap()]).unwrap();
    let red_or_blue = red.union_with(&blue).unwrap();
    assert_eq!(red_or_blue.elements().len(), 2);
    let complement = red_or_blue.complement().unwrap();
    assert_eq!(complement.elements().len(), 1);
    assert_eq!(complement.elements()[0].name(), "green");
}

#[test]
/// S5: product events intersect pointwise across variables, filling in an
/// unconstrained domain for variables that are absent from one side.
fn s5_product_event_fill_and_align() {
    use random_events::algebra::SimpleSet;
    use random_events::{AtomValue, PointValue, SimpleEvent};

    let x = Variable::continuous("x");
    let y = Variable::continuous("y");
    let a = SimpleEvent::new([(x.clone(), AtomValue::Interval(Interval::closed(0.0, 2.0)))]).unwrap();
    let b = SimpleEvent::new([(y.clone(), AtomValue::Interval(Interval::closed(0.0, 2.0)))]).unwrap();
    let combined = a.intersection_with(&b);

    let point: random_events::Point =
        [(x, PointValue::Real(1.0)), (y, PointValue::Real(1.0))].into_iter().collect();
    assert!(combined.contains(&point));
}

#[test]
/// S6: a product event's complement stays linear in the variable count: a
/// two-variable box complements into exactly one term per variable (not one
/// term per complement piece), and the first term's complemented variable
/// carries the full, still-composite two-piece complement.
fn s6_product_event_complement_is_linear() {
    use random_events::algebra::SimpleSet;
    use random_events::{AtomValue, SimpleEvent};

    let x = Variable::continuous("x");
    let y = Variable::continuous("y");
    let box_event = SimpleEvent::new([
        (x.clone(), AtomValue::Interval(Interval::closed(0.0, 1.0))),
        (y.clone(), AtomValue::Interval(Interval::closed(0.0, 1.0))),
    ])
    .unwrap();
    let terms = box_event.complement();
    assert_eq!(terms.len(), 2);

    let x_term = &terms[0];
    let expected_x_complement = Interval::new([
        SimpleInterval::below_open(0.0),
        SimpleInterval::above_open(1.0),
    ]);
    assert_eq!(x_term.get(&x), Some(&AtomValue::Interval(expected_x_complement)));
    assert!(x_term.get(&y).is_none());
}

#[test]
fn domain_policy_defaults_to_strict() {
    assert_eq!(DomainPolicy::default(), DomainPolicy::Strict);
}
