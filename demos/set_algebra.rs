// SPDX-License-Identifier: MPL-2.0

use random_events::{Interval, Set, SetElement, Universe};

// A sensor reports a confidence band of [0.2, 0.6) or (0.6, 0.9], and
// separately a calibration pass flags everything above 0.5 as suspect.
// What's left once the suspect region is removed?
fn main() {
    let band = Interval::closed_open(0.2, 0.6).union_with(&Interval::open_closed(0.6, 0.9));
    println!("reported band: {band}");

    let suspect = Interval::above_open(0.5);
    let trusted = band.difference_with(&suspect);
    println!("trusted region: {trusted}");
    assert!(trusted.contains_point(0.3));
    assert!(!trusted.contains_point(0.7));

    // The same algebra over a finite, named universe instead of the reals.
    let colors = Universe::new(["red", "green", "blue", "yellow"]);
    let warm = Set::new([
        SetElement::new(colors.clone(), "red").unwrap(),
        SetElement::new(colors.clone(), "yellow").unwrap(),
    ])
    .unwrap();
    let cool = warm.complement().unwrap();
    println!("warm colors: {warm}");
    println!("cool colors: {cool}");
    assert_eq!(cool.elements().len(), 2);
}
