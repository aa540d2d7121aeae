// SPDX-License-Identifier: MPL-2.0

use random_events::{AtomValue, Event, Interval, PointValue, SimpleEvent, Variable};

// Two variables, `temperature` and `pressure`, each ranging over the reals.
// A sensor fault is declared whenever *either* reading leaves its safe
// envelope. Building that fault region directly as a product-space box
// complement stays linear in the number of variables, never enumerating
// points in either domain.
fn main() {
    let temperature = Variable::continuous("temperature");
    let pressure = Variable::continuous("pressure");

    let safe = SimpleEvent::new([
        (
            temperature.clone(),
            AtomValue::Interval(Interval::closed(15.0, 25.0)),
        ),
        (
            pressure.clone(),
            AtomValue::Interval(Interval::closed(1.0, 1.2)),
        ),
    ])
    .unwrap();

    let safe_region = Event::new([safe]);
    let fault_region = safe_region.complement();

    println!("safe region:  {safe_region}");
    println!("fault region: {fault_region}");

    let nominal: random_events::Point = [
        (temperature.clone(), PointValue::Real(20.0)),
        (pressure.clone(), PointValue::Real(1.1)),
    ]
    .into_iter()
    .collect();
    assert!(safe_region.contains_point(&nominal));
    assert!(!fault_region.contains_point(&nominal));

    let overheated: random_events::Point = [
        (temperature, PointValue::Real(40.0)),
        (pressure, PointValue::Real(1.1)),
    ]
    .into_iter()
    .collect();
    assert!(!safe_region.contains_point(&overheated));
    assert!(fault_region.contains_point(&overheated));
}
