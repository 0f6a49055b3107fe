use proptest::prelude::*;
use taskmancer::system::error::SampleError;
use taskmancer::system::history::TimeSeries;

proptest! {
    #[test]
    fn length_never_exceeds_capacity(
        capacity in 1usize..64,
        values in prop::collection::vec(0.0f64..100.0, 0..256),
    ) {
        let mut series = TimeSeries::new(capacity).unwrap();
        for (i, v) in values.iter().enumerate() {
            series.append(i as u64, *v);
            prop_assert!(series.len() <= capacity);
        }
        prop_assert_eq!(series.len(), values.len().min(capacity));
    }

    #[test]
    fn keeps_most_recent_in_order(
        capacity in 1usize..64,
        values in prop::collection::vec(0.0f64..100.0, 0..256),
    ) {
        let mut series = TimeSeries::new(capacity).unwrap();
        for (i, v) in values.iter().enumerate() {
            series.append(i as u64, *v);
        }

        let start = values.len().saturating_sub(capacity);
        let expected: Vec<(u64, f64)> = values
            .iter()
            .enumerate()
            .skip(start)
            .map(|(i, v)| (i as u64, *v))
            .collect();
        prop_assert_eq!(series.snapshot(), expected);
    }
}

#[test]
fn capacity_three_scenario() {
    let mut series = TimeSeries::new(3).unwrap();
    series.append(0, 10.0);
    series.append(1, 20.0);
    series.append(2, 30.0);
    series.append(3, 40.0);
    assert_eq!(series.snapshot(), vec![(1, 20.0), (2, 30.0), (3, 40.0)]);
}

#[test]
fn indices_survive_eviction() {
    let mut series = TimeSeries::new(2).unwrap();
    for i in 0..10u64 {
        series.append(i, i as f64);
    }
    assert_eq!(series.latest(), Some((9, 9.0)));
    assert_eq!(series.snapshot()[0].0, 8);
}

#[test]
fn zero_capacity_is_invalid() {
    assert!(matches!(
        TimeSeries::new(0),
        Err(SampleError::InvalidCapacity(0))
    ));
}
