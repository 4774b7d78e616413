use optional::Optioned;
use serde_json::Value;
use sounding_bufr::{
    calculate_derived, extract, flatten, normalize, process, remove_fixed_levels,
    sort_by_time, sounding_direction, DerivedVariable, Direction, Pipeline, Sounding,
    UnitRegistry, Variable,
};
use strum::IntoEnumIterator;

fn extracted(msg: &Value) -> Sounding {
    extract(&flatten(msg)).unwrap()
}

fn values(vals: &[Optioned<f64>]) -> Vec<Option<f64>> {
    vals.iter().map(|v| v.into_option()).collect()
}

pub fn test_completeness(msg: &Value) {
    let snd = extracted(msg);
    assert!(!snd.is_empty());

    for var in Variable::iter() {
        assert_eq!(snd.series(var).len(), snd.len(), "{}", var);
    }
}

pub fn test_normalize_idempotent(msg: &Value) {
    let registry = UnitRegistry::default();

    let mut snd = extracted(msg);
    normalize(&mut snd, &registry).unwrap();
    let once = snd.clone();
    normalize(&mut snd, &registry).unwrap();

    for var in Variable::iter() {
        assert_eq!(snd.series(var).unit(), Some(var.target_unit()), "{}", var);

        let first = values(once.series(var).values());
        let second = values(snd.series(var).values());
        assert_eq!(first, second, "{}", var);
    }
}

pub fn test_derived_profiles(msg: &Value) {
    let mut snd = extracted(msg);
    normalize(&mut snd, &UnitRegistry::default()).unwrap();
    calculate_derived(&mut snd);

    for var in DerivedVariable::iter() {
        assert_eq!(snd.derived_profile(var).len(), snd.len(), "{}", var);
    }

    assert_eq!(snd.ascent_rate_profile()[0].into_option(), Some(0.0));
    assert!(snd.temporal_resolution().is_some());

    for (t, dp, rh) in itertools::izip!(
        snd.temperature_profile(),
        snd.dew_point_profile(),
        snd.relative_humidity_profile()
    ) {
        if let (Some(t), Some(dp)) = (t.into_option(), dp.into_option()) {
            let rh = rh.unwrap();
            assert!(rh > 0.0);
            if t == dp {
                assert_eq!(rh, 100.0);
            }
        }
    }
}

pub fn test_sorted(msg: &Value) {
    let mut snd = extracted(msg);
    let direction = sounding_direction(&snd).unwrap();

    sort_by_time(&mut snd, direction);
    let time = snd.time_profile().to_vec();

    let valid: Vec<f64> = time.iter().filter_map(|t| t.into_option()).collect();
    assert!(valid.windows(2).all(|w| w[0] <= w[1]));

    // Missing times at the end going up, at the start coming down.
    let first_valid = time.iter().position(|t| t.is_some()).unwrap();
    let last_valid = time.iter().rposition(|t| t.is_some()).unwrap();
    match direction {
        Direction::Upward => assert_eq!(first_valid, 0),
        Direction::Downward => assert_eq!(last_valid, time.len() - 1),
    }

    // Sorting again changes nothing.
    sort_by_time(&mut snd, direction);
    assert_eq!(values(&time), values(snd.time_profile()));
}

pub fn test_fixed_levels_removed(msg: &Value) {
    let raw = extracted(msg);
    let missing = raw
        .time_profile()
        .iter()
        .filter(|t| t.is_none())
        .count();

    let mut snd = raw.clone();
    assert_eq!(remove_fixed_levels(&mut snd), missing);
    assert_eq!(snd.len(), raw.len() - missing);

    let kept = Pipeline::new()
        .with_fixed_level_filter(false)
        .process(msg)
        .unwrap();
    assert_eq!(kept.len(), raw.len());

    let snd = process(msg).unwrap();
    assert_eq!(snd.len(), raw.len() - missing);
    assert!(snd.time_profile().iter().all(|t| t.is_some()));
    for var in Variable::iter() {
        assert_eq!(snd.series(var).len(), snd.len(), "{}", var);
    }
    for var in DerivedVariable::iter() {
        assert_eq!(snd.derived_profile(var).len(), snd.len(), "{}", var);
    }
}
