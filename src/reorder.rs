//! Sort and filter a sounding according to the direction the sonde traveled.
//!
//! BUFR soundings carry extra rows interpolated to 1000 hPa even if the sonde never got that
//! low. Those rows are the only ones without a time value. Sorting puts them at one end of the
//! profile and filtering removes them.

use std::cmp::Ordering;

use optional::{none, Optioned};
use strum::IntoEnumIterator;

use crate::{
    error::{BufrError, Result},
    keys::{DerivedVariable, Direction, MessageFormat, Variable},
    sounding::Sounding,
};

/// Determine the direction of a sounding from its message format identifier.
pub fn sounding_direction(snd: &Sounding) -> Result<Direction> {
    let code = snd
        .meta_data()
        .bufr_msg()
        .ok_or(BufrError::MissingMessageFormat)?;

    Ok(MessageFormat::from_code(code)?.direction())
}

/// Indexes that would sort a time profile.
///
/// The sort is stable. Missing times don't take part in the comparison, they go to the end for an
/// upward sounding and to the start for a downward one.
///
/// # Examples
///
/// ```rust
/// use optional::{none, some};
/// use sounding_bufr::{sort_order, Direction};
///
/// let time = vec![some(2.0), none(), some(0.0), some(1.0)];
///
/// assert_eq!(sort_order(&time, Direction::Upward), vec![2, 3, 0, 1]);
/// assert_eq!(sort_order(&time, Direction::Downward), vec![1, 2, 3, 0]);
/// ```
pub fn sort_order(time: &[Optioned<f64>], direction: Direction) -> Vec<usize> {
    let missing = match direction {
        Direction::Upward => Ordering::Greater,
        Direction::Downward => Ordering::Less,
    };

    let mut order: Vec<usize> = (0..time.len()).collect();
    order.sort_by(|&i, &j| match (time[i].into_option(), time[j].into_option()) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (None, Some(_)) => missing,
        (Some(_), None) => missing.reverse(),
        (None, None) => Ordering::Equal,
    });

    order
}

/// Sort every profile of the sounding by time, measured and derived profiles alike.
///
/// Profiles are first aligned with the time profile, see `align_profiles`.
pub fn sort_by_time(snd: &mut Sounding, direction: Direction) {
    align_profiles(snd);
    let order = sort_order(snd.time_profile(), direction);

    for_each_profile(snd, |profile| {
        if !profile.is_empty() {
            *profile = order.iter().map(|&i| profile[i]).collect();
        }
    });
}

/// Remove the rows without a time value, these are the rows added for the 1000 hPa level.
///
/// Rows missing any other value are kept. Returns the number of rows removed.
pub fn remove_fixed_levels(snd: &mut Sounding) -> usize {
    let keep: Vec<bool> = snd.time_profile().iter().map(|t| t.is_some()).collect();
    let removed = keep.iter().filter(|&&k| !k).count();

    if removed == 0 {
        return 0;
    }

    align_profiles(snd);
    for_each_profile(snd, |profile| {
        if profile.is_empty() {
            return;
        }

        *profile = profile
            .iter()
            .zip(&keep)
            .filter(|(_, &k)| k)
            .map(|(val, _)| *val)
            .collect();
    });

    removed
}

/// Find the direction of the sounding, sort it by time and drop the fixed level rows.
pub fn reorder(snd: &mut Sounding) -> Result<()> {
    let direction = sounding_direction(snd)?;
    snd.set_direction(direction);

    sort_by_time(snd, direction);
    let removed = remove_fixed_levels(snd);

    log::debug!(
        "sorted {:?} sounding, removed {} fixed level rows, {} rows left",
        direction,
        removed,
        snd.len()
    );

    Ok(())
}

/// Give every measured profile the length of the time profile, padding with missing values or
/// dropping the values past the last time. Derived profiles get the same treatment unless they
/// have not been calculated yet.
pub fn align_profiles(snd: &mut Sounding) {
    let len = snd.len();

    for var in Variable::iter() {
        let profile = snd.series_mut(var).values_mut();
        if profile.len() != len {
            log::warn!("{} has {} rows, aligning with {} times", var, profile.len(), len);
            profile.resize(len, none());
        }
    }

    for var in DerivedVariable::iter() {
        let profile = snd.derived_profile_mut(var);
        if !profile.is_empty() && profile.len() != len {
            log::warn!("{} has {} rows, aligning with {} times", var, profile.len(), len);
            profile.resize(len, none());
        }
    }
}

fn for_each_profile<F>(snd: &mut Sounding, mut f: F)
where
    F: FnMut(&mut Vec<Optioned<f64>>),
{
    for var in Variable::iter() {
        f(snd.series_mut(var).values_mut());
    }

    for var in DerivedVariable::iter() {
        f(snd.derived_profile_mut(var));
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{profile::calculate_derived, sounding::MetaData};
    use optional::some;

    fn opt(vals: &[Option<f64>]) -> Vec<Optioned<f64>> {
        vals.iter().map(|&v| Optioned::from(v)).collect()
    }

    fn values(vals: &[Optioned<f64>]) -> Vec<Option<f64>> {
        vals.iter().map(|v| v.into_option()).collect()
    }

    fn make_test_sounding(code: u32) -> Sounding {
        Sounding::new()
            .with_meta_data(MetaData::new().with_bufr_msg(code))
            .with_profile(
                Variable::Time,
                opt(&[Some(2.0), None, Some(0.0), Some(1.0)]),
                "s".to_owned(),
            )
            .with_profile(
                Variable::Pressure,
                opt(&[Some(998.0), Some(1000.0), Some(1000.5), None]),
                "hPa".to_owned(),
            )
            .with_profile(
                Variable::GeopotentialHeight,
                opt(&[Some(30.0), Some(0.0), Some(10.0), Some(20.0)]),
                "gpm".to_owned(),
            )
    }

    #[test]
    fn test_direction() {
        assert_eq!(
            sounding_direction(&make_test_sounding(309_057)),
            Ok(Direction::Upward)
        );
        assert_eq!(
            sounding_direction(&make_test_sounding(309_053)),
            Ok(Direction::Downward)
        );
        assert_eq!(
            sounding_direction(&make_test_sounding(309_056)),
            Ok(Direction::Downward)
        );
        assert_eq!(
            sounding_direction(&make_test_sounding(309_052)),
            Err(BufrError::UnrecognizedMessageFormat(309_052))
        );
        assert_eq!(
            sounding_direction(&Sounding::new()),
            Err(BufrError::MissingMessageFormat)
        );
    }

    #[test]
    fn test_sort_order_idempotent() {
        let time = opt(&[Some(3.0), None, Some(1.0), Some(1.0), None, Some(2.0)]);

        for &direction in &[Direction::Upward, Direction::Downward] {
            let order = sort_order(&time, direction);
            let sorted: Vec<Optioned<f64>> = order.iter().map(|&i| time[i]).collect();
            let again = sort_order(&sorted, direction);

            assert_eq!(again, (0..time.len()).collect::<Vec<_>>());
        }

        // Stable for equal times and for missing values.
        assert_eq!(sort_order(&time, Direction::Upward), vec![2, 3, 5, 0, 1, 4]);
        assert_eq!(sort_order(&time, Direction::Downward), vec![1, 4, 2, 3, 5, 0]);
    }

    #[test]
    fn test_sort_by_time() {
        let mut snd = make_test_sounding(309_057);
        calculate_derived(&mut snd);
        sort_by_time(&mut snd, Direction::Upward);

        assert_eq!(
            values(snd.time_profile()),
            vec![Some(0.0), Some(1.0), Some(2.0), None]
        );
        assert_eq!(
            values(snd.pressure_profile()),
            vec![Some(1000.5), None, Some(998.0), Some(1000.0)]
        );
        assert_eq!(
            values(snd.height_profile()),
            vec![Some(10.0), Some(20.0), Some(30.0), Some(0.0)]
        );
        // Derived profiles follow the same order, ascent rate was zero for the first row.
        assert_eq!(snd.ascent_rate_profile()[2].into_option(), Some(0.0));

        // Profiles that were never set become all missing.
        assert_eq!(snd.series(Variable::WindSpeed).len(), 4);
        assert!(snd.wind_speed_profile().iter().all(|v| v.is_none()));
    }

    #[test]
    fn test_remove_fixed_levels() {
        let mut snd = make_test_sounding(309_053);
        sort_by_time(&mut snd, Direction::Downward);

        assert!(snd.time_profile()[0].is_none());
        assert_eq!(remove_fixed_levels(&mut snd), 1);

        assert_eq!(
            values(snd.time_profile()),
            vec![Some(0.0), Some(1.0), Some(2.0)]
        );
        // The row missing a pressure is not a fixed level row.
        assert_eq!(
            values(snd.pressure_profile()),
            vec![Some(1000.5), None, Some(998.0)]
        );

        assert_eq!(remove_fixed_levels(&mut snd), 0);
        assert_eq!(snd.len(), 3);
    }

    #[test]
    fn test_reorder() {
        let mut snd = make_test_sounding(309_056);
        reorder(&mut snd).unwrap();

        assert_eq!(snd.direction(), Some(Direction::Downward));
        assert_eq!(snd.len(), 3);
        assert!(snd.time_profile().iter().all(|t| t.is_some()));

        let mut snd = make_test_sounding(1);
        assert_eq!(
            reorder(&mut snd),
            Err(BufrError::UnrecognizedMessageFormat(1))
        );
        // Nothing was touched.
        assert_eq!(snd.len(), 4);
        assert!(snd.direction().is_none());
        assert!(some(2.0).into_option() == snd.time_profile()[0].into_option());
        assert!(none::<f64>().into_option() == snd.time_profile()[1].into_option());
    }

    #[test]
    fn test_mismatched_lengths() {
        let mut snd = make_test_sounding(309_057)
            .with_profile(
                Variable::Temperature,
                opt(&[Some(20.0), Some(21.0)]),
                "degC".to_owned(),
            )
            .with_profile(
                Variable::DewPoint,
                opt(&[Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(5.0)]),
                "degC".to_owned(),
            );

        sort_by_time(&mut snd, Direction::Upward);

        for var in Variable::iter() {
            assert_eq!(snd.series(var).len(), 4, "{}", var);
        }
        // Rows follow their times, padding included.
        assert_eq!(
            values(snd.temperature_profile()),
            vec![None, None, Some(20.0), Some(21.0)]
        );
        assert_eq!(
            values(snd.dew_point_profile()),
            vec![Some(3.0), Some(4.0), Some(1.0), Some(2.0)]
        );

        let mut snd = make_test_sounding(309_057)
            .with_profile(Variable::WindSpeed, opt(&[Some(5.0)]), "m/s".to_owned());
        assert_eq!(remove_fixed_levels(&mut snd), 1);
        assert_eq!(values(snd.wind_speed_profile()), vec![Some(5.0), None, None]);
    }
}
