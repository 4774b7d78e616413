//! Create profiles derived from the measured profiles of a sounding.
//!
//! All of these expect the profiles to be in the units set by `normalize`. The free functions
//! work on the rows their inputs have in common, `calculate_derived` treats a profile that is
//! shorter than the time profile as missing for the rows it lacks. Missing values in the inputs
//! lead to missing values in the output.

use std::{cmp::Reverse, collections::BTreeMap, iter::once};

use itertools::{izip, Itertools};
use optional::{none, some, Optioned};

use crate::{
    keys::{DerivedVariable, Variable},
    sounding::Sounding,
};

/// Calculate the ascent rate (m/s) from the geopotential height (gpm) and time (s) profiles.
///
/// The rate is the first difference of height over the first difference of time. There is no
/// rate at the first sample, by convention it is set to zero so the profile lines up with time.
/// Two samples at the same time give a missing value instead of an infinite rate.
pub fn ascent_rate(height: &[Optioned<f64>], time: &[Optioned<f64>]) -> Vec<Optioned<f64>> {
    if height.is_empty() || time.is_empty() {
        return vec![];
    }

    let rates = izip!(height, time)
        .tuple_windows::<(_, _)>()
        .map(|((z0, t0), (z1, t1))| {
            match (
                z0.into_option(),
                t0.into_option(),
                z1.into_option(),
                t1.into_option(),
            ) {
                (Some(z0), Some(t0), Some(z1), Some(t1)) if t1 != t0 => some((z1 - z0) / (t1 - t0)),
                _ => none(),
            }
        });

    once(some(0.0)).chain(rates).collect()
}

/// Calculate relative humidity (%) from temperature and dew point (C).
pub fn relative_humidity(
    temperature: &[Optioned<f64>],
    dew_point: &[Optioned<f64>],
) -> Vec<Optioned<f64>> {
    let magnus = |t: f64| (17.625 * t / (243.04 + t)).exp();

    izip!(temperature, dew_point)
        .map(|(t, dp)| match (t.into_option(), dp.into_option()) {
            (Some(t), Some(dp)) => some(100.0 * (magnus(dp) / magnus(t))),
            _ => none(),
        })
        .collect()
}

/// Calculate water vapor pressure (Pa) from relative humidity (%) and temperature (C).
pub fn vapor_pressure(
    relative_humidity: &[Optioned<f64>],
    temperature: &[Optioned<f64>],
) -> Vec<Optioned<f64>> {
    izip!(relative_humidity, temperature)
        .map(|(rh, t)| match (rh.into_option(), t.into_option()) {
            (Some(rh), Some(t)) => {
                let saturation = 611.2 * (17.62 * t / (243.12 + t)).exp();
                some(rh / 100.0 * saturation)
            }
            _ => none(),
        })
        .collect()
}

/// Calculate the water vapor mixing ratio (g/kg) from pressure (hPa) and vapor pressure (Pa).
pub fn mixing_ratio(
    pressure: &[Optioned<f64>],
    vapor_pressure: &[Optioned<f64>],
) -> Vec<Optioned<f64>> {
    izip!(pressure, vapor_pressure)
        .map(|(p, e)| match (p.into_option(), e.into_option()) {
            (Some(p), Some(e)) => some(1000.0 * 0.622 * e / (100.0 * p - e)),
            _ => none(),
        })
        .collect()
}

/// Position of the sonde from the launch position and its displacement since launch.
pub fn position(origin: Optioned<f64>, displacement: &[Optioned<f64>]) -> Vec<Optioned<f64>> {
    displacement
        .iter()
        .map(|d| match (origin.into_option(), d.into_option()) {
            (Some(o), Some(d)) => some(o + d),
            _ => none(),
        })
        .collect()
}

/// Find the most common time step in a time profile.
///
/// Missing times are skipped, the remaining steps are truncated to whole seconds and counted.
/// This is a mode and not a mean so that a few skipped or repeated samples do not bias it. Ties
/// go to the smaller step. Returns `None` if there are fewer than two valid times.
///
/// # Examples
///
/// ```rust
/// use optional::{none, some};
/// use sounding_bufr::temporal_resolution;
///
/// let time = vec![some(0.0), some(1.0), none(), some(2.0), some(3.0), some(5.0), some(6.0)];
/// assert_eq!(temporal_resolution(&time), Some(1.0));
///
/// assert_eq!(temporal_resolution(&[some(0.0)]), None);
/// ```
pub fn temporal_resolution(time: &[Optioned<f64>]) -> Option<f64> {
    let mut counts: BTreeMap<u64, usize> = BTreeMap::new();

    time.iter()
        .filter_map(|t| t.into_option())
        .tuple_windows::<(_, _)>()
        .map(|(t0, t1)| (t1 - t0).abs() as u64)
        .for_each(|step| *counts.entry(step).or_insert(0) += 1);

    counts
        .into_iter()
        .max_by_key(|&(step, count)| (count, Reverse(step)))
        .map(|(step, _)| step as f64)
}

/// Fill in every derived profile of the sounding and its temporal resolution.
///
/// Every derived profile has the length of the time profile. A measured profile that was never
/// set, or is shorter than time, counts as missing for the rows it lacks.
pub fn calculate_derived(snd: &mut Sounding) {
    let len = snd.len();
    let profile = |var: Variable| aligned(snd.series(var).values(), len);

    let time = profile(Variable::Time);
    let height = profile(Variable::GeopotentialHeight);
    let temperature = profile(Variable::Temperature);
    let dew_point = profile(Variable::DewPoint);
    let pressure = profile(Variable::Pressure);

    let ascent = ascent_rate(&height, &time);
    let rh = relative_humidity(&temperature, &dew_point);
    let e = vapor_pressure(&rh, &temperature);
    let mw = mixing_ratio(&pressure, &e);

    let station = *snd.station_info();
    let lat = position(station.latitude(), &profile(Variable::LatitudeDisplacement));
    let lon = position(station.longitude(), &profile(Variable::LongitudeDisplacement));

    let resolution = temporal_resolution(snd.time_profile());

    *snd.derived_profile_mut(DerivedVariable::AscentRate) = ascent;
    *snd.derived_profile_mut(DerivedVariable::RelativeHumidity) = rh;
    *snd.derived_profile_mut(DerivedVariable::VaporPressure) = e;
    *snd.derived_profile_mut(DerivedVariable::MixingRatio) = mw;
    *snd.derived_profile_mut(DerivedVariable::Latitude) = lat;
    *snd.derived_profile_mut(DerivedVariable::Longitude) = lon;
    snd.set_temporal_resolution(resolution);

    log::debug!(
        "calculated derived profiles for {} rows, temporal resolution {:?}",
        snd.len(),
        resolution
    );
}

/// Copy of a profile cut or padded with missing values to `len` rows.
fn aligned(profile: &[Optioned<f64>], len: usize) -> Vec<Optioned<f64>> {
    let mut vals: Vec<Optioned<f64>> = profile.iter().take(len).copied().collect();
    vals.resize(len, none());
    vals
}
