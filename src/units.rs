//! Convert the measured profiles of a sounding to a fixed set of units.
//!
//! Every `Variable` has a target unit (see `Variable::target_unit`). The formulas used for the
//! derived quantities assume these units, so a unit that cannot be converted is an error.

use std::collections::HashMap;

use metfor::{Celsius, Kelvin, Quantity};
use strum::IntoEnumIterator;

use crate::{
    error::{BufrError, Result},
    keys::Variable,
    sounding::Sounding,
};

/// A conversion applied element wise to a profile.
pub type Converter = fn(f64) -> f64;

/// Table of conversions keyed by (from unit, to unit).
#[derive(Debug, Clone)]
pub struct UnitRegistry {
    converters: HashMap<(String, String), Converter>,
}

impl Default for UnitRegistry {
    /// Kelvin to Celsius (labelled either `C` or `degC`) and Pascal to hectoPascal.
    fn default() -> Self {
        UnitRegistry::empty()
            .with_conversion("K", "C", kelvin_to_celsius)
            .with_conversion("K", "degC", kelvin_to_celsius)
            .with_conversion("Pa", "hPa", pascal_to_hectopascal)
    }
}

impl UnitRegistry {
    /// The default set of conversions.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with no conversions at all.
    #[inline]
    pub fn empty() -> Self {
        UnitRegistry {
            converters: HashMap::new(),
        }
    }

    /// Builder method to register an additional conversion, replacing any previous one for the
    /// same pair of units.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sounding_bufr::UnitRegistry;
    ///
    /// let registry = UnitRegistry::new().with_conversion("kt", "m/s", |kt| kt * 0.514_444);
    /// let convert = registry.converter("kt", "m/s").unwrap();
    /// assert!((convert(10.0) - 5.14444).abs() < 1.0e-9);
    ///
    /// assert!(registry.converter("m/s", "kt").is_none());
    /// ```
    pub fn with_conversion(mut self, from: &str, to: &str, converter: Converter) -> Self {
        self.converters
            .insert((from.to_owned(), to.to_owned()), converter);
        self
    }

    /// Find the conversion between two units.
    pub fn converter(&self, from: &str, to: &str) -> Option<Converter> {
        self.converters
            .get(&(from.to_owned(), to.to_owned()))
            .copied()
    }
}

/// Convert Kelvin to Celsius.
pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    Celsius::from(Kelvin(kelvin)).unpack()
}

/// Convert Pascal to hectoPascal.
pub fn pascal_to_hectopascal(pascal: f64) -> f64 {
    pascal / 100.0
}

/// Convert every measured profile of the sounding to its target unit.
///
/// Profiles already in the target unit are left untouched, so normalizing twice is the same as
/// normalizing once. A profile that was never reported with a unit takes the target unit if it
/// holds no data, otherwise it is an error like any other unknown unit.
///
/// # Examples
///
/// ```rust
/// use sounding_bufr::{normalize, Sounding, UnitRegistry, Variable};
/// use optional::some;
///
/// let mut snd = Sounding::new()
///     .with_profile(Variable::Temperature, vec![some(300.0), some(290.0)], "K".to_owned());
///
/// normalize(&mut snd, &UnitRegistry::default()).unwrap();
///
/// let t = snd.temperature_profile();
/// assert!((t[0].unwrap() - 26.85).abs() < 1.0e-9);
/// assert!((t[1].unwrap() - 16.85).abs() < 1.0e-9);
/// assert_eq!(snd.series(Variable::Temperature).unit(), Some("degC"));
/// ```
pub fn normalize(snd: &mut Sounding, registry: &UnitRegistry) -> Result<()> {
    // Find every conversion before touching any profile, so a failure leaves the sounding as is.
    let mut plan: Vec<(Variable, Option<(String, Converter)>)> = Vec::new();

    for var in Variable::iter() {
        let target = var.target_unit();
        let series = snd.series(var);

        let found = match series.unit() {
            Some(unit) if unit == target => continue,
            Some(unit) => unit.to_owned(),
            None if series.values().iter().all(|v| v.is_none()) => {
                plan.push((var, None));
                continue;
            }
            None => "none".to_owned(),
        };

        let convert = registry
            .converter(&found, target)
            .ok_or_else(|| BufrError::UnexpectedUnit {
                variable: var,
                expected: target.to_owned(),
                found: found.clone(),
            })?;

        plan.push((var, Some((found, convert))));
    }

    for (var, conversion) in plan {
        let target = var.target_unit();
        let series = snd.series_mut(var);

        if let Some((found, convert)) = conversion {
            for val in series.values_mut().iter_mut() {
                *val = val.map_t(convert);
            }
            log::debug!("converted {} from {} to {}", var, found, target);
        }
        series.set_unit(target);
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::utility::test_tools::*;
    use optional::{none, some};

    fn make_test_sounding() -> Sounding {
        Sounding::new()
            .with_profile(
                Variable::Time,
                vec![some(0.0), some(1.0), none()],
                "s".to_owned(),
            )
            .with_profile(
                Variable::Pressure,
                vec![some(101_000.0), some(100_990.0), some(100_000.0)],
                "Pa".to_owned(),
            )
            .with_profile(
                Variable::Temperature,
                vec![some(300.0), some(290.0), none()],
                "K".to_owned(),
            )
            .with_profile(
                Variable::DewPoint,
                vec![some(290.0), none(), none()],
                "K".to_owned(),
            )
    }

    #[test]
    fn test_normalize() {
        let mut snd = make_test_sounding();
        normalize(&mut snd, &UnitRegistry::default()).unwrap();

        assert!(approx_equal_profile(
            snd.temperature_profile(),
            &[Some(26.85), Some(16.85), None],
            1.0e-9
        ));
        assert!(approx_equal_profile(
            snd.dew_point_profile(),
            &[Some(16.85), None, None],
            1.0e-9
        ));
        assert!(approx_equal_profile(
            snd.pressure_profile(),
            &[Some(1010.0), Some(1009.9), Some(1000.0)],
            1.0e-9
        ));
        assert!(approx_equal_profile(
            snd.time_profile(),
            &[Some(0.0), Some(1.0), None],
            1.0e-9
        ));

        for var in Variable::iter() {
            assert_eq!(snd.series(var).unit(), Some(var.target_unit()));
        }
    }

    #[test]
    fn test_normalize_idempotent() {
        let mut once = make_test_sounding();
        normalize(&mut once, &UnitRegistry::default()).unwrap();

        let mut twice = once.clone();
        normalize(&mut twice, &UnitRegistry::default()).unwrap();

        for var in Variable::iter() {
            let expected: Vec<Option<f64>> = once
                .series(var)
                .values()
                .iter()
                .map(|v| v.into_option())
                .collect();
            assert!(approx_equal_profile(
                twice.series(var).values(),
                &expected,
                1.0e-12
            ));
            assert_eq!(once.series(var).unit(), twice.series(var).unit());
        }
    }

    #[test]
    fn test_unexpected_unit() {
        let mut snd = make_test_sounding().with_profile(
            Variable::WindSpeed,
            vec![some(5.0), some(6.0), none()],
            "kt".to_owned(),
        );

        match normalize(&mut snd, &UnitRegistry::default()) {
            Err(BufrError::UnexpectedUnit {
                variable,
                expected,
                found,
            }) => {
                assert_eq!(variable, Variable::WindSpeed);
                assert_eq!(expected, "m/s");
                assert_eq!(found, "kt");
            }
            other => panic!("unexpected result {:?}", other),
        }

        // Registering the conversion fixes it.
        let mut snd = make_test_sounding().with_profile(
            Variable::WindSpeed,
            vec![some(10.0), some(6.0), none()],
            "kt".to_owned(),
        );
        let registry = UnitRegistry::default().with_conversion("kt", "m/s", |kt| kt * 0.514_444);
        normalize(&mut snd, &registry).unwrap();
        assert!(approx_equal(
            snd.wind_speed_profile()[0].unwrap(),
            5.14444,
            1.0e-9
        ));
    }

    #[test]
    fn test_missing_unit() {
        // No unit and no data is fine.
        let mut snd = make_test_sounding().with_profile(
            Variable::WindDirection,
            vec![none(), none(), none()],
            None,
        );
        assert!(normalize(&mut snd, &UnitRegistry::default()).is_ok());
        assert_eq!(snd.series(Variable::WindDirection).unit(), Some("deg"));

        // Data without a unit is not.
        let mut snd = make_test_sounding().with_profile(
            Variable::WindDirection,
            vec![some(270.0), none(), none()],
            None,
        );
        assert_eq!(
            normalize(&mut snd, &UnitRegistry::default()),
            Err(BufrError::UnexpectedUnit {
                variable: Variable::WindDirection,
                expected: "deg".to_owned(),
                found: "none".to_owned(),
            })
        );
    }

    #[test]
    fn test_failed_normalize_changes_nothing() {
        let mut snd = make_test_sounding().with_profile(
            Variable::WindSpeed,
            vec![some(5.0), none(), none()],
            "kt".to_owned(),
        );

        assert!(normalize(&mut snd, &UnitRegistry::default()).is_err());

        // Pressure and temperature come before wind speed, they must not be converted.
        assert_eq!(snd.series(Variable::Pressure).unit(), Some("Pa"));
        assert_eq!(snd.pressure_profile()[0].into_option(), Some(101_000.0));
        assert_eq!(snd.series(Variable::Temperature).unit(), Some("K"));
        assert_eq!(snd.temperature_profile()[0].into_option(), Some(300.0));
        assert!(snd.series(Variable::GeopotentialHeight).unit().is_none());
    }
}
