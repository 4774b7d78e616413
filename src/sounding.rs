//! Data type and methods to store a reconstructed sounding.

use chrono::NaiveDateTime;
use optional::Optioned;

use crate::{
    error::{BufrError, Result},
    keys::{DerivedVariable, Direction, Variable},
};

pub use self::{data_row::DataRow, meta_data::MetaData, station_info::StationInfo};

/// A measured profile and the unit it was reported in.
#[derive(Clone, Debug, Default)]
pub struct Series {
    values: Vec<Optioned<f64>>,
    unit: Option<String>,
}

impl Series {
    /// Create a series from values and a unit label.
    pub fn new<U>(values: Vec<Optioned<f64>>, unit: U) -> Self
    where
        Option<String>: From<U>,
    {
        Series {
            values,
            unit: Option::from(unit),
        }
    }

    /// The values, missing values are `none`.
    #[inline]
    pub fn values(&self) -> &[Optioned<f64>] {
        &self.values
    }

    /// The unit label, `None` if the variable was never reported with a unit.
    #[inline]
    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if there are no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub(crate) fn push(&mut self, val: Optioned<f64>) {
        self.values.push(val);
    }

    /// Append missing values until the series has `len` samples.
    #[inline]
    pub(crate) fn pad_to(&mut self, len: usize) {
        if self.values.len() < len {
            self.values.resize(len, optional::none());
        }
    }

    /// Record the unit of a sample, which must match any unit recorded before.
    pub(crate) fn check_unit(&mut self, var: Variable, unit: &str) -> Result<()> {
        match self.unit {
            None => {
                self.unit = Some(unit.to_owned());
                Ok(())
            }
            Some(ref expected) if expected == unit => Ok(()),
            Some(ref expected) => Err(BufrError::UnitChanged {
                variable: var,
                expected: expected.clone(),
                found: unit.to_owned(),
            }),
        }
    }

    pub(crate) fn values_mut(&mut self) -> &mut Vec<Optioned<f64>> {
        &mut self.values
    }

    pub(crate) fn set_unit(&mut self, unit: &str) {
        self.unit = Some(unit.to_owned());
    }
}

/// All the variables stored in the sounding.
///
/// The profiles are stored in parallel vectors. Once a sounding has been extracted from a message
/// every measured profile has the same length as the time profile, samples that were not reported
/// are filled with missing values.
#[derive(Clone, Debug, Default)]
pub struct Sounding {
    // Launch site
    station: StationInfo,

    // Launch time of the sonde
    launch_time: Option<NaiveDateTime>,

    // Set once the message format is known
    direction: Option<Direction>,

    // Most common time step in seconds
    temporal_resolution: Option<f64>,

    meta_data: MetaData,

    // Measured profiles
    time: Series,
    pressure: Series,
    temperature: Series,
    dew_point: Series,
    wind_speed: Series,
    wind_direction: Series,
    height: Series,
    lat_displacement: Series,
    lon_displacement: Series,

    // Derived profiles
    ascent_rate: Vec<Optioned<f64>>,
    relative_humidity: Vec<Optioned<f64>>,
    vapor_pressure: Vec<Optioned<f64>>,
    mixing_ratio: Vec<Optioned<f64>>,
    latitude: Vec<Optioned<f64>>,
    longitude: Vec<Optioned<f64>>,
}

macro_rules! make_profile_getter {
    ($(#[$attr:meta])* => $name:tt, measured $var:ident) => {
        $(#[$attr])*
        #[inline]
        pub fn $name(&self) -> &[Optioned<f64>] {
            self.$var.values()
        }
    };
    ($(#[$attr:meta])* => $name:tt, derived $var:ident) => {
        $(#[$attr])*
        #[inline]
        pub fn $name(&self) -> &[Optioned<f64>] {
            &self.$var
        }
    };
}

impl Sounding {
    /// Create a new sounding with default values. This is a proxy for default with a clearer name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sounding_bufr::Sounding;
    ///
    /// let snd = Sounding::new();
    /// assert!(snd.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Sounding::default()
    }

    /// Builder function for setting the station info.
    #[inline]
    pub fn with_station_info(mut self, new_value: StationInfo) -> Self {
        self.station = new_value;
        self
    }

    /// Get the station info
    #[inline]
    pub fn station_info(&self) -> &StationInfo {
        &self.station
    }

    /// Builder method to set the launch time of the sonde.
    ///
    /// # Examples
    /// ```rust
    /// use sounding_bufr::Sounding;
    /// use chrono::NaiveDate;
    ///
    /// let ltime = NaiveDate::from_ymd_opt(2020, 1, 20).unwrap().and_hms_opt(10, 44, 59).unwrap();
    /// let snd = Sounding::new().with_launch_time(ltime);
    /// assert_eq!(snd.launch_time(), Some(ltime));
    /// let _snd = snd.with_launch_time(None);
    /// ```
    #[inline]
    pub fn with_launch_time<T>(mut self, launch_time: T) -> Self
    where
        Option<NaiveDateTime>: From<T>,
    {
        self.launch_time = Option::from(launch_time);
        self
    }

    /// Launch time of the sonde.
    #[inline]
    pub fn launch_time(&self) -> Option<NaiveDateTime> {
        self.launch_time
    }

    /// Builder method for the metadata.
    #[inline]
    pub fn with_meta_data(mut self, meta_data: MetaData) -> Self {
        self.meta_data = meta_data;
        self
    }

    /// Identifiers of the sonde and message.
    #[inline]
    pub fn meta_data(&self) -> &MetaData {
        &self.meta_data
    }

    /// Builder method for a measured profile.
    ///
    /// # Examples
    /// ```rust
    /// use sounding_bufr::{Sounding, Variable};
    /// use optional::{none, some};
    ///
    /// let snd = Sounding::new()
    ///     .with_profile(Variable::Time, vec![some(0.0), some(1.0), none()], "s".to_owned())
    ///     .with_profile(
    ///         Variable::Pressure,
    ///         vec![some(1010.0), some(1009.8), some(1000.0)],
    ///         None::<String>,
    ///     );
    ///
    /// assert_eq!(snd.len(), 3);
    /// assert_eq!(snd.series(Variable::Time).unit(), Some("s"));
    /// assert!(snd.series(Variable::Pressure).unit().is_none());
    /// ```
    #[inline]
    pub fn with_profile<U>(mut self, var: Variable, values: Vec<Optioned<f64>>, unit: U) -> Self
    where
        Option<String>: From<U>,
    {
        *self.series_mut(var) = Series::new(values, unit);
        self
    }

    /// Get a measured profile along with its unit.
    pub fn series(&self, var: Variable) -> &Series {
        use Variable::*;

        match var {
            Time => &self.time,
            Pressure => &self.pressure,
            Temperature => &self.temperature,
            DewPoint => &self.dew_point,
            WindSpeed => &self.wind_speed,
            WindDirection => &self.wind_direction,
            GeopotentialHeight => &self.height,
            LatitudeDisplacement => &self.lat_displacement,
            LongitudeDisplacement => &self.lon_displacement,
        }
    }

    pub(crate) fn series_mut(&mut self, var: Variable) -> &mut Series {
        use Variable::*;

        match var {
            Time => &mut self.time,
            Pressure => &mut self.pressure,
            Temperature => &mut self.temperature,
            DewPoint => &mut self.dew_point,
            WindSpeed => &mut self.wind_speed,
            WindDirection => &mut self.wind_direction,
            GeopotentialHeight => &mut self.height,
            LatitudeDisplacement => &mut self.lat_displacement,
            LongitudeDisplacement => &mut self.lon_displacement,
        }
    }

    /// Get a derived profile. Empty until the derived quantities have been calculated.
    pub fn derived_profile(&self, var: DerivedVariable) -> &[Optioned<f64>] {
        use DerivedVariable::*;

        match var {
            AscentRate => &self.ascent_rate,
            RelativeHumidity => &self.relative_humidity,
            VaporPressure => &self.vapor_pressure,
            MixingRatio => &self.mixing_ratio,
            Latitude => &self.latitude,
            Longitude => &self.longitude,
        }
    }

    pub(crate) fn derived_profile_mut(&mut self, var: DerivedVariable) -> &mut Vec<Optioned<f64>> {
        use DerivedVariable::*;

        match var {
            AscentRate => &mut self.ascent_rate,
            RelativeHumidity => &mut self.relative_humidity,
            VaporPressure => &mut self.vapor_pressure,
            MixingRatio => &mut self.mixing_ratio,
            Latitude => &mut self.latitude,
            Longitude => &mut self.longitude,
        }
    }

    make_profile_getter!(
        /// Time since launch (s).
        => time_profile, measured time
    );

    make_profile_getter!(
        /// Pressure profile (hPa once normalized).
        => pressure_profile, measured pressure
    );

    make_profile_getter!(
        /// Temperature profile (C once normalized).
        => temperature_profile, measured temperature
    );

    make_profile_getter!(
        /// Dew point profile (C once normalized).
        => dew_point_profile, measured dew_point
    );

    make_profile_getter!(
        /// Wind speed profile (m/s).
        => wind_speed_profile, measured wind_speed
    );

    make_profile_getter!(
        /// Wind direction profile (degrees).
        => wind_direction_profile, measured wind_direction
    );

    make_profile_getter!(
        /// Geopotential height profile (gpm).
        => height_profile, measured height
    );

    make_profile_getter!(
        /// Ascent rate profile (m/s).
        => ascent_rate_profile, derived ascent_rate
    );

    make_profile_getter!(
        /// Relative humidity profile (%).
        => relative_humidity_profile, derived relative_humidity
    );

    make_profile_getter!(
        /// Vapor pressure profile (Pa).
        => vapor_pressure_profile, derived vapor_pressure
    );

    make_profile_getter!(
        /// Mixing ratio profile (g/kg).
        => mixing_ratio_profile, derived mixing_ratio
    );

    make_profile_getter!(
        /// Latitude of the sonde (degrees north).
        => latitude_profile, derived latitude
    );

    make_profile_getter!(
        /// Longitude of the sonde (degrees east).
        => longitude_profile, derived longitude
    );

    /// Direction of the sounding, known after it has been reordered.
    #[inline]
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    #[inline]
    pub(crate) fn set_direction(&mut self, direction: Direction) {
        self.direction = Some(direction);
    }

    /// The most common time step between samples in seconds.
    #[inline]
    pub fn temporal_resolution(&self) -> Option<f64> {
        self.temporal_resolution
    }

    #[inline]
    pub(crate) fn set_temporal_resolution(&mut self, resolution: Option<f64>) {
        self.temporal_resolution = resolution;
    }

    /// Number of rows, this is the length of the time profile.
    #[inline]
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// True if there is no data.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Get a row of data values from this sounding.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sounding_bufr::{Sounding, Variable};
    /// use optional::some;
    ///
    /// let snd = Sounding::new()
    ///     .with_profile(Variable::Time, vec![some(0.0), some(1.0)], "s".to_owned())
    ///     .with_profile(Variable::Temperature, vec![some(26.8), some(26.7)], "degC".to_owned());
    ///
    /// let row = snd.data_row(1).unwrap();
    /// assert_eq!(row.time.unwrap(), 1.0);
    /// assert_eq!(row.temperature.unwrap(), 26.7);
    /// assert!(row.pressure.is_none()); // We never set a pressure profile.
    ///
    /// assert!(snd.data_row(2).is_none());
    /// ```
    pub fn data_row(&self, idx: usize) -> Option<DataRow> {
        macro_rules! copy_to_result {
            ($result:ident, $field:ident, $profile:expr) => {
                if let Some(opt_val) = $profile.get(idx) {
                    $result.$field = *opt_val;
                }
            };
        }

        if idx >= self.len() {
            return None;
        }

        let mut result = DataRow::default();

        copy_to_result!(result, time, self.time.values);
        copy_to_result!(result, pressure, self.pressure.values);
        copy_to_result!(result, temperature, self.temperature.values);
        copy_to_result!(result, dew_point, self.dew_point.values);
        copy_to_result!(result, wind_speed, self.wind_speed.values);
        copy_to_result!(result, wind_direction, self.wind_direction.values);
        copy_to_result!(result, height, self.height.values);
        copy_to_result!(result, ascent_rate, self.ascent_rate);
        copy_to_result!(result, relative_humidity, self.relative_humidity);
        copy_to_result!(result, vapor_pressure, self.vapor_pressure);
        copy_to_result!(result, mixing_ratio, self.mixing_ratio);
        copy_to_result!(result, latitude, self.latitude);
        copy_to_result!(result, longitude, self.longitude);

        Some(result)
    }

    /// Get a bottom up iterator over the data rows. For a descending sounding that has been sorted
    /// by time the rows are visited in reverse order.
    #[inline]
    pub fn bottom_up<'a>(&'a self) -> impl Iterator<Item = DataRow> + 'a {
        match self.direction {
            Some(Direction::Downward) => ProfileIterator::backward(self),
            _ => ProfileIterator::forward(self),
        }
    }

    /// Get a top down iterator over the data rows.
    #[inline]
    pub fn top_down<'a>(&'a self) -> impl Iterator<Item = DataRow> + 'a {
        match self.direction {
            Some(Direction::Downward) => ProfileIterator::forward(self),
            _ => ProfileIterator::backward(self),
        }
    }
}

/// Iterator over the data rows of a sounding, in either index order or reverse index order.
struct ProfileIterator<'a> {
    next_idx: isize,
    step: isize, // +1 for forward, -1 for backward
    src: &'a Sounding,
}

impl<'a> ProfileIterator<'a> {
    fn forward(src: &'a Sounding) -> Self {
        ProfileIterator {
            next_idx: 0,
            step: 1,
            src,
        }
    }

    fn backward(src: &'a Sounding) -> Self {
        ProfileIterator {
            next_idx: src.len() as isize - 1,
            step: -1,
            src,
        }
    }
}

impl<'a> Iterator for ProfileIterator<'a> {
    type Item = DataRow;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.next_idx < 0 {
            return None;
        }

        let result = self.src.data_row(self.next_idx as usize);
        self.next_idx += self.step;
        result
    }
}


mod data_row;
mod meta_data;
mod station_info;
