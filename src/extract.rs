//! Rebuild the profiles of a sounding from a flattened BUFR message.
//!
//! Fields are visited in the order they appeared in the message. Every sample of the sonde starts
//! with the time since launch, but not every variable is reported for every sample. When a new
//! time value shows up, any profile that did not get a value for the previous sample is padded
//! with a missing value so the profiles stay aligned with the time profile.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use optional::Optioned;
use serde_json::Value;
use strum::IntoEnumIterator;

use crate::{
    error::Result,
    flatten::FlatRecord,
    keys::{BufrField, MessageFormat, Variable},
    sounding::{MetaData, Sounding, StationInfo},
    utility::{json_to_optioned, json_to_text},
};

/// Extract a sounding from a flattened message.
///
/// If the message format identifier has no single value, which happens for dropsondes that list
/// several descriptors, the dropsonde format is assumed.
///
/// # Examples
///
/// ```rust
/// use serde_json::json;
/// use sounding_bufr::{extract, flatten};
///
/// let msg = json!({"messages": [
///     {"key": "unexpandedDescriptors", "value": 309057},
///     {"key": "timePeriod", "value": 0, "units": "s"},
///     {"key": "pressure", "value": 101_000, "units": "Pa"},
///     {"key": "airTemperature", "value": 300.0, "units": "K"},
///     {"key": "timePeriod", "value": 1, "units": "s"},
///     {"key": "airTemperature", "value": 299.9, "units": "K"},
/// ]});
///
/// let snd = extract(&flatten(&msg)).unwrap();
///
/// assert_eq!(snd.len(), 2);
/// assert_eq!(snd.pressure_profile().len(), 2);
/// assert!(snd.pressure_profile()[1].is_none());
/// assert_eq!(snd.meta_data().bufr_msg(), Some(309_057));
/// ```
pub fn extract(flat: &FlatRecord) -> Result<Sounding> {
    extract_with_fallback(flat, MessageFormat::DROPSONDE_CODE)
}

/// Same as `extract`, with the format identifier used when it cannot be resolved.
pub fn extract_with_fallback(flat: &FlatRecord, fallback_format: u32) -> Result<Sounding> {
    let mut snd = Sounding::new();
    let mut station = StationInfo::new();
    let mut meta = MetaData::new();
    let mut launch = LaunchTimeFields::default();

    for prefix in flat.key_prefixes() {
        let field = match flat
            .get(prefix, "key")
            .and_then(Value::as_str)
            .and_then(|name| BufrField::from_str(name).ok())
        {
            Some(field) => field,
            None => continue,
        };

        let value = flat.get(prefix, "value");
        let units = flat.get(prefix, "units").and_then(Value::as_str);

        use BufrField::*;
        match field {
            TimePeriod => {
                ensure_measurement_integrity(&mut snd);
                append(&mut snd, Variable::Time, value, units)?;
            }
            Pressure => append(&mut snd, Variable::Pressure, value, units)?,
            WindSpeed => append(&mut snd, Variable::WindSpeed, value, units)?,
            WindDirection => append(&mut snd, Variable::WindDirection, value, units)?,
            GeopotentialHeight => append(&mut snd, Variable::GeopotentialHeight, value, units)?,
            AirTemperature => append(&mut snd, Variable::Temperature, value, units)?,
            DewPointTemperature => append(&mut snd, Variable::DewPoint, value, units)?,
            LatitudeDisplacement => {
                append(&mut snd, Variable::LatitudeDisplacement, value, units)?
            }
            LongitudeDisplacement => {
                append(&mut snd, Variable::LongitudeDisplacement, value, units)?
            }

            Latitude => station = station.with_latitude(number(value)),
            Longitude => station = station.with_longitude(number(value)),

            Year => launch.year = whole_number(value),
            Month => launch.month = whole_number(value),
            Day => launch.day = whole_number(value),
            Hour => launch.hour = whole_number(value),
            Minute => launch.minute = whole_number(value),
            Second => launch.second = whole_number(value),

            SerialNumber => meta.serial_number = value.and_then(json_to_text),
            SoftwareVersion => meta.software_version = value.and_then(json_to_text),
            RadiosondeType => meta.radiosonde_type = value.and_then(json_to_text),
            OperatingFrequency => {
                meta.frequency = value
                    .and_then(json_to_text)
                    .map(|freq| freq + units.unwrap_or(""));
            }
            UnexpandedDescriptors => {
                meta.bufr_msg = match value {
                    Some(code) => whole_number(Some(code)),
                    None => {
                        log::warn!(
                            "no single message format identifier, assuming {}",
                            fallback_format
                        );
                        Some(fallback_format)
                    }
                };
            }
        }
    }

    equalize_lengths(&mut snd);

    let launch_time = launch.assemble();
    if launch_time.is_none() {
        log::warn!("incomplete or invalid launch time: {:?}", launch);
    }

    log::debug!(
        "extracted {} samples, message format {:?}",
        snd.len(),
        meta.bufr_msg
    );

    Ok(snd
        .with_station_info(station)
        .with_launch_time(launch_time)
        .with_meta_data(meta))
}

/// Append a sample to a profile and check its unit against the units seen before.
fn append(
    snd: &mut Sounding,
    var: Variable,
    value: Option<&Value>,
    units: Option<&str>,
) -> Result<()> {
    let series = snd.series_mut(var);
    series.push(number(value));

    match units {
        Some(unit) => series.check_unit(var, unit),
        None => Ok(()),
    }
}

/// Pad every profile that is behind the time profile with missing values.
fn ensure_measurement_integrity(snd: &mut Sounding) {
    let len = snd.series(Variable::Time).len();

    for var in Variable::iter().filter(|&var| var != Variable::Time) {
        snd.series_mut(var).pad_to(len);
    }
}

/// Final completeness pass, after which every profile has the same length.
///
/// Normally this only pads the profiles missing from the last sample. A profile that received
/// more values than there are times pads the time profile too, those rows have no time and are
/// dropped later with the fixed level rows.
fn equalize_lengths(snd: &mut Sounding) {
    ensure_measurement_integrity(snd);

    let time_len = snd.series(Variable::Time).len();
    let max_len = Variable::iter()
        .map(|var| snd.series(var).len())
        .max()
        .unwrap_or(0);

    if max_len > time_len {
        log::warn!(
            "{} samples without a time value, padding the time profile",
            max_len - time_len
        );
    }

    for var in Variable::iter() {
        snd.series_mut(var).pad_to(max_len);
    }
}

fn number(value: Option<&Value>) -> Optioned<f64> {
    value.map(json_to_optioned).unwrap_or_default()
}

fn whole_number<T: std::convert::TryFrom<i64>>(value: Option<&Value>) -> Option<T> {
    number(value)
        .into_option()
        .and_then(|val| T::try_from(val.trunc() as i64).ok())
}

#[derive(Debug, Default)]
struct LaunchTimeFields {
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    hour: Option<u32>,
    minute: Option<u32>,
    second: Option<u32>,
}

impl LaunchTimeFields {
    fn assemble(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year?, self.month?, self.day?)?.and_hms_opt(
            self.hour?,
            self.minute?,
            self.second?,
        )
    }
}
