//! Enums used as keys for the variables in a sounding and the fields of a BUFR message.

use crate::error::{BufrError, Result};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// The measured profiles stored in a `Sounding`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Variable {
    /// Time since launch.
    Time,
    /// Pressure.
    Pressure,
    /// Air temperature.
    Temperature,
    /// Dew point temperature.
    DewPoint,
    /// Wind speed.
    WindSpeed,
    /// Wind direction.
    WindDirection,
    /// Non-coordinate geopotential height.
    GeopotentialHeight,
    /// Latitude displacement since launch.
    LatitudeDisplacement,
    /// Longitude displacement since launch.
    LongitudeDisplacement,
}

impl Variable {
    /// The unit every profile is converted to before any derived quantity is calculated.
    pub fn target_unit(self) -> &'static str {
        use Variable::*;

        match self {
            Time => "s",
            Pressure => "hPa",
            Temperature | DewPoint => "degC",
            WindSpeed => "m/s",
            WindDirection => "deg",
            GeopotentialHeight => "gpm",
            LatitudeDisplacement | LongitudeDisplacement => "deg",
        }
    }
}

/// Profiles calculated from the measured profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum DerivedVariable {
    /// Ascent rate (m/s)
    AscentRate,
    /// Relative humidity (%)
    RelativeHumidity,
    /// Water vapor pressure (Pa)
    VaporPressure,
    /// Water vapor mixing ratio (g/kg)
    MixingRatio,
    /// Latitude of the sonde (degrees north)
    Latitude,
    /// Longitude of the sonde (degrees east)
    Longitude,
}

/// Field names in a decoded BUFR message that the extractor knows how to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
pub enum BufrField {
    /// Station latitude
    #[strum(serialize = "latitude")]
    Latitude,
    /// Station longitude
    #[strum(serialize = "longitude")]
    Longitude,
    /// `pressure`
    #[strum(serialize = "pressure")]
    Pressure,
    /// `windSpeed`
    #[strum(serialize = "windSpeed")]
    WindSpeed,
    /// `windDirection`
    #[strum(serialize = "windDirection")]
    WindDirection,
    /// `nonCoordinateGeopotentialHeight`
    #[strum(serialize = "nonCoordinateGeopotentialHeight")]
    GeopotentialHeight,
    /// `airTemperature`
    #[strum(serialize = "airTemperature")]
    AirTemperature,
    /// `dewpointTemperature`
    #[strum(serialize = "dewpointTemperature")]
    DewPointTemperature,
    /// `latitudeDisplacement`
    #[strum(serialize = "latitudeDisplacement")]
    LatitudeDisplacement,
    /// `longitudeDisplacement`
    #[strum(serialize = "longitudeDisplacement")]
    LongitudeDisplacement,
    /// Time since launch
    #[strum(serialize = "timePeriod")]
    TimePeriod,
    /// `year`
    #[strum(serialize = "year")]
    Year,
    /// `month`
    #[strum(serialize = "month")]
    Month,
    /// `day`
    #[strum(serialize = "day")]
    Day,
    /// `hour`
    #[strum(serialize = "hour")]
    Hour,
    /// `minute`
    #[strum(serialize = "minute")]
    Minute,
    /// `second`
    #[strum(serialize = "second")]
    Second,
    /// `radiosondeSerialNumber`
    #[strum(serialize = "radiosondeSerialNumber")]
    SerialNumber,
    /// `softwareVersionNumber`
    #[strum(serialize = "softwareVersionNumber")]
    SoftwareVersion,
    /// `radiosondeType`
    #[strum(serialize = "radiosondeType")]
    RadiosondeType,
    /// `radiosondeOperatingFrequency`
    #[strum(serialize = "radiosondeOperatingFrequency")]
    OperatingFrequency,
    /// The message template, e.g. 309057
    #[strum(serialize = "unexpandedDescriptors")]
    UnexpandedDescriptors,
}

/// Direction of travel of the sonde.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Radiosonde ascent.
    Upward,
    /// Radiosonde descent or dropsonde.
    Downward,
}

impl Direction {
    /// +1 for upward, -1 for downward.
    #[inline]
    pub fn sign(self) -> i8 {
        match self {
            Direction::Upward => 1,
            Direction::Downward => -1,
        }
    }
}

/// The BUFR templates this crate knows how to process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageFormat {
    /// BUFR 309053
    Dropsonde,
    /// BUFR 309056
    RadiosondeDescent,
    /// BUFR 309057
    RadiosondeAscent,
}

impl MessageFormat {
    /// Code used when the format field could not be resolved to a single value.
    pub const DROPSONDE_CODE: u32 = 309_053;

    /// Map a message format identifier to a known template.
    pub fn from_code(code: u32) -> Result<Self> {
        match code {
            309_053 => Ok(MessageFormat::Dropsonde),
            309_056 => Ok(MessageFormat::RadiosondeDescent),
            309_057 => Ok(MessageFormat::RadiosondeAscent),
            _ => Err(BufrError::UnrecognizedMessageFormat(code)),
        }
    }

    /// The numeric identifier of this template.
    pub fn code(self) -> u32 {
        match self {
            MessageFormat::Dropsonde => 309_053,
            MessageFormat::RadiosondeDescent => 309_056,
            MessageFormat::RadiosondeAscent => 309_057,
        }
    }

    /// Direction of the sounding.
    pub fn direction(self) -> Direction {
        match self {
            MessageFormat::Dropsonde | MessageFormat::RadiosondeDescent => Direction::Downward,
            MessageFormat::RadiosondeAscent => Direction::Upward,
        }
    }
}
