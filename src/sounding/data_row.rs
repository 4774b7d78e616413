use optional::Optioned;

/// A copy of a row of the sounding data.
#[derive(Clone, Default, Copy, Debug, PartialEq)]
pub struct DataRow {
    /// Time since launch in seconds
    pub time: Optioned<f64>,
    /// Pressure in hPa
    pub pressure: Optioned<f64>,
    /// Temperature in C
    pub temperature: Optioned<f64>,
    /// Dew point in C
    pub dew_point: Optioned<f64>,
    /// Wind speed in m/s
    pub wind_speed: Optioned<f64>,
    /// Wind direction in degrees
    pub wind_direction: Optioned<f64>,
    /// Geopotential height in gpm
    pub height: Optioned<f64>,
    /// Ascent rate in m/s
    pub ascent_rate: Optioned<f64>,
    /// Relative humidity in percent
    pub relative_humidity: Optioned<f64>,
    /// Vapor pressure in Pa
    pub vapor_pressure: Optioned<f64>,
    /// Mixing ratio in g/kg
    pub mixing_ratio: Optioned<f64>,
    /// Latitude in degrees north
    pub latitude: Optioned<f64>,
    /// Longitude in degrees east
    pub longitude: Optioned<f64>,
}
