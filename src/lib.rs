#![warn(missing_docs)]
//! Functions and data types for reconstructing soundings from decoded BUFR radiosonde and
//! dropsonde messages.
//!
//! A message decoded to JSON (for example by `bufr_dump -j s`) is processed in stages:
//!
//!  1. `flatten` turns the nested message into ordered leaf entries.
//!  2. `extract` rebuilds the per variable profiles, padding missing samples.
//!  3. `normalize` converts every profile to the units expected downstream.
//!  4. `calculate_derived` adds ascent rate, humidity variables and the sonde position.
//!  5. `reorder` sorts the rows by time for the direction of the sounding and drops the rows
//!     without a time value.
//!
//! `Pipeline` runs all of them.
//!
//! ```rust
//! use serde_json::json;
//! use sounding_bufr::{process, Direction};
//!
//! let msg = json!({"messages": [
//!     {"key": "unexpandedDescriptors", "value": 309057},
//!     {"key": "timePeriod", "value": 0, "units": "s"},
//!     {"key": "airTemperature", "value": 300.0, "units": "K"},
//!     {"key": "timePeriod", "value": 1, "units": "s"},
//!     {"key": "airTemperature", "value": 290.0, "units": "K"},
//! ]});
//!
//! let snd = process(&msg).unwrap();
//!
//! assert_eq!(snd.direction(), Some(Direction::Upward));
//! assert!((snd.temperature_profile()[1].unwrap() - 16.85).abs() < 1.0e-9);
//! ```

//
// API
//
pub use crate::{
    error::{BufrError, Result},
    extract::{extract, extract_with_fallback},
    flatten::{flatten, FlatKey, FlatRecord},
    keys::{BufrField, DerivedVariable, Direction, MessageFormat, Variable},
    pipeline::{process, Pipeline},
    profile::{
        ascent_rate, calculate_derived, mixing_ratio, position, relative_humidity,
        temporal_resolution, vapor_pressure,
    },
    reorder::{
        align_profiles, remove_fixed_levels, reorder, sort_by_time, sort_order, sounding_direction,
    },
    sounding::{DataRow, MetaData, Series, Sounding, StationInfo},
    units::{kelvin_to_celsius, normalize, pascal_to_hectopascal, Converter, UnitRegistry},
};

pub mod profile;

//
// Internal use only
//
mod error;
mod extract;
mod flatten;
mod keys;
mod pipeline;
mod reorder;
mod sounding;
mod units;
mod utility;
