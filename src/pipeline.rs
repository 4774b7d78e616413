//! Run every stage from a decoded message to a sorted sounding with derived profiles.

use serde_json::Value;

use crate::{
    error::Result,
    extract::extract_with_fallback,
    flatten::{flatten, FlatRecord},
    keys::MessageFormat,
    profile::calculate_derived,
    reorder::{remove_fixed_levels, sort_by_time, sounding_direction},
    sounding::Sounding,
    units::{normalize, UnitRegistry},
};

/// Options for processing messages into soundings.
///
/// A pipeline holds no state between messages, so one instance can be shared by any number of
/// threads each processing their own messages.
///
/// # Examples
///
/// ```rust
/// use serde_json::json;
/// use sounding_bufr::Pipeline;
///
/// let msg = json!({"messages": [
///     {"key": "unexpandedDescriptors", "value": 309057},
///     {"key": "timePeriod", "value": null, "units": "s"},
///     {"key": "pressure", "value": 100_000, "units": "Pa"},
///     {"key": "timePeriod", "value": 1, "units": "s"},
///     {"key": "pressure", "value": 100_940, "units": "Pa"},
///     {"key": "timePeriod", "value": 0, "units": "s"},
///     {"key": "pressure", "value": 101_000, "units": "Pa"},
/// ]});
///
/// let snd = Pipeline::new().process(&msg).unwrap();
/// assert_eq!(snd.len(), 2);
/// assert_eq!(snd.pressure_profile()[0].unwrap(), 1010.0);
///
/// let snd = Pipeline::new().with_fixed_level_filter(false).process(&msg).unwrap();
/// assert_eq!(snd.len(), 3);
/// assert!(snd.time_profile()[2].is_none());
/// ```
#[derive(Clone, Debug)]
pub struct Pipeline {
    registry: UnitRegistry,
    fallback_format: u32,
    filter_fixed_levels: bool,
}

impl Default for Pipeline {
    fn default() -> Self {
        Pipeline {
            registry: UnitRegistry::default(),
            fallback_format: MessageFormat::DROPSONDE_CODE,
            filter_fixed_levels: true,
        }
    }
}

impl Pipeline {
    /// Default options, the standard unit conversions with fixed level rows removed.
    #[inline]
    pub fn new() -> Self {
        Pipeline::default()
    }

    /// Builder method for the unit conversions.
    #[inline]
    pub fn with_unit_registry(mut self, registry: UnitRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Builder method for the format assumed when a message has no single format identifier.
    #[inline]
    pub fn with_fallback_format(mut self, format: MessageFormat) -> Self {
        self.fallback_format = format.code();
        self
    }

    /// Builder method to keep or remove the rows without a time value.
    #[inline]
    pub fn with_fixed_level_filter(mut self, filter: bool) -> Self {
        self.filter_fixed_levels = filter;
        self
    }

    /// Unit conversions in use.
    #[inline]
    pub fn unit_registry(&self) -> &UnitRegistry {
        &self.registry
    }

    /// Flatten a decoded message and process it.
    pub fn process(&self, message: &Value) -> Result<Sounding> {
        self.process_flat(&flatten(message))
    }

    /// Process an already flattened message.
    ///
    /// Nothing is returned unless every stage succeeds.
    pub fn process_flat(&self, flat: &FlatRecord) -> Result<Sounding> {
        let mut snd = extract_with_fallback(flat, self.fallback_format)?;

        normalize(&mut snd, &self.registry)?;
        calculate_derived(&mut snd);

        let direction = sounding_direction(&snd)?;
        snd.set_direction(direction);
        sort_by_time(&mut snd, direction);

        if self.filter_fixed_levels {
            let removed = remove_fixed_levels(&mut snd);
            log::debug!("removed {} fixed level rows", removed);
        }

        log::debug!(
            "processed {:?} sounding with {} rows from message format {:?}",
            direction,
            snd.len(),
            snd.meta_data().bufr_msg()
        );

        Ok(snd)
    }
}

/// Process a decoded message with the default options.
pub fn process(message: &Value) -> Result<Sounding> {
    Pipeline::new().process(message)
}
