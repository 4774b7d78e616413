use optional::Optioned;

/// Launch site of the sonde.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StationInfo {
    /// Latitude in degrees north.
    latitude: Optioned<f64>,
    /// Longitude in degrees east.
    longitude: Optioned<f64>,
}

impl StationInfo {
    /// Create a new object with default values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sounding_bufr::StationInfo;
    ///
    /// assert!(StationInfo::new().latitude().is_none());
    /// assert!(StationInfo::new().longitude().is_none());
    /// assert!(StationInfo::new().location().is_none());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to add a latitude.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sounding_bufr::StationInfo;
    /// use optional::none;
    ///
    /// let stn = StationInfo::new().with_latitude(13.16).with_longitude(-59.43);
    /// assert_eq!(stn.location().unwrap(), (13.16, -59.43));
    ///
    /// let stn = stn.with_latitude(none::<f64>());
    /// assert!(stn.location().is_none());
    /// ```
    #[inline]
    pub fn with_latitude<T>(mut self, latitude: T) -> Self
    where
        Optioned<f64>: From<T>,
    {
        self.latitude = Optioned::from(latitude);
        self
    }

    /// Builder method to add a longitude.
    #[inline]
    pub fn with_longitude<T>(mut self, longitude: T) -> Self
    where
        Optioned<f64>: From<T>,
    {
        self.longitude = Optioned::from(longitude);
        self
    }

    /// Latitude of the launch site.
    #[inline]
    pub fn latitude(&self) -> Optioned<f64> {
        self.latitude
    }

    /// Longitude of the launch site.
    #[inline]
    pub fn longitude(&self) -> Optioned<f64> {
        self.longitude
    }

    /// Latitude and longitude, if both are known.
    #[inline]
    pub fn location(&self) -> Option<(f64, f64)> {
        let lat = self.latitude.into_option()?;
        let lon = self.longitude.into_option()?;
        Some((lat, lon))
    }
}
