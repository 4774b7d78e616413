/// Auxiliary identifiers of the sonde and the message it came in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaData {
    pub(crate) serial_number: Option<String>,
    pub(crate) software_version: Option<String>,
    pub(crate) radiosonde_type: Option<String>,
    pub(crate) frequency: Option<String>,
    pub(crate) bufr_msg: Option<u32>,
}

impl MetaData {
    /// Create an empty set of metadata.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method for the message format identifier, e.g. 309057.
    #[inline]
    pub fn with_bufr_msg<T>(mut self, code: T) -> Self
    where
        Option<u32>: From<T>,
    {
        self.bufr_msg = Option::from(code);
        self
    }

    /// Builder method for the sonde serial number.
    #[inline]
    pub fn with_serial_number<T>(mut self, serial: T) -> Self
    where
        Option<String>: From<T>,
    {
        self.serial_number = Option::from(serial);
        self
    }

    /// Serial number of the sonde.
    #[inline]
    pub fn serial_number(&self) -> Option<&str> {
        self.serial_number.as_deref()
    }

    /// Version of the ground station software.
    #[inline]
    pub fn software_version(&self) -> Option<&str> {
        self.software_version.as_deref()
    }

    /// WMO radiosonde type code.
    #[inline]
    pub fn radiosonde_type(&self) -> Option<&str> {
        self.radiosonde_type.as_deref()
    }

    /// Operating frequency with its unit appended, e.g. "403000000Hz".
    #[inline]
    pub fn frequency(&self) -> Option<&str> {
        self.frequency.as_deref()
    }

    /// Message format identifier.
    #[inline]
    pub fn bufr_msg(&self) -> Option<u32> {
        self.bufr_msg
    }

    /// All available entries as `(attribute name, text)` pairs, ready to be written as global
    /// attributes of an output file.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sounding_bufr::MetaData;
    ///
    /// let meta = MetaData::new()
    ///     .with_serial_number("S2840143".to_owned())
    ///     .with_bufr_msg(309_057);
    ///
    /// assert_eq!(
    ///     meta.attributes(),
    ///     vec![
    ///         ("sonde_serial_number", "S2840143".to_owned()),
    ///         ("bufr_msg", "309057".to_owned()),
    ///     ]
    /// );
    /// ```
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        let text = [
            ("sonde_serial_number", self.serial_number.as_ref()),
            ("softwareVersionNumber", self.software_version.as_ref()),
            ("radiosondeType", self.radiosonde_type.as_ref()),
            ("sonde_frequency", self.frequency.as_ref()),
        ];

        text.iter()
            .filter_map(|&(name, val)| val.map(|v| (name, v.clone())))
            .chain(self.bufr_msg.map(|code| ("bufr_msg", code.to_string())))
            .collect()
    }
}
