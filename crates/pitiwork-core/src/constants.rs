/// Upper bound on cursor steps taken while walking a single recurrence pattern.
pub const DEFAULT_MAX_ITERATIONS: usize = 3650;

/// Years added past the end of a query window to bound patterns without an end date.
pub const DEFAULT_HORIZON_YEARS: u32 = 5;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Root element of a serialized recurrence descriptor.
pub const DESCRIPTOR_ROOT: &str = "RecurrenceInfo";

/// `chrono` format of the `Start` and `End` descriptor attributes (`MM/DD/YYYY HH:mm:ss`).
pub const DESCRIPTOR_DATETIME_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

/// Descriptor format version written by the encoder.
pub const DESCRIPTOR_VERSION: &str = "2";
