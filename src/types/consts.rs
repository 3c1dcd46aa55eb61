/// File names ending with this suffix are removed by `remove-type-json`.
pub const TYPE_JSON_SUFFIX: &str = ".type.json";

/// `YYYY-MM-DD_HH-MM-SS.mmm`, naive local time.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S%.3f";

pub const IMAGE_NAME_PATTERN: &str =
    r"^([0-9]{4}-[0-9]{2}-[0-9]{2}_[0-9]{2}-[0-9]{2}-[0-9]{2}\.[0-9]{3}).*\.(png|jpg|jpeg)$";

pub const PROGRESS_INTERVAL: usize = 10;

pub const DEFAULT_LOG_FILTER: &str = "timelapse_tools=info";
