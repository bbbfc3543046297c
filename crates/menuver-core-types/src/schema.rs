//! Field and event names shared by the logging macros, the test capture
//! layer and anything that parses the JSON log stream.

pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_REQUEST_ID: &str = "request_id";
pub const FIELD_ACCOUNT_ID: &str = "account_id";
pub const FIELD_VERSION_ID: &str = "version_id";
pub const FIELD_ERR_CODE: &str = "err_code";

/// Operation boundary events
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
