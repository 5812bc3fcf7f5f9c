/// The maximum number of options a [`Registry`](crate::Registry) accepts.
pub const MAX_ARGS: usize = 40;

/// The exclusive upper bound on captured string length.
pub const MAX_STRING_SIZE: usize = 80;

pub(crate) const HELP_NAME: &str = "help";
pub(crate) const HELP_MESSAGE: &str = "Show this usage message and exit";
