/// Application name
pub const APP_NAME: &str = "SimpleUi";

/// Minimum length (in characters, after trimming) of a download registration name
pub const MIN_DOWNLOAD_NAME_LEN: usize = 3;

/// Author recorded for feedback submitted without a name
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

/// Lowest accepted star rating
pub const MIN_RATING: u8 = 1;

/// Highest accepted star rating
pub const MAX_RATING: u8 = 5;

/// Rating used when a submission does not carry one (matches the form slider default)
pub const DEFAULT_RATING: u8 = MAX_RATING;

/// `chrono` format of the `date` column in the feedback and downloads tables
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Default file name of the downloadable artifact
pub const ARTIFACT_FILE_NAME: &str = "SimpleUiBeta.apk";

/// Default MIME type of the downloadable artifact
pub const ARTIFACT_MIME: &str = "application/vnd.android.package-archive";

/// Default database file name
pub const DATABASE_FILE_NAME: &str = "downloads.db";

/// Default HTTP API port (server)
pub const DEFAULT_HTTP_PORT: u16 = 8080;
