// src/constants.rs

/// The default dotenv file loaded at startup, relative to the working directory.
pub const ENV_FILENAME: &str = ".env";

/// Env key holding the `;`-separated list of git user names.
pub const USERNAMES_KEY: &str = "USERNAMES";

/// Env key holding the `;`-separated list of git user emails.
pub const EMAILS_KEY: &str = "EMAILS";

/// Env key holding the `;`-separated list of clone URLs.
pub const URLS_KEY: &str = "URLS";

/// Env key holding the `;`-separated list of clone target directories.
pub const REPO_NAMES_KEY: &str = "REPO_NAMES";

/// Delimiter set used for all of the lists above.
pub const LIST_DELIMITERS: &str = ";";

/// The disposable branch the fetch flow snapshots onto before pruning.
pub const SNAPSHOT_BRANCH: &str = "_cache_";
