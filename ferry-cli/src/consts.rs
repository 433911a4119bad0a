//! Constants for the ferry CLI

/// Environment variable pointing at the Android NDK root
pub const ENV_ANDROID_NDK_HOME: &str = "ANDROID_NDK_HOME";

/// Build parameter set after a status was reported
pub const REPORTED_COMMIT_PARAMETER: &str = "env.FERRY_REPORTED_COMMIT";

/// Build parameter set after a third-party target was built
pub const THIRDPARTY_TARGET_PARAMETER: &str = "env.FERRY_THIRDPARTY_TARGET";

/// Address shown in crash reports
pub const SUPPORT_EMAIL: &str = "build@dava.engine";
