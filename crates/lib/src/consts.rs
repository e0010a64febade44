/// Application name used in log targets and user-facing messages.
pub const APP_NAME: &str = "extinstall";

/// Default file name of the extension manifest.
pub const MANIFEST_FILENAME: &str = "extinstall.toml";

/// Default build directory, relative to the manifest.
pub const DEFAULT_BUILD_DIR: &str = "build";

/// Default CMake build type.
pub const DEFAULT_BUILD_TYPE: &str = "Release";

/// Environment variable overriding the CMake build type.
pub const ENV_BUILD_TYPE: &str = "EXTINSTALL_BUILD_TYPE";

/// Environment variable overriding the number of parallel build jobs.
pub const ENV_JOBS: &str = "EXTINSTALL_JOBS";

/// Environment variable naming the cmake executable.
pub const ENV_CMAKE: &str = "EXTINSTALL_CMAKE";
