//! Default configuration values

/// Port name the reference pipeline claims when no specialization does
pub const DEFAULT_PORT: &str = "unix";

/// Native MicroPython port every implemented port builds on
pub const BASE_PORT: &str = "unix";

/// Port name claimed by the macOS specialization
pub const MACOS_PORT: &str = "macOS";

/// Default build variant
pub const DEFAULT_VARIANT: &str = "standard";

/// Project settings file name
pub const SETTINGS_FILE: &str = "lvport.toml";

/// MicroPython checkout (build root), relative to the project root
pub const MICROPYTHON_DIR: &str = "lib/micropython";

/// LVGL checkout, relative to the project root
pub const LVGL_DIR: &str = "lib/lvgl";

/// SDL checkout, relative to the project root
pub const SDL_DIR: &str = "lib/SDL";

/// Working tree for port-specific source updates
pub const UPDATES_DIR: &str = "micropy_updates";

/// Top-level output directory for finished artifacts
pub const OUTPUT_DIR: &str = "build";

/// Generated manifest, relative to the script directory
pub const MANIFEST_PATH: &str = "build/manifest.py";

/// User C modules directory, relative to the script directory
pub const USER_C_MODULES_DIR: &str = "ext_mod";

/// Firmware binary produced by the unix port make
pub const FIRMWARE_BINARY: &str = "micropython";

/// Prefix of the firmware name copied to the output directory
pub const FIRMWARE_OUTPUT_PREFIX: &str = "lvgl_micropy_";

/// Subdirectory of the variant build dir holding the SDL build
pub const SDL_BUILD_SUBDIR: &str = "SDL";

/// SDL dynamic library shipped next to the macOS firmware
pub const SDL_DYLIB: &str = "libSDL2-2.0.0.dylib";

/// Variables the pipeline always sets on the make command line
pub const RESERVED_MAKE_VARS: &[&str] = &["LV_PORT", "USER_C_MODULES", "FROZEN_MANIFEST"];
