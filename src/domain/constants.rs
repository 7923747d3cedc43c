/// Extended attribute macOS attaches to downloaded files.
pub const QUARANTINE_ATTR: &str = "com.apple.quarantine";

/// `QTN_FLAG_USER_APPROVED`: set once the user approved the first launch.
pub const QTN_FLAG_USER_APPROVED: u32 = 0x0040;

/// Observed on items macOS still considers unapproved. Not named in any
/// public Apple header, so treat it as a heuristic.
pub const QTN_FLAG_UNAPPROVED: u32 = 0x0200;

pub const APP_BUNDLE_EXTENSION: &str = "app";

/// Substring of `file` output identifying a compiled macOS binary.
pub const MACHO_MARKER: &str = "Mach-O";

pub const DEFAULT_GROUP: &str = "custom";

pub const DEFAULT_BREW: &str = "/opt/homebrew/bin/brew";
pub const DEFAULT_BREW_PREFIX: &str = "/opt/homebrew";
pub const DEFAULT_CASKS_FILE: &str = "modules/darwin/casks.nix";
