//! Reading the `com.apple.quarantine` attribute.
//!
//! Every check here degrades to "not flagged" when a tool fails or the value
//! is malformed.

use crate::domain::constants::{QTN_FLAG_UNAPPROVED, QTN_FLAG_USER_APPROVED};
use crate::services::tools::SystemTools;
use std::path::Path;

/// The hex flag word leading a quarantine value such as
/// `0083;65a1b2c3;Safari;F5A1...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuarantineFlags(pub u32);

impl QuarantineFlags {
    /// Words wider than 32 bits keep their low 32 bits, which hold every
    /// flag the verdict looks at.
    pub fn parse(value: &str) -> Option<Self> {
        let field = value.trim().split(';').next().unwrap_or("").trim();
        let digits = field
            .strip_prefix("0x")
            .or_else(|| field.strip_prefix("0X"))
            .unwrap_or(field);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let low = &digits[digits.len().saturating_sub(8)..];
        u32::from_str_radix(low, 16).ok().map(Self)
    }

    pub fn user_approved(self) -> bool {
        self.0 & QTN_FLAG_USER_APPROVED != 0
    }

    /// Unapproved and not yet approved by the user.
    pub fn is_blocked(self) -> bool {
        self.0 & QTN_FLAG_UNAPPROVED != 0 && !self.user_approved()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuarantineState {
    Blocked,
    NotBlocked,
    /// The attribute was missing, unreadable or malformed.
    Indeterminate,
}

pub fn has_quarantine_marker(tools: &dyn SystemTools, path: &Path) -> bool {
    match tools.read_quarantine(path) {
        Ok(out) => out.success,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "quarantine query failed");
            false
        }
    }
}

pub fn approval_state(tools: &dyn SystemTools, path: &Path) -> QuarantineState {
    let out = match tools.read_quarantine(path) {
        Ok(out) if out.success => out,
        Ok(_) => return QuarantineState::Indeterminate,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "quarantine query failed");
            return QuarantineState::Indeterminate;
        }
    };
    match QuarantineFlags::parse(&out.stdout) {
        Some(flags) if flags.is_blocked() => QuarantineState::Blocked,
        Some(_) => QuarantineState::NotBlocked,
        None => {
            tracing::debug!(
                path = %path.display(),
                value = out.stdout.trim(),
                "unparseable quarantine flags"
            );
            QuarantineState::Indeterminate
        }
    }
}

pub fn is_approval_blocked(tools: &dyn SystemTools, path: &Path) -> bool {
    approval_state(tools, path) == QuarantineState::Blocked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::tools::fake::FakeTools;

    #[test]
    fn unapproved_bit_blocks_unless_user_approved() {
        assert!(QuarantineFlags::parse("0x0200").unwrap().is_blocked());
        assert!(!QuarantineFlags::parse("0x0240").unwrap().is_blocked());
        assert!(!QuarantineFlags::parse("0x0000").unwrap().is_blocked());
        assert!(QuarantineFlags::parse("zz").is_none());
    }

    #[test]
    fn only_the_first_field_is_parsed() {
        let flags = QuarantineFlags::parse("0283;65a1b2c3;Safari;F5A1B2C3-0000\n").unwrap();
        assert_eq!(flags, QuarantineFlags(0x0283));
        assert!(flags.is_blocked());

        let flags = QuarantineFlags::parse("256;65a1b2c3;Chrome;").unwrap();
        assert!(flags.user_approved());
        assert!(!flags.is_blocked());

        assert!(QuarantineFlags::parse("").is_none());
        assert!(QuarantineFlags::parse("+200").is_none());
        assert!(QuarantineFlags::parse(";65a1b2c3").is_none());
    }

    #[test]
    fn marker_follows_query_success() {
        let tools = FakeTools::default().with_quarantine("/Applications/Foo.app", "0081;x;y;z");
        assert!(has_quarantine_marker(&tools, Path::new("/Applications/Foo.app")));
        assert!(!has_quarantine_marker(&tools, Path::new("/Applications/Bar.app")));
    }

    #[test]
    fn approval_state_separates_unknown_from_clear() {
        let tools = FakeTools::default()
            .with_quarantine("/a", "0200;x")
            .with_quarantine("/b", "0240;x")
            .with_quarantine("/c", "zz;x");
        assert_eq!(approval_state(&tools, Path::new("/a")), QuarantineState::Blocked);
        assert_eq!(approval_state(&tools, Path::new("/b")), QuarantineState::NotBlocked);
        assert_eq!(approval_state(&tools, Path::new("/c")), QuarantineState::Indeterminate);
        assert_eq!(approval_state(&tools, Path::new("/d")), QuarantineState::Indeterminate);
        assert!(is_approval_blocked(&tools, Path::new("/a")));
        assert!(!is_approval_blocked(&tools, Path::new("/c")));
    }

    #[test]
    fn tool_failures_never_flag() {
        let mut tools = FakeTools::default().with_quarantine("/a", "0200;x");
        tools.broken = true;
        assert!(!has_quarantine_marker(&tools, Path::new("/a")));
        assert!(!is_approval_blocked(&tools, Path::new("/a")));
        assert_eq!(approval_state(&tools, Path::new("/a")), QuarantineState::Indeterminate);
    }

    #[test]
    fn wide_flag_words_keep_their_low_bits() {
        let flags = QuarantineFlags::parse("100000200;x").unwrap();
        assert_eq!(flags, QuarantineFlags(0x0200));
        assert!(flags.is_blocked());
        assert!(!QuarantineFlags::parse("0xFFFFFFFF00000240;x").unwrap().is_blocked());
        assert!(QuarantineFlags::parse("10000020g;x").is_none());
    }
}
