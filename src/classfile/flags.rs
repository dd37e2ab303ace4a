//! Access-flag wire constants and the visibility lattice.
//!
//! The bit assignments are fixed by the class-file format and must never be
//! redefined: public=0x0001, private=0x0002, protected=0x0004, static=0x0008,
//! final=0x0010.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const ACC_PUBLIC: u16 = 0x0001;
pub const ACC_PRIVATE: u16 = 0x0002;
pub const ACC_PROTECTED: u16 = 0x0004;
pub const ACC_STATIC: u16 = 0x0008;
pub const ACC_FINAL: u16 = 0x0010;
pub const ACC_INTERFACE: u16 = 0x0200;
pub const ACC_ABSTRACT: u16 = 0x0400;
pub const ACC_SYNTHETIC: u16 = 0x1000;

/// Visibility of a class or member, ordered for compatibility
/// classification: `Private < PackagePrivate < Protected < Public`.
///
/// Widening visibility is safe for callers; narrowing is breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Visibility {
    Private,
    PackagePrivate,
    Protected,
    Public,
}

impl Visibility {
    /// Derive the dominant visibility from an access-flag mask.
    ///
    /// Bits are tested in priority order public, protected, private; a mask
    /// with none of the three set is package-private.
    #[must_use]
    pub fn from_flags(access: u16) -> Self {
        if access & ACC_PUBLIC != 0 {
            Self::Public
        } else if access & ACC_PROTECTED != 0 {
            Self::Protected
        } else if access & ACC_PRIVATE != 0 {
            Self::Private
        } else {
            Self::PackagePrivate
        }
    }

    /// Rank used by the classifier: public=3, protected=2,
    /// package-private=1, private=0.
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            Self::Public => 3,
            Self::Protected => 2,
            Self::PackagePrivate => 1,
            Self::Private => 0,
        }
    }

    /// The source-level keyword for this visibility.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
            Self::PackagePrivate => "package-private",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Render the dominant visibility keyword for an access-flag mask.
///
/// Only the dominant keyword is rendered in change-record signatures; the
/// remaining modifier bits are compared but not printed.
#[must_use]
pub fn dominant_visibility(access: u16) -> &'static str {
    Visibility::from_flags(access).keyword()
}
