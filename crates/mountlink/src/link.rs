//! Stable filesystem links of the form `TOKEN=VALUE`.

use std::fmt;
use std::str::FromStr;

use mountlink_common::MountError;

/// The token half of a link tag.
///
/// Only UUID links are supported: they are the one scheme whose symlink
/// directory the resolver knows how to consult.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkToken {
    /// A `/dev/disk/by-uuid` style link.
    Uuid,
}

impl LinkToken {
    /// The token's spelling in a link string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uuid => "UUID",
        }
    }
}

impl fmt::Display for LinkToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LinkToken {
    type Err = MountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UUID" => Ok(Self::Uuid),
            other => Err(MountError::UnsupportedToken {
                token: other.to_string(),
            }),
        }
    }
}

/// A validated `TOKEN=VALUE` link, as found in `/etc/fstab`.
///
/// Parsing only checks the tag syntax; whether the value actually names a
/// device is decided at resolution time, against the UUID symlink
/// directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    token: LinkToken,
    value: String,
}

impl Link {
    /// Create a UUID link for a value.
    #[must_use]
    pub fn uuid(value: impl Into<String>) -> Self {
        Self {
            token: LinkToken::Uuid,
            value: value.into(),
        }
    }

    /// The link's token.
    #[must_use]
    pub const fn token(&self) -> LinkToken {
        self.token
    }

    /// The link's value: the expected symlink name in the UUID directory.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.token, self.value)
    }
}

impl FromStr for Link {
    type Err = MountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let components: Vec<&str> = s.split('=').collect();
        let [token, value] = components[..] else {
            return Err(MountError::InvalidLink {
                link: s.to_string(),
            });
        };
        Ok(Self {
            token: token.parse()?,
            value: value.to_string(),
        })
    }
}
