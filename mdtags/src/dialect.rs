use std::fmt;
use std::str::FromStr;

use crate::error::ConfigurationError;
use crate::node::Kind;

/// A target markdown flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dialect {
    #[default]
    Basic,
    Reddit,
}

impl Dialect {
    pub const ALL: [Dialect; 2] = [Dialect::Basic, Dialect::Reddit];

    pub fn name(self) -> &'static str {
        match self {
            Dialect::Basic => "basic",
            Dialect::Reddit => "reddit",
        }
    }

    /// Kinds this dialect rejects wherever they appear.
    pub fn forbids(self, kind: Kind) -> bool {
        matches!((self, kind), (Dialect::Reddit, Kind::Image))
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dialect::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigurationError::UnknownDialect(s.to_string()))
    }
}
