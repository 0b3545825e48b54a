//! Visibility of exported declarations on the managed side.

use std::fmt;
use std::str::FromStr;

/// Visibility modifier applied to a managed wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    #[default]
    Public,
    Internal,
    Private,
}

impl Visibility {
    /// The managed-language keyword for this visibility.
    pub const fn keyword(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Internal => "internal",
            Visibility::Private => "private",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for Visibility {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Visibility::Public),
            "internal" => Ok(Visibility::Internal),
            "private" => Ok(Visibility::Private),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_keywords() {
        assert_eq!("internal".parse::<Visibility>(), Ok(Visibility::Internal));
        assert_eq!("private".parse::<Visibility>(), Ok(Visibility::Private));
        assert!("protected".parse::<Visibility>().is_err());
    }

    #[test]
    fn display_matches_keyword() {
        assert_eq!(Visibility::default().to_string(), "public");
    }
}
