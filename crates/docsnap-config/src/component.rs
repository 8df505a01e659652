//! Recognized documentation component types.

use std::fmt;
use std::str::FromStr;

/// Top-level category of documentation content.
///
/// Each component type owns one subfolder under the docs source directory and
/// one under the artifact directory. The set is closed; adding a type means
/// adding a variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentType {
    Builders,
    Datasources,
    PostProcessors,
    Provisioners,
}

impl ComponentType {
    /// Every recognized component type, in processing order.
    pub const ALL: [Self; 4] = [
        Self::Builders,
        Self::Datasources,
        Self::PostProcessors,
        Self::Provisioners,
    ];

    /// Subfolder name for this component type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Builders => "builders",
            Self::Datasources => "datasources",
            Self::PostProcessors => "post-processors",
            Self::Provisioners => "provisioners",
        }
    }

    /// Subfolder names of every recognized type, for error messages.
    #[must_use]
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|c| c.as_str()).collect()
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognized component type name.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown component type \"{0}\"")]
pub struct UnknownComponentType(pub String);

impl FromStr for ComponentType {
    type Err = UnknownComponentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownComponentType(s.to_owned()))
    }
}
