use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Platform names eligible for announcement. Names are compared case-insensitively.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AllowList(Vec<String>);

impl AllowList {
    pub fn new<S: AsRef<str>>(names: impl IntoIterator<Item = S>) -> Self {
        let mut platforms: Vec<String> = Vec::new();
        for name in names {
            let name = name.as_ref().trim().to_lowercase();
            if !name.is_empty() && !platforms.contains(&name) {
                platforms.push(name);
            }
        }
        Self(platforms)
    }

    pub fn contains(&self, platform: &str) -> bool {
        let platform = platform.trim().to_lowercase();
        self.0.contains(&platform)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for AllowList {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s.split(',')))
    }
}

impl Display for AllowList {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.join(","))
    }
}
