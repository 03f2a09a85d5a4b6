use serde::Serialize;

use crate::errors::ConfigError;

/// The tallest building a search is planned for. Its plan holds about 1.5 million drops.
pub const MAX_FLOORS: u64 = 1 << 40;

/// A building and its hidden breaking floor.
///
/// Both values are checked on construction: there is at least one floor and
/// at most [`MAX_FLOORS`], and the breaking floor is one of them. A new search
/// needs a new configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SearchConfig {
    floors: u64,
    secret: u64,
}

impl SearchConfig {
    pub fn new(floors: u64, secret: u64) -> Result<Self, ConfigError> {
        let floors = Self::check_floors(floors)?;
        if secret >= floors {
            return Err(ConfigError::SecretOutOfRange { secret, floors });
        }
        Ok(SearchConfig { floors, secret })
    }

    /// Checks a number of floors on its own, before any breaking floor is known
    pub fn check_floors(floors: u64) -> Result<u64, ConfigError> {
        match floors {
            0 => Err(ConfigError::NoFloors),
            f if f > MAX_FLOORS => Err(ConfigError::TooManyFloors { floors, max: MAX_FLOORS }),
            f => Ok(f),
        }
    }

    /// Number of floors, numbered from 0 to `floors - 1`
    pub fn floors(&self) -> u64 {
        self.floors
    }

    /// The lowest floor from which a probe breaks
    pub fn secret(&self) -> u64 {
        self.secret
    }
}

impl std::fmt::Display for SearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} floors, breaking from floor {}", self.floors, self.secret)
    }
}

#[test]
fn test_rejects_empty_building() {
    assert!(matches!(SearchConfig::new(0, 0), Err(ConfigError::NoFloors)));
}

#[test]
fn test_rejects_secret_outside_building() {
    match SearchConfig::new(10, 10) {
        Err(ConfigError::SecretOutOfRange { secret, floors }) => {
            assert_eq!((secret, floors), (10, 10))
        }
        other => panic!("expected an out of range error, got {:?}", other),
    }
}

#[test]
fn test_accepts_bounds() {
    let lowest = SearchConfig::new(1, 0).unwrap();
    assert_eq!((lowest.floors(), lowest.secret()), (1, 0));
    let highest = SearchConfig::new(10, 9).unwrap();
    assert_eq!(highest.to_string(), "10 floors, breaking from floor 9");
}

#[test]
fn test_rejects_oversized_building() {
    match SearchConfig::new(u64::MAX, 0) {
        Err(ConfigError::TooManyFloors { floors, max }) => assert_eq!((floors, max), (u64::MAX, MAX_FLOORS)),
        other => panic!("expected a too many floors error, got {:?}", other),
    }
    assert!(SearchConfig::new(MAX_FLOORS + 1, 0).is_err());
    let tallest = SearchConfig::new(MAX_FLOORS, MAX_FLOORS - 1).unwrap();
    assert_eq!(tallest.floors(), MAX_FLOORS);
}
