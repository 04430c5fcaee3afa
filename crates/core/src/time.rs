use chrono::{DateTime, Utc};

/// Time source shared by services so quiz timestamps are testable.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn system() -> Self {
        Self::System
    }

    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }
}

/// Deterministic timestamp for tests (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Duration;

    #[test]
    fn fixed_clock_is_frozen() {
        let clock = Clock::fixed(fixed_now());
        assert_eq!(clock.now(), fixed_now());
        assert_eq!(clock.now().to_rfc3339(), "2023-11-14T22:13:20+00:00");
    }

    #[test]
    fn system_clock_follows_wall_time() {
        let before = Utc::now();
        let now = Clock::system().now();
        assert!(now >= before && now < before + Duration::minutes(1));
    }
}
