//! Time-based address IDs.

use vitrin_core::AddressId;

/// Source of the current time in milliseconds since the Unix epoch.
pub trait Clock {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
}

/// Wall-clock time from `chrono`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

impl<F: Fn() -> i64> Clock for F {
    fn now_millis(&self) -> i64 {
        self()
    }
}

/// Issues strictly increasing address IDs from a [`Clock`].
///
/// The ID is the creation timestamp unless the clock has not moved past the
/// last ID handed out (or the largest ID already saved), in which case it is
/// one more than that.
#[derive(Debug, Clone, Default)]
pub struct AddressIds<C> {
    clock: C,
    last: Option<i64>,
}

impl<C: Clock> AddressIds<C> {
    /// Create an issuer reading from `clock`.
    pub const fn new(clock: C) -> Self {
        Self { clock, last: None }
    }

    /// Next ID, greater than every ID in `taken`.
    pub fn next(&mut self, taken: impl IntoIterator<Item = AddressId>) -> AddressId {
        let now = self.clock.now_millis();
        let floor = taken
            .into_iter()
            .map(|id| id.as_i64())
            .chain(self.last)
            .max();

        let id = match floor {
            Some(floor) if now <= floor => floor.saturating_add(1),
            _ => now,
        };
        self.last = Some(id);
        AddressId::new(id)
    }
}
