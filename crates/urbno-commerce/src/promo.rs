//! Drop countdowns, the flash-sale banner and the exit-intent offer.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Days until the next drop when no date is announced.
pub const DEFAULT_DROP_DAYS: i64 = 7;

/// Discount advertised by the flash-sale banner by default.
pub const DEFAULT_FLASH_DISCOUNT: u32 = 25;

/// Discount offered by the exit-intent popup by default.
pub const DEFAULT_EXIT_DISCOUNT: u32 = 10;

/// Seconds on a page before the exit-intent offer shows by itself.
pub const EXIT_OFFER_DELAY_SECS: i64 = 30;

/// Store key of the exit-intent shown flag.
pub const EXIT_OFFER_KEY: &str = "urbno_exit_popup_shown";

/// Remaining time split into countdown units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeLeft {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl TimeLeft {
    /// Time from `now` until `target`; all zero once it has passed.
    pub fn until(target: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let total = (target - now).num_seconds();
        if total <= 0 {
            return Self::default();
        }
        Self {
            days: total / 86_400,
            hours: (total / 3_600) % 24,
            minutes: (total / 60) % 60,
            seconds: total % 60,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.total_seconds() == 0
    }

    pub fn total_seconds(&self) -> i64 {
        self.days * 86_400 + self.hours * 3_600 + self.minutes * 60 + self.seconds
    }

    /// Hours including whole days, for countdowns without a day column.
    pub fn total_hours(&self) -> i64 {
        self.days * 24 + self.hours
    }
}

impl fmt::Display for TimeLeft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}d {:02}h {:02}m {:02}s",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// The next limited drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyDrop {
    pub starts_at: DateTime<Utc>,
}

impl WeeklyDrop {
    /// A drop `days` days after `now`.
    pub fn in_days(now: DateTime<Utc>, days: i64) -> Self {
        Self {
            starts_at: now + Duration::days(days),
        }
    }

    pub fn time_left(&self, now: DateTime<Utc>) -> TimeLeft {
        TimeLeft::until(self.starts_at, now)
    }

    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        now >= self.starts_at
    }
}

/// Site-wide banner advertising a timed discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashSale {
    pub discount_percent: u32,
    pub ends_at: DateTime<Utc>,
}

impl FlashSale {
    pub fn new(ends_at: DateTime<Utc>) -> Self {
        Self {
            discount_percent: DEFAULT_FLASH_DISCOUNT,
            ends_at,
        }
    }

    pub fn with_discount(mut self, discount_percent: u32) -> Self {
        self.discount_percent = discount_percent;
        self
    }

    pub fn time_left(&self, now: DateTime<Utc>) -> TimeLeft {
        TimeLeft::until(self.ends_at, now)
    }

    /// The banner hides itself once the countdown reaches zero.
    pub fn is_visible(&self, now: DateTime<Utc>) -> bool {
        !self.time_left(now).is_expired()
    }

    /// "FLASH SALE: 25% OFF, ends in 05:12:09".
    pub fn headline(&self, now: DateTime<Utc>) -> String {
        let left = self.time_left(now);
        format!(
            "FLASH SALE: {}% OFF, ends in {:02}:{:02}:{:02}",
            self.discount_percent,
            left.total_hours(),
            left.minutes,
            left.seconds
        )
    }
}

/// What can open the exit-intent offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitSignal {
    /// Pointer left the viewport; `y` is its last vertical position.
    PointerLeave { y: i32 },
    /// Time spent on the page so far.
    Elapsed(Duration),
}

impl ExitSignal {
    /// Leaving through the top edge, or staying long enough.
    fn is_exit_intent(&self) -> bool {
        match self {
            ExitSignal::PointerLeave { y } => *y <= 0,
            ExitSignal::Elapsed(elapsed) => *elapsed >= Duration::seconds(EXIT_OFFER_DELAY_SECS),
        }
    }
}

/// Once-per-session gate for the exit-intent offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitIntent {
    pub discount_percent: u32,
    shown: bool,
}

impl Default for ExitIntent {
    fn default() -> Self {
        Self {
            discount_percent: DEFAULT_EXIT_DISCOUNT,
            shown: false,
        }
    }
}

impl ExitIntent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_discount(mut self, discount_percent: u32) -> Self {
        self.discount_percent = discount_percent;
        self
    }

    pub fn has_shown(&self) -> bool {
        self.shown
    }

    /// Feed a page signal. Returns true exactly once: the first time a
    /// signal counts as exit intent.
    pub fn observe(&mut self, signal: ExitSignal) -> bool {
        if self.shown || !signal.is_exit_intent() {
            return false;
        }
        self.shown = true;
        true
    }

    /// "Wait! Take 10% off your first order".
    pub fn headline(&self) -> String {
        format!("Wait! Take {}% off your first order", self.discount_percent)
    }

    /// Confirmation after the email is submitted.
    pub fn confirmation(&self) -> String {
        format!(
            "Thanks! Check your email for your {}% discount code.",
            self.discount_percent
        )
    }
}

#[cfg(feature = "storage")]
impl ExitIntent {
    /// Gate for this session; already shown if the flag is stored.
    pub fn load<B: urbno_store::Backend>(
        store: &urbno_store::Store<B>,
    ) -> Result<Self, crate::error::CommerceError> {
        Ok(Self {
            shown: store.exists(EXIT_OFFER_KEY)?,
            ..Self::default()
        })
    }

    /// Record the flag once the offer has been shown.
    pub fn save<B: urbno_store::Backend>(
        &self,
        store: &urbno_store::Store<B>,
    ) -> Result<(), crate::error::CommerceError> {
        if self.shown {
            store.set(EXIT_OFFER_KEY, &true)?;
        }
        Ok(())
    }
}
