//! Guest count validation
//!
//! Two deliberately distinct strategies exist for the same conceptual
//! form step and both are kept as named entry points (different screens
//! use different UX):
//!
//! - the strict clamp-on-edit model ([`GuestCounts`] mutators plus
//!   [`GuestCounts::validate_strict`]), which keeps `adults + kids == pax`
//!   live while the user edits, and
//! - the submission gate ([`validate_submission`]), which only checks
//!   `adults + kids <= pax` over the raw text fields at form-advance time
//!   and never mutates anything.

use serde::{Deserialize, Serialize};

/// Validation outcome: a proceed flag plus a human-readable message.
///
/// Validators report rather than throw; only the date/time normalizer
/// fails loudly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestValidation {
    pub can_proceed: bool,
    pub message: Option<String>,
}

impl GuestValidation {
    pub fn ok() -> Self {
        Self {
            can_proceed: true,
            message: None,
        }
    }

    pub fn blocked(message: impl Into<String>) -> Self {
        Self {
            can_proceed: false,
            message: Some(message.into()),
        }
    }
}

/// Mutable guest counts with clamp-on-edit semantics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestCounts {
    pub pax: i32,
    pub adults: i32,
    pub kids: i32,
}

impl GuestCounts {
    pub fn new(pax: i32, adults: i32, kids: i32) -> Self {
        let mut counts = Self {
            pax: pax.max(0),
            adults: 0,
            kids: 0,
        };
        counts.set_adults(adults);
        counts.set_kids(kids);
        counts
    }

    /// Edit the total capacity.
    ///
    /// Shrinking pax clamps the breakdown to fit: kids are reduced first,
    /// then adults, floored at zero.
    pub fn set_pax(&mut self, pax: i32) {
        self.pax = pax.max(0);
        // Sums are widened to i64: the fields are public, so a caller can
        // hold counts whose i32 sum overflows.
        let overflow =
            (i64::from(self.adults) + i64::from(self.kids) - i64::from(self.pax)).max(0);
        let kid_cut = overflow.min(i64::from(self.kids)) as i32;
        self.kids -= kid_cut;
        self.adults -= (overflow - i64::from(kid_cut)).min(i64::from(self.adults)) as i32;
    }

    /// Edit the adult count, clamped to `[0, pax]`; kids shrink if the
    /// new sum would exceed pax.
    pub fn set_adults(&mut self, adults: i32) {
        self.adults = adults.clamp(0, self.pax);
        if i64::from(self.adults) + i64::from(self.kids) > i64::from(self.pax) {
            self.kids = self.pax - self.adults;
        }
    }

    /// Edit the kid count; symmetric to [`Self::set_adults`].
    pub fn set_kids(&mut self, kids: i32) {
        self.kids = kids.clamp(0, self.pax);
        if i64::from(self.adults) + i64::from(self.kids) > i64::from(self.pax) {
            self.adults = self.pax - self.kids;
        }
    }

    /// Strict validity: `pax > 0`, the breakdown sums exactly to pax and
    /// neither count exceeds it.
    ///
    /// Message priority: missing/zero pax, then exceeds-pax, then
    /// sum-mismatch.
    pub fn validate_strict(&self) -> GuestValidation {
        if self.pax <= 0 {
            return GuestValidation::blocked("Please enter the number of guests");
        }
        if self.adults > self.pax || self.kids > self.pax {
            return GuestValidation::blocked(format!(
                "Adults and kids cannot each exceed {} guests",
                self.pax
            ));
        }
        if i64::from(self.adults) + i64::from(self.kids) != i64::from(self.pax) {
            return GuestValidation::blocked(format!(
                "Adults and kids must add up to {} guests",
                self.pax
            ));
        }
        GuestValidation::ok()
    }
}

/// Parse a form text field into a count; empty or non-numeric is missing.
pub fn parse_count(text: &str) -> Option<i32> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<i32>().ok().filter(|n| *n >= 0)
}

/// Submission-time gate over the raw text fields.
///
/// Valid iff all three fields parse and `adults + kids <= pax`. Does not
/// clamp; missing fields and exceeds-pax produce distinct messages.
pub fn validate_submission(pax: &str, adults: &str, kids: &str) -> GuestValidation {
    let (Some(pax), Some(adults), Some(kids)) =
        (parse_count(pax), parse_count(adults), parse_count(kids))
    else {
        return GuestValidation::blocked("Please fill in all guest count fields");
    };
    if i64::from(adults) + i64::from(kids) > i64::from(pax) {
        return GuestValidation::blocked(format!(
            "Total of adults and kids exceeds the {} pax limit",
            pax
        ));
    }
    GuestValidation::ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_valid() {
        let counts = GuestCounts::new(50, 30, 20);
        assert_eq!(counts.validate_strict(), GuestValidation::ok());
    }

    #[test]
    fn test_strict_message_priority() {
        // Zero pax beats everything else.
        let counts = GuestCounts {
            pax: 0,
            adults: 0,
            kids: 0,
        };
        let v = counts.validate_strict();
        assert!(!v.can_proceed);
        assert!(v.message.unwrap().contains("number of guests"));

        // Sum mismatch reported once pax is set.
        let counts = GuestCounts {
            pax: 10,
            adults: 4,
            kids: 2,
        };
        let v = counts.validate_strict();
        assert!(!v.can_proceed);
        assert!(v.message.unwrap().contains("add up to 10"));
    }

    #[test]
    fn test_pax_shrink_reduces_kids_first() {
        let mut counts = GuestCounts::new(30, 20, 10);
        counts.set_pax(22);
        assert_eq!((counts.adults, counts.kids), (20, 2));

        // Shrinking further exhausts kids, then cuts adults.
        counts.set_pax(15);
        assert_eq!((counts.adults, counts.kids), (15, 0));
    }

    #[test]
    fn test_set_adults_squeezes_kids() {
        let mut counts = GuestCounts::new(20, 10, 10);
        counts.set_adults(15);
        assert_eq!((counts.adults, counts.kids), (15, 5));

        counts.set_adults(25);
        assert_eq!((counts.adults, counts.kids), (20, 0));
    }

    #[test]
    fn test_set_kids_squeezes_adults() {
        let mut counts = GuestCounts::new(20, 10, 10);
        counts.set_kids(18);
        assert_eq!((counts.adults, counts.kids), (2, 18));
    }

    #[test]
    fn test_negative_edits_floor_at_zero() {
        let mut counts = GuestCounts::new(10, 5, 5);
        counts.set_adults(-3);
        assert_eq!(counts.adults, 0);
        counts.set_pax(-1);
        assert_eq!(counts.pax, 0);
        assert_eq!((counts.adults, counts.kids), (0, 0));
    }

    #[test]
    fn test_clamp_invariant_holds_for_generated_triples() {
        // After any sequence of edits: adults + kids <= pax, nothing negative.
        for pax in 0..25 {
            for adults in -5..30 {
                for kids in -5..30 {
                    let mut counts = GuestCounts::new(pax, adults, kids);
                    counts.set_pax(pax / 2);
                    assert!(counts.adults >= 0 && counts.kids >= 0);
                    assert!(counts.adults + counts.kids <= counts.pax);
                }
            }
        }
    }

    #[test]
    fn test_huge_counts_never_panic_or_wrap() {
        // Counts near i32::MAX must not overflow the sum; the gate still
        // reports exceeds-pax instead of wrapping negative and accepting.
        let v = validate_submission("2000000000", "2000000000", "2000000000");
        assert!(!v.can_proceed);
        assert!(v.message.unwrap().contains("exceeds"));

        let counts = GuestCounts {
            pax: i32::MAX,
            adults: i32::MAX,
            kids: i32::MAX,
        };
        let v = counts.validate_strict();
        assert!(!v.can_proceed);

        // Mutators clamp the same extreme fields back into range.
        let mut counts = counts;
        counts.set_pax(10);
        assert_eq!((counts.adults, counts.kids), (10, 0));
        assert!(counts.validate_strict().can_proceed);

        let counts = GuestCounts::new(2_000_000_000, 2_000_000_000, 2_000_000_000);
        assert!(i64::from(counts.adults) + i64::from(counts.kids) <= i64::from(counts.pax));
    }

    #[test]
    fn test_submission_gate_missing_fields() {
        let v = validate_submission("50", "", "10");
        assert!(!v.can_proceed);
        assert!(v.message.unwrap().contains("fill in"));

        let v = validate_submission("50", "abc", "10");
        assert!(!v.can_proceed);
    }

    #[test]
    fn test_submission_gate_exceeds_pax() {
        let v = validate_submission("50", "40", "20");
        assert!(!v.can_proceed);
        assert!(v.message.unwrap().contains("exceeds the 50 pax limit"));
    }

    #[test]
    fn test_submission_gate_allows_under_pax() {
        // Gate uses <=, unlike the strict variant's ==.
        assert!(validate_submission("50", "30", "10").can_proceed);
        assert!(validate_submission("50", "30", "20").can_proceed);
    }
}
