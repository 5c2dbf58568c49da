//! Property-based tests for slot generation using proptest.
//!
//! These tests verify invariants that should hold for *any* busy set and
//! profile, not just the specific examples in `generator_tests.rs`.

use chrono::{DateTime, Duration, TimeZone, Utc};
use chrono_tz::Tz;
use proptest::prelude::*;
use slot_engine::generator::{exclusion_set, find_slots};
use slot_engine::interval::Interval;
use slot_engine::matcher::is_compatible;
use slot_engine::preferences::{PreferenceProfile, PreferenceSettings, PreferredTimeOfDay};
use slot_engine::time_of_day::is_weekend;

const WEEK_MINUTES: i64 = 7 * 24 * 60;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Monday 2026-03-16 00:00 UTC.
fn week_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 16, 0, 0, 0).unwrap()
}

fn arb_busy() -> impl Strategy<Value = Vec<Interval>> {
    prop::collection::vec((0i64..WEEK_MINUTES, 5i64..=240), 0..25).prop_map(|raw| {
        raw.into_iter()
            .map(|(offset, len)| {
                let start = week_start() + Duration::minutes(offset);
                Interval {
                    start,
                    end: start + Duration::minutes(len),
                }
            })
            .collect()
    })
}

fn arb_preferred() -> impl Strategy<Value = PreferredTimeOfDay> {
    prop_oneof![
        Just(PreferredTimeOfDay::Morning),
        Just(PreferredTimeOfDay::Afternoon),
        Just(PreferredTimeOfDay::Evening),
        Just(PreferredTimeOfDay::NoPreference),
    ]
}

fn arb_timezone() -> impl Strategy<Value = Tz> {
    prop_oneof![
        Just(Tz::UTC),
        Just(Tz::America__New_York),
        Just(Tz::Europe__London),
        Just(Tz::Asia__Tokyo),
    ]
}

fn arb_profile() -> impl Strategy<Value = PreferenceProfile> {
    (
        0u32..12,
        13u32..=24,
        0u32..=60,
        0u32..=60,
        arb_preferred(),
        any::<bool>(),
    )
        .prop_map(|(start_h, end_h, before, after, pref, weekends)| {
            let end = if end_h == 24 {
                "23:59".to_string()
            } else {
                format!("{:02}:00", end_h)
            };
            PreferenceSettings {
                work_day_start: format!("{:02}:00", start_h),
                work_day_end: end,
                buffer_before: before,
                buffer_after: after,
                preferred_time_of_day: pref,
                work_on_weekends: weekends,
                ..Default::default()
            }
            .validate()
            .unwrap()
        })
}

fn arb_duration() -> impl Strategy<Value = i64> {
    15i64..=180
}

fn arb_step() -> impl Strategy<Value = i64> {
    prop_oneof![Just(5i64), Just(15), Just(30), Just(60)]
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 128,
        ..ProptestConfig::default()
    }
}

fn week() -> Interval {
    Interval {
        start: week_start(),
        end: week_start() + Duration::minutes(WEEK_MINUTES),
    }
}

// ---------------------------------------------------------------------------
// Property 1: No slot overlaps a buffered busy interval
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn slots_never_overlap_buffered_busy(
        busy in arb_busy(),
        profile in arb_profile(),
        duration in arb_duration(),
        step in arb_step(),
        tz in arb_timezone(),
    ) {
        let slots = find_slots(&week(), duration, step, &busy, &profile, tz).unwrap();

        for s in &slots {
            for b in &busy {
                let widened = b.widen(profile.buffer_before(), profile.buffer_after());
                prop_assert!(!s.overlaps(&widened), "{:?} overlaps {:?}", s, widened);
            }
        }
        for s in &slots {
            for e in exclusion_set(&busy, &profile) {
                prop_assert!(!s.overlaps(&e));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Property 2: Every slot has exactly the requested duration and lies in range
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn slots_have_exact_duration_inside_range(
        busy in arb_busy(),
        profile in arb_profile(),
        duration in arb_duration(),
        step in arb_step(),
    ) {
        let range = week();
        let slots = find_slots(&range, duration, step, &busy, &profile, Tz::UTC).unwrap();

        for s in &slots {
            prop_assert_eq!(s.end - s.start, Duration::minutes(duration));
            prop_assert!(s.start >= range.start);
            prop_assert!(s.end <= range.end);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 3: Output is strictly increasing by start
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn slots_are_strictly_increasing(
        busy in arb_busy(),
        profile in arb_profile(),
        duration in arb_duration(),
        step in arb_step(),
        tz in arb_timezone(),
    ) {
        let slots = find_slots(&week(), duration, step, &busy, &profile, tz).unwrap();
        for pair in slots.windows(2) {
            prop_assert!(pair[0].start < pair[1].start);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 4: Identical inputs give identical output
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn generation_is_deterministic(
        busy in arb_busy(),
        profile in arb_profile(),
        duration in arb_duration(),
        step in arb_step(),
        tz in arb_timezone(),
    ) {
        let a = find_slots(&week(), duration, step, &busy, &profile, tz).unwrap();
        let b = find_slots(&week(), duration, step, &busy, &profile, tz).unwrap();
        prop_assert_eq!(a, b);
    }
}

// ---------------------------------------------------------------------------
// Property 5: Every slot passes the matcher, weekends included
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn slots_satisfy_profile(
        busy in arb_busy(),
        profile in arb_profile(),
        duration in arb_duration(),
        step in arb_step(),
        tz in arb_timezone(),
    ) {
        let slots = find_slots(&week(), duration, step, &busy, &profile, tz).unwrap();
        for s in &slots {
            prop_assert!(is_compatible(s, &profile, tz).unwrap());
            if !profile.work_on_weekends() {
                prop_assert!(!is_weekend(s.start, tz));
                prop_assert!(!is_weekend(s.end, tz));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Property 6: Busy order does not change the result
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn busy_order_is_irrelevant(
        busy in arb_busy(),
        profile in arb_profile(),
        duration in arb_duration(),
    ) {
        let mut reversed = busy.clone();
        reversed.reverse();
        let a = find_slots(&week(), duration, 30, &busy, &profile, Tz::UTC).unwrap();
        let b = find_slots(&week(), duration, 30, &reversed, &profile, Tz::UTC).unwrap();
        prop_assert_eq!(a, b);
    }
}
