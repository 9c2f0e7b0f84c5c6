//! Property-based tests for business-hours reduction using proptest.

use std::collections::HashSet;

use proptest::prelude::*;
use schedule_engine::business_hours::{reduce_business_hours, WorkingHourRecord};
use schedule_engine::time::{TimeOfDay, WorkingDay};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Times on the half hour between 06:00 and 21:30, so collisions are common.
fn arb_time() -> impl Strategy<Value = TimeOfDay> {
    (6u32..=21, prop_oneof![Just(0u32), Just(30u32)])
        .prop_map(|(h, m)| TimeOfDay::parse(&format!("{:02}:{:02}", h, m)).unwrap())
}

fn arb_shift() -> impl Strategy<Value = Option<(TimeOfDay, TimeOfDay)>> {
    prop::option::of((arb_time(), arb_time()))
}

fn arb_record() -> impl Strategy<Value = WorkingHourRecord> {
    (0i64..=6, arb_shift(), arb_shift()).prop_map(|(day, morning, afternoon)| WorkingHourRecord {
        working_day: WorkingDay::try_from(day).unwrap(),
        starting_hour_morning: morning.map(|(s, _)| s),
        ending_hour_morning: morning.map(|(_, e)| e),
        starting_hour_after: afternoon.map(|(s, _)| s),
        ending_hour_after: afternoon.map(|(_, e)| e),
    })
}

fn arb_records() -> impl Strategy<Value = Vec<WorkingHourRecord>> {
    prop::collection::vec(arb_record(), 0..20)
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Property 1: No two blocks share a (start, end) pair
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn no_duplicate_blocks(records in arb_records()) {
        let blocks = reduce_business_hours(&records);
        let pairs: HashSet<_> = blocks.iter().map(|b| (b.start_time, b.end_time)).collect();
        prop_assert_eq!(pairs.len(), blocks.len());
    }
}

// ---------------------------------------------------------------------------
// Property 2: Day sets never repeat a day
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn day_sets_have_no_duplicates(records in arb_records()) {
        for block in reduce_business_hours(&records) {
            let unique: HashSet<_> = block.days_of_week.iter().collect();
            prop_assert_eq!(unique.len(), block.days_of_week.len());
        }
    }
}

// ---------------------------------------------------------------------------
// Property 3: Every complete shift is covered by exactly one block
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn every_shift_lands_in_exactly_one_block(records in arb_records()) {
        let blocks = reduce_business_hours(&records);
        for record in &records {
            for (start, end) in [record.morning(), record.afternoon()].into_iter().flatten() {
                let covering = blocks
                    .iter()
                    .filter(|b| b.start_time == start && b.end_time == end)
                    .filter(|b| b.days_of_week.contains(&record.working_day))
                    .count();
                prop_assert_eq!(covering, 1);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Property 4: Blocks come only from complete shifts
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn blocks_come_from_input_shifts(records in arb_records()) {
        let shifts: HashSet<_> = records
            .iter()
            .flat_map(|r| {
                [r.morning(), r.afternoon()]
                    .into_iter()
                    .flatten()
                    .map(move |(s, e)| (r.working_day, s, e))
            })
            .collect();
        for block in reduce_business_hours(&records) {
            for day in &block.days_of_week {
                prop_assert!(shifts.contains(&(*day, block.start_time, block.end_time)));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Property 5: Reduction is deterministic
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn reduction_is_idempotent(records in arb_records()) {
        prop_assert_eq!(reduce_business_hours(&records), reduce_business_hours(&records));
    }
}
