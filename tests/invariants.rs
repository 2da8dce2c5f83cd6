//! Range and accounting invariants checked over arbitrary inputs.

mod common;

use proptest::prelude::*;

use bpsim::*;
use bpsim::sim;
use common::*;

fn outcomes() -> impl Strategy<Value = Vec<Outcome>> {
    prop::collection::vec(any::<bool>().prop_map(Outcome::from), 0..256)
}

fn records() -> impl Strategy<Value = Vec<BranchRecord>> {
    prop::collection::vec(
        (0u64..64, any::<bool>()).prop_map(|(addr, t)| {
            BranchRecord::new(0x1000 + addr * 4, t)
        }),
        0..512,
    )
}

proptest! {
    #[test]
    fn counter_stays_in_range(bits in 1u8..=8, init in any::<u8>(),
        seq in outcomes())
    {
        let max = ((1u16 << bits) - 1) as u8;
        let init = (init as u16 % (max as u16 + 1)) as u8;
        let mut ctr = SaturatingCounterConfig { bits, init }.build().unwrap();
        for outcome in seq {
            let before = ctr.value();
            let saturated = ctr.is_saturated(outcome);
            ctr.bump(outcome);
            prop_assert!(ctr.value() <= max);
            if saturated {
                prop_assert_eq!(ctr.value(), before);
            } else {
                prop_assert_eq!(ctr.value().abs_diff(before), 1);
            }
        }
    }

    #[test]
    fn history_stays_in_range(len in 1usize..=64, seq in outcomes()) {
        let mut ghr = HistoryRegister::new(len).unwrap();
        for outcome in seq {
            let prev = ghr.value();
            ghr.push(outcome);
            prop_assert!(ghr.value() <= ghr.mask());
            prop_assert_eq!(ghr.value() & 1, outcome.bit());
            prop_assert_eq!(ghr.value() >> 1, ((prev << 1) & ghr.mask()) >> 1);
        }
    }

    #[test]
    fn correct_plus_incorrect_is_total(records in records()) {
        for cfg in small_configs() {
            let mut bp = cfg.build().unwrap();
            let report = sim::run(&mut bp, &records);
            prop_assert_eq!(report.total(), records.len() as u64);
            for c in report.components.iter() {
                prop_assert_eq!(c.total(), records.len() as u64);
            }
        }
    }

    #[test]
    fn table_entries_stay_in_range(records in records()) {
        let mut bp = TournamentPredictor::new(5, 4, 3).unwrap();
        sim::run(&mut bp, &records);
        prop_assert!(bp.chooser().iter().all(|c| c.value() <= 3));
        prop_assert!(bp.gshare().pht().iter().all(|c| c.value() <= 3));
        prop_assert!(bp.gshare().history().value() <= 0b1_1111);
    }
}
