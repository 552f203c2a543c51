use proptest::prelude::*;
use regio::{FanOutOptions, RegionRequest};

use crate::helpers::{m_cars, m_fail, regio_of};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // One settled result per targeted region, in target order, whatever fails.
    #[test]
    fn fan_out_yields_one_result_per_target(
        failing in proptest::collection::vec(any::<bool>(), 1..7),
        picks in proptest::collection::vec(any::<prop::sample::Index>(), 1..7),
    ) {
        let regions: Vec<_> = failing
            .iter()
            .enumerate()
            .map(|(i, fail)| {
                let id = format!("r{i}");
                if *fail { m_fail(&id) } else { m_cars(&id, &[i64::try_from(i).unwrap()]) }
            })
            .collect();
        let refs: Vec<_> = regions.iter().collect();
        let regio = regio_of(&refs);

        let mut targets: Vec<String> = Vec::new();
        for p in &picks {
            let id = format!("r{}", p.index(regions.len()));
            if !targets.contains(&id) {
                targets.push(id);
            }
        }

        let opts = FanOutOptions::default().targets(targets.iter().map(String::as_str));
        let results = tokio_test::block_on(regio.fan_out(&RegionRequest::new("/probe"), &opts))
            .unwrap();

        prop_assert_eq!(results.len(), targets.len());
        for (r, id) in results.iter().zip(&targets) {
            prop_assert_eq!(r.region.id.as_str(), id.as_str());
            let idx: usize = id[1..].parse().unwrap();
            prop_assert_eq!(r.success(), !failing[idx]);
        }
    }

    #[test]
    fn fan_out_without_subset_targets_every_region(n in 1usize..8) {
        let regions: Vec<_> = (0..n).map(|i| m_cars(&format!("r{i}"), &[1])).collect();
        let refs: Vec<_> = regions.iter().collect();
        let regio = regio_of(&refs);

        let results = tokio_test::block_on(
            regio.fan_out(&RegionRequest::new("/probe"), &FanOutOptions::default()),
        )
        .unwrap();
        prop_assert_eq!(results.len(), n);
        prop_assert!(regions.iter().all(|r| r.call_count() == 1));
    }
}
