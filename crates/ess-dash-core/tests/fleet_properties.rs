//! ---
//! ems_section: "01-core-functionality"
//! ems_subsection: "integration-tests"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Classification, rollup, and sampling properties of the reference fleet."
//! ems_version: "v0.0.0-prealpha"
//! ems_owner: "tbd"
//! ---
use std::collections::BTreeSet;

use anyhow::Result;
use ess_dash_common::config::DisplayConfig;
use ess_dash_core::{sample, sample_indices, sampled_alert_count, summarize, Dashboard};
use ess_dash_model::{FaultMap, Fleet, Status};

fn reference_dashboard(seed: u64) -> Result<Dashboard> {
    Ok(Dashboard::new(
        FaultMap::reference(),
        Some(seed),
        DisplayConfig::default(),
    )?)
}

fn status_sets(fleet: &Fleet) -> (BTreeSet<usize>, BTreeSet<(usize, usize)>) {
    let mut ess = BTreeSet::new();
    let mut batteries = BTreeSet::new();
    for (i, unit) in fleet.iter().enumerate() {
        if unit.status == Status::Alert {
            ess.insert(i);
        }
        for (j, battery) in unit.batteries.iter().enumerate() {
            if battery.status == Status::Alert {
                batteries.insert((i, j));
            }
        }
    }
    (ess, batteries)
}

#[test]
fn reference_fleet_has_expected_shape_and_statuses() -> Result<()> {
    let dashboard = reference_dashboard(1)?;
    let fleet = dashboard.fleet();
    assert_eq!(fleet.len(), 9);
    assert!(fleet.iter().all(|ess| ess.batteries.len() == 420));

    let (ess, batteries) = status_sets(fleet);
    assert_eq!(ess, BTreeSet::from([2, 5]));
    assert_eq!(batteries, BTreeSet::from([(2, 156), (2, 287), (5, 89)]));
    assert_eq!(fleet.ess(2).unwrap().id, "ESS-03");
    assert_eq!(fleet.ess(2).unwrap().batteries[156].id, "B-157");
    Ok(())
}

#[test]
fn classifier_agrees_with_recorded_statuses() -> Result<()> {
    let dashboard = reference_dashboard(2)?;
    let faults = dashboard.faults();
    for (i, ess) in dashboard.fleet().iter().enumerate() {
        assert_eq!(ess.status, faults.ess_status(i));
        for (j, battery) in ess.batteries.iter().enumerate() {
            assert_eq!(battery.status, faults.battery_status(i, j));
        }
    }
    faults.verify(dashboard.fleet())?;
    Ok(())
}

#[test]
fn hundred_ticks_never_change_classification() -> Result<()> {
    let mut dashboard = reference_dashboard(3)?;
    let initial = status_sets(dashboard.fleet());
    for _ in 0..100 {
        dashboard.tick()?;
        assert_eq!(status_sets(dashboard.fleet()), initial);
    }
    assert_eq!(dashboard.ticks(), 100);
    dashboard.faults().verify(dashboard.fleet())?;
    Ok(())
}

#[test]
fn alert_battery_total_ignores_prior_sampling() -> Result<()> {
    let dashboard = reference_dashboard(4)?;
    for ess in dashboard.fleet() {
        let _ = sample(&ess.batteries, 60);
        let _ = sample(&ess.batteries, 100);
    }
    let _ = dashboard.minimap();
    let _ = dashboard.ess_cards();
    let summary = summarize(dashboard.fleet());
    assert_eq!(summary.alert_batteries, 3);
    assert_eq!(summary.alert_batteries, dashboard.faults().alert_battery_total());
    Ok(())
}

#[test]
fn sampling_is_idempotent_and_ordered() -> Result<()> {
    let dashboard = reference_dashboard(5)?;
    let batteries = &dashboard.fleet().ess(2).unwrap().batteries;
    for k in [60, 100] {
        let first = sample(batteries, k);
        let second = sample(batteries, k);
        assert_eq!(first, second);
        assert_eq!(first.len(), k);
        let positions: Vec<usize> = first.iter().map(|b| b.position).collect();
        assert!(positions.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(positions, sample_indices(420, k));
    }
    Ok(())
}

#[test]
fn sampling_boundaries() -> Result<()> {
    let dashboard = reference_dashboard(6)?;
    let batteries = &dashboard.fleet().ess(0).unwrap().batteries;
    let all = sample(batteries, 420);
    assert_eq!(all.len(), 420);
    assert!(all.iter().zip(batteries.iter()).all(|(a, b)| std::ptr::eq(*a, b)));

    let one = sample(batteries, 1);
    assert_eq!(one.len(), 1);
    assert_eq!(one[0].position, 0);
    Ok(())
}

#[test]
fn sampled_views_can_disagree_with_true_counts() -> Result<()> {
    // The preview stride of 7 lands on B-288 (index 287) but misses B-157; the minimap
    // stride of 4.2 misses every reference fault. Both are expected display artefacts.
    let dashboard = reference_dashboard(7)?;
    let ess3 = &dashboard.fleet().ess(2).unwrap().batteries;
    let ess6 = &dashboard.fleet().ess(5).unwrap().batteries;
    assert_eq!(sampled_alert_count(ess3, 60), 1);
    assert_eq!(sampled_alert_count(ess3, 100), 0);
    assert_eq!(sampled_alert_count(ess6, 100), 0);

    let minimap = dashboard.minimap();
    assert_eq!(minimap.tiles.iter().map(|t| t.sampled_alerts).sum::<usize>(), 0);
    assert_eq!(minimap.alert_batteries, 3);
    Ok(())
}

#[test]
fn end_to_end_summary_matches_reference_scenario() -> Result<()> {
    let mut dashboard = reference_dashboard(8)?;
    for round in 0..10 {
        let summary = dashboard.summarize();
        assert_eq!(summary.alert_ess, 2, "round {round}");
        assert_eq!(summary.normal_ess, 7, "round {round}");
        assert_eq!(summary.alert_batteries, 3, "round {round}");
        assert_eq!(summary.battery_total, 3780);
        assert!(summary.mean_availability_percent < 99.7);
        assert!(summary.mean_availability_percent > 94.0);
        assert!(summary.mean_rte_percent >= 92.0 && summary.mean_rte_percent < 95.0);
        assert!(summary.total_co2_reduction_t >= 9.0 * 2.5);
        assert!(summary.total_cost_saving_krw >= 9 * 150_000);
        assert!(summary.needs_inspection());
        dashboard.tick()?;
    }
    Ok(())
}
