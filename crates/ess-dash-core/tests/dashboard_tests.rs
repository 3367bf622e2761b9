//! ---
//! ems_section: "01-core-functionality"
//! ems_subsection: "integration-tests"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Navigation, presentation views, and configuration of the dashboard context."
//! ems_version: "v0.0.0-prealpha"
//! ems_owner: "tbd"
//! ---
use anyhow::Result;
use ess_dash_common::config::{AppConfig, DisplayConfig};
use ess_dash_core::{Dashboard, DashboardError};
use ess_dash_model::{ConfigurationError, FaultMap, FleetLayout, ModelError, Status};

fn small_dashboard() -> Result<Dashboard> {
    let faults = FaultMap::new(FleetLayout::new(2, 5), [1], [(1, vec![2])])?;
    let display = DisplayConfig {
        preview_samples: 5,
        minimap_samples: 3,
    };
    Ok(Dashboard::new(faults, Some(21), display)?)
}

#[test]
fn selection_starts_empty_and_follows_navigation() -> Result<()> {
    let mut dashboard = small_dashboard()?;
    assert_eq!(dashboard.selected_ess(), None);
    assert!(dashboard.battery_grid().is_none());

    dashboard.select(1)?;
    assert_eq!(dashboard.selected_ess(), Some(1));
    assert_eq!(dashboard.selected().unwrap().id, "ESS-02");
    assert_eq!(dashboard.battery_grid().unwrap().len(), 5);

    dashboard.clear_selection();
    assert_eq!(dashboard.selected_ess(), None);
    Ok(())
}

#[test]
fn unknown_selection_is_rejected_without_side_effects() -> Result<()> {
    let mut dashboard = small_dashboard()?;
    dashboard.select(0)?;
    let err = dashboard.select(2).unwrap_err();
    assert_eq!(
        err,
        DashboardError::UnknownEss {
            index: 2,
            ess_count: 2
        }
    );
    assert_eq!(dashboard.selected_ess(), Some(0));
    Ok(())
}

#[test]
fn toggling_the_selected_tile_returns_to_overview() -> Result<()> {
    let mut dashboard = small_dashboard()?;
    assert_eq!(dashboard.toggle_selection(1)?, Some(1));
    assert_eq!(dashboard.toggle_selection(0)?, Some(0));
    assert_eq!(dashboard.toggle_selection(0)?, None);
    Ok(())
}

#[test]
fn ticks_do_not_touch_selection() -> Result<()> {
    let mut dashboard = small_dashboard()?;
    dashboard.select(1)?;
    for _ in 0..5 {
        dashboard.tick()?;
    }
    assert_eq!(dashboard.selected_ess(), Some(1));
    Ok(())
}

#[test]
fn minimap_marks_selected_tile() -> Result<()> {
    let mut dashboard = small_dashboard()?;
    dashboard.select(1)?;
    let minimap = dashboard.minimap();
    assert_eq!(minimap.tiles.len(), 2);
    assert!(!minimap.tiles[0].selected);
    assert!(minimap.tiles[1].selected);
    assert_eq!(minimap.tiles[1].label, "02");
    assert_eq!(minimap.tiles[1].cells.len(), 3);
    assert_eq!(minimap.alert_batteries, 1);
    Ok(())
}

#[test]
fn cards_carry_preview_and_alert_badge() -> Result<()> {
    let dashboard = small_dashboard()?;
    let cards = dashboard.ess_cards();
    assert_eq!(cards.len(), 2);

    assert_eq!(cards[0].status, Status::Normal);
    assert_eq!(cards[0].alert_badge, None);
    assert!(!cards[0].temperature_elevated);

    assert_eq!(cards[1].status, Status::Alert);
    assert_eq!(cards[1].alert_badge, Some(1));
    assert!(cards[1].temperature_elevated);
    // k equals the pack size here, so the preview is the whole pack.
    assert_eq!(
        cards[1].preview,
        vec![
            Status::Normal,
            Status::Normal,
            Status::Alert,
            Status::Normal,
            Status::Normal
        ]
    );
    Ok(())
}

#[test]
fn battery_detail_and_tooltip_for_faulted_cell() -> Result<()> {
    let dashboard = small_dashboard()?;
    let detail = dashboard.battery_detail(1, 2)?;
    assert_eq!(detail.title, "ESS-02 - B-003");
    assert_eq!(detail.status, Status::Alert);
    assert!(detail.voltage_low);
    assert!(detail.temperature_high);
    assert!(detail.soc_percent < 25);
    assert!(detail.soh_low);
    assert!(detail.has_warning());

    let tooltip = dashboard.battery_tooltip(0, 4)?;
    assert_eq!(tooltip.id, "B-005");
    assert!(tooltip.voltage_v >= 3.65);

    let err = dashboard.battery_detail(1, 5).unwrap_err();
    assert!(matches!(err, DashboardError::UnknownBattery { index: 5, .. }));
    Ok(())
}

#[test]
fn frame_serialises_for_renderer() -> Result<()> {
    let mut dashboard = small_dashboard()?;
    dashboard.tick()?;
    let frame = serde_json::to_value(dashboard.frame())?;
    assert_eq!(frame["tick"], 1);
    assert_eq!(frame["summary"]["alert_ess"], 1);
    assert_eq!(frame["cards"][1]["status"], "alert");
    assert_eq!(frame["minimap"]["alert_batteries"], 1);
    assert!(frame["selected_ess"].is_null());
    Ok(())
}

#[test]
fn from_config_uses_reference_defaults() -> Result<()> {
    let mut config = AppConfig::default();
    config.simulation.random_seed = Some(9);
    let dashboard = Dashboard::from_config(&config)?;
    assert_eq!(dashboard.fleet().len(), 9);
    assert_eq!(dashboard.summarize().alert_batteries, 3);
    assert_eq!(dashboard.ess_cards()[0].preview.len(), 60);
    assert_eq!(dashboard.minimap().tiles[0].cells.len(), 100);
    Ok(())
}

#[test]
fn from_config_refuses_out_of_range_faults() {
    let mut config = AppConfig::default();
    config.faults.ess.push(9);
    let err = Dashboard::from_config(&config).unwrap_err();
    assert_eq!(
        err,
        DashboardError::Model(ModelError::Configuration(
            ConfigurationError::EssIndexOutOfRange { index: 9, max: 8 }
        ))
    );
}

#[test]
fn oversized_display_sampling_is_rejected() -> Result<()> {
    let faults = FaultMap::healthy(FleetLayout::new(1, 4));
    let err = Dashboard::new(faults, Some(1), DisplayConfig::default()).unwrap_err();
    assert_eq!(
        err,
        DashboardError::InvalidSampleCount {
            samples: 60,
            batteries_per_ess: 4
        }
    );
    Ok(())
}
