//! Display Mode Tests
//!
//! Verifies the tri-state mode controller: one registry action per
//! transition, idempotent repeats, and a working fallback chain when
//! stepping down from the enhanced display.

use framelens_sdk::{DisplayMode, Result};
use framelens_testing::{FormatterCall, TestWorld};

#[test]
fn test_each_mode_drives_one_registry_action() -> Result<()> {
    let mut world = TestWorld::new();

    world.client().set_display_mode(DisplayMode::Enhanced)?;
    world.client().set_display_mode(DisplayMode::Simple)?;
    world.client().set_display_mode(DisplayMode::Plain)?;

    assert_eq!(
        world.formatter_calls(),
        vec![
            FormatterCall::Register,
            FormatterCall::Deregister,
            FormatterCall::Reset,
        ]
    );
    Ok(())
}

#[test]
fn test_setting_the_same_mode_twice_is_idempotent() -> Result<()> {
    let mut world = TestWorld::new();

    world.client().set_display_mode(DisplayMode::Enhanced)?;
    let after_first = world.formatter_calls();
    world.client().set_display_mode(DisplayMode::Enhanced)?;

    assert_eq!(world.formatter_calls(), after_first);
    assert_eq!(world.client().active_mode(), Some(DisplayMode::Enhanced));
    Ok(())
}

#[test]
fn test_enhanced_then_simple_leaves_no_enhanced_registration() -> Result<()> {
    let mut world = TestWorld::new();

    world.client().set_display_mode(DisplayMode::Enhanced)?;
    assert!(world.enhanced_registered());

    world.client().set_display_mode(DisplayMode::Simple)?;
    assert!(!world.enhanced_registered());
    assert_eq!(world.settings().display_mode(), DisplayMode::Simple);
    Ok(())
}

#[test]
fn test_mode_can_be_set_by_name_through_set_option() -> Result<()> {
    let mut world = TestWorld::new();

    world.client().set_option("display_mode", "plain")?;
    assert_eq!(world.settings().display_mode(), DisplayMode::Plain);
    assert_eq!(world.formatter_calls(), vec![FormatterCall::Reset]);
    Ok(())
}

#[test]
fn test_unsupported_mode_name_is_rejected() {
    let mut world = TestWorld::new();
    let err = world.client().set_option("display_mode", "grid").unwrap_err();
    assert!(
        matches!(err, framelens_sdk::Error::UnsupportedDisplayMode(mode) if mode == "grid")
    );
    assert!(world.formatter_calls().is_empty());
}
