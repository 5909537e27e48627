//! Scoped Override Tests
//!
//! Verifies the settings-context guarantees: overrides are visible inside
//! the scope (including the engine's mirrored options), every field is
//! restored on every exit path, nested scopes restore LIFO, and a mode
//! override settles before the rest of the batch.

use framelens_sdk::{
    DisplayMode, EngineOption, EngineOptionValue, EngineOptions, Error, Overrides, Result,
    plan_render,
};
use framelens_testing::{FormatterCall, TestWorld};

#[test]
fn test_round_trip_restores_the_original_row_limit() -> Result<()> {
    let mut world = TestWorld::new();
    let original = world.settings().display_max_rows();

    world.client().settings_context(
        Overrides::new().set("display_max_rows", 5),
        |rt| {
            assert_eq!(rt.settings().display_max_rows(), 5);
            assert_eq!(
                rt.engine().get(EngineOption::MaxRows),
                Some(EngineOptionValue::Limit(5))
            );
            Ok(())
        },
    )?;

    assert_eq!(world.settings().display_max_rows(), original);
    assert_eq!(
        world.engine_option(EngineOption::MaxRows),
        Some(EngineOptionValue::Limit(original))
    );
    Ok(())
}

#[test]
fn test_every_field_is_bit_for_bit_restored() -> Result<()> {
    let mut world = TestWorld::new();
    world.client().set_option("display_max_columns", 7)?;
    let before = world.settings().clone();

    world.client().settings_context(
        Overrides::new()
            .set("display_max_rows", 2)
            .set("html_table_schema", true)
            .set("sampling_factor", 0.5)
            .set("media_type", "application/json"),
        |rt| {
            assert!(rt.settings().html_table_schema());
            Ok(())
        },
    )?;

    assert_eq!(world.settings(), &before);
    Ok(())
}

#[test]
fn test_scope_error_still_restores_and_propagates() {
    let mut world = TestWorld::new();
    let before = world.settings().clone();

    let err = world
        .client()
        .settings_context::<(), _>(Overrides::new().set("display_max_rows", 5), |rt| {
            rt.set_option("display_max_columns", 1)?;
            Err(Error::UnknownSetting("induced failure".to_string()))
        })
        .unwrap_err();

    assert!(matches!(err, Error::UnknownSetting(name) if name == "induced failure"));
    assert_eq!(world.settings(), &before);
    assert_eq!(
        world.engine_option(EngineOption::MaxRows),
        Some(EngineOptionValue::Limit(before.display_max_rows()))
    );
}

#[test]
fn test_nested_scopes_restore_in_reverse_order_of_entry() -> Result<()> {
    let mut world = TestWorld::new();

    world.client().settings_context(
        Overrides::new().set("display_max_rows", 10),
        |outer| {
            outer.scoped(Overrides::new().set("display_max_rows", 3), |inner| {
                assert_eq!(inner.settings().display_max_rows(), 3);
                Ok(())
            })?;
            // the outer override is back, not the process default
            assert_eq!(outer.settings().display_max_rows(), 10);
            assert_eq!(
                outer.engine().get(EngineOption::MaxRows),
                Some(EngineOptionValue::Limit(10))
            );
            Ok(())
        },
    )?;

    assert_eq!(world.settings().display_max_rows(), 60);
    Ok(())
}

#[test]
fn test_mode_override_settles_before_other_overrides_and_rolls_back() -> Result<()> {
    let mut world = TestWorld::new();

    world.client().settings_context(
        Overrides::new()
            .set("display_max_rows", 1)
            .set("DISPLAY_MODE", DisplayMode::Enhanced),
        |rt| {
            assert_eq!(rt.settings().display_mode(), DisplayMode::Enhanced);
            assert_eq!(rt.settings().display_max_rows(), 1);
            Ok(())
        },
    )?;

    // register happened on entry, and the restore path stepped the session
    // back down to the default simple mode
    assert_eq!(
        world.formatter_calls(),
        vec![FormatterCall::Register, FormatterCall::Deregister]
    );
    assert_eq!(world.settings().display_mode(), DisplayMode::Simple);
    Ok(())
}

#[test]
fn test_scoped_overrides_change_render_planning() -> Result<()> {
    let mut world = TestWorld::new();

    world.client().settings_context(
        Overrides::new()
            .set("display_max_rows", 4)
            .set("row_sampling_method", "last"),
        |rt| {
            let plan = plan_render(rt.settings(), 10, 2);
            assert_eq!(plan.rows, Some(vec![6, 7, 8, 9]));
            assert_eq!(plan.columns, None);
            Ok(())
        },
    )?;

    // default limits comfortably fit the same shape
    assert!(plan_render(world.settings(), 10, 2).fits());
    Ok(())
}
