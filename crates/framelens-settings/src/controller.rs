use tracing::debug;

use framelens_types::DisplayMode;

use crate::formatters::FormatterRegistry;

/// Interprets the display-mode field as a tri-state selector over the
/// session's formatter registrations.
///
/// Exactly one registry action runs per transition: `enhanced` registers
/// the enhanced formatter, `simple` deregisters it (leaving the baseline
/// table formatter), `plain` resets the session to environment defaults.
/// The controller tracks the active mode and no-ops on repeat transitions,
/// so switching to the current mode never double-registers.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModeController {
    current: Option<DisplayMode>,
}

impl ModeController {
    pub fn new() -> Self {
        Self::default()
    }

    /// The mode last applied through this controller, if any.
    pub fn current(&self) -> Option<DisplayMode> {
        self.current
    }

    /// Switch the session to `mode`.
    pub fn transition(&mut self, mode: DisplayMode, registry: &mut dyn FormatterRegistry) {
        if self.current == Some(mode) {
            debug!(mode = %mode, "display mode unchanged, skipping formatter update");
            return;
        }

        match mode {
            DisplayMode::Enhanced => registry.register(),
            DisplayMode::Simple => registry.deregister(),
            DisplayMode::Plain => registry.reset(),
        }

        debug!(mode = %mode, "switched display mode");
        self.current = Some(mode);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct CountingRegistry {
        registers: usize,
        deregisters: usize,
        resets: usize,
    }

    impl FormatterRegistry for CountingRegistry {
        fn register(&mut self) {
            self.registers += 1;
        }

        fn deregister(&mut self) {
            self.deregisters += 1;
        }

        fn reset(&mut self) {
            self.resets += 1;
        }
    }

    #[test]
    fn test_each_mode_runs_exactly_one_action() {
        let mut controller = ModeController::new();
        let mut registry = CountingRegistry::default();

        controller.transition(DisplayMode::Enhanced, &mut registry);
        assert_eq!((registry.registers, registry.deregisters, registry.resets), (1, 0, 0));

        controller.transition(DisplayMode::Simple, &mut registry);
        assert_eq!((registry.registers, registry.deregisters, registry.resets), (1, 1, 0));

        controller.transition(DisplayMode::Plain, &mut registry);
        assert_eq!((registry.registers, registry.deregisters, registry.resets), (1, 1, 1));
    }

    #[test]
    fn test_repeat_transition_is_idempotent() {
        let mut controller = ModeController::new();
        let mut registry = CountingRegistry::default();

        controller.transition(DisplayMode::Enhanced, &mut registry);
        controller.transition(DisplayMode::Enhanced, &mut registry);
        assert_eq!(registry.registers, 1);
        assert_eq!(controller.current(), Some(DisplayMode::Enhanced));
    }
}
