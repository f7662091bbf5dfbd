mod tests {
    use myrtio_ring_controller::{
        PowerConfig, PowerManager, PowerState, PowerStateMachine, PowerTransition,
    };

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Call {
        Disable,
        Arm,
        Halt,
        Disarm,
        Restore,
    }

    #[derive(Default)]
    struct FakeManager {
        calls: Vec<Call>,
    }

    impl PowerManager for FakeManager {
        fn disable_non_essential_peripherals(&mut self) {
            self.calls.push(Call::Disable);
        }

        fn arm_wake_source(&mut self) {
            self.calls.push(Call::Arm);
        }

        fn halt_until_wake(&mut self) {
            assert_eq!(self.calls, vec![Call::Disable, Call::Arm]);
            self.calls.push(Call::Halt);
        }

        fn disarm_wake_source(&mut self) {
            self.calls.push(Call::Disarm);
        }

        fn restore_peripherals(&mut self) {
            self.calls.push(Call::Restore);
        }
    }

    const CONFIG: PowerConfig = PowerConfig {
        active_window: 3,
        idle_timeout: 6,
    };

    #[test]
    fn test_starts_active() {
        let power = PowerStateMachine::new(CONFIG);
        assert_eq!(power.state(), PowerState::Active);
        assert_eq!(power.idle_iterations(), 0);
    }

    #[test]
    fn test_transitions() {
        let mut power = PowerStateMachine::new(CONFIG);
        assert_eq!(power.tick(), PowerTransition::None);
        assert_eq!(power.tick(), PowerTransition::None);
        assert_eq!(power.tick(), PowerTransition::EnteredIdle);
        assert_eq!(power.state(), PowerState::Idle);
        assert_eq!(power.tick(), PowerTransition::None);
        assert_eq!(power.tick(), PowerTransition::None);
        assert_eq!(power.tick(), PowerTransition::SleepDue);
        assert_eq!(power.idle_iterations(), 6);
    }

    #[test]
    fn test_gesture_resets_counter() {
        let mut power = PowerStateMachine::new(CONFIG);
        for _ in 0..4 {
            power.tick();
        }
        assert_eq!(power.state(), PowerState::Idle);

        power.on_gesture();
        assert_eq!(power.idle_iterations(), 0);
        assert_eq!(power.state(), PowerState::Active);

        for _ in 0..5 {
            assert_ne!(power.tick(), PowerTransition::SleepDue);
        }
        assert_eq!(power.tick(), PowerTransition::SleepDue);
    }

    #[test]
    fn test_full_timeout_after_gesture() {
        let mut power = PowerStateMachine::new(CONFIG);
        power.tick();
        power.on_gesture();
        let quiet = std::iter::repeat_with(|| power.tick())
            .position(|transition| transition == PowerTransition::SleepDue)
            .map(|index| index + 1);
        assert_eq!(quiet, Some(6));
    }

    #[test]
    fn test_sleep_sequence() {
        let mut power = PowerStateMachine::new(CONFIG);
        let mut manager = FakeManager::default();
        while power.tick() != PowerTransition::SleepDue {}

        power.sleep(&mut manager);

        assert_eq!(
            manager.calls,
            vec![
                Call::Disable,
                Call::Arm,
                Call::Halt,
                Call::Disarm,
                Call::Restore
            ]
        );
        assert_eq!(power.state(), PowerState::Active);
        assert_eq!(power.idle_iterations(), 0);
        assert_eq!(power.tick(), PowerTransition::None);
    }

    #[test]
    fn test_default_config() {
        let power = PowerStateMachine::default();
        assert_eq!(power.config(), &PowerConfig::DEFAULT);
        assert!(power.config().active_window < power.config().idle_timeout);
    }
}
