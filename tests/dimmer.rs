mod tests {
    use dimmer_curve::{CurveTable, DelayCommand, DelayError, Dimmer, DimmerConfig};
    use embassy_time::{Duration, Instant};

    const OFF: DimmerConfig = DimmerConfig {
        brightness: 5,
        on: false,
    };

    fn curve() -> CurveTable<5> {
        CurveTable::try_from_slice(&[400, 300, 200, 100, 0]).unwrap()
    }

    /// Tick every 10 ms starting at `start`, collecting emitted commands
    fn run(dimmer: &mut Dimmer<'_, 5>, start: u64, ticks: u64) -> Vec<Option<DelayCommand>> {
        (0..ticks)
            .map(|step| dimmer.tick(Instant::from_millis(start + step * 10)))
            .collect()
    }

    #[test]
    fn test_starts_off() {
        let curve = curve();
        let mut dimmer = Dimmer::new(&curve, &OFF).unwrap();
        assert_eq!(dimmer.command(), None);
        assert_eq!(dimmer.tick(Instant::from_millis(0)), Some(DelayCommand::Off));
        assert_eq!(dimmer.tick(Instant::from_millis(10)), None);
        assert_eq!(dimmer.command(), Some(DelayCommand::Off));
        assert_eq!(dimmer.current_level(), 1);
    }

    #[test]
    fn test_power_on_ramps_up() {
        let curve = curve();
        let mut dimmer = Dimmer::new(&curve, &OFF).unwrap();
        assert!(dimmer.set_on(true));
        assert!(!dimmer.set_on(true));

        assert_eq!(
            run(&mut dimmer, 0, 5),
            vec![
                Some(DelayCommand::Delay(300)),
                Some(DelayCommand::Delay(200)),
                Some(DelayCommand::Delay(100)),
                Some(DelayCommand::FullOn),
                None,
            ]
        );
        assert_eq!(dimmer.current_level(), 5);
    }

    #[test]
    fn test_power_off_ramps_down() {
        let curve = curve();
        let config = DimmerConfig {
            brightness: 3,
            on: true,
        };
        let mut dimmer = Dimmer::new(&curve, &config).unwrap();
        run(&mut dimmer, 0, 4);
        assert_eq!(dimmer.command(), Some(DelayCommand::Delay(200)));

        assert!(dimmer.toggle());
        assert!(!dimmer.is_on());
        assert_eq!(
            run(&mut dimmer, 100, 3),
            vec![Some(DelayCommand::Delay(300)), Some(DelayCommand::Off), None]
        );
    }

    #[test]
    fn test_brightness_is_clamped() {
        let curve = curve();
        let mut dimmer = Dimmer::new(&curve, &OFF).unwrap();
        assert!(dimmer.set_brightness(0));
        assert_eq!(dimmer.brightness(), 1);
        assert!(dimmer.set_brightness(200));
        assert_eq!(dimmer.brightness(), 5);
        assert!(!dimmer.set_brightness(9));
        assert_eq!(dimmer.levels(), 5);
    }

    #[test]
    fn test_change_brightness_is_relative_to_current() {
        let curve = curve();
        let config = DimmerConfig {
            brightness: 4,
            on: true,
        };
        let mut dimmer = Dimmer::new(&curve, &config).unwrap();
        run(&mut dimmer, 0, 1);
        assert_eq!(dimmer.current_level(), 2);

        assert!(dimmer.change_brightness(-5));
        assert_eq!(dimmer.brightness(), 1);
        assert!(dimmer.change_brightness(2));
        assert_eq!(dimmer.brightness(), 4);
    }

    #[test]
    fn test_min_brightness_hold_expires() {
        let curve = curve();
        let mut dimmer = Dimmer::new(&curve, &OFF).unwrap();
        dimmer.set_min_brightness_for(3, Duration::from_millis(1000), Instant::from_millis(0));
        assert_eq!(dimmer.target_level(), 3);

        assert_eq!(
            run(&mut dimmer, 10, 3),
            vec![
                Some(DelayCommand::Delay(300)),
                Some(DelayCommand::Delay(200)),
                None,
            ]
        );

        assert_eq!(
            run(&mut dimmer, 1010, 3),
            vec![Some(DelayCommand::Delay(300)), Some(DelayCommand::Off), None]
        );
        assert_eq!(dimmer.target_level(), 1);
    }

    #[test]
    fn test_min_brightness_hold_kept_at_deadline() {
        let curve = curve();
        let mut dimmer = Dimmer::new(&curve, &OFF).unwrap();
        dimmer.set_min_brightness_for(3, Duration::from_millis(100), Instant::from_millis(0));
        run(&mut dimmer, 10, 2);
        assert_eq!(dimmer.current_level(), 3);

        assert_eq!(dimmer.tick(Instant::from_millis(100)), None);
        assert_eq!(dimmer.target_level(), 3);

        assert_eq!(
            dimmer.tick(Instant::from_millis(101)),
            Some(DelayCommand::Delay(300))
        );
        assert_eq!(dimmer.target_level(), 1);
    }

    #[test]
    fn test_min_brightness_longest_hold_never_expires() {
        let curve = curve();
        let mut dimmer = Dimmer::new(&curve, &OFF).unwrap();
        dimmer.set_min_brightness_for(2, Duration::MAX, Instant::from_millis(10));
        assert_eq!(
            dimmer.tick(Instant::from_millis(20)),
            Some(DelayCommand::Delay(300))
        );

        assert_eq!(dimmer.tick(Instant::MAX), None);
        assert_eq!(dimmer.target_level(), 2);
    }

    #[test]
    fn test_min_brightness_raises_target_while_on() {
        let curve = curve();
        let config = DimmerConfig {
            brightness: 2,
            on: true,
        };
        let mut dimmer = Dimmer::new(&curve, &config).unwrap();
        dimmer.set_min_brightness_for(4, Duration::from_secs(60), Instant::from_millis(0));
        assert_eq!(dimmer.target_level(), 4);

        dimmer.set_min_brightness_for(4, Duration::from_millis(0), Instant::from_millis(0));
        assert_eq!(dimmer.target_level(), 2);
    }

    #[test]
    fn test_curve_must_fit_command_word() {
        let curve = CurveTable::<2>::try_from_slice(&[70_000, 0]).unwrap();
        let result = Dimmer::new(&curve, &OFF);
        assert_eq!(result.err(), Some(DelayError::OutOfRange(70_000)));
    }
}
