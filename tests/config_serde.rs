mod tests {
    use dimmer_curve::{CalibrationParameters, CurveTable, DimmerCurve, generate};
    use serde::{Deserialize, Serialize};

    /// Dimmer section of a device configuration document
    #[derive(Debug, Serialize, Deserialize)]
    struct DimmerSwitchConfig {
        pin_zero: i8,
        pin_triac: i8,
        curve: DimmerCurve,
    }

    #[test]
    fn test_curve_serializes_as_array() {
        let table = CurveTable::<4>::try_from_slice(&[30, 20, 10, 0]).unwrap();
        assert_eq!(serde_json::to_string(&table).unwrap(), "[30,20,10,0]");
    }

    #[test]
    fn test_curve_embedded_in_config() {
        let config = DimmerSwitchConfig {
            pin_zero: 4,
            pin_triac: 2,
            curve: generate(&CalibrationParameters::default()).unwrap(),
        };
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["curve"].as_array().unwrap().len(), 100);
        assert_eq!(value["curve"][0], 6500);
        assert_eq!(value["curve"][99], 0);

        let restored: DimmerSwitchConfig = serde_json::from_value(value).unwrap();
        assert_eq!(restored.curve, config.curve);
    }

    #[test]
    fn test_invalid_curve_is_rejected() {
        let error = serde_json::from_str::<DimmerSwitchConfig>(
            r#"{"pin_zero":4,"pin_triac":2,"curve":[1,2]}"#,
        )
        .unwrap_err();
        assert!(error.to_string().contains("not strictly below"));
    }

    #[test]
    fn test_parameters_fill_defaults() {
        let params: CalibrationParameters =
            serde_json::from_str(r#"{"gamma":2.0,"level_count":50}"#).unwrap();
        assert_eq!(
            params,
            CalibrationParameters::new()
                .with_gamma(2.0)
                .with_level_count(50)
        );
    }
}
