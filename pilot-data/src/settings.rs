//! Fiscal settings file.
//!
//! ```toml
//! year = 2025
//! social_contribution_rate = 20.5
//! municipal_surcharge_rate = 7
//! dependent_children_count = 0
//! base_exempt_allowance = 10570
//! allowance_per_child = 1850
//! ```

use pilot_core::{BracketSchedule, FiscalParameters, FiscalParametersError};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid settings file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    InvalidParameters(#[from] FiscalParametersError),
}

/// Scalar fiscal settings as the user edits them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FiscalSettings {
    pub year: i32,
    pub social_contribution_rate: Decimal,
    pub municipal_surcharge_rate: Decimal,
    #[serde(default)]
    pub dependent_children_count: u32,
    pub base_exempt_allowance: Decimal,
    #[serde(default)]
    pub allowance_per_child: Decimal,
}

impl FiscalSettings {
    pub fn parse(input: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(input)?)
    }

    /// Combines these settings with a validated bracket table.
    pub fn into_parameters(
        self,
        schedule: BracketSchedule,
    ) -> Result<FiscalParameters, SettingsError> {
        let parameters = FiscalParameters {
            social_contribution_rate: self.social_contribution_rate,
            municipal_surcharge_rate: self.municipal_surcharge_rate,
            dependent_children_count: self.dependent_children_count,
            base_exempt_allowance: self.base_exempt_allowance,
            allowance_per_child: self.allowance_per_child,
            brackets: schedule.into_brackets(),
        };
        Ok(parameters.validated()?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const SETTINGS: &str = r#"
year = 2025
social_contribution_rate = 20.5
municipal_surcharge_rate = 7
dependent_children_count = 2
base_exempt_allowance = 10570
allowance_per_child = 1850
"#;

    #[test]
    fn parses_settings() {
        let settings = FiscalSettings::parse(SETTINGS).expect("valid settings");

        assert_eq!(
            settings,
            FiscalSettings {
                year: 2025,
                social_contribution_rate: dec!(20.5),
                municipal_surcharge_rate: dec!(7),
                dependent_children_count: 2,
                base_exempt_allowance: dec!(10570),
                allowance_per_child: dec!(1850),
            }
        );
    }

    #[test]
    fn children_and_per_child_allowance_default_to_zero() {
        let settings = FiscalSettings::parse(
            "year = 2025\nsocial_contribution_rate = 20.5\nmunicipal_surcharge_rate = 7\nbase_exempt_allowance = 10570\n",
        )
        .expect("valid settings");

        assert_eq!(settings.dependent_children_count, 0);
        assert_eq!(settings.allowance_per_child, Decimal::ZERO);
    }

    #[test]
    fn rejects_unknown_keys() {
        let result = FiscalSettings::parse(&format!("{SETTINGS}vat_rate = 6\n"));

        assert!(matches!(result, Err(SettingsError::Toml(_))));
    }

    #[test]
    fn into_parameters_validates_rates() {
        let mut settings = FiscalSettings::parse(SETTINGS).expect("valid settings");
        settings.municipal_surcharge_rate = dec!(150);

        let result = settings.into_parameters(BracketSchedule::default());

        assert!(matches!(
            result,
            Err(SettingsError::InvalidParameters(
                FiscalParametersError::InvalidMunicipalSurchargeRate(_)
            ))
        ));
    }

    #[test]
    fn into_parameters_carries_every_field() {
        let settings = FiscalSettings::parse(SETTINGS).expect("valid settings");

        let fiscal = settings
            .into_parameters(BracketSchedule::default())
            .expect("valid parameters");

        assert_eq!(fiscal.exempt_allowance(), dec!(14270));
        assert_eq!(fiscal.social_contribution_rate, dec!(20.5));
        assert!(fiscal.brackets.is_empty());
    }
}
