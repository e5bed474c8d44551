//! Fixed physical constants for the lifecycle comparison.
//!
//! One table per process: loaded (or defaulted) at startup, validated once,
//! never mutated at runtime. The default set describes an aluminium
//! returnable capsule measured against a single-use aluminium capsule.
//!
//! All arithmetic uses `rust_decimal::Decimal`. No `f64`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::ReuseLcaError;
use crate::ReuseLcaResult;

/// Process-wide physical constants, all per unit unless stated otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalConstants {
    /// Mass of aluminium per reusable unit, kg.
    pub mass_per_unit: Decimal,
    /// Embodied emissions per kg of primary material, kg CO2e/kg.
    pub emission_factor_primary: Decimal,
    /// One-time forward logistics for first deployment, kg CO2e/unit.
    pub initial_logistics: Decimal,
    /// Emissions of one single-use item, kg CO2e/use.
    pub single_use_reference: Decimal,
    /// Emissions incurred during actual use, kg CO2e/cycle. May be zero.
    pub use_phase_emissions: Decimal,
    /// Emissions to clean and prepare a unit between cycles, kg CO2e/cycle.
    pub cleaning_emissions: Decimal,
    /// Transport emissions per 100 km of one-way distance, kg CO2e/(unit·100km).
    pub transport_factor_per_100km: Decimal,
}

impl Default for PhysicalConstants {
    /// Aluminium capsule reference data set.
    fn default() -> Self {
        Self {
            mass_per_unit: dec!(0.00324),
            emission_factor_primary: dec!(14.77),
            initial_logistics: dec!(0.00037),
            single_use_reference: dec!(0.00437),
            use_phase_emissions: Decimal::ZERO,
            cleaning_emissions: dec!(0.001),
            transport_factor_per_100km: dec!(0.00037),
        }
    }
}

impl PhysicalConstants {
    /// Validate a constants table loaded from an external file.
    ///
    /// Every field is a physical quantity; none may be negative. The
    /// single-use reference must be positive, otherwise break-even is
    /// meaningless.
    pub fn validate(&self) -> ReuseLcaResult<()> {
        let fields = [
            ("mass_per_unit", self.mass_per_unit),
            ("emission_factor_primary", self.emission_factor_primary),
            ("initial_logistics", self.initial_logistics),
            ("single_use_reference", self.single_use_reference),
            ("use_phase_emissions", self.use_phase_emissions),
            ("cleaning_emissions", self.cleaning_emissions),
            (
                "transport_factor_per_100km",
                self.transport_factor_per_100km,
            ),
        ];
        for (name, value) in fields {
            if value < Decimal::ZERO {
                return Err(ReuseLcaError::InvalidInput {
                    field: name.into(),
                    reason: "Physical constants cannot be negative".into(),
                });
            }
        }
        if self.single_use_reference == Decimal::ZERO {
            return Err(ReuseLcaError::InvalidInput {
                field: "single_use_reference".into(),
                reason: "Single-use reference emissions must be positive".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_valid() {
        assert!(PhysicalConstants::default().validate().is_ok());
    }

    #[test]
    fn test_default_material_emissions() {
        let c = PhysicalConstants::default();
        // 3.24 g aluminium at 14.77 kg CO2e/kg = 47.8548 g CO2e
        assert_eq!(c.mass_per_unit * c.emission_factor_primary, dec!(0.0478548));
    }

    #[test]
    fn test_negative_field_rejected() {
        let mut c = PhysicalConstants::default();
        c.cleaning_emissions = dec!(-0.001);
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_zero_single_use_reference_rejected() {
        let mut c = PhysicalConstants::default();
        c.single_use_reference = Decimal::ZERO;
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_roundtrips_through_json() {
        let c = PhysicalConstants::default();
        let json = serde_json::to_string(&c).unwrap();
        let back: PhysicalConstants = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
