//! Orientation price estimate for surveyed properties.
//!
//! Simplified linear model: a base unit price per property kind, scaled by
//! locality and condition multipliers. Values are calibration placeholders
//! in CZK.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of the valued property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    Apartment,
    House,
    Plot,
}

impl PropertyKind {
    /// Base unit price in CZK/m², for good condition in a district town.
    pub fn base_price_czk(self) -> f64 {
        match self {
            PropertyKind::Apartment => 65_000.0,
            PropertyKind::House => 52_000.0,
            PropertyKind::Plot => 3_500.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PropertyKind::Apartment => "apartment",
            PropertyKind::House => "family house",
            PropertyKind::Plot => "plot of land",
        }
    }
}

/// Location band of the property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locality {
    Prague,
    RegionalCity,
    DistrictCity,
    Countryside,
}

impl Locality {
    pub fn factor(self) -> f64 {
        match self {
            Locality::Prague => 1.55,
            Locality::RegionalCity => 1.25,
            Locality::DistrictCity => 1.0,
            Locality::Countryside => 0.85,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Locality::Prague => "Prague",
            Locality::RegionalCity => "regional city",
            Locality::DistrictCity => "district city",
            Locality::Countryside => "countryside",
        }
    }
}

/// Structural condition of the property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    NewBuild,
    Good,
    PreRenovation,
}

impl Condition {
    pub fn factor(self) -> f64 {
        match self {
            Condition::NewBuild => 1.15,
            Condition::Good => 1.0,
            Condition::PreRenovation => 0.8,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Condition::NewBuild => "new build",
            Condition::Good => "good condition",
            Condition::PreRenovation => "pre-renovation",
        }
    }
}

/// Inputs of a price estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimateInput {
    pub kind: PropertyKind,
    pub area_m2: f64,
    pub locality: Locality,
    pub condition: Condition,
}

/// Estimate result, rounded to whole CZK.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub unit_price_czk: f64,
    pub total_price_czk: f64,
}

/// Invalid estimator input.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PriceError {
    #[error("area must be a positive, finite number of m² (got {0})")]
    InvalidArea(f64),
}

/// Compute the orientation estimate for the given inputs.
pub fn estimate(input: &EstimateInput) -> Result<Estimate, PriceError> {
    if !input.area_m2.is_finite() || input.area_m2 <= 0.0 {
        return Err(PriceError::InvalidArea(input.area_m2));
    }
    let unit = input.kind.base_price_czk() * input.locality.factor() * input.condition.factor();
    Ok(Estimate {
        unit_price_czk: unit.round(),
        total_price_czk: (unit * input.area_m2).round(),
    })
}

/// Human-readable summary sentence for an estimate.
pub fn summary(input: &EstimateInput, estimate: &Estimate) -> String {
    format!(
        "Orientation valuation for a {} of {} m² ({}), {}. \
         Unit price ≈ {:.0} CZK/m²; estimated total {:.0} CZK.",
        input.kind.label(),
        input.area_m2,
        input.locality.label(),
        input.condition.label(),
        estimate.unit_price_czk,
        estimate.total_price_czk,
    )
}

/// Serializable export record of one calculation, as handed to the host
/// for download/sharing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateExport {
    pub meta: ExportMeta,
    pub input: EstimateInput,
    pub calculation: Estimate,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMeta {
    pub app: String,
    pub version: String,
}

impl EstimateExport {
    pub fn new(input: EstimateInput, calculation: Estimate) -> Self {
        let summary = summary(&input, &calculation);
        Self {
            meta: ExportMeta {
                app: "pudorys".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            input,
            calculation,
            summary,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_estimate() {
        let input = EstimateInput {
            kind: PropertyKind::Apartment,
            area_m2: 65.0,
            locality: Locality::Prague,
            condition: Condition::Good,
        };
        let result = estimate(&input).unwrap();
        assert_eq!(result.unit_price_czk, 100_750.0);
        assert_eq!(result.total_price_czk, 6_548_750.0);
    }

    #[test]
    fn test_factors_multiply() {
        let input = EstimateInput {
            kind: PropertyKind::House,
            area_m2: 120.0,
            locality: Locality::Countryside,
            condition: Condition::PreRenovation,
        };
        let result = estimate(&input).unwrap();
        // 52_000 * 0.85 * 0.8 = 35_360
        assert_eq!(result.unit_price_czk, 35_360.0);
        assert_eq!(result.total_price_czk, 4_243_200.0);
    }

    #[test]
    fn test_invalid_area_rejected() {
        for area in [0.0, -3.0, f64::NAN, f64::INFINITY] {
            let input = EstimateInput {
                kind: PropertyKind::Plot,
                area_m2: area,
                locality: Locality::DistrictCity,
                condition: Condition::Good,
            };
            assert!(matches!(
                estimate(&input),
                Err(PriceError::InvalidArea(_))
            ));
        }
    }

    #[test]
    fn test_export_roundtrip() {
        let input = EstimateInput {
            kind: PropertyKind::Apartment,
            area_m2: 65.0,
            locality: Locality::Prague,
            condition: Condition::Good,
        };
        let export = EstimateExport::new(input, estimate(&input).unwrap());
        let json = export.to_json().unwrap();
        assert!(json.contains("\"apartment\""));
        assert!(json.contains("\"prague\""));

        let back: EstimateExport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.calculation, export.calculation);
        assert!(back.summary.contains("Prague"));
    }
}
