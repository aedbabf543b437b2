//! Unit conversion between recipe and stock units
//!
//! Two families are understood: mass (`g`, `gr`, `grammi`, `kg`, `kg.`) and
//! volume (`ml`, `l`, `lit`, `litro`). Units are compared case-insensitively
//! after trimming.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitFamily {
    Mass,
    Volume,
}

/// A pair of units the converter could not relate; costed with factor 1
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ConversionAmbiguity {
    pub from_unit: String,
    pub to_unit: String,
}

/// Result of a factor lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub factor: Decimal,
    pub ambiguity: Option<ConversionAmbiguity>,
}

impl Conversion {
    fn exact(factor: Decimal) -> Self {
        Self {
            factor,
            ambiguity: None,
        }
    }

    pub fn is_exact(&self) -> bool {
        self.ambiguity.is_none()
    }
}

/// Normalized form used for comparison
pub fn normalize_unit(unit: &str) -> String {
    unit.trim().to_lowercase()
}

/// Family and size of a unit, in grams or millilitres
fn classify(normalized: &str) -> Option<(UnitFamily, Decimal)> {
    match normalized {
        "g" | "gr" | "grammi" => Some((UnitFamily::Mass, Decimal::ONE)),
        "kg" | "kg." => Some((UnitFamily::Mass, Decimal::ONE_THOUSAND)),
        "ml" => Some((UnitFamily::Volume, Decimal::ONE)),
        "l" | "lit" | "litro" => Some((UnitFamily::Volume, Decimal::ONE_THOUSAND)),
        _ => None,
    }
}

/// Family of a unit, if recognized
pub fn unit_family(unit: &str) -> Option<UnitFamily> {
    classify(&normalize_unit(unit)).map(|(family, _)| family)
}

/// Converts quantities between recognized units
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitConverter;

impl UnitConverter {
    pub fn new() -> Self {
        Self
    }

    /// Multiplier taking a quantity in `from_unit` to `to_unit`
    ///
    /// Unrelated or unknown pairs yield factor 1 together with a
    /// [`ConversionAmbiguity`], and a warning is logged.
    pub fn factor(&self, from_unit: &str, to_unit: &str) -> Conversion {
        let from = normalize_unit(from_unit);
        let to = normalize_unit(to_unit);

        if from == to {
            return Conversion::exact(Decimal::ONE);
        }

        match (classify(&from), classify(&to)) {
            (Some((from_family, from_size)), Some((to_family, to_size)))
                if from_family == to_family =>
            {
                Conversion::exact(from_size / to_size)
            }
            _ => {
                tracing::warn!(
                    from_unit = %from_unit,
                    to_unit = %to_unit,
                    "No conversion between units, using factor 1"
                );
                Conversion {
                    factor: Decimal::ONE,
                    ambiguity: Some(ConversionAmbiguity {
                        from_unit: from_unit.to_string(),
                        to_unit: to_unit.to_string(),
                    }),
                }
            }
        }
    }

    /// Express `quantity` of `from_unit` in `to_unit`
    pub fn convert(&self, quantity: Decimal, from_unit: &str, to_unit: &str) -> (Decimal, Conversion) {
        let conversion = self.factor(from_unit, to_unit);
        (quantity * conversion.factor, conversion)
    }
}
