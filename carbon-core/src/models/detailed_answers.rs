use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::quick_answers::Vehicle;

/// Monthly household energy use.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Energy {
    /// kWh per month
    pub electricity: Decimal,
    /// m³ per month
    pub gas: Decimal,
    /// billing units per month
    pub water: Decimal,
}

/// Monthly commuting.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Transport {
    pub km: Decimal,
    #[serde(rename = "type")]
    pub vehicle: Vehicle,
}

/// Meals per week by kind.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Diet {
    pub meat: Decimal,
    pub veg: Decimal,
    pub grain: Decimal,
}

/// Monthly spend (NTD).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Consumption {
    pub clothes: Decimal,
    pub electronics: Decimal,
}

/// Weekly waste and recycling.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Waste {
    /// 14 L garbage bags per week
    pub bags: Decimal,
    /// sorted recycling items per week
    pub recycle: Decimal,
}

/// Request body for `/api/calculate/detailed`.
///
/// Each wizard step writes to exactly one of these categories.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DetailedAnswers {
    pub energy: Energy,
    pub transport: Transport,
    pub diet: Diet,
    pub consumption: Consumption,
    pub waste: Waste,
}

/// Addressable `(category, field)` pair of [`DetailedAnswers`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetailedField {
    Electricity,
    Gas,
    Water,
    Km,
    VehicleType,
    Meat,
    Veg,
    Grain,
    Clothes,
    Electronics,
    Bags,
    Recycle,
}

impl DetailedField {
    pub fn all() -> &'static [DetailedField] {
        &[
            DetailedField::Electricity,
            DetailedField::Gas,
            DetailedField::Water,
            DetailedField::VehicleType,
            DetailedField::Km,
            DetailedField::Meat,
            DetailedField::Veg,
            DetailedField::Grain,
            DetailedField::Clothes,
            DetailedField::Electronics,
            DetailedField::Bags,
            DetailedField::Recycle,
        ]
    }

    pub fn category(&self) -> &'static str {
        match self {
            Self::Electricity | Self::Gas | Self::Water => "energy",
            Self::Km | Self::VehicleType => "transport",
            Self::Meat | Self::Veg | Self::Grain => "diet",
            Self::Clothes | Self::Electronics => "consumption",
            Self::Bags | Self::Recycle => "waste",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Electricity => "electricity",
            Self::Gas => "gas",
            Self::Water => "water",
            Self::Km => "km",
            Self::VehicleType => "type",
            Self::Meat => "meat",
            Self::Veg => "veg",
            Self::Grain => "grain",
            Self::Clothes => "clothes",
            Self::Electronics => "electronics",
            Self::Bags => "bags",
            Self::Recycle => "recycle",
        }
    }

    /// Wizard step (1-based) on which this field is entered.
    pub fn step(&self) -> usize {
        match self.category() {
            "energy" => 1,
            "transport" => 2,
            "diet" => 3,
            "consumption" => 4,
            _ => 5,
        }
    }

    pub fn from_parts(
        category: &str,
        field: &str,
    ) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|f| f.category() == category && f.name() == field)
    }

    /// Fields entered on the given wizard step, in form order.
    pub fn for_step(step: usize) -> Vec<DetailedField> {
        Self::all()
            .iter()
            .copied()
            .filter(|f| f.step() == step)
            .collect()
    }
}

/// Parses a numeric form entry. Blank input is zero; commas are accepted as
/// thousands separators.
pub(crate) fn parse_amount(value: &str) -> Option<Decimal> {
    let normalized = value.trim().replace(',', "");
    if normalized.is_empty() {
        return Some(Decimal::ZERO);
    }
    match normalized.parse() {
        Ok(amount) => Some(amount),
        Err(e) => {
            warn!(input = %value, "invalid amount: {}", e);
            None
        }
    }
}

impl DetailedAnswers {
    /// Merges one field. Returns `false` and leaves the answers untouched if
    /// `value` cannot be interpreted for that field.
    pub fn set(
        &mut self,
        field: DetailedField,
        value: &str,
    ) -> bool {
        if field == DetailedField::VehicleType {
            return match Vehicle::parse(value) {
                Some(vehicle) => {
                    self.transport.vehicle = vehicle;
                    true
                }
                None => false,
            };
        }

        let Some(amount) = parse_amount(value) else {
            return false;
        };
        match self.amount_mut(field) {
            Some(slot) => {
                *slot = amount;
                true
            }
            None => false,
        }
    }

    fn amount_mut(
        &mut self,
        field: DetailedField,
    ) -> Option<&mut Decimal> {
        match field {
            DetailedField::Electricity => Some(&mut self.energy.electricity),
            DetailedField::Gas => Some(&mut self.energy.gas),
            DetailedField::Water => Some(&mut self.energy.water),
            DetailedField::Km => Some(&mut self.transport.km),
            DetailedField::VehicleType => None,
            DetailedField::Meat => Some(&mut self.diet.meat),
            DetailedField::Veg => Some(&mut self.diet.veg),
            DetailedField::Grain => Some(&mut self.diet.grain),
            DetailedField::Clothes => Some(&mut self.consumption.clothes),
            DetailedField::Electronics => Some(&mut self.consumption.electronics),
            DetailedField::Bags => Some(&mut self.waste.bags),
            DetailedField::Recycle => Some(&mut self.waste.recycle),
        }
    }

    /// Current value of a field, formatted the way it is sent.
    pub fn get(
        &self,
        field: DetailedField,
    ) -> String {
        match field {
            DetailedField::Electricity => self.energy.electricity.to_string(),
            DetailedField::Gas => self.energy.gas.to_string(),
            DetailedField::Water => self.energy.water.to_string(),
            DetailedField::Km => self.transport.km.to_string(),
            DetailedField::VehicleType => self.transport.vehicle.as_str().to_string(),
            DetailedField::Meat => self.diet.meat.to_string(),
            DetailedField::Veg => self.diet.veg.to_string(),
            DetailedField::Grain => self.diet.grain.to_string(),
            DetailedField::Clothes => self.consumption.clothes.to_string(),
            DetailedField::Electronics => self.consumption.electronics.to_string(),
            DetailedField::Bags => self.waste.bags.to_string(),
            DetailedField::Recycle => self.waste.recycle.to_string(),
        }
    }
}

impl fmt::Display for DetailedAnswers {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let mut current = "";
        for field in DetailedField::all() {
            if field.category() != current {
                current = field.category();
                writeln!(f, "[{current}]")?;
            }
            writeln!(f, "  {:<12}{}", field.name(), self.get(*field))?;
        }
        Ok(())
    }
}
