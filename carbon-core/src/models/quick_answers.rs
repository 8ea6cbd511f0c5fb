use std::fmt;

use serde::{Deserialize, Serialize};

/// Main mode of transport, shared by the quick commute question and the
/// detailed transport step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vehicle {
    #[default]
    ScooterGas,
    ScooterElectric,
    CarGas,
    CarElectric,
    Public,
    Bike,
}

impl Vehicle {
    pub fn all() -> &'static [Vehicle] {
        &[
            Vehicle::ScooterGas,
            Vehicle::ScooterElectric,
            Vehicle::CarGas,
            Vehicle::CarElectric,
            Vehicle::Public,
            Vehicle::Bike,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ScooterGas => "scooter_gas",
            Self::ScooterElectric => "scooter_electric",
            Self::CarGas => "car_gas",
            Self::CarElectric => "car_electric",
            Self::Public => "public",
            Self::Bike => "bike",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|v| v.as_str() == s.trim())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietHabit {
    MeatHeavy,
    #[default]
    Balanced,
    Convenience,
    Vegetarian,
}

impl DietHabit {
    pub fn all() -> &'static [DietHabit] {
        &[
            DietHabit::MeatHeavy,
            DietHabit::Balanced,
            DietHabit::Convenience,
            DietHabit::Vegetarian,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MeatHeavy => "meat_heavy",
            Self::Balanced => "balanced",
            Self::Convenience => "convenience",
            Self::Vegetarian => "vegetarian",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|v| v.as_str() == s.trim())
    }
}

/// Monthly shopping spend bracket (excluding food).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShoppingLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl ShoppingLevel {
    pub fn all() -> &'static [ShoppingLevel] {
        &[ShoppingLevel::Low, ShoppingLevel::Medium, ShoppingLevel::High]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|v| v.as_str() == s.trim())
    }
}

/// One question of the quick estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickField {
    Commute,
    Diet,
    Shopping,
}

/// Request body for `/api/calculate/quick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuickAnswers {
    pub commute: Vehicle,
    pub diet: DietHabit,
    pub shopping: ShoppingLevel,
}

impl QuickAnswers {
    /// Sets a single answer from its wire value. Unknown values leave the
    /// answer unchanged and return `false`.
    pub fn set(
        &mut self,
        field: QuickField,
        value: &str,
    ) -> bool {
        match field {
            QuickField::Commute => Vehicle::parse(value).map(|v| self.commute = v),
            QuickField::Diet => DietHabit::parse(value).map(|v| self.diet = v),
            QuickField::Shopping => ShoppingLevel::parse(value).map(|v| self.shopping = v),
        }
        .is_some()
    }
}

impl fmt::Display for QuickAnswers {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Commute:  {}", self.commute.as_str())?;
        writeln!(f, "Diet:     {}", self.diet.as_str())?;
        write!(f, "Shopping: {}", self.shopping.as_str())
    }
}
