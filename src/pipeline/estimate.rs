//! What-if estimator for user-supplied monthly budgets
//!
//! Uses the same index and ratio formulas as the dataset pipeline but never
//! touches the dataset.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::aggregate::CategoryAmounts;
use super::error::{PipelineError, Result};
use super::index::{cost_of_living, cost_to_income_ratio};
use super::schema::Category;

/// Ratio above which a lifestyle exceeds income
pub const EXCEEDS_THRESHOLD: f64 = 1.0;

/// Ratio above which a budget is considered tight
pub const TIGHT_THRESHOLD: f64 = 0.6;

/// Affordability verdict for a cost-to-income ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Affordability {
    Exceeds,
    Tight,
    Manageable,
}

impl Affordability {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio > EXCEEDS_THRESHOLD {
            Affordability::Exceeds
        } else if ratio > TIGHT_THRESHOLD {
            Affordability::Tight
        } else {
            Affordability::Manageable
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Affordability::Exceeds => "This lifestyle exceeds your income!",
            Affordability::Tight => "This lifestyle may be tight on your budget.",
            Affordability::Manageable => "Your lifestyle appears financially manageable.",
        }
    }
}

impl fmt::Display for Affordability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Affordability::Exceeds => write!(f, "exceeds income"),
            Affordability::Tight => write!(f, "tight budget"),
            Affordability::Manageable => write!(f, "manageable"),
        }
    }
}

/// Monthly amounts entered by the user
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CustomEstimateInput {
    pub income: f64,
    pub housing: f64,
    pub food_restaurants: f64,
    pub groceries: f64,
    pub transportation: f64,
    pub utilities_lifestyle: f64,
    pub education: f64,
}

impl Default for CustomEstimateInput {
    fn default() -> Self {
        Self {
            income: 3000.0,
            housing: 1000.0,
            food_restaurants: 400.0,
            groceries: 300.0,
            transportation: 200.0,
            utilities_lifestyle: 150.0,
            education: 100.0,
        }
    }
}

impl CustomEstimateInput {
    pub fn amounts(&self) -> CategoryAmounts {
        CategoryAmounts {
            food_restaurants: self.food_restaurants,
            groceries: self.groceries,
            transportation: self.transportation,
            utilities_lifestyle: self.utilities_lifestyle,
            education: self.education,
            housing: self.housing,
            income_finance: self.income,
        }
    }

    /// Income must be positive; category amounts must be non-negative
    pub fn validate(&self) -> Result<()> {
        if !self.income.is_finite() || self.income <= 0.0 {
            return Err(PipelineError::InvalidInput(format!(
                "income must be a positive number, got {}",
                self.income
            )));
        }
        let amounts = self.amounts();
        for category in Category::SPENDING {
            let value = amounts.get(category);
            if !value.is_finite() || value < 0.0 {
                return Err(PipelineError::InvalidInput(format!(
                    "{} must be a non-negative number, got {}",
                    category, value
                )));
            }
        }
        Ok(())
    }
}

/// Result of a what-if estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CustomEstimate {
    #[serde(rename = "CostOfLiving")]
    pub cost_of_living: f64,
    #[serde(rename = "CostToIncomeRatio")]
    pub cost_to_income_ratio: f64,
    pub affordability: Affordability,
}

pub fn estimate(input: &CustomEstimateInput) -> Result<CustomEstimate> {
    input.validate()?;
    let cost = cost_of_living(&input.amounts());
    let ratio = cost_to_income_ratio(cost, input.income)?;
    Ok(CustomEstimate {
        cost_of_living: cost,
        cost_to_income_ratio: ratio,
        affordability: Affordability::from_ratio(ratio),
    })
}
