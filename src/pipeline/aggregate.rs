//! Category aggregation over cleaned records

use serde::{Deserialize, Serialize};

use super::cleaner::CleanRecord;
use super::schema::{Cadence, Category, FieldId};

/// Monthly amounts per category
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryAmounts {
    #[serde(rename = "Food & Restaurants")]
    pub food_restaurants: f64,
    #[serde(rename = "Groceries")]
    pub groceries: f64,
    #[serde(rename = "Transportation")]
    pub transportation: f64,
    #[serde(rename = "Utilities & Lifestyle")]
    pub utilities_lifestyle: f64,
    #[serde(rename = "Education")]
    pub education: f64,
    #[serde(rename = "Housing")]
    pub housing: f64,
    #[serde(rename = "Income & Finance")]
    pub income_finance: f64,
}

impl CategoryAmounts {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::FoodRestaurants => self.food_restaurants,
            Category::Groceries => self.groceries,
            Category::Transportation => self.transportation,
            Category::UtilitiesLifestyle => self.utilities_lifestyle,
            Category::Education => self.education,
            Category::Housing => self.housing,
            Category::IncomeFinance => self.income_finance,
        }
    }

    pub fn set(&mut self, category: Category, value: f64) {
        let slot = match category {
            Category::FoodRestaurants => &mut self.food_restaurants,
            Category::Groceries => &mut self.groceries,
            Category::Transportation => &mut self.transportation,
            Category::UtilitiesLifestyle => &mut self.utilities_lifestyle,
            Category::Education => &mut self.education,
            Category::Housing => &mut self.housing,
            Category::IncomeFinance => &mut self.income_finance,
        };
        *slot = value;
    }

    /// Amounts of the six spending categories, in display order
    pub fn spending(&self) -> Vec<(Category, f64)> {
        Category::SPENDING
            .iter()
            .map(|&c| (c, self.get(c)))
            .collect()
    }
}

/// A cleaned record with its category totals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorizedRecord {
    #[serde(flatten)]
    pub record: CleanRecord,
    pub categories: CategoryAmounts,
}

/// Sum member values after normalizing each to a monthly amount
pub fn sum_members<F>(members: &[(FieldId, Cadence)], value_of: F) -> f64
where
    F: Fn(FieldId) -> f64,
{
    members
        .iter()
        .map(|&(field, cadence)| cadence.to_monthly(value_of(field)))
        .sum()
}

/// Compute all seven category totals for a cleaned record
pub fn categorize(record: CleanRecord) -> CategorizedRecord {
    let mut categories = CategoryAmounts::default();
    for category in Category::ALL {
        // Members are retained by construction; see schema tests
        let total = sum_members(category.members(), |field| {
            record.value(field).unwrap_or_default()
        });
        categories.set(category, total);
    }
    CategorizedRecord { record, categories }
}

pub fn categorize_all(records: Vec<CleanRecord>) -> Vec<CategorizedRecord> {
    records.into_iter().map(categorize).collect()
}
