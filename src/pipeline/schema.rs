//! Static description of the price-survey schema
//!
//! Column names, the pruned field set, the category composition table and the
//! composite index weights all live here so that no other module carries
//! field numbers of its own.

use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// Name of the country column
pub const COUNTRY_COLUMN: &str = "country";

/// Name of the city column
pub const CITY_COLUMN: &str = "city";

/// Number of numeric price-component columns (`x1`..`x55`)
pub const NUMERIC_FIELD_COUNT: usize = 55;

/// Rows missing more numeric fields than this are discarded before imputation
pub const MAX_MISSING_FIELDS: usize = 22;

/// Cell contents treated as missing in numeric fields, besides blanks.
/// The label columns are read verbatim, so a country coded `NA` survives.
pub const MISSING_SENTINELS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Fields removed after imputation; they never reach aggregation
pub const PRUNED_FIELDS: [FieldId; 15] = [
    FieldId(28),
    FieldId(30),
    FieldId(32),
    FieldId(34),
    FieldId(37),
    FieldId(38),
    FieldId(44),
    FieldId(45),
    FieldId(46),
    FieldId(47),
    FieldId(48),
    FieldId(49),
    FieldId(51),
    FieldId(53),
    FieldId(55),
];

/// 1-based positional label of a numeric column (`x1`..`x55`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FieldId(pub u8);

impl FieldId {
    /// Column header for this field, e.g. `x17`
    pub fn column_name(self) -> String {
        format!("x{}", self.0)
    }

    /// Zero-based position among the 55 raw numeric fields
    pub fn index(self) -> usize {
        self.0 as usize - 1
    }

    pub fn is_pruned(self) -> bool {
        PRUNED_FIELDS.contains(&self)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

/// All 55 raw numeric fields in positional order
pub fn all_fields() -> impl Iterator<Item = FieldId> {
    (1..=NUMERIC_FIELD_COUNT as u8).map(FieldId)
}

/// The 40 fields kept after pruning, in positional order
pub static RETAINED_FIELDS: LazyLock<Vec<FieldId>> =
    LazyLock::new(|| all_fields().filter(|f| !f.is_pruned()).collect());

/// Every column the input header must provide
pub fn required_columns() -> Vec<String> {
    let mut columns = vec![COUNTRY_COLUMN.to_string(), CITY_COLUMN.to_string()];
    columns.extend(all_fields().map(FieldId::column_name));
    columns
}

/// How often a surveyed price is paid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    Monthly,
    /// Yearly price, divided by 12 before summation
    Annual,
}

impl Cadence {
    /// Normalize a surveyed value to a monthly amount
    #[inline]
    pub fn to_monthly(self, value: f64) -> f64 {
        match self {
            Cadence::Monthly => value,
            Cadence::Annual => value / 12.0,
        }
    }
}

/// Derived spending (and income) groupings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    FoodRestaurants,
    Groceries,
    Transportation,
    UtilitiesLifestyle,
    Education,
    Housing,
    IncomeFinance,
}

impl Category {
    /// The six spending categories, in display order
    pub const SPENDING: [Category; 6] = [
        Category::FoodRestaurants,
        Category::Groceries,
        Category::Transportation,
        Category::UtilitiesLifestyle,
        Category::Education,
        Category::Housing,
    ];

    /// Spending categories followed by income
    pub const ALL: [Category; 7] = [
        Category::FoodRestaurants,
        Category::Groceries,
        Category::Transportation,
        Category::UtilitiesLifestyle,
        Category::Education,
        Category::Housing,
        Category::IncomeFinance,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::FoodRestaurants => "Food & Restaurants",
            Category::Groceries => "Groceries",
            Category::Transportation => "Transportation",
            Category::UtilitiesLifestyle => "Utilities & Lifestyle",
            Category::Education => "Education",
            Category::Housing => "Housing",
            Category::IncomeFinance => "Income & Finance",
        }
    }

    /// Member fields of this category with their cadence
    pub fn members(self) -> &'static [(FieldId, Cadence)] {
        CATEGORY_FIELDS
            .iter()
            .find(|(category, _)| *category == self)
            .map(|(_, members)| *members)
            .unwrap_or(&[])
    }

    /// Weight in the composite cost-of-living index; income carries none
    pub fn weight(self) -> Option<f64> {
        COST_WEIGHTS
            .iter()
            .find(|(category, _)| *category == self)
            .map(|(_, w)| *w)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

const fn monthly(id: u8) -> (FieldId, Cadence) {
    (FieldId(id), Cadence::Monthly)
}

const fn annual(id: u8) -> (FieldId, Cadence) {
    (FieldId(id), Cadence::Annual)
}

/// Category composition. Sums are order-independent.
pub const CATEGORY_FIELDS: [(Category, &[(FieldId, Cadence)]); 7] = [
    (
        Category::FoodRestaurants,
        &[
            monthly(1),
            monthly(2),
            monthly(3),
            monthly(4),
            monthly(5),
            monthly(6),
            monthly(7),
            monthly(8),
        ],
    ),
    (
        Category::Groceries,
        &[
            monthly(9),
            monthly(10),
            monthly(11),
            monthly(12),
            monthly(13),
            monthly(14),
            monthly(15),
            monthly(16),
            monthly(17),
            monthly(18),
            monthly(19),
            monthly(20),
            monthly(21),
            monthly(22),
            monthly(23),
            monthly(24),
            monthly(25),
            monthly(26),
            monthly(27),
        ],
    ),
    (
        Category::Transportation,
        &[monthly(29), monthly(31), monthly(33), annual(35)],
    ),
    (
        Category::UtilitiesLifestyle,
        &[monthly(36), monthly(39), monthly(40), monthly(41)],
    ),
    (Category::Education, &[monthly(42), annual(43)]),
    (Category::Housing, &[monthly(50), monthly(52)]),
    (Category::IncomeFinance, &[monthly(54)]),
];

/// Composite index weights, in the order the index is summed
pub const COST_WEIGHTS: [(Category, f64); 6] = [
    (Category::Housing, 0.40),
    (Category::FoodRestaurants, 0.10),
    (Category::Groceries, 0.10),
    (Category::Transportation, 0.15),
    (Category::UtilitiesLifestyle, 0.10),
    (Category::Education, 0.15),
];
