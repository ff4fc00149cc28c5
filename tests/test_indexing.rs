//! Tests for category aggregation, the composite index and income tiers

use costlens::pipeline::{
    categorize, cost_of_living, sum_members, Category, CategoryAmounts, CleanRecord, Dataset,
    IncomeTier, CATEGORY_FIELDS, COST_WEIGHTS, RETAINED_FIELDS,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

#[path = "common/mod.rs"]
mod common;

use common::*;

fn random_clean_record(rng: &mut StdRng) -> CleanRecord {
    // Multiples of 12 keep annual fields exact after division
    let values = RETAINED_FIELDS
        .iter()
        .map(|_| (rng.gen_range(1..500) * 12) as f64)
        .collect();
    CleanRecord::new("Testland", "Sample City", values).unwrap()
}

#[test]
fn test_category_sums_order_independent() {
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..50 {
        let record = random_clean_record(&mut rng);
        let categorized = categorize(record.clone());

        for (category, members) in CATEGORY_FIELDS.iter() {
            let mut shuffled = members.to_vec();
            shuffled.shuffle(&mut rng);

            let total = sum_members(&shuffled, |field| record.value(field).unwrap());
            assert_eq!(
                total,
                categorized.categories.get(*category),
                "{} changed under permutation",
                category
            );
        }
    }
}

#[test]
fn test_weights_sum_to_one_exactly() {
    let total = COST_WEIGHTS.iter().fold(0.0, |acc, (_, w)| acc + w);
    assert_eq!(total, 1.0);
}

#[test]
fn test_cost_of_living_matches_weighted_formula() {
    let amounts = CategoryAmounts {
        food_restaurants: 120.0,
        groceries: 240.0,
        transportation: 60.0,
        utilities_lifestyle: 180.0,
        education: 30.0,
        housing: 900.0,
        income_finance: 2500.0,
    };
    let expected =
        0.4 * 900.0 + 0.1 * 120.0 + 0.1 * 240.0 + 0.15 * 60.0 + 0.1 * 180.0 + 0.15 * 30.0;
    assert!((cost_of_living(&amounts) - expected).abs() < 1e-9);

    let per_category: f64 = Category::SPENDING
        .iter()
        .map(|c| c.weight().unwrap() * amounts.get(*c))
        .sum();
    assert!((cost_of_living(&amounts) - per_category).abs() < 1e-9);
}

#[test]
fn test_three_rows_get_three_tiers() {
    let rows = vec![
        SurveyRow::with_income("A", "Low Town", 1000.0),
        SurveyRow::with_income("B", "Mid Town", 2000.0),
        SurveyRow::with_income("C", "High Town", 3000.0),
    ];
    let dataset = Dataset::from_raw(rows.into_iter().map(SurveyRow::into_raw).collect()).unwrap();

    let tiers: Vec<IncomeTier> = dataset.records().iter().map(|r| r.income_tier).collect();
    assert_eq!(tiers, vec![IncomeTier::Low, IncomeTier::Medium, IncomeTier::High]);
}

#[test]
fn test_tier_groups_balanced_for_distinct_incomes() {
    let mut rng = StdRng::seed_from_u64(3);

    for n in 1..=60usize {
        let mut incomes: Vec<u32> = (1..=n as u32).map(|i| i * 150 + 200).collect();
        incomes.shuffle(&mut rng);

        let rows: Vec<_> = incomes
            .iter()
            .enumerate()
            .map(|(i, &income)| {
                SurveyRow::with_income("Testland", &format!("City {}", i), income as f64).into_raw()
            })
            .collect();
        let dataset = Dataset::from_raw(rows).unwrap();

        let counts: Vec<usize> = dataset.tier_counts().into_iter().map(|(_, c)| c).collect();
        assert_eq!(counts.iter().sum::<usize>(), n);
        let max = *counts.iter().max().unwrap();
        let min = *counts.iter().min().unwrap();
        assert!(max - min <= 1, "n = {}: unbalanced tiers {:?}", n, counts);
    }
}

#[test]
fn test_tiers_are_monotonic_in_income() {
    let mut rng = StdRng::seed_from_u64(5);
    let rows: Vec<_> = (0..40)
        .map(|i| {
            let income = rng.gen_range(300..9000) as f64;
            SurveyRow::with_income("Testland", &format!("City {}", i), income).into_raw()
        })
        .collect();
    let dataset = Dataset::from_raw(rows).unwrap();

    let mut records: Vec<_> = dataset.records().iter().collect();
    records.sort_by(|a, b| a.income().total_cmp(&b.income()));
    for pair in records.windows(2) {
        assert!(pair[0].income_tier <= pair[1].income_tier);
    }
}

#[test]
fn test_tier_depends_on_population() {
    let base = vec![
        SurveyRow::with_income("A", "Fixed", 2000.0),
        SurveyRow::with_income("B", "Poorer", 1000.0),
        SurveyRow::with_income("C", "Richer", 3000.0),
    ];
    let dataset =
        Dataset::from_raw(base.clone().into_iter().map(SurveyRow::into_raw).collect()).unwrap();
    assert_eq!(dataset.find("A", "Fixed").unwrap().income_tier, IncomeTier::Medium);

    let mut extended = base;
    extended.push(SurveyRow::with_income("D", "Richest", 5000.0));
    extended.push(SurveyRow::with_income("E", "Wealthy", 4000.0));
    let dataset =
        Dataset::from_raw(extended.into_iter().map(SurveyRow::into_raw).collect()).unwrap();
    assert_eq!(dataset.find("A", "Fixed").unwrap().income_tier, IncomeTier::Low);
}

#[test]
fn test_ratio_is_cost_over_income() {
    let rows = vec![SurveyRow::with_income("A", "Town", 2000.0).into_raw()];
    let dataset = Dataset::from_raw(rows).unwrap();
    let record = &dataset.records()[0];

    let ratio = record.ratio().unwrap();
    assert!((ratio - record.cost_of_living / 2000.0).abs() < 1e-12);
}
