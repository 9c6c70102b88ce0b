use serde::{Deserialize, Serialize};

use std::{
    collections::BTreeMap,
    fmt::{Debug, Display},
};

use crate::sales::Sales;

/// Departments whose average sale falls below this amount are flagged in
/// the summary.
pub const LOW_AVERAGE_THRESHOLD: f64 = 1000.0;

/// Defines the CSV format for sales data.
///
/// The input file has the header `name,department,sales`.
#[derive(Clone, Debug, Deserialize, Serialize, Eq, PartialEq)]
pub struct Record {
    pub name: String,
    pub department: String,
    pub sales: Sales,
}

impl Record {
    #[must_use]
    pub fn new(name: &str, department: &str, sales: Sales) -> Self {
        Self {
            name: name.to_string(),
            department: department.to_string(),
            sales,
        }
    }
}

/// One employee's sales within a department.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SellerEntry {
    pub name: String,
    pub sales: Sales,
}

impl Display for SellerEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.sales)
    }
}

/// Holds aggregated sales data for a single department.
///
/// Built by [`summarize`]. The `sellers` list is ordered by sales,
/// descending; sellers with equal sales keep their input order.
///
/// `best_seller` starts out empty with zero sales and is only replaced by a
/// strictly greater sale, so a department where every sale is zero reports
/// an empty best seller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DepartmentStats {
    pub employee_count: usize,
    pub total_sales: Sales,
    pub max_sale: Sales,
    pub min_sale: Sales,
    pub best_seller: SellerEntry,
    pub sellers: Vec<SellerEntry>,
}

impl DepartmentStats {
    fn new(first_sale: Sales) -> Self {
        Self {
            employee_count: 0,
            total_sales: Sales::default(),
            max_sale: Sales::default(),
            min_sale: first_sale,
            best_seller: SellerEntry::default(),
            sellers: Vec::new(),
        }
    }

    fn add(&mut self, name: String, sales: Sales) {
        self.employee_count += 1;
        self.total_sales += sales;
        self.max_sale = self.max_sale.max(sales);
        self.min_sale = self.min_sale.min(sales);
        if sales > self.best_seller.sales {
            self.best_seller = SellerEntry {
                name: name.clone(),
                sales,
            };
        }
        self.sellers.push(SellerEntry { name, sales });
    }

    /// Returns the mean sale per employee.
    ///
    /// A department with no employees has an average of zero.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_sale(&self) -> f64 {
        if self.employee_count == 0 {
            return 0.0;
        }
        self.total_sales.get() as f64 / self.employee_count as f64
    }

    #[must_use]
    pub fn is_low_average(&self) -> bool {
        self.average_sale() < LOW_AVERAGE_THRESHOLD
    }
}

/// Aggregates `records` by department in a single pass.
///
/// # Examples
///
/// ```
/// # use sales_report::{summarize, Record, Sales};
/// let summary = summarize([
///     Record::new("Bob", "Sales", Sales::new(1500)),
///     Record::new("Charlie", "Sales", Sales::new(800)),
/// ]);
/// let sales = &summary["Sales"];
/// assert_eq!(sales.employee_count, 2);
/// assert_eq!(sales.total_sales, Sales::new(2300));
/// assert_eq!(sales.best_seller.to_string(), "Bob (1500)");
/// ```
pub fn summarize(records: impl IntoIterator<Item = Record>) -> BTreeMap<String, DepartmentStats> {
    let mut summary = records
        .into_iter()
        .fold(BTreeMap::new(), |mut summary, record| {
            summary
                .entry(record.department)
                .or_insert_with(|| DepartmentStats::new(record.sales))
                .add(record.name, record.sales);
            summary
        });
    for stats in summary.values_mut() {
        stats.sellers.sort_by(|a, b| b.sales.cmp(&a.sales));
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Record> {
        vec![
            Record::new("Alice", "Marketing", Sales::new(1200)),
            Record::new("Bob", "Sales", Sales::new(1500)),
            Record::new("Charlie", "Sales", Sales::new(800)),
            Record::new("Diana", "HR", Sales::new(600)),
            Record::new("Eve", "Marketing", Sales::new(700)),
        ]
    }

    fn seller(name: &str, sales: u64) -> SellerEntry {
        SellerEntry {
            name: name.into(),
            sales: Sales::new(sales),
        }
    }

    #[test]
    fn summarize_fn_computes_department_stats() {
        let summary = summarize(sample());
        let sales = &summary["Sales"];
        assert_eq!(sales.employee_count, 2);
        assert_eq!(sales.total_sales, Sales::new(2300));
        assert_eq!(sales.max_sale, Sales::new(1500));
        assert_eq!(sales.min_sale, Sales::new(800));
        assert_eq!(sales.best_seller.to_string(), "Bob (1500)");
        assert_eq!(sales.sellers, vec![seller("Bob", 1500), seller("Charlie", 800)]);
    }

    #[test]
    fn summarize_fn_sorts_sellers_by_sales_descending() {
        let summary = summarize(sample());
        assert_eq!(
            summary["Marketing"].sellers,
            vec![seller("Alice", 1200), seller("Eve", 700)]
        );
        let summary = summarize([
            Record::new("Low", "Ops", Sales::new(10)),
            Record::new("High", "Ops", Sales::new(90)),
            Record::new("Mid", "Ops", Sales::new(50)),
        ]);
        assert_eq!(
            summary["Ops"].sellers,
            vec![seller("High", 90), seller("Mid", 50), seller("Low", 10)]
        );
    }

    #[test]
    fn summarize_fn_keeps_input_order_for_tied_sellers() {
        let summary = summarize([
            Record::new("X", "Ops", Sales::new(500)),
            Record::new("Z", "Ops", Sales::new(100)),
            Record::new("Y", "Ops", Sales::new(500)),
        ]);
        let ops = &summary["Ops"];
        assert_eq!(
            ops.sellers,
            vec![seller("X", 500), seller("Y", 500), seller("Z", 100)]
        );
        assert_eq!(ops.best_seller, seller("X", 500), "first seen wins ties");
    }

    #[test]
    fn summarize_fn_returns_empty_map_for_no_records() {
        assert!(summarize(Vec::new()).is_empty());
    }

    #[test]
    fn summarize_fn_leaves_best_seller_empty_when_all_sales_are_zero() {
        let summary = summarize([
            Record::new("Nobody", "Idle", Sales::new(0)),
            Record::new("Nemo", "Idle", Sales::new(0)),
        ]);
        let idle = &summary["Idle"];
        assert_eq!(idle.best_seller, SellerEntry::default());
        assert_eq!(idle.best_seller.to_string(), " (0)");
        assert_eq!(idle.max_sale, Sales::default());
        assert_eq!(idle.min_sale, Sales::default());
        assert_eq!(idle.employee_count, 2);
    }

    #[test]
    fn summarize_fn_preserves_totals_and_counts() {
        let records = vec![
            Record::new("A", "North", Sales::new(300)),
            Record::new("B", "South", Sales::new(0)),
            Record::new("C", "North", Sales::new(1700)),
            Record::new("D", "East", Sales::new(45)),
            Record::new("E", "South", Sales::new(999)),
            Record::new("F", "North", Sales::new(300)),
        ];
        let expected_total: Sales = records.iter().map(|r| r.sales).sum();
        let summary = summarize(records.clone());
        let total: Sales = summary.values().map(|s| s.total_sales).sum();
        assert_eq!(total, expected_total);
        for (dept, stats) in &summary {
            let count = records.iter().filter(|r| &r.department == dept).count();
            assert_eq!(stats.employee_count, count, "{dept}");
            assert_eq!(stats.sellers.len(), count, "{dept}");
            let seller_total: Sales = stats.sellers.iter().map(|s| s.sales).sum();
            assert_eq!(seller_total, stats.total_sales, "{dept}");
            let max = stats.sellers.iter().map(|s| s.sales).max().unwrap();
            let min = stats.sellers.iter().map(|s| s.sales).min().unwrap();
            assert_eq!(max, stats.max_sale, "{dept}");
            assert_eq!(min, stats.min_sale, "{dept}");
            if max > Sales::default() {
                assert_eq!(stats.best_seller.sales, stats.max_sale, "{dept}");
            }
        }
    }

    #[test]
    fn summarize_fn_totals_largest_amounts_without_overflow() {
        let summary = summarize([
            Record::new("A", "Ops", Sales::new(u64::MAX)),
            Record::new("B", "Ops", Sales::new(1)),
        ]);
        let ops = &summary["Ops"];
        assert_eq!(ops.total_sales.get(), u128::from(u64::MAX) + 1);
        assert_eq!(ops.max_sale, Sales::new(u64::MAX));
        assert_eq!(ops.best_seller.name, "A");
    }

    #[test]
    fn average_sale_fn_divides_total_by_employees() {
        let summary = summarize(sample());
        assert!((summary["Sales"].average_sale() - 1150.0).abs() < f64::EPSILON);
        assert!(!summary["Sales"].is_low_average());
        assert!((summary["Marketing"].average_sale() - 950.0).abs() < f64::EPSILON);
        assert!(summary["Marketing"].is_low_average());
    }

    #[test]
    fn average_sale_fn_returns_zero_for_empty_department() {
        let stats = DepartmentStats::new(Sales::default());
        assert!(stats.average_sale().abs() < f64::EPSILON);
    }
}
