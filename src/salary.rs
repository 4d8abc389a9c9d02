use crate::posting::Posting;

/// Multiplier applied when only the lower bound is published
pub const LOWER_BOUND_FACTOR: f64 = 1.2;
/// Multiplier applied when only the upper bound is published
pub const UPPER_BOUND_FACTOR: f64 = 0.8;

/// Estimate a ruble salary from a posting's bounds.
///
/// Returns `None` when the salary is in another currency or neither bound
/// is published. With both bounds the midpoint is used; a lone lower bound
/// is scaled up by 1.2 and a lone upper bound scaled down by 0.8.
pub fn predict_rub_salary(posting: &Posting) -> Option<f64> {
    let fields = posting.salary_fields();

    if fields.currency != Some(posting.ruble_code()) {
        return None;
    }

    estimate_from_bounds(fields.from, fields.to)
}

pub fn estimate_from_bounds(from: Option<f64>, to: Option<f64>) -> Option<f64> {
    match (from, to) {
        (Some(from), Some(to)) => Some((from + to) / 2.0),
        (Some(from), None) => Some(from * LOWER_BOUND_FACTOR),
        (None, Some(to)) => Some(to * UPPER_BOUND_FACTOR),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::posting::{HhSalary, HhVacancy, SjVacancy};

    fn hh(from: Option<f64>, to: Option<f64>, currency: &str) -> Posting {
        Posting::HeadHunter(HhVacancy {
            id: None,
            name: None,
            salary: Some(HhSalary {
                from,
                to,
                currency: Some(currency.to_string()),
            }),
        })
    }

    fn sj(from: Option<f64>, to: Option<f64>, currency: &str) -> Posting {
        Posting::SuperJob(SjVacancy {
            id: None,
            profession: None,
            payment_from: from,
            payment_to: to,
            currency: Some(currency.to_string()),
        })
    }

    #[test]
    fn test_both_bounds_give_midpoint() {
        let posting = hh(Some(100000.0), Some(140000.0), "RUR");
        assert_eq!(predict_rub_salary(&posting), Some(120000.0));

        let posting = sj(Some(80000.0), Some(90000.0), "rub");
        assert_eq!(predict_rub_salary(&posting), Some(85000.0));
    }

    #[test]
    fn test_lower_bound_only() {
        let posting = hh(Some(100000.0), None, "RUR");
        assert_eq!(predict_rub_salary(&posting), Some(120000.0));

        let posting = sj(Some(50000.0), Some(0.0), "rub");
        assert_eq!(predict_rub_salary(&posting), Some(60000.0));
    }

    #[test]
    fn test_upper_bound_only() {
        let posting = hh(None, Some(200000.0), "RUR");
        assert_eq!(predict_rub_salary(&posting), Some(160000.0));

        let posting = sj(Some(0.0), Some(100000.0), "rub");
        assert_eq!(predict_rub_salary(&posting), Some(80000.0));
    }

    #[test]
    fn test_foreign_currency_is_undetermined() {
        assert_eq!(predict_rub_salary(&hh(Some(3000.0), Some(5000.0), "USD")), None);
        assert_eq!(predict_rub_salary(&sj(Some(5000.0), None, "usd")), None);
    }

    #[test]
    fn test_currency_code_belongs_to_board() {
        // Each board spells rubles its own way
        assert_eq!(predict_rub_salary(&hh(Some(1000.0), None, "rub")), None);
        assert_eq!(predict_rub_salary(&sj(Some(1000.0), None, "RUR")), None);
    }

    #[test]
    fn test_no_bounds_is_undetermined() {
        assert_eq!(predict_rub_salary(&hh(None, None, "RUR")), None);
        assert_eq!(predict_rub_salary(&sj(Some(0.0), Some(0.0), "rub")), None);

        let no_salary = Posting::HeadHunter(HhVacancy {
            id: None,
            name: None,
            salary: None,
        });
        assert_eq!(predict_rub_salary(&no_salary), None);

        let no_currency = Posting::SuperJob(SjVacancy {
            id: None,
            profession: None,
            payment_from: Some(70000.0),
            payment_to: None,
            currency: None,
        });
        assert_eq!(predict_rub_salary(&no_currency), None);
    }

    #[test]
    fn test_estimate_from_bounds() {
        assert_eq!(estimate_from_bounds(Some(10.0), Some(20.0)), Some(15.0));
        assert_eq!(estimate_from_bounds(Some(10.0), None), Some(12.0));
        assert_eq!(estimate_from_bounds(None, Some(10.0)), Some(8.0));
        assert_eq!(estimate_from_bounds(None, None), None);
    }
}
