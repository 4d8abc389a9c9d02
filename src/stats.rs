use crate::posting::Posting;
use crate::salary::predict_rub_salary;
use serde::Serialize;

/// Salary statistics for one language on one board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LanguageStats {
    /// Board-reported total, independent of how many pages were fetched
    pub found: u64,
    /// Postings that yielded a salary estimate
    pub processed: u64,
    /// Rounded-down mean estimate, `None` when nothing was processed
    pub average: Option<u64>,
}

impl LanguageStats {
    /// Stats for a language whose fetch failed outright
    pub fn empty() -> Self {
        Self {
            found: 0,
            processed: 0,
            average: None,
        }
    }

    pub fn from_postings(found: u64, postings: &[Posting]) -> Self {
        let (processed, average) = calculate_stats(postings);
        Self {
            found,
            processed,
            average,
        }
    }
}

/// Count postings with a derivable salary and average their estimates
pub fn calculate_stats(postings: &[Posting]) -> (u64, Option<u64>) {
    let salaries: Vec<f64> = postings.iter().filter_map(predict_rub_salary).collect();

    let processed = salaries.len() as u64;
    if processed == 0 {
        return (0, None);
    }

    let sum: f64 = salaries.iter().sum();
    let average = (sum / processed as f64).floor() as u64;

    (processed, Some(average))
}

/// Per-language statistics for one board, in configured language order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatsReport {
    entries: Vec<(String, LanguageStats)>,
}

impl StatsReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append stats for a language; a repeated language replaces its earlier entry in place
    pub fn insert(&mut self, language: impl Into<String>, stats: LanguageStats) {
        let language = language.into();
        match self.entries.iter_mut().find(|(name, _)| *name == language) {
            Some(entry) => entry.1 = stats,
            None => self.entries.push((language, stats)),
        }
    }

    pub fn get(&self, language: &str) -> Option<&LanguageStats> {
        self.entries
            .iter()
            .find(|(name, _)| name == language)
            .map(|(_, stats)| stats)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LanguageStats)> {
        self.entries
            .iter()
            .map(|(name, stats)| (name.as_str(), stats))
    }

    pub fn languages(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Compact JSON form, used for debug logging
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
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

    fn sj(from: f64, to: f64, currency: &str) -> Posting {
        Posting::SuperJob(SjVacancy {
            id: None,
            profession: None,
            payment_from: Some(from),
            payment_to: Some(to),
            currency: Some(currency.to_string()),
        })
    }

    #[test]
    fn test_calculate_stats_floors_average() {
        let postings = vec![
            hh(Some(100000.0), Some(140000.0), "RUR"), // 120000
            hh(Some(100001.0), None, "RUR"),           // 120001.2
            hh(None, Some(100000.0), "RUR"),           // 80000
        ];

        let (processed, average) = calculate_stats(&postings);
        assert_eq!(processed, 3);
        // 320001.2 / 3 = 106667.07
        assert_eq!(average, Some(106667));
    }

    #[test]
    fn test_calculate_stats_skips_undetermined() {
        let postings = vec![
            sj(90000.0, 110000.0, "rub"),
            sj(5000.0, 0.0, "usd"),
            sj(0.0, 0.0, "rub"),
            Posting::HeadHunter(HhVacancy {
                id: None,
                name: None,
                salary: None,
            }),
        ];

        let (processed, average) = calculate_stats(&postings);
        assert_eq!(processed, 1);
        assert_eq!(average, Some(100000));
    }

    #[test]
    fn test_calculate_stats_nothing_processed() {
        assert_eq!(calculate_stats(&[]), (0, None));
        assert_eq!(
            calculate_stats(&[hh(Some(1000.0), None, "EUR")]),
            (0, None)
        );
    }

    #[test]
    fn test_language_stats_from_postings() {
        let stats = LanguageStats::from_postings(
            250,
            &[hh(Some(100000.0), Some(140000.0), "RUR")],
        );
        assert_eq!(
            stats,
            LanguageStats {
                found: 250,
                processed: 1,
                average: Some(120000),
            }
        );
        assert_eq!(LanguageStats::empty().average, None);
    }

    #[test]
    fn test_report_keeps_insertion_order() {
        let mut report = StatsReport::new();
        report.insert("Python", LanguageStats::empty());
        report.insert("C#", LanguageStats::empty());
        report.insert("Go", LanguageStats::empty());

        assert_eq!(report.languages(), vec!["Python", "C#", "Go"]);
        assert_eq!(report.len(), 3);
        assert!(!report.is_empty());
    }

    #[test]
    fn test_report_insert_replaces_existing_language() {
        let mut report = StatsReport::new();
        report.insert("Python", LanguageStats::empty());
        report.insert("Java", LanguageStats::empty());
        report.insert(
            "Python",
            LanguageStats {
                found: 10,
                processed: 2,
                average: Some(150000),
            },
        );

        assert_eq!(report.languages(), vec!["Python", "Java"]);
        assert_eq!(report.get("Python").unwrap().found, 10);
        assert!(report.get("Rust").is_none());
    }

    #[test]
    fn test_report_serialization() {
        let mut report = StatsReport::new();
        report.insert(
            "Kotlin",
            LanguageStats {
                found: 5,
                processed: 0,
                average: None,
            },
        );

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["entries"][0][0], "Kotlin");
        assert_eq!(json["entries"][0][1]["found"], 5);
        assert!(json["entries"][0][1]["average"].is_null());
    }
}
