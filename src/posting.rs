use serde::Deserialize;

/// HeadHunter vacancy, only the salary block is consumed
#[derive(Debug, Clone, Deserialize)]
pub struct HhVacancy {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub salary: Option<HhSalary>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HhSalary {
    pub from: Option<f64>,
    pub to: Option<f64>,
    pub currency: Option<String>,
}

/// SuperJob vacancy, salary fields sit at the top level
#[derive(Debug, Clone, Deserialize)]
pub struct SjVacancy {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub profession: Option<String>,
    pub payment_from: Option<f64>,
    pub payment_to: Option<f64>,
    pub currency: Option<String>,
}

/// A vacancy tagged with the board it was fetched from
#[derive(Debug, Clone)]
pub enum Posting {
    HeadHunter(HhVacancy),
    SuperJob(SjVacancy),
}

/// Salary fields reduced to a board-independent shape
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryFields<'a> {
    pub from: Option<f64>,
    pub to: Option<f64>,
    pub currency: Option<&'a str>,
}

/// Zero means "not specified" on both boards
fn bound(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

impl Posting {
    /// Currency code each board uses for rubles
    pub fn ruble_code(&self) -> &'static str {
        match self {
            Posting::HeadHunter(_) => "RUR",
            Posting::SuperJob(_) => "rub",
        }
    }

    pub fn salary_fields(&self) -> SalaryFields<'_> {
        match self {
            Posting::HeadHunter(vacancy) => match &vacancy.salary {
                Some(salary) => SalaryFields {
                    from: bound(salary.from),
                    to: bound(salary.to),
                    currency: salary.currency.as_deref(),
                },
                None => SalaryFields {
                    from: None,
                    to: None,
                    currency: None,
                },
            },
            Posting::SuperJob(vacancy) => SalaryFields {
                from: bound(vacancy.payment_from),
                to: bound(vacancy.payment_to),
                currency: vacancy.currency.as_deref(),
            },
        }
    }
}
