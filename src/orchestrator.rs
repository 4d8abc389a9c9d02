use crate::boards::JobBoard;
use crate::error::AppError;
use crate::fetcher::fetch_vacancies;
use crate::retry::RetryPolicy;
use crate::stats::{LanguageStats, StatsReport};
use tracing::{error, info, warn};

/// Collect salary statistics for every language on one board.
///
/// The city is resolved once; an unknown city fails the whole run with
/// [`AppError::CityNotFound`]. A language whose fetch fails is logged and
/// reported with empty stats so the remaining languages still run.
pub async fn collect_statistics(
    board: &dyn JobBoard,
    city: &str,
    languages: &[String],
    policy: &RetryPolicy,
) -> Result<StatsReport, AppError> {
    let location = board
        .resolve_location(city)
        .await?
        .ok_or_else(|| AppError::CityNotFound {
            board: board.name().to_string(),
            city: city.trim().to_string(),
        })?;

    info!(
        "Collecting {} statistics for {} languages in {} (location {})",
        board.name(),
        languages.len(),
        city.trim(),
        location
    );

    let mut report = StatsReport::new();
    for language in languages {
        let stats = match fetch_vacancies(board, language, &location, policy).await {
            Ok(fetched) => {
                if fetched.interrupted {
                    warn!(
                        "{}: '{}' is based on {} of {} vacancies",
                        board.name(),
                        language,
                        fetched.postings.len(),
                        fetched.found
                    );
                }
                LanguageStats::from_postings(fetched.found, &fetched.postings)
            }
            Err(e) => {
                error!(
                    "{}: failed to fetch vacancies for '{}': {}",
                    board.name(),
                    language,
                    e
                );
                LanguageStats::empty()
            }
        };

        info!(
            "{}: {} found={} processed={} average={}",
            board.name(),
            language,
            stats.found,
            stats.processed,
            stats
                .average
                .map(|a| a.to_string())
                .unwrap_or_else(|| "N/A".to_string())
        );
        report.insert(language.as_str(), stats);
    }

    Ok(report)
}
