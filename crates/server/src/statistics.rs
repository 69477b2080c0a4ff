//! Statistics API endpoints

use api_types::dashboard::TrendQuery;
use axum::{
    Json,
    extract::{Path, Query, State},
};
use engine::{CategoryAmount, MonthKey, TrendPoint};

use crate::{ServerError, month_param, server::ServerState};

/// Trend window when the request names no months.
pub(crate) const DEFAULT_TREND_MONTHS: usize = 6;
const MAX_TREND_MONTHS: u32 = 120;

fn trend_months(query: TrendQuery) -> Result<Vec<MonthKey>, ServerError> {
    match (query.months, query.last) {
        (Some(_), Some(_)) => Err(ServerError::Generic(
            "use either months or last, not both".to_string(),
        )),
        (Some(months), None) => {
            let months = months
                .split(',')
                .filter(|month| !month.trim().is_empty())
                .map(|month| month_param(month.trim()))
                .collect::<Result<Vec<_>, _>>()?;
            if months.len() > MAX_TREND_MONTHS as usize {
                return Err(ServerError::Generic(format!(
                    "at most {MAX_TREND_MONTHS} months per trend"
                )));
            }
            Ok(months)
        }
        (None, Some(last)) if last == 0 || last > MAX_TREND_MONTHS => Err(ServerError::Generic(
            format!("last must be between 1 and {MAX_TREND_MONTHS}"),
        )),
        (None, Some(last)) => Ok(MonthKey::current().window(last as usize)),
        (None, None) => Ok(MonthKey::current().window(DEFAULT_TREND_MONTHS)),
    }
}

/// `?months=2024-01,2024-02` keeps the given order; `?last=N` is the N
/// months ending with the current one.
pub async fn trend(
    State(state): State<ServerState>,
    Query(query): Query<TrendQuery>,
) -> Result<Json<Vec<TrendPoint>>, ServerError> {
    let months = trend_months(query)?;
    Ok(Json(state.engine.income_expense_trend(&months).await?))
}

pub async fn breakdown(
    State(state): State<ServerState>,
    Path(month): Path<String>,
) -> Result<Json<Vec<CategoryAmount>>, ServerError> {
    let month = month_param(&month)?;
    Ok(Json(state.engine.category_breakdown(month).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_months_keep_order() {
        let months = trend_months(TrendQuery {
            months: Some("2024-03, 2024-01,".to_string()),
            last: None,
        })
        .ok()
        .unwrap();
        let months: Vec<String> = months.into_iter().map(String::from).collect();
        assert_eq!(months, ["2024-03", "2024-01"]);
    }

    #[test]
    fn default_window_ends_this_month() {
        let months = trend_months(TrendQuery::default()).ok().unwrap();
        assert_eq!(months.len(), DEFAULT_TREND_MONTHS);
        assert_eq!(months.last(), Some(&MonthKey::current()));
    }

    #[test]
    fn explicit_months_share_the_window_cap() {
        let list = |count: usize| vec!["2024-01"; count].join(",");
        assert!(
            trend_months(TrendQuery {
                months: Some(list(MAX_TREND_MONTHS as usize + 1)),
                last: None,
            })
            .is_err()
        );
        let months = trend_months(TrendQuery {
            months: Some(list(MAX_TREND_MONTHS as usize)),
            last: None,
        })
        .ok()
        .unwrap();
        assert_eq!(months.len(), MAX_TREND_MONTHS as usize);
    }

    #[test]
    fn rejects_conflicting_or_empty_windows() {
        assert!(
            trend_months(TrendQuery {
                months: Some("2024-01".to_string()),
                last: Some(2),
            })
            .is_err()
        );
        assert!(
            trend_months(TrendQuery {
                months: None,
                last: Some(0),
            })
            .is_err()
        );
        assert!(
            trend_months(TrendQuery {
                months: Some("January".to_string()),
                last: None,
            })
            .is_err()
        );
    }
}
