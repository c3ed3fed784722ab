use std::collections::BTreeMap;

use sqlx::PgPool;

use crate::dto::stats_dto::SiteCounters;
use crate::models::route::Difficulty;
use crate::utils::errors::AppResult;

/// Todas las dificultades aparecen, aunque no tengan rutas
fn with_every_difficulty(mut counts: BTreeMap<String, i64>) -> BTreeMap<String, i64> {
    for difficulty in Difficulty::ALL {
        counts.entry(difficulty.as_str().to_string()).or_insert(0);
    }
    counts
}

pub struct StatsRepository {
    pool: PgPool,
}

impl StatsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Calcular todos los contadores directamente en la base de datos
    pub async fn counters(&self) -> AppResult<SiteCounters> {
        let (routes, sites, featured_sites, available_activities, active_events): (i64, i64, i64, i64, i64) =
            sqlx::query_as(
                r#"
                SELECT
                    (SELECT COUNT(*) FROM routes),
                    (SELECT COUNT(*) FROM tourist_sites),
                    (SELECT COUNT(*) FROM tourist_sites WHERE featured),
                    (SELECT COUNT(*) FROM physical_activities WHERE available),
                    (SELECT COUNT(*) FROM events WHERE ends_at >= NOW())
                "#,
            )
            .fetch_one(&self.pool)
            .await?;

        Ok(SiteCounters {
            routes,
            sites,
            featured_sites,
            available_activities,
            active_events,
            establishments_by_kind: self
                .grouped("SELECT kind, COUNT(*) FROM establishments GROUP BY kind")
                .await?,
            transport_by_kind: self
                .grouped("SELECT kind, COUNT(*) FROM transports WHERE available GROUP BY kind")
                .await?,
            crafts_for_sale_by_category: self
                .grouped("SELECT category, COUNT(*) FROM crafts WHERE for_sale GROUP BY category")
                .await?,
            routes_by_difficulty: with_every_difficulty(
                self.grouped("SELECT difficulty::text, COUNT(*) FROM routes GROUP BY difficulty")
                    .await?,
            ),
        })
    }

    async fn grouped(&self, sql: &str) -> AppResult<BTreeMap<String, i64>> {
        let rows: Vec<(String, i64)> = sqlx::query_as(sql).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_difficulties_count_zero() {
        let counts = with_every_difficulty(BTreeMap::from([("media".to_string(), 4)]));
        assert_eq!(counts.len(), 3);
        assert_eq!(counts["facil"], 0);
        assert_eq!(counts["media"], 4);
        assert_eq!(counts["dificil"], 0);
    }
}
