//! Scenario ranking.

use serde::Serialize;

use super::ScenarioMetrics;
use crate::config::RankingWeights;
use crate::models::Scenario;
use crate::observer::DispatchObserver;

/// Weighted overall score of a metric vector. Higher is better.
pub fn overall_score(metrics: &ScenarioMetrics, weights: &RankingWeights) -> f64 {
    let conflict_term = 100.0 - (metrics.platform_conflicts as f64 * 10.0).min(50.0);
    let express_term = 100.0 - (metrics.express_avg_position * 5.0).min(50.0);

    metrics.passenger_satisfaction * weights.satisfaction
        + metrics.efficiency_score * weights.efficiency
        + conflict_term * weights.conflicts
        + express_term * weights.express_position
}

/// A scenario with its metrics, score and 1-based rank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioRanking {
    pub rank: usize,
    pub overall_score: f64,
    pub metrics: ScenarioMetrics,
    pub scenario: Scenario,
}

/// Scores every scenario and ranks them by overall score, best first.
///
/// The sort is stable: equal scores keep catalog order.
pub fn rank_scenarios(
    scenarios: Vec<Scenario>,
    weights: &RankingWeights,
    observer: &dyn DispatchObserver,
) -> Vec<ScenarioRanking> {
    let mut rankings: Vec<ScenarioRanking> = scenarios
        .into_iter()
        .map(|scenario| {
            let metrics = ScenarioMetrics::calculate(&scenario);
            ScenarioRanking {
                rank: 0,
                overall_score: overall_score(&metrics, weights),
                metrics,
                scenario,
            }
        })
        .collect();

    rankings.sort_by(|a, b| b.overall_score.total_cmp(&a.overall_score));
    for (i, ranking) in rankings.iter_mut().enumerate() {
        ranking.rank = i + 1;
    }

    match rankings.first() {
        Some(best) => {
            observer.on_ranking_complete(Some(best.scenario.id.as_str()), best.overall_score)
        }
        None => observer.on_ranking_complete(None, 0.0),
    }

    rankings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ScenarioEntry, TrainRecord};
    use crate::observer::recording::RecordingObserver;
    use crate::observer::NullObserver;
    use std::sync::Arc;

    fn scenario(id: &str, delays: &[f64]) -> Scenario {
        let entries = delays
            .iter()
            .enumerate()
            .map(|(i, &d)| {
                ScenarioEntry::new(Arc::new(
                    TrainRecord::new(format!("{id}-{i}"))
                        .with_platform(i as u32 + 1)
                        .with_delay(d),
                ))
            })
            .collect();
        Scenario::new(id, id).with_ordering(entries)
    }

    #[test]
    fn test_overall_score_formula() {
        let metrics = ScenarioMetrics {
            total_trains: 4,
            total_delay: 40.0,
            avg_delay: 10.0,
            max_delay: 20.0,
            min_delay: 0.0,
            platform_conflicts: 2,
            express_avg_position: 3.0,
            passenger_satisfaction: 70.0,
            efficiency_score: 84.0,
        };
        // 0.4*70 + 0.3*84 + 0.2*(100-20) + 0.1*(100-15)
        let expected = 28.0 + 25.2 + 16.0 + 8.5;
        let score = overall_score(&metrics, &RankingWeights::default());
        assert!((score - expected).abs() < 1e-10);
    }

    #[test]
    fn test_penalty_terms_are_capped() {
        let metrics = ScenarioMetrics {
            total_trains: 1,
            total_delay: 0.0,
            avg_delay: 0.0,
            max_delay: 0.0,
            min_delay: 0.0,
            platform_conflicts: 100,
            express_avg_position: 100.0,
            passenger_satisfaction: 0.0,
            efficiency_score: 0.0,
        };
        let score = overall_score(&metrics, &RankingWeights::default());
        assert!((score - (0.2 * 50.0 + 0.1 * 50.0)).abs() < 1e-10);
    }

    #[test]
    fn test_ranks_descending() {
        let catalog = vec![
            scenario("SLOW", &[30.0, 30.0]),
            scenario("FAST", &[0.0, 0.0]),
            scenario("MID", &[10.0, 10.0]),
        ];
        let ranked = rank_scenarios(catalog, &RankingWeights::default(), &NullObserver);

        let ids: Vec<&str> = ranked.iter().map(|r| r.scenario.id.as_str()).collect();
        assert_eq!(ids, vec!["FAST", "MID", "SLOW"]);
        let ranks: Vec<usize> = ranked.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
        assert!(ranked.windows(2).all(|w| w[0].overall_score >= w[1].overall_score));
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let catalog = vec![
            scenario("B", &[5.0]),
            scenario("A", &[5.0]),
            scenario("C", &[5.0]),
        ];
        let ranked = rank_scenarios(catalog, &RankingWeights::default(), &NullObserver);
        let ids: Vec<&str> = ranked.iter().map(|r| r.scenario.id.as_str()).collect();
        assert_eq!(ids, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_reranking_is_deterministic() {
        let catalog = vec![
            scenario("X", &[3.0, 9.0]),
            scenario("Y", &[1.0, 2.0]),
            scenario("Z", &[3.0, 9.0]),
        ];
        let first = rank_scenarios(catalog.clone(), &RankingWeights::default(), &NullObserver);
        let second = rank_scenarios(catalog, &RankingWeights::default(), &NullObserver);
        assert_eq!(first, second);
    }

    #[test]
    fn test_notifies_observer() {
        let observer = RecordingObserver::default();
        rank_scenarios(vec![scenario("A", &[1.0])], &RankingWeights::default(), &observer);
        rank_scenarios(vec![], &RankingWeights::default(), &observer);
        assert_eq!(observer.snapshot().rankings, 2);
    }
}
