//! Condition and rule-set evaluation.
//!
//! # Semantics
//!
//! - A condition whose current value on either side is undefined is false
//!   (fails closed — insufficient lookback never fires).
//! - `CROSSES_ABOVE`/`CROSSES_BELOW` additionally require both previous
//!   values to be defined and never fire at bar index 0.
//! - A group fires when it has at least one condition and all of them
//!   hold. A rule set fires when any group fires; an empty rule set
//!   never fires (an empty exit rule set means "only stop-loss or
//!   take-profit can exit", not "always exit").

use crate::domain::condition::{Condition, ConditionGroup, Operand, Operator};
use crate::domain::indicator::{price, CacheKey, IndicatorCache, IndicatorName, IndicatorParams};
use crate::domain::kline::Kline;

/// Resolve one side of a condition at a bar index. Literals are defined
/// everywhere; PRICE bypasses the cache; anything else is a cache lookup.
fn resolve(
    name: IndicatorName,
    params: &IndicatorParams,
    klines: &[Kline],
    cache: &IndicatorCache,
    index: usize,
) -> Option<f64> {
    if name == IndicatorName::Price {
        return price::value_at(klines, params, index);
    }
    cache
        .get(&CacheKey {
            name,
            params: *params,
        })?
        .value_at(index)
}

fn resolve_operand(
    operand: Operand,
    params: &IndicatorParams,
    klines: &[Kline],
    cache: &IndicatorCache,
    index: usize,
) -> Option<f64> {
    match operand {
        Operand::Literal(value) => Some(value),
        Operand::Indicator(name) => resolve(name, params, klines, cache, index),
    }
}

pub fn evaluate_condition(
    condition: &Condition,
    klines: &[Kline],
    cache: &IndicatorCache,
    index: usize,
) -> bool {
    let current1 = resolve(
        condition.indicator1,
        &condition.indicator1_params,
        klines,
        cache,
        index,
    );
    let current2 = resolve_operand(
        condition.indicator2,
        &condition.indicator2_params,
        klines,
        cache,
        index,
    );

    let (Some(current1), Some(current2)) = (current1, current2) else {
        return false;
    };

    match condition.operator {
        Operator::GreaterThan => current1 > current2,
        Operator::LessThan => current1 < current2,
        Operator::CrossesAbove | Operator::CrossesBelow => {
            let Some(prev_index) = index.checked_sub(1) else {
                return false;
            };
            let prev1 = resolve(
                condition.indicator1,
                &condition.indicator1_params,
                klines,
                cache,
                prev_index,
            );
            let prev2 = resolve_operand(
                condition.indicator2,
                &condition.indicator2_params,
                klines,
                cache,
                prev_index,
            );
            let (Some(prev1), Some(prev2)) = (prev1, prev2) else {
                return false;
            };

            match condition.operator {
                Operator::CrossesAbove => prev1 <= prev2 && current1 > current2,
                Operator::CrossesBelow => prev1 >= prev2 && current1 < current2,
                _ => unreachable!(),
            }
        }
    }
}

/// OR over groups, AND within a group.
pub fn evaluate_groups(
    groups: &[ConditionGroup],
    klines: &[Kline],
    cache: &IndicatorCache,
    index: usize,
) -> bool {
    groups.iter().any(|group| {
        !group.conditions.is_empty()
            && group
                .conditions
                .iter()
                .all(|c| evaluate_condition(c, klines, cache, index))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::IndicatorSeries;
    use std::collections::HashMap;

    fn make_klines(closes: &[f64]) -> Vec<Kline> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Kline {
                timestamp: i as i64 * 3_600_000,
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 1000.0,
            })
            .collect()
    }

    fn price_condition(operator: Operator, rhs: Operand) -> Condition {
        Condition {
            id: "c".into(),
            indicator1: IndicatorName::Price,
            indicator1_params: IndicatorParams::default(),
            operator,
            indicator2: rhs,
            indicator2_params: IndicatorParams::default(),
        }
    }

    fn sma_params(period: u32) -> IndicatorParams {
        IndicatorParams {
            period: Some(period),
            ..Default::default()
        }
    }

    fn cache_with_sma(period: u32, values: Vec<Option<f64>>) -> IndicatorCache {
        let mut cache = HashMap::new();
        cache.insert(
            CacheKey {
                name: IndicatorName::Sma,
                params: sma_params(period),
            },
            IndicatorSeries::Simple(values),
        );
        cache
    }

    #[test]
    fn greater_than_against_literal() {
        let klines = make_klines(&[105.0]);
        let cond = price_condition(Operator::GreaterThan, Operand::Literal(100.0));
        assert!(evaluate_condition(&cond, &klines, &HashMap::new(), 0));

        let cond = price_condition(Operator::GreaterThan, Operand::Literal(110.0));
        assert!(!evaluate_condition(&cond, &klines, &HashMap::new(), 0));
    }

    #[test]
    fn less_than_against_literal() {
        let klines = make_klines(&[95.0]);
        let cond = price_condition(Operator::LessThan, Operand::Literal(100.0));
        assert!(evaluate_condition(&cond, &klines, &HashMap::new(), 0));
    }

    #[test]
    fn undefined_current_fails_closed() {
        let klines = make_klines(&[100.0, 101.0]);
        let cache = cache_with_sma(2, vec![None, None]);
        let mut cond = price_condition(Operator::GreaterThan, Operand::Indicator(IndicatorName::Sma));
        cond.indicator2_params = sma_params(2);
        assert!(!evaluate_condition(&cond, &klines, &cache, 1));
    }

    #[test]
    fn missing_cache_entry_fails_closed() {
        let klines = make_klines(&[100.0]);
        let mut cond = price_condition(Operator::GreaterThan, Operand::Indicator(IndicatorName::Sma));
        cond.indicator2_params = sma_params(20);
        assert!(!evaluate_condition(&cond, &klines, &HashMap::new(), 0));
    }

    #[test]
    fn crosses_above_never_fires_at_index_0() {
        let klines = make_klines(&[105.0]);
        let cond = price_condition(Operator::CrossesAbove, Operand::Literal(100.0));
        assert!(!evaluate_condition(&cond, &klines, &HashMap::new(), 0));
    }

    #[test]
    fn crosses_above_fires_on_transition() {
        let klines = make_klines(&[95.0, 105.0]);
        let cond = price_condition(Operator::CrossesAbove, Operand::Literal(100.0));
        assert!(evaluate_condition(&cond, &klines, &HashMap::new(), 1));
    }

    #[test]
    fn crosses_above_no_fire_when_already_above() {
        let klines = make_klines(&[105.0, 110.0]);
        let cond = price_condition(Operator::CrossesAbove, Operand::Literal(100.0));
        assert!(!evaluate_condition(&cond, &klines, &HashMap::new(), 1));
    }

    #[test]
    fn crosses_above_fires_from_exact_touch() {
        // prev == threshold counts as "was at or below".
        let klines = make_klines(&[100.0, 105.0]);
        let cond = price_condition(Operator::CrossesAbove, Operand::Literal(100.0));
        assert!(evaluate_condition(&cond, &klines, &HashMap::new(), 1));
    }

    #[test]
    fn crosses_below_fires_on_transition() {
        let klines = make_klines(&[105.0, 95.0]);
        let cond = price_condition(Operator::CrossesBelow, Operand::Literal(100.0));
        assert!(evaluate_condition(&cond, &klines, &HashMap::new(), 1));
        assert!(!evaluate_condition(&cond, &klines, &HashMap::new(), 0));
    }

    #[test]
    fn crossover_requires_defined_previous_values() {
        // SMA defined at the current bar but not the previous one.
        let klines = make_klines(&[100.0, 101.0, 102.0]);
        let cache = cache_with_sma(2, vec![None, None, Some(101.5)]);
        let mut cond = price_condition(Operator::CrossesAbove, Operand::Indicator(IndicatorName::Sma));
        cond.indicator2_params = sma_params(2);
        assert!(!evaluate_condition(&cond, &klines, &cache, 2));
    }

    #[test]
    fn indicator_vs_indicator_crossover() {
        let klines = make_klines(&[100.0, 101.0, 102.0, 103.0]);
        let mut cache = cache_with_sma(2, vec![None, None, Some(99.0), Some(102.0)]);
        cache.insert(
            CacheKey {
                name: IndicatorName::Sma,
                params: sma_params(3),
            },
            IndicatorSeries::Simple(vec![None, None, Some(100.0), Some(101.0)]),
        );

        let cond = Condition {
            id: "x".into(),
            indicator1: IndicatorName::Sma,
            indicator1_params: sma_params(2),
            operator: Operator::CrossesAbove,
            indicator2: Operand::Indicator(IndicatorName::Sma),
            indicator2_params: sma_params(3),
        };
        assert!(evaluate_condition(&cond, &klines, &cache, 3));
        assert!(!evaluate_condition(&cond, &klines, &cache, 2));
    }

    #[test]
    fn empty_rule_set_never_fires() {
        let klines = make_klines(&[105.0]);
        assert!(!evaluate_groups(&[], &klines, &HashMap::new(), 0));
    }

    #[test]
    fn empty_group_never_fires() {
        let klines = make_klines(&[105.0]);
        let groups = vec![ConditionGroup {
            id: "g".into(),
            conditions: vec![],
        }];
        assert!(!evaluate_groups(&groups, &klines, &HashMap::new(), 0));
    }

    #[test]
    fn group_requires_all_conditions() {
        let klines = make_klines(&[105.0]);
        let groups = vec![ConditionGroup {
            id: "g".into(),
            conditions: vec![
                price_condition(Operator::GreaterThan, Operand::Literal(100.0)),
                price_condition(Operator::GreaterThan, Operand::Literal(200.0)),
            ],
        }];
        assert!(!evaluate_groups(&groups, &klines, &HashMap::new(), 0));
    }

    #[test]
    fn any_group_suffices() {
        let klines = make_klines(&[105.0]);
        let groups = vec![
            ConditionGroup {
                id: "g1".into(),
                conditions: vec![price_condition(
                    Operator::GreaterThan,
                    Operand::Literal(200.0),
                )],
            },
            ConditionGroup {
                id: "g2".into(),
                conditions: vec![price_condition(
                    Operator::GreaterThan,
                    Operand::Literal(100.0),
                )],
            },
        ];
        assert!(evaluate_groups(&groups, &klines, &HashMap::new(), 0));
    }
}
