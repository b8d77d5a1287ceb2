#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};
    use uuid::Uuid;

    use crate::{
        error::Error,
        model::content_strategy::ContentStrategy,
        strategy::*,
        util::now,
    };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn strategy_for(target_month: NaiveDate) -> ContentStrategy {
        ContentStrategy {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            strategy: "LinkedIn thought leadership".into(),
            target_month,
            approved: false,
            created_at: now(),
            updated_at: now(),
        }
    }

    #[test]
    fn test_monthly_limit_by_tier() {
        assert_eq!(30, calculate_monthly_limit("free"));
        assert_eq!(100, calculate_monthly_limit("pro"));
        assert_eq!(999999, calculate_monthly_limit("enterprise"));
        assert_eq!(30, calculate_monthly_limit("trialing"));
        assert_eq!(30, calculate_monthly_limit(""));
        assert_eq!(100, calculate_monthly_limit(" Pro "));
    }

    #[test]
    fn test_strategy_status() {
        let today = date(2024, 6, 15);
        assert_eq!(StrategyStatus::Old, get_strategy_status(date(2024, 5, 1), today));
        assert_eq!(StrategyStatus::Old, get_strategy_status(date(2023, 12, 1), today));
        assert_eq!(StrategyStatus::Current, get_strategy_status(date(2024, 6, 1), today));
        assert_eq!(StrategyStatus::Current, get_strategy_status(date(2024, 6, 30), today));
        assert_eq!(StrategyStatus::Upcoming, get_strategy_status(date(2024, 7, 1), today));
        assert_eq!(StrategyStatus::Upcoming, get_strategy_status(date(2025, 1, 1), today));
        // Later year, earlier month.
        assert_eq!(StrategyStatus::Upcoming, get_strategy_status(date(2025, 3, 1), date(2024, 11, 2)));
        assert_eq!("upcoming", StrategyStatus::Upcoming.to_string());
    }

    #[test]
    fn test_find_strategy_for_month() {
        let strategies = vec![
            strategy_for(date(2024, 7, 1)),
            strategy_for(date(2024, 6, 1)),
            strategy_for(date(2023, 6, 1)),
        ];
        let found = find_strategy_for_month(&strategies, 2024, 6).unwrap();
        assert_eq!(strategies[1].id, found.id);
        assert!(find_strategy_for_month(&strategies, 2024, 8).is_none());
    }

    #[test]
    fn test_monthly_limit_compute() {
        let free = MonthlyLimit::compute("free", 12);
        assert_eq!(
            MonthlyLimit {
                limit: 30,
                used: 12,
                remaining: 18,
                is_unlimited: false,
                can_create: true
            },
            free
        );

        let exhausted = MonthlyLimit::compute("pro", 130);
        assert_eq!(0, exhausted.remaining);
        assert!(!exhausted.can_create);

        let enterprise = MonthlyLimit::compute("enterprise", 5000);
        assert!(enterprise.is_unlimited);
        assert!(enterprise.can_create);
    }

    #[test]
    fn test_next_month() {
        assert_eq!(date(2024, 7, 1), next_month(date(2024, 6, 30)));
        assert_eq!(date(2025, 1, 1), next_month(date(2024, 12, 31)));
    }

    #[test]
    fn test_month_bounds() {
        let (start, end) = month_bounds(2024, 12).unwrap();
        assert_eq!(Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap(), start);
        assert_eq!(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(), end);
        assert!(matches!(month_bounds(2024, 13), Err(Error::ParamError(_))));
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(date(2024, 2, 1), parse_month("2024-02").unwrap());
        assert!(matches!(parse_month("2024-2-30"), Err(Error::ParamError(_))));
        assert!(matches!(parse_month("february"), Err(Error::ParamError(_))));
    }
}
