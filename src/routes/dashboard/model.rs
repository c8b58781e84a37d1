use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AnalyticsQuery {
    pub period: Option<String>,
}

/// 统计周期，未知取值回退到 7 天
pub fn period_days(period: Option<&str>) -> i32 {
    match period {
        Some("30d") => 30,
        Some("90d") => 90,
        _ => 7,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_period_falls_back_to_seven_days() {
        assert_eq!(period_days(Some("7d")), 7);
        assert_eq!(period_days(Some("30d")), 30);
        assert_eq!(period_days(Some("90d")), 90);
        assert_eq!(period_days(Some("1y")), 7);
        assert_eq!(period_days(None), 7);
    }
}
