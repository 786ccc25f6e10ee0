use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::BookingPeriodError;

/// 予約ID - ストアが採番する予約集約のID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BookingId(i64);

impl BookingId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// ユーザーID - ユーザー管理コンテキストへの参照
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(i64);

impl UserId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// アイテムID - カタログ管理コンテキストへの参照
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(i64);

impl ItemId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// 予約期間
///
/// 不変条件：start < end
/// 型システムでこの制約を強制し、逆転した期間を作成できないようにする。
/// デシリアライズも`new`を経由する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedPeriod")]
pub struct BookingPeriod {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

/// 検証前の期間（デシリアライズ用）
#[derive(Deserialize)]
struct UncheckedPeriod {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<UncheckedPeriod> for BookingPeriod {
    type Error = BookingPeriodError;

    fn try_from(period: UncheckedPeriod) -> Result<Self, Self::Error> {
        Self::new(period.start, period.end)
    }
}

impl BookingPeriod {
    /// 期間を作成する
    ///
    /// # エラー
    /// start >= end の場合は`BookingPeriodError::EndNotAfterStart`を返す
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, BookingPeriodError> {
        if start >= end {
            return Err(BookingPeriodError::EndNotAfterStart);
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// 時刻が期間内か（両端を含む）
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }
}

/// 予約ステータス
///
/// WAITINGが初期状態、APPROVEDとREJECTEDは終端状態。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    /// 承認待ち
    Waiting,
    /// 承認済み
    Approved,
    /// 却下
    Rejected,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Waiting => "WAITING",
            BookingStatus::Approved => "APPROVED",
            BookingStatus::Rejected => "REJECTED",
        }
    }

    /// 終端状態か（これ以上遷移できないか）
    pub fn is_terminal(&self) -> bool {
        !matches!(self, BookingStatus::Waiting)
    }

    /// 所有者の判断から遷移先のステータスを決める
    pub fn from_decision(approved: bool) -> Self {
        if approved {
            BookingStatus::Approved
        } else {
            BookingStatus::Rejected
        }
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WAITING" => Ok(BookingStatus::Waiting),
            "APPROVED" => Ok(BookingStatus::Approved),
            "REJECTED" => Ok(BookingStatus::Rejected),
            _ => Err(format!("Invalid booking status: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_booking_period_accepts_start_before_end() {
        let start = Utc::now();
        let period = BookingPeriod::new(start, start + Duration::hours(1)).unwrap();
        assert_eq!(period.start(), start);
        assert_eq!(period.end(), start + Duration::hours(1));
    }

    #[test]
    fn test_booking_period_rejects_equal_bounds() {
        let at = Utc::now();
        let result = BookingPeriod::new(at, at);
        assert_eq!(result.unwrap_err(), BookingPeriodError::EndNotAfterStart);
    }

    #[test]
    fn test_booking_period_rejects_reversed_bounds() {
        let start = Utc::now();
        let result = BookingPeriod::new(start, start - Duration::seconds(1));
        assert!(result.is_err());
    }

    #[test]
    fn test_booking_period_deserialize_checks_bounds() {
        let ordered = r#"{"start":"2030-01-01T00:00:00Z","end":"2030-01-02T00:00:00Z"}"#;
        let period: BookingPeriod = serde_json::from_str(ordered).unwrap();
        assert!(period.start() < period.end());

        let reversed = r#"{"start":"2030-01-02T00:00:00Z","end":"2030-01-01T00:00:00Z"}"#;
        let err = serde_json::from_str::<BookingPeriod>(reversed).unwrap_err();
        let expected = BookingPeriodError::EndNotAfterStart.to_string();
        assert!(err.to_string().starts_with(&expected));

        let equal = r#"{"start":"2030-01-01T00:00:00Z","end":"2030-01-01T00:00:00Z"}"#;
        assert!(serde_json::from_str::<BookingPeriod>(equal).is_err());
    }

    #[test]
    fn test_booking_period_contains_is_inclusive() {
        let start = Utc::now();
        let end = start + Duration::hours(2);
        let period = BookingPeriod::new(start, end).unwrap();
        assert!(period.contains(start));
        assert!(period.contains(end));
        assert!(!period.contains(end + Duration::seconds(1)));
        assert!(!period.contains(start - Duration::seconds(1)));
    }

    #[test]
    fn test_booking_status_terminal() {
        assert!(!BookingStatus::Waiting.is_terminal());
        assert!(BookingStatus::Approved.is_terminal());
        assert!(BookingStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_booking_status_from_decision() {
        assert_eq!(BookingStatus::from_decision(true), BookingStatus::Approved);
        assert_eq!(BookingStatus::from_decision(false), BookingStatus::Rejected);
    }

    #[test]
    fn test_booking_status_str_conversion() {
        for status in [
            BookingStatus::Waiting,
            BookingStatus::Approved,
            BookingStatus::Rejected,
        ] {
            assert_eq!(status.as_str().parse::<BookingStatus>(), Ok(status));
        }
        assert!("waiting".parse::<BookingStatus>().is_err());
    }
}
