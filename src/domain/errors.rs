/// 予約期間のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingPeriodError {
    /// 終了日時が開始日時より後ではない
    EndNotAfterStart,
}

impl std::fmt::Display for BookingPeriodError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingPeriodError::EndNotAfterStart => {
                write!(f, "Booking start must be before its end")
            }
        }
    }
}

/// 予約作成のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBookingError {
    /// 自分のアイテムは予約できない
    OwnItem,
    /// アイテムが貸出不可
    ItemUnavailable,
}

/// 予約の承認・却下のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecideBookingError {
    /// 既に承認または却下済み
    AlreadyDecided,
}

/// 状態フィルタのパースエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingStateError {
    /// 状態が指定されていない
    Missing,
    /// 未知の状態
    Unknown(String),
}

impl std::fmt::Display for BookingStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingStateError::Missing => write!(f, "State must not be null"),
            BookingStateError::Unknown(value) => write!(f, "Unknown state: {}", value),
        }
    }
}
