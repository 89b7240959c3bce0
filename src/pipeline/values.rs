use std::fmt;

use crate::config::TableConfig;
use crate::locate::{OffsetRule, OffsetRules};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Seat {
    Opponent,
    User,
}

/// Selects the normalization rule applied to raw OCR text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Stack,
    Bet,
    Bank,
}

/// The five values read from the table on every run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackedValue {
    OpponentBet,
    UserBet,
    OpponentStack,
    UserStack,
    Bank,
}

impl TrackedValue {
    /// Player-relative values, in the order they are read and logged.
    pub const PLAYER_VALUES: [TrackedValue; 4] = [
        TrackedValue::OpponentBet,
        TrackedValue::UserBet,
        TrackedValue::OpponentStack,
        TrackedValue::UserStack,
    ];

    /// Label written in front of the value in the session log.
    pub fn label(self) -> &'static str {
        match self {
            TrackedValue::OpponentBet => "Opponent's bet",
            TrackedValue::UserBet => "My bet",
            TrackedValue::OpponentStack => "Opponent's stack",
            TrackedValue::UserStack => "My stack",
            TrackedValue::Bank => "Bank",
        }
    }

    /// Whose avatar anchors the value; the bank has no anchor.
    pub fn seat(self) -> Option<Seat> {
        match self {
            TrackedValue::OpponentBet | TrackedValue::OpponentStack => Some(Seat::Opponent),
            TrackedValue::UserBet | TrackedValue::UserStack => Some(Seat::User),
            TrackedValue::Bank => None,
        }
    }

    pub fn kind(self) -> ValueKind {
        match self {
            TrackedValue::OpponentBet | TrackedValue::UserBet => ValueKind::Bet,
            TrackedValue::OpponentStack | TrackedValue::UserStack => ValueKind::Stack,
            TrackedValue::Bank => ValueKind::Bank,
        }
    }

    pub fn offset_rule(self, rules: &OffsetRules) -> Option<OffsetRule> {
        match self {
            TrackedValue::OpponentBet => Some(rules.bet_opponent),
            TrackedValue::UserBet => Some(rules.bet_user),
            TrackedValue::OpponentStack => Some(rules.stack_opponent),
            TrackedValue::UserStack => Some(rules.stack_user),
            TrackedValue::Bank => None,
        }
    }

    /// OCR language profile for this value's kind.
    pub fn language(self, config: &TableConfig) -> Option<&str> {
        match self.kind() {
            ValueKind::Stack => config.stack_language.as_deref(),
            ValueKind::Bet => config.bet_language.as_deref(),
            ValueKind::Bank => config.bank_language.as_deref(),
        }
    }

    /// The "Label: value" line for the session log.
    pub fn log_line(self, value: &str) -> String {
        format!("{}: {}", self.label(), value)
    }
}

impl fmt::Display for TrackedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything one run extracted. Values stay strings; nothing is parsed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableReading {
    pub opponent_bet: String,
    pub user_bet: String,
    pub opponent_stack: String,
    pub user_stack: String,
    pub bank: String,
}

impl TableReading {
    pub fn set(&mut self, value: TrackedValue, text: String) {
        let slot = match value {
            TrackedValue::OpponentBet => &mut self.opponent_bet,
            TrackedValue::UserBet => &mut self.user_bet,
            TrackedValue::OpponentStack => &mut self.opponent_stack,
            TrackedValue::UserStack => &mut self.user_stack,
            TrackedValue::Bank => &mut self.bank,
        };
        *slot = text;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_lines() {
        assert_eq!(TrackedValue::OpponentBet.log_line("200"), "Opponent's bet: 200");
        assert_eq!(TrackedValue::UserStack.log_line(""), "My stack: ");
        assert_eq!(TrackedValue::Bank.log_line("4500"), "Bank: 4500");
    }

    #[test]
    fn test_player_values_have_seat_and_rule() {
        let rules = OffsetRules::default();
        for value in TrackedValue::PLAYER_VALUES {
            assert!(value.seat().is_some(), "{value}");
            assert!(value.offset_rule(&rules).is_some(), "{value}");
        }
        assert_eq!(TrackedValue::Bank.seat(), None);
        assert_eq!(TrackedValue::Bank.offset_rule(&rules), None);
    }

    #[test]
    fn test_languages_follow_kind() {
        let config = TableConfig::default();
        assert_eq!(TrackedValue::OpponentBet.language(&config), Some("rus"));
        assert_eq!(TrackedValue::UserStack.language(&config), None);
        assert_eq!(TrackedValue::Bank.language(&config), Some("rus"));
    }

    #[test]
    fn test_reading_set() {
        let mut reading = TableReading::default();
        reading.set(TrackedValue::UserBet, "300".to_string());
        reading.set(TrackedValue::Bank, "4500".to_string());

        assert_eq!(reading.user_bet, "300");
        assert_eq!(reading.bank, "4500");
        assert_eq!(reading.opponent_bet, "");
    }
}
