use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuleError {
    #[error("invalid date '{value}', expected format YYYY-MM-DD")]
    InvalidFormat { value: String },

    #[error("expiry date must be in the future")]
    PastDate,

    #[error(
        "requested completion progress ({requested}) must be higher than the current one ({current})"
    )]
    NotIncreasing { current: f32, requested: f32 },

    #[error("todo is already done")]
    AlreadyDone,

    #[error("a todo can only be marked as done")]
    DoneIrreversible,

    #[error("invalid period '{value}', expected one of: today, tomorrow, week")]
    InvalidPeriod { value: String },
}
