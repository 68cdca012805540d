use super::{Statement, LOCK_TIMEOUT};

/// `SHOW <name>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowSetting {
    /// Name of the session setting
    pub name: String,
}

/// `SET <name> = <value>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetSetting {
    /// Name of the session setting
    pub name: String,

    /// The value to assign
    pub value: SettingValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    /// An integer, written bare (`SET lock_timeout = 0`)
    Integer(i64),

    /// A value previously read back with `SHOW`, written as a quoted string
    /// literal (`SET lock_timeout = '1s'`)
    Literal(String),
}

impl Statement {
    /// `SHOW lock_timeout`
    pub fn show_lock_timeout() -> Self {
        ShowSetting {
            name: LOCK_TIMEOUT.to_string(),
        }
        .into()
    }

    /// `SET lock_timeout = 0`, which disables the timeout for the session.
    pub fn disable_lock_timeout() -> Self {
        SetSetting {
            name: LOCK_TIMEOUT.to_string(),
            value: SettingValue::Integer(0),
        }
        .into()
    }

    /// `SET lock_timeout = '<value>'`
    pub fn set_lock_timeout(value: impl Into<String>) -> Self {
        SetSetting {
            name: LOCK_TIMEOUT.to_string(),
            value: SettingValue::Literal(value.into()),
        }
        .into()
    }
}

impl SetSetting {
    /// The value as it reads back through `SHOW`.
    pub fn display_value(&self) -> String {
        match &self.value {
            SettingValue::Integer(value) => value.to_string(),
            SettingValue::Literal(value) => value.clone(),
        }
    }
}

impl From<ShowSetting> for Statement {
    fn from(value: ShowSetting) -> Self {
        Self::ShowSetting(value)
    }
}

impl From<SetSetting> for Statement {
    fn from(value: SetSetting) -> Self {
        Self::SetSetting(value)
    }
}
