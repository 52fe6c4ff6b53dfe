use serde::{Deserialize, Serialize};

/// Outcome of a permission evaluation.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Allowed,
    #[default]
    Denied,
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed)
    }
}

impl From<bool> for Decision {
    fn from(value: bool) -> Self {
        if value {
            Decision::Allowed
        } else {
            Decision::Denied
        }
    }
}

impl From<Decision> for bool {
    fn from(value: Decision) -> Self {
        value.is_allowed()
    }
}
