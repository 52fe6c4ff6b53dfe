use std::{
    fmt,
    str::FromStr,
};
use crate::error::ValueError;
use super::Action;

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(<&'static str>::from(*self))
    }
}

impl From<Action> for &'static str {
    fn from(action: Action) -> &'static str {
        match action {
            Action::Read => "read",
            Action::Write => "write",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Publish => "publish",
        }
    }
}

impl From<Action> for String {
    fn from(action: Action) -> String {
        action.to_string()
    }
}

impl FromStr for Action {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_ref() {
            "read" => Ok(Action::Read),
            "write" => Ok(Action::Write),
            "create" => Ok(Action::Create),
            "update" => Ok(Action::Update),
            "delete" => Ok(Action::Delete),
            "publish" => Ok(Action::Publish),
            // the wildcard is a policy grant, never a requested action
            _ => Err(ValueError::Unsupported(s.to_string())),
        }
    }
}

#[cfg(feature = "clap")]
mod clap {
    use ::clap::{
        ValueEnum,
        builder::PossibleValue,
    };
    use super::*;

    impl ValueEnum for Action {
        fn value_variants<'a>() -> &'a [Self] {
            &[
                Action::Read,
                Action::Write,
                Action::Create,
                Action::Update,
                Action::Delete,
                Action::Publish,
            ]
        }

        fn to_possible_value(&self) -> Option<PossibleValue> {
            Some(PossibleValue::new(<&'static str>::from(*self)))
        }
    }
}
