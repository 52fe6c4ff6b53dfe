use std::fmt::{
    Display,
    Formatter,
    Result,
};

use crate::ac::principal::Principal;
use super::Agent;

impl Display for Agent {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Agent::Anonymous => f.write_str("<Agent:Anonymous>"),
            Agent::Principal(Principal { email, role, .. }) =>
                write!(f, "<Principal:{email}:{role}>"),
        }
    }
}
