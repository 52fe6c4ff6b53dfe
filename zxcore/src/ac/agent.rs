use serde::{Deserialize, Serialize};
use super::principal::Principal;

#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub enum Agent {
    #[default]
    Anonymous,
    Principal(Principal),
}

mod display;
mod impls;
