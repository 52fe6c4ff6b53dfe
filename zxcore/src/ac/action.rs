use enumset::{
    EnumSet,
    EnumSetType,
};
use serde::{Deserialize, Serialize};

/// An operation that may be performed on a [`Resource`].
///
/// [`Resource`]: crate::ac::resource::Resource
#[derive(Debug, EnumSetType, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Read,
    Write,
    Create,
    Update,
    Delete,
    Publish,
}

pub type Actions = EnumSet<Action>;

mod impls;
