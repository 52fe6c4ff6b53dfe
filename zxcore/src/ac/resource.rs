use enumset::{
    EnumSet,
    EnumSetType,
};
use serde::{Deserialize, Serialize};

/// A protectable area of the admin back-office.
#[derive(Debug, EnumSetType, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Dashboard,
    Users,
    Customers,
    Sales,
    Plans,
    Products,
    Audit,
    Blog,
    Leads,
    ReferralCodes,
    SystemTest,
    Whitepapers,
    Seminars,
    Settings,
}

pub type Resources = EnumSet<Resource>;

mod impls;
