use serde::Serialize;
use zxcore::ac::{
    action::Action,
    agent::Agent,
    resource::Resource,
    traits::Enforcer,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct NavItem {
    pub name: &'static str,
    pub href: &'static str,
    pub icon: &'static str,
    pub resource: Resource,
}

impl NavItem {
    const fn new(
        name: &'static str,
        href: &'static str,
        icon: &'static str,
        resource: Resource,
    ) -> Self {
        Self { name, href, icon, resource }
    }
}

pub const SIDEBAR: &[NavItem] = &[
    NavItem::new("Dashboard", "/admin", "LayoutDashboard", Resource::Dashboard),
    NavItem::new("Users", "/admin/users", "Users", Resource::Users),
    NavItem::new("Customers", "/admin/customers", "UserCircle", Resource::Customers),
    NavItem::new("Sales", "/admin/sales", "CreditCard", Resource::Sales),
    NavItem::new("Plans", "/admin/plans", "Package", Resource::Plans),
    NavItem::new("Products", "/admin/products", "ShoppingBag", Resource::Products),
    NavItem::new("Seminars", "/admin/seminars", "CalendarDays", Resource::Seminars),
    NavItem::new("Blog", "/admin/blog", "Newspaper", Resource::Blog),
    NavItem::new("Whitepapers", "/admin/whitepapers", "FileText", Resource::Whitepapers),
    NavItem::new("Audit Logs", "/admin/audit", "ScrollText", Resource::Audit),
];

/// The sidebar items whose resource the agent may read, in sidebar
/// order.  Anonymous agents get nothing.
pub fn navigation(enforcer: &dyn Enforcer, agent: &Agent) -> Vec<NavItem> {
    SIDEBAR.iter()
        .filter(|item| enforcer.enforce(agent, item.resource, Action::Read).is_allowed())
        .copied()
        .collect()
}
