use crate::ac::{
    principal::Principal,
    role::Role,
};
use super::Agent;

impl Agent {
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            Agent::Anonymous => None,
            Agent::Principal(principal) => Some(principal),
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.principal().map(|principal| principal.role)
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Agent::Anonymous)
    }
}

impl From<Principal> for Agent {
    fn from(principal: Principal) -> Agent {
        Agent::Principal(principal)
    }
}

impl From<Option<Principal>> for Agent {
    fn from(principal: Option<Principal>) -> Agent {
        principal.map(Agent::Principal)
            .unwrap_or(Agent::Anonymous)
    }
}

impl From<Agent> for Option<Principal> {
    fn from(agent: Agent) -> Self {
        match agent {
            Agent::Anonymous => None,
            Agent::Principal(principal) => Some(principal),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn conversions() {
        let principal = Principal::new("7", "bob@example.com", None, Role::Sales);
        let agent: Agent = Some(principal.clone()).into();
        assert_eq!(agent.role(), Some(Role::Sales));
        assert_eq!(agent.to_string(), "<Principal:bob@example.com:sales>");
        assert_eq!(Option::<Principal>::from(agent), Some(principal));

        let agent: Agent = None.into();
        assert!(agent.is_anonymous());
        assert_eq!(agent.role(), None);
        assert_eq!(agent.to_string(), "<Agent:Anonymous>");
    }
}
