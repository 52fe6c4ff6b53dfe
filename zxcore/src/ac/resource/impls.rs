use std::{
    fmt,
    str::FromStr,
};
use crate::error::ValueError;
use super::Resource;

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(<&'static str>::from(*self))
    }
}

impl From<Resource> for &'static str {
    fn from(resource: Resource) -> &'static str {
        match resource {
            Resource::Dashboard => "dashboard",
            Resource::Users => "users",
            Resource::Customers => "customers",
            Resource::Sales => "sales",
            Resource::Plans => "plans",
            Resource::Products => "products",
            Resource::Audit => "audit",
            Resource::Blog => "blog",
            Resource::Leads => "leads",
            Resource::ReferralCodes => "referral_codes",
            Resource::SystemTest => "system_test",
            Resource::Whitepapers => "whitepapers",
            Resource::Seminars => "seminars",
            Resource::Settings => "settings",
        }
    }
}

impl From<Resource> for String {
    fn from(resource: Resource) -> String {
        resource.to_string()
    }
}

impl FromStr for Resource {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_ref() {
            "dashboard" => Ok(Resource::Dashboard),
            "users" => Ok(Resource::Users),
            "customers" => Ok(Resource::Customers),
            "sales" => Ok(Resource::Sales),
            "plans" => Ok(Resource::Plans),
            "products" => Ok(Resource::Products),
            "audit" => Ok(Resource::Audit),
            "blog" => Ok(Resource::Blog),
            "leads" => Ok(Resource::Leads),
            "referral_codes" => Ok(Resource::ReferralCodes),
            "system_test" => Ok(Resource::SystemTest),
            "whitepapers" => Ok(Resource::Whitepapers),
            "seminars" => Ok(Resource::Seminars),
            "settings" => Ok(Resource::Settings),
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

    impl ValueEnum for Resource {
        fn value_variants<'a>() -> &'a [Self] {
            &[
                Resource::Dashboard,
                Resource::Users,
                Resource::Customers,
                Resource::Sales,
                Resource::Plans,
                Resource::Products,
                Resource::Audit,
                Resource::Blog,
                Resource::Leads,
                Resource::ReferralCodes,
                Resource::SystemTest,
                Resource::Whitepapers,
                Resource::Seminars,
                Resource::Settings,
            ]
        }

        fn to_possible_value(&self) -> Option<PossibleValue> {
            Some(PossibleValue::new(<&'static str>::from(*self)))
        }
    }
}

#[cfg(test)]
mod test {
    use enumset::EnumSet;
    use std::str::FromStr;
    use super::*;

    #[test]
    fn smoke() -> anyhow::Result<()> {
        assert_eq!(Resource::ReferralCodes.to_string(), "referral_codes");
        assert_eq!(Resource::ReferralCodes, Resource::from_str("referral-codes")?);
        assert_eq!(Resource::Audit, Resource::from_str("AUDIT")?);
        assert!(matches!(
            Resource::from_str("invoices")
                .expect_err("should be an error"),
            ValueError::Unsupported(s) if s == "invoices",
        ));
        Ok(())
    }

    #[test]
    fn string_form_roundtrips_for_every_variant() -> anyhow::Result<()> {
        for resource in EnumSet::<Resource>::all() {
            assert_eq!(resource, Resource::from_str(&resource.to_string())?);
        }
        Ok(())
    }
}
