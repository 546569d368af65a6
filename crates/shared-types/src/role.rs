wire_enum! {
    /// Role assigned to a user account. Authorization is decided by role alone.
    ///
    /// - `SuperAdmin`: platform operator, manages every organization.
    /// - `OrgAdmin`: administers a single organization.
    /// - `Hr`: people operations inside an organization.
    /// - `Manager`: leads a team, approves leave and expenses.
    /// - `Director`: oversees one or more departments.
    /// - `Payroll`: runs payroll and reimbursements.
    /// - `Employee`: self-service only.
    pub enum Role {
        SuperAdmin => ("SUPER_ADMIN", "Super Admin"),
        OrgAdmin => ("ORG_ADMIN", "Organization Admin"),
        Hr => ("HR", "HR"),
        Manager => ("MANAGER", "Manager"),
        Director => ("DIRECTOR", "Director"),
        Payroll => ("PAYROLL", "Payroll"),
        Employee => ("EMPLOYEE", "Employee"),
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Employee
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_wire_names_case_insensitively() {
        assert_eq!(Role::parse("SUPER_ADMIN"), Some(Role::SuperAdmin));
        assert_eq!(Role::parse("org_admin"), Some(Role::OrgAdmin));
        assert_eq!(Role::parse(" Manager "), Some(Role::Manager));
        assert_eq!(Role::parse("intern"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn serde_uses_screaming_snake_case() {
        let json = serde_json::to_string(&Role::OrgAdmin).unwrap();
        assert_eq!(json, "\"ORG_ADMIN\"");
        let parsed: Role = serde_json::from_str("\"PAYROLL\"").unwrap();
        assert_eq!(parsed, Role::Payroll);
    }

    #[test]
    fn unknown_role_fails_to_deserialize() {
        assert!(serde_json::from_str::<Role>("\"JANITOR\"").is_err());
    }

    #[test]
    fn all_roles_listed_once() {
        assert_eq!(Role::ALL.len(), 7);
        for role in Role::ALL {
            assert_eq!(Role::parse(role.as_str()), Some(*role));
        }
    }
}
