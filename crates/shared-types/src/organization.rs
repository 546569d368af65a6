use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

use crate::Searchable;

/// Optional modules an organization can switch on or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Module {
    Attendance,
    Leave,
    Payroll,
    Training,
    Expenses,
    Documents,
}

impl Module {
    pub const ALL: &'static [Module] = &[
        Module::Attendance,
        Module::Leave,
        Module::Payroll,
        Module::Training,
        Module::Expenses,
        Module::Documents,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Module::Attendance => "Attendance",
            Module::Leave => "Leave",
            Module::Payroll => "Payroll",
            Module::Training => "Training",
            Module::Expenses => "Expenses",
            Module::Documents => "Documents",
        }
    }
}

/// Per-organization module switches. Every module defaults to enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleToggles {
    #[serde(default = "enabled")]
    pub attendance_enabled: bool,
    #[serde(default = "enabled")]
    pub leave_enabled: bool,
    #[serde(default = "enabled")]
    pub payroll_enabled: bool,
    #[serde(default = "enabled")]
    pub training_enabled: bool,
    #[serde(default = "enabled")]
    pub expenses_enabled: bool,
    #[serde(default = "enabled")]
    pub documents_enabled: bool,
}

fn enabled() -> bool {
    true
}

impl Default for ModuleToggles {
    fn default() -> Self {
        Self {
            attendance_enabled: true,
            leave_enabled: true,
            payroll_enabled: true,
            training_enabled: true,
            expenses_enabled: true,
            documents_enabled: true,
        }
    }
}

impl ModuleToggles {
    pub fn is_enabled(&self, module: Module) -> bool {
        match module {
            Module::Attendance => self.attendance_enabled,
            Module::Leave => self.leave_enabled,
            Module::Payroll => self.payroll_enabled,
            Module::Training => self.training_enabled,
            Module::Expenses => self.expenses_enabled,
            Module::Documents => self.documents_enabled,
        }
    }

    pub fn set(&mut self, module: Module, on: bool) {
        let slot = match module {
            Module::Attendance => &mut self.attendance_enabled,
            Module::Leave => &mut self.leave_enabled,
            Module::Payroll => &mut self.payroll_enabled,
            Module::Training => &mut self.training_enabled,
            Module::Expenses => &mut self.expenses_enabled,
            Module::Documents => &mut self.documents_enabled,
        };
        *slot = on;
    }
}

/// A tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: i64,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default = "enabled")]
    pub is_active: bool,
    #[serde(flatten)]
    pub modules: ModuleToggles,
}

impl Searchable for Organization {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.code.as_str()];
        if let Some(email) = &self.email {
            fields.push(email);
        }
        fields
    }
}

/// Request DTO for creating or replacing an organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct OrganizationRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Organization name is required"))
    )]
    pub name: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, max = 20, message = "Code must be 1-20 characters"))
    )]
    pub code: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub is_active: bool,
    #[serde(flatten)]
    pub modules: ModuleToggles,
}

impl Default for OrganizationRequest {
    fn default() -> Self {
        Self {
            name: String::new(),
            code: String::new(),
            email: None,
            phone: None,
            address: None,
            website: None,
            is_active: true,
            modules: ModuleToggles::default(),
        }
    }
}

impl From<&Organization> for OrganizationRequest {
    fn from(o: &Organization) -> Self {
        Self {
            name: o.name.clone(),
            code: o.code.clone(),
            email: o.email.clone(),
            phone: o.phone.clone(),
            address: o.address.clone(),
            website: o.website.clone(),
            is_active: o.is_active,
            modules: o.modules,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggles_decode_flat_and_default_on() {
        let org: Organization = serde_json::from_str(
            r#"{"id":1,"name":"Acme","code":"ACME","payroll_enabled":false}"#,
        )
        .unwrap();
        assert!(org.is_active);
        assert!(!org.modules.is_enabled(Module::Payroll));
        assert!(org.modules.is_enabled(Module::Leave));
    }

    #[test]
    fn request_serializes_toggles_at_top_level() {
        let mut req = OrganizationRequest {
            name: "Acme".into(),
            code: "ACME".into(),
            ..Default::default()
        };
        req.modules.set(Module::Training, false);
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["training_enabled"], false);
        assert_eq!(value["expenses_enabled"], true);
    }
}
