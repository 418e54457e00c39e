// src/report/catalog.rs
//! Report definitions. Each report declares its filter schema as data and the
//! generic engines validate against it.

use serde_json::Value;

use crate::auth::roles::Role;
use crate::report::filters::{FilterField, FilterState, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purpose {
    View,
    Export,
}

#[derive(Debug)]
pub struct Column {
    /// Keys tried in order against each row object.
    pub keys: &'static [&'static str],
    pub label: &'static str,
}

#[derive(Debug)]
pub struct ReportSpec {
    pub key: &'static str,
    pub title: &'static str,
    pub query_path: &'static str,
    pub export_path: &'static str,
    pub page_size: u64,
    /// Filter inputs rendered on the page, required or not.
    pub shows: &'static [FilterField],
    pub view_requires: &'static [FilterField],
    pub export_requires: &'static [FilterField],
    pub roles: &'static [Role],
    pub columns: &'static [Column],
}

impl ReportSpec {
    pub fn required(&self, purpose: Purpose) -> &'static [FilterField] {
        match purpose {
            Purpose::View => self.view_requires,
            Purpose::Export => self.export_requires,
        }
    }

    pub fn validate(&self, filters: &FilterState, purpose: Purpose) -> Result<(), ValidationError> {
        filters.validate(self.required(purpose))
    }

    pub fn has_input(&self, field: FilterField) -> bool {
        self.shows.contains(&field)
    }

    pub fn allows(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn href(&self) -> String {
        format!("/reports/{}", self.key)
    }
}

impl Column {
    pub fn cell(&self, row: &Value) -> String {
        let found = self
            .keys
            .iter()
            .filter_map(|k| row.get(*k))
            .find(|v| !v.is_null());

        match found {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => (if *b { "Yes" } else { "No" }).to_string(),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }
}

const EVERYONE: &[Role] = &[Role::Admin, Role::SubAdmin, Role::Rbi, Role::Vle];

pub static REPORTS: [ReportSpec; 4] = [
    ReportSpec {
        key: "district-status",
        title: "District Status",
        query_path: "/reports/district-status",
        export_path: "/reports/district-status/export",
        page_size: 10,
        shows: &[FilterField::District, FilterField::DateRange],
        view_requires: &[],
        export_requires: &[],
        roles: &[Role::Admin, Role::SubAdmin, Role::Rbi],
        columns: &[
            Column { keys: &["district", "district_name"], label: "District" },
            Column { keys: &["division"], label: "Division" },
            Column { keys: &["workshops", "workshop_count"], label: "Workshops" },
            Column { keys: &["citizens", "citizen_count"], label: "Citizens" },
            Column { keys: &["status"], label: "Status" },
        ],
    },
    ReportSpec {
        key: "gender-participation",
        title: "Gender Participation",
        query_path: "/reports/gender-participation",
        export_path: "/reports/gender-participation/export",
        page_size: 8,
        shows: &[FilterField::District],
        view_requires: &[FilterField::District],
        export_requires: &[FilterField::District],
        roles: &[Role::Admin, Role::Rbi],
        columns: &[
            Column { keys: &["workshop_name", "workshop"], label: "Workshop" },
            Column { keys: &["male", "male_count"], label: "Male" },
            Column { keys: &["female", "female_count"], label: "Female" },
            Column { keys: &["other", "other_count"], label: "Other" },
            Column { keys: &["total"], label: "Total" },
        ],
    },
    ReportSpec {
        key: "citizen-records",
        title: "Citizen Records",
        query_path: "/reports/citizens",
        export_path: "/reports/citizens/export",
        page_size: 5,
        shows: &[FilterField::District, FilterField::DateRange],
        view_requires: &[FilterField::District, FilterField::DateRange],
        export_requires: &[FilterField::District],
        roles: &[Role::Admin, Role::SubAdmin, Role::Vle],
        columns: &[
            Column { keys: &["name", "citizen_name"], label: "Name" },
            Column { keys: &["gender"], label: "Gender" },
            Column { keys: &["mobile", "mobile_no"], label: "Mobile" },
            Column { keys: &["village", "location"], label: "Village" },
            Column { keys: &["workshop_date", "date"], label: "Workshop Date" },
        ],
    },
    ReportSpec {
        key: "workshop-schedule",
        title: "Workshop Schedule",
        query_path: "/reports/workshops",
        export_path: "/reports/workshops/export",
        page_size: 10,
        shows: &[FilterField::District, FilterField::DateRange],
        view_requires: &[FilterField::DateRange],
        export_requires: &[FilterField::DateRange],
        roles: EVERYONE,
        columns: &[
            Column { keys: &["title", "workshop_name"], label: "Workshop" },
            Column { keys: &["district"], label: "District" },
            Column { keys: &["venue", "location"], label: "Venue" },
            Column { keys: &["date", "workshop_date"], label: "Date" },
            Column { keys: &["vle_name", "conducted_by"], label: "Conducted By" },
        ],
    },
];

pub fn find(key: &str) -> Option<&'static ReportSpec> {
    REPORTS.iter().find(|r| r.key == key)
}

pub fn for_role(role: Role) -> impl Iterator<Item = &'static ReportSpec> {
    REPORTS.iter().filter(move |r| r.allows(role))
}
